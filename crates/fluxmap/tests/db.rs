use fluxmap::{
    series, Client, Config, Db, FluxRecord, FluxTable, Point, Result, Timestamp, Value,
};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

series! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct CpuSample {
        measurement = "cpu";
        tag host: String,
        time at: Option<Timestamp>,
        field f1: i64,
        field f2: i64,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DeleteCall {
    start: Timestamp,
    stop: Timestamp,
    predicate: String,
    bucket: String,
    org: String,
}

#[derive(Debug, Default)]
struct MockClient {
    writes: Mutex<Vec<Point>>,
    queries: Mutex<Vec<String>>,
    deletes: Mutex<Vec<DeleteCall>>,
    response: Mutex<Vec<FluxTable>>,
}

impl MockClient {
    fn respond_with(&self, tables: Vec<FluxTable>) {
        *self.response.lock().unwrap() = tables;
    }
}

#[async_trait]
impl Client for MockClient {
    async fn write_point(&self, point: Point) -> Result<()> {
        self.writes.lock().unwrap().push(point);
        Ok(())
    }

    async fn query(&self, flux: &str) -> Result<Vec<FluxTable>> {
        self.queries.lock().unwrap().push(flux.to_string());
        Ok(self.response.lock().unwrap().clone())
    }

    async fn delete(
        &self,
        start: Timestamp,
        stop: Timestamp,
        predicate: &str,
        bucket: &str,
        org: &str,
    ) -> Result<()> {
        self.deletes.lock().unwrap().push(DeleteCall {
            start,
            stop,
            predicate: predicate.to_string(),
            bucket: bucket.to_string(),
            org: org.to_string(),
        });
        Ok(())
    }
}

fn setup() -> (Arc<MockClient>, Db) {
    let client = Arc::new(MockClient::default());
    let config = Config {
        url: "http://localhost:8086".to_string(),
        org: "acme".to_string(),
        token: "secret".to_string(),
        bucket: "metrics".to_string(),
    };
    let db = Db::new(client.clone(), config);
    (client, db)
}

#[tokio::test]
async fn write_encodes_and_submits_one_point() {
    let (client, db) = setup();

    let sample = CpuSample {
        host: "web1".to_string(),
        at: Some("2024-03-01T10:00:00Z".parse().unwrap()),
        f1: 12,
        f2: 34,
    };
    db.write(&sample).await.unwrap();

    let writes = client.writes.lock().unwrap();
    assert_eq!(writes.len(), 1);
    let point = &writes[0];
    assert_eq!(point.measurement(), "cpu");
    assert_eq!(point.tags().get("host").map(String::as_str), Some("web1"));
    assert_eq!(point.fields().get("f1"), Some(&Value::I64(12)));
    assert_eq!(point.fields().get("f2"), Some(&Value::I64(34)));
}

#[derive(Debug, Default)]
struct NotMappable;

impl fluxmap::Series for NotMappable {
    fn schema() -> Result<fluxmap::schema::SeriesSchema> {
        fluxmap::schema::SeriesBuilder::new().build()
    }

    fn get(&self, _attr: &str) -> Value {
        Value::Null
    }

    fn set(&mut self, _attr: &str, _value: Value) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn writing_an_unmappable_type_is_a_no_op() {
    let (client, db) = setup();
    db.write(&NotMappable).await.unwrap();
    assert!(client.writes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn five_minute_query_builds_the_expected_flux() {
    let (client, db) = setup();
    client.respond_with(vec![]);

    let decoded = db
        .query_by_five_minutes_with_fields::<CpuSample>("cpu", &["f1", "f2"])
        .await
        .unwrap();
    assert!(decoded.rows.is_empty());

    let queries = client.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0],
        "from(bucket: \"metrics\") |> range(start: -1d) \
          |> filter(fn: (r) => r._measurement == \"cpu\") \
          |> filter(fn: (r) =>  r._field == \"f1\" or r._field == \"f2\") \
          |> aggregateWindow(every: 5m, fn: mean, createEmpty: true)"
    );
}

#[tokio::test]
async fn raw_query_decodes_position_aligned_tables() {
    let (client, db) = setup();

    let mut f1 = FluxTable::default();
    f1.push(FluxRecord::new().with_field("f1", 1.0).with_column("host", "web1"));
    f1.push(FluxRecord::new().with_field("f1", 2.0).with_column("host", "web1"));
    let mut f2 = FluxTable::default();
    f2.push(FluxRecord::new().with_field("f2", 10.0));
    f2.push(FluxRecord::new().with_field("f2", 20.0));
    client.respond_with(vec![f1, f2]);

    let decoded = db.query_raw::<CpuSample>("cpu").await.unwrap();
    assert!(decoded.failures.is_empty());
    assert_eq!(decoded.rows.len(), 2);
    assert_eq!(decoded.rows[0].f1, 1);
    assert_eq!(decoded.rows[0].f2, 10);
    assert_eq!(decoded.rows[0].host, "web1");
    assert_eq!(decoded.rows[1].f1, 2);
    assert_eq!(decoded.rows[1].f2, 20);
}

#[tokio::test]
async fn delete_before_one_month_spans_two_years_back() {
    let (client, db) = setup();
    db.delete_before_one_month("cpu").await.unwrap();

    let deletes = client.deletes.lock().unwrap();
    assert_eq!(deletes.len(), 1);
    let call = &deletes[0];
    assert_eq!(call.predicate, "_measurement=\"cpu\"");
    assert_eq!(call.bucket, "metrics");
    assert_eq!(call.org, "acme");
    assert!(call.start < call.stop);
    assert!(call.stop < Timestamp::now());
}

#[tokio::test]
async fn delete_all_ends_at_now() {
    let (client, db) = setup();
    let before = Timestamp::now();
    db.delete_all("cpu").await.unwrap();

    let deletes = client.deletes.lock().unwrap();
    let call = &deletes[0];
    assert_eq!(call.predicate, "_measurement=\"cpu\"");
    assert!(call.start < before);
    assert!(call.stop >= before);
}

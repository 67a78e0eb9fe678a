use crate::{Client, Config};

use fluxmap_core::decode::{self, Decoded};
use fluxmap_core::query::{self, Granularity};
use fluxmap_core::{point, Result, Series};

use jiff::{Timestamp, ToSpan, Zoned};
use std::sync::Arc;

/// Handle pairing a connected [`Client`] with its [`Config`].
///
/// All convenience operations below are thin compositions of the pure mapping
/// core with one client call; the client owns every I/O concern.
#[derive(Debug, Clone)]
pub struct Db {
    client: Arc<dyn Client>,
    config: Config,
}

impl Db {
    pub fn new(client: Arc<dyn Client>, config: Config) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes and writes one instance. A type that is not mappable is a
    /// no-op, not an error.
    pub async fn write<T: Series + 'static>(&self, instance: &T) -> Result<()> {
        let Some(point) = point::encode(instance)? else {
            return Ok(());
        };
        self.client.write_point(point).await
    }

    /// Raw points over the last day.
    pub async fn query_raw<T>(&self, measurement: &str) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, &[], Granularity::Raw).await
    }

    pub async fn query_raw_with_fields<T>(
        &self,
        measurement: &str,
        fields: &[&str],
    ) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, fields, Granularity::Raw).await
    }

    /// 1-minute means over the last day.
    pub async fn query_by_minute<T>(&self, measurement: &str) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, &[], Granularity::Minute).await
    }

    pub async fn query_by_minute_with_fields<T>(
        &self,
        measurement: &str,
        fields: &[&str],
    ) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, fields, Granularity::Minute).await
    }

    /// 5-minute means over the last day, on whole 5-minute boundaries.
    pub async fn query_by_five_minutes<T>(&self, measurement: &str) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, &[], Granularity::FiveMinutes)
            .await
    }

    pub async fn query_by_five_minutes_with_fields<T>(
        &self,
        measurement: &str,
        fields: &[&str],
    ) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, fields, Granularity::FiveMinutes)
            .await
    }

    /// Hourly means over the last 7 days, on whole hours.
    pub async fn query_by_hour<T>(&self, measurement: &str) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, &[], Granularity::Hour).await
    }

    pub async fn query_by_hour_with_fields<T>(
        &self,
        measurement: &str,
        fields: &[&str],
    ) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, fields, Granularity::Hour).await
    }

    /// Daily means over the last month, on whole days.
    pub async fn query_by_day<T>(&self, measurement: &str) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, &[], Granularity::Day).await
    }

    pub async fn query_by_day_with_fields<T>(
        &self,
        measurement: &str,
        fields: &[&str],
    ) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        self.query_granular(measurement, fields, Granularity::Day).await
    }

    /// A canned-granularity query against the default bucket.
    pub async fn query_granular<T>(
        &self,
        measurement: &str,
        fields: &[&str],
        granularity: Granularity,
    ) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        let flux = granularity.query(&self.config.bucket, measurement, fields);
        self.run_query(&flux).await
    }

    /// A general aggregation query with explicit start and window.
    pub async fn query_aggregate<T>(
        &self,
        measurement: &str,
        fields: &[&str],
        start: &str,
        every: &str,
    ) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        let flux = query::aggregate(&self.config.bucket, measurement, fields, start, every);
        self.run_query(&flux).await
    }

    async fn run_query<T>(&self, flux: &str) -> Result<Decoded<T>>
    where
        T: Series + Default + 'static,
    {
        let tables = self.client.query(flux).await?;
        decode::decode(&tables)
    }

    /// Deletes the measurement's points older than one month (lookback capped
    /// at two years).
    pub async fn delete_before_one_month(&self, measurement: &str) -> Result<()> {
        let now = Zoned::now();
        let start = now.checked_sub(2.years())?.timestamp();
        let stop = now.checked_sub(1.months())?.timestamp();
        self.delete_range(measurement, start, stop).await
    }

    /// Deletes all of the measurement's points (lookback capped at a hundred
    /// years).
    pub async fn delete_all(&self, measurement: &str) -> Result<()> {
        let now = Zoned::now();
        let start = now.checked_sub(100.years())?.timestamp();
        self.delete_range(measurement, start, now.timestamp()).await
    }

    async fn delete_range(
        &self,
        measurement: &str,
        start: Timestamp,
        stop: Timestamp,
    ) -> Result<()> {
        let predicate = format!("_measurement=\"{measurement}\"");
        self.client
            .delete(start, stop, &predicate, &self.config.bucket, &self.config.org)
            .await
    }
}

use fluxmap_core::flux::FluxTable;
use fluxmap_core::point::Point;
use fluxmap_core::Result;

use async_trait::async_trait;
use jiff::Timestamp;
use std::fmt::Debug;

/// Connection settings for a timeseries backend, consumed as given.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub org: String,
    pub token: String,

    /// Default bucket for writes and queries.
    pub bucket: String,
}

/// Capability exposed by a connected timeseries client.
///
/// fluxmap ships no implementation: connection management, transport, and
/// retry policy all live behind this trait, outside the mapping core.
#[async_trait]
pub trait Client: Debug + Send + Sync + 'static {
    /// Submits one write point.
    async fn write_point(&self, point: Point) -> Result<()>;

    /// Executes a Flux query and returns the result tables in backend order.
    async fn query(&self, flux: &str) -> Result<Vec<FluxTable>>;

    /// Deletes points in `[start, stop]` matching the predicate.
    async fn delete(
        &self,
        start: Timestamp,
        stop: Timestamp,
        predicate: &str,
        bucket: &str,
        org: &str,
    ) -> Result<()>;
}

mod client;
pub use client::{Client, Config};

mod db;
pub use db::Db;

pub use fluxmap_core::decode::{decode, Decoded, RowFailure};
pub use fluxmap_core::flux::{FluxRecord, FluxTable};
pub use fluxmap_core::point::{encode, Point};
pub use fluxmap_core::query::{self, Granularity};
pub use fluxmap_core::schema::{self, series_name};
pub use fluxmap_core::{bail, err, series};
pub use fluxmap_core::{ColumnValue, Error, Result, Series, Timestamp, Value};

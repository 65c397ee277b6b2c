//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Request building and fetch-and-decode for 7timer.info and sunrise-sunset.org
//! - Lookup tables turning 7timer's coded fields into readable ranges
//! - CSV export of a forecast series
//! - Configuration handling
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod export;
pub mod interpret;
pub mod model;
pub mod provider;

pub use config::{Config, ExportConfig, ProviderConfig};
pub use error::{ErrorKind, SkycastError};
pub use export::{export_forecast_csv, write_forecast_csv};
pub use interpret::EntryReport;
pub use model::{Coordinates, ForecastEntry, ForecastResponse, SunTimesResponse};
pub use provider::{Provider, ProviderId, SevenTimerProvider, SunriseSunsetProvider};

//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - Configuration resolution (process environment plus an on-disk file)
//! - The OpenWeather fetcher
//! - The archiver and its object-store seam (S3 in production)
//! - Shared domain models (readings and their typed summaries)
//!
//! It is used by `dashboard-cli`, but can also be reused by other binaries or services.

pub mod archive;
pub mod config;
pub mod model;
pub mod openweather;
pub mod store;

pub use archive::{ArchiveError, Archiver, BucketStatus};
pub use config::{Config, FileConfig};
pub use model::{ReadingSummary, WeatherReading};
pub use openweather::{FetchError, OpenWeatherClient, WeatherFetcher};
pub use store::{ObjectStore, S3Store, StoreError};

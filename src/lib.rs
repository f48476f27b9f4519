//! nearby-institutes - Collect educational institutions from OpenStreetMap
//! and export them as CSV, JSON or XLSX

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod extract;
pub mod logging;
pub mod osm;
pub mod table;

pub use domain::{CanonicalRecord, Category, RawRecord, classify};
pub use error::{ExportError, LocateError};
pub use extract::{Field, extract};

use thiserror::Error;

/// Failures while resolving a location to coordinates
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Location not found via Nominatim: {0}")]
    NotFound(String),

    #[error(
        "Nominatim returned 403 Forbidden.\n\
         This often occurs when the request lacks a proper User-Agent or contact email.\n\
         Set the environment variable `OSM_EMAIL` (or `contact_email` in the config file) \
         to your contact email and retry, e.g.:\n  \
         OSM_EMAIL=you@example.com nearby-institutes -l \"Shonir Akhra\" -r 3000 -o res.csv"
    )]
    Forbidden,

    #[error("IP geolocation response has no usable `loc` field (got {0:?})")]
    MissingIpLocation(Option<String>),

    #[error("{service} returned error status: {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Failed to send request to {service}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse {service} response: {detail}")]
    Decode {
        service: &'static str,
        detail: String,
    },
}

/// Failures while writing an output file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(
        "Writing .xlsx requires the `xlsx` feature. Reinstall with: cargo install nearby-institutes --features xlsx"
    )]
    XlsxUnavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

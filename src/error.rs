//! Error types for the rugby club companion tools

use thiserror::Error;


pub type Result<T> = std::result::Result<T, BrError>;

#[derive(Error, Debug)]
pub enum BrError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Gateway rejected {endpoint}: status {status}")]
    Status { endpoint: String, status: String },

    #[error("Gateway returned no data for {endpoint}")]
    NoData { endpoint: String },

    #[error("Access key not provided and {env_var} environment variable not set")]
    MissingAccessKey { env_var: String },

    #[error("No team selected")]
    NoTeamSelected,

    #[error("League for team {team} is not known yet")]
    LeagueUnknown { team: String },

    #[error("Unknown field '{field}', expected one of: {expected}")]
    UnknownField { field: String, expected: String },

    #[error("Export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl BrError {
    /// Network or payload decoding failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, BrError::Http(_) | BrError::Json(_))
    }

    /// The gateway answered, but the envelope did not report success.
    pub fn is_business(&self) -> bool {
        matches!(self, BrError::Status { .. } | BrError::NoData { .. })
    }
}

//! Error types for nullog

use chrono::NaiveDate;

/// Result alias using the nullog error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during logbook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The portal rejected the session and a single re-authentication did not recover it
    #[error("session expired and re-authentication failed")]
    AuthExpired,

    /// Transport-level failure (connection, TLS, timeout). Never retried by the gateway.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A gateway call was made with an empty or unknown month header id
    #[error("invalid logbook header id")]
    InvalidHeader,

    /// The months listing contained no usable rows
    #[error("no usable month data returned by the portal")]
    NoMonthData,

    /// No month header exists for the requested calendar month
    #[error("no logbook header for {month}/{year}")]
    NoLogbookForMonth {
        /// Calendar month (1-12)
        month: u32,
        /// Calendar year
        year: i32,
    },

    /// A filled entry already exists for the date and overwrite was not requested
    #[error("entry for {0} is already filled")]
    AlreadyFilled(NaiveDate),

    /// The portal returned a non-success or unparseable response to a save call
    #[error("gateway error: {0}")]
    Gateway(String),

    /// Session state could not be loaded or refreshed
    #[error("session error: {0}")]
    Session(String),

    /// Batch aborted before any submission: requested months absent from the portal
    #[error("batch aborted, months not present in the logbook system: {}", .0.join(", "))]
    BatchAborted(Vec<String>),

    /// Batch input could not be read or violated a semantic constraint
    #[error("input error: {0}")]
    Input(String),

    /// Response body did not match the expected wire shape
    #[error("parse error: {0}")]
    Parse(String),
}

// src/error.rs
use std::path::PathBuf;

/// Configuration and caller errors.
///
/// Data-quality outcomes (unparseable time text, empty extraction, no opening
/// within the horizon) are ordinary values and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum HoursError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown weekday {name:?} in schedule for {entity}")]
    UnknownWeekday { entity: String, name: String },

    #[error("lookahead horizon must be at least one day")]
    InvalidHorizon,

    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid timestamp {0:?} (expected YYYY-MM-DDTHH:MM)")]
    InvalidTimestamp(String),
}

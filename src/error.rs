use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Tracker(#[from] TrackerError),

    #[error("{0}")]
    Report(#[from] ReportError),
}

/// Malformed or unreadable category configuration. Fatal at startup.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("Cannot read category file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse category file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Category name must not be empty")]
    EmptyName,

    #[error("Duplicate category name \"{name}\"")]
    DuplicateName { name: String },

    #[error("Subcategory \"{name}\" cannot have its own subcategories")]
    TooDeep { name: String },

    #[error("Invalid reminder duration \"{input}\" for \"{name}\"")]
    InvalidDuration { name: String, input: String },
}

#[derive(Debug, Error)]
pub(crate) enum TrackerError {
    #[error("{bin} not found. Please install timewarrior or pass --timew.")]
    NotFound { bin: String },

    #[error("Failed to run {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{bin} exited with {code}: {stderr}")]
    Failed {
        bin: String,
        code: i32,
        stderr: String,
    },

    #[error("Invalid UTF-8 from tracker: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum StatusParseError {
    #[error("status has no Total line")]
    MissingTotal,

    #[error("malformed elapsed time \"{input}\" (expected HH:MM:SS)")]
    InvalidElapsed { input: String },
}

#[derive(Debug, Error)]
pub(crate) enum ReportError {
    #[error("cannot generate summary: {0}")]
    Export(#[from] TrackerError),

    #[error("cannot parse export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot parse time \"{input}\": {source}")]
    Timestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}

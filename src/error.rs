// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thiserror::Error;

use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{}: missing field '{}'", .path.display(), .field)]
    MissingField { path: PathBuf, field: &'static str },
    #[error("failed to render {}: {}", .path.display(), .message)]
    Render { path: PathBuf, message: String },
    #[error("failed to read config {}: {}", .path.display(), .source)]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {}", .path.display(), .source)]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("{0}")]
    Usage(clap::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Result records written by the solver at the end of each run.

use crate::error::{Error, Result};

use serde_derive::*;

use std::fmt;
use std::path::Path;

/// The timing key extracted from each record. All of them are in seconds.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AverageTimestep,
    MaxTimestep,
    MinTimestep,
    TotalSimTime,
}

impl Default for Metric {
    fn default() -> Self {
        Metric::AverageTimestep
    }
}

impl Metric {
    /// the key this metric is stored under in a record
    pub fn field(self) -> &'static str {
        match self {
            Metric::AverageTimestep => "average_timestep",
            Metric::MaxTimestep => "max_timestep",
            Metric::MinTimestep => "min_timestep",
            Metric::TotalSimTime => "total_sim_time",
        }
    }

    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "average_timestep" => Some(Metric::AverageTimestep),
            "max_timestep" => Some(Metric::MaxTimestep),
            "min_timestep" => Some(Metric::MinTimestep),
            "total_sim_time" => Some(Metric::TotalSimTime),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// One solver run. Keys the solver does not write are tolerated.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BenchmarkRecord {
    total_sim_time: Option<f64>,
    average_timestep: Option<f64>,
    max_timestep: Option<f64>,
    min_timestep: Option<f64>,
    #[serde(rename = "N")]
    steps: Option<u64>,
    #[serde(rename = "Nx")]
    nx: Option<u64>,
    #[serde(rename = "Ny")]
    ny: Option<u64>,
    time: Option<f64>,
}

impl BenchmarkRecord {
    /// Read and parse the record at `path`. The file is closed before this
    /// returns, on success or failure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse a record already read from `path`.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// value of `metric` in seconds, if the record has it
    pub fn seconds(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::AverageTimestep => self.average_timestep,
            Metric::MaxTimestep => self.max_timestep,
            Metric::MinTimestep => self.min_timestep,
            Metric::TotalSimTime => self.total_sim_time,
        }
    }

    /// Value of `metric` converted to milliseconds. `path` only labels the
    /// error when the key is absent.
    pub fn milliseconds(&self, metric: Metric, path: &Path) -> Result<f64> {
        self.seconds(metric)
            .map(|seconds| seconds * 1000.0)
            .ok_or_else(|| Error::MissingField {
                path: path.to_path_buf(),
                field: metric.field(),
            })
    }

    pub fn steps(&self) -> Option<u64> {
        self.steps
    }

    pub fn nx(&self) -> Option<u64> {
        self.nx
    }

    pub fn ny(&self) -> Option<u64> {
        self.ny
    }

    pub fn time(&self) -> Option<f64> {
        self.time
    }
}

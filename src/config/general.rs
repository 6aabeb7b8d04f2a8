// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::Comparison;
use crate::record::Metric;

use log::Level;
use serde_derive::*;

use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    preset: Option<Comparison>,
    #[serde(default = "default_directory")]
    directory: PathBuf,
    #[serde(default)]
    metric: Metric,
    #[serde(with = "LevelDef")]
    #[serde(default = "default_logging_level")]
    logging: Level,
}

impl General {
    /// preset named in a config file, if any
    pub fn preset(&self) -> Option<Comparison> {
        self.preset
    }

    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    pub fn logging(&self) -> Level {
        self.logging
    }

    pub fn set_logging(&mut self, level: Level) {
        self.logging = level;
    }
}

impl Default for General {
    fn default() -> General {
        General {
            preset: None,
            directory: default_directory(),
            metric: Default::default(),
            logging: default_logging_level(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
#[serde(remote = "Level")]
#[serde(deny_unknown_fields)]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_logging_level() -> Level {
    Level::Info
}

// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Loads one timing series per backend across a progression of grid sizes.

use crate::config::Backend;
use crate::error::{Error, Result};
use crate::record::{BenchmarkRecord, Metric};

use serde_derive::*;

use std::path::{Path, PathBuf};

/// Grid sizes `start, start + step, ...`, `count` terms long.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Progression {
    #[serde(default = "default_start")]
    start: usize,
    #[serde(default = "default_step")]
    step: usize,
    #[serde(default = "default_count")]
    count: usize,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            start: default_start(),
            step: default_step(),
            count: default_count(),
        }
    }
}

fn default_start() -> usize {
    100
}

fn default_step() -> usize {
    100
}

fn default_count() -> usize {
    30
}

impl Progression {
    pub fn new(start: usize, step: usize, count: usize) -> Self {
        Self { start, step, count }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn set_start(&mut self, start: usize) {
        self.start = start;
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn set_step(&mut self, step: usize) {
        self.step = step;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    /// the last grid size, or `None` if the progression overflows `usize`
    pub fn last(&self) -> Option<usize> {
        self.step
            .checked_mul(self.count.saturating_sub(1))
            .and_then(|offset| self.start.checked_add(offset))
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidConfig("grid count must be non-zero".to_owned()));
        }
        if self.step == 0 {
            return Err(Error::InvalidConfig("grid step must be non-zero".to_owned()));
        }
        if self.last().is_none() {
            return Err(Error::InvalidConfig(format!(
                "grid progression overflows: start: {} step: {} count: {}",
                self.start, self.step, self.count
            )));
        }
        Ok(())
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        let Progression { start, step, count } = *self;
        (0..count).map(move |i| start + i * step)
    }
}

/// Millisecond timings for one backend, one value per grid size.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    label: String,
    values: Vec<f64>,
}

impl Series {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self {
            label: label.as_ref().to_owned(),
            values: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn push(&mut self, value: f64) {
        self.values.push(value);
    }
}

/// Grid sizes and the series measured at them. Every series has the same
/// length as `grid_sizes` and index `i` of each refers to `grid_sizes[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    grid_sizes: Vec<usize>,
    series: Vec<Series>,
}

impl Dataset {
    pub fn grid_sizes(&self) -> &[usize] {
        &self.grid_sizes
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.grid_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid_sizes.is_empty()
    }

    /// `(grid size, milliseconds)` pairs for the series at `index`
    pub(crate) fn points(&self, index: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.grid_sizes
            .iter()
            .zip(self.series[index].values().iter())
            .map(|(&size, &ms)| (size as f64, ms))
    }

    /// the largest value across all series
    pub fn max_value(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|series| series.values().iter().copied())
            .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))))
    }
}

pub struct Loader {
    directory: PathBuf,
    progression: Progression,
    metric: Metric,
}

impl Loader {
    pub fn new(progression: Progression) -> Self {
        Self {
            directory: PathBuf::from("."),
            progression,
            metric: Metric::default(),
        }
    }

    pub fn directory(&mut self, directory: impl AsRef<Path>) -> &mut Self {
        self.directory = directory.as_ref().to_path_buf();
        self
    }

    pub fn metric(&mut self, metric: Metric) -> &mut Self {
        self.metric = metric;
        self
    }

    /// Read one record per backend per grid size. The first file that
    /// cannot be opened, parsed, or lacks the metric aborts the whole load.
    pub fn load(&self, backends: &[Backend]) -> Result<Dataset> {
        self.progression.validate()?;
        for backend in backends {
            backend.template()?;
        }
        debug!(
            "loading {} series over {} grid sizes from {}",
            backends.len(),
            self.progression.count(),
            self.directory.display()
        );

        let mut grid_sizes = Vec::with_capacity(self.progression.count());
        let mut series: Vec<Series> = backends
            .iter()
            .map(|backend| Series::new(backend.label()))
            .collect();

        for size in self.progression.sizes() {
            for (backend, series) in backends.iter().zip(series.iter_mut()) {
                let path = self.directory.join(backend.filename(size)?);
                let record = BenchmarkRecord::load(&path)?;
                let ms = record.milliseconds(self.metric, &path)?;
                debug!(
                    "{}: {}: {} ms (steps: {:?} grid: {:?}x{:?})",
                    path.display(),
                    self.metric,
                    ms,
                    record.steps(),
                    record.nx(),
                    record.ny()
                );
                series.push(ms);
            }
            grid_sizes.push(size);
        }

        Ok(Dataset { grid_sizes, series })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_progression() {
        let sizes: Vec<usize> = Progression::default().sizes().collect();
        assert_eq!(sizes.len(), 30);
        assert_eq!(sizes[0], 100);
        assert_eq!(sizes[1], 200);
        assert_eq!(sizes[29], 3000);
        assert_eq!(Progression::default().last(), Some(3000));
    }

    #[test]
    fn custom_progression() {
        let sizes: Vec<usize> = Progression::new(64, 64, 4).sizes().collect();
        assert_eq!(sizes, vec![64, 128, 192, 256]);
    }

    #[test]
    fn invalid_progression() {
        assert!(Progression::new(100, 100, 0).validate().is_err());
        assert!(Progression::new(100, 0, 30).validate().is_err());
        assert!(Progression::new(usize::MAX, 1, 2).validate().is_err());
        assert!(Progression::default().validate().is_ok());
    }

    #[test]
    fn max_value() {
        let dataset = Dataset {
            grid_sizes: vec![100, 200],
            series: vec![
                Series {
                    label: "a".to_owned(),
                    values: vec![1.0, 4.0],
                },
                Series {
                    label: "b".to_owned(),
                    values: vec![2.0, 3.0],
                },
            ],
        };
        assert_eq!(dataset.max_value(), Some(4.0));
        assert_eq!(
            dataset.points(1).collect::<Vec<_>>(),
            vec![(100.0, 2.0), (200.0, 3.0)]
        );

        let empty = Dataset {
            grid_sizes: Vec::new(),
            series: vec![Series::new("a")],
        };
        assert_eq!(empty.max_value(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn invalid_backend_fails_before_reading() {
        let loader = Loader::new(Progression::default());
        let backends = vec![Backend::new("GPU", "GPU_CLEULER.json")];
        assert!(matches!(
            loader.load(&backends),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn overflowing_progression_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(format!("A_{}.json", usize::MAX)),
            "{\"average_timestep\": 0.001}",
        )
        .unwrap();

        let result = Loader::new(Progression::new(usize::MAX, 1, 2))
            .directory(dir.path())
            .load(&[Backend::new("A", "A_{sx}.json")]);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let result = Loader::new(Progression::new(100, 100, 0))
            .directory(dir.path())
            .load(&[Backend::new("A", "A_{sx}.json")]);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}

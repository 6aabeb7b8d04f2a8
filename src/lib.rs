// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

mod config;
mod error;
mod logger;
mod plot;
mod record;
mod series;

pub use crate::config::*;
pub use crate::error::{Error, Result};
pub use crate::logger::Logger;
pub use crate::plot::render;
pub use crate::record::{BenchmarkRecord, Metric};
pub use crate::series::{Dataset, Loader, Progression, Series};

/// Load every series named by `config` and write the chart. Nothing is
/// drawn unless every record loads.
pub fn run(config: &Config) -> Result<Dataset> {
    config.print();

    let dataset = Loader::new(config.grid())
        .directory(config.general().directory())
        .metric(config.general().metric())
        .load(config.backends())?;

    info!("-----");
    for series in dataset.series() {
        let values = series.values();
        info!(
            "Series: {} Points: {} First: {:.3} ms Last: {:.3} ms",
            series.label(),
            values.len(),
            values.first().copied().unwrap_or(0.0),
            values.last().copied().unwrap_or(0.0),
        );
    }

    info!("Saving chart as: {}", config.chart().output().display());
    render(config.chart(), &dataset)?;

    Ok(dataset)
}

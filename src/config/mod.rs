// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod backend;
mod chart;
mod general;

pub use self::backend::{Backend, Device, Solver, SIZE_PLACEHOLDER};
pub use self::chart::Chart;
pub use self::general::General;

use self::chart::ChartSection;
use crate::error::{Error, Result};
use crate::record::Metric;
use crate::series::Progression;

use clap::{App, Arg, ArgMatches};
use log::Level;
use serde_derive::*;

use std::ffi::OsString;
use std::path::Path;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The comparisons the solver's benchmark runs were made for. Each one
/// supplies the backends, title, and output file of one graph.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// OpenCL Euler solver on the GPU against the same solver on the CPU
    CpuGpu,
    /// OpenCL against OpenGL implementations of the Euler solver
    Euler,
}

impl Comparison {
    pub fn name(self) -> &'static str {
        match self {
            Comparison::CpuGpu => "cpu-gpu-perf-graph",
            Comparison::Euler => "euler-perf-graph",
        }
    }

    fn backends(self) -> Vec<Backend> {
        match self {
            Comparison::CpuGpu => vec![
                Backend::solver("GPU", Device::Gpu, Solver::ClEuler),
                Backend::solver("CPU", Device::Cpu, Solver::ClEuler),
            ],
            Comparison::Euler => vec![
                Backend::solver("OpenCL", Device::Gpu, Solver::ClEuler),
                Backend::solver("OpenGL", Device::Gpu, Solver::GlEuler),
            ],
        }
    }

    fn chart(self) -> Chart {
        match self {
            Comparison::CpuGpu => Chart::new("Euler CPU vs GPU Performance", "cpu_gpu_perf_graph.png"),
            Comparison::Euler => {
                Chart::new("Euler OpenCL vs OpenGL Performance", "euler_perf_graph.png")
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    general: General,
    grid: Progression,
    backends: Vec<Backend>,
    chart: Chart,
}

/// A config file as written on disk. Sections that are left out keep the
/// values of the preset.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    general: General,
    #[serde(default)]
    grid: Progression,
    backend: Option<Vec<Backend>>,
    #[serde(default)]
    chart: ChartSection,
}

impl Config {
    /// The builtin configuration of a comparison: the grid sizes, file
    /// names, and chart published for it.
    pub fn preset(comparison: Comparison) -> Config {
        Config {
            general: Default::default(),
            grid: Default::default(),
            backends: comparison.backends(),
            chart: comparison.chart(),
        }
    }

    /// parse command line options and return `Config`, exiting on error
    pub fn new(comparison: Comparison) -> Config {
        match Self::from_args(comparison, std::env::args_os()) {
            Ok(config) => config,
            Err(Error::Usage(e)) => e.exit(),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    }

    pub fn from_args<I, T>(comparison: Comparison, args: I) -> Result<Config>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app(comparison)
            .get_matches_from_safe(args)
            .map_err(Error::Usage)?;

        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(comparison, Path::new(file))?
        } else {
            Config::preset(comparison)
        };

        if let Some(directory) = matches.value_of("directory") {
            config.general.set_directory(directory);
        }

        if let Some(metric) = matches.value_of("metric") {
            let metric = Metric::from_field(metric)
                .ok_or_else(|| Error::InvalidConfig(format!("unknown metric: {}", metric)))?;
            config.general.set_metric(metric);
        }

        if let Some(start) = parse_numeric_arg(&matches, "start")? {
            config.grid.set_start(start);
        }

        if let Some(step) = parse_numeric_arg(&matches, "step")? {
            config.grid.set_step(step);
        }

        if let Some(count) = parse_numeric_arg(&matches, "count")? {
            config.grid.set_count(count);
        }

        if let Some(title) = matches.value_of("title") {
            config.chart.set_title(title);
        }

        if let Some(output) = matches.value_of("output") {
            config.chart.set_output(output);
        }

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => config.general.set_logging(Level::Debug),
            _ => config.general.set_logging(Level::Trace),
        }

        config.validate()?;

        Ok(config)
    }

    /// Layer a TOML config over a preset. A `preset` key in `[general]`
    /// replaces the one passed in.
    pub fn load_from_str(comparison: Comparison, content: &str, path: &Path) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        let comparison = file.general.preset().unwrap_or(comparison);
        let mut config = Config::preset(comparison);
        config.general = file.general;
        config.grid = file.grid;
        if let Some(backends) = file.backend {
            config.backends = backends;
        }
        config.chart.apply(&file.chart);

        config.validate()?;

        Ok(config)
    }

    pub fn load_from_file(comparison: Comparison, path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Config::load_from_str(comparison, &content, path)
    }

    fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if self.backends.is_empty() {
            return Err(Error::InvalidConfig("no backends".to_owned()));
        }
        for backend in &self.backends {
            backend.template()?;
        }
        Ok(())
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn grid(&self) -> Progression {
        self.grid
    }

    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// get logging level
    pub fn logging(&self) -> Level {
        self.general.logging()
    }

    pub fn print(&self) {
        info!("-----");
        info!(
            "Config: Directory: {} Metric: {}",
            self.general.directory().display(),
            self.general.metric()
        );
        info!(
            "Config: Grid: Start: {} Step: {} Count: {} Last: {}",
            self.grid.start(),
            self.grid.step(),
            self.grid.count(),
            self.grid
                .last()
                .map(|v| format!("{}", v))
                .unwrap_or_else(|| "Overflow".to_string()),
        );
        for backend in &self.backends {
            info!(
                "Config: Backend: {} Files: {}",
                backend.label(),
                backend
                    .template()
                    .unwrap_or_else(|_| "Invalid".to_string()),
            );
        }
        let (width, height) = self.chart.size();
        info!(
            "Config: Chart: \"{}\" Output: {} Size: {}x{}",
            self.chart.title(),
            self.chart.output().display(),
            width,
            height,
        );
    }
}

fn app(comparison: Comparison) -> App<'static, 'static> {
    App::new(comparison.name())
        .version(VERSION)
        .author("Brian Martin <bmartin@twitter.com>")
        .about("Graph solver timings across grid sizes")
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("directory")
                .long("directory")
                .value_name("DIR")
                .help("Directory holding the result files")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("FILE")
                .help("Chart image to write, .svg for vector output")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("metric")
                .long("metric")
                .value_name("NAME")
                .help("Timing field to plot")
                .possible_value("average_timestep")
                .possible_value("max_timestep")
                .possible_value("min_timestep")
                .possible_value("total_sim_time")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("start")
                .long("start")
                .value_name("SIZE")
                .help("First grid size")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("step")
                .long("step")
                .value_name("SIZE")
                .help("Grid size increment")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("count")
                .long("count")
                .value_name("COUNT")
                .help("Number of grid sizes")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("title")
                .long("title")
                .value_name("TEXT")
                .help("Chart caption")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
}

/// a helper function to parse a numeric argument by name from `ArgMatches`
fn parse_numeric_arg(matches: &ArgMatches, key: &str) -> Result<Option<usize>> {
    matches
        .value_of(key)
        .map(|f| {
            f.parse()
                .map_err(|_| Error::InvalidConfig(format!("could not parse {}: {}", key, f)))
        })
        .transpose()
}

// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

use solver_perf::{Comparison, Config, Logger};

fn main() {
    let config = Config::new(Comparison::CpuGpu);

    Logger::new()
        .label("cpu_gpu_perf_graph")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    info!("cpu-gpu-perf-graph {} initializing...", solver_perf::VERSION);

    if let Err(e) = solver_perf::run(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
}

// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{Error, Result};

use serde_derive::*;

/// Placeholder replaced by the grid size in a file name template.
pub const SIZE_PLACEHOLDER: &str = "{sx}";

/// The device prefix the solver writes in front of its result files.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Cpu,
    Gpu,
}

impl Device {
    pub fn prefix(self) -> &'static str {
        match self {
            Device::Cpu => "CPU_",
            Device::Gpu => "GPU_",
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    GlEuler,
    ClEuler,
    ClSw,
}

impl Solver {
    pub fn tag(self) -> &'static str {
        match self {
            Solver::GlEuler => "GLEULER_",
            Solver::ClEuler => "CLEULER_",
            Solver::ClSw => "CLSW_",
        }
    }
}

/// One line on the chart: a legend label and the files its values come from.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Backend {
    label: String,
    template: Option<String>,
    device: Option<Device>,
    solver: Option<Solver>,
}

impl Backend {
    pub fn new(label: impl AsRef<str>, template: impl AsRef<str>) -> Self {
        Self {
            label: label.as_ref().to_owned(),
            template: Some(template.as_ref().to_owned()),
            device: None,
            solver: None,
        }
    }

    /// A backend named the way the solver names its output:
    /// `<DEVICE>_<SOLVER>_<Nx>x<Ny>.json`
    pub fn solver(label: impl AsRef<str>, device: Device, solver: Solver) -> Self {
        Self {
            label: label.as_ref().to_owned(),
            template: None,
            device: Some(device),
            solver: Some(solver),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// the file name template, with `{sx}` standing in for the grid size
    pub fn template(&self) -> Result<String> {
        match (&self.template, self.device, self.solver) {
            (Some(template), None, None) => {
                if template.contains(SIZE_PLACEHOLDER) {
                    Ok(template.clone())
                } else {
                    Err(Error::InvalidConfig(format!(
                        "backend '{}': template '{}' has no {} placeholder",
                        self.label, template, SIZE_PLACEHOLDER
                    )))
                }
            }
            (None, Some(device), Some(solver)) => Ok(format!(
                "{}{}{}x{}.json",
                device.prefix(),
                solver.tag(),
                SIZE_PLACEHOLDER,
                SIZE_PLACEHOLDER
            )),
            _ => Err(Error::InvalidConfig(format!(
                "backend '{}': needs either a template or a device and solver",
                self.label
            ))),
        }
    }

    /// the result file name for one grid size
    pub fn filename(&self, size: usize) -> Result<String> {
        Ok(self.template()?.replace(SIZE_PLACEHOLDER, &size.to_string()))
    }
}

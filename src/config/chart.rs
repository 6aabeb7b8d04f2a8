// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_derive::*;

use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    title: String,
    x_desc: String,
    y_desc: String,
    output: PathBuf,
    size: (u32, u32),
}

impl Chart {
    pub fn new(title: impl AsRef<str>, output: impl Into<PathBuf>) -> Self {
        Self {
            title: title.as_ref().to_owned(),
            x_desc: "Grid size".to_owned(),
            y_desc: "Time(ms)".to_owned(),
            output: output.into(),
            size: (1080, 720),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl AsRef<str>) {
        self.title = title.as_ref().to_owned();
    }

    pub fn x_desc(&self) -> &str {
        &self.x_desc
    }

    pub fn set_x_desc(&mut self, x_desc: impl AsRef<str>) {
        self.x_desc = x_desc.as_ref().to_owned();
    }

    pub fn y_desc(&self) -> &str {
        &self.y_desc
    }

    pub fn set_y_desc(&mut self, y_desc: impl AsRef<str>) {
        self.y_desc = y_desc.as_ref().to_owned();
    }

    /// the image file the chart is written to
    pub fn output(&self) -> &PathBuf {
        &self.output
    }

    pub fn set_output(&mut self, output: impl Into<PathBuf>) {
        self.output = output.into();
    }

    /// width and height in pixels
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn set_size(&mut self, size: (u32, u32)) {
        self.size = size;
    }

    pub(crate) fn apply(&mut self, section: &ChartSection) {
        if let Some(title) = &section.title {
            self.set_title(title);
        }
        if let Some(x_desc) = &section.x_desc {
            self.set_x_desc(x_desc);
        }
        if let Some(y_desc) = &section.y_desc {
            self.set_y_desc(y_desc);
        }
        if let Some(output) = &section.output {
            self.set_output(output);
        }
        let (width, height) = self.size;
        self.set_size((
            section.width.unwrap_or(width),
            section.height.unwrap_or(height),
        ));
    }
}

/// `[chart]` as it appears in a config file. Anything left out keeps the
/// value from the preset.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSection {
    title: Option<String>,
    x_desc: Option<String>,
    y_desc: Option<String>,
    output: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Draws a dataset as a line-and-marker chart, one line per backend.

use crate::config::Chart;
use crate::error::{Error, Result};
use crate::series::Dataset;

use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters::prelude::*;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

// red and blue first, as in the published graphs
const COLOURS: &[RGBColor] = &[
    hexcolour!(0xDD0000),
    hexcolour!(0x0000FF),
    hexcolour!(0x117733),
    hexcolour!(0xDDCC77),
    hexcolour!(0x332288),
    hexcolour!(0x888888),
    hexcolour!(0x88CCEE),
    hexcolour!(0x882255),
];

const MARKER_SIZE: i32 = 4;

/// Render `dataset` to `chart.output()`. An `.svg` extension selects the
/// vector backend, anything else is written as a bitmap.
pub fn render(chart: &Chart, dataset: &Dataset) -> Result<()> {
    let path = chart.output();
    let svg = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    let result = if svg {
        draw(
            chart,
            dataset,
            SVGBackend::new(path, chart.size()).into_drawing_area(),
        )
    } else {
        draw(
            chart,
            dataset,
            BitMapBackend::new(path, chart.size()).into_drawing_area(),
        )
    };

    result.map_err(|message| Error::Render {
        path: path.clone(),
        message,
    })
}

fn describe<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> String {
    e.to_string()
}

/// x axis bounds, padded so the end markers are not clipped
fn x_range(dataset: &Dataset) -> std::ops::Range<f64> {
    let sizes = dataset.grid_sizes();
    let min = sizes.iter().copied().min();
    let max = sizes.iter().copied().max();
    match (min, max) {
        (Some(min), Some(max)) if max > min => {
            let pad = (max - min) as f64 * 0.05;
            (min as f64 - pad)..(max as f64 + pad)
        }
        (Some(size), Some(_)) => (size as f64 - 1.0)..(size as f64 + 1.0),
        _ => 0.0..1.0,
    }
}

fn y_range(dataset: &Dataset) -> std::ops::Range<f64> {
    match dataset.max_value() {
        Some(max) if max > 0.0 && max.is_finite() => 0.0..(max * 1.1),
        _ => 0.0..1.0,
    }
}

fn draw<DB: DrawingBackend>(
    chart: &Chart,
    dataset: &Dataset,
    root: DrawingArea<DB, Shift>,
) -> std::result::Result<(), String> {
    root.fill(&WHITE).map_err(describe)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(chart.title(), ("sans-serif", 40).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range(dataset), y_range(dataset))
        .map_err(describe)?;

    ctx.configure_mesh()
        .x_desc(chart.x_desc())
        .y_desc(chart.y_desc())
        .draw()
        .map_err(describe)?;

    for (i, series) in dataset.series().iter().enumerate() {
        let colour = COLOURS[i % COLOURS.len()];

        ctx.draw_series(LineSeries::new(
            dataset.points(i),
            colour.stroke_width(2),
        ))
        .map_err(describe)?
        .label(series.label())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
        });

        ctx.draw_series(
            dataset
                .points(i)
                .map(|point| Circle::new(point, MARKER_SIZE, colour.filled())),
        )
        .map_err(describe)?;
    }

    ctx.configure_series_labels()
        .background_style(WHITE.filled())
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(describe)?;

    root.present().map_err(describe)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;
    use crate::series::{Loader, Progression};

    use std::fs;

    fn dataset(sizes: usize) -> (tempfile::TempDir, Dataset) {
        let dir = tempfile::tempdir().unwrap();
        let progression = Progression::new(100, 100, sizes);
        for size in progression.sizes() {
            fs::write(
                dir.path().join(format!("A_{}.json", size)),
                format!("{{\"average_timestep\": {}}}", size as f64 * 1e-6),
            )
            .unwrap();
        }
        let dataset = Loader::new(progression)
            .directory(dir.path())
            .load(&[Backend::new("A", "A_{sx}.json")])
            .unwrap();
        (dir, dataset)
    }

    #[test]
    fn ranges() {
        let (_dir, data) = dataset(3);
        let x = x_range(&data);
        assert!(x.start < 100.0 && x.end > 300.0);
        let y = y_range(&data);
        assert_eq!(y.start, 0.0);
        assert!(y.end > 0.3);

        let (_dir, data) = dataset(1);
        assert_eq!(x_range(&data), 99.0..101.0);
    }

    #[test]
    fn render_svg() {
        let (dir, data) = dataset(5);
        let output = dir.path().join("chart.svg");
        let chart = Chart::new("Test", &output);
        render(&chart, &data).unwrap();
        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn render_zero_width() {
        let (dir, data) = dataset(3);
        let output = dir.path().join("chart.png");
        let mut chart = Chart::new("Test", &output);
        chart.set_size((0, 720));
        match render(&chart, &data) {
            Err(Error::Render { path, message }) => {
                assert_eq!(path, output);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

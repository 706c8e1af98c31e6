//! Connection found / not found pie charts

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use crate::analysis::PassFail;
use crate::config::PieConfig;
use crate::error::TestkitError;

const SLICE_LABELS: [&str; 2] = ["Connection found", "Connection not found"];
const SLICE_COLORS: [RGBColor; 2] = [BLUE, RED];
const LEGEND_TITLE: &str = "Connection Status";
const LEGEND_HEIGHT: u32 = 70;

/// Draw one pie per `(title, counts)` side by side with a shared legend
pub fn draw_pass_fail(path: &Path, panels: &[(&str, PassFail)], config: &PieConfig) -> Result<()> {
    for (title, counts) in panels {
        if counts.total() == 0 {
            return Err(TestkitError::NoOutcomes(title.to_string()).into());
        }
    }

    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (pies, legend) = root.split_vertically(config.height.saturating_sub(LEGEND_HEIGHT) as i32);
    let areas = pies.split_evenly((1, panels.len().max(1)));
    for (area, (title, counts)) in areas.iter().zip(panels) {
        draw_pie(area, title, counts)?;
    }
    draw_legend(&legend)?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;

    info!("Pie charts saved as {}", path.display());
    Ok(())
}

fn draw_pie(area: &DrawingArea<SVGBackend<'_>, Shift>, title: &str, counts: &PassFail) -> Result<()> {
    let area = area.titled(title, ("sans-serif", 24))?;
    let (width, height) = area.dim_in_pixel();

    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.38;
    let (sizes, colors, labels) = slices(counts);

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 16).into_font().color(&WHITE));
    area.draw(&pie)?;
    Ok(())
}

/// Slices in drawing order. Plotters sweeps clockwise from the top, so
/// "not found" goes first to leave "Connection found" counter-clockwise
/// of twelve o'clock.
fn slices(counts: &PassFail) -> ([f64; 2], [RGBColor; 2], [&'static str; 2]) {
    (
        [counts.fail as f64, counts.pass as f64],
        [SLICE_COLORS[1], SLICE_COLORS[0]],
        [SLICE_LABELS[1], SLICE_LABELS[0]],
    )
}

fn draw_legend(area: &DrawingArea<SVGBackend<'_>, Shift>) -> Result<()> {
    let (width, _) = area.dim_in_pixel();
    let middle = (width / 2) as i32;

    area.draw(&Text::new(
        LEGEND_TITLE,
        (middle - 65, 8),
        ("sans-serif", 16).into_font(),
    ))?;

    let mut x = middle - 180;
    for (label, color) in SLICE_LABELS.iter().zip(SLICE_COLORS) {
        area.draw(&Rectangle::new([(x, 36), (x + 14, 50)], color.filled()))?;
        area.draw(&Text::new(*label, (x + 20, 36), ("sans-serif", 14)))?;
        x += 200;
    }
    Ok(())
}

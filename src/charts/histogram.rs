//! Response time histogram charts

use anyhow::{Context, Result};
use plotters::coord::combinators::WithKeyPoints;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use super::{ORANGE, PURPLE, SKY_BLUE};
use crate::analysis::{ComparisonAnalysis, Curve, ResponseTimeStats, SingleRunAnalysis};
use crate::config::HistogramConfig;

type Chart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<WithKeyPoints<RangedCoordf64>, RangedCoordf64>>;

const SINGLE_TITLE: &str = "Random Searches Response Time Histogram";
const COMPARE_TITLE: &str = "Random Search Response Time Histogram";

/// Filled smoothed distribution of one run with quartile markers
pub fn draw_single_run(
    path: &Path,
    analysis: &SingleRunAnalysis,
    config: &HistogramConfig,
) -> Result<()> {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = analysis.x_max as f64;
    let y_max = y_axis_max(analysis.curve.peak());
    let mut chart = build_chart(&root, SINGLE_TITLE, x_max, y_max, config.tick_step_ms)?;
    draw_mesh(&mut chart)?;

    draw_area(&mut chart, &analysis.curve, SKY_BLUE)?;
    draw_quartiles(&mut chart, &analysis.stats, y_max, RED, "")?;

    draw_legend(&mut chart)?;
    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;

    info!("Histogram saved as {}", path.display());
    Ok(())
}

/// Weekend and workday curves with their average and combined quartiles
pub fn draw_comparison(
    path: &Path,
    analysis: &ComparisonAnalysis,
    config: &HistogramConfig,
) -> Result<()> {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = analysis.x_max as f64;
    let peak = analysis
        .weekend_curve
        .peak()
        .max(analysis.normal_day_curve.peak());
    let y_max = y_axis_max(peak);
    let mut chart = build_chart(&root, COMPARE_TITLE, x_max, y_max, config.compare_tick_step_ms)?;
    draw_mesh(&mut chart)?;

    draw_line(&mut chart, &analysis.weekend_curve, RED)?;
    draw_line(&mut chart, &analysis.normal_day_curve, BLUE)?;
    draw_area(&mut chart, &analysis.average_curve, PURPLE)?;
    draw_quartiles(&mut chart, &analysis.combined, y_max, ORANGE, " (Average)")?;

    draw_legend(&mut chart)?;
    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;

    info!("Comparison histogram saved as {}", path.display());
    Ok(())
}

fn build_chart<'a, 'b>(
    root: &'a DrawingArea<SVGBackend<'b>, plotters::coord::Shift>,
    title: &str,
    x_max: f64,
    y_max: f64,
    tick_step: u64,
) -> Result<Chart<'a, 'b>> {
    let x_axis = (0f64..x_max).with_key_points(tick_points(x_max, tick_step));
    let chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_axis, 0f64..y_max)?;
    Ok(chart)
}

fn draw_mesh(chart: &mut Chart<'_, '_>) -> Result<()> {
    chart
        .configure_mesh()
        .x_desc("Time (ms)")
        .y_desc("Percentage of Searches (%)")
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_label_formatter(&|y| format!("{y:.1}"))
        .draw()?;
    Ok(())
}

fn draw_area(chart: &mut Chart<'_, '_>, curve: &Curve, color: RGBColor) -> Result<()> {
    let style = color.mix(0.6);
    chart
        .draw_series(AreaSeries::new(curve.points.iter().copied(), 0.0, style))?
        .label(curve.label.clone())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], style.filled()));
    Ok(())
}

fn draw_line(chart: &mut Chart<'_, '_>, curve: &Curve, color: RGBColor) -> Result<()> {
    chart
        .draw_series(LineSeries::new(
            curve.points.iter().copied(),
            color.stroke_width(2),
        ))?
        .label(curve.label.clone())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    Ok(())
}

fn draw_quartiles(
    chart: &mut Chart<'_, '_>,
    stats: &ResponseTimeStats,
    y_max: f64,
    median_color: RGBColor,
    suffix: &str,
) -> Result<()> {
    let q = &stats.quartiles;
    draw_marker(
        chart,
        q.median,
        y_max,
        median_color,
        format!("Median{suffix}: {:.1} ms", q.median),
    )?;
    draw_marker(
        chart,
        q.q1,
        y_max,
        GREEN,
        format!("1st Quartile{suffix}: {:.1} ms", q.q1),
    )?;
    draw_marker(
        chart,
        q.q3,
        y_max,
        GREEN,
        format!("3rd Quartile{suffix}: {:.1} ms", q.q3),
    )
}

fn draw_marker(
    chart: &mut Chart<'_, '_>,
    x: f64,
    y_max: f64,
    color: RGBColor,
    label: String,
) -> Result<()> {
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(x, 0.0), (x, y_max)],
            color.stroke_width(2),
        )))?
        .label(label)
        .legend(move |(lx, ly)| PathElement::new(vec![(lx, ly), (lx + 20, ly)], color.stroke_width(2)));
    Ok(())
}

fn draw_legend<'a, 'b: 'a>(chart: &mut Chart<'a, 'b>) -> Result<()> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Headroom above the highest point so the curve does not touch the frame
fn y_axis_max(peak: f64) -> f64 {
    if peak <= 0.0 {
        1.0
    } else {
        peak * 1.1
    }
}

/// X axis ticks at every multiple of `tick_step` up to `x_max`
fn tick_points(x_max: f64, tick_step: u64) -> Vec<f64> {
    let step = tick_step.max(1) as usize;
    (0..=x_max.max(0.0) as u64)
        .step_by(step)
        .map(|t| t as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PostmanRun, SAMPLE_EXPORT};
    use tempfile::tempdir;

    #[test]
    fn test_tick_points() {
        let ticks = tick_points(1000.0, 100);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 300.0);
        assert_eq!(ticks.last(), Some(&1000.0));

        assert_eq!(tick_points(120.0, 100), vec![0.0, 100.0]);
        assert_eq!(tick_points(30.0, 50), vec![0.0]);
        assert!(tick_points(300.0, 50).iter().all(|t| t % 50.0 == 0.0));
    }

    #[test]
    fn test_y_axis_max() {
        assert_eq!(y_axis_max(0.0), 1.0);
        assert!((y_axis_max(50.0) - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_draw_single_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("histogram.svg");

        let run = PostmanRun::from_json(SAMPLE_EXPORT).unwrap();
        let config = HistogramConfig::default();
        let analysis = SingleRunAnalysis::analyze(&run, &config).unwrap();
        draw_single_run(&path, &analysis, &config).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(SINGLE_TITLE));
        assert!(svg.contains("All Data"));
        // x axis spans 0..120 ms with a tick every 100 ms
        assert!(svg.contains(">100<"));
    }

    #[test]
    fn test_draw_comparison() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("compare.svg");

        let weekend = PostmanRun::from_json(SAMPLE_EXPORT).unwrap();
        let normal: PostmanRun =
            serde_json::from_value(serde_json::json!({ "results": [{ "times": [40, 80, 160] }] }))
                .unwrap();
        let config = HistogramConfig::default();
        let analysis = ComparisonAnalysis::analyze(&weekend, &normal, &config).unwrap();
        draw_comparison(&path, &analysis, &config).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(COMPARE_TITLE));
        assert!(svg.contains("Normal Day"));
    }
}

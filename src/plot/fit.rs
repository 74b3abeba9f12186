//! # 拟合曲线图
//!
//! 每个 pair 一张图，每个 state 一条曲线（横轴为迭代编号，纵轴为拟合值）。
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 调用
//! - 使用 `models/fitlog.rs`

use super::{ensure_parent_dir, plot_err, RenderConfig};
use crate::cli::plot::ImageFormat;
use crate::error::{MsibiError, Result};
use crate::models::FitLog;

use plotters::prelude::*;
use std::path::Path;

/// 绘制某个 pair 在所有 state 下的拟合曲线
pub fn plot_pair_fits(
    pair: &str,
    log: &FitLog,
    output_path: &Path,
    render: &RenderConfig,
) -> Result<()> {
    let states = log
        .states(pair)
        .ok_or_else(|| MsibiError::UnknownPair(pair.to_string()))?;

    let mut series = Vec::with_capacity(states.len());
    for state in states.keys() {
        series.push((state.as_str(), log.values_f64(pair, state)?));
    }

    ensure_parent_dir(output_path)?;
    let size = (render.width, render.height);

    match render.format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_fit_chart(&root, pair, &series)?;
            root.present().map_err(plot_err)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_fit_chart(&root, pair, &series)?;
            root.present().map_err(plot_err)?;
        }
    }

    Ok(())
}

/// 纵轴范围，留出 5% 边距
fn fit_range(series: &[(&str, Vec<f64>)]) -> (f64, f64) {
    let values = series.iter().flat_map(|(_, v)| v.iter().copied());
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let margin = if hi > lo { (hi - lo) * 0.05 } else { 0.05 };
    (lo - margin, hi + margin)
}

fn draw_fit_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    pair: &str,
    series: &[(&str, Vec<f64>)],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let n_steps = series.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    let x_max = n_steps.saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = fit_range(series);

    let mut chart = ChartBuilder::on(root)
        .caption(pair, ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("step")
        .y_desc("relative fit")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    for (idx, (state, values)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
                color.stroke_width(2),
            ))
            .map_err(plot_err)?
            .label(*state)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

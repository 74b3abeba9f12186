//! # RDF 与势能对比图
//!
//! 在同一张图上绘制目标 RDF、优化得到的 RDF（左轴）以及对应迭代的势能（右轴）。
//!
//! ## 单位换算
//! - RDF: 第 0 列（距离）乘以 `to_angstrom`
//! - 势能: 第 0 列乘以 `to_angstrom`，第 1 列（能量）乘以 `to_kcalpermol`
//!
//! ## 依赖关系
//! - 被 `commands/rdf.rs` 调用
//! - `draw_rdf_frame` 被 `plot/animation.rs` 复用
//! - 使用 `parsers/table.rs`, `models/layout.rs`

use super::{
    ensure_parent_dir, plot_err, potential_range, upper_bound, PairState, RenderConfig,
    POTENTIAL_COLOR,
};
use crate::cli::plot::ImageFormat;
use crate::config::Units;
use crate::error::Result;
use crate::models::{NumericTable, RunLayout};
use crate::parsers::load_table;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::debug;

const TARGET_COLOR: RGBColor = RGBColor(0, 0, 0);
const QUERY_COLOR: RGBColor = RGBColor(214, 39, 40);

/// 势能最低点搜索时跳过的短程行数
const POTENTIAL_SKIP_ROWS: usize = 5;

/// 单帧绘图数据（已完成单位换算）
#[derive(Debug, Clone, Default)]
pub struct RdfFrame {
    pub target: Vec<(f64, f64)>,
    pub query: Vec<(f64, f64)>,
    pub potential: Vec<(f64, f64)>,
    /// 第二组优化结果 (RDF, 势能)
    pub overlay: Option<(Vec<(f64, f64)>, Vec<(f64, f64)>)>,
    /// 右下角的迭代编号
    pub step_label: Option<String>,
}

/// 坐标轴范围
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAxes {
    pub x_max: f64,
    pub rdf_max: f64,
    pub potential: (f64, f64),
}

/// RDF 表距离列换算
pub(crate) fn scale_rdf(table: &mut NumericTable, units: &Units) {
    table.scale_column(0, units.to_angstrom);
}

/// 势能表距离列与能量列换算
pub(crate) fn scale_potential(table: &mut NumericTable, units: &Units) {
    table.scale_column(0, units.to_angstrom);
    table.scale_column(1, units.to_kcalpermol);
}

fn load_scaled(path: &Path, scale: impl Fn(&mut NumericTable)) -> Result<NumericTable> {
    let mut table = load_table(path)?;
    scale(&mut table);
    Ok(table)
}

/// 绘制某个 pair 在某个 state 下第 `step` 次迭代的 RDF 与势能
pub fn plot_pair_at_state(
    target: &PairState,
    step: usize,
    layout: &RunLayout,
    units: &Units,
    render: &RenderConfig,
) -> Result<PathBuf> {
    let (t1, t2, state) = (&target.t1, &target.t2, &target.state);

    let potential = load_scaled(&layout.potential(t1, t2, step), |t| {
        scale_potential(t, units)
    })?;
    let target_rdf = load_scaled(&layout.target_rdf(t1, t2, state), |t| scale_rdf(t, units))?;
    let query_rdf = load_scaled(&layout.query_rdf(t1, t2, state, step), |t| {
        scale_rdf(t, units)
    })?;

    let axes = static_axes(&target_rdf, &query_rdf, &potential);
    debug!("{} step {}: axes {:?}", target.title(), step, axes);

    let frame = RdfFrame {
        target: target_rdf.points(0, 1),
        query: query_rdf.points(0, 1),
        potential: potential.points(0, 1),
        overlay: None,
        step_label: None,
    };

    let output_path = layout.rdf_figure(t1, t2, state, step, render.format.extension());
    ensure_parent_dir(&output_path)?;
    let size = (render.width, render.height);
    let title = format!("{}, step {}", target.title(), step);

    match render.format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(&output_path, size).into_drawing_area();
            draw_rdf_frame(&root, &title, &frame, &axes)?;
            root.present().map_err(plot_err)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(&output_path, size).into_drawing_area();
            draw_rdf_frame(&root, &title, &frame, &axes)?;
            root.present().map_err(plot_err)?;
        }
    }

    Ok(output_path)
}

/// 单张静态图的坐标轴范围
pub(crate) fn static_axes(
    target_rdf: &NumericTable,
    query_rdf: &NumericTable,
    potential: &NumericTable,
) -> FrameAxes {
    let x_max = target_rdf
        .last_value(0)
        .or_else(|| query_rdf.last_value(0))
        .filter(|x| *x > 0.0)
        .unwrap_or(1.0);

    let rdf_max = upper_bound(
        target_rdf
            .column(1)
            .into_iter()
            .chain(query_rdf.column(1)),
        1.0,
    ) * 1.05;

    let pot_min = potential
        .min_from(1, POTENTIAL_SKIP_ROWS)
        .or_else(|| potential.min_from(1, 0));

    FrameAxes {
        x_max,
        rdf_max,
        potential: potential_range(pot_min, potential.max(1)),
    }
}

/// 将点的纵坐标限制在范围内
fn clamp_points(points: &[(f64, f64)], lo: f64, hi: f64) -> Vec<(f64, f64)> {
    points.iter().map(|&(x, y)| (x, y.clamp(lo, hi))).collect()
}

/// 绘制一帧：左轴 RDF，右轴势能
pub(crate) fn draw_rdf_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
    frame: &RdfFrame,
    axes: &FrameAxes,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (pot_lo, pot_hi) = axes.potential;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 26).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .right_y_label_area_size(70)
        .build_cartesian_2d(0.0..axes.x_max, 0.0..axes.rdf_max)
        .map_err(plot_err)?
        .set_secondary_coord(0.0..axes.x_max, pot_lo..pot_hi);

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("r, Å")
        .y_desc("g(r)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    chart
        .configure_secondary_axes()
        .y_desc("V(r), kcal/mol")
        .label_style(("sans-serif", 16).into_font().color(&POTENTIAL_COLOR))
        .axis_desc_style(("sans-serif", 18).into_font().color(&POTENTIAL_COLOR))
        .draw()
        .map_err(plot_err)?;

    let rdf_style = |color: RGBColor| color.stroke_width(2);

    chart
        .draw_series(LineSeries::new(
            clamp_points(&frame.target, 0.0, axes.rdf_max),
            rdf_style(TARGET_COLOR),
        ))
        .map_err(plot_err)?
        .label("Target")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], rdf_style(TARGET_COLOR))
        });

    chart
        .draw_series(LineSeries::new(
            clamp_points(&frame.query, 0.0, axes.rdf_max),
            rdf_style(QUERY_COLOR),
        ))
        .map_err(plot_err)?
        .label("Query")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], rdf_style(QUERY_COLOR))
        });

    chart
        .draw_secondary_series(LineSeries::new(
            clamp_points(&frame.potential, pot_lo, pot_hi),
            POTENTIAL_COLOR.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("Potential")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], POTENTIAL_COLOR.stroke_width(2))
        });

    if let Some((query2, potential2)) = &frame.overlay {
        chart
            .draw_series(DashedLineSeries::new(
                clamp_points(query2, 0.0, axes.rdf_max),
                8,
                5,
                rdf_style(QUERY_COLOR),
            ))
            .map_err(plot_err)?
            .label("Query 2")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 8, y)], rdf_style(QUERY_COLOR))
            });

        chart
            .draw_secondary_series(DashedLineSeries::new(
                clamp_points(potential2, pot_lo, pot_hi),
                8,
                5,
                POTENTIAL_COLOR.stroke_width(2),
            ))
            .map_err(plot_err)?;
    }

    // 势能截断距离之后补一段 V = 0
    if let Some(&(r_cut, _)) = frame.potential.last() {
        if r_cut < axes.x_max {
            chart
                .draw_secondary_series(LineSeries::new(
                    vec![(r_cut, 0.0), (axes.x_max, 0.0)],
                    POTENTIAL_COLOR.stroke_width(2),
                ))
                .map_err(plot_err)?;
        }
    }

    if let Some(label) = &frame.step_label {
        let style = ("sans-serif", 22)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Bottom));
        chart
            .draw_series(std::iter::once(Text::new(
                label.clone(),
                (axes.x_max * 0.97, axes.rdf_max * 0.03),
                style,
            )))
            .map_err(plot_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MsibiError;
    use std::fs;

    fn table(rows: &[[f64; 2]]) -> NumericTable {
        NumericTable::new(rows.iter().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn test_scaling() {
        let units = Units {
            to_angstrom: 6.0,
            to_kcalpermol: 0.1,
        };
        let mut rdf = table(&[[0.5, 1.0]]);
        scale_rdf(&mut rdf, &units);
        assert_eq!(rdf.points(0, 1), vec![(3.0, 1.0)]);

        let mut pot = table(&[[0.5, -10.0]]);
        scale_potential(&mut pot, &units);
        let (r, v) = pot.points(0, 1)[0];
        assert_eq!(r, 3.0);
        assert!((v + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_static_axes() {
        let target = table(&[[0.0, 0.0], [1.0, 2.0], [12.0, 1.0]]);
        let query = table(&[[0.0, 0.0], [1.0, 3.0]]);
        let potential = NumericTable::new(
            (0..8)
                .map(|i| vec![i as f64, if i < 5 { -50.0 } else { -2.0 }])
                .collect(),
        );

        let axes = static_axes(&target, &query, &potential);
        assert_eq!(axes.x_max, 12.0);
        assert!((axes.rdf_max - 3.15).abs() < 1e-12);
        assert!((axes.potential.0 + 2.2).abs() < 1e-12);
        assert!((axes.potential.1 - 2.2).abs() < 1e-12);
    }

    #[test]
    fn test_short_potential_uses_whole_column() {
        let empty = NumericTable::default();
        let potential = table(&[[1.0, -1.0], [2.0, 0.0]]);
        let axes = static_axes(&empty, &empty, &potential);
        assert_eq!(axes.x_max, 1.0);
        assert!((axes.potential.0 + 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_points() {
        let clamped = clamp_points(&[(0.0, 100.0), (1.0, -3.0), (2.0, 0.5)], -1.0, 1.0);
        assert_eq!(clamped, vec![(0.0, 1.0), (1.0, -1.0), (2.0, 0.5)]);
    }

    #[test]
    fn test_missing_input_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = RunLayout {
            target_dir: dir.path().join("targets"),
            rdf_dir: dir.path().join("rdfs"),
            potentials_dir: dir.path().join("potentials"),
            figures_dir: dir.path().join("figures"),
            animations_dir: dir.path().join("animations"),
        };
        fs::create_dir_all(&layout.potentials_dir).unwrap();
        fs::write(layout.potential("A", "B", 3), "0.1 5.0 0.0\n0.2 -1.0 0.0\n").unwrap();

        let target = PairState::new("A-B", "npt").unwrap();
        let err = plot_pair_at_state(
            &target,
            3,
            &layout,
            &Units::default(),
            &RenderConfig::default(),
        )
        .unwrap_err();

        match err {
            MsibiError::FileNotFound { path } => assert!(path.ends_with("A-B-npt.txt")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!layout.figures_dir.exists());
    }
}

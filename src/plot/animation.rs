//! # RDF/势能演化动画
//!
//! 为某个 pair 在某个 state 下生成 GIF 动画，每帧对应一次迭代：
//! 目标 RDF 固定，优化 RDF 与势能随迭代变化，右下角显示迭代编号。
//! 可选叠加第二组优化结果（虚线）。
//!
//! ## 依赖关系
//! - 被 `commands/animate.rs` 调用
//! - 复用 `plot/rdf.rs` 的单帧绘制
//! - 使用 `plotters` 的 GIF 后端

use super::rdf::{draw_rdf_frame, scale_potential, scale_rdf, FrameAxes, RdfFrame};
use super::{ensure_parent_dir, plot_err, potential_range, upper_bound, PairState, RenderConfig};
use crate::config::Units;
use crate::error::{MsibiError, Result};
use crate::models::layout::{potential_in, query_rdf_in};
use crate::models::{NumericTable, RunLayout};
use crate::parsers::{load_table, load_table_or_zeros};

use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 空 RDF 文件的替代尺寸
const EMPTY_RDF_SHAPE: (usize, usize) = (200, 2);
/// 空势能文件的替代尺寸
const EMPTY_POTENTIAL_SHAPE: (usize, usize) = (121, 3);

/// 动画参数
#[derive(Debug, Clone, Default)]
pub struct AnimationOptions {
    /// 帧数（迭代 0..steps）
    pub steps: usize,
    /// 计算 g(r) 纵轴上限时忽略的前几帧
    pub n_skip: usize,
    /// 第二组优化结果 (rdf_dir, potentials_dir)
    pub overlay: Option<(PathBuf, PathBuf)>,
}

/// 一组优化结果的全部迭代
struct RunSeries {
    rdfs: Vec<NumericTable>,
    potentials: Vec<NumericTable>,
}

impl RunSeries {
    fn load(
        target: &PairState,
        rdf_dir: &Path,
        potentials_dir: &Path,
        steps: usize,
        units: &Units,
    ) -> Result<Self> {
        let (t1, t2, state) = (&target.t1, &target.t2, &target.state);
        let mut rdfs = Vec::with_capacity(steps);
        let mut potentials = Vec::with_capacity(steps);

        for step in 0..steps {
            let (rows, cols) = EMPTY_RDF_SHAPE;
            let rdf_path = query_rdf_in(rdf_dir, t1, t2, state, step);
            let mut rdf = load_table_or_zeros(&rdf_path, rows, cols)?;
            scale_rdf(&mut rdf, units);
            rdfs.push(rdf);

            let (rows, cols) = EMPTY_POTENTIAL_SHAPE;
            let pot_path = potential_in(potentials_dir, t1, t2, step);
            let mut pot = load_table_or_zeros(&pot_path, rows, cols)?;
            scale_potential(&mut pot, units);
            potentials.push(pot);
        }

        Ok(Self { rdfs, potentials })
    }
}

/// 生成某个 pair 在某个 state 下的演化动画，返回输出路径
pub fn animate_pair_at_state(
    target: &PairState,
    layout: &RunLayout,
    units: &Units,
    render: &RenderConfig,
    options: &AnimationOptions,
) -> Result<PathBuf> {
    if options.steps == 0 {
        return Err(MsibiError::InvalidArgument(format!(
            "no iterations to animate for {}",
            target.title()
        )));
    }

    let mut target_rdf = load_table(&layout.target_rdf(&target.t1, &target.t2, &target.state))?;
    scale_rdf(&mut target_rdf, units);

    let primary = RunSeries::load(
        target,
        &layout.rdf_dir,
        &layout.potentials_dir,
        options.steps,
        units,
    )?;
    let secondary = match &options.overlay {
        Some((rdf_dir, potentials_dir)) => Some(RunSeries::load(
            target,
            rdf_dir,
            potentials_dir,
            options.steps,
            units,
        )?),
        None => None,
    };

    let axes = animation_axes(&target_rdf, &primary, options.n_skip);
    debug!("{}: {} frames, axes {:?}", target.title(), options.steps, axes);

    let output_path = layout.animation(&target.t1, &target.t2, &target.state);
    ensure_parent_dir(&output_path)?;

    let root = BitMapBackend::gif(
        &output_path,
        (render.width, render.height),
        render.frame_delay_ms,
    )
    .map_err(plot_err)?
    .into_drawing_area();

    let title = target.title();
    let target_points = target_rdf.points(0, 1);

    for step in 0..options.steps {
        let frame = RdfFrame {
            target: target_points.clone(),
            query: primary.rdfs[step].points(0, 1),
            potential: primary.potentials[step].points(0, 1),
            overlay: secondary.as_ref().map(|run| {
                (
                    run.rdfs[step].points(0, 1),
                    run.potentials[step].points(0, 1),
                )
            }),
            step_label: Some(step.to_string()),
        };

        draw_rdf_frame(&root, &title, &frame, &axes)?;
        root.present().map_err(plot_err)?;
    }

    Ok(output_path)
}

/// 所有帧共用的坐标轴范围
fn animation_axes(target_rdf: &NumericTable, run: &RunSeries, n_skip: usize) -> FrameAxes {
    let x_max = run
        .rdfs
        .first()
        .and_then(|rdf| rdf.last_value(0))
        .or_else(|| target_rdf.last_value(0))
        .filter(|x| *x > 0.0)
        .unwrap_or(1.0);

    let rdf_values = target_rdf
        .column(1)
        .into_iter()
        .chain(run.rdfs.iter().skip(n_skip).flat_map(|rdf| rdf.column(1)));
    let rdf_max = upper_bound(rdf_values, 1.0).ceil();

    let pot_min = run
        .potentials
        .iter()
        .filter_map(|p| p.min_from(1, 0))
        .reduce(f64::min);
    let pot_max = run
        .potentials
        .iter()
        .filter_map(|p| p.max(1))
        .reduce(f64::max);

    FrameAxes {
        x_max,
        rdf_max,
        potential: potential_range(pot_min, pot_max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn layout_in(dir: &Path) -> RunLayout {
        RunLayout {
            target_dir: dir.join("targets"),
            rdf_dir: dir.join("rdfs"),
            potentials_dir: dir.join("potentials"),
            figures_dir: dir.join("figures"),
            animations_dir: dir.join("animations"),
        }
    }

    fn units() -> Units {
        Units {
            to_angstrom: 2.0,
            to_kcalpermol: 0.5,
        }
    }

    fn write_run(layout: &RunLayout, steps: usize) {
        fs::create_dir_all(&layout.rdf_dir).unwrap();
        fs::create_dir_all(&layout.potentials_dir).unwrap();
        for step in 0..steps {
            let peak = 5.0 + step as f64;
            fs::write(
                layout.query_rdf("A", "B", "npt", step),
                format!("0.5 0.0\n1.0 {}\n2.5 1.0\n", peak),
            )
            .unwrap();
            fs::write(
                layout.potential("A", "B", step),
                format!("0.5 10.0 0.0\n1.0 -{} 0.0\n2.0 0.0 0.0\n", step + 1),
            )
            .unwrap();
        }
    }

    #[test]
    fn test_run_series_substitutes_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        write_run(&layout, 2);
        fs::write(layout.potential("A", "B", 1), "").unwrap();

        let target = PairState::new("A-B", "npt").unwrap();
        let run = RunSeries::load(&target, &layout.rdf_dir, &layout.potentials_dir, 2, &units())
            .unwrap();

        assert_eq!(run.rdfs.len(), 2);
        assert_eq!(run.rdfs[0].points(0, 1)[2], (5.0, 1.0));
        assert_eq!(run.potentials[0].points(0, 1)[1], (2.0, -0.5));
        assert_eq!(run.potentials[1].len(), EMPTY_POTENTIAL_SHAPE.0);
        assert_eq!(run.potentials[1].n_cols(), EMPTY_POTENTIAL_SHAPE.1);
    }

    #[test]
    fn test_missing_step_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        write_run(&layout, 2);

        let target = PairState::new("A-B", "npt").unwrap();
        let result =
            RunSeries::load(&target, &layout.rdf_dir, &layout.potentials_dir, 3, &units());
        assert!(matches!(result, Err(MsibiError::FileNotFound { .. })));
    }

    #[test]
    fn test_animation_axes() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        write_run(&layout, 3);

        let target = PairState::new("A-B", "npt").unwrap();
        let run = RunSeries::load(&target, &layout.rdf_dir, &layout.potentials_dir, 3, &units())
            .unwrap();
        let target_rdf = NumericTable::new(vec![vec![1.0, 0.0], vec![4.0, 2.4]]);

        let axes = animation_axes(&target_rdf, &run, 1);
        assert_eq!(axes.x_max, 5.0);
        assert_eq!(axes.rdf_max, 7.0);
        assert!((axes.potential.0 + 1.65).abs() < 1e-12);
        assert!((axes.potential.1 - 1.65).abs() < 1e-12);

        let axes = animation_axes(&target_rdf, &run, 3);
        assert_eq!(axes.rdf_max, 3.0);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        let target = PairState::new("A-B", "npt").unwrap();

        let err = animate_pair_at_state(
            &target,
            &layout,
            &units(),
            &RenderConfig::default(),
            &AnimationOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MsibiError::InvalidArgument(_)));
        assert!(!layout.animations_dir.exists());
    }
}

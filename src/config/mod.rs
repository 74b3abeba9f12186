//! # 配置模块
//!
//! 合并命令行参数、TOML 配置文件与内置默认值。
//! 优先级：命令行 > 配置文件 > 默认值。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `cli/` 参数定义
//! - 子模块: file

pub mod file;

pub use file::FileConfig;

use crate::cli::plot::{ImageFormat, PathArgs, RenderArgs, UnitArgs};
use crate::cli::log::{check_weight, BestArgs};
use crate::error::{MsibiError, Result};
use crate::models::RunLayout;
use crate::plot::RenderConfig;
use crate::ranking::selector::{SelectionOptions, DEFAULT_MARKER, DEFAULT_TOP_K};

use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 默认值
// ─────────────────────────────────────────────────────────────

pub const DEFAULT_TARGET_DIR: &str = "targets";
pub const DEFAULT_RDF_DIR: &str = "rdfs";
pub const DEFAULT_POTENTIALS_DIR: &str = "potentials";
pub const DEFAULT_FIGURES_DIR: &str = "figures";
pub const DEFAULT_ANIMATIONS_DIR: &str = "animations";

pub const DEFAULT_TO_ANGSTROM: f64 = 6.0;
pub const DEFAULT_TO_KCALPERMOL: f64 = 0.1;

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 750;
pub const DEFAULT_FRAME_DELAY_MS: u32 = 200;

/// 单位换算系数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    /// 距离乘以该系数得到 Å
    pub to_angstrom: f64,
    /// 能量乘以该系数得到 kcal/mol
    pub to_kcalpermol: f64,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            to_angstrom: DEFAULT_TO_ANGSTROM,
            to_kcalpermol: DEFAULT_TO_KCALPERMOL,
        }
    }
}

/// 合并目录配置
pub fn resolve_layout(args: &PathArgs, file: &FileConfig) -> RunLayout {
    let paths = file.paths();
    let pick = |arg: &Option<PathBuf>, file: Option<PathBuf>, default: &str| {
        arg.clone()
            .or(file)
            .unwrap_or_else(|| PathBuf::from(default))
    };

    RunLayout {
        target_dir: pick(&args.target_dir, paths.target_dir, DEFAULT_TARGET_DIR),
        rdf_dir: pick(&args.rdf_dir, paths.rdf_dir, DEFAULT_RDF_DIR),
        potentials_dir: pick(
            &args.potentials_dir,
            paths.potentials_dir,
            DEFAULT_POTENTIALS_DIR,
        ),
        figures_dir: pick(&args.figures_dir, paths.figures_dir, DEFAULT_FIGURES_DIR),
        animations_dir: pick(
            &args.animations_dir,
            paths.animations_dir,
            DEFAULT_ANIMATIONS_DIR,
        ),
    }
}

/// 合并单位换算系数
pub fn resolve_units(args: &UnitArgs, file: &FileConfig) -> Result<Units> {
    let units = file.units();
    let resolved = Units {
        to_angstrom: args
            .to_angstrom
            .or(units.to_angstrom)
            .unwrap_or(DEFAULT_TO_ANGSTROM),
        to_kcalpermol: args
            .to_kcalpermol
            .or(units.to_kcalpermol)
            .unwrap_or(DEFAULT_TO_KCALPERMOL),
    };

    if !(resolved.to_angstrom.is_finite() && resolved.to_angstrom > 0.0) {
        return Err(MsibiError::InvalidArgument(format!(
            "to_angstrom must be positive, got {}",
            resolved.to_angstrom
        )));
    }
    if !(resolved.to_kcalpermol.is_finite() && resolved.to_kcalpermol > 0.0) {
        return Err(MsibiError::InvalidArgument(format!(
            "to_kcalpermol must be positive, got {}",
            resolved.to_kcalpermol
        )));
    }

    Ok(resolved)
}

/// 合并渲染配置
pub fn resolve_render(
    args: &RenderArgs,
    format: Option<ImageFormat>,
    frame_delay_ms: Option<u32>,
    file: &FileConfig,
) -> Result<RenderConfig> {
    let render = file.render();
    let config = RenderConfig {
        format: format.or(render.format).unwrap_or_default(),
        width: args.width.or(render.width).unwrap_or(DEFAULT_WIDTH),
        height: args.height.or(render.height).unwrap_or(DEFAULT_HEIGHT),
        frame_delay_ms: frame_delay_ms
            .or(render.frame_delay_ms)
            .unwrap_or(DEFAULT_FRAME_DELAY_MS),
    };

    if config.width == 0 || config.height == 0 {
        return Err(MsibiError::InvalidArgument(format!(
            "figure size must be non-zero, got {}x{}",
            config.width, config.height
        )));
    }

    Ok(config)
}

/// 合并最佳迭代选择参数
pub fn resolve_selection(args: &BestArgs, file: &FileConfig) -> Result<SelectionOptions> {
    let selection = file.selection();

    let top_k = args.top_k.or(selection.top_k).unwrap_or(DEFAULT_TOP_K);
    if top_k == 0 {
        return Err(MsibiError::InvalidArgument(
            "top-k must be at least 1".to_string(),
        ));
    }

    let marker = args
        .marker
        .clone()
        .or(selection.marker)
        .unwrap_or_else(|| DEFAULT_MARKER.to_string());

    // 命令行权重覆盖配置文件中同名 state 的权重
    let mut weights = selection.weights.unwrap_or_default();
    weights.extend(args.weights.iter().cloned());
    for (state, weight) in &weights {
        check_weight(state, *weight).map_err(MsibiError::InvalidArgument)?;
    }

    Ok(SelectionOptions {
        top_k,
        marker,
        weights,
    })
}

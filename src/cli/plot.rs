//! # 绘图子命令 CLI 定义
//!
//! - `fit`: 拟合曲线
//! - `rdf`: RDF 与势能对比图
//! - `animate`: RDF/势能演化动画
//!
//! 目录、单位换算和渲染参数均为可选，未指定时依次回退到配置文件和内置默认值。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fit.rs`, `commands/rdf.rs`, `commands/animate.rs`
//! - 由 `config/` 合并为最终配置

use clap::{Args, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 共享参数组
// ─────────────────────────────────────────────────────────────

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG bitmap
    #[default]
    Png,
    /// SVG vector image
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 画布尺寸
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Figure width in pixels [default: 1000]
    #[arg(long)]
    pub width: Option<u32>,

    /// Figure height in pixels [default: 750]
    #[arg(long)]
    pub height: Option<u32>,
}

/// 输入/输出目录
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// Directory containing target RDFs ({t1}-{t2}-{state}.txt) [default: targets]
    #[arg(long)]
    pub target_dir: Option<PathBuf>,

    /// Directory containing RDFs from the optimization [default: rdfs]
    #[arg(long)]
    pub rdf_dir: Option<PathBuf>,

    /// Directory containing potentials from the optimization [default: potentials]
    #[arg(long)]
    pub potentials_dir: Option<PathBuf>,

    /// Output directory for figures [default: figures]
    #[arg(long)]
    pub figures_dir: Option<PathBuf>,

    /// Output directory for animations [default: animations]
    #[arg(long)]
    pub animations_dir: Option<PathBuf>,
}

/// 单位换算系数
#[derive(Args, Debug, Clone, Default)]
pub struct UnitArgs {
    /// Multiply distances by this to get Angstrom [default: 6.0]
    #[arg(long)]
    pub to_angstrom: Option<f64>,

    /// Multiply energies by this to get kcal/mol [default: 0.1]
    #[arg(long)]
    pub to_kcalpermol: Option<f64>,
}

/// 批量处理参数
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Glob pattern restricting which pairs are processed (e.g. "A-*")
    #[arg(long)]
    pub pairs: Option<String>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}

// ─────────────────────────────────────────────────────────────
// 子命令参数
// ─────────────────────────────────────────────────────────────

/// fit 子命令参数
#[derive(Args, Debug)]
pub struct FitArgs {
    /// MS-IBI optimization log file
    pub logfile: PathBuf,

    /// Plot only this pair
    #[arg(long)]
    pub pair: Option<String>,

    /// Output directory for figures [default: figures]
    #[arg(long)]
    pub figures_dir: Option<PathBuf>,

    /// Image format [default: png]
    #[arg(long, value_enum)]
    pub format: Option<ImageFormat>,

    #[command(flatten)]
    pub render: RenderArgs,

    #[command(flatten)]
    pub batch: BatchArgs,
}

/// rdf 子命令参数
#[derive(Args, Debug)]
pub struct RdfArgs {
    /// MS-IBI optimization log file
    pub logfile: PathBuf,

    /// Plot only this pair (requires --state)
    #[arg(long, requires = "state")]
    pub pair: Option<String>,

    /// State to plot (requires --pair)
    #[arg(long, requires = "pair")]
    pub state: Option<String>,

    /// Iteration to plot (default: last iteration in the log)
    #[arg(long)]
    pub step: Option<usize>,

    #[command(flatten)]
    pub paths: PathArgs,

    #[command(flatten)]
    pub units: UnitArgs,

    /// Image format [default: png]
    #[arg(long, value_enum)]
    pub format: Option<ImageFormat>,

    #[command(flatten)]
    pub render: RenderArgs,

    #[command(flatten)]
    pub batch: BatchArgs,
}

/// animate 子命令参数
#[derive(Args, Debug)]
pub struct AnimateArgs {
    /// MS-IBI optimization log file
    pub logfile: PathBuf,

    /// Animate only this pair (requires --state)
    #[arg(long, requires = "state")]
    pub pair: Option<String>,

    /// State to animate (requires --pair)
    #[arg(long, requires = "pair")]
    pub state: Option<String>,

    /// Number of frames (default: number of iterations in the log)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Ignore the first N query RDFs when choosing the g(r) axis limit
    #[arg(long, default_value_t = 1)]
    pub n_skip: usize,

    /// RDFs of a second optimization run to overlay (requires --potentials2-dir)
    #[arg(long, requires = "potentials2_dir")]
    pub rdf2_dir: Option<PathBuf>,

    /// Potentials of a second optimization run to overlay (requires --rdf2-dir)
    #[arg(long, requires = "rdf2_dir")]
    pub potentials2_dir: Option<PathBuf>,

    /// Delay between animation frames in milliseconds [default: 200]
    #[arg(long)]
    pub frame_delay: Option<u32>,

    #[command(flatten)]
    pub paths: PathArgs,

    #[command(flatten)]
    pub units: UnitArgs,

    #[command(flatten)]
    pub render: RenderArgs,

    #[command(flatten)]
    pub batch: BatchArgs,
}

//! # 绘图模块
//!
//! 使用 `plotters` 生成拟合曲线、RDF/势能对比图和演化动画。
//!
//! 渲染参数（格式、尺寸、帧间隔）由 `RenderConfig` 显式传入每个绘图函数，
//! 不存在全局后端状态。
//!
//! ## 子模块
//! - `fit`: 拟合值随迭代变化曲线
//! - `rdf`: 单次迭代的 RDF 与势能对比图
//! - `animation`: RDF 与势能随迭代演化的 GIF 动画
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs`, `commands/rdf.rs`, `commands/animate.rs` 调用
//! - 使用 `parsers/table.rs` 读取数值表
//! - 使用 `models/` 的 FitLog, RunLayout

pub mod animation;
pub mod fit;
pub mod rdf;

pub use animation::{animate_pair_at_state, AnimationOptions};
pub use fit::plot_pair_fits;
pub use rdf::plot_pair_at_state;

use crate::cli::plot::ImageFormat;
use crate::error::{MsibiError, Result};
use crate::models::split_pair;

use plotters::style::RGBColor;
use std::fs;
use std::path::Path;

/// 势能曲线颜色 (#0485d1)
pub(crate) const POTENTIAL_COLOR: RGBColor = RGBColor(4, 133, 209);

/// 渲染配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// GIF 帧间隔 (ms)
    pub frame_delay_ms: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            width: 1000,
            height: 750,
            frame_delay_ms: 200,
        }
    }
}

/// 一个 pair 在一个 state 下的绘图目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairState {
    pub t1: String,
    pub t2: String,
    pub state: String,
}

impl PairState {
    pub fn new(pair: &str, state: &str) -> Result<Self> {
        let (t1, t2) = split_pair(pair)?;
        Ok(Self {
            t1: t1.to_string(),
            t2: t2.to_string(),
            state: state.to_string(),
        })
    }

    pub fn pair(&self) -> String {
        format!("{}-{}", self.t1, self.t2)
    }

    /// 图表标题，如 "A-B, npt_300K"
    pub fn title(&self) -> String {
        format!("{}, {}", self.pair(), self.state)
    }
}

/// 将 plotters 错误转换为统一错误类型
pub(crate) fn plot_err<E: std::fmt::Debug>(e: E) -> MsibiError {
    MsibiError::PlotError(format!("{:?}", e))
}

/// 确保输出文件所在目录存在
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| MsibiError::FileWriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }
    Ok(())
}

/// 势能坐标轴范围：以最低点为基准对称展开
pub(crate) fn potential_range(min: Option<f64>, max: Option<f64>) -> (f64, f64) {
    match (min, max) {
        (Some(lo), _) if lo < 0.0 => (1.1 * lo, -1.1 * lo),
        (_, Some(hi)) if hi > 0.0 => (-0.1 * hi, 1.1 * hi),
        _ => (-1.0, 1.0),
    }
}

/// 数值区间的上界，至少为 `floor`
pub(crate) fn upper_bound<I: IntoIterator<Item = f64>>(values: I, floor: f64) -> f64 {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(floor, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_state() {
        let ps = PairState::new("CH2-CH3", "npt_300K").unwrap();
        assert_eq!(ps.t1, "CH2");
        assert_eq!(ps.t2, "CH3");
        assert_eq!(ps.pair(), "CH2-CH3");
        assert_eq!(ps.title(), "CH2-CH3, npt_300K");
        assert!(PairState::new("CH2", "npt").is_err());
    }

    #[test]
    fn test_potential_range() {
        let (lo, hi) = potential_range(Some(-2.0), Some(10.0));
        assert!((lo + 2.2).abs() < 1e-12);
        assert!((hi - 2.2).abs() < 1e-12);
        let (lo, hi) = potential_range(Some(0.0), Some(10.0));
        assert!((lo + 1.0).abs() < 1e-12);
        assert!((hi - 11.0).abs() < 1e-12);
        assert_eq!(potential_range(None, None), (-1.0, 1.0));
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(upper_bound(vec![0.5, 2.5, f64::NAN], 1.0), 2.5);
        assert_eq!(upper_bound(Vec::new(), 1.0), 1.0);
    }
}

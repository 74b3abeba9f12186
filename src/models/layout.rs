//! # 优化输出目录布局
//!
//! MS-IBI 优化产生的 RDF、势能和目标 RDF 文件遵循固定命名规则：
//!
//! ```text
//! {target_dir}/{t1}-{t2}-{state}.txt
//! {rdf_dir}/pair_{t1}-{t2}-state_{state}-step{i}.txt
//! {potentials_dir}/step{i}.pot.{t1}-{t2}.txt
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/rdf.rs`, `commands/animate.rs`, `plot/` 使用
//! - 由 `config/` 提供目录配置

use std::path::{Path, PathBuf};

/// 输入/输出目录集合
#[derive(Debug, Clone, PartialEq)]
pub struct RunLayout {
    pub target_dir: PathBuf,
    pub rdf_dir: PathBuf,
    pub potentials_dir: PathBuf,
    pub figures_dir: PathBuf,
    pub animations_dir: PathBuf,
}

impl RunLayout {
    /// 目标 RDF 文件
    pub fn target_rdf(&self, t1: &str, t2: &str, state: &str) -> PathBuf {
        self.target_dir.join(format!("{}-{}-{}.txt", t1, t2, state))
    }

    /// 第 `step` 次迭代的 RDF 文件
    pub fn query_rdf(&self, t1: &str, t2: &str, state: &str, step: usize) -> PathBuf {
        query_rdf_in(&self.rdf_dir, t1, t2, state, step)
    }

    /// 第 `step` 次迭代的势能文件
    pub fn potential(&self, t1: &str, t2: &str, step: usize) -> PathBuf {
        potential_in(&self.potentials_dir, t1, t2, step)
    }

    /// 拟合曲线图
    pub fn fit_figure(&self, pair: &str, ext: &str) -> PathBuf {
        self.figures_dir.join(format!("{}-fit.{}", pair, ext))
    }

    /// RDF 对比图
    pub fn rdf_figure(&self, t1: &str, t2: &str, state: &str, step: usize, ext: &str) -> PathBuf {
        self.figures_dir
            .join(format!("{}-{}-{}-step{}.{}", t1, t2, state, step, ext))
    }

    /// RDF/势能演化动画
    pub fn animation(&self, t1: &str, t2: &str, state: &str) -> PathBuf {
        self.animations_dir
            .join(format!("{}-{}-{}.gif", t1, t2, state))
    }
}

/// 指定目录下的 RDF 文件（用于第二组优化结果）
pub fn query_rdf_in(dir: &Path, t1: &str, t2: &str, state: &str, step: usize) -> PathBuf {
    dir.join(format!("pair_{}-{}-state_{}-step{}.txt", t1, t2, state, step))
}

/// 指定目录下的势能文件
pub fn potential_in(dir: &Path, t1: &str, t2: &str, step: usize) -> PathBuf {
    dir.join(format!("step{}.pot.{}-{}.txt", step, t1, t2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> RunLayout {
        RunLayout {
            target_dir: PathBuf::from("targets"),
            rdf_dir: PathBuf::from("rdfs"),
            potentials_dir: PathBuf::from("potentials"),
            figures_dir: PathBuf::from("figures"),
            animations_dir: PathBuf::from("animations"),
        }
    }

    #[test]
    fn test_input_naming() {
        let l = layout();
        assert_eq!(
            l.target_rdf("A", "B", "npt_1"),
            PathBuf::from("targets/A-B-npt_1.txt")
        );
        assert_eq!(
            l.query_rdf("A", "B", "npt_1", 3),
            PathBuf::from("rdfs/pair_A-B-state_npt_1-step3.txt")
        );
        assert_eq!(
            l.potential("A", "B", 7),
            PathBuf::from("potentials/step7.pot.A-B.txt")
        );
    }

    #[test]
    fn test_output_naming() {
        let l = layout();
        assert_eq!(l.fit_figure("A-B", "png"), PathBuf::from("figures/A-B-fit.png"));
        assert_eq!(
            l.rdf_figure("A", "B", "nvt", 2, "svg"),
            PathBuf::from("figures/A-B-nvt-step2.svg")
        );
        assert_eq!(
            l.animation("A", "B", "nvt"),
            PathBuf::from("animations/A-B-nvt.gif")
        );
    }
}

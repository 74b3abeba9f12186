//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `parse`: 解析优化日志并汇总
//! - `best`: 挑选每个 pair 的最佳迭代
//! - `fit`: 绘制拟合值随迭代变化曲线
//! - `rdf`: 绘制 RDF 与势能对比图
//! - `animate`: 生成 RDF/势能演化动画
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: log, plot

pub mod log;
pub mod plot;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// msibi-utils - MS-IBI 优化结果后处理工具箱
#[derive(Parser, Debug)]
#[command(name = "msibi-utils")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Post-processing toolkit for MS-IBI coarse-graining optimizations", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML configuration file (paths, units, render and selection defaults)
    #[arg(long, global = true, env = "MSIBI_UTILS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all diagnostic logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an MS-IBI optimization log and summarize pairs and states
    Parse(log::ParseArgs),

    /// Find the best iterations for each pair
    Best(log::BestArgs),

    /// Plot fit value vs. iteration for each pair
    Fit(plot::FitArgs),

    /// Plot query RDF, target RDF and potential for pairs at states
    Rdf(plot::RdfArgs),

    /// Animate the evolution of RDF and potential over iterations
    Animate(plot::AnimateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_best_args() {
        let cli = Cli::try_parse_from([
            "msibi-utils",
            "-vv",
            "best",
            "opt.out",
            "--top-k",
            "3",
            "--weight",
            "npt_1=2.0",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Best(args) => {
                assert_eq!(args.top_k, Some(3));
                assert_eq!(args.weights, vec![("npt_1".to_string(), 2.0)]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

//! # 日志相关子命令 CLI 定义
//!
//! - `parse`: 解析日志并汇总
//! - `best`: 挑选最佳迭代
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/parse.rs`, `commands/best.rs`

use clap::Args;
use std::path::PathBuf;

/// parse 子命令参数
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// MS-IBI optimization log file
    pub logfile: PathBuf,

    /// Export all fit values as long-format CSV (pair, state, iteration, fit)
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// best 子命令参数
#[derive(Args, Debug)]
pub struct BestArgs {
    /// MS-IBI optimization log file
    pub logfile: PathBuf,

    /// Number of best iterations to report per pair [default: 5]
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Only states whose name contains this marker are scored [default: npt]
    #[arg(short, long)]
    pub marker: Option<String>,

    /// Weight of a state in the mean score (e.g. "npt_300K=2.0"), repeatable
    #[arg(short, long = "weight", value_parser = parse_weight)]
    pub weights: Vec<(String, f64)>,

    /// Save the result table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// 解析 STATE=WEIGHT 形式的权重
pub fn parse_weight(input: &str) -> Result<(String, f64), String> {
    let (state, weight) = input
        .split_once('=')
        .ok_or_else(|| format!("Invalid weight '{}'. Use STATE=WEIGHT", input))?;

    let state = state.trim();
    if state.is_empty() {
        return Err(format!("Missing state name in '{}'", input));
    }

    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| format!("Invalid weight value in '{}'", input))?;
    check_weight(state, weight)?;

    Ok((state.to_string(), weight))
}

/// state 权重必须为有限的非负数
pub fn check_weight(state: &str, weight: f64) -> Result<(), String> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!(
            "Weight of state '{}' must be a non-negative number, got {}",
            state, weight
        ));
    }
    Ok(())
}

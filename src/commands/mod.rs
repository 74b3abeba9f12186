//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，并提供批量绘图共用的辅助函数。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config/`, `parsers/`, `ranking/`, `plot/`, `batch/`, `utils/`
//! - 子模块: parse, best, fit, rdf, animate

pub mod animate;
pub mod best;
pub mod fit;
pub mod parse;
pub mod rdf;

use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::Commands;
use crate::config::FileConfig;
use crate::error::{MsibiError, Result};
use crate::models::FitLog;
use crate::parsers;
use crate::utils::{output, progress};

use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 执行命令
pub fn run(cmd: Commands, config: &FileConfig) -> Result<()> {
    match cmd {
        Commands::Parse(args) => parse::execute(args),
        Commands::Best(args) => best::execute(args, config),
        Commands::Fit(args) => fit::execute(args, config),
        Commands::Rdf(args) => rdf::execute(args, config),
        Commands::Animate(args) => animate::execute(args, config),
    }
}

/// 读取并解析优化日志
pub(crate) fn read_log(path: &Path) -> Result<FitLog> {
    if !path.is_file() {
        return Err(MsibiError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let spinner = progress::create_spinner(&format!("Parsing '{}'", path.display()));
    let log = parsers::parse_logfile(path);
    spinner.finish_and_clear();

    let log = log?;
    if log.is_empty() {
        output::print_warning(&format!("No fit records found in '{}'", path.display()));
    } else {
        output::print_info(&format!(
            "Read {} pairs from '{}'",
            log.len(),
            path.display()
        ));
    }
    Ok(log)
}

/// 按 glob 模式筛选 pair（未指定时返回全部）
pub(crate) fn selected_pairs(log: &FitLog, pattern: Option<&str>) -> Result<Vec<String>> {
    let pattern = pattern
        .map(glob::Pattern::new)
        .transpose()
        .map_err(|e| MsibiError::InvalidArgument(format!("Invalid pair pattern: {}", e)))?;

    Ok(log
        .pair_names()
        .filter(|pair| pattern.as_ref().map_or(true, |p| p.matches(pair)))
        .map(str::to_string)
        .collect())
}

/// 某个 pair 在某个 state 下记录的迭代次数
pub(crate) fn iteration_count(log: &FitLog, pair: &str, state: &str) -> Result<usize> {
    let states = log
        .states(pair)
        .ok_or_else(|| MsibiError::UnknownPair(pair.to_string()))?;

    states.get(state).map(Vec::len).ok_or_else(|| {
        MsibiError::InvalidArgument(format!(
            "State '{}' not found for pair '{}' (available: {})",
            state,
            pair,
            states.keys().cloned().collect::<Vec<_>>().join(", ")
        ))
    })
}

/// 并行渲染一组带名称的任务，并打印汇总
///
/// 输入文件缺失的任务记为跳过，其余错误记为失败；单个任务失败不会中断整个批次。
pub(crate) fn run_batch<T, F>(
    what: &str,
    tasks: Vec<(String, T)>,
    jobs: usize,
    render: F,
) -> Result<()>
where
    T: Sync,
    F: Fn(&T) -> Result<PathBuf> + Sync + Send,
{
    if tasks.is_empty() {
        output::print_warning(&format!("No {} to render", what));
        return Ok(());
    }

    let runner = BatchRunner::new(jobs);
    output::print_info(&format!(
        "Rendering {} {} with {} jobs",
        tasks.len(),
        what,
        runner.jobs()
    ));

    let result = runner.run(tasks, |(name, task)| match render(task) {
        Ok(path) => ProcessResult::Success(path.display().to_string()),
        Err(MsibiError::FileNotFound { path }) => {
            warn!("{}: missing input {}", name, path);
            ProcessResult::Skipped(format!("{}: missing input '{}'", name, path))
        }
        Err(e) => ProcessResult::Failed(name.clone(), e.to_string()),
    })?;

    for path in &result.outputs {
        info!("Wrote '{}'", path);
    }

    // 打印统计
    output::print_separator();
    output::print_success(&format!(
        "Batch complete ({} jobs): {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    for msg in result.skips.iter().take(10) {
        output::print_skip(msg);
    }
    if result.skips.len() > 10 {
        output::print_warning(&format!("  ... and {} more skipped", result.skips.len() - 10));
    }

    if !result.failures.is_empty() {
        output::print_warning("Failed jobs:");
        for (name, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", name, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

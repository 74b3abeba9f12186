//! # best 子命令实现
//!
//! 按平衡态平均拟合值为每个 pair 挑选最佳迭代，输出表格并可选保存 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/log.rs` 定义的 BestArgs
//! - 使用 `config/` 合并选择参数
//! - 使用 `ranking/selector.rs`

use super::read_log;
use crate::cli::log::BestArgs;
use crate::config::{self, FileConfig};
use crate::error::{MsibiError, Result};
use crate::ranking::{select_best_all, BestIterations};
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 结果表格行
#[derive(Debug, Clone, Tabled)]
struct BestRow {
    #[tabled(rename = "pair")]
    pair: String,
    #[tabled(rename = "best_iterations")]
    best_iterations: String,
}

impl From<&BestIterations> for BestRow {
    fn from(best: &BestIterations) -> Self {
        Self {
            pair: best.pair.clone(),
            best_iterations: join_iterations(&best.best_iterations),
        }
    }
}

/// 执行 best
pub fn execute(args: BestArgs, file: &FileConfig) -> Result<()> {
    output::print_header("Finding Best Iterations");

    let options = config::resolve_selection(&args, file)?;
    output::print_info(&format!(
        "Scoring states containing '{}', keeping top {}",
        options.marker, options.top_k
    ));
    for (state, weight) in &options.weights {
        output::print_info(&format!("  weight {} = {}", state, weight));
    }

    let log = read_log(&args.logfile)?;
    let report = select_best_all(&log, &options);

    for (pair, err) in &report.failed {
        output::print_warning(&format!("Skipping pair {}: {}", pair, err));
    }
    if report.ranked.is_empty() {
        if let Some((_, err)) = report.failed.into_iter().next() {
            return Err(err);
        }
        return Ok(());
    }

    let rows: Vec<BestRow> = report.ranked.iter().map(BestRow::from).collect();
    println!("{}", Table::new(&rows));

    if let Some(ref csv_path) = args.csv {
        save_best_csv(&report.ranked, csv_path)?;
        output::print_saved("Best iterations", &csv_path.display().to_string());
    }

    Ok(())
}

fn join_iterations(iterations: &[usize]) -> String {
    iterations
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// 保存 CSV: pair,best_iterations（迭代编号以空格分隔）
fn save_best_csv(results: &[BestIterations], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(MsibiError::CsvError)?;

    wtr.write_record(["pair", "best_iterations"])
        .map_err(MsibiError::CsvError)?;

    for best in results {
        let iterations = join_iterations(&best.best_iterations);
        wtr.write_record([best.pair.as_str(), iterations.as_str()])
            .map_err(MsibiError::CsvError)?;
    }

    wtr.flush().map_err(|e| MsibiError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

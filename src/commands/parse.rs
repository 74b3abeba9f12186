//! # parse 子命令实现
//!
//! 解析优化日志，打印每个 pair 的 state 与迭代次数汇总，可选导出长表 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/log.rs` 定义的 ParseArgs
//! - 使用 `parsers/logfile.rs`, `models/fitlog.rs`

use super::read_log;
use crate::cli::log::ParseArgs;
use crate::error::{MsibiError, Result};
use crate::models::FitLog;
use crate::utils::output;

use std::collections::BTreeSet;
use std::path::Path;
use tabled::{Table, Tabled};

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Pair")]
    pair: String,
    #[tabled(rename = "States")]
    states: String,
    #[tabled(rename = "Iterations")]
    iterations: String,
}

/// 执行 parse
pub fn execute(args: ParseArgs) -> Result<()> {
    output::print_header("Parsing MS-IBI Optimization Log");

    let log = read_log(&args.logfile)?;
    if log.is_empty() {
        return Ok(());
    }

    println!("{}", Table::new(summary_rows(&log)));

    let report = log.check_consistency();
    if !report.same_states {
        output::print_warning("Pairs were optimized at different sets of states");
    }
    if report.iteration_counts.len() > 1 {
        output::print_warning(&format!(
            "Fit sequences have different lengths: {:?}",
            report.iteration_counts
        ));
    }
    if report.is_consistent() {
        output::print_success("All pairs share the same states and iteration count");
    }

    if let Some(ref csv_path) = args.csv {
        save_fits_csv(&log, csv_path)?;
        output::print_saved("Fit values", &csv_path.display().to_string());
    }

    Ok(())
}

/// 每个 pair 一行：state 列表与各 state 的迭代次数
fn summary_rows(log: &FitLog) -> Vec<SummaryRow> {
    log.iter()
        .map(|(pair, states)| {
            let names: Vec<&str> = states.keys().map(String::as_str).collect();
            let counts: BTreeSet<usize> = states.values().map(Vec::len).collect();

            SummaryRow {
                pair: pair.clone(),
                states: names.join(", "),
                iterations: counts
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })
        .collect()
}

/// 导出长表 CSV: pair,state,iteration,fit
fn save_fits_csv(log: &FitLog, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(MsibiError::CsvError)?;

    for row in log.to_rows() {
        wtr.serialize(row).map_err(MsibiError::CsvError)?;
    }

    wtr.flush().map_err(|e| MsibiError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

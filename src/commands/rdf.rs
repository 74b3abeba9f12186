//! # rdf 子命令实现
//!
//! 绘制某次迭代的目标 RDF、优化 RDF 与势能对比图。
//! 未指定 pair 时对日志中所有 pair 的所有 state 绘制，默认取最后一次迭代。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 RdfArgs
//! - 使用 `plot/rdf.rs`
//! - 批量模式使用 `batch/`

use super::{iteration_count, read_log, run_batch, selected_pairs};
use crate::cli::plot::RdfArgs;
use crate::config::{self, FileConfig};
use crate::error::{MsibiError, Result};
use crate::models::FitLog;
use crate::plot::{plot_pair_at_state, PairState};
use crate::utils::output;

/// 执行 rdf
pub fn execute(args: RdfArgs, file: &FileConfig) -> Result<()> {
    output::print_header("Plotting RDFs and Potentials");

    let render = config::resolve_render(&args.render, args.format, None, file)?;
    let layout = config::resolve_layout(&args.paths, file);
    let units = config::resolve_units(&args.units, file)?;
    let log = read_log(&args.logfile)?;

    let plot = |(target, step): &(PairState, usize)| {
        plot_pair_at_state(target, *step, &layout, &units, &render)
    };

    if let (Some(pair), Some(state)) = (&args.pair, &args.state) {
        let step = match args.step {
            Some(step) => step,
            None => last_step(&log, pair, state)?,
        };
        let target = PairState::new(pair, state)?;
        let name = format!("{} step {}", target.title(), step);
        let output_path = plot(&(target, step))?;
        output::print_saved(&name, &output_path.display().to_string());
        return Ok(());
    }

    let mut tasks = Vec::new();
    for pair in selected_pairs(&log, args.batch.pairs.as_deref())? {
        let states = log.states(&pair).map(|s| s.keys().cloned().collect::<Vec<_>>());
        for state in states.unwrap_or_default() {
            let step = match args.step {
                Some(step) => step,
                None => last_step(&log, &pair, &state)?,
            };
            match PairState::new(&pair, &state) {
                Ok(target) => {
                    let name = format!("{} step {}", target.title(), step);
                    tasks.push((name, (target, step)));
                }
                Err(e) => output::print_warning(&e.to_string()),
            }
        }
    }

    run_batch("RDF figures", tasks, args.batch.jobs, plot)
}

/// 日志中最后一次迭代的编号
fn last_step(log: &FitLog, pair: &str, state: &str) -> Result<usize> {
    iteration_count(log, pair, state)?
        .checked_sub(1)
        .ok_or_else(|| {
            MsibiError::InvalidArgument(format!("No iterations for {} at {}", pair, state))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::logfile::parse_log_content;

    #[test]
    fn test_last_step() {
        let log = parse_log_content(
            "f pair A-B: state npt: 0.1\n\
             f pair A-B: state npt: 0.2\n\
             f pair A-B: state npt: 0.3\n",
        );
        assert_eq!(last_step(&log, "A-B", "npt").unwrap(), 2);
        assert!(last_step(&log, "A-B", "nvt").is_err());
        assert!(matches!(
            last_step(&log, "B-B", "npt"),
            Err(MsibiError::UnknownPair(_))
        ));
    }
}

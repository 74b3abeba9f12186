//! # fit 子命令实现
//!
//! 为指定 pair（或所有 pair）绘制拟合值随迭代变化的曲线。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 FitArgs
//! - 使用 `plot/fit.rs`
//! - 批量模式使用 `batch/`

use super::{read_log, run_batch, selected_pairs};
use crate::cli::plot::{FitArgs, PathArgs};
use crate::config::{self, FileConfig};
use crate::error::Result;
use crate::plot::plot_pair_fits;
use crate::utils::output;

use std::path::PathBuf;

/// 执行 fit
pub fn execute(args: FitArgs, file: &FileConfig) -> Result<()> {
    output::print_header("Plotting Fit Evolution");

    let render = config::resolve_render(&args.render, args.format, None, file)?;
    let layout = config::resolve_layout(
        &PathArgs {
            figures_dir: args.figures_dir.clone(),
            ..PathArgs::default()
        },
        file,
    );
    let log = read_log(&args.logfile)?;
    let ext = render.format.extension();

    let plot = |pair: &String| -> Result<PathBuf> {
        let output_path = layout.fit_figure(pair, ext);
        plot_pair_fits(pair, &log, &output_path, &render)?;
        Ok(output_path)
    };

    if let Some(ref pair) = args.pair {
        let output_path = plot(pair)?;
        output::print_saved(pair, &output_path.display().to_string());
        return Ok(());
    }

    let tasks: Vec<(String, String)> = selected_pairs(&log, args.batch.pairs.as_deref())?
        .into_iter()
        .map(|pair| (pair.clone(), pair))
        .collect();

    run_batch("fit figures", tasks, args.batch.jobs, plot)
}

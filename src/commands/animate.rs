//! # animate 子命令实现
//!
//! 生成 RDF 与势能随迭代演化的 GIF 动画，可选叠加第二组优化结果。
//! 未指定 pair 时对日志中所有 pair 的所有 state 生成，默认帧数为日志中的迭代次数。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 AnimateArgs
//! - 使用 `plot/animation.rs`
//! - 批量模式使用 `batch/`

use super::{iteration_count, read_log, run_batch, selected_pairs};
use crate::cli::plot::AnimateArgs;
use crate::config::{self, FileConfig};
use crate::error::Result;
use crate::plot::{animate_pair_at_state, AnimationOptions, PairState};
use crate::utils::output;

/// 执行 animate
pub fn execute(args: AnimateArgs, file: &FileConfig) -> Result<()> {
    output::print_header("Animating RDF and Potential Evolution");

    let render = config::resolve_render(&args.render, None, args.frame_delay, file)?;
    let layout = config::resolve_layout(&args.paths, file);
    let units = config::resolve_units(&args.units, file)?;
    let log = read_log(&args.logfile)?;

    let overlay = args.rdf2_dir.clone().zip(args.potentials2_dir.clone());
    if let Some((ref rdf2_dir, ref potentials2_dir)) = overlay {
        output::print_info(&format!(
            "Overlaying second run from '{}' and '{}'",
            rdf2_dir.display(),
            potentials2_dir.display()
        ));
    }

    let animate = |(target, steps): &(PairState, usize)| {
        let options = AnimationOptions {
            steps: *steps,
            n_skip: args.n_skip,
            overlay: overlay.clone(),
        };
        animate_pair_at_state(target, &layout, &units, &render, &options)
    };

    if let (Some(pair), Some(state)) = (&args.pair, &args.state) {
        let steps = match args.steps {
            Some(steps) => steps,
            None => iteration_count(&log, pair, state)?,
        };
        let target = PairState::new(pair, state)?;
        let name = format!("{} ({} frames)", target.title(), steps);
        let output_path = animate(&(target, steps))?;
        output::print_saved(&name, &output_path.display().to_string());
        return Ok(());
    }

    let mut tasks = Vec::new();
    for pair in selected_pairs(&log, args.batch.pairs.as_deref())? {
        let states = log.states(&pair).map(|s| s.keys().cloned().collect::<Vec<_>>());
        for state in states.unwrap_or_default() {
            let steps = match args.steps {
                Some(steps) => steps,
                None => iteration_count(&log, &pair, &state)?,
            };
            match PairState::new(&pair, &state) {
                Ok(target) => {
                    let name = format!("{} ({} frames)", target.title(), steps);
                    tasks.push((name, (target, steps)));
                }
                Err(e) => output::print_warning(&e.to_string()),
            }
        }
    }

    run_batch("animations", tasks, args.batch.jobs, animate)
}

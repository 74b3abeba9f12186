//! # msibi-utils - MS-IBI 优化结果后处理工具箱
//!
//! 解析多态迭代玻尔兹曼反演（MS-IBI）粗粒化优化的输出日志，
//! 挑选最佳迭代，并绘制拟合曲线、RDF/势能对比图与演化动画。
//!
//! ## 子命令
//! - `parse`   - 解析日志并汇总 pair/state/迭代次数
//! - `best`    - 按平衡态平均拟合值挑选最佳迭代
//! - `fit`     - 拟合值随迭代变化曲线
//! - `rdf`     - 单次迭代的 RDF 与势能对比图
//! - `animate` - RDF 与势能演化动画 (GIF)
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── config/     (配置文件与参数合并)
//!   ├── logging.rs  (诊断日志初始化)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (日志与数值表解析)
//!   │     ├── ranking/   (最佳迭代选择)
//!   │     ├── plot/      (图像与动画)
//!   │     ├── batch/     (并行批量处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod models;
mod parsers;
mod plot;
mod ranking;
mod utils;

use clap::Parser;
use cli::Cli;
use config::FileConfig;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> error::Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let file_config = FileConfig::load(cli.config.as_deref())?;
    commands::run(cli.command, &file_config)
}

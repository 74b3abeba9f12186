//! # 终端结果输出
//!
//! 面向用户的结果行（带彩色标签），诊断信息请使用 `tracing`。
//! 错误写入 stderr，其余写入 stdout。
//!
//! ## 依赖关系
//! - 被 `commands/`, `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

const RULE_WIDTH: usize = 60;

fn tagged(tag: ColoredString, msg: &str) -> String {
    format!("{} {}", tag, msg)
}

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{}", tagged("[OK]".green().bold(), msg));
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{}", tagged("[ERR]".red().bold(), msg));
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{}", tagged("[WARN]".yellow().bold(), msg));
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{}", tagged("[*]".blue().bold(), msg));
}

/// 批量任务中因输入缺失而跳过的条目
pub fn print_skip(msg: &str) {
    println!("{}", tagged("[SKIP]".dimmed(), msg));
}

/// 已写出的文件，如 `[OK] A-B, npt step 7 -> figures/A-B-npt-step7.png`
pub fn print_saved(what: &str, path: &str) {
    let msg = format!("{} {} {}", what.dimmed(), "->".cyan(), path);
    println!("{}", tagged("[OK]".green().bold(), &msg));
}

/// 子命令标题栏
pub fn print_header(title: &str) {
    let rule = "─".repeat(RULE_WIDTH);
    println!("\n{}\n  {}\n{}\n", rule.dimmed(), title.bold(), rule.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}

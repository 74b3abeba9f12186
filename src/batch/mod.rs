//! # 批量渲染
//!
//! `fit`/`rdf`/`animate` 未指定 pair 时，每个输出文件作为一个任务并行执行。
//! 任务之间不共享可变状态，单个任务失败只记入汇总。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 的 `run_batch` 使用
//! - 使用 `rayon` 线程池与 `indicatif` 进度条

pub mod runner;

pub use runner::{BatchRunner, ProcessResult};

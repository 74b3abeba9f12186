//! # 迭代排序模块
//!
//! 根据平衡态拟合值挑选每个 pair 的最佳迭代。
//!
//! ## 依赖关系
//! - 被 `commands/best.rs` 使用
//! - 使用 `models/fitlog.rs`

pub mod selector;

pub use selector::{select_best_all, BestIterations};

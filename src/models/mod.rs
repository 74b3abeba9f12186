//! # 数据模型模块
//!
//! 定义拟合日志、数值表和优化输出目录布局。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `ranking/`, `plot/` 和 `commands/` 使用
//! - 子模块: fitlog, layout, table

pub mod fitlog;
pub mod layout;
pub mod table;

pub use fitlog::{split_pair, FitLog, LogRecord};
pub use layout::RunLayout;
pub use table::NumericTable;

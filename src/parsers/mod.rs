//! # 解析器模块
//!
//! 提供 MS-IBI 优化日志和 RDF/势能数值表的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `plot/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: logfile, table

pub mod logfile;
pub mod table;

pub use logfile::parse_logfile;
pub use table::{load_table, load_table_or_zeros};

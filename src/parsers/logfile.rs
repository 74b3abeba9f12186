//! # MS-IBI 优化日志解析器
//!
//! 解析 MS-IBI 优化输出日志，提取每个 pair 在每个 state 下各次迭代的拟合值。
//!
//! ## 日志格式说明
//! ```text
//! Fitness pair A-B: state npt_300K: iteration 3: 0.912345
//! ```
//! - 第 1 个 token 必须为 `pair`
//! - 第 2 个 token 为 pair 名称（末尾带一个标点）
//! - 第 4 个 token 为 state 名称（末尾带一个标点）
//! - 最后一个 token 为拟合值
//!
//! 其他行一律忽略。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/fitlog.rs`

use crate::error::{MsibiError, Result};
use crate::models::{FitLog, LogRecord};

use std::fs;
use std::path::Path;
use tracing::{debug, trace};

const PAIR_KEYWORD: &str = "pair";
const MIN_RECORD_TOKENS: usize = 5;

/// 解析日志文件
pub fn parse_logfile(path: &Path) -> Result<FitLog> {
    let bytes = fs::read(path).map_err(|e| MsibiError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    // 非 UTF-8 字节按替换字符处理，不影响其余行
    let content = String::from_utf8_lossy(&bytes);
    let log = parse_log_content(&content);
    debug!(
        "Parsed {} pairs from '{}'",
        log.len(),
        path.display()
    );
    Ok(log)
}

/// 从字符串内容解析日志
pub fn parse_log_content(content: &str) -> FitLog {
    let mut log = FitLog::new();

    for (line_no, line) in content.lines().enumerate() {
        if let Some(record) = parse_record(line) {
            log.push(record);
        } else if is_pair_line(line) {
            debug!("Skipping malformed pair line {}: {:?}", line_no + 1, line);
        } else {
            trace!("Ignoring line {}", line_no + 1);
        }
    }

    log
}

/// 将一行解析为记录，不匹配时返回 None
pub fn parse_record(line: &str) -> Option<LogRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_RECORD_TOKENS || tokens[1] != PAIR_KEYWORD {
        return None;
    }

    let pair = strip_label(tokens[2]);
    let state = strip_label(tokens[4]);
    let value = tokens.last()?;

    Some(LogRecord {
        pair: pair.to_string(),
        state: state.to_string(),
        value: value.to_string(),
    })
}

fn is_pair_line(line: &str) -> bool {
    line.split_whitespace().nth(1) == Some(PAIR_KEYWORD)
}

/// 去掉标签末尾的一个字符（通常为冒号），结果可以为空
fn strip_label(token: &str) -> &str {
    let mut chars = token.chars();
    chars.next_back();
    chars.as_str()
}

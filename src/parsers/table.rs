//! # 数值表格解析器
//!
//! 读取 RDF / 势能文本文件（空白分隔的数值列）。
//!
//! ## 格式说明
//! ```text
//! # r        g(r)
//! 0.005      0.000
//! 0.015      0.000
//! ...
//! ```
//! 空行和以 `#` 开头的注释行被忽略。
//!
//! ## 依赖关系
//! - 被 `plot/rdf.rs`, `plot/animation.rs` 使用
//! - 使用 `models/table.rs`

use crate::error::{MsibiError, Result};
use crate::models::NumericTable;

use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// 读取数值表文件，文件不存在时返回 `FileNotFound`
pub fn load_table(path: &Path) -> Result<NumericTable> {
    if !path.exists() {
        return Err(MsibiError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| MsibiError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let table = parse_table_content(&content).map_err(|reason| MsibiError::ParseError {
        format: "numeric table".to_string(),
        path: path.display().to_string(),
        reason,
    })?;
    trace!("Loaded {} rows from '{}'", table.len(), path.display());
    Ok(table)
}

/// 读取数值表，若文件为空则以 `n_rows` x `n_cols` 的全零表替代
pub fn load_table_or_zeros(path: &Path, n_rows: usize, n_cols: usize) -> Result<NumericTable> {
    let table = load_table(path)?;
    if table.is_empty() {
        warn!("Empty table '{}', substituting zeros", path.display());
        Ok(NumericTable::zeros(n_rows, n_cols))
    } else {
        Ok(table)
    }
}

/// 从字符串内容解析数值表
pub fn parse_table_content(content: &str) -> std::result::Result<NumericTable, String> {
    let mut rows = Vec::new();
    let mut width: Option<usize> = None;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|tok| tok.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| format!("line {}: {}", line_no + 1, e))?;

        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(format!(
                    "line {}: expected {} columns, found {}",
                    line_no + 1,
                    w,
                    row.len()
                ));
            }
            _ => {}
        }

        rows.push(row);
    }

    let table = NumericTable::new(rows);
    if !table.is_empty() && table.n_cols() < 2 {
        return Err(format!(
            "expected at least 2 columns, found {}",
            table.n_cols()
        ));
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let content = r#"
# r g(r)
0.0 0.0
0.5 1.2

1.0 0.9
"#;
        let table = parse_table_content(content).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.column(1), vec![0.0, 1.2, 0.9]);
    }

    #[test]
    fn test_parse_table_errors() {
        assert!(parse_table_content("0.0 abc\n").is_err());
        assert!(parse_table_content("0.0 1.0\n0.5 1.0 2.0\n").is_err());
        assert!(parse_table_content("1.0\n2.0\n").is_err());
    }

    #[test]
    fn test_load_missing_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            load_table(&missing),
            Err(MsibiError::FileNotFound { .. })
        ));

        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "").unwrap();
        let table = load_table_or_zeros(&empty, 200, 2).unwrap();
        assert_eq!(table.len(), 200);
        assert_eq!(table.n_cols(), 2);
    }
}

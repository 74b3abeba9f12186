//! # 数值表格数据模型
//!
//! RDF 和势能文件都是以空白分隔的数值表（第 0 列为距离，第 1 列为数值）。
//!
//! ## 依赖关系
//! - 被 `parsers/table.rs` 构建
//! - 被 `plot/` 使用

/// 行优先存储的数值表
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericTable {
    rows: Vec<Vec<f64>>,
}

impl NumericTable {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// 全零表，用于替代空文件
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            rows: vec![vec![0.0; n_cols]; n_rows],
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列数（以第一行为准）
    pub fn n_cols(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// 将某列乘以系数
    pub fn scale_column(&mut self, col: usize, factor: f64) {
        for row in &mut self.rows {
            if let Some(v) = row.get_mut(col) {
                *v *= factor;
            }
        }
    }

    /// 取出某列
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(col).copied())
            .collect()
    }

    /// 以 (x, y) 点对形式取出两列
    pub fn points(&self, x_col: usize, y_col: usize) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| Some((*row.get(x_col)?, *row.get(y_col)?)))
            .collect()
    }

    /// 最后一行某列的值
    pub fn last_value(&self, col: usize) -> Option<f64> {
        self.rows.last().and_then(|row| row.get(col).copied())
    }

    /// 从第 `skip` 行起某列的最小值
    pub fn min_from(&self, col: usize, skip: usize) -> Option<f64> {
        self.rows
            .iter()
            .skip(skip)
            .filter_map(|row| row.get(col).copied())
            .reduce(f64::min)
    }

    /// 某列最大值
    pub fn max(&self, col: usize) -> Option<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(col).copied())
            .reduce(f64::max)
    }
}

//! # MS-IBI 拟合日志数据模型
//!
//! 存储从优化日志中提取的拟合值：pair → state → 按迭代顺序排列的拟合值。
//!
//! ## 依赖关系
//! - 被 `parsers/logfile.rs` 构建
//! - 被 `ranking/`, `plot/`, `commands/` 使用

use crate::error::{MsibiError, Result};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// 单个 state 的拟合值序列（原始文本，按迭代顺序）
pub type FitSeries = Vec<String>;

/// 单个 pair 的所有 state
pub type StateFits = BTreeMap<String, FitSeries>;

/// 日志中一条有效记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub pair: String,
    pub state: String,
    pub value: String,
}

/// 解析后的拟合日志
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FitLog {
    pairs: BTreeMap<String, StateFits>,
}

impl FitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条记录，按需创建 pair 和 state
    pub(crate) fn push(&mut self, record: LogRecord) {
        self.pairs
            .entry(record.pair)
            .or_default()
            .entry(record.state)
            .or_default()
            .push(record.value);
    }

    /// pair 数量
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 按字典序遍历 pair 名称
    pub fn pair_names(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    /// 获取某个 pair 的所有 state
    pub fn states(&self, pair: &str) -> Option<&StateFits> {
        self.pairs.get(pair)
    }

    /// 获取某个 pair/state 的拟合值序列
    pub fn fits(&self, pair: &str, state: &str) -> Option<&FitSeries> {
        self.pairs.get(pair).and_then(|states| states.get(state))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StateFits)> {
        self.pairs.iter()
    }

    /// 将某个 pair/state 的拟合值解析为浮点数
    pub fn values_f64(&self, pair: &str, state: &str) -> Result<Vec<f64>> {
        let series = self
            .fits(pair, state)
            .ok_or_else(|| MsibiError::UnknownPair(format!("{}/{}", pair, state)))?;

        series
            .iter()
            .map(|v| {
                v.parse::<f64>().map_err(|_| MsibiError::InvalidFitValue {
                    pair: pair.to_string(),
                    state: state.to_string(),
                    value: v.clone(),
                })
            })
            .collect()
    }

    /// 检查日志结构是否规整（所有 pair 的 state 集合相同，所有序列等长）
    pub fn check_consistency(&self) -> ConsistencyReport {
        let mut state_sets: BTreeSet<Vec<&str>> = BTreeSet::new();
        let mut lengths: BTreeSet<usize> = BTreeSet::new();

        for states in self.pairs.values() {
            state_sets.insert(states.keys().map(String::as_str).collect());
            lengths.extend(states.values().map(Vec::len));
        }

        ConsistencyReport {
            same_states: state_sets.len() <= 1,
            iteration_counts: lengths.into_iter().collect(),
        }
    }

    /// 展开为长表格式记录 (pair, state, iteration, fit)
    pub fn to_rows(&self) -> Vec<FitRow> {
        let mut rows = Vec::new();
        for (pair, states) in &self.pairs {
            for (state, fits) in states {
                for (iteration, fit) in fits.iter().enumerate() {
                    rows.push(FitRow {
                        pair: pair.clone(),
                        state: state.clone(),
                        iteration,
                        fit: fit.clone(),
                    });
                }
            }
        }
        rows
    }
}

/// 日志结构规整性检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// 所有 pair 是否拥有相同的 state 集合
    pub same_states: bool,
    /// 出现过的所有序列长度（去重、升序）
    pub iteration_counts: Vec<usize>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.same_states && self.iteration_counts.len() <= 1
    }
}

/// CSV 导出行
#[derive(Debug, Clone, Serialize)]
pub struct FitRow {
    pub pair: String,
    pub state: String,
    pub iteration: usize,
    pub fit: String,
}

/// 将 "type1-type2" 拆分为两个粒子类型
pub fn split_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('-') {
        Some((t1, t2)) if !t1.is_empty() && !t2.is_empty() => Ok((t1, t2)),
        _ => Err(MsibiError::InvalidPairName(pair.to_string())),
    }
}

//! # 最佳迭代选择
//!
//! 对每个 pair，按平衡态（state 名称包含标记字符串，默认 `npt`）的平均拟合值
//! 对迭代排序，返回得分最高的 k 个迭代编号。
//!
//! ## 排序规则
//! - 按得分升序稳定排序，取最后 k 个并反转，即得分降序
//! - 得分相同时，升序中编号小者在前，反转后编号大者在前
//!
//! ## 依赖关系
//! - 被 `commands/best.rs` 调用
//! - 使用 `models/fitlog.rs`

use crate::error::{MsibiError, Result};
use crate::models::FitLog;

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MARKER: &str = "npt";

/// 选择参数
#[derive(Debug, Clone)]
pub struct SelectionOptions {
    /// 返回的迭代数量
    pub top_k: usize,
    /// 平衡态标记
    pub marker: String,
    /// 各 state 的权重（未列出的 state 权重为 1）
    pub weights: BTreeMap<String, f64>,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            marker: DEFAULT_MARKER.to_string(),
            weights: BTreeMap::new(),
        }
    }
}

/// 单个 pair 的最佳迭代
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestIterations {
    pub pair: String,
    pub best_iterations: Vec<usize>,
}

/// 为单个 pair 选择最佳迭代
pub fn select_best(pair: &str, log: &FitLog, options: &SelectionOptions) -> Result<Vec<usize>> {
    let scores = iteration_scores(pair, log, options)?;
    Ok(top_k_descending(&scores, options.top_k))
}

/// 所有 pair 的选择结果，出错的 pair 单独记录
#[derive(Debug, Default)]
pub struct SelectionReport {
    /// 成功排序的 pair（字典序）
    pub ranked: Vec<BestIterations>,
    /// 无法排序的 pair 及原因
    pub failed: Vec<(String, MsibiError)>,
}

/// 按字典序为所有 pair 选择最佳迭代，单个 pair 出错不影响其他 pair
pub fn select_best_all(log: &FitLog, options: &SelectionOptions) -> SelectionReport {
    let mut report = SelectionReport::default();

    for pair in log.pair_names() {
        match select_best(pair, log, options) {
            Ok(best_iterations) => report.ranked.push(BestIterations {
                pair: pair.to_string(),
                best_iterations,
            }),
            Err(e) => {
                debug!("Cannot rank pair {}: {}", pair, e);
                report.failed.push((pair.to_string(), e));
            }
        }
    }

    report
}

/// 计算每次迭代在平衡态上的（加权）平均拟合值
pub fn iteration_scores(pair: &str, log: &FitLog, options: &SelectionOptions) -> Result<Vec<f64>> {
    let states = log
        .states(pair)
        .ok_or_else(|| MsibiError::UnknownPair(pair.to_string()))?;

    let mut series: Vec<(f64, Vec<f64>)> = Vec::new();
    for state in states.keys().filter(|s| s.contains(options.marker.as_str())) {
        let weight = options.weights.get(state).copied().unwrap_or(1.0);
        series.push((weight, log.values_f64(pair, state)?));
    }

    if series.is_empty() {
        return Err(MsibiError::NoQualifyingStates {
            pair: pair.to_string(),
            marker: options.marker.clone(),
        });
    }

    let n_iter = series[0].1.len();
    if series.iter().any(|(_, s)| s.len() != n_iter) {
        let lengths = series
            .iter()
            .map(|(_, s)| s.len().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(MsibiError::RaggedStates {
            pair: pair.to_string(),
            lengths,
        });
    }

    let total_weight: f64 = series.iter().map(|(w, _)| w).sum();
    if total_weight <= 0.0 {
        return Err(MsibiError::InvalidArgument(format!(
            "state weights for pair '{}' must sum to a positive value",
            pair
        )));
    }

    debug!(
        "Pair {}: {} qualifying states, {} iterations",
        pair,
        series.len(),
        n_iter
    );

    Ok((0..n_iter)
        .map(|i| series.iter().map(|(w, s)| w * s[i]).sum::<f64>() / total_weight)
        .collect())
}

/// 得分最高的 k 个编号，按得分降序
fn top_k_descending(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let start = order.len().saturating_sub(k);
    order[start..].iter().rev().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::logfile::parse_log_content;

    fn log_from(lines: &[(&str, &str, &str)]) -> FitLog {
        let content = lines
            .iter()
            .map(|(p, s, v)| format!("Fitness pair {}: state {}: {}", p, s, v))
            .collect::<Vec<_>>()
            .join("\n");
        parse_log_content(&content)
    }

    fn series(pair: &str, state: &str, values: &[f64]) -> Vec<String> {
        values
            .iter()
            .map(|v| format!("Fitness pair {}: state {}: {}", pair, state, v))
            .collect()
    }

    fn build(parts: Vec<Vec<String>>) -> FitLog {
        parse_log_content(&parts.concat().join("\n"))
    }

    #[test]
    fn test_ties_ranked_by_stable_order() {
        let log = build(vec![
            series("A-B", "npt_1", &[1.0, 2.0, 3.0]),
            series("A-B", "npt_2", &[3.0, 2.0, 1.0]),
        ]);
        let opts = SelectionOptions::default();
        assert_eq!(iteration_scores("A-B", &log, &opts).unwrap(), vec![2.0, 2.0, 2.0]);
        assert_eq!(select_best("A-B", &log, &opts).unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn test_ranking_descending() {
        let log = build(vec![
            series("A-B", "npt_1", &[0.1, 0.9, 0.5, 0.7, 0.3, 0.8, 0.2]),
            series("A-B", "npt_2", &[0.1, 0.9, 0.5, 0.7, 0.3, 0.8, 0.2]),
        ]);
        let best = select_best("A-B", &log, &SelectionOptions::default()).unwrap();
        assert_eq!(best, vec![1, 5, 3, 2, 4]);
    }

    #[test]
    fn test_fewer_iterations_than_k() {
        let log = build(vec![series("A-B", "npt", &[0.3, 0.1, 0.2])]);
        let best = select_best("A-B", &log, &SelectionOptions::default()).unwrap();
        assert_eq!(best, vec![0, 2, 1]);
    }

    #[test]
    fn test_non_marker_states_excluded() {
        let log = build(vec![
            series("A-B", "npt", &[0.1, 0.2]),
            series("A-B", "nvt", &[0.9, 0.0]),
        ]);
        let best = select_best("A-B", &log, &SelectionOptions::default()).unwrap();
        assert_eq!(best, vec![1, 0]);
    }

    #[test]
    fn test_custom_marker_and_k() {
        let log = build(vec![
            series("A-B", "npt", &[0.1, 0.2, 0.3]),
            series("A-B", "nvt", &[0.9, 0.0, 0.5]),
        ]);
        let opts = SelectionOptions {
            top_k: 1,
            marker: "nvt".to_string(),
            ..Default::default()
        };
        assert_eq!(select_best("A-B", &log, &opts).unwrap(), vec![0]);
    }

    #[test]
    fn test_weighted_mean() {
        let log = build(vec![
            series("A-B", "npt_1", &[1.0, 0.0]),
            series("A-B", "npt_2", &[0.0, 1.0]),
        ]);
        let mut opts = SelectionOptions::default();
        opts.weights.insert("npt_2".to_string(), 3.0);

        let scores = iteration_scores("A-B", &log, &opts).unwrap();
        assert!((scores[0] - 0.25).abs() < 1e-12);
        assert!((scores[1] - 0.75).abs() < 1e-12);
        assert_eq!(select_best("A-B", &log, &opts).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_no_qualifying_states() {
        let log = log_from(&[("A-B", "nvt", "0.5")]);
        let err = select_best("A-B", &log, &SelectionOptions::default()).unwrap_err();
        assert!(matches!(err, MsibiError::NoQualifyingStates { .. }));
    }

    #[test]
    fn test_ragged_states() {
        let log = build(vec![
            series("A-B", "npt_1", &[0.1, 0.2]),
            series("A-B", "npt_2", &[0.1]),
        ]);
        let err = select_best("A-B", &log, &SelectionOptions::default()).unwrap_err();
        assert!(matches!(err, MsibiError::RaggedStates { .. }));
    }

    #[test]
    fn test_unknown_pair() {
        let log = log_from(&[("A-B", "npt", "0.5")]);
        let err = select_best("C-D", &log, &SelectionOptions::default()).unwrap_err();
        assert!(matches!(err, MsibiError::UnknownPair(_)));
    }

    #[test]
    fn test_select_all_sorted_and_deterministic() {
        let log = log_from(&[
            ("B-B", "npt", "0.5"),
            ("A-B", "npt", "0.1"),
            ("A-A", "npt", "0.2"),
            ("A-A", "npt", "0.4"),
        ]);
        let opts = SelectionOptions::default();
        let first = select_best_all(&log, &opts);
        assert!(first.failed.is_empty());
        let pairs: Vec<_> = first.ranked.iter().map(|b| b.pair.as_str()).collect();
        assert_eq!(pairs, vec!["A-A", "A-B", "B-B"]);
        assert_eq!(first.ranked[0].best_iterations, vec![1, 0]);
        assert_eq!(first.ranked, select_best_all(&log, &opts).ranked);
    }

    #[test]
    fn test_select_all_keeps_other_pairs_on_error() {
        let log = build(vec![
            series("A-A", "npt", &[0.1, 0.3]),
            series("A-B", "nvt", &[0.5, 0.6]),
            series("B-B", "npt_1", &[0.2, 0.1]),
            series("B-B", "npt_2", &[0.2]),
            series("C-C", "npt", &[0.9, 0.4]),
        ]);

        let report = select_best_all(&log, &SelectionOptions::default());

        let ranked: Vec<_> = report.ranked.iter().map(|b| b.pair.as_str()).collect();
        assert_eq!(ranked, vec!["A-A", "C-C"]);
        assert_eq!(report.ranked[0].best_iterations, vec![1, 0]);
        assert_eq!(report.ranked[1].best_iterations, vec![0, 1]);

        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].0, "A-B");
        assert!(matches!(report.failed[0].1, MsibiError::NoQualifyingStates { .. }));
        assert_eq!(report.failed[1].0, "B-B");
        assert!(matches!(report.failed[1].1, MsibiError::RaggedStates { .. }));
    }
}

//! # 批量执行器
//!
//! 并行执行批量绘图任务，每个任务写入独立的输出文件。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs`, `commands/rdf.rs`, `commands/animate.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{MsibiError, Result};
use crate::utils::progress;

use rayon::prelude::*;
use tracing::debug;

/// 单个任务处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如输入缺失）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (任务名称, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 成功输出
    pub outputs: Vec<String>,
    /// 跳过原因
    pub skips: Vec<String>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(msg) => {
                self.success += 1;
                self.outputs.push(msg);
            }
            ProcessResult::Skipped(msg) => {
                self.skipped += 1;
                self.skips.push(msg);
            }
            ProcessResult::Failed(name, err) => {
                self.failed += 1;
                self.failures.push((name, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 表示使用全部 CPU）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理任务列表，结果顺序与输入一致
    pub fn run<T, F>(&self, tasks: Vec<T>, processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(tasks.len() as u64, "Rendering");

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| MsibiError::Other(format!("Failed to build thread pool: {}", e)))?;
        debug!("Running {} tasks on {} threads", tasks.len(), self.jobs);

        let results: Vec<ProcessResult> = pool.install(|| {
            tasks
                .par_iter()
                .map(|task| {
                    let result = processor(task);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_collects_results() {
        let runner = BatchRunner::new(2);
        let tasks: Vec<usize> = (0..10).collect();

        let result = runner
            .run(tasks, |&n| match n % 3 {
                0 => ProcessResult::Success(format!("task {}", n)),
                1 => ProcessResult::Skipped(format!("task {}", n)),
                _ => ProcessResult::Failed(format!("task {}", n), "boom".to_string()),
            })
            .unwrap();

        assert_eq!(result.total(), 10);
        assert_eq!(result.success, 4);
        assert_eq!(result.skipped, 3);
        assert_eq!(result.failed, 3);
        assert_eq!(result.outputs[0], "task 0");
        assert_eq!(result.failures[0], ("task 2".to_string(), "boom".to_string()));
    }

    #[test]
    fn test_auto_jobs() {
        assert!(BatchRunner::new(0).jobs() >= 1);
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }
}

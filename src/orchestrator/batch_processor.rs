//! 批量试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是批量抽取模式的入口，负责批量试卷的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、构建规则表
//! 2. **批量加载**：扫描并加载所有待处理的试卷（`Vec<ExamPaper>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将试卷分批次处理，每批完成后再开始下一批
//! 5. **资源管理**：持有 `Arc<RuleSet>`，所有任务共享同一份只读规则表
//! 6. **全局统计**：汇总所有试卷的处理结果和科目分布

use crate::config::Config;
use crate::models::paper::{ExamPaper, ExtractionReport, QuestionBank};
use crate::orchestrator::paper_processor;
use crate::rules::RuleSet;
use crate::utils::logging::{init_log_file, log_papers_loaded, log_startup, print_final_stats};
use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    rules: Arc<RuleSet>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        // 规则表只构建一次
        let rules = RuleSet::from_config(&config).context("构建规则表失败")?;

        tokio::fs::create_dir_all(&config.output_folder)
            .await
            .with_context(|| format!("无法创建输出目录: {}", config.output_folder))?;

        Ok(Self {
            config,
            rules: Arc::new(rules),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待处理的试卷
        let all_papers = self.load_papers().await?;

        if all_papers.is_empty() {
            warn!("⚠️ 没有找到待处理的试卷文件，程序结束");
            return Ok(());
        }

        let total_papers = all_papers.len();
        log_papers_loaded(total_papers, self.config.max_concurrent_papers);

        // 处理所有试卷
        let stats = self.process_all_papers(all_papers).await?;

        log_subject_statistics(&stats.bank);

        // 输出最终统计
        print_final_stats(
            stats.success,
            stats.failed,
            stats.bank.len(),
            stats.review,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 加载试卷
    async fn load_papers(&self) -> Result<Vec<ExamPaper>> {
        info!("\n📁 正在扫描待处理的试卷...");
        Ok(crate::models::load_all_papers(&self.config.input_folder).await?)
    }

    /// 处理所有试卷
    async fn process_all_papers(&self, all_papers: Vec<ExamPaper>) -> Result<ProcessingStats> {
        let batch_size = self.config.max_concurrent_papers.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total_papers = all_papers.len();
        let total_batches = total_papers.div_ceil(batch_size);
        let mut stats = ProcessingStats::default();

        let mut remaining = all_papers.into_iter();
        let mut batch_start = 0;
        let mut batch_num = 0;

        // 分批处理
        loop {
            let batch_papers: Vec<ExamPaper> = remaining.by_ref().take(batch_size).collect();
            if batch_papers.is_empty() {
                break;
            }
            batch_num += 1;
            let batch_end = batch_start + batch_papers.len();

            log_batch_start(batch_num, total_batches, batch_start + 1, batch_end, total_papers);

            // 处理本批
            let batch_result = self
                .process_batch(batch_papers, batch_start, semaphore.clone())
                .await?;

            log_batch_complete(batch_num, &batch_result);

            stats.success += batch_result.reports.len();
            stats.failed += batch_result.failed;
            for report in batch_result.reports {
                stats.review += report.review_count();
                stats.bank.extend(report.questions);
            }

            batch_start = batch_end;
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_papers: Vec<ExamPaper>,
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut paper_indices = Vec::new();
        let mut batch_handles = Vec::new();

        // 为本批创建并发任务
        for (idx, paper) in batch_papers.into_iter().enumerate() {
            let paper_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let rules = Arc::clone(&self.rules);
            let config_clone = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match paper_processor::process_paper(paper, paper_index, rules, &config_clone).await
                {
                    Ok(report) => Ok(report),
                    Err(e) => {
                        error!("[试卷 {}] ❌ 处理过程中发生错误: {:#}", paper_index, e);
                        Err(e)
                    }
                }
            });
            paper_indices.push(paper_index);
            batch_handles.push(handle);
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();

        let outcomes = join_all(batch_handles).await;
        for (paper_index, outcome) in paper_indices.into_iter().zip(outcomes) {
            match outcome {
                Ok(Ok(report)) => {
                    result.reports.push(report);
                }
                Ok(Err(_)) => {
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[试卷 {}] 任务执行失败: {}", paper_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    review: usize,
    bank: QuestionBank,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    reports: Vec<ExtractionReport>,
    failed: usize,
}

// ========== 日志辅助函数 ==========

fn log_batch_start(batch_num: usize, total_batches: usize, start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批试卷: {}-{} / 共 {} 份", start, end, total);
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(batch_num: usize, result: &BatchResult) {
    let questions: usize = result.reports.iter().map(|r| r.questions.len()).sum();
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 第 {} 批完成: 成功 {}/{}，抽取题目 {}",
        batch_num,
        result.reports.len(),
        result.reports.len() + result.failed,
        questions
    );
    info!("{}", "─".repeat(60));
}

fn log_subject_statistics(bank: &QuestionBank) {
    if bank.is_empty() {
        return;
    }
    info!("\n📚 科目分布:");
    for (subject, stats) in bank.subject_statistics() {
        info!("  {}: {} 道", subject, stats.total_questions);
        for (topic, count) in &stats.topics {
            info!("    - {}: {}", topic, count);
        }
    }
}

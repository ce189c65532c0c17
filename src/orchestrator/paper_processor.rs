//! 单个试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单个试卷的所有页面，是试卷级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **读取页面**：逐页取文本，坏页记录日志后跳过
//! 2. **分段去重**：`BlockSegmenter`
//! 3. **打分筛选**：`CandidateScorer`
//! 4. **流程调度**：对每道候选题复用同一个 `QuestionFlow`
//! 5. **结果输出**：写出 JSON 报告，需复核的题目追加到 review 文件
//! 6. **统计输出**：记录文本块 / 接受 / 拒绝 / 复核数量

use crate::config::Config;
use crate::models::paper::{ExamPaper, ExtractionReport, PageReader, PageText};
use crate::models::question::ExtractedQuestion;
use crate::rules::RuleSet;
use crate::services::{BlockSegmenter, CandidateScorer, ReviewWriter};
use crate::workflow::{QuestionCtx, QuestionFlow};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// 一次流水线运行的结果
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    /// 去重后的文本块数量
    pub total_blocks: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub questions: Vec<ExtractedQuestion>,
}

/// 从逐页文本中抽取题目
///
/// 不会失败：无法使用的文本块被静默过滤。
pub fn extract_questions(pages: &[PageText], rules: &RuleSet) -> Vec<ExtractedQuestion> {
    run_pipeline(pages, rules, "", 0, false).questions
}

/// 从文档读取方抽取题目，读取失败的页面记录日志后跳过
pub fn extract_from_reader<R: PageReader + ?Sized>(
    reader: &R,
    rules: &RuleSet,
) -> Vec<ExtractedQuestion> {
    let (pages, _) = read_pages(reader, 0);
    run_pipeline(&pages, rules, reader.source_name(), 0, false).questions
}

/// 分段 → 去重 → 打分筛选 → 逐题分类并生成参考答案
pub fn run_pipeline(
    pages: &[PageText],
    rules: &RuleSet,
    paper_name: &str,
    paper_index: usize,
    verbose_logging: bool,
) -> PipelineOutcome {
    let segmenter = BlockSegmenter::new(&rules.segmentation);
    let blocks = segmenter.deduplicate(segmenter.segment_pages(pages));
    let total_blocks = blocks.len();

    let selection = CandidateScorer::new(&rules.scoring).select(blocks);
    let accepted = selection.accepted.len();

    // 流程对象只创建一次，复用
    let flow = QuestionFlow::new(rules, verbose_logging);
    let questions = selection
        .accepted
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let ctx = QuestionCtx::new(
                paper_name,
                paper_index,
                candidate.block.page_number,
                index + 1,
            );
            flow.run(candidate, &ctx)
        })
        .collect();

    PipelineOutcome {
        total_blocks,
        accepted,
        rejected: selection.rejected,
        questions,
    }
}

/// 读取全部页面，返回可用页面与跳过的页数
pub fn read_pages<R: PageReader + ?Sized>(reader: &R, paper_index: usize) -> (Vec<PageText>, usize) {
    let mut pages = Vec::new();
    let mut skipped = 0;

    for page in reader.pages() {
        match page {
            Ok(page) => pages.push(page),
            Err(e) => {
                warn!(
                    "[试卷 {}] ⚠️ {} 跳过页面: {}",
                    paper_index,
                    reader.source_name(),
                    e
                );
                skipped += 1;
            }
        }
    }

    (pages, skipped)
}

/// 生成单份试卷的抽取报告（纯计算，不做 I/O）
pub fn build_report(
    paper: &ExamPaper,
    rules: &RuleSet,
    paper_index: usize,
    verbose_logging: bool,
) -> ExtractionReport {
    let (pages, skipped_pages) = read_pages(paper, paper_index);
    let outcome = run_pipeline(&pages, rules, &paper.name, paper_index, verbose_logging);

    ExtractionReport {
        source: paper.name.clone(),
        course: paper.course.clone(),
        level: paper.level.clone(),
        generated_at: chrono::Local::now(),
        total_blocks: outcome.total_blocks,
        accepted: outcome.accepted,
        rejected: outcome.rejected,
        skipped_pages,
        questions: outcome.questions,
    }
}

/// 处理单个试卷
///
/// # 参数
/// - `paper`: 试卷数据
/// - `paper_index`: 试卷索引（用于日志）
/// - `rules`: 共享的规则表
/// - `config`: 配置
///
/// # 返回
/// 返回抽取报告
pub async fn process_paper(
    paper: ExamPaper,
    paper_index: usize,
    rules: Arc<RuleSet>,
    config: &Config,
) -> Result<ExtractionReport> {
    log_paper_start(paper_index, &paper);

    let report_path = report_path(&config.output_folder, &paper);
    let verbose_logging = config.verbose_logging;

    // 规则匹配是 CPU 密集的同步计算
    let report = tokio::task::spawn_blocking(move || {
        build_report(&paper, &rules, paper_index, verbose_logging)
    })
    .await
    .context("抽取任务异常退出")?;

    let json = serde_json::to_string_pretty(&report).context("序列化抽取报告失败")?;
    tokio::fs::write(&report_path, json)
        .await
        .with_context(|| format!("无法写入报告: {}", report_path.display()))?;
    info!(
        "[试卷 {}] 💾 报告已写入: {}",
        paper_index,
        report_path.display()
    );

    let review_writer = ReviewWriter::with_path(&config.review_file);
    for question in report.questions.iter().filter(|q| q.needs_review) {
        review_writer.write(&report.source, question).await?;
    }

    log_paper_complete(paper_index, &report, review_writer.path());

    Ok(report)
}

/// 报告文件路径：输出目录下以源文件名（含扩展名）命名的 JSON 文件
///
/// `a.toml` 与 `a.txt` 分别写入 `a.toml.json` 与 `a.txt.json`，互不覆盖。
fn report_path(output_folder: &str, paper: &ExamPaper) -> PathBuf {
    let file_name = paper
        .file_path
        .as_deref()
        .map(Path::new)
        .and_then(|path| {
            let stem = sanitize(&path.file_stem()?.to_string_lossy());
            Some(match path.extension() {
                Some(ext) => format!("{stem}.{}", sanitize(&ext.to_string_lossy())),
                None => stem,
            })
        })
        .unwrap_or_else(|| sanitize(&paper.name));

    Path::new(output_folder).join(format!("{file_name}.json"))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

// ========== 日志辅助函数 ==========

fn log_paper_start(paper_index: usize, paper: &ExamPaper) {
    info!("[试卷 {}] 开始处理", paper_index);
    info!("[试卷 {}] 名称: {}", paper_index, paper.name);
    if let Some(course) = &paper.course {
        info!("[试卷 {}] 课程: {}", paper_index, course);
    }
    info!("[试卷 {}] 页数: {}", paper_index, paper.pages.len());
}

fn log_paper_complete(paper_index: usize, report: &ExtractionReport, review_file: &str) {
    info!(
        "[试卷 {}] 文本块统计: 共 {}, 接受 {}, 拒绝 {}, 跳过页 {}",
        paper_index, report.total_blocks, report.accepted, report.rejected, report.skipped_pages
    );
    let review = report.review_count();
    if review > 0 {
        info!(
            "[试卷 {}] 📝 {} 道题需复核，已写入 {}",
            paper_index, review, review_file
        );
    }
    info!("[试卷 {}] ✅ 试卷处理完成\n", paper_index);
}

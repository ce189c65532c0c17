//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道候选题"的完整处理流程
//!
//! 流程顺序：
//! 1. 分类（题型 / 科目 / 主题 / 分值 / 难度）
//! 2. 生成参考答案
//! 3. 组装题目记录并判断是否需要复核

use tracing::{debug, info};

use crate::models::question::{ExtractedQuestion, QuestionCandidate};
use crate::rules::RuleSet;
use crate::services::{AnswerSynthesizer, QuestionClassifier};
use crate::utils::logging::truncate_text;
use crate::workflow::question_ctx::QuestionCtx;

/// 题目处理流程
///
/// - 编排单道候选题的处理流程
/// - 只借用规则表，不持有任何 I/O 资源
/// - 只依赖业务能力（services）
pub struct QuestionFlow<'a> {
    classifier: QuestionClassifier<'a>,
    synthesizer: AnswerSynthesizer<'a>,
    verbose_logging: bool,
}

impl<'a> QuestionFlow<'a> {
    /// 创建新的题目处理流程
    pub fn new(rules: &'a RuleSet, verbose_logging: bool) -> Self {
        Self {
            classifier: QuestionClassifier::new(&rules.classification),
            synthesizer: AnswerSynthesizer::new(&rules.templates),
            verbose_logging,
        }
    }

    pub fn run(&self, candidate: QuestionCandidate, ctx: &QuestionCtx) -> ExtractedQuestion {
        if self.verbose_logging {
            info!(
                "[试卷 {}] 题干: {}",
                ctx.paper_index,
                truncate_text(&candidate.block.text, 80)
            );
        }

        let classified = self.classifier.classify(candidate);
        let reference_answer = self
            .synthesizer
            .synthesize(&classified.candidate.block.text, &classified.classification);

        let question = ExtractedQuestion::new(classified, reference_answer);

        debug!(
            "{} {} | {} | {} 分 | {} | 置信度 {:.2}{}",
            ctx,
            question.question_type,
            question.subject,
            question.marks,
            question.difficulty,
            question.confidence_score,
            if question.needs_review { " | 需复核" } else { "" }
        );

        question
    }
}

//! # Exam Pipeline
//!
//! 试卷题目抽取、分类、参考答案生成与答案评分
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 试卷、页面、题目、评分结果等数据结构，以及试卷文件加载
//!
//! ### ② 规则层（Rules）
//! - `rules/` - 关键词表、正则表、答案模板，启动时构建一次后只读
//!
//! ### ③ 业务能力层（Services）
//! - `BlockSegmenter` - 分段与去重
//! - `CandidateScorer` - 置信度打分与筛选
//! - `QuestionClassifier` - 题型 / 科目 / 主题 / 分值 / 难度
//! - `AnswerSynthesizer` - 参考答案生成
//! - `AnswerGrader` - 学生答案评分
//! - `ReviewWriter` - 写 review.txt 能力
//!
//! ### ④ 流程层（Workflow）
//! - `QuestionCtx` - 上下文封装（试卷 + 页码 + 序号）
//! - `QuestionFlow` - 单道候选题流程（classify → synthesize → record）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量试卷处理器，管理并发
//! - `orchestrator/paper_processor` - 单个试卷处理器
//!
//! ## 模块结构

pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod rules;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    Assessment, Difficulty, ExamPaper, ExtractedQuestion, GradingResult, PageReader, PageText,
    QuestionType, Subject,
};
pub use orchestrator::{extract_from_reader, extract_questions, App};
pub use rules::RuleSet;
pub use workflow::{QuestionCtx, QuestionFlow};

/// 评分入口：比较学生答案与参考答案
///
/// 不会失败：过短或无法比较的答案得到确定的低分结果。
pub fn grade_answer(
    learner: &str,
    reference: &str,
    difficulty: Difficulty,
    rules: &RuleSet,
) -> GradingResult {
    services::AnswerGrader::new(&rules.grading).grade(learner, reference, difficulty)
}

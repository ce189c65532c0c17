//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量试卷处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载试卷（Vec<ExamPaper>）
//! - 控制并发数量（Semaphore）
//! - 持有共享的规则表（Arc<RuleSet>）
//! - 输出全局统计信息
//!
//! ### `paper_processor` - 单个试卷处理器
//! - 读取单个试卷的所有页面，坏页跳过
//! - 分段、去重、打分筛选
//! - 创建并复用 QuestionFlow
//! - 写出 JSON 报告与复核记录
//! - 输出单个试卷的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<ExamPaper>)
//!     ↓
//! paper_processor (处理 Vec<PageText>)
//!     ↓
//! workflow::QuestionFlow (处理单个 QuestionCandidate)
//!     ↓
//! services (能力层：segment / score / classify / synthesize / grade / review)
//!     ↓
//! rules (只读规则表)
//! ```

pub mod batch_processor;
pub mod paper_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use paper_processor::{
    build_report, extract_from_reader, extract_questions, process_paper, PipelineOutcome,
};

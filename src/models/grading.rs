use serde::{Deserialize, Serialize};

/// 视为答对的最低分
pub const CORRECT_SCORE_THRESHOLD: u32 = 70;

/// 评分结果，每次评分新建，不由核心持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    /// 0-100
    pub score: u32,
    pub feedback: String,
}

impl GradingResult {
    /// 是否计为答对
    pub fn is_correct(&self) -> bool {
        self.score >= CORRECT_SCORE_THRESHOLD
    }
}

/// 评分过程中的各项指标
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub lexical_similarity: f64,
    pub concept_coverage: f64,
    pub quality: f64,
    /// 难度调整前的分数
    pub raw_score: u32,
    /// 难度调整并截断后的分数
    pub final_score: u32,
    /// 参考答案中未被覆盖的概念词，按出现顺序
    pub missing_concepts: Vec<String>,
    pub learner_word_count: usize,
    pub reference_word_count: usize,
    /// 学生答案过短，跳过了完整评分
    pub too_short: bool,
}

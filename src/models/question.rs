use crate::models::subject::Subject;
use serde::{Deserialize, Serialize};

/// 需要人工复核的置信度上限
pub const REVIEW_CONFIDENCE_THRESHOLD: f64 = 0.7;
/// 题干长度合理区间（字符数）
pub const REVIEW_MIN_TEXT_CHARS: usize = 20;
pub const REVIEW_MAX_TEXT_CHARS: usize = 1000;

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Definition,
    Explanation,
    Listing,
    Calculation,
    Comparison,
    Evaluation,
    General,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Definition => "definition",
            QuestionType::Explanation => "explanation",
            QuestionType::Listing => "listing",
            QuestionType::Calculation => "calculation",
            QuestionType::Comparison => "comparison",
            QuestionType::Evaluation => "evaluation",
            QuestionType::General => "general",
        }
    }

    /// 评估 / 比较 / 计算题在难度评估中额外加分
    pub fn is_complex(self) -> bool {
        matches!(
            self,
            QuestionType::Evaluation | QuestionType::Comparison | QuestionType::Calculation
        )
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// 从字符串解析难度（忽略大小写）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 分段得到的文本块，只在分段阶段内部流转
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    /// 来源页码（从 1 开始）
    pub page_number: u32,
    /// 在整份试卷中的出现顺序，用于稳定排序
    pub position: usize,
}

/// 候选题目
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCandidate {
    pub block: TextBlock,
    /// 置信度，取值 [0, 1]
    pub confidence_score: f64,
}

/// 分类结果
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub question_type: QuestionType,
    pub subject: Subject,
    pub topic: String,
    pub marks: u32,
    pub difficulty: Difficulty,
    /// 命中的科目关键词（按词典声明顺序去重）
    pub keywords: Vec<String>,
    /// 题号，如 "01"、"(a)"
    pub question_number: Option<String>,
    pub multiple_choice_options: Vec<String>,
    pub has_table: bool,
}

/// 已分类的题目
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedQuestion {
    pub candidate: QuestionCandidate,
    pub classification: Classification,
}

/// 最终交给持久化方的题目记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedQuestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_number: Option<String>,
    pub text: String,
    pub page_number: u32,
    pub confidence_score: f64,
    pub question_type: QuestionType,
    pub subject: Subject,
    pub topic: String,
    pub marks: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multiple_choice_options: Vec<String>,
    #[serde(default)]
    pub has_table: bool,
    pub reference_answer: String,
    pub needs_review: bool,
}

impl ExtractedQuestion {
    /// 由分类结果与参考答案组装题目记录，同时推导是否需要人工复核
    pub fn new(classified: ClassifiedQuestion, reference_answer: String) -> Self {
        let ClassifiedQuestion {
            candidate,
            classification,
        } = classified;

        let needs_review = needs_review(
            candidate.confidence_score,
            classification.question_type,
            classification.difficulty,
            &candidate.block.text,
        );

        Self {
            question_number: classification.question_number,
            text: candidate.block.text,
            page_number: candidate.block.page_number,
            confidence_score: candidate.confidence_score,
            question_type: classification.question_type,
            subject: classification.subject,
            topic: classification.topic,
            marks: classification.marks,
            difficulty: classification.difficulty,
            keywords: classification.keywords,
            multiple_choice_options: classification.multiple_choice_options,
            has_table: classification.has_table,
            reference_answer,
            needs_review,
        }
    }
}

/// 是否需要人工复核
pub fn needs_review(
    confidence_score: f64,
    question_type: QuestionType,
    difficulty: Difficulty,
    text: &str,
) -> bool {
    let text_len = text.chars().count();

    confidence_score < REVIEW_CONFIDENCE_THRESHOLD
        || question_type == QuestionType::Calculation
        || difficulty == Difficulty::Hard
        || !(REVIEW_MIN_TEXT_CHARS..=REVIEW_MAX_TEXT_CHARS).contains(&text_len)
}

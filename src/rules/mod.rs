//! 规则层（Rules Layer）
//!
//! 分段、打分、分类、生成答案、评分用到的全部规则表都在这里构建。
//! `RuleSet` 在程序启动时构建一次，之后只读，通过 `Arc` 在并发任务间共享。
//!
//! - `keywords` - 关键词集合与有序正则表
//! - `templates` - 参考答案模板

pub mod keywords;
pub mod templates;

use crate::config::Config;
use crate::error::RuleError;
use crate::models::question::QuestionType;
use crate::models::subject::Subject;
use regex::{Regex, RegexBuilder};

pub use templates::{AnswerTemplates, TermAnswer};

// ========== 兼容常量 ==========

/// 置信度不低于该值的候选被接受
pub const ACCEPTANCE_THRESHOLD: f64 = 0.3;
/// 两个文本块 Jaccard 相似度超过该值视为重复
pub const DUPLICATE_THRESHOLD: f64 = 0.8;
/// 文本块最少字符数
pub const MIN_BLOCK_CHARS: usize = 20;
/// 未标注分值时的默认分值
pub const DEFAULT_MARKS: u32 = 5;
/// 归一化后学生答案最少字符数
pub const MIN_ANSWER_CHARS: usize = 5;
/// 学生答案过短时的固定分数
pub const SHORT_ANSWER_SCORE: u32 = 0;
/// 困难题扣分的下限
pub const HARD_PENALTY_FLOOR: u32 = 50;
/// 难度调整幅度
pub const DIFFICULTY_ADJUSTMENT: u32 = 5;

/// 关键词加分方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeywordBonus {
    /// 每个命中的不同关键词加分
    PerKeyword(f64),
    /// 命中任意关键词加一次
    Flat(f64),
}

impl KeywordBonus {
    pub fn bonus(self, distinct_matches: usize) -> f64 {
        match self {
            KeywordBonus::PerKeyword(per) => per * distinct_matches as f64,
            KeywordBonus::Flat(flat) if distinct_matches > 0 => flat,
            KeywordBonus::Flat(_) => 0.0,
        }
    }
}

impl Default for KeywordBonus {
    fn default() -> Self {
        KeywordBonus::PerKeyword(0.1)
    }
}

/// 分段规则
#[derive(Debug, Clone)]
pub struct SegmentationRules {
    /// 空行分隔
    pub paragraph_break: Regex,
    /// 段内题号，第 1 个捕获组起点即切分点
    pub numbering: Regex,
    /// 句末标点后的长空白，第 1 个捕获组起点即切分点
    pub long_gap: Regex,
    /// 行内残留的页码标记
    pub page_marker: Regex,
    /// 整行匹配即丢弃的页眉页脚
    pub boilerplate: Vec<Regex>,
    pub min_block_chars: usize,
    pub duplicate_threshold: f64,
}

/// 候选打分规则
#[derive(Debug, Clone)]
pub struct ScoringRules {
    pub question_keywords: &'static phf::Set<&'static str>,
    pub instruction_verbs: &'static phf::Set<&'static str>,
    pub keyword_bonus: KeywordBonus,
    pub question_mark_bonus: f64,
    pub numbering_bonus: f64,
    pub instruction_verb_bonus: f64,
    pub marks_bonus: f64,
    pub length_bonus: f64,
    pub length_penalty: f64,
    /// 词数在此区间内加分
    pub length_range: (usize, usize),
    pub leading_numbering: Regex,
    pub marks_annotation: Regex,
    pub acceptance_threshold: f64,
}

/// 分类规则
#[derive(Debug, Clone)]
pub struct ClassificationRules {
    /// 顺序即优先级
    pub type_patterns: Vec<(QuestionType, Vec<Regex>)>,
    /// 顺序即平局顺序
    pub subject_keywords: &'static [(Subject, &'static [&'static str])],
    pub subject_topics: &'static [(Subject, &'static str)],
    pub fallback_subject: Subject,
    pub marks_patterns: Vec<Regex>,
    pub default_marks: u32,
    pub question_number: Regex,
    pub option_marker: Regex,
    pub table_indicators: &'static [&'static str],
}

impl ClassificationRules {
    /// 科目对应的主题
    pub fn topic_for(&self, subject: Subject) -> &'static str {
        self.subject_topics
            .iter()
            .find(|(s, _)| *s == subject)
            .map(|(_, topic)| *topic)
            .unwrap_or("General")
    }
}

/// 评分权重
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradingWeights {
    pub lexical: f64,
    pub coverage: f64,
    pub quality: f64,
}

impl Default for GradingWeights {
    fn default() -> Self {
        Self {
            lexical: 0.4,
            coverage: 0.4,
            quality: 0.2,
        }
    }
}

/// 评分规则
#[derive(Debug, Clone)]
pub struct GradingRules {
    pub weights: GradingWeights,
    pub min_answer_chars: usize,
    pub short_answer_score: u32,
    pub easy_bonus_min_raw: u32,
    pub hard_penalty_below_raw: u32,
    pub hard_penalty_floor: u32,
    pub difficulty_adjustment: u32,
    /// 参考答案没有概念词时的覆盖率
    pub empty_concept_coverage: f64,
    pub stop_words: &'static phf::Set<&'static str>,
    pub connectives: &'static phf::Set<&'static str>,
    /// 专业术语（按词首匹配）
    pub domain_terms: Vec<&'static str>,
    /// 覆盖率反馈里最多列出的缺失概念数
    pub max_missing_listed: usize,
}

/// 全部规则表
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub segmentation: SegmentationRules,
    pub scoring: ScoringRules,
    pub classification: ClassificationRules,
    pub templates: AnswerTemplates,
    pub grading: GradingRules,
}

impl RuleSet {
    /// 构建标准规则表
    pub fn standard() -> Result<Self, RuleError> {
        let segmentation = SegmentationRules {
            paragraph_break: compile_exact(r"\n[ \t]*\n")?,
            numbering: compile_exact(r"(?m)(?:^|[ \t])(\d{1,2}\.|\([a-z]\))[ \t]+[A-Z]")?,
            long_gap: compile_exact(r"[.?!]([ \t]{2,})[A-Z]")?,
            page_marker: compile(r"-{2,} ?page \d+ ?-{2,}")?,
            boilerplate: compile_all(keywords::BOILERPLATE_PATTERNS)?,
            min_block_chars: MIN_BLOCK_CHARS,
            duplicate_threshold: DUPLICATE_THRESHOLD,
        };

        let scoring = ScoringRules {
            question_keywords: &keywords::QUESTION_KEYWORDS,
            instruction_verbs: &keywords::INSTRUCTION_VERBS,
            keyword_bonus: KeywordBonus::default(),
            question_mark_bonus: 0.3,
            numbering_bonus: 0.2,
            instruction_verb_bonus: 0.15,
            marks_bonus: 0.2,
            length_bonus: 0.1,
            length_penalty: 0.1,
            length_range: (10, 200),
            leading_numbering: compile(r"^(?:\d{1,2}\.|\([a-z]\))")?,
            marks_annotation: compile(keywords::MARKS_ANNOTATION)?,
            acceptance_threshold: ACCEPTANCE_THRESHOLD,
        };

        let type_patterns = keywords::TYPE_PATTERNS
            .iter()
            .map(|(question_type, patterns)| Ok((*question_type, compile_all(patterns)?)))
            .collect::<Result<Vec<_>, RuleError>>()?;

        let classification = ClassificationRules {
            type_patterns,
            subject_keywords: keywords::SUBJECT_KEYWORDS,
            subject_topics: keywords::SUBJECT_TOPICS,
            fallback_subject: Subject::GeneralConstruction,
            marks_patterns: compile_all(keywords::MARKS_PATTERNS)?,
            default_marks: DEFAULT_MARKS,
            question_number: compile_exact(r"^\s*(?:(\d{1,2})\.|\(([a-z])\))")?,
            option_marker: compile_exact(r"(?:^|\s)\(?([A-E])[.)]\s+")?,
            table_indicators: keywords::TABLE_INDICATORS,
        };

        let grading = GradingRules {
            weights: GradingWeights::default(),
            min_answer_chars: MIN_ANSWER_CHARS,
            short_answer_score: SHORT_ANSWER_SCORE,
            easy_bonus_min_raw: 60,
            hard_penalty_below_raw: 80,
            hard_penalty_floor: HARD_PENALTY_FLOOR,
            difficulty_adjustment: DIFFICULTY_ADJUSTMENT,
            empty_concept_coverage: 0.8,
            stop_words: &keywords::STOP_WORDS,
            connectives: &keywords::CONNECTIVES,
            domain_terms: keywords::SUBJECT_KEYWORDS
                .iter()
                .flat_map(|(_, terms)| terms.iter().copied())
                .collect(),
            max_missing_listed: 5,
        };

        Ok(Self {
            segmentation,
            scoring,
            classification,
            templates: AnswerTemplates::standard(),
            grading,
        })
    }

    /// 构建标准规则表并应用配置中的评分参数
    pub fn from_config(config: &Config) -> Result<Self, RuleError> {
        let mut rules = Self::standard()?;
        rules.grading.short_answer_score = config.short_answer_score;
        rules.grading.hard_penalty_floor = config.hard_penalty_floor;
        Ok(rules)
    }
}

/// 编译忽略大小写的正则
pub fn compile(pattern: &str) -> Result<Regex, RuleError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// 编译区分大小写的正则（题号、句首大写等依赖大小写的规则）
fn compile_exact(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>, RuleError> {
    patterns.iter().map(|p| compile(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rules_compile() {
        let rules = RuleSet::standard().unwrap();
        assert_eq!(rules.classification.type_patterns.len(), 6);
        assert_eq!(rules.classification.type_patterns[0].0, QuestionType::Definition);
        assert_eq!(rules.segmentation.min_block_chars, 20);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = compile("(unclosed").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_keyword_bonus_schemes() {
        assert!((KeywordBonus::PerKeyword(0.1).bonus(3) - 0.3).abs() < 1e-9);
        assert_eq!(KeywordBonus::Flat(0.2).bonus(0), 0.0);
        assert_eq!(KeywordBonus::Flat(0.2).bonus(4), 0.2);
    }

    #[test]
    fn test_from_config_overrides_grading() {
        let config = Config {
            short_answer_score: 10,
            hard_penalty_floor: 40,
            ..Config::default()
        };
        let rules = RuleSet::from_config(&config).unwrap();
        assert_eq!(rules.grading.short_answer_score, 10);
        assert_eq!(rules.grading.hard_penalty_floor, 40);
    }

    #[test]
    fn test_topic_lookup() {
        let rules = RuleSet::standard().unwrap();
        assert_eq!(
            rules.classification.topic_for(Subject::Scaffolding),
            "Scaffolding Systems"
        );
        assert_eq!(
            rules.classification.topic_for(Subject::GeneralConstruction),
            "Construction Practice"
        );
    }
}

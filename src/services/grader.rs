//! 答案评分服务 - 业务能力层
//!
//! 只负责比较学生答案与参考答案，给出 0-100 分和反馈；任何输入都有确定的结果

use crate::models::grading::{Assessment, GradingResult};
use crate::models::question::Difficulty;
use crate::rules::GradingRules;
use crate::services::similarity::lexical_similarity;
use crate::utils::text::{collapse_whitespace, contains_keyword, round2, word_count, words};

const SHORT_ANSWER_FEEDBACK: &str =
    "Your answer is too short. Please provide more detail and explanation.";

/// 答案评分器
pub struct AnswerGrader<'a> {
    rules: &'a GradingRules,
}

impl<'a> AnswerGrader<'a> {
    pub fn new(rules: &'a GradingRules) -> Self {
        Self { rules }
    }

    /// 评分并生成反馈
    pub fn grade(&self, learner: &str, reference: &str, difficulty: Difficulty) -> GradingResult {
        let assessment = self.assess(learner, reference, difficulty);
        let feedback = self.feedback(&assessment);
        GradingResult {
            score: assessment.final_score,
            feedback,
        }
    }

    /// 计算各项指标
    pub fn assess(&self, learner: &str, reference: &str, difficulty: Difficulty) -> Assessment {
        let learner = normalize(learner);
        let reference = normalize(reference);

        let learner_word_count = word_count(&learner);
        let reference_word_count = word_count(&reference);

        if learner.chars().count() < self.rules.min_answer_chars {
            let score = self.rules.short_answer_score.min(100);
            return Assessment {
                lexical_similarity: 0.0,
                concept_coverage: 0.0,
                quality: 0.0,
                raw_score: score,
                final_score: score,
                missing_concepts: self.concepts(&reference),
                learner_word_count,
                reference_word_count,
                too_short: true,
            };
        }

        let lexical = round2(lexical_similarity(&learner, &reference));
        let (coverage, missing_concepts) = self.concept_coverage(&learner, &reference);
        let quality = self.quality(&learner);

        let weights = self.rules.weights;
        let weighted =
            weights.lexical * lexical + weights.coverage * coverage + weights.quality * quality;
        let raw_score = (100.0 * weighted).round().clamp(0.0, 100.0) as u32;
        let final_score = self.adjust_for_difficulty(raw_score, difficulty).min(100);

        Assessment {
            lexical_similarity: lexical,
            concept_coverage: coverage,
            quality,
            raw_score,
            final_score,
            missing_concepts,
            learner_word_count,
            reference_word_count,
            too_short: false,
        }
    }

    /// 概念词：长度大于 3 且不是停用词，按出现顺序去重
    fn concepts(&self, text: &str) -> Vec<String> {
        let mut concepts: Vec<String> = Vec::new();
        for word in words(text) {
            if word.chars().count() > 3
                && !self.rules.stop_words.contains(word.as_str())
                && !concepts.contains(&word)
            {
                concepts.push(word);
            }
        }
        concepts
    }

    /// 概念覆盖率与未覆盖的参考概念
    fn concept_coverage(&self, learner: &str, reference: &str) -> (f64, Vec<String>) {
        let reference_concepts = self.concepts(reference);
        if reference_concepts.is_empty() {
            return (self.rules.empty_concept_coverage, Vec::new());
        }

        let learner_concepts = self.concepts(learner);
        let (matched, missing): (Vec<String>, Vec<String>) =
            reference_concepts.into_iter().partition(|concept| {
                learner_concepts.iter().any(|l| {
                    l.contains(concept.as_str()) || concept.contains(l.as_str())
                })
            });

        let total = matched.len() + missing.len();
        (round2(matched.len() as f64 / total as f64), missing)
    }

    /// 表达质量
    fn quality(&self, learner: &str) -> f64 {
        let tokens = words(learner);
        let mut quality: f64 = 0.5;

        let count = word_count(learner);
        if count >= 20 {
            quality += 0.2;
        } else if count >= 10 {
            quality += 0.1;
        }
        if learner.contains(['.', '!', '?']) {
            quality += 0.1;
        }
        if tokens
            .iter()
            .any(|t| self.rules.connectives.contains(t.as_str()))
        {
            quality += 0.1;
        }
        if self
            .rules
            .domain_terms
            .iter()
            .any(|term| contains_keyword(&tokens, term))
        {
            quality += 0.1;
        }

        round2(quality.min(1.0))
    }

    /// 难度调整：简单题高分加分，困难题低分扣分但不低于下限
    fn adjust_for_difficulty(&self, raw: u32, difficulty: Difficulty) -> u32 {
        let step = self.rules.difficulty_adjustment;
        match difficulty {
            Difficulty::Easy if raw >= self.rules.easy_bonus_min_raw => (raw + step).min(100),
            Difficulty::Hard if raw < self.rules.hard_penalty_below_raw => raw
                .saturating_sub(step)
                .max(self.rules.hard_penalty_floor.min(raw)),
            _ => raw,
        }
    }

    /// 反馈：分数档位 + 差距说明
    pub fn feedback(&self, assessment: &Assessment) -> String {
        if assessment.too_short {
            return SHORT_ANSWER_FEEDBACK.to_string();
        }

        let mut parts = vec![tier_sentence(assessment.final_score).to_string()];

        if assessment.lexical_similarity < 0.6 {
            parts.push(
                "Your answer differs from the expected response; review the key points of the reference answer."
                    .to_string(),
            );
        }

        if assessment.concept_coverage < 0.7 {
            if assessment.missing_concepts.is_empty() {
                parts.push("Try to cover more of the key concepts.".to_string());
            } else {
                let listed: Vec<&str> = assessment
                    .missing_concepts
                    .iter()
                    .take(self.rules.max_missing_listed)
                    .map(String::as_str)
                    .collect();
                parts.push(format!(
                    "Some key concepts are missing. Consider including: {}.",
                    listed.join(", ")
                ));
            }
        }

        if (assessment.learner_word_count as f64) < 0.3 * assessment.reference_word_count as f64 {
            parts.push(
                "Your answer is quite brief. Consider expanding your explanation with more detail."
                    .to_string(),
            );
        }

        parts.join(" ")
    }
}

/// 归一化：小写、只保留字母数字与基本标点、合并空白
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || ".,;:!?'-".contains(c) {
                c
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&kept)
}

fn tier_sentence(score: u32) -> &'static str {
    if score >= 85 {
        "Excellent work! Your answer demonstrates a strong understanding of the topic."
    } else if score >= 70 {
        "Good answer! You have covered most of the important points."
    } else if score >= 55 {
        "Fair attempt. Your answer shows some understanding but needs more depth."
    } else {
        "Your answer needs significant improvement. Review the topic and try again."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    const REFERENCE: &str = "Scaffolding is a temporary structure used to support workers and \
        materials during construction at height. It must be inspected by a competent person \
        before use, because guardrails and toe boards prevent falls.";

    fn rules() -> RuleSet {
        RuleSet::standard().unwrap()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Mortar ~ binds\tBRICKS! (mostly) "), "mortar binds bricks! mostly");
    }

    #[test]
    fn test_empty_answer_gets_short_band() {
        let rules = rules();
        let grader = AnswerGrader::new(&rules.grading);
        let result = grader.grade("", REFERENCE, Difficulty::Medium);
        assert_eq!(result.score, 0);
        assert!(result.feedback.contains("too short"));

        let result = grader.grade(" ?! ", REFERENCE, Difficulty::Easy);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_identical_answer_scores_high() {
        let rules = rules();
        let grader = AnswerGrader::new(&rules.grading);
        let assessment = grader.assess(REFERENCE, REFERENCE, Difficulty::Medium);
        assert!((assessment.lexical_similarity - 1.0).abs() < 1e-9);
        assert!((assessment.concept_coverage - 1.0).abs() < 1e-9);
        assert!(assessment.raw_score >= 85);
        assert!(assessment.missing_concepts.is_empty());

        let result = grader.grade(REFERENCE, REFERENCE, Difficulty::Medium);
        assert!(result.feedback.starts_with("Excellent work!"));
        assert!(result.is_correct());
    }

    #[test]
    fn test_difficulty_adjustment() {
        let rules = rules();
        let grader = AnswerGrader::new(&rules.grading);
        assert_eq!(grader.adjust_for_difficulty(60, Difficulty::Easy), 65);
        assert_eq!(grader.adjust_for_difficulty(98, Difficulty::Easy), 100);
        assert_eq!(grader.adjust_for_difficulty(59, Difficulty::Easy), 59);
        assert_eq!(grader.adjust_for_difficulty(79, Difficulty::Hard), 74);
        assert_eq!(grader.adjust_for_difficulty(52, Difficulty::Hard), 50);
        assert_eq!(grader.adjust_for_difficulty(30, Difficulty::Hard), 30);
        assert_eq!(grader.adjust_for_difficulty(80, Difficulty::Hard), 80);
        assert_eq!(grader.adjust_for_difficulty(70, Difficulty::Medium), 70);
    }

    #[test]
    fn test_missing_concepts_are_listed() {
        let rules = rules();
        let grader = AnswerGrader::new(&rules.grading);
        let result = grader.grade("Scaffolding holds workers up.", REFERENCE, Difficulty::Medium);
        assert!(result.feedback.contains("Consider including: temporary, structure, used, support, materials."));
        assert!(result.feedback.contains("quite brief"));
        assert!(result.score <= 100);
    }

    #[test]
    fn test_empty_reference_concepts_use_default_coverage() {
        let rules = rules();
        let grader = AnswerGrader::new(&rules.grading);
        let assessment = grader.assess("The wall is on the site.", "it is so.", Difficulty::Medium);
        assert_eq!(assessment.concept_coverage, 0.8);
    }

    #[test]
    fn test_quality_steps() {
        let rules = rules();
        let grader = AnswerGrader::new(&rules.grading);
        // 基础分
        assert_eq!(grader.quality("ok so yes"), 0.5);
        // 10 词以上
        assert_eq!(grader.quality("the cat sat on the mat and then ran off"), 0.6);
        // 句末标点 + 专业词
        assert_eq!(grader.quality("mortar binds bricks."), 0.7);
        // 连接词
        assert_eq!(grader.quality("first we go home"), 0.6);

        let full = "first the scaffold must be inspected by a competent person, \
            because guardrails and toe boards on every working platform prevent falls from height.";
        assert!(word_count(full) >= 20);
        assert_eq!(grader.quality(full), 1.0);
    }

    fn assessment(final_score: u32, lexical: f64, coverage: f64) -> Assessment {
        Assessment {
            lexical_similarity: lexical,
            concept_coverage: coverage,
            quality: 0.8,
            raw_score: final_score,
            final_score,
            missing_concepts: Vec::new(),
            learner_word_count: 30,
            reference_word_count: 30,
            too_short: false,
        }
    }

    #[test]
    fn test_feedback_tiers() {
        let rules = rules();
        let grader = AnswerGrader::new(&rules.grading);

        assert!(grader
            .feedback(&assessment(85, 0.9, 0.9))
            .starts_with("Excellent work!"));
        assert_eq!(
            grader.feedback(&assessment(70, 0.9, 0.9)),
            "Good answer! You have covered most of the important points."
        );
        assert_eq!(
            grader.feedback(&assessment(55, 0.9, 0.9)),
            "Fair attempt. Your answer shows some understanding but needs more depth."
        );
        assert!(grader
            .feedback(&assessment(54, 0.9, 0.9))
            .starts_with("Your answer needs significant improvement."));
    }

    #[test]
    fn test_similarity_gap_remark_alone() {
        let rules = rules();
        let grader = AnswerGrader::new(&rules.grading);
        let feedback = grader.feedback(&assessment(72, 0.5, 0.9));
        assert_eq!(
            feedback,
            "Good answer! You have covered most of the important points. \
             Your answer differs from the expected response; review the key points of the reference answer."
        );
    }

    #[test]
    fn test_configured_short_answer_score() {
        let mut rules = rules();
        rules.grading.short_answer_score = 15;
        let grader = AnswerGrader::new(&rules.grading);
        assert_eq!(grader.grade("ok", REFERENCE, Difficulty::Hard).score, 15);
    }
}

//! 候选打分服务 - 业务能力层
//!
//! 只负责给文本块打置信度分并按阈值筛选

use crate::models::question::{QuestionCandidate, TextBlock};
use crate::rules::ScoringRules;
use crate::utils::text::{round2, word_count, words};
use std::collections::HashSet;

/// 筛选结果
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// 按置信度降序，同分保持原顺序
    pub accepted: Vec<QuestionCandidate>,
    pub rejected: usize,
}

/// 候选打分器
pub struct CandidateScorer<'a> {
    rules: &'a ScoringRules,
}

impl<'a> CandidateScorer<'a> {
    pub fn new(rules: &'a ScoringRules) -> Self {
        Self { rules }
    }

    /// 计算置信度，结果在 [0, 1] 内
    pub fn score(&self, text: &str) -> f64 {
        let rules = self.rules;
        let tokens: HashSet<String> = words(text).into_iter().collect();
        let mut score = 0.0;

        if text.contains('?') {
            score += rules.question_mark_bonus;
        }

        let keyword_hits = tokens
            .iter()
            .filter(|t| rules.question_keywords.contains(t.as_str()))
            .count();
        score += rules.keyword_bonus.bonus(keyword_hits);

        if rules.leading_numbering.is_match(text.trim_start()) {
            score += rules.numbering_bonus;
        }

        let verb_hits = tokens
            .iter()
            .filter(|t| rules.instruction_verbs.contains(t.as_str()))
            .count();
        score += rules.instruction_verb_bonus * verb_hits as f64;

        if rules.marks_annotation.is_match(text) {
            score += rules.marks_bonus;
        }

        let (min_words, max_words) = rules.length_range;
        let word_total = word_count(text);
        if (min_words..=max_words).contains(&word_total) {
            score += rules.length_bonus;
        } else if word_total > max_words {
            score -= rules.length_penalty;
        }

        round2(score).clamp(0.0, 1.0)
    }

    /// 打分并筛选
    pub fn select(&self, blocks: Vec<TextBlock>) -> Selection {
        let mut selection = Selection::default();

        for block in blocks {
            let confidence_score = self.score(&block.text);
            if confidence_score >= self.rules.acceptance_threshold {
                selection.accepted.push(QuestionCandidate {
                    block,
                    confidence_score,
                });
            } else {
                selection.rejected += 1;
            }
        }

        // sort_by 是稳定排序
        selection.accepted.sort_by(|a, b| {
            b.confidence_score
                .partial_cmp(&a.confidence_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    fn block(text: &str, position: usize) -> TextBlock {
        TextBlock {
            text: text.to_string(),
            page_number: 1,
            position,
        }
    }

    #[test]
    fn test_numbered_definition_with_marks() {
        let rules = RuleSet::standard().unwrap();
        let scorer = CandidateScorer::new(&rules.scoring);
        // define +0.1, 题号 +0.2, 分值 +0.2
        assert_eq!(scorer.score("1. Define scaffolding. (4 marks)"), 0.5);
    }

    #[test]
    fn test_score_is_capped() {
        let rules = RuleSet::standard().unwrap();
        let scorer = CandidateScorer::new(&rules.scoring);
        let text = "1. What, why and how would you explain, describe, compare, evaluate and assess \
                    the safety of a scaffold platform on this site? (10 marks)";
        assert_eq!(scorer.score(text), 1.0);
    }

    #[test]
    fn test_long_plain_block_is_penalised_and_rejected() {
        let rules = RuleSet::standard().unwrap();
        let scorer = CandidateScorer::new(&rules.scoring);
        let text = vec!["bricks"; 250].join(" ");
        assert_eq!(scorer.score(&text), 0.0);

        let selection = scorer.select(vec![block(&text, 0)]);
        assert!(selection.accepted.is_empty());
        assert_eq!(selection.rejected, 1);
    }

    #[test]
    fn test_select_sorts_descending_and_keeps_ties_in_order() {
        let rules = RuleSet::standard().unwrap();
        let scorer = CandidateScorer::new(&rules.scoring);
        let selection = scorer.select(vec![
            block("Explain and describe the role of a ledger in a scaffold.", 0),
            block("Why is a footing wider than the wall it supports?", 1),
            block("Describe and explain the use of lime in mortar mixes.", 2),
            block("The site office opens at seven every morning.", 3),
        ]);

        let positions: Vec<usize> = selection
            .accepted
            .iter()
            .map(|c| c.block.position)
            .collect();
        assert_eq!(positions, vec![1, 0, 2]);
        assert_eq!(selection.rejected, 1);
    }
}

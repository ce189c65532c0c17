//! 参考答案生成服务 - 业务能力层
//!
//! 先查术语答案表，没有命中再用题型通用模板；结果只由题干和分类决定

use crate::models::question::Classification;
use crate::rules::AnswerTemplates;
use crate::utils::text::{contains_keyword, words};

/// 参考答案生成器
pub struct AnswerSynthesizer<'a> {
    templates: &'a AnswerTemplates,
}

impl<'a> AnswerSynthesizer<'a> {
    pub fn new(templates: &'a AnswerTemplates) -> Self {
        Self { templates }
    }

    pub fn synthesize(&self, text: &str, classification: &Classification) -> String {
        let tokens = words(text);

        let mut answers: Vec<&str> = Vec::new();
        for term_answer in &self.templates.term_answers {
            if !term_answer.applies_to(classification.question_type) {
                continue;
            }
            let hit = term_answer
                .terms
                .iter()
                .any(|term| contains_keyword(&tokens, term));
            if hit && !answers.contains(&term_answer.answer.as_str()) {
                answers.push(&term_answer.answer);
            }
        }

        if !answers.is_empty() {
            return answers.join("\n\n");
        }

        self.fill_generic(classification)
    }

    fn fill_generic(&self, classification: &Classification) -> String {
        let keywords = if classification.keywords.is_empty() {
            classification.topic.to_lowercase()
        } else {
            classification.keywords.join(", ")
        };

        self.templates
            .generic_for(classification.question_type)
            .replace("{keywords}", &keywords)
            .replace("{subject}", classification.subject.name())
            .replace("{topic}", &classification.topic)
    }
}

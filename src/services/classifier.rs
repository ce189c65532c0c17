//! 题目分类服务 - 业务能力层
//!
//! 只负责从题干推导题型、科目、主题、分值和难度；分类是全函数，无法判断时落到默认值

use crate::models::question::{
    Classification, ClassifiedQuestion, Difficulty, QuestionCandidate, QuestionType,
};
use crate::models::subject::Subject;
use crate::rules::ClassificationRules;
use crate::utils::text::{contains_keyword, word_count, words};

/// 题目分类器
pub struct QuestionClassifier<'a> {
    rules: &'a ClassificationRules,
}

impl<'a> QuestionClassifier<'a> {
    pub fn new(rules: &'a ClassificationRules) -> Self {
        Self { rules }
    }

    /// 分类候选题目
    pub fn classify(&self, candidate: QuestionCandidate) -> ClassifiedQuestion {
        let classification = self.classify_text(&candidate.block.text);
        ClassifiedQuestion {
            candidate,
            classification,
        }
    }

    pub fn classify_text(&self, text: &str) -> Classification {
        let tokens = words(text);

        let question_type = self.question_type(text);
        let (subject, keywords) = self.subject(&tokens);
        let marks = self.marks(text);
        let difficulty = self.difficulty(marks, question_type, word_count(text), keywords.len());

        Classification {
            question_type,
            subject,
            topic: self.rules.topic_for(subject).to_string(),
            marks,
            difficulty,
            keywords,
            question_number: self.question_number(text),
            multiple_choice_options: self.multiple_choice_options(text),
            has_table: self.has_table(&tokens),
        }
    }

    /// 题型：按优先级第一个命中的模式
    pub fn question_type(&self, text: &str) -> QuestionType {
        self.rules
            .type_patterns
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(text)))
            .map(|(question_type, _)| *question_type)
            .unwrap_or(QuestionType::General)
    }

    /// 科目与命中的关键词
    ///
    /// 命中关键词最多的科目胜出，同分取声明在前者；关键词按词典顺序去重。
    pub fn subject(&self, tokens: &[String]) -> (Subject, Vec<String>) {
        let mut best: Option<(Subject, usize)> = None;
        let mut keywords: Vec<String> = Vec::new();

        for (subject, dictionary) in self.rules.subject_keywords {
            let mut hits = 0;
            for keyword in dictionary.iter() {
                if contains_keyword(tokens, keyword) {
                    hits += 1;
                    if !keywords.iter().any(|k| k.as_str() == *keyword) {
                        keywords.push(keyword.to_string());
                    }
                }
            }
            if hits > 0 && best.map_or(true, |(_, best_hits)| hits > best_hits) {
                best = Some((*subject, hits));
            }
        }

        let subject = best
            .map(|(subject, _)| subject)
            .unwrap_or(self.rules.fallback_subject);
        (subject, keywords)
    }

    /// 分值：按顺序第一个命中且大于 0 的数字
    pub fn marks(&self, text: &str) -> u32 {
        self.rules
            .marks_patterns
            .iter()
            .flat_map(|re| re.captures_iter(text))
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
            .find(|&marks| marks > 0)
            .unwrap_or(self.rules.default_marks)
    }

    /// 难度：分值档位 + 复杂题型 + 长题干 + 关键词密度
    pub fn difficulty(
        &self,
        marks: u32,
        question_type: QuestionType,
        word_total: usize,
        keyword_total: usize,
    ) -> Difficulty {
        let mut points = match marks {
            0..=4 => 1,
            5..=8 => 2,
            _ => 3,
        };
        if question_type.is_complex() {
            points += 2;
        }
        if word_total > 100 {
            points += 1;
        }
        if keyword_total > 3 {
            points += 1;
        }

        match points {
            0..=2 => Difficulty::Easy,
            3..=4 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// 题号，如 "1"、"01"、"(a)"
    pub fn question_number(&self, text: &str) -> Option<String> {
        let caps = self.rules.question_number.captures(text)?;
        caps.get(1)
            .map(|m| m.as_str().to_string())
            .or_else(|| caps.get(2).map(|m| format!("({})", m.as_str())))
    }

    /// 选择题选项，至少两个选项才算
    pub fn multiple_choice_options(&self, text: &str) -> Vec<String> {
        let markers: Vec<(&str, usize, usize)> = self
            .rules
            .option_marker
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let letter = caps.get(1)?;
                Some((letter.as_str(), whole.start(), whole.end()))
            })
            .collect();

        if markers.len() < 2 {
            return Vec::new();
        }

        let options: Vec<String> = markers
            .iter()
            .enumerate()
            .filter_map(|(i, (letter, _, body_start))| {
                let body_end = markers.get(i + 1).map_or(text.len(), |next| next.1);
                let body = text[*body_start..body_end].trim();
                (!body.is_empty()).then(|| format!("{letter}) {body}"))
            })
            .collect();

        if options.len() < 2 {
            return Vec::new();
        }
        options
    }

    /// 是否为表格 / 连线题
    pub fn has_table(&self, tokens: &[String]) -> bool {
        let padded = format!(" {} ", tokens.join(" "));
        self.rules
            .table_indicators
            .iter()
            .any(|indicator| padded.contains(&format!(" {indicator} ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    fn classify(text: &str) -> Classification {
        let rules = RuleSet::standard().unwrap();
        QuestionClassifier::new(&rules.classification).classify_text(text)
    }

    #[test]
    fn test_numbered_definition() {
        let c = classify("1. Define scaffolding. (4 marks)");
        assert_eq!(c.question_type, QuestionType::Definition);
        assert_eq!(c.subject, Subject::Scaffolding);
        assert_eq!(c.topic, "Scaffolding Systems");
        assert_eq!(c.marks, 4);
        assert_eq!(c.difficulty, Difficulty::Easy);
        assert_eq!(c.keywords, vec!["scaffold"]);
        assert_eq!(c.question_number.as_deref(), Some("1"));
    }

    #[test]
    fn test_type_priority() {
        assert_eq!(
            classify("Explain what is meant by a stretcher bond.").question_type,
            QuestionType::Definition
        );
        assert_eq!(
            classify("Describe and compare two types of scaffold.").question_type,
            QuestionType::Explanation
        );
        assert_eq!(
            classify("How many bricks are needed for the wall?").question_type,
            QuestionType::Calculation
        );
        assert_eq!(
            classify("Evaluate the use of timber formwork.").question_type,
            QuestionType::Evaluation
        );
        assert_eq!(
            classify("Bricks were delivered to the site on Monday.").question_type,
            QuestionType::General
        );
    }

    #[test]
    fn test_subject_ties_go_to_earlier_subject() {
        // brick (Masonry) 与 scaffold (Scaffolding) 各命中一个
        let c = classify("Describe where the brick stack sits near the scaffold.");
        assert_eq!(c.subject, Subject::Masonry);
        assert_eq!(c.keywords, vec!["brick", "scaffold"]);
    }

    #[test]
    fn test_no_keywords_falls_back() {
        let c = classify("Write a short essay about your holiday plans.");
        assert_eq!(c.subject, Subject::GeneralConstruction);
        assert_eq!(c.topic, "Construction Practice");
        assert_eq!(c.marks, 5);
        assert!(c.keywords.is_empty());
    }

    #[test]
    fn test_marks_patterns() {
        let rules = RuleSet::standard().unwrap();
        let classifier = QuestionClassifier::new(&rules.classification);
        assert_eq!(classifier.marks("State two bonds [3 marks]"), 3);
        assert_eq!(classifier.marks("State two bonds (6mks)"), 6);
        assert_eq!(classifier.marks("State two bonds (0 marks) for 2 marks"), 2);
        assert_eq!(classifier.marks("State two bonds"), 5);
    }

    #[test]
    fn test_difficulty_bands() {
        let rules = RuleSet::standard().unwrap();
        let classifier = QuestionClassifier::new(&rules.classification);
        assert_eq!(
            classifier.difficulty(4, QuestionType::Definition, 10, 1),
            Difficulty::Easy
        );
        assert_eq!(
            classifier.difficulty(5, QuestionType::Listing, 10, 4),
            Difficulty::Medium
        );
        assert_eq!(
            classifier.difficulty(10, QuestionType::Calculation, 10, 0),
            Difficulty::Hard
        );
    }

    #[test]
    fn test_multiple_choice_and_table() {
        let c = classify("Which tool checks a wall is vertical? A) Trowel B) Spirit level C) Plumb bob");
        assert_eq!(
            c.multiple_choice_options,
            vec!["A) Trowel", "B) Spirit level", "C) Plumb bob"]
        );

        let c = classify("Match each tool in column A with its function in column B.");
        assert!(c.has_table);
        assert!(!classify("Describe a portable mixer.").has_table);
    }

    #[test]
    fn test_lettered_question_number() {
        assert_eq!(
            classify("(b) List three items of PPE.").question_number.as_deref(),
            Some("(b)")
        );
    }
}

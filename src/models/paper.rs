use crate::error::PageError;
use crate::models::question::ExtractedQuestion;
use crate::models::subject::Subject;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单页原始文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

impl PageText {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// 文档读取方
///
/// 逐页交出文本；单页失败以 `Err` 交出，由流水线记录并跳过。
pub trait PageReader {
    /// 读取方名称，仅用于日志
    fn source_name(&self) -> &str;

    fn pages(&self) -> Vec<Result<PageText, PageError>>;
}

/// TOML 试卷文件中的一页
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    pub page_number: u32,
    #[serde(default)]
    pub text: Option<String>,
}

/// 试卷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamPaper {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub pages: Vec<RawPage>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl ExamPaper {
    /// 扩展 ExamPaper 以支持文件路径
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

impl PageReader for ExamPaper {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn pages(&self) -> Vec<Result<PageText, PageError>> {
        self.pages
            .iter()
            .map(|page| {
                if page.page_number == 0 {
                    return Err(PageError::InvalidPageNumber { page_number: 0 });
                }
                match page.text.as_deref() {
                    Some(text) if !text.trim().is_empty() => {
                        Ok(PageText::new(page.page_number, text))
                    }
                    _ => Err(PageError::MissingText {
                        page_number: page.page_number,
                    }),
                }
            })
            .collect()
    }
}

/// 单份试卷的抽取报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub generated_at: DateTime<Local>,
    /// 去重后的文本块数量
    pub total_blocks: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub skipped_pages: usize,
    pub questions: Vec<ExtractedQuestion>,
}

impl ExtractionReport {
    pub fn review_count(&self) -> usize {
        self.questions.iter().filter(|q| q.needs_review).count()
    }
}

/// 科目统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubjectStats {
    pub total_questions: usize,
    pub topics: BTreeMap<String, usize>,
}

/// 题库：多份试卷抽取结果的汇总
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<ExtractedQuestion>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, questions: impl IntoIterator<Item = ExtractedQuestion>) {
        self.questions.extend(questions);
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 按科目、主题统计题目数量
    pub fn subject_statistics(&self) -> BTreeMap<Subject, SubjectStats> {
        let mut stats: BTreeMap<Subject, SubjectStats> = BTreeMap::new();
        for question in &self.questions {
            let entry = stats.entry(question.subject).or_default();
            entry.total_questions += 1;
            *entry.topics.entry(question.topic.clone()).or_default() += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Difficulty, QuestionType};

    fn question(subject: Subject, topic: &str) -> ExtractedQuestion {
        ExtractedQuestion {
            question_number: None,
            text: "Describe the inspection of a scaffold.".to_string(),
            page_number: 1,
            confidence_score: 0.8,
            question_type: QuestionType::Explanation,
            subject,
            topic: topic.to_string(),
            marks: 5,
            difficulty: Difficulty::Medium,
            keywords: vec![],
            multiple_choice_options: vec![],
            has_table: false,
            reference_answer: String::new(),
            needs_review: false,
        }
    }

    #[test]
    fn test_exam_paper_pages_report_bad_pages() {
        let paper = ExamPaper {
            name: "T045".to_string(),
            course: None,
            level: None,
            pages: vec![
                RawPage {
                    page_number: 1,
                    text: Some("01. Define scaffolding.".to_string()),
                },
                RawPage {
                    page_number: 2,
                    text: None,
                },
                RawPage {
                    page_number: 0,
                    text: Some("orphan".to_string()),
                },
            ],
            file_path: None,
        };

        let pages = paper.pages();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], Ok(PageText::new(1, "01. Define scaffolding.")));
        assert_eq!(pages[1], Err(PageError::MissingText { page_number: 2 }));
        assert_eq!(pages[2], Err(PageError::InvalidPageNumber { page_number: 0 }));
    }

    #[test]
    fn test_subject_statistics_groups_by_topic() {
        let mut bank = QuestionBank::new();
        bank.extend([
            question(Subject::Scaffolding, "Scaffolding Systems"),
            question(Subject::Scaffolding, "Scaffolding Systems"),
            question(Subject::Masonry, "Masonry Work"),
        ]);

        let stats = bank.subject_statistics();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[&Subject::Scaffolding].total_questions, 2);
        assert_eq!(stats[&Subject::Scaffolding].topics["Scaffolding Systems"], 2);
        assert_eq!(stats[&Subject::Masonry].total_questions, 1);
    }
}

//! 复核记录服务 - 业务能力层
//!
//! 只负责"写 review.txt"能力，不关心流程

use crate::models::question::ExtractedQuestion;
use crate::utils::logging::truncate_text;
use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 题干预览长度
const PREVIEW_CHARS: usize = 120;

/// 复核记录写入服务
///
/// 职责：
/// - 将需要人工复核的题目追加写入 review.txt
/// - 只处理单个题目
/// - 不关心流程顺序
pub struct ReviewWriter {
    review_file_path: String,
}

impl ReviewWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            review_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.review_file_path
    }

    /// 追加一条复核记录
    ///
    /// 格式：`试卷 | 第 n 页 | 题型/难度 | 置信度 | 题干预览`
    pub async fn write(&self, paper_name: &str, question: &ExtractedQuestion) -> Result<()> {
        debug!(
            "写入复核记录: 试卷 {} | 第 {} 页 | 题干长度: {}",
            paper_name,
            question.page_number,
            question.text.len()
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.review_file_path)
            .await
            .with_context(|| format!("无法打开复核文件: {}", self.review_file_path))?;

        let line = format!(
            "试卷 {} | 第 {} 页 | {}/{} | 置信度 {:.2} | 题干: {}\n",
            paper_name,
            question.page_number,
            question.question_type,
            question.difficulty,
            question.confidence_score,
            truncate_text(&question.text, PREVIEW_CHARS)
        );

        file.write_all(line.as_bytes()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Difficulty, QuestionType};
    use crate::models::subject::Subject;

    fn question(text: &str, page_number: u32) -> ExtractedQuestion {
        ExtractedQuestion {
            question_number: None,
            text: text.to_string(),
            page_number,
            confidence_score: 0.45,
            question_type: QuestionType::Calculation,
            subject: Subject::Masonry,
            topic: "Masonry Work".to_string(),
            marks: 10,
            difficulty: Difficulty::Hard,
            keywords: vec!["brick".to_string()],
            multiple_choice_options: vec![],
            has_table: false,
            reference_answer: String::new(),
            needs_review: true,
        }
    }

    #[tokio::test]
    async fn test_write_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.txt");
        let writer = ReviewWriter::with_path(path.to_str().unwrap());

        writer
            .write("T045", &question("Calculate the number of bricks.", 2))
            .await
            .unwrap();
        writer
            .write("T045", &question("Calculate the volume of mortar.", 3))
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "试卷 T045 | 第 2 页 | calculation/hard | 置信度 0.45 | 题干: Calculate the number of bricks."
        );
        assert!(lines[1].contains("第 3 页"));
    }
}

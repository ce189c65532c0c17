//! 题目处理上下文
//!
//! 封装"我正在处理哪张卷子第几页的第几道候选题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 试卷名称
    pub paper_name: String,

    /// 试卷索引（仅用于日志显示）
    pub paper_index: usize,

    /// 来源页码
    pub page_number: u32,

    /// 候选题在本卷中的序号（从1开始）
    pub question_index: usize,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(
        paper_name: impl Into<String>,
        paper_index: usize,
        page_number: u32,
        question_index: usize,
    ) -> Self {
        Self {
            paper_name: paper_name.into(),
            paper_index,
            page_number,
            question_index,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[试卷 {} 第{}页 题目#{}]",
            self.paper_name, self.page_number, self.question_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let ctx = QuestionCtx::new("T045", 1, 3, 7);
        assert_eq!(ctx.to_string(), "[试卷 T045 第3页 题目#7]");
    }
}

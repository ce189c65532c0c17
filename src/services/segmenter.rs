//! 分段服务 - 业务能力层
//!
//! 只负责把单页原始文本切成文本块、去重，不关心打分和分类

use crate::models::paper::PageText;
use crate::models::question::TextBlock;
use crate::rules::SegmentationRules;
use crate::utils::text::{collapse_whitespace, jaccard, word_set};
use regex::Regex;
use std::collections::HashSet;
use tracing::warn;

/// 文本块分段器
pub struct BlockSegmenter<'a> {
    rules: &'a SegmentationRules,
}

impl<'a> BlockSegmenter<'a> {
    pub fn new(rules: &'a SegmentationRules) -> Self {
        Self { rules }
    }

    /// 切分多页文本，位置序号跨页连续；页码为 0 的页面跳过
    pub fn segment_pages(&self, pages: &[PageText]) -> Vec<TextBlock> {
        let mut blocks = Vec::new();
        for page in pages {
            if page.page_number == 0 {
                warn!("⚠️ 跳过无效页码 0 的页面");
                continue;
            }
            let next = self.segment_page(page, blocks.len());
            blocks.extend(next);
        }
        blocks
    }

    /// 切分单页文本
    ///
    /// 1. 去掉整行的页眉页脚
    /// 2. 按空行切段
    /// 3. 段内按题号、句末长空白再切
    /// 4. 清理页码标记、合并空白，丢弃过短的块
    pub fn segment_page(&self, page: &PageText, first_position: usize) -> Vec<TextBlock> {
        let cleaned = self.strip_boilerplate_lines(&page.text);

        let mut blocks = Vec::new();
        for paragraph in self.rules.paragraph_break.split(&cleaned) {
            for piece in self.split_paragraph(paragraph) {
                let text = collapse_whitespace(&self.rules.page_marker.replace_all(piece, " "));
                if text.chars().count() < self.rules.min_block_chars {
                    continue;
                }
                blocks.push(TextBlock {
                    text,
                    page_number: page.page_number,
                    position: first_position + blocks.len(),
                });
            }
        }
        blocks
    }

    /// 去重：与已保留块的 Jaccard 相似度超过阈值即丢弃，先出现者保留
    pub fn deduplicate(&self, blocks: Vec<TextBlock>) -> Vec<TextBlock> {
        let mut kept: Vec<TextBlock> = Vec::with_capacity(blocks.len());
        let mut kept_sets: Vec<HashSet<String>> = Vec::with_capacity(blocks.len());

        for block in blocks {
            let set = word_set(&block.text);
            let duplicate = kept_sets
                .iter()
                .any(|seen| jaccard(seen, &set) > self.rules.duplicate_threshold);
            if !duplicate {
                kept_sets.push(set);
                kept.push(block);
            }
        }
        kept
    }

    fn strip_boilerplate_lines(&self, text: &str) -> String {
        text.lines()
            .filter(|line| {
                let line = line.trim();
                line.is_empty() || !self.is_boilerplate(line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn is_boilerplate(&self, text: &str) -> bool {
        self.rules.boilerplate.iter().any(|re| re.is_match(text))
    }

    fn split_paragraph<'t>(&self, paragraph: &'t str) -> Vec<&'t str> {
        let mut cuts = split_points(&self.rules.numbering, paragraph);
        cuts.extend(split_points(&self.rules.long_gap, paragraph));
        cuts.sort_unstable();
        cuts.dedup();

        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut start = 0;
        for cut in cuts {
            pieces.push(&paragraph[start..cut]);
            start = cut;
        }
        pieces.push(&paragraph[start..]);

        pieces.retain(|p| !p.trim().is_empty());
        pieces
    }
}

/// 第 1 个捕获组的起点作为切分点
fn split_points(re: &Regex, text: &str) -> Vec<usize> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.start())
        .filter(|&start| start > 0)
        .collect()
}

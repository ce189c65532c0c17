//! 文本处理辅助函数
//!
//! 分段、打分、分类、评分共用的分词与归一化。

use std::collections::HashSet;

/// 合并连续空白并去掉首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 小写分词：按非字母数字字符切分
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// 小写词集合
pub fn word_set(text: &str) -> HashSet<String> {
    words(text).into_iter().collect()
}

/// 按空白计数的词数
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Jaccard 相似度，任一集合为空时为 0
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// 关键词按词首匹配："scaffold" 命中 "scaffolding"，"ppe" 不命中 "upper"
pub fn contains_keyword(tokens: &[String], keyword: &str) -> bool {
    tokens.iter().any(|token| token.starts_with(keyword))
}

/// 四舍五入到两位小数
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

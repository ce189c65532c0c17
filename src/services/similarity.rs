//! 文本相似度
//!
//! 两篇文档的 TF-IDF（一元 + 二元词组）余弦相似度；词表为空时退回词集合 Jaccard。

use crate::utils::text::{jaccard, word_set};
use std::collections::{BTreeSet, HashMap};

/// 词汇相似度，结果在 [0, 1] 内
pub fn lexical_similarity(a: &str, b: &str) -> f64 {
    tfidf_cosine(a, b)
        .unwrap_or_else(|| jaccard(&word_set(a), &word_set(b)))
        .clamp(0.0, 1.0)
}

/// 两篇文档的 TF-IDF 余弦相似度
///
/// idf 采用平滑形式 `ln((1 + n) / (1 + df)) + 1`，向量做 L2 归一化。
/// 两篇文档都抽不出词项时返回 `None`。
pub fn tfidf_cosine(a: &str, b: &str) -> Option<f64> {
    let tf_a = term_frequencies(a);
    let tf_b = term_frequencies(b);

    let vocabulary: BTreeSet<&str> = tf_a.keys().chain(tf_b.keys()).map(String::as_str).collect();
    if vocabulary.is_empty() {
        return None;
    }

    const DOCS: f64 = 2.0;
    let (vec_a, vec_b): (Vec<f64>, Vec<f64>) = vocabulary
        .iter()
        .map(|term| {
            let ca = tf_a.get(*term).copied().unwrap_or(0) as f64;
            let cb = tf_b.get(*term).copied().unwrap_or(0) as f64;
            let df = (ca > 0.0) as u8 as f64 + (cb > 0.0) as u8 as f64;
            let idf = ((1.0 + DOCS) / (1.0 + df)).ln() + 1.0;
            (ca * idf, cb * idf)
        })
        .unzip();

    Some(cosine_similarity(&vec_a, &vec_b))
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// 词项计数：至少两个字符的词，以及相邻词组成的二元词组
fn term_frequencies(text: &str) -> HashMap<String, usize> {
    let tokens: Vec<String> = text
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(|t| t.to_lowercase())
        .collect();

    let mut counts = HashMap::new();
    for token in &tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts() {
        let text = "mortar binds the bricks together in a wall";
        let similarity = tfidf_cosine(text, text).unwrap();
        assert!((similarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_texts() {
        let similarity = tfidf_cosine("mortar binds bricks", "scaffold needs guardrails").unwrap();
        assert_eq!(similarity, 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let similarity = lexical_similarity(
            "mortar binds the bricks together",
            "cement mortar binds masonry units",
        );
        assert!(similarity > 0.0 && similarity < 1.0);
    }

    #[test]
    fn test_word_order_changes_similarity() {
        let same = tfidf_cosine("mortar binds bricks", "mortar binds bricks").unwrap();
        let reordered = tfidf_cosine("mortar binds bricks", "bricks binds mortar").unwrap();
        assert!((same - 1.0).abs() < 1e-9);
        assert!(reordered > 0.0 && reordered < 1.0, "{reordered}");
    }

    #[test]
    fn test_empty_vocabulary_falls_back_to_jaccard() {
        // 只有单字符词，TF-IDF 词表为空
        assert_eq!(tfidf_cosine("a b c", "a b d"), None);
        assert!((lexical_similarity("a b c", "a b d") - 0.5).abs() < 1e-9);
    }
}

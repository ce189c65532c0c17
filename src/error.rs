//! 错误类型
//!
//! 核心流水线（分段 / 打分 / 分类 / 生成答案 / 评分）对调用方不暴露任何错误，
//! 这里的错误只出现在持有 I/O 的外层：读取试卷文件、解析页面、编译自定义规则、读取配置。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 单页文本读取错误
    #[error("页面错误: {0}")]
    Page(#[from] PageError),
    /// 规则表错误
    #[error("规则错误: {0}")]
    Rule(#[from] RuleError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 不支持的文件类型
    #[error("不支持的文件类型: {path}")]
    UnsupportedFormat { path: String },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 页面错误
///
/// 由文档读取方产生；流水线记录日志后跳过该页，不会中断整份试卷。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// 页码必须从 1 开始
    #[error("无效页码: {page_number}")]
    InvalidPageNumber { page_number: u32 },
    /// 页面没有可用文本
    #[error("第 {page_number} 页没有文本")]
    MissingText { page_number: u32 },
    /// 读取方报告的失败
    #[error("第 {page_number} 页读取失败: {reason}")]
    Unreadable { page_number: u32, reason: String },
}

/// 规则表错误
#[derive(Debug, Error)]
pub enum RuleError {
    /// 正则表达式无法编译
    #[error("无效的正则表达式 '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未知难度
    #[error("未知难度: {value}")]
    UnknownDifficulty { value: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建正则编译错误
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        AppError::Rule(RuleError::InvalidPattern {
            pattern: pattern.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_converts_into_app_error() {
        let err: AppError = PageError::MissingText { page_number: 3 }.into();
        assert_eq!(err.to_string(), "页面错误: 第 3 页没有文本");
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = AppError::invalid_pattern("(unclosed", source);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("(unclosed"));
    }
}

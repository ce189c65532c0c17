use crate::error::{AppError, AppResult, FileError};
use crate::models::paper::{ExamPaper, RawPage};
use std::path::{Path, PathBuf};
use tokio::fs;

/// pdftotext 输出中的分页符
const PAGE_SEPARATOR: char = '\x0c';

/// 从文件加载试卷
///
/// - `.toml`：`name` / `course` / `level` + `[[pages]]`
/// - `.txt`：按分页符切页，页码从 1 开始
pub async fn load_paper(path: &Path) -> AppResult<ExamPaper> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let paper = match extension(path).as_deref() {
        Some("toml") => toml::from_str::<ExamPaper>(&content).map_err(|source| {
            FileError::TomlParseFailed {
                path: path_str.clone(),
                source,
            }
        })?,
        Some("txt") => parse_text_paper(file_stem(path), &content),
        _ => return Err(FileError::UnsupportedFormat { path: path_str }.into()),
    };

    Ok(paper.with_file_path(path_str))
}

/// 将纯文本按分页符切分为试卷
pub fn parse_text_paper(name: impl Into<String>, content: &str) -> ExamPaper {
    let mut segments: Vec<&str> = content.split(PAGE_SEPARATOR).collect();

    // 末尾分页符之后的空段不算一页
    while segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }

    let pages = segments
        .into_iter()
        .enumerate()
        .map(|(index, text)| RawPage {
            page_number: index as u32 + 1,
            text: (!text.trim().is_empty()).then(|| text.to_string()),
        })
        .collect();

    ExamPaper {
        name: name.into(),
        course: None,
        level: None,
        pages,
        file_path: None,
    }
}

/// 从文件夹中加载所有试卷
///
/// 单个文件加载失败只记录警告，不影响其余文件。
pub async fn load_all_papers(folder_path: &str) -> AppResult<Vec<ExamPaper>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if matches!(extension(&path).as_deref(), Some("toml") | Some("txt")) {
            paths.push(path);
        }
    }

    // read_dir 的顺序不确定
    paths.sort();

    let mut papers = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_paper(&path).await {
            Ok(paper) => {
                tracing::info!("成功加载 {} 页", paper.pages.len());
                papers.push(paper);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(papers)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::paper::PageReader;

    #[test]
    fn test_parse_text_paper_splits_on_form_feed() {
        let paper = parse_text_paper("t045", "01. Define scaffolding.\x0c\x0c02. List bonds.\x0c");
        assert_eq!(paper.name, "t045");
        assert_eq!(paper.pages.len(), 3);
        assert_eq!(paper.pages[0].page_number, 1);
        assert!(paper.pages[1].text.is_none());
        assert_eq!(paper.pages[2].page_number, 3);
        assert_eq!(paper.pages[2].text.as_deref(), Some("02. List bonds."));
    }

    #[tokio::test]
    async fn test_load_toml_paper() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.toml");
        std::fs::write(
            &path,
            r#"
name = "Elevation and Scaffolding"
course = "T045"

[[pages]]
page_number = 1
text = "01. Define scaffolding. (4 marks)"

[[pages]]
page_number = 2
"#,
        )
        .unwrap();

        let paper = load_paper(&path).await.unwrap();
        assert_eq!(paper.name, "Elevation and Scaffolding");
        assert_eq!(paper.course.as_deref(), Some("T045"));
        assert_eq!(paper.file_path.as_deref(), Some(path.display().to_string().as_str()));

        let pages = paper.pages();
        assert!(pages[0].is_ok());
        assert!(pages[1].is_err());
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.pdf");
        std::fs::write(&path, "%PDF-1.4").unwrap();

        let result = load_paper(&path).await;
        assert!(matches!(
            result,
            Err(AppError::File(FileError::UnsupportedFormat { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_all_papers_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "01. Define mortar.").unwrap();
        std::fs::write(dir.path().join("b.toml"), "name = ").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let papers = load_all_papers(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].name, "a");
    }

    #[tokio::test]
    async fn test_load_all_papers_missing_folder() {
        let result = load_all_papers("/definitely/not/here").await;
        assert!(matches!(
            result,
            Err(AppError::File(FileError::DirectoryNotFound { .. }))
        ));
    }
}

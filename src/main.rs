use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exam_pipeline::error::ConfigError;
use exam_pipeline::services::AnswerGrader;
use exam_pipeline::utils::logging;
use exam_pipeline::{App, Config, Difficulty, RuleSet};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "exam_pipeline", version, about = "试卷题目抽取与答案评分")]
struct Cli {
    /// 不带子命令时批量抽取输入目录中的试卷
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 对照参考答案给学生答案评分，输出 JSON
    Grade {
        /// 学生答案文件
        learner: PathBuf,
        /// 参考答案文件
        reference: PathBuf,
        /// 题目难度: easy | medium | hard
        #[arg(value_parser = parse_difficulty, default_value = "medium")]
        difficulty: Difficulty,
    },
}

fn parse_difficulty(value: &str) -> Result<Difficulty, ConfigError> {
    Difficulty::from_str(value).ok_or_else(|| ConfigError::UnknownDifficulty {
        value: value.to_string(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    match cli.command {
        None => {
            // 初始化并运行应用
            App::initialize(config).await?.run().await?;
        }
        Some(Commands::Grade {
            learner,
            reference,
            difficulty,
        }) => grade(&learner, &reference, difficulty, &config).await?,
    }

    Ok(())
}

/// 评分模式：输出 JSON
async fn grade(
    learner_path: &Path,
    reference_path: &Path,
    difficulty: Difficulty,
    config: &Config,
) -> Result<()> {
    let learner = tokio::fs::read_to_string(learner_path)
        .await
        .with_context(|| format!("无法读取学生答案: {}", learner_path.display()))?;
    let reference = tokio::fs::read_to_string(reference_path)
        .await
        .with_context(|| format!("无法读取参考答案: {}", reference_path.display()))?;

    let rules = RuleSet::from_config(config).context("构建规则表失败")?;
    let grader = AnswerGrader::new(&rules.grading);
    let assessment = grader.assess(&learner, &reference, difficulty);
    let feedback = grader.feedback(&assessment);

    let output = serde_json::json!({
        "score": assessment.final_score,
        "feedback": feedback,
        "difficulty": difficulty,
        "assessment": assessment,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

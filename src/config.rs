/// 程序配置
///
/// 只放运行参数；关键词表、正则表、答案模板等规则表见 [`crate::rules::RuleSet`]。
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的试卷数量
    pub max_concurrent_papers: usize,
    /// 待处理试卷目录（.toml / .txt）
    pub input_folder: String,
    /// 抽取结果输出目录
    pub output_folder: String,
    /// 需复核题目的记录文件
    pub review_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- 评分配置 ---
    /// 学生答案过短时给出的固定分数
    pub short_answer_score: u32,
    /// 困难题扣分不会低于该分数
    pub hard_penalty_floor: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_papers: 8,
            input_folder: "input_papers".to_string(),
            output_folder: "output_questions".to_string(),
            review_file: "review.txt".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            short_answer_score: crate::rules::SHORT_ANSWER_SCORE,
            hard_penalty_floor: crate::rules::HARD_PENALTY_FLOOR,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_papers: std::env::var("MAX_CONCURRENT_PAPERS").ok().and_then(|v| v.parse().ok()).filter(|n| *n > 0).unwrap_or(default.max_concurrent_papers),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            review_file: std::env::var("REVIEW_FILE").unwrap_or(default.review_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            short_answer_score: std::env::var("SHORT_ANSWER_SCORE").ok().and_then(|v| v.parse().ok()).map(|v: u32| v.min(100)).unwrap_or(default.short_answer_score),
            hard_penalty_floor: std::env::var("HARD_PENALTY_FLOOR").ok().and_then(|v| v.parse().ok()).map(|v: u32| v.min(100)).unwrap_or(default.hard_penalty_floor),
        }
    }
}

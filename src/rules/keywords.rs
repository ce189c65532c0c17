//! 静态关键词表
//!
//! 只做成员判断的集合用 phf 编译期哈希；需要保序的表用切片。

use crate::models::question::QuestionType;
use crate::models::subject::Subject;
use phf::phf_set;

/// 疑问 / 指令词，打分时每个命中的不同词加分
pub static QUESTION_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "what", "how", "why", "when", "where", "which", "who",
    "explain", "describe", "define", "calculate", "list", "name", "identify",
};

/// 高阶指令动词
pub static INSTRUCTION_VERBS: phf::Set<&'static str> = phf_set! {
    "analyze", "analyse", "evaluate", "compare", "discuss", "examine", "assess",
};

/// 结构连接词
pub static CONNECTIVES: phf::Set<&'static str> = phf_set! {
    "first", "second", "therefore", "because", "finally",
};

/// 英文停用词（长度不超过 3 的词在概念抽取时已被过滤，这里只列更长的）
pub static STOP_WORDS: phf::Set<&'static str> = phf_set! {
    "about", "above", "after", "again", "against", "also", "among", "been", "before",
    "being", "below", "between", "both", "could", "does", "doing", "down", "during",
    "each", "either", "every", "from", "further", "have", "having", "here", "hers",
    "herself", "himself", "into", "itself", "just", "many", "more", "most", "much",
    "must", "myself", "neither", "once", "only", "other", "ours", "ourselves", "over",
    "same", "shall", "should", "some", "such", "than", "that", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "under",
    "until", "upon", "very", "were", "what", "when", "where", "which", "while", "whom",
    "will", "with", "within", "without", "would", "your", "yours", "yourself",
    "yourselves",
};

/// 科目关键词词典，顺序即平局顺序
pub const SUBJECT_KEYWORDS: &[(Subject, &[&str])] = &[
    (
        Subject::Masonry,
        &["brick", "mortar", "foundation", "footing", "wall", "masonry", "cement", "lime", "bond"],
    ),
    (
        Subject::Scaffolding,
        &["scaffold", "platform", "tube", "height", "elevation", "ledger", "transom"],
    ),
    (
        Subject::ConstructionTechnology,
        &["construction", "building", "structure", "material", "tool", "equipment", "site"],
    ),
    (
        Subject::SafetyManagement,
        &["safety", "hazard", "risk", "protection", "inspection", "regulation", "ppe", "accident"],
    ),
    (
        Subject::EngineeringCalculations,
        &["load", "stress", "force", "structural", "design", "calculation"],
    ),
    (
        Subject::Mathematics,
        &["equation", "formula", "measurement", "dimension", "angle", "area", "volume"],
    ),
    (
        Subject::Science,
        &["physics", "chemistry", "biology", "experiment", "hypothesis", "theory"],
    ),
];

/// 科目 → 主题
pub const SUBJECT_TOPICS: &[(Subject, &str)] = &[
    (Subject::Masonry, "Masonry Work"),
    (Subject::Scaffolding, "Scaffolding Systems"),
    (Subject::ConstructionTechnology, "Construction Methods"),
    (Subject::SafetyManagement, "Safety Procedures"),
    (Subject::EngineeringCalculations, "Structural Analysis"),
    (Subject::Mathematics, "Measurement and Calculation"),
    (Subject::Science, "Applied Science"),
    (Subject::GeneralConstruction, "Construction Practice"),
];

/// 题型正则，顺序即优先级
///
/// "how" 只在后面跟助动词时算解释题，避免吞掉 "how many" 这类计算题。
pub const TYPE_PATTERNS: &[(QuestionType, &[&str])] = &[
    (
        QuestionType::Definition,
        &[
            r"\bdefine\b",
            r"\bwhat is\b",
            r"\bexplain what\b",
            r"\bexplain the term\b",
            r"\bmeaning of\b",
            r"\bmeans?\b",
        ],
    ),
    (
        QuestionType::Explanation,
        &[
            r"\bexplain\b",
            r"\bdescribe\b",
            r"\bwhy\b",
            r"\bhow (?:is|are|does|do|can|could|would|should|will|to)\b",
            r"\banaly[sz]e\b",
            r"\bdiscuss\b",
            r"\belaborate\b",
        ],
    ),
    (
        QuestionType::Listing,
        &[
            r"\blist\b",
            r"\bname\b",
            r"\bidentify\b",
            r"\bstate\b",
            r"\bmention\b",
            r"\benumerate\b",
            r"\bgive\b.*\bexamples?\b",
        ],
    ),
    (
        QuestionType::Calculation,
        &[
            r"\bcalculate\b",
            r"\bcompute\b",
            r"\bfind\b",
            r"\bdetermine\b",
            r"\bmeasure\b",
            r"\bhow (?:many|much)\b",
            r"\bquantity\b",
        ],
    ),
    (
        QuestionType::Comparison,
        &[
            r"\bcompare\b",
            r"\bcontrast\b",
            r"\bdifferentiate\b",
            r"\bdistinguish\b",
            r"\bdifferences?\b",
            r"\bsimilar\b",
        ],
    ),
    (
        QuestionType::Evaluation,
        &[
            r"\bevaluate\b",
            r"\bassess\b",
            r"\bjudge\b",
            r"\bcritique\b",
            r"\brecommend\b",
            r"\bjustify\b",
        ],
    ),
];

/// 分值正则，首个命中生效
pub const MARKS_PATTERNS: &[&str] = &[
    r"\((\d+)\s*marks?\)",
    r"\[(\d+)\s*marks?\]",
    r"\((\d+)\s*(?:mks?|m)\)",
    r"\[(\d+)\s*(?:mks?|m)\]",
    r"\b(\d+)\s*marks?\b",
];

/// 分值标注（打分用，只判断有无）
pub const MARKS_ANNOTATION: &str = r"\(\d+\s*marks?\)|\[\d+\s*marks?\]|\(\d+\s*m\)";

/// 页眉页脚等版面噪声，逐行整行匹配
pub const BOILERPLATE_PATTERNS: &[&str] = &[
    r"^do not write in this margin$",
    r"^instructions to candidates:?$",
    r"^(?:tss )?national examinations?(?: \d{4})?$",
    r"^nesa \(national examination.*\)$",
    r"^page \d+(?: of \d+)?$",
    r"^-+ ?page \d+ ?-+$",
    r"^(?:turn over|end of (?:examination|paper))$",
];

/// 表格 / 连线题提示语
pub const TABLE_INDICATORS: &[&str] = &[
    "column a",
    "column b",
    "table",
    "matching column",
    "answer column",
    "function described in the column",
];

use serde::{Deserialize, Serialize};

/// 科目枚举
///
/// 声明顺序即关键词打分时的平局顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    /// 砌筑
    Masonry,
    /// 脚手架
    Scaffolding,
    /// 施工技术
    #[serde(rename = "Construction Technology")]
    ConstructionTechnology,
    /// 安全管理
    #[serde(rename = "Safety Management")]
    SafetyManagement,
    /// 工程计算
    #[serde(rename = "Engineering Calculations")]
    EngineeringCalculations,
    /// 数学
    Mathematics,
    /// 科学
    Science,
    /// 兜底科目，没有任何关键词命中时使用
    #[serde(rename = "General Construction")]
    GeneralConstruction,
}

impl Subject {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Subject::Masonry => "Masonry",
            Subject::Scaffolding => "Scaffolding",
            Subject::ConstructionTechnology => "Construction Technology",
            Subject::SafetyManagement => "Safety Management",
            Subject::EngineeringCalculations => "Engineering Calculations",
            Subject::Mathematics => "Mathematics",
            Subject::Science => "Science",
            Subject::GeneralConstruction => "General Construction",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_name_matches_display() {
        let json = serde_json::to_string(&Subject::SafetyManagement).unwrap();
        assert_eq!(json, "\"Safety Management\"");
        assert_eq!(Subject::GeneralConstruction.to_string(), "General Construction");
    }
}

//! 参考答案模板
//!
//! 两张表：术语答案（题干命中术语即用）与按题型的通用模板。
//! 通用模板支持占位符 `{keywords}`、`{subject}`、`{topic}`。

use crate::models::question::QuestionType;
use std::collections::HashMap;

/// 术语答案：(命中词, 适用题型, 答案)。适用题型为空表示不限题型。
pub const TERM_ANSWERS: &[(&[&str], &[QuestionType], &str)] = &[
    (
        &["brick"],
        &[QuestionType::Definition],
        "Brick: A brick is a rectangular block of clay, concrete, or other material used in construction. Bricks are fired in kilns to harden them and are commonly used for building walls, foundations, and other structures.",
    ),
    (
        &["footing"],
        &[QuestionType::Definition],
        "Footing: A footing is the structural foundation element that distributes the load from a building to the ground. It is typically wider than the wall it supports and is placed below the frost line to prevent damage from freezing.",
    ),
    (
        &["mortar"],
        &[QuestionType::Definition],
        "Mortar: Mortar is a mixture of cement, sand, and water used to bind masonry units together. It provides structural integrity and weather resistance to masonry construction.",
    ),
    (
        &["scaffold"],
        &[QuestionType::Definition],
        "Scaffolding: Scaffolding is a temporary structure used in construction to support workers and materials during building, maintenance, or repair work at height. It provides a safe working platform and must comply with safety regulations. Key components include standards (vertical tubes), ledgers (horizontal tubes), transoms, and boards. Scaffolding must be erected by competent persons and regularly inspected.",
    ),
    (
        &["elevation"],
        &[QuestionType::Definition],
        "Elevation: Elevation in construction refers to the vertical height or position of a structure or component above a reference point, typically ground level or sea level. In building drawings, elevations show the exterior faces of a building from different viewpoints. Elevation operations involve working at height and require scaffolding, harnesses, and fall protection systems.",
    ),
    (
        &["bond"],
        &[QuestionType::Definition],
        "Bond: In masonry, a bond refers to the pattern in which bricks or stones are laid to ensure structural strength and stability. Common bonds include English bond, Flemish bond, and stretcher bond.",
    ),
    (
        &["bond"],
        &[QuestionType::Listing],
        "Types of bonds in masonry:\n1. English Bond: alternating courses of headers and stretchers, providing maximum strength\n2. Flemish Bond: headers and stretchers alternating within each course, offering a good appearance\n3. Stretcher Bond: all bricks laid as stretchers with joints staggered by half a brick, used for half-brick walls",
    ),
    (
        &["safety", "hazard", "ppe"],
        &[QuestionType::Listing],
        "Key safety considerations include:\n1. Personal Protective Equipment (PPE): hard hats, safety harnesses, high-visibility clothing\n2. Fall protection systems: guardrails, safety nets, personal fall arrest systems\n3. Scaffold inspection: daily checks, formal inspections, competent person requirements\n4. Load limits: understanding working loads and safety factors\n5. Weather conditions: wind speed restrictions, wet weather precautions\n6. Training requirements: competent person training, site-specific inductions\n7. Emergency procedures: rescue plans, first aid provisions\n8. Documentation: inspection records, training certificates, risk assessments",
    ),
    (
        &["rcc", "concrete"],
        &[QuestionType::Calculation],
        "To calculate RCC (1:2:4) materials:\n\nStep 1: Calculate the total dry volume\nDry volume = wet volume x 1.52\n\nStep 2: Split the dry volume by the mix ratio\nTotal parts = 1 + 2 + 4 = 7\n- Cement volume = (1/7) x dry volume\n- Sand volume = (2/7) x dry volume\n- Aggregate volume = (4/7) x dry volume\n\nStep 3: Convert cement to bags\nCement weight = cement volume x 1440 kg/m3\nNumber of bags = cement weight / 50 kg\n\nState the final quantities of cement (bags), sand (m3) and aggregate (m3).",
    ),
    (
        &["brick"],
        &[QuestionType::Calculation],
        "To calculate the number of bricks:\n\nStep 1: Calculate the total volume of the wall from its dimensions\nStep 2: Deduct the mortar volume (typically one quarter of the total volume)\nStep 3: Calculate the volume of one brick from its size (e.g. 210 x 110 x 60 mm)\nStep 4: Number of bricks = brick volume / volume of one brick\n\nRound up and allow for wastage in the final answer.",
    ),
];

/// 按题型的通用模板
pub const GENERIC_TEMPLATES: &[(QuestionType, &str)] = &[
    (
        QuestionType::Definition,
        "Based on the context involving {keywords}, this term refers to a key concept in {subject}. The definition should encompass the technical aspects, safety considerations, and practical applications relevant to the construction industry. Proper understanding requires knowledge of regulations, standards, and best practices in the field.",
    ),
    (
        QuestionType::Explanation,
        "This explanation should cover the fundamental principles and processes related to {keywords}. Key points to address include:\n\n1. The underlying concepts and theory\n2. Step-by-step processes or procedures\n3. Safety considerations and regulations\n4. Practical applications in real-world scenarios\n5. Common challenges and solutions\n6. Industry standards and best practices\n\nThe explanation should demonstrate understanding of both theoretical knowledge and practical implementation in {topic}.",
    ),
    (
        QuestionType::Listing,
        "Based on the context of {keywords}, the key items to list include:\n1. Primary components and their functions\n2. Safety requirements and procedures\n3. Regulatory compliance requirements\n4. Quality standards and specifications\n5. Inspection and maintenance procedures\n6. Documentation and record-keeping requirements\n7. Training and competency requirements\n8. Risk management considerations",
    ),
    (
        QuestionType::Calculation,
        "Step-by-step calculation approach for {keywords}:\n1. Identify given values and required unknowns\n2. Select appropriate formulas and standards\n3. Substitute values and solve, showing each step\n4. Include units throughout the calculation\n5. Check results for reasonableness and apply safety factors\n6. Present the final answer with proper units",
    ),
    (
        QuestionType::Comparison,
        "Comparison of {keywords} should address:\n\nSimilarities:\n- Common safety requirements\n- Shared regulatory standards\n- Comparable operational procedures\n\nDifferences:\n- Specific applications and use cases\n- Different load requirements\n- Distinct inspection requirements\n- Different cost implications\n\nConclusion:\n- Recommendations for appropriate selection\n- Consideration of site-specific factors",
    ),
    (
        QuestionType::Evaluation,
        "Evaluation of {keywords}:\n\n1. State the criteria used for the judgement (safety, cost, efficiency, compliance)\n2. Assess the strengths against each criterion\n3. Assess the limitations and risks\n4. Weigh the evidence and reference relevant standards in {subject}\n5. Conclude with a justified recommendation",
    ),
    (
        QuestionType::General,
        "Comprehensive response addressing {keywords}:\n\nOverview:\n- Define key concepts and terminology\n- Explain the context and importance\n\nTechnical Aspects:\n- Detail the technical requirements\n- Explain processes and procedures\n\nSafety Considerations:\n- Identify potential hazards and risks\n- Outline safety measures and controls\n\nPractical Application:\n- Describe real-world implementation in {topic}\n- Discuss common challenges and solutions",
    ),
];

/// 术语答案
#[derive(Debug, Clone)]
pub struct TermAnswer {
    /// 任一词（按词首）出现在题干中即命中
    pub terms: Vec<String>,
    /// 为空表示不限题型
    pub question_types: Vec<QuestionType>,
    pub answer: String,
}

impl TermAnswer {
    pub fn applies_to(&self, question_type: QuestionType) -> bool {
        self.question_types.is_empty() || self.question_types.contains(&question_type)
    }
}

/// 答案模板表
#[derive(Debug, Clone)]
pub struct AnswerTemplates {
    /// 按声明顺序匹配
    pub term_answers: Vec<TermAnswer>,
    pub generic: HashMap<QuestionType, String>,
}

impl AnswerTemplates {
    pub fn standard() -> Self {
        let term_answers = TERM_ANSWERS
            .iter()
            .map(|(terms, types, answer)| TermAnswer {
                terms: terms.iter().map(|t| t.to_string()).collect(),
                question_types: types.to_vec(),
                answer: answer.to_string(),
            })
            .collect();

        let generic = GENERIC_TEMPLATES
            .iter()
            .map(|(question_type, template)| (*question_type, template.to_string()))
            .collect();

        Self {
            term_answers,
            generic,
        }
    }

    /// 取题型对应的通用模板，缺失时退回 general
    pub fn generic_for(&self, question_type: QuestionType) -> &str {
        self.generic
            .get(&question_type)
            .or_else(|| self.generic.get(&QuestionType::General))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_question_type_has_generic_template() {
        let templates = AnswerTemplates::standard();
        for question_type in [
            QuestionType::Definition,
            QuestionType::Explanation,
            QuestionType::Listing,
            QuestionType::Calculation,
            QuestionType::Comparison,
            QuestionType::Evaluation,
            QuestionType::General,
        ] {
            assert!(templates.generic.contains_key(&question_type), "{question_type}");
        }
    }

    #[test]
    fn test_term_answer_type_filter() {
        let templates = AnswerTemplates::standard();
        let bond_listing = templates
            .term_answers
            .iter()
            .find(|t| t.terms == ["bond"] && t.applies_to(QuestionType::Listing))
            .unwrap();
        assert!(bond_listing.answer.contains("Flemish Bond"));
        assert!(!bond_listing.applies_to(QuestionType::Definition));
    }
}

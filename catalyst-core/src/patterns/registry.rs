use super::matcher::HeadingPattern;
use crate::types::FieldGroup;
use anyhow::Result;

/// Ordered recognizers for one sub-section key. The order is the priority
/// order — the first pattern that matches wins and the rest are skipped.
#[derive(Debug, Clone)]
pub struct FieldPatterns {
    key: &'static str,
    patterns: Vec<HeadingPattern>,
}

impl FieldPatterns {
    fn new(key: &'static str, patterns: Vec<Result<HeadingPattern>>) -> Result<Self> {
        Ok(Self {
            key,
            patterns: patterns.into_iter().collect::<Result<Vec<_>>>()?,
        })
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn patterns(&self) -> &[HeadingPattern] {
        &self.patterns
    }
}

/// Compiled pattern tables for every field group. One table per group,
/// one ordered recognizer list per sub-section key, covering the template
/// conventions of Fund 2 through Fund 13. Compiled once per parser.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    project_details: Vec<FieldPatterns>,
    pitch: Vec<FieldPatterns>,
    category_questions: Vec<FieldPatterns>,
    theme: Vec<FieldPatterns>,
}

impl PatternRegistry {
    pub fn new() -> Result<Self> {
        Ok(Self {
            project_details: Self::build_project_details()?,
            pitch: Self::build_pitch()?,
            category_questions: Self::build_category_questions()?,
            theme: Self::build_theme()?,
        })
    }

    pub fn for_group(&self, group: FieldGroup) -> &[FieldPatterns] {
        match group {
            FieldGroup::ProjectDetails => &self.project_details,
            FieldGroup::Pitch => &self.pitch,
            FieldGroup::CategoryQuestions => &self.category_questions,
            FieldGroup::Theme => &self.theme,
        }
    }

    /// The group's sub-section keys, in registry order.
    pub fn field_keys(&self, group: FieldGroup) -> Vec<&'static str> {
        self.for_group(group).iter().map(|f| f.key()).collect()
    }

    fn build_project_details() -> Result<Vec<FieldPatterns>> {
        Ok(vec![
            FieldPatterns::new(
                "solution",
                vec![
                    HeadingPattern::escaped_bracket("SOLUTION"),
                    HeadingPattern::unescaped_bracket("SOLUTION"),
                    HeadingPattern::hash_header("Solution"),
                    // Fund 4: "[IMPACT] Summarize your solution", sometimes
                    // re-exported with escaped brackets
                    HeadingPattern::escaped_bare_bracket("IMPACT"),
                    HeadingPattern::bare_bracket("IMPACT"),
                    HeadingPattern::bold_label("Solution"),
                ],
            )?,
            FieldPatterns::new(
                "impact",
                vec![
                    HeadingPattern::escaped_bracket("IMPACT"),
                    HeadingPattern::unescaped_bracket("IMPACT"),
                    HeadingPattern::hash_header("Impact"),
                    // Fund 7-8: ### Why is it important?
                    HeadingPattern::natural_language(r"Why\s+is\s+it\s+important\??"),
                    HeadingPattern::bold_label("Impact"),
                ],
            )?,
            FieldPatterns::new(
                "feasibility",
                vec![
                    HeadingPattern::escaped_bracket(r"CAPABILITY\s*(?:&|AND)?\s*FEASIBILITY"),
                    HeadingPattern::unescaped_bracket(r"CAPABILITY\s*(?:&|AND)?\s*FEASIBILITY"),
                    HeadingPattern::escaped_bracket("FEASIBILITY"),
                    HeadingPattern::unescaped_bracket("FEASIBILITY"),
                    HeadingPattern::hash_header("Feasibility"),
                    HeadingPattern::hash_header(r"Capability.*?Feasibility"),
                ],
            )?,
            FieldPatterns::new(
                "outputs",
                vec![
                    HeadingPattern::escaped_bracket(r"OUTPUTS?\s*(?:&|AND)?\s*OUTCOMES?"),
                    HeadingPattern::unescaped_bracket(r"OUTPUTS?\s*(?:&|AND)?\s*OUTCOMES?"),
                    HeadingPattern::hash_header(r"Outputs?\s*(?:and|&)?\s*Outcomes?"),
                    // Fund 7-8: ### What does success look like?
                    HeadingPattern::natural_language(r"What\s+does\s+success\s+look\s+like\??"),
                ],
            )?,
        ])
    }

    fn build_pitch() -> Result<Vec<FieldPatterns>> {
        Ok(vec![
            FieldPatterns::new(
                "team",
                vec![
                    HeadingPattern::escaped_bracket("TEAM"),
                    HeadingPattern::unescaped_bracket("TEAM"),
                    HeadingPattern::hash_header("Team"),
                    HeadingPattern::bold_label("Team"),
                ],
            )?,
            FieldPatterns::new(
                "budget",
                vec![
                    HeadingPattern::escaped_bracket(r"BUDGET\s*(?:&|AND)?\s*COSTS?"),
                    HeadingPattern::unescaped_bracket(r"BUDGET\s*(?:&|AND)?\s*COSTS?"),
                    HeadingPattern::escaped_bracket("BUDGET"),
                    HeadingPattern::unescaped_bracket("BUDGET"),
                    HeadingPattern::hash_header("Budget"),
                    HeadingPattern::bold_label("Budget"),
                ],
            )?,
            FieldPatterns::new(
                "milestones",
                vec![
                    HeadingPattern::escaped_bracket(r"PROJECT\s*MILESTONES?"),
                    HeadingPattern::unescaped_bracket(r"PROJECT\s*MILESTONES?"),
                    HeadingPattern::escaped_bracket("MILESTONES?"),
                    HeadingPattern::unescaped_bracket("MILESTONES?"),
                    HeadingPattern::hash_header("Milestones?"),
                    HeadingPattern::hash_header(r"Project\s*Milestones?"),
                ],
            )?,
            FieldPatterns::new(
                "value",
                vec![
                    HeadingPattern::escaped_bracket(r"VALUE\s*(?:FOR)?\s*MONEY"),
                    HeadingPattern::unescaped_bracket(r"VALUE\s*(?:FOR)?\s*MONEY"),
                    HeadingPattern::hash_header(r"Value\s*(?:for)?\s*Money"),
                ],
            )?,
            FieldPatterns::new(
                "resources",
                vec![
                    HeadingPattern::escaped_bracket("RESOURCES"),
                    HeadingPattern::unescaped_bracket("RESOURCES"),
                    HeadingPattern::hash_header("Resources"),
                ],
            )?,
        ])
    }

    fn build_category_questions() -> Result<Vec<FieldPatterns>> {
        use super::matcher::PatternKind;
        Ok(vec![
            FieldPatterns::new(
                "detailed_plan",
                vec![
                    // Fund 6-7 catch-all heading, at either header depth.
                    HeadingPattern::new(
                        PatternKind::HashHeader,
                        r"(?si)###\s*Detailed\s*Plan\s*\n(.*?)(?:###|\z)",
                    ),
                    HeadingPattern::new(
                        PatternKind::HashHeader,
                        r"(?si)##\s*Detailed\s*Plan\s*\n(.*?)(?:##|\z)",
                    ),
                    // Fund 2-3: "Detailed plan - Fill in here..."
                    HeadingPattern::plain_label(r"Detailed\s+plan"),
                ],
            )?,
            FieldPatterns::new(
                "target",
                vec![
                    HeadingPattern::escaped_bracket("TARGET"),
                    HeadingPattern::unescaped_bracket("TARGET"),
                    HeadingPattern::hash_header("Target"),
                ],
            )?,
            FieldPatterns::new(
                "activities",
                vec![
                    HeadingPattern::escaped_bracket("ACTIVITIES"),
                    HeadingPattern::unescaped_bracket("ACTIVITIES"),
                    HeadingPattern::hash_header("Activities"),
                ],
            )?,
            FieldPatterns::new(
                "performance_metrics",
                vec![
                    HeadingPattern::escaped_bracket(r"PERFORMANCE\s*METRICS?"),
                    HeadingPattern::unescaped_bracket(r"PERFORMANCE\s*METRICS?"),
                    HeadingPattern::hash_header(r"Performance\s*Metrics?"),
                    HeadingPattern::natural_language(r"Key\s+Metrics\s+to\s+measure"),
                ],
            )?,
            FieldPatterns::new(
                "success_criteria",
                vec![
                    HeadingPattern::escaped_bracket(r"SUCCESS\s*CRITERIA"),
                    HeadingPattern::unescaped_bracket(r"SUCCESS\s*CRITERIA"),
                    HeadingPattern::hash_header(r"Success\s*Criteria"),
                    HeadingPattern::hash_header(r"Definition\s*of\s*Success"),
                ],
            )?,
        ])
    }

    fn build_theme() -> Result<Vec<FieldPatterns>> {
        Ok(vec![
            FieldPatterns::new(
                "group",
                vec![
                    HeadingPattern::escaped_bracket("GROUP"),
                    HeadingPattern::unescaped_bracket("GROUP"),
                    HeadingPattern::hash_header("Group"),
                ],
            )?,
            FieldPatterns::new(
                "tag",
                vec![
                    HeadingPattern::escaped_bracket("TAG"),
                    HeadingPattern::unescaped_bracket("TAG"),
                    HeadingPattern::hash_header("Tag"),
                ],
            )?,
        ])
    }
}

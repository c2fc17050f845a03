use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The schema version stamped on every extraction record.
/// Bump this when the output shape changes.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Mapping from sub-section key to extracted, cleaned text.
///
/// Only keys that were actually found in the content are present — an empty
/// result is treated as "not parseable" and surfaced as `None` by the parser.
pub type ExtractionResult = BTreeMap<String, String>;

// ===== FIELD GROUPS =====
// The four top-level extraction categories the CatalystExplorer platform
// stores per proposal. Each owns a fixed, ordered set of sub-section keys
// (see patterns::registry for the per-key recognizers).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    ProjectDetails,
    Pitch,
    CategoryQuestions,
    Theme,
}

impl FieldGroup {
    /// All field groups, in the order `parse_all` visits them.
    pub const ALL: [FieldGroup; 4] = [
        FieldGroup::ProjectDetails,
        FieldGroup::Pitch,
        FieldGroup::CategoryQuestions,
        FieldGroup::Theme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldGroup::ProjectDetails => "project_details",
            FieldGroup::Pitch => "pitch",
            FieldGroup::CategoryQuestions => "category_questions",
            FieldGroup::Theme => "theme",
        }
    }

    /// Resolve a field group from its wire name. Returns `None` for
    /// unrecognized names — the parser logs and degrades, it never panics.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "project_details" => Some(FieldGroup::ProjectDetails),
            "pitch" => Some(FieldGroup::Pitch),
            "category_questions" => Some(FieldGroup::CategoryQuestions),
            "theme" => Some(FieldGroup::Theme),
            _ => None,
        }
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== PARSE OUTPUT =====

/// Per-group extraction results produced by `ContentParser::parse_all`.
/// Groups with nothing recognized are absent, matching the platform's
/// column-per-group storage model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_details: Option<ExtractionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<ExtractionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_questions: Option<ExtractionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ExtractionResult>,
}

impl ProposalFields {
    pub fn get(&self, group: FieldGroup) -> Option<&ExtractionResult> {
        match group {
            FieldGroup::ProjectDetails => self.project_details.as_ref(),
            FieldGroup::Pitch => self.pitch.as_ref(),
            FieldGroup::CategoryQuestions => self.category_questions.as_ref(),
            FieldGroup::Theme => self.theme.as_ref(),
        }
    }

    pub fn set(&mut self, group: FieldGroup, result: Option<ExtractionResult>) {
        let slot = match group {
            FieldGroup::ProjectDetails => &mut self.project_details,
            FieldGroup::Pitch => &mut self.pitch,
            FieldGroup::CategoryQuestions => &mut self.category_questions,
            FieldGroup::Theme => &mut self.theme,
        };
        *slot = result;
    }

    pub fn is_empty(&self) -> bool {
        self.group_count() == 0
    }

    /// Number of field groups with at least one extracted section.
    pub fn group_count(&self) -> usize {
        FieldGroup::ALL
            .iter()
            .filter(|g| self.get(**g).is_some())
            .count()
    }

    /// Total number of extracted sections across all groups.
    pub fn section_count(&self) -> usize {
        FieldGroup::ALL
            .iter()
            .filter_map(|g| self.get(*g))
            .map(|r| r.len())
            .sum()
    }
}

// ===== CONTENT FORMAT CLASSIFICATION =====

/// The overall template era a proposal body appears to follow.
/// Computed by `FormatClassifier` from the highest-priority marker present;
/// informational only — extraction tries every pattern tier regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentFormat {
    /// Fund 10-13: `### \[SOLUTION\]` with backslash-escaped brackets
    EscapedBracketHeaders,
    /// Fund 9-13: `### [SOLUTION]`
    BracketHeaders,
    /// Fund 6-8: `## Solution`
    HashHeaders,
    /// Fund 7-8: `### Why is it important?` style question headers
    NaturalLanguageHeaders,
    /// `**Solution:**` bold labels, seen in template-free proposals
    BoldLabels,
    /// Fund 4: bare `[IMPACT]` labels without a heading marker
    BareBracketLabels,
    /// Fund 2-3: a single `Detailed plan - ...` label
    DetailedPlanLabel,
}

// ===== EXTRACTION RECORD =====

/// The serialization-ready output format. Carries a schema version
/// so consumers can detect and handle shape changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub schema_version: String,
    pub extracted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_format: Option<ContentFormat>,
    pub fields: ProposalFields,
}

impl ExtractionRecord {
    pub fn new(fields: ProposalFields, content_format: Option<ContentFormat>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            extracted_at: Utc::now(),
            content_format,
            fields,
        }
    }
}

/// Minimal output shape: one entry per extracted section, in field-group
/// order. Good for indexing pipelines that don't care about the grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatExtraction {
    pub format: String,
    pub sections: Vec<FlatSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatSection {
    pub field_group: FieldGroup,
    pub key: String,
    pub text: String,
}

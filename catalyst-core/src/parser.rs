use crate::classifier::FormatClassifier;
use crate::clean::clean_content;
use crate::config::ParserConfig;
use crate::patterns::{PatternKind, PatternRegistry};
use crate::types::{ContentFormat, ExtractionResult, FieldGroup, ProposalFields};
use anyhow::Result;
use regex::Regex;
use tracing::warn;

/// Extracts structured sections from Catalyst proposal markdown.
///
/// Proposal content arrives in the heading conventions of whatever fund
/// template it was authored against. For each sub-section key the parser
/// tries an ordered list of recognizers and keeps the first hit, so a
/// single document can mix conventions and still extract fully.
#[derive(Debug, Clone)]
pub struct ContentParser {
    registry: PatternRegistry,
    classifier: FormatClassifier,
    header_structure: Regex,
    config: ParserConfig,
}

impl ContentParser {
    pub fn new() -> Result<Self> {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Result<Self> {
        Ok(Self {
            registry: PatternRegistry::new()?,
            classifier: FormatClassifier::new()?,
            header_structure: Regex::new(r"(?m)^#{2,3}\s+")?,
            config,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extract one field group's sections by group name. Returns None for
    /// empty content, an unknown group name, or when no section matched.
    pub fn parse(&self, content: &str, field_group: &str) -> Option<ExtractionResult> {
        if content.trim().is_empty() {
            return None;
        }
        let Some(group) = FieldGroup::from_name(field_group) else {
            warn!(field_group, "unknown field group requested");
            return None;
        };
        self.parse_group(content, group)
    }

    /// Extract one field group's sections.
    pub fn parse_group(&self, content: &str, group: FieldGroup) -> Option<ExtractionResult> {
        if content.trim().is_empty() {
            return None;
        }
        let structured = self.header_structure.is_match(content);
        let mut result = ExtractionResult::new();

        for field in self.registry.for_group(group) {
            for pattern in field.patterns() {
                if pattern.kind() == PatternKind::BoldLabel
                    && structured
                    && self.config.matching.skip_bold_when_structured
                {
                    continue;
                }
                if let Some(raw) = pattern.extract(content) {
                    let cleaned = clean_content(raw);
                    if !cleaned.is_empty() {
                        result.insert(field.key().to_string(), cleaned);
                    }
                    // A matched header claims the key even when its body
                    // cleans down to nothing.
                    break;
                }
            }
        }

        if result.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    /// Extract every field group, with whole-document fallback for project
    /// details when the document has no recognizable structure.
    pub fn parse_all(&self, content: &str) -> ProposalFields {
        let mut fields = ProposalFields::default();
        if content.trim().is_empty() {
            return fields;
        }

        for group in FieldGroup::ALL {
            fields.set(group, self.parse_group(content, group));
        }

        if fields.project_details.is_none() {
            let fallback = self.fallback_project_details(content, &fields);
            fields.set(FieldGroup::ProjectDetails, fallback);
        }

        fields
    }

    /// Like [`parse`](Self::parse), but applies fallback extraction when the
    /// requested group is project details and nothing matched. Other groups
    /// have no meaningful whole-document stand-in.
    pub fn parse_with_fallback(&self, content: &str, field_group: &str) -> Option<ExtractionResult> {
        let direct = self.parse(content, field_group);
        if direct.is_some() {
            return direct;
        }
        if FieldGroup::from_name(field_group) != Some(FieldGroup::ProjectDetails) {
            return None;
        }
        if content.trim().is_empty() {
            return None;
        }
        let mut context = ProposalFields::default();
        for group in FieldGroup::ALL {
            if group != FieldGroup::ProjectDetails {
                context.set(group, self.parse_group(content, group));
            }
        }
        self.fallback_project_details(content, &context)
    }

    /// Whether the document carries any recognizable template markers.
    pub fn has_parsable_sections(&self, content: &str) -> bool {
        self.classifier.has_parsable_sections(content)
    }

    /// Which heading convention the document was authored with, if any.
    pub fn classify_format(&self, content: &str) -> Option<ContentFormat> {
        self.classifier.classify(content)
    }

    pub fn supported_field_groups(&self) -> Vec<&'static str> {
        FieldGroup::ALL.iter().map(|g| g.as_str()).collect()
    }

    /// The sub-section keys a group can extract, in priority order. Empty
    /// for an unknown group name.
    pub fn field_keys(&self, field_group: &str) -> Vec<&'static str> {
        match FieldGroup::from_name(field_group) {
            Some(group) => self.registry.field_keys(group),
            None => Vec::new(),
        }
    }

    fn fallback_project_details(
        &self,
        content: &str,
        existing: &ProposalFields,
    ) -> Option<ExtractionResult> {
        if !self.config.fallback.enabled {
            return None;
        }

        // Fund 6-7 proposals put the whole pitch under "Detailed Plan".
        // Promote it so downstream consumers always find a solution.
        if let Some(plan) = existing
            .category_questions
            .as_ref()
            .and_then(|cq| cq.get("detailed_plan"))
        {
            if !plan.is_empty() {
                let mut result = ExtractionResult::new();
                result.insert("solution".to_string(), plan.clone());
                return Some(result);
            }
        }

        // Unstructured prose: treat the whole document as the solution,
        // unless it is too short to carry one.
        let cleaned = clean_content(content);
        if cleaned.len() >= self.config.fallback.min_content_length {
            let mut result = ExtractionResult::new();
            result.insert("solution".to_string(), cleaned);
            return Some(result);
        }

        None
    }
}

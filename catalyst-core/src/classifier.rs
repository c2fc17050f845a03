use crate::types::ContentFormat;
use anyhow::Result;
use regex::Regex;

/// Detects which heading convention a document was authored with.
///
/// Markers are checked in priority order and the first hit wins, so a
/// document mixing conventions reports its most structured one. Used for
/// metadata only; extraction itself tries every pattern regardless.
#[derive(Debug, Clone)]
pub struct FormatClassifier {
    markers: Vec<(ContentFormat, Regex)>,
}

impl FormatClassifier {
    pub fn new() -> Result<Self> {
        let markers = vec![
            (
                ContentFormat::EscapedBracketHeaders,
                Regex::new(r"(?i)###\s*\\\[")?,
            ),
            (
                ContentFormat::BracketHeaders,
                Regex::new(r"(?i)###\s*\[")?,
            ),
            (
                ContentFormat::HashHeaders,
                Regex::new(r"(?i)##\s+[A-Z][a-z]+\s*\n")?,
            ),
            (
                ContentFormat::NaturalLanguageHeaders,
                Regex::new(r"(?i)###\s*(?:Why|What|Key\s+Metrics)")?,
            ),
            (
                ContentFormat::BoldLabels,
                Regex::new(r"\*\*[A-Z][a-z]+[:\s]*\*\*")?,
            ),
            (
                ContentFormat::BareBracketLabels,
                Regex::new(r"(?i)\\?\[IMPACT\\?\]")?,
            ),
            (
                ContentFormat::DetailedPlanLabel,
                Regex::new(r"(?i)Detailed\s+plan\s*[-\u{2013}\u{2014}]")?,
            ),
        ];
        Ok(Self { markers })
    }

    pub fn classify(&self, content: &str) -> Option<ContentFormat> {
        self.markers
            .iter()
            .find(|(_, re)| re.is_match(content))
            .map(|(format, _)| *format)
    }

    /// True when any marker matches, i.e. the document looks like it was
    /// written against one of the known templates.
    pub fn has_parsable_sections(&self, content: &str) -> bool {
        self.classify(content).is_some()
    }
}

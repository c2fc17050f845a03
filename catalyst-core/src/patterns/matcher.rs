use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The heading convention a recognizer targets. Closed set — every
/// historical Catalyst template era maps to exactly one variant, and
/// recognizers are tried in a fixed order with early exit on first match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    /// Fund 10-13: `### \[SOLUTION\]` with backslash-escaped brackets
    EscapedBracket,
    /// Fund 9-13: `### [SOLUTION]`
    UnescapedBracket,
    /// Fund 6-9: `## Solution`
    HashHeader,
    /// Fund 7-8: `### Why is it important?` style question headers
    NaturalLanguage,
    /// `**Solution:**` bold labels
    BoldLabel,
    /// Fund 4: bare `[IMPACT]` labels without a heading marker
    BareBracket,
    /// Fund 4 labels as re-exported with escaped brackets: `\[IMPACT\]`
    EscapedBareBracket,
    /// Fund 2-3: `Detailed plan - ...` running-text labels
    PlainLabel,
}

/// A recognizer for one heading format, mapped to one sub-section key.
/// Wraps a compiled regex whose first capture group is the section body.
#[derive(Debug, Clone)]
pub struct HeadingPattern {
    kind: PatternKind,
    regex: Regex,
}

impl HeadingPattern {
    pub fn new(kind: PatternKind, pattern: &str) -> Result<Self> {
        Ok(Self {
            kind,
            regex: Regex::new(pattern)?,
        })
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Extract the section body this pattern captures, if the content
    /// matches. Returns the raw capture — cleaning is the caller's step.
    pub fn extract<'a>(&self, content: &'a str) -> Option<&'a str> {
        self.regex
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    // Constructors per era. `label`/`title` arguments are regex fragments,
    // so variants like `BUDGET\s*(?:&|AND)?\s*COSTS?` compose directly.

    /// Fund 10-13 header with escaped brackets: `### \[LABEL\]`.
    /// The body runs to the next bracket header (escaped or not) or EOF.
    pub fn escaped_bracket(label: &str) -> Result<Self> {
        Self::new(
            PatternKind::EscapedBracket,
            &format!(r"(?si)###\s*\\\[{label}\\\][^\n]*\n(.*?)(?:###\s*\\?\[|\z)"),
        )
    }

    /// Fund 9-13 header without escaping: `### [LABEL]`.
    pub fn unescaped_bracket(label: &str) -> Result<Self> {
        Self::new(
            PatternKind::UnescapedBracket,
            &format!(r"(?si)###\s*\[{label}\][^\n]*\n(.*?)(?:###\s*\\?\[|\z)"),
        )
    }

    /// Fund 6-9 header: `## Title`. Body runs to the next `##` header.
    pub fn hash_header(title: &str) -> Result<Self> {
        Self::new(
            PatternKind::HashHeader,
            &format!(r"(?si)##\s*{title}\s*\n(.*?)(?:##\s|\z)"),
        )
    }

    /// Fund 7-8 natural-language question header: `### Question?`.
    pub fn natural_language(question: &str) -> Result<Self> {
        Self::new(
            PatternKind::NaturalLanguage,
            &format!(r"(?si)###\s*{question}\s*\n(.*?)(?:###\s|\z)"),
        )
    }

    /// Bold label at line start: `**Label:**`. Body runs to the next bold
    /// label, a triple blank line, or EOF.
    pub fn bold_label(label: &str) -> Result<Self> {
        Self::new(
            PatternKind::BoldLabel,
            &format!(r"(?smi)^\*\*{label}[:\s]*\*\*\s*(.*?)(?:^\*\*[A-Z]|\n\n\n|\z)"),
        )
    }

    /// Fund 4 bare bracket label: `[LABEL] Summarize your...`.
    /// The body runs to the next bracket label (escaped or not) or EOF.
    pub fn bare_bracket(label: &str) -> Result<Self> {
        Self::new(
            PatternKind::BareBracket,
            &format!(r"(?si)\[{label}\][^\n]*\n(.*?)(?:\\?\[|\z)"),
        )
    }

    /// Fund 4 bare label with escaped brackets: `\[LABEL\] Summarize...`.
    /// Some exports escape the bare labels the same way they escape
    /// bracket headers.
    pub fn escaped_bare_bracket(label: &str) -> Result<Self> {
        Self::new(
            PatternKind::EscapedBareBracket,
            &format!(r"(?si)\\\[{label}\\\][^\n]*\n(.*?)(?:\\?\[|\z)"),
        )
    }

    /// Fund 2-3 running-text label: `Detailed plan - Fill in here...`.
    pub fn plain_label(label: &str) -> Result<Self> {
        Self::new(
            PatternKind::PlainLabel,
            &format!(r"(?si){label}\s*[-–—]\s*[^\n]*\n(.*?)\z"),
        )
    }
}

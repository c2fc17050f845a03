// Heading pattern system — ordered recognizers for Catalyst template eras.
// - matcher.rs: PatternKind and HeadingPattern (one compiled recognizer)
// - registry.rs: the per-field-group pattern tables, in priority order

pub mod matcher;
pub mod registry;

pub use matcher::{HeadingPattern, PatternKind};
pub use registry::{FieldPatterns, PatternRegistry};

use crate::types::{ExtractionRecord, FieldGroup, FlatExtraction, FlatSection};
use anyhow::Result;

impl ExtractionRecord {
    pub fn to_flat_format(&self) -> FlatExtraction {
        // Walk groups and keys in their canonical order so output is stable
        // across runs over the same proposal.
        let mut sections = Vec::new();
        for group in FieldGroup::ALL {
            if let Some(result) = self.fields.get(group) {
                for (key, text) in result {
                    sections.push(FlatSection {
                        field_group: group,
                        key: key.clone(),
                        text: text.clone(),
                    });
                }
            }
        }

        FlatExtraction {
            format: "flat".to_string(),
            sections,
        }
    }

    pub fn save_to_json(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn save_with_format(&self, path: &str, format: &str) -> Result<()> {
        match format {
            "flat" => {
                let flat = self.to_flat_format();
                let json = serde_json::to_string_pretty(&flat)?;
                std::fs::write(path, json)?;
            }
            _ => {
                self.save_to_json(path)?;
            }
        }
        Ok(())
    }
}

use serde::Serialize;

use super::FileRegistry;
use crate::metadata::FileMetadata;

/// Default name offered by the save dialog.
pub const EXPORT_FILE_NAME: &str = "metadata_export.json";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No files selected to export.")]
    EmptySelection,
    #[error("failed to serialize export document: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRecord<'a> {
    file_name: &'a str,
    metadata: &'a FileMetadata,
}

impl FileRegistry {
    /// Pretty-printed JSON array of the selected entries, in display order.
    pub fn export_selected(&self) -> Result<String, ExportError> {
        let records: Vec<ExportRecord<'_>> = self
            .entries()
            .iter()
            .filter(|entry| self.is_selected(&entry.id))
            .map(|entry| ExportRecord {
                file_name: &entry.metadata.general.file_name,
                metadata: &entry.metadata,
            })
            .collect();
        if records.is_empty() {
            return Err(ExportError::EmptySelection);
        }
        let json = serde_json::to_string_pretty(&records)?;
        log::info!("[export] serialized {} entries", records.len());
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::{FileRegistry, RawFile};
    use chrono::{Local, TimeZone};

    fn raw(name: &str) -> RawFile {
        RawFile::from_bytes(
            name,
            b"%PDF-1.4 test".to_vec(),
            Local.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap(),
        )
    }

    #[test]
    fn empty_selection_is_an_error_not_a_crash() {
        let mut registry = FileRegistry::new();
        registry.add(vec![raw("report.pdf")]);
        assert!(matches!(
            registry.export_selected(),
            Err(super::ExportError::EmptySelection)
        ));
    }

    #[test]
    fn export_document_shape_matches_the_contract() {
        let mut registry = FileRegistry::new();
        registry.add(vec![raw("a.pdf"), raw("b.pdf")]);
        let ids: Vec<String> = registry.entries().iter().map(|e| e.id.clone()).collect();
        registry.set_selected(&ids[1], true);

        let json = registry.export_selected().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record["fileName"], "b.pdf");
        assert_eq!(record["metadata"]["general"]["fileType"], "application/pdf");
        assert_eq!(record["metadata"]["technical"]["PDF Version"], "1.7");
        assert_eq!(record["metadata"]["editable"]["title"], "");
    }

    #[test]
    fn export_keeps_display_order_regardless_of_selection_order() {
        let mut registry = FileRegistry::new();
        registry.add(vec![raw("first.pdf"), raw("second.pdf"), raw("third.pdf")]);
        let ids: Vec<String> = registry.entries().iter().map(|e| e.id.clone()).collect();
        registry.set_selected(&ids[2], true);
        registry.set_selected(&ids[0], true);

        let json = registry.export_selected().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let names: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["fileName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["first.pdf", "third.pdf"]);
    }
}

use chrono::{DateTime, Local};

use super::{EditableMetadata, FileKind, FileMetadata, GeneralMetadata, TechnicalMetadata};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Human-readable size string: base-1024 units, rounded to two decimals with
/// trailing zeros dropped. Zero bytes renders as "0 Bytes" exactly.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

fn long_date(timestamp: DateTime<Local>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}

/// Fabricates the full metadata record for a file. Pure and deterministic in
/// its inputs; no file content is ever inspected. The technical field names
/// per branch are a contract with the exporter and the Technical tab.
pub fn generate_metadata(
    name: &str,
    size: u64,
    mime: &str,
    modified: DateTime<Local>,
) -> FileMetadata {
    let file_type = FileKind::from_mime(mime);

    let general = GeneralMetadata {
        file_name: name.to_string(),
        file_type,
        file_size: format_bytes(size),
    };

    let created_date = long_date(modified);
    let mut technical = TechnicalMetadata::new();
    match file_type {
        FileKind::Jpeg | FileKind::Png => {
            technical.insert("Image Dimensions", "1920x1080");
            technical.insert("Color Space", "sRGB");
            technical.insert("Resolution", "72 DPI");
            technical.insert("Date Created", created_date.as_str());
        }
        FileKind::Pdf => {
            technical.insert("PDF Version", "1.7");
            technical.insert("Page Count", 5);
            technical.insert("Creator Tool", "Adobe Acrobat");
            technical.insert("Date Created", created_date.as_str());
        }
        FileKind::Unknown => {
            technical.insert("Info", "No technical metadata available for this file type.");
        }
    }

    FileMetadata {
        general,
        technical,
        editable: EditableMetadata::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TechValue;
    use chrono::TimeZone;

    fn jan_5_2024() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap()
    }

    #[test]
    fn zero_bytes_is_spelled_out() {
        assert_eq!(format_bytes(0), "0 Bytes");
    }

    #[test]
    fn format_bytes_picks_the_largest_unit_under_1024() {
        assert_eq!(format_bytes(1), "1 Bytes");
        assert_eq!(format_bytes(1023), "1023 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2_097_152), "2 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1 GB");
    }

    #[test]
    fn format_bytes_rounds_to_two_decimals() {
        // 1234 / 1024 = 1.205...
        assert_eq!(format_bytes(1234), "1.21 KB");
        // 1126 / 1024 = 1.0996...
        assert_eq!(format_bytes(1126), "1.1 KB");
    }

    #[test]
    fn units_cap_at_tb() {
        // 1024^5 bytes exceeds the unit table and stays in TB.
        assert_eq!(format_bytes(1u64 << 50), "1024 TB");
    }

    #[test]
    fn image_branch_has_the_four_image_fields() {
        let meta = generate_metadata("photo.png", 512, "image/png", jan_5_2024());
        assert_eq!(meta.general.file_type, FileKind::Png);
        let keys: Vec<&str> = meta.technical.keys().collect();
        assert_eq!(
            keys,
            vec!["Image Dimensions", "Color Space", "Resolution", "Date Created"]
        );
        assert_eq!(
            meta.technical.get("Date Created"),
            Some(&TechValue::from("January 5, 2024"))
        );
    }

    #[test]
    fn pdf_branch_has_the_four_pdf_fields_with_numeric_page_count() {
        let meta = generate_metadata("report.pdf", 2_097_152, "application/pdf", jan_5_2024());
        let keys: Vec<&str> = meta.technical.keys().collect();
        assert_eq!(
            keys,
            vec!["PDF Version", "Page Count", "Creator Tool", "Date Created"]
        );
        assert_eq!(meta.technical.get("Page Count"), Some(&TechValue::Number(5)));
        assert_eq!(meta.general.file_size, "2 MB");
    }

    #[test]
    fn unknown_branch_has_a_single_info_field() {
        let meta = generate_metadata("notes.txt", 10, "text/plain", jan_5_2024());
        assert_eq!(meta.general.file_type, FileKind::Unknown);
        assert_eq!(meta.technical.len(), 1);
        assert!(meta.technical.get("Info").is_some());
    }

    #[test]
    fn editable_initializes_empty() {
        let meta = generate_metadata("a.jpg", 1, "image/jpeg", jan_5_2024());
        assert_eq!(meta.editable, EditableMetadata::default());
        assert!(meta.editable.title.is_empty());
        assert!(meta.editable.tags.is_empty());
    }
}

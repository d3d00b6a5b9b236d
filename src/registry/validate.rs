use crate::metadata::EditableMetadata;

pub const TITLE_MAX_CHARS: usize = 100;
pub const AUTHOR_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Per-field validation outcome. `None` means the field passed; the message
/// is rendered inline next to the offending input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: Option<&'static str>,
    pub author: Option<&'static str>,
    pub description: Option<&'static str>,
    pub tags: Option<&'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }
}

pub fn validate_editable(data: &EditableMetadata) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if data.title.chars().count() > TITLE_MAX_CHARS {
        errors.title = Some("Title is too long.");
    }
    if data.author.chars().count() > AUTHOR_MAX_CHARS {
        errors.author = Some("Author name is too long.");
    }
    if data.description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.description = Some("Description is too long.");
    }
    if !data.tags.is_empty() && !data.tags.split(',').all(|tag| !tag.trim().is_empty()) {
        errors.tags = Some("Tags should be comma-separated values.");
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

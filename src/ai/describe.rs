use super::openai_compat::{chat_completion, ProviderConfig};

pub const SYSTEM_PROMPT: &str = "You are an expert metadata generator. Based on the content of the file, generate a concise and informative description for the file's metadata.";

/// Failure modes of the description assist. Callers match on the variant;
/// the generated text itself never doubles as an error signal.
#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    #[error("provider request failed: {0}")]
    Provider(#[from] anyhow::Error),
    #[error("provider returned an empty description")]
    Empty,
}

pub fn build_prompt(file_name: &str, file_type: &str) -> String {
    format!(
        "This is a file named {file_name} of type {file_type}. Based on this, please generate a good, concise description for a metadata field."
    )
}

/// One request, one response. No retries and no cancellation; a failed
/// attempt is terminal until the user triggers it again.
pub async fn generate_description(
    cfg: &ProviderConfig,
    file_name: &str,
    file_type: &str,
) -> Result<String, DescribeError> {
    let prompt = build_prompt(file_name, file_type);
    log::info!("[describe] requesting description for {file_name} via {}", cfg.provider);
    let text = chat_completion(cfg, SYSTEM_PROMPT, &prompt).await?;
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(DescribeError::Empty);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_name_and_type() {
        let prompt = build_prompt("report.pdf", "application/pdf");
        assert!(prompt.contains("report.pdf"));
        assert!(prompt.contains("application/pdf"));
        assert!(prompt.contains("concise description"));
    }
}

use anyhow::Result;

/// In-memory provider configuration, edited in the Preferences modal. The
/// API key is seeded from the conventional environment variable once at
/// startup; nothing is ever written back.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProviderConfig {
    pub provider: String, // openai|grok|gemini|groq|openrouter|custom
    pub api_key: Option<String>,
    pub base_url: Option<String>, // for custom; for others we choose defaults
    pub model: String,
    pub organization: Option<String>, // OpenAI optional
}

pub const PROVIDERS: [&str; 6] = ["openai", "grok", "gemini", "groq", "openrouter", "custom"];

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .or_else(|| std::env::var("GEMINI_API_KEY").ok()),
            base_url: None,
            model: "gpt-4o-mini".to_string(),
            organization: None,
        }
    }
}

fn default_base_and_header(provider: &str) -> (String, String) {
    match provider {
        "openai" => ("https://api.openai.com/v1".into(), "Authorization".into()),
        "grok" => ("https://api.x.ai/v1".into(), "Authorization".into()),
        "gemini" => (
            "https://generativelanguage.googleapis.com/v1beta".into(),
            "x-goog-api-key".into(),
        ),
        "groq" => ("https://api.groq.com/openai/v1".into(), "Authorization".into()),
        "openrouter" => ("https://openrouter.ai/api/v1".into(), "Authorization".into()),
        _ => ("http://localhost:11434/v1".into(), "Authorization".into()),
    }
}

/// Single text-only completion. Gemini speaks its own schema; every other
/// provider uses the OpenAI Chat Completions shape.
pub async fn chat_completion(cfg: &ProviderConfig, system: &str, prompt: &str) -> Result<String> {
    if cfg.provider == "gemini" {
        return generate_gemini(cfg, system, prompt).await;
    }

    let (default_base, auth_header_name) = default_base_and_header(&cfg.provider);
    let base = cfg.base_url.clone().unwrap_or(default_base);
    let url = format!("{}/chat/completions", base.trim_end_matches('/'));
    let client = reqwest::Client::builder().build()?;
    let mut req = client.post(&url);

    if let Some(key) = cfg.api_key.as_deref() {
        // Bearer token for most providers
        if auth_header_name.eq_ignore_ascii_case("authorization") {
            req = req.header("Authorization", format!("Bearer {}", key));
        } else {
            req = req.header(auth_header_name.clone(), key);
        }
    }
    if let Some(org) = cfg.organization.as_deref() {
        req = req.header("OpenAI-Organization", org);
    }

    let body = serde_json::json!({
        "model": cfg.model,
        "messages": [
            {"role": "system", "content": system},
            {"role": "user", "content": prompt}
        ],
        // sensible defaults
        "temperature": 0.2
    });

    let resp = req.json(&body).send().await?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        anyhow::bail!("provider error {}: {}", status, text);
    }
    let v: serde_json::Value = resp.json().await?;
    let content = v
        .pointer("/choices/0/message/content")
        .and_then(|x| x.as_str())
        .unwrap_or_default()
        .to_string();
    Ok(content)
}

async fn generate_gemini(cfg: &ProviderConfig, system: &str, prompt: &str) -> Result<String> {
    // POST /models/{model}:generateContent?key=API_KEY
    let base = cfg
        .base_url
        .clone()
        .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".into());
    let url = format!(
        "{}/models/{}:generateContent?key={}",
        base.trim_end_matches('/'),
        cfg.model,
        cfg.api_key.clone().unwrap_or_default()
    );
    let client = reqwest::Client::builder().build()?;
    let body = serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": format!("{}\n\n{}", system, prompt)}]
        }]
    });
    let resp = client.post(&url).json(&body).send().await?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        anyhow::bail!("gemini error {}: {}", status, text);
    }
    let v: serde_json::Value = resp.json().await?;
    let mut acc = String::new();
    // candidates[0].content.parts[].text
    if let Some(parts) = v.pointer("/candidates/0/content/parts").and_then(|x| x.as_array()) {
        for p in parts {
            if let Some(t) = p.get("text").and_then(|x| x.as_str()) {
                acc.push_str(t);
            }
        }
    }
    Ok(acc)
}

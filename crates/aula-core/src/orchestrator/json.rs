//! JSON extraction from model output

use serde_json::Value;

/// Parse a JSON value from model text
///
/// Accepts bare JSON, a fenced ```` ```json ```` block, or the outermost
/// `{...}` span of surrounding prose.
pub fn parse_json_response(text: &str) -> Result<Value, String> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    if let Some(block) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str(block) {
            return Ok(value);
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(format!(
        "response is not valid JSON ({} chars)",
        trimmed.chars().count()
    ))
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body_start = after_fence.find('\n').map_or(0, |i| i + 1);
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

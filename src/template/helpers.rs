// ABOUTME: Handlebars helper functions available to page views and document templates
// ABOUTME: Implements built-in template functions for timestamps, text casing, defaults, JSON and truncation

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};

/// Timestamp helper - formats current time with optional format string
pub fn timestamp_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let format = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .unwrap_or("%Y-%m-%d %H:%M:%S");

    let now = Utc::now();
    let formatted = now.format(format).to_string();
    out.write(&formatted)?;
    Ok(())
}

/// Format time helper - formats an RFC 3339 or unix timestamp with a custom format
pub fn format_time_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h
        .param(0)
        .map(|v| v.value())
        .ok_or_else(|| RenderError::new("format_time helper requires timestamp parameter"))?;

    let format = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .unwrap_or("%Y-%m-%d %H:%M:%S");

    let datetime = match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(from_unix),
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .or_else(|| s.parse::<i64>().ok().and_then(from_unix)),
        _ => None,
    }
    .ok_or_else(|| RenderError::new(format!("Failed to parse timestamp: {}", value)))?;

    out.write(&datetime.format(format).to_string())?;
    Ok(())
}

fn from_unix(seconds: i64) -> Option<DateTime<FixedOffset>> {
    Utc.timestamp_opt(seconds, 0).single().map(Into::into)
}

/// Uppercase helper
pub fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("upper helper requires input parameter"))?;

    out.write(&input.to_uppercase())?;
    Ok(())
}

/// Lowercase helper
pub fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("lower helper requires input parameter"))?;

    out.write(&input.to_lowercase())?;
    Ok(())
}

/// Join helper - joins array elements with separator
pub fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let separator = h.param(0).and_then(|v| v.value().as_str()).unwrap_or(",");

    let array = h
        .param(1)
        .and_then(|v| v.value().as_array())
        .ok_or_else(|| RenderError::new("join helper requires array parameter"))?;

    let strings: std::result::Result<Vec<String>, RenderError> = array
        .iter()
        .map(|v| match v {
            serde_json::Value::String(s) => Ok(s.clone()),
            serde_json::Value::Number(n) => Ok(n.to_string()),
            _ => Err(RenderError::new("Array elements must be strings or numbers")),
        })
        .collect();

    out.write(&strings?.join(separator))?;
    Ok(())
}

/// Default helper - provides default value if variable is empty or missing
pub fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");

    let default_value = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("default helper requires default value parameter"))?;

    let result = if value.is_empty() {
        default_value
    } else {
        value
    };

    out.write(result)?;
    Ok(())
}

/// JSON helper - serializes a value, e.g. for inline `<script>` data
pub fn json_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h
        .param(0)
        .map(|v| v.value())
        .ok_or_else(|| RenderError::new("json helper requires value parameter"))?;

    let encoded = serde_json::to_string(value)
        .map_err(|e| RenderError::new(format!("JSON encode error: {}", e)))?;

    // Keep `</script>` inside string values from closing the surrounding tag.
    out.write(&encoded.replace("</", "<\\/"))?;
    Ok(())
}

/// Truncate helper - shortens text to a character count, appending an ellipsis
pub fn truncate_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("truncate helper requires input parameter"))?;

    let length = h
        .param(1)
        .and_then(|v| v.value().as_u64())
        .ok_or_else(|| RenderError::new("truncate helper requires length parameter"))?
        as usize;

    if input.chars().count() <= length {
        out.write(input)?;
    } else {
        let truncated: String = input.chars().take(length).collect();
        out.write(&format!("{}...", truncated.trim_end()))?;
    }
    Ok(())
}

/// Register all built-in helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("timestamp", Box::new(timestamp_helper));
    handlebars.register_helper("format_time", Box::new(format_time_helper));
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("join", Box::new(join_helper));
    handlebars.register_helper("default", Box::new(default_helper));
    handlebars.register_helper("json", Box::new(json_helper));
    handlebars.register_helper("truncate", Box::new(truncate_helper));
}

//! Content-Typeによるバイナリ判定
//!
//! CloudFrontの結果レスポンスのボディは文字列のため、
//! バイナリのボディはBase64で送る必要がある。どのメディアタイプが該当するかを判定する。

/// `application/*` subtypes that carry text
const TEXT_APPLICATION_SUBTYPES: &[&str] = &[
    "json",
    "xml",
    "javascript",
    "ecmascript",
    "x-javascript",
    "x-www-form-urlencoded",
    "graphql",
    "x-ndjson",
    "yaml",
    "x-yaml",
    "toml",
    "sql",
    "csv",
];

/// Structured-syntax suffixes that are always text
const TEXT_SUFFIXES: &[&str] = &["+json", "+xml", "+yaml"];

/// Top-level types whose bodies are binary
const BINARY_TOP_LEVEL_TYPES: &[&str] = &["image", "audio", "video", "font", "model", "application"];

/// Check whether a body with the given Content-Type must be sent as base64
///
/// - `None` or an empty value is text
/// - `text/*` and `+json`/`+xml`/`+yaml` suffixes are text
/// - JSON/XML/JavaScript-like `application/*` subtypes are text
/// - `image/*`, `audio/*`, `video/*`, `font/*`, `model/*` and any other
///   `application/*` subtype are binary
/// - other top-level types (`multipart/*`, `message/*`, ...) are text
pub fn is_binary(content_type: Option<&str>) -> bool {
    let Some(essence) = content_type.map(media_type_essence) else {
        return false;
    };

    let Some((top_level, subtype)) = essence.split_once('/') else {
        return false;
    };

    if top_level == "text" || TEXT_SUFFIXES.iter().any(|suffix| subtype.ends_with(suffix)) {
        return false;
    }

    if top_level == "application" && TEXT_APPLICATION_SUBTYPES.contains(&subtype) {
        return false;
    }

    BINARY_TOP_LEVEL_TYPES.contains(&top_level)
}

/// `type/subtype` part of a Content-Type, lower-cased and without parameters
fn media_type_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

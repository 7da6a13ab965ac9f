//! Output locator extraction for loosely shaped job outputs

use serde_json::{Map, Value};

/// File extensions accepted for a bare output string
pub const MEDIA_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "mp4", "webm", "mov"];

/// Keys searched when the output is an object or a list of objects
pub const DEFAULT_OUTPUT_KEYS: &[&str] = &["url", "image", "video", "output", "uri"];

/// Whether `s` looks like a media URL, ignoring any query string or fragment
pub fn is_media_locator(s: &str) -> bool {
    let path = s.split(['?', '#']).next().unwrap_or(s);
    let Some((_, extension)) = path.rsplit_once('.') else {
        return false;
    };
    let extension = extension.to_ascii_lowercase();
    MEDIA_EXTENSIONS.contains(&extension.as_str())
}

/// Find the result URL in a job output.
///
/// Tried in order: a bare media string, a list whose first element is a media
/// string, a list of objects (first element carrying one of `keys`), a single
/// object carrying one of `keys`. Returns `None` if nothing matches.
pub fn extract_locator(output: &Value, keys: &[String]) -> Option<String> {
    match output {
        Value::String(s) if is_media_locator(s) => Some(s.clone()),
        Value::Array(items) => match items.first() {
            Some(Value::String(s)) if is_media_locator(s) => Some(s.clone()),
            _ => items
                .iter()
                .filter_map(Value::as_object)
                .find_map(|object| by_key(object, keys)),
        },
        Value::Object(object) => by_key(object, keys),
        _ => None,
    }
}

fn by_key(object: &Map<String, Value>, keys: &[String]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

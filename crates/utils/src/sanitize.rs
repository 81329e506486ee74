use chrono::Utc;
use uuid::Uuid;

const MAX_BASE_LEN: usize = 80;
const MAX_EXT_LEN: usize = 12;
const DEFAULT_BASE: &str = "image";

/// Turns a client-supplied filename into `{base}.{ext}` restricted to `[A-Za-z0-9_.-]`.
///
/// Leading path segments, surrounding whitespace and any query string or
/// fragment are dropped. A dot at index 0 does not start an extension.
/// The base keeps at most 80 characters and falls back to `image`; the
/// extension keeps at most 12 lower-cased alphanumerics and is omitted when
/// nothing survives.
pub fn sanitize_gallery_file_name(original: &str) -> String {
    let stripped = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let trimmed = stripped.trim();
    let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();

    let (raw_base, raw_ext) = split_extension(without_query);

    let mut base: String = raw_base
        .chars()
        .map(|c| if is_base_char(c) { c } else { '_' })
        .take(MAX_BASE_LEN)
        .collect();
    if base.is_empty() {
        base = DEFAULT_BASE.to_string();
    }

    let ext = clean_extension(raw_ext);

    if ext.is_empty() {
        base
    } else {
        format!("{}.{}", base, ext)
    }
}

/// Like [`sanitize_gallery_file_name`], but a missing name gets a timestamped fallback
pub fn sanitize_upload_name(original: Option<&str>) -> String {
    match original {
        Some(name) => sanitize_gallery_file_name(name),
        None => fallback_file_name(),
    }
}

/// `image-<unix millis in base36>`
pub fn fallback_file_name() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    format!("{}-{}", DEFAULT_BASE, to_base36(millis))
}

/// Collision-avoiding name for entry and blog uploads: `{base}-{8 hex}.{ext}`
pub fn unique_name(original: &str) -> String {
    let stripped = original.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    let (raw_base, raw_ext) = split_extension(stripped);

    let mut base = String::with_capacity(raw_base.len());
    for c in raw_base.chars().take(MAX_BASE_LEN) {
        let mapped = if is_base_char(c) || c == '.' { c } else { '_' };
        // collapse runs of dots
        if mapped == '.' && base.ends_with('.') {
            continue;
        }
        base.push(mapped);
    }
    if base.is_empty() {
        base = "upload".to_string();
    }

    let mut ext = clean_extension(raw_ext);
    if ext.is_empty() {
        ext = "bin".to_string();
    }

    let id = Uuid::new_v4().simple().to_string();
    format!("{}-{}.{}", base, &id[..8], ext)
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx + 1..]),
        _ => (name, ""),
    }
}

fn clean_extension(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_EXT_LEN)
        .collect::<String>()
        .to_ascii_lowercase()
}

fn is_base_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

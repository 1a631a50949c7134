//! Title, section and source URL derivation.
//!
//! All functions here are pure: the same content and relative path
//! always give the same metadata, regardless of walk order.

/// Maximum number of lines scanned for a title
pub const TITLE_SCAN_LINES: usize = 20;

/// Prefix of the annotation line crawlers put above the real heading
const SOURCE_ANNOTATION: &str = "# Source:";

/// Top-level Markdown heading marker
const HEADING_MARKER: &str = "# ";

/// Extract the document title from its first top-level heading.
///
/// Looks at the first [`TITLE_SCAN_LINES`] lines only and skips
/// `# Source: ...` annotations. Returns an empty string when no
/// heading is found.
pub fn extract_title(content: &str) -> String {
    content
        .lines()
        .take(TITLE_SCAN_LINES)
        .map(str::trim)
        .filter(|line| !line.starts_with(SOURCE_ANNOTATION))
        .find_map(|line| line.strip_prefix(HEADING_MARKER))
        .map(|title| title.trim().to_string())
        .unwrap_or_default()
}

/// Normalize a relative path to `/` separators.
pub fn normalize_relative(relative: &str) -> String {
    relative
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Parent directory of a normalized relative path, or `""` at the top.
pub fn derive_section(relative: &str) -> String {
    match relative.rfind('/') {
        Some(idx) => relative[..idx].to_string(),
        None => String::new(),
    }
}

/// Canonical source URL for a document.
///
/// Landing pages (`index.<extension>`) map to their section URL,
/// everything else to its path without the extension.
pub fn derive_source(base_url: &str, relative: &str, extension: &str) -> String {
    let file_name = relative.rsplit('/').next().unwrap_or(relative);

    let path = if is_index_page(file_name, extension) {
        derive_section(relative)
    } else {
        strip_extension(relative, extension).to_string()
    };

    join_url(base_url, &path)
}

/// Whether `file_name` carries the document extension (case-insensitive).
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    let suffix_len = extension.len() + 1;
    if file_name.len() < suffix_len || !file_name.is_char_boundary(file_name.len() - suffix_len) {
        return false;
    }
    let suffix = &file_name[file_name.len() - suffix_len..];
    suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(extension)
}

fn is_index_page(file_name: &str, extension: &str) -> bool {
    has_extension(file_name, extension)
        && strip_extension(file_name, extension).eq_ignore_ascii_case("index")
}

fn strip_extension<'a>(path: &'a str, extension: &str) -> &'a str {
    if has_extension(path, extension) {
        &path[..path.len() - extension.len() - 1]
    } else {
        path
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

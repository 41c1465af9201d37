//! Utility functions and helpers.

pub mod http;

use std::path::Path;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{AppError, Result};

/// Parse an API base URL, rejecting URLs that cannot carry path segments.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url.trim())?;
    if url.cannot_be_a_base() {
        return Err(AppError::config(format!(
            "base URL '{base_url}' cannot carry endpoint paths"
        )));
    }
    Ok(url)
}

/// Append path segments to a base URL, percent-encoding each segment.
///
/// `http://host/api` + `["download-pdf", "22A91A6101"]` gives
/// `http://host/api/download-pdf/22A91A6101`.
pub fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    url
}

/// Extract the filename from a `Content-Disposition` header value.
///
/// Prefers the RFC 5987 `filename*` form over plain `filename`. Returns
/// `None` when no usable name is present.
pub fn content_disposition_filename(header: &str) -> Option<String> {
    let extended = regex::Regex::new(r#"(?i)filename\*\s*=\s*(?:[\w-]+)?'[^']*'([^;]+)"#).ok()?;
    if let Some(caps) = extended.captures(header) {
        let encoded = caps.get(1)?.as_str().trim();
        let decoded = percent_decode_str(encoded).decode_utf8_lossy();
        if let Some(name) = sanitize_filename(&decoded) {
            return Some(name);
        }
    }

    let plain = regex::Regex::new(r#"(?i)filename\s*=\s*(?:"([^"]*)"|([^;]+))"#).ok()?;
    let caps = plain.captures(header)?;
    let raw = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();
    sanitize_filename(raw)
}

/// Reduce a server-supplied name to a bare file name.
///
/// Directory components are dropped so the name cannot escape the output
/// directory.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let normalized = raw.trim().replace('\\', "/");
    let name = Path::new(&normalized).file_name()?.to_str()?.trim();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

/// Count the pages of a PDF document by its page objects.
///
/// Returns `None` for data without a PDF header or without any pages.
pub fn pdf_page_count(bytes: &[u8]) -> Option<usize> {
    if !bytes.starts_with(b"%PDF-") {
        return None;
    }
    let page = regex::bytes::Regex::new(r"/Type\s*/Page\b").ok()?;
    match page.find_iter(bytes).count() {
        0 => None,
        n => Some(n),
    }
}

//! Reduce HTML documents to whitespace-tokenizable plain text.
//!
//! [`TagStripper`] removes tags, comments, and the contents of raw-text
//! elements (`<script>`, `<style>`), replacing each removed region with
//! a space so adjacent words stay separated. Character entities are
//! left untouched; downstream token validation already rejects tokens
//! containing `&`. Input that is not HTML passes through unchanged,
//! so arbitrary plain text can take the same ingestion path.
//!
//! The [`Sanitizer`] trait is the seam for swapping in a stricter
//! implementation.

use std::borrow::Cow;

/// Capability interface for document sanitization.
pub trait Sanitizer: Send + Sync {
    /// Strip `page` down to plain text, tolerating invalid UTF-8.
    fn sanitize(&self, page: &[u8]) -> String;
}

/// Default sanitizer: a single-pass tag stripper.
#[derive(Clone, Copy, Debug, Default)]
pub struct TagStripper;

impl Sanitizer for TagStripper {
    fn sanitize(&self, page: &[u8]) -> String {
        match String::from_utf8_lossy(page) {
            Cow::Borrowed(text) => strip_tags(text),
            Cow::Owned(text) => strip_tags(&text),
        }
    }
}

fn strip_tags(mut rest: &str) -> String {
    let mut out = String::with_capacity(rest.len());
    while let Some(i) = rest.find('<') {
        out.push_str(&rest[..i]);
        out.push(' ');
        rest = &rest[i..];
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = match after.find("-->") {
                Some(j) => &after[j + 3..],
                None => "",
            };
            continue;
        }
        let Some(end) = rest.find('>') else {
            // Unterminated tag swallows the remainder.
            return out;
        };
        let tag = &rest[1..end];
        rest = &rest[end + 1..];
        if let Some(name) = element_name(tag)
            && matches!(name.as_str(), "script" | "style")
        {
            rest = skip_raw_text(rest, &name);
        }
    }
    out.push_str(rest);
    out
}

/// Extract the element name from an opening tag's interior.
///
/// Closing tags, doctype declarations, and processing instructions
/// yield `None`; they never start a raw-text region.
fn element_name(tag: &str) -> Option<String> {
    let tag = tag.trim_start();
    if tag.starts_with(['/', '!', '?']) {
        return None;
    }
    let name: String = tag
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}

/// Skip past the matching `</name ...>` closing tag, case-insensitively.
fn skip_raw_text<'a>(rest: &'a str, name: &str) -> &'a str {
    let close = format!("</{name}");
    // ASCII lowering preserves byte offsets.
    let lowered = rest.to_ascii_lowercase();
    match lowered.find(&close) {
        Some(i) => {
            let after = &rest[i..];
            match after.find('>') {
                Some(j) => &after[j + 1..],
                None => "",
            }
        }
        None => "",
    }
}

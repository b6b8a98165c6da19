//! Human-facing fields derived from a raw [`Material`] record.
//!
//! Everything here is pure: same input, same output, no I/O.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::models::Material;
use crate::subjects;

/// Path marker the media CDN serves original uploads under
const UPLOAD_MARKER: &str = "/upload/";

/// Transformation that makes the CDN answer with `Content-Disposition: attachment`
const ATTACHMENT_FLAG: &str = "fl_attachment/";

/// Registrable domain of the media CDN
const CDN_DOMAIN: &str = "cloudinary.com";

const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// Longest display name shown before truncation, in characters
pub const MAX_DISPLAY_NAME_CHARS: usize = 40;

const ELLIPSIS: char = '…';

/// Rewrite a CDN URL so that following it downloads the file instead of
/// rendering it inline. Anything that is not a CDN upload URL is returned as-is.
pub fn download_url(url: &str) -> String {
    if !is_cdn_url(url) {
        return url.to_string();
    }

    let parts: Vec<&str> = url.split(UPLOAD_MARKER).collect();
    let [head, tail] = parts.as_slice() else {
        return url.to_string();
    };

    if tail.starts_with(ATTACHMENT_FLAG) {
        return url.to_string();
    }

    format!("{head}{UPLOAD_MARKER}{ATTACHMENT_FLAG}{tail}")
}

fn is_cdn_url(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };

    match parsed.host_str() {
        Some(host) => host == CDN_DOMAIN || host.ends_with(&format!(".{CDN_DOMAIN}")),
        None => false,
    }
}

/// Whether the URL points at something the viewer can render as an image.
pub fn is_image(url: &str) -> bool {
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Last path segment of a URL, with any query or fragment removed.
fn last_segment(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().filter(|segment| !segment.is_empty())
}

/// Readable title for a material: decoded file name without its extension.
pub fn display_name(id: i64, url: &str) -> String {
    let fallback = || format!("Material #{id}");

    let Some(segment) = last_segment(url) else {
        return fallback();
    };

    let Ok(decoded) = urlencoding::decode(segment) else {
        return fallback();
    };

    let stem = match decoded.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => decoded.as_ref(),
    };
    let stem = stem.trim();

    if stem.is_empty() {
        return fallback();
    }

    truncate(stem, MAX_DISPLAY_NAME_CHARS)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Lowercase extension of the file a URL points at, without the dot.
pub fn extension(url: &str) -> Option<String> {
    let segment = last_segment(url)?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Upload date in the short form shown on cards, e.g. `Feb 23, 2026`.
pub fn format_date(created_at: &DateTime<Utc>) -> String {
    created_at.format("%b %-d, %Y").to_string()
}

/// Everything a material card or viewer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialView {
    pub id: i64,
    pub name: String,
    pub extension: Option<String>,
    pub is_image: bool,
    pub subject_id: String,
    pub subject_name: String,
    pub owner: String,
    pub uploaded_on: String,
    pub view_url: String,
    pub download_url: String,
}

impl From<&Material> for MaterialView {
    fn from(material: &Material) -> Self {
        MaterialView {
            id: material.id,
            name: display_name(material.id, &material.url),
            extension: extension(&material.url),
            is_image: is_image(&material.url),
            subject_id: material.subject.clone(),
            subject_name: subjects::lookup(&material.subject).name.to_string(),
            owner: material.username.clone(),
            uploaded_on: format_date(&material.created_at),
            view_url: material.url.clone(),
            download_url: download_url(&material.url),
        }
    }
}

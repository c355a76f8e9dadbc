//! HTML reference injection
//!
//! Replaces the region between `<!-- inject:css -->` / `<!-- inject:js -->`
//! and the following `<!-- endinject -->` with one tag per asset, indented
//! like the start marker. Paths are written as given (no leading `/`).

use crate::domain::value_objects::AssetKind;

/// Closing marker shared by every injection region
pub const END_MARKER: &str = "<!-- endinject -->";

/// Start marker for an asset kind
pub fn start_marker(kind: AssetKind) -> String {
    format!("<!-- inject:{} -->", kind.extension())
}

/// Reference tag for one asset
pub fn render_tag(kind: AssetKind, href: &str) -> String {
    match kind {
        AssetKind::Css => format!(r#"<link rel="stylesheet" href="{href}">"#),
        AssetKind::Js => format!(r#"<script src="{href}"></script>"#),
    }
}

/// Result of injecting into a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    pub html: String,
    /// Number of tags written
    pub injected: usize,
    /// Kinds that had assets but no marker region in the template
    pub missing_markers: Vec<AssetKind>,
}

/// Inject `hrefs` (already ordered) into `template`.
pub fn inject(template: &str, hrefs: &[String]) -> Injection {
    let mut html = template.to_string();
    let mut injected = 0;
    let mut missing_markers = Vec::new();

    for kind in [AssetKind::Css, AssetKind::Js] {
        let tags: Vec<String> = hrefs
            .iter()
            .filter(|href| AssetKind::from_path(std::path::Path::new(href.as_str())) == Some(kind))
            .map(|href| render_tag(kind, href))
            .collect();

        match replace_region(&html, &start_marker(kind), &tags) {
            Some(updated) => {
                injected += tags.len();
                html = updated;
            }
            None if !tags.is_empty() => missing_markers.push(kind),
            None => {}
        }
    }

    Injection {
        html,
        injected,
        missing_markers,
    }
}

fn replace_region(html: &str, start: &str, tags: &[String]) -> Option<String> {
    let start_at = html.find(start)?;
    let content_at = start_at + start.len();
    let end_at = content_at + html[content_at..].find(END_MARKER)?;

    let line_start = html[..start_at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let indent: String = html[line_start..start_at]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(html.len() + tags.len() * 64);
    out.push_str(&html[..content_at]);
    for tag in tags {
        out.push('\n');
        out.push_str(&indent);
        out.push_str(tag);
    }
    out.push('\n');
    out.push_str(&indent);
    out.push_str(&html[end_at..]);
    Some(out)
}

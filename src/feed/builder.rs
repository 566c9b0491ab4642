//! RSS 2.0 output.
//!
//! The document is assembled line by line from escaped fragments instead of
//! going through an XML writer, which keeps each namespace declared exactly
//! once on the root element.
use chrono::{DateTime, Utc};

use super::parser::{UpstreamItem, ATOM_NAMESPACE, CONTENT_NAMESPACE, DC_NAMESPACE};
use crate::config::FeedProfile;
use crate::util::escape_xml;

/// `lastBuildDate` layout. Always rendered from a UTC timestamp.
const LAST_BUILD_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Renders the filtered feed.
///
/// `items` are written in the given order. For each item with a link the
/// output carries the link as both `title` and `link`, an empty
/// `description`, and `guid`/`pubDate` when upstream had them. An item
/// without a link is written as a bare `<item>` / `</item>` pair.
///
/// Output depends only on the arguments, so the same items and `built_at`
/// always produce the same bytes.
pub fn build_feed(
    upstream_title: Option<&str>,
    items: &[&UpstreamItem],
    profile: &FeedProfile,
    built_at: DateTime<Utc>,
) -> String {
    let mut lines: Vec<String> = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        format!(
            r#"<rss version="2.0" xmlns:dc="{DC_NAMESPACE}" xmlns:content="{CONTENT_NAMESPACE}" xmlns:atom="{ATOM_NAMESPACE}">"#
        ),
        "<channel>".to_string(),
    ];

    if let Some(title) = upstream_title.filter(|t| !t.is_empty()) {
        lines.push(format!(
            "<title>{}{}</title>",
            escape_xml(Some(title)),
            escape_xml(Some(&profile.title_suffix()))
        ));
    }
    lines.push(format!(
        "<description>{}</description>",
        escape_xml(Some(&profile.description))
    ));
    lines.push(format!("<link>{}</link>", escape_xml(Some(&profile.link))));
    lines.push(format!(
        "<lastBuildDate>{}</lastBuildDate>",
        built_at.format(LAST_BUILD_DATE_FORMAT)
    ));
    lines.push(format!(
        r#"<atom:link href="{}" rel="self" type="application/rss+xml" />"#,
        escape_xml(Some(&profile.self_link))
    ));
    lines.push(format!(
        "<language>{}</language>",
        escape_xml(Some(&profile.language))
    ));

    for item in items {
        push_item(&mut lines, item);
    }

    lines.push("</channel>".to_string());
    lines.push("</rss>".to_string());
    lines.join("\n")
}

fn push_item(lines: &mut Vec<String>, item: &UpstreamItem) {
    lines.push("<item>".to_string());

    // Items without a link stay empty, guid and pubDate included
    if let Some(link) = item.link.as_deref().filter(|l| !l.is_empty()) {
        let link = escape_xml(Some(link));
        lines.push(format!("<title>{link}</title>"));
        lines.push("<description></description>".to_string());
        lines.push(format!("<link>{link}</link>"));

        if let Some(guid) = item.guid.as_ref().filter(|g| !g.value.is_empty()) {
            let is_perma_link = guid.is_perma_link.as_deref().unwrap_or("true");
            lines.push(format!(
                r#"<guid isPermaLink="{}">{}</guid>"#,
                escape_xml(Some(is_perma_link)),
                escape_xml(Some(&guid.value))
            ));
        }

        if let Some(pub_date) = item.pub_date.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("<pubDate>{}</pubDate>", escape_xml(Some(pub_date))));
        }
    }

    lines.push("</item>".to_string());
}

//! Rich text helpers for Basecamp content
//!
//! Basecamp stores descriptions and comments as HTML with custom
//! `bc-attachment` elements. Mentions have to be resolved on the raw markup,
//! because plain-text conversion drops the attributes that carry the name.

use std::borrow::Cow;

use regex::{Captures, Regex};
use scraper::{Html, Selector};

/// Content type Basecamp uses for @-mention attachments
pub const MENTION_CONTENT_TYPE: &str = "application/vnd.basecamp.mention";

/// Replace Basecamp mention attachments with `<strong>@Name</strong>`
///
/// Attachments are matched on the raw markup, so a mention keeps its place
/// even where an HTML parser would move its `<figure>` out of a `<p>`. The
/// display name comes from the `alt` of the image inside the attachment.
/// Attachments of any other content type are left untouched, as are mention
/// attachments without a named image. Markup without mentions is returned
/// exactly as given.
pub fn resolve_mentions(content: &str) -> Cow<'_, str> {
    let attachment_re = Regex::new(r"(?is)<bc-attachment\b([^>]*)>(.*?)</bc-attachment\s*>").unwrap();
    let mention_re = Regex::new(&format!(
        r#"(?i)\bcontent-type\s*=\s*["']{}["']"#,
        regex::escape(MENTION_CONTENT_TYPE)
    ))
    .unwrap();

    attachment_re.replace_all(content, |caps: &Captures| {
        if !mention_re.is_match(&caps[1]) {
            return caps[0].to_string();
        }

        match mention_name(&caps[2]) {
            Some(name) => mention_tag(&name),
            None => caps[0].to_string(),
        }
    })
}

/// Display name of a mention: the first image `alt` inside the attachment
fn mention_name(inner: &str) -> Option<String> {
    let fragment = Html::parse_fragment(inner);
    let image_selector = Selector::parse("img[alt]").expect("image selector is valid");

    fragment
        .select(&image_selector)
        .find_map(|img| img.value().attr("alt"))
        .map(String::from)
}

/// Bold `@name` element standing in for a mention
fn mention_tag(name: &str) -> String {
    format!("<strong>@{}</strong>", html_escape::encode_text(name))
}

/// Convert HTML to readable plain text
///
/// Produces Markdown-flavoured text: paragraphs stay separated, links are
/// rendered inline and emphasis becomes `**bold**`.
pub fn to_plain_text(html: &str) -> String {
    html2md::parse_html(html).trim().to_string()
}

/// Resolve mentions, then convert to plain text
pub fn render_rich_text(content: &str) -> String {
    to_plain_text(&resolve_mentions(content))
}

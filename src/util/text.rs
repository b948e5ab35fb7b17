// src/util/text.rs
use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::LazyLock;

static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?(p|div|br|li|h[1-6])[^>]*>").expect("block tag pattern is valid"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Plain text of an HTML note description.
///
/// This function:
/// 1. Turns block-level tags into line breaks
/// 2. Removes all remaining tags
/// 3. Decodes HTML entities (e.g., &amp; → &, &lt;b&gt; → <b> kept as text)
/// 4. Collapses whitespace into single spaces
///
/// # Examples
///
/// ```
/// use pokenotes::util::text::strip_html;
///
/// let html = "<p>Catch <b>Mew</b></p><p>under the truck</p>";
/// assert_eq!(strip_html(html), "Catch Mew under the truck");
/// ```
pub fn strip_html(html: &str) -> String {
    let with_breaks = BLOCK_RE.replace_all(html, "\n");
    let no_tags = TAG_RE.replace_all(&with_breaks, "");
    let decoded = decode_html_entities(&no_tags);

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// At most `max_chars` characters of plain text, with `…` when cut
pub fn preview(html: &str, max_chars: usize) -> String {
    let text = strip_html(html);
    if text.chars().count() <= max_chars {
        return text;
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

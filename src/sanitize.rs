use std::sync::LazyLock;

use regex::Regex;

/// Opening-tag presence check for the editorial HTML subset. Content that
/// matches is trusted as already-sanitized markup coming from the newsroom
/// back office and passed through verbatim.
///
/// This is a trust boundary, not a full sanitizer: an allow-listed tag can
/// still carry arbitrary attributes. Links are therefore never followed
/// in-place; they are surfaced as explicit actions and only ever opened
/// through the system browser after an http(s) scheme check (see
/// `content_view::open_external`).
static EDITORIAL_MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(p|br|ul|ol|li|strong|em|b|i|u|a|blockquote|hr|code)\b.*?>")
        .expect("Invalid regex pattern")
});

/// `&lt;tag&gt;` sequences left over after escaping, re-presented as inline
/// code so pseudo-tags in plain text stay readable.
static ESCAPED_PSEUDO_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&lt;([a-z][a-z0-9-]*)&gt;").expect("Invalid regex pattern")
});

static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("Invalid regex pattern"));

pub fn is_editorial_markup(raw: &str) -> bool {
    EDITORIAL_MARKUP_RE.is_match(raw)
}

/// Block mode, used for article bodies. Allow-listed markup passes through;
/// anything else is escaped, then split on blank lines into `<p>` paragraphs
/// with single newlines becoming `<br>`.
pub fn format_block(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if is_editorial_markup(raw) {
        return raw.to_string();
    }

    let safe = escape(raw);
    PARAGRAPH_BREAK_RE
        .split(&safe)
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p>{}</p>", p.trim().replace('\n', "<br>")))
        .collect()
}

/// Inline mode, used for excerpts rendered inside inline containers: same
/// allow-list check, but escaped text only gets `<br>` conversion, never a
/// `<p>` wrapper (a block element would break the surrounding layout).
pub fn format_inline(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if is_editorial_markup(raw) {
        return raw.to_string();
    }
    escape(raw).replace('\n', "<br>")
}

fn escape(raw: &str) -> String {
    let safe = html_escape::encode_text(&raw.replace("\r\n", "\n")).into_owned();
    ESCAPED_PSEUDO_TAG_RE
        .replace_all(&safe, "<code>&lt;$1&gt;</code>")
        .into_owned()
}

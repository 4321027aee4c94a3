//! Plain-text previews of free-text CRM fields.
//!
//! Comments typed in the CRM are stored as HTML. Views never forward that
//! markup: tags are stripped and the remaining text is shortened.

/// Default number of characters kept in a comment preview.
pub const COMMENT_PREVIEW_LEN: usize = 90;

/// Placeholder shown when a record carries no comment.
pub const NO_COMMENT: &str = "No comment";

const ELLIPSIS: &str = "...";

/// Strip HTML tags and collapse whitespace runs into single spaces.
///
/// A `<` only opens a tag when followed by a letter, `/` or `!`, so text such
/// as `< 500` is kept. A tag left open at the end of input is kept as text.
pub fn strip_markup(input: &str) -> String {
    let mut text = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut pending = String::new();
    let mut in_tag = false;
    while let Some(ch) = chars.next() {
        if in_tag {
            pending.push(ch);
            if ch == '>' {
                in_tag = false;
                pending.clear();
                text.push(' ');
            }
            continue;
        }
        let opens_tag = ch == '<'
            && chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphabetic() || *next == '/' || *next == '!');
        if opens_tag {
            in_tag = true;
            pending.push(ch);
        } else {
            text.push(ch);
        }
    }
    text.push_str(&pending);

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `limit` characters, appending `...` when something was cut.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Plain-text preview of an optional HTML comment.
pub fn comment_preview(comment: Option<&str>, limit: usize) -> String {
    let text = comment.map(strip_markup).unwrap_or_default();
    if text.is_empty() {
        return NO_COMMENT.to_string();
    }
    truncate_chars(&text, limit)
}

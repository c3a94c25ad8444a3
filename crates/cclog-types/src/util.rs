/// Truncate a string to at most `max` characters, appending "..." when cut
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect::<String>() + "..."
    }
}

/// Collapse newlines and runs of whitespace so texts can be compared loosely
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Return the text between the first `<tag>` and the following `</tag>`
pub fn extract_tag<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let start = text.find(&open)? + open.len();
    let end = text[start..].find(&close)?;
    Some(&text[start..start + end])
}

/// Rough token estimate for text without usage metadata (~4 chars per token)
pub fn estimate_tokens(char_count: usize) -> u64 {
    char_count.div_ceil(4) as u64
}

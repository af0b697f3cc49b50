/// Maximum length, in characters, of a normalized free-text search.
pub const TEXT_QUERY_MAX_LENGTH: usize = 100;

/// Wildcard token standing for any run of characters.
pub const WILDCARD: char = '%';

/// Wildcard token standing for exactly one character.
pub const SINGLE_WILDCARD: char = '_';

/// Escape character that makes the next pattern character literal.
pub const LIKE_ESCAPE: char = '\\';

/// Converts a raw free-text search into a wildcard pattern.
///
/// `None` passes through and means "no text filter". Whitespace-only input
/// becomes the empty pattern, which also applies no filter. Otherwise words
/// are lower-cased, joined by wildcards and wrapped in wildcards:
/// `"  eS   ing"` becomes `"%es%ing%"`. Wildcard and escape characters typed
/// by the user are escaped with [`LIKE_ESCAPE`] so they match literally.
#[must_use]
pub fn normalize_text_query(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let lowered = collapsed.to_lowercase();
    let truncated = truncate_at_word_boundary(lowered.as_str(), TEXT_QUERY_MAX_LENGTH);

    if truncated.is_empty() {
        return Some(String::new());
    }

    let mut pattern = String::with_capacity(truncated.len() + 2);
    pattern.push(WILDCARD);
    for character in truncated.chars() {
        match character {
            ' ' => pattern.push(WILDCARD),
            WILDCARD | SINGLE_WILDCARD | LIKE_ESCAPE => {
                pattern.push(LIKE_ESCAPE);
                pattern.push(character);
            }
            _ => pattern.push(character),
        }
    }
    pattern.push(WILDCARD);

    Some(pattern)
}

/// Cuts single-spaced text to at most `max_chars` characters without keeping
/// a partial word.
///
/// A single word longer than the limit has no boundary to cut at and is
/// hard-cut at the limit instead.
fn truncate_at_word_boundary(text: &str, max_chars: usize) -> &str {
    let Some((cut, next)) = text.char_indices().nth(max_chars) else {
        return text;
    };

    let head = &text[..cut];
    if next == ' ' {
        return head.trim_end();
    }

    match head.rfind(' ') {
        Some(boundary) => head[..boundary].trim_end(),
        None => head,
    }
}

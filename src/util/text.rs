use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Matches a single HTML tag: `<` followed by anything that is not another
/// `<`, lazily, up to the next `>`. An unterminated `<` never matches and is
/// left in the output untouched.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<[^<]+?>").expect("tag pattern is valid"));

/// Strips HTML tags from feed summary text.
///
/// This is a greedy tag-removal pass, not an HTML parser: entities are not
/// decoded, and malformed markup beyond simple bracket matching is passed
/// through as-is. Returns `Cow::Borrowed` when the input contains no tags.
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(s, "")
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to fit within `max_width` terminal columns, appending
/// "..." when text was cut off.
///
/// Width is measured in display columns (CJK and emoji count as 2), so the
/// result never overflows the target even for non-ASCII titles. For widths
/// of 3 columns or less there is no room for the ellipsis and the result is
/// simply as many characters as fit.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if UnicodeWidthStr::width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    // Below 4 columns there is no room for "char + ellipsis"; return as
    // many characters as fit, unadorned.
    let target = if max_width <= ELLIPSIS_WIDTH {
        max_width
    } else {
        max_width - ELLIPSIS_WIDTH
    };

    let mut used = 0;
    let mut cut = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > target {
            break;
        }
        used += w;
        cut = idx + c.len_utf8();
    }

    if max_width <= ELLIPSIS_WIDTH {
        Cow::Owned(s[..cut].to_string())
    } else {
        Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS))
    }
}

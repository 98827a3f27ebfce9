/// Append `key=value&` to a query string when `value` is non-empty.
///
/// The value is percent-encoded; the key is written as-is. Absent or empty
/// values leave the query untouched so optional parameters simply drop out.
pub fn try_append_query_string(query: &mut String, key: &str, value: Option<&str>) {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return;
    };
    query.push_str(key);
    query.push('=');
    query.push_str(&encode_uri_component(value));
    query.push('&');
}

/// Percent-encode `value` like a browser's `encodeURIComponent`.
///
/// Same as [`urlencoding::encode`] except that `!'()*` stay literal.
#[must_use]
pub fn encode_uri_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Remove a single trailing `&` left by [`try_append_query_string`].
pub fn strip_trailing_ampersand(query: &mut String) {
    if query.ends_with('&') {
        query.pop();
    }
}

/// Escape characters that would let a JSON literal break out of an inline
/// `<script>` block.
#[must_use]
pub fn escape_unsafe_chars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("\\u003C"),
            '>' => out.push_str("\\u003E"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}

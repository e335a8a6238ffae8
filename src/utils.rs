/// The literal record separator of the delimited format.
pub(crate) const RECORD_SEPARATOR: &str = "\n---\n";

/// get the newline delimiter (e.g. CRLF for Windows, LF for Linux). of multi-line text.
pub(crate) fn newline_delimiter_of(text: &str) -> &'static str {
    // find the first '\n', then check whether the character before it is '\r'
    if text
        .find('\n')
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| text.get(i..i + 1))
        .is_some_and(|x| x == "\r")
    {
        "\r\n"
    } else {
        "\n"
    }
}

/// Whether the text contains a `---` record separator line.
pub(crate) fn has_separator_line(text: &str) -> bool {
    text.lines().any(|line| line.trim_end() == "---")
}

/// First whitespace-delimited token of `s`, if any.
pub(crate) fn leading_token(s: &str) -> Option<&str> {
    s.split_whitespace().next()
}

/// Parse a year token as an integer, `None` for anything non-numeric.
pub(crate) fn parse_year(token: &str) -> Option<i32> {
    token.trim().parse::<i32>().ok()
}

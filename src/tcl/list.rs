use crate::errors::TgnError;

/// Returns true for the characters Tcl treats as list element separators.
pub(crate) const fn is_list_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{b}' | '\u{c}')
}

/// Performs a single backslash substitution. `chars[start]` must be the backslash; returns the
/// substituted text and the number of chars consumed (backslash included).
pub(crate) fn backslash_subst(
    chars: &[char],
    start: usize,
) -> (String, usize) {
    let Some(&next) = chars.get(start + 1) else {
        return (String::from("\\"), 1);
    };

    let simple = match next {
        'a' => Some('\u{7}'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{b}'),
        _ => None,
    };

    if let Some(c) = simple {
        return (c.to_string(), 2);
    }

    match next {
        '\n' => {
            // backslash-newline and the whitespace after it collapse into one space
            let mut consumed = 2;

            while chars
                .get(start + consumed)
                .is_some_and(|c| *c == ' ' || *c == '\t')
            {
                consumed += 1;
            }

            (String::from(" "), consumed)
        }
        'x' => hex_subst(chars, start, 2, 'x'),
        'u' => hex_subst(chars, start, 4, 'u'),
        '0'..='7' => {
            let mut value: u32 = 0;
            let mut consumed = 1;

            while consumed <= 3 {
                match chars.get(start + consumed).and_then(|c| c.to_digit(8)) {
                    Some(digit) => value = value * 8 + digit,
                    None => break,
                }

                consumed += 1;
            }

            let c = char::from_u32(value & 0xff).unwrap_or('\u{0}');

            (c.to_string(), consumed)
        }
        other => (other.to_string(), 2),
    }
}

fn hex_subst(
    chars: &[char],
    start: usize,
    max_digits: usize,
    marker: char,
) -> (String, usize) {
    let mut value: u32 = 0;
    let mut digits = 0;

    while digits < max_digits {
        match chars.get(start + 2 + digits).and_then(|c| c.to_digit(16)) {
            Some(digit) => value = value * 16 + digit,
            None => break,
        }

        digits += 1;
    }

    if digits == 0 {
        return (marker.to_string(), 2);
    }

    let c = char::from_u32(value).unwrap_or('\u{fffd}');

    (c.to_string(), 2 + digits)
}

/// Scans a brace delimited group. `chars[start]` must be the opening brace; returns the (literal)
/// content between the braces and the index just past the closing brace.
pub(crate) fn scan_braced(
    chars: &[char],
    start: usize,
) -> Result<(String, usize), TgnError> {
    let mut depth = 1;
    let mut i = start + 1;

    while let Some(&c) = chars.get(i) {
        match c {
            '\\' => {
                i += 2;

                continue;
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;

                if depth == 0 {
                    let content: String = chars.get(start + 1..i).unwrap_or_default().iter().collect();

                    return Ok((content, i + 1));
                }
            }
            _ => {}
        }

        i += 1;
    }

    Err(TgnError::Tcl(String::from("unmatched open brace in list")))
}

/// Splits a Tcl list string into its elements.
///
/// # Errors
///
/// Returns `TgnError::Tcl` for unbalanced braces or quotes, or for a closing brace/quote that is
/// not followed by whitespace.
pub fn parse_list(list: &str) -> Result<Vec<String>, TgnError> {
    let chars: Vec<char> = list.chars().collect();
    let mut elements = vec![];
    let mut i = 0;

    loop {
        while chars.get(i).is_some_and(|c| is_list_space(*c)) {
            i += 1;
        }

        let Some(&first) = chars.get(i) else {
            break;
        };

        match first {
            '{' => {
                let (element, end) = scan_braced(&chars, i)?;

                if let Some(c) = chars.get(end).filter(|c| !is_list_space(**c)) {
                    return Err(TgnError::Tcl(format!(
                        "list element in braces followed by \"{c}\" instead of space"
                    )));
                }

                elements.push(element);
                i = end;
            }
            '"' => {
                let mut element = String::new();

                i += 1;

                loop {
                    match chars.get(i) {
                        None => {
                            return Err(TgnError::Tcl(String::from(
                                "unmatched open quote in list",
                            )));
                        }
                        Some('"') => {
                            i += 1;

                            break;
                        }
                        Some('\\') => {
                            let (sub, consumed) = backslash_subst(&chars, i);

                            element.push_str(&sub);
                            i += consumed;
                        }
                        Some(c) => {
                            element.push(*c);
                            i += 1;
                        }
                    }
                }

                if let Some(c) = chars.get(i).filter(|c| !is_list_space(**c)) {
                    return Err(TgnError::Tcl(format!(
                        "list element in quotes followed by \"{c}\" instead of space"
                    )));
                }

                elements.push(element);
            }
            _ => {
                let mut element = String::new();

                while let Some(&c) = chars.get(i) {
                    if is_list_space(c) {
                        break;
                    }

                    if c == '\\' {
                        let (sub, consumed) = backslash_subst(&chars, i);

                        element.push_str(&sub);
                        i += consumed;

                        continue;
                    }

                    element.push(c);
                    i += 1;
                }

                elements.push(element);
            }
        }
    }

    Ok(elements)
}

fn needs_quoting(element: &str) -> bool {
    element.starts_with('#')
        || element.chars().any(|c| {
            is_list_space(c) || matches!(c, '{' | '}' | '[' | ']' | '$' | ';' | '"' | '\\')
        })
}

fn can_brace(element: &str) -> bool {
    let chars: Vec<char> = element.chars().collect();
    let mut depth: i32 = 0;
    let mut i = 0;

    while let Some(&c) = chars.get(i) {
        match c {
            '\\' => {
                if i + 1 >= chars.len() || chars.get(i + 1) == Some(&'\n') {
                    return false;
                }

                i += 2;

                continue;
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;

                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }

        i += 1;
    }

    depth == 0
}

/// Returns `element` quoted so that it is parsed back as exactly one list element.
#[must_use]
pub fn quote_element(element: &str) -> String {
    if element.is_empty() {
        return String::from("{}");
    }

    if !needs_quoting(element) {
        return element.to_owned();
    }

    if can_brace(element) {
        return format!("{{{element}}}");
    }

    let mut quoted = String::with_capacity(element.len() * 2);

    for (idx, c) in element.chars().enumerate() {
        match c {
            '{' | '}' | '[' | ']' | '$' | ';' | '"' | '\\' | ' ' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '#' if idx == 0 => quoted.push_str("\\#"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\u{b}' => quoted.push_str("\\v"),
            '\u{c}' => quoted.push_str("\\f"),
            _ => quoted.push(c),
        }
    }

    quoted
}

/// Builds a well formed Tcl list out of `elements`.
pub fn merge_list<S: AsRef<str>>(elements: &[S]) -> String {
    elements
        .iter()
        .map(|e| quote_element(e.as_ref()))
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_bare_and_braced() {
        assert_eq!(parse_list("a {b b} c").unwrap(), vec!["a", "b b", "c"]);
        assert_eq!(parse_list("  {}  ").unwrap(), vec![""]);
        assert_eq!(parse_list("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_parse_nested_braces_are_literal() {
        assert_eq!(parse_list("{{a} {b b}}").unwrap(), vec!["{a} {b b}"]);
        assert_eq!(parse_list("{a\\}b}").unwrap(), vec!["a\\}b"]);
    }

    #[test]
    fn test_parse_quotes_and_backslashes() {
        assert_eq!(parse_list("\"a b\" c\\ d").unwrap(), vec!["a b", "c d"]);
        assert_eq!(parse_list("a\\tb").unwrap(), vec!["a\tb"]);
        assert_eq!(parse_list("\\x41\\u00e9").unwrap(), vec!["A\u{e9}"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_list("{a b").is_err());
        assert!(parse_list("\"a b").is_err());
        assert!(parse_list("{a}b").is_err());
    }

    #[test]
    fn test_quote_element() {
        assert_eq!(quote_element("abc"), "abc");
        assert_eq!(quote_element(""), "{}");
        assert_eq!(quote_element("b b"), "{b b}");
        assert_eq!(quote_element("#x"), "{#x}");
        assert_eq!(quote_element("a}b"), "a\\}b");
        assert_eq!(quote_element("a\\"), "a\\\\");
    }

    #[test]
    fn test_quote_then_parse_keeps_element() {
        for element in ["a}b", "x{", "a\\", "tab\there", "$var", "[cmd]", "q\"uote", "#hash"] {
            assert_eq!(parse_list(&quote_element(element)).unwrap(), vec![element]);
        }
    }

    #[test]
    fn test_merge_list() {
        assert_eq!(merge_list(&["a", "b b", ""]), "a {b b} {}");
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Split one CSV line into raw, untrimmed fields.
///
/// Deliberately simpler than RFC 4180: a `"` toggles quoting unless the
/// character before it is a backslash, in which case the quote is kept
/// literally (the backslash stays too). Doubled quotes are not an escape.
/// The trailing field is always emitted, so `a,` yields two fields.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut previous: Option<char> = None;

    for ch in line.chars() {
        if ch == '"' && previous != Some('\\') {
            in_quotes = !in_quotes;
        } else if ch == ',' && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
        previous = Some(ch);
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(parse_line("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_line(" a , b "), vec![" a ", " b "]);
    }

    #[test]
    fn test_quoted_comma_stays_in_field() {
        assert_eq!(
            parse_line(r#"1,"Smith, John",NY"#),
            vec!["1", "Smith, John", "NY"]
        );
    }

    #[test]
    fn test_backslash_quote_is_literal() {
        assert_eq!(parse_line(r#"say \"hi\",x"#), vec![r#"say \"hi\""#, "x"]);
    }

    #[test]
    fn test_doubled_quotes_toggle_twice() {
        assert_eq!(parse_line(r#""a""b",c"#), vec!["ab", "c"]);
    }

    #[test]
    fn test_trailing_and_empty_fields() {
        assert_eq!(parse_line("a,"), vec!["a", ""]);
        assert_eq!(parse_line(""), vec![""]);
        assert_eq!(parse_line(",,"), vec!["", "", ""]);
    }
}

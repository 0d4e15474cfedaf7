//! Line tokenizer for the comma-delimited export format.

use crate::schema::{DELIMITER, QUOTE};

/// Split one line into trimmed field strings. A quote toggles the in-quotes
/// state and is stripped from the output; the delimiter is literal data while
/// inside quotes. Adjacent quotes are two independent toggles, and unbalanced
/// quotes simply end the line in whatever state was reached.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == QUOTE {
            in_quotes = !in_quotes;
        } else if ch == DELIMITER && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }

    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(tokenize_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_field_keeps_delimiter() {
        assert_eq!(tokenize_line("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_fields_are_trimmed() {
        assert_eq!(tokenize_line(" a , b ,  c  "), vec!["a", "b", "c"]);
        assert_eq!(tokenize_line("\" spaced \",x"), vec!["spaced", "x"]);
    }

    #[test]
    fn test_empty_fields_survive() {
        assert_eq!(tokenize_line(",,x"), vec!["", "", "x"]);
        assert_eq!(tokenize_line("x,,"), vec!["x", "", ""]);
    }

    #[test]
    fn test_adjacent_quotes_are_independent_toggles() {
        // "" re-enters quoted state immediately; both quotes are stripped.
        assert_eq!(tokenize_line("\"a\"\"b\",c"), vec!["ab", "c"]);
    }

    #[test]
    fn test_unbalanced_quote_consumes_rest_of_line() {
        assert_eq!(tokenize_line("a,\"b,c"), vec!["a", "b,c"]);
    }
}

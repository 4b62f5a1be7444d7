//! Line lexer for the input file.
//!
//! Each meaningful line becomes one `key : value` entry. Comments start at `#`,
//! tabs count as spaces, quotes are dropped and only the first `:` splits.

use crate::{InputError, InputResult};

/// One `key : value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Lower-cased, trimmed.
    pub key: String,
    /// Trimmed, original case.
    pub value: String,
    /// 1-based line number in the source text.
    pub line: usize,
}

impl Entry {
    pub fn is_mark(&self) -> bool {
        self.key == "mark"
    }
}

pub fn lex(text: &str) -> InputResult<Vec<Entry>> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let content = content.replace('\t', " ");
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        let syntax = |reason| InputError::Syntax {
            line,
            text: raw.trim_end().to_string(),
            reason,
        };

        if !content.contains(':') {
            return Err(syntax("expected 'key : value'"));
        }
        let unquoted: String = content.chars().filter(|c| !matches!(c, '"' | '\'')).collect();
        let (key, value) = unquoted
            .split_once(':')
            .ok_or_else(|| syntax("expected 'key : value'"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(syntax("missing key"));
        }

        entries.push(Entry {
            key: key.to_lowercase(),
            value: value.trim().to_string(),
            line,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_blank_lines_and_tabs() {
        let text = "# header\n\n\ttype\t:  Purity   # trailing\n   \n";
        let entries = lex(text).unwrap();
        assert_eq!(
            entries,
            vec![Entry {
                key: "type".into(),
                value: "Purity".into(),
                line: 3
            }]
        );
    }

    #[test]
    fn quotes_are_removed_and_first_colon_splits() {
        let entries = lex("RATIO : \"1:2\"\n'S' : 'C3H8O3'").unwrap();
        assert_eq!(entries[0].key, "ratio");
        assert_eq!(entries[0].value, "1:2");
        assert_eq!(entries[1].key, "s");
        assert_eq!(entries[1].value, "C3H8O3");
    }

    #[test]
    fn line_without_colon_reports_line_number() {
        let err = lex("type : p\n\njust words\n").unwrap_err();
        match err {
            InputError::Syntax { line, text, .. } => {
                assert_eq!(line, 3);
                assert_eq!(text, "just words");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn colon_only_inside_comment_is_an_error() {
        assert!(matches!(
            lex("name # note: here"),
            Err(InputError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn blank_key_is_an_error() {
        assert!(matches!(
            lex("  : 3"),
            Err(InputError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            lex("\"\" : 3"),
            Err(InputError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn empty_value_is_kept() {
        let entries = lex("-CH3 :").unwrap();
        assert_eq!(entries[0].key, "-ch3");
        assert_eq!(entries[0].value, "");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lexing_never_panics(text in "[ -~\t\n]{0,200}") {
            let _ = lex(&text);
        }

        #[test]
        fn keys_are_lowercase_and_trimmed(key in "[A-Za-z][A-Za-z0-9<>=@-]{0,8}", value in "[0-9]{0,3}") {
            let entries = lex(&format!("  {key}  :  {value}  ")).unwrap();
            prop_assert_eq!(entries.len(), 1);
            prop_assert_eq!(&entries[0].key, &key.to_lowercase());
            prop_assert_eq!(&entries[0].value, &value);
        }
    }
}

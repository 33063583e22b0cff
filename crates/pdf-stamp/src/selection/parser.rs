//! Page selection parser
//!
//! Grammar: `term (',' term)*` with
//! `term ::= INTEGER | INTEGER '-' INTEGER | [INTEGER] 'n' [('+'|'-') INTEGER]`.
//! Whitespace around a term is ignored; whitespace inside one is not.

use super::{ParseError, SelectorTerm};

/// Parse a selection expression into its terms, in source order.
///
/// Fails on the first term that does not parse.
pub fn parse(selection: &str) -> Result<Vec<SelectorTerm>, ParseError> {
    selection
        .split(',')
        .enumerate()
        .map(|(i, raw)| parse_term(raw.trim(), i + 1))
        .collect()
}

fn parse_term(term: &str, position: usize) -> Result<SelectorTerm, ParseError> {
    if term.is_empty() {
        return Err(ParseError::EmptyTerm { position });
    }

    let malformed = || ParseError::MalformedTerm {
        position,
        term: term.to_string(),
    };
    let non_positive = || ParseError::NonPositiveIndex {
        position,
        term: term.to_string(),
    };

    if let Some((coefficient, offset)) = term.split_once('n') {
        let coefficient = if coefficient.is_empty() {
            1
        } else {
            parse_digits::<i64>(coefficient).ok_or_else(malformed)?
        };
        let offset = parse_offset(offset).ok_or_else(malformed)?;
        return Ok(SelectorTerm::Progression {
            coefficient,
            offset,
        });
    }

    if let Some((lo, hi)) = term.split_once('-') {
        let lo = parse_digits::<u32>(lo).ok_or_else(malformed)?;
        let hi = parse_digits::<u32>(hi).ok_or_else(malformed)?;
        if lo == 0 || hi == 0 {
            return Err(non_positive());
        }
        return Ok(SelectorTerm::Range { lo, hi });
    }

    match parse_digits::<u32>(term).ok_or_else(malformed)? {
        0 => Err(non_positive()),
        page => Ok(SelectorTerm::Literal(page)),
    }
}

/// Parse a non-empty run of ASCII digits. Signs and overflow are rejected.
fn parse_digits<T: std::str::FromStr>(digits: &str) -> Option<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse the `[('+'|'-') INTEGER]` tail of a progression
fn parse_offset(tail: &str) -> Option<i64> {
    if tail.is_empty() {
        return Some(0);
    }
    if let Some(digits) = tail.strip_prefix('+') {
        return parse_digits::<i64>(digits);
    }
    if let Some(digits) = tail.strip_prefix('-') {
        return parse_digits::<i64>(digits).map(|v| -v);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_keep_source_order() {
        assert_eq!(
            parse("1,3,2").unwrap(),
            vec![
                SelectorTerm::Literal(1),
                SelectorTerm::Literal(3),
                SelectorTerm::Literal(2)
            ]
        );
    }

    #[test]
    fn test_ranges_and_whitespace() {
        assert_eq!(
            parse(" 4-8 , 2,10-12 ").unwrap(),
            vec![
                SelectorTerm::Range { lo: 4, hi: 8 },
                SelectorTerm::Literal(2),
                SelectorTerm::Range { lo: 10, hi: 12 },
            ]
        );
        assert_eq!(
            parse("9-3").unwrap(),
            vec![SelectorTerm::Range { lo: 9, hi: 3 }]
        );
    }

    #[test]
    fn test_progressions() {
        assert_eq!(
            parse("2n-1").unwrap(),
            vec![SelectorTerm::Progression {
                coefficient: 2,
                offset: -1
            }]
        );
        assert_eq!(
            parse("3n+1").unwrap(),
            vec![SelectorTerm::Progression {
                coefficient: 3,
                offset: 1
            }]
        );
        assert_eq!(
            parse("n").unwrap(),
            vec![SelectorTerm::Progression {
                coefficient: 1,
                offset: 0
            }]
        );
        assert_eq!(
            parse("0n+4").unwrap(),
            vec![SelectorTerm::Progression {
                coefficient: 0,
                offset: 4
            }]
        );
    }

    #[test]
    fn test_empty_terms() {
        assert_eq!(parse(",3"), Err(ParseError::EmptyTerm { position: 1 }));
        assert_eq!(parse("1,,3"), Err(ParseError::EmptyTerm { position: 2 }));
        assert_eq!(parse("1,"), Err(ParseError::EmptyTerm { position: 2 }));
        assert_eq!(parse(""), Err(ParseError::EmptyTerm { position: 1 }));
    }

    #[test]
    fn test_zero_is_non_positive() {
        assert!(matches!(
            parse("0"),
            Err(ParseError::NonPositiveIndex { position: 1, .. })
        ));
        assert!(matches!(
            parse("2,0-4"),
            Err(ParseError::NonPositiveIndex { position: 2, .. })
        ));
        assert!(matches!(
            parse("3-0"),
            Err(ParseError::NonPositiveIndex { .. })
        ));
    }

    #[test]
    fn test_malformed_terms() {
        for bad in [
            "abc", "-3", "4-", "1-2-3", "+5", "2n*1", "n+", "2 n", "4 - 8", "1.5", "N", "nn",
            "99999999999",
        ] {
            match parse(bad) {
                Err(ParseError::MalformedTerm { position, term }) => {
                    assert_eq!(position, 1, "input {bad:?}");
                    assert_eq!(term, bad.trim());
                }
                other => panic!("expected MalformedTerm for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_first_failure_wins() {
        assert!(matches!(
            parse("1,x,0"),
            Err(ParseError::MalformedTerm { position: 2, .. })
        ));
    }

    #[test]
    fn test_display_is_canonical() {
        let terms = parse("1,4-8,2n-1,n,3n+2,0n+5").unwrap();
        let rendered: Vec<String> = terms.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["1", "4-8", "2n-1", "n", "3n+2", "0n+5"]);
    }
}

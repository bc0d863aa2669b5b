use std::io::Cursor;

use sgrep::{filter_lines, parse_regex, SyntaxError};

fn grep(pattern: &str, input: &[u8]) -> (Vec<u8>, usize) {
    let regex = parse_regex(pattern).expect(&format!("Failed to parse pattern: {}", pattern));
    let mut output = Vec::new();
    let matched = filter_lines(&regex, Cursor::new(input), &mut output).expect("in-memory io");
    (output, matched)
}

#[cfg(test)]
mod line_filter_tests {
    use super::*;

    #[test]
    fn test_prints_matching_lines_in_order() {
        let (output, matched) = grep("o", b"one\ntwo\nthree\nfour\n");
        assert_eq!(output, b"one\ntwo\nfour\n");
        assert_eq!(matched, 3);
    }

    #[test]
    fn test_no_matches_is_silent() {
        let (output, matched) = grep("zzz", b"one\ntwo\n");
        assert!(output.is_empty());
        assert_eq!(matched, 0);
    }

    #[test]
    fn test_last_line_without_newline() {
        let (output, _) = grep("b", b"a\nb");
        assert_eq!(output, b"b\n");
    }

    #[test]
    fn test_newline_is_stripped_before_matching() {
        let (output, _) = grep("^abc$", b"abc\nxabcx\n");
        assert_eq!(output, b"abc\n");
    }

    #[test]
    fn test_empty_lines() {
        let (output, matched) = grep("^a*$", b"a\n\nb\n\n");
        assert_eq!(output, b"a\n\n\n");
        assert_eq!(matched, 3);
    }

    #[test]
    fn test_caret_dollar_wants_leading_dollar() {
        let (output, matched) = grep("^$", b"$1\n\nx$\n");
        assert_eq!(output, b"$1\n");
        assert_eq!(matched, 1);
    }

    #[test]
    fn test_carriage_return_is_data() {
        let (output, _) = grep("a$", b"a\r\na\n");
        assert_eq!(output, b"a\n");
    }

    #[test]
    fn test_invalid_utf8_lines() {
        let (output, _) = grep("^.\\xff", b"\x80xff\n\x80\xff\nok\n");
        assert_eq!(output, b"\x80xff\n");
    }

    #[test]
    fn test_raw_byte_pattern() {
        let regex = parse_regex(b"^[\x80-\xff]+$").unwrap();
        let mut output = Vec::new();
        filter_lines(&regex, Cursor::new(&b"\x80\x90\nabc\n\xff\n"[..]), &mut output).unwrap();
        assert_eq!(output, b"\x80\x90\n\xff\n");
    }

    #[test]
    fn test_same_regex_reused() {
        let regex = parse_regex("a*b").unwrap();
        for _ in 0..3 {
            let mut output = Vec::new();
            filter_lines(&regex, Cursor::new(&b"aaab\nb\naaa\n"[..]), &mut output).unwrap();
            assert_eq!(output, b"aaab\nb\n");
        }
    }
}

#[cfg(test)]
mod syntax_error_tests {
    use super::*;

    #[test]
    fn test_unclosed_group_reports_expected_byte() {
        let err = parse_regex("a(b").unwrap_err();
        assert!(matches!(err, SyntaxError::Expected { expected: b')', offset: 3, .. }));
        assert!(err.to_string().contains("expected ')'"));
    }

    #[test]
    fn test_unclosed_class() {
        let err = parse_regex("[a-z").unwrap_err();
        assert!(matches!(err, SyntaxError::Expected { expected: b']', offset: 4, .. }));
    }

    #[test]
    fn test_message_names_actual_byte() {
        let err = parse_regex("(a$)").unwrap_err();
        assert_eq!(err.to_string(), "expected ')' and got '$' at offset 2");
    }

    #[test]
    fn test_from_str() {
        let regex: sgrep::Regex = "^ab+$".parse().unwrap();
        assert!(regex.find_match("abbb"));
        assert_eq!(regex.to_string(), "^ab+$");
        assert!(regex.anchors().start && regex.anchors().end);
        assert!("(".parse::<sgrep::Regex>().is_err());
    }
}

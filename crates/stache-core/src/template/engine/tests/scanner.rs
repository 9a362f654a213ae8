//! Scanner tests

use super::*;
use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

#[test]
fn test_empty_scanner_is_at_end() {
    let scanner = Scanner::new("");
    assert!(scanner.eos());
}

#[test]
fn test_scan_whole_string() {
    let mut scanner = Scanner::new("a b c");
    assert_eq!(scanner.scan(&re("a b c")), scanner.text());
    assert!(scanner.eos());
}

#[test]
fn test_scan_match_at_start() {
    let mut scanner = Scanner::new("a b c");
    assert_eq!(scanner.scan(&re("a")), "a");
    assert_eq!(scanner.pos(), 1);
    assert_eq!(scanner.tail(), " b c");
}

#[test]
fn test_scan_match_later_returns_empty() {
    let mut scanner = Scanner::new("a b c");
    assert_eq!(scanner.scan(&re("b")), "");
    assert_eq!(scanner.pos(), 0);
}

#[test]
fn test_scan_no_match_returns_empty() {
    let mut scanner = Scanner::new("a b c");
    assert_eq!(scanner.scan(&re("z")), "");
    assert_eq!(scanner.pos(), 0);
}

#[test]
fn test_scan_until_match_at_start() {
    let mut scanner = Scanner::new("a b c");
    assert_eq!(scanner.scan_until(&re("a")), "");
    assert_eq!(scanner.pos(), 0);
}

#[test]
fn test_scan_until_match_later() {
    let mut scanner = Scanner::new("a b c");
    assert_eq!(scanner.scan_until(&re("b")), "a ");
    assert_eq!(scanner.pos(), 2);
}

#[test]
fn test_scan_until_no_match_consumes_rest() {
    let mut scanner = Scanner::new("a b c");
    assert_eq!(scanner.scan_until(&re("z")), "a b c");
    assert!(scanner.eos());
}

#[test]
fn test_scan_positions_are_bytes() {
    let mut scanner = Scanner::new("héllo {{x}}");
    assert_eq!(scanner.scan_until(&re(r"\{\{")), "héllo ");
    assert_eq!(scanner.pos(), 7);
}

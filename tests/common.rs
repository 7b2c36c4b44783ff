//! Integration tests for lilith-common crate.

use lilith_common::{Position, Span};

#[test]
fn test_span_merge() {
    let a = Span::new(10, 20);
    let b = Span::new(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged.start, 10);
    assert_eq!(merged.end, 30);
}

#[test]
fn test_span_len() {
    let span = Span::new(5, 15);
    assert_eq!(span.len(), 10);
}

#[test]
fn test_span_is_empty() {
    assert!(Span::new(5, 5).is_empty());
    assert!(Span::point(7).is_empty());
    assert!(!Span::new(5, 10).is_empty());
}

#[test]
fn test_span_range() {
    assert_eq!(Span::new(5, 15).range(), 5..15);
}

#[test]
fn test_span_debug() {
    assert_eq!(format!("{:?}", Span::new(3, 8)), "3..8");
}

#[test]
fn test_position_starts_at_one() {
    assert_eq!(Position::default(), Position::new(1, 1));
    assert_eq!(Position::START.to_string(), "1:1");
}

#[test]
fn test_position_advance() {
    let mut pos = Position::START;
    for ch in "ab".chars() {
        pos.advance(ch);
    }
    assert_eq!(pos, Position::new(1, 3));

    pos.advance('\n');
    assert_eq!(pos, Position::new(2, 1));

    pos.advance('c');
    assert_eq!(pos.to_string(), "2:2");
}

#[test]
fn test_position_ordering() {
    assert!(Position::new(1, 9) < Position::new(2, 1));
    assert!(Position::new(3, 2) > Position::new(3, 1));
}

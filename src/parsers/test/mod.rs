//! Test utilities and parser tests

use super::*;
use nom::Context as NContext;
use nom::{Err, ErrorKind};


pub(super) fn minimal() -> PatternParser {
    PatternParser::new(Grammar::Minimal)
}

pub(super) fn extended() -> PatternParser {
    PatternParser::new(Grammar::Extended)
}

pub(super) fn error_context<I, E>(e: Err<I, E>) -> Option<NContext<I, E>> {
    match e {
        Err::Incomplete(_) => None,
        Err::Error(c) => Some(c),
        Err::Failure(c) => Some(c),
    }
}

pub(super) fn error_list_contains<I, E: PartialEq>(
    es: &Vec<(I, ErrorKind<E>)>,
    needle: ErrorKind<E>,
) -> bool {
    for (_, error) in es {
        if *error == needle {
            return true;
        }
    }
    return false;
}

/// Compile `pattern` and check that it fails with `kind` at `offset`
pub(super) fn assert_rejected(
    pattern: &str,
    grammar: Grammar,
    offset: usize,
    kind: ParseErrorKind,
) {
    crate::test::setup();
    let e = assert_err!(compile(pattern, grammar));
    assert_eq!(e.kind(), &kind, "wrong error kind for {:?}", pattern);
    assert_eq!(e.offset(), offset, "wrong offset for {:?}", pattern);
    assert_eq!(e.pattern(), pattern);
}

#[test]
fn failures_are_hard() {
    let parse = minimal().parse_pattern(CompleteStr("FOO"));
    let parse = assert_err!(parse);
    assert!(match parse {
        Err::Failure(_) => true,
        _ => false,
    });
    let context = error_context(parse);
    assert!(context.is_some());
    let errors = nom::error_to_list(&context.unwrap());
    assert!(error_list_contains(
        &errors,
        ErrorKind::Custom(ParseErrorKind::UnknownKey)
    ));
}

#[test]
fn whitespace() {
    let (rest, ws) = assert_ok!(pattern_whitespace(CompleteStr(" \t a")));
    assert_eq!(rest.0, "a");
    assert_eq!(ws.0, " \t ");

    let (rest, ws) = assert_ok!(pattern_whitespace(CompleteStr("a ")));
    assert_eq!(rest.0, "a ");
    assert_eq!(ws.0, "");
}

#[test]
fn operator_backtracks() {
    let (rest, _) = assert_ok!(operator(CompleteStr(" && x"), "&&"));
    assert_eq!(rest.0, "x");

    let parse = assert_err!(operator(CompleteStr(" || x"), "&&"));
    assert!(match parse {
        Err::Error(_) => true,
        _ => false,
    });
    assert!(operator(CompleteStr("&"), "&&").is_err());
}

#[test]
fn offsets_are_bytes() {
    assert_rejected(
        "FILE=\"é\" && X",
        Grammar::Extended,
        13,
        ParseErrorKind::UnknownKey,
    );
}

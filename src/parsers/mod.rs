//! The pattern compiler. Turns pattern text into a
//! [`Predicate`](../predicate/enum.Predicate.html) tree.

#[macro_use]
mod macros;
mod error_utils;

#[cfg(test)]
mod test;

use crate::predicate::{self, Predicate};
use crate::{Grammar, ParseErrorKind, PatternError};
use nom::types::CompleteStr;
use nom::{Context, Err, ErrorKind, IResult};

/// Patterns are always handed to us in full, so there is never more input to
/// wait for
pub(crate) type Input<'a> = CompleteStr<'a>;

pub(crate) type PResult<'a, O> = IResult<Input<'a>, O, ParseErrorKind>;

/// How many `!` and `(` may enclose a clause. Every compiled tree stays this
/// shallow, so walking it recursively is always safe.
pub(crate) const MAX_NESTING: usize = 64;

/// Compile a complete pattern
pub(crate) fn compile(pattern: &str, grammar: Grammar) -> Result<Predicate, PatternError> {
    match PatternParser::new(grammar).parse_pattern(CompleteStr(pattern)) {
        Ok((_, predicate)) => Ok(predicate),
        Err(e) => {
            let (offset, kind) = error_utils::locate_error(pattern, e);
            debug!(
                "Pattern {:?} rejected at offset {}: {:?}",
                pattern, offset, kind
            );
            Err(PatternError::new(pattern, offset, kind))
        }
    }
}

/// The keys a clause can test
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum ClauseKey {
    Id,
    File,
    Var,
}

/// Parses patterns according to a grammar level
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct PatternParser {
    grammar: Grammar,
}

impl PatternParser {
    pub(crate) fn new(grammar: Grammar) -> Self {
        PatternParser { grammar }
    }

    /// The parser entry point. Consumes the whole input or fails.
    pub(crate) fn parse_pattern<'a>(&self, i: Input<'a>) -> PResult<'a, Predicate> {
        if i.0.is_empty() {
            return fail(i, ParseErrorKind::EmptyPattern);
        }

        match pe_fix!(i, char!('*')) {
            Ok((rest, _)) => {
                return if rest.0.is_empty() {
                    Ok((rest, Predicate::MatchAll))
                } else {
                    fail(rest, ParseErrorKind::TrailingCharacters)
                };
            }
            Err(Err::Error(_)) => {
                debug!("Pattern {:?} is not a match-all, trying clauses", i.0);
            }
            Err(e) => return Err(e),
        }

        let (rest, predicate) = match self.grammar {
            Grammar::Minimal => self.clause(i)?,
            Grammar::Extended => self.expression(i, 0)?,
        };

        if !rest.0.is_empty() {
            return fail(rest, ParseErrorKind::TrailingCharacters);
        }

        Ok((rest, predicate))
    }

    /// `conjunction ( "||" conjunction )*`
    fn expression<'a>(&self, i: Input<'a>, depth: usize) -> PResult<'a, Predicate> {
        self.chain(i, depth, "||", Self::conjunction, predicate::disjunction)
    }

    /// `negation ( "&&" negation )*`
    fn conjunction<'a>(&self, i: Input<'a>, depth: usize) -> PResult<'a, Predicate> {
        self.chain(i, depth, "&&", Self::negation, predicate::conjunction)
    }

    /// Parse one or more operands separated by `op`, handing the operands to
    /// `combine`
    fn chain<'a>(
        &self,
        i: Input<'a>,
        depth: usize,
        op: &'static str,
        operand: fn(&Self, Input<'a>, usize) -> PResult<'a, Predicate>,
        combine: fn(Vec<Predicate>) -> Predicate,
    ) -> PResult<'a, Predicate> {
        let (mut i, first) = operand(self, i, depth)?;
        let mut operands = vec![first];

        loop {
            match operator(i, op) {
                Ok((rest, _)) => {
                    let (rest, next) = operand(self, rest, depth)?;
                    operands.push(next);
                    i = rest;
                }
                // No more operators at this level, leave whatever follows
                // (including any whitespace) to the caller
                Err(Err::Error(_)) => break,
                Err(e) => return Err(e),
            }
        }

        Ok((i, combine(operands)))
    }

    /// `"!" negation | primary`
    fn negation<'a>(&self, i: Input<'a>, depth: usize) -> PResult<'a, Predicate> {
        match pe_fix!(i, char!('!')) {
            Ok((rest, _)) => {
                if depth >= MAX_NESTING {
                    return fail(i, ParseErrorKind::NestingTooDeep);
                }
                let (rest, _) = pattern_whitespace(rest)?;
                let (rest, inner) = self.negation(rest, depth + 1)?;
                Ok((rest, predicate::negation(inner)))
            }
            Err(Err::Error(_)) => self.primary(i, depth),
            Err(e) => Err(e),
        }
    }

    /// `"(" expression ")" | clause`
    fn primary<'a>(&self, i: Input<'a>, depth: usize) -> PResult<'a, Predicate> {
        match pe_fix!(i, char!('(')) {
            Ok((inner, _)) => {
                if depth >= MAX_NESTING {
                    return fail(i, ParseErrorKind::NestingTooDeep);
                }
                let (inner, _) = pattern_whitespace(inner)?;
                let (inner, predicate) = self.expression(inner, depth + 1)?;
                let (inner, _) = pattern_whitespace(inner)?;
                match pe_fix!(inner, char!(')')) {
                    Ok((rest, _)) => Ok((rest, predicate)),
                    // Ran out of input: the `(` itself is the problem
                    Err(Err::Error(_)) if inner.0.is_empty() => {
                        fail(i, ParseErrorKind::UnbalancedParenthesis)
                    }
                    Err(Err::Error(_)) => fail(inner, ParseErrorKind::TrailingCharacters),
                    Err(e) => Err(e),
                }
            }
            Err(Err::Error(_)) => self.clause(i),
            Err(e) => Err(e),
        }
    }

    /// `KEY="value"`
    fn clause<'a>(&self, i: Input<'a>) -> PResult<'a, Predicate> {
        if i.0.is_empty() {
            return fail(i, ParseErrorKind::ExpectedClause);
        }

        let (rest, key) = match clause_key(i) {
            Ok(v) => v,
            Err(Err::Error(_)) => return fail(i, ParseErrorKind::UnknownKey),
            Err(e) => return Err(e),
        };
        if self.grammar == Grammar::Minimal && key != ClauseKey::Id {
            return fail(i, ParseErrorKind::UnknownKey);
        }

        let (rest, _) = match pe_fix!(rest, char!('=')) {
            Ok(v) => v,
            Err(Err::Error(_)) => return fail(rest, ParseErrorKind::ExpectedEquals),
            Err(e) => return Err(e),
        };
        let (rest, value) = quoted_value(rest)?;

        let predicate = match key {
            ClauseKey::Id => match decomposition_id(value.0) {
                Ok(id) => Predicate::IdEquals(id),
                Err(kind) => return fail(value, kind),
            },
            ClauseKey::File => Predicate::FileEquals(value.0.to_owned()),
            ClauseKey::Var => Predicate::VarEquals(value.0.to_owned()),
        };
        debug!("Parsed clause {:?}", predicate);

        Ok((rest, predicate))
    }
}

/// Build a hard failure. These are never backtracked over.
#[inline]
fn fail<'a, O>(i: Input<'a>, kind: ParseErrorKind) -> PResult<'a, O> {
    Err(Err::Failure(Context::Code(i, ErrorKind::Custom(kind))))
}

/// Matches all whitespace allowed between tokens
#[inline]
fn pattern_whitespace<'a>(i: Input<'a>) -> PResult<'a, Input<'a>> {
    pe_fix!(i, take_till!(|c| c != ' ' && c != '\t'))
}

/// A binary operator, with the whitespace around it
fn operator<'a>(i: Input<'a>, op: &'static str) -> PResult<'a, ()> {
    let (i, _) = pattern_whitespace(i)?;
    let (i, _) = pe_fix!(i, tag!(op))?;
    let (i, _) = pattern_whitespace(i)?;
    Ok((i, ()))
}

fn clause_key<'a>(i: Input<'a>) -> PResult<'a, ClauseKey> {
    pe_fix!(
        i,
        alt_complete!(
            tag!("ID")   => { |_| ClauseKey::Id }   |
            tag!("FILE") => { |_| ClauseKey::File } |
            tag!("VAR")  => { |_| ClauseKey::Var }
        )
    )
}

/// A `"`-delimited value. There are no escapes; the value ends at the next
/// `"`.
fn quoted_value<'a>(i: Input<'a>) -> PResult<'a, Input<'a>> {
    let (rest, _) = match pe_fix!(i, char!('"')) {
        Ok(v) => v,
        Err(Err::Error(_)) => return fail(i, ParseErrorKind::ExpectedQuote),
        Err(e) => return Err(e),
    };
    let (rest, value) = pe_fix!(rest, take_till!(|c| c == '"'))?;
    match pe_fix!(rest, char!('"')) {
        Ok((rest, _)) => Ok((rest, value)),
        Err(Err::Error(_)) => fail(i, ParseErrorKind::UnterminatedQuote),
        Err(e) => Err(e),
    }
}

/// A signed, base 10 whole number that fits in an `i32`. Unlike
/// `str::parse`, a leading `+` is not accepted.
fn decomposition_id(value: &str) -> Result<i32, ParseErrorKind> {
    let digits = if value.starts_with('-') {
        &value[1..]
    } else {
        value
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseErrorKind::InvalidId(value.to_owned()));
    }

    value
        .parse::<i32>()
        .map_err(|_| ParseErrorKind::IdOutOfRange(value.to_owned()))
}

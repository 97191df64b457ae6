/* decomp-selector's main file
Copyright (C) 2018 Reed Koser
decomp-selector is free software; you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by the Free
Software Foundation; either version 3 of the License, or (at your option) any
later version.

decomp-selector is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
this program.  If not, see <http://www.gnu.org/licenses/>.  */

//! Selection rules for saving I/O decompositions.
//!
//! A parallel I/O library can dump the layout map of a decomposition so it can
//! be inspected later. Dumping every decomposition is rarely what anyone
//! wants, so users hand the library a short pattern such as `*` or `ID="99"`
//! and the library asks a [`SaveDecompSelector`] whether a particular
//! `(decomposition id, file name, variable name)` triple should be saved.
//!
//! The pattern is compiled exactly once, when the selector is built. Queries
//! only walk the compiled [`Predicate`](predicate/enum.Predicate.html) tree, so
//! they are cheap, cannot fail, and can be issued from any number of threads
//! at once.
#![warn(missing_docs)]

extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate nom;

/// Internal macros for use in test assertions
#[cfg(test)]
#[macro_use]
mod test_macros;

mod parsers;
pub mod predicate;

pub use crate::predicate::{Fields, Predicate, Query};

use failure::Fail;
use std::fmt;
use std::str::FromStr;

/// What sort of thing went wrong while compiling a pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// The pattern was the empty string
    EmptyPattern,

    /// We expected a `KEY="value"` clause but ran out of input
    ExpectedClause,

    /// A clause used a key that the active grammar doesn't know about
    UnknownKey,

    /// A clause key wasn't followed by `=`
    ExpectedEquals,

    /// A clause value didn't start with a `"`
    ExpectedQuote,

    /// A clause value was opened with `"` but never closed
    UnterminatedQuote,

    /// The value under `ID=` wasn't a signed whole number. Contains the value
    /// as written.
    InvalidId(String),

    /// The value under `ID=` doesn't fit in a decomposition id. Contains the
    /// value as written.
    IdOutOfRange(String),

    /// A `(` was never closed
    UnbalancedParenthesis,

    /// There was something after what should have been the end of the pattern
    TrailingCharacters,

    /// `!` and `(` were nested more deeply than the compiler allows
    NestingTooDeep,

    /// This variant should never surface in library consumer code in practice,
    /// but we need it to make nom types work out
    NomError(u32),
}

impl From<u32> for ParseErrorKind {
    fn from(other: u32) -> ParseErrorKind {
        ParseErrorKind::NomError(other)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::EmptyPattern => write!(f, "the pattern is empty"),
            ParseErrorKind::ExpectedClause => write!(f, "expected a KEY=\"value\" clause"),
            ParseErrorKind::UnknownKey => write!(f, "unknown or unsupported key"),
            ParseErrorKind::ExpectedEquals => write!(f, "expected '=' after the key"),
            ParseErrorKind::ExpectedQuote => write!(f, "expected a '\"' to open the value"),
            ParseErrorKind::UnterminatedQuote => write!(f, "the value is missing its closing '\"'"),
            ParseErrorKind::InvalidId(v) => write!(f, "{:?} is not a decomposition id", v),
            ParseErrorKind::IdOutOfRange(v) => {
                write!(f, "decomposition id {:?} does not fit in 32 bits", v)
            }
            ParseErrorKind::UnbalancedParenthesis => write!(f, "unbalanced parenthesis"),
            ParseErrorKind::TrailingCharacters => write!(f, "unexpected trailing characters"),
            ParseErrorKind::NestingTooDeep => write!(f, "the pattern is nested too deeply"),
            ParseErrorKind::NomError(code) => write!(f, "internal parser error {}", code),
        }
    }
}

/// A pattern failed to compile.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternError {
    pattern: String,
    offset: usize,
    kind: ParseErrorKind,
}

impl PatternError {
    pub(crate) fn new(pattern: &str, offset: usize, kind: ParseErrorKind) -> Self {
        PatternError {
            pattern: pattern.to_owned(),
            offset,
            kind,
        }
    }

    /// What went wrong
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Byte offset into the pattern where the problem was detected
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The pattern that failed to compile
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid decomposition pattern {:?} at offset {}: {}",
            self.pattern, self.offset, self.kind
        )
    }
}

impl Fail for PatternError {}

/// Controls how much pattern syntax is accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Grammar {
    /// Only `*` and a single `ID="<integer>"` clause
    Minimal,
    /// `ID`, `FILE` and `VAR` clauses combined with `&&`, `||`, `!` and
    /// parentheses
    Extended,
}

impl Default for Grammar {
    fn default() -> Grammar {
        Grammar::Minimal
    }
}

/// A compiled rule deciding which decompositions get saved.
///
/// There is no way to change the rule of an existing selector; build a new
/// one instead.
#[derive(Clone, Debug, PartialEq)]
pub struct SaveDecompSelector {
    pattern: String,
    grammar: Grammar,
    predicate: Predicate,
}

impl SaveDecompSelector {
    /// Compile `pattern` using the minimal grammar
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Self::with_grammar(pattern, Grammar::default())
    }

    /// Compile `pattern`, accepting the syntax allowed by `grammar`
    pub fn with_grammar(pattern: &str, grammar: Grammar) -> Result<Self, PatternError> {
        debug!("Compiling pattern {:?} with {:?} grammar", pattern, grammar);
        let predicate = parsers::compile(pattern, grammar)?;
        info!("Compiled pattern {:?} to `{}`", pattern, predicate);

        Ok(SaveDecompSelector {
            pattern: pattern.to_owned(),
            grammar,
            predicate,
        })
    }

    /// Should the decomposition `id`, used by `var_name` in `file_name`, be
    /// saved?
    #[inline]
    pub fn matches(&self, id: i32, file_name: &str, var_name: &str) -> bool {
        let query = Query::new(id, file_name, var_name);
        let selected = self.predicate.evaluate(&query);
        trace!("{:?} against `{}`: {}", query, self.predicate, selected);
        selected
    }

    /// The pattern this selector was compiled from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The grammar the pattern was compiled with
    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// The compiled predicate
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl FromStr for SaveDecompSelector {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, PatternError> {
        SaveDecompSelector::new(s)
    }
}

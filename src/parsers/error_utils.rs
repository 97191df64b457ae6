use super::Input;
use crate::ParseErrorKind;
use nom::{Err, ErrorKind};

/// Turn a `nom` error from a run over `pattern` into the offset and kind
/// reported to callers. The first custom error in the error list wins; if
/// there isn't one the raw `nom` error code is surfaced.
pub(crate) fn locate_error(
    pattern: &str,
    e: Err<Input<'_>, ParseErrorKind>,
) -> (usize, ParseErrorKind) {
    let context = match e {
        Err::Incomplete(_) => return (pattern.len(), ParseErrorKind::ExpectedClause),
        Err::Error(c) | Err::Failure(c) => c,
    };
    let errors = nom::error_to_list(&context);

    let custom = errors.iter().find_map(|(i, kind)| match kind {
        ErrorKind::Custom(kind) => Some((offset_in(pattern, *i), kind.clone())),
        _ => None,
    });

    match custom {
        Some(found) => found,
        None => match errors.first() {
            Some((i, kind)) => (
                offset_in(pattern, *i),
                ParseErrorKind::NomError(nom::error_to_u32(kind)),
            ),
            None => (0, ParseErrorKind::NomError(0)),
        },
    }
}

/// Where `remaining` starts within `pattern`. `remaining` is always a suffix
/// of the pattern it was cut from.
#[inline]
fn offset_in(pattern: &str, remaining: Input<'_>) -> usize {
    pattern.len() - remaining.0.len()
}

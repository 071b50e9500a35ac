use crate::emitter::EmitterState;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PSError {
    #[error(transparent)]
    /// Writing to the output sink failed
    Io(#[from] std::io::Error),

    #[error("invalid page configuration: {0}")]
    /// The configured geometry cannot hold any text
    Config(String),

    #[error("unknown paper size `{0}`, expected one of a4, letter, legal")]
    UnknownPaperSize(String),

    #[error("invalid font description `{0}`")]
    FontDescription(String),

    #[error("`{operation}` called while the emitter is {state}")]
    /// The document emitter was driven out of order
    EmitterState {
        operation: &'static str,
        state: EmitterState,
    },

    #[error("trailer would claim {expected} page(s) but {emitted} were emitted")]
    /// The page count handed to the emitter disagrees with the pages it wrote
    PageCount { expected: usize, emitted: usize },
}

/// What was wrong with a piece of input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapingInputKind {
    /// The input bytes were not valid UTF-8
    InvalidUtf8,
    /// A control character with no printable meaning
    ControlCharacter(char),
    /// A character the output font encoding cannot represent
    Unencodable(char),
}

/// Malformed input met while shaping text. These are never fatal: the
/// offending character is replaced with a placeholder and a warning is logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.kind, .offset))]
pub struct ShapingInputError {
    /// Byte offset into the input for decoding problems, character column
    /// within the printed line for unencodable characters
    pub offset: usize,
    pub kind: ShapingInputKind,
}

fn describe(kind: &ShapingInputKind, offset: &usize) -> String {
    match kind {
        ShapingInputKind::InvalidUtf8 => {
            format!("invalid UTF-8 in input near byte {offset}, substituting U+FFFD")
        }
        ShapingInputKind::ControlCharacter(ch) => format!(
            "control character U+{:04X} at offset {offset}, substituting U+FFFD",
            *ch as u32
        ),
        ShapingInputKind::Unencodable(ch) => format!(
            "character U+{:04X} in column {offset} of its line cannot be encoded, substituting '?'",
            *ch as u32
        ),
    }
}

impl ShapingInputError {
    pub fn new(offset: usize, kind: ShapingInputKind) -> Self {
        ShapingInputError { offset, kind }
    }

    /// Log the problem and carry on
    pub(crate) fn report(self) {
        log::warn!("{self}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaping_errors_describe_the_character() {
        let err = ShapingInputError::new(4, ShapingInputKind::Unencodable('\u{263A}'));
        assert_eq!(
            err.to_string(),
            "character U+263A in column 4 of its line cannot be encoded, substituting '?'"
        );
    }

    #[test]
    fn emitter_state_errors_name_the_operation() {
        let err = PSError::EmitterState {
            operation: "draw_line",
            state: EmitterState::Uninitialized,
        };
        assert_eq!(
            err.to_string(),
            "`draw_line` called while the emitter is uninitialized"
        );
    }
}

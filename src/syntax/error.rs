//! Contains the error types that can occur while parsing a token sequence.

use std::fmt::Display;

use itertools::Itertools;

use crate::{
    base::log::{Message, Severity, SourceLocationDisplay},
    lexical::token::Token,
};

use super::grammar::{NonTerminal, Terminal};

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, Error>;

/// An enumeration containing all kinds of syntactic errors that can occur
/// while parsing a token sequence.
///
/// The first error aborts the parse; there is no recovery and no partial tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    UnexpectedToken(#[from] UnexpectedToken),
    #[error(transparent)]
    MissingProduction(#[from] MissingProduction),
    #[error(transparent)]
    InvalidToken(#[from] InvalidToken),
}

fn terminal_binding(terminal: Terminal) -> String {
    match terminal {
        Terminal::EndOfInput => "the end of input".to_string(),
        other => format!("a `{}` token", other.as_str()),
    }
}

fn found_binding(found: Option<&Token>) -> String {
    found.map_or_else(
        || "the end of input".to_string(),
        |token| format!("a `{}` token (`{}`)", token.kind().as_str(), token.value()),
    )
}

fn location_display(found: Option<&Token>) -> Option<SourceLocationDisplay<'_, String>> {
    found.map(|token| {
        SourceLocationDisplay::new(token.value(), token.row(), token.column(), None)
    })
}

/// A terminal was expected but another token (or the end of input) was found.
///
/// Also raised for trailing input, with [`Terminal::EndOfInput`] as the
/// expected terminal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnexpectedToken {
    /// The terminal the parser needed to match.
    pub expected: Terminal,

    /// The token that was found instead; [`None`] means the end of input.
    pub found: Option<Token>,
}

impl Display for UnexpectedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = format!(
            "expected {}, but found {}",
            terminal_binding(self.expected),
            found_binding(self.found.as_ref())
        );

        write!(f, "{}", Message::new(Severity::Error, message))?;

        location_display(self.found.as_ref())
            .map_or(Ok(()), |location| write!(f, "\n{location}"))
    }
}

impl std::error::Error for UnexpectedToken {}

/// No production exists for the non-terminal on top of the parse stack under
/// the current lookahead.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissingProduction {
    /// The non-terminal on top of the parse stack.
    pub non_terminal: NonTerminal,

    /// The token that was found; [`None`] means the end of input.
    pub found: Option<Token>,

    /// The terminals the non-terminal would have accepted, sorted by spelling.
    pub expected: Vec<Terminal>,
}

impl Display for MissingProduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let expected_binding = if self.expected.len() == 1 {
            terminal_binding(self.expected[0])
        } else {
            let mut bindings = self.expected.iter().map(|&terminal| terminal_binding(terminal));
            let last = bindings.next_back();
            match last {
                Some(last) => format!("{}, or {}", bindings.join(", "), last),
                None => "nothing".to_string(),
            }
        };

        let message = format!(
            "no production for `{}`: expected {}, but found {}",
            self.non_terminal.as_str(),
            expected_binding,
            found_binding(self.found.as_ref())
        );

        write!(f, "{}", Message::new(Severity::Error, message))?;

        location_display(self.found.as_ref())
            .map_or(Ok(()), |location| write!(f, "\n{location}"))
    }
}

impl std::error::Error for MissingProduction {}

/// A token that cannot be mapped to any grammar terminal.
///
/// Tokens of kind [`TokenKind::Error`](crate::lexical::token::TokenKind::Error)
/// are never valid parser input; keyword tokens with a spelling outside the
/// grammar can only come from externally built token sequences.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidToken {
    /// The offending token.
    pub token: Token,
}

impl Display for InvalidToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!(
                    "token `{}` of kind `{}` cannot appear in any parse",
                    self.token.value(),
                    self.token.kind().as_str()
                )
            ),
            SourceLocationDisplay::new(
                self.token.value(),
                self.token.row(),
                self.token.column(),
                Option::<i32>::None
            )
        )
    }
}

impl std::error::Error for InvalidToken {}

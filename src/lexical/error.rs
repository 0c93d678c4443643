use std::fmt::Display;

use strum::IntoEnumIterator;

use crate::base::log::{Message, Severity, SourceLocationDisplay};

use super::token::{KeywordKind, Token};

/// Represents an error that occurred during the lexical analysis of a line.
///
/// At most one lexical error is raised per line; the tokens produced before
/// the failure (ending with the [`TokenKind::Error`](super::token::TokenKind::Error)
/// token) ride on the error for diagnostic purposes.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidCharacter(#[from] InvalidCharacter),
    #[error(transparent)]
    UnknownWord(#[from] UnknownWord),
}

impl Error {
    /// Get the line number of the offending character or word.
    #[must_use]
    pub fn row(&self) -> usize {
        match self {
            Self::InvalidCharacter(error) => error.row,
            Self::UnknownWord(error) => error.row,
        }
    }

    /// Get the character offset of the offending character or word within its line.
    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            Self::InvalidCharacter(error) => error.column,
            Self::UnknownWord(error) => error.column,
        }
    }

    /// Get the tokens produced before the failure, ending with the error token.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        match self {
            Self::InvalidCharacter(error) => &error.tokens,
            Self::UnknownWord(error) => &error.tokens,
        }
    }
}

/// A character that cannot start any token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub struct InvalidCharacter {
    /// The character that could not be classified.
    pub character: char,

    /// Line the character is on.
    pub row: usize,

    /// Character offset within the line.
    pub column: usize,

    /// Tokens produced before the failure, ending with the error token.
    pub tokens: Vec<Token>,
}

impl Display for InvalidCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lexeme = self.character.to_string();
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("invalid character `{}`", self.character)
            ),
            SourceLocationDisplay::new(&lexeme, self.row, self.column, Option::<i32>::None)
        )
    }
}

/// An alphabetic word that is not part of the keyword set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub struct UnknownWord {
    /// The upper-cased word that could not be classified.
    pub word: String,

    /// Line the word starts on.
    pub row: usize,

    /// Character offset of the first letter within the line.
    pub column: usize,

    /// Tokens produced before the failure, ending with the error token.
    pub tokens: Vec<Token>,
}

impl UnknownWord {
    /// Returns the keyword closest to the word, if any is close enough to be a
    /// plausible misspelling.
    #[must_use]
    pub fn suggestion(&self) -> Option<KeywordKind> {
        KeywordKind::iter()
            .map(|keyword| (strsim::levenshtein(keyword.as_str(), &self.word), keyword))
            .filter(|&(distance, _)| distance <= 2)
            .min_by_key(|&(distance, _)| distance)
            .map(|(_, keyword)| keyword)
    }
}

impl Display for UnknownWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let help = self
            .suggestion()
            .map(|keyword| format!("did you mean `{}`?", keyword.as_str()));
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, format!("unknown word `{}`", self.word)),
            SourceLocationDisplay::new(&self.word, self.row, self.column, help)
        )
    }
}

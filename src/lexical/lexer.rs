//! Contains the [`Lexer`] turning a single line of source text into tokens.

use std::{
    iter::{Enumerate, Peekable},
    str::Chars,
};

use super::{
    error::{Error, InvalidCharacter, UnknownWord},
    token::{KeywordKind, Token, TokenKind},
};

/// The single-character operator symbols of the expression language.
const OPERATORS: &[char] = &['+', '-', '*', '/', '%', '|', '^'];

/// Turns one line of source text into an ordered sequence of [`Token`]s.
///
/// The line is expected to already be preprocessed: comments stripped, no line
/// breaks, blank lines skipped by the caller. Lexing proceeds left to right
/// and stops at the first character that cannot start a token.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Enumerate<Chars<'a>>>,
    row: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given line and its 0-based line number.
    #[must_use]
    pub fn new(line: &'a str, row: usize) -> Self {
        Self {
            chars: line.chars().enumerate().peekable(),
            row,
            tokens: Vec::new(),
        }
    }

    /// Tokenizes the line from left to right.
    ///
    /// Whitespace is skipped without emitting a token. On failure the tokens
    /// produced so far, ending with the [`TokenKind::Error`] token, are carried
    /// by the returned error.
    ///
    /// # Errors
    /// - [`Error::InvalidCharacter`] - A character cannot start any token.
    /// - [`Error::UnknownWord`] - An alphabetic word is not a keyword.
    #[tracing::instrument(level = "debug", skip_all, fields(row = self.row))]
    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        while let Some((column, character)) = self.chars.next() {
            if character.is_whitespace() {
                continue;
            }

            if character.is_ascii_digit() || (character == '-' && self.peek_continues_number()) {
                self.handle_number(column, character);
            } else if OPERATORS.contains(&character) {
                self.tokens.push(Token::new(
                    character.to_string(),
                    TokenKind::Operator,
                    self.row,
                    column,
                ));
            } else if character == '(' {
                self.tokens.push(Token::new(
                    character.to_string(),
                    TokenKind::LeftParenthesis,
                    self.row,
                    column,
                ));
            } else if character == ')' {
                self.tokens.push(Token::new(
                    character.to_string(),
                    TokenKind::RightParenthesis,
                    self.row,
                    column,
                ));
            } else if character.is_alphabetic() {
                self.handle_word(column, character)?;
            } else {
                self.tokens.push(Token::new(
                    character.to_string(),
                    TokenKind::Error,
                    self.row,
                    column,
                ));
                return Err(InvalidCharacter {
                    character,
                    row: self.row,
                    column,
                    tokens: self.tokens,
                }
                .into());
            }
        }

        Ok(self.tokens)
    }

    /// Whether the next character continues a numeric literal after a `-`.
    fn peek_continues_number(&mut self) -> bool {
        self.chars
            .peek()
            .is_some_and(|&(_, character)| character.is_ascii_digit() || character == '.')
    }

    /// Lexes a numeric literal whose first character is already consumed.
    ///
    /// At most one `.` belongs to the literal; a second one terminates it and
    /// is left for the main loop, which rejects it as unclassifiable.
    fn handle_number(&mut self, column: usize, first: char) {
        let mut value = String::from(first);
        let mut has_dot = false;

        while let Some(&(_, character)) = self.chars.peek() {
            if character.is_ascii_digit() {
                value.push(character);
                self.chars.next();
            } else if character == '.' && !has_dot {
                has_dot = true;
                value.push(character);
                self.chars.next();
            } else {
                break;
            }
        }

        let kind = if has_dot {
            TokenKind::RealNumber
        } else {
            TokenKind::IntegerNumber
        };
        self.tokens.push(Token::new(value, kind, self.row, column));
    }

    /// Lexes a maximal alphabetic run and classifies it against the keyword set.
    fn handle_word(&mut self, column: usize, first: char) -> Result<(), Error> {
        let mut word = String::from(first);

        while let Some(&(_, character)) = self.chars.peek() {
            if character.is_alphabetic() {
                word.push(character);
                self.chars.next();
            } else {
                break;
            }
        }

        let word = word.to_uppercase();

        if let Ok(keyword) = word.parse::<KeywordKind>() {
            self.tokens.push(Token::new(
                keyword.as_str(),
                TokenKind::Keyword,
                self.row,
                column,
            ));
            Ok(())
        } else {
            self.tokens
                .push(Token::new(&*word, TokenKind::Error, self.row, column));
            Err(UnknownWord {
                word,
                row: self.row,
                column,
                tokens: std::mem::take(&mut self.tokens),
            }
            .into())
        }
    }
}

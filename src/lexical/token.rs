//! Contains the [`Token`] struct and its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr, sync::OnceLock};

use getset::{CopyGetters, Getters};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Is an enumeration representing the keywords of the expression language.
///
/// The grammar additionally names a `DO` terminal, but the lexer does not
/// recognize the word `do`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Mem,
    Res,
    If,
    Then,
    Else,
    For,
}

impl ToString for KeywordKind {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in [`FromStr`]
/// trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, thiserror::Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static STRING_KEYWORD_MAP: OnceLock<HashMap<&'static str, KeywordKind>> = OnceLock::new();
        let map = STRING_KEYWORD_MAP.get_or_init(|| {
            let mut map = HashMap::new();

            for keyword in Self::iter() {
                map.insert(keyword.as_str(), keyword);
            }

            map
        });

        map.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the upper-cased spelling of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mem => "MEM",
            Self::Res => "RES",
            Self::If => "IF",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::For => "FOR",
        }
    }
}

/// Is an enumeration containing all kinds of tokens in the expression language.
///
/// [`TokenKind::Error`] marks a token that could not be classified; it always
/// accompanies a lexical error and is never accepted by the parser.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum TokenKind {
    IntegerNumber,
    RealNumber,
    LeftParenthesis,
    RightParenthesis,
    Operator,
    Keyword,
    Error,
}

impl TokenKind {
    /// Gets the name of the token kind as it appears in diagnostics and
    /// persisted token records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IntegerNumber => "INTEGER_NUMBER",
            Self::RealNumber => "REAL_NUMBER",
            Self::LeftParenthesis => "LEFT_PARENTHESIS",
            Self::RightParenthesis => "RIGHT_PARENTHESIS",
            Self::Operator => "OPERATOR",
            Self::Keyword => "KEYWORD",
            Self::Error => "ERROR",
        }
    }
}

/// Represents a single token of one line of source code.
///
/// Tokens are created by the [`Lexer`](crate::lexical::lexer::Lexer) and are
/// never mutated afterwards. `row` and `column` are 0-based; `column` counts
/// characters from the start of the line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct Token {
    /// Get the literal source text of the token.
    #[get = "pub"]
    value: String,

    /// Get the classification of the token.
    #[get_copy = "pub"]
    #[cfg_attr(feature = "serde", serde(rename = "token_class"))]
    kind: TokenKind,

    /// Get the line number the token starts on.
    #[get_copy = "pub"]
    row: usize,

    /// Get the character offset within the line where the token starts.
    #[get_copy = "pub"]
    column: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(value: impl Into<String>, kind: TokenKind, row: usize, column: usize) -> Self {
        Self {
            value: value.into(),
            kind,
            row,
            column,
        }
    }

    /// Returns the keyword the token spells, if it is a keyword token.
    #[must_use]
    pub fn keyword(&self) -> Option<KeywordKind> {
        (self.kind == TokenKind::Keyword)
            .then(|| self.value.parse().ok())
            .flatten()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<{}('{}') @ {}:{}>",
            self.kind.as_str(),
            self.value,
            self.row,
            self.column
        )
    }
}

//! Grammar vocabulary and the LL(1) production table of the expression language.
//!
//! Every well-formed program is a single parenthesized RPN expression: the
//! body is either a bare `MEM` reference or an operand followed by another
//! operand and an operator (binary application) or by a unary keyword
//! operator. Operands are numeric literals or parenthesized sub-expressions.

use std::{collections::HashMap, fmt::Display, sync::OnceLock};

use derive_more::From;
use enum_as_inner::EnumAsInner;
use itertools::Itertools;

use crate::lexical::token::{Token, TokenKind};

/// Is an enumeration of the terminal symbols of the grammar.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    /// `(`
    LeftParenthesis,
    /// `)`
    RightParenthesis,
    /// Integer or real numeric literal.
    Number,
    /// One of the arithmetic operator symbols.
    Operator,
    /// The `MEM` keyword.
    Mem,
    /// The `RES` keyword.
    Res,
    /// The `IF` keyword.
    If,
    /// The `THEN` keyword.
    Then,
    /// The `ELSE` keyword.
    Else,
    /// The `DO` keyword. Present in the grammar even though the lexer never
    /// produces it; reachable only through externally built token sequences.
    Do,
    /// The `FOR` keyword.
    For,
    /// End-of-input marker.
    EndOfInput,
}

impl Terminal {
    /// Gets the grammar spelling of the terminal as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftParenthesis => "LEFT_PARENTHESIS",
            Self::RightParenthesis => "RIGHT_PARENTHESIS",
            Self::Number => "NUMBER",
            Self::Operator => "OPERATOR",
            Self::Mem => "MEM",
            Self::Res => "RES",
            Self::If => "IF",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::Do => "DO",
            Self::For => "FOR",
            Self::EndOfInput => "$",
        }
    }

    /// Maps a token to the terminal the parser matches it against.
    ///
    /// Integer and real literals both map to [`Terminal::Number`]; keyword
    /// tokens map to the terminal spelled like their value. Tokens of kind
    /// [`TokenKind::Error`], and keyword tokens whose spelling is not part of
    /// the grammar, have no terminal.
    #[must_use]
    pub fn of_token(token: &Token) -> Option<Self> {
        match token.kind() {
            TokenKind::IntegerNumber | TokenKind::RealNumber => Some(Self::Number),
            TokenKind::LeftParenthesis => Some(Self::LeftParenthesis),
            TokenKind::RightParenthesis => Some(Self::RightParenthesis),
            TokenKind::Operator => Some(Self::Operator),
            TokenKind::Keyword => Self::of_keyword_spelling(token.value()),
            TokenKind::Error => None,
        }
    }

    fn of_keyword_spelling(spelling: &str) -> Option<Self> {
        match spelling {
            "MEM" => Some(Self::Mem),
            "RES" => Some(Self::Res),
            "IF" => Some(Self::If),
            "THEN" => Some(Self::Then),
            "ELSE" => Some(Self::Else),
            "DO" => Some(Self::Do),
            "FOR" => Some(Self::For),
            _ => None,
        }
    }

    /// Whether a matched terminal carries the token's value into its leaf node.
    ///
    /// Parentheses are structural and the end marker never produces a node.
    #[must_use]
    pub fn carries_value(self) -> bool {
        !matches!(
            self,
            Self::LeftParenthesis | Self::RightParenthesis | Self::EndOfInput
        )
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is an enumeration of the non-terminal symbols of the grammar.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum NonTerminal {
    Start,
    Expr,
    Rpn,
    RpnExpr,
    Operand,
    Operator,
    UnaryOperator,
}

impl NonTerminal {
    /// Gets the grammar spelling of the non-terminal as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "S",
            Self::Expr => "Expr",
            Self::Rpn => "RPN",
            Self::RpnExpr => "RPNExpr",
            Self::Operand => "operand",
            Self::Operator => "operator",
            Self::UnaryOperator => "unaryOperator",
        }
    }
}

impl Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is an enumeration of either a [`Terminal`] or a [`NonTerminal`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, EnumAsInner)]
#[allow(missing_docs)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl Symbol {
    /// Gets the grammar spelling of the symbol as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Terminal(terminal) => terminal.as_str(),
            Self::NonTerminal(non_terminal) => non_terminal.as_str(),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The keyword terminals that reduce through `unaryOperator`.
const UNARY_KEYWORDS: [Terminal; 7] = [
    Terminal::Res,
    Terminal::If,
    Terminal::Then,
    Terminal::Else,
    Terminal::Do,
    Terminal::For,
    Terminal::Mem,
];

fn define(
    table: &mut HashMap<(NonTerminal, Terminal), Vec<Symbol>>,
    non_terminal: NonTerminal,
    lookahead: Terminal,
    rhs: Vec<Symbol>,
) {
    let previous = table.insert((non_terminal, lookahead), rhs);
    assert!(
        previous.is_none(),
        "two productions for `{non_terminal}` share the lookahead `{lookahead}`"
    );
}

/// The production table, built once and read-only afterwards.
///
/// Exactly one entry exists per valid (non-terminal, lookahead) pair; the
/// construction asserts the LL(1) property.
fn table() -> &'static HashMap<(NonTerminal, Terminal), Vec<Symbol>> {
    static TABLE: OnceLock<HashMap<(NonTerminal, Terminal), Vec<Symbol>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();

        // S
        define(
            &mut table,
            NonTerminal::Start,
            Terminal::LeftParenthesis,
            vec![NonTerminal::Expr.into()],
        );

        // Expr
        define(
            &mut table,
            NonTerminal::Expr,
            Terminal::LeftParenthesis,
            vec![
                Terminal::LeftParenthesis.into(),
                NonTerminal::Rpn.into(),
                Terminal::RightParenthesis.into(),
            ],
        );

        // RPN
        for lookahead in [Terminal::LeftParenthesis, Terminal::Number] {
            define(
                &mut table,
                NonTerminal::Rpn,
                lookahead,
                vec![NonTerminal::Operand.into(), NonTerminal::RpnExpr.into()],
            );
        }
        define(
            &mut table,
            NonTerminal::Rpn,
            Terminal::Mem,
            vec![Terminal::Mem.into()],
        );

        // RPNExpr
        for lookahead in [Terminal::LeftParenthesis, Terminal::Number] {
            define(
                &mut table,
                NonTerminal::RpnExpr,
                lookahead,
                vec![NonTerminal::Operand.into(), NonTerminal::Operator.into()],
            );
        }
        for lookahead in UNARY_KEYWORDS {
            define(
                &mut table,
                NonTerminal::RpnExpr,
                lookahead,
                vec![NonTerminal::UnaryOperator.into()],
            );
        }

        // operand
        define(
            &mut table,
            NonTerminal::Operand,
            Terminal::LeftParenthesis,
            vec![NonTerminal::Expr.into()],
        );
        define(
            &mut table,
            NonTerminal::Operand,
            Terminal::Number,
            vec![Terminal::Number.into()],
        );

        // operator
        define(
            &mut table,
            NonTerminal::Operator,
            Terminal::Operator,
            vec![Terminal::Operator.into()],
        );

        // unaryOperator
        for lookahead in UNARY_KEYWORDS {
            define(
                &mut table,
                NonTerminal::UnaryOperator,
                lookahead,
                vec![lookahead.into()],
            );
        }

        table
    })
}

/// Looks up the production for the given non-terminal under the given lookahead.
///
/// Returns the right-hand-side symbols, leftmost first.
#[must_use]
pub fn production(non_terminal: NonTerminal, lookahead: Terminal) -> Option<&'static [Symbol]> {
    table().get(&(non_terminal, lookahead)).map(Vec::as_slice)
}

/// The terminals that have a production for the given non-terminal, sorted by
/// spelling.
#[must_use]
pub fn expected_terminals(non_terminal: NonTerminal) -> Vec<Terminal> {
    table()
        .keys()
        .filter(|&&(entry, _)| entry == non_terminal)
        .map(|&(_, lookahead)| lookahead)
        .sorted_by_key(|lookahead| lookahead.as_str())
        .collect()
}

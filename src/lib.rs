//! Lexer and LL(1) parser for a small parenthesized RPN expression language.
//!
//! Each line of source code holds one expression like `(3 4 +)` or
//! `((1 2 +) MEM)`. The [`lexical::lexer::Lexer`] turns a line into tokens and
//! the [`syntax::parser::Parser`] derives an [`syntax::ast::AstNode`] tree from
//! them, driven by an explicit LL(1) production table. Both report failures
//! with the row and column of the offending input.
//!
//! Preprocessing (comment stripping, blank-line skipping, splitting a file
//! into lines) is the caller's responsibility; every line is processed
//! independently.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod lexical;
pub mod syntax;

use base::{Error, Handler, Result};
use lexical::{lexer::Lexer, token::Token};
use syntax::{ast::AstNode, parser::Parser};

/// Converts the given line of source code to tokens.
///
/// The error is reported to the handler as well as returned.
///
/// # Errors
/// - If the line contains a character or word that cannot be classified.
pub fn tokenize(handler: &impl Handler<Error>, line: &str, row: usize) -> Result<Vec<Token>> {
    Lexer::new(line, row).tokenize().map_err(|error| {
        let error = Error::from(error);
        handler.receive(error.clone());
        error
    })
}

/// Parses the given line of source code into an abstract syntax tree.
///
/// The error is reported to the handler as well as returned.
///
/// # Errors
/// - If the line contains a character or word that cannot be classified.
/// - If the token sequence does not belong to the grammar.
pub fn parse(handler: &impl Handler<Error>, line: &str, row: usize) -> Result<AstNode> {
    let tokens = tokenize(handler, line, row)?;
    parse_tokens(handler, &tokens)
}

/// Parses an already tokenized line into an abstract syntax tree.
///
/// The error is reported to the handler as well as returned.
///
/// # Errors
/// - If the token sequence does not belong to the grammar.
pub fn parse_tokens(handler: &impl Handler<Error>, tokens: &[Token]) -> Result<AstNode> {
    Parser::new(tokens).parse().map_err(|error| {
        let error = Error::from(error);
        handler.receive(error.clone());
        error
    })
}

/// Parses every line independently into its own abstract syntax tree.
///
/// A failure on one line never aborts the processing of the others; the
/// result at index `i` belongs to the line at index `i`.
pub fn parse_lines<'a>(
    handler: &impl Handler<Error>,
    lines: impl IntoIterator<Item = &'a str>,
) -> Vec<Result<AstNode>> {
    lines
        .into_iter()
        .enumerate()
        .map(|(row, line)| parse(handler, line, row))
        .collect()
}

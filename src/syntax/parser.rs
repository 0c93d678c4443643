//! Contains the table-driven LL(1) [`Parser`].

use itertools::Itertools;

use crate::lexical::token::Token;

use super::{
    ast::AstNode,
    error::{InvalidToken, MissingProduction, ParseResult, UnexpectedToken},
    grammar::{self, NonTerminal, Symbol, Terminal},
};

/// Observer invoked at each step of the predictive parse.
///
/// Every callback defaults to doing nothing, so implementations only override
/// the steps they care about.
pub trait ParseObserver {
    /// A symbol was popped from the parse stack with the given lookahead.
    fn symbol_popped(&self, symbol: Symbol, lookahead: Terminal) {
        let _ = (symbol, lookahead);
    }

    /// A production was applied for the non-terminal under the lookahead.
    fn production_applied(&self, non_terminal: NonTerminal, lookahead: Terminal, rhs: &[Symbol]) {
        let _ = (non_terminal, lookahead, rhs);
    }

    /// A terminal was matched against the given token.
    fn terminal_matched(&self, terminal: Terminal, token: &Token) {
        let _ = (terminal, token);
    }
}

/// A [`ParseObserver`] that ignores every parse step.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidObserver;

impl ParseObserver for VoidObserver {}

/// A [`ParseObserver`] that forwards every parse step to [`tracing`] at debug
/// level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceObserver;

impl ParseObserver for TraceObserver {
    fn symbol_popped(&self, symbol: Symbol, lookahead: Terminal) {
        tracing::debug!(
            symbol = symbol.as_str(),
            lookahead = lookahead.as_str(),
            "popped parse stack"
        );
    }

    fn production_applied(&self, non_terminal: NonTerminal, lookahead: Terminal, rhs: &[Symbol]) {
        tracing::debug!(
            non_terminal = non_terminal.as_str(),
            lookahead = lookahead.as_str(),
            rhs = %rhs.iter().map(|symbol| symbol.as_str()).join(" "),
            "applied production"
        );
    }

    fn terminal_matched(&self, terminal: Terminal, token: &Token) {
        tracing::debug!(
            terminal = terminal.as_str(),
            value = token.value().as_str(),
            "matched terminal"
        );
    }
}

/// A node under construction, addressed by its index in the arena.
///
/// Children are always created after their parent, so they carry a larger
/// index; the final assembly relies on this.
#[derive(Debug, Clone)]
struct PendingNode {
    symbol: Symbol,
    value: Option<String>,
    children: Vec<usize>,
}

impl PendingNode {
    fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            value: None,
            children: Vec::new(),
        }
    }
}

/// Builds the owned tree out of the arena, children before parents.
fn assemble(nodes: Vec<PendingNode>) -> AstNode {
    let mut built: Vec<Option<AstNode>> = vec![None; nodes.len()];

    for (index, pending) in nodes.into_iter().enumerate().rev() {
        let children = pending
            .children
            .iter()
            .map(|&child| {
                built[child]
                    .take()
                    .expect("children are assembled before their parent")
            })
            .collect();
        built[index] = Some(AstNode::new(pending.symbol, pending.value, children));
    }

    built
        .swap_remove(0)
        .expect("the root is assembled last")
}

/// A table-driven LL(1) parser over the token sequence of one line.
///
/// The parse is non-recursive: two parallel stacks hold the grammar symbols
/// still to be matched and the tree nodes awaiting their children. The
/// end-of-input marker is appended internally.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given token sequence.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Maps the current token to the terminal used as lookahead.
    fn lookahead(&self) -> ParseResult<Terminal> {
        self.current().map_or(Ok(Terminal::EndOfInput), |token| {
            Terminal::of_token(token).ok_or_else(|| {
                InvalidToken {
                    token: token.clone(),
                }
                .into()
            })
        })
    }

    /// Parses the token sequence into an abstract syntax tree.
    ///
    /// # Errors
    /// - [`Error::UnexpectedToken`](super::error::Error::UnexpectedToken) - A
    ///   terminal on the parse stack does not match the lookahead, or input
    ///   remains after the start symbol is fully derived.
    /// - [`Error::MissingProduction`](super::error::Error::MissingProduction) -
    ///   No production exists for the non-terminal under the lookahead.
    /// - [`Error::InvalidToken`](super::error::Error::InvalidToken) - A token
    ///   cannot be mapped to any grammar terminal.
    pub fn parse(&mut self) -> ParseResult<AstNode> {
        self.parse_with_observer(&VoidObserver)
    }

    /// Parses the token sequence, reporting each step to the observer.
    ///
    /// # Errors
    /// Same as [`Parser::parse`].
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = self.tokens.len()))]
    pub fn parse_with_observer(&mut self, observer: &impl ParseObserver) -> ParseResult<AstNode> {
        let mut symbols = vec![
            Symbol::Terminal(Terminal::EndOfInput),
            Symbol::NonTerminal(NonTerminal::Start),
        ];
        let mut nodes = vec![PendingNode::new(NonTerminal::Start.into())];
        let mut node_stack = vec![0];

        while let Some(symbol) = symbols.pop() {
            let lookahead = self.lookahead()?;
            observer.symbol_popped(symbol, lookahead);

            if symbol == Symbol::Terminal(Terminal::EndOfInput) {
                if lookahead == Terminal::EndOfInput {
                    return Ok(assemble(nodes));
                }

                // trailing unconsumed input
                return Err(UnexpectedToken {
                    expected: Terminal::EndOfInput,
                    found: self.current().cloned(),
                }
                .into());
            }

            let node = node_stack
                .pop()
                .expect("node stack stays in sync with the symbol stack");

            match symbol {
                Symbol::Terminal(terminal) => {
                    if lookahead != terminal {
                        return Err(UnexpectedToken {
                            expected: terminal,
                            found: self.current().cloned(),
                        }
                        .into());
                    }

                    let token = self
                        .current()
                        .expect("a matched terminal implies a current token");
                    observer.terminal_matched(terminal, token);

                    let mut leaf = PendingNode::new(symbol);
                    leaf.value = terminal
                        .carries_value()
                        .then(|| token.value().clone());

                    let leaf_index = nodes.len();
                    nodes.push(leaf);
                    nodes[node].children.push(leaf_index);

                    self.position += 1;
                }
                Symbol::NonTerminal(non_terminal) => {
                    let Some(rhs) = grammar::production(non_terminal, lookahead) else {
                        return Err(MissingProduction {
                            non_terminal,
                            found: self.current().cloned(),
                            expected: grammar::expected_terminals(non_terminal),
                        }
                        .into());
                    };
                    observer.production_applied(non_terminal, lookahead, rhs);

                    let first_child = nodes.len();
                    for &child_symbol in rhs {
                        nodes.push(PendingNode::new(child_symbol));
                    }
                    nodes[node].children.extend(first_child..first_child + rhs.len());

                    // push in reverse so the leftmost symbol is processed next
                    for (offset, &child_symbol) in rhs.iter().enumerate().rev() {
                        symbols.push(child_symbol);
                        node_stack.push(first_child + offset);
                    }
                }
            }
        }

        unreachable!("the end-of-input marker terminates the parse")
    }
}

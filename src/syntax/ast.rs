//! Contains the [`AstNode`] tree produced by the parser.

use std::fmt::{self, Display};

use getset::{CopyGetters, Getters};

use super::grammar::Symbol;

/// A node of the abstract syntax tree.
///
/// Each node exclusively owns its children; the tree has no sharing and no
/// cycles and is immutable once the parse that built it has completed. `value`
/// is populated only for terminal nodes carrying semantic content (numeric
/// literals, operator symbols, keyword spellings).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct AstNode {
    /// Get the grammar symbol the node represents.
    #[get_copy = "pub"]
    symbol: Symbol,

    /// Get the semantic content of the node, if its symbol carries any.
    #[get = "pub"]
    value: Option<String>,

    /// Get the children of the node in left-to-right order.
    #[get = "pub"]
    children: Vec<AstNode>,
}

impl AstNode {
    /// Creates a new node.
    #[must_use]
    pub fn new(symbol: Symbol, value: Option<String>, children: Vec<AstNode>) -> Self {
        Self {
            symbol,
            value,
            children,
        }
    }

    /// The leaf nodes of the tree in left-to-right order.
    ///
    /// For a successfully parsed token sequence the leaves reproduce the
    /// input tokens.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Self> {
        let mut leaves = Vec::new();
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            if node.children.is_empty() {
                leaves.push(node);
            } else {
                pending.extend(node.children.iter().rev());
            }
        }

        leaves
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = level * 2)?;
        match &self.value {
            Some(value) => write!(f, "{}({value})", self.symbol.as_str())?,
            None => f.write_str(self.symbol.as_str())?,
        }

        for child in &self.children {
            writeln!(f)?;
            child.fmt_indented(f, level + 1)?;
        }

        Ok(())
    }
}

impl Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

//! Trait and implementations for handling diagnostics.

use std::{cell::Cell, fmt::Display};

/// Represents a trait responsible for handling diagnostics of the lexer and parser.
pub trait Handler<T> {
    /// Receive an error and handles it.
    fn receive(&self, error: T);
}

/// A [`Handler`] that prints every received diagnostic to standard error.
#[derive(Debug, Default)]
pub struct PrintHandler {
    printed: Cell<bool>,
}

impl PrintHandler {
    /// Creates a new [`PrintHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the handler has printed any diagnostic.
    #[must_use]
    pub fn has_printed(&self) -> bool {
        self.printed.get()
    }
}

impl<E: Display> Handler<E> for PrintHandler {
    fn receive(&self, error: E) {
        eprintln!("{error}");
        self.printed.set(true);
    }
}

/// A [`Handler`] that remembers that a diagnostic was received but does not print it.
#[derive(Debug, Default)]
pub struct SilentHandler {
    received: Cell<bool>,
}

impl SilentHandler {
    /// Creates a new [`SilentHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the handler has received any diagnostic.
    #[must_use]
    pub fn has_received(&self) -> bool {
        self.received.get()
    }
}

impl<E> Handler<E> for SilentHandler {
    fn receive(&self, _error: E) {
        self.received.set(true);
    }
}

/// A [`Handler`] that ignores every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidHandler;

impl<E> Handler<E> for VoidHandler {
    fn receive(&self, _error: E) {}
}

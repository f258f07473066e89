//! Composite nodes.
//!
//! [`Sequence`] and [`Selector`] evaluate their children left to right and
//! short-circuit, which makes child order the priority order of the tree.

use crate::{Behavior, Node, Status};

/// Runs children in order until one fails (logical AND).
pub struct Sequence<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Sequence<'n, C> {
    /// Creates a sequence over `children`.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty; an empty sequence is always a wiring
    /// mistake in the tree definition.
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Runs children in order until one succeeds (logical OR).
pub struct Selector<'n, C> {
    children: Vec<Node<'n, C>>,
}

impl<'n, C> Selector<'n, C> {
    /// Creates a selector over `children`.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Node<'n, C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

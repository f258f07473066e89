//! The node trait shared by composites and leaves.

use crate::Status;

/// A node that can be ticked against a context.
///
/// Nodes are stateless with respect to the agent: anything that must survive
/// between activations lives in the context (or in whatever the context
/// borrows), never in the node.
pub trait Behavior<C>: Send + Sync {
    /// Evaluates this node once.
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Owned, type-erased node.
///
/// The `'n` bound lets a tree be built over a context that borrows world
/// state, since a composite over such a context is not `'static`.
pub type Node<'n, C> = Box<dyn Behavior<C> + 'n>;

impl<C> Behavior<C> for Node<'_, C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

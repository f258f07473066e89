//! Shorthand constructors for assembling trees.
//!
//! `selector(vec![sequence(vec![condition(..), task(..)]), ..])` reads closer to
//! the decision it encodes than the nested `Box::new(..)` form.

use crate::{Condition, Node, Selector, Sequence, Status, Task};

/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Sequence::new(children))
}

/// Shorthand for `Box::new(Selector::new(children))`.
#[inline]
pub fn selector<'n, C: 'n>(children: Vec<Node<'n, C>>) -> Node<'n, C> {
    Box::new(Selector::new(children))
}

/// Boxes a predicate as a [`Condition`] leaf.
#[inline]
pub fn condition<'n, C, F>(predicate: F) -> Node<'n, C>
where
    C: 'n,
    F: Fn(&C) -> bool + Send + Sync + 'n,
{
    Box::new(Condition::new(predicate))
}

/// Boxes a step as a [`Task`] leaf.
#[inline]
pub fn task<'n, C, F>(step: F) -> Node<'n, C>
where
    C: 'n,
    F: Fn(&mut C) -> Status + Send + Sync + 'n,
{
    Box::new(Task::new(step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Behavior;

    struct Blackboard<'a> {
        limit: &'a i32,
        value: i32,
    }

    #[test]
    fn builds_tree_over_borrowing_context() {
        let limit = 2;
        let tree: Node<'_, Blackboard<'_>> = selector(vec![
            sequence(vec![
                condition(|ctx: &Blackboard<'_>| ctx.value >= *ctx.limit),
                task(|ctx: &mut Blackboard<'_>| {
                    ctx.value = 0;
                    Status::Success
                }),
            ]),
            task(|ctx: &mut Blackboard<'_>| {
                ctx.value += 1;
                Status::Success
            }),
        ]);

        let mut ctx = Blackboard {
            limit: &limit,
            value: 1,
        };
        tree.tick(&mut ctx);
        assert_eq!(ctx.value, 2);
        tree.tick(&mut ctx);
        assert_eq!(ctx.value, 0);
    }
}

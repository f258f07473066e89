//! Closure-backed leaf nodes.
//!
//! Most leaves in a controller are one-line checks or one-line commits. These
//! wrappers let such leaves be written inline instead of as a unit struct with
//! a hand-written `Behavior` impl.

use crate::{Behavior, Status};

/// Leaf that succeeds when the predicate holds. Never mutates the context.
pub struct Condition<F> {
    predicate: F,
}

impl<F> Condition<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<C, F> Behavior<C> for Condition<F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(ctx))
    }
}

/// Leaf that runs an arbitrary step against the context.
pub struct Task<F> {
    step: F,
}

impl<F> Task<F> {
    pub fn new(step: F) -> Self {
        Self { step }
    }
}

impl<C, F> Behavior<C> for Task<F>
where
    F: Fn(&mut C) -> Status + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (self.step)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sequence;

    #[test]
    fn condition_reads_context() {
        let positive = Condition::new(|value: &i32| *value > 0);

        assert_eq!(positive.tick(&mut 3), Status::Success);
        assert_eq!(positive.tick(&mut -3), Status::Failure);
    }

    #[test]
    fn task_mutates_context_behind_guard() {
        let tree: Sequence<'_, i32> = Sequence::new(vec![
            Box::new(Condition::new(|value: &i32| *value < 10)),
            Box::new(Task::new(|value: &mut i32| {
                *value += 5;
                Status::Success
            })),
        ]);

        let mut value = 7;
        assert_eq!(tree.tick(&mut value), Status::Success);
        assert_eq!(value, 12);
        assert_eq!(tree.tick(&mut value), Status::Failure);
        assert_eq!(value, 12);
    }
}

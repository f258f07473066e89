//! Small deterministic behavior tree for turn-based agent controllers.
//!
//! A tree is evaluated once per activation and always finishes within that
//! call: there is no `Running` status and no notion of elapsed time. The
//! context type `C` is usually a short-lived blackboard that borrows the
//! world for the duration of a single decision, so nodes never own game
//! state themselves.
//!
//! - [`Behavior`]: trait implemented by every node
//! - [`Status`]: `Success` or `Failure`
//! - Composites: [`Sequence`] (AND) and [`Selector`] (OR)
//! - Leaves: [`Condition`] and [`Task`] wrap plain closures

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod leaf;
pub mod status;

pub use behavior::{Behavior, Node};
pub use composite::{Selector, Sequence};
pub use leaf::{Condition, Task};
pub use status::Status;

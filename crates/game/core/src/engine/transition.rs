//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionContext, ActionTransition, RepeatSignal};
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &mut T,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<RepeatSignal, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let signal = transition
        .apply(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(signal)
}

/// Executes an action on behalf of a living actor.
///
/// Bumps `turn.nonce` after every action that did something so consecutive
/// rolls in one tick draw from different seeds.
pub(crate) fn execute_transition(
    action: &mut Action,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<RepeatSignal, ExecuteError> {
    let actor = action.actor();
    match state.actor(actor) {
        None => return Err(ExecuteError::ActorNotFound(actor)),
        Some(state) if !state.is_alive() => return Err(ExecuteError::ActorDead(actor)),
        Some(_) => {}
    }

    let signal = match action {
        Action::Wait(transition) => match drive_transition(transition, state, ctx) {
            Ok(signal) => signal,
            Err(error) => match error.error {},
        },
        Action::Move(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Move)?
        }
        Action::Bump(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Bump)?
        }
        Action::Attack(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Attack)?
        }
        Action::RepeatedMove(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Travel)?
        }
        Action::CarefulMove(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Travel)?
        }
        Action::PathMove(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Travel)?
        }
        Action::Pickup(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Inventory)?
        }
        Action::Drop(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Inventory)?
        }
        Action::UseItem(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Inventory)?
        }
        Action::Equip(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Inventory)?
        }
        Action::TakeStairs(transition) => {
            drive_transition(transition, state, ctx).map_err(ExecuteError::Stairs)?
        }
    };

    if signal.is_acted() {
        state.turn.nonce += 1;
    }
    Ok(signal)
}

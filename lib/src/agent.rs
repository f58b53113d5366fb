use color_eyre::eyre::{OptionExt, Result};
use tracing::debug;

use crate::eval::{Scores, select_target};
use crate::wire::{Board, GameState, MoveDecision, Snake};

pub const SHOUT: &str = "I am a python snake!";

/// Trait that defines a snake agent's decision-making interface.
pub trait Agent: Send + Sync {
    /// Returns the name of this agent for display purposes.
    fn name(&self) -> &str;

    /// Choose a move for `state.you` on `state.board`.
    fn choose_move(&self, state: &GameState) -> Result<MoveDecision>;
}

impl Agent for Box<dyn Agent> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_move(&self, state: &GameState) -> Result<MoveDecision> {
        (**self).choose_move(state)
    }
}

/// Single-turn agent: walk towards the nearest food and steer away from
/// negative coordinates and from cells at or around snake bodies.
pub struct GreedyAgent {
    name: String,
}

impl GreedyAgent {
    pub fn new() -> Self {
        Self::with_name("Greedy")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn decide(&self, board: &Board, you: &Snake) -> Result<MoveDecision> {
        let head = *you.head().ok_or_eyre("snake has an empty body")?;
        let target = select_target(board, head);

        let mut scores = Scores::towards(head, target);
        scores.penalize_off_board(head);
        scores.penalize_occupied(board, head);

        let direction = scores.best();
        debug!(?head, ?target, ?scores, %direction, "Decided move");
        Ok(MoveDecision {
            direction,
            shout: SHOUT.to_string(),
        })
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, state: &GameState) -> Result<MoveDecision> {
        self.decide(&state.board, &state.you)
    }
}

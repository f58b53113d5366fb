pub mod agent;
pub mod eval;
pub mod wire;

pub use agent::{Agent, GreedyAgent, SHOUT};
pub use wire::{
    Board, GameEvent, GameInfo, GameState, Move, MoveDecision, Point, Snake, StartResponse,
    decode_state,
};

//! Request and response bodies of the legacy Battlesnake HTTP API.
//!
//! Only the fields the snake reads are required. Everything descriptive
//! defaults when absent so older and newer engines both decode.

use std::fmt;

use color_eyre::eyre::WrapErr;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A board cell. Signed, since neighbours of an edge cell can be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snake {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub health: i32,
    pub body: Vec<Point>,
}

impl Snake {
    pub fn head(&self) -> Option<&Point> {
        self.body.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub food: Vec<Point>,
    #[serde(default)]
    pub snakes: Vec<Snake>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameInfo {
    #[serde(default)]
    pub id: String,
}

/// Body of `/move`. `board` and `you` are required, the rest is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub game: GameInfo,
    #[serde(default)]
    pub turn: u32,
    pub board: Board,
    pub you: Snake,
}

/// Bodies of `/start` and `/end`. Only used for logging, so nothing is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(default)]
    pub game: GameInfo,
    #[serde(default)]
    pub turn: u32,
    #[serde(default)]
    pub board: Option<Board>,
}

impl GameEvent {
    pub fn snake_count(&self) -> usize {
        self.board.as_ref().map_or(0, |b| b.snakes.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Left,
    Up,
    Right,
    Down,
}

impl Move {
    /// Declaration order, which is also the tie-break order.
    pub const ALL: [Move; 4] = [Move::Left, Move::Up, Move::Right, Move::Down];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The cell one step from `head` in this direction. Up is `y + 1`.
    pub const fn step(self, head: Point) -> Point {
        match self {
            Move::Left => head.offset(-1, 0),
            Move::Up => head.offset(0, 1),
            Move::Right => head.offset(1, 0),
            Move::Down => head.offset(0, -1),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Move::Left => "left",
            Move::Up => "up",
            Move::Right => "right",
            Move::Down => "down",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDecision {
    #[serde(rename = "move")]
    pub direction: Move,
    pub shout: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub color: String,
    pub head_type: String,
    pub tail_type: String,
}

impl Default for StartResponse {
    fn default() -> Self {
        Self {
            color: "#00FF00".to_string(),
            head_type: "regular".to_string(),
            tail_type: "regular".to_string(),
        }
    }
}

/// Parses a raw request body with simd-json.
pub fn decode_state<T: DeserializeOwned>(text: String) -> color_eyre::Result<T> {
    let mut bytes = text.into_bytes();
    simd_json::serde::from_slice(&mut bytes)
        .wrap_err_with(|| format!("failed to decode {}", std::any::type_name::<T>()))
}

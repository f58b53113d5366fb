use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::wire::{Board, Move, Point};

/// Cost of a direction whose cell is off the board or occupied.
pub const BLOCKED_PENALTY: i32 = 10;
/// Cost of a direction with a body segment close to it.
pub const NEARBY_PENALTY: i32 = 1;

/// Cells around the head that count as "nearby", relative to the head.
///
/// Diagonal offsets appear more than once and later entries replace earlier
/// ones, so only eight cells end up mapped. Known quirk, kept as is.
const NEARBY_DECLARED: [((i32, i32), Move); 12] = [
    ((-2, 0), Move::Left),
    ((-1, 1), Move::Left),
    ((-1, -1), Move::Left),
    ((0, 2), Move::Up),
    ((-1, 1), Move::Up),
    ((1, 1), Move::Up),
    ((2, 0), Move::Right),
    ((1, 1), Move::Right),
    ((1, -1), Move::Right),
    ((0, -2), Move::Down),
    ((-1, -1), Move::Down),
    ((1, -1), Move::Down),
];

// Collecting into a map keeps the last value for a repeated key.
static NEARBY: Lazy<AHashMap<(i32, i32), Move>> =
    Lazy::new(|| NEARBY_DECLARED.into_iter().collect());

/// Direction a segment at `offset` from the head is "nearby" to, if any.
pub fn nearby_direction(offset: (i32, i32)) -> Option<Move> {
    NEARBY.get(&offset).copied()
}

/// Direction whose candidate cell sits at `offset` from the head, if any.
fn adjacent_direction(offset: (i32, i32)) -> Option<Move> {
    Move::ALL
        .into_iter()
        .find(|mv| mv.step(Point::new(0, 0)) == Point::new(offset.0, offset.1))
}

/// Closest food by Manhattan distance, first one wins ties.
/// Falls back to `head` when nothing is closer than `width + height`.
pub fn select_target(board: &Board, head: Point) -> Point {
    let mut best = board.width + board.height;
    let mut target = head;
    for food in &board.food {
        let distance = food.manhattan_distance(&head);
        if distance < best {
            best = distance;
            target = *food;
        }
    }
    target
}

/// Per-direction scores, indexed in `Move::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scores([i32; 4]);

impl Scores {
    /// One point for each direction that heads towards `target`.
    ///
    /// `down` compares x like `left` does rather than y. Known quirk.
    pub fn towards(head: Point, target: Point) -> Self {
        let mut scores = Scores::default();
        scores.0[Move::Left.index()] = (target.x < head.x) as i32;
        scores.0[Move::Up.index()] = (target.y > head.y) as i32;
        scores.0[Move::Right.index()] = (target.x > head.x) as i32;
        scores.0[Move::Down.index()] = (target.x < head.x) as i32;
        scores
    }

    pub fn get(&self, mv: Move) -> i32 {
        self.0[mv.index()]
    }

    fn penalize(&mut self, mv: Move, amount: i32) {
        self.0[mv.index()] -= amount;
    }

    /// Only negative coordinates count as off the board.
    pub fn penalize_off_board(&mut self, head: Point) {
        for mv in Move::ALL {
            let cell = mv.step(head);
            if cell.x < 0 || cell.y < 0 {
                self.penalize(mv, BLOCKED_PENALTY);
            }
        }
    }

    /// Walks every segment of every snake, the deciding one included.
    pub fn penalize_occupied(&mut self, board: &Board, head: Point) {
        for snake in &board.snakes {
            for segment in &snake.body {
                let offset = (segment.x - head.x, segment.y - head.y);
                if let Some(mv) = adjacent_direction(offset) {
                    self.penalize(mv, BLOCKED_PENALTY);
                }
                if let Some(mv) = nearby_direction(offset) {
                    self.penalize(mv, NEARBY_PENALTY);
                }
            }
        }
    }

    /// Highest score, earliest in `Move::ALL` on ties.
    pub fn best(&self) -> Move {
        Move::ALL
            .into_iter()
            .fold(Move::Left, |best, mv| {
                if self.get(mv) > self.get(best) {
                    mv
                } else {
                    best
                }
            })
    }
}

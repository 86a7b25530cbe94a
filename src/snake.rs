use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body, head first.
///
/// The body is never empty: every constructor takes at least one segment and
/// [`Snake::advance`] pushes before it pops.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);
        Self { body }
    }

    /// Creates a vertical snake with its head at `head` and the body trailing
    /// downwards, ready to move up.
    #[must_use]
    pub fn vertical(head: Position, length: u16) -> Self {
        let body = (0..i32::from(length.max(1)))
            .map(|offset| Position {
                x: head.x,
                y: head.y + offset,
            })
            .collect();
        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the current tail position (the head for a one-cell snake).
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if `position` hits any segment other than the current tail.
    ///
    /// The tail is skipped unconditionally, including on ticks where the snake
    /// eats and therefore keeps its tail.
    #[must_use]
    pub fn collides_excluding_tail(&self, position: Position) -> bool {
        self.body
            .iter()
            .take(self.body.len() - 1)
            .any(|segment| *segment == position)
    }

    /// Moves the head to `new_head`; drops the tail unless `grow` is set.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Position, Snake};
    use crate::config::GridSize;

    #[test]
    fn vertical_snake_trails_below_head() {
        let snake = Snake::vertical(Position::new(10, 10), 3);

        let segments: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position::new(10, 10),
                Position::new(10, 11),
                Position::new(10, 12)
            ]
        );
        assert_eq!(snake.tail(), Position::new(10, 12));
    }

    #[test]
    fn step_applies_direction_delta() {
        let origin = Position::new(5, 5);

        assert_eq!(origin.step(Direction::Up), Position::new(5, 4));
        assert_eq!(origin.step(Direction::Down), Position::new(5, 6));
        assert_eq!(origin.step(Direction::Left), Position::new(4, 5));
        assert_eq!(origin.step(Direction::Right), Position::new(6, 5));
    }

    #[test]
    fn bounds_check_is_half_open() {
        let bounds = GridSize::square(20);

        assert!(Position::new(0, 0).is_within_bounds(bounds));
        assert!(Position::new(19, 19).is_within_bounds(bounds));
        assert!(!Position::new(20, 5).is_within_bounds(bounds));
        assert!(!Position::new(5, -1).is_within_bounds(bounds));
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::vertical(Position::new(5, 5), 3);

        snake.advance(Position::new(5, 4), false);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 4));
        assert_eq!(snake.tail(), Position::new(5, 6));
    }

    #[test]
    fn advance_with_growth_keeps_previous_tail() {
        let mut snake = Snake::vertical(Position::new(5, 5), 3);

        snake.advance(Position::new(5, 4), true);

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(5, 7));
    }

    #[test]
    fn tail_cell_is_not_a_collision() {
        // Square loop: head at (1,1), tail at (1,2) right below it.
        let snake = Snake::from_segments(vec![
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(2, 2),
            Position::new(1, 2),
        ]);

        assert!(!snake.collides_excluding_tail(Position::new(1, 2)));
        assert!(snake.collides_excluding_tail(Position::new(2, 2)));
        assert!(snake.collides_excluding_tail(Position::new(1, 1)));
    }

    #[test]
    fn single_segment_snake_never_self_collides() {
        let snake = Snake::new(Position::new(3, 3));

        assert!(!snake.collides_excluding_tail(Position::new(3, 3)));
        assert_eq!(snake.head(), snake.tail());
    }
}

use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places food on a random cell the snake does not occupy.
    ///
    /// Returns `None` when the snake covers the whole board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }
}

/// Rejection-samples a free cell: draw uniformly over the board until the
/// candidate is not under the snake.
///
/// Returns `None` without sampling when no free cell exists.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if bounds.total_cells() == 0 || snake.len() >= bounds.total_cells() {
        return None;
    }

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };

        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;

    use super::{spawn_position, Food};
    use crate::snake::{Position, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
        ]);
        let bounds = GridSize::square(6);

        for _ in 0..200 {
            let position = spawn_position(&mut rng, bounds, &snake)
                .expect("board has free cells");
            assert!(!snake.occupies(position));
            assert!(position.is_within_bounds(bounds));
        }
    }

    #[test]
    fn food_finds_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize::square(2);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
        ]);

        let food = Food::spawn(&mut rng, bounds, &snake).expect("one cell is free");

        assert_eq!(food.position, Position::new(0, 1));
    }

    #[test]
    fn full_board_yields_no_food() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = GridSize::square(2);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ]);

        assert_eq!(Food::spawn(&mut rng, bounds, &snake), None);
    }

    #[test]
    fn same_seed_places_food_identically() {
        let bounds = GridSize::square(20);
        let snake = Snake::vertical(Position::new(10, 10), 3);

        let first = spawn_position(&mut StdRng::seed_from_u64(99), bounds, &snake);
        let second = spawn_position(&mut StdRng::seed_from_u64(99), bounds, &snake);

        assert_eq!(first, second);
    }
}

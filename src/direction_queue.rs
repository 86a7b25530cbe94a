use std::collections::VecDeque;

use tracing::trace;

use crate::input::Direction;

/// FIFO of pending turns, filled by input handlers and drained one entry per tick.
///
/// Admission rule: a request is appended only when it is neither equal to nor
/// the reverse of the last wanted direction (the queue tail, or the committed
/// direction when the queue is empty). Adjacent entries therefore always turn
/// by exactly 90 degrees, and the first entry never reverses the snake.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
}

impl DirectionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers `requested` against `last_committed`. Returns whether it was queued.
    pub fn enqueue(&mut self, requested: Direction, last_committed: Direction) -> bool {
        let last_wanted = self.last_wanted().unwrap_or(last_committed);

        if last_wanted.is_same_axis(requested) {
            trace!(?requested, ?last_wanted, "direction request rejected");
            return false;
        }

        self.pending.push_back(requested);
        true
    }

    /// Pops the oldest pending direction.
    pub fn dequeue_next(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    /// Returns the most recently queued direction without removing it.
    #[must_use]
    pub fn last_wanted(&self) -> Option<Direction> {
        self.pending.back().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Iterates over pending directions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::DirectionQueue;

    #[test]
    fn reversal_of_committed_direction_is_rejected() {
        let mut queue = DirectionQueue::new();

        assert!(!queue.enqueue(Direction::Down, Direction::Up));
        assert!(queue.is_empty());
    }

    #[test]
    fn repeat_of_committed_direction_is_rejected() {
        let mut queue = DirectionQueue::new();

        assert!(!queue.enqueue(Direction::Up, Direction::Up));
        assert!(queue.is_empty());
    }

    #[test]
    fn reversal_of_queued_tail_is_rejected() {
        let mut queue = DirectionQueue::new();

        assert!(queue.enqueue(Direction::Left, Direction::Up));
        assert!(!queue.enqueue(Direction::Right, Direction::Up));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.last_wanted(), Some(Direction::Left));
    }

    #[test]
    fn tail_is_checked_instead_of_committed_direction() {
        let mut queue = DirectionQueue::new();

        // Up is the committed direction, but Left is queued, so Down is a legal turn.
        assert!(queue.enqueue(Direction::Left, Direction::Up));
        assert!(queue.enqueue(Direction::Down, Direction::Up));

        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn dequeue_is_fifo() {
        let mut queue = DirectionQueue::new();
        queue.enqueue(Direction::Left, Direction::Up);
        queue.enqueue(Direction::Down, Direction::Up);
        queue.enqueue(Direction::Right, Direction::Up);

        assert_eq!(queue.dequeue_next(), Some(Direction::Left));
        assert_eq!(queue.dequeue_next(), Some(Direction::Down));
        assert_eq!(queue.dequeue_next(), Some(Direction::Right));
        assert_eq!(queue.dequeue_next(), None);
    }

    #[test]
    fn adjacent_entries_are_always_perpendicular() {
        let all = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let mut queue = DirectionQueue::new();
        let committed = Direction::Up;

        for round in 0..64 {
            queue.enqueue(all[(round * 7 + round / 3) % all.len()], committed);
        }

        let entries: Vec<_> = queue.iter().copied().collect();
        if let Some(first) = entries.first() {
            assert!(!committed.is_same_axis(*first));
        }
        for pair in entries.windows(2) {
            assert!(!pair[0].is_same_axis(pair[1]), "bad pair {pair:?}");
        }
    }

    #[test]
    fn clear_empties_queue() {
        let mut queue = DirectionQueue::new();
        queue.enqueue(Direction::Left, Direction::Up);

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.last_wanted(), None);
    }
}

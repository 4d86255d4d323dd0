use std::collections::VecDeque;

use crate::config::{GridSize, INITIAL_SPEED};
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width())),
            y: wrap_axis(self.y, i32::from(bounds.height())),
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

fn wrap_coordinate(value: f64, upper_bound: f64) -> f64 {
    let wrapped = value % upper_bound;
    if wrapped < 0.0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

/// Mutable snake state: body cells, continuous head, heading, and speed.
///
/// The head moves in sub-cell increments of `speed` tiles per tick; the
/// discrete body only advances when the continuous head crosses into a new
/// grid cell. The playfield is toroidal, so movement wraps on both axes and
/// never fails.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    head_x: f64,
    head_y: f64,
    heading: Direction,
    buffered_heading: Direction,
    pub speed: f64,
    alive: bool,
    growing: bool,
}

impl Snake {
    /// Creates a two-cell snake centered on the grid, heading right.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        let head = Position {
            x: i32::from(bounds.width() / 2),
            y: i32::from(bounds.height() / 2),
        };
        let tail = Position {
            x: head.x - 1,
            y: head.y,
        }
        .wrapped(bounds);

        Self::from_segments(vec![head, tail], Direction::Right)
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Self {
        let head = *segments
            .first()
            .expect("snake body must always contain at least one segment");

        Self {
            body: VecDeque::from(segments),
            head_x: f64::from(head.x),
            head_y: f64::from(head.y),
            heading,
            buffered_heading: heading,
            speed: INITIAL_SPEED,
            alive: true,
            growing: false,
        }
    }

    /// Buffers a heading change for the next update.
    ///
    /// Ignored when it would reverse straight into the neck: the exact
    /// opposite of the current heading while the body is longer than one
    /// cell. A single-cell snake has no neck and may turn freely.
    pub fn set_heading(&mut self, direction: Direction) {
        if direction == self.heading.opposite() && self.body.len() > 1 {
            return;
        }
        self.buffered_heading = direction;
    }

    /// Advances the continuous head by one tick and, when it crosses a cell
    /// boundary, steps the discrete body. No-op once dead.
    pub fn update(&mut self, bounds: GridSize) {
        if !self.alive {
            return;
        }

        self.heading = self.buffered_heading;
        let previous_cell = self.head_cell(bounds);

        match self.heading {
            Direction::Up => self.head_y -= self.speed,
            Direction::Down => self.head_y += self.speed,
            Direction::Left => self.head_x -= self.speed,
            Direction::Right => self.head_x += self.speed,
        }
        self.head_x = wrap_coordinate(self.head_x, f64::from(bounds.width()));
        self.head_y = wrap_coordinate(self.head_y, f64::from(bounds.height()));

        let current_cell = self.head_cell(bounds);
        if current_cell != previous_cell {
            self.step_body(current_cell);
        }
    }

    /// Queues one extra cell to be retained on the next discrete step.
    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Drops the tail cell immediately, never shrinking below one cell.
    pub fn shrink(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    fn step_body(&mut self, head: Position) {
        self.body.push_front(head);
        if self.growing {
            self.growing = false;
        } else {
            let _ = self.body.pop_back();
        }

        // Self-collision: the new head against every remaining cell.
        if self.body.iter().skip(1).any(|segment| *segment == head) {
            self.alive = false;
        }
    }

    /// Returns the discrete cell currently containing the head.
    #[must_use]
    pub fn head_cell(&self, bounds: GridSize) -> Position {
        Position {
            x: self.head_x.floor() as i32,
            y: self.head_y.floor() as i32,
        }
        .wrapped(bounds)
    }

    /// Returns true if any body cell equals `position`.
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

    /// Returns false once the head has run into the body.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Returns the heading applied on the most recent update.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    fn bounds(width: u16, height: u16) -> GridSize {
        GridSize::new(width, height).expect("test bounds should be valid")
    }

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = bounds(10, 8);

        assert_eq!(
            Position { x: -1, y: 3 }.wrapped(bounds),
            Position { x: 9, y: 3 }
        );
        assert_eq!(
            Position { x: 4, y: 8 }.wrapped(bounds),
            Position { x: 4, y: 0 }
        );
    }

    #[test]
    fn full_speed_snake_advances_one_cell_per_tick() {
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Direction::Right,
        );
        snake.speed = 1.0;

        snake.update(bounds(10, 10));

        assert_eq!(snake.head_cell(bounds(10, 10)), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 2);
        assert!(snake.occupies(Position { x: 5, y: 5 }));
        assert!(!snake.occupies(Position { x: 4, y: 5 }));
        assert!(snake.is_alive());
    }

    #[test]
    fn sub_cell_speed_only_steps_after_crossing_a_boundary() {
        let grid = bounds(10, 10);
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Direction::Right,
        );
        snake.speed = 0.5;

        snake.update(grid);
        assert_eq!(snake.head_cell(grid), Position { x: 5, y: 5 });
        assert!(snake.occupies(Position { x: 4, y: 5 }));

        snake.update(grid);
        assert_eq!(snake.head_cell(grid), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn movement_wraps_at_the_grid_edge() {
        let grid = bounds(10, 10);
        let mut snake = Snake::from_segments(
            vec![Position { x: 9, y: 5 }, Position { x: 8, y: 5 }],
            Direction::Right,
        );
        snake.speed = 1.0;

        snake.update(grid);

        assert_eq!(snake.head_cell(grid), Position { x: 0, y: 5 });
    }

    #[test]
    fn growth_is_queued_until_the_next_discrete_step() {
        let grid = bounds(10, 10);
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Direction::Right,
        );
        snake.speed = 1.0;

        snake.grow();
        assert_eq!(snake.len(), 2);

        snake.update(grid);
        assert_eq!(snake.len(), 3);

        snake.update(grid);
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn shrink_is_immediate_and_floors_at_one_cell() {
        let mut snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 3, y: 5 },
            ],
            Direction::Right,
        );

        snake.shrink();
        assert_eq!(snake.len(), 2);

        snake.shrink();
        assert_eq!(snake.len(), 1);

        snake.shrink();
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn heading_reversal_is_ignored_while_body_has_a_neck() {
        let grid = bounds(10, 10);
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Direction::Right,
        );
        snake.speed = 1.0;

        snake.set_heading(Direction::Left);
        snake.update(grid);

        assert_eq!(snake.head_cell(grid), Position { x: 6, y: 5 });
    }

    #[test]
    fn single_cell_snake_may_reverse() {
        let grid = bounds(10, 10);
        let mut snake = Snake::from_segments(vec![Position { x: 5, y: 5 }], Direction::Right);
        snake.speed = 1.0;

        snake.set_heading(Direction::Left);
        snake.update(grid);

        assert_eq!(snake.head_cell(grid), Position { x: 4, y: 5 });
    }

    #[test]
    fn heading_changes_apply_on_the_next_update_not_mid_step() {
        let grid = bounds(10, 10);
        let mut snake = Snake::from_segments(
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Direction::Right,
        );
        snake.speed = 1.0;

        snake.update(grid);
        snake.set_heading(Direction::Up);
        snake.update(grid);

        assert_eq!(snake.head_cell(grid), Position { x: 6, y: 4 });
    }

    #[test]
    fn head_entering_own_body_kills_the_snake_and_freezes_it() {
        let grid = bounds(10, 10);
        // Hook shape: moving left from (2,2) into (1,2) hits the body.
        let mut snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 1 },
            ],
            Direction::Left,
        );
        snake.speed = 1.0;

        snake.update(grid);
        assert!(!snake.is_alive());
        let frozen_head = snake.head_cell(grid);
        let frozen_len = snake.len();

        snake.update(grid);
        assert_eq!(snake.head_cell(grid), frozen_head);
        assert_eq!(snake.len(), frozen_len);
    }

    #[test]
    fn vacated_tail_cell_does_not_count_as_a_collision() {
        let grid = bounds(10, 10);
        // A 2x2 loop of four cells: the head moves into the cell the tail
        // vacates on the same step, which is legal.
        let mut snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
            ],
            Direction::Left,
        );
        snake.speed = 1.0;

        snake.update(grid);

        assert!(snake.is_alive());
        assert_eq!(snake.head_cell(grid), Position { x: 1, y: 2 });
    }
}

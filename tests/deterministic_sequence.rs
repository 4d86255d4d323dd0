use torus_snake::config::{GridSize, SPEED_STEP};
use torus_snake::game::{GameState, GameStatus};
use torus_snake::input::{Direction, GameInput};
use torus_snake::items::ItemSet;
use torus_snake::snake::{Position, Snake};

fn planted_items(points: &[(i32, i32)]) -> ItemSet {
    let mut set = ItemSet::new();
    for &(x, y) in points {
        set.insert(Position { x, y });
    }
    set
}

#[test]
fn full_speed_step_moves_the_body_one_cell() {
    let grid = GridSize::new(10, 10).expect("grid");
    let mut state = GameState::new_with_seed(grid, 5, 42).expect("state");
    state.snake = Snake::from_segments(
        vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
        Direction::Right,
    );
    state.snake.speed = 1.0;
    state.food = planted_items(&[(0, 0), (9, 0), (0, 9), (9, 9), (0, 4)]);
    state.poison = planted_items(&[(1, 9), (2, 9), (3, 9), (4, 9), (5, 9)]);

    state.tick();

    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.snake.head_cell(grid), Position { x: 6, y: 5 });
    assert!(state.snake.occupies(Position { x: 5, y: 5 }));
    assert!(!state.snake.occupies(Position { x: 4, y: 5 }));
    assert_eq!(state.snake.len(), 2);
    assert_eq!(state.score, 0);
}

#[test]
fn stepwise_food_collection_keeps_the_set_replenished() {
    let grid = GridSize::new(10, 10).expect("grid");
    let mut state = GameState::new_with_seed(grid, 5, 42).expect("state");
    state.snake = Snake::from_segments(
        vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
        Direction::Right,
    );
    state.snake.speed = 1.0;
    state.food = planted_items(&[(6, 5), (0, 0), (9, 0), (0, 9), (9, 9)]);
    state.poison = planted_items(&[(1, 9), (2, 9), (3, 9), (4, 9), (5, 9)]);

    state.tick();

    assert_eq!(state.score, 1);
    assert!((state.snake.speed - (1.0 + SPEED_STEP)).abs() < 1e-9);
    assert_eq!(state.food.len(), 5, "eaten point is replaced");
    assert!(!state.food.occupies(Position { x: 6, y: 5 }));
    for point in state.food.iter() {
        assert!(!state.snake.occupies(*point));
        assert!(!state.poison.occupies(*point));
    }

    // Growth queued on the food tick lands on the next discrete step.
    state.tick();
    assert_eq!(state.snake.len(), 3);
    assert_eq!(state.score, 1);
}

#[test]
fn toroidal_walk_around_the_board_returns_home() {
    let grid = GridSize::new(10, 10).expect("grid");
    let mut state = GameState::new_with_seed(grid, 5, 7).expect("state");
    state.snake = Snake::from_segments(
        vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
        Direction::Right,
    );
    state.snake.speed = 1.0;
    state.food = planted_items(&[(0, 0), (9, 0), (0, 9), (9, 9), (0, 4)]);
    state.poison = planted_items(&[(1, 9), (2, 9), (3, 9), (4, 9), (5, 9)]);

    for _ in 0..10 {
        state.tick();
    }

    assert_eq!(state.status, GameStatus::Running);
    assert_eq!(state.snake.head_cell(grid), Position { x: 5, y: 5 });
    assert_eq!(state.snake.len(), 2);
}

#[test]
fn boxed_in_turn_sequence_ends_the_run() {
    let grid = GridSize::new(10, 10).expect("grid");
    let mut state = GameState::new_with_seed(grid, 5, 11).expect("state");
    state.snake = Snake::from_segments(
        vec![
            Position { x: 5, y: 5 },
            Position { x: 4, y: 5 },
            Position { x: 3, y: 5 },
            Position { x: 3, y: 4 },
            Position { x: 4, y: 4 },
            Position { x: 5, y: 4 },
            Position { x: 6, y: 4 },
        ],
        Direction::Right,
    );
    state.snake.speed = 1.0;
    state.food = planted_items(&[(0, 0), (9, 0), (0, 9), (9, 9), (0, 4)]);
    state.poison = planted_items(&[(1, 9), (2, 9), (3, 9), (4, 9), (5, 9)]);

    // Turn up into the row occupied by the back half of the body.
    state.apply_input(GameInput::Direction(Direction::Up));
    state.tick();

    assert_eq!(state.status, GameStatus::Stopped);

    let score = state.score;
    let length = state.snake.len();
    state.tick();
    assert_eq!(state.score, score);
    assert_eq!(state.snake.len(), length);
}

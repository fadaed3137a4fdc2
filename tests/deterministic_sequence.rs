use snake::board::Cell;
use snake::game::{GameSession, SessionStatus, StepOutcome};
use snake::input::Direction;
use snake::score::MemoryScoreStore;
use snake::snake::Snake;

fn started(seed: u64) -> GameSession {
    let mut session = GameSession::new_with_seed(Box::new(MemoryScoreStore::default()), seed);
    session.start(|| Some("sequence".to_owned()));
    session
}

#[test]
fn step_without_food_slides_the_snake() {
    let mut session = started(1);
    session.food = Cell::new(5, 5);

    assert_eq!(session.step(), StepOutcome::Moved);
    assert_eq!(session.check_collision(), None);
    assert_eq!(
        session.snake.to_vec(),
        vec![Cell::new(11, 10), Cell::new(10, 10)]
    );
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut session = started(42);
    session.food = Cell::new(11, 10);

    session.step();
    assert_eq!(session.score, 1);
    assert_eq!(session.snake.len(), 3);
    for segment in session.snake.segments() {
        assert_ne!(*segment, session.food);
    }

    session.food = Cell::new(20, 20);
    session.set_direction(Direction::Up);
    for _ in 0..9 {
        session.step();
        assert_eq!(session.check_collision(), None);
    }
    assert_eq!(session.snake.head(), Cell::new(11, 1));

    session.step();
    assert!(session.check_collision().is_some());
    session.reset();

    assert_eq!(session.status(), SessionStatus::Idle);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].name, "sequence");
    assert_eq!(session.history()[0].value, 1);
    assert_eq!(session.high_score(), 1);
}

#[test]
fn leaving_through_the_left_edge_records_the_score() {
    let mut session = started(7);
    session.snake = Snake::from_segments(vec![Cell::new(1, 5), Cell::new(2, 5)]);
    session.set_direction(Direction::Left);
    session.score = 3;

    session.step();
    assert_eq!(session.snake.head(), Cell::new(0, 5));
    assert!(session.check_collision().is_some());
    session.reset();

    assert_eq!(session.history()[0].value, 3);
    assert_eq!(session.tick_interval_ms(), 200);
    assert_eq!(session.direction, Direction::Right);
}

#[test]
fn history_stays_capped_and_sorted_across_sessions() {
    let mut session = GameSession::new_with_seed(Box::new(MemoryScoreStore::default()), 9);

    for score in [4, 12, -2, 7, 0, 9, 3, 15, 1, 6, 8, 2] {
        session.start(|| None);
        session.score = score;
        session.reset();
    }

    let values: Vec<i32> = session.history().iter().map(|entry| entry.value).collect();
    assert_eq!(values, vec![15, 12, 9, 8, 7, 6, 4, 3, 2, 1]);
    assert_eq!(session.high_score(), 15);
}

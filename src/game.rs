use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::board::{self, Cell};
use crate::clock::{SimulationClock, TimerKind};
use crate::config::{
    DEFAULT_PLAYER_NAME, FOOD_RELOCATE_INTERVAL_MS, INITIAL_TICK_INTERVAL_MS,
    SPECIAL_ITEM_INTERVAL_MS, SPECIAL_ITEM_LIFETIME_MS, next_tick_interval,
};
use crate::input::Direction;
use crate::score::{ScoreEntry, ScoreStore, record_score};
use crate::snake::Snake;
use crate::spawner::{SpecialItem, SpecialKind, generate_food, maybe_generate_special_item};

/// Segments added by a Growth item and removed by a Shrink item.
const SPECIAL_ITEM_SEGMENTS: usize = 3;

/// Whether a session is being played.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionStatus {
    Idle,
    Running,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// What one movement step did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// No session running; nothing moved.
    Idle,
    Moved,
    AteFood,
    AteSpecial(SpecialKind),
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RenderFrame {
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub special_item: Option<SpecialItem>,
    pub score: i32,
    pub running: bool,
}

/// Output events for the renderer and the rest of the front-end.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GameEvent {
    Render(RenderFrame),
    SessionEnded {
        player: String,
        score: i32,
        reason: Option<EndReason>,
        new_high_score: bool,
    },
}

/// One player's game: entity state, score bookkeeping and the timers driving it.
pub struct GameSession {
    pub snake: Snake,
    pub food: Cell,
    pub special_item: Option<SpecialItem>,
    pub direction: Direction,
    pub score: i32,
    status: SessionStatus,
    tick_interval_ms: u64,
    player_name: Option<String>,
    high_score: i32,
    history: Vec<ScoreEntry>,
    pending_end_reason: Option<EndReason>,
    clock: SimulationClock,
    rng: StdRng,
    store: Box<dyn ScoreStore>,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates an idle session seeded from OS entropy.
    #[must_use]
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(store: Box<dyn ScoreStore>, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(store: Box<dyn ScoreStore>, mut rng: StdRng) -> Self {
        let snake = Snake::initial();
        let food = generate_food(&mut rng, &snake).unwrap_or(Cell::new(1, 1));
        let high_score = store.high_score();
        let history = store.score_history();

        Self {
            snake,
            food,
            special_item: None,
            direction: Direction::Right,
            score: 0,
            status: SessionStatus::Idle,
            tick_interval_ms: INITIAL_TICK_INTERVAL_MS,
            player_name: None,
            high_score,
            history,
            pending_end_reason: None,
            clock: SimulationClock::new(),
            rng,
            store,
            events: Vec::new(),
        }
    }

    /// Begins a session unless one is already running.
    ///
    /// `ask_name` is consulted only until a name has been captured; a blank or
    /// missing answer records the player as "Anonymous".
    pub fn start<F>(&mut self, ask_name: F)
    where
        F: FnOnce() -> Option<String>,
    {
        if self.status == SessionStatus::Running {
            return;
        }

        if self.player_name.is_none() {
            let name = ask_name()
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_owned());
            self.player_name = Some(name);
        }

        self.status = SessionStatus::Running;
        self.score = 0;

        self.clock
            .arm_periodic(TimerKind::Movement, self.tick_interval_ms);
        self.clock
            .arm_periodic(TimerKind::FoodRelocation, FOOD_RELOCATE_INTERVAL_MS);
        self.clock
            .arm_periodic(TimerKind::SpecialItemSpawn, SPECIAL_ITEM_INTERVAL_MS);

        tracing::info!(player = self.player_name(), "session started");
        self.emit_render();
    }

    /// Sets the direction consumed by the next movement tick.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advances the snake one cell.
    ///
    /// Food takes priority over a special item on the same cell. Collisions
    /// are left for [`GameSession::check_collision`].
    pub fn step(&mut self) -> StepOutcome {
        if self.status != SessionStatus::Running {
            return StepOutcome::Idle;
        }

        let new_head = self.snake.head().step(self.direction);

        if new_head == self.food {
            self.snake.grow(new_head);
            self.score += 1;
            self.tick_interval_ms = next_tick_interval(self.tick_interval_ms);
            self.clock
                .arm_periodic(TimerKind::Movement, self.tick_interval_ms);
            tracing::debug!(
                score = self.score,
                tick_interval_ms = self.tick_interval_ms,
                "food eaten"
            );

            // A special item under the food is consumed without effect.
            if self.special_item.is_some_and(|item| item.position == new_head) {
                self.special_item = None;
                self.clock.cancel(TimerKind::SpecialItemDespawn);
            }

            match generate_food(&mut self.rng, &self.snake) {
                Some(food) => self.food = food,
                None => self.pending_end_reason = Some(EndReason::BoardFilled),
            }
            return StepOutcome::AteFood;
        }

        if let Some(item) = self
            .special_item
            .filter(|item| item.position == new_head)
        {
            self.snake.advance(new_head);
            match item.kind {
                SpecialKind::Growth => {
                    self.snake.extend_tail(SPECIAL_ITEM_SEGMENTS);
                    self.score += 3;
                }
                SpecialKind::Shrink => self.snake.shrink(SPECIAL_ITEM_SEGMENTS),
            }
            self.score -= 1;
            self.special_item = None;
            self.clock.cancel(TimerKind::SpecialItemDespawn);
            tracing::debug!(kind = ?item.kind, score = self.score, "special item eaten");
            return StepOutcome::AteSpecial(item.kind);
        }

        self.snake.advance(new_head);
        StepOutcome::Moved
    }

    /// Returns why the current head position ends the session, if it does.
    #[must_use]
    pub fn check_collision(&self) -> Option<EndReason> {
        if !board::is_in_bounds(self.snake.head()) {
            return Some(EndReason::WallCollision);
        }

        if self.snake.head_overlaps_body() {
            return Some(EndReason::SelfCollision);
        }

        None
    }

    /// Ends the running session: records the score, stops every timer and
    /// restores the initial board. Does nothing while idle, so a repeated call
    /// cannot record the same session twice.
    ///
    /// The current score is kept for display until the next [`GameSession::start`].
    pub fn reset(&mut self) {
        if self.status != SessionStatus::Running {
            return;
        }

        let reason = self.pending_end_reason.take();
        let player = self.player_name().to_owned();

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
            if let Err(error) = self.store.set_high_score(self.high_score) {
                tracing::warn!(%error, "failed to save high score");
            }
        }

        record_score(
            &mut self.history,
            ScoreEntry {
                name: player.clone(),
                value: self.score,
            },
        );
        if let Err(error) = self.store.set_score_history(&self.history) {
            tracing::warn!(%error, "failed to save score history");
        }

        self.clock.cancel_all();
        self.status = SessionStatus::Idle;
        self.snake = Snake::initial();
        self.food = generate_food(&mut self.rng, &self.snake).unwrap_or(Cell::new(1, 1));
        self.special_item = None;
        self.direction = Direction::Right;
        self.tick_interval_ms = INITIAL_TICK_INTERVAL_MS;

        tracing::info!(%player, score = self.score, ?reason, new_high_score, "session ended");
        self.events.push(GameEvent::SessionEnded {
            player,
            score: self.score,
            reason,
            new_high_score,
        });
        self.emit_render();
    }

    /// Runs every trigger that falls due within the next `elapsed`, in due order.
    pub fn advance(&mut self, elapsed: Duration) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let until = self.clock.now().saturating_add(elapsed_ms);

        while let Some(kind) = self.clock.pop_due(until) {
            self.on_timer(kind);
        }
        self.clock.settle(until);
    }

    fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Movement => self.on_movement(),
            TimerKind::FoodRelocation => {
                if let Some(food) = generate_food(&mut self.rng, &self.snake) {
                    self.food = food;
                }
                self.emit_render();
            }
            TimerKind::SpecialItemSpawn => {
                if let Some(item) = maybe_generate_special_item(&mut self.rng, &self.snake) {
                    tracing::debug!(kind = ?item.kind, x = item.position.x, y = item.position.y, "special item spawned");
                    self.special_item = Some(item);
                    self.clock
                        .arm_once(TimerKind::SpecialItemDespawn, SPECIAL_ITEM_LIFETIME_MS);
                }
                self.emit_render();
            }
            TimerKind::SpecialItemDespawn => {
                if self.special_item.take().is_some() {
                    self.emit_render();
                }
            }
        }
    }

    fn on_movement(&mut self) {
        self.step();

        if let Some(reason) = self.check_collision() {
            self.pending_end_reason = Some(reason);
        }
        if self.pending_end_reason.is_some() {
            self.reset();
            return;
        }

        self.emit_render();
    }

    fn emit_render(&mut self) {
        let frame = self.snapshot();
        self.events.push(GameEvent::Render(frame));
    }

    /// Takes every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current renderable state.
    #[must_use]
    pub fn snapshot(&self) -> RenderFrame {
        RenderFrame {
            snake: self.snake.to_vec(),
            food: self.food,
            special_item: self.special_item,
            score: self.score,
            running: self.is_running(),
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Current movement interval in milliseconds.
    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    #[must_use]
    pub fn high_score(&self) -> i32 {
        self.high_score
    }

    #[must_use]
    pub fn history(&self) -> &[ScoreEntry] {
        &self.history
    }

    /// Name captured at the first start, or the default before that.
    #[must_use]
    pub fn player_name(&self) -> &str {
        self.player_name.as_deref().unwrap_or(DEFAULT_PLAYER_NAME)
    }

    #[must_use]
    pub fn has_player_name(&self) -> bool {
        self.player_name.is_some()
    }

    /// Read access to the trigger schedule.
    #[must_use]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::board::Cell;
    use crate::clock::TimerKind;
    use crate::input::Direction;
    use crate::score::MemoryScoreStore;
    use crate::snake::Snake;
    use crate::spawner::{SpecialItem, SpecialKind};

    use super::{EndReason, GameEvent, GameSession, SessionStatus, StepOutcome};

    fn running_session(seed: u64) -> GameSession {
        let mut session = GameSession::new_with_seed(Box::new(MemoryScoreStore::default()), seed);
        session.start(|| Some("tester".to_owned()));
        session.food = Cell::new(5, 5);
        session
    }

    fn row_snake(len: i32) -> Snake {
        Snake::from_segments((0..len).map(|i| Cell::new(10 - i, 10)).collect())
    }

    #[test]
    fn new_session_is_idle_with_food_off_the_snake() {
        let session = GameSession::new_with_seed(Box::new(MemoryScoreStore::default()), 1);

        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.snake, Snake::initial());
        assert!(!session.snake.occupies(session.food));
        assert!(!session.clock().is_armed(TimerKind::Movement));
    }

    #[test]
    fn start_arms_all_three_triggers_and_zeroes_score() {
        let mut session = GameSession::new_with_seed(Box::new(MemoryScoreStore::default()), 2);
        session.score = 9;

        session.start(|| None);

        assert!(session.is_running());
        assert_eq!(session.score, 0);
        assert_eq!(session.player_name(), "Anonymous");
        assert_eq!(session.clock().period(TimerKind::Movement), Some(200));
        assert_eq!(session.clock().period(TimerKind::FoodRelocation), Some(5_000));
        assert_eq!(session.clock().period(TimerKind::SpecialItemSpawn), Some(5_000));
    }

    #[test]
    fn name_is_asked_once_and_blank_becomes_anonymous() {
        let mut session = GameSession::new_with_seed(Box::new(MemoryScoreStore::default()), 3);
        session.start(|| Some("   ".to_owned()));
        assert_eq!(session.player_name(), "Anonymous");

        session.reset();
        let mut asked = false;
        session.start(|| {
            asked = true;
            Some("late".to_owned())
        });

        assert!(!asked);
        assert_eq!(session.player_name(), "Anonymous");
    }

    #[test]
    fn plain_step_keeps_length() {
        let mut session = running_session(4);

        assert_eq!(session.step(), StepOutcome::Moved);

        assert_eq!(
            session.snake.to_vec(),
            vec![Cell::new(11, 10), Cell::new(10, 10)]
        );
    }

    #[test]
    fn eating_food_grows_scores_and_speeds_up() {
        let mut session = running_session(5);
        session.food = Cell::new(11, 10);

        assert_eq!(session.step(), StepOutcome::AteFood);

        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.score, 1);
        assert_eq!(session.tick_interval_ms(), 195);
        assert_eq!(session.clock().period(TimerKind::Movement), Some(195));
        assert!(!session.snake.occupies(session.food));
    }

    #[test]
    fn growth_item_adds_three_segments_and_two_points() {
        let mut session = running_session(6);
        session.special_item = Some(SpecialItem {
            position: Cell::new(11, 10),
            kind: SpecialKind::Growth,
        });

        assert_eq!(session.step(), StepOutcome::AteSpecial(SpecialKind::Growth));

        assert_eq!(session.snake.len(), 5);
        assert_eq!(session.score, 2);
        assert_eq!(session.special_item, None);
        assert!(!session.clock().is_armed(TimerKind::SpecialItemDespawn));
        assert_eq!(session.check_collision(), None);
    }

    #[test]
    fn shrink_item_cuts_three_segments_and_costs_a_point() {
        let mut session = running_session(7);
        session.snake = row_snake(7);
        session.special_item = Some(SpecialItem {
            position: Cell::new(11, 10),
            kind: SpecialKind::Shrink,
        });

        session.step();

        assert_eq!(session.snake.len(), 4);
        assert_eq!(session.score, -1);
    }

    #[test]
    fn shrink_item_stops_at_two_segments() {
        let mut session = running_session(8);
        session.snake = row_snake(3);
        session.special_item = Some(SpecialItem {
            position: Cell::new(11, 10),
            kind: SpecialKind::Shrink,
        });

        session.step();

        assert_eq!(session.snake.len(), 2);
        assert_eq!(session.snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn food_wins_over_special_item_on_the_same_cell() {
        let mut session = running_session(9);
        session.food = Cell::new(11, 10);
        session.special_item = Some(SpecialItem {
            position: Cell::new(11, 10),
            kind: SpecialKind::Shrink,
        });

        assert_eq!(session.step(), StepOutcome::AteFood);
        assert_eq!(session.score, 1);
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.special_item, None);
        assert!(!session.clock().is_armed(TimerKind::SpecialItemDespawn));
    }

    #[test]
    fn special_item_elsewhere_survives_eating_food() {
        let mut session = running_session(9);
        session.food = Cell::new(11, 10);
        let item = SpecialItem {
            position: Cell::new(3, 3),
            kind: SpecialKind::Growth,
        };
        session.special_item = Some(item);

        assert_eq!(session.step(), StepOutcome::AteFood);
        assert_eq!(session.special_item, Some(item));
    }

    #[test]
    fn advancing_to_the_end_of_time_does_not_overflow() {
        let mut session = GameSession::new_with_seed(Box::new(MemoryScoreStore::default()), 12);
        session.advance(Duration::MAX);

        session.start(|| None);
        session.food = Cell::new(1, 1);
        session.advance(Duration::from_millis(200));

        assert_eq!(session.clock().now(), u64::MAX);
        assert!(session.is_running());
        assert_eq!(session.snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn collision_kinds_are_distinguished() {
        let mut session = running_session(10);
        session.snake = Snake::from_segments(vec![Cell::new(0, 5), Cell::new(1, 5)]);
        assert_eq!(session.check_collision(), Some(EndReason::WallCollision));

        session.snake = Snake::from_segments(vec![
            Cell::new(2, 2),
            Cell::new(3, 2),
            Cell::new(3, 3),
            Cell::new(2, 3),
            Cell::new(2, 2),
        ]);
        assert_eq!(session.check_collision(), Some(EndReason::SelfCollision));
    }

    #[test]
    fn wall_collision_resets_through_the_movement_trigger() {
        let mut session = running_session(11);
        session.snake = Snake::from_segments(vec![Cell::new(1, 5), Cell::new(2, 5)]);
        session.direction = Direction::Left;
        session.score = 4;
        session.drain_events();

        session.advance(Duration::from_millis(200));

        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.snake, Snake::initial());
        assert_eq!(session.direction, Direction::Right);
        assert_eq!(session.score, 4);
        assert_eq!(session.high_score(), 4);
        assert_eq!(session.history().len(), 1);
        assert!(TimerKind::ALL.iter().all(|kind| !session.clock().is_armed(*kind)));

        let events = session.drain_events();
        assert!(events.iter().any(|event| matches!(
            event,
            GameEvent::SessionEnded {
                reason: Some(EndReason::WallCollision),
                score: 4,
                new_high_score: true,
                ..
            }
        )));
    }

    #[test]
    fn reset_twice_records_once() {
        let mut session = running_session(12);

        session.reset();
        session.reset();

        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn reset_keeps_score_until_next_start() {
        let mut session = running_session(13);
        session.score = 6;

        session.reset();
        assert_eq!(session.score, 6);
        assert_eq!(session.snapshot().score, 6);

        session.start(|| None);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn lower_score_does_not_touch_high_score() {
        let store = MemoryScoreStore {
            high_score: 50,
            ..MemoryScoreStore::default()
        };
        let mut session = GameSession::new_with_seed(Box::new(store), 14);
        session.start(|| None);
        session.score = 3;

        session.reset();

        assert_eq!(session.high_score(), 50);
    }

    #[test]
    fn special_item_despawns_after_its_lifetime() {
        let mut session = running_session(15);
        session.special_item = Some(SpecialItem {
            position: Cell::new(1, 1),
            kind: SpecialKind::Growth,
        });
        session.clock.arm_once(TimerKind::SpecialItemDespawn, 3_000);
        session.clock.cancel(TimerKind::Movement);

        session.advance(Duration::from_millis(2_999));
        assert!(session.special_item.is_some());

        session.advance(Duration::from_millis(1));
        assert_eq!(session.special_item, None);
    }

    #[test]
    fn food_relocation_trigger_moves_food_every_five_seconds() {
        let mut session = running_session(17);
        session.clock.cancel(TimerKind::Movement);
        session.clock.cancel(TimerKind::SpecialItemSpawn);
        session.drain_events();

        session.advance(Duration::from_millis(4_999));
        assert_eq!(session.food, Cell::new(5, 5));
        assert!(session.drain_events().is_empty());

        session.advance(Duration::from_millis(1));
        assert!(!session.snake.occupies(session.food));
        assert_eq!(session.drain_events().len(), 1);
        assert_eq!(session.clock().due_at(TimerKind::FoodRelocation), Some(10_000));
    }

    #[test]
    fn special_item_trigger_arms_a_despawn_deadline() {
        let mut session = running_session(18);
        session.clock.cancel(TimerKind::Movement);
        session.clock.cancel(TimerKind::FoodRelocation);

        for _ in 0..20 {
            session.advance(Duration::from_millis(5_000));
            if session.special_item.is_some() {
                break;
            }
        }

        let item = session.special_item.expect("an item spawns within twenty rolls");
        assert!(!session.snake.occupies(item.position));
        assert_eq!(
            session.clock().due_at(TimerKind::SpecialItemDespawn),
            Some(session.clock().now() + 3_000)
        );
    }

    #[test]
    fn steps_while_idle_do_nothing() {
        let mut session = GameSession::new_with_seed(Box::new(MemoryScoreStore::default()), 16);

        assert_eq!(session.step(), StepOutcome::Idle);
        session.advance(Duration::from_secs(60));

        assert_eq!(session.snake, Snake::initial());
        assert!(session.drain_events().is_empty());
    }
}

//! Grid snake with timed food relocation and special items.
//!
//! The simulation lives in [`game::GameSession`], driven by the virtual timers
//! of [`clock::SimulationClock`]. The terminal front-end in `main.rs` feeds it
//! wall time and key presses and draws the [`game::GameEvent`]s it emits.

pub mod board;
pub mod clock;
pub mod config;
pub mod game;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod spawner;
pub mod terminal_runtime;
pub mod ui;

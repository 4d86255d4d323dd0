//! Snake on a toroidal grid.
//!
//! The playfield wraps on both axes, so the walls never kill you — only your
//! own tail does. Food grows the snake and speeds it up; poison shrinks it
//! and slows it down, and the score can go negative.
//!
//! The simulation core lives in [`snake`], [`items`], and [`game`]; the
//! terminal shell (input, rendering, pacing) lives in the remaining modules
//! and only ever reads simulation state between ticks.

pub mod config;
pub mod game;
pub mod input;
pub mod items;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

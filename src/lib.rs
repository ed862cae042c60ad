//! Extreme Dodge: a pointer-chasing arcade dodger.
//!
//! The player circle trails the pointer while homing enemies pour in from
//! just outside the viewport edges. Enemies that collide with each other
//! explode into debris; one touching the player ends the run. Score,
//! difficulty, and the spawn rate all climb the longer the run lasts.
//!
//! The simulation is plain data over Bevy ECS: components in [`player`],
//! [`enemy`], and [`particles`], the per-tick contract in [`simulation`],
//! and the pure helpers in [`geometry`] and [`color`]. Everything outside
//! [`rendering`] runs headless, which is how the integration tests drive it.

pub mod app;
pub mod color;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod error;
pub mod geometry;
pub mod menu;
pub mod particles;
pub mod player;
pub mod rendering;
pub mod simulation;
pub mod state;
pub mod viewport;

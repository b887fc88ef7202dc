//! A terminal space shooter.
//!
//! The player's ship defends against a descending squadron of aliens behind
//! indestructible barriers.  The library holds the whole game: the entity
//! model, the per-tick simulation, collision rules, the session state
//! machine, and the terminal collaborators (renderer, sprites, sound, score
//! file).  The binary only wires them to a real terminal.

pub mod assets;
pub mod audio;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod logging;
pub mod score_store;
pub mod scoreboard;
pub mod session;

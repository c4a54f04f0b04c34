//! # Boss Rush
//!
//! Combat simulation for a 3D boss-fight action game, built on
//! `arena_engine`. The crate is the whole fight: player behaviors and the
//! melee combo, the boss state machine and its projectiles, and the frame
//! loop that ties them together through a collision pass.
//!
//! The simulation is headless and deterministic: rendering, audio, and
//! particles are consumed through engine ports, and all randomness flows
//! through one seeded rng.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod boss;
pub mod combo;
pub mod config;
pub mod health;
pub mod laser;
pub mod missile;
pub mod player;
pub mod world;

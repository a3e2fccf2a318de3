//! Letter Boxed: a word-chain puzzle played on the sides of a letter polygon.
//!
//! The engine lives in [`game`]; [`terminal`] drives it from stdin.

pub mod config;
pub mod dictionary;
pub mod game;
pub mod models;
pub mod terminal;
pub mod utils;

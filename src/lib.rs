//! Rule engine for a four-seat race-and-capture board game.
//!
//! [`ludo::Game`] holds the match and resolves every die roll,
//! [`table::Table`] shares one game between connections behind a single lock,
//! and [`engine`] plays random matches in bulk.

pub mod engine;
pub mod ludo;
pub mod table;

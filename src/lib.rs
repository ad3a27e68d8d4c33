//! A basic and scientific calculator with history, a memory register and
//! optional per-user persistence.
//!
//! The core is [`calculator::CalculatorState`], a reducer over keypad
//! [`calculator::Action`]s. [`session::Session`] wraps it with history,
//! settings and background mirroring to a [`persistence::PersistenceAdapter`].

pub mod auth;
pub mod calculator;
pub mod config;
pub mod error;
pub mod history;
pub mod notice;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod ui;

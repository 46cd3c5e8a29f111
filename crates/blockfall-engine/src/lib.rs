//! Falling-block puzzle engine.
//!
//! [`core`] holds the data model (shapes, the piece catalog, the board and pieces);
//! [`engine`] holds the rules that play a game on top of it. Rendering and input are left to
//! the caller, which talks to a [`GameSession`] through [`Command`] and [`SessionSnapshot`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

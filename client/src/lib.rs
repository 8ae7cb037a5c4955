//! # Match Client Library
//!
//! Viewer/controller for the match server. The client never simulates:
//! it mirrors whatever the authoritative server broadcasts and answers
//! each snapshot with one direction byte.
//!
//! Rendering and keyboard handling are deliberately outside this crate.
//! [`game::ClientGameState`] is the data a renderer would draw, and
//! [`input::InputSource`] is the seam where key polling would plug in;
//! the built-in sources are headless.

pub mod game;
pub mod input;
pub mod network;

//! Widget builders for the two sections of the window
//!
//! Pure functions of the state; all messages they emit are handled in
//! the main update loop.

pub mod form;
pub mod gallery;

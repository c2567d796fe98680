//! Application state
//!
//! This module holds everything the UI renders from, kept free of any
//! iced types so the transitions stay unit-testable:
//! - The form/submission state machine (form.rs)
//! - Operation selection and parameter fields (operation.rs)
//! - The per-user gallery list and its refresh tokens (gallery.rs)
//! - The display-image lifecycle (preview.rs)

pub mod form;
pub mod gallery;
pub mod operation;
pub mod preview;

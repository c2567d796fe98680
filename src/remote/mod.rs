//! Talking to the remote image-processing service
//!
//! Two endpoints carry the whole application: `POST /images/process`
//! transforms an uploaded image, `GET /list-images` lists a user's
//! previous results. Processed images are additionally served as static
//! assets the client can fetch back for display.

pub mod client;
pub mod error;

pub use client::RemoteClient;
pub use error::RemoteError;

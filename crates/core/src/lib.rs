//! Domain types shared by the navdir crates.
//!
//! - [`entry`] -- navigation entries, partial field payloads, category projection.
//! - [`session`] -- the in-memory administrator session registry.
//! - [`clock`] -- time source injected into the session registry.
//! - [`error`] -- domain error taxonomy mapped to HTTP statuses by the API crate.

pub mod clock;
pub mod entry;
pub mod error;
pub mod session;
pub mod types;

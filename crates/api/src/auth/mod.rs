//! Administrator authentication primitives.
//!
//! - [`password`] -- verification of a login attempt against the configured secret.

pub mod password;

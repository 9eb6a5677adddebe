//! Request guards.
//!
//! - [`session::RequireSession`] -- admits only callers holding a live admin session.

pub mod session;

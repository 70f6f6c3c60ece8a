//! Cockpit HTTP client
//!
//! Typed clients for the admin backend, the resource APIs built on them and
//! the session store that owns the bearer token.

#[macro_use]
extern crate tracing;

pub mod api;
pub mod client;
pub mod session;
pub mod types;

pub use client::{
    AuthenticatedClient, ClientError, Notifier, PublicClient, TracingNotifier, TypedClientBuilder,
};
pub use session::{Session, SessionState, SessionStore, TOKEN_STORAGE_KEY, UserProfile};

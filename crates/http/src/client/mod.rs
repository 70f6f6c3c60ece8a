//! Cockpit HTTP clients
//!
//! Two client types share one transport contract:
//!
//! - [`AuthenticatedClient`] reads the bearer token from a
//!   [`SessionStore`](crate::session::SessionStore) before every call.
//! - [`PublicClient`] never sends a credential.
//!
//! Both unwrap the `{code, data, message}` envelope ([`envelope`]), turn every
//! failure into a [`ClientError`] and raise exactly one notification for it
//! through the configured [`Notifier`].

pub mod envelope;
pub mod error;
pub mod notify;
pub mod typed;

pub use envelope::{Envelope, FALLBACK_MESSAGE, SUCCESS_CODE};
pub use error::ClientError;
pub use notify::{Notifier, TracingNotifier};
pub use typed::{AuthenticatedClient, PublicClient, TypedClientBuilder};

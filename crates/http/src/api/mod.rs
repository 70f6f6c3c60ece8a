//! Resource APIs of the admin backend
//!
//! Each resource is a short-lived handle borrowed from a client
//! (`client.birthday().list(..)`). An operation builds exactly one call and
//! delegates to the client. Validation is the backend's job, except for path
//! segments that would change which resource is addressed.

pub mod auth;
pub mod birthday;
pub mod config;
pub mod dashboard;
pub mod lottery;
pub mod message;

pub use auth::AuthApi;
pub use birthday::BirthdayApi;
pub use config::ConfigApi;
pub use dashboard::DashboardApi;
pub use lottery::LotteryApi;
pub use message::MessageApi;

use crate::client::ClientError;

/// Percent-encode one path segment
///
/// `.` and `..` have no encoded form that survives URL parsing (`%2E%2E` is
/// still a dot segment), so they are refused. So is the empty segment.
fn encode_segment(segment: &str) -> Result<String, ClientError> {
    if matches!(segment, "" | "." | "..") {
        return Err(ClientError::Configuration(format!(
            "'{segment}' cannot be used as a path segment"
        )));
    }
    Ok(urlencoding::encode(segment).into_owned())
}

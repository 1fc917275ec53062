//! Defines the session token stored in the auth cookie.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::user::UserID;

/// A session token linking a client to an authenticated user.
///
/// The token is serialized as JSON into a signed and encrypted private
/// cookie, so the client can neither read nor forge it. The expiry is stored
/// as a unix timestamp.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Token {
    /// The ID of the logged-in user.
    pub user_id: UserID,

    /// The instant after which the session is no longer valid.
    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}

impl Token {
    /// Whether the session has passed its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= OffsetDateTime::now_utc()
    }
}

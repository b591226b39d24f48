//! Auth data models.

use jiff::Timestamp;
use littlelemon::{ids::UserId, roles::StaffGroup};
use uuid::Uuid;

use crate::auth::ApiTokenVersion;

/// Live token row joined with its owner's role inputs.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub user: UserId,

    /// Hex SHA-256 of the token secret.
    pub token_hash: String,

    pub is_superuser: bool,

    pub groups: Vec<StaffGroup>,
}

/// Token row as shown by `token list`. Never carries the verifier.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub user: UserId,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// Insert payload for a token row.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub user: UserId,
    pub version: ApiTokenVersion,
    pub token_hash: String,
}

/// Freshly issued token. `token` is the only copy of the plaintext.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}

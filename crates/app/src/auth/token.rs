//! Bearer tokens.
//!
//! A token reads `ll_v1_<uuid>.<secret>`: the token row id in simple (dashless) form,
//! then 32 random bytes as lowercase hex. Only the SHA-256 of the secret is stored.

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

const PREFIX: &str = "ll";

const SECRET_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

/// Token format version, persisted next to the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// The random half of a token. Zeroed on drop.
pub struct TokenSecret([u8; SECRET_BYTES]);

impl TokenSecret {
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    /// Hex SHA-256 of the secret, the only form that is stored.
    #[must_use]
    pub fn verifier(&self) -> String {
        to_hex(&Sha256::digest(self.0))
    }

    /// Compare against a stored verifier without short-circuiting.
    #[must_use]
    pub fn matches(&self, stored: &str) -> bool {
        let computed = self.verifier();

        computed.len() == stored.len()
            && computed
                .bytes()
                .zip(stored.bytes())
                .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
                == 0
    }
}

impl Debug for TokenSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("TokenSecret(..)")
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl FromStr for TokenSecret {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.len() != SECRET_BYTES * 2 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ApiTokenError::InvalidSecretEncoding);
        }

        let mut bytes = [0_u8; SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(value.as_bytes().chunks_exact(2)) {
            let pair =
                std::str::from_utf8(pair).map_err(|_ignored| ApiTokenError::InvalidSecretEncoding)?;

            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_ignored| ApiTokenError::InvalidSecretEncoding)?;
        }

        Ok(Self(bytes))
    }
}

/// A bearer token, freshly issued or parsed from a request.
#[derive(Debug)]
pub struct BearerToken {
    /// Primary key of the stored token row.
    pub id: Uuid,

    pub version: ApiTokenVersion,

    pub secret: TokenSecret,
}

impl BearerToken {
    #[must_use]
    pub fn issue() -> Self {
        Self {
            id: Uuid::now_v7(),
            version: ApiTokenVersion::V1,
            secret: TokenSecret::generate(),
        }
    }
}

impl Display for BearerToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{PREFIX}_{}_{}.{}",
            self.version.segment(),
            self.id.simple(),
            to_hex(&self.secret.0)
        )
    }
}

impl FromStr for BearerToken {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (head, secret) = value.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;
        let mut parts = head.splitn(3, '_');

        let (Some(PREFIX), Some(version), Some(id)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ApiTokenError::InvalidFormat);
        };

        let version = match version {
            "v1" => ApiTokenVersion::V1,
            _ => return Err(ApiTokenError::UnsupportedVersion),
        };

        Ok(Self {
            id: Uuid::try_parse(id).map_err(|_ignored| ApiTokenError::InvalidFormat)?,
            version,
            secret: secret.parse()?,
        })
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn issued_tokens_parse_back() -> TestResult {
        let issued = BearerToken::issue();
        let rendered = issued.to_string();
        let parsed: BearerToken = rendered.parse()?;

        assert!(rendered.starts_with("ll_v1_"));
        assert_eq!(parsed.id, issued.id);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert!(parsed.secret.matches(&issued.secret.verifier()));

        Ok(())
    }

    #[test]
    fn verifier_is_sha256_of_secret() -> TestResult {
        let secret: TokenSecret = "00".repeat(SECRET_BYTES).parse()?;

        assert_eq!(
            secret.verifier(),
            "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925"
        );

        Ok(())
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let nil = Uuid::nil().simple().to_string();
        let secret = "ab".repeat(SECRET_BYTES);

        assert_eq!(
            format!("xx_v1_{nil}.{secret}").parse::<BearerToken>().err(),
            Some(ApiTokenError::InvalidFormat)
        );
        assert_eq!(
            format!("ll_v9_{nil}.{secret}").parse::<BearerToken>().err(),
            Some(ApiTokenError::UnsupportedVersion)
        );
        assert_eq!(
            format!("ll_v1_{nil}.abcd").parse::<BearerToken>().err(),
            Some(ApiTokenError::InvalidSecretEncoding)
        );
        assert_eq!(
            format!("ll_v1_{nil}.{}", "zz".repeat(SECRET_BYTES))
                .parse::<BearerToken>()
                .err(),
            Some(ApiTokenError::InvalidSecretEncoding)
        );
        assert_eq!(
            "no-dot".parse::<BearerToken>().err(),
            Some(ApiTokenError::InvalidFormat)
        );
    }

    #[test]
    fn different_secrets_do_not_match() {
        let secret = TokenSecret::generate();
        let other = TokenSecret::generate();

        assert!(secret.matches(&secret.verifier()));
        assert!(!secret.matches(&other.verifier()));
        assert!(!secret.matches("short"));
    }
}

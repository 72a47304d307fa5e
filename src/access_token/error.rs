//! Error taxonomy for token verification and bearer-header parsing.

use thiserror::Error;

use crate::error::ErrorCode;

/// Errors raised while parsing, verifying, or scoping access tokens.
///
/// Malformed/tampered tokens and expired tokens are distinct kinds so
/// callers can message "log in again" differently from "session
/// expired".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessTokenError {
    /// The token is malformed or its signature does not verify.
    #[error("invalid access token")]
    Invalid,

    /// The token verified but is past its expiry.
    #[error("access token has expired, please login again")]
    Expired,

    /// No authorization header was supplied.
    #[error("authorization header not found")]
    HeaderNotFound,

    /// The authorization header does not follow `Bearer <token>`.
    #[error("invalid authorization header")]
    MalformedHeader,

    /// The token's account does not match the requested scope.
    #[error("token does not grant access to this account")]
    UnauthorizedAccess,

    /// Token encoding failed.
    #[error("access token encoding failed: {0}")]
    Encoding(String),
}

impl ErrorCode for AccessTokenError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnauthorizedAccess => "ACCESS_TOKEN_ERR_01",
            Self::Expired => "ACCESS_TOKEN_ERR_02",
            Self::HeaderNotFound => "ACCESS_TOKEN_ERR_03",
            Self::MalformedHeader => "ACCESS_TOKEN_ERR_04",
            Self::Invalid => "ACCESS_TOKEN_ERR_05",
            Self::Encoding(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            Self::Encoding(_) => 500,
            _ => 401,
        }
    }
}

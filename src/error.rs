//! Crate-wide error metadata carried by service-level errors.
//!
//! Every service error exposes a stable machine-readable code and an
//! HTTP-status hint so an embedding HTTP layer can build a uniform
//! `{"message", "code"}` envelope without matching on concrete error
//! types.

/// Stable code and HTTP-status hint for a service-level error.
///
/// Codes are frozen identifiers (for example `ACCOUNT_ERR_02`); clients
/// match on them, so existing codes must never be renumbered.
pub trait ErrorCode {
    /// Returns the stable machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns the HTTP status an embedding layer should respond with.
    fn http_status(&self) -> u16;
}

//! Challenge-response digest computation.
//!
//! The upstream's "safe" authentication demands an exact derivation:
//!
//! ```text
//! UPPER(MD5(nonce + ":" + UPPER(username) + ":" + UPPER(MD5(password))))
//! ```
//!
//! The nonce is used verbatim; the server already issues it as uppercase
//! hex. Pure and deterministic, no I/O; empty username and empty password
//! are valid inputs (an empty username means authentication is disabled,
//! which is the caller's concern, not this function's).

/// Uppercase hex MD5 of the password, the inner term of the digest.
fn password_hash(password: &str) -> String {
    format!("{:x}", md5::compute(password)).to_uppercase()
}

/// Compute the `AuthData` digest for one request.
pub fn auth_digest(username: &str, password: &str, nonce: &str) -> String {
    let auth_string = format!(
        "{}:{}:{}",
        nonce,
        username.to_uppercase(),
        password_hash(password)
    );
    format!("{:x}", md5::compute(auth_string)).to_uppercase()
}

//! Deterministic anonymous-identifier derivation
//!
//! The derivation is a keyed, salted, one-way transform from a netid to an
//! [`Auid`]:
//!
//! 1. `salt = hex(SHA-256(hex(SHA-256(netid)) || secret))`
//! 2. `key = PBKDF2-HMAC-SHA256(netid, salt, PBKDF2_ITERATIONS)` (32 bytes)
//! 3. `text = Base32(key)` (RFC 4648, padded)
//! 4. `auid = text[0..2] + "-" + lower(text[3..8]) + "-" + lower(text[8..14])`
//!
//! Hex digests are lowercase ASCII and are hashed as bytes. Identifiers and
//! secrets are hashed as their UTF-8 bytes. The slice ranges in step 4 skip
//! character index 2; existing tokens depend on this exact layout.
//!
//! # Examples
//!
//! ```
//! use anon_csv::anonymization::derivation::derive_auid;
//!
//! let auid = derive_auid(b"alice", b"topsecret").unwrap();
//! assert_eq!(auid.as_str(), "JZ-gfzhz-4ui5ey");
//! ```

use crate::domain::{Auid, InputError};
use data_encoding::BASE32;
use pbkdf2::pbkdf2_hmac_array;
use sha2::{Digest, Sha256};
use std::ops::Range;
use zeroize::Zeroizing;

/// PBKDF2 iteration count. Changing it changes every token ever issued.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of the salt: the lowercase hex text of a SHA-256 digest
pub const SALT_LEN: usize = 64;

/// Length of the PBKDF2 output in bytes
pub const DERIVED_KEY_LEN: usize = 32;

/// First group, kept in Base32's native (upper) case
const AUID_HEAD: Range<usize> = 0..2;
/// Second group, lowercased. Index 2 of the encoded text is not used.
const AUID_MIDDLE: Range<usize> = 3..8;
/// Third group, lowercased
const AUID_TAIL: Range<usize> = 8..14;

/// Derives the per-identifier salt from the identifier and the secret
///
/// # Errors
///
/// Returns [`InputError::EmptyIdentifier`] or [`InputError::EmptySecret`]
/// if either input is empty.
pub fn derive_salt(identifier: &[u8], secret: &[u8]) -> Result<[u8; SALT_LEN], InputError> {
    validate_inputs(identifier, secret)?;
    Ok(salt_from(identifier, secret))
}

/// Derives the anonymous identifier for `identifier` under `secret`
///
/// This is a pure function of its inputs and costs [`PBKDF2_ITERATIONS`]
/// HMAC rounds.
///
/// # Errors
///
/// Returns [`InputError::EmptyIdentifier`] or [`InputError::EmptySecret`]
/// if either input is empty.
pub fn derive_auid(identifier: &[u8], secret: &[u8]) -> Result<Auid, InputError> {
    let salt = derive_salt(identifier, secret)?;

    let key = Zeroizing::new(pbkdf2_hmac_array::<Sha256, DERIVED_KEY_LEN>(
        identifier,
        &salt,
        PBKDF2_ITERATIONS,
    ));
    let encoded = Zeroizing::new(BASE32.encode(&key[..]));

    Ok(format_auid(&encoded))
}

/// Lays out the Base32 text of the derived key as `XX-xxxxx-xxxxxx`
fn format_auid(encoded: &str) -> Auid {
    Auid::from_derived(format!(
        "{}-{}-{}",
        &encoded[AUID_HEAD],
        encoded[AUID_MIDDLE].to_ascii_lowercase(),
        encoded[AUID_TAIL].to_ascii_lowercase()
    ))
}

fn validate_inputs(identifier: &[u8], secret: &[u8]) -> Result<(), InputError> {
    if identifier.is_empty() {
        return Err(InputError::EmptyIdentifier);
    }
    if secret.is_empty() {
        return Err(InputError::EmptySecret);
    }
    Ok(())
}

fn salt_from(identifier: &[u8], secret: &[u8]) -> [u8; SALT_LEN] {
    let identifier_digest = hex_sha256(identifier);

    // Holds secret bytes; wiped on drop
    let mut material = Zeroizing::new(Vec::with_capacity(identifier_digest.len() + secret.len()));
    material.extend_from_slice(identifier_digest.as_bytes());
    material.extend_from_slice(secret);

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(hex_sha256(&material).as_bytes());
    salt
}

/// SHA-256 rendered as lowercase hex text
fn hex_sha256(input: &[u8]) -> String {
    format!("{:x}", Sha256::digest(input))
}

//! Project secret resolution and generation
//!
//! A run uses exactly one project secret, taken from one of three sources:
//! a literal value, a secret file, or a freshly generated secret persisted
//! to a new file so the mapping can be reproduced later.

use crate::config::{secret_string, SecretString};
use crate::domain::{AnonCsvError, InputError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Number of random bytes in a generated secret
pub const GENERATED_SECRET_BYTES: usize = 32;

/// File name prefix for generated secrets
const GENERATED_SECRET_PREFIX: &str = "anon-csv-secret";

/// Non-empty project secret
///
/// Read-only once constructed. `Debug` output is redacted.
#[derive(Debug, Clone)]
pub struct ProjectSecret(SecretString);

impl ProjectSecret {
    /// Wraps a secret, rejecting empty values
    pub fn new(secret: SecretString) -> std::result::Result<Self, InputError> {
        if secret.expose_secret().is_empty() {
            return Err(InputError::EmptySecret);
        }
        Ok(Self(secret))
    }

    /// Secret bytes as consumed by the derivation
    pub(crate) fn expose_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}

/// Where the secret of a run came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum SecretOrigin {
    /// Supplied directly (flag, environment or config value)
    Literal,
    /// Read from an existing file
    File(PathBuf),
    /// Generated for this run and written to a new file
    Generated(PathBuf),
}

/// A resolved secret together with its origin
#[derive(Debug)]
pub struct ResolvedSecret {
    pub secret: ProjectSecret,
    pub origin: SecretOrigin,
}

/// Resolves the project secret from the configured sources
///
/// # Errors
///
/// Returns a configuration error when both a literal and a file are given,
/// when the secret file cannot be read or is empty, or when a generated
/// secret cannot be persisted.
pub fn resolve_secret(
    literal: Option<SecretString>,
    file: Option<&Path>,
    generated_dir: &Path,
) -> Result<ResolvedSecret> {
    match (literal, file) {
        (Some(_), Some(path)) => Err(AnonCsvError::Configuration(format!(
            "Conflicting secret sources: a literal secret and a secret file ({}) were both given",
            path.display()
        ))),
        (Some(literal), None) => {
            let secret = ProjectSecret::new(literal)
                .map_err(|e| AnonCsvError::Configuration(format!("Invalid secret: {e}")))?;
            Ok(ResolvedSecret {
                secret,
                origin: SecretOrigin::Literal,
            })
        }
        (None, Some(path)) => Ok(ResolvedSecret {
            secret: read_secret_file(path)?,
            origin: SecretOrigin::File(path.to_path_buf()),
        }),
        (None, None) => {
            let (secret, path) = persist_generated_secret(generated_dir)?;
            Ok(ResolvedSecret {
                secret,
                origin: SecretOrigin::Generated(path),
            })
        }
    }
}

/// Reads a secret file, ignoring a trailing line ending
pub fn read_secret_file(path: &Path) -> Result<ProjectSecret> {
    let contents = Zeroizing::new(fs::read_to_string(path).map_err(|e| {
        AnonCsvError::Configuration(format!(
            "Failed to read secret file {}: {}",
            path.display(),
            e
        ))
    })?);

    let value = contents.trim_end_matches(['\r', '\n']);
    ProjectSecret::new(secret_string(value.to_string())).map_err(|_| {
        AnonCsvError::Configuration(format!("Secret file {} is empty", path.display()))
    })
}

/// Generates a new secret from the operating system's CSPRNG
pub fn generate_secret() -> SecretString {
    let mut bytes = Zeroizing::new([0u8; GENERATED_SECRET_BYTES]);
    OsRng.fill_bytes(&mut bytes[..]);
    secret_string(URL_SAFE_NO_PAD.encode(&bytes[..]))
}

/// Generates a secret and writes it to a new file in `dir`
///
/// Existing files are never overwritten; a numeric suffix is appended on
/// name collisions. On unix the file is readable by its owner only.
pub fn persist_generated_secret(dir: &Path) -> Result<(ProjectSecret, PathBuf)> {
    fs::create_dir_all(dir).map_err(|e| {
        AnonCsvError::Configuration(format!(
            "Failed to create secret directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let secret = generate_secret();
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");

    let mut attempt = 0u32;
    loop {
        let name = match attempt {
            0 => format!("{GENERATED_SECRET_PREFIX}-{stamp}.txt"),
            n => format!("{GENERATED_SECRET_PREFIX}-{stamp}-{n}.txt"),
        };
        let path = dir.join(name);
        attempt += 1;

        let mut file = match create_new_private(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(AnonCsvError::Configuration(format!(
                    "Failed to create secret file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        file.write_all(secret.expose_secret().as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;

        tracing::debug!(path = %path.display(), "Generated secret written");
        let secret = ProjectSecret::new(secret).map_err(AnonCsvError::Input)?;
        return Ok((secret, path));
    }
}

#[cfg(unix)]
fn create_new_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_new_private(path: &Path) -> std::io::Result<fs::File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_project_secret_rejects_empty() {
        let result = ProjectSecret::new(secret_string(String::new()));
        assert_eq!(result.unwrap_err(), InputError::EmptySecret);
    }

    #[test]
    fn test_project_secret_debug_redacted() {
        let secret = ProjectSecret::new(secret_string("topsecret".to_string())).unwrap();
        assert!(!format!("{secret:?}").contains("topsecret"));
    }

    #[test]
    fn test_generate_secret_is_random() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a.expose_secret().as_bytes(), b.expose_secret().as_bytes());
        // 32 bytes -> 43 base64 characters without padding
        assert_eq!(a.expose_secret().as_bytes().len(), 43);
    }

    #[test]
    fn test_resolve_literal() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_secret(
            Some(secret_string("topsecret".to_string())),
            None,
            dir.path(),
        )
        .unwrap();
        assert_eq!(resolved.origin, SecretOrigin::Literal);
        assert_eq!(resolved.secret.expose_bytes(), b"topsecret");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_resolve_conflicting_sources() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("project.secret");
        fs::write(&file, "from-file\n").unwrap();

        let err = resolve_secret(
            Some(secret_string("topsecret".to_string())),
            Some(&file),
            dir.path(),
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_resolve_file_trims_line_ending() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("project.secret");
        fs::write(&file, "from-file\r\n").unwrap();

        let resolved = resolve_secret(None, Some(&file), dir.path()).unwrap();
        assert_eq!(resolved.secret.expose_bytes(), b"from-file");
        assert_eq!(resolved.origin, SecretOrigin::File(file));
    }

    #[test]
    fn test_resolve_empty_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("empty.secret");
        fs::write(&file, "\n").unwrap();

        let err = resolve_secret(None, Some(&file), dir.path()).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = resolve_secret(None, Some(&dir.path().join("nope")), dir.path()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_resolve_generates_and_persists() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_secret(None, None, dir.path()).unwrap();

        let SecretOrigin::Generated(path) = &resolved.origin else {
            panic!("expected generated secret, got {:?}", resolved.origin);
        };
        assert!(path.starts_with(dir.path()));

        // The persisted file reproduces the same secret
        let reread = read_secret_file(path).unwrap();
        assert_eq!(reread.expose_bytes(), resolved.secret.expose_bytes());
    }

    #[test]
    fn test_generated_secret_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let (_, first) = persist_generated_secret(dir.path()).unwrap();
        let (_, second) = persist_generated_secret(dir.path()).unwrap();
        assert_ne!(first, second);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_generated_secret_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let (_, path) = persist_generated_secret(dir.path()).unwrap();
        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

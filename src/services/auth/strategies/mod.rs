//! Strategies bundled with the server binary.
//!
//! Both look up a presented secret in a `SecretTable`. Secrets are kept only as
//! SHA-256 digests so the raw values never sit in memory after startup.
pub mod api_key;
pub mod bearer;

use std::collections::HashMap;

use sha2::{Digest, Sha256};

pub use api_key::ApiKeyStrategy;
pub use bearer::BearerTokenStrategy;

type SecretDigest = [u8; 32];

fn digest(secret: &str) -> SecretDigest {
    Sha256::digest(secret.as_bytes()).into()
}

/// secret digest -> subject
#[derive(Clone, Default)]
pub struct SecretTable {
    subjects: HashMap<SecretDigest, String>,
}

impl SecretTable {
    pub fn new<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let subjects = pairs
            .into_iter()
            .map(|(secret, subject)| (digest(secret.as_ref()), subject.into()))
            .collect();
        Self { subjects }
    }

    pub fn subject(&self, secret: &str) -> Option<&str> {
        self.subjects.get(&digest(secret)).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

// Key material stays out of Debug output.
impl std::fmt::Debug for SecretTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretTable")
            .field("len", &self.subjects.len())
            .finish()
    }
}

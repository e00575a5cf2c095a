use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 of an uploaded file, hex encoded. Used to reject re-uploads of the
/// same bytes into the same class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub fn parse(hex: &str) -> Result<Self, String> {
        if hex.len() != 64 {
            return Err("Digest must be 64 characters long (SHA-256)".to_string());
        }

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("Digest must contain only hexadecimal characters".to_string());
        }

        Ok(Self(hex.to_ascii_lowercase()))
    }

    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

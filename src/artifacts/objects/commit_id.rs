//! Commit identifier
//!
//! Commit ids are 40 lowercase hexadecimal characters. They are opaque random
//! tokens: two commits with identical snapshots get unrelated ids, and no
//! relationship to the snapshot content exists.
//!
//! ## Storage
//!
//! Each id names both `.wit/images/<id>/` (the snapshot) and
//! `.wit/images/<id>.txt` (the metadata).

use crate::artifacts::objects::COMMIT_ID_LENGTH;
use fake::rand;

const HEX_ALPHABET: &[u8; 16] = b"0123456789abcdef";
const SHORT_ID_LENGTH: usize = 6;

/// Commit identifier
///
/// A validated 40-character hexadecimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    /// Parse and validate a commit id from a string
    ///
    /// # Returns
    ///
    /// Validated CommitId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != COMMIT_ID_LENGTH {
            anyhow::bail!("Invalid commit id length: {}", id.len());
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid commit id characters: {}", id);
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Abbreviated form used when labelling graph nodes
    pub fn to_short_id(&self) -> String {
        self.0.split_at(SHORT_ID_LENGTH).0.to_string()
    }

    /// The metadata file name (`<id>.txt`) stored next to the snapshot directory
    pub fn metadata_file_name(&self) -> String {
        format!("{}.txt", self.0)
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh commit ids
///
/// Uniqueness is probabilistic and never checked against the store.
pub trait IdGenerator {
    fn generate(&self) -> CommitId;
}

/// Default generator drawing 40 random hex digits
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> CommitId {
        let id = (0..COMMIT_ID_LENGTH)
            .map(|_| HEX_ALPHABET[(rand::random::<u8>() & 0x0f) as usize] as char)
            .collect::<String>();

        CommitId(id)
    }
}

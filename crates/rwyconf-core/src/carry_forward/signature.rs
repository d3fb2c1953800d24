//! Phrase signatures — wording-independent keys for learned corrections.
//!
//! A signature digests the approach-type and runway-action phrases of a
//! broadcast, so two broadcasts that reduce to the same ambiguous parse
//! produce the same key even when the surrounding wording differs.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};

fn approach_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?:ILS|VISUAL|RNAV|VOR|GPS|LOC)\s+(?:APCH|APPROACH|RWY|RY)")
            .expect("static signature pattern")
    })
}

fn action_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?:LANDING|DEPARTING|DEPG|LNDG|ARRIVALS?|DEPARTURES?)\s+(?:AND\s+)?(?:RWYS?|RYS?|RY)?")
            .expect("static signature pattern")
    })
}

/// At most this many mentions of each phrase class enter the signature —
/// the leading phrases carry the runway assignment.
const PHRASE_CAP: usize = 3;

/// The extracted, order-normalized phrase set of one broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSignature {
    phrases: Vec<String>,
}

impl PhraseSignature {
    /// Derive the signature from raw broadcast text.
    ///
    /// Deterministic: phrases are uppercased, deduplicated, and sorted, so
    /// extraction order never leaks into the key.
    pub fn from_text(text: &str) -> Self {
        let mut phrases: Vec<String> = approach_pattern()
            .find_iter(text)
            .take(PHRASE_CAP)
            .chain(action_pattern().find_iter(text).take(PHRASE_CAP))
            .map(|m| m.as_str().to_ascii_uppercase())
            .collect();
        phrases.sort();
        phrases.dedup();
        Self { phrases }
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// The joined phrase key, e.g. `ILS RWY | LANDING RWY`.
    pub fn key(&self) -> String {
        self.phrases.join(" | ")
    }

    /// Stable digest of the phrase key, used as the store key.
    pub fn digest(&self) -> SignatureDigest {
        SignatureDigest::of(&self.key())
    }
}

impl fmt::Display for PhraseSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// SHA-256 digest of a phrase key, hex-encoded.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureDigest(String);

impl SignatureDigest {
    /// Digest a phrase key.
    pub fn of(key: &str) -> Self {
        Self(hex::encode(Sha256::digest(key.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignatureDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SignatureDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignatureDigest({})",
            self.0.chars().take(12).collect::<String>()
        )
    }
}

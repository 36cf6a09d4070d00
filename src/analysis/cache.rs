//! Single-slot result cache keyed by input fingerprint
//!
//! Holds at most one result. A new fingerprint overwrites the slot; there is
//! no expiry, so callers must [`AnalysisCache::invalidate`] when they start an
//! unrelated analysis session.

use sha2::{Digest, Sha256};
use std::fmt;
use tracing::trace;

/// SHA-256 digest identifying an analysis input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint raw input bytes under a domain tag
    ///
    /// The tag keeps inputs from different sources that happen to share bytes
    /// from colliding.
    pub fn of_bytes(domain: &str, bytes: &[u8]) -> Self {
        Self::of_parts(domain, &[bytes])
    }

    /// Fingerprint several byte strings under a domain tag
    ///
    /// Each part is length-prefixed, so `["ab", "c"]` and `["a", "bc"]` differ.
    pub fn of_parts(domain: &str, parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain.as_bytes());
        hasher.update([0u8]);
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        Fingerprint(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Cache holding the result of the most recent analysis
#[derive(Debug, Clone)]
pub struct AnalysisCache<T> {
    slot: Option<(Fingerprint, T)>,
}

impl<T> Default for AnalysisCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AnalysisCache<T> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Cached result, if it was computed for `fingerprint`
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&T> {
        match &self.slot {
            Some((cached, value)) if cached == fingerprint => Some(value),
            _ => None,
        }
    }

    /// Store a result, replacing whatever was cached
    pub fn store(&mut self, fingerprint: Fingerprint, value: T) {
        trace!(%fingerprint, "analysis cache store");
        self.slot = Some((fingerprint, value));
    }

    /// Return the cached result for `fingerprint` or compute and cache it
    ///
    /// A failed computation leaves the previous entry in place.
    pub fn get_or_try_insert_with<E, F>(
        &mut self,
        fingerprint: Fingerprint,
        compute: F,
    ) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        match self.slot.take() {
            Some((cached, value)) if cached == fingerprint => {
                trace!(%fingerprint, "analysis cache hit");
                Ok(&self.slot.insert((cached, value)).1)
            }
            previous => {
                trace!(%fingerprint, "analysis cache miss");
                match compute() {
                    Ok(value) => Ok(&self.slot.insert((fingerprint, value)).1),
                    Err(err) => {
                        self.slot = previous;
                        Err(err)
                    }
                }
            }
        }
    }

    /// Drop the cached entry
    pub fn invalidate(&mut self) {
        if let Some((fingerprint, _)) = self.slot.take() {
            trace!(%fingerprint, "analysis cache invalidated");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Fingerprint of the cached entry
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.slot.as_ref().map(|(fingerprint, _)| fingerprint)
    }
}

//! Manifest construction: one SHA-1 digest per archive member.
//!
//! The wallet pass format checks member integrity against
//! manifest.json and signs the manifest bytes, not the members
//! themselves, so the manifest must be frozen before signing.

use indexmap::IndexMap;
use sha1::{Digest, Sha1};

use crate::archive::ArchiveMember;
use crate::error::PassError;

/// Member path → lowercase 40-char SHA-1 hex digest.
///
/// Insertion-ordered for stable output; consumers treat it as an
/// unordered mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: IndexMap<String, String>,
}

impl Manifest {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialized bytes as written into the archive and fed to the
    /// signer.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, PassError> {
        Ok(serde_json::to_vec_pretty(&self.entries)?)
    }
}

/// Digest every member's exact stored bytes. Deterministic for a
/// given member set.
pub fn build_manifest(members: &[ArchiveMember]) -> Manifest {
    let mut entries = IndexMap::with_capacity(members.len());
    for member in members {
        entries.insert(member.path().to_string(), sha1_hex(member.bytes()));
    }
    Manifest { entries }
}

pub(crate) fn sha1_hex(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members() -> Vec<ArchiveMember> {
        vec![
            ArchiveMember::text("pass.json", "{}").unwrap(),
            ArchiveMember::new("icon.png", vec![1, 2, 3]).unwrap(),
        ]
    }

    #[test]
    fn digests_are_lowercase_sha1_hex() {
        let manifest = build_manifest(&members());
        // SHA-1 of "{}"
        assert_eq!(
            manifest.get("pass.json"),
            Some("bf21a9e8fbc5a3846fb05b4fa0859e0917b2202f")
        );
        let icon = manifest.get("icon.png").unwrap();
        assert_eq!(icon.len(), 40);
        assert!(icon.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn identical_members_yield_identical_manifests() {
        let a = build_manifest(&members());
        let b = build_manifest(&members());
        assert_eq!(a, b);
        assert_eq!(a.to_json_bytes().unwrap(), b.to_json_bytes().unwrap());
    }

    #[test]
    fn every_member_is_listed() {
        let manifest = build_manifest(&members());
        assert_eq!(manifest.len(), 2);
        assert!(manifest.get("logo.png").is_none());
    }
}

//! In-memory pass archive assembly.
//!
//! Every member is stored uncompressed with a fixed timestamp so the
//! bytes of an archive are fully determined by its member set; the
//! manifest hashes and the detached signature both depend on that.

use std::collections::BTreeSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime as ZipDateTime, ZipWriter};

use crate::error::PassError;

/// One named file inside a pass archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveMember {
    path: String,
    bytes: Vec<u8>,
}

impl ArchiveMember {
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Result<Self, PassError> {
        Ok(Self {
            path: normalize_member_path(&path.into())?,
            bytes,
        })
    }

    pub fn text(path: impl Into<String>, text: impl Into<String>) -> Result<Self, PassError> {
        Self::new(path, text.into().into_bytes())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Assemble members into a stored-only zip, wholly in memory.
///
/// Duplicate paths are rejected before any bytes are written. The
/// zip layer runs with `large_file(false)`, so exceeding the format's
/// 32-bit addressing limits is a hard error rather than a silent
/// truncation.
pub fn assemble(members: &[ArchiveMember]) -> Result<Vec<u8>, PassError> {
    let mut seen = BTreeSet::new();
    for member in members {
        if !seen.insert(member.path.as_str()) {
            return Err(PassError::MemberPath(format!(
                "duplicate archive member: {}",
                member.path
            )));
        }
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let timestamp = zip_timestamp();

    for member in members {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(timestamp)
            .unix_permissions(0o644)
            .large_file(false);
        writer.start_file(&member.path, options)?;
        writer.write_all(&member.bytes)?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Validate and canonicalize an archive-relative path: forward
/// slashes, no empty / `.` / `..` segments, no absolute paths.
fn normalize_member_path(path: &str) -> Result<String, PassError> {
    let normalized = path.replace('\\', "/");
    if normalized.starts_with('/') {
        return Err(PassError::MemberPath(format!(
            "absolute path not permitted: {path}"
        )));
    }

    let mut segments = Vec::new();
    for piece in normalized.split('/') {
        if piece.is_empty() {
            return Err(PassError::MemberPath(format!(
                "empty path segment in: {path}"
            )));
        }
        if piece == "." || piece == ".." {
            return Err(PassError::MemberPath(format!(
                "path traversal not permitted: {path}"
            )));
        }
        segments.push(piece);
    }

    if segments.is_empty() {
        return Err(PassError::MemberPath("empty member path".to_string()));
    }

    Ok(segments.join("/"))
}

fn zip_timestamp() -> ZipDateTime {
    ZipDateTime::from_date_and_time(1980, 1, 1, 0, 0, 0).unwrap_or_else(|_| ZipDateTime::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_members() -> Vec<ArchiveMember> {
        vec![
            ArchiveMember::text("pass.json", "{\"formatVersion\":1}").unwrap(),
            ArchiveMember::new("icon.png", vec![0x89, b'P', b'N', b'G']).unwrap(),
            ArchiveMember::new("logo.png", vec![1, 2, 3, 4, 5]).unwrap(),
        ]
    }

    #[test]
    fn output_starts_with_pk_signature() {
        let bytes = assemble(&sample_members()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn round_trip_preserves_member_set() {
        let members = sample_members();
        let bytes = assemble(&members).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut read_back = HashMap::new();
        for idx in 0..archive.len() {
            let mut entry = archive.by_index(idx).unwrap();
            let mut buf = Vec::new();
            entry.read_to_end(&mut buf).unwrap();
            read_back.insert(entry.name().to_string(), buf);
        }

        assert_eq!(read_back.len(), members.len());
        for member in &members {
            assert_eq!(read_back[member.path()], member.bytes());
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let a = assemble(&sample_members()).unwrap();
        let b = assemble(&sample_members()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let members = vec![
            ArchiveMember::text("pass.json", "a").unwrap(),
            ArchiveMember::text("pass.json", "b").unwrap(),
        ];
        let err = assemble(&members).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn unsafe_paths_are_rejected() {
        assert!(ArchiveMember::text("../evil", "x").is_err());
        assert!(ArchiveMember::text("/etc/passwd", "x").is_err());
        assert!(ArchiveMember::text("a//b", "x").is_err());
        assert!(ArchiveMember::text("", "x").is_err());
    }

    #[test]
    fn backslashes_are_normalized() {
        let member = ArchiveMember::text("images\\logo.png", "x").unwrap();
        assert_eq!(member.path(), "images/logo.png");
    }
}

use bstr::{BString, ByteSlice};

use super::{Object, ObjectKind};
use crate::error::{Error, Result};
use crate::oid::Oid;

/// The closed set of entry modes a tree payload may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Regular,
    Executable,
    Symlink,
    Directory,
}

impl FileMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "100644",
            Self::Executable => "100755",
            Self::Symlink => "120000",
            Self::Directory => "40000",
        }
    }

    fn from_wire(mode: &[u8]) -> Result<Self> {
        match mode {
            b"100644" => Ok(Self::Regular),
            b"100755" => Ok(Self::Executable),
            b"120000" => Ok(Self::Symlink),
            b"40000" => Ok(Self::Directory),
            _ => Err(Error::MalformedObject(format!(
                "unknown tree entry mode {:?}",
                mode.as_bstr()
            ))),
        }
    }

    /// What kind of object the entry points at, for display purposes.
    pub fn entry_kind(&self) -> ObjectKind {
        match self {
            Self::Directory => ObjectKind::Tree,
            _ => ObjectKind::Blob,
        }
    }
}

/// One decoded line of a tree payload. Names are byte strings: the wire
/// format allows any bytes except NUL, UTF-8 or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub name: BString,
    pub child_id: Oid,
}

impl TreeEntry {
    pub fn new(mode: FileMode, name: impl Into<BString>, child_id: Oid) -> Self {
        Self {
            mode,
            name: name.into(),
            child_id,
        }
    }

    pub fn entry_kind(&self) -> ObjectKind {
        self.mode.entry_kind()
    }

    /// The wire form of this entry: `<mode> SP <name> NUL <20 raw bytes>`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut serialized = Vec::new();
        serialized.extend_from_slice(self.mode.as_str().as_bytes());
        serialized.push(b' ');
        serialized.extend_from_slice(&self.name);
        serialized.push(0);
        serialized.extend_from_slice(self.child_id.as_bytes());
        serialized
    }
}

/// A tree object held as its raw entry sequence, in wire order.
///
/// Entries are kept positionally and duplicates are not rejected; the
/// decoder reproduces exactly what the payload says.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }
}

impl Object for Tree {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Tree
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.entries.iter().flat_map(TreeEntry::to_bytes).collect()
    }
}

/// Decodes a tree payload into its ordered entry sequence.
///
/// Scans `<mode> SP <name> NUL <20 raw hash bytes>` repeatedly until the
/// payload is exhausted. A missing separator or a truncated final entry is
/// an error, never a silently dropped entry.
pub fn parse(payload: &[u8]) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut rest = payload;

    while !rest.is_empty() {
        let space = rest
            .find_byte(b' ')
            .ok_or_else(|| Error::MalformedObject("tree entry missing space after mode".into()))?;
        let mode = FileMode::from_wire(&rest[..space])?;
        rest = &rest[space + 1..];

        let nul = rest
            .find_byte(0)
            .ok_or_else(|| Error::MalformedObject("tree entry missing NUL after name".into()))?;
        let name = BString::from(&rest[..nul]);
        rest = &rest[nul + 1..];

        if rest.len() < 20 {
            return Err(Error::MalformedObject(format!(
                "tree entry {name:?} truncated: {} of 20 hash bytes",
                rest.len()
            )));
        }
        let child_id = Oid::from_raw(&rest[..20])?;
        rest = &rest[20..];

        entries.push(TreeEntry { mode, name, child_id });
    }

    Ok(entries)
}

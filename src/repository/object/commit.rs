use chrono::{DateTime, FixedOffset, TimeZone};

use super::{Object, ObjectKind};
use crate::oid::Oid;

/// An identity plus the moment it acted, rendered as
/// `<name> <<email>> <unix timestamp> <±HHMM>`.
///
/// The timestamp is caller-supplied; nothing here reads a clock.
#[derive(Debug, Clone)]
pub struct Author {
    name: String,
    email: String,
    a_time: DateTime<FixedOffset>,
}

impl Author {
    pub fn new<Tz: TimeZone>(name: String, email: String, a_time: DateTime<Tz>) -> Self {
        Self {
            a_time: a_time.fixed_offset(),
            name,
            email,
        }
    }

    pub fn string(&self) -> String {
        let unix_timestamp = self.a_time.timestamp();
        let utc_offset = self.a_time.format("%z");

        format!(
            "{} <{}> {} {}",
            self.name, self.email, unix_timestamp, utc_offset
        )
    }
}

/// A commit payload assembled from structured fields.
///
/// The value itself is transient: it is serialized once and only the
/// resulting object persists. The same identity is reused for the author
/// and committer lines.
#[derive(Debug, Clone)]
pub struct Commit {
    tree: Oid,
    parent: Option<Oid>,
    author: Author,
    message: String,
}

impl Commit {
    pub fn new(tree: Oid, parent: Option<Oid>, author: Author, message: String) -> Self {
        Self {
            tree,
            parent,
            author,
            message,
        }
    }
}

impl Object for Commit {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }

    // Fixed line order: tree, optional parent, author, committer, blank
    // line, then the message verbatim with no trailing normalization.
    fn to_bytes(&self) -> Vec<u8> {
        format!(
            "tree {}\n{}author {}\ncommitter {}\n\n{}",
            self.tree,
            match self.parent {
                Some(parent) => format!("parent {}\n", parent),
                None => String::new(),
            },
            self.author.string(),
            self.author.string(),
            self.message
        )
        .into()
    }
}

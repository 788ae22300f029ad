use std::{fs, path::Path, path::PathBuf};

use db::Db;
use object::{
    blob::Blob,
    commit::{Author, Commit},
    tree::{self, TreeEntry},
    ObjectKind,
};
use refs::Refs;

use crate::error::{Error, Result};
use crate::oid::Oid;

pub mod db;
pub mod object;
pub mod refs;

/// A repository rooted at an explicit path. Every operation works relative
/// to this root; nothing consults the ambient working directory.
pub struct Repository {
    root: PathBuf,
    db: Db,
    refs: Refs,
}

impl Repository {
    pub fn open(path: PathBuf) -> Self {
        let git_path = path.join(".git");

        Self {
            root: path,
            db: Db::new(git_path.clone()),
            refs: Refs::new(git_path),
        }
    }

    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.root.join(".git"))?;
        self.db.init()?;
        self.refs.init()?;
        Ok(())
    }

    /// Stores a file's contents as a blob and returns its id.
    pub fn hash_object(&self, path: &Path) -> Result<Oid> {
        let data = fs::read(path)?;
        self.db.store(&Blob::new(data))
    }

    /// Retrieves a stored object's payload, whatever its kind.
    pub fn cat_file(&self, oid: &Oid) -> Result<Vec<u8>> {
        let (_, payload) = self.db.read(oid)?;
        Ok(payload)
    }

    /// Retrieves a tree object and decodes its entries in wire order.
    pub fn cat_tree(&self, oid: &Oid) -> Result<Vec<TreeEntry>> {
        let (kind, payload) = self.db.read(oid)?;
        if kind != ObjectKind::Tree {
            return Err(Error::MalformedObject(format!(
                "object {oid} is a {kind}, not a tree"
            )));
        }
        tree::parse(&payload)
    }

    /// Builds a commit referencing `tree` and stores it.
    ///
    /// Identity and timestamp come from the caller; a root commit simply
    /// passes no parent.
    pub fn commit_tree(
        &self,
        tree: Oid,
        parent: Option<Oid>,
        author: Author,
        message: String,
    ) -> Result<Oid> {
        self.db.store(&Commit::new(tree, parent, author, message))
    }
}

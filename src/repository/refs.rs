use std::{fs, io, path::PathBuf};

/// Reference bookkeeping. The core only bootstraps a symbolic HEAD; branch
/// management lives elsewhere.
pub struct Refs {
    root: PathBuf,
}

impl Refs {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn head_path(&self) -> PathBuf {
        self.root.join("HEAD")
    }

    pub fn init(&self) -> Result<(), io::Error> {
        fs::write(self.head_path(), "ref: refs/heads/main\n")
    }
}

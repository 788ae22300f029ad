use std::{
    fs::{self, File},
    io::{self, Read, Write},
    path::PathBuf,
};

use flate2::{bufread::ZlibDecoder, write::ZlibEncoder, Compression};
use rand::distributions::{Alphanumeric, DistString};

use crate::error::{Error, Result};
use crate::oid::Oid;

use super::object::{self, Object, ObjectKind};

/// The object database: content-addressed, zlib-compressed files under
/// `objects/`, sharded by the first two hex characters of the id.
pub struct Db {
    root: PathBuf,
}

impl Db {
    pub fn new(db_path: PathBuf) -> Self {
        Self { root: db_path }
    }

    fn objects_path(&self) -> PathBuf {
        self.root.join("objects")
    }

    fn object_path(&self, oid: &Oid) -> PathBuf {
        let (group, rest) = oid.split_path();
        self.objects_path().join(group).join(rest)
    }

    pub fn init(&self) -> Result<(), io::Error> {
        fs::create_dir_all(self.objects_path())?;
        fs::create_dir_all(self.root.join("refs"))?;
        Ok(())
    }

    pub fn store(&self, object: &impl Object) -> Result<Oid> {
        self.write(object.kind(), &object.to_bytes())
    }

    /// Frames and persists a payload, returning its content id.
    ///
    /// Idempotent for every kind: if the derived path already exists the
    /// write is a no-op and the id is returned as-is. New objects land
    /// under a temporary name first and are renamed into place, so readers
    /// never observe a partially written object file.
    pub fn write(&self, kind: ObjectKind, payload: &[u8]) -> Result<Oid> {
        let (oid, framed) = object::encode(kind, payload);

        let object_path = self.object_path(&oid);
        if let Ok(true) = fs::exists(&object_path) {
            return Ok(oid);
        }

        let group_path = self.objects_path().join(oid.split_path().0);
        fs::create_dir_all(&group_path)?;

        let temp_path = group_path.join(generate_temp_name());
        let file = File::create_new(&temp_path)?;

        let mut encoder = ZlibEncoder::new(file, Compression::default());
        encoder.write_all(&framed)?;
        encoder.finish()?;

        fs::rename(&temp_path, &object_path)?;

        Ok(oid)
    }

    /// Reads an object back to `(kind, payload)` form.
    pub fn read(&self, oid: &Oid) -> Result<(ObjectKind, Vec<u8>)> {
        let object_path = self.object_path(oid);
        if !matches!(fs::exists(&object_path), Ok(true)) {
            return Err(Error::ObjectNotFound(*oid));
        }

        let compressed = fs::read(&object_path)?;
        let mut framed = Vec::new();
        ZlibDecoder::new(compressed.as_slice()).read_to_end(&mut framed)?;

        object::decode(&framed)
    }
}

fn generate_temp_name() -> String {
    let suffix = Alphanumeric.sample_string(&mut rand::thread_rng(), 6);
    format!("tmp_obj_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db() -> (tempfile::TempDir, Db) {
        let dir = tempfile::tempdir().unwrap();
        let db = Db::new(dir.path().to_path_buf());
        db.init().unwrap();
        (dir, db)
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_dir, db) = temp_db();
        let oid = db.write(ObjectKind::Blob, b"hello\n").unwrap();
        assert_eq!(oid.to_string(), "ce013625030ba8dba906f756967f9e9ca394464a");
        assert_eq!(
            db.read(&oid).unwrap(),
            (ObjectKind::Blob, b"hello\n".to_vec())
        );
    }

    #[test]
    fn stored_file_lands_at_sharded_path() {
        let (dir, db) = temp_db();
        let oid = db.write(ObjectKind::Blob, b"hello\n").unwrap();
        let expected = dir
            .path()
            .join("objects")
            .join("ce")
            .join("013625030ba8dba906f756967f9e9ca394464a");
        assert!(expected.is_file());
        assert_eq!(oid.split_path().0, "ce");
    }

    #[test]
    fn stored_bytes_are_compressed() {
        let (dir, db) = temp_db();
        let payload = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".repeat(64);
        let oid = db.write(ObjectKind::Blob, &payload).unwrap();

        let on_disk = fs::read(
            dir.path()
                .join("objects")
                .join(oid.split_path().0)
                .join(oid.split_path().1),
        )
        .unwrap();
        assert!(on_disk.len() < payload.len());
        assert_ne!(&on_disk[..4], b"blob");
    }

    #[test]
    fn write_is_idempotent() {
        let (dir, db) = temp_db();
        let first = db.write(ObjectKind::Blob, b"same content").unwrap();
        let second = db.write(ObjectKind::Blob, b"same content").unwrap();
        assert_eq!(first, second);

        let shard = dir.path().join("objects").join(first.split_path().0);
        let files: Vec<_> = fs::read_dir(shard).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn commit_writes_get_the_same_existence_check() {
        let (_dir, db) = temp_db();
        let first = db.write(ObjectKind::Commit, b"payload").unwrap();
        let second = db.write(ObjectKind::Commit, b"payload").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn read_missing_object_fails_with_not_found() {
        let (_dir, db) = temp_db();
        let absent = Oid::new(b"never stored");
        assert!(matches!(
            db.read(&absent),
            Err(Error::ObjectNotFound(oid)) if oid == absent
        ));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let (dir, db) = temp_db();
        let oid = db.write(ObjectKind::Tree, b"").unwrap();
        let shard = dir.path().join("objects").join(oid.split_path().0);
        for entry in fs::read_dir(shard).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(!name.to_string_lossy().starts_with("tmp_obj_"));
        }
    }
}

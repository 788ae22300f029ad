use super::{Object, ObjectKind};

/// Opaque file content.
#[derive(Debug, Clone)]
pub struct Blob {
    data: Vec<u8>,
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl Object for Blob {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Blob
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.data.to_owned()
    }
}

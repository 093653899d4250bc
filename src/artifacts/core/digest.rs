use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use sha1::{Digest, Sha1};

/// SHA-1 of `data` as 20 raw bytes
pub fn digest(data: &[u8]) -> [u8; RAW_OBJECT_ID_LENGTH] {
    let mut hasher = Sha1::new();
    hasher.update(data);

    let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
    raw.copy_from_slice(&hasher.finalize());
    raw
}

/// Fingerprint of a fully serialized object (header included)
pub fn object_id(data: &[u8]) -> ObjectId {
    ObjectId::from_raw(&digest(data))
}

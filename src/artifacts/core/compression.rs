//! zlib transform applied to every stored object file

use crate::errors::{OdbError, OdbResult};
use bytes::Bytes;
use std::io::{Read, Write};

pub fn compress(data: &[u8]) -> OdbResult<Bytes> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).map_err(OdbError::Compression)?;

    encoder
        .finish()
        .map(Bytes::from)
        .map_err(OdbError::Compression)
}

/// Fails with [`OdbError::Compression`] on corrupt or truncated input.
pub fn decompress(data: &[u8]) -> OdbResult<Bytes> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut decompressed_content = Vec::new();
    decoder
        .read_to_end(&mut decompressed_content)
        .map_err(OdbError::Compression)?;

    Ok(decompressed_content.into())
}

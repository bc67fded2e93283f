//! `gzip_packed#3072cfa1 packed_data:bytes = Object;`

use std::borrow::Cow;
use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::GzEncoder;
use mtwire_tl_types::{Deserializable, Identifiable, enums, types};

use crate::errors::Result;

/// Compress an encoded object into a `gzip_packed` record.
pub fn pack(object: &[u8]) -> Result<types::GzipPacked> {
    let mut enc = GzEncoder::new(Vec::with_capacity(object.len() / 2), Compression::default());
    enc.write_all(object)?;
    Ok(types::GzipPacked { packed_data: enc.finish()? })
}

/// Inflate the object held by a `gzip_packed` record.
///
/// Some servers send a raw zlib stream instead of a gzip one; both are
/// accepted.
pub fn unpack(packed: &types::GzipPacked) -> Result<Vec<u8>> {
    let data = packed.packed_data.as_slice();
    let mut out = Vec::new();
    if GzDecoder::new(data).read_to_end(&mut out).is_ok() {
        return Ok(out);
    }
    out.clear();
    ZlibDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

/// If `body` is a boxed `gzip_packed`, inflate it; otherwise return it as is.
pub fn inflate_body(body: &[u8]) -> Result<Cow<'_, [u8]>> {
    if mtwire_tl_types::command_of_payload(body) != types::GzipPacked::CONSTRUCTOR_ID {
        return Ok(Cow::Borrowed(body));
    }
    let enums::Object::GzipPacked(packed) = enums::Object::from_bytes(body)?;
    let inflated = unpack(&packed)?;
    log::trace!("[mtwire] inflated gzip_packed: {} → {} bytes", body.len(), inflated.len());
    Ok(Cow::Owned(inflated))
}

// container.rs
//
// [tree length: u32 BE][tree block][payload]

use crate::error::CodecError;

const HEADER_LEN: usize = 4;

pub fn write(tree_bytes: &[u8], payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    let tree_len = u32::try_from(tree_bytes.len())
        .map_err(|_| CodecError::format("tree block does not fit a 32-bit length"))?;

    let mut output = Vec::with_capacity(HEADER_LEN + tree_bytes.len() + payload.len());
    output.extend_from_slice(&tree_len.to_be_bytes());
    output.extend_from_slice(tree_bytes);
    output.extend_from_slice(payload);
    Ok(output)
}

/// Split a container into `(tree block, payload)`.
pub fn read(data: &[u8]) -> Result<(&[u8], &[u8]), CodecError> {
    let (header, rest) = data.split_first_chunk::<HEADER_LEN>().ok_or_else(|| {
        CodecError::format(format!(
            "file is {} bytes, too short for the length header",
            data.len()
        ))
    })?;
    let tree_len = u32::from_be_bytes(*header) as usize;

    if rest.len() < tree_len {
        return Err(CodecError::format(format!(
            "tree block declares {tree_len} bytes but only {} remain",
            rest.len()
        )));
    }
    Ok(rest.split_at(tree_len))
}

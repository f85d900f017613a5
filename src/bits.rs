// bits.rs

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::CodecError;

/// Pack a bit sequence into bytes, MSB first.
///
/// The first output byte holds the number of zero bits (0..=7) appended to
/// reach a byte boundary, so the result is never empty.
pub fn pack(bits: &[bool]) -> Result<Vec<u8>, CodecError> {
    let padding = ((8 - bits.len() % 8) % 8) as u8;

    let mut out = Vec::with_capacity(1 + bits.len().div_ceil(8));
    out.push(padding);

    let mut writer = BitWriter::endian(out, BigEndian);
    for &bit in bits {
        writer.write_bit(bit)?;
    }
    writer.byte_align()?;
    Ok(writer.into_writer())
}

/// Inverse of [`pack`].
pub fn unpack(bytes: &[u8]) -> Result<Vec<bool>, CodecError> {
    let (&padding, body) = bytes
        .split_first()
        .ok_or_else(|| CodecError::format("bit block is missing its padding byte"))?;

    if padding > 7 {
        return Err(CodecError::format(format!(
            "padding byte is {padding}, expected 0..=7"
        )));
    }
    let len = (body.len() * 8)
        .checked_sub(padding as usize)
        .ok_or_else(|| CodecError::format("padding exceeds the number of stored bits"))?;

    let mut reader = BitReader::endian(body, BigEndian);
    let mut bits = Vec::with_capacity(len);
    for _ in 0..len {
        bits.push(reader.read_bit()?);
    }
    Ok(bits)
}

/// Render bits as a string of '0' and '1'.
pub fn to_digits(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Parse a string of '0' and '1' into bits.
pub fn from_digits(digits: &str) -> Result<Vec<bool>, CodecError> {
    digits
        .chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(CodecError::format(format!("{other:?} is not a binary digit"))),
        })
        .collect()
}

//! Endianness helpers

/// Big-endian bytes of a u32, the encoding of derivation indices
pub fn u32_to_be_bytes(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Read a big-endian u32 from the first four bytes, if there are four
pub fn u32_from_be_prefix(bytes: &[u8]) -> Option<u32> {
    let head: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_be_bytes(head))
}

/// Read a big-endian u64 starting at `offset`, if eight bytes are available
pub fn u64_from_be_at(bytes: &[u8], offset: usize) -> Option<u64> {
    let end = offset.checked_add(8)?;
    let word: [u8; 8] = bytes.get(offset..end)?.try_into().ok()?;
    Some(u64::from_be_bytes(word))
}

//! Constant-time byte operations

/// Bitwise complement of every byte
pub fn ct_not<const N: usize>(a: &[u8; N]) -> [u8; N] {
    let mut result = [0u8; N];
    for (r, x) in result.iter_mut().zip(a.iter()) {
        *r = !*x;
    }
    result
}

/// XOR `src` into `dst` byte by byte
pub fn ct_xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= *s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ct_not() {
        assert_eq!(ct_not(&[0x00, 0xff, 0x0f]), [0xff, 0x00, 0xf0]);
        assert_eq!(ct_not(&ct_not(&[7u8; 32])), [7u8; 32]);
    }

    #[test]
    fn test_xor_into() {
        let mut a = [0x55u8; 4];
        ct_xor_into(&mut a, &[0xff, 0x00, 0x55, 0xaa]);
        assert_eq!(a, [0xaa, 0x55, 0x00, 0xff]);

        // Extra source bytes are ignored
        ct_xor_into(&mut a[..2], &[0xff; 4]);
        assert_eq!(a, [0x55, 0xaa, 0x00, 0xff]);
    }
}

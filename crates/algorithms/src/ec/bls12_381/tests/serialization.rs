//! Compressed encoding tests for G1 and G2

use super::super::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use crate::error::Error;

// ============================================================================
// G1
// ============================================================================

#[test]
fn test_g1_compression_round_trip() {
    let g = G1Projective::generator();
    for i in 1..=10u64 {
        let original = G1Affine::from(g * Scalar::from(i));
        let decompressed = G1Affine::from_compressed(&original.to_compressed()).unwrap();
        assert_eq!(original, decompressed);
    }

    for point in [
        G1Affine::identity(),
        G1Affine::generator(),
        -G1Affine::generator(),
    ] {
        let decompressed = G1Affine::from_compressed(&point.to_compressed()).unwrap();
        assert_eq!(point, decompressed);
    }
}

#[test]
fn test_g1_known_encodings() {
    let mut identity = [0u8; 48];
    identity[0] = 0xc0;
    assert_eq!(G1Affine::identity().to_compressed(), identity);

    let g = G1Affine::generator().to_compressed();
    assert_eq!(
        hex::encode(g),
        "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
    );
    assert_eq!(G1Projective::generator().to_compressed(), g);
}

#[test]
fn test_g1_invalid_compressed_rejection() {
    let g = G1Affine::generator().to_compressed();

    // Compression flag cleared
    let mut bytes = g;
    bytes[0] &= 0x7f;
    assert_eq!(
        G1Affine::from_compressed(&bytes),
        Err(Error::encoding("G1", "compression flag not set"))
    );

    // Infinity flag with nonzero x
    let mut bytes = g;
    bytes[0] |= 0x40;
    assert!(matches!(
        G1Affine::from_compressed(&bytes),
        Err(Error::PointEncoding { group: "G1", .. })
    ));

    // Infinity with the sign flag set
    let mut bytes = [0u8; 48];
    bytes[0] = 0xe0;
    assert!(G1Affine::from_compressed(&bytes).is_err());

    // x >= p
    let mut bytes = [0xff; 48];
    bytes[0] = 0x9f;
    assert!(G1Affine::from_compressed(&bytes).is_err());
}

#[test]
fn test_g1_rejects_point_outside_subgroup() {
    let mut found = None;
    for x in 1u8..=255 {
        let mut bytes = [0u8; 48];
        bytes[0] = 0x80;
        bytes[47] = x;
        if let Some(p) = Option::<G1Affine>::from(G1Affine::from_compressed_unchecked(&bytes)) {
            if !bool::from(p.is_torsion_free()) {
                found = Some(bytes);
                break;
            }
        }
    }
    let bytes = found.unwrap();
    assert_eq!(
        G1Affine::from_compressed(&bytes),
        Err(Error::encoding("G1", "point is not in the prime-order subgroup"))
    );
}

// ============================================================================
// G2
// ============================================================================

#[test]
fn test_g2_compression_round_trip() {
    let g = G2Projective::generator();
    for i in 1..=5u64 {
        let original = G2Affine::from(g * Scalar::from(i));
        let decompressed = G2Affine::from_compressed(&original.to_compressed()).unwrap();
        assert_eq!(original, decompressed);
    }

    for point in [G2Affine::identity(), -G2Affine::generator()] {
        assert_eq!(G2Affine::from_compressed(&point.to_compressed()).unwrap(), point);
    }
}

#[test]
fn test_g2_known_encodings() {
    let mut identity = [0u8; 96];
    identity[0] = 0xc0;
    assert_eq!(G2Affine::identity().to_compressed(), identity);

    assert_eq!(
        hex::encode(G2Affine::generator().to_compressed()),
        "93e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e\
         024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8"
    );
}

#[test]
fn test_g2_invalid_compressed_rejection() {
    let g = G2Affine::generator().to_compressed();

    let mut bytes = g;
    bytes[0] &= 0x7f;
    assert_eq!(
        G2Affine::from_compressed(&bytes),
        Err(Error::encoding("G2", "compression flag not set"))
    );

    let mut bytes = [0u8; 96];
    bytes[0] = 0xc0;
    bytes[95] = 1;
    assert_eq!(
        G2Affine::from_compressed(&bytes),
        Err(Error::encoding("G2", "malformed point at infinity"))
    );

    let mut bytes = [0xff; 96];
    bytes[0] = 0x9f;
    assert!(G2Affine::from_compressed(&bytes).is_err());
}

#[test]
fn test_g2_rejects_point_outside_subgroup() {
    let mut found = None;
    for x in 1u8..=255 {
        let mut bytes = [0u8; 96];
        bytes[0] = 0x80;
        bytes[95] = x;
        if let Some(p) = Option::<G2Affine>::from(G2Affine::from_compressed_unchecked(&bytes)) {
            if !bool::from(p.is_torsion_free()) {
                found = Some(bytes);
                break;
            }
        }
    }
    let bytes = found.unwrap();
    assert!(matches!(
        G2Affine::from_compressed(&bytes),
        Err(Error::PointEncoding { group: "G2", .. })
    ));
}

//! Hashing arbitrary byte strings to G2, as specified by RFC 9380 for the
//! suite `BLS12381G2_XMD:SHA-256_SSWU_RO_`.
//!
//! The domain separation tag is supplied by the caller so that the same map
//! serves signing and test vectors alike.

use alloc::vec::Vec;
use augbls_internal::constant_time::ct_xor_into;
use augbls_params::utils::hash::{SHA256_BLOCK_SIZE, SHA256_OUTPUT_SIZE};
use sha2::{Digest, Sha256};
use subtle::{ConditionallyNegatable, ConditionallySelectable};

use super::field::fp::Fp;
use super::field::fp2::Fp2;
use super::G2Projective;
use crate::error::{validate, Result};

/// Bytes drawn per base-field element, `ceil((ceil(log2(p)) + 128) / 8)`
const FIELD_ELEMENT_LEN: usize = 64;

/// `expand_message_xmd` of RFC 9380 section 5.3.1, instantiated with SHA-256.
pub fn expand_message_xmd(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>> {
    validate::max_length("expand_message_xmd DST", dst.len(), 255)?;
    validate::max_length("expand_message_xmd output", len_in_bytes, 65535)?;
    let ell = len_in_bytes.div_ceil(SHA256_OUTPUT_SIZE);
    validate::parameter(ell <= 255, "len_in_bytes", "needs more than 255 digest blocks")?;

    let dst_len = [dst.len() as u8];
    let len_bytes = (len_in_bytes as u16).to_be_bytes();

    let b_0 = Sha256::new()
        .chain_update([0u8; SHA256_BLOCK_SIZE])
        .chain_update(msg)
        .chain_update(len_bytes)
        .chain_update([0u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    let mut b_i = Sha256::new()
        .chain_update(b_0)
        .chain_update([1u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    let mut out = Vec::with_capacity(ell * SHA256_OUTPUT_SIZE);
    out.extend_from_slice(&b_i);

    for i in 2..=ell {
        let mut xored = [0u8; SHA256_OUTPUT_SIZE];
        xored.copy_from_slice(&b_0);
        ct_xor_into(&mut xored, &b_i);
        b_i = Sha256::new()
            .chain_update(xored)
            .chain_update([i as u8])
            .chain_update(dst)
            .chain_update(dst_len)
            .finalize();
        out.extend_from_slice(&b_i);
    }

    out.truncate(len_in_bytes);
    Ok(out)
}

/// Two uniformly distributed `Fp2` elements derived from `msg`.
pub fn hash_to_field(msg: &[u8], dst: &[u8]) -> Result<[Fp2; 2]> {
    let okm = expand_message_xmd(msg, dst, 4 * FIELD_ELEMENT_LEN)?;

    let mut fe = [Fp::zero(); 4];
    for (e, chunk) in fe.iter_mut().zip(okm.chunks_exact(FIELD_ELEMENT_LEN)) {
        let mut buf = [0u8; FIELD_ELEMENT_LEN];
        buf.copy_from_slice(chunk);
        *e = Fp::from_okm(&buf);
    }

    Ok([
        Fp2 {
            c0: fe[0],
            c1: fe[1],
        },
        Fp2 {
            c0: fe[2],
            c1: fe[3],
        },
    ])
}

/// Hash `msg` to a point of G2 under the domain separation tag `dst`.
pub fn hash_to_g2(msg: &[u8], dst: &[u8]) -> Result<G2Projective> {
    let [u0, u1] = hash_to_field(msg, dst)?;
    let q0 = iso_map(&map_to_curve_sswu(&u0));
    let q1 = iso_map(&map_to_curve_sswu(&u1));
    Ok((q0 + q1).clear_cofactor())
}

// Point on the isogenous curve E2': y^2 = x^3 + A' x + B'
struct IsoPoint {
    x: Fp2,
    y: Fp2,
}

/// Simplified SWU map, RFC 9380 section 6.6.2, in constant time.
fn map_to_curve_sswu(u: &Fp2) -> IsoPoint {
    let usq = u.square();
    let z_usq = SSWU_Z * usq;
    let tv1 = z_usq.square() + z_usq;
    let tv1_is_zero = tv1.is_zero();
    let tv1 = tv1.invert().unwrap_or(Fp2::zero());

    // x1 = (-B / A)(1 + tv1), or B / (Z A) in the exceptional case
    let minus_b_over_a = -SSWU_B * SSWU_A.invert().unwrap_or(Fp2::zero());
    let b_over_za = SSWU_B * (SSWU_Z * SSWU_A).invert().unwrap_or(Fp2::zero());
    let x1 = Fp2::conditional_select(
        &(minus_b_over_a * (Fp2::one() + tv1)),
        &b_over_za,
        tv1_is_zero,
    );
    let gx1 = (x1.square() + SSWU_A) * x1 + SSWU_B;

    let x2 = z_usq * x1;
    let gx2 = (x2.square() + SSWU_A) * x2 + SSWU_B;

    let y1 = gx1.sqrt();
    let gx1_square = y1.is_some();
    let y2 = gx2.sqrt().unwrap_or(Fp2::zero());

    let x = Fp2::conditional_select(&x2, &x1, gx1_square);
    let mut y = Fp2::conditional_select(&y2, &y1.unwrap_or(Fp2::zero()), gx1_square);

    y.conditional_negate(u.sgn0() ^ y.sgn0());
    IsoPoint { x, y }
}

fn horner(coeffs: &[Fp2], x: &Fp2) -> Fp2 {
    coeffs
        .iter()
        .rev()
        .fold(Fp2::zero(), |acc, c| acc * x + c)
}

/// 3-isogeny E2' -> E2, evaluated into projective coordinates so that no
/// inversion is needed. A vanishing denominator yields the identity.
fn iso_map(p: &IsoPoint) -> G2Projective {
    let x_num = horner(&ISO_XNUM, &p.x);
    let x_den = horner(&ISO_XDEN, &p.x);
    let y_num = horner(&ISO_YNUM, &p.x);
    let y_den = horner(&ISO_YDEN, &p.x);

    let z = x_den * y_den;
    let res = G2Projective {
        x: x_num * y_den,
        y: p.y * y_num * x_den,
        z,
    };
    G2Projective::conditional_select(&res, &G2Projective::identity(), z.is_zero())
}

/// x numerator, ascending degree
const ISO_XNUM: [Fp2; 4] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x47f6_71c7_1ce0_5e62,
            0x06dd_5707_1206_393e,
            0x7c80_cd2a_f3fd_71a2,
            0x0481_03ea_9e6c_d062,
            0xc545_16ac_c8d0_37f6,
            0x1380_8f55_0920_ea41,
        ]),
        c1: Fp::from_raw_unchecked([
            0x47f6_71c7_1ce0_5e62,
            0x06dd_5707_1206_393e,
            0x7c80_cd2a_f3fd_71a2,
            0x0481_03ea_9e6c_d062,
            0xc545_16ac_c8d0_37f6,
            0x1380_8f55_0920_ea41,
        ]),
    },
    Fp2 {
        c0: Fp::zero(),
        c1: Fp::from_raw_unchecked([
            0x5fe5_5555_554c_71d0,
            0x873f_ffdd_236a_aaa3,
            0x6a6b_4619_b26e_f918,
            0x21c2_8884_0887_4945,
            0x2836_cda7_028c_abc5,
            0x0ac7_3310_a7fd_5abd,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x0a0c_5555_5559_71c3,
            0xdb0c_0010_1f9e_aaae,
            0xb1fb_2f94_1d79_7997,
            0xd396_0742_ef41_6e1c,
            0xb700_40e2_c205_56f4,
            0x149d_7861_e581_393b,
        ]),
        c1: Fp::from_raw_unchecked([
            0xaff2_aaaa_aaa6_38e8,
            0x439f_ffee_91b5_5551,
            0xb535_a30c_d937_7c8c,
            0x90e1_4442_0443_a4a2,
            0x941b_66d3_8146_55e2,
            0x0563_9988_53fe_ad5e,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x40aa_c71c_71c7_25ed,
            0x1909_5555_7a84_e38e,
            0xd817_050a_8f41_abc3,
            0xd864_85d4_c87f_6fb1,
            0x696e_b479_f885_d059,
            0x198e_1a74_3280_02d2,
        ]),
        c1: Fp::zero(),
    },
];

/// x denominator, monic
const ISO_XDEN: [Fp2; 3] = [
    Fp2 {
        c0: Fp::zero(),
        c1: Fp::from_raw_unchecked([
            0x1f3a_ffff_ff13_ab97,
            0xf25b_fc61_1da3_ff3e,
            0xca37_57cb_3819_b208,
            0x3e64_2736_6f8c_ec18,
            0x0397_7bc8_6095_b089,
            0x04f6_9db1_3f39_a952,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x4476_0000_0027_552e,
            0xdcb8_009a_4348_0020,
            0x6f7e_e9ce_4a6e_8b59,
            0xb103_30b7_c0a9_5bc6,
            0x6140_b1fc_fb1e_54b7,
            0x0381_be09_7f0b_b4e1,
        ]),
        c1: Fp::from_raw_unchecked([
            0x7588_ffff_ffd8_557d,
            0x41f3_ff64_6e0b_ffdf,
            0xf7b1_e8d2_ac42_6aca,
            0xb374_1acd_32db_b6f8,
            0xe9da_f5b9_482d_581f,
            0x167f_53e0_ba74_31b8,
        ]),
    },
    Fp2 {
        c0: Fp::one(),
        c1: Fp::zero(),
    },
];

/// y numerator
const ISO_YNUM: [Fp2; 4] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x96d8_f684_bdfc_77be,
            0xb530_e4f4_3b66_d0e2,
            0x184a_88ff_3796_52fd,
            0x57cb_23ec_fae8_04e1,
            0x0fd2_e39e_ada3_eba9,
            0x08c8_055e_31c5_d5c3,
        ]),
        c1: Fp::from_raw_unchecked([
            0x96d8_f684_bdfc_77be,
            0xb530_e4f4_3b66_d0e2,
            0x184a_88ff_3796_52fd,
            0x57cb_23ec_fae8_04e1,
            0x0fd2_e39e_ada3_eba9,
            0x08c8_055e_31c5_d5c3,
        ]),
    },
    Fp2 {
        c0: Fp::zero(),
        c1: Fp::from_raw_unchecked([
            0xbf0a_71c7_1c91_b406,
            0x4d6d_55d2_8b76_38fd,
            0x9d82_f98e_5f20_5aee,
            0xa27a_a27b_1d1a_18d5,
            0x02c3_b2b2_d293_8e86,
            0x0c7d_1342_0b09_807f,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0xd7f9_5555_5553_1c74,
            0x21cf_fff7_48da_aaa8,
            0x5a9a_d186_6c9b_be46,
            0x4870_a221_0221_d251,
            0x4a0d_b369_c0a3_2af1,
            0x02b1_ccc4_29ff_56af,
        ]),
        c1: Fp::from_raw_unchecked([
            0xe205_aaaa_aaac_8e37,
            0xfcdc_0007_6879_5556,
            0x0c96_011a_8a15_37dd,
            0x1c06_a963_f163_406e,
            0x010d_f44c_82a8_81e6,
            0x174f_4526_0f80_8feb,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0xa470_bda1_2f67_f35c,
            0xc0fe_38e2_3327_b425,
            0xc9d3_d0f2_c6f0_678d,
            0x1c55_c993_5b5a_982e,
            0x27f6_c0e2_f074_6764,
            0x117c_5e6e_28aa_9054,
        ]),
        c1: Fp::zero(),
    },
];

/// y denominator, monic
const ISO_YDEN: [Fp2; 4] = [
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x0162_ffff_fa76_5adf,
            0x8f7b_ea48_0083_fb75,
            0x561b_3c22_59e9_3611,
            0x11e1_9fc1_a9c8_75d5,
            0xca71_3efc_0036_7660,
            0x03c6_a03d_41da_1151,
        ]),
        c1: Fp::from_raw_unchecked([
            0x0162_ffff_fa76_5adf,
            0x8f7b_ea48_0083_fb75,
            0x561b_3c22_59e9_3611,
            0x11e1_9fc1_a9c8_75d5,
            0xca71_3efc_0036_7660,
            0x03c6_a03d_41da_1151,
        ]),
    },
    Fp2 {
        c0: Fp::zero(),
        c1: Fp::from_raw_unchecked([
            0x5db0_ffff_fd3b_02c5,
            0xd713_f523_58eb_fdba,
            0x5ea6_0761_a84d_161a,
            0xbb2c_75a3_4ea6_c44a,
            0x0ac6_7359_21c1_119b,
            0x0ee3_d913_bdac_fbf6,
        ]),
    },
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x66b1_0000_003a_ffc5,
            0xcb14_00e7_64ec_0030,
            0xa73e_5eb5_6fa5_d106,
            0x8984_c913_a0fe_09a9,
            0x11e1_0afb_78ad_7f13,
            0x0542_9d0e_3e91_8f52,
        ]),
        c1: Fp::from_raw_unchecked([
            0x534d_ffff_ffc4_aae6,
            0x5397_ff17_4c67_ffcf,
            0xbff2_73eb_870b_251d,
            0xdaf2_8271_5287_0915,
            0x393a_9cba_ca9e_2dc3,
            0x14be_74db_faee_5748,
        ]),
    },
    Fp2 {
        c0: Fp::one(),
        c1: Fp::zero(),
    },
];

// A' = 240 u
const SSWU_A: Fp2 = Fp2 {
    c0: Fp::zero(),
    c1: Fp::from_raw_unchecked([
        0xe53a_0000_0313_5242,
        0x0108_0c0f_def8_0285,
        0xe788_9edb_e340_f6bd,
        0x0b51_3751_2631_0601,
        0x02d6_9857_17c7_44ab,
        0x1220_b4e9_79ea_5467,
    ]),
};

// B' = 1012 (1 + u)
const SSWU_B: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x22ea_0000_0cf8_9db2,
        0x6ec8_32df_7138_0aa4,
        0x6e1b_9440_3db5_a66e,
        0x75bf_3c53_a794_73ba,
        0x3dd3_a569_412c_0a34,
        0x125c_db5e_74dc_4fd1,
    ]),
    c1: Fp::from_raw_unchecked([
        0x22ea_0000_0cf8_9db2,
        0x6ec8_32df_7138_0aa4,
        0x6e1b_9440_3db5_a66e,
        0x75bf_3c53_a794_73ba,
        0x3dd3_a569_412c_0a34,
        0x125c_db5e_74dc_4fd1,
    ]),
};

// Z = -(2 + u)
const SSWU_Z: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x87eb_ffff_fff9_555c,
        0x656f_ffe5_da8f_fffa,
        0x0fd0_7493_45d3_3ad2,
        0xd951_e663_0665_76f4,
        0xde29_1a3d_41e9_80d3,
        0x0815_664c_7dfe_040d,
    ]),
    c1: Fp::from_raw_unchecked([
        0x43f5_ffff_fffc_aaae,
        0x32b7_fff2_ed47_fffd,
        0x07e8_3a49_a2e9_9d69,
        0xeca8_f331_8332_bb7a,
        0xef14_8d1e_a0f4_c069,
        0x040a_b326_3eff_0206,
    ]),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::bls12_381::G2Affine;

    const QUUX_DST: &[u8] = b"QUUX-V01-CS02-with-BLS12381G2_XMD:SHA-256_SSWU_RO_";

    fn fp(hex_str: &str) -> Fp {
        let mut bytes = [0u8; 48];
        hex::decode_to_slice(hex_str, &mut bytes).unwrap();
        Fp::from_bytes(&bytes).unwrap()
    }

    fn assert_point(p: G2Projective, x: [&str; 2], y: [&str; 2]) {
        let p = G2Affine::from(p);
        assert_eq!(p.x, Fp2 { c0: fp(x[0]), c1: fp(x[1]) });
        assert_eq!(p.y, Fp2 { c0: fp(y[0]), c1: fp(y[1]) });
    }

    #[test]
    fn test_expand_message_xmd_vectors() {
        let dst = b"QUUX-V01-CS02-with-expander-SHA256-128";
        let out = expand_message_xmd(b"", dst, 0x20).unwrap();
        assert_eq!(
            hex::encode(out),
            "68a985b87eb6b46952128911f2a4412bbc302a9d759667f87f7a21d803f07235"
        );
        let out = expand_message_xmd(b"abc", dst, 0x20).unwrap();
        assert_eq!(
            hex::encode(out),
            "d8ccab23b5985ccea865c6c97b6e5b8350e794e603b4b97902f53a8a0d605615"
        );
    }

    #[test]
    fn test_expand_message_xmd_limits() {
        let long_dst = [0x41u8; 256];
        assert!(expand_message_xmd(b"msg", &long_dst, 32).is_err());
        assert!(expand_message_xmd(b"msg", b"DST", 65536).is_err());
        // 255 blocks of 32 bytes is the most SHA-256 can produce
        assert!(expand_message_xmd(b"msg", b"DST", 255 * 32).is_ok());
        assert!(expand_message_xmd(b"msg", b"DST", 255 * 32 + 1).is_err());
        assert_eq!(expand_message_xmd(b"msg", b"DST", 200).unwrap().len(), 200);
    }

    #[test]
    fn test_sswu_lands_on_isogenous_curve() {
        let [u0, u1] = hash_to_field(b"sswu", QUUX_DST).unwrap();
        for u in [u0, u1, Fp2::zero(), Fp2::one()] {
            let p = map_to_curve_sswu(&u);
            assert_eq!(p.y.square(), (p.x.square() + SSWU_A) * p.x + SSWU_B);
            // sign of y follows the sign of u
            assert_eq!(bool::from(p.y.sgn0()), bool::from(u.sgn0()));
        }
    }

    #[test]
    fn test_hash_to_g2_empty_message() {
        let p = hash_to_g2(b"", QUUX_DST).unwrap();
        assert_point(
            p,
            [
                "0141ebfbdca40eb85b87142e130ab689c673cf60f1a3e98d69335266f30d9b8d4ac44c1038e9dcdd5393faf5c41fb78a",
                "05cb8437535e20ecffaef7752baddf98034139c38452458baeefab379ba13dff5bf5dd71b72418717047f5b0f37da03d",
            ],
            [
                "0503921d7f6a12805e72940b963c0cf3471c7b2a524950ca195d11062ee75ec076daf2d4bc358c4b190c0c98064fdd92",
                "12424ac32561493f3fe3c260708a12b7c620e7be00099a974e259ddc7d1f6395c3c811cdd19f1e8dbf3e9ecfdcbab8d6",
            ],
        );
    }

    #[test]
    fn test_hash_to_g2_abc() {
        let p = hash_to_g2(b"abc", QUUX_DST).unwrap();
        assert_point(
            p,
            [
                "02c2d18e033b960562aae3cab37a27ce00d80ccd5ba4b7fe0e7a210245129dbec7780ccc7954725f4168aff2787776e6",
                "139cddbccdc5e91b9623efd38c49f81a6f83f175e80b06fc374de9eb4b41dfe4ca3a230ed250fbe3a2acf73a41177fd8",
            ],
            [
                "1787327b68159716a37440985269cf584bcb1e621d3a7202be6ea05c4cfe244aeb197642555a0645fb87bf7466b2ba48",
                "00aa65dae3c8d732d10ecd2c50f8a1baf3001578f71c694e03866e9f3d49ac1e1ce70dd94a733534f106d4cec0eddd16",
            ],
        );
    }

    #[test]
    fn test_hash_is_deterministic_and_in_subgroup() {
        let a = hash_to_g2(b"message", b"some tag").unwrap();
        let b = hash_to_g2(b"message", b"some tag").unwrap();
        let c = hash_to_g2(b"message", b"other tag").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        let a = G2Affine::from(a);
        assert!(bool::from(a.is_on_curve()));
        assert!(bool::from(a.is_torsion_free()));
    }
}

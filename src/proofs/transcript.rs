use curv::arithmetic::traits::{Converter, Modulo};
use curv::BigInt;
use sha2::{Digest, Sha256};

use crate::proofs::{group_order, GE};
use crate::BulletproofError;

/// Textual point encoding used by the transcript: "(X,Y)" with decimal
/// affine coordinates, "(0,0)" for the point at infinity. This format is
/// normative; changing it breaks compatibility with existing verifiers.
pub fn encode_point(p: &GE) -> String {
    match (p.x_coord(), p.y_coord()) {
        (Some(x), Some(y)) => format!("({},{})", x.to_str_radix(10), y.to_str_radix(10)),
        _ => String::from("(0,0)"),
    }
}

/// Decimal ASCII, no sign prefix. Inputs are reduced mod q beforehand.
pub fn encode_scalar(s: &BigInt) -> String {
    s.to_str_radix(10)
}

/// Two independent challenges from a pair of transcript points: the
/// digest of both encodings in order, and in swapped order, each reduced
/// mod q.
pub fn hash_bp(a: &GE, b: &GE) -> (BigInt, BigInt) {
    let q = group_order();
    let ea = encode_point(a);
    let eb = encode_point(b);

    let digest1 = Sha256::new()
        .chain(ea.as_bytes())
        .chain(eb.as_bytes())
        .finalize();
    let digest2 = Sha256::new()
        .chain(eb.as_bytes())
        .chain(ea.as_bytes())
        .finalize();

    (
        BigInt::from_bytes(digest1.as_slice()).modulus(q),
        BigInt::from_bytes(digest2.as_slice()).modulus(q),
    )
}

/// Challenge binding the full inner-product statement: P, then each
/// generator pair g[i], h[i] in order, then the claimed inner product c.
pub fn hash_ip(
    g_vec: &[GE],
    h_vec: &[GE],
    p: &GE,
    c: &BigInt,
) -> Result<BigInt, BulletproofError> {
    if g_vec.len() != h_vec.len() {
        return Err(BulletproofError::LengthMismatch);
    }
    let mut digest = Sha256::new();
    digest.update(encode_point(p).as_bytes());
    for (g, h) in g_vec.iter().zip(h_vec) {
        digest.update(encode_point(g).as_bytes());
        digest.update(encode_point(h).as_bytes());
    }
    digest.update(encode_scalar(c).as_bytes());
    Ok(BigInt::from_bytes(digest.finalize().as_slice()).modulus(group_order()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proofs::params::BulletproofParams;

    #[test]
    fn test_encode_identity() {
        assert_eq!(encode_point(&GE::zero()), "(0,0)");
    }

    #[test]
    fn test_encode_point_format() {
        let params = BulletproofParams::setup(2).unwrap();
        let encoded = encode_point(&params.G);
        assert!(encoded.starts_with('('));
        assert!(encoded.ends_with(')'));
        assert!(encoded.contains(','));
    }

    #[test]
    fn test_hash_bp_deterministic() {
        let params = BulletproofParams::setup(2).unwrap();
        let (y1, z1) = hash_bp(&params.G, &params.H);
        let (y2, z2) = hash_bp(&params.G, &params.H);
        assert_eq!(y1, y2);
        assert_eq!(z1, z2);
    }

    #[test]
    fn test_hash_bp_order_swap() {
        let params = BulletproofParams::setup(2).unwrap();
        let (s1, s2) = hash_bp(&params.G, &params.H);
        let (t1, t2) = hash_bp(&params.H, &params.G);
        assert_eq!(s1, t2);
        assert_eq!(s2, t1);
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_hash_ip_binds_claim() {
        let params = BulletproofParams::setup(4).unwrap();
        let c1 = hash_ip(&params.g_vec, &params.h_vec, &params.u, &BigInt::from(5)).unwrap();
        let c2 = hash_ip(&params.g_vec, &params.h_vec, &params.u, &BigInt::from(6)).unwrap();
        assert_ne!(c1, c2);
    }

    #[test]
    fn test_hash_ip_length_mismatch() {
        let params = BulletproofParams::setup(4).unwrap();
        let result = hash_ip(
            &params.g_vec[..3],
            &params.h_vec,
            &params.u,
            &BigInt::from(5),
        );
        assert_eq!(result, Err(BulletproofError::LengthMismatch));
    }
}

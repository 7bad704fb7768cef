#![allow(non_snake_case)]

use curv::arithmetic::traits::{Converter, Modulo};
use curv::arithmetic::{BasicOps, Integer, One};
use curv::BigInt;
use sha2::{Digest, Sha256};

use crate::proofs::GE;
use crate::BulletproofError;

pub const SEED_H: &str = "BulletproofsDoesNotNeedTrustedSetupH";
pub const SEED_U: &str = "BulletproofsDoesNotNeedTrustedSetupU";
const SEED_G_VEC: &str = "BulletproofsDoesNotNeedTrustedSetupGi";
const SEED_H_VEC: &str = "BulletproofsDoesNotNeedTrustedSetupHi";

/// Common reference string for range proofs of [0, 2^num_bits). Immutable
/// after setup and shareable between prover and verifier.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BulletproofParams {
    pub num_bits: usize,
    pub G: GE,
    pub H: GE,
    pub g_vec: Vec<GE>,
    pub h_vec: Vec<GE>,
    pub u: GE,
}

impl BulletproofParams {
    /// Derives the parameters for a given bit width. G is the canonical
    /// base point; H, u and every g_vec[i], h_vec[i] come from map-to-group
    /// on fixed or indexed seeds, so two setups for the same width agree
    /// and no per-index randomness exists to leak.
    pub fn setup(num_bits: usize) -> Result<BulletproofParams, BulletproofError> {
        let G = GE::generator().to_point();
        let H = map_to_group(SEED_H)?;
        let u = map_to_group(SEED_U)?;

        let g_vec = (0..num_bits)
            .map(|i| map_to_group(&format!("{}{}", SEED_G_VEC, i)))
            .collect::<Result<Vec<GE>, BulletproofError>>()?;
        let h_vec = (0..num_bits)
            .map(|i| map_to_group(&format!("{}{}", SEED_H_VEC, i)))
            .collect::<Result<Vec<GE>, BulletproofError>>()?;

        Ok(BulletproofParams {
            num_bits,
            G,
            H,
            g_vec,
            h_vec,
            u,
        })
    }
}

/// Try-and-increment map-to-group: x is the digest of the counter-prefixed
/// seed reduced into the base field, y a square root of x^3 + 7 when one
/// exists. The base-field prime is 3 mod 4, so the root is a single
/// exponentiation.
pub fn map_to_group(seed: &str) -> Result<GE, BulletproofError> {
    let p = field_prime();
    let sqrt_exp = (&p + BigInt::one()).div_floor(&BigInt::from(4));
    let seven = BigInt::from(7);

    for counter in 0..256 {
        let digest = Sha256::new()
            .chain(counter.to_string().as_bytes())
            .chain(seed.as_bytes())
            .finalize();
        let x = BigInt::from_bytes(digest.as_slice()).modulus(&p);
        let x_cubed = BigInt::mod_pow(&x, &BigInt::from(3), &p);
        let y_sq = BigInt::mod_add(&x_cubed, &seven, &p);
        let y = BigInt::mod_pow(&y_sq, &sqrt_exp, &p);
        if BigInt::mod_mul(&y, &y, &p) == y_sq {
            if let Ok(point) = GE::from_coords(&x, &y) {
                return Ok(point);
            }
        }
    }
    Err(BulletproofError::SetupError)
}

/// 2^256 - 2^32 - 977, the secp256k1 base-field prime.
fn field_prime() -> BigInt {
    let two = BigInt::from(2);
    two.pow(256) - two.pow(32) - BigInt::from(977)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_deterministic() {
        let params1 = BulletproofParams::setup(8).unwrap();
        let params2 = BulletproofParams::setup(8).unwrap();
        assert_eq!(params1, params2);
    }

    #[test]
    fn test_setup_lengths() {
        let params = BulletproofParams::setup(16).unwrap();
        assert_eq!(params.num_bits, 16);
        assert_eq!(params.g_vec.len(), 16);
        assert_eq!(params.h_vec.len(), 16);
    }

    #[test]
    fn test_generators_distinct() {
        let params = BulletproofParams::setup(8).unwrap();
        let mut all = vec![params.G.clone(), params.H.clone(), params.u.clone()];
        all.extend_from_slice(&params.g_vec);
        all.extend_from_slice(&params.h_vec);
        for point in &all {
            assert!(!point.is_zero());
        }
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(all[i], all[j]);
            }
        }
    }

    #[test]
    fn test_map_to_group_on_curve() {
        // a derived point round-trips through its own coordinates
        let point = map_to_group(SEED_H).unwrap();
        let x = point.x_coord().unwrap();
        let y = point.y_coord().unwrap();
        assert_eq!(GE::from_coords(&x, &y).unwrap(), point);
    }
}

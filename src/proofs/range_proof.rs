/*

Copyright 2020 by Kzen Networks

Copyright information here.

@license GPL-3.0+ <link>
*/

// based on the paper: https://eprint.iacr.org/2017/1066.pdf

#![allow(non_snake_case)]

use curv::arithmetic::traits::Modulo;
use curv::arithmetic::{One, Zero};
use curv::BigInt;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::proofs::inner_product::{
    commit_inner_product, InnerProductProof, InnerProductStatement,
};
use crate::proofs::params::BulletproofParams;
use crate::proofs::transcript::hash_bp;
use crate::proofs::vector::{multiexp, ScalarVector};
use crate::proofs::{group_order, sample_scalar, sample_scalar_vector, FE, GE};
use crate::BulletproofError;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RangeProof {
    pub V: GE,
    pub A: GE,
    pub S: GE,
    pub T1: GE,
    pub T2: GE,
    pub tau_x: BigInt,
    pub miu: BigInt,
    pub tx: BigInt,
    pub inner_product_proof: InnerProductProof,
}

impl RangeProof {
    /// Proves that the secret committed to in V lies in [0, 2^n). Fails
    /// with `OutOfRange` when it does not and `RngFailure` when the
    /// randomness source errors. All witness material is zeroized before
    /// returning.
    pub fn prove<R: RngCore + CryptoRng>(
        params: &BulletproofParams,
        secret: &BigInt,
        rng: &mut R,
    ) -> Result<RangeProof, BulletproofError> {
        let n = params.num_bits;
        let q = group_order();
        let one = BigInt::one();

        // first phase: commit to the secret, its bits and the blinding vectors
        let mut aL = ScalarVector::decompose_bits(secret, n)?;
        let mut aR = aL.sub(&ScalarVector::constant(&one, n))?;

        let mut gamma = sample_scalar(rng)?;
        let V = &params.G * &FE::from_bigint(secret) + &params.H * &FE::from_bigint(&gamma);

        let mut alpha = sample_scalar(rng)?;
        let A = commit_vector(&params.H, &alpha, &params.g_vec, &params.h_vec, &aL, &aR)?;

        let mut sL = sample_scalar_vector(rng, n)?;
        let mut sR = sample_scalar_vector(rng, n)?;
        let mut rho = sample_scalar(rng)?;
        let S = commit_vector(&params.H, &rho, &params.g_vec, &params.h_vec, &sL, &sR)?;

        let (y, z) = hash_bp(&A, &S);

        // second phase: t(X) = <l(X), r(X)> = t0 + t1.X + t2.X^2
        let y_powers = ScalarVector::powers(&y, n);
        let two_powers = ScalarVector::powers(&BigInt::from(2), n);
        let z_vec = ScalarVector::constant(&z, n);
        let z_sq = BigInt::mod_mul(&z, &z, q);

        // t1 = < aL - z.1^n, y^n . sR > + < sL, y^n . (aR + z.1^n) + z^2.2^n >
        let aL_minus_z = aL.sub(&z_vec)?;
        let yn_sR = y_powers.hadamard(&sR)?;
        let sp1 = aL_minus_z.inner_product(&yn_sR)?;

        let aR_plus_z = aR.add(&z_vec)?;
        let z2_2n = two_powers.scalar_mul(&z_sq);
        let r_zero = y_powers.hadamard(&aR_plus_z)?.add(&z2_2n)?;
        let sp2 = sL.inner_product(&r_zero)?;
        let t1 = BigInt::mod_add(&sp1, &sp2, q);

        // t2 = < sL, y^n . sR >
        let t2 = sL.inner_product(&yn_sR)?;

        let mut tau1 = sample_scalar(rng)?;
        let mut tau2 = sample_scalar(rng)?;
        let T1 = &params.G * &FE::from_bigint(&t1) + &params.H * &FE::from_bigint(&tau1);
        let T2 = &params.G * &FE::from_bigint(&t2) + &params.H * &FE::from_bigint(&tau2);

        let (x, _) = hash_bp(&T1, &T2);
        let x_sq = BigInt::mod_mul(&x, &x, q);

        // third phase: fold the vectors at x and blind the openings
        let mut bl = aL_minus_z.add(&sL.scalar_mul(&x))?;
        let mut br = y_powers
            .hadamard(&aR_plus_z.add(&sR.scalar_mul(&x))?)?
            .add(&z2_2n)?;
        let tx = bl.inner_product(&br)?;

        // tau_x = tau2.x^2 + tau1.x + z^2.gamma
        let tau_x = {
            let t = BigInt::mod_mul(&tau2, &x_sq, q);
            let t = BigInt::mod_add(&t, &BigInt::mod_mul(&tau1, &x, q), q);
            BigInt::mod_add(&t, &BigInt::mod_mul(&z_sq, &gamma, q), q)
        };
        let miu = BigInt::mod_add(&alpha, &BigInt::mod_mul(&rho, &x, q), q);

        // inner product argument over (g, h', u) with claim tx
        let hprime = switch_generators(&params.h_vec, &y)?;
        let P = commit_inner_product(&params.g_vec, &hprime, &bl, &br)?;
        let ip_stmt = InnerProductStatement {
            g_vec: params.g_vec.clone(),
            h_vec: hprime,
            u: params.u.clone(),
            P,
            c: tx.clone(),
        };
        let inner_product_proof = InnerProductProof::prove(&ip_stmt, &bl, &br)?;

        aL.zeroize();
        aR.zeroize();
        sL.zeroize();
        sR.zeroize();
        bl.zeroize();
        br.zeroize();
        gamma.zeroize();
        alpha.zeroize();
        rho.zeroize();
        tau1.zeroize();
        tau2.zeroize();

        Ok(RangeProof {
            V,
            A,
            S,
            T1,
            T2,
            tau_x,
            miu,
            tx,
            inner_product_proof,
        })
    }

    /// Verifies the proof against the shared parameters. Returns `Ok(false)`
    /// for a well-formed proof that does not hold; errors are reserved for
    /// internal failures.
    pub fn verify(&self, params: &BulletproofParams) -> Result<bool, BulletproofError> {
        let n = params.num_bits;
        let q = group_order();
        let one = BigInt::one();

        // regenerate challenges y, z, x
        let (y, z) = hash_bp(&self.A, &self.S);
        let (x, _) = hash_bp(&self.T1, &self.T2);
        let z_sq = BigInt::mod_mul(&z, &z, q);
        let x_sq = BigInt::mod_mul(&x, &x, q);

        let hprime = switch_generators(&params.h_vec, &y)?;

        // condition (65): G^tx . H^tau_x == V^{z^2} . G^{delta(y,z)} . T1^x . T2^{x^2}
        let lhs =
            &params.G * &FE::from_bigint(&self.tx) + &params.H * &FE::from_bigint(&self.tau_x);
        let delta_yz = delta(n, &y, &z)?;
        let rhs = &self.V * &FE::from_bigint(&z_sq)
            + &params.G * &FE::from_bigint(&delta_yz)
            + &self.T1 * &FE::from_bigint(&x)
            + &self.T2 * &FE::from_bigint(&x_sq);
        let c65 = (lhs - rhs).is_zero();

        // rebuild the inner-product commitment from the public transcript:
        // P = A . S^x . Prod g[i]^{-z} . Prod h'[i]^{z.y^i + z^2.2^i} . H^{-miu}
        let y_powers = ScalarVector::powers(&y, n);
        let two_powers = ScalarVector::powers(&BigInt::from(2), n);
        let minus_z = BigInt::mod_sub(&BigInt::zero(), &z, q);
        let minus_miu = BigInt::mod_sub(&BigInt::zero(), &self.miu, q);
        let hprime_exp = y_powers.scalar_mul(&z).add(&two_powers.scalar_mul(&z_sq))?;

        let mut scalars_P = Vec::with_capacity(2 * n + 3);
        scalars_P.push(one);
        scalars_P.push(x);
        scalars_P.push(minus_miu);
        scalars_P.extend_from_slice(ScalarVector::constant(&minus_z, n).as_slice());
        scalars_P.extend_from_slice(hprime_exp.as_slice());
        let mut points_P = Vec::with_capacity(2 * n + 3);
        points_P.push(self.A.clone());
        points_P.push(self.S.clone());
        points_P.push(params.H.clone());
        points_P.extend_from_slice(&params.g_vec);
        points_P.extend_from_slice(&hprime);
        let P = multiexp(&points_P, &scalars_P)?;

        let ip_stmt = InnerProductStatement {
            g_vec: params.g_vec.clone(),
            h_vec: hprime,
            u: params.u.clone(),
            P,
            c: self.tx.clone(),
        };
        let ip_ok = self.inner_product_proof.verify(&ip_stmt)?;

        Ok(c65 && ip_ok)
    }
}

/// delta(y, z) = (z - z^2) . <1^n, y^n> - z^3 . <1^n, 2^n>
pub(crate) fn delta(n: usize, y: &BigInt, z: &BigInt) -> Result<BigInt, BulletproofError> {
    let q = group_order();
    let z_sq = BigInt::mod_mul(z, z, q);
    let z_cubed = BigInt::mod_mul(&z_sq, z, q);

    let ones = ScalarVector::constant(&BigInt::one(), n);
    let sum_y_powers = ones.inner_product(&ScalarVector::powers(y, n))?;
    let sum_two_powers = ones.inner_product(&ScalarVector::powers(&BigInt::from(2), n))?;

    let t = BigInt::mod_sub(z, &z_sq, q);
    let t = BigInt::mod_mul(&t, &sum_y_powers, q);
    Ok(BigInt::mod_sub(
        &t,
        &BigInt::mod_mul(&z_cubed, &sum_two_powers, q),
        q,
    ))
}

/// Generator switch for the inner product: h'[i] = h[i]^{y^{-i}}.
fn switch_generators(h_vec: &[GE], y: &BigInt) -> Result<Vec<GE>, BulletproofError> {
    let q = group_order();
    let y_inv = BigInt::mod_inv(y, q).ok_or(BulletproofError::HashDecodeError)?;
    let mut hprime = Vec::with_capacity(h_vec.len());
    let mut exp = BigInt::one();
    for h in h_vec {
        hprime.push(h * &FE::from_bigint(&exp));
        exp = BigInt::mod_mul(&exp, &y_inv, q);
    }
    Ok(hprime)
}

/// H^blind . Prod g[i]^{l_i} . Prod h[i]^{r_i}
fn commit_vector(
    H: &GE,
    blind: &BigInt,
    g_vec: &[GE],
    h_vec: &[GE],
    l: &ScalarVector,
    r: &ScalarVector,
) -> Result<GE, BulletproofError> {
    let mut scalars = Vec::with_capacity(2 * l.len() + 1);
    scalars.push(blind.clone());
    scalars.extend_from_slice(l.as_slice());
    scalars.extend_from_slice(r.as_slice());
    let mut points = Vec::with_capacity(2 * l.len() + 1);
    points.push(H.clone());
    points.extend_from_slice(g_vec);
    points.extend_from_slice(h_vec);
    multiexp(&points, &scalars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proofs::params::BulletproofParams;
    use curv::arithmetic::traits::{BitManipulation, Samplable};
    use curv::arithmetic::BasicOps;
    use rand::rngs::OsRng;

    fn test_helper(n: usize, secret: &BigInt) {
        let params = BulletproofParams::setup(n).unwrap();
        let proof = RangeProof::prove(&params, secret, &mut OsRng).unwrap();
        assert!(proof.verify(&params).unwrap());
    }

    fn proof_42() -> (BulletproofParams, RangeProof) {
        let params = BulletproofParams::setup(32).unwrap();
        let proof = RangeProof::prove(&params, &BigInt::from(42), &mut OsRng).unwrap();
        (params, proof)
    }

    #[test]
    fn test_range_proof_8() {
        for v in &[0u32, 1, 77, 255] {
            test_helper(8, &BigInt::from(*v));
        }
    }

    #[test]
    fn test_range_proof_16() {
        for v in &[0u32, 1, 31337, 65535] {
            test_helper(16, &BigInt::from(*v));
        }
    }

    #[test]
    fn test_range_proof_32() {
        let max = BigInt::from(2).pow(32) - BigInt::one();
        test_helper(32, &BigInt::from(0));
        test_helper(32, &BigInt::from(1));
        test_helper(32, &BigInt::from(42));
        test_helper(32, &max);
    }

    #[test]
    fn test_range_proof_64() {
        let bound = BigInt::from(2).pow(64);
        test_helper(64, &BigInt::from(0));
        test_helper(64, &BigInt::sample_below(&bound));
        test_helper(64, &(bound - BigInt::one()));
    }

    #[test]
    fn test_out_of_range() {
        let params = BulletproofParams::setup(32).unwrap();
        let bound = BigInt::from(2).pow(32);

        let at_bound = RangeProof::prove(&params, &bound, &mut OsRng);
        assert_eq!(at_bound.unwrap_err(), BulletproofError::OutOfRange);

        let negative = RangeProof::prove(&params, &BigInt::from(-1), &mut OsRng);
        assert_eq!(negative.unwrap_err(), BulletproofError::OutOfRange);

        let below_bound = RangeProof::prove(&params, &(bound - BigInt::one()), &mut OsRng);
        assert!(below_bound.unwrap().verify(&params).unwrap());
    }

    #[test]
    fn test_tampered_tau_x() {
        let (params, mut proof) = proof_42();
        // flip the lowest bit
        proof.tau_x = if proof.tau_x.test_bit(0) {
            &proof.tau_x - &BigInt::one()
        } else {
            &proof.tau_x + &BigInt::one()
        };
        assert!(!proof.verify(&params).unwrap());
    }

    #[test]
    fn test_tampered_T2() {
        let (params, mut proof) = proof_42();
        proof.T2 = proof.T1.clone();
        assert!(!proof.verify(&params).unwrap());
    }

    #[test]
    fn test_tampered_tx() {
        let (params, mut proof) = proof_42();
        proof.tx = BigInt::mod_add(&proof.tx, &BigInt::one(), group_order());
        assert!(!proof.verify(&params).unwrap());
    }

    #[test]
    fn test_tampered_miu() {
        let (params, mut proof) = proof_42();
        proof.miu = BigInt::mod_add(&proof.miu, &BigInt::one(), group_order());
        assert!(!proof.verify(&params).unwrap());
    }

    #[test]
    fn test_tampered_A() {
        let (params, mut proof) = proof_42();
        proof.A = &proof.A + &params.G;
        assert!(!proof.verify(&params).unwrap());
    }

    #[test]
    fn test_tampered_inner_product_scalar() {
        let (params, mut proof) = proof_42();
        proof.inner_product_proof.a_tag = BigInt::mod_add(
            &proof.inner_product_proof.a_tag,
            &BigInt::one(),
            group_order(),
        );
        assert!(!proof.verify(&params).unwrap());
    }

    #[test]
    fn test_verify_deterministic() {
        let (params, proof) = proof_42();
        assert!(proof.verify(&params).unwrap());
        assert!(proof.verify(&params).unwrap());
    }

    #[test]
    fn test_prove_randomized() {
        let params = BulletproofParams::setup(32).unwrap();
        let secret = BigInt::from(42);
        let proof1 = RangeProof::prove(&params, &secret, &mut OsRng).unwrap();
        let proof2 = RangeProof::prove(&params, &secret, &mut OsRng).unwrap();
        assert_ne!(proof1.A, proof2.A);
        assert_ne!(proof1.S, proof2.S);
        assert_ne!(proof1.V, proof2.V);
        assert!(proof1.verify(&params).unwrap());
        assert!(proof2.verify(&params).unwrap());
    }
}

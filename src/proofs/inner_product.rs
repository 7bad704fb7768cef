/*

Copyright 2020 by Kzen Networks

Copyright information here.

@license GPL-3.0+ <link>
*/

// based on the paper: https://eprint.iacr.org/2017/1066.pdf

#![allow(non_snake_case)]

use curv::arithmetic::traits::Modulo;
use curv::BigInt;

use crate::proofs::transcript::{hash_bp, hash_ip};
use crate::proofs::vector::{multiexp, ScalarVector};
use crate::proofs::{group_order, FE, GE};
use crate::BulletproofError;

/// Public statement of the argument: knowledge of a, b such that
/// P = Prod g[i]^{a_i} . Prod h[i]^{b_i} and <a, b> = c.
#[derive(Clone, PartialEq, Debug)]
pub struct InnerProductStatement {
    pub g_vec: Vec<GE>,
    pub h_vec: Vec<GE>,
    pub u: GE,
    pub P: GE,
    pub c: BigInt,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct InnerProductProof {
    pub L: Vec<GE>,
    pub R: Vec<GE>,
    pub a_tag: BigInt,
    pub b_tag: BigInt,
}

impl InnerProductProof {
    pub fn prove(
        stmt: &InnerProductStatement,
        a: &ScalarVector,
        b: &ScalarVector,
    ) -> Result<InnerProductProof, BulletproofError> {
        let n = stmt.g_vec.len();
        if a.len() != b.len() || a.len() != n || stmt.h_vec.len() != n {
            return Err(BulletproofError::LengthMismatch);
        }
        if n == 0 || !n.is_power_of_two() {
            return Err(BulletproofError::NotPowerOfTwo);
        }
        let q = group_order();

        // fold the claimed inner product into the commitment:
        // x0 = Hash(P, g, h, c), u_x = u^{x0}, P <- P . u_x^c
        let x0 = hash_ip(&stmt.g_vec, &stmt.h_vec, &stmt.P, &stmt.c)?;
        let ux = &stmt.u * &FE::from_bigint(&x0);
        let mut P = &stmt.P + &ux * &FE::from_bigint(&stmt.c);

        let mut a = a.clone();
        let mut b = b.clone();
        let mut g_vec = stmt.g_vec.clone();
        let mut h_vec = stmt.h_vec.clone();

        let lg_n = n.trailing_zeros() as usize;
        let mut L_vec: Vec<GE> = Vec::with_capacity(lg_n);
        let mut R_vec: Vec<GE> = Vec::with_capacity(lg_n);

        let mut n = n;
        while n > 1 {
            n /= 2;
            let (a_L, a_R) = a.split_at(n);
            let (b_L, b_R) = b.split_at(n);
            let (g_L, g_R) = (&g_vec[..n], &g_vec[n..]);
            let (h_L, h_R) = (&h_vec[..n], &h_vec[n..]);

            let c_L = a_L.inner_product(&b_R)?;
            let c_R = a_R.inner_product(&b_L)?;

            // L = g[n':]^{a[:n']} . h[:n']^{b[n':]} . u_x^{cL}
            let mut scalars_L = Vec::with_capacity(2 * n + 1);
            scalars_L.push(c_L);
            scalars_L.extend_from_slice(a_L.as_slice());
            scalars_L.extend_from_slice(b_R.as_slice());
            let mut points_L = Vec::with_capacity(2 * n + 1);
            points_L.push(ux.clone());
            points_L.extend_from_slice(g_R);
            points_L.extend_from_slice(h_L);
            let L = multiexp(&points_L, &scalars_L)?;

            // R = g[:n']^{a[n':]} . h[n':]^{b[:n']} . u_x^{cR}
            let mut scalars_R = Vec::with_capacity(2 * n + 1);
            scalars_R.push(c_R);
            scalars_R.extend_from_slice(a_R.as_slice());
            scalars_R.extend_from_slice(b_L.as_slice());
            let mut points_R = Vec::with_capacity(2 * n + 1);
            points_R.push(ux.clone());
            points_R.extend_from_slice(g_L);
            points_R.extend_from_slice(h_R);
            let R = multiexp(&points_R, &scalars_R)?;

            let (x, _) = hash_bp(&L, &R);
            let x_inv = BigInt::mod_inv(&x, q).ok_or(BulletproofError::HashDecodeError)?;
            let x_sq = BigInt::mod_mul(&x, &x, q);
            let x_inv_sq = BigInt::mod_mul(&x_inv, &x_inv, q);

            let g_new = fold_generators(g_L, g_R, &x_inv, &x);
            let h_new = fold_generators(h_L, h_R, &x, &x_inv);
            let P_new = &L * &FE::from_bigint(&x_sq) + &P + &R * &FE::from_bigint(&x_inv_sq);

            let a_new = a_L.scalar_mul(&x).add(&a_R.scalar_mul(&x_inv))?;
            let b_new = b_L.scalar_mul(&x_inv).add(&b_R.scalar_mul(&x))?;

            g_vec = g_new;
            h_vec = h_new;
            P = P_new;
            a = a_new;
            b = b_new;

            L_vec.push(L);
            R_vec.push(R);
        }

        Ok(InnerProductProof {
            L: L_vec,
            R: R_vec,
            a_tag: a[0].clone(),
            b_tag: b[0].clone(),
        })
    }

    /// Standalone verification against the public statement. The challenge
    /// x0 and every folding step are re-derived from the statement and the
    /// recorded L, R values; a proof that fails the final identity, or
    /// whose round count disagrees with n, is `false` rather than an error.
    pub fn verify(&self, stmt: &InnerProductStatement) -> Result<bool, BulletproofError> {
        let n = stmt.g_vec.len();
        if stmt.h_vec.len() != n {
            return Err(BulletproofError::LengthMismatch);
        }
        if n == 0 || !n.is_power_of_two() {
            return Err(BulletproofError::NotPowerOfTwo);
        }
        if self.L.len() != self.R.len()
            || self.L.len() >= usize::BITS as usize
            || (1usize << self.L.len()) != n
        {
            return Ok(false);
        }
        let q = group_order();

        let x0 = hash_ip(&stmt.g_vec, &stmt.h_vec, &stmt.P, &stmt.c)?;
        let ux = &stmt.u * &FE::from_bigint(&x0);
        let mut P = &stmt.P + &ux * &FE::from_bigint(&stmt.c);

        let mut g_vec = stmt.g_vec.clone();
        let mut h_vec = stmt.h_vec.clone();
        let mut n = n;
        for (L, R) in self.L.iter().zip(&self.R) {
            n /= 2;
            let (x, _) = hash_bp(L, R);
            let x_inv = BigInt::mod_inv(&x, q).ok_or(BulletproofError::HashDecodeError)?;
            let x_sq = BigInt::mod_mul(&x, &x, q);
            let x_inv_sq = BigInt::mod_mul(&x_inv, &x_inv, q);

            let g_new = fold_generators(&g_vec[..n], &g_vec[n..], &x_inv, &x);
            let h_new = fold_generators(&h_vec[..n], &h_vec[n..], &x, &x_inv);
            let P_new = L * &FE::from_bigint(&x_sq) + &P + R * &FE::from_bigint(&x_inv_sq);

            g_vec = g_new;
            h_vec = h_new;
            P = P_new;
        }

        // P == g[0]^a . h[0]^b . u_x^{a.b}
        let ab = BigInt::mod_mul(&self.a_tag, &self.b_tag, q);
        let expected = &g_vec[0] * &FE::from_bigint(&self.a_tag)
            + &h_vec[0] * &FE::from_bigint(&self.b_tag)
            + &ux * &FE::from_bigint(&ab);

        Ok(P == expected)
    }
}

/// g'[i] = left[i]^{x_l} . right[i]^{x_r}
fn fold_generators(left: &[GE], right: &[GE], x_l: &BigInt, x_r: &BigInt) -> Vec<GE> {
    let fl = FE::from_bigint(x_l);
    let fr = FE::from_bigint(x_r);
    left.iter()
        .zip(right)
        .map(|(l, r)| l * &fl + r * &fr)
        .collect()
}

/// Prod g[i]^{a_i} . Prod h[i]^{b_i}
pub(crate) fn commit_inner_product(
    g_vec: &[GE],
    h_vec: &[GE],
    a: &ScalarVector,
    b: &ScalarVector,
) -> Result<GE, BulletproofError> {
    let ga = multiexp(g_vec, a.as_slice())?;
    let hb = multiexp(h_vec, b.as_slice())?;
    Ok(ga + hb)
}

use curv::arithmetic::traits::Modulo;
use curv::arithmetic::{BasicOps, One, Zero};
use curv::BigInt;
use itertools::iterate;
use std::ops::{Index, Shr};
use zeroize::Zeroize;

use crate::proofs::{group_order, FE, GE};
use crate::BulletproofError;

/// A vector of scalars in Z_q. Every operation reduces its result modulo
/// the group order.
#[derive(Clone, PartialEq, Debug)]
pub struct ScalarVector(Vec<BigInt>);

impl ScalarVector {
    pub fn from_vec(v: Vec<BigInt>) -> ScalarVector {
        ScalarVector(v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[BigInt] {
        &self.0
    }

    /// n copies of a.
    pub fn constant(a: &BigInt, n: usize) -> ScalarVector {
        ScalarVector(vec![a.clone(); n])
    }

    /// (1, x, x^2, ..., x^{n-1})
    pub fn powers(x: &BigInt, n: usize) -> ScalarVector {
        let q = group_order();
        ScalarVector(
            iterate(BigInt::one(), |prev| BigInt::mod_mul(prev, x, q))
                .take(n)
                .collect(),
        )
    }

    /// Little-endian bit decomposition of v into n bits. Fails with
    /// `OutOfRange` unless 0 <= v < 2^n.
    pub fn decompose_bits(v: &BigInt, n: usize) -> Result<ScalarVector, BulletproofError> {
        let two = BigInt::from(2);
        let bound = two.pow(n as u32);
        if *v < BigInt::zero() || *v >= bound {
            return Err(BulletproofError::OutOfRange);
        }
        let bits = (0..n)
            .map(|i| v.clone().shr(i).modulus(&two))
            .collect::<Vec<BigInt>>();
        Ok(ScalarVector(bits))
    }

    pub fn add(&self, other: &ScalarVector) -> Result<ScalarVector, BulletproofError> {
        self.check_len(other)?;
        let q = group_order();
        Ok(ScalarVector(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| BigInt::mod_add(a, b, q))
                .collect(),
        ))
    }

    pub fn sub(&self, other: &ScalarVector) -> Result<ScalarVector, BulletproofError> {
        self.check_len(other)?;
        let q = group_order();
        Ok(ScalarVector(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| BigInt::mod_sub(a, b, q))
                .collect(),
        ))
    }

    /// Componentwise product.
    pub fn hadamard(&self, other: &ScalarVector) -> Result<ScalarVector, BulletproofError> {
        self.check_len(other)?;
        let q = group_order();
        Ok(ScalarVector(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| BigInt::mod_mul(a, b, q))
                .collect(),
        ))
    }

    pub fn scalar_mul(&self, k: &BigInt) -> ScalarVector {
        let q = group_order();
        ScalarVector(self.0.iter().map(|a| BigInt::mod_mul(a, k, q)).collect())
    }

    pub fn inner_product(&self, other: &ScalarVector) -> Result<BigInt, BulletproofError> {
        self.check_len(other)?;
        let q = group_order();
        let out = self.0.iter().zip(&other.0).fold(BigInt::zero(), |acc, (a, b)| {
            let ab = BigInt::mod_mul(a, b, q);
            BigInt::mod_add(&acc, &ab, q)
        });
        Ok(out)
    }

    pub fn split_at(&self, mid: usize) -> (ScalarVector, ScalarVector) {
        let (lo, hi) = self.0.split_at(mid);
        (ScalarVector(lo.to_vec()), ScalarVector(hi.to_vec()))
    }

    fn check_len(&self, other: &ScalarVector) -> Result<(), BulletproofError> {
        if self.0.len() != other.0.len() {
            return Err(BulletproofError::LengthMismatch);
        }
        Ok(())
    }
}

impl Index<usize> for ScalarVector {
    type Output = BigInt;

    fn index(&self, i: usize) -> &BigInt {
        &self.0[i]
    }
}

impl Zeroize for ScalarVector {
    fn zeroize(&mut self) {
        for s in self.0.iter_mut() {
            s.zeroize();
        }
    }
}

/// Prod_i points[i]^scalars[i]
pub fn multiexp(points: &[GE], scalars: &[BigInt]) -> Result<GE, BulletproofError> {
    if points.len() != scalars.len() {
        return Err(BulletproofError::LengthMismatch);
    }
    let mut acc = GE::zero();
    for (point, exp) in points.iter().zip(scalars) {
        acc = acc + point * &FE::from_bigint(exp);
    }
    Ok(acc)
}

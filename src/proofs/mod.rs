use curv::arithmetic::traits::Converter;
use curv::elliptic::curves::{Point, Scalar, Secp256k1};
use curv::BigInt;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::BulletproofError;
use crate::proofs::vector::ScalarVector;

pub mod encoding;
pub mod inner_product;
pub mod params;
pub mod range_proof;
pub mod transcript;
pub mod vector;

pub type GE = Point<Secp256k1>;
pub type FE = Scalar<Secp256k1>;

/// Order of the secp256k1 group; every scalar is reduced modulo this.
pub fn group_order() -> &'static BigInt {
    FE::group_order()
}

/// Uniform scalar in [0, q) by rejection sampling. Fails with `RngFailure`
/// when the entropy source errors.
pub fn sample_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Result<BigInt, BulletproofError> {
    let mut buf = [0u8; 32];
    for _ in 0..64 {
        rng.try_fill_bytes(&mut buf)
            .map_err(|_| BulletproofError::RngFailure)?;
        let candidate = BigInt::from_bytes(&buf);
        if &candidate < group_order() {
            buf.zeroize();
            return Ok(candidate);
        }
    }
    buf.zeroize();
    Err(BulletproofError::RngFailure)
}

pub fn sample_scalar_vector<R: RngCore + CryptoRng>(
    rng: &mut R,
    n: usize,
) -> Result<ScalarVector, BulletproofError> {
    let scalars = (0..n)
        .map(|_| sample_scalar(rng))
        .collect::<Result<Vec<BigInt>, BulletproofError>>()?;
    Ok(ScalarVector::from_vec(scalars))
}

#[macro_use]
extern crate serde_derive;
extern crate serde;

use thiserror::Error;

pub mod proofs;

#[derive(Copy, PartialEq, Eq, Clone, Debug, Error)]
pub enum BulletproofError {
    #[error("secret value lies outside [0, 2^n)")]
    OutOfRange,
    #[error("vector lengths do not match")]
    LengthMismatch,
    #[error("vector length is not a power of two")]
    NotPowerOfTwo,
    #[error("randomness source failed to produce a scalar")]
    RngFailure,
    #[error("malformed proof or parameter encoding")]
    InvalidEncoding,
    #[error("hash digest does not map to a usable scalar")]
    HashDecodeError,
    #[error("could not derive a group element from the seed")]
    SetupError,
}

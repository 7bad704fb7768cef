//! Canonical byte layout for range proofs:
//! `V | A | S | T1 | T2 | tau_x | miu | tx | L[0..k) | R[0..k) | a | b`
//! with group elements in compressed SEC1 form (33 bytes) and scalars as
//! 32-byte big-endian integers below the group order. The round count k is
//! inferred from the total length.

#![allow(non_snake_case)]

use curv::arithmetic::traits::Converter;
use curv::BigInt;

use crate::proofs::inner_product::InnerProductProof;
use crate::proofs::range_proof::RangeProof;
use crate::proofs::{group_order, GE};
use crate::BulletproofError;

const POINT_LEN: usize = 33;
const SCALAR_LEN: usize = 32;

impl RangeProof {
    pub fn to_bytes(&self) -> Vec<u8> {
        let k = self.inner_product_proof.L.len();
        let mut buf = Vec::with_capacity((5 + 2 * k) * POINT_LEN + 5 * SCALAR_LEN);
        push_point(&mut buf, &self.V);
        push_point(&mut buf, &self.A);
        push_point(&mut buf, &self.S);
        push_point(&mut buf, &self.T1);
        push_point(&mut buf, &self.T2);
        push_scalar(&mut buf, &self.tau_x);
        push_scalar(&mut buf, &self.miu);
        push_scalar(&mut buf, &self.tx);
        for point in &self.inner_product_proof.L {
            push_point(&mut buf, point);
        }
        for point in &self.inner_product_proof.R {
            push_point(&mut buf, point);
        }
        push_scalar(&mut buf, &self.inner_product_proof.a_tag);
        push_scalar(&mut buf, &self.inner_product_proof.b_tag);
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<RangeProof, BulletproofError> {
        let fixed = 5 * POINT_LEN + 5 * SCALAR_LEN;
        if bytes.len() < fixed || (bytes.len() - fixed) % (2 * POINT_LEN) != 0 {
            return Err(BulletproofError::InvalidEncoding);
        }
        let k = (bytes.len() - fixed) / (2 * POINT_LEN);

        let mut reader = Reader { bytes, cursor: 0 };
        let V = read_point(reader.take(POINT_LEN)?)?;
        let A = read_point(reader.take(POINT_LEN)?)?;
        let S = read_point(reader.take(POINT_LEN)?)?;
        let T1 = read_point(reader.take(POINT_LEN)?)?;
        let T2 = read_point(reader.take(POINT_LEN)?)?;
        let tau_x = read_scalar(reader.take(SCALAR_LEN)?)?;
        let miu = read_scalar(reader.take(SCALAR_LEN)?)?;
        let tx = read_scalar(reader.take(SCALAR_LEN)?)?;
        let L = (0..k)
            .map(|_| read_point(reader.take(POINT_LEN)?))
            .collect::<Result<Vec<GE>, BulletproofError>>()?;
        let R = (0..k)
            .map(|_| read_point(reader.take(POINT_LEN)?))
            .collect::<Result<Vec<GE>, BulletproofError>>()?;
        let a_tag = read_scalar(reader.take(SCALAR_LEN)?)?;
        let b_tag = read_scalar(reader.take(SCALAR_LEN)?)?;

        Ok(RangeProof {
            V,
            A,
            S,
            T1,
            T2,
            tau_x,
            miu,
            tx,
            inner_product_proof: InnerProductProof { L, R, a_tag, b_tag },
        })
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], BulletproofError> {
        if self.cursor + len > self.bytes.len() {
            return Err(BulletproofError::InvalidEncoding);
        }
        let chunk = &self.bytes[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(chunk)
    }
}

fn push_point(buf: &mut Vec<u8>, point: &GE) {
    buf.extend_from_slice(&point.to_bytes(true));
}

fn push_scalar(buf: &mut Vec<u8>, scalar: &BigInt) {
    let bytes = scalar.to_bytes();
    let mut padded = [0u8; SCALAR_LEN];
    padded[SCALAR_LEN - bytes.len()..].copy_from_slice(&bytes);
    buf.extend_from_slice(&padded);
}

fn read_point(chunk: &[u8]) -> Result<GE, BulletproofError> {
    GE::from_bytes(chunk).map_err(|_| BulletproofError::InvalidEncoding)
}

fn read_scalar(chunk: &[u8]) -> Result<BigInt, BulletproofError> {
    let scalar = BigInt::from_bytes(chunk);
    if &scalar >= group_order() {
        return Err(BulletproofError::InvalidEncoding);
    }
    Ok(scalar)
}

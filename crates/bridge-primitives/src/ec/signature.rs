//! ECDSA signature with DER serialization and RFC6979 deterministic nonces.
//!
//! Signatures are produced in canonical low-S form; the deposit chain's
//! relay policy rejects anything else.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{self, VerifyingKey};

use crate::ec::private_key::PrivateKey;
use crate::PrimitivesError;

/// The secp256k1 curve order N.
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the curve order (N/2), the low-S boundary.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// An ECDSA signature with R and S components.
///
/// Provides RFC6979 deterministic signing, low-S normalization, and DER
/// serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S arrays.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// The R component.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// The S component.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Sign a message hash with deterministic RFC6979 nonces.
    ///
    /// The hash is normalized to 32 bytes; the resulting S component is
    /// folded into the lower half of the curve order.
    pub fn sign(hash: &[u8], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let padded = normalize_hash(hash);

        let k256_sig: ecdsa::Signature = priv_key
            .signing_key()
            .sign_prehash(&padded)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        if is_greater_than(&s, &HALF_ORDER) {
            s = subtract_from_order(&s);
        }

        Ok(Signature { r, s })
    }

    /// Parse a DER-encoded signature: `0x30 <len> 0x02 <r> 0x02 <s>`.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() < 8 || bytes[0] != 0x30 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed DER signature".to_string(),
            ));
        }
        let sig_len = bytes[1] as usize;
        if sig_len + 2 != bytes.len() {
            return Err(PrimitivesError::InvalidSignature(
                "DER length mismatch".to_string(),
            ));
        }

        let mut idx = 2;
        let r = read_der_int(bytes, &mut idx)?;
        let s = read_der_int(bytes, &mut idx)?;
        if idx != bytes.len() {
            return Err(PrimitivesError::InvalidSignature(
                "trailing bytes in DER signature".to_string(),
            ));
        }

        if is_zero(&r) || is_zero(&s) {
            return Err(PrimitivesError::InvalidSignature(
                "signature component is zero".to_string(),
            ));
        }
        if !is_less_than(&r, &CURVE_ORDER) || !is_less_than(&s, &CURVE_ORDER) {
            return Err(PrimitivesError::InvalidSignature(
                "signature component exceeds curve order".to_string(),
            ));
        }

        Ok(Signature { r, s })
    }

    /// Serialize as canonical DER with low-S normalization.
    pub fn to_der(&self) -> Vec<u8> {
        let s = if is_greater_than(&self.s, &HALF_ORDER) {
            subtract_from_order(&self.s)
        } else {
            self.s
        };

        let rb = canonicalize_int(&self.r);
        let sb = canonicalize_int(&s);

        let mut out = Vec::with_capacity(6 + rb.len() + sb.len());
        out.push(0x30);
        out.push((4 + rb.len() + sb.len()) as u8);
        out.push(0x02);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(0x02);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }

    /// Verify against a message hash and verifying key.
    pub(crate) fn verify_with(&self, hash: &[u8], key: &VerifyingKey) -> bool {
        let k256_sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        ) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        let padded = normalize_hash(hash);
        key.verify_prehash(&padded, &k256_sig).is_ok()
    }
}

/// Read one DER INTEGER at `idx`, returning it left-padded to 32 bytes.
fn read_der_int(bytes: &[u8], idx: &mut usize) -> Result<[u8; 32], PrimitivesError> {
    if *idx + 2 > bytes.len() || bytes[*idx] != 0x02 {
        return Err(PrimitivesError::InvalidSignature(
            "missing DER integer marker".to_string(),
        ));
    }
    let len = bytes[*idx + 1] as usize;
    *idx += 2;
    if len == 0 || *idx + len > bytes.len() {
        return Err(PrimitivesError::InvalidSignature(
            "bogus DER integer length".to_string(),
        ));
    }
    let raw = &bytes[*idx..*idx + len];
    *idx += len;

    // Strip the sign padding byte, then left-pad to 32.
    let trimmed = if raw.len() > 1 && raw[0] == 0x00 {
        &raw[1..]
    } else {
        raw
    };
    if trimmed.len() > 32 {
        return Err(PrimitivesError::InvalidSignature(
            "DER integer wider than 32 bytes".to_string(),
        ));
    }
    let mut out = [0u8; 32];
    out[32 - trimmed.len()..].copy_from_slice(trimmed);
    Ok(out)
}

/// Normalize an arbitrary-length hash to exactly 32 bytes.
///
/// Shorter hashes are left-padded with zeros, longer ones truncated.
fn normalize_hash(hash: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    if hash.len() >= 32 {
        padded.copy_from_slice(&hash[..32]);
    } else {
        padded[32 - hash.len()..].copy_from_slice(hash);
    }
    padded
}

/// Minimal DER INTEGER encoding of a big-endian 32-byte value.
fn canonicalize_int(val: &[u8; 32]) -> Vec<u8> {
    let mut start = 0;
    while start < 31 && val[start] == 0 {
        start += 1;
    }
    let mut out = Vec::with_capacity(33);
    // A set high bit would read as negative; prepend a zero byte.
    if val[start] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(&val[start..]);
    out
}

fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a < b
}

fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a > b
}

/// Compute N - s over big-endian bytes.
fn subtract_from_order(s: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let diff = CURVE_ORDER[i] as i16 - s[i] as i16 - borrow;
        if diff < 0 {
            out[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            out[i] = diff as u8;
            borrow = 0;
        }
    }
    out
}

use std::fmt::Display;

use asn1::Integer;

use crate::curve::NamedCurve;
use crate::error::KeyParseError;

/// Algorithm family of a piece of key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    Ec,
}

impl Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyAlgorithm::Rsa => write!(f, "RSA"),
            KeyAlgorithm::Ec => write!(f, "ECDSA"),
        }
    }
}

/// Public fields of an RSA key.
///
/// Private keys are validated structurally but only the public half is
/// surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyParts {
    modulus: Integer,
    public_exponent: Integer,
}

impl RsaKeyParts {
    pub(crate) fn new(modulus: Integer, public_exponent: Integer) -> Self {
        RsaKeyParts {
            modulus,
            public_exponent,
        }
    }

    pub fn modulus(&self) -> &Integer {
        &self.modulus
    }

    pub fn public_exponent(&self) -> &Integer {
        &self.public_exponent
    }

    pub fn modulus_bits(&self) -> u64 {
        self.modulus.bits()
    }
}

/// An affine point on a named curve, recovered from the uncompressed
/// SEC1 encoding `04 || x || y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPoint {
    x: Vec<u8>,
    y: Vec<u8>,
}

const UNCOMPRESSED_POINT_PREFIX: u8 = 0x04;

impl EcPoint {
    pub fn from_uncompressed(curve: NamedCurve, bytes: &[u8]) -> Result<Self, KeyParseError> {
        let expected = 1 + 2 * curve.field_len();
        if bytes.len() != expected {
            return Err(KeyParseError::InvalidPoint(format!(
                "expected {} bytes for {}, got {}",
                expected,
                curve,
                bytes.len()
            )));
        }
        if bytes[0] != UNCOMPRESSED_POINT_PREFIX {
            return Err(KeyParseError::InvalidPoint(format!(
                "expected uncompressed form 0x04, got 0x{:02x}",
                bytes[0]
            )));
        }
        let (x, y) = bytes[1..].split_at(curve.field_len());
        Ok(EcPoint {
            x: x.to_vec(),
            y: y.to_vec(),
        })
    }

    pub fn x(&self) -> &[u8] {
        &self.x
    }

    pub fn y(&self) -> &[u8] {
        &self.y
    }
}

/// Public fields of an EC key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcKeyParts {
    curve: NamedCurve,
    point: EcPoint,
}

impl EcKeyParts {
    pub(crate) fn new(curve: NamedCurve, point: EcPoint) -> Self {
        EcKeyParts { curve, point }
    }

    pub fn curve(&self) -> NamedCurve {
        self.curve
    }

    pub fn point(&self) -> &EcPoint {
        &self.point
    }
}

/// Key material extracted from an envelope, tagged by algorithm family
/// and by whether the source was a private or a public key structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    RsaPrivate(RsaKeyParts),
    RsaPublic(RsaKeyParts),
    EcPrivate(EcKeyParts),
    EcPublic(EcKeyParts),
}

impl KeyMaterial {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            KeyMaterial::RsaPrivate(_) | KeyMaterial::RsaPublic(_) => KeyAlgorithm::Rsa,
            KeyMaterial::EcPrivate(_) | KeyMaterial::EcPublic(_) => KeyAlgorithm::Ec,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, KeyMaterial::RsaPrivate(_) | KeyMaterial::EcPrivate(_))
    }

    /// Key size in bits: modulus length for RSA, curve order for EC.
    pub fn key_bits(&self) -> u64 {
        match self {
            KeyMaterial::RsaPrivate(parts) | KeyMaterial::RsaPublic(parts) => parts.modulus_bits(),
            KeyMaterial::EcPrivate(parts) | KeyMaterial::EcPublic(parts) => {
                parts.curve().key_bits()
            }
        }
    }

    pub fn as_rsa(&self) -> Option<&RsaKeyParts> {
        match self {
            KeyMaterial::RsaPrivate(parts) | KeyMaterial::RsaPublic(parts) => Some(parts),
            _ => None,
        }
    }

    pub fn as_ec(&self) -> Option<&EcKeyParts> {
        match self {
            KeyMaterial::EcPrivate(parts) | KeyMaterial::EcPublic(parts) => Some(parts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::curve::NamedCurve;
    use crate::error::KeyParseError;
    use crate::key::EcPoint;

    fn uncompressed_p256_point() -> Vec<u8> {
        let mut bytes = vec![0x04];
        bytes.extend(std::iter::repeat_n(0xaa, 32));
        bytes.extend(std::iter::repeat_n(0xbb, 32));
        bytes
    }

    #[test]
    fn test_point_from_uncompressed() {
        let point =
            EcPoint::from_uncompressed(NamedCurve::Secp256r1, &uncompressed_p256_point()).unwrap();
        assert_eq!(vec![0xaa; 32], point.x());
        assert_eq!(vec![0xbb; 32], point.y());
    }

    #[rstest(mutate,
        case::compressed_prefix(&|bytes: &mut Vec<u8>| bytes[0] = 0x02),
        case::truncated(&|bytes: &mut Vec<u8>| { bytes.pop(); }),
        case::oversized(&|bytes: &mut Vec<u8>| bytes.push(0x00)),
    )]
    fn test_point_from_uncompressed_invalid(mutate: &dyn Fn(&mut Vec<u8>)) {
        let mut bytes = uncompressed_p256_point();
        mutate(&mut bytes);
        match EcPoint::from_uncompressed(NamedCurve::Secp256r1, &bytes) {
            Err(KeyParseError::InvalidPoint(_)) => {}
            other => panic!("expected InvalidPoint, got {:?}", other),
        }
    }
}

use std::fmt::Display;

use asn1::ObjectIdentifier;

use crate::error::KeyParseError;

pub const OID_SECP256R1: &str = "1.2.840.10045.3.1.7";
pub const OID_SECP384R1: &str = "1.3.132.0.34";
pub const OID_SECP521R1: &str = "1.3.132.0.35";
pub const OID_SECP256K1: &str = "1.3.132.0.10";

/// Named elliptic curves the classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NamedCurve {
    /// NIST P-256 (prime256v1)
    Secp256r1,
    /// NIST P-384
    Secp384r1,
    /// NIST P-521
    Secp521r1,
    /// The Bitcoin/Ethereum curve
    Secp256k1,
}

impl NamedCurve {
    pub fn oid_str(&self) -> &'static str {
        match self {
            NamedCurve::Secp256r1 => OID_SECP256R1,
            NamedCurve::Secp384r1 => OID_SECP384R1,
            NamedCurve::Secp521r1 => OID_SECP521R1,
            NamedCurve::Secp256k1 => OID_SECP256K1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NamedCurve::Secp256r1 => "secp256r1",
            NamedCurve::Secp384r1 => "secp384r1",
            NamedCurve::Secp521r1 => "secp521r1",
            NamedCurve::Secp256k1 => "secp256k1",
        }
    }

    /// Order size in bits.
    pub fn key_bits(&self) -> u64 {
        match self {
            NamedCurve::Secp256r1 | NamedCurve::Secp256k1 => 256,
            NamedCurve::Secp384r1 => 384,
            NamedCurve::Secp521r1 => 521,
        }
    }

    /// Byte length of one affine coordinate.
    pub fn field_len(&self) -> usize {
        match self {
            NamedCurve::Secp256r1 | NamedCurve::Secp256k1 => 32,
            NamedCurve::Secp384r1 => 48,
            NamedCurve::Secp521r1 => 66,
        }
    }
}

impl Display for NamedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&ObjectIdentifier> for NamedCurve {
    type Error = KeyParseError;

    fn try_from(oid: &ObjectIdentifier) -> Result<Self, Self::Error> {
        if *oid == OID_SECP256R1 {
            Ok(NamedCurve::Secp256r1)
        } else if *oid == OID_SECP384R1 {
            Ok(NamedCurve::Secp384r1)
        } else if *oid == OID_SECP521R1 {
            Ok(NamedCurve::Secp521r1)
        } else if *oid == OID_SECP256K1 {
            Ok(NamedCurve::Secp256k1)
        } else {
            Err(KeyParseError::UnknownCurve(oid.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use asn1::ObjectIdentifier;
    use rstest::rstest;

    use crate::curve::NamedCurve;
    use crate::error::KeyParseError;

    #[rstest(oid_str, expected,
        case("1.2.840.10045.3.1.7", NamedCurve::Secp256r1),
        case("1.3.132.0.34", NamedCurve::Secp384r1),
        case("1.3.132.0.35", NamedCurve::Secp521r1),
        case("1.3.132.0.10", NamedCurve::Secp256k1),
    )]
    fn test_try_from_oid(oid_str: &str, expected: NamedCurve) {
        let oid = ObjectIdentifier::from_str(oid_str).unwrap();
        assert_eq!(expected, NamedCurve::try_from(&oid).unwrap());
        assert_eq!(oid_str, expected.oid_str());
    }

    #[test]
    fn test_try_from_unknown_oid() {
        let oid = ObjectIdentifier::from_str("1.3.132.0.1").unwrap();
        match NamedCurve::try_from(&oid) {
            Err(KeyParseError::UnknownCurve(s)) => assert_eq!("1.3.132.0.1", s),
            other => panic!("expected UnknownCurve, got {:?}", other),
        }
    }

    #[rstest(curve, bits, field_len,
        case(NamedCurve::Secp256r1, 256, 32),
        case(NamedCurve::Secp384r1, 384, 48),
        case(NamedCurve::Secp521r1, 521, 66),
    )]
    fn test_sizes(curve: NamedCurve, bits: u64, field_len: usize) {
        assert_eq!(bits, curve.key_bits());
        assert_eq!(field_len, curve.field_len());
    }
}

/*
RFC 5958 - Asymmetric Key Packages

OneAsymmetricKey ::= SEQUENCE {
    version                   Version,
    privateKeyAlgorithm       PrivateKeyAlgorithmIdentifier,
    privateKey                PrivateKey,
    attributes            [0] Attributes OPTIONAL,
    ...,
    [[2: publicKey        [1] PublicKey OPTIONAL ]],
    ...
}

Version ::= INTEGER { v1(0), v2(1) } (v1, ..., v2)
PrivateKey ::= OCTET STRING
*/

use asn1::{Document, Element};
use codec::Decoder;

use crate::algorithm::{AlgorithmIdentifier, OID_EC_PUBLIC_KEY, OID_RSA_ENCRYPTION};
use crate::curve::NamedCurve;
use crate::error::KeyParseError;
use crate::key::KeyMaterial;
use crate::limits::Limits;
use crate::{pkcs1, sec1};

const VERSION_V1: i64 = 0;
const VERSION_V2: i64 = 1;

/// Parse a PKCS#8 OneAsymmetricKey and dispatch on the inner algorithm
/// OID. This is the one place where the envelope label alone does not
/// determine the key grammar.
pub(crate) fn parse(element: &Element, limits: &Limits) -> Result<KeyMaterial, KeyParseError> {
    let Element::Sequence(elements) = element else {
        return Err(KeyParseError::InvalidStructure(
            "OneAsymmetricKey must be a SEQUENCE".to_string(),
        ));
    };
    if elements.len() < 3 {
        return Err(KeyParseError::InvalidStructure(format!(
            "expected at least 3 elements in OneAsymmetricKey, got {}",
            elements.len()
        )));
    }

    match &elements[0] {
        Element::Integer(version) => {
            let version = version.to_i64().ok_or_else(|| {
                KeyParseError::InvalidStructure("version out of range".to_string())
            })?;
            if version != VERSION_V1 && version != VERSION_V2 {
                return Err(KeyParseError::InvalidVersion(version));
            }
        }
        _ => {
            return Err(KeyParseError::InvalidStructure(
                "expected INTEGER for version".to_string(),
            ));
        }
    }

    let algorithm: AlgorithmIdentifier = elements[1].decode()?;

    // Reject unsupported algorithms before touching the key octets.
    let is_rsa = *algorithm.algorithm() == OID_RSA_ENCRYPTION;
    let is_ec = *algorithm.algorithm() == OID_EC_PUBLIC_KEY;
    if !is_rsa && !is_ec {
        return Err(KeyParseError::UnsupportedAlgorithm(
            algorithm.algorithm().to_string(),
        ));
    }

    let Element::OctetString(private_key) = &elements[2] else {
        return Err(KeyParseError::InvalidStructure(
            "expected OCTET STRING for privateKey".to_string(),
        ));
    };
    let inner = Document::from_der(private_key.as_bytes())?;
    let inner = inner
        .elements()
        .first()
        .ok_or(asn1::Error::EmptyInput)?;

    if is_rsa {
        pkcs1::parse_private(inner, limits).map(KeyMaterial::RsaPrivate)
    } else {
        let curve_hint = algorithm
            .curve_oid()
            .map(NamedCurve::try_from)
            .transpose()?;
        sec1::parse_private(inner, curve_hint).map(KeyMaterial::EcPrivate)
    }
}

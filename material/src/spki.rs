/*
RFC 5280 Section 4.1.2.7

SubjectPublicKeyInfo ::= SEQUENCE {
    algorithm            AlgorithmIdentifier,
    subjectPublicKey     BIT STRING
}

For RSA the BIT STRING wraps a DER RSAPublicKey; for EC it carries the
uncompressed point directly.
*/

use asn1::{Document, Element};
use codec::Decoder;

use crate::algorithm::{AlgorithmIdentifier, OID_EC_PUBLIC_KEY, OID_RSA_ENCRYPTION};
use crate::curve::NamedCurve;
use crate::error::KeyParseError;
use crate::key::{EcKeyParts, EcPoint, KeyMaterial};
use crate::limits::Limits;
use crate::pkcs1;

/// A decoded SubjectPublicKeyInfo: the algorithm identifier alongside the
/// extracted public key material.
#[derive(Debug, Clone)]
pub(crate) struct DecodedSpki {
    pub(crate) algorithm: AlgorithmIdentifier,
    pub(crate) key: KeyMaterial,
}

pub(crate) fn parse(element: &Element, limits: &Limits) -> Result<DecodedSpki, KeyParseError> {
    let Element::Sequence(elements) = element else {
        return Err(KeyParseError::InvalidStructure(
            "SubjectPublicKeyInfo must be a SEQUENCE".to_string(),
        ));
    };
    if elements.len() != 2 {
        return Err(KeyParseError::InvalidStructure(format!(
            "expected 2 elements in SubjectPublicKeyInfo, got {}",
            elements.len()
        )));
    }

    let algorithm: AlgorithmIdentifier = elements[0].decode()?;
    let Element::BitString(subject_public_key) = &elements[1] else {
        return Err(KeyParseError::InvalidStructure(
            "expected BIT STRING for subjectPublicKey".to_string(),
        ));
    };

    let key = if *algorithm.algorithm() == OID_RSA_ENCRYPTION {
        let inner = Document::from_der(subject_public_key.as_bytes())?;
        let inner = inner
            .elements()
            .first()
            .ok_or(asn1::Error::EmptyInput)?;
        KeyMaterial::RsaPublic(pkcs1::parse_public(inner, limits)?)
    } else if *algorithm.algorithm() == OID_EC_PUBLIC_KEY {
        let curve_oid = algorithm.curve_oid().ok_or_else(|| {
            KeyParseError::InvalidStructure(
                "EC SubjectPublicKeyInfo without namedCurve parameters".to_string(),
            )
        })?;
        let curve = NamedCurve::try_from(curve_oid)?;
        let point = EcPoint::from_uncompressed(curve, subject_public_key.as_bytes())?;
        KeyMaterial::EcPublic(EcKeyParts::new(curve, point))
    } else {
        return Err(KeyParseError::UnsupportedAlgorithm(
            algorithm.algorithm().to_string(),
        ));
    };

    Ok(DecodedSpki { algorithm, key })
}

#[cfg(test)]
mod tests {
    use asn1::{Document, Element};

    use crate::error::KeyParseError;
    use crate::key::KeyMaterial;
    use crate::limits::Limits;
    use crate::spki::parse;

    const RSA_SPKI_PEM: &str = include_str!("../tests/fixtures/pub_rsa_spki.pem");
    const EC_SPKI_PEM: &str = include_str!("../tests/fixtures/pub_ec_spki.pem");

    fn first_element(pem: &str) -> Element {
        let envelope = armor::decode(pem).expect("fixture should decode");
        let document = Document::from_der(envelope.der()).expect("fixture should parse");
        document
            .into_elements()
            .into_iter()
            .next()
            .expect("fixture holds one element")
    }

    #[test]
    fn test_parse_rsa() {
        let spki = parse(&first_element(RSA_SPKI_PEM), &Limits::default()).unwrap();
        assert_eq!(Some("rsaEncryption"), spki.algorithm.name());
        match spki.key {
            KeyMaterial::RsaPublic(parts) => assert_eq!(2048, parts.modulus_bits()),
            other => panic!("expected RsaPublic, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ec() {
        let spki = parse(&first_element(EC_SPKI_PEM), &Limits::default()).unwrap();
        assert_eq!(Some("id-ecPublicKey"), spki.algorithm.name());
        match spki.key {
            KeyMaterial::EcPublic(parts) => {
                assert_eq!("secp256r1", parts.curve().name());
            }
            other => panic!("expected EcPublic, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_arity() {
        let element = Element::Sequence(vec![Element::Null]);
        assert!(matches!(
            parse(&element, &Limits::default()),
            Err(KeyParseError::InvalidStructure(_))
        ));
    }
}

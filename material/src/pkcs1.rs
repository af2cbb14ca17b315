/*
RFC 8017 - PKCS #1: RSA Cryptography Specifications

RSAPrivateKey ::= SEQUENCE {
    version           Version,
    modulus           INTEGER,  -- n
    publicExponent    INTEGER,  -- e
    privateExponent   INTEGER,  -- d
    prime1            INTEGER,  -- p
    prime2            INTEGER,  -- q
    exponent1         INTEGER,  -- d mod (p-1)
    exponent2         INTEGER,  -- d mod (q-1)
    coefficient       INTEGER,  -- (inverse of q) mod p
    otherPrimeInfos   OtherPrimeInfos OPTIONAL
}

Version ::= INTEGER { two-prime(0), multi(1) }

RSAPublicKey ::= SEQUENCE {
    modulus           INTEGER,  -- n
    publicExponent    INTEGER   -- e
}
*/

use asn1::{Element, Integer};

use crate::error::KeyParseError;
use crate::key::RsaKeyParts;
use crate::limits::Limits;

const VERSION_TWO_PRIME: i64 = 0;
const VERSION_MULTI: i64 = 1;

/// Parse a PKCS#1 RSAPrivateKey. All nine mandatory fields are checked;
/// only the public half is returned.
pub(crate) fn parse_private(
    element: &Element,
    limits: &Limits,
) -> Result<RsaKeyParts, KeyParseError> {
    let Element::Sequence(elements) = element else {
        return Err(KeyParseError::InvalidStructure(
            "RSAPrivateKey must be a SEQUENCE".to_string(),
        ));
    };
    if elements.len() < 9 {
        return Err(KeyParseError::InvalidStructure(format!(
            "expected at least 9 elements in RSAPrivateKey, got {}",
            elements.len()
        )));
    }

    let get_integer = |idx: usize, field_name: &str| -> Result<Integer, KeyParseError> {
        if let Element::Integer(int) = &elements[idx] {
            Ok(int.clone())
        } else {
            Err(KeyParseError::InvalidStructure(format!(
                "expected INTEGER for {}",
                field_name
            )))
        }
    };

    let version = get_integer(0, "version")?
        .to_i64()
        .ok_or_else(|| KeyParseError::InvalidStructure("version out of range".to_string()))?;
    if version != VERSION_TWO_PRIME && version != VERSION_MULTI {
        return Err(KeyParseError::InvalidVersion(version));
    }

    let modulus = get_integer(1, "modulus")?;
    let public_exponent = get_integer(2, "publicExponent")?;
    // the private fields are validated structurally but not surfaced
    get_integer(3, "privateExponent")?;
    get_integer(4, "prime1")?;
    get_integer(5, "prime2")?;
    get_integer(6, "exponent1")?;
    get_integer(7, "exponent2")?;
    get_integer(8, "coefficient")?;

    limits.check_rsa_modulus(modulus.bits())?;

    Ok(RsaKeyParts::new(modulus, public_exponent))
}

/// Parse a PKCS#1 RSAPublicKey (the BIT STRING content of an RSA
/// SubjectPublicKeyInfo).
pub(crate) fn parse_public(
    element: &Element,
    limits: &Limits,
) -> Result<RsaKeyParts, KeyParseError> {
    let Element::Sequence(elements) = element else {
        return Err(KeyParseError::InvalidStructure(
            "RSAPublicKey must be a SEQUENCE".to_string(),
        ));
    };
    if elements.len() != 2 {
        return Err(KeyParseError::InvalidStructure(format!(
            "expected 2 elements in RSAPublicKey, got {}",
            elements.len()
        )));
    }
    let (modulus, public_exponent) = match (&elements[0], &elements[1]) {
        (Element::Integer(n), Element::Integer(e)) => (n.clone(), e.clone()),
        _ => {
            return Err(KeyParseError::InvalidStructure(
                "modulus and publicExponent must be INTEGERs".to_string(),
            ));
        }
    };

    limits.check_rsa_modulus(modulus.bits())?;

    Ok(RsaKeyParts::new(modulus, public_exponent))
}

#[cfg(test)]
mod tests {
    use asn1::{Document, Element, Integer};
    use rstest::rstest;

    use crate::error::KeyParseError;
    use crate::limits::Limits;
    use crate::pkcs1::{parse_private, parse_public};

    const RSA_2048_PKCS1_PEM: &str = include_str!("../tests/fixtures/key_rsa_pkcs1.pem");

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
    fn test_parse_private() {
        let parts = parse_private(&first_element(RSA_2048_PKCS1_PEM), &Limits::default()).unwrap();
        assert_eq!(2048, parts.modulus_bits());
        assert_eq!(Some(65537), parts.public_exponent().to_u64());
    }

    #[test]
    fn test_parse_private_rejects_oversized_modulus() {
        let limits = Limits::with_rsa_modulus_bits(256, 1024);
        match parse_private(&first_element(RSA_2048_PKCS1_PEM), &limits) {
            Err(KeyParseError::ModulusOutOfRange { bits: 2048, .. }) => {}
            other => panic!("expected ModulusOutOfRange, got {:?}", other),
        }
    }

    #[rstest(element,
        case::not_a_sequence(Element::Null),
        case::too_few_fields(Element::Sequence(vec![Element::Integer(Integer::from(0))])),
    )]
    fn test_parse_private_invalid_structure(element: Element) {
        assert!(matches!(
            parse_private(&element, &Limits::default()),
            Err(KeyParseError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_parse_private_invalid_version() {
        let mut elements = vec![Element::Integer(Integer::from(2))];
        elements.extend((0..8).map(|_| Element::Integer(Integer::from(3))));
        // version 2 is not defined by RFC 8017
        match parse_private(&Element::Sequence(elements), &Limits::with_rsa_modulus_bits(0, 16384)) {
            Err(KeyParseError::InvalidVersion(2)) => {}
            other => panic!("expected InvalidVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_public_invalid_arity() {
        let element = Element::Sequence(vec![Element::Integer(Integer::from(3))]);
        assert!(matches!(
            parse_public(&element, &Limits::default()),
            Err(KeyParseError::InvalidStructure(_))
        ));
    }
}

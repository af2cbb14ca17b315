/*
RFC 5280 Section 4.1

Certificate ::= SEQUENCE {
    tbsCertificate       TBSCertificate,
    signatureAlgorithm   AlgorithmIdentifier,
    signatureValue       BIT STRING
}

TBSCertificate ::= SEQUENCE {
    version         [0]  EXPLICIT Version DEFAULT v1,
    serialNumber         CertificateSerialNumber,
    signature            AlgorithmIdentifier,
    issuer               Name,
    validity             Validity,
    subject              Name,
    subjectPublicKeyInfo SubjectPublicKeyInfo,
    ...
}
*/

use std::fmt::Display;

use asn1::Element;
use codec::Decoder;

use crate::algorithm::AlgorithmIdentifier;
use crate::error::CertificateParseError;
use crate::key::KeyMaterial;
use crate::limits::Limits;
use crate::spki;

const VERSION_V1: i64 = 0;
const VERSION_V3: i64 = 2;

// index of subjectPublicKeyInfo in a TBSCertificate without the
// optional [0] version
const SPKI_INDEX: usize = 5;

/// Read-only view over a parsed certificate: the two algorithm
/// identifiers and the embedded public key. No signature verification,
/// chain building, or validity checking happens here.
#[derive(Debug, Clone)]
pub struct CertificateInfo {
    signature_algorithm: AlgorithmIdentifier,
    public_key_algorithm: AlgorithmIdentifier,
    public_key: KeyMaterial,
}

impl CertificateInfo {
    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier {
        &self.signature_algorithm
    }

    pub fn public_key_algorithm(&self) -> &AlgorithmIdentifier {
        &self.public_key_algorithm
    }

    pub fn public_key(&self) -> &KeyMaterial {
        &self.public_key
    }
}

impl Display for CertificateInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "signature: {}, public key: {} ({} bits)",
            self.signature_algorithm,
            self.public_key_algorithm,
            self.public_key.key_bits()
        )
    }
}

pub(crate) fn parse(
    element: &Element,
    limits: &Limits,
) -> Result<CertificateInfo, CertificateParseError> {
    let Element::Sequence(elements) = element else {
        return Err(CertificateParseError::InvalidStructure(
            "Certificate must be a SEQUENCE".to_string(),
        ));
    };
    if elements.len() != 3 {
        return Err(CertificateParseError::InvalidStructure(format!(
            "expected 3 elements in Certificate, got {}",
            elements.len()
        )));
    }

    let signature_algorithm: AlgorithmIdentifier = elements[1].decode()?;
    if !matches!(&elements[2], Element::BitString(_)) {
        return Err(CertificateParseError::InvalidStructure(
            "expected BIT STRING for signatureValue".to_string(),
        ));
    }

    let Element::Sequence(tbs) = &elements[0] else {
        return Err(CertificateParseError::InvalidStructure(
            "TBSCertificate must be a SEQUENCE".to_string(),
        ));
    };

    // v1 certificates omit the [0] version; field indices shift by one
    // when it is present.
    let offset = match tbs.first() {
        Some(Element::ContextSpecific {
            slot: 0, elements, ..
        }) => {
            check_version(elements)?;
            1
        }
        Some(_) => 0,
        None => {
            return Err(CertificateParseError::InvalidStructure(
                "empty TBSCertificate".to_string(),
            ));
        }
    };

    if tbs.len() < offset + SPKI_INDEX + 1 {
        return Err(CertificateParseError::InvalidStructure(format!(
            "expected at least {} elements in TBSCertificate, got {}",
            offset + SPKI_INDEX + 1,
            tbs.len()
        )));
    }
    if !matches!(&tbs[offset], Element::Integer(_)) {
        return Err(CertificateParseError::InvalidStructure(
            "expected INTEGER for serialNumber".to_string(),
        ));
    }

    let spki = spki::parse(&tbs[offset + SPKI_INDEX], limits)?;

    Ok(CertificateInfo {
        signature_algorithm,
        public_key_algorithm: spki.algorithm,
        public_key: spki.key,
    })
}

fn check_version(elements: &[Element]) -> Result<(), CertificateParseError> {
    let version = match elements.first() {
        Some(Element::Integer(version)) => version.to_i64(),
        _ => None,
    };
    match version {
        Some(v) if (VERSION_V1..=VERSION_V3).contains(&v) => Ok(()),
        _ => Err(CertificateParseError::InvalidStructure(
            "unsupported certificate version".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use asn1::{Document, Element};

    use crate::certificate::parse;
    use crate::error::CertificateParseError;
    use crate::key::KeyMaterial;
    use crate::limits::Limits;

    const RSA_CERT_PEM: &str = include_str!("../tests/fixtures/cert_rsa.pem");
    const ECDSA_CERT_PEM: &str = include_str!("../tests/fixtures/cert_ecdsa.pem");

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
    fn test_parse_rsa_certificate() {
        let info = parse(&first_element(RSA_CERT_PEM), &Limits::default()).unwrap();
        assert_eq!(
            Some("sha256WithRSAEncryption"),
            info.signature_algorithm().name()
        );
        assert_eq!(Some("rsaEncryption"), info.public_key_algorithm().name());
        match info.public_key() {
            KeyMaterial::RsaPublic(parts) => assert_eq!(2048, parts.modulus_bits()),
            other => panic!("expected RsaPublic, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ecdsa_certificate() {
        let info = parse(&first_element(ECDSA_CERT_PEM), &Limits::default()).unwrap();
        assert_eq!(Some("ecdsa-with-SHA256"), info.signature_algorithm().name());
        assert_eq!(Some("id-ecPublicKey"), info.public_key_algorithm().name());
        match info.public_key() {
            KeyMaterial::EcPublic(parts) => assert_eq!("secp256r1", parts.curve().name()),
            other => panic!("expected EcPublic, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_outer_arity() {
        let element = Element::Sequence(vec![Element::Null]);
        assert!(matches!(
            parse(&element, &Limits::default()),
            Err(CertificateParseError::InvalidStructure(_))
        ));
    }
}

/*
RFC 2986 - PKCS #10

CertificationRequest ::= SEQUENCE {
    certificationRequestInfo  CertificationRequestInfo,
    signatureAlgorithm        AlgorithmIdentifier,
    signature                 BIT STRING
}
*/

use asn1::Element;

use crate::error::CertificateParseError;

/// Recognize a PKCS#10 CertificationRequest.
///
/// Only the outer structure is checked; field extraction is out of scope.
pub(crate) fn recognize(element: &Element) -> Result<(), CertificateParseError> {
    let Element::Sequence(elements) = element else {
        return Err(CertificateParseError::InvalidRequest(
            "CertificationRequest must be a SEQUENCE".to_string(),
        ));
    };
    if elements.len() != 3 {
        return Err(CertificateParseError::InvalidRequest(format!(
            "expected 3 elements in CertificationRequest, got {}",
            elements.len()
        )));
    }
    if !matches!(&elements[0], Element::Sequence(_)) {
        return Err(CertificateParseError::InvalidRequest(
            "certificationRequestInfo must be a SEQUENCE".to_string(),
        ));
    }
    if !matches!(&elements[1], Element::Sequence(_)) {
        return Err(CertificateParseError::InvalidRequest(
            "signatureAlgorithm must be a SEQUENCE".to_string(),
        ));
    }
    if !matches!(&elements[2], Element::BitString(_)) {
        return Err(CertificateParseError::InvalidRequest(
            "signature must be a BIT STRING".to_string(),
        ));
    }
    Ok(())
}

/*
RFC 5915 - Elliptic Curve Private Key Structure

ECPrivateKey ::= SEQUENCE {
    version        INTEGER { ecPrivkeyVer1(1) } (ecPrivkeyVer1),
    privateKey     OCTET STRING,
    parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
    publicKey  [1] BIT STRING OPTIONAL
}
*/

use asn1::Element;

use crate::curve::NamedCurve;
use crate::error::KeyParseError;
use crate::key::{EcKeyParts, EcPoint};

const EC_PRIVATE_KEY_VERSION: i64 = 1;

const PARAMETERS_SLOT: u8 = 0;
const PUBLIC_KEY_SLOT: u8 = 1;

/// Parse a SEC1 ECPrivateKey.
///
/// `curve_hint` carries the curve named by an enclosing PKCS#8
/// AlgorithmIdentifier; the inner `[0]` parameters slot wins when both are
/// present. The embedded `[1]` public point is mandatory here because only
/// public fields are surfaced and this library does no curve arithmetic to
/// recompute a missing point.
pub(crate) fn parse_private(
    element: &Element,
    curve_hint: Option<NamedCurve>,
) -> Result<EcKeyParts, KeyParseError> {
    let Element::Sequence(elements) = element else {
        return Err(KeyParseError::InvalidStructure(
            "ECPrivateKey must be a SEQUENCE".to_string(),
        ));
    };
    if elements.len() < 2 {
        return Err(KeyParseError::InvalidStructure(format!(
            "expected at least 2 elements in ECPrivateKey, got {}",
            elements.len()
        )));
    }

    match &elements[0] {
        Element::Integer(version) => {
            let version = version.to_i64().ok_or_else(|| {
                KeyParseError::InvalidStructure("version out of range".to_string())
            })?;
            if version != EC_PRIVATE_KEY_VERSION {
                return Err(KeyParseError::InvalidVersion(version));
            }
        }
        _ => {
            return Err(KeyParseError::InvalidStructure(
                "expected INTEGER for version".to_string(),
            ));
        }
    }
    if !matches!(&elements[1], Element::OctetString(_)) {
        return Err(KeyParseError::InvalidStructure(
            "expected OCTET STRING for privateKey".to_string(),
        ));
    }

    let curve = match context_slot(elements, PARAMETERS_SLOT) {
        Some(Element::ObjectIdentifier(oid)) => NamedCurve::try_from(oid)?,
        Some(other) => {
            return Err(KeyParseError::InvalidStructure(format!(
                "expected a namedCurve OBJECT IDENTIFIER in parameters, got {}",
                other
            )));
        }
        None => curve_hint.ok_or_else(|| {
            KeyParseError::InvalidStructure(
                "no curve parameters present and none implied by the enclosing structure"
                    .to_string(),
            )
        })?,
    };

    let point = match context_slot(elements, PUBLIC_KEY_SLOT) {
        Some(Element::BitString(bits)) => EcPoint::from_uncompressed(curve, bits.as_bytes())?,
        Some(other) => {
            return Err(KeyParseError::InvalidStructure(format!(
                "expected BIT STRING for publicKey, got {}",
                other
            )));
        }
        None => return Err(KeyParseError::MissingPublicKey),
    };

    Ok(EcKeyParts::new(curve, point))
}

/// First child of the `[slot]` context-specific element, if present.
fn context_slot(elements: &[Element], slot: u8) -> Option<&Element> {
    elements.iter().find_map(|e| match e {
        Element::ContextSpecific {
            slot: s, elements, ..
        } if *s == slot => elements.first(),
        _ => None,
    })
}

//! AlgorithmIdentifier type
//!
//! Defined in [RFC 5280 Section 4.1.1.2](https://datatracker.ietf.org/doc/html/rfc5280#section-4.1.1.2)
//!
//! ```asn1
//! AlgorithmIdentifier ::= SEQUENCE {
//!     algorithm   OBJECT IDENTIFIER,
//!     parameters  ANY DEFINED BY algorithm OPTIONAL
//! }
//! ```

use std::fmt::Display;

use asn1::{Element, ObjectIdentifier};
use codec::{DecodableFrom, Decoder};

use crate::error::InvalidAlgorithmIdentifier;

pub const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const OID_SHA256_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.11";
pub const OID_SHA384_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.12";
pub const OID_SHA512_WITH_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.13";
pub const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const OID_ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
pub const OID_ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";
pub const OID_ECDSA_WITH_SHA512: &str = "1.2.840.10045.4.3.4";

/// Parameters field in AlgorithmIdentifier.
///
/// Wrapped in Option by the holder:
/// - None: field not present (OPTIONAL omitted)
/// - Some(Null): explicit NULL (common for RSA)
/// - Some(Other(..)): any other element (an OID naming a curve for EC keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmParameters {
    Null,
    Other(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    algorithm: ObjectIdentifier,
    parameters: Option<AlgorithmParameters>,
}

impl AlgorithmIdentifier {
    pub fn algorithm(&self) -> &ObjectIdentifier {
        &self.algorithm
    }

    pub fn parameters(&self) -> Option<&AlgorithmParameters> {
        self.parameters.as_ref()
    }

    /// Conventional name of the algorithm OID, when it is one the
    /// classifier knows about.
    pub fn name(&self) -> Option<&'static str> {
        if self.algorithm == OID_RSA_ENCRYPTION {
            Some("rsaEncryption")
        } else if self.algorithm == OID_SHA256_WITH_RSA_ENCRYPTION {
            Some("sha256WithRSAEncryption")
        } else if self.algorithm == OID_SHA384_WITH_RSA_ENCRYPTION {
            Some("sha384WithRSAEncryption")
        } else if self.algorithm == OID_SHA512_WITH_RSA_ENCRYPTION {
            Some("sha512WithRSAEncryption")
        } else if self.algorithm == OID_EC_PUBLIC_KEY {
            Some("id-ecPublicKey")
        } else if self.algorithm == OID_ECDSA_WITH_SHA256 {
            Some("ecdsa-with-SHA256")
        } else if self.algorithm == OID_ECDSA_WITH_SHA384 {
            Some("ecdsa-with-SHA384")
        } else if self.algorithm == OID_ECDSA_WITH_SHA512 {
            Some("ecdsa-with-SHA512")
        } else {
            None
        }
    }

    /// The curve OID carried in the parameters, for EC algorithm
    /// identifiers using the namedCurve CHOICE.
    pub(crate) fn curve_oid(&self) -> Option<&ObjectIdentifier> {
        match self.parameters.as_ref()? {
            AlgorithmParameters::Other(Element::ObjectIdentifier(oid)) => Some(oid),
            _ => None,
        }
    }
}

impl Display for AlgorithmIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.algorithm),
        }
    }
}

impl DecodableFrom<Element> for AlgorithmIdentifier {}

impl Decoder<Element, AlgorithmIdentifier> for Element {
    type Error = InvalidAlgorithmIdentifier;

    fn decode(&self) -> Result<AlgorithmIdentifier, Self::Error> {
        let Element::Sequence(elements) = self else {
            return Err(InvalidAlgorithmIdentifier(
                "expected a SEQUENCE element".to_string(),
            ));
        };
        if elements.is_empty() || elements.len() > 2 {
            return Err(InvalidAlgorithmIdentifier(format!(
                "expected 1 or 2 elements, got {}",
                elements.len()
            )));
        }
        let algorithm = match &elements[0] {
            Element::ObjectIdentifier(oid) => oid.clone(),
            other => {
                return Err(InvalidAlgorithmIdentifier(format!(
                    "algorithm must be an OBJECT IDENTIFIER, got {}",
                    other
                )));
            }
        };
        let parameters = elements.get(1).map(|e| match e {
            Element::Null => AlgorithmParameters::Null,
            other => AlgorithmParameters::Other(other.clone()),
        });
        Ok(AlgorithmIdentifier {
            algorithm,
            parameters,
        })
    }
}

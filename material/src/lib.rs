//! Classifier for PEM-armored certificate and key material.
//!
//! Given a decoded [`armor::Envelope`], [`classify`] dispatches on the
//! envelope label, parses the payload under the grammar that label
//! implies, and returns the extracted material. The classifier is pure:
//! no I/O, no logging, no shared state, and every failure is a typed
//! error left to the caller's policy.
//!
//! ```no_run
//! let pem = std::fs::read_to_string("server.crt").unwrap();
//! let envelope = armor::decode(&pem).unwrap();
//! match material::classify(&envelope).unwrap() {
//!     material::ClassifiedMaterial::Certificate(info) => {
//!         println!("{}", info);
//!     }
//!     other => println!("{:?}", other),
//! }
//! ```

pub mod algorithm;
pub mod certificate;
pub mod curve;
pub mod error;
pub mod key;
pub mod limits;

mod pkcs1;
mod pkcs8;
mod request;
mod sec1;
mod spki;

use armor::{Envelope, Label};
use asn1::{Document, Element};
use codec::{DecodableFrom, Decoder};

pub use algorithm::{AlgorithmIdentifier, AlgorithmParameters};
pub use certificate::CertificateInfo;
pub use curve::NamedCurve;
pub use error::{CertificateParseError, ClassificationError, KeyParseError};
pub use key::{EcKeyParts, EcPoint, KeyAlgorithm, KeyMaterial, RsaKeyParts};
pub use limits::Limits;

/// The outcome of classifying one envelope.
#[derive(Debug, Clone)]
pub enum ClassifiedMaterial {
    Key(KeyMaterial),
    Certificate(CertificateInfo),
    /// PKCS#10 request, recognized without field extraction.
    CertificateRequest,
}

impl ClassifiedMaterial {
    pub fn as_key(&self) -> Option<&KeyMaterial> {
        match self {
            ClassifiedMaterial::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_certificate(&self) -> Option<&CertificateInfo> {
        match self {
            ClassifiedMaterial::Certificate(info) => Some(info),
            _ => None,
        }
    }
}

/// Classify an envelope under the default [`Limits`].
pub fn classify(envelope: &Envelope) -> Result<ClassifiedMaterial, ClassificationError> {
    classify_with(envelope, &Limits::default())
}

/// Classify an envelope, bounding key sizes by `limits`.
///
/// The label fully determines the grammar; the payload is never probed
/// under a grammar its label does not imply. PKCS#8 performs one further
/// dispatch on the inner algorithm OID.
pub fn classify_with(
    envelope: &Envelope,
    limits: &Limits,
) -> Result<ClassifiedMaterial, ClassificationError> {
    match envelope.label() {
        Label::Certificate => {
            let element = payload_element(envelope).map_err(CertificateParseError::from)?;
            let info = certificate::parse(&element, limits)?;
            Ok(ClassifiedMaterial::Certificate(info))
        }
        Label::CertificateRequest => {
            let element = payload_element(envelope).map_err(CertificateParseError::from)?;
            request::recognize(&element)?;
            Ok(ClassifiedMaterial::CertificateRequest)
        }
        Label::ECPrivateKey => {
            let element = payload_element(envelope).map_err(KeyParseError::from)?;
            let parts = sec1::parse_private(&element, None)?;
            Ok(ClassifiedMaterial::Key(KeyMaterial::EcPrivate(parts)))
        }
        Label::RSAPrivateKey => {
            let element = payload_element(envelope).map_err(KeyParseError::from)?;
            let parts = pkcs1::parse_private(&element, limits)?;
            Ok(ClassifiedMaterial::Key(KeyMaterial::RsaPrivate(parts)))
        }
        Label::PrivateKey => {
            let element = payload_element(envelope).map_err(KeyParseError::from)?;
            let key = pkcs8::parse(&element, limits)?;
            Ok(ClassifiedMaterial::Key(key))
        }
        Label::PublicKey => {
            let element = payload_element(envelope).map_err(KeyParseError::from)?;
            let spki = spki::parse(&element, limits)?;
            Ok(ClassifiedMaterial::Key(spki.key))
        }
        Label::Other(label) => Err(ClassificationError::UnsupportedBlockType(label.clone())),
    }
}

fn payload_element(envelope: &Envelope) -> Result<Element, asn1::Error> {
    let document: Document = envelope.decode()?;
    document
        .into_elements()
        .into_iter()
        .next()
        .ok_or(asn1::Error::EmptyInput)
}

impl DecodableFrom<Envelope> for ClassifiedMaterial {}

impl Decoder<Envelope, ClassifiedMaterial> for Envelope {
    type Error = ClassificationError;

    fn decode(&self) -> Result<ClassifiedMaterial, Self::Error> {
        classify(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClassificationError, classify};

    #[test]
    fn test_classify_unsupported_block_type() {
        let pem = "-----BEGIN FOO-----\nAgEq\n-----END FOO-----\n";
        let envelope = armor::decode(pem).unwrap();
        match classify(&envelope) {
            Err(ClassificationError::UnsupportedBlockType(label)) => assert_eq!("FOO", label),
            other => panic!("expected UnsupportedBlockType, got {:?}", other),
        }
    }
}

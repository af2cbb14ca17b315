//! DER parsing and the ASN.1 element model.
//!
//! A byte buffer (usually the payload of a PEM envelope) parses into a
//! [`Document`], a flat list of decoded [`Element`]s. Grammar-specific
//! decoders in higher layers walk the elements.

pub mod error;

mod element;
mod oid;
mod tlv;

use armor::Envelope;
use codec::{DecodableFrom, Decoder};

pub use element::{BitString, Element, Integer, OctetString};
pub use error::Error;
pub use oid::ObjectIdentifier;
pub use tlv::{Tag, Tlv};

/// One parsed unit of DER: the top-level elements of a byte buffer.
///
/// DER payloads in this workspace carry exactly one top-level SEQUENCE,
/// but the document keeps whatever the buffer holds and leaves arity
/// checks to the grammar decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Document { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Parse a DER byte buffer into its top-level elements.
    pub fn from_der(input: &[u8]) -> Result<Document, Error> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut elements = Vec::new();
        let mut rest = input;
        while !rest.is_empty() {
            let (next, tlv) = Tlv::parse(rest)?;
            rest = next;
            elements.push(Element::try_from(&tlv)?);
        }
        Ok(Document { elements })
    }
}

impl DecodableFrom<Envelope> for Document {}

impl Decoder<Envelope, Document> for Envelope {
    type Error = Error;

    fn decode(&self) -> Result<Document, Self::Error> {
        Document::from_der(self.der())
    }
}

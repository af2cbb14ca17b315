use std::fmt::Display;

use chrono::NaiveDateTime;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::Error;
use crate::oid::ObjectIdentifier;
use crate::tlv::{Tag, Tlv};

/// A decoded ASN.1 value.
///
/// Context-specific values keep their slot number and child elements so
/// that grammar-level decoders can dispatch on `[n]` tags. A primitive
/// context-specific value is carried as a single `OctetString` child; the
/// schema decides how to reinterpret the raw octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Boolean(bool),
    Integer(Integer),
    BitString(BitString),
    OctetString(OctetString),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    UTF8String(String),
    PrintableString(String),
    IA5String(String),
    UTCTime(NaiveDateTime),
    GeneralizedTime(NaiveDateTime),
    Sequence(Vec<Element>),
    Set(Vec<Element>),
    ContextSpecific {
        slot: u8,
        constructed: bool,
        elements: Vec<Element>,
    },
    Unimplemented(Tlv),
}

impl TryFrom<&Tlv> for Element {
    type Error = Error;

    fn try_from(tlv: &Tlv) -> Result<Self, Self::Error> {
        match tlv.tag() {
            Tag::Boolean => match tlv.data().and_then(|d| d.first()) {
                Some(0x00) => Ok(Element::Boolean(false)),
                Some(0xff) => Ok(Element::Boolean(true)),
                _ => Err(Error::InvalidBoolean),
            },
            Tag::Integer => match tlv.data() {
                Some(data) if !data.is_empty() => Ok(Element::Integer(Integer::from(data))),
                _ => Err(Error::InvalidInteger("no content octets".to_string())),
            },
            Tag::BitString => match tlv.data() {
                Some(data) => Ok(Element::BitString(BitString::try_from(data)?)),
                None => Err(Error::InvalidBitString("no content octets".to_string())),
            },
            Tag::OctetString => Ok(Element::OctetString(OctetString::from(
                tlv.data().unwrap_or_default().to_vec(),
            ))),
            Tag::Null => Ok(Element::Null),
            Tag::ObjectIdentifier => match tlv.data() {
                Some(data) => Ok(Element::ObjectIdentifier(ObjectIdentifier::try_from(data)?)),
                None => Err(Error::InvalidObjectIdentifier(
                    "no content octets".to_string(),
                )),
            },
            Tag::UTF8String => {
                let data = tlv.data().unwrap_or_default();
                String::from_utf8(data.to_vec())
                    .map(Element::UTF8String)
                    .map_err(|e| Error::InvalidUtf8String(e.to_string()))
            }
            Tag::PrintableString => {
                let data = tlv.data().unwrap_or_default();
                String::from_utf8(data.to_vec())
                    .map(Element::PrintableString)
                    .map_err(|e| Error::InvalidPrintableString(e.to_string()))
            }
            Tag::IA5String => {
                let data = tlv.data().unwrap_or_default();
                String::from_utf8(data.to_vec())
                    .map(Element::IA5String)
                    .map_err(|e| Error::InvalidIa5String(e.to_string()))
            }
            Tag::UTCTime => match tlv.data() {
                Some(data) => Ok(Element::UTCTime(parse_utc_time(data)?)),
                None => Err(Error::InvalidUtcTime("no content octets".to_string())),
            },
            Tag::GeneralizedTime => match tlv.data() {
                Some(data) => Ok(Element::GeneralizedTime(parse_generalized_time(data)?)),
                None => Err(Error::InvalidGeneralizedTime(
                    "no content octets".to_string(),
                )),
            },
            Tag::Sequence => Ok(Element::Sequence(convert_children(tlv)?)),
            Tag::Set => Ok(Element::Set(convert_children(tlv)?)),
            Tag::ContextSpecific { slot, constructed } => {
                if constructed {
                    Ok(Element::ContextSpecific {
                        slot,
                        constructed,
                        elements: convert_children(tlv)?,
                    })
                } else {
                    // IMPLICIT tagging: keep the raw octets for the schema
                    // to reinterpret.
                    let data = tlv.data().ok_or(Error::InvalidContextSpecific {
                        slot,
                        msg: "primitive value has no content".to_string(),
                    })?;
                    Ok(Element::ContextSpecific {
                        slot,
                        constructed,
                        elements: vec![Element::OctetString(OctetString::from(data.to_vec()))],
                    })
                }
            }
            Tag::Unimplemented(_) => Ok(Element::Unimplemented(tlv.clone())),
        }
    }
}

fn convert_children(tlv: &Tlv) -> Result<Vec<Element>, Error> {
    tlv.children()
        .unwrap_or_default()
        .iter()
        .map(Element::try_from)
        .collect()
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Boolean(b) => write!(f, "Boolean({})", b),
            Element::Integer(i) => write!(f, "Integer({})", i),
            Element::BitString(bs) => write!(f, "BitString({} bits)", bs.bit_len()),
            Element::OctetString(os) => write!(f, "OctetString({} bytes)", os.as_bytes().len()),
            Element::Null => write!(f, "Null"),
            Element::ObjectIdentifier(oid) => write!(f, "ObjectIdentifier({})", oid),
            Element::UTF8String(s) => write!(f, "UTF8String({})", s),
            Element::PrintableString(s) => write!(f, "PrintableString({})", s),
            Element::IA5String(s) => write!(f, "IA5String({})", s),
            Element::UTCTime(t) => write!(f, "UTCTime({})", t),
            Element::GeneralizedTime(t) => write!(f, "GeneralizedTime({})", t),
            Element::Sequence(elements) => write!(f, "Sequence({} elements)", elements.len()),
            Element::Set(elements) => write!(f, "Set({} elements)", elements.len()),
            Element::ContextSpecific { slot, .. } => write!(f, "ContextSpecific[{}]", slot),
            Element::Unimplemented(tlv) => write!(f, "Unimplemented({:?})", tlv.tag()),
        }
    }
}

/// ASN.1 INTEGER, arbitrary-precision and signed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Integer {
    inner: BigInt,
}

impl Integer {
    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    /// Bit length of the magnitude.
    pub fn bits(&self) -> u64 {
        self.inner.bits()
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.inner.to_i64()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }

    /// Big-endian magnitude bytes without a sign octet.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.inner.magnitude().to_bytes_be()
    }
}

impl From<&[u8]> for Integer {
    fn from(value: &[u8]) -> Self {
        Integer {
            inner: BigInt::from_signed_bytes_be(value),
        }
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// ASN.1 BIT STRING: the DER content's first octet counts unused trailing
/// bits in the last data octet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    unused: u8,
    data: Vec<u8>,
}

impl BitString {
    pub fn new(unused: u8, data: Vec<u8>) -> Self {
        BitString { unused, data }
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn bit_len(&self) -> usize {
        self.data.len() * 8 - self.unused as usize
    }
}

impl TryFrom<&[u8]> for BitString {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let Some((&unused, data)) = value.split_first() else {
            return Err(Error::InvalidBitString("no content octets".to_string()));
        };
        if unused > 7 {
            return Err(Error::InvalidBitString(format!(
                "unused bits {} out of range",
                unused
            )));
        }
        if data.is_empty() && unused != 0 {
            return Err(Error::InvalidBitString(
                "unused bits with empty data".to_string(),
            ));
        }
        Ok(BitString {
            unused,
            data: data.to_vec(),
        })
    }
}

/// ASN.1 OCTET STRING.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(inner: Vec<u8>) -> Self {
        OctetString { inner }
    }
}

fn parse_utc_time(data: &[u8]) -> Result<NaiveDateTime, Error> {
    let s = std::str::from_utf8(data).map_err(|e| Error::InvalidUtcTime(e.to_string()))?;
    NaiveDateTime::parse_from_str(s, "%y%m%d%H%M%SZ")
        .map_err(|e| Error::InvalidUtcTime(format!("{}: {}", s, e)))
}

fn parse_generalized_time(data: &[u8]) -> Result<NaiveDateTime, Error> {
    let s = std::str::from_utf8(data).map_err(|e| Error::InvalidGeneralizedTime(e.to_string()))?;
    NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%SZ")
        .map_err(|e| Error::InvalidGeneralizedTime(format!("{}: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::element::{BitString, Element, Integer, OctetString};
    use crate::tlv::Tlv;

    fn parse_element(der: &[u8]) -> Element {
        let (rest, tlv) = Tlv::parse(der).expect("TLV should parse");
        assert!(rest.is_empty());
        Element::try_from(&tlv).expect("element should convert")
    }

    #[rstest(input, expected,
        case(vec![0x01, 0x01, 0xff], Element::Boolean(true)),
        case(vec![0x01, 0x01, 0x00], Element::Boolean(false)),
        case(vec![0x02, 0x01, 0x2a], Element::Integer(Integer::from(42))),
        case(vec![0x02, 0x01, 0xff], Element::Integer(Integer::from(-1))),
        case(vec![0x05, 0x00], Element::Null),
        case(
            vec![0x04, 0x03, 0x01, 0x02, 0x03],
            Element::OctetString(OctetString::from(vec![0x01, 0x02, 0x03]))
        ),
        case(
            vec![0x03, 0x03, 0x04, 0xab, 0xc0],
            Element::BitString(BitString::new(4, vec![0xab, 0xc0]))
        ),
        case(vec![0x0c, 0x02, 0x68, 0x69], Element::UTF8String("hi".to_string())),
        case(vec![0x13, 0x02, 0x68, 0x69], Element::PrintableString("hi".to_string())),
    )]
    fn test_element_primitive(input: Vec<u8>, expected: Element) {
        assert_eq!(expected, parse_element(&input));
    }

    #[test]
    fn test_element_sequence() {
        let input = vec![0x30, 0x06, 0x02, 0x01, 0x07, 0x02, 0x01, 0x08];
        let expected = Element::Sequence(vec![
            Element::Integer(Integer::from(7)),
            Element::Integer(Integer::from(8)),
        ]);
        assert_eq!(expected, parse_element(&input));
    }

    #[test]
    fn test_element_context_specific_constructed() {
        let input = vec![0xa0, 0x03, 0x02, 0x01, 0x02];
        let expected = Element::ContextSpecific {
            slot: 0,
            constructed: true,
            elements: vec![Element::Integer(Integer::from(2))],
        };
        assert_eq!(expected, parse_element(&input));
    }

    #[test]
    fn test_element_context_specific_empty() {
        let input = vec![0xa0, 0x00];
        let expected = Element::ContextSpecific {
            slot: 0,
            constructed: true,
            elements: vec![],
        };
        assert_eq!(expected, parse_element(&input));
    }

    #[test]
    fn test_element_context_specific_primitive() {
        let input = vec![0x81, 0x02, 0xca, 0xfe];
        let expected = Element::ContextSpecific {
            slot: 1,
            constructed: false,
            elements: vec![Element::OctetString(OctetString::from(vec![0xca, 0xfe]))],
        };
        assert_eq!(expected, parse_element(&input));
    }

    #[rstest(input, expected_bits,
        case(vec![0x02, 0x02, 0x01, 0x00], 9),
        case(vec![0x02, 0x01, 0x01], 1),
    )]
    fn test_integer_bits(input: Vec<u8>, expected_bits: u64) {
        match parse_element(&input) {
            Element::Integer(n) => assert_eq!(expected_bits, n.bits()),
            other => panic!("expected Integer, got {}", other),
        }
    }

    #[test]
    fn test_utc_time() {
        // 160101120000Z
        let input = vec![
            0x17, 0x0d, 0x31, 0x36, 0x30, 0x31, 0x30, 0x31, 0x31, 0x32, 0x30, 0x30, 0x30, 0x30,
            0x5a,
        ];
        match parse_element(&input) {
            Element::UTCTime(t) => {
                assert_eq!("2016-01-01 12:00:00", t.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            other => panic!("expected UTCTime, got {}", other),
        }
    }

    #[test]
    fn test_bit_string_invalid_unused() {
        let tlv = Tlv::parse(&[0x03, 0x02, 0x08, 0xff]).unwrap().1;
        assert!(Element::try_from(&tlv).is_err());
    }
}

//! DER tag-length-value parsing.
//!
//! ref: ITU-T X.690. Only definite-length encodings are accepted, which is
//! all DER permits.

use nom::{IResult, Parser};

use crate::error::Error;

const TAG_CLASS_MASK: u8 = 0xc0;
const TAG_CLASS_CONTEXT_SPECIFIC: u8 = 0x80;
const TAG_CONSTRUCTED: u8 = 0x20;
const TAG_NUMBER_MASK: u8 = 0x1f;

/// Nested SEQUENCE/SET/context-specific values deeper than this are
/// rejected instead of recursing further.
pub(crate) const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UTF8String,
    PrintableString,
    IA5String,
    UTCTime,
    GeneralizedTime,
    Sequence,
    Set,
    ContextSpecific { slot: u8, constructed: bool },
    Unimplemented(u8),
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        if value & TAG_CLASS_MASK == TAG_CLASS_CONTEXT_SPECIFIC {
            return Tag::ContextSpecific {
                slot: value & TAG_NUMBER_MASK,
                constructed: value & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
            };
        }
        match value {
            0x01 => Self::Boolean,
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x0c => Self::UTF8String,
            0x13 => Self::PrintableString,
            0x16 => Self::IA5String,
            0x17 => Self::UTCTime,
            0x18 => Self::GeneralizedTime,
            0x30 => Self::Sequence,
            0x31 => Self::Set,
            _ => Tag::Unimplemented(value),
        }
    }
}

impl Tag {
    fn is_constructed(&self) -> bool {
        matches!(
            self,
            Tag::Sequence
                | Tag::Set
                | Tag::ContextSpecific {
                    constructed: true,
                    ..
                }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Constructed(Vec<Tlv>),
    Primitive(Vec<u8>),
}

impl Tlv {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Content octets of a primitive value.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Primitive(data) => Some(data),
            Value::Constructed(_) => None,
        }
    }

    /// Child values of a constructed value.
    pub fn children(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Constructed(tlvs) => Some(tlvs),
            Value::Primitive(_) => None,
        }
    }

    /// Parse one TLV from the front of `input`, returning the remainder.
    pub fn parse(input: &[u8]) -> Result<(&[u8], Tlv), Error> {
        Self::parse_at_depth(input, MAX_DEPTH)
    }

    fn parse_at_depth(input: &[u8], depth: usize) -> Result<(&[u8], Tlv), Error> {
        if depth == 0 {
            return Err(Error::DepthLimitExceeded);
        }
        let (input, tag) = parse_tag(input).map_err(to_der_error)?;
        let (input, length) = parse_length(input).map_err(to_der_error)?;
        let (input, data): (&[u8], &[u8]) = nom::bytes::complete::take(length)
            .parse(input)
            .map_err(to_der_error)?;

        if tag.is_constructed() {
            let mut children = Vec::new();
            let mut rest = data;
            while !rest.is_empty() {
                let (next, child) = Self::parse_at_depth(rest, depth - 1)?;
                rest = next;
                children.push(child);
            }
            return Ok((
                input,
                Tlv {
                    tag,
                    value: Value::Constructed(children),
                },
            ));
        }

        Ok((
            input,
            Tlv {
                tag,
                value: Value::Primitive(data.to_vec()),
            },
        ))
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (input, n) = nom::number::be_u8().parse(input)?;
    Ok((input, Tag::from(n)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], u64> {
    let (input, n) = nom::number::be_u8().parse(input)?;
    if n & 0x80 == 0x80 {
        // long form
        // First 1 bit is a marker for long form.
        // Other bits represent bytes length of the length field.
        let length = n & 0x7f;
        // more than 8 length octets cannot fit u64
        if length as usize > size_of::<u64>() {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::TooLarge,
            )));
        }
        let (input, bs) = nom::bytes::complete::take(length).parse(input)?;
        let n = bs.iter().fold(0u64, |n, &b| (n << 8) | b as u64);
        return Ok((input, n));
    }
    // short form: 0-127
    Ok((input, n as u64))
}

fn to_der_error(e: nom::Err<nom::error::Error<&[u8]>>) -> Error {
    Error::Der(e.to_string())
}

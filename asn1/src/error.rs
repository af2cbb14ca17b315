//! Error types for DER and ASN.1 parsing.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("empty DER input")]
    EmptyInput,
    #[error("invalid DER encoding: {0}")]
    Der(String),
    #[error("nesting depth exceeds the limit")]
    DepthLimitExceeded,
    #[error("invalid boolean")]
    InvalidBoolean,
    #[error("invalid integer: {0}")]
    InvalidInteger(String),
    #[error("invalid bit string: {0}")]
    InvalidBitString(String),
    #[error("invalid object identifier: {0}")]
    InvalidObjectIdentifier(String),
    #[error("invalid UTF8String: {0}")]
    InvalidUtf8String(String),
    #[error("invalid PrintableString: {0}")]
    InvalidPrintableString(String),
    #[error("invalid IA5String: {0}")]
    InvalidIa5String(String),
    #[error("invalid UTCTime: {0}")]
    InvalidUtcTime(String),
    #[error("invalid GeneralizedTime: {0}")]
    InvalidGeneralizedTime(String),
    #[error("invalid context-specific value: {slot}, {msg}")]
    InvalidContextSpecific { slot: u8, msg: String },
    #[error("parse int error: {0}")]
    ParseInt(#[from] ParseIntError),
}

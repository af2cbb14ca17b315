use base64::DecodeError;
use thiserror::Error;

/// Failure to recover a DER payload from PEM text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedPem {
    #[error("missing pre-encapsulation boundary")]
    MissingPreEncapsulationBoundary,
    #[error("missing post-encapsulation boundary")]
    MissingPostEncapsulationBoundary,
    #[error("missing encapsulated data")]
    MissingData,
    #[error("mismatched labels: BEGIN {begin}, END {end}")]
    MismatchedLabel { begin: String, end: String },
    #[error("invalid base64 line")]
    InvalidBase64Line,
    #[error("failed to decode base64: {0}")]
    Base64(#[from] DecodeError),
}

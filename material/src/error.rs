use thiserror::Error;

/// Top-level classification failure.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("unsupported block type: {0}")]
    UnsupportedBlockType(String),
    #[error("key parse error: {0}")]
    Key(#[from] KeyParseError),
    #[error("certificate parse error: {0}")]
    Certificate(#[from] CertificateParseError),
}

/// The payload does not conform to the key grammar its label or inner
/// algorithm OID implies.
#[derive(Debug, Error)]
pub enum KeyParseError {
    #[error("invalid structure: {0}")]
    InvalidStructure(String),
    #[error("invalid version: {0}")]
    InvalidVersion(i64),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("unknown curve: {0}")]
    UnknownCurve(String),
    #[error("invalid public key point: {0}")]
    InvalidPoint(String),
    #[error("no public key material present")]
    MissingPublicKey,
    #[error("RSA modulus of {bits} bits is outside the accepted range {min}..={max}")]
    ModulusOutOfRange { bits: u64, min: u64, max: u64 },
    #[error("invalid algorithm identifier: {0}")]
    Algorithm(#[from] InvalidAlgorithmIdentifier),
    #[error("invalid ASN.1: {0}")]
    Asn1(#[from] asn1::Error),
}

#[derive(Debug, Error)]
pub enum CertificateParseError {
    #[error("invalid certificate: {0}")]
    InvalidStructure(String),
    #[error("invalid certification request: {0}")]
    InvalidRequest(String),
    #[error("invalid algorithm identifier: {0}")]
    Algorithm(#[from] InvalidAlgorithmIdentifier),
    #[error("invalid subject public key info: {0}")]
    Key(#[from] KeyParseError),
    #[error("invalid ASN.1: {0}")]
    Asn1(#[from] asn1::Error),
}

/// AlgorithmIdentifier SEQUENCE violation, shared by the key and
/// certificate grammars.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InvalidAlgorithmIdentifier(pub String);

#![forbid(unsafe_code)]

pub mod decoder;

pub use decoder::{DecodableFrom, Decoder};

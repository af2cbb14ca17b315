use std::fmt::Display;
use std::str::FromStr;

use crate::error::Error;

/// OBJECT IDENTIFIER: a sequence of unsigned arcs.
///
/// The DER content octets encode the first two arcs in one byte
/// (`40 * arc0 + arc1`) and the rest in base-128 with a continuation bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentifier {
    arcs: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(Error::InvalidObjectIdentifier(
                "content octets cannot be empty".to_string(),
            ));
        }

        let mut arcs = Vec::new();
        let first = value[0] as u64;
        arcs.push(first / 40);
        arcs.push(first % 40);

        let mut arc = 0u64;
        let mut mid_arc = false;
        for v in value[1..].iter() {
            arc = (arc << 7) | (*v as u64 & 0x7f);
            if *v & 0x80 == 0 {
                arcs.push(arc);
                arc = 0;
                mid_arc = false;
            } else {
                mid_arc = true;
            }
        }
        if mid_arc {
            // the last byte still had its continuation bit set
            return Err(Error::InvalidObjectIdentifier(
                "incomplete base-128 encoding".to_string(),
            ));
        }

        Ok(ObjectIdentifier { arcs })
    }
}

impl TryFrom<Vec<u8>> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self.arcs.first() {
            Some(n) => self.arcs[1..]
                .iter()
                .fold(n.to_string(), |s, n| s + "." + &n.to_string()),
            None => String::new(),
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .map(|s| s.parse::<u64>().map_err(Error::ParseInt))
            .collect::<Result<Vec<u64>, Error>>()?;
        Ok(ObjectIdentifier { arcs })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.arcs
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".")
            == *other
    }
}

impl PartialEq<ObjectIdentifier> for &str {
    fn eq(&self, other: &ObjectIdentifier) -> bool {
        other == self
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use crate::oid::ObjectIdentifier;

    #[rstest(input, expected,
        // 1.2.840.113549.1.1.1 (rsaEncryption)
        case(vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01], "1.2.840.113549.1.1.1"),
        // 1.2.840.113549.1.1.11 (sha256WithRSAEncryption)
        case(vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b], "1.2.840.113549.1.1.11"),
        // 1.2.840.10045.2.1 (id-ecPublicKey)
        case(vec![0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01], "1.2.840.10045.2.1"),
        // 1.2.840.10045.3.1.7 (prime256v1)
        case(vec![0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07], "1.2.840.10045.3.1.7"),
        // 2.5.4.3 (commonName)
        case(vec![0x55, 0x04, 0x03], "2.5.4.3"),
    )]
    fn test_oid_from_bytes(input: Vec<u8>, expected: &str) {
        let oid = ObjectIdentifier::try_from(input.as_slice()).unwrap();
        assert_eq!(oid, expected);
        assert_eq!(expected, oid.to_string());
    }

    #[rstest(input,
        case(vec![]),
        case(vec![0x2a, 0x86]),
        // trailing continuation byte whose accumulated arc is zero
        case(vec![0x2a, 0x80]),
    )]
    fn test_oid_from_bytes_invalid(input: Vec<u8>) {
        assert!(ObjectIdentifier::try_from(input.as_slice()).is_err());
    }

    #[test]
    fn test_oid_from_str_roundtrip() {
        let oid = ObjectIdentifier::from_str("1.2.840.10045.4.3.2").unwrap();
        assert_eq!("1.2.840.10045.4.3.2", oid.to_string());
        assert_eq!(&[1, 2, 840, 10045, 4, 3, 2][..], oid.arcs());
    }
}

use crate::error::KeyParseError;

pub const DEFAULT_MIN_RSA_MODULUS_BITS: u64 = 256;
pub const DEFAULT_MAX_RSA_MODULUS_BITS: u64 = 16384;

/// Size sanity bounds applied while parsing key material.
///
/// Crafted input can carry an arbitrarily large modulus; bounding the
/// accepted bit length keeps the worst-case work proportional to a
/// plausible key rather than to the attacker's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub min_rsa_modulus_bits: u64,
    pub max_rsa_modulus_bits: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            min_rsa_modulus_bits: DEFAULT_MIN_RSA_MODULUS_BITS,
            max_rsa_modulus_bits: DEFAULT_MAX_RSA_MODULUS_BITS,
        }
    }
}

impl Limits {
    pub fn with_rsa_modulus_bits(min: u64, max: u64) -> Self {
        Limits {
            min_rsa_modulus_bits: min,
            max_rsa_modulus_bits: max,
        }
    }

    pub(crate) fn check_rsa_modulus(&self, bits: u64) -> Result<(), KeyParseError> {
        if bits < self.min_rsa_modulus_bits || bits > self.max_rsa_modulus_bits {
            return Err(KeyParseError::ModulusOutOfRange {
                bits,
                min: self.min_rsa_modulus_bits,
                max: self.max_rsa_modulus_bits,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::error::KeyParseError;
    use crate::limits::Limits;

    #[rstest(bits, accepted,
        case(256, true),
        case(2048, true),
        case(16384, true),
        case(255, false),
        case(16385, false),
    )]
    fn test_check_rsa_modulus(bits: u64, accepted: bool) {
        let limits = Limits::default();
        let result = limits.check_rsa_modulus(bits);
        assert_eq!(accepted, result.is_ok());
        if !accepted {
            assert!(matches!(
                result.unwrap_err(),
                KeyParseError::ModulusOutOfRange { .. }
            ));
        }
    }
}

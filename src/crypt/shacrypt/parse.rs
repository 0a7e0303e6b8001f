use super::error::ShaCryptError;
use super::variant::Variant;

pub(crate) const ROUNDS_MIN: u32 = 1_000;
pub(crate) const ROUNDS_MAX: u32 = 999_999_999;
pub(crate) const ROUNDS_DEFAULT: u32 = 5_000;
pub(crate) const SALT_LEN_MAX: usize = 16;

const ROUNDS_PREFIX: &[u8] = b"rounds=";

/// A parsed `$5$`/`$6$` modular-crypt salt, per §4.1 of the scheme.
pub(crate) struct SaltSpec {
    pub(crate) variant: Variant,
    pub(crate) rounds: u32,
    pub(crate) rounds_explicit: bool,
    pub(crate) salt: Vec<u8>,
}

impl SaltSpec {
    /// Parses the magic tag, optional `rounds=N$` clause, and raw salt
    /// bytes out of `salt`. Any trailing content after the raw salt,
    /// including an already-appended `$<digest>`, is ignored rather
    /// than rejected.
    pub(crate) fn parse(salt: &str) -> Result<Self, ShaCryptError> {
        let bytes = salt.as_bytes();

        if bytes.len() < 3 {
            return Err(ShaCryptError::InvalidSalt);
        }

        if bytes[0] != b'$' || bytes[2] != b'$' {
            return Err(ShaCryptError::InvalidSaltFormat);
        }

        let variant =
            Variant::from_magic(bytes[1]).ok_or(ShaCryptError::UnknownCryptIdentifier(bytes[1] as char))?;

        let mut pos = 3;
        let mut rounds = ROUNDS_DEFAULT;
        let mut rounds_explicit = false;

        if bytes[pos..].starts_with(ROUNDS_PREFIX) {
            let digits_start = pos + ROUNDS_PREFIX.len();
            let mut end = digits_start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end == digits_start || end >= bytes.len() || bytes[end] != b'$' {
                return Err(ShaCryptError::InvalidRoundsOption);
            }

            let digits = std::str::from_utf8(&bytes[digits_start..end]).expect("ascii digit run is valid utf-8");
            let requested: u64 = digits.parse().map_err(|_| ShaCryptError::InvalidRoundsOption)?;
            rounds = requested.clamp(ROUNDS_MIN as u64, ROUNDS_MAX as u64) as u32;
            rounds_explicit = true;
            pos = end + 1;
        }

        let salt_start = pos;
        let mut salt_end = salt_start;
        while salt_end < bytes.len() && bytes[salt_end] != b'$' && salt_end - salt_start < SALT_LEN_MAX {
            salt_end += 1;
        }

        let prefix_len = 3 + if rounds_explicit { 17 } else { 0 } + (salt_end - salt_start);
        if prefix_len > 3 + 17 * rounds_explicit as usize + SALT_LEN_MAX {
            return Err(ShaCryptError::InvalidSalt);
        }

        Ok(SaltSpec {
            variant,
            rounds,
            rounds_explicit,
            salt: bytes[salt_start..salt_end].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_salt() {
        assert_eq!(SaltSpec::parse("$5").unwrap_err(), ShaCryptError::InvalidSalt);
    }

    #[test]
    fn rejects_missing_separators() {
        assert_eq!(
            SaltSpec::parse("56xsaltstring").unwrap_err(),
            ShaCryptError::InvalidSaltFormat
        );
    }

    #[test]
    fn rejects_unknown_identifier() {
        assert_eq!(
            SaltSpec::parse("$7$anything").unwrap_err(),
            ShaCryptError::UnknownCryptIdentifier('7')
        );
    }

    #[test]
    fn defaults_rounds_when_absent() {
        let spec = SaltSpec::parse("$5$saltstring").unwrap();
        assert_eq!(spec.rounds, ROUNDS_DEFAULT);
        assert!(!spec.rounds_explicit);
        assert_eq!(spec.salt, b"saltstring");
    }

    #[test]
    fn clamps_rounds_below_minimum() {
        let spec = SaltSpec::parse("$6$rounds=1000$roundstoolow").unwrap();
        assert_eq!(spec.rounds, ROUNDS_MIN);
        assert!(spec.rounds_explicit);
    }

    #[test]
    fn clamps_rounds_at_zero() {
        let spec = SaltSpec::parse("$6$rounds=0$abc").unwrap();
        assert_eq!(spec.rounds, ROUNDS_MIN);
    }

    #[test]
    fn clamps_rounds_above_maximum() {
        let spec = SaltSpec::parse("$6$rounds=1000000000$abc").unwrap();
        assert_eq!(spec.rounds, ROUNDS_MAX);
    }

    #[test]
    fn rejects_unterminated_rounds_clause() {
        assert_eq!(
            SaltSpec::parse("$6$rounds=5000abc").unwrap_err(),
            ShaCryptError::InvalidRoundsOption
        );
    }

    #[test]
    fn rejects_empty_rounds_digits() {
        assert_eq!(
            SaltSpec::parse("$6$rounds=$abc").unwrap_err(),
            ShaCryptError::InvalidRoundsOption
        );
    }

    #[test]
    fn truncates_long_salt_to_sixteen_bytes() {
        let spec = SaltSpec::parse("$5$saltstringsaltstring").unwrap();
        assert_eq!(spec.salt.len(), SALT_LEN_MAX);
        assert_eq!(spec.salt, b"saltstringsaltst");
    }

    #[test]
    fn ignores_trailing_content_after_salt() {
        let spec = SaltSpec::parse("$5$saltstring$alreadyEncodedDigestHere").unwrap();
        assert_eq!(spec.salt, b"saltstring");
    }

    #[test]
    fn accepts_empty_salt() {
        let spec = SaltSpec::parse("$6$$").unwrap();
        assert!(spec.salt.is_empty());
    }
}

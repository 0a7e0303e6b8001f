//! SHA-crypt (`$5$`/`$6$`) key derivation, encoding, and output assembly.
//!
//! Stages run linearly: [`parse`] decodes the salt, [`variant`] binds
//! the parsed magic to a digest width and permutation table,
//! [`engine`] runs the mixing schedule, and [`variant::Variant::encode`]
//! serializes the result. [`assemble`] glues the pieces into the final
//! modular-crypt string.

mod engine;
mod error;
mod parse;
mod variant;

#[cfg(feature = "capi")]
pub mod capi;

pub use error::ShaCryptError;
use parse::SaltSpec;

/// Computes the SHA-crypt encoded password for `pw` under `salt`.
///
/// `salt` is a modular-crypt string starting with `$5$` or `$6$`,
/// optionally carrying a `rounds=N$` clause; everything after the raw
/// salt, including an already-appended digest, is ignored.
pub fn shacrypt(pw: &[u8], salt: &str) -> Result<String, ShaCryptError> {
    let spec = SaltSpec::parse(salt)?;

    log::debug!(
        "shacrypt: variant={:?} rounds_explicit={}",
        spec.variant,
        spec.rounds_explicit
    );

    let digest = spec.variant.derive(pw, &spec.salt, spec.rounds);
    let encoded_digest = spec.variant.encode(&digest);

    Ok(assemble(&spec, &encoded_digest))
}

fn assemble(spec: &SaltSpec, encoded_digest: &str) -> String {
    let raw_salt = String::from_utf8_lossy(&spec.salt);
    let mut out = String::with_capacity(
        spec.variant.magic().len() + 17 + raw_salt.len() + 1 + encoded_digest.len(),
    );
    out.push_str(spec.variant.magic());
    if spec.rounds_explicit {
        out.push_str("rounds=");
        out.push_str(&spec.rounds.to_string());
        out.push('$');
    }
    out.push_str(&raw_salt);
    out.push('$');
    out.push_str(encoded_digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference vectors from the published SHA-crypt specification.
    #[test]
    fn vector_sha256_default_rounds() {
        assert_eq!(
            shacrypt(b"Hello world!", "$5$saltstring").unwrap(),
            "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5"
        );
    }

    #[test]
    fn vector_sha256_explicit_rounds() {
        assert_eq!(
            shacrypt(b"Hello world!", "$5$rounds=10000$saltstringsaltstring").unwrap(),
            "$5$rounds=10000$saltstringsaltst$3xv.VbSHBb41AL9AvLeujZkZRBAwqFMz2.opqey6IcA"
        );
    }

    #[test]
    fn vector_sha256_long_password() {
        assert_eq!(
            shacrypt(
                b"we have a short salt string but not a short password",
                "$5$rounds=77777$short"
            )
            .unwrap(),
            "$5$rounds=77777$short$JiO1O3ZpDAxGJeaDIuqCoEFysAe1mZNJRs3pw0KQRd/"
        );
    }

    #[test]
    fn vector_sha512_default_rounds() {
        assert_eq!(
            shacrypt(b"Hello world!", "$6$saltstring").unwrap(),
            "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1"
        );
    }

    #[test]
    fn vector_sha512_empty_password_clamped_rounds() {
        let out = shacrypt(b"", "$6$rounds=1000$roundstoolow").unwrap();
        assert!(out.starts_with("$6$rounds=1000$roundstoolow$"));
        let digest = out.rsplit('$').next().unwrap();
        assert_eq!(digest.len(), 86);
        assert!(digest.bytes().all(is_radix64));
    }

    #[test]
    fn unknown_identifier_fails() {
        assert_eq!(
            shacrypt(b"x", "$7$anything").unwrap_err(),
            ShaCryptError::UnknownCryptIdentifier('7')
        );
    }

    #[test]
    fn determinism() {
        let a = shacrypt(b"correct horse", "$6$rounds=2000$abcdefgh").unwrap();
        let b = shacrypt(b"correct horse", "$6$rounds=2000$abcdefgh").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn round_trip_idempotence() {
        let encoded = shacrypt(b"correct horse", "$6$saltstring").unwrap();
        assert_eq!(shacrypt(b"correct horse", &encoded).unwrap(), encoded);
    }

    #[test]
    fn variant_isolation() {
        let sha256 = shacrypt(b"same password", "$5$samesalt").unwrap();
        let sha512 = shacrypt(b"same password", "$6$samesalt").unwrap();
        assert_eq!(sha256.rsplit('$').next().unwrap().len(), 43);
        assert_eq!(sha512.rsplit('$').next().unwrap().len(), 86);
    }

    #[test]
    fn alphabet_closure() {
        let out = shacrypt(b"x", "$6$samesalt").unwrap();
        let digest = out.rsplit('$').next().unwrap();
        assert!(digest.bytes().all(is_radix64));
    }

    #[test]
    fn empty_password() {
        let out = shacrypt(b"", "$5$saltstring").unwrap();
        assert_eq!(out.rsplit('$').next().unwrap().len(), 43);
    }

    #[test]
    fn password_length_equal_to_digest_len() {
        let pw = vec![b'x'; 32];
        let out = shacrypt(&pw, "$5$saltstring").unwrap();
        assert_eq!(out.rsplit('$').next().unwrap().len(), 43);
    }

    #[test]
    fn password_length_digest_len_plus_one() {
        let pw = vec![b'x'; 33];
        let out = shacrypt(&pw, "$5$saltstring").unwrap();
        assert_eq!(out.rsplit('$').next().unwrap().len(), 43);
    }

    #[test]
    fn empty_salt() {
        let out = shacrypt(b"x", "$6$$").unwrap();
        assert!(out.starts_with("$6$$"));
    }

    fn is_radix64(c: u8) -> bool {
        b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz".contains(&c)
    }
}

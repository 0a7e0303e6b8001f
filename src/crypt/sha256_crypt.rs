use super::shacrypt::shacrypt;

pub(crate) const SHA256_SALT_PREFIX: &[u8] = b"$5$";

pub(super) fn sha256_crypt(key: &[u8], salt: &[u8]) -> Option<String> {
    let salt = std::str::from_utf8(salt).ok()?;
    shacrypt(key, salt).ok()
}

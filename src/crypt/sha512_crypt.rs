use super::shacrypt::shacrypt;

pub(crate) const SHA512_SALT_PREFIX: &[u8] = b"$6$";

pub(super) fn sha512_crypt(key: &[u8], salt: &[u8]) -> Option<String> {
    let salt = std::str::from_utf8(salt).ok()?;
    shacrypt(key, salt).ok()
}

#[cfg(test)]
mod tests {
    use super::sha512_crypt;

    #[test]
    fn crypt() {
        let test_key = b"Hello world!";
        let test_setting = b"$6$saltstring";
        let test_hash = "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1";
        assert_eq!(Some(test_hash.to_string()), sha512_crypt(test_key, test_setting));
    }
}

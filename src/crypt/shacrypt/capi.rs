//! C-ABI entry point matching §6 of the scheme literally: a
//! `(pw, salt, out, out_len) -> count | error` contract with explicit
//! null and buffer-size checks, for callers that can't take the safe
//! `&[u8]`/`&str` API (e.g. linking this crate into a C extension).
//!
//! Gated behind the `capi` feature; off by default.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

use super::error::ShaCryptError;
use super::parse::SALT_LEN_MAX;

/// Largest possible encoded output: `$6$` + `rounds=999999999$` + 16
/// salt bytes + `$` + 86 digest chars + NUL.
pub const SHACRYPT_BUF_LEN: usize = 3 + 17 + SALT_LEN_MAX + 1 + 86 + 1;

/// # Safety
///
/// `pw` and `salt` must each be either null or a valid NUL-terminated
/// C string. `out` must be a valid pointer to at least `out_len`
/// writable bytes.
///
/// Returns the number of bytes written to `out` (excluding the NUL
/// terminator) on success, or a negative [`ShaCryptError`] discriminant
/// on failure. No partial output is written on any error path.
#[no_mangle]
pub unsafe extern "C" fn shacrypt_capi(
    pw: *const c_char,
    salt: *const c_char,
    out: *mut c_char,
    out_len: usize,
) -> c_int {
    if pw.is_null() || salt.is_null() {
        return error_code(ShaCryptError::NullArgument);
    }
    if out_len < SHACRYPT_BUF_LEN {
        return error_code(ShaCryptError::InsufficientBufferSize);
    }

    let pw_bytes = CStr::from_ptr(pw).to_bytes();
    let salt_str = match CStr::from_ptr(salt).to_str() {
        Ok(s) => s,
        Err(_) => return error_code(ShaCryptError::InvalidSalt),
    };

    match super::shacrypt(pw_bytes, salt_str) {
        Ok(encoded) => {
            let bytes = encoded.as_bytes();
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), out as *mut u8, bytes.len());
            *out.add(bytes.len()) = 0;
            bytes.len() as c_int
        }
        Err(e) => error_code(e),
    }
}

fn error_code(e: ShaCryptError) -> c_int {
    let code = match e {
        ShaCryptError::NullArgument => 1,
        ShaCryptError::InsufficientBufferSize => 2,
        ShaCryptError::InvalidSalt => 3,
        ShaCryptError::InvalidSaltFormat => 4,
        ShaCryptError::UnknownCryptIdentifier(_) => 5,
        ShaCryptError::InvalidRoundsOption => 6,
        ShaCryptError::CryptFailure => 7,
    };
    -code
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn rejects_undersized_buffer() {
        let pw = CString::new("x").unwrap();
        let salt = CString::new("$6$saltstring").unwrap();
        let mut out = [0 as c_char; 4];
        let rc = unsafe { shacrypt_capi(pw.as_ptr(), salt.as_ptr(), out.as_mut_ptr(), out.len()) };
        assert_eq!(rc, -2);
    }

    #[test]
    fn writes_nul_terminated_output() {
        let pw = CString::new("Hello world!").unwrap();
        let salt = CString::new("$5$saltstring").unwrap();
        let mut out = [0 as c_char; SHACRYPT_BUF_LEN];
        let rc = unsafe { shacrypt_capi(pw.as_ptr(), salt.as_ptr(), out.as_mut_ptr(), out.len()) };
        assert!(rc > 0);
        let s = unsafe { CStr::from_ptr(out.as_ptr()) }.to_str().unwrap();
        assert_eq!(s, "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5");
        assert_eq!(rc as usize, s.len());
    }
}

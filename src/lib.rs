//! SHA-crypt and MD5-crypt password hashing, plus a toy shadow-file store
//! used to simulate `passwd`-style account management.

pub mod crypt;
pub mod store;

#[cfg(feature = "capi")]
pub use crypt::shacrypt::capi::shacrypt_capi;

pub use crypt::shacrypt::{shacrypt, ShaCryptError};

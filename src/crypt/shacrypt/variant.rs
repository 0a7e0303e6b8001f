use sha2::{Sha256, Sha512};

use crate::crypt::{permute, to64};

use super::engine::derive;

/// Which digest variant a `$5$`/`$6$` salt selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Variant {
    Sha256,
    Sha512,
}

/// SHA-crypt permutation groups, reusing the same `(b2, b1, b0)` triple
/// shape the MD5-crypt permutation table already uses.
const SHA256_PERM: [[usize; 3]; 10] = [
    [0, 10, 20],
    [21, 1, 11],
    [12, 22, 2],
    [3, 13, 23],
    [24, 4, 14],
    [15, 25, 5],
    [6, 16, 26],
    [27, 7, 17],
    [18, 28, 8],
    [9, 19, 29],
];

/// SHA-512 equivalent of [`SHA256_PERM`].
const SHA512_PERM: [[usize; 3]; 21] = [
    [0, 21, 42],
    [22, 43, 1],
    [44, 2, 23],
    [3, 24, 45],
    [25, 46, 4],
    [47, 5, 26],
    [6, 27, 48],
    [28, 49, 7],
    [50, 8, 29],
    [9, 30, 51],
    [31, 52, 10],
    [53, 11, 32],
    [12, 33, 54],
    [34, 55, 13],
    [56, 14, 35],
    [15, 36, 57],
    [37, 58, 16],
    [59, 17, 38],
    [18, 39, 60],
    [40, 61, 19],
    [62, 20, 41],
];

impl Variant {
    pub(crate) fn from_magic(c: u8) -> Option<Self> {
        match c {
            b'5' => Some(Variant::Sha256),
            b'6' => Some(Variant::Sha512),
            _ => None,
        }
    }

    pub(crate) fn magic(self) -> &'static str {
        match self {
            Variant::Sha256 => "$5$",
            Variant::Sha512 => "$6$",
        }
    }

    pub(crate) fn digest_len(self) -> usize {
        match self {
            Variant::Sha256 => 32,
            Variant::Sha512 => 64,
        }
    }

    /// Total characters in the encoded digest section (43 or 86).
    pub(crate) fn encoded_len(self) -> usize {
        match self {
            Variant::Sha256 => 43,
            Variant::Sha512 => 86,
        }
    }

    /// Runs the key-derivation engine for this variant and returns the
    /// final A/C digest, still in its raw (unencoded) byte form.
    pub(crate) fn derive(self, pw: &[u8], salt: &[u8], rounds: u32) -> zeroize::Zeroizing<Vec<u8>> {
        match self {
            Variant::Sha256 => derive::<Sha256>(pw, salt, rounds),
            Variant::Sha512 => derive::<Sha512>(pw, salt, rounds),
        }
    }

    /// Serializes a final digest using this variant's permutation table.
    pub(crate) fn encode(self, digest: &[u8]) -> String {
        let mut out = Vec::with_capacity(self.encoded_len());
        match self {
            Variant::Sha256 => {
                permute(digest, &mut out, &SHA256_PERM);
                out.extend(to64(
                    ((digest[31] as u32) << 8) | (digest[30] as u32),
                    3,
                ));
            }
            Variant::Sha512 => {
                permute(digest, &mut out, &SHA512_PERM);
                out.extend(to64(digest[63] as u32, 2));
            }
        }
        String::from_utf8(out).expect("alphabet is ASCII")
    }
}

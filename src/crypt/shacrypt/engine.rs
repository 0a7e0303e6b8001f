use digest::Digest;
use zeroize::Zeroizing;

/// Runs the SHA-crypt key-derivation schedule and returns the final
/// A/C digest (`digest_len` bytes), ready for radix-64 encoding.
///
/// `D` is monomorphized per variant (`Sha256` or `Sha512`).
pub(super) fn derive<D: Digest>(pw: &[u8], salt: &[u8], rounds: u32) -> Zeroizing<Vec<u8>> {
    let len = pw.len();
    let digest_len = D::output_size();

    // Phase 1: bootstrap digest A from pw, salt, and a helper digest B.
    let mut a = D::new();
    a.update(pw);
    a.update(salt);

    let db = D::new().chain_update(pw).chain_update(salt).chain_update(pw).finalize();

    let mut block = len;
    while block > digest_len {
        a.update(&db[..digest_len]);
        block -= digest_len;
    }
    a.update(&db[..block]);

    let mut block = len;
    while block != 0 {
        if block & 1 != 0 {
            a.update(&db[..digest_len]);
        } else {
            a.update(pw);
        }
        block >>= 1;
    }
    let mut da: Zeroizing<Vec<u8>> = Zeroizing::new(a.finalize().to_vec());

    // Phase 2: derive P (password-shaped) and S (salt-shaped) byte runs.
    let mut dp_ctx = D::new();
    for _ in 0..len {
        dp_ctx.update(pw);
    }
    let dp = dp_ctx.finalize();
    let mut p = Zeroizing::new(vec![0u8; len]);
    fill_from_digest(&mut p, &dp, digest_len);

    let repeat = 16 + da[0] as usize;
    let mut ds_ctx = D::new();
    for _ in 0..repeat {
        ds_ctx.update(salt);
    }
    let ds = ds_ctx.finalize();
    let mut s = Zeroizing::new(vec![0u8; salt.len()]);
    fill_from_digest(&mut s, &ds, digest_len);

    // Phase 3: main mixing loop.
    for i in 0..rounds {
        let mut b = D::new();
        if i % 2 != 0 {
            b.update(&p[..]);
        } else {
            b.update(&da[..]);
        }
        if i % 3 != 0 {
            b.update(&s[..]);
        }
        if i % 7 != 0 {
            b.update(&p[..]);
        }
        if i % 2 != 0 {
            b.update(&da[..]);
        } else {
            b.update(&p[..]);
        }
        da = Zeroizing::new(b.finalize().to_vec());
    }

    da
}

/// Replicates a digest's output across `buf`: full `digest_len` copies
/// followed by one partial copy for the remainder.
fn fill_from_digest(buf: &mut [u8], digest: &[u8], digest_len: usize) {
    let mut i = 0;
    while i + digest_len <= buf.len() {
        buf[i..i + digest_len].copy_from_slice(digest);
        i += digest_len;
    }
    let rem = buf.len() - i;
    buf[i..].copy_from_slice(&digest[..rem]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha256;

    #[test]
    fn fill_from_digest_handles_partial_tail() {
        let mut buf = [0u8; 5];
        let digest = [1u8, 2, 3];
        fill_from_digest(&mut buf, &digest, 3);
        assert_eq!(buf, [1, 2, 3, 1, 2]);
    }

    #[test]
    fn derive_is_deterministic() {
        let a = derive::<Sha256>(b"Hello world!", b"saltstring", 5000);
        let b = derive::<Sha256>(b"Hello world!", b"saltstring", 5000);
        assert_eq!(*a, *b);
    }

    #[test]
    fn derive_empty_password_does_not_panic() {
        let out = derive::<Sha256>(b"", b"salt", 1000);
        assert_eq!(out.len(), 32);
    }
}

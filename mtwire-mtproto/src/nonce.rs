//! Random `int128` / `int256` values for the key exchange.

use crate::errors::Result;

/// A fresh random `int128`, e.g. the `nonce` of `req_pq`.
pub fn int128() -> Result<[u8; 16]> {
    random()
}

/// A fresh random `int256`, e.g. the `new_nonce` of `p_q_inner_data`.
pub fn int256() -> Result<[u8; 32]> {
    random()
}

pub(crate) fn fill(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf)?;
    Ok(())
}

fn random<const N: usize>() -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    fill(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonces_differ() {
        assert_ne!(int128().unwrap(), int128().unwrap());
        assert_ne!(int256().unwrap(), [0u8; 32]);
    }
}

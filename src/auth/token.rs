// src/auth/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Generate a secure random token using the OS RNG.
/// Used for session cookie keys and access/refresh tokens.
pub fn generate_token_default() -> String {
    let mut rng = OsRng;
    generate_token(&mut rng, DEFAULT_TOKEN_BYTES)
}

/// Generate a URL-safe token from random bytes.
/// - Uses Base64 URL-safe, no padding.
/// - Typically 32 bytes -> ~43 char token.
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buf)
}

/// Hash a token using SHA-256.
/// Store this output in DB (BLOB), never the raw token.
pub fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

use ring::digest;

/// Hash a password for storage under `login.password` (SHA-256, hex-encoded)
pub fn hash_password(password: &str) -> String {
    let hash = digest::digest(&digest::SHA256, password.as_bytes());
    hex::encode(hash.as_ref())
}

/// Verify a password against a stored hash
pub fn verify_password(input: &str, stored_hash: &str) -> bool {
    !stored_hash.is_empty() && hash_password(input) == stored_hash
}

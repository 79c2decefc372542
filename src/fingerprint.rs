// src/fingerprint.rs

//! Content digests for rendered input decks.

use blake3::Hasher;

/// Hex blake3 digest of an input deck.
pub fn input_digest(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Digest of an input deck together with its auxiliary files.
///
/// Auxiliary files are sorted by name first so the result does not depend on
/// the order they were declared in.
pub fn attempt_digest(input: &str, aux_files: &[(String, String)]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(input_digest(input).as_bytes());

    let mut aux: Vec<&(String, String)> = aux_files.iter().collect();
    aux.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, contents) in aux {
        hasher.update(name.as_bytes());
        hasher.update(input_digest(contents).as_bytes());
    }

    hasher.finalize().to_hex().to_string()
}

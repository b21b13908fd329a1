use rand::{Rng, distributions::Alphanumeric};

/// Implausible local part used to detect catch-all servers.
pub fn random_local_part(len: usize) -> String {
    let length = len.clamp(12, 32);
    let tail: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("nx-{tail}")
}

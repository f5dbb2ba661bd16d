use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;

/// Key length for the AES-256-CBC cipher.
const KEY_BYTES: usize = 32;

/// Generate an application key in the `base64:<key>` format.
pub fn generate_app_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    format!("base64:{}", STANDARD.encode(bytes))
}

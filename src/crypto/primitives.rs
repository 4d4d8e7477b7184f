use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::{CryptoProvider, DIGEST_LEN};
use crate::error::ArcaError;

const IV_LEN: usize = 16;

/// Production `CryptoProvider`: SHA-512, HMAC-SHA-512, HKDF-SHA-512, and
/// PKCS#7-padded AES-CBC via the `aes` + `cbc` crates.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCryptoProvider;

impl CryptoProvider for DefaultCryptoProvider {
    fn hash(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        use sha2::Digest;
        let digest = Sha512::digest(data);
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&digest);
        out
    }

    fn hmac(&self, key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(data);
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }

    fn kdf(&self, key: &[u8], purpose: &[u8]) -> Vec<u8> {
        let hk = Hkdf::<Sha512>::new(None, key);
        let mut out = vec![0u8; key.len()];
        hk.expand(purpose, &mut out)
            .expect("HKDF output length is bounded by 255 * hash length");
        out
    }

    fn encrypt(&self, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, ArcaError> {
        let iv: [u8; IV_LEN] = self.rand(IV_LEN)?.try_into().expect("rand(16) returns 16 bytes");
        let ct = aes_cbc_encrypt(key, &iv, plaintext)?;
        let mut out = Vec::with_capacity(IV_LEN + ct.len());
        out.extend_from_slice(&iv);
        out.extend_from_slice(&ct);
        Ok(out)
    }

    fn decrypt(&self, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, ArcaError> {
        if ciphertext.len() < IV_LEN {
            return Err(ArcaError::Crypto);
        }
        let (iv, ct) = ciphertext.split_at(IV_LEN);
        aes_cbc_decrypt(key, iv, ct)
    }

    fn rand(&self, n: usize) -> Result<Vec<u8>, ArcaError> {
        let mut out = vec![0u8; n];
        getrandom::getrandom(&mut out).map_err(|_| ArcaError::Crypto)?;
        Ok(out)
    }
}

fn aes_cbc_encrypt(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>, ArcaError> {
    match key.len() {
        16 => Ok(cbc::Encryptor::<Aes128>::new(key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        24 => Ok(cbc::Encryptor::<Aes192>::new(key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        32 => Ok(cbc::Encryptor::<Aes256>::new(key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        _ => Err(ArcaError::Crypto),
    }
}

fn aes_cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, ArcaError> {
    let iv: &[u8; IV_LEN] = iv.try_into().map_err(|_| ArcaError::Crypto)?;
    match key.len() {
        16 => cbc::Decryptor::<Aes128>::new(key.into(), iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| ArcaError::Crypto),
        24 => cbc::Decryptor::<Aes192>::new(key.into(), iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| ArcaError::Crypto),
        32 => cbc::Decryptor::<Aes256>::new(key.into(), iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| ArcaError::Crypto),
        _ => Err(ArcaError::Crypto),
    }
}

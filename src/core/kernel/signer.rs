use crate::core::errors::ExchangeError;
use crate::core::types::Params;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Signer trait for request authentication
///
/// Implementations turn a fully assembled parameter set (nonce and method
/// included) into the headers the exchange expects on a private call.
pub trait Signer: Send + Sync {
    /// Sign the parameters and return the headers to attach
    fn sign_request(&self, params: &Params) -> Result<Vec<(String, String)>, ExchangeError>;
}

/// HMAC-SHA512 signer sending `Key` and `Sign` headers
pub struct HmacSigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl HmacSigner {
    pub fn new(api_key: Secret<String>, secret_key: Secret<String>) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner").finish_non_exhaustive()
    }
}

impl Signer for HmacSigner {
    fn sign_request(&self, params: &Params) -> Result<Vec<(String, String)>, ExchangeError> {
        let signature = sign(self.secret_key.expose_secret(), params)?;
        Ok(vec![
            ("Key".to_string(), self.api_key.expose_secret().clone()),
            ("Sign".to_string(), signature),
        ])
    }
}

/// Lowercase hex HMAC-SHA512 of the parameters serialized in insertion order.
///
/// Values are not URL-escaped before signing; the exchange checks the
/// signature against exactly this `key=value&...` form.
pub fn sign(secret: &str, params: &Params) -> Result<String, ExchangeError> {
    sign_payload(secret, &params.to_query_string())
}

pub fn sign_payload(secret: &str, payload: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::Configuration(format!("Invalid secret key: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2
        let digest = sign_payload("Jefe", "what do ya want for nothing?").unwrap();
        assert_eq!(
            digest,
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let params = Params::new()
            .with("pair", "ltc_btc")
            .with("nonce", 1000)
            .with("method", "ActiveOrders");
        let first = sign("secret", &params).unwrap();
        let second = sign("secret", &params.clone()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 128);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_signature_depends_on_order_and_secret() {
        let forward = Params::new().with("a", 1).with("b", 2);
        let backward = Params::new().with("b", 2).with("a", 1);
        assert_ne!(sign("s", &forward).unwrap(), sign("s", &backward).unwrap());
        assert_ne!(sign("s", &forward).unwrap(), sign("t", &forward).unwrap());
        assert_eq!(
            sign("s", &forward).unwrap(),
            sign_payload("s", "a=1&b=2").unwrap()
        );
    }

    #[test]
    fn test_signer_headers() {
        let signer = HmacSigner::new(
            Secret::new("my-key".to_string()),
            Secret::new("my-secret".to_string()),
        );
        let params = Params::new().with("nonce", 7).with("method", "getInfo");
        let headers = signer.sign_request(&params).unwrap();

        assert_eq!(headers[0], ("Key".to_string(), "my-key".to_string()));
        assert_eq!(headers[1].0, "Sign");
        assert_eq!(headers[1].1, sign("my-secret", &params).unwrap());
    }
}

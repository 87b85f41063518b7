//! Detached CMS/PKCS#7 signing of the pass manifest.
//!
//! Credentials are three PEM artifacts (WWDR CA cert, signer cert,
//! signer private key) plus a key passphrase. Their absence on disk
//! is the documented signal to produce unsigned demo passes; it is
//! resolved once at startup, never re-probed per request.

use std::fs;
use std::path::Path;

use openssl::cms::{CMSOptions, CmsContentInfo};
use openssl::pkey::{PKey, Private};
use openssl::stack::Stack;
use openssl::x509::X509;

use crate::error::PassError;

const WWDR_FILE: &str = "wwdr.pem";
const SIGNER_CERT_FILE: &str = "signerCert.pem";
const SIGNER_KEY_FILE: &str = "signerKey.pem";

/// Parsed signing material. Construction fails on any unreadable or
/// malformed artifact; there is no partial state.
#[derive(Debug)]
pub struct SigningCredentials {
    wwdr: X509,
    signer_cert: X509,
    signer_key: PKey<Private>,
}

impl SigningCredentials {
    pub fn from_pem(
        wwdr_pem: &[u8],
        signer_cert_pem: &[u8],
        signer_key_pem: &[u8],
        passphrase: &str,
    ) -> Result<Self, PassError> {
        let wwdr = X509::from_pem(wwdr_pem)?;
        let signer_cert = X509::from_pem(signer_cert_pem)?;
        let signer_key =
            PKey::private_key_from_pem_passphrase(signer_key_pem, passphrase.as_bytes())?;
        Ok(Self {
            wwdr,
            signer_cert,
            signer_key,
        })
    }

    /// Load credentials from a certificate directory.
    ///
    /// A missing signer certificate yields `Ok(None)`, selecting the
    /// unsigned path. Once the signer cert exists, every remaining
    /// read or parse failure is an error; a half-configured directory
    /// must not silently degrade to demo output.
    pub fn load(dir: &Path, passphrase: &str) -> Result<Option<Self>, PassError> {
        let signer_cert_path = dir.join(SIGNER_CERT_FILE);
        if !signer_cert_path.exists() {
            return Ok(None);
        }

        let wwdr_pem = fs::read(dir.join(WWDR_FILE))?;
        let signer_cert_pem = fs::read(signer_cert_path)?;
        let signer_key_pem = fs::read(dir.join(SIGNER_KEY_FILE))?;
        Self::from_pem(&wwdr_pem, &signer_cert_pem, &signer_key_pem, passphrase).map(Some)
    }

    /// Detached DER-encoded CMS signature over `data` (the frozen
    /// manifest bytes), with the WWDR cert carried in the chain.
    pub fn sign_detached(&self, data: &[u8]) -> Result<Vec<u8>, PassError> {
        let mut chain = Stack::new()?;
        chain.push(self.wwdr.clone())?;

        let cms = CmsContentInfo::sign(
            Some(&self.signer_cert),
            Some(&self.signer_key),
            Some(&chain),
            Some(data),
            CMSOptions::DETACHED | CMSOptions::BINARY | CMSOptions::NOSMIMECAP,
        )?;
        Ok(cms.to_der()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::asn1::Asn1Time;
    use openssl::hash::MessageDigest;
    use openssl::rsa::Rsa;
    use openssl::x509::{X509Builder, X509NameBuilder};

    fn self_signed(cn: &str) -> (Vec<u8>, Vec<u8>) {
        let rsa = Rsa::generate(2048).unwrap();
        let key = PKey::from_rsa(rsa).unwrap();

        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_text("CN", cn).unwrap();
        let name = name.build();

        let mut builder = X509Builder::new().unwrap();
        builder.set_version(2).unwrap();
        builder.set_subject_name(&name).unwrap();
        builder.set_issuer_name(&name).unwrap();
        builder.set_pubkey(&key).unwrap();
        builder
            .set_not_before(&Asn1Time::days_from_now(0).unwrap())
            .unwrap();
        builder
            .set_not_after(&Asn1Time::days_from_now(365).unwrap())
            .unwrap();
        builder.sign(&key, MessageDigest::sha256()).unwrap();
        let cert = builder.build();

        (
            cert.to_pem().unwrap(),
            key.private_key_to_pem_pkcs8().unwrap(),
        )
    }

    fn test_credentials() -> SigningCredentials {
        let (ca_pem, _) = self_signed("test-ca");
        let (cert_pem, key_pem) = self_signed("test-signer");
        SigningCredentials::from_pem(&ca_pem, &cert_pem, &key_pem, "").unwrap()
    }

    #[test]
    fn detached_signature_verifies_against_signed_bytes() {
        let creds = test_credentials();
        let manifest = br#"{"pass.json": "da39a3ee5e6b4b0d3255bfef95601890afd80709"}"#;

        let der = creds.sign_detached(manifest).unwrap();
        assert!(!der.is_empty());

        let mut cms = CmsContentInfo::from_der(&der).unwrap();
        cms.verify(
            None,
            None,
            Some(manifest),
            None,
            CMSOptions::NOVERIFY | CMSOptions::BINARY,
        )
        .expect("signature should verify against the manifest bytes");
    }

    #[test]
    fn detached_signature_rejects_tampered_bytes() {
        let creds = test_credentials();
        let der = creds.sign_detached(b"original manifest").unwrap();

        let mut cms = CmsContentInfo::from_der(&der).unwrap();
        let result = cms.verify(
            None,
            None,
            Some(b"tampered manifest"),
            None,
            CMSOptions::NOVERIFY | CMSOptions::BINARY,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_signer_cert_means_unsigned_path() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SigningCredentials::load(dir.path(), "").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn half_configured_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (cert_pem, _) = self_signed("lonely-cert");
        fs::write(dir.path().join(SIGNER_CERT_FILE), &cert_pem).unwrap();

        let err = SigningCredentials::load(dir.path(), "").unwrap_err();
        assert!(!err.is_validation());
    }

    #[test]
    fn full_directory_loads() {
        let dir = tempfile::tempdir().unwrap();
        let (ca_pem, _) = self_signed("ca");
        let (cert_pem, key_pem) = self_signed("signer");
        fs::write(dir.path().join(WWDR_FILE), &ca_pem).unwrap();
        fs::write(dir.path().join(SIGNER_CERT_FILE), &cert_pem).unwrap();
        fs::write(dir.path().join(SIGNER_KEY_FILE), &key_pem).unwrap();

        let loaded = SigningCredentials::load(dir.path(), "").unwrap();
        assert!(loaded.is_some());
    }

    #[test]
    fn malformed_pem_is_an_error() {
        let err = SigningCredentials::from_pem(b"nonsense", b"nonsense", b"nonsense", "");
        assert!(err.is_err());
    }
}

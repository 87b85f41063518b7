use std::env;
use std::path::PathBuf;

/// Service configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Cfg {
    pub port: u16,
    pub host: String,
    /// Directory holding wwdr.pem / signerCert.pem / signerKey.pem.
    /// An absent signer cert selects the unsigned demo path.
    pub certs_dir: PathBuf,
    pub signer_key_passphrase: String,
    pub pass_type_identifier: String,
    pub team_identifier: String,
}

impl Cfg {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3002);
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let certs_dir = env::var("CERTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("certs"));
        let signer_key_passphrase = env::var("SIGNER_KEY_PASSPHRASE").unwrap_or_default();
        let pass_type_identifier = env::var("PASS_TYPE_IDENTIFIER")
            .unwrap_or_else(|_| "pass.com.example.passforge".to_string());
        let team_identifier =
            env::var("TEAM_IDENTIFIER").unwrap_or_else(|_| "XXXXXXXXXX".to_string());

        Self {
            port,
            host,
            certs_dir,
            signer_key_passphrase,
            pass_type_identifier,
            team_identifier,
        }
    }
}

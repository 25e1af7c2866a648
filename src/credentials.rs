//! Login/password resolution for the modem probe.
//!
//! Exactly one [CredentialSource] is used per run, chosen on the command line. Both read the same
//! YAML configuration file: either the credentials themselves, or how to fetch them from a Vault
//! server with the approle auth method.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::CheckError;

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"********")
            .finish()
    }
}

pub trait CredentialSource {
    fn resolve(&self) -> Result<Credentials, CheckError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CredentialStrategy {
    /// `login` and `password` are read from the configuration file
    File,
    /// The configuration file describes a Vault approle and the secret holding the credentials
    Vault,
}

pub fn source_for(strategy: CredentialStrategy, config_file: &Path) -> Box<dyn CredentialSource> {
    tracing::debug!(?strategy, config_file = %config_file.display(), "resolving credentials");

    match strategy {
        CredentialStrategy::File => Box::new(FileCredentials::new(config_file)),
        CredentialStrategy::Vault => Box::new(VaultCredentials::new(config_file)),
    }
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, CheckError> {
    let content = fs::read_to_string(path).map_err(|err| {
        CheckError::Config(format!("cannot read configuration file {}: {err}", path.display()))
    })?;

    serde_yaml::from_str(&content).map_err(|err| {
        CheckError::Config(format!("invalid configuration file {}: {err}", path.display()))
    })
}

/// Credentials stored in clear in the configuration file.
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCredentials { path: path.into() }
    }
}

impl CredentialSource for FileCredentials {
    fn resolve(&self) -> Result<Credentials, CheckError> {
        load_yaml(&self.path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VaultConfig {
    /// Base URL of the Vault server, e.g. `https://vault.example.org:8200`.
    pub server: String,
    pub role: String,
    pub secret: String,
    /// Mount point of the KV version 2 secrets engine.
    pub mountpoint: String,
    pub path: String,
}

impl VaultConfig {
    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.server.trim_end_matches('/'), path)
    }

    pub fn login_url(&self) -> String {
        self.url("auth/approle/login")
    }

    pub fn secret_url(&self) -> String {
        self.url(&format!(
            "{}/data/{}",
            self.mountpoint.trim_matches('/'),
            self.path.trim_matches('/')
        ))
    }
}

#[derive(Serialize)]
struct AppRoleLogin<'a> {
    role_id: &'a str,
    secret_id: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    auth: LoginAuth,
}

#[derive(Deserialize)]
struct LoginAuth {
    client_token: String,
}

#[derive(Deserialize)]
struct SecretResponse {
    data: SecretData,
}

#[derive(Deserialize)]
struct SecretData {
    data: Credentials,
}

pub fn parse_login_response(body: &str) -> Result<String, CheckError> {
    serde_json::from_str::<LoginResponse>(body)
        .map(|response| response.auth.client_token)
        .map_err(|err| CheckError::Auth(format!("unexpected approle login response: {err}")))
}

pub fn parse_secret_response(body: &str) -> Result<Credentials, CheckError> {
    serde_json::from_str::<SecretResponse>(body)
        .map(|response| response.data.data)
        .map_err(|err| CheckError::Config(format!("secret has no login/password: {err}")))
}

/// Credentials kept in a Vault KV version 2 secret.
pub struct VaultCredentials {
    config_file: PathBuf,
}

impl VaultCredentials {
    pub fn new(config_file: impl Into<PathBuf>) -> Self {
        VaultCredentials {
            config_file: config_file.into(),
        }
    }

    fn login(
        &self,
        client: &reqwest::blocking::Client,
        config: &VaultConfig,
    ) -> Result<String, CheckError> {
        let url = config.login_url();
        tracing::debug!(%url, "approle login");

        let response = client
            .post(&url)
            .json(&AppRoleLogin {
                role_id: &config.role,
                secret_id: &config.secret,
            })
            .send()
            .map_err(|err| CheckError::unreachable(&config.server, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Auth(format!("approle login rejected with {status}")));
        }

        let body = response
            .text()
            .map_err(|err| CheckError::unreachable(&config.server, err))?;
        parse_login_response(&body)
    }

    fn read_secret(
        &self,
        client: &reqwest::blocking::Client,
        config: &VaultConfig,
        token: &str,
    ) -> Result<Credentials, CheckError> {
        let url = config.secret_url();
        tracing::debug!(%url, "reading secret");

        let response = client
            .get(&url)
            .header("X-Vault-Token", token)
            .send()
            .map_err(|err| CheckError::unreachable(&config.server, err))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CheckError::Config(format!(
                "secret {}/{} not found",
                config.mountpoint, config.path
            )));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CheckError::Auth(format!(
                "access to secret {}/{} denied",
                config.mountpoint, config.path
            )));
        }
        if !status.is_success() {
            return Err(CheckError::unreachable(
                &config.server,
                format!("secret read failed with {status}"),
            ));
        }

        let body = response
            .text()
            .map_err(|err| CheckError::unreachable(&config.server, err))?;
        parse_secret_response(&body)
    }
}

impl CredentialSource for VaultCredentials {
    fn resolve(&self) -> Result<Credentials, CheckError> {
        let config: VaultConfig = load_yaml(&self.config_file)?;
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|err| CheckError::Config(format!("cannot create HTTP client: {err}")))?;

        let token = self.login(&client, &config)?;
        self.read_secret(&client, &config, &token)
    }
}

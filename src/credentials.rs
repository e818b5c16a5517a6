//! Flat-file store of admin credentials.
//!
//! One `username password` pair per line. Any run of whitespace separates
//! the two fields when reading; registration writes a single space.

use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::RegistrationMode;

/// Errors that can occur when reading or writing the store
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("{path}: failed to write record: {source}")]
    Write { path: PathBuf, source: csv::Error },

    #[error("username and password cannot be empty")]
    EmptyField,

    #[error("username and password cannot contain whitespace")]
    Whitespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    mode: RegistrationMode,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>, mode: RegistrationMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    /// Read every well-formed pair. A missing store holds no accounts.
    pub fn read(&self) -> Result<Vec<Credential>, CredentialError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        let mut credentials = Vec::new();
        for (idx, result) in BufReader::new(file).lines().enumerate() {
            let line = idx + 1;
            let text = result.map_err(|source| self.io_error(source))?;
            let mut fields = text.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(username), Some(password)) => {
                    credentials.push(Credential {
                        username: username.to_string(),
                        password: password.to_string(),
                    });
                }
                (None, _) => {}
                _ => warn!(line, "skipping incomplete credential record"),
            }
        }
        Ok(credentials)
    }

    /// True if some stored pair matches exactly.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        let found = self
            .read()?
            .iter()
            .any(|c| c.username == username && c.password == password);
        info!(username, found, "login attempt");
        Ok(found)
    }

    /// Store a new pair, replacing or extending the file per the registration mode.
    pub fn register(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        if username.is_empty() || password.is_empty() {
            return Err(CredentialError::EmptyField);
        }
        if username.contains(char::is_whitespace) || password.contains(char::is_whitespace) {
            return Err(CredentialError::Whitespace);
        }

        let file = match self.mode {
            RegistrationMode::Overwrite => File::create(&self.path),
            RegistrationMode::Append => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path),
        }
        .map_err(|source| self.io_error(source))?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(file);
        writer
            .serialize(Credential {
                username: username.to_string(),
                password: password.to_string(),
            })
            .map_err(|source| CredentialError::Write {
                path: self.path.clone(),
                source,
            })?;
        writer.flush().map_err(|source| self.io_error(source))?;

        info!(username, mode = ?self.mode, "admin registered");
        Ok(())
    }

    /// Write a readable copy of every pair to `dest`, returning how many were written.
    pub fn export(&self, dest: impl AsRef<Path>) -> Result<usize, CredentialError> {
        let dest = dest.as_ref();
        let credentials = self.read()?;
        let io_error = |source| CredentialError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let mut out = BufWriter::new(File::create(dest).map_err(io_error)?);
        for c in &credentials {
            writeln!(out, "Username: {}, Password: {}", c.username, c.password)
                .map_err(io_error)?;
        }
        out.flush().map_err(io_error)?;

        info!(count = credentials.len(), path = %dest.display(), "credentials exported");
        Ok(credentials.len())
    }

    fn io_error(&self, source: io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

use std::path::Path;

use ini::Ini;

use crate::error::{Result, TravelTimeError};

use super::ApiKey;

/// Sectioned INI credential file:
/// ```ini
/// [googledistancematrixapi]
/// key = AIza...
/// ```
/// A value wrapped in quotes has them stripped.
pub struct CredentialFile {
    ini: Ini,
}

impl CredentialFile {
    /// Loads the credential file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TravelTimeError::credential(format!(
                "cannot read credential file {}: {e}",
                path.display()
            ))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| TravelTimeError::credential(format!("invalid credential file: {e}")))?;
        Ok(Self { ini })
    }

    /// Returns the `key` entry of `section`.
    pub fn api_key(&self, section: &str) -> Result<ApiKey> {
        let properties = self
            .ini
            .section(Some(section))
            .ok_or_else(|| TravelTimeError::credential(format!("missing section [{section}]")))?;

        let key = properties
            .get("key")
            .ok_or_else(|| TravelTimeError::credential(format!("missing key in [{section}]")))?;

        ApiKey::new(key.trim().trim_matches(|c| c == '"' || c == '\''))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_key_from_section() {
        let file = CredentialFile::parse("[googledistancematrixapi]\nkey = \"abc123\"\n").unwrap();
        assert_eq!(file.api_key("googledistancematrixapi").unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_reads_unquoted_ini_value() {
        let file = CredentialFile::parse(
            "; local keys\n[googledistancematrixapi]\nkey = AIzaSyExampleKey123\n\n[other]\nkey = nope\n",
        )
        .unwrap();
        assert_eq!(
            file.api_key("googledistancematrixapi").unwrap().as_str(),
            "AIzaSyExampleKey123"
        );
    }

    #[test]
    fn test_missing_section() {
        let file = CredentialFile::parse("[other]\nkey = \"abc\"\n").unwrap();
        let err = file.api_key("googledistancematrixapi").unwrap_err();
        assert!(matches!(err, TravelTimeError::Credential { .. }));
    }

    #[test]
    fn test_missing_or_blank_key() {
        let file = CredentialFile::parse("[googledistancematrixapi]\nname = \"x\"\n").unwrap();
        assert!(file.api_key("googledistancematrixapi").is_err());

        let file = CredentialFile::parse("[googledistancematrixapi]\nkey = \"\"\n").unwrap();
        assert!(file.api_key("googledistancematrixapi").is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CredentialFile::load(dir.path().join("credentials.txt")).is_err());
    }
}

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub screen_name: String,
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccountsFile {
    pub accounts: Vec<AccountConfig>,
}

/// Load and validate the source accounts from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_accounts(path: &Path) -> Result<AccountsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AccountsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_accounts(&content)
}

/// Parse and validate accounts YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_accounts(content: &str) -> Result<AccountsFile, ConfigError> {
    let accounts_file: AccountsFile = serde_yaml::from_str(content)?;
    validate_accounts(&accounts_file)?;
    Ok(accounts_file)
}

fn validate_accounts(accounts_file: &AccountsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for account in &accounts_file.accounts {
        let name = account.screen_name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "account screen_name must be non-empty".to_string(),
            ));
        }

        if name.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "account screen_name '{name}' must not contain whitespace"
            )));
        }

        // Screen names are case-insensitive on the API side.
        if !seen.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate account: '{name}'"
            )));
        }
    }

    Ok(())
}

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{CfError, Result, Space};

const CF_HOME_ENV: &str = "CF_HOME";

/// The subset of the cf CLI's `config.json` needed to address apps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfConfig {
    #[serde(default)]
    target: String,
    #[serde(default)]
    organization_fields: NamedFields,
    #[serde(default)]
    space_fields: NamedFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NamedFields {
    #[serde(rename = "GUID", default)]
    guid: String,
    #[serde(default)]
    name: String,
}

impl CfConfig {
    /// Load the config the cf CLI itself uses.
    ///
    /// # Errors
    ///
    /// Returns an error if no config location can be determined, or if the
    /// file cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = config_path(
            std::env::var_os(CF_HOME_ENV).map(PathBuf::from),
            std::env::var_os("HOME").map(PathBuf::from),
        )
        .ok_or(CfError::ConfigNotFound)?;
        Self::from_path(&path)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CfError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CfError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn api_endpoint(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn organization_name(&self) -> &str {
        &self.organization_fields.name
    }

    /// # Errors
    ///
    /// Returns [`CfError::NoTargetedSpace`] if the CLI is not targeting a space.
    pub fn target_space(&self) -> Result<Space> {
        if self.space_fields.guid.is_empty() {
            return Err(CfError::NoTargetedSpace);
        }
        Ok(Space {
            guid: self.space_fields.guid.clone(),
            name: self.space_fields.name.clone(),
        })
    }
}

/// `$CF_HOME/.cf/config.json`, falling back to `$HOME/.cf/config.json`.
fn config_path(cf_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    cf_home
        .or(home)
        .map(|base| base.join(".cf").join("config.json"))
}

use crate::errors::ConfigurationError;
use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::env::var;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Settings {
    pub application: Application,
    pub database: DatabaseSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    pub host: String,
    pub port: u16,
}

impl Default for Application {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DatabaseSettings {
    #[serde_as(as = "DisplayFromStr")]
    pub db_type: DatabaseType,
    pub file_path: Option<String>,
    pub protocol: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatabaseType {
    #[default]
    InMemory,
    Relational,
}

impl Display for DatabaseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseType::InMemory => write!(f, "in_memory"),
            DatabaseType::Relational => write!(f, "relational"),
        }
    }
}

impl FromStr for DatabaseType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relational" => Ok(DatabaseType::Relational),
            "in_memory" => Ok(DatabaseType::InMemory),
            &_ => Err(ConfigurationError::UnknownDatabaseType),
        }
    }
}

impl DatabaseSettings {
    pub fn check_if_valid(&self) -> Result<(), ConfigurationError> {
        match self.db_type {
            DatabaseType::InMemory => match &self.file_path {
                None => return Err(ConfigurationError::DataFileNotFound),
                Some(path) => {
                    if !Path::new(path).is_file() {
                        return Err(ConfigurationError::DataFileNotFound);
                    }
                }
            },
            DatabaseType::Relational => {
                if self.protocol.is_none()
                    || self.host.is_none()
                    || self.name.is_none()
                    || self.port.is_none()
                    || self.user.is_none()
                    || self.password.is_none()
                {
                    return Err(ConfigurationError::MissingDatabaseSettings);
                }
            }
        }
        Ok(())
    }

    /// Only meaningful after `check_if_valid` passed for an in-memory setup.
    pub fn path_unchecked(&self) -> String {
        self.file_path.clone().unwrap_or_default()
    }

    /// Only meaningful after `check_if_valid` passed for a relational setup.
    pub fn relational_connection_unchecked(&self) -> String {
        format!(
            "{}://{}:{}@{}:{}/{}",
            self.protocol.as_deref().unwrap_or_default(),
            self.user.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
            self.host.as_deref().unwrap_or_default(),
            self.port.unwrap_or_default(),
            self.name.as_deref().unwrap_or_default(),
        )
    }
}

/// Which `configuration/<env>.yaml` overlay is layered on top of `base.yaml`,
/// read from `APP_ENVIRONMENT`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Environment {
    #[default]
    Dev,
    Prod,
}

impl Environment {
    pub fn overlay(self) -> String {
        match self {
            Environment::Dev => "configuration/dev".to_string(),
            Environment::Prod => "configuration/prod".to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(ConfigurationError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Unset means `dev`.
pub fn get_env() -> Result<Environment, ConfigurationError> {
    match var("APP_ENVIRONMENT") {
        Ok(value) => value.parse(),
        Err(_) => Ok(Environment::default()),
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let environment = get_env().map_err(|e| config::ConfigError::Message(e.to_string()))?;
    let second_source = environment.overlay();
    let settings = Config::builder()
        .add_source(config::File::new("configuration/base", FileFormat::Yaml))
        .add_source(config::File::new(&second_source, FileFormat::Yaml))
        .build()?;
    settings.try_deserialize::<Settings>()
}

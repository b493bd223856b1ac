use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

use toml::{Table, Value};

use tap::http::ClientOptions;
use tap::HttpClient;

use crate::credentials::Credentials;
use crate::error::ConfigurationError;
use crate::printer::{OutputFormat, Printer};

const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Debug)]
pub struct Config {
    pub dir: PathBuf,
    table: Table,
}

impl Config {
    pub fn load() -> Result<Self, ConfigurationError> {
        Self::load_from(config_home()?)
    }

    pub fn load_from(dir: PathBuf) -> Result<Self, ConfigurationError> {
        let table = match std::fs::read_to_string(dir.join("config.toml")) {
            Ok(content) => content.parse::<Table>()?,
            Err(_) => Table::new(),
        };

        Ok(Config { dir, table })
    }

    fn str(&self, key: &str) -> Option<&str> {
        self.table.get(key).and_then(Value::as_str)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.dir
            .join(self.str("credentials_file").unwrap_or(DEFAULT_CREDENTIALS_FILE))
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigurationError> {
        Credentials::load(&self.credentials_path())
    }

    pub fn save_credentials(&self, credentials: &Credentials) -> Result<(), ConfigurationError> {
        credentials.save(&self.credentials_path())
    }

    pub fn output(&self) -> Result<OutputFormat, ConfigurationError> {
        match self.str("output") {
            Some(output) => output.parse().map_err(|reason| ConfigurationError::Invalid {
                key: "output",
                reason,
            }),
            None => Ok(OutputFormat::default()),
        }
    }

    pub fn timeout(&self) -> Result<Duration, ConfigurationError> {
        match self.table.get("timeout") {
            Some(Value::Integer(seconds)) if *seconds > 0 => {
                Ok(Duration::from_secs(seconds.unsigned_abs()))
            }
            Some(value) => Err(ConfigurationError::Invalid {
                key: "timeout",
                reason: format!("expected a positive number of seconds, got {value}"),
            }),
            None => Ok(ClientOptions::default().timeout),
        }
    }

    pub fn client_options(&self, skip_ssl_validation: bool) -> Result<ClientOptions, ConfigurationError> {
        Ok(ClientOptions {
            skip_ssl_validation,
            timeout: self.timeout()?,
        })
    }

    /// Client authenticated with the saved credentials
    pub fn client(&self) -> anyhow::Result<HttpClient> {
        let credentials = self.credentials()?;
        let options = self.client_options(credentials.skip_ssl_validation)?;

        log::debug!(
            "Connecting to {} as {}",
            credentials.address,
            credentials.username
        );
        Ok(HttpClient::new(
            &credentials.address,
            &credentials.token_type,
            &credentials.token,
            &options,
        )?)
    }

    pub fn printer(&self) -> Result<Printer<std::io::Stdout>, ConfigurationError> {
        Ok(Printer::new(std::io::stdout(), self.output()?))
    }
}

/// Configuration read when a command first needs it
#[derive(Debug, Default)]
pub struct LazyConfig {
    config: OnceCell<Config>,
}

impl LazyConfig {
    pub fn get(&self) -> Result<&Config, ConfigurationError> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }

        let config = Config::load()?;
        Ok(self.config.get_or_init(|| config))
    }
}

fn config_home() -> Result<PathBuf, ConfigurationError> {
    let path = match std::env::var("TAP_CONFIG") {
        Ok(val) if !val.is_empty() => PathBuf::from(val),
        _ => xdg::BaseDirectories::with_prefix("tap")?.get_config_home(),
    };

    ensure_dir(&path)?;
    Ok(path)
}

fn ensure_dir(path: &Path) -> Result<(), ConfigurationError> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::prelude::{assert_eq, *};

    #[test]
    fn defaults() -> Result<()> {
        test::with_config(|config| {
            assert_eq!(OutputFormat::Table, config.output()?);
            assert_eq!(Duration::from_secs(30), config.timeout()?);
            assert_eq!(config.dir.join("credentials.json"), config.credentials_path());

            Ok(())
        })
    }

    #[test]
    fn config_file() -> Result<()> {
        test::with_config_dir(|dir| {
            dir.child("config.toml").write_str(
                "output = 'json'\ntimeout = 5\ncredentials_file = 'staging.json'\n",
            )?;
            let config = Config::load()?;

            assert_eq!(OutputFormat::Json, config.output()?);
            assert_eq!(Duration::from_secs(5), config.timeout()?);
            assert_eq!(dir.child("staging.json").path(), config.credentials_path());

            Ok(())
        })
    }

    #[test]
    fn invalid_values() -> Result<()> {
        test::with_config_dir(|dir| {
            dir.child("config.toml")
                .write_str("output = 'xml'\ntimeout = -1\n")?;
            let config = Config::load()?;

            assert!(matches!(
                config.output(),
                Err(ConfigurationError::Invalid { key: "output", .. })
            ));
            assert!(matches!(
                config.timeout(),
                Err(ConfigurationError::Invalid { key: "timeout", .. })
            ));

            Ok(())
        })
    }

    #[test]
    fn malformed_config_file() {
        test::with_config_dir(|dir| {
            dir.child("config.toml").write_str("output = ").unwrap();

            assert!(matches!(Config::load(), Err(ConfigurationError::Toml(_))));
        })
    }

    #[test]
    fn lazy_config() -> Result<()> {
        test::with_config_dir(|dir| {
            dir.child("config.toml").write_str("output = ")?;
            let config = LazyConfig::default();
            assert!(matches!(config.get(), Err(ConfigurationError::Toml(_))));

            dir.child("config.toml").write_str("output = 'json'")?;
            let first = config.get()?;
            assert_eq!(OutputFormat::Json, first.output()?);
            assert!(std::ptr::eq(first, config.get()?));

            Ok(())
        })
    }

    #[test]
    fn client_requires_login() -> Result<()> {
        test::with_config(|config| {
            let err = config.client().unwrap_err();
            assert_eq!("Please login first!", err.to_string());
            assert!(err.downcast_ref::<ConfigurationError>().is_some());

            Ok(())
        })
    }

    #[test]
    fn config_home_default() {
        temp_env::with_var("TAP_CONFIG", None::<&str>, || {
            let xdg_dirs = xdg::BaseDirectories::with_prefix("tap").unwrap();
            assert_eq!(xdg_dirs.get_config_home(), config_home().unwrap());
        });
    }

    #[test]
    fn config_home_with_var() {
        test::with_temp_dir(|dir| {
            let path = dir.child("nested").child("tap");
            temp_env::with_var("TAP_CONFIG", Some(path.path()), || {
                assert_eq!(path.path(), config_home().unwrap());
                assert!(path.path().is_dir());
            });
        });
    }
}

#![allow(unused_imports)]

use anyhow::Result;

use crate::config::Config;

pub mod prelude {
    pub use crate::test;
    pub use anyhow::Result;
    pub use assert_fs::fixture::{FileWriteStr, PathChild};
    pub use pretty_assertions::assert_eq;
}

pub fn with_temp_dir<F, R>(function: F) -> R
where
    F: FnOnce(&assert_fs::TempDir) -> R,
{
    let temp = assert_fs::TempDir::new()
        .unwrap()
        .into_persistent_if(std::env::var_os("TEST_PERSIST_FILES").is_some());
    let result = function(&temp);

    // The destructor would silence any issue, so we call close() explicitly
    temp.close().unwrap();

    result
}

pub fn with_config_dir<F, R>(function: F) -> R
where
    F: FnOnce(&assert_fs::TempDir) -> R,
{
    with_temp_dir(|temp| {
        temp_env::with_var("TAP_CONFIG", Some(temp.path().as_os_str()), || {
            function(temp)
        })
    })
}

pub fn with_config<F, R>(function: F) -> Result<R>
where
    F: FnOnce(&Config) -> Result<R>,
{
    with_config_dir(|dir| {
        let config = Config::load_from(dir.path().to_path_buf())?;
        function(&config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_config() -> Result<()> {
        super::with_config(|config| {
            assert!(config.dir.exists());
            assert!(config.credentials().is_err());

            Ok(())
        })
    }
}

use anyhow::Result;
use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;

pub mod prelude {
    pub use super::Env;
    pub use anyhow::Result;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;
    pub use predicates::str;
}

pub struct Env {
    pub conf_dir: TempDir,
}

#[allow(unused_macros)]
macro_rules! cmd {
    ($env:ident, $($tail:tt)*) => {
        raw_cmd!($env, $($tail)*).assert()
    };
}

#[allow(unused_macros)]
macro_rules! raw_cmd {
    ($env:ident, $($tail:tt)*) => {
        raw_cmd!(@args $env.command()?, $($tail)* )
    };
    (@args $cmd:expr, --$arg:tt) => {
        $cmd.arg(concat!("--", stringify!($arg)))
    };
    (@args $cmd:expr, -$arg:tt) => {
        $cmd.arg(concat!("-", stringify!($arg)))
    };
    (@args $cmd:expr, $arg:tt) => {
        $cmd.arg(stringify!($arg))
    };
    (@args $cmd:expr, --$arg:tt $($tail:tt)*) => {
        raw_cmd!(@args $cmd.arg(concat!("--", stringify!($arg))), $($tail)*)
    };
    (@args $cmd:expr, -$arg:tt $($tail:tt)*) => {
        raw_cmd!(@args $cmd.arg(concat!("-", stringify!($arg))), $($tail)*)
    };
    (@args $cmd:expr, $arg:tt $($tail:tt)*) => {
        raw_cmd!(@args $cmd.arg(stringify!($arg)), $($tail)*)
    };
}

impl Env {
    pub fn new() -> Result<Self> {
        Ok(Self {
            conf_dir: TempDir::new()?,
        })
    }

    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("tapctl")?;
        cmd.env("TAP_CONFIG", self.conf_dir.path())
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    #[allow(dead_code)]
    pub fn write(&self, name: &str, content: &str) -> Result<()> {
        self.conf_dir.child(name).write_str(content)?;
        Ok(())
    }

    /// Saves a session as `login` would
    #[allow(dead_code)]
    pub fn login(&self, address: &str) -> Result<()> {
        self.write(
            "credentials.json",
            &format!(
                r#"{{
                    "address": "{address}",
                    "username": "admin",
                    "token": "secret",
                    "type": "bearer",
                    "expires": 3600,
                    "skip-ssl-validation": false
                }}"#
            ),
        )
    }
}

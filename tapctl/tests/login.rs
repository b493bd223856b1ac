#[macro_use]
mod common;
use common::prelude::*;

#[test]
fn target_requires_login() -> Result<()> {
    let env = Env::new()?;

    cmd!(env, target)
        .code(1)
        .stderr(str::contains("Please login first!"));

    Ok(())
}

#[test]
fn target() -> Result<()> {
    let env = Env::new()?;
    env.login("https://api.example.com")?;

    cmd!(env, target)
        .success()
        .stdout(str::contains("API endpoint: https://api.example.com"))
        .stdout(str::contains("Username: admin"));

    Ok(())
}

#[test]
fn malformed_credentials() -> Result<()> {
    let env = Env::new()?;
    env.write("credentials.json", "{\"address\": ")?;

    cmd!(env, target)
        .code(1)
        .stderr(str::contains("EOF while parsing"));

    Ok(())
}

#[test]
fn login_requires_api_and_username() -> Result<()> {
    let env = Env::new()?;

    cmd!(env, login --username admin)
        .code(3)
        .stderr(str::contains("missing parameter: --api"))
        .stderr(str::contains("--api=<API> --username=<USERNAME>"));

    Ok(())
}

#[test]
fn login_password_prompt_closed() -> Result<()> {
    let env = Env::new()?;

    env.command()?
        .args(["login", "--api", "http://127.0.0.1:1", "--username", "admin"])
        .write_stdin("")
        .assert()
        .code(4)
        .stderr(str::contains("Password: "))
        .stderr(str::contains("Input closed before a value was read"));

    assert!(!env.conf_dir.path().join("credentials.json").exists());

    Ok(())
}

#[macro_use]
mod common;
use common::prelude::*;

#[test]
fn create_usage() -> Result<()> {
    let env = Env::new()?;

    cmd!(env, service create --help)
        .success()
        .stdout(str::contains(
            "--name=<NAME> --offering=<OFFERING> --plan=<PLAN> [--envs=<NAME=VALUE>]",
        ));

    Ok(())
}

#[test]
fn create_missing_plan() -> Result<()> {
    let env = Env::new()?;

    cmd!(env, svc create --name db --offering mysql)
        .code(3)
        .stderr(str::contains("missing parameter: --plan"));

    Ok(())
}

#[test]
fn requires_subcommand_flags_before_login() -> Result<()> {
    let env = Env::new()?;

    cmd!(env, service credentials)
        .code(3)
        .stderr(str::contains("missing parameter: --name"));

    cmd!(env, service credentials --name db)
        .code(1)
        .stderr(str::contains("Please login first!"));

    Ok(())
}

use anyhow::Result;

use crate::command::ParsedArgs;
use crate::config::Config;
use crate::credentials::Credentials;
use crate::utils;

/// Exchanges the user credentials for a token and saves the session
pub fn login(config: &Config, args: &ParsedArgs) -> Result<()> {
    let address = args.string("api");
    let username = args.string("username");
    let skip_ssl_validation = args.flag("skip-ssl-validation");

    let password = match args.optional_string("password") {
        Some(password) => password.to_string(),
        None => utils::prompt_password("Password")?,
    };

    let options = config.client_options(skip_ssl_validation)?;
    log::info!("Authenticating {username} against {address}");
    let token = tap::http::login(address, username, &password, &options)?;

    config.save_credentials(&Credentials {
        address: address.to_string(),
        username: username.to_string(),
        token: token.access_token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        skip_ssl_validation,
    })?;

    config.printer()?.message("Authentication succeeded")
}

/// Prints the platform and user of the saved session
pub fn target(config: &Config, _args: &ParsedArgs) -> Result<()> {
    let credentials = config.credentials()?;
    let mut out = config.printer()?;

    out.message(format!("API endpoint: {}", credentials.address))?;
    out.message(format!("Username: {}", credentials.username))
}

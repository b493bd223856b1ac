use crate::command::{FlagSpec, ParsedArgs, TapCommand};
use crate::config::LazyConfig;

pub fn login() -> TapCommand<LazyConfig> {
    TapCommand::new("login", "Authenticate against the platform API")
        .required(FlagSpec::string("api", "`API` address"))
        .required(FlagSpec::string("username,u", "`USERNAME` to log in with"))
        .optional(FlagSpec::string(
            "password,p",
            "`PASSWORD`, prompted for when not given",
        ))
        .optional(FlagSpec::bool(
            "skip-ssl-validation",
            "accept invalid TLS certificates",
        ))
        .action(|config: &LazyConfig, args: &ParsedArgs| {
            crate::login::login(config.get()?, args)
        })
}

pub fn target() -> TapCommand<LazyConfig> {
    TapCommand::new("target", "Show the API address and user of the current session")
        .action(|config: &LazyConfig, args: &ParsedArgs| {
            crate::login::target(config.get()?, args)
        })
}

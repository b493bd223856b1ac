use crate::command::TapCommand;
use crate::config::LazyConfig;

pub mod application;
pub mod invitation;
pub mod login;
pub mod offering;
pub mod service;
pub mod user;

/// Tree of every command understood by `tapctl`
pub fn tapctl() -> TapCommand<LazyConfig> {
    TapCommand::new("tapctl", "Command line client of the platform API")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(login::login())
        .subcommand(login::target())
        .subcommand(offering::command())
        .subcommand(service::command())
        .subcommand(application::command())
        .subcommand(user::command())
        .subcommand(invitation::command())
}

use crate::command::{FlagSpec, ParsedArgs, TapCommand};
use crate::config::LazyConfig;
use crate::user::{run, Command};

fn action(command: Command) -> impl Fn(&LazyConfig, &ParsedArgs) -> anyhow::Result<()> {
    move |config, args| run(config.get()?, command, args)
}

pub fn command() -> TapCommand<LazyConfig> {
    TapCommand::new("user", "Manage platform users")
        .default_subcommand("list")
        .subcommand(TapCommand::new("list", "List users").action(action(Command::List)))
        .subcommand(
            TapCommand::new("invite", "Invite a new user")
                .required(FlagSpec::string("email", "`EMAIL` to send the invitation to"))
                .action(action(Command::Invite)),
        )
        .subcommand(
            TapCommand::new("delete", "Delete a user")
                .required(FlagSpec::string("name", "user `NAME`"))
                .optional(FlagSpec::bool("yes", "skip the confirmation"))
                .action(action(Command::Delete)),
        )
        .subcommand(
            TapCommand::new("change-password", "Change the password of the current user")
                .optional(FlagSpec::string(
                    "current-password",
                    "`PASSWORD` in use, prompted for when not given",
                ))
                .optional(FlagSpec::string(
                    "new-password",
                    "`PASSWORD` to set, prompted for when not given",
                ))
                .action(action(Command::ChangePassword)),
        )
}

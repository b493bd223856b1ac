use crate::command::{FlagSpec, ParsedArgs, TapCommand};
use crate::config::LazyConfig;
use crate::invitation::{run, Command};

const EMAIL: FlagSpec = FlagSpec::string("email", "`EMAIL` the invitation was sent to");

fn action(command: Command) -> impl Fn(&LazyConfig, &ParsedArgs) -> anyhow::Result<()> {
    move |config, args| run(config.get()?, command, args)
}

pub fn command() -> TapCommand<LazyConfig> {
    TapCommand::new("invitation", "Manage pending invitations")
        .default_subcommand("list")
        .subcommand(TapCommand::new("list", "List pending invitations").action(action(Command::List)))
        .subcommand(
            TapCommand::new("resend", "Send an invitation again")
                .required(EMAIL)
                .action(action(Command::Resend)),
        )
        .subcommand(
            TapCommand::new("delete", "Cancel an invitation")
                .required(EMAIL)
                .optional(FlagSpec::bool("yes", "skip the confirmation"))
                .action(action(Command::Delete)),
        )
}

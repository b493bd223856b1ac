use crate::command::{FlagSpec, ParsedArgs, TapCommand};
use crate::config::LazyConfig;
use crate::offering::{run, Command};

const NAME: FlagSpec = FlagSpec::string("name", "offering `NAME`");
const YES: FlagSpec = FlagSpec::bool("yes", "skip the confirmation");

fn action(command: Command) -> impl Fn(&LazyConfig, &ParsedArgs) -> anyhow::Result<()> {
    move |config, args| run(config.get()?, command, args)
}

pub fn command() -> TapCommand<LazyConfig> {
    TapCommand::new("offering", "Manage the offerings of the marketplace")
        .alias("o")
        .default_subcommand("list")
        .subcommand(TapCommand::new("list", "List offerings").action(action(Command::List)))
        .subcommand(
            TapCommand::new("info", "Show an offering and its plans")
                .required(NAME)
                .action(action(Command::Info)),
        )
        .subcommand(
            TapCommand::new("delete", "Delete an offering")
                .required(NAME)
                .optional(YES)
                .action(action(Command::Delete)),
        )
}

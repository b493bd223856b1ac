use tap::prelude::Lifecycle;

use crate::command::{FlagSpec, ParsedArgs, TapCommand};
use crate::config::LazyConfig;
use crate::application::{run, Command};

const NAME: FlagSpec = FlagSpec::string("name", "application `NAME`");

fn action(command: Command) -> impl Fn(&LazyConfig, &ParsedArgs) -> anyhow::Result<()> {
    move |config, args| run(config.get()?, command, args)
}

fn named(name: &'static str, usage: &'static str, command: Command) -> TapCommand<LazyConfig> {
    TapCommand::new(name, usage)
        .required(NAME)
        .action(action(command))
}

pub fn command() -> TapCommand<LazyConfig> {
    TapCommand::new("application", "Manage applications")
        .alias("app")
        .default_subcommand("list")
        .subcommand(TapCommand::new("list", "List applications").action(action(Command::List)))
        .subcommand(named("info", "Show an application", Command::Info))
        .subcommand(
            TapCommand::new("push", "Create or update the application of the current directory")
                .optional(FlagSpec::string(
                    "archive-path,path",
                    "`PATH` of a tar.gz to upload instead of the current directory",
                ))
                .optional(FlagSpec::string(
                    "manifest",
                    "`PATH` of the manifest, manifest.json by default",
                ))
                .action(action(Command::Push)),
        )
        .subcommand(
            named("delete", "Delete an application", Command::Delete)
                .optional(FlagSpec::bool("yes", "skip the confirmation")),
        )
        .subcommand(named(
            "start",
            "Start an application",
            Command::Lifecycle(Lifecycle::Start),
        ))
        .subcommand(named(
            "stop",
            "Stop an application",
            Command::Lifecycle(Lifecycle::Stop),
        ))
        .subcommand(named(
            "restart",
            "Restart an application",
            Command::Lifecycle(Lifecycle::Restart),
        ))
        .subcommand(
            named("scale", "Change the number of replicas", Command::Scale)
                .required(FlagSpec::int("replicas", "number of `REPLICAS`")),
        )
        .subcommand(named("logs", "Show the logs of an application", Command::Logs))
        .subcommand(named(
            "bindings",
            "List the instances bound to an application",
            Command::Bindings,
        ))
        .subcommand(
            TapCommand::new("bind-instance", "Bind the instance SRC to the application DST")
                .argument("SRC")
                .argument("DST")
                .action(action(Command::Bind)),
        )
        .subcommand(
            TapCommand::new("unbind-instance", "Unbind the instance SRC from the application DST")
                .argument("SRC")
                .argument("DST")
                .action(action(Command::Unbind)),
        )
}

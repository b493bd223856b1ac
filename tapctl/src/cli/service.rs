use tap::prelude::Lifecycle;

use crate::command::{FlagSpec, ParsedArgs, TapCommand};
use crate::config::LazyConfig;
use crate::service::{run, Command};

const NAME: FlagSpec = FlagSpec::string("name", "service instance `NAME`");

fn action(command: Command) -> impl Fn(&LazyConfig, &ParsedArgs) -> anyhow::Result<()> {
    move |config, args| run(config.get()?, command, args)
}

fn named(name: &'static str, usage: &'static str, command: Command) -> TapCommand<LazyConfig> {
    TapCommand::new(name, usage)
        .required(NAME)
        .action(action(command))
}

pub fn command() -> TapCommand<LazyConfig> {
    TapCommand::new("service", "Manage service instances")
        .alias("svc")
        .default_subcommand("list")
        .subcommand(TapCommand::new("list", "List service instances").action(action(Command::List)))
        .subcommand(named("info", "Show a service instance", Command::Info))
        .subcommand(
            TapCommand::new("create", "Create a service instance from an offering plan")
                .required(NAME)
                .required(FlagSpec::string("offering", "`OFFERING` to instantiate"))
                .required(FlagSpec::string("plan", "`PLAN` of the offering"))
                .optional(FlagSpec::list(
                    "envs",
                    "environment variable as `NAME=VALUE`, may be repeated",
                ))
                .action(action(Command::Create)),
        )
        .subcommand(
            named("delete", "Delete a service instance", Command::Delete)
                .optional(FlagSpec::bool("yes", "skip the confirmation")),
        )
        .subcommand(named(
            "start",
            "Start a service instance",
            Command::Lifecycle(Lifecycle::Start),
        ))
        .subcommand(named(
            "stop",
            "Stop a service instance",
            Command::Lifecycle(Lifecycle::Stop),
        ))
        .subcommand(named(
            "restart",
            "Restart a service instance",
            Command::Lifecycle(Lifecycle::Restart),
        ))
        .subcommand(named("logs", "Show the logs of a service instance", Command::Logs))
        .subcommand(named(
            "credentials",
            "Show the credentials of a service instance",
            Command::Credentials,
        ))
        .subcommand(named(
            "bindings",
            "List the instances bound to a service instance",
            Command::Bindings,
        ))
        .subcommand(
            TapCommand::new("bind-instance", "Bind the instance SRC to the service DST")
                .argument("SRC")
                .argument("DST")
                .action(action(Command::Bind)),
        )
        .subcommand(
            TapCommand::new("unbind-instance", "Unbind the instance SRC from the service DST")
                .argument("SRC")
                .argument("DST")
                .action(action(Command::Unbind)),
        )
}

//! Declarative command descriptors
//!
//! A [`TapCommand`] lists the flags, positional arguments and subcommands of
//! a command together with the action to run. [`TapCommand::compile`] turns
//! it into a clap [`Command`] and [`TapCommand::execute`] parses an argument
//! vector, validates it and dispatches to the matched action.

use std::ffi::OsString;
use std::fmt;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;

mod args;
mod flag;

use args::ARGUMENTS;
pub use args::{CommonArgs, FlagValue, ParsedArgs};
pub use flag::{FlagKind, FlagSpec};

use crate::error::CliError;

pub const VERBOSITY: &str = "verbosity";

/// Flags accepted by every command
pub const COMMON_FLAGS: &[FlagSpec] = &[FlagSpec::string(
    "verbosity,v",
    "logging `LEVEL` (off, error, warn, info, debug, trace)",
)
.with_default("warn")];

pub type Action<C> = Box<dyn Fn(&C, &ParsedArgs) -> anyhow::Result<()>>;

pub struct TapCommand<C> {
    pub name: &'static str,
    pub usage: &'static str,
    pub aliases: Vec<&'static str>,
    pub required_flags: Vec<FlagSpec>,
    pub optional_flags: Vec<FlagSpec>,
    /// Names of the positional arguments, all of them mandatory
    pub arguments: Vec<&'static str>,
    pub subcommands: Vec<TapCommand<C>>,
    pub main_action: Option<Action<C>>,
    /// Subcommand run when none is given on the command line
    pub default_subcommand: Option<&'static str>,
    pub version: Option<&'static str>,
}

impl<C> fmt::Debug for TapCommand<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapCommand")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("required_flags", &self.required_flags)
            .field("optional_flags", &self.optional_flags)
            .field("arguments", &self.arguments)
            .field("subcommands", &self.subcommands)
            .field("main_action", &self.main_action.is_some())
            .field("default_subcommand", &self.default_subcommand)
            .finish()
    }
}

impl<C> TapCommand<C> {
    pub fn new(name: &'static str, usage: &'static str) -> Self {
        Self {
            name,
            usage,
            aliases: Vec::new(),
            required_flags: Vec::new(),
            optional_flags: Vec::new(),
            arguments: Vec::new(),
            subcommands: Vec::new(),
            main_action: None,
            default_subcommand: None,
            version: None,
        }
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    pub fn required(mut self, flag: FlagSpec) -> Self {
        self.required_flags.push(flag);
        self
    }

    pub fn optional(mut self, flag: FlagSpec) -> Self {
        self.optional_flags.push(flag);
        self
    }

    pub fn argument(mut self, name: &'static str) -> Self {
        self.arguments.push(name);
        self
    }

    pub fn subcommand(mut self, command: TapCommand<C>) -> Self {
        self.subcommands.push(command);
        self
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&C, &ParsedArgs) -> anyhow::Result<()> + 'static,
    {
        self.main_action = Some(Box::new(action));
        self
    }

    pub fn default_subcommand(mut self, name: &'static str) -> Self {
        self.default_subcommand = Some(name);
        self
    }

    pub fn version(mut self, version: &'static str) -> Self {
        self.version = Some(version);
        self
    }

    /// Every flag of the command: required, then optional, then common
    pub fn flags(&self) -> impl Iterator<Item = &FlagSpec> {
        self.required_flags
            .iter()
            .chain(&self.optional_flags)
            .chain(COMMON_FLAGS)
    }

    /// Usage line listing the flags and arguments of the command
    ///
    /// Required flags come first, then the optional ones in a single
    /// bracketed group, then the positional arguments.
    pub fn args_usage(&self) -> String {
        let mut tokens: Vec<String> = self
            .required_flags
            .iter()
            .map(FlagSpec::usage_token)
            .collect();

        if !self.optional_flags.is_empty() {
            let optional: Vec<String> = self
                .optional_flags
                .iter()
                .map(FlagSpec::usage_token)
                .collect();
            tokens.push(format!("[{}]", optional.join(" ")));
        }

        tokens.extend(self.arguments.iter().map(|name| format!("<{name}>")));
        tokens.join(" ")
    }

    pub fn compile(&self) -> Command {
        self.compile_at(None)
    }

    fn compile_at(&self, parent: Option<&str>) -> Command {
        let path = match parent {
            Some(parent) => format!("{parent} {}", self.name),
            None => self.name.to_string(),
        };

        let mut command = Command::new(self.name)
            .about(self.usage)
            .visible_aliases(self.aliases.clone())
            .args(self.flags().map(FlagSpec::to_arg));

        let args_usage = self.args_usage();
        if !args_usage.is_empty() {
            command = command.override_usage(format!("{path} {args_usage}"));
        }

        if !self.arguments.is_empty() {
            command = command.arg(
                Arg::new(ARGUMENTS)
                    .value_name("ARGS")
                    .help(self.arguments.join(" "))
                    .num_args(0..)
                    .action(ArgAction::Append),
            );
        }

        if let Some(version) = self.version {
            command = command.version(version);
        }

        command = command.subcommands(
            self.subcommands
                .iter()
                .map(|subcommand| subcommand.compile_at(Some(&path))),
        );

        if !self.subcommands.is_empty()
            && self.main_action.is_none()
            && self.default_subcommand.is_none()
        {
            command = command
                .subcommand_required(true)
                .arg_required_else_help(true);
        }

        command
    }

    /// Parses `argv` and runs the matched command
    pub fn execute<I, T>(&self, context: &C, argv: I) -> Result<(), CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = self.compile();
        let matches = command.try_get_matches_from_mut(argv)?;
        self.dispatch(context, &mut command, &matches, CommonArgs::default())
    }

    fn find(&self, name: &str) -> Option<&TapCommand<C>> {
        self.subcommands
            .iter()
            .find(|subcommand| subcommand.name == name)
    }

    fn dispatch(
        &self,
        context: &C,
        command: &mut Command,
        matches: &ArgMatches,
        inherited: CommonArgs,
    ) -> Result<(), CliError> {
        let mut args = ParsedArgs::from_matches(self.flags(), matches);
        args.common = common_args(&args, inherited)?;

        if let Some((name, sub_matches)) = matches.subcommand() {
            let (Some(child), Some(compiled)) = (self.find(name), command.find_subcommand_mut(name))
            else {
                return Err(CliError::UnknownCommand(name.to_string()));
            };
            return child.dispatch(context, compiled, sub_matches, args.common);
        }

        crate::logging::apply(args.common.verbosity);

        if let Some(flag) = self.required_flags.iter().find(|flag| !args.is_set(flag)) {
            return Err(CliError::MissingFlag {
                flag: flag.long(),
                help: command.render_help().to_string(),
            });
        }

        if !self.arguments.is_empty() && args.positionals().len() != self.arguments.len() {
            return Err(CliError::ArgumentCount {
                expected: self.arguments.len(),
                given: args.positionals().len(),
                help: command.render_help().to_string(),
            });
        }

        if let Some(action) = &self.main_action {
            log::debug!("Running {}", command.get_name());
            return action(context, &args).map_err(CliError::Action);
        }

        if let Some(name) = self.default_subcommand {
            let (Some(child), Some(compiled)) = (self.find(name), command.find_subcommand_mut(name))
            else {
                return Err(CliError::UnknownCommand(name.to_string()));
            };
            let matches = compiled.try_get_matches_from_mut([name])?;
            return child.dispatch(context, compiled, &matches, args.common);
        }

        Ok(())
    }
}

/// The common flags of a command, falling back to the parent's
fn common_args(args: &ParsedArgs, inherited: CommonArgs) -> Result<CommonArgs, CliError> {
    if !args.was_explicit(VERBOSITY) {
        return Ok(inherited);
    }

    let level = args.string(VERBOSITY);
    let verbosity = level
        .parse::<LevelFilter>()
        .map_err(|_| CliError::InvalidFlag(format!("invalid logging level: {level}")))?;

    Ok(CommonArgs { verbosity })
}

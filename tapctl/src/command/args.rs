use std::collections::BTreeMap;

use clap::{parser::ValueSource, ArgMatches};
use log::LevelFilter;

use super::flag::{FlagKind, FlagSpec};

/// Id of the clap argument collecting positional arguments
pub(super) const ARGUMENTS: &str = "arguments";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    value: Option<FlagValue>,
    /// Whether the value came from the command line rather than a default
    explicit: bool,
}

/// Flags handled for every command before its action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonArgs {
    pub verbosity: LevelFilter,
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            verbosity: LevelFilter::Warn,
        }
    }
}

/// Values of the flags and positional arguments of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    flags: BTreeMap<&'static str, Entry>,
    positionals: Vec<String>,
    pub common: CommonArgs,
}

impl ParsedArgs {
    pub fn from_matches<'a>(
        flags: impl IntoIterator<Item = &'a FlagSpec>,
        matches: &ArgMatches,
    ) -> Self {
        let mut args = Self::default();

        for flag in flags {
            let id = flag.long();
            let explicit = matches.value_source(id) == Some(ValueSource::CommandLine);
            let value = match flag.kind {
                FlagKind::String => matches.get_one::<String>(id).cloned().map(FlagValue::String),
                FlagKind::Int => matches.get_one::<i64>(id).copied().map(FlagValue::Int),
                FlagKind::Bool => matches.get_one::<bool>(id).copied().map(FlagValue::Bool),
                FlagKind::List => matches
                    .get_many::<String>(id)
                    .map(|values| FlagValue::List(values.cloned().collect())),
            };
            args.flags.insert(id, Entry { value, explicit });
        }

        if let Ok(Some(values)) = matches.try_get_many::<String>(ARGUMENTS) {
            args.positionals = values.cloned().collect();
        }

        args
    }

    /// Sets a flag as if it was given on the command line
    #[cfg(test)]
    pub fn with(mut self, name: &'static str, value: FlagValue) -> Self {
        self.flags.insert(
            name,
            Entry {
                value: Some(value),
                explicit: true,
            },
        );
        self
    }

    #[cfg(test)]
    pub fn with_string(self, name: &'static str, value: &str) -> Self {
        self.with(name, FlagValue::String(value.to_string()))
    }

    #[cfg(test)]
    pub fn with_positionals(mut self, values: &[&str]) -> Self {
        self.positionals = values.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Whether the user provided a value for `flag`
    ///
    /// Empty strings and empty lists count as missing. An int counts as set
    /// when it has any value, including a zero given explicitly or as
    /// default. A bool only counts when given on the command line.
    pub fn is_set(&self, flag: &FlagSpec) -> bool {
        let Some(entry) = self.flags.get(flag.long()) else {
            return false;
        };

        match (flag.kind, &entry.value) {
            (FlagKind::String, Some(FlagValue::String(value))) => !value.is_empty(),
            (FlagKind::Int, Some(FlagValue::Int(_))) => true,
            (FlagKind::Bool, Some(FlagValue::Bool(_))) => entry.explicit,
            (FlagKind::List, Some(FlagValue::List(values))) => !values.is_empty(),
            _ => false,
        }
    }

    pub fn was_explicit(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(|entry| entry.explicit)
    }

    fn value(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name).and_then(|entry| entry.value.as_ref())
    }

    /// Value of a string flag, empty when unset
    pub fn string(&self, name: &str) -> &str {
        self.optional_string(name).unwrap_or_default()
    }

    /// Value of a string flag, `None` when unset or empty
    pub fn optional_string(&self, name: &str) -> Option<&str> {
        match self.value(name) {
            Some(FlagValue::String(value)) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.value(name) {
            Some(FlagValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.value(name), Some(FlagValue::Bool(true)))
    }

    pub fn list(&self, name: &str) -> &[String] {
        match self.value(name) {
            Some(FlagValue::List(values)) => values,
            _ => &[],
        }
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, ArgAction, Command};
    use pretty_assertions::assert_eq;

    fn flags() -> Vec<FlagSpec> {
        vec![
            FlagSpec::string("name", "name"),
            FlagSpec::int("replicas", "replicas"),
            FlagSpec::bool("yes", "yes"),
            FlagSpec::list("envs", "envs"),
            FlagSpec::string("output", "output").with_default("table"),
        ]
    }

    fn parse(argv: &[&str]) -> ParsedArgs {
        let flags = flags();
        let command = Command::new("test")
            .args(flags.iter().map(FlagSpec::to_arg))
            .arg(Arg::new(ARGUMENTS).num_args(0..).action(ArgAction::Append));
        let matches = command.try_get_matches_from(argv).unwrap();
        ParsedArgs::from_matches(&flags, &matches)
    }

    #[test]
    fn unset() {
        let args = parse(&["test"]);
        let flags = flags();

        assert!(!args.is_set(&flags[0]));
        assert!(!args.is_set(&flags[1]));
        assert!(!args.is_set(&flags[2]));
        assert!(!args.is_set(&flags[3]));
        assert!(args.is_set(&flags[4]));
        assert!(!args.was_explicit("output"));

        assert_eq!("", args.string("name"));
        assert_eq!(None, args.int("replicas"));
        assert!(!args.flag("yes"));
        assert!(args.list("envs").is_empty());
        assert_eq!("table", args.string("output"));
        assert!(args.positionals().is_empty());
    }

    #[test]
    fn set() {
        let args = parse(&[
            "test",
            "--name=web",
            "--replicas",
            "0",
            "--yes",
            "--envs=A=1",
            "--envs",
            "B=2",
            "src",
            "dst",
        ]);
        let flags = flags();

        assert!(flags[..4].iter().all(|flag| args.is_set(flag)));
        assert_eq!("web", args.string("name"));
        assert_eq!(Some(0), args.int("replicas"));
        assert!(args.flag("yes"));
        assert_eq!(&["A=1".to_string(), "B=2".to_string()], args.list("envs"));
        assert_eq!(Some("dst"), args.positional(1));
    }

    #[test]
    fn empty_string_is_unset() {
        let args = parse(&["test", "--name="]);

        assert!(!args.is_set(&flags()[0]));
        assert!(args.was_explicit("name"));
        assert_eq!(None, args.optional_string("name"));
    }

    #[test]
    fn builder() {
        let args = ParsedArgs::default()
            .with_string("name", "db")
            .with("yes", FlagValue::Bool(true))
            .with_positionals(&["a", "b"]);

        assert_eq!("db", args.string("name"));
        assert!(args.flag("yes"));
        assert!(args.is_set(&FlagSpec::bool("yes", "")));
        assert_eq!(&["a".to_string(), "b".to_string()], args.positionals());
    }
}

use clap::{Arg, ArgAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    String,
    Int,
    Bool,
    List,
}

/// Declaration of a `--flag`
///
/// The name may carry an alias after a comma: a single letter becomes the
/// short form (`"verbosity,v"` gives `-v`), anything longer a second long
/// form. The usage text may quote the value placeholder between backticks,
/// as in ``"application `NAME`"``.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub kind: FlagKind,
    pub usage: &'static str,
    pub default: Option<&'static str>,
}

impl FlagSpec {
    pub const fn new(name: &'static str, kind: FlagKind, usage: &'static str) -> Self {
        Self {
            name,
            kind,
            usage,
            default: None,
        }
    }

    pub const fn string(name: &'static str, usage: &'static str) -> Self {
        Self::new(name, FlagKind::String, usage)
    }

    pub const fn int(name: &'static str, usage: &'static str) -> Self {
        Self::new(name, FlagKind::Int, usage)
    }

    pub const fn bool(name: &'static str, usage: &'static str) -> Self {
        Self::new(name, FlagKind::Bool, usage)
    }

    pub const fn list(name: &'static str, usage: &'static str) -> Self {
        Self::new(name, FlagKind::List, usage)
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Primary long name, also the key of the parsed value
    pub fn long(&self) -> &'static str {
        match self.name.split_once(',') {
            Some((long, _)) => long.trim(),
            None => self.name,
        }
    }

    fn alias(&self) -> Option<&'static str> {
        self.name
            .split_once(',')
            .map(|(_, alias)| alias.trim())
            .filter(|alias| !alias.is_empty())
    }

    pub fn placeholder(&self) -> &'static str {
        let mut parts = self.usage.splitn(3, '`');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(placeholder), Some(_)) => placeholder,
            _ => "value",
        }
    }

    /// Usage text with the placeholder quotes removed
    pub fn help(&self) -> String {
        self.usage.replacen('`', "", 2)
    }

    /// `--name=<placeholder>`, as shown in a command usage line
    pub fn usage_token(&self) -> String {
        format!("--{}=<{}>", self.long(), self.placeholder())
    }

    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.long()).long(self.long()).help(self.help());

        if let Some(alias) = self.alias() {
            let mut chars = alias.chars();
            arg = match (chars.next(), chars.next()) {
                (Some(short), None) => arg.short(short),
                _ => arg.visible_alias(alias),
            };
        }

        arg = match self.kind {
            FlagKind::String => arg
                .value_name(self.placeholder())
                .action(ArgAction::Set),
            FlagKind::Int => arg
                .value_name(self.placeholder())
                .action(ArgAction::Set)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64)),
            FlagKind::Bool => arg
                .value_name(self.placeholder())
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .default_value("false")
                .value_parser(clap::value_parser!(bool)),
            FlagKind::List => arg
                .value_name(self.placeholder())
                .action(ArgAction::Append),
        };

        if let Some(default) = self.default {
            arg = arg.default_value(default);
        }

        arg
    }
}

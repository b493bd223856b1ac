use derive_more::{Display, Error, From};

/// Outcome of a failed invocation, mapped to the process exit code
#[derive(Debug, Display, Error, From)]
pub enum CliError {
    #[display("missing parameter: --{flag}")]
    MissingFlag {
        flag: &'static str,
        help: String,
    },
    #[display("expected {expected} arguments, got {given}")]
    ArgumentCount {
        expected: usize,
        given: usize,
        help: String,
    },
    #[display("{_0}")]
    InvalidFlag(#[error(not(source))] String),
    #[display("unknown command {_0}")]
    UnknownCommand(#[error(not(source))] String),
    #[display("{_0}")]
    #[from]
    Clap(clap::Error),
    #[display("{_0}")]
    Action(#[error(not(source))] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::MissingFlag { .. } => 3,
            CliError::Clap(e) => u8::try_from(e.exit_code()).unwrap_or(1),
            CliError::Action(e) if e.downcast_ref::<PromptError>().is_some() => 4,
            _ => 1,
        }
    }

    /// Prints the error, with the command help where relevant
    pub fn report(&self) {
        match self {
            CliError::Clap(e) => {
                let _ = e.print();
            }
            CliError::MissingFlag { help, .. } | CliError::ArgumentCount { help, .. } => {
                eprintln!("{self}\n\n{help}");
            }
            CliError::Action(e) => eprintln!("Error: {e:#}"),
            _ => eprintln!("Error: {self}"),
        }
    }
}

#[derive(Debug, Display, Error, From)]
pub enum ConfigurationError {
    #[display("Please login first!")]
    NotLoggedIn,
    #[display("Malformed credentials file")]
    #[from]
    Malformed(serde_json::Error),
    #[display("I/O error")]
    #[from]
    Io(std::io::Error),
    #[display("Failed to locate the configuration directory")]
    #[from]
    Xdg(xdg::BaseDirectoriesError),
    #[display("Invalid configuration file")]
    #[from]
    Toml(toml::de::Error),
    #[display("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Display, Error, From)]
pub enum PromptError {
    #[display("Input closed before a value was read")]
    Closed,
    #[display("Failed to read input")]
    #[from]
    Io(std::io::Error),
}

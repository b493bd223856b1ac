use std::process::ExitCode;

mod archive;
mod cli;
mod command;
mod config;
mod credentials;
mod error;
mod instance;
mod logging;
mod printer;
mod utils;

mod application;
mod invitation;
mod login;
mod offering;
mod service;
mod user;

#[cfg(test)]
pub mod test;

use config::LazyConfig;

fn main() -> ExitCode {
    let config = LazyConfig::default();

    match cli::tapctl().execute(&config, std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            ExitCode::from(e.exit_code())
        }
    }
}

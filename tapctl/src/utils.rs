use std::io::{BufRead, IsTerminal, Write};

use anyhow::Result;
use console::Term;

use crate::error::PromptError;

pub fn confirm_with<R: BufRead, W: Write>(mut input: R, mut output: W, question: &str) -> Result<bool> {
    write!(output, "{question} [yes/no]: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim(), "yes" | "y"))
}

pub fn confirm(question: &str) -> Result<bool> {
    confirm_with(std::io::stdin().lock(), std::io::stdout(), question)
}

pub fn prompt_with<R: BufRead, W: Write>(mut input: R, mut output: W, label: &str) -> Result<String, PromptError> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut value = String::new();
    if input.read_line(&mut value)? == 0 {
        return Err(PromptError::Closed);
    }

    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads a password without echoing it, or a plain line when stdin is piped
pub fn prompt_password(label: &str) -> Result<String, PromptError> {
    let term = Term::stderr();
    if !std::io::stdin().is_terminal() || !term.is_term() {
        return prompt_with(std::io::stdin().lock(), std::io::stderr(), label);
    }

    term.write_str(&format!("{label}: "))?;
    Ok(term.read_secure_line()?)
}

use std::io::Write;

use anyhow::Result;

use tap::prelude::*;
use tap::resolve::get_user_id;

use crate::command::ParsedArgs;
use crate::config::Config;
use crate::error::PromptError;
use crate::printer::Printer;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Invite,
    Delete,
    ChangePassword,
}

struct CommandContext<'a, A: ?Sized, W: Write> {
    api: &'a A,
    out: &'a mut Printer<W>,
    confirm: fn(&str) -> Result<bool>,
    prompt: fn(&str) -> Result<String, PromptError>,
}

pub fn run(config: &Config, command: Command, args: &ParsedArgs) -> Result<()> {
    let api = config.client()?;
    let out = &mut config.printer()?;

    CommandContext {
        api: &api,
        out,
        confirm: utils::confirm,
        prompt: utils::prompt_password,
    }
    .run(command, args)
}

impl<A: Api + ?Sized, W: Write> CommandContext<'_, A, W> {
    fn run(&mut self, command: Command, args: &ParsedArgs) -> Result<()> {
        match command {
            Command::List => self.list(),
            Command::Invite => self.invite(args.string("email")),
            Command::Delete => self.delete(args.string("name"), args.flag("yes")),
            Command::ChangePassword => self.change_password(args),
        }
    }

    fn list(&mut self) -> Result<()> {
        let users = self.api.users()?;
        self.out.list(&users)
    }

    fn invite(&mut self, email: &str) -> Result<()> {
        let invitation = self.api.invite(email)?;
        self.out
            .message(format!("User {} successfully invited", invitation.email))
    }

    fn delete(&mut self, name: &str, confirmed: bool) -> Result<()> {
        let guid = get_user_id(self.api, name)?;

        if !confirmed && !(self.confirm)(&format!("Delete user {name}?"))? {
            anyhow::bail!("operation requires confirmation");
        }

        self.api.delete_user(&guid)?;
        self.out.message(format!("User {name} deleted"))
    }

    fn change_password(&mut self, args: &ParsedArgs) -> Result<()> {
        let current_password = match args.optional_string("current-password") {
            Some(password) => password.to_string(),
            None => (self.prompt)("Current password")?,
        };
        let new_password = match args.optional_string("new-password") {
            Some(password) => password.to_string(),
            None => (self.prompt)("New password")?,
        };

        self.api.change_password(&PasswordChange {
            current_password,
            new_password,
        })?;
        self.out.message("Password changed")
    }
}

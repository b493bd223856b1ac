use std::io::Write;

use anyhow::Result;

use tap::prelude::*;
use tap::resolve::get_invitation;

use crate::command::ParsedArgs;
use crate::config::Config;
use crate::printer::Printer;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Resend,
    Delete,
}

struct CommandContext<'a, A: ?Sized, W: Write> {
    api: &'a A,
    out: &'a mut Printer<W>,
    confirm: fn(&str) -> Result<bool>,
}

pub fn run(config: &Config, command: Command, args: &ParsedArgs) -> Result<()> {
    let api = config.client()?;
    let out = &mut config.printer()?;

    CommandContext {
        api: &api,
        out,
        confirm: utils::confirm,
    }
    .run(command, args)
}

impl<A: Api + ?Sized, W: Write> CommandContext<'_, A, W> {
    fn run(&mut self, command: Command, args: &ParsedArgs) -> Result<()> {
        let email = args.string("email");

        match command {
            Command::List => self.list(),
            Command::Resend => self.resend(email),
            Command::Delete => self.delete(email, args.flag("yes")),
        }
    }

    fn list(&mut self) -> Result<()> {
        let invitations = self.api.invitations()?;
        self.out.list(&invitations)
    }

    fn resend(&mut self, email: &str) -> Result<()> {
        let invitation = get_invitation(self.api, email)?;
        self.api.resend_invitation(&invitation.email)?;
        self.out.message(format!("Invitation for {email} resent"))
    }

    fn delete(&mut self, email: &str, confirmed: bool) -> Result<()> {
        let invitation = get_invitation(self.api, email)?;

        if !confirmed && !(self.confirm)(&format!("Delete invitation for {email}?"))? {
            anyhow::bail!("operation requires confirmation");
        }

        self.api.delete_invitation(&invitation.email)?;
        self.out.message(format!("Invitation for {email} deleted"))
    }
}

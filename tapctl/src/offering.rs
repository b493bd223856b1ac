use std::io::Write;

use anyhow::Result;

use tap::prelude::*;
use tap::resolve::get_offering_id;

use crate::command::ParsedArgs;
use crate::config::Config;
use crate::printer::Printer;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Info,
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
        match command {
            Command::List => self.list(),
            Command::Info => self.info(args.string("name")),
            Command::Delete => self.delete(args.string("name"), args.flag("yes")),
        }
    }

    fn list(&mut self) -> Result<()> {
        let offerings = self.api.offerings()?;
        self.out.list(&offerings)
    }

    fn info(&mut self, name: &str) -> Result<()> {
        let offering = self
            .api
            .offerings()?
            .into_iter()
            .find(|offering| offering.name == name)
            .ok_or_else(|| Error::OfferingNotFound(name.to_string()))?;

        self.out.json(&offering)
    }

    fn delete(&mut self, name: &str, confirmed: bool) -> Result<()> {
        let id = get_offering_id(self.api, name)?;

        if !confirmed && !(self.confirm)(&format!("Delete offering {name}?"))? {
            anyhow::bail!("operation requires confirmation");
        }

        self.api.delete_offering(&id)?;
        self.out.message(format!("Offering {name} deleted"))
    }
}

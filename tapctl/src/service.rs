use std::io::Write;

use anyhow::Result;

use tap::prelude::*;
use tap::resolve::{fetch_service_and_plan_id, get_service_id};

use crate::command::ParsedArgs;
use crate::config::Config;
use crate::instance;
use crate::printer::Printer;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Info,
    Create,
    Delete,
    Lifecycle(Lifecycle),
    Logs,
    Credentials,
    Bindings,
    Bind,
    Unbind,
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
        let name = args.string("name");

        match command {
            Command::List => self.list(),
            Command::Info => self.info(name),
            Command::Create => self.create(args),
            Command::Delete => self.delete(name, args.flag("yes")),
            Command::Lifecycle(action) => {
                instance::lifecycle(self.api, self.out, InstanceType::Service, name, action)
            }
            Command::Logs => instance::logs(self.api, self.out, InstanceType::Service, name),
            Command::Credentials => self.credentials(name),
            Command::Bindings => instance::bindings(self.api, self.out, InstanceType::Service, name),
            Command::Bind => instance::bind(self.api, self.out, InstanceType::Service, args, false),
            Command::Unbind => instance::bind(self.api, self.out, InstanceType::Service, args, true),
        }
    }

    fn list(&mut self) -> Result<()> {
        let services = self.api.services()?;
        self.out.list(&services)
    }

    fn info(&mut self, name: &str) -> Result<()> {
        let id = get_service_id(self.api, name)?;
        let service = self.api.service(&id)?;
        self.out.json(&service)
    }

    fn create(&mut self, args: &ParsedArgs) -> Result<()> {
        let envs = args
            .list("envs")
            .iter()
            .map(|env| env.parse::<EnvVar>())
            .collect::<tap::Result<Vec<_>>>()?;

        let (offering_id, plan_id) =
            fetch_service_and_plan_id(self.api, args.string("offering"), args.string("plan"))?;

        let service = self.api.create_service(&NewService {
            name: args.string("name").to_string(),
            offering_id,
            plan_id,
            envs,
        })?;

        log::info!("Service {} created with id {}", service.name, service.id);
        self.out
            .message(format!("Service {} created", service.name))
    }

    fn delete(&mut self, name: &str, confirmed: bool) -> Result<()> {
        let id = get_service_id(self.api, name)?;

        if !confirmed && !(self.confirm)(&format!("Delete service {name}?"))? {
            anyhow::bail!("operation requires confirmation");
        }

        self.api.delete_service(&id)?;
        self.out.message(format!("Service {name} deleted"))
    }

    fn credentials(&mut self, name: &str) -> Result<()> {
        let id = get_service_id(self.api, name)?;
        let credentials = self.api.service_credentials(&id)?;
        self.out.json(&credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FlagValue;
    use crate::printer::OutputFormat;
    use pretty_assertions::assert_eq;
    use tap::mock::MockApi;

    fn run_with(api: &MockApi, command: Command, args: &ParsedArgs) -> Result<String> {
        let mut out = Printer::buffer(OutputFormat::Table);
        CommandContext {
            api,
            out: &mut out,
            confirm: |_| Ok(false),
        }
        .run(command, args)?;
        Ok(out.output())
    }

    fn name(name: &str) -> ParsedArgs {
        ParsedArgs::default().with_string("name", name)
    }

    fn create_args(offering: &str, plan: &str) -> ParsedArgs {
        name("db")
            .with_string("offering", offering)
            .with_string("plan", plan)
    }

    #[test]
    fn create() -> Result<()> {
        let api = MockApi::default().with_offering("mysql", &["free", "standard"]);
        let offering = api.offerings()?[0].clone();

        let args = create_args("mysql", "standard").with(
            "envs",
            FlagValue::List(vec!["USER=admin".to_string(), "URL=a=b".to_string()]),
        );
        let output = run_with(&api, Command::Create, &args)?;

        assert_eq!("Service db created\n", output);
        assert_eq!(
            vec![format!(
                "create_service db {} {} USER=admin URL=a=b",
                offering.id, offering.plans[1].id
            )],
            api.calls()
        );

        Ok(())
    }

    #[test]
    fn create_unknown_plan() {
        let api = MockApi::default().with_offering("mysql", &["free"]);

        let err = run_with(&api, Command::Create, &create_args("mysql", "gold")).unwrap_err();
        assert_eq!("Plan gold not found for offering mysql", err.to_string());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn create_invalid_env() {
        let api = MockApi::default().with_offering("mysql", &["free"]);
        let args = create_args("mysql", "free").with("envs", FlagValue::List(vec!["URL".to_string()]));

        let err = run_with(&api, Command::Create, &args).unwrap_err();
        assert!(err.to_string().contains("NAME=VALUE"));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn credentials_and_info() -> Result<()> {
        let api = MockApi::default().with_service_id("s1", "db");

        let output = run_with(&api, Command::Credentials, &name("db"))?;
        let credentials: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!("db.local", credentials["hostname"]);

        let output = run_with(&api, Command::Info, &name("db"))?;
        let info: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!("s1", info["id"]);

        let err = run_with(&api, Command::Info, &name("cache")).unwrap_err();
        assert_eq!("Service instance cache not found", err.to_string());

        Ok(())
    }

    #[test]
    fn delete() -> Result<()> {
        let api = MockApi::default().with_service_id("s1", "db");

        assert!(run_with(&api, Command::Delete, &name("db")).is_err());
        assert!(api.calls().is_empty());

        run_with(
            &api,
            Command::Delete,
            &name("db").with("yes", FlagValue::Bool(true)),
        )?;
        assert_eq!(vec!["delete_service s1"], api.calls());

        Ok(())
    }

    #[test]
    fn bind_to_service() -> Result<()> {
        let api = MockApi::default()
            .with_application_id("a1", "web")
            .with_service_id("s1", "db")
            .with_service_id("s2", "cache");

        run_with(
            &api,
            Command::Bind,
            &ParsedArgs::default().with_positionals(&["cache", "db"]),
        )?;
        assert_eq!(vec!["bind service s1 <- service s2"], api.calls());

        let output = run_with(&api, Command::Bindings, &name("db"))?;
        assert!(output.contains("cache"));

        Ok(())
    }
}

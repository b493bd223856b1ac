use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tap::prelude::*;
use tap::resolve::get_application_id;

use crate::archive::pack_dir;
use crate::command::ParsedArgs;
use crate::config::Config;
use crate::instance;
use crate::printer::Printer;
use crate::utils;

const DEFAULT_MANIFEST: &str = "manifest.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Info,
    Push,
    Delete,
    Lifecycle(Lifecycle),
    Scale,
    Logs,
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
            Command::Push => self.push(args),
            Command::Delete => self.delete(name, args.flag("yes")),
            Command::Lifecycle(action) => {
                instance::lifecycle(self.api, self.out, InstanceType::Application, name, action)
            }
            Command::Scale => self.scale(name, args),
            Command::Logs => instance::logs(self.api, self.out, InstanceType::Application, name),
            Command::Bindings => {
                instance::bindings(self.api, self.out, InstanceType::Application, name)
            }
            Command::Bind => instance::bind(self.api, self.out, InstanceType::Application, args, false),
            Command::Unbind => instance::bind(self.api, self.out, InstanceType::Application, args, true),
        }
    }

    fn list(&mut self) -> Result<()> {
        let applications = self.api.applications()?;
        self.out.list(&applications)
    }

    fn info(&mut self, name: &str) -> Result<()> {
        let id = get_application_id(self.api, name)?;
        let application = self.api.application(&id)?;
        self.out.json(&application)
    }

    fn push(&mut self, args: &ParsedArgs) -> Result<()> {
        let manifest_path = args
            .optional_string("manifest")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));
        let manifest = read_manifest(&manifest_path)?;

        let blob = match args.optional_string("archive-path") {
            Some(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read archive {path}"))?,
            None => pack_dir(&std::env::current_dir()?)?,
        };

        match get_application_id(self.api, &manifest.name) {
            Ok(id) => {
                log::info!("Application {} exists, replacing its blob", manifest.name);
                self.api.update_application_blob(&id, blob)?;
                self.out
                    .message(format!("Application {} updated", manifest.name))
            }
            Err(e) if e.is_not_found() => {
                let application = self.api.create_application(&manifest, blob)?;
                self.out
                    .message(format!("Application {} created", application.name))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&mut self, name: &str, confirmed: bool) -> Result<()> {
        let id = get_application_id(self.api, name)?;

        if !confirmed && !(self.confirm)(&format!("Delete application {name}?"))? {
            anyhow::bail!("operation requires confirmation");
        }

        self.api.delete_application(&id)?;
        self.out.message(format!("Application {name} deleted"))
    }

    fn scale(&mut self, name: &str, args: &ParsedArgs) -> Result<()> {
        let replicas = args.int("replicas").unwrap_or_default();
        let replicas = u32::try_from(replicas)
            .map_err(|_| anyhow::anyhow!("replicas must not be negative, got {replicas}"))?;

        let id = get_application_id(self.api, name)?;
        self.api.scale_application(&id, replicas)?;
        self.out
            .message(format!("Application {name} scaled to {replicas} replicas"))
    }
}

fn read_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid manifest {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::OutputFormat;
    use crate::test::prelude::{assert_eq, *};
    use tap::mock::{Collection, MockApi};

    fn refuse(_: &str) -> Result<bool> {
        Ok(false)
    }

    fn accept(_: &str) -> Result<bool> {
        Ok(true)
    }

    fn run_with(api: &MockApi, command: Command, args: &ParsedArgs) -> Result<String> {
        run_confirming(api, command, args, refuse)
    }

    fn run_confirming(
        api: &MockApi,
        command: Command,
        args: &ParsedArgs,
        confirm: fn(&str) -> Result<bool>,
    ) -> Result<String> {
        let mut out = Printer::buffer(OutputFormat::Table);
        CommandContext {
            api,
            out: &mut out,
            confirm,
        }
        .run(command, args)?;
        Ok(out.output())
    }

    fn name(name: &str) -> ParsedArgs {
        ParsedArgs::default().with_string("name", name)
    }

    #[test]
    fn list_and_info() -> Result<()> {
        let api = MockApi::default()
            .with_application_id("a1", "web")
            .with_application_id("a2", "worker");

        let output = run_with(&api, Command::List, &ParsedArgs::default())?;
        assert!(output.contains("web"));
        assert!(output.contains("worker"));

        let output = run_with(&api, Command::Info, &name("worker"))?;
        let info: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!("a2", info["id"]);

        let err = run_with(&api, Command::Info, &name("api")).unwrap_err();
        assert_eq!("Application api not found", err.to_string());

        Ok(())
    }

    #[test]
    fn push_creates_then_updates() -> Result<()> {
        test::with_temp_dir(|dir| {
            dir.child("manifest.json")
                .write_str(r#"{"name": "web", "type": "JAVA", "instances": 2}"#)?;
            dir.child("app.tar.gz").write_str("blob")?;

            let args = ParsedArgs::default()
                .with_string("manifest", &dir.child("manifest.json").path().display().to_string())
                .with_string("archive-path", &dir.child("app.tar.gz").path().display().to_string());

            let api = MockApi::default();
            let output = run_with(&api, Command::Push, &args)?;
            assert_eq!("Application web created\n", output);

            let output = run_with(&api, Command::Push, &args)?;
            assert_eq!("Application web updated\n", output);

            let id = api.applications()?[0].id.clone();
            assert_eq!(
                vec![
                    "create_application web (4 bytes)".to_string(),
                    format!("update_application_blob {id} (4 bytes)"),
                ],
                api.calls()
            );

            Ok(())
        })
    }

    #[test]
    fn push_without_manifest() {
        test::with_temp_dir(|dir| {
            let args = ParsedArgs::default()
                .with_string("manifest", &dir.child("missing.json").path().display().to_string());

            let err = run_with(&MockApi::default(), Command::Push, &args).unwrap_err();
            assert!(err.to_string().contains("Failed to read manifest"));
        })
    }

    #[test]
    fn push_list_error() -> Result<()> {
        test::with_temp_dir(|dir| {
            dir.child("manifest.json").write_str(r#"{"name": "web", "type": "JAVA"}"#)?;
            dir.child("app.tar.gz").write_str("blob")?;
            let args = ParsedArgs::default()
                .with_string("manifest", &dir.child("manifest.json").path().display().to_string())
                .with_string("archive-path", &dir.child("app.tar.gz").path().display().to_string());

            let api = MockApi::default().failing(Collection::Applications);
            assert!(run_with(&api, Command::Push, &args).is_err());
            assert!(api.calls().is_empty());

            Ok(())
        })
    }

    #[test]
    fn delete_requires_confirmation() -> Result<()> {
        let api = MockApi::default().with_application_id("a1", "web");

        let err = run_with(&api, Command::Delete, &name("web")).unwrap_err();
        assert_eq!("operation requires confirmation", err.to_string());
        assert!(api.calls().is_empty());

        run_confirming(&api, Command::Delete, &name("web"), accept)?;
        assert_eq!(vec!["delete_application a1"], api.calls());

        Ok(())
    }

    #[test]
    fn delete_with_yes() -> Result<()> {
        let api = MockApi::default().with_application_id("a1", "web");
        let args = name("web").with("yes", crate::command::FlagValue::Bool(true));

        let output = run_with(&api, Command::Delete, &args)?;
        assert_eq!("Application web deleted\n", output);
        assert!(api.applications()?.is_empty());

        Ok(())
    }

    #[test]
    fn scale() -> Result<()> {
        use crate::command::FlagValue;

        let api = MockApi::default().with_application_id("a1", "web");

        run_with(&api, Command::Scale, &name("web").with("replicas", FlagValue::Int(0)))?;
        assert_eq!(vec!["scale_application a1 0"], api.calls());

        let err = run_with(&api, Command::Scale, &name("web").with("replicas", FlagValue::Int(-2)))
            .unwrap_err();
        assert!(err.to_string().contains("negative"));

        Ok(())
    }

    #[test]
    fn lifecycle() -> Result<()> {
        let api = MockApi::default()
            .with_application_id("a1", "web")
            .with_service_id("s1", "web");

        run_with(&api, Command::Lifecycle(Lifecycle::Stop), &name("web"))?;
        assert_eq!(vec!["stop application a1"], api.calls());

        Ok(())
    }
}

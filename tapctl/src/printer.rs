use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use serde::Serialize;
use tabled::builder::Builder as TableBuilder;

use tap::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format {other:?}, expected table or json")),
        }
    }
}

/// Row representation of a listed entity
pub trait Columns {
    fn headers() -> Vec<&'static str>;
    fn columns(&self) -> Vec<String>;
}

impl Columns for Application {
    fn headers() -> Vec<&'static str> {
        vec!["name", "image state", "state", "replication", "urls"]
    }

    fn columns(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.image_state.clone(),
            self.state.clone(),
            self.replication.to_string(),
            self.urls.join(", "),
        ]
    }
}

impl Columns for Service {
    fn headers() -> Vec<&'static str> {
        vec!["name", "offering", "plan", "state"]
    }

    fn columns(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.offering_name.clone(),
            self.plan_name.clone(),
            self.state.clone(),
        ]
    }
}

impl Columns for Offering {
    fn headers() -> Vec<&'static str> {
        vec!["name", "plans", "description", "state"]
    }

    fn columns(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.plan_names().join(", "),
            self.description.clone(),
            self.state.clone(),
        ]
    }
}

impl Columns for User {
    fn headers() -> Vec<&'static str> {
        vec!["username", "role"]
    }

    fn columns(&self) -> Vec<String> {
        vec![self.username.clone(), self.role.clone()]
    }
}

impl Columns for Invitation {
    fn headers() -> Vec<&'static str> {
        vec!["email"]
    }

    fn columns(&self) -> Vec<String> {
        vec![self.email.clone()]
    }
}

impl Columns for Binding {
    fn headers() -> Vec<&'static str> {
        vec!["name", "type"]
    }

    fn columns(&self) -> Vec<String> {
        vec![self.entity_name.clone(), self.entity_type.to_string()]
    }
}

pub struct Printer<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn list<T: Columns + Serialize>(&mut self, items: &[T]) -> Result<()> {
        if self.format == OutputFormat::Json {
            return self.json(items);
        }

        let mut builder = TableBuilder::new();
        builder.push_record(T::headers());
        for item in items {
            builder.push_record(item.columns());
        }

        writeln!(self.out, "{}", builder.build())?;
        Ok(())
    }

    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    pub fn message(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }
}

#[cfg(test)]
impl Printer<Vec<u8>> {
    pub fn buffer(format: OutputFormat) -> Self {
        Self::new(Vec::new(), format)
    }

    pub fn output(self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn services() -> Vec<Service> {
        vec![Service {
            id: "s1".to_string(),
            name: "db".to_string(),
            offering_name: "mysql".to_string(),
            plan_name: "free".to_string(),
            state: "RUNNING".to_string(),
        }]
    }

    #[test]
    fn output_format() {
        assert_eq!(Ok(OutputFormat::Json), "json".parse());
        assert_eq!(Ok(OutputFormat::Table), "table".parse());
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn table() -> Result<()> {
        let mut printer = Printer::buffer(OutputFormat::Table);
        printer.list(&services())?;
        let output = printer.output();

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].contains("name"));
        assert!(lines[1].contains("offering"));
        assert!(lines[3].contains("db"));
        assert!(lines[3].contains("RUNNING"));

        Ok(())
    }

    #[test]
    fn json() -> Result<()> {
        let mut printer = Printer::buffer(OutputFormat::Json);
        printer.list(&services())?;

        let value: serde_json::Value = serde_json::from_str(&printer.output())?;
        assert_eq!("db", value[0]["name"]);

        Ok(())
    }
}

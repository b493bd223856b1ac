use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub offering_name: String,
    #[serde(default)]
    pub plan_name: String,
    #[serde(default)]
    pub state: String,
}

/// Request body of a service creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewService {
    pub name: String,
    pub offering_id: String,
    pub plan_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl FromStr for EnvVar {
    type Err = Error;

    /// Parses `NAME=VALUE`, the value may itself contain `=`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok(EnvVar {
                name: name.to_string(),
                value: value.to_string(),
            }),
            _ => Err(Error::Invalid(format!(
                "environment variable must be NAME=VALUE, got {s:?}"
            ))),
        }
    }
}

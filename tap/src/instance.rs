use serde::{Deserialize, Serialize};

/// Kind of a provisioned instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceType {
    #[display("application")]
    Application,
    #[display("service")]
    Service,
}

impl InstanceType {
    /// Path segment of the collection holding instances of this type
    pub fn collection(&self) -> &'static str {
        match self {
            InstanceType::Application => "applications",
            InstanceType::Service => "services",
        }
    }
}

/// Restricts which instance types a name lookup considers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    Application,
    Service,
    Both,
}

impl TypeHint {
    pub fn includes(&self, instance_type: InstanceType) -> bool {
        matches!(
            (self, instance_type),
            (TypeHint::Both, _)
                | (TypeHint::Application, InstanceType::Application)
                | (TypeHint::Service, InstanceType::Service)
        )
    }
}

impl From<InstanceType> for TypeHint {
    fn from(value: InstanceType) -> Self {
        match value {
            InstanceType::Application => TypeHint::Application,
            InstanceType::Service => TypeHint::Service,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Lifecycle {
    #[display("start")]
    Start,
    #[display("stop")]
    Stop,
    #[display("restart")]
    Restart,
}

/// Name and kind of an instance, as found by a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRef {
    pub id: String,
    pub instance_type: InstanceType,
}

impl InstanceRef {
    pub fn new(id: impl Into<String>, instance_type: InstanceType) -> Self {
        Self {
            id: id.into(),
            instance_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub entity_id: String,
    #[serde(default)]
    pub entity_name: String,
    pub entity_type: InstanceType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_includes() {
        assert!(TypeHint::Both.includes(InstanceType::Service));
        assert!(TypeHint::Both.includes(InstanceType::Application));
        assert!(TypeHint::Service.includes(InstanceType::Service));
        assert!(!TypeHint::Service.includes(InstanceType::Application));
        assert!(!TypeHint::Application.includes(InstanceType::Service));
    }

    #[test]
    fn binding_from_json() -> anyhow::Result<()> {
        let binding: Binding = serde_json::from_str(
            r#"{"entity_id": "abc", "entity_name": "db", "entity_type": "SERVICE"}"#,
        )?;

        assert_eq!(InstanceType::Service, binding.entity_type);
        assert_eq!("db", binding.entity_name);
        Ok(())
    }
}

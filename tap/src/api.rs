use std::collections::BTreeMap;

use crate::prelude::*;

/// Operations of the platform management API
///
/// Instances are always addressed by their platform identifier, names are
/// turned into identifiers by [`crate::resolve`] beforehand.
pub trait Api {
    fn applications(&self) -> Result<Vec<Application>>;
    fn application(&self, id: &str) -> Result<Application>;
    fn create_application(&self, manifest: &Manifest, blob: Vec<u8>) -> Result<Application>;
    fn update_application_blob(&self, id: &str, blob: Vec<u8>) -> Result<()>;
    fn delete_application(&self, id: &str) -> Result<()>;
    fn scale_application(&self, id: &str, replicas: u32) -> Result<()>;

    fn services(&self) -> Result<Vec<Service>>;
    fn service(&self, id: &str) -> Result<Service>;
    fn create_service(&self, service: &NewService) -> Result<Service>;
    fn delete_service(&self, id: &str) -> Result<()>;
    fn service_credentials(&self, id: &str) -> Result<serde_json::Value>;

    /// Starts, stops or restarts an instance
    fn lifecycle(&self, instance: &InstanceRef, action: Lifecycle) -> Result<()>;
    fn logs(&self, instance: &InstanceRef) -> Result<BTreeMap<String, String>>;

    fn bindings(&self, instance: &InstanceRef) -> Result<Vec<Binding>>;
    /// Binds `source` to `destination`, exposing the source to the destination
    fn bind(&self, destination: &InstanceRef, source: &InstanceRef) -> Result<()>;
    fn unbind(&self, destination: &InstanceRef, source: &InstanceRef) -> Result<()>;

    fn offerings(&self) -> Result<Vec<Offering>>;
    fn delete_offering(&self, id: &str) -> Result<()>;

    fn users(&self) -> Result<Vec<User>>;
    fn delete_user(&self, guid: &str) -> Result<()>;
    fn change_password(&self, change: &PasswordChange) -> Result<()>;

    fn invitations(&self) -> Result<Vec<Invitation>>;
    fn invite(&self, email: &str) -> Result<Invitation>;
    fn resend_invitation(&self, email: &str) -> Result<()>;
    fn delete_invitation(&self, email: &str) -> Result<()>;
}

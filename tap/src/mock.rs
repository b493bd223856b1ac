//! In-memory [`Api`] used by tests
//!
//! Mutating calls are applied to the in-memory collections and recorded, in
//! order, as human readable strings that tests can assert on.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Applications,
    Services,
    Offerings,
    Users,
    Invitations,
}

#[derive(Debug, Default)]
pub struct MockApi {
    applications: RefCell<Vec<Application>>,
    services: RefCell<Vec<Service>>,
    offerings: RefCell<Vec<Offering>>,
    users: RefCell<Vec<User>>,
    invitations: RefCell<Vec<Invitation>>,
    bindings: RefCell<Vec<(InstanceRef, Binding)>>,
    failing: HashSet<Collection>,
    list_calls: RefCell<HashMap<Collection, usize>>,
    calls: RefCell<Vec<String>>,
    next_id: Cell<usize>,
}

impl MockApi {
    fn next_id(&self, prefix: &str) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("{prefix}-{id}")
    }

    pub fn with_application(self, name: &str) -> Self {
        let id = self.next_id("app");
        self.with_application_id(&id, name)
    }

    pub fn with_application_id(self, id: &str, name: &str) -> Self {
        self.applications.borrow_mut().push(Application {
            id: id.to_string(),
            name: name.to_string(),
            state: "RUNNING".to_string(),
            replication: 1,
            ..Default::default()
        });
        self
    }

    pub fn with_service(self, name: &str) -> Self {
        let id = self.next_id("svc");
        self.with_service_id(&id, name)
    }

    pub fn with_service_id(self, id: &str, name: &str) -> Self {
        self.services.borrow_mut().push(Service {
            id: id.to_string(),
            name: name.to_string(),
            state: "RUNNING".to_string(),
            ..Default::default()
        });
        self
    }

    pub fn with_offering(self, name: &str, plans: &[&str]) -> Self {
        let plans = plans
            .iter()
            .map(|plan| Plan {
                id: self.next_id("plan"),
                name: plan.to_string(),
                ..Default::default()
            })
            .collect();
        let offering = Offering {
            id: self.next_id("offering"),
            name: name.to_string(),
            plans,
            ..Default::default()
        };
        self.offerings.borrow_mut().push(offering);
        self
    }

    pub fn with_user(self, guid: &str, username: &str) -> Self {
        self.users.borrow_mut().push(User {
            guid: guid.to_string(),
            username: username.to_string(),
            role: "USER".to_string(),
        });
        self
    }

    pub fn with_invitation(self, email: &str) -> Self {
        self.invitations.borrow_mut().push(Invitation {
            email: email.to_string(),
        });
        self
    }

    /// Makes every listing of `collection` fail with a server error
    pub fn failing(mut self, collection: Collection) -> Self {
        self.failing.insert(collection);
        self
    }

    pub fn list_calls(&self, collection: Collection) -> usize {
        self.list_calls
            .borrow()
            .get(&collection)
            .copied()
            .unwrap_or_default()
    }

    /// Mutating calls received so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn list<T: Clone>(&self, collection: Collection, items: &RefCell<Vec<T>>) -> Result<Vec<T>> {
        *self.list_calls.borrow_mut().entry(collection).or_default() += 1;

        if self.failing.contains(&collection) {
            return Err(Error::Remote {
                status: 500,
                body: "unavailable".to_string(),
            });
        }
        Ok(items.borrow().clone())
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn not_found(id: &str) -> Error {
        Error::Remote {
            status: 404,
            body: format!("{id} not found"),
        }
    }

    fn name_of(&self, instance: &InstanceRef) -> String {
        match instance.instance_type {
            InstanceType::Application => self
                .applications
                .borrow()
                .iter()
                .find(|a| a.id == instance.id)
                .map(|a| a.name.clone()),
            InstanceType::Service => self
                .services
                .borrow()
                .iter()
                .find(|s| s.id == instance.id)
                .map(|s| s.name.clone()),
        }
        .unwrap_or_default()
    }
}

impl Api for MockApi {
    fn applications(&self) -> Result<Vec<Application>> {
        self.list(Collection::Applications, &self.applications)
    }

    fn application(&self, id: &str) -> Result<Application> {
        self.applications
            .borrow()
            .iter()
            .find(|app| app.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    fn create_application(&self, manifest: &Manifest, blob: Vec<u8>) -> Result<Application> {
        self.record(format!(
            "create_application {} ({} bytes)",
            manifest.name,
            blob.len()
        ));
        let app = Application {
            id: self.next_id("app"),
            name: manifest.name.clone(),
            replication: manifest.instances,
            state: "STOPPED".to_string(),
            ..Default::default()
        };
        self.applications.borrow_mut().push(app.clone());
        Ok(app)
    }

    fn update_application_blob(&self, id: &str, blob: Vec<u8>) -> Result<()> {
        self.application(id)?;
        self.record(format!("update_application_blob {id} ({} bytes)", blob.len()));
        Ok(())
    }

    fn delete_application(&self, id: &str) -> Result<()> {
        self.application(id)?;
        self.record(format!("delete_application {id}"));
        self.applications.borrow_mut().retain(|app| app.id != id);
        Ok(())
    }

    fn scale_application(&self, id: &str, replicas: u32) -> Result<()> {
        self.application(id)?;
        self.record(format!("scale_application {id} {replicas}"));
        Ok(())
    }

    fn services(&self) -> Result<Vec<Service>> {
        self.list(Collection::Services, &self.services)
    }

    fn service(&self, id: &str) -> Result<Service> {
        self.services
            .borrow()
            .iter()
            .find(|service| service.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    fn create_service(&self, service: &NewService) -> Result<Service> {
        let envs = service
            .envs
            .iter()
            .map(|env| format!(" {}={}", env.name, env.value))
            .collect::<String>();
        self.record(format!(
            "create_service {} {} {}{envs}",
            service.name, service.offering_id, service.plan_id
        ));
        let created = Service {
            id: self.next_id("svc"),
            name: service.name.clone(),
            state: "DEPLOYING".to_string(),
            ..Default::default()
        };
        self.services.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn delete_service(&self, id: &str) -> Result<()> {
        self.service(id)?;
        self.record(format!("delete_service {id}"));
        self.services.borrow_mut().retain(|service| service.id != id);
        Ok(())
    }

    fn service_credentials(&self, id: &str) -> Result<serde_json::Value> {
        let service = self.service(id)?;
        Ok(serde_json::json!({ "hostname": format!("{}.local", service.name) }))
    }

    fn lifecycle(&self, instance: &InstanceRef, action: Lifecycle) -> Result<()> {
        self.record(format!(
            "{action} {} {}",
            instance.instance_type, instance.id
        ));
        Ok(())
    }

    fn logs(&self, instance: &InstanceRef) -> Result<BTreeMap<String, String>> {
        Ok(BTreeMap::from([(
            self.name_of(instance),
            "started\n".to_string(),
        )]))
    }

    fn bindings(&self, instance: &InstanceRef) -> Result<Vec<Binding>> {
        Ok(self
            .bindings
            .borrow()
            .iter()
            .filter(|(destination, _)| destination == instance)
            .map(|(_, binding)| binding.clone())
            .collect())
    }

    fn bind(&self, destination: &InstanceRef, source: &InstanceRef) -> Result<()> {
        self.record(format!(
            "bind {} {} <- {} {}",
            destination.instance_type, destination.id, source.instance_type, source.id
        ));
        let binding = Binding {
            entity_id: source.id.clone(),
            entity_name: self.name_of(source),
            entity_type: source.instance_type,
        };
        self.bindings
            .borrow_mut()
            .push((destination.clone(), binding));
        Ok(())
    }

    fn unbind(&self, destination: &InstanceRef, source: &InstanceRef) -> Result<()> {
        self.record(format!(
            "unbind {} {} <- {} {}",
            destination.instance_type, destination.id, source.instance_type, source.id
        ));
        self.bindings
            .borrow_mut()
            .retain(|(d, b)| !(d == destination && b.entity_id == source.id));
        Ok(())
    }

    fn offerings(&self) -> Result<Vec<Offering>> {
        self.list(Collection::Offerings, &self.offerings)
    }

    fn delete_offering(&self, id: &str) -> Result<()> {
        self.record(format!("delete_offering {id}"));
        self.offerings.borrow_mut().retain(|offering| offering.id != id);
        Ok(())
    }

    fn users(&self) -> Result<Vec<User>> {
        self.list(Collection::Users, &self.users)
    }

    fn delete_user(&self, guid: &str) -> Result<()> {
        self.record(format!("delete_user {guid}"));
        self.users.borrow_mut().retain(|user| user.guid != guid);
        Ok(())
    }

    fn change_password(&self, change: &PasswordChange) -> Result<()> {
        self.record(format!(
            "change_password {} -> {}",
            change.current_password, change.new_password
        ));
        Ok(())
    }

    fn invitations(&self) -> Result<Vec<Invitation>> {
        self.list(Collection::Invitations, &self.invitations)
    }

    fn invite(&self, email: &str) -> Result<Invitation> {
        self.record(format!("invite {email}"));
        let invitation = Invitation {
            email: email.to_string(),
        };
        self.invitations.borrow_mut().push(invitation.clone());
        Ok(invitation)
    }

    fn resend_invitation(&self, email: &str) -> Result<()> {
        self.record(format!("resend_invitation {email}"));
        Ok(())
    }

    fn delete_invitation(&self, email: &str) -> Result<()> {
        self.record(format!("delete_invitation {email}"));
        self.invitations
            .borrow_mut()
            .retain(|invitation| invitation.email != email);
        Ok(())
    }
}

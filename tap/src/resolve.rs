//! Translation of user supplied names into platform identifiers
//!
//! Every lookup lists the whole collection from the server and scans it for
//! an exact, case-sensitive name match. Nothing is cached: two lookups are
//! two round trips.

use crate::prelude::*;

/// Finds the offering named `offering_name` and its plan named `plan_name`
///
/// Returns the pair `(offering id, plan id)`.
pub fn fetch_service_and_plan_id<A: Api + ?Sized>(
    api: &A,
    offering_name: &str,
    plan_name: &str,
) -> Result<(String, String)> {
    let offerings = api.offerings()?;

    let offering = offerings
        .iter()
        .find(|offering| offering.name == offering_name)
        .ok_or_else(|| Error::ServiceNotFound(offering_name.to_string()))?;

    let plan = offering.plan(plan_name).ok_or_else(|| Error::PlanNotFound {
        plan: plan_name.to_string(),
        offering: offering_name.to_string(),
    })?;

    Ok((offering.id.clone(), plan.id.clone()))
}

/// Finds an instance by name among the types allowed by `hint`
///
/// Services are looked up before applications, so a name shared by both
/// resolves to the service. A failure to list one type is not fatal: the
/// lookup moves on to the other type and only reports that nothing matched.
pub fn fetch_instance_id_and_type<A: Api + ?Sized>(
    api: &A,
    hint: TypeHint,
    instance_name: &str,
) -> Result<InstanceRef> {
    if hint.includes(InstanceType::Service) {
        match api.services() {
            Ok(services) => {
                if let Some(service) = services.iter().find(|s| s.name == instance_name) {
                    return Ok(InstanceRef::new(&service.id, InstanceType::Service));
                }
            }
            Err(e) => log::debug!("Listing services to find {instance_name:?} failed: {e:?}"),
        }
    }

    if hint.includes(InstanceType::Application) {
        match api.applications() {
            Ok(applications) => {
                if let Some(app) = applications.iter().find(|a| a.name == instance_name) {
                    return Ok(InstanceRef::new(&app.id, InstanceType::Application));
                }
            }
            Err(e) => log::debug!("Listing applications to find {instance_name:?} failed: {e:?}"),
        }
    }

    Err(Error::InstanceNotFound(instance_name.to_string()))
}

pub fn get_offering_id<A: Api + ?Sized>(api: &A, name: &str) -> Result<String> {
    api.offerings()?
        .into_iter()
        .find(|offering| offering.name == name)
        .map(|offering| offering.id)
        .ok_or_else(|| Error::OfferingNotFound(name.to_string()))
}

pub fn get_application_id<A: Api + ?Sized>(api: &A, name: &str) -> Result<String> {
    api.applications()?
        .into_iter()
        .find(|app| app.name == name)
        .map(|app| app.id)
        .ok_or_else(|| Error::ApplicationNotFound(name.to_string()))
}

pub fn get_service_id<A: Api + ?Sized>(api: &A, name: &str) -> Result<String> {
    api.services()?
        .into_iter()
        .find(|service| service.name == name)
        .map(|service| service.id)
        .ok_or_else(|| Error::ServiceInstanceNotFound(name.to_string()))
}

pub fn get_user_id<A: Api + ?Sized>(api: &A, username: &str) -> Result<String> {
    api.users()?
        .into_iter()
        .find(|user| user.username == username)
        .map(|user| user.guid)
        .ok_or_else(|| Error::UserNotFound(username.to_string()))
}

/// Checks that a pending invitation exists for `email`
pub fn get_invitation<A: Api + ?Sized>(api: &A, email: &str) -> Result<Invitation> {
    api.invitations()?
        .into_iter()
        .find(|invitation| invitation.email == email)
        .ok_or_else(|| Error::InvitationNotFound(email.to_string()))
}

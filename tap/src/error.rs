pub type Result<T> = std::result::Result<T, Error>;

#[derive(derive_more::Error, derive_more::Display, derive_more::From, Debug)]
pub enum Error {
    #[display("Service {_0} not found")]
    ServiceNotFound(#[error(not(source))] String),
    #[display("Plan {plan} not found for offering {offering}")]
    PlanNotFound { plan: String, offering: String },
    #[display("Instance {_0} not found")]
    InstanceNotFound(#[error(not(source))] String),
    #[display("Offering {_0} not found")]
    OfferingNotFound(#[error(not(source))] String),
    #[display("Application {_0} not found")]
    ApplicationNotFound(#[error(not(source))] String),
    #[display("Service instance {_0} not found")]
    ServiceInstanceNotFound(#[error(not(source))] String),
    #[display("User {_0} not found")]
    UserNotFound(#[error(not(source))] String),
    #[display("Invitation for {_0} not found")]
    InvitationNotFound(#[error(not(source))] String),
    #[display("Invalid. {_0}")]
    Invalid(#[error(not(source))] String),
    #[display("Server responded with {status}: {body}")]
    Remote { status: u16, body: String },
    #[display("HTTP error")]
    #[from]
    Http(reqwest::Error),
    #[display("Invalid JSON")]
    #[from]
    Json(serde_json::Error),
    #[display("I/O error")]
    #[from]
    Io(std::io::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::ServiceNotFound(_)
                | Error::PlanNotFound { .. }
                | Error::InstanceNotFound(_)
                | Error::OfferingNotFound(_)
                | Error::ApplicationNotFound(_)
                | Error::ServiceInstanceNotFound(_)
                | Error::UserNotFound(_)
                | Error::InvitationNotFound(_)
        ) || matches!(self, Error::Remote { status: 404, .. })
    }
}

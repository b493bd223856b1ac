pub mod api;
pub mod application;
pub mod error;
pub mod http;
pub mod instance;
pub mod offering;
pub mod resolve;
pub mod service;
pub mod user;

#[cfg(any(test, feature = "test_utils"))]
pub mod mock;

pub use api::Api;
pub use error::{Error, Result};
pub use http::HttpClient;

pub mod prelude {
    pub use crate::{
        application::{Application, Manifest},
        instance::{Binding, InstanceRef, InstanceType, Lifecycle, TypeHint},
        offering::{Offering, Plan},
        service::{EnvVar, NewService, Service},
        user::{Invitation, PasswordChange, Token, User},
        Api, Error, Result,
    };
}

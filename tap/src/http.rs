use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::application::Scale;
use crate::prelude::*;

const USER_AGENT: &str = concat!("tapctl/", env!("CARGO_PKG_VERSION"));
const API_PREFIX: &str = "/api/v3";

/// Blocking HTTP implementation of [`Api`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    base: String,
    authorization: String,
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub skip_ssl_validation: bool,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            skip_ssl_validation: false,
            timeout: Duration::from_secs(30),
        }
    }
}

fn build_client(options: &ClientOptions) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(options.timeout)
        .danger_accept_invalid_certs(options.skip_ssl_validation)
        .build()?)
}

fn base_url(address: &str) -> String {
    let address = address.trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("https://{address}")
    }
}

fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Remote {
            status: status.as_u16(),
            body: response.text().unwrap_or_default(),
        })
    }
}

/// Exchanges a username and password for an access token
pub fn login(
    address: &str,
    username: &str,
    password: &str,
    options: &ClientOptions,
) -> Result<Token> {
    let http = build_client(options)?;
    let url = format!("{}{API_PREFIX}/login", base_url(address));
    log::debug!("POST {url}");

    let response = http.post(url).basic_auth(username, Some(password)).send()?;
    Ok(check(response)?.json()?)
}

impl HttpClient {
    pub fn new(
        address: &str,
        token_type: &str,
        token: &str,
        options: &ClientOptions,
    ) -> Result<Self> {
        Ok(Self {
            http: build_client(options)?,
            base: format!("{}{API_PREFIX}", base_url(address)),
            authorization: format!("{token_type} {token}"),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        check(request.header(AUTHORIZATION, &self.authorization).send()?)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        log::debug!("GET {url}");
        Ok(self.send(self.http.get(url))?.json()?)
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        log::debug!("POST {url}");
        Ok(self.send(self.http.post(url).json(body))?.json()?)
    }

    /// POST ignoring the response body
    fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<()> {
        let url = self.url(path);
        log::debug!("POST {url}");
        let mut request = self.http.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request)?;
        Ok(())
    }

    fn put<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<()> {
        let url = self.url(path);
        log::debug!("PUT {url}");
        let mut request = self.http.put(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request)?;
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        log::debug!("DELETE {url}");
        self.send(self.http.delete(url))?;
        Ok(())
    }

    fn blob_part(blob: Vec<u8>) -> Result<multipart::Part> {
        Ok(multipart::Part::bytes(blob)
            .file_name("blob.tar.gz")
            .mime_str("application/gzip")?)
    }
}

fn instance_path(instance: &InstanceRef) -> String {
    format!("/{}/{}", instance.instance_type.collection(), instance.id)
}

impl Api for HttpClient {
    fn applications(&self) -> Result<Vec<Application>> {
        self.get("/applications")
    }

    fn application(&self, id: &str) -> Result<Application> {
        self.get(&format!("/applications/{id}"))
    }

    fn create_application(&self, manifest: &Manifest, blob: Vec<u8>) -> Result<Application> {
        let form = multipart::Form::new()
            .part("blob", Self::blob_part(blob)?)
            .text("manifest", serde_json::to_string(manifest)?);

        let url = self.url("/applications");
        log::debug!("POST {url}");
        Ok(self.send(self.http.post(url).multipart(form))?.json()?)
    }

    fn update_application_blob(&self, id: &str, blob: Vec<u8>) -> Result<()> {
        let form = multipart::Form::new().part("blob", Self::blob_part(blob)?);

        let url = self.url(&format!("/applications/{id}/blob"));
        log::debug!("PUT {url}");
        self.send(self.http.put(url).multipart(form))?;
        Ok(())
    }

    fn delete_application(&self, id: &str) -> Result<()> {
        self.delete(&format!("/applications/{id}"))
    }

    fn scale_application(&self, id: &str, replicas: u32) -> Result<()> {
        self.put(
            &format!("/applications/{id}/scale"),
            Some(&Scale { replicas }),
        )
    }

    fn services(&self) -> Result<Vec<Service>> {
        self.get("/services")
    }

    fn service(&self, id: &str) -> Result<Service> {
        self.get(&format!("/services/{id}"))
    }

    fn create_service(&self, service: &NewService) -> Result<Service> {
        self.post("/services", service)
    }

    fn delete_service(&self, id: &str) -> Result<()> {
        self.delete(&format!("/services/{id}"))
    }

    fn service_credentials(&self, id: &str) -> Result<serde_json::Value> {
        self.get(&format!("/services/{id}/credentials"))
    }

    fn lifecycle(&self, instance: &InstanceRef, action: Lifecycle) -> Result<()> {
        self.put::<()>(&format!("{}/{action}", instance_path(instance)), None)
    }

    fn logs(&self, instance: &InstanceRef) -> Result<BTreeMap<String, String>> {
        self.get(&format!("{}/logs", instance_path(instance)))
    }

    fn bindings(&self, instance: &InstanceRef) -> Result<Vec<Binding>> {
        self.get(&format!("{}/bindings", instance_path(instance)))
    }

    fn bind(&self, destination: &InstanceRef, source: &InstanceRef) -> Result<()> {
        let key = match source.instance_type {
            InstanceType::Application => "application_id",
            InstanceType::Service => "service_id",
        };
        let body = BTreeMap::from([(key, source.id.as_str())]);

        self.post_discard(
            &format!("{}/bindings", instance_path(destination)),
            Some(&body),
        )
    }

    fn unbind(&self, destination: &InstanceRef, source: &InstanceRef) -> Result<()> {
        self.delete(&format!(
            "{}/bindings/{}/{}",
            instance_path(destination),
            source.instance_type.collection(),
            source.id
        ))
    }

    fn offerings(&self) -> Result<Vec<Offering>> {
        self.get("/offerings")
    }

    fn delete_offering(&self, id: &str) -> Result<()> {
        self.delete(&format!("/offerings/{id}"))
    }

    fn users(&self) -> Result<Vec<User>> {
        self.get("/users")
    }

    fn delete_user(&self, guid: &str) -> Result<()> {
        self.delete(&format!("/users/{guid}"))
    }

    fn change_password(&self, change: &PasswordChange) -> Result<()> {
        self.put("/users/current/password", Some(change))
    }

    fn invitations(&self) -> Result<Vec<Invitation>> {
        self.get("/users/invitations")
    }

    fn invite(&self, email: &str) -> Result<Invitation> {
        let invitation = Invitation {
            email: email.to_string(),
        };
        self.post("/users/invitations", &invitation)
    }

    fn resend_invitation(&self, email: &str) -> Result<()> {
        self.post_discard::<()>(&format!("/users/invitations/{email}/resend"), None)
    }

    fn delete_invitation(&self, email: &str) -> Result<()> {
        self.delete(&format!("/users/invitations/{email}"))
    }
}

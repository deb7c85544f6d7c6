//! Light port for a Philips Hue bridge on the local network.
//!
//! A bridge only accepts commands from applications it has issued a username to,
//! which requires pressing the physical link button once. [`HueBridge::pair`]
//! performs that handshake; afterwards the username is read from
//! [`HueCredentials`].

mod api;
/// Storage of the bridge username.
pub mod credentials;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info, warn};

use kliko_core::{
    notify::LightCommand,
    ports::{LightPort, PortError, Readiness},
};

use crate::api::{
    ApiMessage, ApiResponse, CreateUser, CreatedUser, Lights, StateBody, UNAUTHORIZED_USER,
    find_light, first_error, pairing_result,
};
pub use crate::credentials::{DEFAULT_CREDENTIALS_FILE, HueCredentials};

/// Client for one bridge, optionally paired.
pub struct HueBridge {
    client: Client,
    base_url: String,
    username: Option<String>,
}

impl HueBridge {
    /// Create a bridge client for `address` (IP or host name).
    ///
    /// Without credentials the bridge reports [`Readiness::NotReady`] until
    /// [`HueBridge::pair`] succeeds.
    #[must_use]
    pub fn new(client: Client, address: &str, credentials: Option<HueCredentials>) -> Self {
        let address = address.trim().trim_end_matches('/');
        let base_url = if address.starts_with("http://") || address.starts_with("https://") {
            address.to_owned()
        } else {
            format!("http://{address}")
        };
        Self {
            client,
            base_url,
            username: credentials.map(|credentials| credentials.username),
        }
    }

    /// Ask the bridge for a username. Succeeds only within ~30 seconds of the link
    /// button being pressed.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::NotPaired`] when the link button has not been pressed,
    /// [`PortError::Device`] when the bridge rejects the request otherwise, or
    /// [`PortError::Network`] when it cannot be reached.
    pub async fn pair(&mut self, device_name: &str) -> Result<HueCredentials, PortError> {
        let devicetype = format!("kliko#{device_name}");
        let messages = fetch_json::<Vec<ApiMessage<CreatedUser>>>(
            self.client
                .post(format!("{}/api", self.base_url))
                .json(&CreateUser {
                    devicetype: &devicetype,
                }),
        )
        .await?;

        let credentials = pairing_result(messages)?;
        info!("Paired with the Hue bridge");
        self.username = Some(credentials.username.clone());
        Ok(credentials)
    }

    async fn lights(&self) -> Result<Lights, PortError> {
        let username = self.username.as_deref().ok_or(PortError::NotPaired)?;
        let response = fetch_json::<ApiResponse<Lights>>(
            self.client
                .get(format!("{}/api/{username}/lights", self.base_url)),
        )
        .await?;

        match response {
            ApiResponse::Ok(lights) => Ok(lights),
            ApiResponse::Errors(messages) => Err(match first_error(messages) {
                Some(err) if err.kind == UNAUTHORIZED_USER => PortError::NotPaired,
                Some(err) => PortError::Device(err.description),
                None => PortError::Device("unexpected response".to_owned()),
            }),
        }
    }
}

#[async_trait]
impl LightPort for HueBridge {
    async fn readiness(&self) -> Readiness {
        if self.username.is_none() {
            return Readiness::NotReady;
        }
        match self.lights().await {
            Ok(_) => Readiness::Ready,
            Err(err) => {
                warn!("Hue bridge not ready: {err}");
                Readiness::NotReady
            }
        }
    }

    async fn apply(&self, light_name: &str, command: &LightCommand) -> Result<(), PortError> {
        let username = self.username.as_deref().ok_or(PortError::NotPaired)?;
        let lights = self.lights().await?;

        let (light_id, _) = find_light(&lights, light_name)?;

        let body = StateBody::from(command);
        debug!(light = %light_name, id = %light_id, ?body, "Setting light state");

        let messages = fetch_json::<Vec<ApiMessage<IgnoredAny>>>(
            self.client
                .put(format!(
                    "{}/api/{username}/lights/{light_id}/state",
                    self.base_url
                ))
                .json(&body),
        )
        .await?;

        match first_error(messages) {
            Some(err) => Err(PortError::Device(err.description)),
            None => {
                info!(light = %light_name, hue = body.hue, "Light set");
                Ok(())
            }
        }
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}

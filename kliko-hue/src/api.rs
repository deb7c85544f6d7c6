//! Payloads of the Hue REST API v1.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use kliko_core::{notify::LightCommand, ports::PortError};

use crate::credentials::HueCredentials;

/// Error type returned by the bridge while the link button has not been pressed.
pub(crate) const LINK_BUTTON_NOT_PRESSED: u16 = 101;
/// Error type returned for an unknown or revoked username.
pub(crate) const UNAUTHORIZED_USER: u16 = 1;

/// Highest brightness the API accepts.
const MAX_BRIGHTNESS: u16 = 254;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
/// Either the requested resource or the error list the bridge sends instead.
pub(crate) enum ApiResponse<T> {
    /// Request rejected.
    Errors(Vec<ApiMessage<IgnoredAny>>),
    /// Request served.
    Ok(T),
}

#[derive(Debug, Deserialize)]
/// Single entry of a result array.
pub(crate) struct ApiMessage<S> {
    pub(crate) success: Option<S>,
    pub(crate) error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
/// Error detail reported by the bridge.
pub(crate) struct ApiError {
    #[serde(rename = "type")]
    pub(crate) kind: u16,
    #[serde(default)]
    pub(crate) description: String,
}

/// Lights keyed by bridge id, as returned by `GET /api/{username}/lights`.
pub(crate) type Lights = BTreeMap<String, Light>;

#[derive(Debug, Deserialize)]
pub(crate) struct Light {
    pub(crate) name: String,
    pub(crate) state: LightState,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LightState {
    /// Missing for some third-party lights, which are then assumed reachable.
    pub(crate) reachable: Option<bool>,
}

#[derive(Debug, Serialize)]
/// Body of `POST /api`.
pub(crate) struct CreateUser<'body> {
    pub(crate) devicetype: &'body str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedUser {
    pub(crate) username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Body of `PUT /api/{username}/lights/{id}/state`.
pub(crate) struct StateBody {
    pub(crate) on: bool,
    pub(crate) bri: u8,
    pub(crate) hue: u16,
    pub(crate) sat: u8,
}

impl From<&LightCommand> for StateBody {
    fn from(command: &LightCommand) -> Self {
        Self {
            on: command.on,
            bri: brightness_level(command.brightness),
            hue: command.hue.0,
            sat: command.saturation,
        }
    }
}

/// Convert a brightness percentage to the bridge's 0..=254 scale.
pub(crate) fn brightness_level(percent: u8) -> u8 {
    let level = (u16::from(percent.min(100)) * 255 / 100).min(MAX_BRIGHTNESS);
    u8::try_from(level).unwrap_or(u8::MAX)
}

/// First error in a result array, if any.
pub(crate) fn first_error<S>(messages: Vec<ApiMessage<S>>) -> Option<ApiError> {
    messages.into_iter().find_map(|message| message.error)
}

/// Reduce the answer to `POST /api` to the issued username.
///
/// A success anywhere in the array wins; otherwise the first error decides.
pub(crate) fn pairing_result(
    messages: Vec<ApiMessage<CreatedUser>>,
) -> Result<HueCredentials, PortError> {
    let mut error = None;
    for message in messages {
        if let Some(user) = message.success {
            return Ok(HueCredentials {
                username: user.username,
            });
        }
        if error.is_none() {
            error = message.error;
        }
    }

    match error {
        Some(err) if err.kind == LINK_BUTTON_NOT_PRESSED => Err(PortError::NotPaired),
        Some(err) => Err(PortError::Device(err.description)),
        None => Err(PortError::Device("empty pairing response".to_owned())),
    }
}

/// Look up a light by name and check that the bridge can reach it.
///
/// Lights that do not report `reachable` are assumed reachable.
pub(crate) fn find_light<'lights>(
    lights: &'lights Lights,
    name: &str,
) -> Result<(&'lights String, &'lights Light), PortError> {
    let (id, light) = lights
        .iter()
        .find(|(_, light)| light.name == name)
        .ok_or_else(|| PortError::DeviceNotFound(name.to_owned()))?;

    if light.state.reachable == Some(false) {
        return Err(PortError::DeviceUnreachable(name.to_owned()));
    }
    Ok((id, light))
}

#[cfg(test)]
mod tests {
    use kliko_core::model::Hue;

    use super::*;

    #[test]
    fn brightness_is_scaled_to_the_bridge_range() {
        assert_eq!(brightness_level(30), 76);
        assert_eq!(brightness_level(0), 0);
        assert_eq!(brightness_level(100), 254);
        assert_eq!(brightness_level(250), 254);
    }

    #[test]
    fn state_body_from_command() {
        let body = StateBody::from(&LightCommand::for_hue(Hue(46_920)));
        assert_eq!(
            body,
            StateBody {
                on: true,
                bri: 76,
                hue: 46_920,
                sat: 254
            }
        );
        let json = serde_json::to_string(&body).expect("serializable");
        assert_eq!(json, r#"{"on":true,"bri":76,"hue":46920,"sat":254}"#);
    }

    #[test]
    fn lights_listing_deserializes() {
        let body = r#"{
            "1": {"name": "Glass cabinet light", "type": "Extended color light",
                  "state": {"on": false, "bri": 1, "hue": 0, "reachable": true}},
            "4": {"name": "Hall", "state": {"on": true, "reachable": false}},
            "7": {"name": "Plug", "state": {"on": true}}
        }"#;
        let response: ApiResponse<Lights> = serde_json::from_str(body).expect("valid listing");
        let ApiResponse::Ok(lights) = response else {
            panic!("expected a listing");
        };
        assert_eq!(lights.len(), 3);
        assert_eq!(
            lights.get("4").map(|light| light.state.reachable),
            Some(Some(false))
        );
        assert_eq!(lights.get("7").map(|light| light.state.reachable), Some(None));
    }

    #[test]
    fn error_array_deserializes() {
        let body = r#"[{"error": {"type": 1, "address": "/lights", "description": "unauthorized user"}}]"#;
        let response: ApiResponse<Lights> = serde_json::from_str(body).expect("valid errors");
        let ApiResponse::Errors(messages) = response else {
            panic!("expected an error array");
        };
        let error = first_error(messages).expect("one error");
        assert_eq!(error.kind, UNAUTHORIZED_USER);
        assert_eq!(error.description, "unauthorized user");
    }

    fn listing() -> Lights {
        serde_json::from_str(
            r#"{
                "1": {"name": "Glass cabinet light", "state": {"reachable": true}},
                "4": {"name": "Hall", "state": {"on": true, "reachable": false}},
                "7": {"name": "Plug", "state": {"on": true}}
            }"#,
        )
        .expect("valid listing")
    }

    #[test]
    fn reachable_light_is_found_by_name() {
        let lights = listing();
        let (id, light) = find_light(&lights, "Glass cabinet light").expect("reachable light");
        assert_eq!(id, "1");
        assert_eq!(light.name, "Glass cabinet light");
    }

    #[test]
    fn light_without_reachable_flag_is_usable() {
        let lights = listing();
        let found = find_light(&lights, "Plug").map(|(id, _)| id.as_str());
        assert!(matches!(found, Ok("7")));
    }

    #[test]
    fn unreachable_light_is_rejected() {
        let lights = listing();
        assert!(matches!(
            find_light(&lights, "Hall"),
            Err(PortError::DeviceUnreachable(name)) if name == "Hall"
        ));
    }

    #[test]
    fn unknown_light_is_not_found() {
        let lights = listing();
        assert!(matches!(
            find_light(&lights, "Attic"),
            Err(PortError::DeviceNotFound(name)) if name == "Attic"
        ));
        assert!(matches!(
            find_light(&Lights::new(), "Hall"),
            Err(PortError::DeviceNotFound(_))
        ));
    }

    fn pairing(body: &str) -> Result<HueCredentials, PortError> {
        pairing_result(serde_json::from_str(body).expect("valid pairing response"))
    }

    #[test]
    fn pairing_success_yields_credentials() {
        let credentials = pairing(r#"[{"success": {"username": "83b7780291a6ceffbe0bd049104df"}}]"#)
            .expect("paired");
        assert_eq!(credentials.username, "83b7780291a6ceffbe0bd049104df");
    }

    #[test]
    fn link_button_not_pressed_is_not_paired() {
        assert!(matches!(
            pairing(r#"[{"error": {"type": 101}}]"#),
            Err(PortError::NotPaired)
        ));
    }

    #[test]
    fn other_pairing_errors_are_device_errors() {
        assert!(matches!(
            pairing(r#"[{"error": {"type": 7, "description": "invalid value"}}]"#),
            Err(PortError::Device(description)) if description == "invalid value"
        ));
        assert!(matches!(pairing("[]"), Err(PortError::Device(_))));
    }

    #[test]
    fn pairing_results_deserialize() {
        let pressed = r#"[{"success": {"username": "83b7780291a6ceffbe0bd049104df"}}]"#;
        let messages: Vec<ApiMessage<CreatedUser>> =
            serde_json::from_str(pressed).expect("valid success");
        assert_eq!(
            messages
                .into_iter()
                .find_map(|message| message.success)
                .map(|user| user.username),
            Some("83b7780291a6ceffbe0bd049104df".to_owned())
        );

        let not_pressed = r#"[{"error": {"type": 101, "address": "", "description": "link button not pressed"}}]"#;
        let messages: Vec<ApiMessage<CreatedUser>> =
            serde_json::from_str(not_pressed).expect("valid error");
        assert_eq!(
            first_error(messages).map(|error| error.kind),
            Some(LINK_BUTTON_NOT_PRESSED)
        );
    }
}

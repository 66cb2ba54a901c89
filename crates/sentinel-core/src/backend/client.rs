//! HTTP client for the alert backend.

use std::time::Duration;

use serde_json::{json, Value};

use super::types::{BackendError, School};
use crate::alert::{timefmt, Alert};

/// JSON-over-POST backend client.
///
/// One client per process; every call is bounded by the construction-time
/// timeout, and expiry surfaces as an ordinary transport error.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// POST a JSON body and parse the JSON response.
    ///
    /// Status is deliberately not checked here: the backend answers 400/404
    /// with meaningful JSON bodies (duplicate suppression, empty event
    /// table) that callers interpret.
    async fn post(&self, endpoint: &'static str, body: Value) -> Result<Value, BackendError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json::<Value>()
            .await?;
        Ok(response)
    }

    /// `/get_schools`: all schools known to the backend.
    pub async fn get_schools(&self) -> Result<Vec<School>, BackendError> {
        const ENDPOINT: &str = "/get_schools";
        let response = self.post(ENDPOINT, json!({})).await?;

        let items = response["data"]
            .as_array()
            .ok_or(BackendError::InvalidResponse {
                endpoint: ENDPOINT,
                field: "data",
            })?;

        let mut schools = Vec::with_capacity(items.len());
        for item in items {
            let id = item["id"].as_i64().ok_or(BackendError::InvalidResponse {
                endpoint: ENDPOINT,
                field: "id",
            })?;
            let name = item["name"]
                .as_str()
                .ok_or(BackendError::InvalidResponse {
                    endpoint: ENDPOINT,
                    field: "name",
                })?;
            schools.push(School {
                id,
                name: name.to_string(),
            });
        }
        Ok(schools)
    }

    /// `/add_student`: register a student, returning their id.
    ///
    /// The backend is idempotent per phone number and returns the existing
    /// id on re-registration.
    pub async fn add_student(
        &self,
        name: &str,
        phone_number: &str,
        emergency_phone: &str,
        school_id: i64,
    ) -> Result<i64, BackendError> {
        const ENDPOINT: &str = "/add_student";
        let response = self
            .post(
                ENDPOINT,
                json!({
                    "phone_number": phone_number,
                    "emergency_phone": emergency_phone,
                    "school_id": school_id,
                    "name": name,
                }),
            )
            .await?;

        response["id"].as_i64().ok_or(BackendError::InvalidResponse {
            endpoint: ENDPOINT,
            field: "id",
        })
    }

    /// `/report_event`: report a detection, returning the backend's ack
    /// message.
    pub async fn report_event(
        &self,
        room_code: &str,
        event_type: &str,
        school_id: i64,
    ) -> Result<String, BackendError> {
        const ENDPOINT: &str = "/report_event";
        let response = self
            .post(
                ENDPOINT,
                json!({
                    "room_code": room_code,
                    "event_type": event_type,
                    "school_id": school_id,
                }),
            )
            .await?;

        response["message"]
            .as_str()
            .map(str::to_string)
            .ok_or(BackendError::InvalidResponse {
                endpoint: ENDPOINT,
                field: "message",
            })
    }

    /// `/get_latest_event`: the authoritative latest alert for a school.
    ///
    /// `Ok(None)` when the backend holds no events (it answers
    /// `{"message": "No events found"}` with a 404). The wire timestamp is
    /// converted to display format here; an unparseable one is an invalid
    /// response, not a partial alert.
    pub async fn latest_event(&self, school_id: i64) -> Result<Option<Alert>, BackendError> {
        const ENDPOINT: &str = "/get_latest_event";
        let response = self
            .post(ENDPOINT, json!({ "school_id": school_id }))
            .await?;

        if response["school_id"].as_i64().is_none() {
            if response["message"].as_str().is_some() {
                return Ok(None);
            }
            return Err(BackendError::InvalidResponse {
                endpoint: ENDPOINT,
                field: "school_id",
            });
        }

        let room_code = response["room_code"]
            .as_str()
            .ok_or(BackendError::InvalidResponse {
                endpoint: ENDPOINT,
                field: "room_code",
            })?;
        let event_type = response["event_type"]
            .as_str()
            .ok_or(BackendError::InvalidResponse {
                endpoint: ENDPOINT,
                field: "event_type",
            })?;
        let wire_timestamp = response["timestamp"]
            .as_str()
            .ok_or(BackendError::InvalidResponse {
                endpoint: ENDPOINT,
                field: "timestamp",
            })?;
        let timestamp =
            timefmt::wire_to_display(wire_timestamp).ok_or(BackendError::InvalidResponse {
                endpoint: ENDPOINT,
                field: "timestamp",
            })?;

        Ok(Some(Alert {
            room_code: room_code.to_string(),
            alert_type: event_type.to_string(),
            timestamp,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(url: String) -> BackendClient {
        BackendClient::new(url, Duration::from_secs(2)).expect("client builds")
    }

    #[tokio::test]
    async fn get_schools_parses_data_array() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/get_schools")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"id": 1, "name": "Riverside High"}, {"id": 3, "name": "Westfield"}]}"#)
            .create_async()
            .await;

        let schools = client_for(server.url()).get_schools().await.unwrap();
        assert_eq!(schools.len(), 2);
        assert_eq!(schools[0], School { id: 1, name: "Riverside High".to_string() });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_schools_missing_data_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/get_schools")
            .with_status(200)
            .with_body(r#"{"schools": []}"#)
            .create_async()
            .await;

        let err = client_for(server.url()).get_schools().await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::InvalidResponse { field: "data", .. }
        ));
    }

    #[tokio::test]
    async fn add_student_returns_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/add_student")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "phone_number": "5551234567",
                "school_id": 3,
            })))
            .with_status(201)
            .with_body(r#"{"message": "Student added successfully", "id": 42}"#)
            .create_async()
            .await;

        let id = client_for(server.url())
            .add_student("Jordan", "5551234567", "5559876543", 3)
            .await
            .unwrap();
        assert_eq!(id, 42);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn latest_event_builds_display_alert() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/get_latest_event")
            .with_status(200)
            .with_body(
                r#"{"room_code": "EGR1313", "event_type": "audio",
                    "timestamp": "2024-01-28T14:05:30.123456", "school_id": 3}"#,
            )
            .create_async()
            .await;

        let alert = client_for(server.url())
            .latest_event(3)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(alert.room_code, "EGR1313");
        assert_eq!(alert.alert_type, "audio");
        assert_eq!(alert.timestamp, "2:05 PM");
    }

    #[tokio::test]
    async fn latest_event_no_events_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/get_latest_event")
            .with_status(404)
            .with_body(r#"{"message": "No events found"}"#)
            .create_async()
            .await;

        let latest = client_for(server.url()).latest_event(3).await.unwrap();
        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn latest_event_malformed_timestamp_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/get_latest_event")
            .with_status(200)
            .with_body(
                r#"{"room_code": "EGR1313", "event_type": "audio",
                    "timestamp": "yesterday", "school_id": 3}"#,
            )
            .create_async()
            .await;

        let err = client_for(server.url()).latest_event(3).await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::InvalidResponse { field: "timestamp", .. }
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_transport_error() {
        // Port from a dropped server: connection refused.
        let server = mockito::Server::new_async().await;
        let url = server.url();
        drop(server);

        let err = client_for(url).get_schools().await.unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}

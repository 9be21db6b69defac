//! HTTP client for the Garoon REST API.
//!
//! One `reqwest::Client` is built at startup with the
//! `X-Cybozu-Authorization` header (Base64 of `username:password`) attached
//! as a default header, so the connection pool and the encoded credential
//! are shared by every call. All operations go through a single low-level
//! request routine that classifies non-2xx statuses before touching the
//! body.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::NaiveDate;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::Value;

use crate::core::AppConfig;
use crate::garoon::error::GaroonError;
use crate::garoon::models::{
    EventDateTime, EventsResponse, Message, MessagesResponse, NewMessage, NewScheduleEvent,
    Recipient, ScheduleEvent, TextValue, User, UsersResponse,
};

const SCHEDULE_EVENTS_PATH: &str = "/g/api/v1/schedule/events";
const USERS_PATH: &str = "/g/api/v1/base/users";
const MESSAGES_PATH: &str = "/g/api/v1/messages";

pub struct GaroonClient {
    http: reqwest::Client,
    base_url: String,
    tz_offset: String,
}

impl GaroonClient {
    pub fn new(config: &AppConfig) -> Result<Self, GaroonError> {
        let token = STANDARD.encode(format!("{}:{}", config.username, config.password));

        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&token)
            .map_err(|err| GaroonError::Validation(format!("invalid credentials: {err}")))?;
        headers.insert("X-Cybozu-Authorization", auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("garoon-mcp/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tz_offset: config.tz_offset.clone(),
        })
    }

    /// Shared request path: join URL, send, classify non-2xx, parse JSON.
    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Value, GaroonError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Garoon rejected request");
            return Err(GaroonError::from_status(status.as_u16(), text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch schedule events in the `[start_date, end_date]` window. Dates
    /// are `YYYY-MM-DD` and expand to full-day range bounds using the
    /// configured UTC offset. Supplying `user_id` scopes the query to that
    /// user's calendar; Garoon requires `targetType` alongside `target`, so
    /// both parameters are added together.
    pub async fn get_schedule(
        &self,
        start_date: &str,
        end_date: &str,
        user_id: Option<&str>,
    ) -> Result<Vec<ScheduleEvent>, GaroonError> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;

        let mut query = vec![
            ("rangeStart", format!("{start}T00:00:00{}", self.tz_offset)),
            ("rangeEnd", format!("{end}T23:59:59{}", self.tz_offset)),
        ];
        if let Some(user_id) = user_id {
            query.push(("target", user_id.to_string()));
            query.push(("targetType", "user".to_string()));
        }

        let value = self
            .request::<()>(Method::GET, SCHEDULE_EVENTS_PATH, &query, None)
            .await?;
        let resp: EventsResponse = serde_json::from_value(value)?;
        Ok(resp.events)
    }

    /// Create a schedule event. Datetimes are passed to Garoon as-is;
    /// anything it rejects comes back as an upstream error.
    pub async fn create_schedule(
        &self,
        subject: &str,
        start_datetime: &str,
        end_datetime: &str,
        description: Option<&str>,
    ) -> Result<ScheduleEvent, GaroonError> {
        let event = NewScheduleEvent {
            subject: TextValue::new(subject),
            start: EventDateTime {
                date_time: start_datetime.to_string(),
                time_zone: None,
            },
            end: EventDateTime {
                date_time: end_datetime.to_string(),
                time_zone: None,
            },
            notes: description.map(TextValue::new),
        };

        let value = self
            .request(Method::POST, SCHEDULE_EVENTS_PATH, &[], Some(&event))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn search_users(&self, query: &str, limit: u32) -> Result<Vec<User>, GaroonError> {
        let params = [("name", query.to_string()), ("limit", limit.to_string())];
        let value = self
            .request::<()>(Method::GET, USERS_PATH, &params, None)
            .await?;
        let resp: UsersResponse = serde_json::from_value(value)?;
        Ok(resp.users)
    }

    pub async fn get_messages(
        &self,
        folder: &str,
        limit: u32,
    ) -> Result<Vec<Message>, GaroonError> {
        let params = [("folder", folder.to_string()), ("limit", limit.to_string())];
        let value = self
            .request::<()>(Method::GET, MESSAGES_PATH, &params, None)
            .await?;
        let resp: MessagesResponse = serde_json::from_value(value)?;
        Ok(resp.messages)
    }

    /// Send a message to one or more users. An empty recipient list is
    /// rejected before any network call.
    pub async fn send_message(
        &self,
        to: &[String],
        subject: &str,
        body: &str,
    ) -> Result<Value, GaroonError> {
        if to.is_empty() {
            return Err(GaroonError::Validation(
                "recipient list must not be empty".to_string(),
            ));
        }

        let message = NewMessage {
            recipients: to.iter().map(|id| Recipient::user(id.clone())).collect(),
            subject: TextValue::new(subject),
            body: TextValue::new(body),
        };

        self.request(Method::POST, MESSAGES_PATH, &[], Some(&message))
            .await
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, GaroonError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        GaroonError::Validation(format!("expected a YYYY-MM-DD date, got '{input}'"))
    })
}

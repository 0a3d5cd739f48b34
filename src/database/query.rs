//! Table request builder
//!
//! A thin builder over the REST gateway's query string conventions:
//! `select=` for columns and embedded relations, `column=eq.value` filters and
//! `order=column.asc|desc`. Every terminal method sends exactly one request.

use std::fmt;
use std::time::Instant;
use reqwest::{header, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use crate::utils::errors::{BackendError, EventicHubError, Result};
use crate::utils::logging::log_data_operation;
use super::connection::BackendClient;

/// Media type asking the gateway for exactly one object instead of an array
pub const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
/// Ask the gateway to echo written rows back
pub const RETURN_REPRESENTATION: &str = "return=representation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Ascending => write!(f, "asc"),
            Order::Descending => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    client: BackendClient,
    table: String,
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    pub(crate) fn new(client: BackendClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    /// Columns and embedded relations to return; whitespace is dropped
    pub fn select(mut self, columns: &str) -> Self {
        let columns: String = columns.split_whitespace().collect();
        self.params.retain(|(key, _)| key != "select");
        self.params.push(("select".to_string(), columns));
        self
    }

    /// Equality filter on a column
    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.params.push(("order".to_string(), format!("{}.{}", column, order)));
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Read every matching row
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let response = self.send(Method::GET, None, false, "select").await?;
        decode(response).await
    }

    /// Read exactly one row; zero or several matches is a backend error
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.send(Method::GET, None, true, "select").await?;
        decode(response).await
    }

    /// Insert one row and return it as stored
    pub async fn insert_one<B: Serialize, T: DeserializeOwned>(self, row: &B) -> Result<T> {
        let body = serde_json::to_value([row])?;
        let response = self.with_default_select().send(Method::POST, Some(body), true, "insert").await?;
        decode(response).await
    }

    /// Patch the matching row and return it as stored
    pub async fn update_one<B: Serialize, T: DeserializeOwned>(self, patch: &B) -> Result<T> {
        let body = serde_json::to_value(patch)?;
        let response = self.with_default_select().send(Method::PATCH, Some(body), true, "update").await?;
        decode(response).await
    }

    /// Delete matching rows
    pub async fn delete(self) -> Result<()> {
        self.send(Method::DELETE, None, false, "delete").await?;
        Ok(())
    }

    fn with_default_select(self) -> Self {
        if self.params.iter().any(|(key, _)| key == "select") {
            self
        } else {
            self.select("*")
        }
    }

    async fn send(
        self,
        method: Method,
        body: Option<serde_json::Value>,
        single: bool,
        operation: &str,
    ) -> Result<Response> {
        let url = self.client.rest_url(&self.table)?;
        let token = self.client.bearer_token().await;

        debug!(table = %self.table, method = %method, params = ?self.params, "Sending table request");

        let mut request = self.client
            .http()
            .request(method, url)
            .query(&self.params)
            .header("apikey", self.client.anon_key())
            .bearer_auth(token);

        if single {
            request = request.header(header::ACCEPT, SINGLE_OBJECT);
        }
        if let Some(body) = body {
            request = request.header("Prefer", RETURN_REPRESENTATION).json(&body);
        }

        let started = Instant::now();
        let result = request.send().await;
        let elapsed = started.elapsed().as_millis() as u64;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                log_data_operation(operation, &self.table, elapsed, false);
                return Err(EventicHubError::Http(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            log_data_operation(operation, &self.table, elapsed, false);
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::from_body(status.as_u16(), &body).into());
        }

        log_data_operation(operation, &self.table, elapsed, true);
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    fn client() -> BackendClient {
        BackendClient::new(&BackendConfig {
            url: "https://project.example.co".to_string(),
            anon_key: "anon".to_string(),
            request_timeout_seconds: None,
        })
        .unwrap()
    }

    #[test]
    fn test_query_params() {
        let query = client()
            .from("events")
            .select("*, tickets (id, name)")
            .eq("is_public", true)
            .eq("status", "published")
            .order("start_date", Order::Ascending);

        assert_eq!(query.table(), "events");
        assert_eq!(
            query.params(),
            &[
                ("select".to_string(), "*,tickets(id,name)".to_string()),
                ("is_public".to_string(), "eq.true".to_string()),
                ("status".to_string(), "eq.published".to_string()),
                ("order".to_string(), "start_date.asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_select_for_writes() {
        let query = client().from("tickets").eq("id", 7).with_default_select();
        assert!(query.params().contains(&("select".to_string(), "*".to_string())));

        let query = client().from("tickets").select("id").with_default_select();
        assert_eq!(query.params().iter().filter(|(k, _)| k == "select").count(), 1);
    }
}

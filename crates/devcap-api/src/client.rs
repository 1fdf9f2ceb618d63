use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use devcap_core::{
    Band, CapabilityQuery, CapabilityRow, Combo, Device, DeviceDetail, Feature, Provider,
};

use crate::backend::{merge_device_matches, CapabilityBackend};
use crate::config::Config;
use crate::queries::{self, Lookup};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    query: &'a str,
    operation_name: &'a str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Blocking client for the capability GraphQL endpoint.
#[derive(Clone)]
pub struct DevcapClient {
    api_url: String,
    auth_token: Option<String>,
    client: Client,
}

impl DevcapClient {
    pub fn new(api_url: String, auth_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("devcap/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_url,
            auth_token,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.token.clone(), config.timeout)
    }

    /// Execute one operation and return its `data` payload.
    fn execute(&self, document: &str, operation_name: &str, variables: &Value) -> Result<Value> {
        let start = Instant::now();
        let mut request = self.client.post(&self.api_url).json(&GraphQlRequest {
            query: document,
            operation_name,
            variables,
        });
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .with_context(|| format!("Failed to send {operation_name} request"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            anyhow::bail!("{} failed ({}): {}", operation_name, status, error_text);
        }

        let body: GraphQlResponse = response
            .json()
            .with_context(|| format!("Failed to parse {operation_name} response"))?;
        log::debug!("{} finished in {:?}", operation_name, start.elapsed());

        into_data(body)
    }

    fn fetch_list<T: DeserializeOwned>(&self, lookup: &Lookup, variables: &Value) -> Result<Vec<T>> {
        let mut data = self.execute(lookup.document, lookup.name, variables)?;
        take_list(&mut data, lookup.field)
    }
}

impl CapabilityBackend for DevcapClient {
    fn search_devices(&self, text: &str) -> Result<Vec<Device>> {
        let lookup = &queries::SEARCH_DEVICES;
        let mut data = self.execute(lookup.document, lookup.name, &json!({ "text": text }))?;
        let by_vendor: Vec<Device> = take_list(&mut data, lookup.field)?;
        let by_model: Vec<Device> = take_list(&mut data, queries::SEARCH_DEVICES_MODEL_FIELD)?;
        Ok(merge_device_matches(by_vendor, by_model))
    }

    fn device_detail(&self, device_id: &str) -> Result<Option<DeviceDetail>> {
        let lookup = &queries::DEVICE_DETAIL;
        let mut data = self.execute(lookup.document, lookup.name, &json!({ "id": device_id }))?;
        match take_field(&mut data, lookup.field)? {
            Value::Null => Ok(None),
            value => serde_json::from_value(value)
                .map(Some)
                .context("Failed to parse device detail"),
        }
    }

    fn capability_rows(&self, query: &CapabilityQuery) -> Result<Vec<CapabilityRow>> {
        let operation = query.operation();
        log::debug!(
            "Running {} for {} {}",
            operation.name,
            query.kind(),
            query.capability_id()
        );
        let mut data = self.execute(&query.document(), operation.name, &query.variables())?;
        take_list(&mut data, query.result_field())
    }

    fn search_bands(&self, text: &str) -> Result<Vec<Band>> {
        self.fetch_list(&queries::SEARCH_BANDS, &json!({ "text": text }))
    }

    fn search_combos(&self, text: &str) -> Result<Vec<Combo>> {
        self.fetch_list(&queries::SEARCH_COMBOS, &json!({ "text": text }))
    }

    fn search_features(&self, text: &str) -> Result<Vec<Feature>> {
        self.fetch_list(&queries::SEARCH_FEATURES, &json!({ "text": text }))
    }

    fn providers(&self) -> Result<Vec<Provider>> {
        self.fetch_list(&queries::PROVIDERS, &json!({}))
    }
}

/// Backend `errors` win over partial data and are reported verbatim.
pub(crate) fn into_data(body: GraphQlResponse) -> Result<Value> {
    if !body.errors.is_empty() {
        let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
        anyhow::bail!("Backend returned errors: {}", messages.join("; "));
    }
    body.data.context("Backend response contained no data")
}

fn take_field(data: &mut Value, field: &str) -> Result<Value> {
    data.get_mut(field)
        .map(Value::take)
        .with_context(|| format!("Response is missing field '{field}'"))
}

/// A `null` list means no rows.
pub(crate) fn take_list<T: DeserializeOwned>(data: &mut Value, field: &str) -> Result<Vec<T>> {
    match take_field(data, field)? {
        Value::Null => Ok(Vec::new()),
        value => serde_json::from_value(value)
            .with_context(|| format!("Failed to parse '{field}' rows")),
    }
}

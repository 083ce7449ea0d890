//! Provider implementation for Ekonovus using its published Power BI report.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use ekonovus_core::{
    model::{Address, ProviderId, ProviderMeta, WasteObjectId},
    ports::{PortError, SchedulePort, WasteObjectPort},
    service::ScheduleService,
};

/// Pickup date measure parsing.
pub mod dates;
/// Report query documents.
pub mod query;
mod response;

/// Public `querydata` endpoint serving the report.
pub const API_URL: &str =
    "https://wabi-west-europe-d-primary-api.analysis.windows.net/public/reports/querydata?synchronous=true";

/// Resource key of the published Ekonovus schedule report.
pub const DEFAULT_RESOURCE_KEY: &str = "d86dc3d4-e915-4460-b12e-c925d3ae6c75";

const RESOURCE_KEY_HEADER: &str = "X-PowerBI-ResourceKey";

#[derive(Debug, Clone)]
/// Endpoint and credentials for the report API.
pub struct PowerBiConfig {
    /// Full `querydata` URL, including the `synchronous` flag.
    pub api_url: String,
    /// Report resource key sent with every request.
    pub resource_key: String,
}

impl PowerBiConfig {
    /// Default endpoint with an optional resource key override.
    #[must_use]
    pub fn with_resource_key(resource_key: Option<String>) -> Self {
        Self {
            resource_key: resource_key.unwrap_or_else(|| DEFAULT_RESOURCE_KEY.to_owned()),
            ..Self::default()
        }
    }
}

impl Default for PowerBiConfig {
    fn default() -> Self {
        Self {
            api_url: API_URL.to_owned(),
            resource_key: DEFAULT_RESOURCE_KEY.to_owned(),
        }
    }
}

/// Client posting query documents to the report endpoint.
#[derive(Clone)]
pub struct PowerBiClient {
    client: Client,
    config: PowerBiConfig,
}

impl PowerBiClient {
    /// Create a client bound to the given HTTP client and endpoint.
    #[must_use]
    pub fn new(client: Client, config: PowerBiConfig) -> Self {
        Self { client, config }
    }

    /// Send a query document and return the decoded response body.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Backend`] for vendor error documents, and a network,
    /// status or decode error when the exchange itself fails.
    pub async fn query(&self, document: &Value) -> Result<Value, PortError> {
        tracing::trace!(%document, "posting report query");

        let req = self
            .client
            .post(&self.config.api_url)
            .header(RESOURCE_KEY_HEADER, &self.config.resource_key)
            .json(document);

        fetch_json(req).await
    }
}

/// Waste object lookup for Ekonovus addresses.
pub struct EkonovusWasteObjectPort {
    client: PowerBiClient,
    meta: ProviderMeta,
}

impl EkonovusWasteObjectPort {
    /// Create a new waste object port bound to the given report client.
    #[must_use]
    pub fn new(client: PowerBiClient) -> Self {
        Self {
            client,
            meta: provider_meta(),
        }
    }
}

#[async_trait]
impl WasteObjectPort for EkonovusWasteObjectPort {
    fn provider(&self) -> &ProviderMeta {
        &self.meta
    }

    async fn waste_objects(&self, address: &Address) -> Result<Vec<WasteObjectId>, PortError> {
        let document = query::waste_objects_query(&address.match_key(), address.region_key());

        let body = self.client.query(&document).await?;
        let ids = response::waste_object_ids(body)?;

        tracing::debug!(%address, count = ids.len(), "backend listed waste objects");

        Ok(ids)
    }
}

/// Pickup date lookup for single Ekonovus waste objects.
pub struct EkonovusSchedulePort {
    client: PowerBiClient,
}

impl EkonovusSchedulePort {
    /// Create a new schedule port bound to the given report client.
    #[must_use]
    pub fn new(client: PowerBiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SchedulePort for EkonovusSchedulePort {
    async fn pickup_dates(
        &self,
        address: &Address,
        waste_object: &WasteObjectId,
    ) -> Result<Vec<NaiveDate>, PortError> {
        let document = query::pickup_dates_query(
            &address.match_key(),
            address.region_key(),
            waste_object.as_str(),
        );

        let body = self.client.query(&document).await?;
        let measure = response::pickup_dates_measure(body)?;

        tracing::trace!(%waste_object, %measure, "raw pickup dates");

        dates::parse_pickup_dates(&measure)
    }
}

/// Build the schedule service backed by the Ekonovus report.
#[must_use]
pub fn service(client: Client, config: PowerBiConfig) -> ScheduleService {
    let report = PowerBiClient::new(client, config);
    let waste_object_port = Arc::new(EkonovusWasteObjectPort::new(report.clone()));
    let schedule_port = Arc::new(EkonovusSchedulePort::new(report));

    ScheduleService::new(waste_object_port, schedule_port)
}

fn provider_meta() -> ProviderMeta {
    ProviderMeta {
        id: ProviderId(String::from("ekonovus")),
        name: String::from("Ekonovus"),
        description: String::from("Source for UAB \"Ekonovus\""),
        url: String::from("https://www.ekonovus.lt/aptarnavimo-grafikai/"),
    }
}

// Vendor error documents win over the HTTP status, since the report API uses
// them to describe rejected queries.
async fn fetch_json(req: RequestBuilder) -> Result<Value, PortError> {
    let resp = req.send().await.map_err(PortError::from)?;
    let status = resp.status();
    let bytes = resp.bytes().await.map_err(PortError::from)?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(body) => {
            response::check_for_backend_error(&body)?;
            if status.is_success() {
                Ok(body)
            } else {
                Err(PortError::Status(status.as_u16()))
            }
        }
        Err(err) if status.is_success() => Err(PortError::from(err)),
        Err(_) => Err(PortError::Status(status.as_u16())),
    }
}

//! Traits describing provider capabilities and the shared error type.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;

use crate::model::{Address, ProviderMeta, WasteObjectId};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the provider backend.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Response body was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] JsonError),
    /// Backend answered with a non-success status and no error document.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),
    /// Backend returned an error document.
    #[error("Error: failed to fetch data, got status: {0}")]
    Backend(String),
    /// Response JSON lacks a field the lookup relies on.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// A pickup date could not be parsed.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),
}

#[async_trait]
/// Trait for backends resolving which waste objects serve an address.
pub trait WasteObjectPort: Send + Sync {
    /// Metadata describing the provider behind this port.
    fn provider(&self) -> &ProviderMeta;

    /// List the waste objects registered for the address, in backend order.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the backend reports an error.
    async fn waste_objects(&self, address: &Address) -> Result<Vec<WasteObjectId>, PortError>;
}

#[async_trait]
/// Trait for backends listing the pickup dates of a single waste object.
pub trait SchedulePort: Send + Sync {
    /// Fetch upcoming pickup dates for a waste object at the address.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails, the backend reports an error,
    /// or a date cannot be parsed.
    async fn pickup_dates(
        &self,
        address: &Address,
        waste_object: &WasteObjectId,
    ) -> Result<Vec<NaiveDate>, PortError>;
}

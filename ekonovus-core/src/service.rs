//! High-level service facade combining both provider ports.

use std::sync::Arc;

use crate::model::{Address, CollectionEvent, ProviderMeta, WasteObjectFilter, WasteObjectId};
use crate::ports::{PortError, SchedulePort, WasteObjectPort};

/// Public entry point for looking up collection schedules.
pub struct ScheduleService {
    waste_object_port: Arc<dyn WasteObjectPort>,
    schedule_port: Arc<dyn SchedulePort>,
}

impl ScheduleService {
    /// Create a new service bound to the provided ports.
    #[must_use]
    pub fn new(
        waste_object_port: Arc<dyn WasteObjectPort>,
        schedule_port: Arc<dyn SchedulePort>,
    ) -> Self {
        Self {
            waste_object_port,
            schedule_port,
        }
    }

    /// Metadata of the provider answering lookups.
    #[must_use]
    pub fn provider(&self) -> &ProviderMeta {
        self.waste_object_port.provider()
    }

    /// Resolve the waste objects serving an address and apply the allow-list.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the provider request fails.
    pub async fn waste_objects(
        &self,
        address: &Address,
        filter: &WasteObjectFilter,
    ) -> Result<Vec<WasteObjectId>, PortError> {
        let resolved = self.waste_object_port.waste_objects(address).await?;
        let resolved_count = resolved.len();
        let kept = filter.apply(resolved);

        tracing::debug!(
            %address,
            resolved = resolved_count,
            kept = kept.len(),
            "resolved waste objects"
        );

        Ok(kept)
    }

    /// Load every collection event for an address.
    ///
    /// Objects are queried one after another; events keep the object order and
    /// the date order reported by the backend.
    ///
    /// # Errors
    ///
    /// Returns the first [`PortError`] raised by any request. No partial schedule
    /// is returned in that case.
    pub async fn fetch(
        &self,
        address: &Address,
        filter: &WasteObjectFilter,
    ) -> Result<Vec<CollectionEvent>, PortError> {
        let waste_objects = self.waste_objects(address, filter).await?;

        let mut events = Vec::new();

        for waste_object in &waste_objects {
            let dates = self
                .schedule_port
                .pickup_dates(address, waste_object)
                .await?;

            tracing::debug!(%waste_object, dates = dates.len(), "loaded pickup dates");

            let waste_type = waste_object.waste_type();
            events.extend(
                dates
                    .into_iter()
                    .map(|date| CollectionEvent::new(date, waste_type)),
            );
        }

        tracing::info!(%address, events = events.len(), "schedule loaded");

        Ok(events)
    }
}

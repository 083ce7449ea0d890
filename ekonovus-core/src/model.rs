//! Domain data structures for addresses, waste objects, and collection events.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Icon per waste type label, as published by the operator.
const ICONS: [(&str, &str); 4] = [
    ("Komunalinės", "mdi:trash-can"),
    ("Pakuotė", "mdi:recycle"),
    ("Stiklas", "mdi:glass-fragile"),
    ("Žaliųjų atliekų", "mdi:leaf"),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a schedule provider.
pub struct ProviderId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a schedule provider.
pub struct ProviderMeta {
    /// Unique identifier.
    pub id: ProviderId,
    /// Display name.
    pub name: String,
    /// Short description of the data source.
    pub description: String,
    /// Public page listing the schedules.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Address a schedule is looked up for.
pub struct Address {
    /// Municipality, e.g. “Vilniaus r. sav.”.
    pub region: String,
    /// Town or village, e.g. “Vilniaus m.”.
    pub district: String,
    /// Street including its type suffix, e.g. “Fabijoniškių g.”.
    pub street: String,
    /// House number including flat or building suffixes such as “24-1”.
    pub house_number: String,
}

impl Address {
    /// Build an address; the house number accepts anything printable so numeric
    /// house numbers can be passed directly.
    #[must_use]
    pub fn new<R, D, S, H>(region: R, district: D, street: S, house_number: H) -> Self
    where
        R: Into<String>,
        D: Into<String>,
        S: Into<String>,
        H: fmt::Display,
    {
        Self {
            region: region.into(),
            district: district.into(),
            street: street.into(),
            house_number: house_number.to_string(),
        }
    }

    /// Free-text key the backend matches addresses against.
    #[must_use]
    pub fn match_key(&self) -> String {
        format!("{} {} {}", self.district, self.street, self.house_number)
    }

    /// Key the backend matches the municipality against.
    #[must_use]
    pub fn region_key(&self) -> &str {
        &self.region
    }
}

impl fmt::Display for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}, {}, {} {}",
            self.region, self.district, self.street, self.house_number
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Waste object identifier as published by the backend, e.g. `55-L-39605 (Pakuotė)`.
pub struct WasteObjectId(pub String);

impl WasteObjectId {
    /// Raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading token before the first space, e.g. `55-L-39605`.
    #[must_use]
    pub fn code(&self) -> &str {
        self.0.split_once(' ').map_or(self.0.as_str(), |(code, _)| code)
    }

    /// Label between the first pair of parentheses, empty when there is none.
    #[must_use]
    pub fn waste_type(&self) -> &str {
        self.0
            .split_once('(')
            .and_then(|(_, rest)| rest.split_once(')'))
            .map_or("", |(label, _)| label)
    }
}

impl fmt::Display for WasteObjectId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for WasteObjectId {
    fn from(raw: &str) -> Self {
        WasteObjectId(raw.to_owned())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Allow-list of waste object codes. An empty filter keeps everything.
pub struct WasteObjectFilter {
    codes: HashSet<String>,
}

impl WasteObjectFilter {
    /// Filter keeping only objects whose code is listed.
    #[must_use]
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the filter lets every object through.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Check a single waste object against the allow-list.
    #[must_use]
    pub fn allows(&self, waste_object: &WasteObjectId) -> bool {
        self.is_empty() || self.codes.contains(waste_object.code())
    }

    /// Keep the allowed objects, preserving their order.
    #[must_use]
    pub fn apply(&self, waste_objects: Vec<WasteObjectId>) -> Vec<WasteObjectId> {
        waste_objects
            .into_iter()
            .filter(|waste_object| self.allows(waste_object))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Scheduled pickup of one waste type on a specific day.
pub struct CollectionEvent {
    /// Date of the pickup.
    pub date: NaiveDate,
    /// Waste type label in the operator's language.
    pub waste_type: String,
    /// Material Design icon for the waste type, if one is known.
    pub icon: Option<String>,
}

impl CollectionEvent {
    /// Build an event, looking the icon up by waste type.
    #[must_use]
    pub fn new(date: NaiveDate, waste_type: &str) -> Self {
        Self {
            date,
            waste_type: waste_type.to_owned(),
            icon: icon_for(waste_type).map(str::to_owned),
        }
    }
}

/// Icon for a waste type label; `None` for labels outside the table.
#[must_use]
pub fn icon_for(waste_type: &str) -> Option<&'static str> {
    ICONS
        .iter()
        .find(|(label, _)| *label == waste_type)
        .map(|(_, icon)| *icon)
}

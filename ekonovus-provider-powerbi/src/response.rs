//! Decoding of `querydata` responses.
//!
//! Only the first data shape of the first result is read; its rows carry the object
//! identifiers (`G0`) or the date measure (`M0`).

use serde::Deserialize;
use serde_json::Value;

use ekonovus_core::{model::WasteObjectId, ports::PortError};

/// Top level response from /public/reports/querydata
#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    result: ResultBody,
}

#[derive(Debug, Deserialize)]
struct ResultBody {
    data: ResultData,
}

#[derive(Debug, Deserialize)]
struct ResultData {
    dsr: DataShapeResult,
}

#[derive(Debug, Deserialize)]
struct DataShapeResult {
    #[serde(rename = "DS")]
    data_shapes: Vec<DataShape>,
}

#[derive(Debug, Deserialize)]
struct DataShape {
    #[serde(rename = "PH")]
    hierarchies: Vec<Hierarchy>,
}

#[derive(Debug, Deserialize)]
struct Hierarchy {
    #[serde(rename = "DM0", default)]
    rows: Vec<Row>,
}

/// One data member row; which column is set depends on the query.
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "G0")]
    group: Option<String>,
    #[serde(rename = "M0")]
    measure: Option<String>,
}

/// Fail with [`PortError::Backend`] when the body is a vendor error document.
pub(crate) fn check_for_backend_error(body: &Value) -> Result<(), PortError> {
    let Some(error) = body.get("error") else {
        return Ok(());
    };

    let message = error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.get("code").and_then(Value::as_str))
        .map_or_else(|| error.to_string(), str::to_owned);

    tracing::warn!(%message, "backend returned an error document");

    Err(PortError::Backend(message))
}

/// Object identifiers from `results[0].result.data.dsr.DS[0].PH[0].DM0[*].G0`.
pub(crate) fn waste_object_ids(body: Value) -> Result<Vec<WasteObjectId>, PortError> {
    rows(body)?
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            row.group.map(WasteObjectId).ok_or_else(|| {
                PortError::MalformedResponse(format!("DM0[{index}].G0 is missing"))
            })
        })
        .collect()
}

/// Raw date list from `results[0].result.data.dsr.DS[0].PH[0].DM0[0].M0`.
pub(crate) fn pickup_dates_measure(body: Value) -> Result<String, PortError> {
    rows(body)?
        .into_iter()
        .next()
        .ok_or_else(|| PortError::MalformedResponse("DM0[0] is missing".to_owned()))?
        .measure
        .ok_or_else(|| PortError::MalformedResponse("DM0[0].M0 is missing".to_owned()))
}

fn rows(body: Value) -> Result<Vec<Row>, PortError> {
    check_for_backend_error(&body)?;

    let response = serde_json::from_value::<QueryResponse>(body)
        .map_err(|err| PortError::MalformedResponse(err.to_string()))?;

    let result = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| PortError::MalformedResponse("results[0] is missing".to_owned()))?;

    let data_shape = result
        .result
        .data
        .dsr
        .data_shapes
        .into_iter()
        .next()
        .ok_or_else(|| PortError::MalformedResponse("DS[0] is missing".to_owned()))?;

    let hierarchy = data_shape
        .hierarchies
        .into_iter()
        .next()
        .ok_or_else(|| PortError::MalformedResponse("PH[0] is missing".to_owned()))?;

    Ok(hierarchy.rows)
}

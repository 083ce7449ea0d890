//! Query documents for the Ekonovus Power BI report.
//!
//! Both documents are fixed vendor templates. Only the composed address, the region,
//! and (for the per-object query) the waste object identifier are substituted; every
//! other field has to stay exactly as the report's own visuals send it.

use serde_json::{Value, json};

/// Schedules hidden from the public report.
pub const EXCLUDED_SCHEDULE_IDS: [&str; 14] = [
    "7127L", "7128L", "7129L", "7131L", "7132L", "7133L", "7134L", "7135L", "7136L", "7137L",
    "7138L", "7139L", "7140L", "7141L",
];

/// Object codes containing either spelling mark internal refuse containers.
pub const REFUSE_CODE_MARKERS: [&str; 2] = ["siuk", "šiuk"];

const DATASET_ID: &str = "90015897-045e-4f68-8f83-c40d1fc3bfc2";
const REPORT_ID: &str = "06fc8043-9afa-43d6-88cc-3a1e73aaf964";
const MODEL_ID: u64 = 1_026_609;
const WASTE_OBJECTS_VISUAL_ID: &str = "cfba850d0ce48eb9e44d";
const PICKUP_DATES_VISUAL_ID: &str = "161c6ed98b10564c91b7";

// Source aliases used inside the semantic query.
const WASTE_OBJECT: &str = "w";
const ALL_ADDRESSES: &str = "a";
const SCHEDULE_DATES: &str = "s";
const TERRITORY: &str = "t";
const SCHEDULE: &str = "s1";

const OBJECT_CODE_PROPERTY: &str = "Inventorinis nr.";

/// Query listing the waste object identifiers registered for an address.
#[must_use]
pub fn waste_objects_query(address_key: &str, region: &str) -> Value {
    let from = vec![
        source(WASTE_OBJECT, "WasteObject"),
        source(ALL_ADDRESSES, "AllAddresses"),
        source(SCHEDULE_DATES, "ScheduleDates"),
        source(TERRITORY, "Teritorijos konteinerių tvarkaraščiams"),
        source(SCHEDULE, "Schedule"),
    ];

    let select = json!({
        "Column": property(WASTE_OBJECT, OBJECT_CODE_PROPERTY),
        "Name": "WasteObject.reikia"
    });

    let binding = json!({
        "Primary": { "Groupings": [{ "Projections": [0] }] },
        "DataReduction": { "DataVolume": 3, "Primary": { "Window": {} } },
        "IncludeEmptyGroups": true,
        "Version": 1
    });

    document(
        from,
        select,
        conditions(address_key, region, None),
        binding,
        WASTE_OBJECTS_VISUAL_ID,
    )
}

/// Query returning the comma separated pickup dates of one waste object.
#[must_use]
pub fn pickup_dates_query(address_key: &str, region: &str, waste_object: &str) -> Value {
    let from = vec![
        source(SCHEDULE_DATES, "ScheduleDates"),
        source(WASTE_OBJECT, "WasteObject"),
        source(ALL_ADDRESSES, "AllAddresses"),
        source(TERRITORY, "Teritorijos konteinerių tvarkaraščiams"),
        source(SCHEDULE, "Schedule"),
    ];

    let select = json!({
        "Measure": property(SCHEDULE_DATES, "Datos"),
        "Name": "ScheduleDates.Datos"
    });

    let binding = json!({
        "Primary": { "Groupings": [{ "Projections": [0] }] },
        "DataReduction": { "DataVolume": 3, "Primary": { "Top": {} } },
        "Version": 1
    });

    document(
        from,
        select,
        conditions(address_key, region, Some(waste_object)),
        binding,
        PICKUP_DATES_VISUAL_ID,
    )
}

fn document(
    from: Vec<Value>,
    select: Value,
    conditions: Vec<Value>,
    binding: Value,
    visual_id: &str,
) -> Value {
    json!({
        "version": "1.0.0",
        "queries": [{
            "Query": {
                "Commands": [{
                    "SemanticQueryDataShapeCommand": {
                        "Query": {
                            "Version": 2,
                            "From": from,
                            "Select": [select],
                            "Where": conditions
                        },
                        "Binding": binding,
                        "ExecutionMetricsKind": 1
                    }
                }]
            },
            "QueryId": "",
            "ApplicationContext": {
                "DatasetId": DATASET_ID,
                "Sources": [{ "ReportId": REPORT_ID, "VisualId": visual_id }]
            }
        }],
        "cancelQueries": [],
        "modelId": MODEL_ID
    })
}

fn conditions(address_key: &str, region: &str, waste_object: Option<&str>) -> Vec<Value> {
    let mut conditions = vec![equals(
        column(WASTE_OBJECT, "Adresas"),
        &quoted(address_key),
    )];

    if let Some(waste_object) = waste_object {
        conditions.push(equals(
            column(WASTE_OBJECT, OBJECT_CODE_PROPERTY),
            &quoted(waste_object),
        ));
    }

    conditions.push(equals(column(ALL_ADDRESSES, "District"), &quoted(region)));
    conditions.push(equals(column(SCHEDULE_DATES, "Future"), "'true'"));
    conditions.push(equals(column(TERRITORY, "Rodomas tvarkaraštis"), "'1'"));
    conditions.push(equals(column(SCHEDULE_DATES, "OverNextRun"), "true"));
    conditions.push(excluded_schedules());
    conditions.push(without_refuse_markers());

    conditions
}

fn excluded_schedules() -> Value {
    let values: Vec<Value> = EXCLUDED_SCHEDULE_IDS
        .iter()
        .map(|id| json!([literal(id)]))
        .collect();

    json!({
        "Condition": {
            "Not": {
                "Expression": {
                    "In": {
                        "Expressions": [column(SCHEDULE, "ScheduleId")],
                        "Values": values
                    }
                }
            }
        }
    })
}

fn without_refuse_markers() -> Value {
    let [plain, accented] = REFUSE_CODE_MARKERS;

    json!({
        "Condition": {
            "And": {
                "Left": not_contains(plain),
                "Right": not_contains(accented)
            }
        }
    })
}

fn not_contains(marker: &str) -> Value {
    json!({
        "Not": {
            "Expression": {
                "Contains": {
                    "Left": column(WASTE_OBJECT, OBJECT_CODE_PROPERTY),
                    "Right": literal(&quoted(marker))
                }
            }
        }
    })
}

fn equals(expression: Value, value: &str) -> Value {
    json!({
        "Condition": {
            "In": {
                "Expressions": [expression],
                "Values": [[literal(value)]]
            }
        }
    })
}

fn source(name: &str, entity: &str) -> Value {
    json!({ "Name": name, "Entity": entity, "Type": 0 })
}

fn column(source: &str, property_name: &str) -> Value {
    json!({ "Column": property(source, property_name) })
}

fn property(source: &str, property_name: &str) -> Value {
    json!({
        "Expression": { "SourceRef": { "Source": source } },
        "Property": property_name
    })
}

fn literal(value: &str) -> Value {
    json!({ "Literal": { "Value": value } })
}

// Text literals are single quoted in the semantic query grammar.
fn quoted(value: &str) -> String {
    format!("'{value}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS_KEY: &str = "Vilniaus m. Fabijoniškių g. 24-1";
    const REGION: &str = "Vilniaus r. sav.";

    fn compact(fixture: &str) -> &str {
        fixture.trim_end()
    }

    #[test]
    fn waste_objects_query_matches_report_payload() {
        let query = waste_objects_query(ADDRESS_KEY, REGION);

        assert_eq!(
            serde_json::to_string(&query).expect("serialize"),
            compact(include_str!("../fixtures/waste_objects_query.json")),
            "payload must match the report visual byte for byte"
        );
    }

    #[test]
    fn pickup_dates_query_matches_report_payload() {
        let query = pickup_dates_query(ADDRESS_KEY, REGION, "12-K-001 (Komunalinės)");

        assert_eq!(
            serde_json::to_string(&query).expect("serialize"),
            compact(include_str!("../fixtures/pickup_dates_query.json")),
            "payload must match the report visual byte for byte"
        );
    }

    #[test]
    fn substitution_points_are_quoted_literals() {
        let query = pickup_dates_query("Kaimas Gatvė 1", "Rajonas", "1-A (Stiklas)");
        let conditions = query
            .pointer("/queries/0/Query/Commands/0/SemanticQueryDataShapeCommand/Query/Where")
            .and_then(Value::as_array)
            .expect("where clause");

        let literal_at = |index: usize| {
            conditions
                .get(index)
                .and_then(|condition| {
                    condition.pointer("/Condition/In/Values/0/0/Literal/Value")
                })
                .and_then(Value::as_str)
        };

        assert_eq!(literal_at(0), Some("'Kaimas Gatvė 1'"), "address");
        assert_eq!(literal_at(1), Some("'1-A (Stiklas)'"), "waste object");
        assert_eq!(literal_at(2), Some("'Rajonas'"), "region");
    }

    #[test]
    fn waste_objects_query_has_no_object_filter() {
        let query = waste_objects_query(ADDRESS_KEY, REGION);
        let conditions = query
            .pointer("/queries/0/Query/Commands/0/SemanticQueryDataShapeCommand/Query/Where")
            .and_then(Value::as_array)
            .expect("where clause");

        assert_eq!(conditions.len(), 7, "seven fixed conditions");
        assert!(
            !serde_json::to_string(&query)
                .expect("serialize")
                .contains("ScheduleDates.Datos"),
            "selects the object column only"
        );
    }

    #[test]
    fn exclusion_list_is_complete() {
        let condition = excluded_schedules();
        let values = condition
            .pointer("/Condition/Not/Expression/In/Values")
            .and_then(Value::as_array)
            .expect("values");

        assert_eq!(values.len(), 14, "fourteen excluded schedules");
        assert!(
            !EXCLUDED_SCHEDULE_IDS.contains(&"7130L"),
            "7130 stays visible"
        );
    }
}

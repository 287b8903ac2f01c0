//! Parsing of Cloud Controller v2 responses returned by `cf curl`.

use serde::Deserialize;
use serde_json::Value;

use crate::{AppSummary, CfError, Result, Route};

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ResourceList<T> {
    #[serde(default)]
    resources: Vec<Resource<T>>,
}

#[derive(Debug, Deserialize)]
struct Resource<T> {
    metadata: Metadata,
    entity: T,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    guid: String,
}

#[derive(Debug, Deserialize)]
struct AppEntity {
    state: String,
}

#[derive(Debug, Deserialize)]
struct RouteEntity {
    host: String,
    domain: Option<Resource<DomainEntity>>,
}

#[derive(Debug, Deserialize)]
struct DomainEntity {
    name: String,
}

/// `v2/apps` query for an app name within one space.
#[must_use]
pub fn app_query_path(name: &str, space_guid: &str) -> String {
    format!(
        "v2/apps?q=name:{}&q=space_guid:{}",
        query_escape(name),
        query_escape(space_guid)
    )
}

#[must_use]
pub fn app_routes_path(app_guid: &str) -> String {
    format!("v2/apps/{app_guid}/routes?inline-relations-depth=1")
}

fn query_escape(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Decide whether an app query matched exactly one app in the given space.
///
/// `total_results` must be present and numeric. The app exists only when it
/// equals 1 and, if the response lists resources, exactly one of them belongs
/// to `space_guid`. Zero or several matches both mean "does not exist".
///
/// # Errors
///
/// Returns an error if the response is not JSON or `total_results` is missing
/// or not a number.
pub fn parse_app_exists(json: &str, space_guid: &str) -> Result<bool> {
    let response: Value = serde_json::from_str(json).map_err(CfError::InvalidJson)?;

    let total_results = response
        .get("total_results")
        .ok_or(CfError::MissingTotalResults)?;
    let count = total_results
        .as_f64()
        .ok_or_else(|| CfError::InvalidTotalResults {
            value: display_value(total_results),
        })?;

    if (count - 1.0).abs() > f64::EPSILON {
        return Ok(false);
    }

    let space_matches = match response.get("resources").and_then(Value::as_array) {
        Some(resources) => resources
            .iter()
            .filter(|resource| {
                resource.pointer("/entity/space_guid").and_then(Value::as_str) == Some(space_guid)
            })
            .count(),
        None => 1,
    };

    Ok(space_matches == 1)
}

/// First app of an app query, or `None` when nothing matched.
///
/// # Errors
///
/// Returns an error if the response is not a valid resource list.
pub fn parse_app_summary(json: &str) -> Result<Option<AppSummary>> {
    let list: ResourceList<AppEntity> = serde_json::from_str(json).map_err(CfError::InvalidJson)?;

    Ok(list.resources.into_iter().next().map(|resource| AppSummary {
        guid: resource.metadata.guid,
        state: resource.entity.state,
    }))
}

/// First route of a route list, with its domain inlined.
///
/// Returns `None` when the list is empty or the domain was not inlined.
///
/// # Errors
///
/// Returns an error if the response is not a valid resource list.
pub fn parse_first_route(json: &str) -> Result<Option<Route>> {
    let list: ResourceList<RouteEntity> =
        serde_json::from_str(json).map_err(CfError::InvalidJson)?;

    Ok(list.resources.into_iter().find_map(|resource| {
        let RouteEntity { host, domain } = resource.entity;
        domain.map(|domain| Route {
            host,
            domain: domain.entity.name,
        })
    }))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! CRUD endpoints for the airline resources.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Aircraft, Airline, Flight, Gate, Passenger, RecordId, Terminal};

/// A REST collection exposed by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Airlines,
    Aircraft,
    Terminals,
    Gates,
    Flights,
    Passengers,
    Tickets,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Airlines,
        Resource::Aircraft,
        Resource::Terminals,
        Resource::Gates,
        Resource::Flights,
        Resource::Passengers,
        Resource::Tickets,
    ];

    /// Collection path, also the name used in console URLs.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Airlines => "airlines",
            Resource::Aircraft => "aircraft",
            Resource::Terminals => "terminals",
            Resource::Gates => "gates",
            Resource::Flights => "flights",
            Resource::Passengers => "passengers",
            Resource::Tickets => "tickets",
        }
    }

    /// Singular entity name, as it appears in method names like `createGate`.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Resource::Airlines => "Airline",
            Resource::Aircraft => "Aircraft",
            Resource::Terminals => "Terminal",
            Resource::Gates => "Gate",
            Resource::Flights => "Flight",
            Resource::Passengers => "Passenger",
            Resource::Tickets => "Ticket",
        }
    }

    /// Heading of the console panel.
    pub fn title(&self) -> &'static str {
        match self {
            Resource::Airlines => "Airlines",
            Resource::Aircraft => "Aircraft",
            Resource::Terminals => "Terminals",
            Resource::Gates => "Gates",
            Resource::Flights => "Flights",
            Resource::Passengers => "Passengers",
            Resource::Tickets => "Tickets",
        }
    }

    fn record_path(&self, id: &RecordId) -> String {
        format!("{}/{}", self.path(), id)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Raw records, passed through exactly as the API sent them.
pub async fn get_all(client: &ApiClient, resource: Resource) -> Result<Vec<Value>, ApiError> {
    client.get_list(resource.path()).await
}

pub async fn create(client: &ApiClient, resource: Resource, record: &Value) -> Result<Value, ApiError> {
    client.post(resource.path(), record).await
}

pub async fn update(
    client: &ApiClient,
    resource: Resource,
    id: &RecordId,
    record: &Value,
) -> Result<Value, ApiError> {
    client.put(&resource.record_path(id), record).await
}

pub async fn delete(client: &ApiClient, resource: Resource, id: &RecordId) -> Result<(), ApiError> {
    client.delete(&resource.record_path(id)).await
}

// Typed listings, used for lookups and the booking pages.

/// Decodes each record on its own. A record that does not fit `T` is logged
/// and skipped; the rest of the list is kept.
pub fn decode_each<T: DeserializeOwned>(resource: Resource, records: Vec<Value>) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Skipping {} record {}: {}", resource.entity_name(), id, e);
                    None
                }
            }
        })
        .collect()
}

async fn typed_list<T: DeserializeOwned>(client: &ApiClient, resource: Resource) -> Result<Vec<T>, ApiError> {
    Ok(decode_each(resource, get_all(client, resource).await?))
}

pub async fn airlines(client: &ApiClient) -> Result<Vec<Airline>, ApiError> {
    typed_list(client, Resource::Airlines).await
}

pub async fn aircraft(client: &ApiClient) -> Result<Vec<Aircraft>, ApiError> {
    typed_list(client, Resource::Aircraft).await
}

pub async fn terminals(client: &ApiClient) -> Result<Vec<Terminal>, ApiError> {
    typed_list(client, Resource::Terminals).await
}

pub async fn gates(client: &ApiClient) -> Result<Vec<Gate>, ApiError> {
    typed_list(client, Resource::Gates).await
}

pub async fn flights(client: &ApiClient) -> Result<Vec<Flight>, ApiError> {
    typed_list(client, Resource::Flights).await
}

pub async fn flight(client: &ApiClient, id: &RecordId) -> Result<Flight, ApiError> {
    client.get_one(&Resource::Flights.record_path(id)).await
}

pub async fn passengers(client: &ApiClient) -> Result<Vec<Passenger>, ApiError> {
    typed_list(client, Resource::Passengers).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names_round_trip_through_urls() {
        for resource in Resource::ALL {
            let parsed: Resource =
                serde_json::from_value(Value::String(resource.path().to_string())).unwrap();
            assert_eq!(parsed, resource);
        }
    }

    #[test]
    fn test_decode_each_skips_records_that_do_not_fit() {
        let records = vec![
            serde_json::json!({ "id": "kc", "name": "Air Astana", "code": "KC", "country": "Kazakhstan" }),
            serde_json::json!({ "id": "dv", "name": "SCAT", "logo": { "url": "scat.png" } }),
            serde_json::json!({ "id": "fs", "name": "FlyArystan", "code": "KC*" }),
        ];
        let airlines: Vec<Airline> = decode_each(Resource::Airlines, records);
        let ids: Vec<&str> = airlines.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["kc", "fs"]);
    }

    #[test]
    fn test_record_path() {
        assert_eq!(Resource::Gates.record_path(&RecordId::from("g7")), "gates/g7");
    }
}

use crate::api::{resources, ApiClient, Resource};
use crate::error::PanelError;
use crate::models::RecordId;
use crate::table::Record;

use super::EntityService;

/// Service object backed by one REST collection of the remote API.
#[derive(Clone)]
pub struct RestService {
    client: ApiClient,
    resource: Resource,
}

impl RestService {
    pub fn new(client: ApiClient, resource: Resource) -> Self {
        Self { client, resource }
    }
}

impl EntityService for RestService {
    fn entity_name(&self) -> &str {
        self.resource.entity_name()
    }

    async fn get_all(&self) -> Result<Vec<Record>, PanelError> {
        Ok(resources::get_all(&self.client, self.resource).await?)
    }

    async fn create(&self, record: Record) -> Result<Record, PanelError> {
        Ok(resources::create(&self.client, self.resource, &record).await?)
    }

    async fn update(&self, id: RecordId, record: Record) -> Result<Record, PanelError> {
        Ok(resources::update(&self.client, self.resource, &id, &record).await?)
    }

    async fn delete(&self, id: RecordId) -> Result<(), PanelError> {
        Ok(resources::delete(&self.client, self.resource, &id).await?)
    }
}

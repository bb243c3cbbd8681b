//! The operator console: one entity panel per resource.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::api::{ApiClient, Resource};
use crate::error::PanelError;
use crate::models::RecordId;
use crate::panel::catalog::{dependencies, panel_config, Lookups};
use crate::panel::{DeleteOutcome, EntityPanel, PanelView, RestService};

pub type Panel = EntityPanel<RestService>;

pub struct Console {
    client: ApiClient,
    panels: HashMap<Resource, Mutex<Panel>>,
}

impl Console {
    pub fn new(client: ApiClient) -> Self {
        let empty = Arc::new(Lookups::default());
        let panels = Resource::ALL
            .into_iter()
            .map(|resource| {
                let service = Arc::new(RestService::new(client.clone(), resource));
                let panel = EntityPanel::new(panel_config(resource, &empty), service);
                (resource, Mutex::new(panel))
            })
            .collect();
        Self { client, panels }
    }

    async fn lock(&self, resource: Resource) -> MutexGuard<'_, Panel> {
        // every Resource gets a panel in `new`
        self.panels[&resource].lock().await
    }

    /// Fetches the records and the lookups concurrently and rebuilds the
    /// descriptors with the fresh lookups.
    async fn refresh(&self, panel: &mut Panel, resource: Resource) -> Result<(), PanelError> {
        let (lookups, loaded) = tokio::join!(
            Lookups::fetch(&self.client, dependencies(resource)),
            panel.reload(),
        );
        panel.reconfigure(panel_config(resource, &Arc::new(lookups)));
        loaded
    }

    /// After a mutation, panels that resolve ids of `resource` go stale.
    async fn invalidate_dependents(&self, resource: Resource) {
        for other in Resource::ALL {
            if dependencies(other).contains(&resource) {
                debug!("Marking {} stale after change to {}", other, resource);
                self.lock(other).await.mark_stale();
            }
        }
    }

    /// Current view, loading the panel first if it has never been loaded.
    /// A failed load still yields a view, carrying the error.
    pub async fn open(&self, resource: Resource) -> PanelView {
        let mut panel = self.lock(resource).await;
        if !panel.is_loaded() {
            info!("Opening {} panel", resource);
            let _ = self.refresh(&mut panel, resource).await;
        }
        panel.view()
    }

    pub async fn search(&self, resource: Resource, search: Option<String>, page: Option<usize>) -> PanelView {
        {
            let mut panel = self.lock(resource).await;
            if let Some(search) = search {
                if search != panel.table_state().search {
                    panel.search(search);
                }
            }
            if let Some(page) = page {
                panel.go_to_page(page);
            }
        }
        self.open(resource).await
    }

    pub async fn reload(&self, resource: Resource) -> Result<PanelView, PanelError> {
        let mut panel = self.lock(resource).await;
        self.refresh(&mut panel, resource).await?;
        Ok(panel.view())
    }

    pub async fn sort(&self, resource: Resource, column: &str) -> PanelView {
        self.lock(resource).await.sort_by(column);
        self.open(resource).await
    }

    /// Opens the create modal, or the edit modal for `id`.
    pub async fn open_form(&self, resource: Resource, id: Option<RecordId>) -> Result<PanelView, PanelError> {
        let mut panel = self.lock(resource).await;
        if !panel.is_loaded() {
            self.refresh(&mut panel, resource).await?;
        }
        match id {
            Some(id) => panel.open_edit(&id)?,
            None => panel.open_create(),
        }
        Ok(panel.view())
    }

    pub async fn update_form(
        &self,
        resource: Resource,
        values: serde_json::Map<String, Value>,
    ) -> Result<PanelView, PanelError> {
        let mut panel = self.lock(resource).await;
        for (name, value) in values {
            panel.set_field(&name, value)?;
        }
        Ok(panel.view())
    }

    pub async fn close_form(&self, resource: Resource) -> PanelView {
        let mut panel = self.lock(resource).await;
        panel.close_form();
        panel.view()
    }

    pub async fn submit_form(&self, resource: Resource) -> Result<PanelView, PanelError> {
        let view = {
            let mut panel = self.lock(resource).await;
            panel.submit().await?;
            panel.view()
        };
        self.invalidate_dependents(resource).await;
        Ok(view)
    }

    pub async fn delete(&self, resource: Resource, id: RecordId) -> Result<(DeleteOutcome, PanelView), PanelError> {
        let (outcome, view) = {
            let mut panel = self.lock(resource).await;
            let outcome = panel.delete(&id).await?;
            (outcome, panel.view())
        };
        if matches!(outcome, DeleteOutcome::Deleted { .. }) {
            self.invalidate_dependents(resource).await;
        }
        Ok((outcome, view))
    }

    pub async fn cancel_delete(&self, resource: Resource) -> PanelView {
        let mut panel = self.lock(resource).await;
        panel.cancel_delete();
        panel.view()
    }
}

//! Generic CRUD panel for one entity type.
//!
//! An [`EntityPanel`] owns the fetch / create / update / delete cycle for a
//! single resource. It is driven by declarative column and form field
//! descriptors, renders through [`DataTable`], and talks to the backend
//! through an [`EntityService`]. Every mutation is followed by a full
//! refetch; nothing is patched locally.

pub mod catalog;
pub mod rest;

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::{debug, info, warn};

use crate::error::PanelError;
use crate::models::{extract_id, RecordId};
use crate::table::{Column, DataTable, Record, TableState, TableView};

pub use rest::RestService;

pub const CONFIRM_DELETE_LABEL: &str = "Confirm Delete";

/// The named operations a panel expects from its backend.
///
/// Every method has a default that reports the method as unknown, so a
/// service only implements what its resource supports and the panel shows
/// an error for the rest.
pub trait EntityService: Send + Sync {
    /// Singular name used to build method names, e.g. `Airline`.
    fn entity_name(&self) -> &str;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Record>, PanelError>> + Send {
        let method = format!("getAll{}s", self.entity_name());
        async move { Err(PanelError::UnknownMethod(method)) }
    }

    fn create(&self, record: Record) -> impl Future<Output = Result<Record, PanelError>> + Send {
        let _ = record;
        let method = format!("create{}", self.entity_name());
        async move { Err(PanelError::UnknownMethod(method)) }
    }

    fn update(&self, id: RecordId, record: Record) -> impl Future<Output = Result<Record, PanelError>> + Send {
        let _ = (id, record);
        let method = format!("update{}", self.entity_name());
        async move { Err(PanelError::UnknownMethod(method)) }
    }

    fn delete(&self, id: RecordId) -> impl Future<Output = Result<(), PanelError>> + Send {
        let _ = id;
        let method = format!("delete{}", self.entity_name());
        async move { Err(PanelError::UnknownMethod(method)) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Tel,
    Date,
    #[serde(rename = "datetime-local")]
    DateTime,
    Select,
    TextArea,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            options: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn select(name: impl Into<String>, label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::new(name, label, FieldKind::Select)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn is_blank(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Number inputs hand back text; send numbers to the API.
    fn coerce(&self, value: Value) -> Result<Value, PanelError> {
        match (self.kind, value) {
            (FieldKind::Number, Value::String(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(Value::Null);
                }
                if let Ok(n) = s.parse::<i64>() {
                    return Ok(Value::Number(n.into()));
                }
                s.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| PanelError::Validation(format!("{} must be a number", self.label)))
            }
            (_, value) => Ok(value),
        }
    }
}

/// Everything an entity panel is built from.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub title: String,
    pub columns: Vec<Column>,
    pub form_fields: Vec<FormField>,
    pub initial_form_data: Map<String, Value>,
    pub id_field: String,
}

impl PanelConfig {
    pub fn new(title: impl Into<String>, columns: Vec<Column>, form_fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            columns,
            form_fields,
            initial_form_data: Map::new(),
            id_field: "id".to_string(),
        }
    }

    pub fn with_initial(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.initial_form_data.insert(field.to_string(), value.into());
        self
    }

    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Form values for a fresh record: every field empty unless an initial
    /// value was declared.
    fn blank_form(&self) -> Map<String, Value> {
        let mut values = Map::new();
        for field in &self.form_fields {
            values.insert(field.name.clone(), Value::String(String::new()));
        }
        for (key, value) in &self.initial_form_data {
            values.insert(key.clone(), value.clone());
        }
        values
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit { id: RecordId },
}

#[derive(Debug, Clone, PartialEq)]
struct FormState {
    mode: FormMode,
    values: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    #[serde(flatten)]
    pub field: FormField,
    pub value: Value,
}

/// The open create/edit modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    #[serde(flatten)]
    pub mode: FormMode,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingDelete {
    pub id: RecordId,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// First request: nothing deleted yet, the user has to confirm.
    AwaitingConfirmation { id: RecordId, prompt: &'static str },
    Deleted { id: RecordId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub title: String,
    pub loaded: bool,
    pub controlled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub table: TableView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_delete: Option<PendingDelete>,
}

pub struct EntityPanel<S> {
    config: PanelConfig,
    table: DataTable,
    service: Arc<S>,
    state: TableState,
    records: Vec<Record>,
    loaded: bool,
    /// Data comes from the parent; the panel never fetches on its own.
    controlled: bool,
    error: Option<String>,
    form: Option<FormState>,
    pending_delete: Option<RecordId>,
}

impl<S: EntityService> EntityPanel<S> {
    pub fn new(config: PanelConfig, service: Arc<S>) -> Self {
        let table = DataTable::new(config.columns.clone(), config.id_field.clone());
        Self {
            config,
            table,
            service,
            state: TableState::default(),
            records: Vec::new(),
            loaded: false,
            controlled: false,
            error: None,
            form: None,
            pending_delete: None,
        }
    }

    /// A panel whose records are supplied by its parent. Mutations still go
    /// through `service`, but the panel does not refetch afterwards; the
    /// parent pushes new data with [`set_data`](Self::set_data).
    pub fn controlled(config: PanelConfig, service: Arc<S>, data: Vec<Record>) -> Self {
        let mut panel = Self::new(config, service);
        panel.controlled = true;
        panel.set_data(data);
        panel
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Swaps descriptors (e.g. after lookups changed) without touching the
    /// records or what the user has typed.
    pub fn reconfigure(&mut self, config: PanelConfig) {
        self.table = DataTable::new(config.columns.clone(), config.id_field.clone());
        self.config = config;
    }

    /// Forces the next open to refetch.
    pub fn mark_stale(&mut self) {
        if !self.controlled {
            self.loaded = false;
        }
    }

    pub fn set_data(&mut self, records: Vec<Record>) {
        self.records = records;
        self.loaded = true;
    }

    pub async fn load(&mut self) -> Result<(), PanelError> {
        if self.controlled {
            return Ok(());
        }
        match self.service.get_all().await {
            Ok(records) => {
                debug!("{}: loaded {} records", self.config.title, records.len());
                self.records = records;
                self.loaded = true;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("{}: failed to load records: {}", self.config.title, e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// The "Retry" action: drop the error and fetch again.
    pub async fn reload(&mut self) -> Result<(), PanelError> {
        self.error = None;
        self.load().await
    }

    pub fn search(&mut self, text: impl Into<String>) {
        self.state.set_search(text);
    }

    pub fn sort_by(&mut self, column: &str) {
        self.state.toggle_sort(column);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    pub fn table_state(&self) -> &TableState {
        &self.state
    }

    fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| extract_id(r, &self.config.id_field).as_ref() == Some(id))
    }

    pub fn open_create(&mut self) {
        self.form = Some(FormState {
            mode: FormMode::Create,
            values: self.config.blank_form(),
        });
    }

    /// Opens the modal pre-filled with the record's value for every form
    /// field it has.
    pub fn open_edit(&mut self, id: &RecordId) -> Result<(), PanelError> {
        let record = self
            .find(id)
            .ok_or_else(|| PanelError::RecordNotFound(id.to_string()))?;

        let mut values = self.config.blank_form();
        for field in &self.config.form_fields {
            if let Some(value) = record.get(&field.name) {
                values.insert(field.name.clone(), value.clone());
            }
        }

        self.form = Some(FormState {
            mode: FormMode::Edit { id: id.clone() },
            values,
        });
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), PanelError> {
        if !self.config.form_fields.iter().any(|f| f.name == name) {
            return Err(PanelError::Validation(format!("Unknown field: {name}")));
        }
        let form = self.form.as_mut().ok_or(PanelError::FormClosed)?;
        form.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Required-field check plus number coercion. Returns the payload to send.
    fn validated_payload(&self, form: &FormState) -> Result<Record, PanelError> {
        let mut payload = form.values.clone();
        for field in &self.config.form_fields {
            if field.required && FormField::is_blank(payload.get(&field.name)) {
                return Err(PanelError::Validation(format!("{} is required", field.label)));
            }
            if let Some(value) = payload.remove(&field.name) {
                payload.insert(field.name.clone(), field.coerce(value)?);
            }
        }
        Ok(Value::Object(payload))
    }

    /// Saves the open form: create or update, then refetch.
    pub async fn submit(&mut self) -> Result<Record, PanelError> {
        let form = self.form.clone().ok_or(PanelError::FormClosed)?;

        let payload = match self.validated_payload(&form) {
            Ok(payload) => payload,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        let result = match &form.mode {
            FormMode::Create => self.service.create(payload).await,
            FormMode::Edit { id } => self.service.update(id.clone(), payload).await,
        };

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                warn!("{}: save failed: {}", self.config.title, e);
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        info!("{}: record saved", self.config.title);
        self.form = None;
        self.error = None;
        self.load().await?;
        Ok(saved)
    }

    /// Two-step delete. The first call for an id only arms the
    /// confirmation; a second call for the same id deletes and refetches.
    pub async fn delete(&mut self, id: &RecordId) -> Result<DeleteOutcome, PanelError> {
        if self.pending_delete.as_ref() != Some(id) {
            if self.find(id).is_none() {
                return Err(PanelError::RecordNotFound(id.to_string()));
            }
            self.pending_delete = Some(id.clone());
            return Ok(DeleteOutcome::AwaitingConfirmation {
                id: id.clone(),
                prompt: CONFIRM_DELETE_LABEL,
            });
        }

        self.pending_delete = None;
        if let Err(e) = self.service.delete(id.clone()).await {
            warn!("{}: delete of {} failed: {}", self.config.title, id, e);
            self.error = Some(e.to_string());
            return Err(e);
        }

        info!("{}: record {} deleted", self.config.title, id);
        self.error = None;
        self.load().await?;
        Ok(DeleteOutcome::Deleted { id: id.clone() })
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn view(&self) -> PanelView {
        let form = self.form.as_ref().map(|form| FormView {
            mode: form.mode.clone(),
            fields: self
                .config
                .form_fields
                .iter()
                .map(|field| FieldView {
                    field: field.clone(),
                    value: form.values.get(&field.name).cloned().unwrap_or(Value::Null),
                })
                .collect(),
        });

        PanelView {
            title: self.config.title.clone(),
            loaded: self.loaded,
            controlled: self.controlled,
            error: self.error.clone(),
            table: self.table.view(&self.records, &self.state),
            form,
            pending_delete: self.pending_delete.clone().map(|id| PendingDelete {
                id,
                prompt: CONFIRM_DELETE_LABEL,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use serde_json::json;
    use std::sync::Mutex;

    /// In-memory stand-in for a REST resource that records every call.
    #[derive(Default)]
    struct MemoryService {
        records: Mutex<Vec<Record>>,
        calls: Mutex<Vec<String>>,
        fail_with: Mutex<Option<String>>,
    }

    impl MemoryService {
        fn with(records: Vec<Record>) -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(records),
                ..Default::default()
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn log(&self, call: &str) -> Result<(), PanelError> {
            self.calls.lock().unwrap().push(call.to_string());
            match self.fail_with.lock().unwrap().take() {
                Some(message) => Err(PanelError::Api(ApiError::Status {
                    status: 400,
                    message: Some(message),
                })),
                None => Ok(()),
            }
        }
    }

    impl EntityService for MemoryService {
        fn entity_name(&self) -> &str {
            "Airline"
        }

        async fn get_all(&self) -> Result<Vec<Record>, PanelError> {
            self.log("getAll")?;
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create(&self, record: Record) -> Result<Record, PanelError> {
            self.log("create")?;
            let mut records = self.records.lock().unwrap();
            let mut record = record;
            record["id"] = json!(records.len() + 1);
            records.push(record.clone());
            Ok(record)
        }

        async fn update(&self, id: RecordId, record: Record) -> Result<Record, PanelError> {
            self.log("update")?;
            let mut records = self.records.lock().unwrap();
            let slot = records
                .iter_mut()
                .find(|r| extract_id(r, "id").as_ref() == Some(&id))
                .ok_or_else(|| PanelError::RecordNotFound(id.to_string()))?;
            let mut record = record;
            record["id"] = slot["id"].clone();
            *slot = record.clone();
            Ok(record)
        }

        async fn delete(&self, id: RecordId) -> Result<(), PanelError> {
            self.log("delete")?;
            self.records
                .lock()
                .unwrap()
                .retain(|r| extract_id(r, "id").as_ref() != Some(&id));
            Ok(())
        }
    }

    /// A service that only knows how to list.
    struct ReadOnlyService;

    impl EntityService for ReadOnlyService {
        fn entity_name(&self) -> &str {
            "Terminal"
        }

        async fn get_all(&self) -> Result<Vec<Record>, PanelError> {
            Ok(vec![json!({ "id": 1, "name": "T1" })])
        }
    }

    fn config() -> PanelConfig {
        PanelConfig::new(
            "Airlines",
            vec![Column::new("name", "Name"), Column::new("code", "Code")],
            vec![
                FormField::text("name", "Name").required(),
                FormField::text("code", "Code").required(),
                FormField::number("fleet_size", "Fleet size"),
            ],
        )
        .with_initial("fleet_size", 0)
    }

    fn seeded() -> Arc<MemoryService> {
        MemoryService::with(vec![
            json!({ "id": 1, "name": "Air Astana", "code": "KC", "country": "KZ" }),
            json!({ "id": 2, "name": "SCAT", "code": "DV", "fleet_size": 12 }),
        ])
    }

    #[tokio::test]
    async fn test_load_fetches_all_records() {
        let service = seeded();
        let mut panel = EntityPanel::new(config(), service.clone());
        panel.load().await.unwrap();
        assert!(panel.is_loaded());
        assert_eq!(panel.view().table.rows.len(), 2);
        assert_eq!(service.calls(), vec!["getAll"]);
    }

    #[tokio::test]
    async fn test_create_then_refetch() {
        let service = seeded();
        let mut panel = EntityPanel::new(config(), service.clone());
        panel.load().await.unwrap();

        panel.open_create();
        panel.set_field("name", json!("FlyArystan")).unwrap();
        panel.set_field("code", json!("FS")).unwrap();
        panel.set_field("fleet_size", json!(" 14 ")).unwrap();
        let saved = panel.submit().await.unwrap();

        assert_eq!(saved["fleet_size"], json!(14));
        assert_eq!(panel.records().len(), 3);
        assert!(panel.view().form.is_none());
        assert_eq!(service.calls(), vec!["getAll", "create", "getAll"]);
    }

    #[tokio::test]
    async fn test_required_field_blocks_submit() {
        let service = seeded();
        let mut panel = EntityPanel::new(config(), service.clone());
        panel.load().await.unwrap();

        panel.open_create();
        panel.set_field("name", json!("  ")).unwrap();
        let err = panel.submit().await.unwrap_err();

        assert!(matches!(err, PanelError::Validation(ref m) if m == "Name is required"));
        assert_eq!(panel.error(), Some("Name is required"));
        assert!(panel.view().form.is_some());
        assert_eq!(service.calls(), vec!["getAll"]);
    }

    #[tokio::test]
    async fn test_edit_prepopulates_form_fields() {
        let mut panel = EntityPanel::new(config(), seeded());
        panel.load().await.unwrap();

        panel.open_edit(&RecordId::from("1")).unwrap();
        let form = panel.view().form.unwrap();
        assert_eq!(form.mode, FormMode::Edit { id: RecordId::from("1") });

        let values: Vec<(String, Value)> = form
            .fields
            .into_iter()
            .map(|f| (f.field.name, f.value))
            .collect();
        assert_eq!(
            values,
            vec![
                ("name".to_string(), json!("Air Astana")),
                ("code".to_string(), json!("KC")),
                // not on the record: keeps the initial value
                ("fleet_size".to_string(), json!(0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_goes_to_the_edited_record() {
        let service = seeded();
        let mut panel = EntityPanel::new(config(), service.clone());
        panel.load().await.unwrap();

        panel.open_edit(&RecordId::from("2")).unwrap();
        panel.set_field("name", json!("SCAT Airlines")).unwrap();
        panel.submit().await.unwrap();

        assert_eq!(panel.records()[1]["name"], json!("SCAT Airlines"));
        assert_eq!(service.calls(), vec!["getAll", "update", "getAll"]);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let service = seeded();
        let mut panel = EntityPanel::new(config(), service.clone());
        panel.load().await.unwrap();
        let id = RecordId::from("1");

        let first = panel.delete(&id).await.unwrap();
        assert_eq!(
            first,
            DeleteOutcome::AwaitingConfirmation {
                id: id.clone(),
                prompt: CONFIRM_DELETE_LABEL
            }
        );
        assert_eq!(panel.records().len(), 2);
        assert_eq!(panel.view().pending_delete.unwrap().prompt, "Confirm Delete");

        let second = panel.delete(&id).await.unwrap();
        assert_eq!(second, DeleteOutcome::Deleted { id });
        assert_eq!(panel.records().len(), 1);
        assert_eq!(service.calls(), vec!["getAll", "delete", "getAll"]);
    }

    #[tokio::test]
    async fn test_confirming_a_different_record_rearms() {
        let service = seeded();
        let mut panel = EntityPanel::new(config(), service.clone());
        panel.load().await.unwrap();

        panel.delete(&RecordId::from("1")).await.unwrap();
        let outcome = panel.delete(&RecordId::from("2")).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::AwaitingConfirmation { .. }));

        panel.cancel_delete();
        let outcome = panel.delete(&RecordId::from("2")).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::AwaitingConfirmation { .. }));
        assert_eq!(service.calls(), vec!["getAll"]);
    }

    #[tokio::test]
    async fn test_service_failure_sets_error_and_aborts() {
        let service = seeded();
        let mut panel = EntityPanel::new(config(), service.clone());
        panel.load().await.unwrap();

        *service.fail_with.lock().unwrap() = Some("Code already in use".to_string());
        panel.open_create();
        panel.set_field("name", json!("Dup")).unwrap();
        panel.set_field("code", json!("KC")).unwrap();
        assert!(panel.submit().await.is_err());

        assert_eq!(panel.error(), Some("Code already in use"));
        assert!(panel.view().form.is_some());
        assert_eq!(panel.records().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_method_is_an_error_not_a_panic() {
        let config = PanelConfig::new(
            "Terminals",
            vec![Column::new("name", "Name")],
            vec![FormField::text("name", "Name")],
        );
        let mut panel = EntityPanel::new(config, Arc::new(ReadOnlyService));
        panel.load().await.unwrap();

        let id = RecordId::from("1");
        panel.delete(&id).await.unwrap();
        let err = panel.delete(&id).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown API method: deleteTerminal");
        assert_eq!(panel.error(), Some("Unknown API method: deleteTerminal"));
    }

    #[tokio::test]
    async fn test_controlled_panel_never_fetches() {
        let service = seeded();
        let data = vec![json!({ "_id": { "$oid": "abc" }, "name": "Parent-owned", "code": "PO" })];
        let mut panel =
            EntityPanel::controlled(config().with_id_field("_id"), service.clone(), data);

        panel.load().await.unwrap();
        panel.open_edit(&RecordId::from("abc")).unwrap();
        panel.set_field("code", json!("P2")).unwrap();
        // the memory service has no "abc"; the parent handler reports it
        assert!(panel.submit().await.is_err());

        assert_eq!(service.calls(), vec!["update"]);
        assert_eq!(panel.view().table.rows[0].id, Some(RecordId::from("abc")));
    }

    #[test]
    fn test_number_coercion_rejects_text() {
        let field = FormField::number("capacity", "Capacity");
        assert!(field.coerce(json!("lots")).is_err());
        assert_eq!(field.coerce(json!("")).unwrap(), Value::Null);
        assert_eq!(field.coerce(json!("1.5")).unwrap(), json!(1.5));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut panel = EntityPanel::new(config(), seeded());
        panel.open_create();
        assert!(panel.set_field("nope", json!(1)).is_err());
    }
}

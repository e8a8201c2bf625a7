//! Resource table controller
//!
//! Loads a resource collection, projects it into the page view, and runs
//! create/update/delete round-trips against the records API. Every successful
//! mutation is followed by a full reload; the view never shows a change the
//! server has not acknowledged.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::api::{ApiRequest, ResourceApi};
use crate::context::PageContext;
use crate::descriptor::{descriptor, ResourceDescriptor};
use crate::error::{CoreError, CoreResult};
use crate::form::{build_payload, prefill};
use crate::models::Record;
use crate::render::{build_dropdown, build_rows, empty_dropdown};
use crate::types::{MessageKind, RecordId, ResourceKind};
use crate::view::{FormState, Modal, PageView, StatusMessage, TableBody};

pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(5);

const SUBMIT_SUCCESS: &str = "Operation completed successfully!";
const DELETE_SUCCESS: &str = "Item deleted successfully!";

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a mutation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Server accepted the change and the table was reloaded
    Applied,
    /// Server answered with a non-success status
    Rejected { status: u16 },
    /// Request never completed
    Failed,
    /// User declined the confirmation prompt
    Cancelled,
}

#[derive(Debug)]
pub struct ResourceTableController<A> {
    api: A,
    context: PageContext,
    view: PageView,
    message_ttl: Duration,
}

impl<A: ResourceApi> ResourceTableController<A> {
    pub fn new(api: A, kind: ResourceKind) -> Self {
        let d = descriptor(kind);
        let view = PageView {
            form: FormState::blank(d),
            dropdowns: d.referenced_kinds().map(empty_dropdown).collect(),
            ..PageView::default()
        };
        Self {
            api,
            context: PageContext::new(kind),
            view,
            message_ttl: DEFAULT_MESSAGE_TTL,
        }
    }

    /// How long status messages stay up
    pub fn with_message_ttl(mut self, ttl: Duration) -> Self {
        self.message_ttl = ttl;
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.context.kind()
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        descriptor(self.context.kind())
    }

    /// Record behind a rendered row
    pub fn record(&self, id: RecordId) -> CoreResult<&Record> {
        self.view
            .row(id)
            .map(|row| &row.record)
            .ok_or(CoreError::RecordNotFound { id })
    }

    /// Page-load sequence: table data, then lookup lists
    pub async fn initialize(&mut self) {
        self.load().await;
        self.load_auxiliary_lists().await;
    }

    // ==================== Data Loading ====================

    /// Fetch the collection and rebuild the table
    pub async fn load(&mut self) {
        self.render_loading();
        let path = self.kind().collection_path();
        log::debug!("Loading data from: {}", path);

        match self.fetch_records(ApiRequest::get(path)).await {
            Ok(records) if records.is_empty() => self.render_empty_state(),
            Ok(records) => {
                log::debug!("Received {} {}", records.len(), self.kind());
                self.populate_table(records);
            }
            Err(e) => {
                e.log("load");
                self.render_error(&format!("Failed to load data: {}", e));
            }
        }
    }

    /// Fill the farmer, crop and market dropdowns of the transaction form
    ///
    /// The three lists are fetched concurrently. A failed list is logged and
    /// leaves its dropdown with only the placeholder.
    pub async fn load_auxiliary_lists(&mut self) {
        if self.kind() != ResourceKind::Transactions {
            return;
        }

        let (farmers, crops, markets) = tokio::join!(
            self.fetch_records(ApiRequest::get(ResourceKind::Farmers.lookup_list_path())),
            self.fetch_records(ApiRequest::get(ResourceKind::Crops.lookup_list_path())),
            self.fetch_records(ApiRequest::get(ResourceKind::Markets.lookup_list_path())),
        );

        self.view.dropdowns = [
            (ResourceKind::Farmers, farmers),
            (ResourceKind::Crops, crops),
            (ResourceKind::Markets, markets),
        ]
        .into_iter()
        .map(|(kind, result)| match result {
            Ok(items) => build_dropdown(kind, &items),
            Err(e) => {
                log::warn!("Error loading {} dropdown data: {}", kind.singular(), e);
                empty_dropdown(kind)
            }
        })
        .collect();
    }

    async fn fetch_records(&self, request: ApiRequest) -> CoreResult<Vec<Record>> {
        let response = self.api.send(request).await?;
        if !response.is_success() {
            return Err(CoreError::HttpStatus { status: response.status });
        }
        response.json()
    }

    // ==================== Rendering ====================

    pub fn populate_table(&mut self, records: Vec<Record>) {
        self.view.table = TableBody::Rows(build_rows(self.descriptor(), records));
    }

    pub fn render_empty_state(&mut self) {
        self.view.table = TableBody::Empty;
    }

    pub fn render_error(&mut self, message: &str) {
        self.view.table = TableBody::Error(message.to_string());
    }

    pub fn render_loading(&mut self) {
        self.view.table = TableBody::Loading;
    }

    // ==================== Form Binding ====================

    /// Open a blank modal in create mode
    pub fn open_create(&mut self) {
        self.context.clear_editing();
        let d = self.descriptor();
        self.view.form.reset(d);
        self.view.modal = Modal {
            visible: true,
            title: format!("Add New {}", self.kind().singular_title()),
        };
    }

    /// Open the modal in edit mode, pre-filled from the record
    pub fn open_edit(&mut self, record: &Record) {
        let d = self.descriptor();
        self.context.set_editing(d.id_of(record));
        self.view.modal = Modal {
            visible: true,
            title: format!("Edit {}", self.kind().singular_title()),
        };
        prefill(&mut self.view.form, d, record);
    }

    /// Hide the modal and leave edit mode
    pub fn close(&mut self) {
        self.view.modal.visible = false;
        self.context.clear_editing();
    }

    /// Serialize submitted fields and send them as a create or update
    pub async fn on_submit(&mut self, fields: &HashMap<String, String>) -> Outcome {
        for (name, value) in fields {
            self.view.form.set(name, value.as_str());
        }
        let payload = build_payload(self.descriptor(), fields);
        log::debug!("Form data: {:?}", payload);
        let editing_id = self.context.editing_id();
        self.submit(payload, editing_id).await
    }

    // ==================== Mutations ====================

    /// Create when `editing_id` is `None`, update otherwise
    pub async fn submit(&mut self, payload: Map<String, Value>, editing_id: Option<RecordId>) -> Outcome {
        let kind = self.kind();
        let request = match editing_id {
            Some(id) => ApiRequest::put(kind.record_path(id), Value::Object(payload)),
            None => ApiRequest::post(kind.collection_path(), Value::Object(payload)),
        };
        log::debug!("Submitting {} request to: {}", request.method, request.path);

        match self.api.send(request).await {
            Ok(response) if response.is_success() => {
                log::debug!("Success response: {}", response.body);
                self.close();
                self.load().await;
                self.show_message(SUBMIT_SUCCESS, MessageKind::Success);
                Outcome::Applied
            }
            Ok(response) => {
                let body = response.error_body().unwrap_or_default();
                if let Some(details) = &body.details {
                    log::debug!("Submit rejected with status {}: {}", response.status, details);
                }
                let message = body.message.unwrap_or_else(|| "Operation failed".to_string());
                self.show_message(&format!("Error: {}", message), MessageKind::Error);
                Outcome::Rejected { status: response.status }
            }
            Err(e) => {
                e.log("submit");
                self.show_message(&format!("Error: Failed to submit form - {}", e), MessageKind::Error);
                Outcome::Failed
            }
        }
    }

    /// Confirmation text shown before deleting
    pub fn delete_prompt(&self, record: &Record) -> String {
        format!(
            "Are you sure you want to delete this {}: {}?",
            self.kind().singular(),
            self.descriptor().name_of(record)
        )
    }

    /// Delete a record once the user confirms
    pub async fn delete<C: Confirm + ?Sized>(&mut self, record: &Record, confirm: &C) -> Outcome {
        if !confirm.confirm(&self.delete_prompt(record)) {
            return Outcome::Cancelled;
        }

        let Some(id) = self.descriptor().id_of(record) else {
            log::warn!("Refusing to delete a {} without an id", self.kind().singular());
            self.show_message("Error: Failed to delete item", MessageKind::Error);
            return Outcome::Failed;
        };

        match self.api.send(ApiRequest::delete(self.kind().record_path(id))).await {
            Ok(response) if response.is_success() => {
                self.load().await;
                self.show_message(DELETE_SUCCESS, MessageKind::Success);
                Outcome::Applied
            }
            Ok(response) => {
                let message = response.error_message().unwrap_or_else(|| "Delete failed".to_string());
                self.show_message(&format!("Error: {}", message), MessageKind::Error);
                Outcome::Rejected { status: response.status }
            }
            Err(e) => {
                e.log("delete");
                self.show_message("Error: Failed to delete item", MessageKind::Error);
                Outcome::Failed
            }
        }
    }

    /// Replace the status message
    pub fn show_message(&mut self, text: &str, kind: MessageKind) {
        self.view.message = Some(StatusMessage {
            text: text.to_string(),
            kind,
            shown_at: Instant::now(),
            dismiss_after: self.message_ttl,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResponse, Method};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted API: each route answers from a queue whose last entry repeats
    #[derive(Clone, Default)]
    struct FakeApi {
        state: Arc<Mutex<FakeState>>,
    }

    #[derive(Default)]
    struct FakeState {
        routes: HashMap<(Method, String), VecDeque<CoreResult<ApiResponse>>>,
        requests: Vec<ApiRequest>,
    }

    impl FakeApi {
        fn on(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
            self.push(method, path, Ok(ApiResponse::new(status, body.to_string())))
        }

        fn fail(&self, method: Method, path: &str, message: &str) -> &Self {
            self.push(method, path, Err(CoreError::Transport { message: message.to_string() }))
        }

        fn push(&self, method: Method, path: &str, response: CoreResult<ApiResponse>) -> &Self {
            self.state
                .lock()
                .unwrap()
                .routes
                .entry((method, path.to_string()))
                .or_default()
                .push_back(response);
            self
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.state.lock().unwrap().requests.clone()
        }

        fn count(&self, method: Method, path: &str) -> usize {
            self.requests()
                .iter()
                .filter(|r| r.method == method && r.path == path)
                .count()
        }
    }

    #[async_trait]
    impl ResourceApi for FakeApi {
        async fn send(&self, request: ApiRequest) -> CoreResult<ApiResponse> {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request.clone());
            match state.routes.get_mut(&(request.method, request.path.clone())) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
                Some(queue) => queue.front().cloned().unwrap(),
                None => Ok(ApiResponse::new(404, r#"{"message": "Not Found"}"#)),
            }
        }
    }

    fn farmers() -> Value {
        json!([
            {"farmer_id": 1, "farmer_name": "Asha", "village": "Kheda", "phone": "98250"},
            {"farmer_id": 2, "farmer_name": "Bhola", "village": null, "phone": null}
        ])
    }

    fn controller(api: &FakeApi, kind: ResourceKind) -> ResourceTableController<FakeApi> {
        ResourceTableController::new(api.clone(), kind)
    }

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn message_text<A: ResourceApi>(c: &ResourceTableController<A>) -> Option<&str> {
        c.view().message.as_ref().map(|m| m.text.as_str())
    }

    #[tokio::test]
    async fn test_load_empty_collection_renders_empty_state() {
        for kind in ResourceKind::ALL {
            let api = FakeApi::default();
            api.on(Method::Get, &kind.collection_path(), 200, json!([]));
            let mut c = controller(&api, kind);
            c.load().await;
            assert_eq!(c.view().table, TableBody::Empty, "{}", kind);
        }
    }

    #[tokio::test]
    async fn test_load_error_status_renders_error_state() {
        for kind in ResourceKind::ALL {
            let api = FakeApi::default();
            api.on(Method::Get, &kind.collection_path(), 500, json!({"message": "boom"}));
            let mut c = controller(&api, kind);
            c.load().await;
            assert_eq!(
                c.view().table,
                TableBody::Error("Failed to load data: HTTP error! status: 500".to_string()),
                "{}",
                kind
            );
        }
    }

    #[tokio::test]
    async fn test_load_transport_failure_renders_error_state() {
        let api = FakeApi::default();
        api.fail(Method::Get, "/api/crops", "connection refused");
        let mut c = controller(&api, ResourceKind::Crops);
        c.load().await;
        assert_eq!(c.view().table, TableBody::Error("Failed to load data: connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_load_malformed_body_renders_error_state() {
        let api = FakeApi::default();
        api.push(Method::Get, "/api/markets", Ok(ApiResponse::new(200, "<html>")));
        let mut c = controller(&api, ResourceKind::Markets);
        c.load().await;
        assert!(matches!(&c.view().table, TableBody::Error(m) if m.starts_with("Failed to load data: Invalid response")));
    }

    #[tokio::test]
    async fn test_load_populates_rows() {
        let api = FakeApi::default();
        api.on(Method::Get, "/api/farmers", 200, farmers());
        let mut c = controller(&api, ResourceKind::Farmers);
        c.load().await;

        let rows = c.view().table.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec!["1", "Asha", "Kheda", "98250"]);
        assert_eq!(rows[1].cells, vec!["2", "Bhola", "", ""]);
        assert_eq!(c.record(2).unwrap().text("farmer_name"), "Bhola");
        assert_eq!(c.record(9).unwrap_err(), CoreError::RecordNotFound { id: 9 });
    }

    #[tokio::test]
    async fn test_transaction_total_column() {
        let api = FakeApi::default();
        api.on(
            Method::Get,
            "/api/transactions",
            200,
            json!([{"transaction_id": 1, "farmer_name": "Asha", "crop_name": "Wheat",
                    "market_name": "Azadpur", "quantity": "10", "price": "2.5"}]),
        );
        let mut c = controller(&api, ResourceKind::Transactions);
        c.load().await;
        assert_eq!(c.view().table.rows()[0].cells[6], "$25.00");
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let api = FakeApi::default();
        api.on(Method::Get, "/api/farmers", 200, farmers());
        api.on(Method::Post, "/api/farmers", 200, json!({"message": "Farmer created successfully", "farmer_id": 3}));
        let mut c = controller(&api, ResourceKind::Farmers);

        c.open_create();
        assert!(c.view().modal.visible);
        assert_eq!(c.view().modal.title, "Add New Farmer");
        assert_eq!(c.context().editing_id(), None);

        let outcome = c
            .on_submit(&form(&[("farmer_name", "Chitra"), ("village", "Anand"), ("phone", "")]))
            .await;
        assert_eq!(outcome, Outcome::Applied);

        let posts: Vec<_> = api.requests().into_iter().filter(|r| r.method == Method::Post).collect();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].path, "/api/farmers");
        let body = posts[0].body.as_ref().unwrap();
        assert!(body.get("farmer_id").is_none());
        assert_eq!(body["farmer_name"], "Chitra");

        assert_eq!(api.count(Method::Get, "/api/farmers"), 1);
        assert!(!c.view().modal.visible);
        assert_eq!(message_text(&c), Some("Operation completed successfully!"));
        assert_eq!(c.view().message.as_ref().unwrap().kind, MessageKind::Success);
    }

    #[tokio::test]
    async fn test_edit_round_trip() {
        let api = FakeApi::default();
        api.on(Method::Get, "/api/farmers", 200, farmers());
        api.on(Method::Put, "/api/farmers/1", 200, json!({"message": "Farmer updated successfully"}));
        let mut c = controller(&api, ResourceKind::Farmers);
        c.load().await;

        let record = c.record(1).unwrap().clone();
        c.open_edit(&record);
        assert_eq!(c.context().editing_id(), Some(1));
        assert_eq!(c.view().modal.title, "Edit Farmer");
        assert_eq!(c.view().form.get("farmer_name"), "Asha");
        assert_eq!(c.view().form.get("village"), "Kheda");

        let outcome = c
            .on_submit(&form(&[("farmer_name", "Asha Patel"), ("village", "Kheda"), ("phone", "98250")]))
            .await;
        assert_eq!(outcome, Outcome::Applied);

        let put = api.requests().into_iter().find(|r| r.method == Method::Put).unwrap();
        assert_eq!(put.path, "/api/farmers/1");
        assert_eq!(put.body.unwrap()["farmer_name"], "Asha Patel");
        assert_eq!(c.context().editing_id(), None);
        assert_eq!(api.count(Method::Get, "/api/farmers"), 2);
    }

    #[tokio::test]
    async fn test_transaction_submit_coerces_numbers() {
        let api = FakeApi::default();
        api.on(Method::Get, "/api/transactions", 200, json!([]));
        api.on(Method::Post, "/api/transactions", 200, json!({"transaction_id": 8}));
        let mut c = controller(&api, ResourceKind::Transactions);
        c.open_create();
        c.on_submit(&form(&[
            ("farmer_id", "1"),
            ("crop_id", "2"),
            ("market_id", "3"),
            ("quantity", "10"),
            ("price", "abc"),
        ]))
        .await;

        let post = api.requests().into_iter().find(|r| r.method == Method::Post).unwrap();
        assert_eq!(
            post.body.unwrap(),
            json!({"farmer_id": 1, "crop_id": 2, "market_id": 3, "quantity": 10.0, "price": null})
        );
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_modal_and_cursor() {
        let api = FakeApi::default();
        api.on(Method::Get, "/api/crops", 200, json!([{"crop_id": 4, "crop_name": "Rice", "season": "Kharif"}]));
        api.on(
            Method::Put,
            "/api/crops/4",
            409,
            json!({"message": "Duplicate value violates a UNIQUE constraint.", "details": "1062 (23000)", "code": 1062}),
        );
        let mut c = controller(&api, ResourceKind::Crops);
        c.load().await;
        let record = c.record(4).unwrap().clone();
        c.open_edit(&record);

        let outcome = c.on_submit(&form(&[("crop_name", "Wheat"), ("season", "Rabi")])).await;
        assert_eq!(outcome, Outcome::Rejected { status: 409 });
        assert!(c.view().modal.visible);
        assert_eq!(c.context().editing_id(), Some(4));
        assert_eq!(c.view().form.get("crop_name"), "Wheat");
        assert_eq!(message_text(&c), Some("Error: Duplicate value violates a UNIQUE constraint."));
        assert_eq!(api.count(Method::Get, "/api/crops"), 1);
    }

    #[tokio::test]
    async fn test_rejected_submit_without_message_uses_fallback() {
        let api = FakeApi::default();
        api.push(Method::Post, "/api/markets", Ok(ApiResponse::new(500, "Internal Server Error")));
        let mut c = controller(&api, ResourceKind::Markets);
        c.open_create();
        let outcome = c.on_submit(&form(&[("market_name", "Vashi")])).await;
        assert_eq!(outcome, Outcome::Rejected { status: 500 });
        assert_eq!(message_text(&c), Some("Error: Operation failed"));
        assert_eq!(c.view().message.as_ref().unwrap().kind, MessageKind::Error);
    }

    #[tokio::test]
    async fn test_submit_transport_failure() {
        let api = FakeApi::default();
        api.fail(Method::Post, "/api/markets", "connection reset");
        let mut c = controller(&api, ResourceKind::Markets);
        c.open_create();
        let outcome = c.on_submit(&form(&[("market_name", "Vashi")])).await;
        assert_eq!(outcome, Outcome::Failed);
        assert!(c.view().modal.visible);
        assert_eq!(message_text(&c), Some("Error: Failed to submit form - connection reset"));
    }

    #[tokio::test]
    async fn test_close_twice_is_noop() {
        let api = FakeApi::default();
        let mut c = controller(&api, ResourceKind::Crops);
        c.open_edit(&Record::from(json!({"crop_id": 4, "crop_name": "Rice"})));
        c.close();
        let after_first = (c.view().clone(), c.context().clone());
        c.close();
        assert_eq!((c.view().clone(), c.context().clone()), after_first);
        assert!(!c.view().modal.visible);
        assert_eq!(c.context().editing_id(), None);
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_open_create_after_edit_clears_cursor_and_form() {
        let api = FakeApi::default();
        let mut c = controller(&api, ResourceKind::Crops);
        c.open_edit(&Record::from(json!({"crop_id": 4, "crop_name": "Rice", "season": "Kharif"})));
        c.open_create();
        assert_eq!(c.context().editing_id(), None);
        assert_eq!(c.view().form.get("crop_name"), "");
        assert_eq!(c.view().modal.title, "Add New Crop");
    }

    #[tokio::test]
    async fn test_delete_success_reloads_once() {
        let api = FakeApi::default();
        api.on(Method::Get, "/api/farmers", 200, farmers());
        api.on(Method::Get, "/api/farmers", 200, json!([farmers()[1].clone()]));
        api.on(Method::Delete, "/api/farmers/1", 200, json!({"message": "Farmer deleted successfully"}));
        let mut c = controller(&api, ResourceKind::Farmers);
        c.load().await;

        let record = c.record(1).unwrap().clone();
        let outcome = c.delete(&record, &|_: &str| true).await;
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(api.count(Method::Delete, "/api/farmers/1"), 1);
        assert_eq!(api.count(Method::Get, "/api/farmers"), 2);
        assert!(c.view().row(1).is_none());
        assert!(c.view().row(2).is_some());
        assert_eq!(message_text(&c), Some("Item deleted successfully!"));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_row() {
        let api = FakeApi::default();
        api.on(Method::Get, "/api/farmers", 200, farmers());
        api.on(
            Method::Delete,
            "/api/farmers/1",
            400,
            json!({"message": "Foreign key constraint failed. Ensure referenced records exist."}),
        );
        let mut c = controller(&api, ResourceKind::Farmers);
        c.load().await;

        let record = c.record(1).unwrap().clone();
        let outcome = c.delete(&record, &|_: &str| true).await;
        assert_eq!(outcome, Outcome::Rejected { status: 400 });
        assert!(c.view().row(1).is_some());
        assert_eq!(api.count(Method::Get, "/api/farmers"), 1);
        assert_eq!(
            message_text(&c),
            Some("Error: Foreign key constraint failed. Ensure referenced records exist.")
        );
    }

    #[tokio::test]
    async fn test_delete_failure_messages() {
        let api = FakeApi::default();
        api.push(Method::Delete, "/api/crops/4", Ok(ApiResponse::new(502, "")));
        api.fail(Method::Delete, "/api/crops/5", "timed out");
        let mut c = controller(&api, ResourceKind::Crops);

        c.delete(&Record::from(json!({"crop_id": 4})), &|_: &str| true).await;
        assert_eq!(message_text(&c), Some("Error: Delete failed"));

        let outcome = c.delete(&Record::from(json!({"crop_id": 5})), &|_: &str| true).await;
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(message_text(&c), Some("Error: Failed to delete item"));
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let api = FakeApi::default();
        let mut c = controller(&api, ResourceKind::Transactions);
        let record = Record::from(json!({"transaction_id": 7}));
        let seen = Mutex::new(String::new());
        let outcome = c
            .delete(&record, &|prompt: &str| {
                *seen.lock().unwrap() = prompt.to_string();
                false
            })
            .await;
        assert_eq!(outcome, Outcome::Cancelled);
        assert!(api.requests().is_empty());
        assert_eq!(
            *seen.lock().unwrap(),
            "Are you sure you want to delete this transaction: Transaction #7?"
        );
    }

    #[tokio::test]
    async fn test_delete_prompt_uses_name_field() {
        let api = FakeApi::default();
        let c = controller(&api, ResourceKind::Markets);
        let record = Record::from(json!({"market_id": 3, "market_name": "Azadpur"}));
        assert_eq!(c.delete_prompt(&record), "Are you sure you want to delete this market: Azadpur?");
    }

    #[tokio::test]
    async fn test_auxiliary_lists_tolerate_partial_failure() {
        let api = FakeApi::default();
        api.on(Method::Get, "/api/farmers-list", 200, json!([{"farmer_id": 1, "farmer_name": "Asha"}]));
        api.on(Method::Get, "/api/crops-list", 500, json!({"message": "db down"}));
        api.on(Method::Get, "/api/markets-list", 200, json!([{"market_id": 3, "market_name": "Azadpur"}]));
        let mut c = controller(&api, ResourceKind::Transactions);
        c.load_auxiliary_lists().await;

        let farmers = c.view().dropdown("farmer-select").unwrap();
        assert_eq!(farmers.options.len(), 1);
        assert_eq!(farmers.options[0].label, "Asha");
        assert!(c.view().dropdown("crop-select").unwrap().options.is_empty());
        assert_eq!(c.view().dropdown("market-select").unwrap().options[0].value, "3");
        assert_eq!(api.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_auxiliary_lists_only_for_transactions() {
        let api = FakeApi::default();
        let mut c = controller(&api, ResourceKind::Farmers);
        c.load_auxiliary_lists().await;
        assert!(api.requests().is_empty());
        assert!(c.view().dropdowns.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_transactions_page() {
        let api = FakeApi::default();
        api.on(Method::Get, "/api/transactions", 200, json!([]));
        api.on(Method::Get, "/api/farmers-list", 200, json!([]));
        api.on(Method::Get, "/api/crops-list", 200, json!([]));
        api.on(Method::Get, "/api/markets-list", 200, json!([]));
        let mut c = controller(&api, ResourceKind::Transactions);
        c.initialize().await;
        assert_eq!(c.view().table, TableBody::Empty);
        assert_eq!(c.view().dropdowns.len(), 3);
        assert_eq!(api.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_show_message_replaces_previous() {
        let api = FakeApi::default();
        let mut c = controller(&api, ResourceKind::Crops).with_message_ttl(Duration::from_secs(2));
        c.show_message("first", MessageKind::Success);
        c.show_message("second", MessageKind::Error);
        let message = c.view().message.as_ref().unwrap();
        assert_eq!(message.text, "second");
        assert_eq!(message.dismiss_after, Duration::from_secs(2));
        assert!(c.view().visible_message(message.shown_at).is_some());
        assert!(c.view().visible_message(message.shown_at + Duration::from_secs(2)).is_none());
    }
}

//! Resource HTMX endpoints - partial responses driving the page controller
//!
//! Endpoints:
//! - htmx_rows: Reload the table (workspace fragment)
//! - htmx_new_form: Open the modal in create mode (modal fragment)
//! - htmx_edit_form: Open the modal pre-filled from a row (modal fragment)
//! - htmx_close: Hide the modal (modal fragment)
//! - htmx_submit: Create or update (workspace fragment)
//! - htmx_delete: Delete a row (workspace fragment)

use super::page::{render_modal, render_workspace};
use crate::{AppState, ApiError, PageController};
use agriweb_core::{Confirm, Outcome, Record, RecordId};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Form;
use std::collections::HashMap;
use std::time::Instant;

/// The browser already asked through `hx-confirm` before the request was sent
struct ConfirmedInBrowser;

impl Confirm for ConfirmedInBrowser {
    fn confirm(&self, prompt: &str) -> bool {
        log::debug!("Confirmed in browser: {}", prompt);
        true
    }
}

/// HTMX: Reload the collection
pub async fn htmx_rows(
    state: State<AppState>,
    path: Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let page = state.page(&path.0, &headers).await?;
    let mut controller = page.lock().await;
    controller.load().await;
    Ok(Html(render_workspace(&controller, Instant::now())))
}

/// HTMX: Create form
pub async fn htmx_new_form(
    state: State<AppState>,
    path: Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let page = state.page(&path.0, &headers).await?;
    let mut controller = page.lock().await;
    controller.open_create();
    Ok(Html(render_modal(&controller)))
}

/// HTMX: Edit form for a displayed row
pub async fn htmx_edit_form(
    state: State<AppState>,
    path: Path<(String, RecordId)>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let (resource, id) = path.0;
    let page = state.page(&resource, &headers).await?;
    let mut controller = page.lock().await;
    let record = displayed_record(&controller, id)?;
    controller.open_edit(&record);
    Ok(Html(render_modal(&controller)))
}

/// HTMX: Close the modal
pub async fn htmx_close(
    state: State<AppState>,
    path: Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let page = state.page(&path.0, &headers).await?;
    let mut controller = page.lock().await;
    controller.close();
    Ok(Html(render_modal(&controller)))
}

/// HTMX: Submit the modal form
pub async fn htmx_submit(
    state: State<AppState>,
    path: Path<String>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let page = state.page(&path.0, &headers).await?;
    let mut controller = page.lock().await;
    let outcome = controller.on_submit(&fields).await;
    log::info!("Submit {}: {:?}", controller.kind(), outcome);
    Ok(Html(render_workspace(&controller, Instant::now())))
}

/// HTMX: Delete a displayed row
pub async fn htmx_delete(
    state: State<AppState>,
    path: Path<(String, RecordId)>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let (resource, id) = path.0;
    let page = state.page(&resource, &headers).await?;
    let mut controller = page.lock().await;
    let record = displayed_record(&controller, id)?;
    let outcome = controller.delete(&record, &ConfirmedInBrowser).await;
    if outcome == Outcome::Applied {
        log::info!("Deleted {} {}", controller.kind().singular(), id);
    }
    Ok(Html(render_workspace(&controller, Instant::now())))
}

fn displayed_record(controller: &PageController, id: RecordId) -> Result<Record, ApiError> {
    controller.record(id).cloned().map_err(|_| ApiError::NotFound {
        resource: format!("{} {}", controller.kind().singular(), id),
    })
}

//! Resource page rendering - Full page endpoint and HTML helpers
//!
//! Endpoints:
//! - page_resource: Table page for one resource type
//!
//! Helper functions render the controller's view model:
//! - render_workspace: status message, table and modal
//! - render_table / render_modal / render_message

use crate::{AppState, ApiError, PageController};
use agriweb_core::render::{EMPTY_HINT, EMPTY_TITLE, LOADING_TEXT};
use agriweb_core::{Dropdown, FormField, InputKind, MessageKind, PageView, ResourceKind, TableBody};
use agriweb_utils::escape_html;
use std::time::Instant;

/// Resource page - starts a fresh controller, as a browser page load would
///
/// The controller is registered under a new page token; the page container
/// sends it back on every HTMX request through `hx-headers`.
pub async fn page_resource(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
    headers: axum::http::HeaderMap,
) -> Result<axum::response::Html<String>, ApiError> {
    let kind: ResourceKind = path.0.parse().map_err(|_| ApiError::NotFound {
        resource: path.0.clone(),
    })?;

    let mut controller = state.fresh_controller(kind);
    controller.initialize().await;
    let workspace = render_workspace(&controller, Instant::now());
    let token = state.open_page(controller).await;

    let collection = kind.collection();
    let inner_content = format!(
        r#"<div id='page' hx-headers='{{"X-Page-Token": "{token}"}}'>
        <div class='page-header'>
            <h2>{title}</h2>
            <button class='add-btn' hx-get='/{collection}/new' hx-target='#modal' hx-swap='outerHTML'>Add New</button>
            <button class='refresh-btn' hx-get='/{collection}/rows' hx-target='#workspace' hx-swap='outerHTML'>Refresh</button>
        </div>
        {workspace}
        </div>"#,
        token = token,
        title = agriweb_utils::capitalize(collection),
        collection = collection,
        workspace = workspace,
    );

    Ok(axum::response::Html(crate::page_response(
        &headers,
        &agriweb_utils::capitalize(collection),
        &format!("/{}", collection),
        &inner_content,
    )))
}

// ==================== Helper Functions ====================

/// Message slot, table and modal; the target of every mutation
pub fn render_workspace(controller: &PageController, now: Instant) -> String {
    format!(
        "<div id='workspace'>{}{}{}</div>",
        render_message(controller.view(), now),
        render_table(controller),
        render_modal(controller),
    )
}

/// Status message with a timer that removes it once its interval runs out
pub fn render_message(view: &PageView, now: Instant) -> String {
    let Some(message) = view.visible_message(now) else {
        return "<div id='message'></div>".to_string();
    };
    let class = match message.kind {
        MessageKind::Success => "success",
        MessageKind::Error => "error",
    };
    format!(
        r#"<div id='message' class='message {}'>{}</div>
        <script>setTimeout(function() {{ var m = document.getElementById('message'); if (m) {{ m.className = ''; m.innerHTML = ''; }} }}, {});</script>"#,
        class,
        escape_html(&message.text),
        message.remaining_at(now).as_millis()
    )
}

/// Data table with an actions column
pub fn render_table(controller: &PageController) -> String {
    let d = controller.descriptor();
    let collection = controller.kind().collection();
    let colspan = d.headers.len() + 1;

    let headers: String = d
        .headers
        .iter()
        .map(|h| format!("<th>{}</th>", h))
        .collect();

    let body = match &controller.view().table {
        TableBody::Loading => format!("<tr><td colspan='{}' class='loading'>{}</td></tr>", colspan, LOADING_TEXT),
        TableBody::Empty => format!(
            "<tr><td colspan='{}' class='empty-state'><h3>{}</h3><p>{}</p></td></tr>",
            colspan,
            EMPTY_TITLE,
            escape_html(EMPTY_HINT)
        ),
        TableBody::Error(message) => format!(
            "<tr><td colspan='{}' class='message error'>{}</td></tr>",
            colspan,
            escape_html(message)
        ),
        TableBody::Rows(rows) => rows
            .iter()
            .map(|row| {
                let cells: String = row
                    .cells
                    .iter()
                    .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                    .collect();
                let actions = match row.id {
                    Some(id) => format!(
                        r#"<button class='edit-btn' hx-get='/{c}/edit/{id}' hx-target='#modal' hx-swap='outerHTML'>Edit</button>
                        <button class='delete-btn' hx-post='/{c}/delete/{id}' hx-target='#workspace' hx-swap='outerHTML' hx-confirm='{prompt}'>Delete</button>"#,
                        c = collection,
                        id = id,
                        prompt = escape_html(&controller.delete_prompt(&row.record)),
                    ),
                    None => String::new(),
                };
                format!("<tr>{}<td class='actions'>{}</td></tr>", cells, actions)
            })
            .collect(),
    };

    format!(
        "<table id='{}-table'><thead><tr>{}<th>Actions</th></tr></thead><tbody>{}</tbody></table>",
        collection, headers, body
    )
}

/// Create/edit modal; an empty placeholder while hidden
pub fn render_modal(controller: &PageController) -> String {
    let view = controller.view();
    if !view.modal.visible {
        return "<div id='modal'></div>".to_string();
    }

    let collection = controller.kind().collection();
    let close_attrs = format!("hx-post='/{}/close' hx-target='#modal' hx-swap='outerHTML'", collection);
    let fields: String = controller
        .descriptor()
        .form_fields
        .iter()
        .map(|field| render_field(field, view))
        .collect();

    format!(
        r#"<div id='modal' class='modal' {close} hx-trigger='click target:.modal'>
            <div class='modal-content'>
                <span class='close' {close}>&times;</span>
                <h3 id='modal-title'>{title}</h3>
                <form id='{singular}-form' hx-post='/{collection}/submit' hx-target='#workspace' hx-swap='outerHTML'>
                    {fields}
                    <button type='submit'>Save</button>
                    <button type='button' class='cancel-btn' {close}>Cancel</button>
                </form>
            </div>
        </div>"#,
        close = close_attrs,
        title = escape_html(&view.modal.title),
        singular = controller.kind().singular(),
        collection = collection,
        fields = fields,
    )
}

fn render_field(field: &FormField, view: &PageView) -> String {
    let value = escape_html(view.form.get(field.name));
    let input = match field.input {
        InputKind::Text => format!("<input type='text' id='{0}' name='{0}' value='{1}' required>", field.name, value),
        InputKind::Phone => format!("<input type='tel' id='{0}' name='{0}' value='{1}'>", field.name, value),
        InputKind::Decimal => format!(
            "<input type='number' step='0.01' id='{0}' name='{0}' value='{1}' required>",
            field.name, value
        ),
        InputKind::Reference(kind) => {
            let select_id = format!("{}-select", kind.singular());
            match view.dropdown(&select_id) {
                Some(dropdown) => render_select(dropdown, view.form.get(field.name)),
                None => format!("<select id='{}' name='{}' required></select>", select_id, field.name),
            }
        }
    };
    format!(
        "<div class='form-group'><label for='{}'>{}</label>{}</div>",
        field.name, field.label, input
    )
}

fn render_select(dropdown: &Dropdown, selected: &str) -> String {
    let mut html = format!(
        "<select id='{}' name='{}' required><option value=''>{}</option>",
        dropdown.select_id,
        dropdown.field,
        escape_html(&dropdown.placeholder)
    );
    for option in &dropdown.options {
        let mark = if option.value == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value='{}'{}>{}</option>",
            escape_html(&option.value),
            mark,
            escape_html(&option.label)
        ));
    }
    html.push_str("</select>");
    html
}

//! Admin views: change lists and change forms.
//!
//! Both views give the inline actions dispatcher the first look at a POST.
//! Only when it returns `None` does the view do its own work (save the form,
//! or render the page).

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};
use django_rs_inline_actions::render::escape_html;
use django_rs_inline_actions::{
    AdminSite, InlineActionError, InlineActionsAdmin, InlineResult, Row, RENDER_FIELD,
};
use django_rs_inline_actions_http::{
    HttpRequest, HttpResponse, HttpResponseRedirect, Message, MessageStorage,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    sites: Arc<HashMap<String, AdminSite>>,
    flash: Arc<Mutex<MessageStorage>>,
}

impl AppState {
    /// Creates the state from the admin sites to serve.
    pub fn new(sites: Vec<AdminSite>) -> Self {
        let sites = sites
            .into_iter()
            .map(|site| (site.name().to_string(), site))
            .collect();
        Self {
            sites: Arc::new(sites),
            flash: Arc::default(),
        }
    }

    /// Returns a site by name.
    pub fn site(&self, name: &str) -> Option<&AdminSite> {
        self.sites.get(name)
    }

    fn keep_messages(&self, request: &HttpRequest) {
        let mut flash = self.flash.lock().unwrap_or_else(PoisonError::into_inner);
        for message in request.take_messages() {
            tracing::info!(level = %message.level, "{}", message.text);
            flash.add(message.level, message.text);
        }
    }

    fn take_messages(&self) -> Vec<Message> {
        self.flash
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

async fn into_http_request(request: Request) -> Result<HttpRequest, HttpResponse> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| HttpResponse::bad_request(format!("Unreadable body: {e}")))?;
    Ok(HttpRequest::from_axum(parts, &bytes))
}

fn error_response(err: &InlineActionError) -> Response {
    if err.status_code() >= 500 {
        tracing::error!(error = %err, "inline action failed");
    }
    err.to_response().into_response()
}

fn lookup<'a>(
    state: &'a AppState,
    site: &str,
    app: &str,
    model: &str,
) -> Result<(&'a AdminSite, &'a InlineActionsAdmin), Response> {
    let site = state
        .site(site)
        .ok_or_else(|| HttpResponse::not_found("Unknown admin site").into_response())?;
    let admin = site
        .get_admin(&format!("{app}.{model}"))
        .ok_or_else(|| HttpResponse::not_found("Model not registered").into_response())?;
    Ok((site, admin))
}

/// `GET|POST /{site}/{app}/{model}/`
pub async fn changelist_view(
    State(state): State<AppState>,
    Path((site_name, app, model)): Path<(String, String, String)>,
    request: Request,
) -> Response {
    let (site, admin) = match lookup(&state, &site_name, &app, &model) {
        Ok(found) => found,
        Err(response) => return response,
    };
    let request = match into_http_request(request).await {
        Ok(request) => request,
        Err(response) => return response.into_response(),
    };
    let model_key = admin.content_type().model_key();

    match site.changelist_action(&request, &model_key).await {
        Ok(Some(response)) => {
            state.keep_messages(&request);
            return response.into_response();
        }
        Ok(None) => {}
        Err(err) => return error_response(&err),
    }
    if request.is_post() {
        return HttpResponseRedirect::new(&request.get_full_path()).into_response();
    }

    match render_changelist(&state, site, admin, &request).await {
        Ok(html) => HttpResponse::ok(html).into_response(),
        Err(err) => error_response(&err),
    }
}

/// `GET|POST /{site}/{app}/{model}/{pk}/change/`
pub async fn changeform_view(
    State(state): State<AppState>,
    Path((site_name, app, model, pk)): Path<(String, String, String, String)>,
    request: Request,
) -> Response {
    let (site, admin) = match lookup(&state, &site_name, &app, &model) {
        Ok(found) => found,
        Err(response) => return response,
    };
    let request = match into_http_request(request).await {
        Ok(request) => request,
        Err(response) => return response.into_response(),
    };
    let model_key = admin.content_type().model_key();

    match site.changeform_action(&request, &model_key, &pk).await {
        Ok(Some(response)) => {
            state.keep_messages(&request);
            return response.into_response();
        }
        Ok(None) => {}
        Err(err) => return error_response(&err),
    }

    let result = if request.is_post() {
        save_change_form(site, admin, &request, &pk).await
    } else {
        render_change_form(&state, site, admin, &request, &pk)
            .await
            .map(HttpResponse::ok)
    };
    match result {
        Ok(response) => response.into_response(),
        Err(err) => error_response(&err),
    }
}

async fn get_object(site: &AdminSite, admin: &InlineActionsAdmin, pk: &str) -> InlineResult<Row> {
    admin
        .get_object(site.store(), pk)
        .await?
        .ok_or_else(|| InlineActionError::ObjectNotFound {
            model: admin.content_type().model_key(),
            pk: pk.to_string(),
        })
}

async fn save_change_form(
    site: &AdminSite,
    admin: &InlineActionsAdmin,
    request: &HttpRequest,
    pk: &str,
) -> InlineResult<HttpResponse> {
    let mut row = get_object(site, admin, pk).await?;
    let readonly = admin.get_readonly_fields(request, Some(&row));
    for field in admin.get_fields(request, Some(&row)) {
        if readonly.contains(&field) {
            continue;
        }
        if let Some(value) = request.post().get(&field) {
            row.set(&field, value);
        }
    }
    site.store().save(row).await?;
    Ok(HttpResponseRedirect::new(
        &site.urls().changelist_url(admin.content_type()),
    ))
}

fn cell(row: &Row, field: &str) -> String {
    match row.get(field) {
        Some(serde_json::Value::String(s)) => escape_html(s),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => escape_html(&other.to_string()),
    }
}

fn header(admin: &InlineActionsAdmin, fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| {
            let label = if field == RENDER_FIELD {
                admin.column_label().unwrap_or_default()
            } else {
                field.as_str()
            };
            format!("<th>{}</th>", escape_html(label))
        })
        .collect()
}

fn table_row(
    admin: &InlineActionsAdmin,
    request: &HttpRequest,
    row: &Row,
    fields: &[String],
) -> InlineResult<String> {
    let mut html = String::from("<tr>");
    for field in fields {
        let value = if field == RENDER_FIELD {
            admin.render_inline_actions(request, Some(row))?
        } else {
            cell(row, field)
        };
        let _ = write!(html, "<td>{value}</td>");
    }
    html.push_str("</tr>");
    Ok(html)
}

fn page(state: &AppState, site: &AdminSite, admin: &InlineActionsAdmin, title: &str, body: &str) -> String {
    let messages: String = state
        .take_messages()
        .iter()
        .map(|m| format!(r#"<li class="{}">{}</li>"#, m.level.tag(), escape_html(&m.text)))
        .collect();
    format!(
        "<!DOCTYPE html>\n<html><head><title>{title} | {site_name}</title>\n{media}</head>\
         <body><ul class=\"messagelist\">{messages}</ul><h1>{title}</h1>{body}</body></html>",
        title = escape_html(title),
        site_name = escape_html(site.name()),
        media = admin.media().render("/static/"),
    )
}

async fn render_changelist(
    state: &AppState,
    site: &AdminSite,
    admin: &InlineActionsAdmin,
    request: &HttpRequest,
) -> InlineResult<String> {
    let fields = admin.get_list_display(request);
    let mut rows = String::new();
    for row in admin.get_queryset(site.store()).await? {
        rows.push_str(&table_row(admin, request, &row, &fields)?);
    }
    let body = format!(
        r#"<form method="post"><table id="result_list"><thead><tr>{}</tr></thead><tbody>{rows}</tbody></table></form>"#,
        header(admin, &fields)
    );
    Ok(page(state, site, admin, &format!("Select {} to change", admin.content_type().model), &body))
}

async fn render_change_form(
    state: &AppState,
    site: &AdminSite,
    admin: &InlineActionsAdmin,
    request: &HttpRequest,
    pk: &str,
) -> InlineResult<String> {
    let object = get_object(site, admin, pk).await?;
    let mut body = String::from(r#"<form method="post">"#);

    for field in admin.get_fields(request, Some(&object)) {
        if field == RENDER_FIELD {
            body.push_str(&admin.render_inline_actions(request, Some(&object))?);
            continue;
        }
        let _ = write!(
            body,
            r#"<p><label>{label}</label> <input type="text" name="{label}" value="{value}"></p>"#,
            label = escape_html(&field),
            value = cell(&object, &field),
        );
    }

    for inline in admin.get_inlines() {
        let fields = inline.get_fields(request, None);
        let mut rows = String::new();
        for row in inline.rows_for(site.store(), &object).await? {
            rows.push_str(&table_row(inline, request, &row, &fields)?);
        }
        let _ = write!(
            body,
            r#"<fieldset class="inline" id="{id}"><table><thead><tr>{head}</tr></thead><tbody>{rows}</tbody></table></fieldset>"#,
            id = escape_html(&inline.name().to_lowercase()),
            head = header(inline, &fields),
        );
    }

    body.push_str(r#"<input type="submit" name="_save" value="Save"></form>"#);
    Ok(page(state, site, admin, &format!("Change {object}"), &body))
}

/// Task pages: list, add, toggle, delete
///
/// # Endpoints
///
/// - `GET /?filter=all|completed|not_completed` - The task list; missing or
///   unrecognized filters mean "all"
/// - `POST /add-task` - Add a task (form field `item_text`)
/// - `GET /toggle-complete/:task_id` - Flip the completion flag
/// - `GET /delete-task/:task_id` - Remove permanently
///
/// All four operate strictly on the requester's own tasks: acting on
/// another user's task id behaves exactly like a missing id.

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    routes::render_page,
};
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use homeroom_shared::{
    auth::middleware::CurrentUser,
    flash::{self, FlashMessage},
    models::todo::{self, TaskFilter, TodoItem},
};
use serde::Deserialize;
use uuid::Uuid;

/// Task list template
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    flashes: Vec<FlashMessage>,
    email: String,
    tasks: Vec<TodoItem>,
    filter: &'static str,
}

/// Query parameters for the task list
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Completion filter; defaults to all
    pub filter: Option<String>,
}

/// Add-task form fields
#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    /// The task title as typed, trimmed before storage
    pub item_text: String,
}

/// Renders the task list, filtered by the `filter` query parameter
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Response> {
    let filter = TaskFilter::from_param(query.filter.as_deref());
    let tasks = TodoItem::list_for_owner(&state.db, user.id, filter).await?;

    let flashes = flash::take(&headers);
    let consume = !flashes.is_empty();
    render_page(
        IndexTemplate {
            flashes,
            email: user.email,
            tasks,
            filter: filter.as_str(),
        },
        consume,
    )
}

/// Adds a task for the current user
///
/// Rejects titles that are empty after trimming before touching the store.
pub async fn add_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<AddTaskForm>,
) -> AppResult<Response> {
    let title = todo::normalize_title(&form.item_text).ok_or(AppError::EmptyTitle)?;

    TodoItem::create(&state.db, user.id, title).await?;

    Ok(Redirect::to("/").into_response())
}

/// Flips the completion flag of one of the current user's tasks
pub async fn toggle(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> AppResult<Response> {
    TodoItem::toggle(&state.db, user.id, task_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Redirect::to("/").into_response())
}

/// Permanently deletes one of the current user's tasks
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> AppResult<Response> {
    if !TodoItem::delete(&state.db, user.id, task_id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Redirect::to("/").into_response())
}

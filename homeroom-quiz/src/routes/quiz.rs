/// Quiz pages: question form, scoring, history, leaderboard
///
/// # Endpoints
///
/// - `GET /` - Landing page
/// - `GET /quiz` - Question form (correct answers never leave the server)
/// - `POST /quiz` - Score the submission, persist a result, redirect to the
///   leaderboard with the score in a flash message
/// - `GET /results` - The requester's own attempt history, oldest first
/// - `GET /leaderboard` - Global top 10
///
/// All of these sit behind the session middleware; handlers can rely on the
/// `CurrentUser` extension being present.

use crate::{
    app::AppState,
    error::AppResult,
    questions::{self, Question},
    routes::render_page,
};
use askama::Template;
use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
    Extension, Form,
};
use homeroom_shared::{
    auth::middleware::CurrentUser,
    flash::{self, FlashLevel, FlashMessage},
    models::quiz_result::{LeaderboardEntry, QuizResult},
};
use std::collections::HashMap;

/// Landing page template
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    flashes: Vec<FlashMessage>,
    email: String,
}

/// Question form template
#[derive(Template)]
#[template(path = "quiz.html")]
struct QuizTemplate {
    flashes: Vec<FlashMessage>,
    questions: &'static [Question],
}

/// Per-user history template
#[derive(Template)]
#[template(path = "results.html")]
struct ResultsTemplate {
    flashes: Vec<FlashMessage>,
    results: Vec<QuizResult>,
    total: usize,
}

/// Leaderboard template
#[derive(Template)]
#[template(path = "leaderboard.html")]
struct LeaderboardTemplate {
    flashes: Vec<FlashMessage>,
    entries: Vec<LeaderboardEntry>,
}

/// Renders the landing page
pub async fn index(headers: HeaderMap, Extension(user): Extension<CurrentUser>) -> AppResult<Response> {
    let flashes = flash::take(&headers);
    let consume = !flashes.is_empty();
    render_page(
        IndexTemplate {
            flashes,
            email: user.email,
        },
        consume,
    )
}

/// Renders the question form
pub async fn quiz_form(headers: HeaderMap) -> AppResult<Response> {
    let flashes = flash::take(&headers);
    let consume = !flashes.is_empty();
    render_page(
        QuizTemplate {
            flashes,
            questions: questions::all(),
        },
        consume,
    )
}

/// Scores a submission and persists the result
///
/// Form keys are stringified question ids, values the chosen option text.
/// The score computation is pure and the insert is a single statement, so
/// the submission either fully lands or not at all.
pub async fn submit(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(answers): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let score = questions::score(&answers);

    QuizResult::create(&state.db, user.id, score as i32).await?;

    tracing::info!(user_id = %user.id, score, "Quiz submitted");

    Ok(flash::redirect_with_flash(
        "/leaderboard",
        FlashLevel::Success,
        &format!("Your score: {}/{}", score, questions::total()),
    ))
}

/// Renders the requester's own attempt history
pub async fn results(
    State(state): State<AppState>,
    headers: HeaderMap,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Response> {
    let history = QuizResult::list_for_user(&state.db, user.id).await?;

    let flashes = flash::take(&headers);
    let consume = !flashes.is_empty();
    render_page(
        ResultsTemplate {
            flashes,
            results: history,
            total: questions::total(),
        },
        consume,
    )
}

/// Renders the global top-10 leaderboard
pub async fn leaderboard(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let entries = QuizResult::top(&state.db, 10).await?;

    let flashes = flash::take(&headers);
    let consume = !flashes.is_empty();
    render_page(LeaderboardTemplate { flashes, entries }, consume)
}

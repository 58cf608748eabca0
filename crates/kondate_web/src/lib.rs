//! HTTP render host for the Kondate planner.
//!
//! # Responsibility
//! - Translate form posts into planner events for the caller's session.
//! - Draw the resulting view as HTML, or expose it as JSON.
//!
//! # Invariants
//! - Handlers hold no business rules; every change is a core `PlannerEvent`.
//! - A response always carries a session cookie when a session was created.

pub mod config;
pub mod html;
pub mod session;

use axum::extract::{Form, State};
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use kondate_core::{CalendarDate, CalendarError, PlannerEvent, PlannerView};
use log::{debug, warn};
use serde::Deserialize;
use session::{
    expired_session_cookie, session_cookie, session_id_from_cookie, Clock, SessionAccess,
    SessionRegistry,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use uuid::Uuid;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    sessions: SessionRegistry,
}

impl AppState {
    pub fn new(clock: Clock) -> Self {
        Self {
            sessions: SessionRegistry::new(clock),
        }
    }

    /// State whose sessions expire after `idle_timeout` without a request.
    pub fn with_idle_timeout(clock: Clock, idle_timeout: Duration) -> Self {
        Self {
            sessions: SessionRegistry::with_idle_timeout(clock, idle_timeout),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}

/// Request-level failure surfaced to the browser.
#[derive(Debug)]
pub enum WebError {
    /// Submitted date field is not a valid `YYYY-MM-DD` key.
    BadDate(CalendarError),
}

impl Display for WebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadDate(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WebError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BadDate(err) => Some(err),
        }
    }
}

impl From<CalendarError> for WebError {
    fn from(value: CalendarError) -> Self {
        Self::BadDate(value)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        warn!("event=request_rejected module=web status=error error={self}");
        match self {
            Self::BadDate(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DateForm {
    pub date: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub menu: String,
    #[serde(default)]
    pub shopping: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub item: String,
}

/// Builds the planner router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_page))
        .route("/week", post(pick_week))
        .route("/day", post(select_day))
        .route("/save", post(save_day))
        .route("/check", post(toggle_item))
        .route("/api/view", get(view_json))
        .route("/session/end", post(end_session))
        .with_state(state)
}

async fn show_page(State(app): State<AppState>, headers: HeaderMap) -> Response {
    run_events(&app, &headers, vec![PlannerEvent::Refresh])
}

async fn pick_week(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DateForm>,
) -> Result<Response, WebError> {
    let date = CalendarDate::parse_key(&form.date)?;
    Ok(run_events(&app, &headers, vec![PlannerEvent::PickDate(date)]))
}

async fn select_day(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DateForm>,
) -> Result<Response, WebError> {
    let date = CalendarDate::parse_key(&form.date)?;
    Ok(run_events(&app, &headers, vec![PlannerEvent::SelectDay(date)]))
}

async fn save_day(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SaveForm>,
) -> Response {
    run_events(
        &app,
        &headers,
        vec![
            PlannerEvent::EditMenu(form.menu),
            PlannerEvent::EditShopping(form.shopping),
            PlannerEvent::Save,
        ],
    )
}

async fn toggle_item(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ItemForm>,
) -> Response {
    run_events(&app, &headers, vec![PlannerEvent::ToggleItem(form.item)])
}

async fn view_json(State(app): State<AppState>, headers: HeaderMap) -> Response {
    let access = app
        .sessions
        .with_session(request_session(&headers), |state| state.render());
    with_session_cookie(&access, Json(&access.value).into_response())
}

async fn end_session(State(app): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = request_session(&headers) {
        app.sessions.end(id);
    }
    let mut response = StatusCode::SEE_OTHER.into_response();
    response
        .headers_mut()
        .insert(LOCATION, HeaderValue::from_static("/"));
    set_cookie(&mut response, &expired_session_cookie());
    response
}

fn run_events(app: &AppState, headers: &HeaderMap, events: Vec<PlannerEvent>) -> Response {
    let access: SessionAccess<PlannerView> =
        app.sessions.with_session(request_session(headers), |state| {
            for event in events {
                state.apply(event);
            }
            state.render()
        });
    debug!(
        "event=render module=web status=ok session={} created={}",
        access.id, access.created
    );
    with_session_cookie(&access, Html(html::render_page(&access.value)).into_response())
}

fn request_session(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(session_id_from_cookie)
}

fn with_session_cookie<T>(access: &SessionAccess<T>, mut response: Response) -> Response {
    if access.created {
        set_cookie(&mut response, &session_cookie(access.id));
    }
    response
}

fn set_cookie(response: &mut Response, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(err) => warn!("event=set_cookie module=web status=error error={err}"),
    }
}

//! API handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jotlet_auth::Principal;
use jotlet_core::error::Error;
use jotlet_core::models::note::UpdateNote;
use jotlet_core::models::user::UserRole;
use jotlet_policy::InviteInput;
use surrealdb::Connection;
use uuid::Uuid;

use crate::dto::*;
use crate::error::{ApiError, unauthorized};
use crate::state::AppState;

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "auth-token";

fn session_cookie(token: String, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::seconds(max_age_secs as i64));
    cookie.set_secure(secure);
    cookie
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, "");
    cookie.set_path("/");
    cookie
}

/// Resolve the session cookie into a live principal. Any failure,
/// including a token whose user has since been deleted, reads as 401.
async fn require_session<C: Connection>(
    state: &AppState<C>,
    jar: &CookieJar,
) -> Result<Principal, ApiError> {
    let token = jar.get(AUTH_COOKIE).ok_or_else(unauthorized)?;
    state
        .auth
        .resolve_token(token.value())
        .await
        .map_err(|_| unauthorized())
}

pub async fn health() -> &'static str {
    "OK"
}

// ---------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------

pub async fn login<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserBody>), ApiError> {
    let login = state.auth.login(&body.email, &body.password).await?;
    let jar = jar.add(session_cookie(
        login.token,
        login.expires_in,
        state.cookie_secure,
    ));
    Ok((jar, Json(UserBody::from(&login.principal))))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.remove(removal_cookie()), StatusCode::NO_CONTENT)
}

/// Current-session snapshot. Unlike the other endpoints, a valid
/// token whose user has been deleted yields 404 rather than 401.
pub async fn me<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
) -> Result<Json<UserBody>, ApiError> {
    let token = jar.get(AUTH_COOKIE).ok_or_else(unauthorized)?;
    let principal = state
        .auth
        .resolve_token(token.value())
        .await
        .map_err(|e| match e {
            Error::NotFound { .. } => ApiError(e),
            _ => unauthorized(),
        })?;
    Ok(Json(UserBody::from(&principal)))
}

// ---------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------

pub async fn list_notes<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<NoteListBody>, ApiError> {
    let principal = require_session(&state, &jar).await?;
    let notes = state
        .notes
        .list(principal.tenant.id, query.search.as_deref())
        .await?;
    Ok(Json(NoteListBody {
        notes: notes.into_iter().map(NoteBody::from).collect(),
    }))
}

pub async fn create_note<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Json(body): Json<CreateNoteRequest>,
) -> Result<Response, ApiError> {
    let principal = require_session(&state, &jar).await?;

    let decision = state
        .subscription
        .check_create_note(principal.tenant.id)
        .await?;
    if !decision.allowed {
        let body = LimitExceededBody {
            error: decision
                .reason
                .unwrap_or_else(|| "Plan limit reached".into()),
            current_count: decision.current_count.unwrap_or(0),
            limit: decision.limit.unwrap_or(0),
        };
        return Ok((StatusCode::FORBIDDEN, Json(body)).into_response());
    }

    let note = state
        .notes
        .create(
            principal.tenant.id,
            principal.user_id,
            &body.title,
            &body.content,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(NoteBody::from(note))).into_response())
}

pub async fn get_note<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Json<NoteBody>, ApiError> {
    let principal = require_session(&state, &jar).await?;
    let note = state.notes.get(principal.tenant.id, id).await?;
    Ok(Json(NoteBody::from(note)))
}

pub async fn update_note<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<Json<NoteBody>, ApiError> {
    let principal = require_session(&state, &jar).await?;
    let note = state
        .notes
        .update(
            principal.tenant.id,
            id,
            UpdateNote {
                title: body.title,
                content: body.content,
            },
        )
        .await?;
    Ok(Json(NoteBody::from(note)))
}

pub async fn delete_note<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let principal = require_session(&state, &jar).await?;
    state.notes.delete(principal.tenant.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------

pub async fn invite_user<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Json(body): Json<InviteRequest>,
) -> Result<(StatusCode, Json<InvitedUserBody>), ApiError> {
    let principal = require_session(&state, &jar).await?;
    let invited = state
        .admin
        .invite(
            &principal,
            InviteInput {
                email: body.email,
                name: body.name,
                role: body.role.unwrap_or(UserRole::Member),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(InvitedUserBody::from(invited))))
}

pub async fn upgrade_tenant<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Path(slug): Path<String>,
) -> Result<Json<UpgradedTenantBody>, ApiError> {
    let principal = require_session(&state, &jar).await?;
    let tenant = state.admin.upgrade_tenant(&principal, &slug).await?;
    Ok(Json(UpgradedTenantBody::from(tenant)))
}

pub async fn subscription_status<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
) -> Result<Json<SubscriptionStatusBody>, ApiError> {
    let principal = require_session(&state, &jar).await?;
    let status = state.subscription.status(principal.tenant.id).await?;
    Ok(Json(SubscriptionStatusBody::from(status)))
}

// ---------------------------------------------------------------------
// Development
// ---------------------------------------------------------------------

/// Populate the demo tenants and accounts. Idempotent.
pub async fn seed<C: Connection>(
    State(state): State<AppState<C>>,
) -> Result<Json<SeedBody>, ApiError> {
    let summary = jotlet_db::seed::seed_demo_data(&state.db).await?;
    Ok(Json(SeedBody {
        tenants_created: summary.tenants_created,
        users_created: summary.users_created,
    }))
}

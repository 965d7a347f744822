//! Auth route handlers.
//!
//! Mock login/logout backed by the session. No registration: this demo
//! accepts any well-formed credentials and only distinguishes the
//! configured admin pair.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::{CurrentUser, session_keys};
use crate::routes::UserView;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub user: Option<UserView>,
}

/// Display the login page.
pub async fn login_page(OptionalUser(user): OptionalUser) -> impl IntoResponse {
    LoginTemplate {
        error: None,
        user: user.as_ref().map(UserView::from),
    }
}

/// Login action.
///
/// On success stores the identity in the session and redirects to the
/// shop; on validation failure re-renders the login page with a message.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match AuthService::new(state.config()).login(&form.email, &form.password) {
        Ok(user) => {
            session
                .insert(session_keys::CURRENT_USER, &user)
                .await
                .map_err(|e| AppError::Internal(format!("failed to save session: {e}")))?;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => Ok(LoginTemplate {
            error: Some(err.to_string()),
            user: None,
        }
        .into_response()),
    }
}

/// Logout action.
///
/// Clears the identity; the session's cart is left alone.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    Ok(Redirect::to("/"))
}

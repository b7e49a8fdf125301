use askama_axum::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::handlers::{status_for, AppState};
use crate::spam::ScoreResult;

const EMPTY_MESSAGE: &str = "Please paste an email/message to classify.";

/// Flash message shown above the form
pub struct Flash {
    pub category: &'static str,
    pub text: String,
}

impl Flash {
    fn warning(text: &str) -> Self {
        Self {
            category: "warning",
            text: text.to_string(),
        }
    }

    fn danger(text: String) -> Self {
        Self {
            category: "danger",
            text,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    flashes: Vec<Flash>,
    message: String,
    info: Option<ScoreResult>,
}

#[derive(Deserialize)]
pub struct ClassifyForm {
    #[serde(default)]
    message: String,
}

// The load error is shown on every page while the model is missing
fn startup_flashes(state: &AppState) -> Vec<Flash> {
    state
        .scorer
        .model()
        .load_error()
        .map(|reason| vec![Flash::danger(format!("Model loading error: {}", reason))])
        .unwrap_or_default()
}

// Form page (GET)
pub async fn index_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    IndexTemplate {
        flashes: startup_flashes(&state),
        message: String::new(),
        info: None,
    }
}

// Form submission (POST)
pub async fn index_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ClassifyForm>,
) -> Response {
    let mut flashes = startup_flashes(&state);
    let message = form.message.trim().to_string();

    if message.is_empty() {
        flashes.push(Flash::warning(EMPTY_MESSAGE));
        let page = IndexTemplate {
            flashes,
            message,
            info: None,
        };
        return (StatusCode::BAD_REQUEST, page).into_response();
    }

    match state.scorer.classify(&message) {
        Ok(info) => IndexTemplate {
            flashes,
            message,
            info: Some(info),
        }
        .into_response(),
        Err(e) => {
            let status = status_for(&e);
            flashes.push(Flash::danger(e.to_string()));
            let page = IndexTemplate {
                flashes,
                message,
                info: None,
            };
            (status, page).into_response()
        }
    }
}

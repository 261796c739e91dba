//! Request handlers for the goal and chat endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::ApiError;
use super::AppState;
use crate::core::goal::Goal;
use crate::core::prompt::build_prompt;

type ApiResult<T> = Result<T, ApiError>;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: Vec<Goal>,
}

/// Explicit `null` reads the same as an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

fn success() -> Json<Value> {
    Json(json!({ "status": "success" }))
}

/// Index segments that are not non-negative integers address nothing
fn parse_index(raw: &str) -> ApiResult<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NotFound);
    }
    raw.parse().map_err(|_| ApiError::NotFound)
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> &'static str {
    "goaltrack is running"
}

pub async fn list_goals(State(state): State<AppState>) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.store.load()?;
    Ok(Json(goals))
}

pub async fn create_goal(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let goal: Goal = serde_json::from_slice(&body)?;
    let index = state.store.append(goal)?;
    info!(index, "Created goal");
    Ok(success())
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> ApiResult<Json<Value>> {
    let index = parse_index(&index)?;
    state.store.remove(index)?;
    info!(index, "Deleted goal");
    Ok(success())
}

pub async fn replace_goal(
    State(state): State<AppState>,
    Path(index): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let index = parse_index(&index)?;
    let goal: Goal = match serde_json::from_slice(&body) {
        Ok(goal) => goal,
        // An index that addresses nothing wins over a bad body
        Err(e) if index >= state.store.load()?.len() => {
            debug!("Ignoring body error for missing goal {}: {}", index, e);
            return Err(ApiError::NotFound);
        }
        Err(e) => return Err(e.into()),
    };
    state.store.replace(index, goal)?;
    info!(index, "Replaced goal");
    Ok(success())
}

/// Answer a question using the goals snapshot sent with the request
pub async fn chat(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<ChatResponse>> {
    let req: ChatRequest = serde_json::from_slice(&body)?;
    let prompt = build_prompt(&req.message, &req.goals)?;

    debug!(prompt = %prompt, "Sending prompt to model");
    let response = state.model.generate(&prompt).await?;
    debug!(response = %response, "Received model response");

    Ok(Json(ChatResponse { response }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0").unwrap(), 0);
        assert_eq!(parse_index("12").unwrap(), 12);
        assert!(matches!(parse_index("-1"), Err(ApiError::NotFound)));
        assert!(matches!(parse_index("abc"), Err(ApiError::NotFound)));
        assert!(matches!(parse_index("+1"), Err(ApiError::NotFound)));
        assert!(matches!(parse_index(""), Err(ApiError::NotFound)));
    }

    #[test]
    fn test_chat_request_defaults() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_empty());
        assert!(req.goals.is_empty());
    }

    #[test]
    fn test_chat_request_null_fields() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": null, "goals": null}"#).unwrap();
        assert!(req.message.is_empty());
        assert!(req.goals.is_empty());

        assert!(serde_json::from_str::<ChatRequest>(r#"{"goals": 5}"#).is_err());
    }
}

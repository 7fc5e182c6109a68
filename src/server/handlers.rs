use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::models::{PlannerData, TaskUpdate};
use crate::store::PlannerStore;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
}

impl StatusResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub subject_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSubjectRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChapterRequest {
    pub subject_id: String,
    pub chapter_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChapterRequest {
    pub subject_id: String,
    pub chapter_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveJournalRequest {
    pub entry: String,
}

#[derive(Debug, Serialize)]
pub struct JournalResponse {
    pub entry: String,
}

/// The single-page planner UI. All state lives behind the JSON endpoints;
/// this page is plain presentation glue.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

pub async fn get_data(
    State(store): State<Arc<PlannerStore>>,
) -> Result<Json<PlannerData>, ApiError> {
    Ok(Json(store.data()?))
}

pub async fn add_task(
    State(store): State<Arc<PlannerStore>>,
    Json(req): Json<AddTaskRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    // The form submits an empty subject id when nothing is selected
    let subject_id = req.subject_id.filter(|s| !s.is_empty());
    store.add_task(req.name, req.date, subject_id)?;
    Ok(StatusResponse::ok())
}

pub async fn update_task(
    State(store): State<Arc<PlannerStore>>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<StatusResponse>, ApiError> {
    store.update_task(update)?;
    Ok(StatusResponse::ok())
}

pub async fn delete_task(
    State(store): State<Arc<PlannerStore>>,
    Json(req): Json<IdRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    store.delete_task(&req.id)?;
    Ok(StatusResponse::ok())
}

pub async fn add_subject(
    State(store): State<Arc<PlannerStore>>,
    Json(req): Json<AddSubjectRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    store.add_subject(req.name)?;
    Ok(StatusResponse::ok())
}

pub async fn delete_subject(
    State(store): State<Arc<PlannerStore>>,
    Json(req): Json<IdRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    store.delete_subject(&req.id)?;
    Ok(StatusResponse::ok())
}

pub async fn add_chapter(
    State(store): State<Arc<PlannerStore>>,
    Json(req): Json<AddChapterRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    store.add_chapter(&req.subject_id, req.chapter_name)?;
    Ok(StatusResponse::ok())
}

pub async fn delete_chapter(
    State(store): State<Arc<PlannerStore>>,
    Json(req): Json<DeleteChapterRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    store.delete_chapter(&req.subject_id, &req.chapter_id)?;
    Ok(StatusResponse::ok())
}

pub async fn increment_pomodoro(
    State(store): State<Arc<PlannerStore>>,
    Json(req): Json<IdRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    store.increment_pomodoro(&req.id)?;
    Ok(StatusResponse::ok())
}

pub async fn save_journal(
    State(store): State<Arc<PlannerStore>>,
    Json(req): Json<SaveJournalRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    store.save_journal(req.entry)?;
    Ok(StatusResponse::ok())
}

pub async fn journal_entry(
    State(store): State<Arc<PlannerStore>>,
    Path(date): Path<String>,
) -> Result<Json<JournalResponse>, ApiError> {
    let entry = store.journal_entry(&date)?;
    Ok(Json(JournalResponse { entry }))
}

//! JSON handlers for campaign drafts.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use outreach_app::ports::{CampaignRepository, CompletionClient};
use outreach_domain::automation::AutomationTree;
use outreach_domain::campaign::{CampaignDraft, Channel};
use outreach_domain::id::CampaignId;
use outreach_domain::time::Timestamp;

use super::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a draft.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
    #[serde(default)]
    pub channel: Channel,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    pub scheduled_at: Option<Timestamp>,
    #[serde(default)]
    pub automations: AutomationTree,
}

/// Request body replacing the editable fields of a draft.
///
/// The rule forest is edited through the automation endpoints and is left
/// untouched here.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    pub name: String,
    pub channel: Channel,
    pub subject: String,
    pub content: String,
    pub scheduled_at: Option<Timestamp>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<CampaignDraft>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<CampaignDraft>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<CampaignDraft>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/campaigns`
pub async fn list<CR, CC>(
    State(state): State<AppState<CR, CC>>,
) -> Result<ListResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let drafts = state.campaign_service.list_campaigns().await?;
    Ok(ListResponse::Ok(Json(drafts)))
}

/// `GET /api/campaigns/{id}`
pub async fn get<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let campaign_id: CampaignId = parse_id(&id)?;
    let draft = state.campaign_service.get_campaign(campaign_id).await?;
    Ok(GetResponse::Ok(Json(draft)))
}

/// `POST /api/campaigns`
pub async fn create<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<CreateResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let mut builder = CampaignDraft::builder()
        .name(req.name)
        .channel(req.channel)
        .subject(req.subject)
        .content(req.content)
        .automations(req.automations);
    if let Some(scheduled_at) = req.scheduled_at {
        builder = builder.scheduled_at(scheduled_at);
    }

    let draft = builder.build()?;
    let created = state.campaign_service.create_campaign(draft).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/campaigns/{id}`
pub async fn update<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCampaignRequest>,
) -> Result<GetResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let campaign_id: CampaignId = parse_id(&id)?;
    let updated = state
        .campaign_service
        .update_campaign(campaign_id, move |draft| {
            draft.name = req.name;
            draft.channel = req.channel;
            draft.subject = req.subject;
            draft.content = req.content;
            draft.scheduled_at = req.scheduled_at;
        })
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/campaigns/{id}`
pub async fn delete<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let campaign_id: CampaignId = parse_id(&id)?;
    state.campaign_service.delete_campaign(campaign_id).await?;
    Ok(DeleteResponse::NoContent)
}

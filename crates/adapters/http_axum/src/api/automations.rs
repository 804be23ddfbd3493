//! JSON handlers for a draft's automation rule forest.
//!
//! Every endpoint answers with the whole forest in its nested form, so a
//! client can re-render after each edit without another round trip.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use outreach_app::ports::{CampaignRepository, CompletionClient};
use outreach_domain::automation::{AutomationTree, RulePatch};
use outreach_domain::id::{CampaignId, RuleId};

use super::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Response carrying the rule forest after an edit.
pub enum ForestResponse {
    /// The forest as it is now.
    Ok(Json<AutomationTree>),
    /// A rule was appended.
    Created(Json<AutomationTree>),
}

impl IntoResponse for ForestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

fn parse_ids(id: &str, rule_id: &str) -> Result<(CampaignId, RuleId), ApiError> {
    Ok((parse_id(id)?, parse_id(rule_id)?))
}

/// `GET /api/campaigns/{id}/automations`
pub async fn list<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Path(id): Path<String>,
) -> Result<ForestResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let campaign_id: CampaignId = parse_id(&id)?;
    let draft = state.campaign_service.get_campaign(campaign_id).await?;
    Ok(ForestResponse::Ok(Json(draft.automations)))
}

/// `POST /api/campaigns/{id}/automations`
pub async fn add_root<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Path(id): Path<String>,
) -> Result<ForestResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let campaign_id: CampaignId = parse_id(&id)?;
    let (_, draft) = state.campaign_service.add_root_rule(campaign_id).await?;
    Ok(ForestResponse::Created(Json(draft.automations)))
}

/// `PATCH /api/campaigns/{id}/automations/{rule_id}`
pub async fn update<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Path((id, rule_id)): Path<(String, String)>,
    Json(patch): Json<RulePatch>,
) -> Result<ForestResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let (campaign_id, rule_id) = parse_ids(&id, &rule_id)?;
    let draft = state
        .campaign_service
        .update_rule(campaign_id, rule_id, patch)
        .await?;
    Ok(ForestResponse::Ok(Json(draft.automations)))
}

/// `POST /api/campaigns/{id}/automations/{rule_id}/sub-automations`
///
/// An unknown parent leaves the forest unchanged and answers `200`.
pub async fn add_sub<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Path((id, rule_id)): Path<(String, String)>,
) -> Result<ForestResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let (campaign_id, parent_id) = parse_ids(&id, &rule_id)?;
    let (added, draft) = state
        .campaign_service
        .add_sub_automation(campaign_id, parent_id)
        .await?;
    Ok(match added {
        Some(_) => ForestResponse::Created(Json(draft.automations)),
        None => ForestResponse::Ok(Json(draft.automations)),
    })
}

/// `DELETE /api/campaigns/{id}/automations/{rule_id}`
pub async fn delete<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Path((id, rule_id)): Path<(String, String)>,
) -> Result<ForestResponse, ApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let (campaign_id, rule_id) = parse_ids(&id, &rule_id)?;
    let draft = state
        .campaign_service
        .delete_rule(campaign_id, rule_id)
        .await?;
    Ok(ForestResponse::Ok(Json(draft.automations)))
}

//! Spam-check handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use outreach_app::ports::{CampaignRepository, CompletionClient};
use outreach_domain::error::OutreachError;
use outreach_domain::id::CampaignId;
use outreach_domain::spam::{SpamCheckRequest, SpamVerdict};

use super::parse_id;
use crate::error::SpamApiError;
use crate::state::AppState;

/// `POST /api/check-spam-content`
///
/// A body that cannot be read is reported like any other unexpected failure
/// (`500`, `isSpam: false`).
pub async fn check_content<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    payload: Result<Json<SpamCheckRequest>, JsonRejection>,
) -> Result<Json<SpamVerdict>, SpamApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let Json(request) = payload?;
    let verdict = state.spam_check_service.check(&request).await?;
    Ok(Json(verdict))
}

/// `POST /api/campaigns/{id}/spam-check`
///
/// A draft with a blank subject or body is rejected with `400` before the
/// classifier is called.
pub async fn check_campaign<CR, CC>(
    State(state): State<AppState<CR, CC>>,
    Path(id): Path<String>,
) -> Result<Json<SpamVerdict>, SpamApiError>
where
    CR: CampaignRepository + Send + Sync + 'static,
    CC: CompletionClient + Send + Sync + 'static,
{
    let campaign_id: CampaignId = parse_id(&id)?;
    let draft = state.campaign_service.get_campaign(campaign_id).await?;
    let request = draft
        .spam_check_request()
        .map_err(OutreachError::from)?;
    let verdict = state.spam_check_service.check(&request).await?;
    Ok(Json(verdict))
}

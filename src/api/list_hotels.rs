//! ListListings handler: hotels owned by the caller named in the token.

use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::event::{ProxyRequest, ProxyResponse, ALLOW_GET};
use crate::api::AppState;
use crate::auth::decode_claims;
use crate::models::HotelsResponse;

const TOKEN_NOT_PRESENT_MESSAGE: &str = "Query parameter 'token' not present.";

/// GET /hotels?token=...
///
/// The bearer token rides in a query parameter rather than a header: the
/// gateway integration for this route does not forward authorization
/// headers.
#[tracing::instrument(skip(state, request))]
pub async fn list_hotels(state: &AppState, request: ProxyRequest) -> ProxyResponse {
    match handle(state, request).await {
        Ok(response) => response,
        Err(err) => {
            match &err {
                ApiError::BadRequest(_) => info!("list_hotels rejected: {}", err),
                _ => error!("list_hotels failed: {}", err),
            }
            err.to_response(ALLOW_GET)
        }
    }
}

async fn handle(state: &AppState, request: ProxyRequest) -> ApiResult<ProxyResponse> {
    // No query map at all means the gateway integration is misconfigured;
    // answer 200 with an empty body rather than blaming the client.
    let Some(params) = request.query_string_parameters.as_ref() else {
        info!("request carried no query string parameters");
        return Ok(ProxyResponse::empty(200, ALLOW_GET));
    };

    let token = params.get("token").map(String::as_str).unwrap_or_default();
    if token.is_empty() {
        return Err(ApiError::BadRequest(TOKEN_NOT_PRESENT_MESSAGE.to_string()));
    }

    // Decoded, not verified; see auth::claims.
    let claims = decode_claims(token)?;
    let owner_id = claims
        .sub
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Token has no subject claim.".to_string()))?;

    let hotels = state.listing_store.listings_for_owner(owner_id).await?;
    info!(owner_id, count = hotels.len(), "listed hotels for caller");

    Ok(ProxyResponse::json(
        200,
        &HotelsResponse { hotels },
        ALLOW_GET,
    ))
}

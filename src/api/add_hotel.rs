//! CreateListing handler: multipart upload of a hotel record and its file.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::event::{ProxyRequest, ProxyResponse, ALLOW_POST};
use crate::api::multipart::parse_add_hotel_form;
use crate::api::AppState;
use crate::auth::{decode_claims, ADMIN_GROUP};
use crate::models::{Listing, MessageResponse};

const SUCCESS_MESSAGE: &str = "Hotel information was stored successfully.";
const UNAUTHORISED_MESSAGE: &str = "Unauthorised. Must be a member of Admin group.";

/// POST /hotels
///
/// Decode body -> parse multipart -> authorize -> upload file -> persist
/// record. Authorization failure is a hard early return: nothing is
/// uploaded or persisted after a failed group check.
#[tracing::instrument(skip(state, request))]
pub async fn add_hotel(state: &AppState, request: ProxyRequest) -> ProxyResponse {
    match handle(state, request).await {
        Ok(response) => response,
        Err(err) => {
            match &err {
                ApiError::Unauthorized(_) => warn!("add_hotel rejected: {}", err),
                ApiError::BadRequest(_) => info!("add_hotel rejected: {}", err),
                _ => error!("add_hotel failed: {}", err),
            }
            err.to_response(ALLOW_POST)
        }
    }
}

async fn handle(state: &AppState, request: ProxyRequest) -> ApiResult<ProxyResponse> {
    let body = decode_body(&request)?;
    let content_type = request.header("content-type").ok_or_else(|| {
        ApiError::BadRequest("Missing Content-Type header for multipart body.".to_string())
    })?;
    let form = parse_add_hotel_form(content_type, body).await?;

    // The token is decoded, not verified; the gateway authorizer has
    // already checked the signature.
    let claims = decode_claims(&form.id_token)?;
    if !claims.is_member_of(ADMIN_GROUP) {
        return Err(ApiError::Unauthorized(UNAUTHORISED_MESSAGE.to_string()));
    }

    let price: i32 = form.hotel_price.trim().parse().map_err(|_| {
        ApiError::BadRequest("Form field 'hotelPrice' must be an integer.".to_string())
    })?;
    if price < 0 {
        return Err(ApiError::BadRequest(
            "Form field 'hotelPrice' must not be negative.".to_string(),
        ));
    }
    let rating: i32 = form.hotel_rating.trim().parse().map_err(|_| {
        ApiError::BadRequest("Form field 'hotelRating' must be an integer.".to_string())
    })?;

    info!(
        file_name = %form.file_name,
        size = form.file_bytes.len(),
        "uploading listing file"
    );
    // Key is the submitted file name; collisions between uploads sharing a
    // name are a known limitation of the storage contract.
    state
        .object_store
        .put(&form.file_name, form.file_bytes.clone())
        .await?;

    let listing = Listing {
        owner_id: form.user_id,
        id: Uuid::new_v4().to_string(),
        name: form.hotel_name,
        price,
        rating,
        city_name: form.hotel_city,
        file_name: form.file_name,
    };

    if let Err(err) = state.listing_store.put(&listing).await {
        error!(
            file_name = %listing.file_name,
            "metadata write failed after upload, removing orphaned object: {}",
            err
        );
        if let Err(cleanup_err) = state.object_store.delete(&listing.file_name).await {
            error!(
                file_name = %listing.file_name,
                "compensating delete failed, object is orphaned: {}",
                cleanup_err
            );
        }
        return Err(err.into());
    }

    info!(
        listing_id = %listing.id,
        owner_id = %listing.owner_id,
        "stored hotel listing"
    );

    Ok(ProxyResponse::json(
        200,
        &MessageResponse {
            message: SUCCESS_MESSAGE.to_string(),
        },
        ALLOW_POST,
    ))
}

fn decode_body(request: &ProxyRequest) -> ApiResult<Bytes> {
    let body = request.body.as_deref().unwrap_or_default();
    if request.is_base64_encoded {
        BASE64
            .decode(body)
            .map(Bytes::from)
            .map_err(|e| ApiError::BadRequest(format!("Body is not valid base64: {}", e)))
    } else {
        Ok(Bytes::copy_from_slice(body.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_body_raw() {
        let request = ProxyRequest {
            body: Some("plain".to_string()),
            ..Default::default()
        };
        assert_eq!(&decode_body(&request).unwrap()[..], b"plain");
    }

    #[test]
    fn test_decode_body_base64() {
        let request = ProxyRequest {
            body: Some(BASE64.encode(b"binary\xff")),
            is_base64_encoded: true,
            ..Default::default()
        };
        assert_eq!(&decode_body(&request).unwrap()[..], b"binary\xff");
    }

    #[test]
    fn test_decode_body_invalid_base64() {
        let request = ProxyRequest {
            body: Some("!!not base64!!".to_string()),
            is_base64_encoded: true,
            ..Default::default()
        };
        assert!(matches!(
            decode_body(&request),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_decode_body_absent() {
        let request = ProxyRequest::default();
        assert!(decode_body(&request).unwrap().is_empty());
    }
}

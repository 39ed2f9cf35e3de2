//! Decoding of the `multipart/form-data` upload body into a typed form.

use std::convert::Infallible;

use bytes::Bytes;
use multer::Multipart;

use crate::api::error::ApiError;

/// The CreateListing form, fields still in their submitted string form.
/// Numeric fields are validated by the handler before any storage call.
#[derive(Debug)]
pub struct AddHotelForm {
    pub hotel_name: String,
    pub hotel_rating: String,
    pub hotel_city: String,
    pub hotel_price: String,
    pub user_id: String,
    pub id_token: String,
    pub file_name: String,
    pub file_bytes: Bytes,
}

/// Parse the request body as multipart form data.
///
/// Required fields: `hotelName`, `hotelRating`, `hotelCity`, `hotelPrice`,
/// `userId`, `idToken`, plus exactly one file part. A missing field or file
/// part is a 400, never a fault. Additional parts are ignored; the first
/// file part wins.
pub async fn parse_add_hotel_form(content_type: &str, body: Bytes) -> Result<AddHotelForm, ApiError> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart Content-Type: {}", e)))?;

    let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = Multipart::new(stream, boundary);

    let mut hotel_name = None;
    let mut hotel_rating = None;
    let mut hotel_city = None;
    let mut hotel_price = None;
    let mut user_id = None;
    let mut id_token = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);

        if let Some(file_name) = file_name {
            if file.is_none() {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Malformed file part: {}", e)))?;
                file = Some((file_name, bytes));
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed form field: {}", e)))?;

        match name.as_deref() {
            Some("hotelName") => hotel_name = Some(value),
            Some("hotelRating") => hotel_rating = Some(value),
            Some("hotelCity") => hotel_city = Some(value),
            Some("hotelPrice") => hotel_price = Some(value),
            Some("userId") => user_id = Some(value),
            Some("idToken") => id_token = Some(value),
            _ => {}
        }
    }

    let (file_name, file_bytes) = file.ok_or_else(|| {
        ApiError::BadRequest("Request must include exactly one file part.".to_string())
    })?;

    Ok(AddHotelForm {
        hotel_name: required(hotel_name, "hotelName")?,
        hotel_rating: required(hotel_rating, "hotelRating")?,
        hotel_city: required(hotel_city, "hotelCity")?,
        hotel_price: required(hotel_price, "hotelPrice")?,
        user_id: required(user_id, "userId")?,
        id_token: required(id_token, "idToken")?,
        file_name,
        file_bytes,
    })
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("Missing form field '{}'.", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "------------------------boundary42";

    fn content_type() -> String {
        format!("multipart/form-data; boundary={}", BOUNDARY)
    }

    fn body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Bytes {
        let mut out = Vec::new();
        for (name, value) in fields {
            out.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, data)) = file {
            out.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            out.extend_from_slice(data);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Bytes::from(out)
    }

    fn all_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("hotelName", "Grand Hotel"),
            ("hotelRating", "5"),
            ("hotelCity", "Paris"),
            ("hotelPrice", "200"),
            ("userId", "u1"),
            ("idToken", "token"),
        ]
    }

    #[tokio::test]
    async fn test_parse_complete_form() {
        let form = parse_add_hotel_form(
            &content_type(),
            body(&all_fields(), Some(("photo.jpg", b"jpegdata"))),
        )
        .await
        .unwrap();

        assert_eq!(form.hotel_name, "Grand Hotel");
        assert_eq!(form.hotel_rating, "5");
        assert_eq!(form.hotel_city, "Paris");
        assert_eq!(form.hotel_price, "200");
        assert_eq!(form.user_id, "u1");
        assert_eq!(form.id_token, "token");
        assert_eq!(form.file_name, "photo.jpg");
        assert_eq!(&form.file_bytes[..], b"jpegdata");
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let fields: Vec<_> = all_fields()
            .into_iter()
            .filter(|(name, _)| *name != "hotelCity")
            .collect();
        let result =
            parse_add_hotel_form(&content_type(), body(&fields, Some(("photo.jpg", b"x")))).await;
        match result {
            Err(ApiError::BadRequest(msg)) => assert!(msg.contains("hotelCity")),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_part_is_bad_request() {
        let result = parse_add_hotel_form(&content_type(), body(&all_fields(), None)).await;
        match result {
            Err(ApiError::BadRequest(msg)) => assert!(msg.contains("file part")),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_garbage_body_is_bad_request() {
        let result =
            parse_add_hotel_form(&content_type(), Bytes::from_static(b"definitely not multipart"))
                .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_non_multipart_content_type_is_bad_request() {
        let result = parse_add_hotel_form("application/json", Bytes::new()).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}

// src/api/handlers/tools.rs
use actix_web::{http::header, HttpRequest, HttpResponse, Responder};

use crate::api::types::FingerprintResponse;
use crate::privacy::fingerprint::parse_user_agent;

/// Inspect the caller's browser fingerprint
///
/// Parses the request's `User-Agent` header into browser, OS and device type.
#[utoipa::path(
    get,
    path = "/tools/fingerprint",
    tag = "Tools",
    responses(
        (status = 200, description = "Parsed User-Agent", body = FingerprintResponse),
        (status = 400, description = "Missing or non-ASCII User-Agent header", body = FingerprintResponse)
    )
)]
pub async fn fingerprint(req: HttpRequest) -> impl Responder {
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|ua| !ua.is_empty());

    match user_agent {
        Some(ua) => HttpResponse::Ok().json(FingerprintResponse {
            success: true,
            details: Some(parse_user_agent(ua)),
            error: None,
        }),
        None => HttpResponse::BadRequest().json(FingerprintResponse {
            success: false,
            details: None,
            error: Some("Request carries no readable User-Agent header".to_string()),
        }),
    }
}

// src/api/handlers/generator.rs

use actix_web::{web, HttpResponse, Responder};
use log::{debug, warn};

use crate::api::types::{
    PasswordAnalysisRequest, PasswordAnalysisResponse, PasswordGenerationRequest,
    PasswordGenerationResponse,
};
use crate::core::Config;
use crate::generators::PasswordGenerator;
use crate::models::PasswordGenerationOptions;

/// Generate a secure password
///
/// Generates a random password from the selected character classes. Unset
/// options fall back to the defaults; with no class selected, lowercase
/// letters and digits are used.
#[utoipa::path(
    post,
    path = "/generator/password",
    tag = "Generator",
    request_body = PasswordGenerationRequest,
    responses(
        (status = 200, description = "Generated password", body = PasswordGenerationResponse),
        (status = 400, description = "Length out of range", body = PasswordGenerationResponse)
    )
)]
pub async fn generate_password(
    config: web::Data<Config>,
    generation_req: web::Json<PasswordGenerationRequest>,
) -> impl Responder {
    // Create options with defaults or provided values
    let options = PasswordGenerationOptions {
        length: generation_req.length.unwrap_or(config.default_password_length),
        include_uppercase: generation_req.include_uppercase.unwrap_or(true),
        include_lowercase: generation_req.include_lowercase.unwrap_or(true),
        include_numbers: generation_req.include_numbers.unwrap_or(true),
        include_symbols: generation_req.include_symbols.unwrap_or(true),
        exclude_similar: generation_req.exclude_similar.unwrap_or(false),
    };

    if !options.any_class_selected() {
        debug!("No character class selected, using lowercase and digits");
    }

    let generator = PasswordGenerator::new();

    let password = match generator.generate_password(&options) {
        Ok(pwd) => pwd,
        Err(e) => {
            warn!("Rejected password generation: {}", e);
            return HttpResponse::BadRequest().json(PasswordGenerationResponse {
                success: false,
                password: None,
                strength: None,
                error: Some(e.to_string()),
            });
        }
    };

    let strength = generator.analyze_password_strength(&password);

    HttpResponse::Ok().json(PasswordGenerationResponse {
        success: true,
        password: Some(password),
        strength: Some(strength),
        error: None,
    })
}

/// Analyze password strength
///
/// Scores the password from 0 to 8 and lists what would improve it.
#[utoipa::path(
    post,
    path = "/generator/analysis",
    tag = "Generator",
    request_body = PasswordAnalysisRequest,
    responses(
        (status = 200, description = "Password analysis result", body = PasswordAnalysisResponse)
    )
)]
pub async fn analyze_password(req: web::Json<PasswordAnalysisRequest>) -> impl Responder {
    let strength = PasswordGenerator::new().analyze_password_strength(&req.password);

    debug!("Analyzed password: score {} ({})", strength.score, strength.tier);

    HttpResponse::Ok().json(PasswordAnalysisResponse {
        success: true,
        strength: Some(strength),
        error: None,
    })
}

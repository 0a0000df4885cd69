// src/api/mod.rs
use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use crate::core::Config;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use utoipa_redoc::{Redoc, Servable};

// This will hold our API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Crypto endpoints
        crate::api::handlers::crypto::list_algorithms,
        crate::api::handlers::crypto::encrypt,
        crate::api::handlers::crypto::decrypt,
        crate::api::handlers::crypto::hash,
        crate::api::handlers::crypto::hash_file,

        // Generator endpoints
        crate::api::handlers::generator::generate_password,
        crate::api::handlers::generator::analyze_password,

        // Tools
        crate::api::handlers::tools::fingerprint
    ),
    components(
        schemas(
            // Crypto
            crate::api::types::CipherRequest,
            crate::api::types::HashRequest,
            crate::api::types::CryptoResponse,
            crate::api::types::FileHashForm,
            crate::api::types::FileHashResponse,
            crate::api::types::AlgorithmListResponse,
            crate::crypto::CipherAlgorithm,
            crate::crypto::DigestAlgorithm,

            // Generator
            crate::api::types::PasswordGenerationRequest,
            crate::api::types::PasswordGenerationResponse,
            crate::api::types::PasswordAnalysisRequest,
            crate::api::types::PasswordAnalysisResponse,
            crate::strength::StrengthAssessment,
            crate::strength::StrengthTier,

            // Tools
            crate::api::types::FingerprintResponse,
            crate::models::UserAgentDetails
        )
    ),
    tags(
        (name = "Crypto", description = "Text encryption, decryption and hashing"),
        (name = "Generator", description = "Password generation and strength analysis"),
        (name = "Tools", description = "Browser fingerprint inspection")
    ),
    info(
        title = "CyberKit API",
        version = "0.1.0",
        description = "Client-side security utilities: ciphers, digests, password tools",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub async fn start_server(config: Config) -> std::io::Result<()> {
    let bind = config.bind_address();
    log::info!("Starting CyberKit API server on {}:{}", bind.0, bind.1);

    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        // Configure CORS
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                "Content-Type",
                "Accept",
                "X-Requested-With",
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(config_data.clone())
            // Add Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            // Add Redoc
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .configure(routes::configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}

pub mod types;
pub mod routes;
pub mod handlers;

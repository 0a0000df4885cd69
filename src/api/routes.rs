// src/api/routes.rs
use super::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Encryption, decryption and hashing
    cfg.service(
        web::scope("/crypto")
            .route("/algorithms", web::get().to(handlers::crypto::list_algorithms))
            .route("/encrypt", web::post().to(handlers::crypto::encrypt))
            .route("/decrypt", web::post().to(handlers::crypto::decrypt))
            .route("/hash", web::post().to(handlers::crypto::hash))
            .route("/hash-file", web::post().to(handlers::crypto::hash_file))
    );

    // Password generator
    cfg.service(
        web::scope("/generator")
            .route("/password", web::post().to(handlers::generator::generate_password))
            .route("/analysis", web::post().to(handlers::generator::analyze_password))
    );

    // Privacy tools
    cfg.service(
        web::scope("/tools")
            .route("/fingerprint", web::get().to(handlers::tools::fingerprint))
    );
}

// src/api/handlers/crypto.rs

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures::{StreamExt, TryStreamExt};
use log::{debug, error, warn};

use crate::api::types::{
    AlgorithmListResponse, CipherRequest, CryptoResponse, FileHashResponse, HashRequest,
};
use crate::core::Config;
use crate::crypto::{
    self, algorithm_or, CipherAlgorithm, CryptoError, CryptoRequest, DigestAlgorithm, Operation,
};

fn failure(err: CryptoError) -> HttpResponse {
    if let CryptoError::PrimitiveFailure(_) = err {
        error!("Crypto request failed: {}", err);
    } else {
        warn!("Rejected crypto request: {}", err);
    }
    HttpResponse::BadRequest().json(CryptoResponse::failed(err.to_string()))
}

fn run_cipher(config: &Config, operation: Operation, req: CipherRequest) -> HttpResponse {
    let algorithm = match algorithm_or(req.algorithm.as_deref(), config.default_cipher) {
        Ok(algorithm) => algorithm,
        Err(e) => return failure(e),
    };

    debug!("{} request: {} ({} bytes)", operation, algorithm, req.text.len());

    let request = CryptoRequest::new(operation, algorithm, req.text, req.key);
    match crypto::process(&request) {
        Ok(output) => HttpResponse::Ok().json(CryptoResponse::ok(algorithm.name(), output)),
        Err(e) => failure(e),
    }
}

/// List supported algorithms
///
/// Names accepted by each mode, and the defaults used when a request names none.
#[utoipa::path(
    get,
    path = "/crypto/algorithms",
    tag = "Crypto",
    responses(
        (status = 200, description = "Supported algorithms", body = AlgorithmListResponse)
    )
)]
pub async fn list_algorithms(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(AlgorithmListResponse {
        success: true,
        ciphers: CipherAlgorithm::ALL.iter().map(|c| c.name().to_string()).collect(),
        digests: DigestAlgorithm::ALL.iter().map(|d| d.name().to_string()).collect(),
        file_digests: DigestAlgorithm::ALL
            .iter()
            .filter(|d| d.supports_bytes())
            .map(|d| d.name().to_string())
            .collect(),
        default_cipher: config.default_cipher.name().to_string(),
        default_digest: config.default_digest.name().to_string(),
    })
}

/// Encrypt text
///
/// Keyed ciphers return a base64 `Salted__` envelope; Base64 just encodes.
#[utoipa::path(
    post,
    path = "/crypto/encrypt",
    tag = "Crypto",
    request_body = CipherRequest,
    responses(
        (status = 200, description = "Ciphertext", body = CryptoResponse),
        (status = 400, description = "Unknown algorithm or missing key", body = CryptoResponse)
    )
)]
pub async fn encrypt(config: web::Data<Config>, req: web::Json<CipherRequest>) -> impl Responder {
    run_cipher(&config, Operation::Encrypt, req.into_inner())
}

/// Decrypt text
///
/// Reverses `/crypto/encrypt` given the same algorithm and key.
#[utoipa::path(
    post,
    path = "/crypto/decrypt",
    tag = "Crypto",
    request_body = CipherRequest,
    responses(
        (status = 200, description = "Plaintext", body = CryptoResponse),
        (status = 400, description = "Unknown algorithm, missing key, wrong key or malformed input", body = CryptoResponse)
    )
)]
pub async fn decrypt(config: web::Data<Config>, req: web::Json<CipherRequest>) -> impl Responder {
    run_cipher(&config, Operation::Decrypt, req.into_inner())
}

/// Hash text
///
/// Returns the lower-case hex digest of the UTF-8 text.
#[utoipa::path(
    post,
    path = "/crypto/hash",
    tag = "Crypto",
    request_body = HashRequest,
    responses(
        (status = 200, description = "Hex digest", body = CryptoResponse),
        (status = 400, description = "Unknown algorithm", body = CryptoResponse)
    )
)]
pub async fn hash(config: web::Data<Config>, req: web::Json<HashRequest>) -> impl Responder {
    let req = req.into_inner();
    let digest = match algorithm_or(req.algorithm.as_deref(), config.default_digest) {
        Ok(digest) => digest,
        Err(e) => return failure(e),
    };

    let request = CryptoRequest::new(Operation::Hash, digest, req.text, None);
    match crypto::process(&request) {
        Ok(output) => HttpResponse::Ok().json(CryptoResponse::ok(digest.name(), output)),
        Err(e) => failure(e),
    }
}

fn upload_failure(err: actix_multipart::MultipartError) -> CryptoError {
    CryptoError::ReadFailure(std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))
}

// Text parts carry an algorithm name or a hex digest; SHA-512 hex is 128 chars.
const MAX_TEXT_FIELD_BYTES: usize = 1024;

// Collect a small text field of a multipart form. `None` when it exceeds MAX_TEXT_FIELD_BYTES.
async fn read_text_field(
    field: &mut actix_multipart::Field,
) -> Result<Option<String>, actix_multipart::MultipartError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if data.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Ok(None);
        }
        data.extend_from_slice(&chunk);
    }
    Ok(Some(String::from_utf8_lossy(&data).trim().to_string()))
}

/// Hash an uploaded file
///
/// Hashes the `file` part of the form and, when `compare` is given, checks the
/// result against it (case-insensitive).
#[utoipa::path(
    post,
    path = "/crypto/hash-file",
    tag = "Crypto",
    request_body(
        content = FileHashForm,
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "File digest", body = FileHashResponse),
        (status = 400, description = "Missing file, unreadable upload or unknown algorithm", body = FileHashResponse),
        (status = 413, description = "File larger than the configured limit, or an oversized text field", body = FileHashResponse)
    )
)]
pub async fn hash_file(config: web::Data<Config>, mut payload: Multipart) -> impl Responder {
    let mut contents: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut algorithm: Option<String> = None;
    let mut compare: Option<String> = None;

    // Process the multipart form
    while let Some(field) = payload.next().await {
        let mut field = match field {
            Ok(field) => field,
            Err(e) => {
                let err = upload_failure(e);
                warn!("Rejected file upload: {}", err);
                return HttpResponse::BadRequest().json(FileHashResponse::failed(err.to_string()));
            }
        };

        let field_name = match field.content_disposition().get_name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match field_name.as_str() {
            "file" => {
                file_name = field.content_disposition().get_filename().map(str::to_string);
                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = match chunk {
                        Ok(chunk) => chunk,
                        Err(e) => {
                            let err = upload_failure(e);
                            warn!("Failed to read file chunk: {}", err);
                            return HttpResponse::BadRequest().json(FileHashResponse::failed(err.to_string()));
                        }
                    };
                    if data.len() + chunk.len() > config.max_upload_bytes {
                        warn!("Upload exceeds {} bytes", config.max_upload_bytes);
                        return HttpResponse::PayloadTooLarge().json(FileHashResponse::failed(format!(
                            "File exceeds the {} byte upload limit",
                            config.max_upload_bytes
                        )));
                    }
                    data.extend_from_slice(&chunk);
                }
                contents = Some(data);
            }
            "algorithm" | "compare" => {
                let value = match read_text_field(&mut field).await {
                    Ok(Some(value)) => value,
                    Ok(None) => {
                        warn!("Form field '{}' exceeds {} bytes", field_name, MAX_TEXT_FIELD_BYTES);
                        return HttpResponse::PayloadTooLarge().json(FileHashResponse::failed(format!(
                            "Form field '{}' exceeds the {} byte limit",
                            field_name, MAX_TEXT_FIELD_BYTES
                        )));
                    }
                    Err(e) => {
                        return HttpResponse::BadRequest()
                            .json(FileHashResponse::failed(format!("Failed to read form field: {}", e)));
                    }
                };
                if field_name == "algorithm" {
                    algorithm = Some(value);
                } else {
                    compare = Some(value);
                }
            }
            _ => {
                // Drain unknown fields so the stream can advance
                while let Ok(Some(_)) = field.try_next().await {}
            }
        }
    }

    let contents = match contents {
        Some(contents) => contents,
        None => {
            return HttpResponse::BadRequest()
                .json(FileHashResponse::failed("No file was uploaded".to_string()));
        }
    };

    let digest = match algorithm_or(algorithm.as_deref(), config.default_digest) {
        Ok(digest) => digest,
        Err(e) => {
            warn!("Rejected file hash request: {}", e);
            return HttpResponse::BadRequest().json(FileHashResponse::failed(e.to_string()));
        }
    };

    let hash = match crypto::hash_bytes(&contents, digest) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Rejected file hash request: {}", e);
            return HttpResponse::BadRequest().json(FileHashResponse::failed(e.to_string()));
        }
    };

    debug!("Hashed {} byte upload with {}", contents.len(), digest);

    let matches = compare
        .filter(|expected| !expected.is_empty())
        .map(|expected| crypto::digests_match(&expected, &hash));

    HttpResponse::Ok().json(FileHashResponse {
        success: true,
        algorithm: Some(digest.name().to_string()),
        file_name,
        file_size: Some(contents.len() as u64),
        hash: Some(hash),
        matches,
        error: None,
    })
}

// src/cli/handlers.rs
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use inquire::Password;
use serde_json::json;

use crate::api;
use crate::cli::CliCommand;
use crate::core::Config;
use crate::crypto::{
    self, algorithm_or, CipherAlgorithm, CryptoRequest, DigestAlgorithm, Operation,
};
use crate::generators::PasswordGenerator;
use crate::models::PasswordGenerationOptions;
use crate::privacy::fingerprint::parse_user_agent;
use crate::strength::{StrengthAssessment, StrengthTier};

// Dispatch a parsed subcommand
pub async fn run(command: CliCommand, config: Config, json: bool) -> Result<()> {
    match command {
        CliCommand::Encrypt { text, algorithm, key } => {
            handle_cipher(&config, Operation::Encrypt, &text, algorithm.as_deref(), key, json)
        }
        CliCommand::Decrypt { text, algorithm, key } => {
            handle_cipher(&config, Operation::Decrypt, &text, algorithm.as_deref(), key, json)
        }
        CliCommand::Hash { text, algorithm } => handle_hash(&config, &text, algorithm.as_deref(), json),
        CliCommand::HashFile { path, algorithm, compare } => {
            handle_hash_file(&config, &path, algorithm.as_deref(), compare.as_deref(), json).await
        }
        CliCommand::Strength { password } => handle_strength(password, json),
        CliCommand::Generate {
            length,
            count,
            no_uppercase,
            no_lowercase,
            no_numbers,
            no_symbols,
            exclude_similar,
        } => {
            let options = PasswordGenerationOptions {
                length: length.unwrap_or(config.default_password_length),
                include_uppercase: !no_uppercase,
                include_lowercase: !no_lowercase,
                include_numbers: !no_numbers,
                include_symbols: !no_symbols,
                exclude_similar,
            };
            handle_generate(&options, count, json)
        }
        CliCommand::Fingerprint { user_agent } => handle_fingerprint(&user_agent, json),
        CliCommand::Algorithms => handle_algorithms(&config, json),
        CliCommand::Serve { port } => handle_serve(config, port).await,
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// Keyed ciphers need a passphrase; ask for one when none was given.
fn key_for(cipher: CipherAlgorithm, operation: Operation, key: Option<String>) -> Result<Option<String>> {
    let key = key.filter(|k| !k.is_empty());
    if key.is_some() || !cipher.requires_key() {
        return Ok(key);
    }

    let message = format!("🔑 Passphrase for {}:", cipher);
    let prompt = Password::new(&message)
        .with_display_mode(inquire::PasswordDisplayMode::Hidden);
    let prompt = if operation == Operation::Encrypt {
        prompt.with_custom_confirmation_message("🔁 Confirm passphrase:")
    } else {
        prompt.without_confirmation()
    };

    Ok(Some(prompt.prompt()?))
}

pub fn handle_cipher(
    config: &Config,
    operation: Operation,
    text: &str,
    algorithm: Option<&str>,
    key: Option<String>,
    json: bool,
) -> Result<()> {
    let cipher = algorithm_or(algorithm, config.default_cipher)?;
    let key = key_for(cipher, operation, key)?;

    let request = CryptoRequest::new(operation, cipher, text, key);
    let output = crypto::process(&request).with_context(|| format!("Failed to {} with {}", operation, cipher))?;

    if json {
        print_json(&json!({ "algorithm": cipher.name(), "output": output }))
    } else {
        println!("{}", output);
        Ok(())
    }
}

pub fn handle_hash(config: &Config, text: &str, algorithm: Option<&str>, json: bool) -> Result<()> {
    let digest = algorithm_or(algorithm, config.default_digest)?;
    let output = crypto::process(&CryptoRequest::new(Operation::Hash, digest, text, None))?;

    if json {
        print_json(&json!({ "algorithm": digest.name(), "hash": output }))
    } else {
        if digest.is_legacy() {
            eprintln!("{}", style(format!("⚠️  {} is not collision resistant", digest)).yellow());
        }
        println!("{}", output);
        Ok(())
    }
}

pub async fn handle_hash_file(
    config: &Config,
    path: &Path,
    algorithm: Option<&str>,
    compare: Option<&str>,
    json: bool,
) -> Result<()> {
    let digest = algorithm_or(algorithm, config.default_digest)?;
    let hash = crypto::hash_file(path, digest)
        .await
        .with_context(|| format!("Failed to hash {}", path.display()))?;

    let matches = compare
        .filter(|expected| !expected.trim().is_empty())
        .map(|expected| crypto::digests_match(expected, &hash));

    if json {
        return print_json(&json!({
            "file": path.display().to_string(),
            "algorithm": digest.name(),
            "hash": hash,
            "matches": matches,
        }));
    }

    println!("{}  {}", hash, path.display());
    match matches {
        Some(true) => println!("{}", style("✅ Hash matches").green()),
        Some(false) => println!("{}", style("❌ Hash does NOT match").red()),
        None => {}
    }
    Ok(())
}

fn styled_tier(tier: StrengthTier) -> console::StyledObject<&'static str> {
    let label = tier.label();
    match tier {
        StrengthTier::Weak => style(label).red(),
        StrengthTier::Fair => style(label).yellow(),
        StrengthTier::Good => style(label).cyan(),
        StrengthTier::Strong => style(label).green(),
    }
}

fn print_assessment(assessment: &StrengthAssessment) {
    println!(
        "Strength: {} ({}/{})",
        styled_tier(assessment.tier).bold(),
        assessment.score,
        crate::strength::MAX_SCORE
    );
    println!("Estimated crack time: {}", assessment.crack_time);
    for tip in &assessment.feedback {
        println!("  • {}", tip);
    }
}

pub fn handle_strength(password: Option<String>, json: bool) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => Password::new("🔐 Password to check:")
            .with_display_mode(inquire::PasswordDisplayMode::Hidden)
            .without_confirmation()
            .prompt()?,
    };

    let assessment = PasswordGenerator::new().analyze_password_strength(&password);

    if json {
        print_json(&serde_json::to_value(&assessment)?)
    } else {
        print_assessment(&assessment);
        Ok(())
    }
}

pub fn handle_generate(options: &PasswordGenerationOptions, count: usize, json: bool) -> Result<()> {
    let generator = PasswordGenerator::new();
    let passwords = (0..count.max(1))
        .map(|_| generator.generate_password(options))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if json {
        let entries: Vec<_> = passwords
            .iter()
            .map(|p| json!({ "password": p, "strength": generator.analyze_password_strength(p) }))
            .collect();
        return print_json(&json!(entries));
    }

    for password in &passwords {
        let assessment = generator.analyze_password_strength(password);
        println!("{}  {}", password, styled_tier(assessment.tier));
    }
    Ok(())
}

pub fn handle_fingerprint(user_agent: &str, json: bool) -> Result<()> {
    let details = parse_user_agent(user_agent);

    if json {
        print_json(&serde_json::to_value(&details)?)
    } else {
        println!("Browser: {}", style(&details.browser).bold());
        println!("OS:      {}", style(&details.os).bold());
        println!("Device:  {}", style(&details.device).bold());
        Ok(())
    }
}

pub fn handle_algorithms(config: &Config, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "ciphers": CipherAlgorithm::ALL.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "digests": DigestAlgorithm::ALL.iter().map(|d| d.name()).collect::<Vec<_>>(),
            "default_cipher": config.default_cipher.name(),
            "default_digest": config.default_digest.name(),
        }));
    }

    println!("{}", style("Ciphers").bold());
    for cipher in CipherAlgorithm::ALL {
        let mut notes = Vec::new();
        if cipher == config.default_cipher {
            notes.push("default");
        }
        if !cipher.requires_key() {
            notes.push("no key");
        }
        if notes.is_empty() {
            println!("  {}", cipher);
        } else {
            println!("  {} ({})", cipher, notes.join(", "));
        }
    }

    println!("{}", style("Digests").bold());
    for digest in DigestAlgorithm::ALL {
        let mut notes = Vec::new();
        if digest == config.default_digest {
            notes.push("default");
        }
        if digest.is_legacy() {
            notes.push("legacy");
        }
        if !digest.supports_bytes() {
            notes.push("text only");
        }
        if notes.is_empty() {
            println!("  {}", digest);
        } else {
            println!("  {} ({})", digest, notes.join(", "));
        }
    }
    Ok(())
}

pub async fn handle_serve(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.web_port = port;
    }
    println!("🚀 API server starting on http://{}:{}", config.web_address, config.web_port);
    println!("📖 Docs at /swagger-ui/ and /redoc");
    api::start_server(config).await.context("API server failed")
}

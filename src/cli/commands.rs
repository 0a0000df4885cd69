// src/cli/commands.rs
use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Encrypt text
    Encrypt {
        /// Text to encrypt
        #[arg(required = true)]
        text: String,

        /// Cipher (AES, DES, TripleDES, Rabbit, RC4, RC4Drop, Base64)
        #[arg(long, short)]
        algorithm: Option<String>,

        /// Passphrase; prompted for when a keyed cipher is used without one
        #[arg(long, short, env = "CYBERKIT_KEY", hide_env_values = true)]
        key: Option<String>,
    },

    /// Decrypt text produced by `encrypt`
    Decrypt {
        /// Ciphertext to decrypt
        #[arg(required = true)]
        text: String,

        /// Cipher the text was encrypted with
        #[arg(long, short)]
        algorithm: Option<String>,

        /// Passphrase; prompted for when a keyed cipher is used without one
        #[arg(long, short, env = "CYBERKIT_KEY", hide_env_values = true)]
        key: Option<String>,
    },

    /// Hash text
    Hash {
        /// Text to hash
        #[arg(required = true)]
        text: String,

        /// Digest (MD5, SHA1, SHA256, SHA512, SHA3)
        #[arg(long, short)]
        algorithm: Option<String>,
    },

    /// Hash a file, optionally checking it against a known digest
    HashFile {
        /// File to hash
        #[arg(required = true)]
        path: PathBuf,

        /// Digest (MD5, SHA1, SHA256, SHA512)
        #[arg(long, short)]
        algorithm: Option<String>,

        /// Expected digest to compare against
        #[arg(long, short)]
        compare: Option<String>,
    },

    /// Rate a password's strength
    Strength {
        /// Password to rate; prompted for (hidden) when omitted
        password: Option<String>,
    },

    /// Generate random passwords
    Generate {
        /// Password length
        #[arg(long, short)]
        length: Option<usize>,

        /// How many passwords to generate
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,

        /// Leave out uppercase letters
        #[arg(long)]
        no_uppercase: bool,

        /// Leave out lowercase letters
        #[arg(long)]
        no_lowercase: bool,

        /// Leave out numbers
        #[arg(long)]
        no_numbers: bool,

        /// Leave out symbols
        #[arg(long)]
        no_symbols: bool,

        /// Leave out look-alike characters (i, l, 1, L, o, 0, O)
        #[arg(long)]
        exclude_similar: bool,
    },

    /// Show what a User-Agent string reveals
    Fingerprint {
        /// User-Agent header value
        #[arg(required = true)]
        user_agent: String,
    },

    /// List supported algorithms
    Algorithms,

    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides WEB_PORT)
        #[arg(long, short)]
        port: Option<u16>,
    },
}

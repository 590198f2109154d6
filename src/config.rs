// src/config.rs

use std::env;

use dotenvy::dotenv;
use url::Url;

use crate::analytics::stagnation::StagnationFormula;

/// Number of questions requested from the model per generated quiz.
pub const GENERATED_QUESTION_COUNT: usize = 10;
/// Every quiz question carries exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;
/// XP awarded per correct answer when an attempt is saved.
pub const XP_PER_CORRECT_ANSWER: i32 = 10;
/// XP needed to advance one level.
pub const XP_PER_LEVEL: i64 = 200;
/// Difficulty used when the caller does not pick one.
pub const DEFAULT_DIFFICULTY: &str = "medium";

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai";
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_GROQ_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_SYLLABUS_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When unset the service keeps attempts in memory.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub port: u16,
    pub groq: GroqConfig,
    pub stagnation_formula: StagnationFormula,
    /// Upper bound on request bodies, which caps uploaded syllabus size.
    pub max_syllabus_bytes: usize,
}

/// Settings for the external text-generation service.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    /// No timeout is applied unless this is set.
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);

        let api_key = env::var("GROQ_API_KEY").expect("GROQ_API_KEY must be set");

        let base_url =
            env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string());
        if Url::parse(&base_url).is_err() {
            panic!("GROQ_BASE_URL is not a valid URL: {}", base_url);
        }

        let model = env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string());

        let temperature = env::var("GROQ_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_GROQ_TEMPERATURE);

        let timeout_secs = env::var("GROQ_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok());

        let stagnation_formula = match env::var("STAGNATION_FORMULA") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|e| panic!("STAGNATION_FORMULA: {}", e)),
            Err(_) => StagnationFormula::default(),
        };

        let max_syllabus_bytes = env::var("MAX_SYLLABUS_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_SYLLABUS_BYTES);

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            port,
            groq: GroqConfig {
                api_key,
                base_url,
                model,
                temperature,
                timeout_secs,
            },
            stagnation_formula,
            max_syllabus_bytes,
        }
    }
}

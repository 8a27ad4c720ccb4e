use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use url::Url;

/// Default ceiling for uploaded audio files (100 MiB)
pub const DEFAULT_MAX_FILE_SIZE: i64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub kafka: KafkaConfig,
    pub jwt: JwtConfig,
    pub storage: ObjectStorageConfig,
    pub upload: UploadConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub slow_request_ms: u64,
}

// Reported at startup only; nothing in this service talks to MySQL yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_open_conns: u32,
    pub max_idle_conns: u32,
    pub conn_lifetime_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    pub database: u32,
    pub pool_size: u32,
    pub min_idle_conns: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaConfig {
    pub brokers: Vec<String>,
    pub topic: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret_key: String,
    pub expire_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageConfig {
    /// minio, s3, oss
    pub provider: String,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
    pub use_ssl: bool,
    pub expire_hours: u64,
    /// Probe the backend (list buckets) before accepting traffic
    pub verify_on_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_file_size: i64,
    pub allowed_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub require_auth: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        override_string("SERVER_HOST", &mut self.server.host);
        // PORT is what most container platforms inject
        override_parsed("PORT", &mut self.server.port);
        override_parsed("SERVER_PORT", &mut self.server.port);
        override_parsed("SERVER_REQUEST_TIMEOUT_SECS", &mut self.server.request_timeout_secs);
        override_parsed("SERVER_SLOW_REQUEST_MS", &mut self.server.slow_request_ms);

        // Database overrides
        override_string("DB_HOST", &mut self.database.host);
        override_parsed("DB_PORT", &mut self.database.port);
        override_string("DB_USERNAME", &mut self.database.username);
        override_string("DB_PASSWORD", &mut self.database.password);
        override_string("DB_DATABASE", &mut self.database.database);
        override_parsed("DB_MAX_OPEN_CONNS", &mut self.database.max_open_conns);
        override_parsed("DB_MAX_IDLE_CONNS", &mut self.database.max_idle_conns);
        override_parsed("DB_CONN_LIFETIME_SECS", &mut self.database.conn_lifetime_secs);

        // Redis overrides
        override_string("REDIS_HOST", &mut self.redis.host);
        override_parsed("REDIS_PORT", &mut self.redis.port);
        override_string("REDIS_PASSWORD", &mut self.redis.password);
        override_parsed("REDIS_DATABASE", &mut self.redis.database);
        override_parsed("REDIS_POOL_SIZE", &mut self.redis.pool_size);
        override_parsed("REDIS_MIN_IDLE_CONNS", &mut self.redis.min_idle_conns);

        // Kafka overrides
        override_list("KAFKA_BROKERS", &mut self.kafka.brokers);
        override_string("KAFKA_TOPIC", &mut self.kafka.topic);
        override_string("KAFKA_GROUP_ID", &mut self.kafka.group_id);

        // JWT overrides
        override_string("JWT_SECRET_KEY", &mut self.jwt.secret_key);
        override_parsed("JWT_EXPIRE_HOURS", &mut self.jwt.expire_hours);

        // Object storage overrides
        override_string("STORAGE_PROVIDER", &mut self.storage.provider);
        override_string("STORAGE_ENDPOINT", &mut self.storage.endpoint);
        override_string("STORAGE_ACCESS_KEY", &mut self.storage.access_key);
        override_string("STORAGE_SECRET_KEY", &mut self.storage.secret_key);
        override_string("STORAGE_BUCKET", &mut self.storage.bucket);
        override_string("STORAGE_REGION", &mut self.storage.region);
        override_parsed("STORAGE_USE_SSL", &mut self.storage.use_ssl);
        override_parsed("STORAGE_EXPIRE_HOURS", &mut self.storage.expire_hours);
        override_parsed("STORAGE_VERIFY_ON_START", &mut self.storage.verify_on_start);

        // Upload overrides
        override_parsed("UPLOAD_MAX_FILE_SIZE", &mut self.upload.max_file_size);
        override_list("UPLOAD_ALLOWED_TYPES", &mut self.upload.allowed_types);

        // Security overrides
        override_parsed("SECURITY_REQUIRE_AUTH", &mut self.security.require_auth);
        override_list("SECURITY_CORS_ORIGINS", &mut self.security.cors_origins);

        // Logging overrides
        match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => self.logging.format = LogFormat::Json,
            Ok("pretty") | Ok("text") => self.logging.format = LogFormat::Pretty,
            _ => {}
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                request_timeout_secs: 30,
                slow_request_ms: 1000,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 3306,
                username: "root".to_string(),
                password: String::new(),
                database: "pest_detection".to_string(),
                max_open_conns: 100,
                max_idle_conns: 10,
                conn_lifetime_secs: 3600,
            },
            redis: RedisConfig {
                host: "localhost".to_string(),
                port: 6379,
                password: String::new(),
                database: 0,
                pool_size: 10,
                min_idle_conns: 5,
            },
            kafka: KafkaConfig {
                brokers: vec!["localhost:9092".to_string()],
                topic: "audio_detection".to_string(),
                group_id: "detection_group".to_string(),
            },
            jwt: JwtConfig {
                secret_key: "your-secret-key-here".to_string(),
                expire_hours: 24,
            },
            storage: ObjectStorageConfig {
                provider: "minio".to_string(),
                endpoint: "localhost:9000".to_string(),
                access_key: "minioadmin".to_string(),
                secret_key: "minioadmin".to_string(),
                bucket: "pest-detection".to_string(),
                region: "us-east-1".to_string(),
                use_ssl: false,
                expire_hours: 24,
                verify_on_start: true,
            },
            upload: UploadConfig {
                max_file_size: DEFAULT_MAX_FILE_SIZE,
                allowed_types: ["wav", "mp3", "flac", "m4a", "aac"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            security: SecurityConfig {
                require_auth: false,
                cors_origins: vec!["*".to_string()],
            },
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        }
    }

    pub fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.server.slow_request_ms = 500;
        config.logging.format = LogFormat::Json;
        config
    }

    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.server.request_timeout_secs = 15;
        config.storage.use_ssl = true;
        config.security.require_auth = true;
        config.logging.format = LogFormat::Json;
        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// MySQL DSN in the go-sql-driver format used by the ingestion services
    pub fn dsn(&self) -> String {
        format!(
            "{}:{}@tcp({}:{})/{}?charset=utf8mb4&parseTime=True&loc=Local",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

impl RedisConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl KafkaConfig {
    pub fn brokers_string(&self) -> String {
        self.brokers.join(",")
    }
}

impl ObjectStorageConfig {
    /// Endpoint as a full URL. Bare `host:port` endpoints get a scheme from `use_ssl`.
    pub fn endpoint_url(&self) -> Result<Url, url::ParseError> {
        let endpoint = self.endpoint.trim();
        if endpoint.contains("://") {
            Url::parse(endpoint)
        } else {
            let scheme = if self.use_ssl { "https" } else { "http" };
            Url::parse(&format!("{}://{}", scheme, endpoint))
        }
    }
}

fn override_string(key: &str, target: &mut String) {
    if let Ok(v) = env::var(key) {
        if !v.is_empty() {
            *target = v;
        }
    }
}

fn override_parsed<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(v) = env::var(key) {
        if let Ok(parsed) = v.trim().parse() {
            *target = parsed;
        }
    }
}

fn override_list(key: &str, target: &mut Vec<String>) {
    if let Ok(v) = env::var(key) {
        let items = split_list(&v);
        if !items.is_empty() {
            *target = items;
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

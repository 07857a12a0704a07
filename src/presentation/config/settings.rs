use config::{Config, ConfigError, File, Map};
use config::Environment as EnvironmentSource;
use serde::Deserialize;

use super::Environment;

const DEFAULT_CONFIG_DIR: &str = "config";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub llm: LlmSettings,
    pub delivery: DeliverySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliverySettings {
    pub transport: DeliveryTransport,
    pub tcp: TcpDeliverySettings,
    pub ble: BleDeliverySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTransport {
    Tcp,
    Ble,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TcpDeliverySettings {
    pub host: String,
    pub port: u16,
    pub read_timeout_secs: f64,
    #[serde(default)]
    pub connect_timeout_secs: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BleDeliverySettings {
    pub device_address: String,
    pub characteristic_uuid: String,
    pub scan_timeout_secs: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_DIR, environment)
    }

    pub fn load_from(config_dir: &str, environment: Environment) -> Result<Self, ConfigError> {
        Self::load_with_vars(config_dir, environment, std::env::vars().collect())
    }

    /// Layers, lowest to highest: built-in defaults, `<dir>/appsettings.<env>`,
    /// `APP__SECTION__KEY` variables, then the legacy `GROQ_API_KEY`,
    /// `ELEVATOR_HOST` and `ELEVATOR_PORT` variables. Variables are read
    /// from `vars` instead of the process environment.
    pub fn load_with_vars(
        config_dir: &str,
        environment: Environment,
        vars: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let file_name = format!(
            "{}/appsettings.{}",
            config_dir.trim_end_matches('/'),
            environment.as_str()
        );
        let legacy = |key: &str| vars.get(key).cloned();
        let groq_key = legacy("GROQ_API_KEY");
        let elevator_host = legacy("ELEVATOR_HOST");
        let elevator_port = legacy("ELEVATOR_PORT");

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.allowed_origins", vec!["http://127.0.0.1:5500"])?
            .set_default("server.max_upload_mb", 25)?
            .set_default("transcription.api_key", "")?
            .set_default("transcription.base_url", "https://api.groq.com/openai/v1")?
            .set_default("transcription.model", "whisper-large-v3")?
            .set_default("transcription.language", "en")?
            .set_default("llm.api_key", "")?
            .set_default("llm.base_url", "https://api.groq.com/openai/v1")?
            .set_default("llm.chat_model", "llama-3.3-70b-versatile")?
            .set_default("llm.max_tokens", 10)?
            .set_default("llm.temperature", 0.0)?
            .set_default("llm.top_p", 1.0)?
            .set_default("delivery.transport", "tcp")?
            .set_default("delivery.tcp.host", "172.17.200.236")?
            .set_default("delivery.tcp.port", 9999)?
            .set_default("delivery.tcp.read_timeout_secs", 5.0)?
            .set_default("delivery.ble.device_address", "AA:BB:CC:DD:EE:FF")?
            .set_default(
                "delivery.ble.characteristic_uuid",
                "0000ffe1-0000-1000-8000-00805f9b34fb",
            )?
            .set_default("delivery.ble.scan_timeout_secs", 5.0)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            )
            .set_override_option("transcription.api_key", groq_key.clone())?
            .set_override_option("llm.api_key", groq_key)?
            .set_override_option("delivery.tcp.host", elevator_host)?
            .set_override_option("delivery.tcp.port", elevator_port)?
            .build()?
            .try_deserialize()
    }
}

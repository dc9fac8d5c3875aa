use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub erp: ErpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Собранный frontend (trunk dist)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    /// Корень публичных файлов: `/files/x.xlsx` -> `<public_dir>/files/x.xlsx`
    pub public_dir: String,
}

/// Подключение к ERP, которая хранит заказы и выполняет отчёты
#[derive(Debug, Deserialize, Clone)]
pub struct ErpConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ErpConfig {
    /// Значение заголовка Authorization (`token key:secret`), если ключи заданы
    pub fn auth_header(&self) -> Option<String> {
        if self.api_key.trim().is_empty() {
            return None;
        }
        Some(format!("token {}:{}", self.api_key, self.api_secret))
    }
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
static_dir = "dist"

[files]
public_dir = "target/site/public"

[erp]
base_url = "http://localhost:8000"
timeout_secs = 120
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.erp.base_url.trim().is_empty() {
        anyhow::bail!("[erp] base_url не задан");
    }
    Ok(config)
}

/// Загрузить конфигурацию один раз при старте
pub fn init() -> anyhow::Result<&'static Config> {
    let config = load_config()?;
    Ok(CONFIG.get_or_init(|| config))
}

/// Текущая конфигурация; до `init()` используется встроенная
pub fn get() -> &'static Config {
    CONFIG.get_or_init(|| {
        load_config().unwrap_or_else(|e| {
            tracing::error!("Failed to load config, using embedded defaults: {}", e);
            embedded_default()
        })
    })
}

fn embedded_default() -> Config {
    Config {
        server: ServerConfig {
            port: default_port(),
            static_dir: default_static_dir(),
        },
        files: FilesConfig {
            public_dir: "target/site/public".to_string(),
        },
        erp: ErpConfig {
            base_url: "http://localhost:8000".to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout_secs: default_timeout_secs(),
        },
    }
}

/// Resolves a configured path: absolute as is, relative to the executable directory
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    PathBuf::from(configured)
}

/// Каталог публичных файлов из конфигурации
pub fn public_dir(config: &Config) -> PathBuf {
    resolve_path(&config.files.public_dir)
}

use std::sync::OnceLock;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub speech_lang: String,
    pub welcome_notification: bool,
    pub seed_sample_notes: bool,
    pub stats_tick: Duration,
}

impl DashboardConfig {
    /// Create a DashboardConfig populated from environment variables, falling
    /// back to defaults when keys are absent.
    ///
    /// Reads (and defaults) the following environment variables:
    /// - SPEECH_LANG (default "en-US")
    /// - WELCOME_NOTIFICATION (default true)
    /// - SEED_SAMPLE_NOTES (default false)
    /// - STATS_TICK_SECS (default 60, minimum 5)
    ///
    /// # Examples
    ///
    /// ```
    /// use vocalhub_core::config::dashboard_config;
    ///
    /// let cfg = dashboard_config();
    /// let _lang = cfg.speech_lang.as_str();
    /// ```
    pub fn from_env() -> Self {
        Self {
            speech_lang: std::env::var("SPEECH_LANG").unwrap_or_else(|_| "en-US".to_string()),
            welcome_notification: env_bool("WELCOME_NOTIFICATION", true),
            seed_sample_notes: env_bool("SEED_SAMPLE_NOTES", false),
            stats_tick: stats_tick_from_env(),
        }
    }
}

static DASHBOARD_CONFIG: OnceLock<DashboardConfig> = OnceLock::new();

pub fn dashboard_config() -> &'static DashboardConfig {
    DASHBOARD_CONFIG.get_or_init(DashboardConfig::from_env)
}

fn stats_tick_from_env() -> Duration {
    const DEFAULT_SECS: u64 = 60;
    const MIN_SECS: u64 = 5;
    let raw = std::env::var("STATS_TICK_SECS").ok();
    let mut secs = match raw.as_deref() {
        Some(value) => match value.trim().parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!(
                    "[config] invalid STATS_TICK_SECS={}, fallback to {}",
                    value,
                    DEFAULT_SECS
                );
                DEFAULT_SECS
            }
        },
        None => DEFAULT_SECS,
    };
    if secs < MIN_SECS {
        log::warn!(
            "[config] STATS_TICK_SECS={} below minimum {}, clamped",
            secs,
            MIN_SECS
        );
        secs = MIN_SECS;
    }
    Duration::from_secs(secs)
}

/// Spotify playlist per mood, overridable one by one.
#[derive(Clone, Debug)]
pub struct PlaylistConfig {
    pub happy: String,
    pub sad: String,
    pub angry: String,
    pub calm: String,
    pub neutral: String,
}

impl PlaylistConfig {
    fn from_env() -> Self {
        Self {
            happy: env_non_empty("PLAYLIST_HAPPY")
                .unwrap_or_else(|| "37i9dQZF1DXdPec7aLTmlC".to_string()),
            sad: env_non_empty("PLAYLIST_SAD")
                .unwrap_or_else(|| "37i9dQZF1DX7qK8ma5wgG1".to_string()),
            angry: env_non_empty("PLAYLIST_ANGRY")
                .unwrap_or_else(|| "37i9dQZF1DWYxwmBaMqxsl".to_string()),
            calm: env_non_empty("PLAYLIST_CALM")
                .unwrap_or_else(|| "37i9dQZF1DWU0ScTcjJBdj".to_string()),
            neutral: env_non_empty("PLAYLIST_NEUTRAL")
                .unwrap_or_else(|| "37i9dQZF1DXcBWIGoYBM5M".to_string()),
        }
    }
}

static PLAYLIST_CONFIG: OnceLock<PlaylistConfig> = OnceLock::new();

pub fn playlist_config() -> &'static PlaylistConfig {
    PLAYLIST_CONFIG.get_or_init(PlaylistConfig::from_env)
}

#[derive(Clone, Debug)]
pub struct GeoConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoConfig {
    fn from_env() -> Self {
        Self {
            latitude: env_f64("GEO_LAT"),
            longitude: env_f64("GEO_LON"),
        }
    }

    /// Fixed position when both coordinates are configured.
    pub fn fixed_position(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

static GEO_CONFIG: OnceLock<GeoConfig> = OnceLock::new();

pub fn geo_config() -> &'static GeoConfig {
    GEO_CONFIG.get_or_init(GeoConfig::from_env)
}

#[derive(Clone, Debug)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub timeout: Duration,
}

impl WebhookConfig {
    fn from_env() -> Self {
        Self {
            url: env_non_empty("NOTIFY_WEBHOOK_URL"),
            timeout: env_duration_ms("NOTIFY_WEBHOOK_TIMEOUT_MS", 5_000),
        }
    }
}

static WEBHOOK_CONFIG: OnceLock<WebhookConfig> = OnceLock::new();

pub fn webhook_config() -> &'static WebhookConfig {
    WEBHOOK_CONFIG.get_or_init(WebhookConfig::from_env)
}

fn env_duration_ms(key: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

fn env_bool(key: &str, default_value: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(default_value)
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}


#[derive(Clone, Debug)]
pub enum LogMode {
    Stdout,
    File,
}

#[derive(Clone, Debug)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub mode: LogMode,
    pub format: LogFormat,
    pub dir: Option<String>,
    pub file_name: String,
}

impl LoggingConfig {
    fn from_env() -> Self {
        let dir_env = std::env::var("LOG_DIR").ok();
        let mode_env = std::env::var("LOG_MODE").ok();
        let format_env = std::env::var("LOG_FORMAT").ok();

        let format = match format_env.as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let mode = match mode_env.as_deref() {
            Some("file") => LogMode::File,
            Some("stdout") => LogMode::Stdout,
            _ => {
                if dir_env.is_some() {
                    LogMode::File
                } else {
                    LogMode::Stdout
                }
            }
        };

        let dir = match mode {
            LogMode::File => Some(dir_env.unwrap_or_else(|| "logs".to_string())),
            LogMode::Stdout => None,
        };

        let file_name =
            std::env::var("LOG_FILE_NAME").unwrap_or_else(|_| "vocalhub.log".to_string());

        Self {
            mode,
            format,
            dir,
            file_name,
        }
    }
}

static LOGGING: OnceLock<LoggingConfig> = OnceLock::new();

pub fn logging_config() -> &'static LoggingConfig {
    LOGGING.get_or_init(LoggingConfig::from_env)
}

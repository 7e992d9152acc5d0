use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Once;

use chrono::Utc;

use crate::shared::config::{self, LogFormat, LogMode, LoggingConfig};

static INIT: Once = Once::new();

/// Installs the global logger once; later calls are no-ops. Filter comes
/// from RUST_LOG (default "info"), format and destination from LOG_FORMAT,
/// LOG_MODE, LOG_DIR and LOG_FILE_NAME. Problems opening the log file fall
/// back to stdout and are reported through the logger itself.
pub fn init() {
    INIT.call_once(|| {
        let cfg = config::logging_config().clone();
        let mut warnings = Vec::new();

        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
        let format = cfg.format.clone();
        builder.format(move |buf, record| {
            let ts = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
            match format {
                LogFormat::Json => {
                    let line = serde_json::json!({
                        "ts": ts,
                        "level": record.level().to_string(),
                        "target": record.target(),
                        "msg": record.args().to_string(),
                    });
                    writeln!(buf, "{line}")
                }
                LogFormat::Text => writeln!(
                    buf,
                    "{} {} {} {}",
                    ts,
                    record.level(),
                    record.target(),
                    record.args()
                ),
            }
        });
        builder.target(resolve_target(&cfg, &mut warnings));

        let _ = builder.try_init();
        for warning in warnings {
            log::warn!("{warning}");
        }
    });
}

fn resolve_target(cfg: &LoggingConfig, warnings: &mut Vec<String>) -> env_logger::Target {
    let dir = match (&cfg.mode, cfg.dir.as_ref()) {
        (LogMode::Stdout, _) | (LogMode::File, None) => return env_logger::Target::Stdout,
        (LogMode::File, Some(dir)) => dir,
    };
    if let Err(err) = std::fs::create_dir_all(dir) {
        warnings.push(format!("[logging] failed to create log dir: {err}"));
    }
    let path = std::path::Path::new(dir).join(&cfg.file_name);
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => env_logger::Target::Pipe(Box::new(file)),
        Err(err) => {
            warnings.push(format!(
                "[logging] failed to open log file ({}): {err}",
                path.display()
            ));
            env_logger::Target::Stdout
        }
    }
}

mod dialog;
mod interface;
mod logging;
mod nlu;
mod service;
mod shared;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::dialog::DialogCoordinator;
use crate::interface::{
    ConsoleNotification, ConsoleRender, ConsoleSpeech, NoopNotification, StaticGeo, WebhookNotifier,
};
use crate::shared::config;
use crate::shared::ports::notification::NotificationPort;

/// Runs the dashboard as a stdin console: every line is a command, `:listen`
/// arms the microphone, ctrl-c or `:quit` ends the session.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cfg = config::dashboard_config();
    log::info!(
        "[main] speech lang {}, stats every {:?}",
        cfg.speech_lang,
        cfg.stats_tick
    );

    let notification: Arc<dyn NotificationPort> = {
        let webhook = config::webhook_config();
        match &webhook.url {
            Some(url) => match WebhookNotifier::new(url.clone(), webhook.timeout) {
                Ok(adapter) => Arc::new(adapter),
                Err(err) => {
                    log::warn!("[main] webhook notifier init failed: {}", err);
                    Arc::new(NoopNotification::new())
                }
            },
            None => Arc::new(ConsoleNotification::new()),
        }
    };

    let handle = DialogCoordinator::spawn(
        Arc::new(ConsoleRender::new()),
        Arc::new(ConsoleSpeech::new()),
        Arc::new(StaticGeo::from_env()),
        notification,
    );

    println!("VocalHub console. Type a command, \":listen\" for voice, \":quit\" to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            res = &mut shutdown => {
                if let Err(err) = res {
                    log::warn!("[main] shutdown signal error: {:?}", err);
                }
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break; };
                match line.trim() {
                    "" => {}
                    ":listen" => handle.start_recognition(),
                    ":stop" => handle.stop_recognition(),
                    ":quit" | ":q" => break,
                    text => handle.submit_text(text),
                }
            }
        }
    }

    handle.shutdown();
    Ok(())
}

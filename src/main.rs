//! # Main Entry Point
//!
//! Initializes the twitter monitoring bot:
//! - Domain: Configuration and Types
//! - Infrastructure: Matrix, Brain, Tweeter, Activity/Intent Feed
//! - Application: Router, Dispatcher, Event Bus, State
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::RoomId,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::SyncRoomMessageEvent,
    },
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::dispatcher::ActivityDispatcher;
use crate::application::events::EventBus;
use crate::application::router::CommandRouter;
use crate::application::state::BotState;
use crate::domain::config::AppConfig;
use crate::domain::traits::SharedBrain;
use crate::infrastructure::brain::JsonBrain;
use crate::infrastructure::matrix::MatrixService;
use crate::interface::commands::conversation::{self, AbortReason};

#[derive(Parser, Debug)]
#[command(name = "twitter-monitor", about = "Tweets about application lifecycle events")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: String,

    /// Do not read activity notifications from stdin
    #[arg(long)]
    no_stdin: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let data_dir = Path::new(&config.system.data_dir);
    if !data_dir.exists() {
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;
    }

    // Clear previous session log
    let log_path = data_dir.join("session.log");
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(data_dir, "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("Starting twitter monitor...");
    if config.twitter.consumer_key.is_none() || config.twitter.consumer_secret.is_none() {
        tracing::warn!("Twitter consumer key/secret not configured; the tweeter must supply its own.");
    }

    // 3. Brain & State
    let brain: SharedBrain = Arc::new(JsonBrain::open(data_dir.join("brain.json"))?);
    let state = Arc::new(Mutex::new(BotState::load(&config, brain.as_ref())));
    {
        let guard = state.lock().await;
        tracing::info!(
            "Monitoring flag: {:?}, {} events enabled",
            guard.monitoring,
            guard.catalog.list_enabled().len()
        );
    }

    // 4. Activity Dispatch
    let bus = EventBus::new();
    let poster = crate::infrastructure::tweeter::from_config(&config.tweeter);
    let dispatcher = ActivityDispatcher::new(state.clone(), brain.clone(), poster, bus.clone());
    let receiver = bus.subscribe();
    tokio::spawn(dispatcher.run(receiver));

    let (intent_tx, mut intent_rx) = tokio::sync::mpsc::unbounded_channel();
    if !args.no_stdin {
        let feed_bus = bus.clone();
        tokio::spawn(async move {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            match crate::infrastructure::activity::pump(stdin, feed_bus, intent_tx).await {
                Ok(count) => tracing::info!("Activity feed closed after {} notifications.", count),
                Err(e) => tracing::error!("Activity feed failed: {}", e),
            }
        });
    }

    // 5. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await?;

    tracing::info!("Logged in as {}", config.services.matrix.username);

    for room in &config.services.matrix.rooms {
        match RoomId::parse(room.as_str()) {
            Ok(room_id) => {
                if let Err(e) = client.join_room_by_id(&room_id).await {
                    tracing::error!("Failed to join room {}: {}", room, e);
                }
            }
            Err(e) => tracing::error!("Invalid room id {}: {}", room, e),
        }
    }

    // 6. Conversation Sweeper
    let sweep_client = client.clone();
    let sweep_state = state.clone();
    let sweep_config = config.clone();
    tokio::spawn(async move {
        let interval = std::time::Duration::from_secs(sweep_config.conversation.sweep_interval_secs.max(1));
        loop {
            tokio::time::sleep(interval).await;

            let expired = {
                let mut guard = sweep_state.lock().await;
                guard.take_expired(chrono::Utc::now(), conversation::timeout(&sweep_config))
            };

            for (key, pending) in expired {
                tracing::info!("{}", crate::strings::logs::conversation_expired(&key.room_id, &key.sender));
                let Ok(room_id) = RoomId::parse(key.room_id.as_str()) else {
                    continue;
                };
                if let Some(room) = sweep_client.get_room(&room_id) {
                    let chat = MatrixService::new(room);
                    if let Err(e) =
                        conversation::notify_aborted(&chat, &pending.step, AbortReason::Expired).await
                    {
                        tracing::error!("Failed to notify expired conversation: {}", e);
                    }
                }
            }
        }
    });

    // 7. Event Loop
    let start_time = std::time::SystemTime::now();
    let router = Arc::new(CommandRouter::new(config.clone(), state.clone(), brain.clone()));

    let intent_client = client.clone();
    let intent_router = router.clone();
    tokio::spawn(async move {
        while let Some(request) = intent_rx.recv().await {
            let Ok(room_id) = RoomId::parse(request.room.as_str()) else {
                tracing::warn!("Intent for invalid room id {}", request.room);
                continue;
            };
            let Some(room) = intent_client.get_room(&room_id) else {
                tracing::warn!("Intent for unknown room {}", request.room);
                continue;
            };
            let chat = MatrixService::new(room);
            if let Err(e) = intent_router
                .route_intent(&chat, &request.intent, &request.sender)
                .await
            {
                tracing::error!("Failed to route intent: {}", e);
            }
        }
    });

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = router.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            if let matrix_sdk::ruma::events::room::message::MessageType::Text(text_content) =
                &original_msg.content.msgtype
            {
                if original_msg.sender == room.own_user_id() {
                    return;
                }
                let body = &text_content.body;
                tracing::info!("Received message from {}: \n{}", original_msg.sender, body);

                let chat = MatrixService::new(room);
                if let Err(e) = router
                    .route(&chat, body, original_msg.sender.as_str())
                    .await
                {
                    tracing::error!("Failed to route message: {}", e);
                }
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            let _ = room.join().await;
        }
    });

    // 8. Sync until shutdown
    tokio::select! {
        res = client.sync(SyncSettings::default()) => {
            if let Err(e) = res {
                tracing::error!("Matrix sync failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down...");
        }
    }

    Ok(())
}

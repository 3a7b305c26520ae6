//! # Azonbot
//!
//! Daily prayer-time notification bot for Telegram. Two long-lived loops:
//! the dispatcher (minute-matching + roster fan-out) runs in the background,
//! the onboarding conversation long-polls in the foreground.
//!
//! Usage:
//!   azonbot                       # config from ~/.azonbot/config.toml + env
//!   azonbot --config azonbot.toml
//!   BOT_TOKEN=... API_URL=... azonbot -v

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use azonbot_core::AzonConfig;
use azonbot_core::notify::Notifier;
use azonbot_directory::DirectoryClient;
use azonbot_onboarding::Onboarding;
use azonbot_scheduler::{DispatchOptions, OccurrenceDetector, PrayerSchedule, run_dispatcher};
use azonbot_telegram::TelegramBot;

#[derive(Parser)]
#[command(
    name = "azonbot",
    version,
    about = "🕌 Azonbot — daily prayer-time notifications for Telegram"
)]
struct Cli {
    /// Config file path (default: ~/.azonbot/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "azonbot=debug" } else { "azonbot=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => AzonConfig::load_from(path)?,
        None => AzonConfig::load()?,
    };
    config.apply_env();
    config.validate()?;

    let offset = config.offset()?;
    let schedule = PrayerSchedule::from_config(&config.schedule)?;

    let bot = Arc::new(TelegramBot::new(&config.bot_token));
    let me = bot.get_me().await?;
    tracing::info!(
        "🤖 Authorized as @{} ({})",
        me.username.as_deref().unwrap_or("unknown"),
        me.first_name
    );

    let directory = Arc::new(DirectoryClient::new(&config.directory_url));

    println!("🕌 Azonbot v{}", env!("CARGO_PKG_VERSION"));
    println!("   📡 Directory: {}", config.directory_url);
    println!("   🌍 Zone:      UTC{}", config.utc_offset);
    for (time, prayer) in schedule.slots() {
        println!("   🕰  {} → {}", time.format("%H:%M"), prayer);
    }
    println!();

    let detector = OccurrenceDetector::new(schedule, offset);
    let options = DispatchOptions::from(&config.dispatcher);
    let notifier: Arc<dyn Notifier> = bot.clone();
    tokio::spawn(run_dispatcher(detector, directory.clone(), notifier, options));

    Onboarding::new(bot, directory)
        .run(config.onboarding.update_timeout_secs)
        .await;

    Ok(())
}

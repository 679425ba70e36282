use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use guildhall_core::shop::OrderStatus;
use guildhall_infrastructure::ConfigService;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod views;

use app::AppBootstrap;

#[derive(Parser)]
#[command(name = "guildhall")]
#[command(about = "Guildhall CLI - community hub client", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print raw JSON records instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the session, level, balance and background
    Status,
    /// End the current session
    Logout,
    /// Probe the API health endpoint
    Health,
    /// Debug XP operations
    Xp {
        #[command(subcommand)]
        action: XpAction,
    },
    /// Notifications of the current user
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
    /// Uploaded files (uploads can award XP)
    Files {
        #[command(subcommand)]
        action: FileAction,
    },
    /// Browse and buy from the shop
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Show a user's public profile
    Profile {
        /// Username or user id
        identifier: String,
    },
}

#[derive(Subcommand)]
enum XpAction {
    /// Award XP to yourself
    Award { amount: i64 },
    /// Reset level and XP
    Reset,
}

#[derive(Subcommand)]
enum NotificationAction {
    /// Latest notifications
    Recent,
    /// Page through the notification history
    List {
        /// Page size (1-100, defaults to notifications.page_size)
        #[arg(long)]
        limit: Option<u32>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Keep polling until interrupted
    Watch {
        /// Poll interval in seconds (defaults to notifications.poll_interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Mark a notification as read
    Read { id: i64 },
}

#[derive(Subcommand)]
enum FileAction {
    List,
    Upload { path: PathBuf },
    Delete { filename: String },
}

#[derive(Subcommand)]
enum ShopAction {
    Categories,
    Items {
        #[arg(long)]
        category: Option<i64>,
    },
    Item { id: i64 },
    Buy {
        id: i64,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    Orders,
    /// Create a category (admin)
    CreateCategory {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a category (admin)
    DeleteCategory { id: i64 },
    /// Create an item (admin)
    CreateItem {
        name: String,
        price: i64,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        stock: Option<i64>,
        /// Create the item hidden from the catalog
        #[arg(long)]
        inactive: bool,
    },
    /// Delete an item (admin)
    DeleteItem { id: i64 },
    /// Change an order's status (admin)
    SetOrderStatus { id: i64, status: OrderStatus },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service.get_config()?;
    init_tracing(&config.logging.level);
    tracing::debug!("[Main] Loaded config from {:?}", config_service.path());

    if let Commands::Health = cli.command {
        return commands::health::run_standalone(&config, cli.json).await;
    }

    let state = AppBootstrap::init(config).await?.app_state;

    let gate = state
        .maintenance_gate
        .evaluate(&state.session_store.state());
    if let Some(notice) = views::maintenance_notice(gate) {
        println!("{notice}");
        state.shutdown().await;
        return Ok(());
    }

    let json = cli.json;
    let outcome = match cli.command {
        Commands::Status => commands::session::status(&state, json).await,
        Commands::Logout => commands::session::logout(&state).await,
        Commands::Health => {
            commands::health::run(state.health_service.as_ref(), &state.config.api.base_url, json)
                .await
        }
        Commands::Xp { action } => match action {
            XpAction::Award { amount } => commands::xp::award(&state, amount).await,
            XpAction::Reset => commands::xp::reset(&state).await,
        },
        Commands::Notifications { action } => match action {
            NotificationAction::Recent => commands::notifications::recent(&state, json).await,
            NotificationAction::List { limit, pages } => {
                commands::notifications::list(&state, limit, pages, json).await
            }
            NotificationAction::Watch { interval } => {
                commands::notifications::watch(&state, interval).await
            }
            NotificationAction::Read { id } => commands::notifications::mark_read(&state, id).await,
        },
        Commands::Files { action } => match action {
            FileAction::List => commands::files::list(&state, json).await,
            FileAction::Upload { path } => commands::files::upload(&state, &path).await,
            FileAction::Delete { filename } => commands::files::delete(&state, &filename).await,
        },
        Commands::Shop { action } => match action {
            ShopAction::Categories => commands::shop::categories(&state, json).await,
            ShopAction::Items { category } => commands::shop::items(&state, category, json).await,
            ShopAction::Item { id } => commands::shop::item(&state, id, json).await,
            ShopAction::Buy { id, quantity } => commands::shop::buy(&state, id, quantity).await,
            ShopAction::Orders => commands::shop::orders(&state, json).await,
            ShopAction::CreateCategory { name, description } => {
                commands::shop::create_category(&state, name, description).await
            }
            ShopAction::DeleteCategory { id } => commands::shop::delete_category(&state, id).await,
            ShopAction::CreateItem {
                name,
                price,
                category,
                description,
                image_url,
                stock,
                inactive,
            } => {
                let draft = guildhall_core::shop::ItemDraft {
                    name,
                    description,
                    price,
                    category_id: category,
                    image_url,
                    stock,
                    is_active: !inactive,
                };
                commands::shop::create_item(&state, draft).await
            }
            ShopAction::DeleteItem { id } => commands::shop::delete_item(&state, id).await,
            ShopAction::SetOrderStatus { id, status } => {
                commands::shop::set_order_status(&state, id, status).await
            }
        },
        Commands::Profile { identifier } => commands::profile::show(&state, &identifier, json).await,
    };

    state.shutdown().await;
    outcome
}

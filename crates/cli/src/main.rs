//! Aictronics CLI - browse the catalog, manage the cart, and check out.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! aictronics catalog list
//!
//! # Add two Phone Pros and show the cart
//! aictronics cart add iphone-17-pro -q 2
//! aictronics cart show
//!
//! # Change a quantity (values below 1 are stored as 1)
//! aictronics cart update iphone-17-pro 5
//!
//! # Demo guest checkout (empties the cart)
//! aictronics checkout
//! ```
//!
//! The cart is kept in `$AICTRONICS_DATA_DIR/$AICTRONICS_CART_KEY.json` and
//! survives between invocations. See `aictronics_storefront::config` for the
//! full list of environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use aictronics_storefront::config::{LogFormat, StorefrontConfig};
use aictronics_storefront::state::AppState;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "aictronics")]
#[command(author, version, about = "Aictronics demo storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Check out as a guest (demo only, no payment)
    Checkout,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products
    List,
    /// Show one product in detail
    Show {
        /// Product id (e.g. `iphone-17-pro`)
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and subtotal
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product id
        id: String,

        /// New quantity (values below 1 are stored as 1)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Initialize tracing with `EnvFilter` and Sentry integration.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aictronics_storefront=info,aictronics_cli=info".into());

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter));

    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = AppState::new(config)?;
    state.cart_mut().subscribe(|snapshot| {
        tracing::info!(
            lines = snapshot.lines.len(),
            total_items = snapshot.total_items,
            subtotal = %snapshot.subtotal,
            "Cart changed"
        );
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(&state, &mut out)?,
            CatalogAction::Show { id } => commands::catalog::show(&state, &id, &mut out)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state, &mut out)?,
            CartAction::Add { id, quantity } => {
                commands::cart::add(&mut state, &id, quantity, &mut out)?;
            }
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut state, &id, quantity, &mut out)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut state, &id, &mut out)?,
            CartAction::Clear => commands::cart::clear(&mut state, &mut out)?,
        },
        Commands::Checkout => commands::checkout::guest(&mut state, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ustaz::config::Config;
use ustaz::context::AppContext;
use ustaz::i18n::message;
use ustaz::models::BookingStatus;
use ustaz::store::{FilterUpdate, SearchOutcome, Theme};

#[derive(Parser)]
#[command(
    name = "ustaz",
    version,
    about = "Find nearby teachers and manage bookings from the terminal",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (environment variables are used otherwise)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search teachers around a position
    Search {
        #[command(flatten)]
        anchor: AnchorArgs,

        /// Search radius in meters
        #[arg(short, long)]
        radius: Option<u32>,

        #[arg(long)]
        subject: Option<u64>,

        #[arg(long)]
        grade_level: Option<u64>,

        #[arg(long)]
        min_rating: Option<f64>,

        /// Maximum hourly rate
        #[arg(long)]
        max_price: Option<u32>,

        /// Only teachers offering online sessions
        #[arg(long)]
        online: bool,

        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// List map markers around a position
    Markers {
        #[command(flatten)]
        anchor: AnchorArgs,

        /// List radius in meters (markers cover twice this)
        #[arg(short, long)]
        radius: Option<u32>,

        #[arg(long)]
        subject: Option<u64>,
    },

    /// Show a teacher profile
    Teacher {
        id: u64,

        /// Also list the first page of reviews
        #[arg(long)]
        reviews: bool,
    },

    /// Resolve the current position
    Locate,

    /// Log in and persist the session
    Login {
        email: String,

        #[arg(long, env = "USTAZ_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List your bookings
    Bookings {
        /// Filter by status (pending, confirmed, completed, cancelled, ...)
        #[arg(short, long)]
        status: Option<String>,

        #[arg(short, long)]
        page: Option<u32>,

        /// Show upcoming bookings instead
        #[arg(long)]
        upcoming: bool,
    },

    /// Show or change the colour theme
    Theme {
        #[arg(value_enum)]
        set: Option<ThemeArg>,

        /// Flip between light and dark
        #[arg(long, conflicts_with = "set")]
        toggle: bool,
    },
}

#[derive(clap::Args)]
struct AnchorArgs {
    /// Latitude of the search anchor
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the search anchor
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::System => Theme::System,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;
    ustaz::i18n::init_from_env();

    tracing::debug!(api = %config.api.base_url, "ustaz starting");

    let ctx = AppContext::from_config(config).context("Failed to initialize application")?;

    match cli.command {
        Commands::Search {
            anchor,
            radius,
            subject,
            grade_level,
            min_rating,
            max_price,
            online,
            page,
        } => {
            let mut filters = FilterUpdate::new()
                .subject_id(subject)
                .grade_level_id(grade_level)
                .min_rating(min_rating)
                .max_price(max_price)
                .accepts_online(online.then_some(true));
            if let Some(radius) = radius {
                filters = filters.radius(radius);
            }
            search(&ctx, anchor, filters, page).await?;
        }

        Commands::Markers {
            anchor,
            radius,
            subject,
        } => {
            let mut filters = FilterUpdate::new().subject_id(subject);
            if let Some(radius) = radius {
                filters = filters.radius(radius);
            }
            markers(&ctx, anchor, filters).await?;
        }

        Commands::Teacher { id, reviews } => teacher(&ctx, id, reviews).await?,

        Commands::Locate => locate(&ctx).await,

        Commands::Login { email, password } => {
            tracing::info!(email = %email, "Starting login command");
            login(&ctx, &email, &password).await?;
        }

        Commands::Logout => logout(&ctx).await,

        Commands::Whoami => whoami(&ctx).await,

        Commands::Bookings {
            status,
            page,
            upcoming,
        } => bookings(&ctx, status, page, upcoming).await?,

        Commands::Theme { set, toggle } => theme(&ctx, set, toggle).await,
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("ustaz=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("ustaz={level},warn")))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

/// Explicit coordinates, else whatever the geolocation coordinator reports
async fn resolve_anchor(ctx: &AppContext, anchor: AnchorArgs) -> (f64, f64) {
    if let (Some(lat), Some(lng)) = (anchor.lat, anchor.lng) {
        return (lat, lng);
    }
    let position = ctx.map.request_location(&ctx.geolocation).await;
    if let Some(error) = ctx.map.snapshot().await.error {
        eprintln!("{error}");
        eprintln!("{}", message("cli.search.no_location", &[]));
    }
    (position.lat, position.lng)
}

async fn search(ctx: &AppContext, anchor: AnchorArgs, filters: FilterUpdate, page: u32) -> Result<()> {
    let (lat, lng) = resolve_anchor(ctx, anchor).await;

    // Filters first: anchoring triggers the search with them applied.
    ctx.search.update_filters(filters).await;
    let mut outcome = ctx.search.set_user_location(lat, lng).await;
    if page > 1 && outcome == SearchOutcome::Applied {
        outcome = ctx.search.search_nearby(Some(page)).await;
    }

    let state = ctx.search.snapshot().await;
    if outcome == SearchOutcome::Failed || state.error.is_some() {
        anyhow::bail!(state.error.unwrap_or_default());
    }

    if state.teachers.is_empty() {
        println!("{}", message("cli.search.empty", &[]));
        return Ok(());
    }

    println!(
        "{}",
        message(
            "cli.search.results",
            &[
                ("total", &state.pagination.total),
                ("radius", &state.pagination.search_radius_km),
                ("page", &state.pagination.page),
                ("pages", &state.pagination.total_pages),
            ]
        )
    );
    for teacher in &state.teachers {
        println!(
            "  #{:<6} {:<28} {:>6.1} km  {:>4.1}★  {} EGP/hr",
            teacher.id,
            teacher.full_name(),
            teacher.distance_km,
            teacher.avg_rating,
            teacher.hourly_rate
        );
    }
    Ok(())
}

async fn markers(ctx: &AppContext, anchor: AnchorArgs, filters: FilterUpdate) -> Result<()> {
    let (lat, lng) = resolve_anchor(ctx, anchor).await;

    // No anchor yet, so the filter update does not search
    ctx.search.update_filters(filters).await;
    ctx.search.set_anchor(lat, lng).await;
    ctx.search.load_map_markers().await;

    let markers = ctx.search.map_markers().await;
    println!("{}", message("cli.markers.count", &[("count", &markers.len())]));
    for marker in &markers {
        let featured = if marker.is_featured { " *" } else { "" };
        println!(
            "  #{:<6} {:<28} {:.5},{:.5}{featured}",
            marker.id,
            marker.full_name(),
            marker.latitude,
            marker.longitude
        );
    }
    Ok(())
}

async fn teacher(ctx: &AppContext, id: u64, with_reviews: bool) -> Result<()> {
    let teacher = ctx.search.load_teacher_profile(id).await?;
    println!("{}", serde_json::to_string_pretty(&teacher)?);

    if with_reviews {
        let reviews = ctx.services.teachers.teacher_reviews(id, 1).await?;
        for review in &reviews.data {
            println!(
                "  {}★  {}",
                review.rating,
                review.comment.as_deref().unwrap_or_default()
            );
        }
    }
    Ok(())
}

async fn locate(ctx: &AppContext) {
    let position = ctx.map.request_location(&ctx.geolocation).await;
    let state = ctx.map.snapshot().await;
    println!(
        "{}",
        message(
            "cli.locate.result",
            &[
                ("lat", &position.lat),
                ("lng", &position.lng),
                ("status", &state.permission_status),
            ]
        )
    );
    if let Some(error) = state.error {
        println!("  {error}");
    }
}

async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let home = match ctx.auth.login(email, password).await {
        Ok(home) => home,
        Err(_) => anyhow::bail!(ctx.auth.error().await.unwrap_or_default()),
    };
    let user = ctx.auth.user().await.context("Session missing after login")?;
    println!(
        "{}",
        message(
            "cli.auth.logged_in",
            &[("name", &user.full_name()), ("role", &user.role), ("home", &home)]
        )
    );
    Ok(())
}

async fn logout(ctx: &AppContext) {
    if ctx.auth.is_authenticated().await {
        if let Err(e) = ctx.services.auth.logout().await {
            tracing::warn!(error = %e, "Server-side logout failed");
        }
    }
    ctx.auth.logout().await;
    println!("{}", message("cli.auth.logged_out", &[]));
}

async fn whoami(ctx: &AppContext) {
    ctx.auth.load_profile().await;
    match ctx.auth.session().await {
        Some(session) => println!(
            "{}",
            message(
                "cli.auth.logged_in",
                &[
                    ("name", &session.user.full_name()),
                    ("role", &session.role()),
                    ("home", &session.role().home_path()),
                ]
            )
        ),
        None => println!("{}", message("cli.auth.anonymous", &[])),
    }
}

async fn bookings(
    ctx: &AppContext,
    status: Option<String>,
    page: Option<u32>,
    upcoming: bool,
) -> Result<()> {
    let list = if upcoming {
        ctx.bookings.load_upcoming_bookings().await;
        ctx.bookings.snapshot().await.upcoming_bookings
    } else {
        let status = status
            .map(|s| s.parse::<BookingStatus>())
            .transpose()
            .map_err(anyhow::Error::msg)?;
        ctx.bookings.load_bookings(status, page).await;
        let state = ctx.bookings.snapshot().await;
        if let Some(error) = state.error {
            anyhow::bail!(error);
        }
        state.bookings
    };

    if list.is_empty() {
        println!("{}", message("cli.bookings.empty", &[]));
    }
    for booking in &list {
        println!(
            "  #{:<6} {} {}-{}  {:<10} {}",
            booking.id,
            booking.booking_date,
            booking.start_time,
            booking.end_time,
            booking.status.as_str(),
            booking.teacher_name.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

async fn theme(ctx: &AppContext, set: Option<ThemeArg>, toggle: bool) {
    if let Some(theme) = set {
        ctx.theme.set_theme(theme.into()).await;
    } else if toggle {
        ctx.theme.toggle_theme().await;
    }
    let current = ctx.theme.theme().await;
    let resolved = ctx.theme.resolved_theme().await;
    println!(
        "{}",
        message("cli.theme.current", &[("theme", &current), ("resolved", &resolved)])
    );
}

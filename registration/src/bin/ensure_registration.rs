//! Run one registration reconciliation for a session and print the result.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use splits_registration::domain::{BearerToken, RegistrationData};
use splits_registration::outbound::cache::InMemoryProfileCache;
use splits_registration::outbound::http::{ApiClient, HttpRegistrationApi};
use splits_registration::{ReconcilerSettings, RegistrationReconciler};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

const TOKEN_ENV: &str = "SPLITS_API_TOKEN";

/// `ensure-registration` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ensure-registration",
    about = "Ensure a session has exactly one user and one candidate record",
    version
)]
struct CliArgs {
    /// Session bearer token. Falls back to `SPLITS_API_TOKEN` when omitted.
    #[arg(long, value_name = "token")]
    token: Option<String>,
    /// Identity-provider user id.
    #[arg(long = "external-id", value_name = "id")]
    external_id: String,
    /// Primary email address.
    #[arg(long, value_name = "email")]
    email: String,
    /// Display name used for the candidate profile.
    #[arg(long, value_name = "name")]
    name: Option<String>,
    /// Avatar URL.
    #[arg(long = "image-url", value_name = "url")]
    image_url: Option<String>,
    /// API base URL. Overrides `SPLITS_API_BASE_URL`.
    #[arg(long = "base-url", value_name = "url")]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .init();

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> Result<()> {
    let mut settings =
        ReconcilerSettings::load_from_iter([OsString::from("ensure-registration")])
            .map_err(|error| eyre!("failed to load settings: {error}"))?;
    if let Some(base_url) = args.base_url {
        settings.base_url = Some(base_url);
    }

    let token = resolve_token(args.token)?;
    let mut registration = RegistrationData::new(args.external_id, args.email)
        .wrap_err("invalid registration details")?;
    if let Some(name) = args.name {
        registration = registration.with_name(name);
    }
    if let Some(image_url) = args.image_url {
        registration = registration.with_image_url(image_url);
    }

    let client = ApiClient::new(settings.base_url()?, settings.timeout())
        .wrap_err("failed to build HTTP client")?;
    let api = Arc::new(HttpRegistrationApi::new(client));
    let mut cache = InMemoryProfileCache::new(Arc::clone(&api), Arc::new(DefaultClock));
    if let Some(ttl) = settings.profile_cache_ttl() {
        cache = cache.with_ttl(ttl);
    }

    let reconciler = RegistrationReconciler::new(api, Arc::new(cache));
    let result = reconciler
        .ensure_user_and_candidate(&token, &registration)
        .await;

    let rendered =
        serde_json::to_string_pretty(&result).wrap_err("failed to render reconciliation result")?;
    println!("{rendered}");

    if result.success {
        Ok(())
    } else {
        Err(eyre!(
            "registration failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        ))
    }
}

fn resolve_token(token: Option<String>) -> Result<BearerToken> {
    let raw = match token {
        Some(raw) => raw,
        None => env::var(TOKEN_ENV).wrap_err_with(|| format!("--token or {TOKEN_ENV} is required"))?,
    };
    BearerToken::new(raw).wrap_err("invalid bearer token")
}

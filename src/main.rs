use email_tagger::routes::tagging_routes;
use email_tagger::service::Service;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    eprintln!("🏷️  Email Tagger v{}", env!("CARGO_PKG_VERSION"));

    // ── Data + Engine ────────────────────────────────────────────────────
    let Service {
        config,
        store,
        engine,
    } = Service::from_env()?;

    let paths = config.data_paths();
    eprintln!("   Emails: {}", paths.emails.display());
    eprintln!("   Customers: {}", paths.customers.display());
    eprintln!(
        "   Loaded: {} customers, {} emails",
        store.customers().len(),
        store.emails(None).len()
    );
    eprintln!(
        "   Guardrails: {} rules, model: {}{}",
        engine.guardrails().rules().len(),
        engine.model_name(),
        match config.seed {
            Some(seed) => format!(" (seed {seed})"),
            None => String::new(),
        }
    );

    // ── Server ───────────────────────────────────────────────────────────
    let app = tagging_routes(store, engine);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("   API: http://{}/api\n", addr);
    tracing::info!(addr = %addr, "Tagging API started");

    axum::serve(listener, app).await?;

    Ok(())
}

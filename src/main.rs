use call_triage::{
    api::{build_router, AppState},
    audit::AuditLog,
    classifier::build_classifier,
    config::Config,
    intake::IntakeQueue,
    routing::Router,
    telephony::CallInitiator,
    triage::TriageEngine,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "call_triage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        default_config()
    });

    tracing::info!("Starting Call Triage Gateway v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Prometheus metrics
    if config.observability.prometheus_enabled {
        if let Err(e) = call_triage::metrics::init_metrics() {
            tracing::warn!("Failed to initialize metrics: {}", e);
            tracing::warn!("Continuing without metrics");
        } else {
            tracing::info!("Prometheus metrics initialized");
        }
    } else {
        tracing::info!("Prometheus metrics disabled in configuration");
    }

    // Shared stores: created once at service start, cleared only at restart
    let audit = Arc::new(AuditLog::new());
    let hospital = IntakeQueue::hospital();
    let consultation = IntakeQueue::consultation();

    // Classification oracle
    let classifier = build_classifier(&config.classifier)?;
    tracing::info!(
        backend = ?config.classifier.backend,
        model = %config.classifier.model,
        "Classifier initialized"
    );

    // Triage engine
    let router = Router::new(hospital.clone(), consultation.clone());
    let engine = Arc::new(TriageEngine::new(
        classifier,
        router,
        audit.clone(),
        Duration::from_secs(config.classifier.timeout_secs),
    ));
    tracing::info!("Triage engine initialized");

    // Telephony vendor client
    let telephony = Arc::new(CallInitiator::from_config(&config.telephony)?);
    tracing::info!("Telephony client initialized");

    // Create application state for the HTTP API
    let app_state = AppState::new(engine, audit, hospital, consultation, telephony);

    // Build HTTP router
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Event ingestion: http://{}/webhook", http_addr);
    tracing::info!("   Debug display: http://{}/display", http_addr);
    tracing::info!("   Audit log: http://{}/v1/audit", http_addr);

    let http_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tracing::info!("Press Ctrl+C to shutdown");

    tokio::select! {
        _ = http_handle => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}

fn default_config() -> Config {
    use call_triage::config::*;

    Config {
        server: ServerConfig {
            host: "0.0.0.0".to_string(),
            http_port: 8000,
            request_timeout_secs: 30,
        },
        classifier: ClassifierConfig {
            backend: ClassifierBackend::Remote,
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key_env: Some("GROQ_API_KEY".to_string()),
            temperature: 0.5,
            max_tokens: 1024,
            timeout_secs: 15,
            scripted_answer: None,
        },
        telephony: TelephonyConfig {
            endpoint: "https://api.bolna.dev/call".to_string(),
            agent_id_env: Some("BOLNA_AGENT_ID".to_string()),
            auth_token_env: Some("BOLNA_AUTH_TOKEN".to_string()),
            timeout_secs: 10,
        },
        observability: ObservabilityConfig {
            log_level: "info".to_string(),
            json_logs: false,
            service_name: "call-triage".to_string(),
            prometheus_enabled: true,
        },
    }
}

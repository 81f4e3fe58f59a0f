pub mod actions;
pub mod db;
pub mod error;
pub mod models;
pub mod views;

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Router};
use maud::Markup;
use tokio::net::TcpListener;

use actions::{ActionError, MutationForm};
use db::store::TodoStore;
use error::AppError;

// === Config ===
#[derive(Debug, Clone)]
struct Config {
    bind_addr: String,
    database_url: String,
    welcome_message: Option<String>,
}

impl Config {
    fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://todos.db".to_string()),
            welcome_message: std::env::var("WELCOME_MESSAGE").ok(),
        }
    }
}

// === App State ===
// Handed to every handler through axum's State extractor; the pool inside
// TodoStore is the shared piece.
#[derive(Debug, Clone)]
struct AppState {
    store: TodoStore,
    config: Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let store = TodoStore::connect(&config.database_url)
        .await
        .with_context(|| format!("opening database {}", config.database_url))?;
    tracing::info!(database = %config.database_url, "database ready");

    let bind_addr = config.bind_addr.clone();
    let app = router(AppState { store, config });

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{bind_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/todos", get(todos).post(mutate_todo))
        .with_state(state)
}

// === Routes ===
// landing page; no storage access
async fn root(State(state): State<AppState>) -> Markup {
    views::home_page(state.config.welcome_message.as_deref())
}

async fn todos(State(state): State<AppState>) -> Result<Markup, AppError> {
    let todos = state.store.list_all().await?;
    Ok(views::todos_page(&todos, None))
}

// One form submission per request, urlencoded or multipart. Validation
// failures become an inline banner over a fresh render; storage failures
// hit the error boundary.
async fn mutate_todo(
    State(state): State<AppState>,
    form: MutationForm,
) -> Result<Markup, AppError> {
    let error = match actions::apply(&state.store, &form).await {
        Ok(()) => None,
        Err(ActionError::Validation(message)) => Some(message),
        Err(ActionError::Storage(err)) => return Err(err.into()),
    };
    let todos = state.store.list_all().await?;
    Ok(views::todos_page(&todos, error.as_deref()))
}

//! REST API Module
//!
//! The mock todo backend: HTTP handlers, DTOs, middleware, and the
//! wiring that turns a `ServerConfig` into a running axum server.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::use_cases::todos::{
    CreateTodoUseCase, DeleteTodoUseCase, GetTodoByIdUseCase, ListTodosUseCase, PatchTodoUseCase,
    ReplaceTodoUseCase,
};
use crate::domain::gateways::TodoRepository;
use crate::infrastructure::driven_adapters::config::ServerConfig;
use crate::infrastructure::driven_adapters::todo_repository::JsonFileTodoRepository;
use crate::shared::errors::RepositoryError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub list_todos_use_case: Arc<ListTodosUseCase>,
    pub get_todo_by_id_use_case: Arc<GetTodoByIdUseCase>,
    pub create_todo_use_case: Arc<CreateTodoUseCase>,
    pub replace_todo_use_case: Arc<ReplaceTodoUseCase>,
    pub patch_todo_use_case: Arc<PatchTodoUseCase>,
    pub delete_todo_use_case: Arc<DeleteTodoUseCase>,
}

impl AppState {
    /// Wire every use case to the given repository
    #[must_use]
    pub fn new(config: ServerConfig, todo_repository: Arc<dyn TodoRepository>) -> Self {
        Self {
            config: Arc::new(config),
            list_todos_use_case: Arc::new(ListTodosUseCase::new(todo_repository.clone())),
            get_todo_by_id_use_case: Arc::new(GetTodoByIdUseCase::new(todo_repository.clone())),
            create_todo_use_case: Arc::new(CreateTodoUseCase::new(todo_repository.clone())),
            replace_todo_use_case: Arc::new(ReplaceTodoUseCase::new(todo_repository.clone())),
            patch_todo_use_case: Arc::new(PatchTodoUseCase::new(todo_repository.clone())),
            delete_todo_use_case: Arc::new(DeleteTodoUseCase::new(todo_repository)),
        }
    }

    /// Open the JSON file store named in the config and wire the use cases to it
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store file cannot be read or created.
    pub async fn from_config(config: ServerConfig) -> Result<Self, RepositoryError> {
        let todo_repository = Arc::new(JsonFileTodoRepository::open(&config.db_path).await?);
        Ok(Self::new(config, todo_repository))
    }
}

/// Build the full router with middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/todos", handlers::todos::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_id_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    middleware::simulated_latency,
                )),
        )
        .with_state(state)
}

/// A backend serving in the background until `shutdown` is called
pub struct RunningServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Serve `router` on an already bound listener
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener's local address is unavailable.
    pub fn spawn(listener: TcpListener, router: Router) -> std::io::Result<Self> {
        let addr = listener.local_addr()?;
        let (shutdown, signal) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    signal.await.ok();
                })
                .await
        });

        tracing::info!(%addr, "Mock todo backend listening");
        Ok(Self {
            addr,
            shutdown,
            handle,
        })
    }

    /// Bind an ephemeral port on `host` (a name or an IP) and serve `router` there
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `host` does not resolve or cannot be bound.
    pub async fn bind_ephemeral(host: &str, router: Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind((host, 0)).await?;
        Self::spawn(listener, router)
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://host:port` of the running server
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections and wait for in-flight requests
    ///
    /// # Errors
    ///
    /// Returns an error if the server task failed or panicked.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        // the receiver is gone only if the server already stopped
        let _ = self.shutdown.send(());
        self.handle.await??;
        tracing::info!(addr = %self.addr, "Mock todo backend stopped");
        Ok(())
    }
}

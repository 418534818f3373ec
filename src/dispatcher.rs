//! Front door of the service.
//!
//! The router and the store behind it are built on the first request (or on
//! an explicit [`Dispatcher::router`] call at startup) and reused afterwards.
//! A [`OnceCell`] guards construction, so concurrent first requests wait on a
//! single initializer instead of each opening their own pool.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::Response,
    Router,
};
use tokio::sync::OnceCell;
use tower::ServiceExt;
use tracing::{error, info};

use crate::{app::build_app, config::AppConfig, db::Connector, state::AppState};

#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    config: AppConfig,
    connector: Box<dyn Connector>,
    router: OnceCell<Router>,
}

impl Dispatcher {
    pub fn new<C: Connector + 'static>(config: AppConfig, connector: C) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                connector: Box::new(connector),
                router: OnceCell::new(),
            }),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.inner.router.initialized()
    }

    /// Returns the router, building it first if nobody has yet.
    pub async fn try_router(&self) -> anyhow::Result<&Router> {
        self.inner
            .router
            .get_or_try_init(|| async {
                info!("initializing router and database connection");
                let store = self.inner.connector.connect(&self.inner.config).await?;
                Ok::<_, anyhow::Error>(build_app(AppState::new(store)))
            })
            .await
    }

    /// Like [`Dispatcher::try_router`], but a failed initialization ends the process.
    pub async fn router(&self) -> Router {
        match self.try_router().await {
            Ok(router) => router.clone(),
            Err(e) => {
                error!(error = %format!("{e:#}"), "failed to initialize; aborting");
                std::process::exit(1);
            }
        }
    }

    pub fn into_service(self) -> Router {
        Router::new().fallback(dispatch).with_state(self)
    }
}

async fn dispatch(State(dispatcher): State<Dispatcher>, req: Request) -> Response {
    match dispatcher.router().await.oneshot(req).await {
        Ok(res) => res,
        Err(never) => match never {},
    }
}

//! Exact-match routing table.
//!
//! The table maps method to path to handler. It is read on every request and
//! written only when a handler is registered, so it lives behind an
//! [`ArcSwap`]: dispatch loads the current snapshot without locking and
//! registration publishes a modified copy. Two registrations for the same
//! method and path keep the last one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use nano_http::handler::{Handler, ResponseSink};
use nano_http::protocol::{write_bad_request, write_not_found, Request, SendError};
use tracing::{debug, info};

type PathTable = HashMap<String, Arc<dyn Handler>>;
type MethodTable = HashMap<String, PathTable>;

/// Routing table shared by every connection worker.
#[derive(Default)]
pub struct Router {
    routes: ArcSwap<MethodTable>,
}

/// Outcome of looking up a method and path.
#[derive(Clone)]
pub enum Route {
    /// Method and path are both registered.
    Found(Arc<dyn Handler>),
    /// Nothing at all is registered for the method.
    UnknownMethod,
    /// The method is known but the path is not registered under it.
    UnknownPath,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method` and `path`, replacing any previous one.
    ///
    /// May be called while requests are being dispatched.
    pub fn register<H>(&self, method: impl Into<String>, path: impl Into<String>, handler: H)
    where
        H: Handler + 'static,
    {
        let method = method.into();
        let path = path.into();
        let handler: Arc<dyn Handler> = Arc::new(handler);

        self.routes.rcu(|routes| {
            let mut routes = MethodTable::clone(routes);
            routes.entry(method.clone()).or_default().insert(path.clone(), Arc::clone(&handler));
            routes
        });

        info!(method = %method, path = %path, "new handler registered");
    }

    /// Looks up the handler for `method` and `path`, both compared for exact equality.
    pub fn route(&self, method: &str, path: &str) -> Route {
        let routes = self.routes.load();
        let Some(paths) = routes.get(method) else {
            return Route::UnknownMethod;
        };

        match paths.get(path) {
            Some(handler) => Route::Found(Arc::clone(handler)),
            None => Route::UnknownPath,
        }
    }

    pub fn contains(&self, method: &str, path: &str) -> bool {
        matches!(self.route(method, path), Route::Found(_))
    }

    /// Number of registered (method, path) pairs.
    pub fn len(&self) -> usize {
        self.routes.load().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatches `request` by its own method and path.
    pub async fn dispatch(&self, request: &Request, out: &mut ResponseSink<'_>) -> Result<(), SendError> {
        self.dispatch_to(request.method(), request.path(), request, out).await
    }

    /// Invokes the handler registered for `method` and `path`.
    ///
    /// An unknown method is answered with `400 Bad Request`, an unknown path
    /// under a known method with `404 Not Found`. Errors raised by the handler
    /// are returned unchanged.
    pub async fn dispatch_to(&self, method: &str, path: &str, request: &Request, out: &mut ResponseSink<'_>) -> Result<(), SendError> {
        match self.route(method, path) {
            Route::Found(handler) => {
                debug!(method, path, "handler found");
                handler.handle(request, out).await
            }
            Route::UnknownMethod => {
                info!(method, path, "no handler registered for method, sending bad request");
                write_bad_request(out).await
            }
            Route::UnknownPath => {
                info!(method, path, "no handler registered for path, sending not found");
                write_not_found(out).await
            }
        }
    }
}

#[async_trait]
impl Handler for Router {
    async fn handle(&self, request: &Request, out: &mut ResponseSink<'_>) -> Result<(), SendError> {
        self.dispatch(request, out).await
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let routes = self.routes.load();
        let mut entries = routes.iter().flat_map(|(method, paths)| paths.keys().map(move |path| (method, path))).collect::<Vec<_>>();
        entries.sort();
        f.debug_struct("Router").field("routes", &entries).finish()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(_) => f.write_str("Found"),
            Self::UnknownMethod => f.write_str("UnknownMethod"),
            Self::UnknownPath => f.write_str("UnknownPath"),
        }
    }
}

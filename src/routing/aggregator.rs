// Route aggregator: owns the binding table and forwards requests by prefix

use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::{OriginalUri, Request},
    http::uri::{Parts, PathAndQuery, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tower::{Service, ServiceExt};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::routing::{
    binding::{MatchMode, MountContext, Prefix, RouteBinding, Visibility},
    error::RouteError,
    group::HandlerGroup,
};

/// Collects bindings before the table is frozen into a [`RouteAggregator`].
///
/// Every group router is given the shared state `S` at registration time, so
/// the finished table only holds stateless services.
pub struct AggregatorBuilder<S> {
    state: S,
    mode: MatchMode,
    bindings: Vec<RouteBinding>,
}

impl<S> AggregatorBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(state: S, mode: MatchMode) -> Self {
        Self {
            state,
            mode,
            bindings: Vec::new(),
        }
    }

    /// Adds a binding. A rejected registration leaves the table untouched.
    pub fn register(
        &mut self,
        prefix: &str,
        visibility: Visibility,
        group: &dyn HandlerGroup<S>,
    ) -> Result<&mut Self, RouteError> {
        let prefix: Prefix = Prefix::parse(prefix)?;

        if let Some(existing) = self
            .bindings
            .iter()
            .find(|binding| binding.prefix.same_as(&prefix, self.mode))
        {
            return Err(RouteError::DuplicatePrefix {
                prefix: prefix.to_string(),
                existing_group: existing.group.clone(),
            });
        }

        let service: Router = group.routes().with_state(self.state.clone());

        info!(
            prefix = %prefix,
            group = group.name(),
            visibility = %visibility,
            "Registered route binding"
        );

        self.bindings.push(RouteBinding {
            prefix,
            group: group.name().to_string(),
            visibility,
            service,
        });

        Ok(self)
    }

    /// Chainable form of [`AggregatorBuilder::register`].
    pub fn mount(
        mut self,
        prefix: &str,
        visibility: Visibility,
        group: &dyn HandlerGroup<S>,
    ) -> Result<Self, RouteError> {
        self.register(prefix, visibility, group)?;
        Ok(self)
    }

    pub fn build(self) -> RouteAggregator {
        RouteAggregator {
            bindings: self.bindings.into(),
            mode: self.mode,
        }
    }
}

/// Immutable prefix dispatcher. Cloning is cheap: the table is shared.
#[derive(Debug, Clone)]
pub struct RouteAggregator {
    bindings: Arc<[RouteBinding]>,
    mode: MatchMode,
}

impl RouteAggregator {
    pub fn builder<S>(state: S) -> AggregatorBuilder<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        AggregatorBuilder::new(state, MatchMode::default())
    }

    pub fn bindings(&self) -> &[RouteBinding] {
        &self.bindings
    }

    /// Finds the first registered binding whose prefix is a segment-aligned
    /// ancestor of `path`, together with the effective path for that group.
    pub fn resolve<'p>(&self, path: &'p str) -> Option<(&RouteBinding, &'p str)> {
        self.bindings.iter().find_map(|binding| {
            binding
                .prefix
                .strip(path, self.mode)
                .map(|effective| (binding, effective))
        })
    }

    /// Forwards the request to the matching group with the prefix removed.
    pub async fn dispatch(&self, mut request: Request) -> Result<Response, RouteError> {
        let original_uri: Uri = request.uri().clone();

        let Some((binding, effective_path)) = self.resolve(original_uri.path()) else {
            info!(path = original_uri.path(), "No route binding matches request");
            return Err(RouteError::NotFound {
                path: original_uri.path().to_string(),
            });
        };

        let request_id: Uuid = Uuid::new_v4();
        let span: tracing::Span = info_span!(
            "dispatch",
            %request_id,
            group = %binding.group,
            prefix = %binding.prefix,
        );

        *request.uri_mut() = rewrite_uri(&original_uri, effective_path)?;

        debug!(
            parent: &span,
            method = %request.method(),
            original = %original_uri,
            effective = %request.uri(),
            "Dispatching to handler group"
        );

        if request.extensions().get::<OriginalUri>().is_none() {
            request
                .extensions_mut()
                .insert(OriginalUri(original_uri.clone()));
        }
        request.extensions_mut().insert(MountContext {
            request_id,
            group: binding.group.clone(),
            prefix: binding.prefix.clone(),
            visibility: binding.visibility,
            original_uri,
        });

        let response: Response = binding
            .service
            .clone()
            .oneshot(request)
            .instrument(span)
            .await
            .unwrap_or_else(|never: Infallible| match never {});

        Ok(response)
    }
}

/// Replaces the path of `uri` with `effective_path`, keeping the query string.
fn rewrite_uri(uri: &Uri, effective_path: &str) -> Result<Uri, RouteError> {
    let invalid = || RouteError::InvalidUri {
        uri: uri.to_string(),
    };

    let path_and_query: String = match uri.query() {
        Some(query) => format!("{effective_path}?{query}"),
        None => effective_path.to_string(),
    };

    let mut parts: Parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).map_err(|_| invalid())?);

    Uri::from_parts(parts).map_err(|_| invalid())
}

// Lets the aggregator sit directly under an axum Router as its fallback service
impl Service<Request> for RouteAggregator {
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let aggregator: RouteAggregator = self.clone();

        Box::pin(async move {
            Ok(match aggregator.dispatch(request).await {
                Ok(response) => response,
                Err(err) => err.into_response(),
            })
        })
    }
}

//! The middleware pipeline.
//!
//! ## Execution protocol
//!
//! ```text
//! event ─▶ before hooks ─▶ handler ─▶ after hooks ─▶ Ok(response)
//!              │              │
//!              └──── Err ─────┴─▶ error interceptor ─▶ Err(failure + response)
//! ```
//!
//! 1. A fresh [`MiddlewareContext`] is built from the event; no response.
//! 2. Before hooks run in registration order.
//! 3. The handler runs; its result becomes the attached response.
//! 4. If step 2 or 3 fails, the interceptor attaches a response and the
//!    original failure is returned alongside it. After hooks do not run.
//! 5. On success, after hooks run in registration order and may mutate
//!    the response. An after-hook failure is returned as is; no further
//!    hooks run.
//! 6. The (possibly mutated) response is returned.

use crate::context::MiddlewareContext;
use crate::middleware::{ErrorInterceptor, Handler, Middleware};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;
use things_core::{ApiEvent, ApiResponse, HandlerError, InvocationContext};
use tracing::{debug, warn};

/// A type-erased hook that can be stored in a vector.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// A failed invocation.
///
/// `response` holds whatever the error interceptor attached, so the
/// runtime can surface it instead of treating the invocation as crashed.
#[derive(Debug, Error)]
#[error("invocation failed: {error}")]
pub struct InvocationFailure {
    /// The original failure.
    #[source]
    pub error: HandlerError,

    /// The response assembled by the error interceptor, if one ran.
    pub response: Option<ApiResponse>,
}

impl InvocationFailure {
    /// Creates a failure.
    #[must_use]
    pub fn new(error: HandlerError, response: Option<ApiResponse>) -> Self {
        Self { error, response }
    }
}

/// A handler wrapped with ordered hooks and one error interceptor.
///
/// # Example
///
/// ```
/// use things_core::{ApiEvent, ApiResponse, InvocationContext};
/// use things_middleware::{handler_fn, FnMiddleware, Pipeline};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let pipeline = Pipeline::new(handler_fn(|_event, _ctx| async {
///     Ok(ApiResponse::new(http::StatusCode::OK))
/// }))
/// .before(FnMiddleware::new("noop", |_ctx| Ok(())));
///
/// let response = pipeline
///     .invoke(ApiEvent::new("GET", "/things"), InvocationContext::mock())
///     .await
///     .unwrap();
/// assert_eq!(response.status_code, 200);
/// # }
/// ```
pub struct Pipeline {
    handler: Arc<dyn Handler>,
    before: Vec<BoxedMiddleware>,
    after: Vec<BoxedMiddleware>,
    interceptor: Option<Arc<dyn ErrorInterceptor>>,
}

impl Pipeline {
    /// Wraps `handler` with no hooks.
    #[must_use]
    pub fn new<H: Handler>(handler: H) -> Self {
        Self::from_arc(Arc::new(handler))
    }

    /// Wraps an already shared handler.
    #[must_use]
    pub fn from_arc(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            before: Vec::new(),
            after: Vec::new(),
            interceptor: None,
        }
    }

    /// Registers a before hook.
    #[must_use]
    pub fn before<M: Middleware>(mut self, middleware: M) -> Self {
        self.before.push(Arc::new(middleware));
        self
    }

    /// Registers an after hook.
    #[must_use]
    pub fn after<M: Middleware>(mut self, middleware: M) -> Self {
        self.after.push(Arc::new(middleware));
        self
    }

    /// Registers the error interceptor. A later registration replaces an
    /// earlier one.
    #[must_use]
    pub fn on_error<I: ErrorInterceptor>(mut self, interceptor: I) -> Self {
        if let Some(previous) = &self.interceptor {
            debug!(
                replaced = previous.name(),
                interceptor = interceptor.name(),
                "Replacing error interceptor"
            );
        }
        self.interceptor = Some(Arc::new(interceptor));
        self
    }

    /// Returns the before-hook names in run order.
    #[must_use]
    pub fn before_names(&self) -> Vec<&'static str> {
        self.before.iter().map(|m| m.name()).collect()
    }

    /// Returns the after-hook names in run order.
    #[must_use]
    pub fn after_names(&self) -> Vec<&'static str> {
        self.after.iter().map(|m| m.name()).collect()
    }

    /// Returns the registered interceptor's name.
    #[must_use]
    pub fn interceptor_name(&self) -> Option<&'static str> {
        self.interceptor.as_ref().map(|i| i.name())
    }

    /// Runs one invocation through the pipeline.
    pub async fn invoke(
        &self,
        event: ApiEvent,
        invocation: InvocationContext,
    ) -> Result<ApiResponse, InvocationFailure> {
        let mut ctx = MiddlewareContext::new(event, invocation);

        if let Err(error) = self.run_handler(&mut ctx).await {
            return Err(self.intercept(ctx, error).await);
        }

        for hook in &self.after {
            if let Err(error) = hook.process(&mut ctx).await {
                warn!(hook = hook.name(), error = %error, "After hook failed");
                return Err(InvocationFailure::new(error, None));
            }
        }

        ctx.take_response().ok_or_else(|| {
            InvocationFailure::new(HandlerError::internal("no response attached"), None)
        })
    }

    async fn run_handler(&self, ctx: &mut MiddlewareContext) -> Result<(), HandlerError> {
        for hook in &self.before {
            hook.process(ctx).await.map_err(|error| {
                warn!(hook = hook.name(), error = %error, "Before hook failed");
                error
            })?;
        }

        let response = AssertUnwindSafe(self.handler.call(&ctx.event, ctx.invocation()))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(HandlerError::Panic(panic_message(payload.as_ref()))))?;

        ctx.set_response(response);
        Ok(())
    }

    async fn intercept(&self, mut ctx: MiddlewareContext, error: HandlerError) -> InvocationFailure {
        ctx.set_error(error);

        if let Some(interceptor) = &self.interceptor {
            interceptor.intercept(&mut ctx).await;
        }

        let error = ctx
            .take_error()
            .unwrap_or_else(|| HandlerError::internal("failure detached by error interceptor"));
        let response = if self.interceptor.is_some() {
            ctx.take_response()
        } else {
            None
        };

        InvocationFailure::new(error, response)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("before", &self.before_names())
            .field("after", &self.after_names())
            .field("interceptor", &self.interceptor_name())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

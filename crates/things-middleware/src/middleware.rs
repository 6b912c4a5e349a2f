//! Hook, interceptor and handler traits.
//!
//! Before and after hooks share the [`Middleware`] trait; which side of the
//! handler a hook runs on is decided at registration. The pipeline has
//! exactly one [`ErrorInterceptor`] and wraps exactly one [`Handler`].

use crate::context::MiddlewareContext;
use std::future::Future;
use std::pin::Pin;
use things_core::{ApiEvent, ApiResponse, HandlerError, InvocationContext};

/// A boxed future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A before or after hook.
///
/// A hook may read or mutate the context. Returning an error stops the
/// pipeline: before-hook failures go to the error interceptor, after-hook
/// failures go straight to the caller.
///
/// # Example
///
/// ```
/// use things_middleware::{BoxFuture, Middleware, MiddlewareContext};
/// use things_core::HandlerError;
///
/// struct Stamp;
///
/// impl Middleware for Stamp {
///     fn name(&self) -> &'static str {
///         "stamp"
///     }
///
///     fn process<'a>(&'a self, ctx: &'a mut MiddlewareContext) -> BoxFuture<'a, Result<(), HandlerError>> {
///         Box::pin(async move {
///             if let Some(response) = ctx.response_mut() {
///                 response.headers.get_or_insert_with(Default::default).insert("x-stamp".into(), "1".into());
///             }
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// Returns the name of this hook, used in logs.
    fn name(&self) -> &'static str;

    /// Runs the hook.
    fn process<'a>(&'a self, ctx: &'a mut MiddlewareContext) -> BoxFuture<'a, Result<(), HandlerError>>;
}

/// The single hook run when a before hook or the handler fails.
///
/// The failure is available through [`MiddlewareContext::error`]. The
/// interceptor's job is to attach a well-formed response.
pub trait ErrorInterceptor: Send + Sync + 'static {
    /// Returns the name of this interceptor, used in logs.
    fn name(&self) -> &'static str;

    /// Attaches a response for the failure in `ctx`.
    fn intercept<'a>(&'a self, ctx: &'a mut MiddlewareContext) -> BoxFuture<'a, ()>;
}

/// The base handler a pipeline wraps.
pub trait Handler: Send + Sync + 'static {
    /// Handles one event.
    fn call<'a>(
        &'a self,
        event: &'a ApiEvent,
        ctx: &'a InvocationContext,
    ) -> BoxFuture<'a, Result<ApiResponse, HandlerError>>;
}

/// A hook built from a synchronous closure.
///
/// # Example
///
/// ```
/// use things_middleware::FnMiddleware;
///
/// let hook = FnMiddleware::new("noop", |_ctx| Ok(()));
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a new function-based hook.
    pub fn new(name: &'static str, func: F) -> Self
    where
        F: Fn(&mut MiddlewareContext) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&mut MiddlewareContext) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn process<'a>(&'a self, ctx: &'a mut MiddlewareContext) -> BoxFuture<'a, Result<(), HandlerError>> {
        let result = (self.func)(ctx);
        Box::pin(async move { result })
    }
}

/// A handler built from an async closure over owned inputs.
///
/// # Example
///
/// ```
/// use things_core::ApiResponse;
/// use things_middleware::handler_fn;
///
/// let handler = handler_fn(|_event, _ctx| async {
///     Ok(ApiResponse::new(http::StatusCode::NO_CONTENT))
/// });
/// ```
pub struct FnHandler<F> {
    func: F,
}

/// Wraps an async closure as a [`Handler`].
pub fn handler_fn<F, Fut>(func: F) -> FnHandler<F>
where
    F: Fn(ApiEvent, InvocationContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ApiResponse, HandlerError>> + Send + 'static,
{
    FnHandler { func }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(ApiEvent, InvocationContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ApiResponse, HandlerError>> + Send + 'static,
{
    fn call<'a>(
        &'a self,
        event: &'a ApiEvent,
        ctx: &'a InvocationContext,
    ) -> BoxFuture<'a, Result<ApiResponse, HandlerError>> {
        Box::pin((self.func)(event.clone(), ctx.clone()))
    }
}

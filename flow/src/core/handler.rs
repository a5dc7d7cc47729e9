// flow/src/core/handler.rs

use crate::core::context_data::ContextData;
use crate::core::control::FlowControl;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by a [`Handler`].
pub type HandlerFuture<Err> = Pin<Box<dyn Future<Output = Result<FlowControl, Err>> + Send>>;

/// A step handler.
///
/// Takes a clone of the shared context and resolves to a [`FlowControl`].
/// Handlers lock the context (`.read()` / `.write()`) only between awaits.
pub type Handler<TData, Err> = Box<dyn Fn(ContextData<TData>) -> HandlerFuture<Err> + Send + Sync>;

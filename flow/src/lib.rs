// flow/src/lib.rs

//! A small asynchronous, named-step workflow engine.
//!
//! Marketplace operations that need several remote calls in a fixed order
//! (create an account, then a profile, then a role record; create a delivery,
//! then mark the order as taken) are written as a [`Workflow`]:
//!  - Ordered, named steps with `before`/`on`/`after` handlers.
//!  - Optional steps and per-step `skip_if` conditions.
//!  - Early stopping via [`FlowControl::Stop`].
//!  - Shared, lockable context through [`ContextData`].
//!  - A type-keyed [`FlowRegistry`] that runs the workflow registered for a context type.

pub mod core;
pub mod error;
pub mod registry;
pub mod workflow;

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{FlowControl, FlowOutcome};
pub use crate::core::handler::Handler;
pub use crate::core::step::{SkipCondition, StepDef};

pub use crate::workflow::Workflow;

pub use crate::error::{FlowError, FlowResult};

pub use crate::registry::FlowRegistry;

/*
    Typical use:
    1. Define a context struct `SignupCtx` holding inputs and the values later steps fill in.
    2. Create a `Workflow<SignupCtx, AppError>` with its step list.
    3. Attach handlers with `.on("step", ...)` (and `.before` / `.after` where needed).
    4. Register the workflow once in a `FlowRegistry<AppError>`.
    5. Per request, wrap a fresh `SignupCtx` in `ContextData::new` and call `registry.run(ctx.clone()).await`,
       then read the results back out of `ctx`.
*/

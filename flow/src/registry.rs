// flow/src/registry.rs

//! `FlowRegistry<E>`: holds one workflow per context type and runs the right
//! one for a given `ContextData<T>`.

use crate::core::context_data::ContextData;
use crate::core::control::FlowOutcome;
use crate::error::{FlowError, FlowResult};
use crate::workflow::Workflow;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

#[async_trait]
trait AnyWorkflowRunner<E>: Send + Sync
where
  E: std::error::Error + Send + Sync + 'static,
{
  /// `ctx_obj` must be a boxed `ContextData<TData>` of the wrapped workflow's type.
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> FlowResult<FlowOutcome, E>;
}

struct WorkflowRunner<TData, E>
where
  TData: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  workflow: Workflow<TData, E>,
}

#[async_trait]
impl<TData, E> AnyWorkflowRunner<E> for WorkflowRunner<TData, E>
where
  TData: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> FlowResult<FlowOutcome, E> {
    let ctx_data = match ctx_obj.downcast::<ContextData<TData>>() {
      Ok(boxed) => *boxed,
      Err(_) => {
        let expected_type = std::any::type_name::<ContextData<TData>>();
        event!(Level::ERROR, %expected_type, "Context object type mismatch.");
        return Err(E::from(FlowError::TypeMismatch {
          step_name: "registry_dispatch".to_string(),
          expected_type: expected_type.to_string(),
        }));
      }
    };
    self.workflow.run(ctx_data).await
  }
}

/// Type-keyed workflow registry.
pub struct FlowRegistry<E = FlowError>
where
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  runners: Mutex<HashMap<TypeId, Arc<dyn AnyWorkflowRunner<E>>>>,
}

impl<E> FlowRegistry<E>
where
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      runners: Mutex::new(HashMap::new()),
    }
  }

  /// Registers `workflow` for context type `TData`, replacing any earlier one.
  pub fn register<TData>(&self, workflow: Workflow<TData, E>)
  where
    TData: 'static + Send + Sync,
  {
    event!(Level::DEBUG, context_type = %std::any::type_name::<TData>(), "Registering workflow.");
    self
      .runners
      .lock()
      .insert(TypeId::of::<TData>(), Arc::new(WorkflowRunner { workflow }));
  }

  pub fn is_registered<TData: 'static>(&self) -> bool {
    self.runners.lock().contains_key(&TypeId::of::<TData>())
  }

  /// Runs the workflow registered for `TData`.
  ///
  /// Fails with [`FlowError::ConfigurationError`] (converted into `E`) when nothing is registered.
  pub async fn run<TData>(&self, ctx_data: ContextData<TData>) -> FlowResult<FlowOutcome, E>
  where
    TData: 'static + Send + Sync,
  {
    let context_type = std::any::type_name::<TData>();
    // Clone the Arc out so the lock is released before awaiting.
    let runner = self.runners.lock().get(&TypeId::of::<TData>()).cloned();

    match runner {
      Some(runner) => {
        event!(Level::DEBUG, %context_type, "Running registered workflow.");
        runner.run_erased(Box::new(ctx_data)).await
      }
      None => {
        event!(Level::ERROR, %context_type, "No workflow registered for context type.");
        Err(E::from(FlowError::ConfigurationError {
          step_name: "registry_lookup".to_string(),
          message: format!("no workflow registered for context type {}", context_type),
        }))
      }
    }
  }
}

impl<E> Default for FlowRegistry<E>
where
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

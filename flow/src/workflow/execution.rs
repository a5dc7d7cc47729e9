// flow/src/workflow/execution.rs

use crate::core::context_data::ContextData;
use crate::core::control::{FlowControl, FlowOutcome};
use crate::error::{FlowError, FlowResult};
use crate::workflow::definition::{Phase, Workflow};
use tracing::{event, instrument, Instrument, Level};

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// Returns `Stopped` as soon as a handler asks to stop and the first
  /// handler error as-is. A non-optional step with no handlers at all fails
  /// with [`FlowError::HandlerMissing`].
  #[instrument(
    name = "Workflow::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> FlowResult<FlowOutcome, Err> {
    event!(Level::DEBUG, "Workflow starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let step_span = tracing::info_span!("workflow_step", step_name, step_index = step_idx, optional = step_def.optional);

      if let Some(skip_if) = &step_def.skip_if {
        if skip_if(ctx_data.clone()) {
          event!(parent: &step_span, Level::INFO, "Step skipped by its skip condition.");
          continue;
        }
      }

      let has_handlers = Phase::ALL
        .iter()
        .any(|phase| !self.handlers_for(step_name, *phase).is_empty());
      if !has_handlers {
        if step_def.optional {
          event!(parent: &step_span, Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(parent: &step_span, Level::ERROR, "Non-optional step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      for phase in Phase::ALL {
        let control = self
          .run_phase(step_name, phase, &ctx_data)
          .instrument(step_span.clone())
          .await?;
        if control == FlowControl::Stop {
          event!(parent: &step_span, Level::INFO, phase = phase.as_str(), "Workflow stopped by a handler.");
          return Ok(FlowOutcome::Stopped);
        }
      }
    }

    event!(Level::DEBUG, "Workflow completed.");
    Ok(FlowOutcome::Completed)
  }

  async fn run_phase(&self, step_name: &str, phase: Phase, ctx_data: &ContextData<TData>) -> FlowResult<FlowControl, Err> {
    for (handler_idx, handler_fn) in self.handlers_for(step_name, phase).iter().enumerate() {
      match handler_fn(ctx_data.clone()).await {
        Ok(FlowControl::Continue) => {}
        Ok(FlowControl::Stop) => return Ok(FlowControl::Stop),
        Err(e) => {
          event!(Level::ERROR, phase = phase.as_str(), handler_index = handler_idx, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(FlowControl::Continue)
  }
}

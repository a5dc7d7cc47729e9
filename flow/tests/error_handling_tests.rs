// tests/error_handling_tests.rs
mod common;

use agromart_flow::{ContextData, FlowOutcome, Workflow};
use common::*;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_handler_error_stops_remaining_steps() {
  setup_tracing();
  let mut workflow = Workflow::<TestContext, TestError>::new(&[
    ("good_step", false, None),
    ("bad_step", false, None),
    ("another_step", false, None),
  ]);

  workflow.on("good_step", create_simple_handler("good_step", "Good"));
  workflow.on("bad_step", create_failing_handler("bad_step", "I am a bad step!"));
  workflow.on("another_step", create_simple_handler("another_step", "NeverRun"));

  let ctx = ContextData::new(TestContext::default());
  let result = workflow.run(ctx.clone()).await;

  assert_eq!(result.unwrap_err(), TestError::Handler("I am a bad step!".to_string()));
  let guard = ctx.read();
  assert_eq!(guard.counter, 1);
  assert_eq!(guard.message, "Good");
  assert_eq!(guard.steps_executed, vec!["good_step", "bad_step"]);
}

#[tokio::test]
#[serial]
async fn test_error_in_after_phase_surfaces_after_on_ran() {
  setup_tracing();
  let mut workflow = Workflow::<TestContext, TestError>::new(&[("step", false, None)]);
  workflow.on("step", create_simple_handler("on", "ran"));
  workflow.after("step", create_failing_handler("after", "post-check failed"));

  let ctx = ContextData::new(TestContext::default());
  let err = workflow.run(ctx.clone()).await.unwrap_err();

  assert_eq!(err, TestError::Handler("post-check failed".to_string()));
  assert_eq!(ctx.read().message, "ran");
}

#[tokio::test]
#[serial]
async fn test_missing_handler_on_required_step_fails() {
  setup_tracing();
  let mut workflow = Workflow::<TestContext, TestError>::new(&[("first", false, None), ("required", false, None)]);
  workflow.on("first", create_simple_handler("first", "1"));

  let ctx = ContextData::new(TestContext::default());
  let err = workflow.run(ctx.clone()).await.unwrap_err();

  match err {
    TestError::Flow(msg) => {
      assert!(msg.contains("HandlerMissing"), "unexpected message: {}", msg);
      assert!(msg.contains("required"));
    }
    other => panic!("Expected TestError::Flow, got {:?}", other),
  }
  assert_eq!(ctx.read().message, "1");
}

#[tokio::test]
#[serial]
async fn test_empty_workflow_completes() {
  setup_tracing();
  let workflow = Workflow::<TestContext, TestError>::new(&[]);
  let result = workflow.run(ContextData::new(TestContext::default())).await;
  assert_eq!(result.unwrap(), FlowOutcome::Completed);
}

// tests/registry_tests.rs
mod common;

use agromart_flow::{ContextData, FlowOutcome, FlowRegistry, Workflow};
use common::*;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_registry_runs_workflow_for_context_type() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  let mut workflow = Workflow::<TestContext, TestError>::new(&[("s1", false, None), ("s2", false, None)]);
  workflow.on("s1", create_simple_handler("s1", "x"));
  workflow.on("s2", create_simple_handler("s2", "y"));
  registry.register(workflow);

  let mut other = Workflow::<OtherContext, TestError>::new(&[("visit", false, None)]);
  other.on("visit", |ctx: ContextData<OtherContext>| async move {
    ctx.write().visited = true;
    Ok::<_, TestError>(agromart_flow::FlowControl::Continue)
  });
  registry.register(other);

  assert!(registry.is_registered::<TestContext>());
  assert!(registry.is_registered::<OtherContext>());

  let ctx = ContextData::new(TestContext::default());
  assert_eq!(registry.run(ctx.clone()).await.unwrap(), FlowOutcome::Completed);
  assert_eq!(ctx.read().message, "xy");

  let other_ctx = ContextData::new(OtherContext::default());
  registry.run(other_ctx.clone()).await.unwrap();
  assert!(other_ctx.read().visited);
}

#[tokio::test]
#[serial]
async fn test_registry_run_unregistered_type_fails() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();
  assert!(!registry.is_registered::<TestContext>());

  let err = registry.run(ContextData::new(TestContext::default())).await.unwrap_err();
  match err {
    TestError::Flow(msg) => assert!(msg.contains("no workflow registered")),
    other => panic!("Expected TestError::Flow, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn test_registering_twice_replaces_workflow() {
  setup_tracing();
  let registry = FlowRegistry::<TestError>::new();

  let mut first = Workflow::<TestContext, TestError>::new(&[("s", false, None)]);
  first.on("s", create_simple_handler("s", "first"));
  registry.register(first);

  let mut second = Workflow::<TestContext, TestError>::new(&[("s", false, None)]);
  second.on("s", create_simple_handler("s", "second"));
  registry.register(second);

  let ctx = ContextData::new(TestContext::default());
  registry.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().message, "second");
}

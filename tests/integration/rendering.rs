//! Tracing through a text renderer.

use std::sync::Arc;

use wraptrace::debug::{RenderConfig, TextRenderer};
use wraptrace::engine::{CallPath, TracerConfig, WrapperTracer};
use wraptrace::foundation::{Error, ErrorKind, Object, Value};

fn account() -> Object {
    let proto = Object::with_class("Account")
        .with("currency", "EUR")
        .with_method("validate", |_, args| {
            let amount = args[0].expect_number()?;
            if amount <= 0.0 {
                return Err(Error::thrown("amount must be positive"));
            }
            Ok(Value::Bool(true))
        });
    Object::with_prototype(proto)
        .with("balance", 100)
        .with_method("deposit", |this, args| {
            this.call("validate", args)?;
            let balance = this.get("balance").unwrap_or_default().expect_number()?;
            let next = balance + args[0].expect_number()?;
            this.set("balance", next);
            Ok(Value::from(next))
        })
}

fn traced(renderer: &Arc<TextRenderer>) -> WrapperTracer {
    WrapperTracer::with_config(
        account(),
        Some(renderer.clone()),
        None,
        TracerConfig::isolated(),
    )
}

#[test]
fn skeleton_then_indented_calls() {
    let renderer = Arc::new(TextRenderer::new(
        RenderConfig::default().with_elapsed(false),
    ));
    let tracer = traced(&renderer);
    tracer.call("deposit", &[Value::from(50)]).unwrap();

    let lines = renderer.lines();
    assert_eq!(lines[0], "OBJECT SKELETON: 'Account' [object]");
    assert!(lines.contains(&"  = balance = <number OWN> 100".to_string()));
    assert!(lines.contains(&"  = currency = <string INHERITED> EUR".to_string()));

    let calls: Vec<_> = lines.iter().filter(|l| l.contains(" @ ")).cloned().collect();
    assert_eq!(
        calls,
        vec![
            "  validate ( 50 ) -> true  <function INHERITED>  @ root.deposit.validate",
            "deposit ( 50 ) -> 150  <function OWN>  @ root.deposit",
        ]
    );
}

#[test]
fn failed_calls_are_not_rendered() {
    let renderer = Arc::new(TextRenderer::new(RenderConfig::default().with_skeleton(false)));
    let tracer = traced(&renderer);

    let err = tracer.call("deposit", &[Value::from(-5)]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Thrown(_)));
    assert!(renderer.lines().is_empty());
    assert_eq!(tracer.call_path().path(), "root");
    assert_eq!(tracer.wrapped().get("balance"), Some(Value::from(100)));
}

#[test]
fn renderer_without_destination_is_detached() {
    let broken = Arc::new(TextRenderer::new(RenderConfig::default().with_buffer_size(0)));
    let tracer = traced(&broken);
    assert!(tracer.container().is_none());

    tracer.call("deposit", &[Value::from(1)]).unwrap();
    assert_eq!(tracer.info().len(), 2);

    let working = Arc::new(TextRenderer::new(RenderConfig::default().with_skeleton(false)));
    tracer.set_container(Some(working.clone())).unwrap();
    tracer.call("deposit", &[Value::from(1)]).unwrap();
    assert_eq!(working.lines().len(), 2);

    tracer.set_container(None).unwrap();
    tracer.call("deposit", &[Value::from(1)]).unwrap();
    assert_eq!(working.lines().len(), 2);
}

#[test]
fn indentation_follows_a_custom_separator() {
    let renderer = Arc::new(TextRenderer::new(
        RenderConfig::default()
            .with_skeleton(false)
            .with_elapsed(false)
            .with_labels(false),
    ));
    let tracer = WrapperTracer::with_config(
        account(),
        Some(renderer.clone()),
        None,
        TracerConfig::shared(CallPath::new("main", "::")),
    );
    tracer.call("deposit", &[Value::from(5)]).unwrap();

    assert_eq!(
        renderer.lines(),
        vec![
            "  validate ( 5 ) -> true  @ main::deposit::validate",
            "deposit ( 5 ) -> 105  @ main::deposit",
        ]
    );
}

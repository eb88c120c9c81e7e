//! Integration tests for WrapperTracer
//!
//! Tests behavior preservation, path balance, recording and hooks.

use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;
use wraptrace_engine::{CallPath, TracerConfig, WrapperTracer, hook};
use wraptrace_foundation::{Error, Object, Value};

fn tracer(target: Object) -> WrapperTracer {
    WrapperTracer::with_config(target, None, None, TracerConfig::isolated())
}

fn math() -> Object {
    let proto = Object::with_class("Math").with_method("square", |_, args| {
        let n = args[0].expect_number()?;
        Ok(Value::from(n * n))
    });
    Object::with_prototype(proto)
        .with_method("inc", |_, args| Ok(Value::from(args[0].expect_number()? + 1.0)))
        .with_method("hyp2", |this, args| {
            let a = this.call("square", &args[..1])?.expect_number()?;
            let b = this.call("square", &args[1..2])?.expect_number()?;
            Ok(Value::from(a + b))
        })
        .with_method("fail_inside", |this, _| {
            this.call("inc", &[Value::from(1)])?;
            Err(Error::thrown("late failure"))
        })
}

// =============================================================================
// Behavior Preservation
// =============================================================================

#[test]
fn inc_five_records_everything() {
    let tracer = tracer(math());
    assert_eq!(tracer.call("inc", &[Value::from(5)]).unwrap(), Value::from(6));

    let record = &tracer.info()["inc"];
    assert_eq!(record.path, "root.inc");
    assert_eq!(record.result, Value::from(6));
    assert_eq!(record.args, vec![Value::from(5)]);
    assert_eq!(record.classification.code(), 0);
    assert!(record.elapsed_ms() >= 0.0);
}

#[test]
fn nested_calls_record_their_full_path() {
    let tracer = tracer(math());
    let result = tracer.call("hyp2", &[Value::from(3), Value::from(4)]).unwrap();
    assert_eq!(result, Value::from(25));

    let info = tracer.info();
    assert_eq!(info["hyp2"].path, "root.hyp2");
    assert_eq!(info["square"].path, "root.hyp2.square");
    assert_eq!(info["square"].args, vec![Value::from(4)]);
    assert_eq!(info["square"].classification.code(), 1);
    assert_eq!(tracer.call_path().path(), "root");
}

#[test]
fn failure_after_a_nested_call_keeps_path_balanced() {
    let tracer = tracer(math());
    let err = tracer.call("fail_inside", &[]).unwrap_err();
    assert_eq!(err.thrown_value(), Some(&Value::from("late failure")));
    assert_eq!(tracer.call_path().path(), "root");

    let info = tracer.info();
    assert_eq!(info["inc"].path, "root.fail_inside.inc");
    assert!(!info.contains_key("fail_inside"));
}

#[test]
fn panicking_method_keeps_path_balanced() {
    let target = Object::new().with_method("explode", |_, _| panic!("kaboom"));
    let tracer = tracer(target);
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = tracer.call("explode", &[]);
    }));
    assert!(outcome.is_err());
    assert_eq!(tracer.call_path().path(), "root");
}

#[test]
fn method_names_containing_the_separator_keep_path_balanced() {
    let target = Object::new()
        .with_method("a.b", |_, _| Ok(Value::from(1)))
        .with_method("x.y", |_, _| Err(Error::thrown("nope")));
    let tracer = tracer(target);

    tracer.call("a.b", &[]).unwrap();
    assert_eq!(tracer.info()["a.b"].path, "root.a.b");
    assert_eq!(tracer.call_path().path(), "root");

    for _ in 0..2 {
        assert!(tracer.call("x.y", &[]).is_err());
        assert_eq!(tracer.call_path().path(), "root");
    }
    assert_eq!(tracer.call_path().depth(), 0);
}

// =============================================================================
// Global Path
// =============================================================================

// Serializes every test in this binary that calls through the global path.
static GLOBAL_PATH: Mutex<()> = Mutex::new(());

#[test]
fn default_tracer_records_on_the_global_path() {
    let _lock = GLOBAL_PATH.lock();
    CallPath::global().reset();

    let tracer = WrapperTracer::create(math(), None, None);
    assert_eq!(tracer.call("inc", &[Value::from(5)]).unwrap(), Value::from(6));

    let record = &tracer.info()["inc"];
    assert_eq!(record.path, "root.inc");
    assert_eq!(record.result, Value::from(6));
    assert_eq!(record.args, vec![Value::from(5)]);
    assert_eq!(record.classification.code(), 0);
    assert_eq!(CallPath::global().path(), "root");
}

// =============================================================================
// Hooks
// =============================================================================

#[test]
fn callback_sees_each_call_in_completion_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let tracer = WrapperTracer::with_config(
        math(),
        None,
        Some(hook(move |event| {
            sink.lock().push(format!("{}={}", event.path, event.result));
        })),
        TracerConfig::isolated(),
    );
    tracer.call("hyp2", &[Value::from(1), Value::from(2)]).unwrap();
    assert_eq!(
        *log.lock(),
        vec!["root.hyp2.square=1", "root.hyp2.square=4", "root.hyp2=5"]
    );
    assert!(tracer.callback().is_some());
}

#[test]
fn callback_runs_after_recording() {
    let observed = Arc::new(Mutex::new(None));
    let sink = observed.clone();
    let path = CallPath::default();
    let recorder_slot: Arc<Mutex<Option<wraptrace_engine::TraceRecorder>>> =
        Arc::new(Mutex::new(None));
    let slot = recorder_slot.clone();
    let tracer = WrapperTracer::with_config(
        math(),
        None,
        Some(hook(move |event| {
            let recorded = slot
                .lock()
                .as_ref()
                .and_then(|r| r.get(event.name))
                .map(|r| r.path);
            *sink.lock() = recorded;
        })),
        TracerConfig::shared(path),
    );
    *recorder_slot.lock() = Some(tracer.recorder().clone());

    tracer.call("inc", &[Value::from(0)]).unwrap();
    assert_eq!(observed.lock().as_deref(), Some("root.inc"));
}

// =============================================================================
// Scopes
// =============================================================================

#[test]
fn tracers_on_one_shared_path_see_each_other() {
    let path = CallPath::default();
    let a = WrapperTracer::with_config(math(), None, None, TracerConfig::shared(path.clone()));
    let a_wrapped = a.wrapped().clone();
    let b = WrapperTracer::with_config(
        Object::new().with_method("delegate", move |_, args| a_wrapped.call("inc", args)),
        None,
        None,
        TracerConfig::shared(path.clone()),
    );

    assert_eq!(b.call("delegate", &[Value::from(1)]).unwrap(), Value::from(2));
    assert_eq!(a.info()["inc"].path, "root.delegate.inc");
    assert_eq!(b.info()["delegate"].path, "root.delegate");
}

#[test]
fn isolated_tracers_do_not_see_each_other() {
    let a = tracer(math());
    let a_wrapped = a.wrapped().clone();
    let b = tracer(Object::new().with_method("delegate", move |_, args| {
        a_wrapped.call("inc", args)
    }));

    b.call("delegate", &[Value::from(1)]).unwrap();
    assert_eq!(a.info()["inc"].path, "root.inc");
    assert!(!a.call_path().ptr_eq(b.call_path()));
}

#[test]
fn custom_identifier_prefix() {
    let tracer = WrapperTracer::with_config(
        math(),
        None,
        None,
        TracerConfig::isolated().with_id_prefix("calc"),
    );
    assert!(tracer.id().starts_with("calc-"));
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn wrapped_inc_matches_target(n in -1.0e9f64..1.0e9) {
        let tracer = tracer(math());
        let args = [Value::from(n)];
        let traced = tracer.call("inc", &args).unwrap();
        let direct = tracer.target().call("inc", &args).unwrap();
        prop_assert_eq!(&traced, &direct);
        prop_assert_eq!(&tracer.info()["inc"].result, &direct);
        prop_assert_eq!(tracer.call_path().path(), "root");
    }

    #[test]
    fn last_write_wins(values in prop::collection::vec(-1000i32..1000, 1..10)) {
        let tracer = tracer(math());
        for v in &values {
            tracer.call("inc", &[Value::from(*v)]).unwrap();
        }
        let last = *values.last().unwrap();
        prop_assert_eq!(&tracer.info()["inc"].args, &vec![Value::from(last)]);
        prop_assert_eq!(tracer.info().len(), 1);
    }
}

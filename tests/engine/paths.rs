//! Integration tests for call path tracking
//!
//! Tests nesting, guards and scopes.

use std::thread;

use proptest::prelude::*;
use wraptrace_engine::{CallPath, PathScope};

#[test]
fn guards_nest_and_unwind() {
    let path = CallPath::default();
    let outer = path.enter("a");
    let inner = path.enter("b");
    assert_eq!(path.path(), "root.a.b");
    assert_eq!(path.depth(), 2);
    drop(inner);
    assert_eq!(path.path(), "root.a");
    drop(outer);
    assert_eq!(path.path(), "root");
}

#[test]
fn reset_recovers_from_manual_pushes() {
    let path = CallPath::new("main", "/");
    path.push("x");
    path.push("y");
    assert_eq!(path.path(), "main/x/y");
    path.reset();
    assert_eq!(path.path(), "main");
    assert_eq!(path.pop(), None);
}

#[test]
fn clones_share_state() {
    let path = CallPath::default();
    let other = path.clone();
    other.push("shared");
    assert_eq!(path.last(), "shared");
    assert!(path.ptr_eq(&other));
}

#[test]
fn isolated_paths_are_independent_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let path = PathScope::Isolated.resolve();
                for _ in 0..100 {
                    let _guard = path.enter(&format!("t{i}"));
                    assert_eq!(path.count(), 2);
                }
                path.path()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "root");
    }
}

#[test]
fn global_scope_is_a_singleton() {
    assert!(PathScope::Global.resolve().ptr_eq(&PathScope::Global.resolve()));
}

proptest! {
    #[test]
    fn push_pop_sequences_never_remove_root(ops in prop::collection::vec(any::<bool>(), 0..40)) {
        let path = CallPath::default();
        let mut depth = 0usize;
        for push in ops {
            if push {
                path.push("m");
                depth += 1;
            } else {
                path.pop();
                depth = depth.saturating_sub(1);
            }
            prop_assert_eq!(path.depth(), depth);
        }
        path.reset();
        prop_assert_eq!(path.path(), "root");
    }
}

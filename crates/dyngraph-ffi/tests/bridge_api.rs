//! Integration tests for the safe bridge API over the process-wide graph.
//!
//! All tests in this binary share one graph, so every test uses its own
//! entity and signal names.

use std::sync::Once;

use dyngraph_core::Value;
use dyngraph_ffi::bridge;
use dyngraph_ffi::{DgHandle, ErrorKind, HandleKind};
use dyngraph_test_utils::fixtures::FAULTY_REASON;
use dyngraph_test_utils::{init_test_logging, register_fixtures, scratch_dir};

static FIXTURES: Once = Once::new();

fn setup() {
    init_test_logging();
    FIXTURES.call_once(|| {
        bridge::with_graph(|g| {
            register_fixtures(g.factory_mut());
            Ok(())
        })
        .unwrap();
    });
}

// ── plug ────────────────────────────────────────────────────────────

#[test]
fn plug_then_recompute_yields_producer_value() {
    setup();
    let producer = bridge::create_signal("plug-p", "double").unwrap();
    let consumer = bridge::create_signal("plug-c", "double").unwrap();
    bridge::set_signal_value(producer, "2.5").unwrap();
    bridge::plug(producer, consumer).unwrap();
    assert_eq!(bridge::recompute(consumer, 4).unwrap(), "2.5");
    assert_eq!(bridge::signal_time(consumer).unwrap(), 4);
    assert_eq!(bridge::signal_time(producer).unwrap(), 4);
}

#[test]
fn plug_rejects_non_handles_and_wrong_kinds() {
    setup();
    let s = bridge::create_signal("kinds-s", "int").unwrap();
    let e = bridge::create_entity("Relay", "kinds-e").unwrap();

    let err = bridge::plug(DgHandle::NULL, s).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHandle);
    assert!(err.kind().is_caller_error());

    let err = bridge::plug(e, s).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let forged = DgHandle {
        kind: HandleKind::Signal as u32,
        bits: u64::MAX,
    };
    let err = bridge::plug(s, forged).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHandle);
}

#[test]
fn plug_failure_carries_the_native_message() {
    setup();
    let d = bridge::create_signal("msg-d", "double").unwrap();
    let i = bridge::create_signal("msg-i", "int").unwrap();
    let err = bridge::plug(d, i).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(
        err.message(),
        "cannot plug 'msg-d' (double) into 'msg-i' (int)"
    );
}

#[test]
fn plug_into_an_output_is_refused() {
    setup();
    let e = bridge::create_entity("Adder", "out-e").unwrap();
    let src = bridge::create_signal("out-src", "double").unwrap();
    let sout = bridge::entity_signal(e, "sout").unwrap();
    let err = bridge::plug(src, sout).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert!(err.message().contains("is an output"));
}

#[test]
fn sibling_signals_of_one_entity() {
    setup();
    let e = bridge::create_entity("Relay", "E-scenario").unwrap();
    let a = bridge::entity_signal(e, "a").unwrap();
    let b = bridge::entity_signal(e, "b").unwrap();
    bridge::set_signal_value(a, "11").unwrap();
    bridge::plug(a, b).unwrap();
    let t = 3;
    assert_eq!(
        bridge::recompute(b, t).unwrap(),
        bridge::signal_value(a).unwrap()
    );
}

// ── signals ─────────────────────────────────────────────────────────

#[test]
fn set_then_get_round_trips_without_recompute() {
    setup();
    let v = bridge::create_signal("rt-vec", "Vector").unwrap();
    bridge::set_signal_value(v, "[3](1,2.5,-4)").unwrap();
    assert_eq!(bridge::signal_value(v).unwrap(), "[3](1,2.5,-4)");
    assert_eq!(bridge::signal_time(v).unwrap(), 0);
    assert_eq!(bridge::signal_name(v).unwrap(), "rt-vec");
}

#[test]
fn malformed_values_and_types_are_runtime_errors() {
    setup();
    let s = bridge::create_signal("bad-int", "int").unwrap();
    let err = bridge::set_signal_value(s, "twelve").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(bridge::signal_value(s).unwrap(), "0");

    let err = bridge::create_signal("bad-type", "quaternion").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(err.message(), "unknown signal type 'quaternion'");
}

#[test]
fn unplug_keeps_value_and_reports_unplugged() {
    setup();
    let p = bridge::create_signal("unplug-p", "int").unwrap();
    let c = bridge::create_signal("unplug-c", "int").unwrap();
    bridge::set_signal_value(p, "5").unwrap();
    bridge::plug(p, c).unwrap();
    bridge::recompute(c, 1).unwrap();
    bridge::unplug(c).unwrap();
    bridge::set_signal_value(p, "6").unwrap();
    assert_eq!(bridge::recompute(c, 2).unwrap(), "5");
    assert_eq!(bridge::unplug(c).unwrap_err().kind(), ErrorKind::Runtime);
}

// ── entities ────────────────────────────────────────────────────────

#[test]
fn entity_introspection() {
    setup();
    let e = bridge::create_entity("Gain", "intro").unwrap();
    assert_eq!(bridge::entity_name(e).unwrap(), "intro");
    assert_eq!(bridge::entity_class_name(e).unwrap(), "Gain");
    assert_eq!(
        bridge::entity_signal_names(e).unwrap(),
        vec!["sin", "gain", "sout"]
    );
    assert_eq!(
        bridge::command_names(e).unwrap(),
        vec!["setGain", "getGain"]
    );
    assert!(bridge::command_docstring(e, "getGain")
        .unwrap()
        .starts_with("Return the current gain."));
    let listing = bridge::entity_display_signals(e).unwrap();
    assert!(listing.starts_with("Gain(intro)::input(double)::sin"));
    assert_eq!(listing.lines().count(), 3);
}

#[test]
fn commands_run_with_typed_and_text_arguments() {
    setup();
    let e = bridge::create_entity("Gain", "cmd-gain").unwrap();
    bridge::execute_command(e, "setGain", &[Value::Int(4)]).unwrap();
    assert_eq!(
        bridge::execute_command(e, "getGain", &[]).unwrap(),
        Value::Double(4.0)
    );
    assert_eq!(bridge::execute_command_text(e, "setGain", &["0.5"]).unwrap(), "");
    assert_eq!(bridge::execute_command_text(e, "getGain", &[]).unwrap(), "0.5");

    let err = bridge::execute_command_text(e, "getGain", &["extra"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(err.message(), "command 'getGain' takes 0 argument(s), got 1");
}

#[test]
fn failing_command_is_a_runtime_error_with_its_message() {
    setup();
    let e = bridge::create_entity("Faulty", "faulty-bridge").unwrap();
    let err = bridge::execute_command(e, "explode", &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(
        err.message(),
        format!("command 'explode' failed: {FAULTY_REASON}")
    );
}

#[test]
fn destroyed_entity_handles_fail_cleanly() {
    setup();
    let e = bridge::create_entity("Relay", "doomed-bridge").unwrap();
    let a = bridge::entity_signal(e, "a").unwrap();
    bridge::destroy_entity(e).unwrap();
    assert_eq!(
        bridge::entity_name(e).unwrap_err().kind(),
        ErrorKind::InvalidHandle
    );
    assert_eq!(
        bridge::signal_value(a).unwrap_err().kind(),
        ErrorKind::InvalidHandle
    );
    assert_eq!(
        bridge::destroy_entity(e).unwrap_err().kind(),
        ErrorKind::InvalidHandle
    );
}

#[test]
fn registries_list_classes_and_types() {
    setup();
    let classes = bridge::entity_class_names().unwrap();
    assert!(classes.iter().any(|c| c == "Adder"));
    assert!(classes.iter().any(|c| c == "Relay"));
    assert_eq!(
        bridge::signal_type_names().unwrap(),
        vec!["bool", "int", "unsigned", "double", "string", "Vector", "Matrix"]
    );
}

// ── trace ───────────────────────────────────────────────────────────

#[test]
fn trace_open_then_close_succeeds() {
    setup();
    let path = scratch_dir("bridge-trace").join("f.log");
    let file = path.to_str().unwrap();
    bridge::enable_trace(true, file).unwrap();
    bridge::create_entity("Adder", "traced-bridge").unwrap();
    let while_open = std::fs::read_to_string(&path).unwrap();
    assert!(while_open.contains("create Adder(traced-bridge)"));
    bridge::enable_trace(false, file).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("create Adder(traced-bridge)"));
}

#[test]
fn closing_an_unopened_trace_is_io() {
    setup();
    let err = bridge::enable_trace(false, "neverOpened").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.message(), "trace file 'neverOpened' is not open");
}

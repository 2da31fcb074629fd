mod common;
use barebones::lang::ErrorCode;
use barebones::mach::{Event, Interpreter};
use common::*;

#[test]
fn test_straight_line_is_sequential() {
    let vars = interpret("incr a; incr a; clear b; decr b; incr c; clear a; incr a");
    assert_eq!(vars.get("a"), 1);
    assert_eq!(vars.get("b"), -1);
    assert_eq!(vars.get("c"), 1);
}

#[test]
fn test_loop_runs_body_exactly_once() {
    let mut interpreter = Interpreter::from_source("incr x; while x; decr x; incr body; end");
    let vars = interpreter.run().unwrap();
    assert_eq!(vars.get("x"), 0);
    assert_eq!(vars.get("body"), 1);
}

#[test]
fn test_conditional_chain() {
    let chain = "if a; incr b; elif a; incr c; else; incr d; endif";
    let vars = interpret(chain);
    assert_eq!((vars.get("b"), vars.get("c"), vars.get("d")), (0, 0, 1));
    let vars = interpret(&format!("incr a; {}", chain));
    assert_eq!((vars.get("b"), vars.get("c"), vars.get("d")), (1, 0, 0));
}

#[test]
fn test_bare_end_is_structural_error() {
    let error = Interpreter::from_source("end").run().unwrap_err();
    assert_eq!(error.code(), ErrorCode::EndWithoutWhile);
}

#[test]
fn test_comments_and_multiline_source() {
    let source = "# add two numbers;
        clear x; incr x; incr x;
        clear y; incr y;
        # y = y + x;
        while x;
            decr x;
            incr y;
        end;
    ";
    let vars = interpret(source);
    assert_eq!(vars.get("y"), 3);
    assert_eq!(vars.get("x"), 0);
}

#[test]
fn test_trace_events() {
    let mut interpreter = Interpreter::from_source("incr a; incr a");
    interpreter.set_trace(true);
    assert_eq!(interpreter.execute(10), Event::Trace("incr a".into()));
    assert_eq!(interpreter.variables().get("a"), 1);
    assert_eq!(interpreter.execute(10), Event::Trace("incr a".into()));
    assert_eq!(interpreter.execute(10), Event::Stopped);
    assert_eq!(interpreter.variables().to_string(), "a = 2\n");
}

#[test]
fn test_error_reports_line_and_text() {
    let error = Interpreter::from_source("incr a;\nincr a;\n  JUMP a;")
        .run()
        .unwrap_err();
    assert_eq!(error.code(), ErrorCode::SyntaxError);
    assert_eq!(error.line_number(), Some(3));
    assert_eq!(error.instruction(), Some("jump a"));
}

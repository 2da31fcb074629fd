use crate::mach::{Event, Interpreter, Variables};
use crate::lang::Error;


fn run(source: &str) -> Result<Variables, Error> {
    Interpreter::from_source(source).run()
}

fn run_cycles(interpreter: &mut Interpreter, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = interpreter.execute(cycles);
        match &event {
            Event::Stopped => break,
            Event::Errors(error) => s.push_str(&format!("{}\n", error)),
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Trace(text) => {
                s.push_str(&format!("{}\n{}", text, interpreter.variables()));
            }
        }
        prev_running = event == Event::Running;
    }
    s
}

#[test]
fn test_sequential() {
    let vars = run("clear a; incr a; incr a; incr b; decr a").unwrap();
    assert_eq!(vars.get("a"), 1);
    assert_eq!(vars.get("b"), 1);
}

#[test]
fn test_names_are_case_insensitive() {
    let vars = run("INCR Total; incr TOTAL; Decr total").unwrap();
    assert_eq!(vars.get("total"), 1);
    assert_eq!(vars.len(), 1);
}

#[test]
fn test_decr_goes_negative() {
    let vars = run("decr x; decr x").unwrap();
    assert_eq!(vars.get("x"), -2);
}

#[test]
fn test_unparseable_instruction_stops_execution() {
    let mut interpreter = Interpreter::from_source("incr x;\nincr x;\nprint x;\nincr x");
    let error = interpreter.run().unwrap_err();
    assert_eq!(error.to_string(), "SYNTAX ERROR IN 3: print x; UNKNOWN INSTRUCTION");
    assert_eq!(interpreter.variables().get("x"), 2);
}

#[test]
fn test_unreached_bad_statement_is_harmless() {
    let vars = run("if x; frob; endif; incr y").unwrap();
    assert_eq!(vars.get("y"), 1);
}

#[test]
fn test_missing_operand() {
    let error = run("clear").unwrap_err();
    assert_eq!(error.to_string(), "SYNTAX ERROR IN 1: clear; MISSING OPERAND");
}

#[test]
fn test_trace() {
    let mut interpreter = Interpreter::from_source("incr a; # note; incr b");
    interpreter.set_trace(true);
    assert_eq!(
        run_cycles(&mut interpreter, 10),
        "incr a\na = 1\nb = 0\nincr b\na = 1\nb = 1\n"
    );
}

#[test]
fn test_cycles_exceeded_and_interrupt() {
    let mut interpreter = Interpreter::from_source("incr x;\nwhile x;\nincr y;\nend");
    assert_eq!(
        run_cycles(&mut interpreter, 100),
        "100 Execution cycles exceeded.\n"
    );
    interpreter.interrupt();
    match interpreter.execute(100) {
        Event::Errors(error) => assert!(error.to_string().starts_with("BREAK IN ")),
        event => panic!("unexpected {:?}", event),
    }
    assert_eq!(interpreter.execute(100), Event::Stopped);
}

#[test]
fn test_reset() {
    let mut interpreter = Interpreter::from_source("incr x");
    assert_eq!(interpreter.run().unwrap().get("x"), 1);
    assert_eq!(interpreter.run().unwrap().get("x"), 1);
    interpreter.reset();
    assert_eq!(interpreter.run().unwrap().get("x"), 1);
}

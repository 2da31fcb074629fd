#![allow(dead_code)]

use barebones::mach::{compile, Container, Interpreter, Opcode, Program, Record, Variables};

pub fn interpret(source: &str) -> Variables {
    match Interpreter::from_source(source).run() {
        Ok(vars) => vars,
        Err(error) => panic!("{}", error),
    }
}

pub fn compile_str(source: &str) -> Container {
    match compile(&Program::new(source)) {
        Ok(container) => container,
        Err(error) => panic!("{}", error),
    }
}

/// Minimal runner for compiled records. Gives up after `max_steps`.
pub fn run_bytecode(container: &Container, max_steps: usize) -> Option<Vec<i64>> {
    let records = container.records();
    let mut vars = vec![0i64; container.var_count() as usize];
    let mut pc = 0usize;
    for _ in 0..max_steps {
        let record = match records.get(pc / Record::LEN) {
            Some(record) => record,
            None => return Some(vars),
        };
        let slot = record.slot as usize;
        match record.opcode {
            Opcode::Clear => vars[slot] = 0,
            Opcode::Inc => vars[slot] += 1,
            Opcode::Dec => vars[slot] -= 1,
            Opcode::Goto => {
                if vars[slot] != 0 {
                    assert_eq!(record.target as usize % Record::LEN, 0);
                    pc = record.target as usize;
                    continue;
                }
            }
        }
        pc += Record::LEN;
    }
    None
}

/// Both execution paths must leave every named variable with the same value.
pub fn assert_paths_agree(source: &str) {
    let expected = interpret(source);
    let container = compile_str(source);
    let actual = match run_bytecode(&container, 100_000) {
        Some(vars) => vars,
        None => panic!("compiled program did not finish: {}", source),
    };
    for (slot, name) in container.symbols() {
        assert_eq!(
            actual[*slot as usize],
            expected.get(name),
            "variable {} in {}",
            name,
            source
        );
    }
    assert_eq!(container.symbols().len(), expected.len());
}

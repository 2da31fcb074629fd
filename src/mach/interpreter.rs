use super::{Address, Frame, Op, Program, Stack, Variables};
use crate::error;
use crate::lang::{find_next, Error, Keyword, Token};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

const BRANCHES: &[Keyword] = &[Keyword::Elif, Keyword::Else, Keyword::Endif];
const ENDIF: &[Keyword] = &[Keyword::Endif];

/// ## Interpreter events
///
/// `execute` returns after every traced statement, at the end of the
/// program, on error, or when its cycle budget runs out.

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Running,
    Trace(Rc<str>),
    Stopped,
    Errors(Error),
}

/// ## Direct interpreter
///
/// Walks the statements with an instruction pointer and one stack of
/// frames for open loops and if-chains.

#[derive(Debug)]
pub struct Interpreter {
    program: Program,
    vars: Variables,
    frames: Stack<Frame>,
    pc: Address,
    trace: bool,
    done: bool,
    interrupted: bool,
}

impl Interpreter {
    pub fn new(program: Program) -> Interpreter {
        let vars = Variables::new(program.slots());
        Interpreter {
            program,
            vars,
            frames: Stack::new("NESTING TOO DEEP"),
            pc: 0,
            trace: false,
            done: false,
            interrupted: false,
        }
    }

    pub fn from_source(source: &str) -> Interpreter {
        Interpreter::new(Program::new(source))
    }

    /// Report every executed statement with `Event::Trace`.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    /// Start over from the first statement with all variables zero.
    pub fn reset(&mut self) {
        self.vars.clear();
        self.frames.clear();
        self.pc = 0;
        self.done = false;
        self.interrupted = false;
    }

    /// Stop a running program at the next call to `execute`.
    pub fn interrupt(&mut self) {
        if !self.done {
            self.interrupted = true;
        }
    }

    /// Run to completion and return the final variable table.
    pub fn run(&mut self) -> Result<Variables> {
        loop {
            match self.execute(5000) {
                Event::Running | Event::Trace(_) => {}
                Event::Stopped => return Ok(self.vars.clone()),
                Event::Errors(error) => return Err(error),
            }
        }
    }

    /// Execute at most `cycles` statements.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if self.done {
            return Event::Stopped;
        }
        if self.interrupted {
            self.interrupted = false;
            self.done = true;
            let error = match self.program.token(self.pc) {
                Some(token) => error!(Break, token =>),
                None => error!(Break),
            };
            return Event::Errors(error);
        }
        for _ in 0..cycles {
            if self.pc >= self.program.len() {
                self.done = true;
                return Event::Stopped;
            }
            let addr = self.pc;
            match self.step() {
                Ok(false) => {}
                Ok(true) => {
                    if self.trace {
                        if let Some(token) = self.program.token(addr) {
                            return Event::Trace(token.text().into());
                        }
                    }
                }
                Err(error) => {
                    self.done = true;
                    return Event::Errors(error);
                }
            }
        }
        Event::Running
    }

    /// Execute the statement at `pc`. Returns false for blanks and comments.
    fn step(&mut self) -> Result<bool> {
        let addr = self.pc;
        let op = match self.program.op(addr)? {
            Some(op) => op,
            None => {
                self.pc += 1;
                return Ok(false);
            }
        };
        log::trace!("{:>6}  {}", addr, op);
        match op {
            Op::Clear(slot) => {
                self.vars.store(slot, 0);
                self.pc += 1;
            }
            Op::Incr(slot) => {
                let value = match self.vars.fetch(slot).checked_add(1) {
                    Some(value) => value,
                    None => return Err(error!(Overflow, self.token(addr) =>)),
                };
                self.vars.store(slot, value);
                self.pc += 1;
            }
            Op::Decr(slot) => {
                let value = match self.vars.fetch(slot).checked_sub(1) {
                    Some(value) => value,
                    None => return Err(error!(Overflow, self.token(addr) =>)),
                };
                self.vars.store(slot, value);
                self.pc += 1;
            }
            Op::While(slot) => {
                self.push(
                    addr,
                    Frame::Loop {
                        return_to: addr,
                        slot,
                    },
                )?;
                self.pc += 1;
            }
            Op::End => match self.frames.last().copied() {
                Some(Frame::Loop { return_to, slot }) => {
                    if self.vars.fetch(slot) == 0 {
                        self.frames.pop();
                        self.pc += 1;
                    } else {
                        self.pc = return_to + 1;
                    }
                }
                _ => return Err(error!(EndWithoutWhile, self.token(addr) =>)),
            },
            Op::If(slot) => {
                if self.vars.fetch(slot) == 0 {
                    let next = self.find(addr, BRANCHES)?;
                    self.push(addr, Frame::IfChain { resolved: false })?;
                    self.pc = next;
                } else {
                    self.push(addr, Frame::IfChain { resolved: true })?;
                    self.pc += 1;
                }
            }
            Op::Elif(slot) => {
                let resolved = self.if_chain(addr)?;
                if resolved || self.vars.fetch(slot) == 0 {
                    self.pc = self.find(addr, BRANCHES)?;
                } else {
                    self.resolve(addr)?;
                    self.pc += 1;
                }
            }
            Op::Else => {
                if self.if_chain(addr)? {
                    self.pc = self.find(addr, ENDIF)?;
                } else {
                    self.resolve(addr)?;
                    self.pc += 1;
                }
            }
            Op::Endif => match self.frames.last() {
                Some(Frame::IfChain { .. }) => {
                    self.frames.pop();
                    self.pc += 1;
                }
                _ => return Err(error!(ElseWithoutIf, self.token(addr) => "ENDIF WITHOUT IF")),
            },
        }
        Ok(true)
    }

    fn token(&self, addr: Address) -> &Token {
        &self.program.tokens()[addr]
    }

    fn push(&mut self, addr: Address, frame: Frame) -> Result<()> {
        match self.frames.push(frame) {
            Ok(()) => Ok(()),
            Err(error) => Err(error.in_token(self.token(addr))),
        }
    }

    fn find(&self, addr: Address, targets: &[Keyword]) -> Result<Address> {
        match find_next(self.program.tokens(), addr, targets) {
            Some(found) => Ok(found),
            None => Err(error!(IfWithoutEndif, self.token(addr) =>)),
        }
    }

    /// Whether a branch of the innermost if-chain already ran.
    fn if_chain(&self, addr: Address) -> Result<bool> {
        match self.frames.last() {
            Some(Frame::IfChain { resolved }) => Ok(*resolved),
            _ => Err(error!(ElseWithoutIf, self.token(addr) =>)),
        }
    }

    fn resolve(&mut self, addr: Address) -> Result<()> {
        match self.frames.last_mut() {
            Some(Frame::IfChain { resolved }) => {
                *resolved = true;
                Ok(())
            }
            _ => Err(error!(ElseWithoutIf, self.token(addr) =>)),
        }
    }
}

use super::{Address, Container, Frame, Op, Program, Record, Slot, Stack};
use crate::error;
use crate::lang::{find_next, Error, Keyword, Token};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

const BRANCHES: &[Keyword] = &[Keyword::Elif, Keyword::Else, Keyword::Endif];
const ENDIF: &[Keyword] = &[Keyword::Endif];

/// Compile a linked program to bytecode.
///
/// Loops test their variable only at `end`, so the body always runs once:
///
/// ```text
/// while x            (nothing)
///   ...              body
/// end                GOTO x → body
/// ```
///
/// Conditionals need a jump that is always taken. When a program has
/// any, a synthetic variable is given the slot after the last user
/// variable and set to one by a prologue, `CLEAR always; INC always`.
///
/// ```text
/// if a               GOTO a → body_a; GOTO always → entry(next)
///   ...              body_a
/// elif b             GOTO always → endif; GOTO b → body_b; GOTO always → entry(next)
///   ...              body_b
/// else               GOTO always → endif
///   ...              body_c
/// endif              (nothing)
/// ```
///
/// The entry of an `elif` is its second record, the entry of an `else`
/// is the record after it and the entry of an `endif` is its own offset.
pub fn compile(program: &Program) -> Result<Container> {
    Compiler::new(program)?.compile()
}

struct Compiler<'a> {
    program: &'a Program,
    ops: Vec<Option<Op>>,
    offsets: Vec<u32>,
    always: Option<Slot>,
    frames: Stack<Frame>,
    code: Vec<Record>,
}

impl<'a> Compiler<'a> {
    fn new(program: &'a Program) -> Result<Compiler<'a>> {
        if let Some(error) = program.first_error() {
            return Err(error.clone());
        }
        let ops: Vec<Option<Op>> = program.ops().map(|op| op.clone().ok().flatten()).collect();
        let has_branches = ops
            .iter()
            .any(|op| matches!(op, Some(Op::If(_)) | Some(Op::Elif(_)) | Some(Op::Else)));
        let always = if has_branches {
            match Slot::try_from(program.slots().len()) {
                Ok(slot) if slot < Slot::max_value() => Some(slot),
                _ => return Err(error!(Overflow; "TOO MANY VARIABLES")),
            }
        } else {
            None
        };
        let mut offset: usize = if always.is_some() { 2 * Record::LEN } else { 0 };
        let mut offsets = Vec::with_capacity(ops.len() + 1);
        for op in &ops {
            offsets.push(offset);
            offset += op.map_or(0, |op| op.compiled_len());
        }
        offsets.push(offset);
        if offset > u32::max_value() as usize {
            return Err(error!(Overflow; "PROGRAM TOO LARGE"));
        }
        Ok(Compiler {
            program,
            ops,
            offsets: offsets.into_iter().map(|o| o as u32).collect(),
            always,
            frames: Stack::new("NESTING TOO DEEP"),
            code: vec![],
        })
    }

    fn compile(mut self) -> Result<Container> {
        if let Some(always) = self.always {
            self.emit(Record::clear(always), None);
            self.emit(Record::inc(always), None);
        }
        for addr in 0..self.ops.len() {
            if let Some(op) = self.ops[addr] {
                self.op(addr, op)?;
            }
        }
        debug_assert_eq!(self.code.len() * Record::LEN, self.offsets[self.ops.len()] as usize);
        let slots = self.program.slots();
        let symbols = slots
            .names()
            .iter()
            .enumerate()
            .map(|(slot, name)| (slot as Slot, name.clone()))
            .collect();
        let var_count = slots.len() + self.always.map_or(0, |_| 1);
        let var_count = match u16::try_from(var_count) {
            Ok(count) => count,
            Err(_) => return Err(error!(Overflow; "TOO MANY VARIABLES")),
        };
        Container::new(var_count, self.code, symbols)
    }

    fn op(&mut self, addr: Address, op: Op) -> Result<()> {
        let here = self.offsets[addr];
        match op {
            Op::Clear(slot) => self.emit(Record::clear(slot), Some(addr)),
            Op::Incr(slot) => self.emit(Record::inc(slot), Some(addr)),
            Op::Decr(slot) => self.emit(Record::dec(slot), Some(addr)),
            Op::While(slot) => {
                let frame = Frame::Loop {
                    return_to: addr,
                    slot,
                };
                self.frames.push(frame).map_err(|e| e.in_token(self.token(addr)))?;
            }
            Op::End => match self.frames.pop() {
                Some(Frame::Loop { return_to, slot }) => {
                    let target = self.offsets[return_to];
                    self.emit(Record::goto(slot, target), Some(addr));
                }
                _ => return Err(error!(EndWithoutWhile, self.token(addr) =>)),
            },
            Op::If(slot) => {
                let frame = Frame::IfChain { resolved: false };
                self.frames.push(frame).map_err(|e| e.in_token(self.token(addr)))?;
                let always = self.always(addr)?;
                let next = self.entry(self.find(addr, BRANCHES)?);
                self.emit(Record::goto(slot, here + 2 * Record::LEN as u32), Some(addr));
                self.emit(Record::goto(always, next), Some(addr));
            }
            Op::Elif(slot) => {
                self.expect_if_chain(addr)?;
                let always = self.always(addr)?;
                let endif = self.offsets[self.find(addr, ENDIF)?];
                let next = self.entry(self.find(addr, BRANCHES)?);
                self.emit(Record::goto(always, endif), Some(addr));
                self.emit(Record::goto(slot, here + 3 * Record::LEN as u32), Some(addr));
                self.emit(Record::goto(always, next), Some(addr));
            }
            Op::Else => {
                self.expect_if_chain(addr)?;
                let always = self.always(addr)?;
                let endif = self.offsets[self.find(addr, ENDIF)?];
                self.emit(Record::goto(always, endif), Some(addr));
            }
            Op::Endif => match self.frames.pop() {
                Some(Frame::IfChain { .. }) => {}
                _ => return Err(error!(ElseWithoutIf, self.token(addr) => "ENDIF WITHOUT IF")),
            },
        }
        Ok(())
    }

    fn emit(&mut self, record: Record, addr: Option<Address>) {
        let offset = self.code.len() * Record::LEN;
        match addr {
            Some(addr) => log::debug!("{:>8}  {}  <- {}", offset, record, self.token(addr)),
            None => log::debug!("{:>8}  {}", offset, record),
        }
        self.code.push(record);
    }

    fn token(&self, addr: Address) -> &'a Token {
        &self.program.tokens()[addr]
    }

    fn always(&self, addr: Address) -> Result<Slot> {
        match self.always {
            Some(slot) => Ok(slot),
            None => Err(error!(InternalError, self.token(addr) => "NO ALWAYS SLOT")),
        }
    }

    fn find(&self, addr: Address, targets: &[Keyword]) -> Result<Address> {
        match find_next(self.program.tokens(), addr, targets) {
            Some(found) => Ok(found),
            None => Err(error!(IfWithoutEndif, self.token(addr) =>)),
        }
    }

    /// Where control lands when the preceding branch is not taken.
    fn entry(&self, addr: Address) -> u32 {
        match self.ops[addr] {
            Some(Op::Elif(_)) | Some(Op::Else) => self.offsets[addr] + Record::LEN as u32,
            _ => self.offsets[addr],
        }
    }

    fn expect_if_chain(&self, addr: Address) -> Result<()> {
        match self.frames.last() {
            Some(Frame::IfChain { .. }) => Ok(()),
            _ => Err(error!(ElseWithoutIf, self.token(addr) =>)),
        }
    }
}

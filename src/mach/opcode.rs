use super::Slot;
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

/// ## Bytecode instruction set
///
/// The Barebones machine has one register per variable and four
/// instructions. Every instruction is a fixed 7-byte record:
///
/// ```text
/// OPCODE(1) | VAR_SLOT(2) | TARGET(4)
/// ```
///
/// Multi-byte fields are big-endian. `TARGET` is a byte offset from the
/// start of the code section and is zero for everything but `GOTO`.
/// `GOTO` is taken when its variable is non-zero, otherwise execution
/// falls through to the next record.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Clear = 0x00,
    Dec = 0x40,
    Inc = 0x80,
    Goto = 0xB0,
}

impl TryFrom<u8> for Opcode {
    type Error = Error;
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x00 => Ok(Opcode::Clear),
            0x40 => Ok(Opcode::Dec),
            0x80 => Ok(Opcode::Inc),
            0xB0 => Ok(Opcode::Goto),
            _ => Err(error!(BadFormat; "UNKNOWN OPCODE")),
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Opcode::Clear => "CLEAR",
            Opcode::Dec => "DEC",
            Opcode::Inc => "INC",
            Opcode::Goto => "GOTO",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub opcode: Opcode,
    pub slot: Slot,
    pub target: u32,
}

impl Record {
    pub const LEN: usize = 7;

    pub fn clear(slot: Slot) -> Record {
        Record::new(Opcode::Clear, slot, 0)
    }

    pub fn inc(slot: Slot) -> Record {
        Record::new(Opcode::Inc, slot, 0)
    }

    pub fn dec(slot: Slot) -> Record {
        Record::new(Opcode::Dec, slot, 0)
    }

    pub fn goto(slot: Slot, target: u32) -> Record {
        Record::new(Opcode::Goto, slot, target)
    }

    fn new(opcode: Opcode, slot: Slot, target: u32) -> Record {
        Record {
            opcode,
            slot,
            target,
        }
    }

    pub fn to_bytes(&self) -> [u8; Record::LEN] {
        let slot = self.slot.to_be_bytes();
        let target = self.target.to_be_bytes();
        [
            self.opcode as u8,
            slot[0],
            slot[1],
            target[0],
            target[1],
            target[2],
            target[3],
        ]
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Record, Error> {
        if bytes.len() != Record::LEN {
            return Err(error!(BadFormat; "TRUNCATED RECORD"));
        }
        let opcode = Opcode::try_from(bytes[0])?;
        let slot = Slot::from_be_bytes([bytes[1], bytes[2]]);
        let target = u32::from_be_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]);
        Ok(Record::new(opcode, slot, target))
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.opcode {
            Opcode::Goto => write!(f, "{} {} {}", self.opcode, self.slot, self.target),
            _ => write!(f, "{} {}", self.opcode, self.slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goto_layout() {
        let bytes = Record::goto(0x0102, 0x0A0B0C0D).to_bytes();
        assert_eq!(bytes, [0xB0, 0x01, 0x02, 0x0A, 0x0B, 0x0C, 0x0D]);
    }

    #[test]
    fn test_non_goto_target_is_zero() {
        assert_eq!(Record::inc(3).to_bytes(), [0x80, 0, 3, 0, 0, 0, 0]);
        assert_eq!(Record::dec(3).to_bytes(), [0x40, 0, 3, 0, 0, 0, 0]);
        assert_eq!(Record::clear(3).to_bytes(), [0x00, 0, 3, 0, 0, 0, 0]);
    }

    #[test]
    fn test_unknown_opcode() {
        assert!(Record::from_bytes(&[0x11, 0, 0, 0, 0, 0, 0]).is_err());
        assert!(Record::from_bytes(&[0x80, 0, 0]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Record::goto(1, 28).to_string(), "GOTO 1 28");
        assert_eq!(Record::clear(0).to_string(), "CLEAR 0");
    }
}

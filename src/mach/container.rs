use super::{Record, Slot};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;
use std::io::{Read, Write};
use std::path::Path;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Identifies a compiled program.
pub const MAGIC: [u8; 4] = [0x42, 0x4F, 0x4E, 0x45];

const HEADER_LEN: usize = 10;

/// ## Compiled program container
///
/// ```text
/// MAGIC(4) | VAR_COUNT(2) | CODE_LEN(4) | RECORDS(CODE_LEN) | SYMBOLS
/// ```
///
/// The symbol table is optional and maps slots back to the names used in
/// source, as `<slot>=<name>;` repeated with the slot in decimal.

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    var_count: u16,
    code: Vec<Record>,
    symbols: Vec<(Slot, Rc<str>)>,
}

impl Container {
    pub fn new(
        var_count: u16,
        code: Vec<Record>,
        symbols: Vec<(Slot, Rc<str>)>,
    ) -> Result<Container> {
        if code.len() * Record::LEN > u32::max_value() as usize {
            return Err(error!(Overflow; "PROGRAM TOO LARGE"));
        }
        Ok(Container {
            var_count,
            code,
            symbols,
        })
    }

    pub fn var_count(&self) -> u16 {
        self.var_count
    }

    /// Length of the code section in bytes.
    pub fn code_len(&self) -> u32 {
        (self.code.len() * Record::LEN) as u32
    }

    pub fn records(&self) -> &[Record] {
        &self.code
    }

    pub fn symbols(&self) -> &[(Slot, Rc<str>)] {
        &self.symbols
    }

    pub fn symbol(&self, slot: Slot) -> Option<&str> {
        self.symbols
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, name)| &**name)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.code_len() as usize);
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&self.var_count.to_be_bytes());
        bytes.extend_from_slice(&self.code_len().to_be_bytes());
        for record in &self.code {
            bytes.extend_from_slice(&record.to_bytes());
        }
        for (slot, name) in &self.symbols {
            bytes.extend_from_slice(format!("{}={};", slot, name).as_bytes());
        }
        bytes
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Container> {
        if bytes.len() < HEADER_LEN || bytes[..4] != MAGIC {
            return Err(error!(BadFormat; "NOT A COMPILED PROGRAM"));
        }
        let var_count = u16::from_be_bytes([bytes[4], bytes[5]]);
        let code_len = u32::from_be_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
        if code_len % Record::LEN != 0 {
            return Err(error!(BadFormat; "CODE LENGTH NOT A MULTIPLE OF 7"));
        }
        let code_end = match HEADER_LEN.checked_add(code_len) {
            Some(end) if end <= bytes.len() => end,
            _ => return Err(error!(BadFormat; "TRUNCATED CODE")),
        };
        let code = bytes[HEADER_LEN..code_end]
            .chunks(Record::LEN)
            .map(Record::from_bytes)
            .collect::<Result<Vec<Record>>>()?;
        let symbols = parse_symbols(&bytes[code_end..])?;
        Ok(Container {
            var_count,
            code,
            symbols,
        })
    }

    /// Format detection. Anything that cannot produce the four magic
    /// bytes, including I/O failure, is not compiled.
    pub fn is_compiled<R: Read>(mut reader: R) -> bool {
        let mut head = [0u8; 4];
        match reader.read_exact(&mut head) {
            Ok(()) => head == MAGIC,
            Err(_) => false,
        }
    }

    pub fn is_compiled_file<P: AsRef<Path>>(path: P) -> bool {
        match std::fs::File::open(path) {
            Ok(file) => Container::is_compiled(file),
            Err(_) => false,
        }
    }
}

fn parse_symbols(bytes: &[u8]) -> Result<Vec<(Slot, Rc<str>)>> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => return Err(error!(BadFormat; "SYMBOL TABLE NOT UTF-8")),
    };
    let mut symbols = vec![];
    let mut entries = text.split(';');
    let trailing = entries.next_back();
    if trailing != Some("") {
        return Err(error!(BadFormat; "UNTERMINATED SYMBOL"));
    }
    for entry in entries {
        let (slot, name) = match entry.find('=') {
            Some(eq) => (&entry[..eq], &entry[eq + 1..]),
            None => return Err(error!(BadFormat; "MALFORMED SYMBOL")),
        };
        let slot = match slot.parse::<Slot>() {
            Ok(slot) => slot,
            Err(_) => return Err(error!(BadFormat; "MALFORMED SYMBOL")),
        };
        symbols.push((slot, name.into()));
    }
    Ok(symbols)
}

impl TryFrom<&[u8]> for Container {
    type Error = Error;
    fn try_from(bytes: &[u8]) -> Result<Self> {
        Container::from_bytes(bytes)
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "VARIABLES {}", self.var_count)?;
        writeln!(f, "CODE {} BYTES", self.code_len())?;
        for (index, record) in self.code.iter().enumerate() {
            write!(f, "{:>8}  {}", index * Record::LEN, record)?;
            if let Some(name) = self.symbol(record.slot) {
                write!(f, "  ; {}", name)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_program() {
        let c = Container::new(0, vec![], vec![]).unwrap();
        assert_eq!(c.to_bytes(), vec![0x42, 0x4F, 0x4E, 0x45, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_header_and_symbols() {
        let symbols = vec![(0, "y".into()), (1, "x".into())];
        let c = Container::new(2, vec![Record::inc(1)], symbols).unwrap();
        let bytes = c.to_bytes();
        assert_eq!(&bytes[..10], &[0x42, 0x4F, 0x4E, 0x45, 0, 2, 0, 0, 0, 7]);
        assert_eq!(&bytes[10..17], &[0x80, 0, 1, 0, 0, 0, 0]);
        assert_eq!(&bytes[17..], b"0=y;1=x;");
        assert_eq!(Container::from_bytes(&bytes), Ok(c));
    }

    #[test]
    fn test_symbol_table_is_optional() {
        let bytes = [0x42, 0x4F, 0x4E, 0x45, 0, 1, 0, 0, 0, 7, 0x40, 0, 0, 0, 0, 0, 0];
        let c = Container::from_bytes(&bytes).unwrap();
        assert_eq!(c.var_count(), 1);
        assert_eq!(c.records(), &[Record::dec(0)]);
        assert!(c.symbols().is_empty());
    }

    #[test]
    fn test_bad_format() {
        assert!(Container::from_bytes(b"BON").is_err());
        assert!(Container::from_bytes(b"NOPE\0\0\0\0\0\0").is_err());
        let odd = [0x42, 0x4F, 0x4E, 0x45, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0];
        assert!(Container::from_bytes(&odd).is_err());
        let short = [0x42, 0x4F, 0x4E, 0x45, 0, 0, 0, 0, 0, 14, 0, 0, 0, 0, 0, 0, 0];
        assert!(Container::from_bytes(&short).is_err());
        let mut unterminated = Container::new(0, vec![], vec![]).unwrap().to_bytes();
        unterminated.extend_from_slice(b"0=x");
        assert!(Container::from_bytes(&unterminated).is_err());
    }

    #[test]
    fn test_detection() {
        assert!(Container::is_compiled(&b"BONE"[..]));
        assert!(Container::is_compiled(&b"BONE\x01\x02\x03"[..]));
        assert!(!Container::is_compiled(&b"BONX"[..]));
        assert!(!Container::is_compiled(&b"BON"[..]));
        assert!(!Container::is_compiled(&b""[..]));
        assert!(!Container::is_compiled_file("/nonexistent/program.bb"));
    }
}

use super::Slot;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Slot assignment
///
/// Dense variable numbers in order of first appearance.

#[derive(Debug, Default, Clone)]
pub struct Slots {
    names: Vec<Rc<str>>,
    index: HashMap<Rc<str>, Slot>,
}

impl Slots {
    pub fn new() -> Slots {
        Slots::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Slot for `name`, assigning the next free one on first sight.
    pub fn assign(&mut self, name: &Rc<str>) -> Result<Slot> {
        if let Some(slot) = self.index.get(name) {
            return Ok(*slot);
        }
        if self.names.len() >= Slot::max_value() as usize {
            return Err(error!(Overflow; "TOO MANY VARIABLES"));
        }
        let slot = self.names.len() as Slot;
        log::debug!("slot {} = {}", slot, name);
        self.names.push(name.clone());
        self.index.insert(name.clone(), slot);
        Ok(slot)
    }

    pub fn get(&self, name: &str) -> Option<Slot> {
        self.index.get(name).copied()
    }

    pub fn name(&self, slot: Slot) -> Option<&Rc<str>> {
        self.names.get(slot as usize)
    }

    pub fn names(&self) -> &[Rc<str>] {
        &self.names
    }
}

/// ## Variable table
///
/// Values of every variable a program references, in slot order.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Variables {
    names: Vec<Rc<str>>,
    values: Vec<i64>,
}

impl Variables {
    pub fn new(slots: &Slots) -> Variables {
        Variables {
            names: slots.names().to_vec(),
            values: vec![0; slots.len()],
        }
    }

    /// Value of a variable by name. Unknown names read as zero.
    pub fn get(&self, name: &str) -> i64 {
        let name = name.to_lowercase();
        self.names
            .iter()
            .position(|n| **n == *name)
            .map_or(0, |slot| self.values[slot])
    }

    pub fn fetch(&self, slot: Slot) -> i64 {
        self.values[slot as usize]
    }

    pub fn store(&mut self, slot: Slot, value: i64) {
        self.values[slot as usize] = value;
    }

    pub fn clear(&mut self) {
        for value in self.values.iter_mut() {
            *value = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.names
            .iter()
            .map(|n| &**n)
            .zip(self.values.iter().copied())
    }
}

impl std::fmt::Display for Variables {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{} = {}", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_appearance_order() {
        let mut slots = Slots::new();
        assert_eq!(slots.assign(&"y".into()), Ok(0));
        assert_eq!(slots.assign(&"x".into()), Ok(1));
        assert_eq!(slots.assign(&"y".into()), Ok(0));
        assert_eq!(slots.get("x"), Some(1));
        assert_eq!(slots.name(0).map(|n| &**n), Some("y"));
    }

    #[test]
    fn test_variables_display_and_lookup() {
        let mut slots = Slots::new();
        slots.assign(&"b".into()).unwrap();
        slots.assign(&"a".into()).unwrap();
        let mut vars = Variables::new(&slots);
        vars.store(1, -2);
        assert_eq!(vars.get("A"), -2);
        assert_eq!(vars.get("nothing"), 0);
        assert_eq!(vars.to_string(), "b = 0\na = -2\n");
    }
}

//! # Weighted CNF Instance Representations
//!
//! Variable managers, plain CNF formulas and weighted CNF instances ready to
//! be handed to a knowledge compiler or weighted model counter.

use std::{fmt, hash::Hash};

use thiserror::Error;

use crate::types::{RsHashMap, Var};

mod sat;
pub use sat::Cnf;

mod weighted;
pub use weighted::{Query, WeightedCnf};

pub mod fio;

/// Trait for variable managers keeping track of used variables
pub trait ManageVars {
    /// Uses up the next free variable
    fn new_var(&mut self) -> Var;
    /// Gets the number of used variables. Typically this is just the index of
    /// the next free variable.
    fn n_used(&self) -> u32;
}

/// Error returned when a key is registered with a [`KeyedVarManager`] twice
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("a variable for `{0}` has already been allocated")]
pub struct DuplicateVariable(pub String);

/// Manager allocating variables for keys in registration order.
///
/// Each key is bound to exactly one variable and the numbering only depends
/// on the order of registration, so encoding the same model twice yields the
/// same variables. Variables may also be allocated without a key through
/// [`ManageVars::new_var`].
#[derive(Clone, Debug)]
pub struct KeyedVarManager<K> {
    next_var: Var,
    key_map: RsHashMap<K, Var>,
    keys: Vec<Option<K>>,
}

impl<K> Default for KeyedVarManager<K> {
    fn default() -> Self {
        Self {
            next_var: Var::default(),
            key_map: RsHashMap::default(),
            keys: Vec::new(),
        }
    }
}

impl<K> KeyedVarManager<K>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    /// Creates a new, empty keyed variable manager
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next free variable for a key that has not been seen
    /// before.
    ///
    /// # Errors
    ///
    /// [`DuplicateVariable`] if the key already has a variable.
    pub fn register(&mut self, key: K) -> Result<Var, DuplicateVariable> {
        if self.key_map.contains_key(&key) {
            return Err(DuplicateVariable(key.to_string()));
        }
        let v = self.new_var();
        log::trace!("allocated {v} for {key}");
        self.keys[v.idx()] = Some(key.clone());
        self.key_map.insert(key, v);
        Ok(v)
    }

    /// Looks up the variable of a key without allocating
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Var> {
        self.key_map.get(key).copied()
    }

    /// Iterates over all keyed variables in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (Var, &K)> + '_ {
        self.keys.iter().enumerate().filter_map(|(idx, key)| {
            let idx = u32::try_from(idx).ok()?;
            key.as_ref().map(|k| (Var::new(idx), k))
        })
    }
}

impl<K> ManageVars for KeyedVarManager<K> {
    fn new_var(&mut self) -> Var {
        let v = self.next_var;
        self.next_var = v + 1;
        self.keys.push(None);
        v
    }

    fn n_used(&self) -> u32 {
        self.next_var.idx32()
    }
}

#[cfg(test)]
mod tests {
    use super::{DuplicateVariable, KeyedVarManager, ManageVars};
    use crate::var;

    #[test]
    fn keyed_registration_order() {
        let mut vm = KeyedVarManager::new();
        assert_eq!(vm.register("a".to_string()), Ok(var![0]));
        assert_eq!(vm.register("b".to_string()), Ok(var![1]));
        assert_eq!(vm.new_var(), var![2]);
        assert_eq!(vm.register("c".to_string()), Ok(var![3]));
        assert_eq!(vm.get(&"b".to_string()), Some(var![1]));
        let keys: Vec<_> = vm.iter().map(|(v, k)| (v, k.as_str())).collect();
        assert_eq!(keys, vec![(var![0], "a"), (var![1], "b"), (var![3], "c")]);
    }

    #[test]
    fn keyed_duplicate() {
        let mut vm = KeyedVarManager::new();
        vm.register("a".to_string()).unwrap();
        assert_eq!(
            vm.register("a".to_string()),
            Err(DuplicateVariable("a".to_string()))
        );
        assert_eq!(vm.n_used(), 1);
    }
}

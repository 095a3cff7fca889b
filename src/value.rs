use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// The dynamic kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// A dynamically typed document value.
///
/// Containers are shared handles: cloning a `Value` that holds a
/// [`Mapping`] or [`Sequence`] clones the handle, not the storage, so an
/// in-place write through one clone is seen by all of them. Use
/// [`Value::deep_clone`] for an independent copy.
///
/// Equality is structural and ignores container identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Sequence),
    Mapping(Mapping),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Sequence(_) => Kind::Sequence,
            Value::Mapping(_) => Kind::Mapping,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a mapping key. Returns a shared handle for containers.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Look up a sequence slot. Returns a shared handle for containers.
    pub fn at(&self, index: usize) -> Option<Value> {
        self.as_sequence().and_then(|s| s.get(index))
    }

    /// Copy the whole tree into fresh storage, sharing nothing with `self`.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Sequence(s) => Value::Sequence(Sequence::from(
                s.items().iter().map(Value::deep_clone).collect::<Vec<_>>(),
            )),
            Value::Mapping(m) => Value::Mapping(Mapping::from(
                m.entries()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_clone()))
                    .collect::<BTreeMap<_, _>>(),
            )),
            scalar => scalar.clone(),
        }
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        crate::json::to_json(self)
    }

    /// Serialize to pretty-printed JSON (2-space indent).
    pub fn to_json_pretty(&self) -> String {
        crate::json::to_json_pretty(self)
    }

    /// Parse JSON text into a fresh value tree.
    pub fn from_json(input: &str) -> serde_json::Result<Value> {
        crate::json::from_json(input)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

/// Shared handle to a string-keyed map.
///
/// Key assignment happens in place, so every holder of the handle sees it.
#[derive(Clone, Default)]
pub struct Mapping(Rc<RefCell<BTreeMap<String, Value>>>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Set `key` in place, returning the previous value if any.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Shallow snapshot of the entries. Container values stay shared.
    pub fn entries(&self) -> BTreeMap<String, Value> {
        self.0.borrow().clone()
    }

    /// True if both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Mapping) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<BTreeMap<String, Value>> for Mapping {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Mapping(Rc::new(RefCell::new(map)))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

/// Shared handle to an ordered list.
///
/// Slot assignment happens in place. Growth does not: [`Sequence::appended`]
/// returns a sequence with new storage, and holders of the old handle keep
/// seeing the old length until they are given the new one.
#[derive(Clone, Default)]
pub struct Sequence(Rc<RefCell<Vec<Value>>>);

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Overwrite an existing slot in place. Returns false, leaving the
    /// sequence untouched, when `index` is out of bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// A new sequence holding the current elements followed by `value`.
    pub fn appended(&self, value: Value) -> Sequence {
        let mut items = self.items();
        items.push(value);
        Sequence::from(items)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Shallow snapshot of the elements. Container values stay shared.
    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// True if both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(items: Vec<Value>) -> Self {
        Sequence(Rc::new(RefCell::new(items)))
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(Sequence::from(items))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Mapping(Mapping::from(map))
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl From<Sequence> for Value {
    fn from(s: Sequence) -> Self {
        Value::Sequence(s)
    }
}

use std::fmt;

/// How a node's value was obtained from its parent's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// The document root. Only valid on the node without a parent.
    Root,
    /// `.name`: a key of a mapping.
    Property(String),
    /// `.[i]`: a slot of a sequence.
    Index(i64),
    /// `.[]`: a slot past the end of a sequence, to be appended.
    NextAvailableIndex,
    /// `.(predicate)`: predicate match over a sequence. The predicate text is
    /// kept verbatim; write-back through it is not supported.
    Dynamic(String),
}

impl Selector {
    pub fn property(name: impl Into<String>) -> Self {
        Selector::Property(name.into())
    }

    pub fn dynamic(predicate: impl Into<String>) -> Self {
        Selector::Dynamic(predicate.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Root => f.write_str("."),
            Selector::Property(name) => write!(f, ".{}", name),
            Selector::Index(i) => write!(f, ".[{}]", i),
            Selector::NextAvailableIndex => f.write_str(".[]"),
            Selector::Dynamic(predicate) => write!(f, ".({})", predicate),
        }
    }
}

use std::fmt;

use crate::containers::StorageKey;

/// Identifies the domain of an integer variable in the
/// [`VariableStore`](crate::variables::VariableStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainId {
    id: u32,
}

/// Identifies a set variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetVarId {
    id: u32,
}

/// Identifies a graph variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphVarId {
    id: u32,
}

macro_rules! variable_id {
    ($name:ident, $prefix:literal) => {
        impl StorageKey for $name {
            fn index(&self) -> usize {
                self.id as usize
            }

            fn create_from_index(index: usize) -> Self {
                $name { id: index as u32 }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.id)
            }
        }
    };
}

variable_id!(DomainId, "x");
variable_id!(SetVarId, "s");
variable_id!(GraphVarId, "g");

/// A reference to any variable, used where the kind is not statically known,
/// for example in naming and in [`Contradiction`] reports.
///
/// [`Contradiction`]: crate::basic_types::Contradiction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableRef {
    Integer(DomainId),
    Set(SetVarId),
    Graph(GraphVarId),
}

impl fmt::Display for VariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableRef::Integer(id) => write!(f, "{id}"),
            VariableRef::Set(id) => write!(f, "{id}"),
            VariableRef::Graph(id) => write!(f, "{id}"),
        }
    }
}

impl From<DomainId> for VariableRef {
    fn from(id: DomainId) -> Self {
        VariableRef::Integer(id)
    }
}

impl From<SetVarId> for VariableRef {
    fn from(id: SetVarId) -> Self {
        VariableRef::Set(id)
    }
}

impl From<GraphVarId> for VariableRef {
    fn from(id: GraphVarId) -> Self {
        VariableRef::Graph(id)
    }
}

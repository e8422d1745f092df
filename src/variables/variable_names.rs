use fnv::FnvHashMap;

use super::VariableRef;

/// Optional human-readable names, kept out of the hot path and consulted only
/// for diagnostics.
#[derive(Debug, Default)]
pub(crate) struct VariableNames {
    names: FnvHashMap<VariableRef, String>,
}

impl VariableNames {
    pub(crate) fn add(&mut self, variable: VariableRef, name: String) {
        let _ = self.names.insert(variable, name);
    }

    pub(crate) fn get(&self, variable: VariableRef) -> Option<&str> {
        self.names.get(&variable).map(|name| name.as_str())
    }
}

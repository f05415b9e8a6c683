use super::tac::Temp;
use crate::utils::errors::{BxError, BxResult};
use std::collections::HashMap;

/// Variable name -> temporary holding its value, for one procedure.
/// Re-declarations are rejected upstream, so a binding is never shadowed.
#[derive(Debug, Default)]
pub struct SymbolTable {
    bindings: HashMap<String, Temp>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: &str, temp: Temp) {
        self.bindings.insert(name.to_string(), temp);
    }

    pub fn lookup(&self, name: &str) -> BxResult<Temp> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| BxError::UnboundVariable {
                name: name.to_string(),
            })
    }
}

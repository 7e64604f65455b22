use crate::built_in;
use crate::error::{CalcError, CalcResult};
use crate::plugin::CalculatorPlugin;
use std::collections::HashMap;
use std::sync::LazyLock;

static BUILTIN: LazyLock<CalculatorRegistry> =
    LazyLock::new(|| CalculatorRegistry::new(built_in::all()));

/// Immutable mapping from calculator identifier to plugin.
///
/// Identifiers are matched case-insensitively; the listing keeps registration
/// order.
pub struct CalculatorRegistry {
    plugins: Vec<Box<dyn CalculatorPlugin>>,
    index: HashMap<String, usize>,
}

impl CalculatorRegistry {
    pub fn new(plugins: Vec<Box<dyn CalculatorPlugin>>) -> Self {
        let mut index = HashMap::with_capacity(plugins.len());
        for (position, plugin) in plugins.iter().enumerate() {
            let previous = index.insert(plugin.name().to_ascii_lowercase(), position);
            debug_assert!(previous.is_none(), "duplicate calculator id '{}'", plugin.name());
        }
        Self { plugins, index }
    }

    /// The process-wide registry of built-in calculators.
    pub fn builtin() -> &'static CalculatorRegistry {
        &BUILTIN
    }

    pub fn resolve(&self, identifier: &str) -> CalcResult<&dyn CalculatorPlugin> {
        self.index
            .get(&identifier.trim().to_ascii_lowercase())
            .map(|&position| self.plugins[position].as_ref())
            .ok_or_else(|| CalcError::UnknownCalculator {
                identifier: identifier.to_string(),
                available: self.identifiers().iter().map(|id| id.to_string()).collect(),
            })
    }

    pub fn identifiers(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    pub fn plugins(&self) -> impl Iterator<Item = &dyn CalculatorPlugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

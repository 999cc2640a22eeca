// Symbol table: label id to string mapping and back.
//
// Operations never rewrite label ids; tables are only copied, swapped
// between the input and output side, or compared for compatibility.

use hashbrown::HashMap;
use wfst_core::Label;

/// Default string for the epsilon entry at index 0.
pub const EPS_SYMBOL: &str = "<eps>";

/// Alphabet attached to one side of an automaton.
///
/// Index 0 is always epsilon. Symbols are assigned consecutive ids in the
/// order they are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    /// Maps label id to its string.
    symbol_strings: Vec<String>,
    /// Maps string back to its label id.
    string_to_symbol: HashMap<String, Label>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a table holding only epsilon.
    pub fn new() -> Self {
        let mut table = Self {
            symbol_strings: Vec::new(),
            string_to_symbol: HashMap::new(),
        };
        table.add_symbol(EPS_SYMBOL);
        table
    }

    /// Create a table with epsilon followed by `symbols`, in order.
    ///
    /// Duplicate strings keep the id of their first occurrence.
    pub fn from_symbols<I, T>(symbols: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut table = Self::new();
        for s in symbols {
            table.add_symbol(s.as_ref());
        }
        table
    }

    /// Add `symbol` if absent and return its label.
    pub fn add_symbol(&mut self, symbol: &str) -> Label {
        if let Some(&label) = self.string_to_symbol.get(symbol) {
            return label;
        }
        let label = self.symbol_strings.len() as Label;
        self.symbol_strings.push(symbol.to_string());
        self.string_to_symbol.insert(symbol.to_string(), label);
        label
    }

    pub fn find_label(&self, symbol: &str) -> Option<Label> {
        self.string_to_symbol.get(symbol).copied()
    }

    pub fn find_symbol(&self, label: Label) -> Option<&str> {
        self.symbol_strings.get(label as usize).map(String::as_str)
    }

    /// Iterate `(label, symbol)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &str)> {
        self.symbol_strings
            .iter()
            .enumerate()
            .map(|(i, s)| (i as Label, s.as_str()))
    }

    /// Returns the first label on which the two tables disagree, if any.
    ///
    /// Tables of different length are compared on their common prefix; a
    /// longer table is an extension, not a conflict.
    pub fn first_conflict(&self, other: &SymbolTable) -> Option<Label> {
        self.symbol_strings
            .iter()
            .zip(&other.symbol_strings)
            .position(|(a, b)| a != b)
            .map(|i| i as Label)
    }
}

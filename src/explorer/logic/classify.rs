use super::dataset::{AGE, GOALS, HEIGHT, LEVEL, SPORT, WEIGHT};
use super::types::ColumnKind;
use crate::error::{EdaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in classification of the synthetic dataset.
pub const SYNTHETIC_KINDS: [(&str, ColumnKind); 6] = [
    (AGE, ColumnKind::Quantitative),
    (HEIGHT, ColumnKind::Quantitative),
    (WEIGHT, ColumnKind::Quantitative),
    (SPORT, ColumnKind::Qualitative),
    (LEVEL, ColumnKind::Qualitative),
    (GOALS, ColumnKind::Quantitative),
];

/// Maps column names to their statistical type.
///
/// Two flavours exist. [`ColumnTypes::synthetic`] is a fixed table where an
/// unknown name is an error. [`ColumnTypes::declared`] holds user choices and
/// answers [`ColumnKind::Quantitative`] for anything not declared. Declarations
/// are advisory: they are never checked against the column contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypes {
    kinds: BTreeMap<String, ColumnKind>,
    fallback: Option<ColumnKind>,
}

impl ColumnTypes {
    pub fn synthetic() -> Self {
        Self {
            kinds: SYNTHETIC_KINDS
                .iter()
                .map(|(name, kind)| ((*name).to_owned(), *kind))
                .collect(),
            fallback: None,
        }
    }

    pub fn declared() -> Self {
        Self {
            kinds: BTreeMap::new(),
            fallback: Some(ColumnKind::Quantitative),
        }
    }

    pub fn declare(&mut self, name: impl Into<String>, kind: ColumnKind) {
        self.kinds.insert(name.into(), kind);
    }

    /// # Errors
    ///
    /// Returns [`EdaError::UnknownColumn`] for a name missing from a fixed table.
    pub fn classify(&self, name: &str) -> Result<ColumnKind> {
        self.kinds
            .get(name)
            .copied()
            .or(self.fallback)
            .ok_or_else(|| EdaError::UnknownColumn(name.to_owned()))
    }

    /// Declared or built-in entry, without applying the fallback.
    pub fn explicit(&self, name: &str) -> Option<ColumnKind> {
        self.kinds.get(name).copied()
    }

    /// Drops declarations for columns that are no longer selected.
    pub fn retain_columns(&mut self, columns: &[String]) {
        self.kinds.retain(|name, _| columns.contains(name));
    }
}

impl Default for ColumnTypes {
    fn default() -> Self {
        Self::declared()
    }
}

//! Column schema and reader configuration
//!
//! The schema maps each tab-separated column to a node attribute. Besides
//! plain CoNLL-U it lets CoNLL-like layouts be loaded, e.g. CoNLL-X with
//! `ord,form,lemma,upos,xpos,feats,head,deprel` or CoNLL-2009 with
//! `ord,form,lemma,_,upos,_,feats,_,head,_,deprel`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Default CoNLL-U column layout
pub const DEFAULT_ATTRIBUTES: &str = "ord,form,lemma,upos,xpos,feats,head,deprel,deps,misc";

/// What a single column is decoded into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    /// 1-based word-order index
    Ord,
    /// Index of the governor, resolved after the sentence is read
    Head,
    /// Enhanced dependencies, kept raw
    Deps,
    /// Column named `_`: skipped
    Ignore,
    Form,
    Lemma,
    Upos,
    Xpos,
    Feats,
    Deprel,
    Misc,
    /// Any other name, stored verbatim in the node's extra attributes
    Other(String),
}

impl Column {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ord" => Column::Ord,
            "head" => Column::Head,
            "deps" => Column::Deps,
            "_" => Column::Ignore,
            "form" => Column::Form,
            "lemma" => Column::Lemma,
            "upos" => Column::Upos,
            "xpos" => Column::Xpos,
            "feats" => Column::Feats,
            "deprel" => Column::Deprel,
            "misc" => Column::Misc,
            other => Column::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Column::Ord => "ord",
            Column::Head => "head",
            Column::Deps => "deps",
            Column::Ignore => "_",
            Column::Form => "form",
            Column::Lemma => "lemma",
            Column::Upos => "upos",
            Column::Xpos => "xpos",
            Column::Feats => "feats",
            Column::Deprel => "deprel",
            Column::Misc => "misc",
            Column::Other(name) => name,
        }
    }
}

/// Ordered list of columns; its length is the expected field count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Parse a comma-separated list of column names
    ///
    /// Duplicate or unknown names are accepted as-is.
    pub fn parse(attributes: &str) -> Self {
        Self {
            columns: attributes.split(',').map(Column::from_name).collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::parse(DEFAULT_ATTRIBUTES)
    }
}

impl FromStr for Schema {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(column.name())?;
        }
        Ok(())
    }
}

/// Settings fixed for the lifetime of one reader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Reject data lines whose field count differs from the schema
    pub strict: bool,
    pub schema: Schema,
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Replace the schema with a comma-separated column list
    pub fn attributes(mut self, attributes: &str) -> Self {
        self.schema = Schema::parse(attributes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema() {
        let schema = Schema::default();
        assert_eq!(schema.len(), 10);
        assert_eq!(schema.columns()[0], Column::Ord);
        assert_eq!(schema.columns()[6], Column::Head);
        assert_eq!(schema.columns()[8], Column::Deps);
        assert_eq!(schema.to_string(), DEFAULT_ATTRIBUTES);
    }

    #[test]
    fn test_conll2009_schema() {
        let schema: Schema = "ord,form,lemma,_,upos,_,feats,_,head,_,deprel".parse().unwrap();
        assert_eq!(schema.len(), 11);
        assert_eq!(schema.columns()[3], Column::Ignore);
        assert_eq!(schema.columns()[8], Column::Head);
    }

    #[test]
    fn test_unknown_and_duplicate_names() {
        let schema = Schema::parse("ord,form,frame,form");
        assert_eq!(
            schema.columns(),
            &[
                Column::Ord,
                Column::Form,
                Column::Other("frame".to_string()),
                Column::Form
            ]
        );
    }

    #[test]
    fn test_config_builder() {
        let config = ReaderConfig::new().strict(true).attributes("ord,form,head");
        assert!(config.strict);
        assert_eq!(config.schema.len(), 3);
        assert!(!ReaderConfig::default().strict);
    }
}

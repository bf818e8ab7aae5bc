//! Table name resolution.
//!
//! Entity and relation tables are named after the class of the listed
//! entity. The resolver is a pure function of the class id and an optional
//! prefix; unknown classes fail with [`Error::UnresolvedTable`].

use std::collections::HashSet;

use crate::config::TablesConfig;
use crate::error::{Error, Result};
use crate::segment::ClassId;

/// Maps a class id (and optional table prefix) to a table name.
pub trait TableResolver: Send + Sync {
    /// Resolves the table for `class_id`.
    ///
    /// `prefix` replaces the resolver's default entity-table prefix.
    fn resolve(&self, class_id: &ClassId, prefix: Option<&str>) -> Result<String>;
}

/// Resolver for the `<prefix><class id>` naming scheme.
#[derive(Debug, Clone)]
pub struct PrefixTableResolver {
    classes: HashSet<ClassId>,
    default_prefix: String,
}

impl PrefixTableResolver {
    /// Creates a resolver that knows `classes` and prefixes tables with `object_`.
    pub fn new<I, C>(classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ClassId>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            default_prefix: TablesConfig::default().object_prefix,
        }
    }

    /// Uses the entity prefix from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the table section does not validate.
    pub fn with_config(mut self, config: &TablesConfig) -> Result<Self> {
        config.validate()?;
        self.default_prefix.clone_from(&config.object_prefix);
        Ok(self)
    }

    /// Registers another class.
    pub fn register(&mut self, class_id: impl Into<ClassId>) -> &mut Self {
        self.classes.insert(class_id.into());
        self
    }

    /// Returns true if `class_id` is registered.
    #[must_use]
    pub fn knows(&self, class_id: &ClassId) -> bool {
        self.classes.contains(class_id)
    }
}

impl TableResolver for PrefixTableResolver {
    fn resolve(&self, class_id: &ClassId, prefix: Option<&str>) -> Result<String> {
        if !self.knows(class_id) {
            return Err(Error::UnresolvedTable(class_id.clone()));
        }

        let prefix = prefix.unwrap_or(&self.default_prefix);
        Ok(format!("{prefix}{class_id}"))
    }
}

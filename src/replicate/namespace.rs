//! Constructor namespace discovered during a replication.

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::core::Constructor;

/// Constructor modules referenced while rebuilding a tree, each with the
/// constructor names used from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    modules: FxHashMap<&'static str, BTreeSet<String>>,
}

impl Namespace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, ctor: Constructor<'_>) {
        let names = self.modules.entry(ctor.module).or_default();
        if !names.contains(ctor.name) {
            names.insert(ctor.name.to_owned());
        }
    }

    #[must_use]
    pub fn contains_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// True if this exact constructor was used.
    #[must_use]
    pub fn contains(&self, ctor: Constructor<'_>) -> bool {
        self.modules
            .get(ctor.module)
            .is_some_and(|names| names.contains(ctor.name))
    }

    /// Module paths, sorted.
    #[must_use]
    pub fn modules(&self) -> Vec<&'static str> {
        let mut out: Vec<_> = self.modules.keys().copied().collect();
        out.sort_unstable();
        out
    }

    /// Constructor names used from `module`, sorted.
    pub fn constructors<'a>(&'a self, module: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.modules
            .get(module)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, module) in self.modules().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{module}{{")?;
            for (j, name) in self.constructors(module).enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

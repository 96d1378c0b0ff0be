//! Namespace-local dataset naming.
//!
//! Records in one namespace often share a category. The first occurrence keeps
//! the category as its name; later ones get `_1`, `_2`, ... appended. A fresh
//! [`NameRegistry`] is created for every namespace, so names are unique only
//! within that namespace.

use std::collections::HashMap;

/// Unique name assigned to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    /// True when `name` differs from the category. The writer then records
    /// the category as `original_name`.
    pub renamed: bool,
}

/// Per-namespace table of base names to the last suffix handed out.
#[derive(Debug, Default)]
pub struct NameRegistry {
    counts: HashMap<String, usize>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next unique name for `category`.
    pub fn resolve(&mut self, category: &str) -> ResolvedName {
        match self.counts.get_mut(category) {
            Some(count) => {
                *count += 1;
                ResolvedName {
                    name: format!("{category}_{count}"),
                    renamed: true,
                }
            }
            None => {
                self.counts.insert(category.to_string(), 0);
                ResolvedName {
                    name: category.to_string(),
                    renamed: false,
                }
            }
        }
    }

    /// Number of distinct base names seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Free-function form of [`NameRegistry::resolve`].
pub fn resolve(category: &str, registry: &mut NameRegistry) -> ResolvedName {
    registry.resolve(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_get_incrementing_suffixes() {
        let mut registry = NameRegistry::new();
        let names: Vec<ResolvedName> = (0..3).map(|_| registry.resolve("x")).collect();
        assert_eq!(names[0].name, "x");
        assert!(!names[0].renamed);
        assert_eq!(names[1].name, "x_1");
        assert!(names[1].renamed);
        assert_eq!(names[2].name, "x_2");
        assert!(names[2].renamed);
    }

    #[test]
    fn categories_are_counted_independently() {
        let mut registry = NameRegistry::new();
        assert_eq!(resolve("a", &mut registry).name, "a");
        assert_eq!(resolve("b", &mut registry).name, "b");
        assert_eq!(resolve("a", &mut registry).name, "a_1");
        assert_eq!(resolve("b", &mut registry).name, "b_1");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn fresh_registry_restarts_numbering() {
        let mut first = NameRegistry::new();
        first.resolve("x");
        first.resolve("x");
        let mut second = NameRegistry::new();
        assert_eq!(second.resolve("x").name, "x");
        assert!(!second.is_empty());
    }
}

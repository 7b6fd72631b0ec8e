//! Catalog: the sorted, de-duplicated set of records handed to renderers.

use crate::model::{Module, Program};
use std::collections::HashMap;

/// Every module and program of a run, in presentation order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub modules: Vec<Module>,
    pub programs: Vec<Program>,
}

impl Catalog {
    /// Build the catalog once extraction has finished.
    ///
    /// Modules sharing a name keep the last one in `modules` order. Modules
    /// sort by case-insensitive name, programs by case-insensitive display
    /// name, both falling back to the exact name.
    pub fn new(modules: Vec<Module>, programs: Vec<Program>) -> Self {
        let mut modules = dedup_last_wins(modules);
        modules.sort_by(|a, b| sort_key(&a.name).cmp(&sort_key(&b.name)));

        let mut programs = programs;
        programs.sort_by(|a, b| {
            sort_key(a.display_name())
                .cmp(&sort_key(b.display_name()))
                .then_with(|| a.name.cmp(&b.name))
        });

        Catalog { modules, programs }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.programs.is_empty()
    }
}

fn sort_key(name: &str) -> (String, &str) {
    (name.to_lowercase(), name)
}

fn dedup_last_wins(modules: Vec<Module>) -> Vec<Module> {
    let mut by_name: HashMap<String, Module> = HashMap::new();
    for module in modules {
        if let Some(previous) = by_name.get(&module.name) {
            tracing::warn!(
                module = %module.name,
                replaced = %previous.path,
                by = %module.path,
                "duplicate module name, keeping the later file"
            );
        }
        by_name.insert(module.name.clone(), module);
    }
    by_name.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str, path: &str) -> Module {
        Module {
            name: name.to_string(),
            path: path.to_string(),
            ..Default::default()
        }
    }

    fn program(name: &str, title: &str) -> Program {
        Program {
            name: name.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.modules.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn modules_sort_case_insensitively() {
        let catalog = Catalog::new(
            vec![module("zeta", ""), module("Alpha", ""), module("beta", "")],
            vec![],
        );
        assert_eq!(names(&catalog), vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn order_is_independent_of_discovery() {
        let forward = Catalog::new(
            vec![module("b", ""), module("C", ""), module("a", "")],
            vec![program("y", ""), program("x", "Zed"), program("w", "alpha")],
        );
        let shuffled = Catalog::new(
            vec![module("a", ""), module("b", ""), module("C", "")],
            vec![program("x", "Zed"), program("w", "alpha"), program("y", "")],
        );
        assert_eq!(forward, shuffled);
        let titles: Vec<&str> = forward.programs.iter().map(|p| p.display_name()).collect();
        assert_eq!(titles, vec!["alpha", "y", "Zed"]);
    }

    #[test]
    fn duplicate_names_keep_last() {
        let catalog = Catalog::new(
            vec![module("log", "a/log.lua"), module("log", "b/log.lua")],
            vec![],
        );
        assert_eq!(catalog.modules.len(), 1);
        assert_eq!(catalog.modules[0].path, "b/log.lua");
    }

    #[test]
    fn empty_catalog() {
        assert!(Catalog::new(vec![], vec![]).is_empty());
    }
}

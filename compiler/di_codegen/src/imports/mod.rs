//! Import bookkeeping for generated files.
//!
//! Every package referenced by emitted code gets exactly one alias. Aliases
//! start from the package name an import path is assumed to declare and are
//! suffixed with a counter on collision (`log`, `log2`, ...).
//!
//! An [`ImportSet`] may be seeded with the imports of the file the function
//! is spliced into. Seeded aliases are reused for their path and never
//! handed to another package, but only imports the function actually
//! references are listed in [`ImportSet::imports`].

use std::fmt::Write as _;

use rustc_hash::{FxHashMap, FxHashSet};

use di_ir::ident;

/// One line of an import block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Import {
    pub path: String,
    pub alias: String,
}

impl Import {
    pub fn new(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Import {
            path: path.into(),
            alias: alias.into(),
        }
    }

    /// Whether the alias has to be spelled out.
    ///
    /// Third-party paths always carry one since their package clause may
    /// not match the path. Standard library paths only need one when the
    /// alias differs from the last path element.
    pub fn needs_alias(&self) -> bool {
        if !ident::is_std_import(&self.path) {
            return true;
        }
        let last = self.path.rsplit('/').next().unwrap_or(&self.path);
        self.alias != last
    }

    /// One import line, without indentation: `"fmt"` or `env "app.com/env"`.
    pub fn line(&self) -> String {
        if self.needs_alias() {
            format!("{} \"{}\"", self.alias, self.path)
        } else {
            format!("\"{}\"", self.path)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    alias: String,
    used: bool,
}

/// Path to alias assignment for one generated file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSet {
    entries: FxHashMap<String, Entry>,
    aliases: FxHashSet<String>,
    /// Package-level names of the target package, never used as aliases.
    reserved: FxHashSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set pre-populated with the imports of an enclosing file.
    pub fn seeded(imports: impl IntoIterator<Item = Import>) -> Self {
        let mut set = Self::new();
        for import in imports {
            set.seed(import);
        }
        set
    }

    /// Reserve `import.alias` for `import.path` without marking it used.
    ///
    /// A path seeded twice keeps its first alias.
    pub fn seed(&mut self, import: Import) {
        if self.entries.contains_key(&import.path) {
            return;
        }
        self.aliases.insert(import.alias.clone());
        self.entries.insert(
            import.path,
            Entry {
                alias: import.alias,
                used: false,
            },
        );
    }

    /// Keep `name` from ever becoming an alias.
    ///
    /// Seeded aliases are left alone; they belong to the enclosing file.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Alias for `path`, assigning one on first use.
    pub fn insert(&mut self, path: &str) -> String {
        if let Some(entry) = self.entries.get_mut(path) {
            entry.used = true;
            return entry.alias.clone();
        }

        let base = ident::assumed_package_name(path);
        let mut alias = base.clone();
        let mut n = 2;
        while ident::is_reserved(&alias)
            || self.aliases.contains(&alias)
            || self.reserved.contains(&alias)
        {
            alias = format!("{base}{n}");
            n += 1;
        }
        tracing::trace!(path, %alias, "import");

        self.aliases.insert(alias.clone());
        self.entries.insert(
            path.to_string(),
            Entry {
                alias: alias.clone(),
                used: true,
            },
        );
        alias
    }

    /// The alias assigned to `path`, seeded or used.
    pub fn alias(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(|entry| entry.alias.as_str())
    }

    /// True if `name` is taken by some import, used or not.
    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains(name)
    }

    /// Imports referenced by generated code: standard library first, then
    /// everything else, each group sorted by path.
    pub fn imports(&self) -> Vec<Import> {
        let mut imports: Vec<Import> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.used)
            .map(|(path, entry)| Import::new(path.clone(), entry.alias.clone()))
            .collect();
        imports.sort_by(|a, b| {
            let a_key = (!ident::is_std_import(&a.path), &a.path);
            let b_key = (!ident::is_std_import(&b.path), &b.path);
            a_key.cmp(&b_key)
        });
        imports
    }

    /// Number of known paths, seeded included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render a gofmt-style import block, or nothing if no import is used.
    pub fn render(&self) -> String {
        render(&self.imports())
    }
}

/// Render `imports` (already ordered) as an import block.
pub(crate) fn render(imports: &[Import]) -> String {
    if imports.is_empty() {
        return String::new();
    }
    let mut out = String::from("import (\n");
    let mut std_group = true;
    for (i, import) in imports.iter().enumerate() {
        let is_std = ident::is_std_import(&import.path);
        if std_group && !is_std {
            std_group = false;
            if i > 0 {
                out.push('\n');
            }
        }
        let _ = writeln!(out, "\t{}", import.line());
    }
    out.push_str(")\n");
    out
}

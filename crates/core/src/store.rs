use hdlscope_api::{IndexStats, ModuleReference, Position, Symbol};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Indexed data of one file.
#[derive(Debug, Clone, Default)]
pub struct FileEntry {
    pub symbols: Vec<Symbol>,
    pub content_hash: Option<u64>,
}

/// Result of extracting one file, applied to the store as a whole.
#[derive(Debug, Clone)]
pub struct FileUnit {
    pub path: PathBuf,
    pub symbols: Vec<Symbol>,
    /// `(referenced name, reference)` pairs, already deduplicated.
    pub references: Vec<(String, ModuleReference)>,
    pub content_hash: Option<u64>,
}

impl FileUnit {
    pub fn empty(path: PathBuf) -> Self {
        Self {
            path,
            symbols: Vec::new(),
            references: Vec::new(),
            content_hash: None,
        }
    }
}

/// Collects the instantiation edges of one file, ignoring repeats of the
/// same `(name, path, position)`.
///
/// Both the tool's typeref-bearing `instance` symbols and the lexical
/// scanner write here.
#[derive(Debug)]
pub struct ReferenceSink {
    path: PathBuf,
    seen: HashSet<(String, Position)>,
    records: Vec<(String, ModuleReference)>,
}

impl ReferenceSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seen: HashSet::new(),
            records: Vec::new(),
        }
    }

    /// Returns `false` when the edge was already recorded.
    pub fn record(&mut self, name: &str, position: Position) -> bool {
        if !self.seen.insert((name.to_string(), position)) {
            return false;
        }
        self.records.push((
            name.to_string(),
            ModuleReference {
                path: self.path.clone(),
                position,
            },
        ));
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<(String, ModuleReference)> {
        self.records
    }
}

/// Symbol table plus module instantiation edges.
///
/// Per-file data is only ever replaced as a whole: [`IndexStore::replace_file`]
/// drops everything the file contributed before inserting the new unit.
#[derive(Debug, Default, Clone)]
pub struct IndexStore {
    files: IndexMap<PathBuf, FileEntry>,
    references: HashMap<String, Vec<ModuleReference>>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.references.clear();
    }

    /// Swaps in the freshly extracted data of `unit.path`.
    ///
    /// A file that is already indexed keeps its position.
    pub fn replace_file(&mut self, unit: FileUnit) {
        self.purge_references(&unit.path);

        for (name, reference) in unit.references {
            let refs = self.references.entry(name).or_default();
            if !refs.contains(&reference) {
                refs.push(reference);
            }
        }

        // Files the tool found nothing in keep only their references.
        if unit.symbols.is_empty() {
            self.files.shift_remove(&unit.path);
        } else {
            self.files.insert(
                unit.path,
                FileEntry {
                    symbols: unit.symbols,
                    content_hash: unit.content_hash,
                },
            );
        }
    }

    /// Forgets the symbols of `path` and every reference located in it.
    pub fn remove_file(&mut self, path: &Path) -> bool {
        let had_symbols = self.files.shift_remove(path).is_some();
        let purged = self.purge_references(path);
        had_symbols || purged > 0
    }

    fn purge_references(&mut self, path: &Path) -> usize {
        let mut purged = 0;
        self.references.retain(|_, refs| {
            let before = refs.len();
            refs.retain(|r| r.path != path);
            purged += before - refs.len();
            !refs.is_empty()
        });
        purged
    }

    /// Puts files and references in path order, then source order.
    ///
    /// Concurrent extraction applies files in completion order; this
    /// restores the order discovery produced.
    pub fn sort_by_path(&mut self) {
        self.files.sort_keys();
        for refs in self.references.values_mut() {
            refs.sort_by(|a, b| (&a.path, a.position).cmp(&(&b.path, b.position)));
        }
    }

    pub fn symbols_for(&self, path: &Path) -> Option<&[Symbol]> {
        self.files.get(path).map(|e| e.symbols.as_slice())
    }

    pub fn content_hash(&self, path: &Path) -> Option<u64> {
        self.files.get(path).and_then(|e| e.content_hash)
    }

    pub fn references_for(&self, name: &str) -> &[ModuleReference] {
        self.references
            .get(name)
            .map(|r| r.as_slice())
            .unwrap_or_default()
    }

    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &FileEntry)> {
        self.files.iter()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.files.values().flat_map(|e| e.symbols.iter())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            file_count: self.files.len(),
            symbol_count: self.files.values().map(|e| e.symbols.len()).sum(),
            module_count: self.symbols().filter(|s| s.kind.is_design_unit()).count(),
            reference_count: self.references.values().map(Vec::len).sum(),
        }
    }
}

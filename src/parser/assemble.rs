//! Builds one nested object out of a flat run of `(path, value)` pairs.
//!
//! Tables live in an arena and refer to each other by index, so a table can be
//! re-opened long after it was first declared:
//!
//! ```toml
//! [x.y.z]
//! w = 1
//!
//! [x]        # lands next to `y` inside the same `x`
//! a = 2
//!
//! [[fruit]]  # every occurrence appends a fresh table
//! [[fruit]]
//! ```
//!
//! A cache from key path to table index short-cuts repeated lookups. Replacing
//! a table, or a value on the way to one, drops every cached path below it.
//! The cache is ordered, so the paths below a prefix form one contiguous range
//! and dropping them costs only as much as the subtree being dropped.

use std::collections::BTreeMap;
use std::mem;
use std::ops::Bound;

use indexmap::IndexMap;
use tracing::trace;

use crate::{Map, Value};

type TableId = usize;

const ROOT: TableId = 0;

enum Node {
    Value(Value),
    Table(TableId),
    TableArray(Vec<TableId>),
}

pub(crate) struct Assembler {
    tables: Vec<IndexMap<String, Node>>,
    paths: BTreeMap<Vec<String>, TableId>,
}

impl Assembler {
    pub(crate) fn new() -> Self {
        let mut paths = BTreeMap::new();
        paths.insert(Vec::new(), ROOT);
        Assembler {
            tables: vec![IndexMap::new()],
            paths,
        }
    }

    /// Sets `path` to `value`. An object merges into the table already at
    /// `path`, key by key; anything else replaces what was there.
    pub(crate) fn insert(&mut self, path: Vec<String>, value: Value) {
        let Some((key, parents)) = path.split_last() else {
            return;
        };
        let parent = self.resolve(parents);
        match value {
            Value::Object(entries) => {
                let id = self.table_at(parent, key, false);
                let table = &mut self.tables[id];
                for (name, value) in entries {
                    table.insert(name, Node::Value(value));
                }
                self.register(path, id);
            }
            other => {
                let previous = self.tables[parent].insert(key.clone(), Node::Value(other));
                if matches!(previous, Some(Node::Table(_) | Node::TableArray(_))) {
                    self.forget(&path);
                }
            }
        }
    }

    /// Appends a table to the table array at `path`, creating the array on
    /// first use.
    pub(crate) fn push_table_array(&mut self, path: Vec<String>, entries: Map) {
        let Some((key, parents)) = path.split_last() else {
            return;
        };
        let parent = self.resolve(parents);
        let id = self.alloc(entries);
        if let Some(Node::TableArray(ids)) = self.tables[parent].get_mut(key.as_str()) {
            ids.push(id);
        } else if self.tables[parent]
            .insert(key.clone(), Node::TableArray(vec![id]))
            .is_some()
        {
            trace!(key = key.as_str(), "table array replaces an earlier value");
        }
        self.register(path, id);
    }

    pub(crate) fn finish(mut self) -> Map {
        self.build(ROOT)
    }

    /// Table for a parent path, creating intermediate tables as needed.
    ///
    /// A segment naming a table array resolves to its most recent element.
    fn resolve(&mut self, parents: &[String]) -> TableId {
        if let Some(&id) = self.paths.get(parents) {
            return id;
        }
        let mut current = ROOT;
        for depth in 0..parents.len() {
            let prefix = &parents[..=depth];
            current = match self.paths.get(prefix) {
                Some(&id) => id,
                None => {
                    let id = self.table_at(current, &parents[depth], true);
                    self.paths.insert(prefix.to_vec(), id);
                    id
                }
            };
        }
        current
    }

    /// The table stored under `key`, promoting an object value or replacing
    /// any other value.
    fn table_at(&mut self, parent: TableId, key: &str, descend: bool) -> TableId {
        let entries = match self.tables[parent].get_mut(key) {
            Some(Node::Table(id)) => return *id,
            Some(Node::TableArray(ids)) if descend && !ids.is_empty() => {
                return ids[ids.len() - 1];
            }
            Some(Node::Value(Value::Object(entries))) => mem::take(entries),
            Some(_) => {
                trace!(key, "table replaces an earlier value");
                Map::new()
            }
            None => Map::new(),
        };
        let id = self.alloc(entries);
        self.tables[parent].insert(key.to_string(), Node::Table(id));
        id
    }

    fn alloc(&mut self, entries: Map) -> TableId {
        let id = self.tables.len();
        self.tables.push(
            entries
                .into_iter()
                .map(|(key, value)| (key, Node::Value(value)))
                .collect(),
        );
        id
    }

    fn register(&mut self, path: Vec<String>, id: TableId) {
        self.forget(&path);
        self.paths.insert(path, id);
    }

    /// Drops `path` and every cached path below it.
    fn forget(&mut self, path: &[String]) {
        let stale: Vec<Vec<String>> = self
            .paths
            .range::<[String], _>((Bound::Included(path), Bound::Unbounded))
            .map(|(cached, _)| cached)
            .take_while(|cached| cached.starts_with(path))
            .cloned()
            .collect();
        for cached in stale {
            self.paths.remove(&cached);
        }
    }

    fn build(&mut self, id: TableId) -> Map {
        let table = mem::take(&mut self.tables[id]);
        let mut map = Map::with_capacity(table.len());
        for (key, node) in table {
            let value = match node {
                Node::Value(value) => value,
                Node::Table(child) => Value::Object(self.build(child)),
                Node::TableArray(ids) => Value::Array(
                    ids.into_iter()
                        .map(|child| Value::Object(self.build(child)))
                        .collect(),
                ),
            };
            map.insert(key, value);
        }
        map
    }
}

//! Graph node identity and payload.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Symbol name reported for file-level nodes.
pub const FILE_SYMBOL_NAME: &str = "(file)";

/// Symbol name used for default exports.
pub const DEFAULT_EXPORT: &str = "default";

/// Identity of a graph node: a whole file, or one named declaration in it.
///
/// The display form is `"<path>"` for files and `"<path>#<name>"` for symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    File(String),
    Symbol { file: String, name: String },
}

impl NodeId {
    pub fn file(path: impl Into<String>) -> Self {
        Self::File(path.into())
    }

    pub fn symbol(file: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Symbol {
            file: file.into(),
            name: name.into(),
        }
    }

    /// Parse a display-form id. Everything after the last `#` is the symbol name.
    pub fn parse(id: &str) -> Self {
        match id.rsplit_once('#') {
            Some((file, name)) => Self::symbol(file, name),
            None => Self::file(id),
        }
    }

    /// Path of the file that owns this node.
    pub fn file_path(&self) -> &str {
        match self {
            Self::File(path) => path,
            Self::Symbol { file, .. } => file,
        }
    }

    /// Declared name, or `(file)` for file nodes.
    pub fn symbol_name(&self) -> &str {
        match self {
            Self::File(_) => FILE_SYMBOL_NAME,
            Self::Symbol { name, .. } => name,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// The file node owning this node (itself for file nodes).
    pub fn to_file(&self) -> NodeId {
        Self::File(self.file_path().to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.write_str(path),
            Self::Symbol { file, name } => write!(f, "{file}#{name}"),
        }
    }
}

impl FromStr for NodeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// What kind of declaration a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKind {
    File,
    Function,
    Class,
    Enum,
    Interface,
    TypeAlias,
    Variable,
    Default,
}

/// A node of the symbol graph together with its edge sets.
///
/// Edge sets are only mutated through [`crate::SymbolGraph::add_edge`], which
/// keeps `dependencies` and `dependents` mirrored.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolNode {
    pub id: NodeId,
    pub kind: SymbolKind,
    #[serde(serialize_with = "sorted_set")]
    pub(crate) dependencies: FxHashSet<NodeId>,
    #[serde(serialize_with = "sorted_set")]
    pub(crate) dependents: FxHashSet<NodeId>,
}

impl SymbolNode {
    pub(crate) fn new(id: NodeId, kind: SymbolKind) -> Self {
        Self {
            id,
            kind,
            dependencies: FxHashSet::default(),
            dependents: FxHashSet::default(),
        }
    }

    pub fn file_path(&self) -> &str {
        self.id.file_path()
    }

    pub fn symbol_name(&self) -> &str {
        self.id.symbol_name()
    }

    /// Nodes this node references.
    pub fn dependencies(&self) -> &FxHashSet<NodeId> {
        &self.dependencies
    }

    /// Nodes that reference this node.
    pub fn dependents(&self) -> &FxHashSet<NodeId> {
        &self.dependents
    }
}

fn sorted_set<S: Serializer>(set: &FxHashSet<NodeId>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut ids: Vec<&NodeId> = set.iter().collect();
    ids.sort();
    serializer.collect_seq(ids)
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::nodes::MemberNode;
use crate::version::Version;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub name: String,
    pub version: Version,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A direct dependency edge: the named package must resolve to a version
/// with the same major and a minor of at least `version.minor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: Version,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    pub fn is_satisfied_by(&self, version: Version) -> bool {
        version.major == self.version.major && version.minor >= self.version.minor
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~={}", self.name, self.version)
    }
}

/// The direct dependencies of a package, keyed and iterated by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dependencies {
    direct: BTreeMap<String, Dependency>,
}

impl Dependencies {
    pub fn new(dependencies: Vec<Dependency>) -> Self {
        Self {
            direct: dependencies
                .into_iter()
                .map(|dependency| (dependency.name.clone(), dependency))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.direct.get(name)
    }

    pub fn add(&mut self, dependency: Dependency) {
        self.direct.insert(dependency.name.clone(), dependency);
    }

    pub fn remove(&mut self, name: &str) -> Option<Dependency> {
        self.direct.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.direct.values()
    }

    pub fn len(&self) -> usize {
        self.direct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty()
    }
}

/// A single pinned selection in a lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub version: Version,
}

impl Pin {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={}", self.name, self.version)
    }
}

/// A satisfying assignment from each transitively required name to a
/// specific version, with bookkeeping recording which parent introduced
/// each pin and which index it was solved against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lock {
    #[serde(default)]
    pins: BTreeMap<String, Pin>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    parents: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    sources: BTreeMap<String, String>,
}

impl Lock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Pin> {
        self.pins.get(name)
    }

    pub fn add(&mut self, pin: Pin, parent: &str, source: &str) {
        self.parents.insert(pin.name.clone(), parent.to_string());
        self.sources.insert(pin.name.clone(), source.to_string());
        self.pins.insert(pin.name.clone(), pin);
    }

    /// A copy of this lock extended with one more pin. The solver commits
    /// to candidates on cloned locks so failed branches leave no trace.
    pub fn clone_add(&self, pin: Pin, parent: &str, source: &str) -> Self {
        let mut lock = self.clone();
        lock.add(pin, parent, source);
        lock
    }

    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.parents.get(name).map(String::as_str)
    }

    pub fn source_of(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.pins.values()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl fmt::Display for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pins.is_empty() {
            return write!(f, "<empty>");
        }
        let pins: Vec<String> = self.pins.values().map(Pin::to_string).collect();
        write!(f, "<{}>", pins.join(", "))
    }
}

/// The root of a package's interface model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Members {
    nodes: BTreeMap<String, MemberNode>,
}

impl Members {
    /// Interface models are edited in memory (and by hand in the package
    /// file); the command surface itself never mutates them.
    #[allow(dead_code)]
    pub fn insert(&mut self, node: MemberNode) {
        self.nodes.insert(node.name().to_string(), node);
    }

    #[allow(dead_code)]
    pub fn remove(&mut self, name: &str) -> Option<MemberNode> {
        self.nodes.remove(name)
    }

    pub fn nodes(&self) -> &BTreeMap<String, MemberNode> {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub info: Info,
    #[serde(default)]
    pub dependencies: Dependencies,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<Lock>,
    #[serde(default)]
    pub members: Members,
}

impl Package {
    pub fn new(name: impl Into<String>, version: Version, dependencies: Vec<Dependency>) -> Self {
        Self {
            info: Info {
                name: name.into(),
                version,
                description: None,
            },
            dependencies: Dependencies::new(dependencies),
            lock: None,
            members: Members::default(),
        }
    }

    pub fn to_pin(&self) -> Pin {
        Pin::new(self.info.name.clone(), self.info.version)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={}", self.info.name, self.info.version)
    }
}

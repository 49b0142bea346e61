//! Dotted route names and segment utilities.
//!
//! # Responsibilities
//! - Represent route names like `d.h.m` and node names like `d.h`
//! - Split names into segments and compute depth
//! - Walk ancestors without allocating per step
//!
//! # Design Decisions
//! - `""` is the root: zero segments, depth 0
//! - Node names share the representation of route names

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator between route segments.
pub const SEPARATOR: char = '.';

/// A dot-separated route name, e.g. `"d.h.m"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteName(String);

/// Position of a route node in the UI tree. Same shape as a route name.
pub type NodeName = RouteName;

impl RouteName {
    /// Create a route name from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The root name (`""`).
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the root name `""`.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the segments in order. The root yields nothing.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        let name = self.0.as_str();
        (!name.is_empty())
            .then(|| name.split(SEPARATOR))
            .into_iter()
            .flatten()
    }

    /// Segment at `index`, if the name is that deep.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments().nth(index)
    }

    /// Number of segments. The root has depth 0.
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches(SEPARATOR).count() + 1
        }
    }

    /// Name of the enclosing route, `None` for the root.
    ///
    /// A single-segment name has the root as parent.
    pub fn parent(&self) -> Option<RouteName> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rfind(SEPARATOR) {
            Some(pos) => Self(self.0[..pos].to_string()),
            None => Self::root(),
        })
    }

    /// Append one segment.
    pub fn child(&self, segment: &str) -> RouteName {
        if self.is_root() {
            Self(segment.to_string())
        } else {
            Self(format!("{}{}{}", self.0, SEPARATOR, segment))
        }
    }

    /// Lazily yields every prefix of this name, shallowest first.
    ///
    /// For `d.h.m`: `d` → `d.h` → `d.h.m`. The root yields nothing.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            name: &self.0,
            end: 0,
        }
    }

    /// True when `self` equals `other` or lies below it.
    ///
    /// With `strict`, only equality counts. Everything descends from the root.
    pub fn is_descendant_of(&self, other: &RouteName, strict: bool) -> bool {
        if self == other {
            return true;
        }
        if strict {
            return false;
        }
        other.is_root()
            || (self.0.starts_with(other.as_str())
                && self.0[other.0.len()..].starts_with(SEPARATOR))
    }
}

/// Iterator over the prefixes of a route name. See [`RouteName::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    name: &'a str,
    end: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end >= self.name.len() {
            return None;
        }
        let from = if self.end == 0 { 0 } else { self.end + 1 };
        self.end = match self.name[from..].find(SEPARATOR) {
            Some(pos) => from + pos,
            None => self.name.len(),
        };
        Some(&self.name[..self.end])
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RouteName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for RouteName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RouteName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&String> for RouteName {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

impl AsRef<str> for RouteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RouteName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RouteName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

//! Location descriptors for failures in nested values.
//!
//! A [`Path`] is an immutable linked chain of segments ending in
//! [`Path::Root`]. Guards produce failures at the root; enclosing guards
//! re-scope them with [`Path::at_path`] so that a failure raised at list
//! index 2 and then wrapped under the property `myList` reads `myList[2]`.

use std::fmt::{self, Display};
use std::sync::Arc;

use crate::error::GuardError;

/// A location within a processed value.
///
/// Each non-root segment points to exactly one parent. Parents are shared
/// through [`Arc`], so cloning a path is cheap.
///
/// # Example
///
/// ```rust
/// use inputguard::Path;
///
/// let path = Path::index(2).at_property("addresses").at_property("user");
/// assert_eq!(path.format(), "user.addresses[2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Path {
    /// The processed value itself.
    #[default]
    Root,
    /// A named property of the parent.
    Property { parent: Arc<Path>, name: String },
    /// A positional element of the parent.
    Index { parent: Arc<Path>, index: usize },
    /// An element of an unordered parent, where no index is meaningful.
    Element { parent: Arc<Path> },
}

impl Path {
    /// Creates the root path.
    pub fn root() -> Self {
        Path::Root
    }

    /// Creates a property path directly under the root.
    pub fn property(name: impl Into<String>) -> Self {
        Path::Property {
            parent: Arc::new(Path::Root),
            name: name.into(),
        }
    }

    /// Creates an index path directly under the root.
    pub fn index(index: usize) -> Self {
        Path::Index {
            parent: Arc::new(Path::Root),
            index,
        }
    }

    /// Creates an index path from a signed index.
    ///
    /// Returns [`GuardError::NegativeIndex`] if `index` is negative.
    pub fn try_index(index: i64) -> Result<Self, GuardError> {
        usize::try_from(index)
            .map(Self::index)
            .map_err(|_| GuardError::NegativeIndex(index))
    }

    /// Creates an anonymous element path directly under the root.
    pub fn element() -> Self {
        Path::Element {
            parent: Arc::new(Path::Root),
        }
    }

    /// Places this path under the property `name`.
    pub fn at_property(&self, name: impl Into<String>) -> Self {
        self.at_path(&Path::property(name))
    }

    /// Places this path under the index `index`.
    pub fn at_index(&self, index: usize) -> Self {
        self.at_path(&Path::index(index))
    }

    /// Replaces the root of this path with `outer`.
    ///
    /// Does not modify `self`; the segments above the root are rebuilt.
    pub fn at_path(&self, outer: &Path) -> Self {
        match self {
            Path::Root => outer.clone(),
            Path::Property { parent, name } => Path::Property {
                parent: Arc::new(parent.at_path(outer)),
                name: name.clone(),
            },
            Path::Index { parent, index } => Path::Index {
                parent: Arc::new(parent.at_path(outer)),
                index: *index,
            },
            Path::Element { parent } => Path::Element {
                parent: Arc::new(parent.at_path(outer)),
            },
        }
    }

    /// Returns true if this is the root path.
    pub fn is_root(&self) -> bool {
        matches!(self, Path::Root)
    }

    /// Returns the parent path, or None for the root.
    pub fn parent(&self) -> Option<&Path> {
        match self {
            Path::Root => None,
            Path::Property { parent, .. }
            | Path::Index { parent, .. }
            | Path::Element { parent } => Some(parent),
        }
    }

    /// Returns the number of segments above the root.
    pub fn depth(&self) -> usize {
        self.parent().map_or(0, |parent| parent.depth() + 1)
    }

    /// Renders this path in human readable form (`lastName`, `myList[0]`, ...).
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Root => write!(f, "value"),
            Path::Property { parent, name } if parent.is_root() => write!(f, "{}", name),
            Path::Property { parent, name } => write!(f, "{}.{}", parent, name),
            Path::Index { parent, index } if parent.is_root() => write!(f, "index [{}]", index),
            Path::Index { parent, index } => write!(f, "{}[{}]", parent, index),
            Path::Element { parent } if parent.is_root() => write!(f, "element"),
            Path::Element { parent } => write!(f, "{}[?]", parent),
        }
    }
}

//! Tag tree for HRML markup.
//!
//! Tags live in a single arena owned by [`Tree`] and refer to each other by
//! [`TagId`]. Ids are handed out in creation order starting with the root at 1
//! and are never reused, so an id is also the tag's position in the arena.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Name given to the synthetic root.
pub const ROOT_NAME: &str = "#root";

/// Handle to a tag in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u32);

impl TagId {
    pub const ROOT: TagId = TagId(1);

    /// The numeric id (root = 1).
    pub fn get(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the tag tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// `None` only for the synthetic root.
    pub parent: Option<TagId>,
    pub children: Vec<TagId>,
    pub attributes: BTreeMap<String, String>,
}

impl Tag {
    fn new(id: TagId, parent: Option<TagId>, name: String) -> Self {
        Self {
            id,
            name,
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena of tags rooted at a synthetic root tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    tags: Vec<Tag>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A tree holding only the root.
    pub fn new() -> Self {
        Self {
            tags: vec![Tag::new(TagId::ROOT, None, ROOT_NAME.to_string())],
        }
    }

    pub fn root(&self) -> &Tag {
        &self.tags[0]
    }

    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(id.index())
    }

    /// Number of tags, root included.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Always false: the root is always present.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// All tags in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Create a tag named `name` as the last child of `parent`.
    ///
    /// Returns `None` if `parent` does not belong to this tree.
    pub fn push_child(&mut self, parent: TagId, name: impl Into<String>) -> Option<TagId> {
        self.get(parent)?;

        let id = TagId(u32::try_from(self.tags.len() + 1).ok()?);
        self.tags.push(Tag::new(id, Some(parent), name.into()));
        self.tags[parent.index()].children.push(id);
        Some(id)
    }

    /// Add an attribute to a tag. The first value set for a name wins.
    ///
    /// Returns `false` if the tag already had the attribute or does not exist.
    pub fn set_attribute(
        &mut self,
        id: TagId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        let Some(tag) = self.tags.get_mut(id.index()) else {
            return false;
        };
        match tag.attributes.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// First direct child of `parent` named `name`, in markup order.
    pub fn child(&self, parent: TagId, name: &str) -> Option<TagId> {
        self.get(parent)?
            .children
            .iter()
            .copied()
            .find(|&id| self.get(id).is_some_and(|tag| tag.name == name))
    }

    /// Parent chain of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: TagId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).and_then(|tag| tag.parent),
        }
    }

    /// Nesting depth: 0 for the root, 1 for top-level tags.
    pub fn depth(&self, id: TagId) -> usize {
        self.ancestors(id).count()
    }
}

/// Iterator over a tag's parent chain. See [`Tree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<TagId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Tag;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.tree.get(self.next?)?;
        self.next = tag.parent;
        Some(tag)
    }
}

/// Dump of the tag pool: one line per tag, then its attributes indented.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in &self.tags {
            write!(f, "{}\t{}", tag.id, tag.name)?;
            if let Some(parent) = tag.parent.and_then(|p| self.get(p)) {
                write!(f, "\tchild of: {}", parent.name)?;
            }
            writeln!(f)?;
            for (key, value) in &tag.attributes {
                writeln!(f, "\t{key} = {value}")?;
            }
        }
        Ok(())
    }
}

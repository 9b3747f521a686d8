//! Token tree — the engine's output structure.
//!
//! A [`TokenNode`] is either a typed [`TokenLeaf`] or a [`TokenNode::Group`]
//! of named children. The distinction is carried by the enum tag, never
//! guessed from key names, so a group may freely contain children called
//! `type` or `value`.
//!
//! Trees are built once through [`GroupBuilder`] and never mutated after;
//! transformations such as [`TokenTree::map_colors`] return a new tree.
//! Children live in `BTreeMap`s, so iteration and serialization order are
//! deterministic and identical inputs produce byte-identical JSON.

use std::collections::BTreeMap;
use std::fmt;

use hs_color::Color;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

/// The `type` of a leaf token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Color,
    Dimension,
    String,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::String => "string",
        })
    }
}

/// A leaf token value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    Color(Color),
    /// A CSS dimension such as `8px` or `3mm`.
    Dimension(String),
    Text(String),
}

impl TokenValue {
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        match self {
            Self::Color(_) => TokenType::Color,
            Self::Dimension(_) => TokenType::Dimension,
            Self::Text(_) => TokenType::String,
        }
    }

    #[must_use]
    pub const fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "{c}"),
            Self::Dimension(s) | Self::Text(s) => f.write_str(s),
        }
    }
}

/// A typed value plus free-form string metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLeaf {
    pub value: TokenValue,
    pub metadata: BTreeMap<String, String>,
}

impl TokenLeaf {
    #[must_use]
    pub const fn new(value: TokenValue) -> Self {
        Self {
            value,
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_meta(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_owned(), value.into());
        self
    }

    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.value.token_type()
    }
}

impl Serialize for TokenLeaf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.metadata.is_empty() { 2 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", &self.token_type())?;
        map.serialize_entry("value", &self.value.to_string())?;
        if !self.metadata.is_empty() {
            map.serialize_entry("metadata", &self.metadata)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// One node of the token tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenNode {
    Leaf(TokenLeaf),
    Group(BTreeMap<String, TokenNode>),
}

impl TokenNode {
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    #[must_use]
    pub const fn as_leaf(&self) -> Option<&TokenLeaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    #[must_use]
    pub const fn children(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Group(children) => Some(children),
            Self::Leaf(_) => None,
        }
    }

    fn map_leaves(&self, f: &impl Fn(&TokenLeaf) -> TokenLeaf) -> Self {
        match self {
            Self::Leaf(leaf) => Self::Leaf(f(leaf)),
            Self::Group(children) => Self::Group(
                children
                    .iter()
                    .map(|(name, child)| (name.clone(), child.map_leaves(f)))
                    .collect(),
            ),
        }
    }

    fn collect_leaves<'a>(
        &'a self,
        path: &mut Vec<&'a str>,
        out: &mut Vec<(String, &'a TokenLeaf)>,
    ) {
        match self {
            Self::Leaf(leaf) => out.push((path.join("."), leaf)),
            Self::Group(children) => {
                for (name, child) in children {
                    path.push(name);
                    child.collect_leaves(path, out);
                    path.pop();
                }
            }
        }
    }
}

impl Serialize for TokenNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(leaf) => leaf.serialize(serializer),
            Self::Group(children) => children.serialize(serializer),
        }
    }
}

// ---------------------------------------------------------------------------
// TokenTree
// ---------------------------------------------------------------------------

/// Category name → token node. Produced fresh by every generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenTree {
    groups: BTreeMap<String, TokenNode>,
}

impl TokenTree {
    #[must_use]
    pub fn builder() -> TreeBuilder {
        TreeBuilder::default()
    }

    /// Top-level categories.
    #[must_use]
    pub const fn groups(&self) -> &BTreeMap<String, TokenNode> {
        &self.groups
    }

    /// Look up a node by dotted path (`"brand.secondary"`).
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&TokenNode> {
        let mut parts = path.split('.');
        let mut node = self.groups.get(parts.next()?)?;
        for part in parts {
            node = node.children()?.get(part)?;
        }
        Some(node)
    }

    /// The color at `path`, if that path is a color leaf.
    #[must_use]
    pub fn color(&self, path: &str) -> Option<Color> {
        self.get(path)?.as_leaf()?.value.as_color()
    }

    /// Every leaf with its dotted path, depth first, in key order.
    #[must_use]
    pub fn leaves(&self) -> Vec<(String, &TokenLeaf)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        for (name, node) in &self.groups {
            path.push(name.as_str());
            node.collect_leaves(&mut path, &mut out);
            path.pop();
        }
        out
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// A new tree with every color leaf passed through `f`.
    ///
    /// Non-color leaves and all metadata are copied unchanged.
    #[must_use]
    pub fn map_colors(&self, f: impl Fn(Color) -> Color) -> Self {
        let remap = |leaf: &TokenLeaf| match leaf.value {
            TokenValue::Color(c) => TokenLeaf {
                value: TokenValue::Color(f(c)),
                metadata: leaf.metadata.clone(),
            },
            _ => leaf.clone(),
        };
        Self {
            groups: self
                .groups
                .iter()
                .map(|(name, node)| (name.clone(), node.map_leaves(&remap)))
                .collect(),
        }
    }

    /// A new tree with `group` added (or replacing a same-named group).
    #[must_use]
    pub fn with_group(&self, name: &str, group: GroupBuilder) -> Self {
        let mut groups = self.groups.clone();
        groups.insert(name.to_owned(), group.build());
        Self { groups }
    }
}

/// Builder for a [`TokenTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    groups: BTreeMap<String, TokenNode>,
}

impl TreeBuilder {
    #[must_use]
    pub fn group(mut self, name: &str, group: GroupBuilder) -> Self {
        self.groups.insert(name.to_owned(), group.build());
        self
    }

    #[must_use]
    pub fn build(self) -> TokenTree {
        TokenTree {
            groups: self.groups,
        }
    }
}

/// Builder for one group node.
#[derive(Debug, Default)]
pub struct GroupBuilder {
    children: BTreeMap<String, TokenNode>,
}

impl GroupBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn leaf(mut self, name: &str, leaf: TokenLeaf) -> Self {
        self.children.insert(name.to_owned(), TokenNode::Leaf(leaf));
        self
    }

    #[must_use]
    pub fn color(self, name: &str, color: Color) -> Self {
        self.leaf(name, TokenLeaf::new(TokenValue::Color(color)))
    }

    /// A color leaf that records which token it mirrors.
    #[must_use]
    pub fn alias(self, name: &str, color: Color, target: &str) -> Self {
        self.leaf(
            name,
            TokenLeaf::new(TokenValue::Color(color)).with_meta("aliasOf", target),
        )
    }

    #[must_use]
    pub fn dimension(self, name: &str, value: &str) -> Self {
        self.leaf(name, TokenLeaf::new(TokenValue::Dimension(value.to_owned())))
    }

    #[must_use]
    pub fn text(self, name: &str, value: &str) -> Self {
        self.leaf(name, TokenLeaf::new(TokenValue::Text(value.to_owned())))
    }

    #[must_use]
    pub fn group(mut self, name: &str, group: Self) -> Self {
        self.children.insert(name.to_owned(), group.build());
        self
    }

    #[must_use]
    pub fn build(self) -> TokenNode {
        TokenNode::Group(self.children)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Dependency tree data structures
//!
//! A [`Tree`] owns its nodes in creation order, which is also word order.
//! Parent links are stored as [`Head`] values (indices into the node list or
//! the technical root), so nodes never hold references to each other.

use rustc_hash::FxHashMap;
use std::ops::RangeInclusive;

/// Index of a node within [`Tree::descendants`] (0-based)
pub type NodeId = usize;

/// Governor of a node: the technical root or another node of the same tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Head {
    Root,
    Node(NodeId),
}

impl Head {
    /// Convert a CoNLL-U head index (0 = root, 1-based otherwise)
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Head::Root,
            n => Head::Node(n - 1),
        }
    }

    /// The CoNLL-U head index for this governor
    pub fn index(self) -> usize {
        match self {
            Head::Root => 0,
            Head::Node(id) => id + 1,
        }
    }
}

/// A syntactic word
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// 1-based word-order index
    pub ord: usize,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: String,
    pub feats: String,
    pub deprel: String,
    /// Enhanced dependencies, unparsed
    pub raw_deps: String,
    pub misc: String,
    /// Columns configured under names other than the standard ones
    pub extra: FxHashMap<String, String>,
    pub parent: Option<Head>,
    pub children: Vec<NodeId>,
}

impl Node {
    /// Create an unattached node at the given word-order position
    pub fn new(ord: usize) -> Self {
        Self {
            ord,
            ..Self::default()
        }
    }

    /// Look up a string attribute by its column name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "form" => Some(&self.form),
            "lemma" => Some(&self.lemma),
            "upos" => Some(&self.upos),
            "xpos" => Some(&self.xpos),
            "feats" => Some(&self.feats),
            "deprel" => Some(&self.deprel),
            "deps" | "raw_deps" => Some(&self.raw_deps),
            "misc" => Some(&self.misc),
            _ => self.extra.get(name).map(String::as_str),
        }
    }

    /// Set a string attribute by its column name
    ///
    /// Unknown names land in [`Node::extra`].
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let slot = match name {
            "form" => &mut self.form,
            "lemma" => &mut self.lemma,
            "upos" => &mut self.upos,
            "xpos" => &mut self.xpos,
            "feats" => &mut self.feats,
            "deprel" => &mut self.deprel,
            "deps" | "raw_deps" => &mut self.raw_deps,
            "misc" => &mut self.misc,
            _ => {
                self.extra.insert(name.to_string(), value.to_string());
                return;
            }
        };
        value.clone_into(slot);
    }
}

/// A surface token spanning several consecutive words (e.g. a contraction)
///
/// Has no place in the dependency structure; it only groups words.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiwordToken {
    /// Node ids covered, inclusive
    pub span: RangeInclusive<NodeId>,
    pub form: String,
    pub misc: Option<String>,
}

/// A dependency tree (sentence)
#[derive(Debug, Clone, Default)]
pub struct Tree {
    pub sent_id: Option<String>,
    pub text: Option<String>,
    /// Free-text comment lines, marker stripped, each terminated by `\n`
    pub comment: Option<String>,
    nodes: Vec<Node>,
    root_children: Vec<NodeId>,
    multiword_tokens: Vec<MultiwordToken>,
}

impl Tree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Remove and return the last node; parents must not be resolved yet
    pub(crate) fn pop_node(&mut self) -> Option<Node> {
        self.nodes.pop()
    }

    /// All nodes in word order
    pub fn descendants(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable reference to a node by ID
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Set the parent of a node
    ///
    /// Does nothing if either id is out of range.
    pub fn set_parent(&mut self, child_id: NodeId, head: Head) {
        if child_id >= self.nodes.len() {
            return;
        }
        match head {
            Head::Root => self.root_children.push(child_id),
            Head::Node(parent_id) => match self.nodes.get_mut(parent_id) {
                Some(parent) => parent.children.push(child_id),
                None => return,
            },
        }
        self.nodes[child_id].parent = Some(head);
    }

    /// Get the parent of a node
    pub fn parent(&self, node_id: NodeId) -> Option<Head> {
        self.get_node(node_id).and_then(|node| node.parent)
    }

    /// Ids of the nodes governed by `head`, in word order
    pub fn children(&self, head: Head) -> &[NodeId] {
        match head {
            Head::Root => &self.root_children,
            Head::Node(id) => self
                .get_node(id)
                .map(|node| node.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    /// Register a multi-word token over `span`
    ///
    /// Returns `None` if the span is empty or reaches past the last node.
    pub fn create_multiword_token(
        &mut self,
        span: RangeInclusive<NodeId>,
        form: &str,
    ) -> Option<&mut MultiwordToken> {
        if span.is_empty() || *span.end() >= self.nodes.len() {
            return None;
        }
        self.multiword_tokens.push(MultiwordToken {
            span,
            form: form.to_string(),
            misc: None,
        });
        self.multiword_tokens.last_mut()
    }

    pub fn multiword_tokens(&self) -> &[MultiwordToken] {
        &self.multiword_tokens
    }

    /// The words covered by a multi-word token
    pub fn words(&self, token: &MultiwordToken) -> &[Node] {
        self.nodes.get(token.span.clone()).unwrap_or(&[])
    }

    /// The multi-word token a node belongs to, if any
    pub fn multiword_token_of(&self, id: NodeId) -> Option<&MultiwordToken> {
        self.multiword_tokens
            .iter()
            .find(|token| token.span.contains(&id))
    }
}

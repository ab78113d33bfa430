//! Deterministic rendering of nested key/value trees.
//!
//! `Markup` is parameterized only by the tab width, so the same tree always
//! renders to the same bytes. Both the runtime-object and the type-declaration
//! generators go through it.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Words that cannot start a `var` declaration or name an interface.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "interface", "let", "new", "null", "return", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// A node of a rendered tree: either a value or a nested group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(String),
    Branch(Tree),
}

/// Ordered list of named nodes. Insertion order is rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<(String, Node)>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leaf(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, Node::Leaf(value.into()));
        self
    }

    pub fn branch(mut self, name: impl Into<String>, tree: Tree) -> Self {
        self.push(name, Node::Branch(tree));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, node: Node) {
        self.entries.push((name.into(), node));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        for (name, value) in iter {
            tree.push(name, Node::Leaf(value.into()));
        }
        tree
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markup {
    tab_size: usize,
}

impl Markup {
    pub fn new(tab_size: usize) -> Self {
        Self { tab_size }
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.tab_size * level)
    }

    /// Render `tree` as a JavaScript object literal.
    ///
    /// The opening brace is not indented; the closing brace is indented to
    /// `level`, so the result can follow `name = ` on a line at that level.
    pub fn js_object(&self, tree: &Tree, level: usize) -> String {
        self.block(tree, level, ",", "", js_object_key, |markup, node, level| match node {
            Node::Leaf(value) => js_string(value),
            Node::Branch(tree) => markup.js_object(tree, level),
        })
    }

    /// Render the shape of `tree` as a TypeScript object type. Every leaf
    /// becomes a `string` slot; values are not part of the shape.
    pub fn ts_shape(&self, tree: &Tree, level: usize) -> String {
        self.block(tree, level, "", ";", js_property_name, |markup, node, level| match node {
            Node::Leaf(_) => "string".to_string(),
            Node::Branch(tree) => markup.ts_shape(tree, level),
        })
    }

    fn block<F>(
        &self,
        tree: &Tree,
        level: usize,
        separator: &str,
        terminator: &str,
        property: fn(&str) -> Cow<'_, str>,
        render_node: F,
    ) -> String
    where
        F: Fn(&Self, &Node, usize) -> String,
    {
        if tree.is_empty() {
            return "{}".to_string();
        }

        let inner = self.indent(level + 1);
        let last = tree.len() - 1;
        let mut out = String::from("{\n");
        for (i, (name, node)) in tree.iter().enumerate() {
            out.push_str(&inner);
            out.push_str(&property(name));
            out.push_str(": ");
            out.push_str(&render_node(self, node, level + 1));
            out.push_str(terminator);
            if i != last {
                out.push_str(separator);
            }
            out.push('\n');
        }
        out.push_str(&self.indent(level));
        out.push('}');
        out
    }
}

/// Property name that JavaScript object literals treat specially.
pub const PROTO_KEY: &str = "__proto__";

/// Property name usable in an object literal or a type member.
pub fn js_property_name(name: &str) -> Cow<'_, str> {
    if is_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(js_string(name))
    }
}

/// Key of an object literal. `__proto__` is written as a computed key,
/// since `__proto__: value` sets the prototype instead of a property.
pub fn js_object_key(name: &str) -> Cow<'_, str> {
    if name == PROTO_KEY {
        Cow::Owned(format!("[{}]", js_string(name)))
    } else {
        js_property_name(name)
    }
}

/// `base.name`, or `base["name"]` when `name` is not an identifier.
pub fn js_member_access(base: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{}.{}", base, name)
    } else {
        format!("{}[{}]", base, js_string(name))
    }
}

/// Double-quoted string literal. JSON string syntax is a subset of
/// JavaScript's, so serde_json's escaping is reused.
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Escape a value for a single `key=value` line.
pub fn flat_value(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

//! Concrete syntax tree.
//!
//! The parser's output, with no semantics attached: a rule node carries the
//! name of the grammar rule that matched and its children in source order;
//! a terminal node carries the terminal kind and the matched text.
//! Anonymous punctuation (`(`, `=`, `+`, keywords) never appears in the
//! tree, only named terminals do.
//!
//! Names are plain strings because the vocabulary belongs to whichever
//! grammar produced the tree. The lark grammar's names live in
//! [`crate::grammar`].

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};

use lark_stack::ensure_sufficient_stack;

use crate::Span;

/// A node of the concrete tree.
///
/// Trees can be far deeper than the native stack allows for plain
/// recursion: every binary operator adds two levels and every parenthesis
/// about ten. The recursive trait impls below grow the stack as they go,
/// and dropping a tree never recurses.
pub enum CstNode {
    /// A grammar rule with its matched children.
    Rule(RuleNode),
    /// A named terminal with its literal text.
    Terminal(Token),
}

/// A rule node: rule name plus ordered children.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleNode {
    pub name: String,
    pub children: Vec<CstNode>,
}

/// A terminal node: terminal kind plus the text it matched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: String,
    pub value: String,
    pub span: Span,
}

impl CstNode {
    /// Build a rule node.
    pub fn rule(name: impl Into<String>, children: Vec<CstNode>) -> Self {
        CstNode::Rule(RuleNode {
            name: name.into(),
            children,
        })
    }

    /// Build a terminal node without a source location.
    pub fn terminal(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self::terminal_at(kind, value, Span::DUMMY)
    }

    /// Build a terminal node at `span`.
    pub fn terminal_at(kind: impl Into<String>, value: impl Into<String>, span: Span) -> Self {
        CstNode::Terminal(Token {
            kind: kind.into(),
            value: value.into(),
            span,
        })
    }

    /// Whether this is a rule node.
    #[inline]
    pub fn is_rule(&self) -> bool {
        matches!(self, CstNode::Rule(_))
    }

    /// Whether this is a terminal node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, CstNode::Terminal(_))
    }

    /// Rule name or terminal kind.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            CstNode::Rule(rule) => &rule.name,
            CstNode::Terminal(token) => &token.kind,
        }
    }

    /// Children of a rule node; terminals have none.
    #[inline]
    pub fn children(&self) -> &[CstNode] {
        match self {
            CstNode::Rule(rule) => &rule.children,
            CstNode::Terminal(_) => &[],
        }
    }

    /// First child, if any.
    #[inline]
    pub fn first_child(&self) -> Option<&CstNode> {
        self.children().first()
    }

    /// Literal text of a terminal node.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        match self {
            CstNode::Rule(_) => None,
            CstNode::Terminal(token) => Some(&token.value),
        }
    }

    /// Source span of a terminal, or the merged span of a rule's terminals.
    ///
    /// Returns `None` for a rule with no terminal descendants.
    pub fn span(&self) -> Option<Span> {
        ensure_sufficient_stack(|| match self {
            CstNode::Terminal(token) => Some(token.span),
            CstNode::Rule(rule) => rule
                .children
                .iter()
                .filter_map(CstNode::span)
                .reduce(Span::merge),
        })
    }

    /// Depth of the tree; a lone terminal has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children().iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Render the tree one node per line, indented two spaces per level.
    ///
    /// A rule whose only child is a terminal is printed on one line as
    /// `name<TAB>text`, matching the grammar tool's `Tree.pretty()`.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, level: usize) {
        ensure_sufficient_stack(|| self.write_pretty_inner(out, level));
    }

    fn write_pretty_inner(&self, out: &mut String, level: usize) {
        let indent = "  ".repeat(level);
        match self {
            CstNode::Terminal(token) => {
                let _ = writeln!(out, "{indent}{}", token.value);
            }
            CstNode::Rule(rule) => match rule.children.as_slice() {
                [CstNode::Terminal(token)] => {
                    let _ = writeln!(out, "{indent}{}\t{}", rule.name, token.value);
                }
                children => {
                    let _ = writeln!(out, "{indent}{}", rule.name);
                    for child in children {
                        child.write_pretty(out, level + 1);
                    }
                }
            },
        }
    }
}

impl Drop for RuleNode {
    fn drop(&mut self) {
        // Detach descendants onto the heap so each node drops childless.
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            if let CstNode::Rule(rule) = &mut node {
                pending.append(&mut rule.children);
            }
        }
    }
}

impl Clone for CstNode {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            CstNode::Rule(rule) => CstNode::Rule(rule.clone()),
            CstNode::Terminal(token) => CstNode::Terminal(token.clone()),
        })
    }
}

impl PartialEq for CstNode {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (CstNode::Rule(a), CstNode::Rule(b)) => a == b,
            (CstNode::Terminal(a), CstNode::Terminal(b)) => a == b,
            _ => false,
        })
    }
}

impl Eq for CstNode {}

impl Hash for CstNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ensure_sufficient_stack(|| {
            std::mem::discriminant(self).hash(state);
            match self {
                CstNode::Rule(rule) => rule.hash(state),
                CstNode::Terminal(token) => token.hash(state),
            }
        });
    }
}

impl fmt::Debug for CstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            CstNode::Rule(rule) => f.debug_tuple(&rule.name).field(&rule.children).finish(),
            CstNode::Terminal(token) => write!(f, "{}({:?})", token.kind, token.value),
        })
    }
}

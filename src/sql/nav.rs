//! Positional navigation and mutation over a [`TokenTree`].
//!
//! `next`/`prev`/`first`/`last` skip whitespace and comments. Lookups take the
//! parent explicitly and return `None` when the node is not one of its
//! children. Child indices returned here are invalidated by any later
//! insertion or removal in the same parent; `NodeId`s are not.

use crate::{
    error::RewriteError,
    sql::{GroupKind, NodeId, TokenTree, TokenType},
};

impl TokenTree {
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    pub(crate) fn position(&self, parent: NodeId, child: NodeId) -> Result<usize, RewriteError> {
        self.index_of(parent, child)
            .ok_or_else(|| RewriteError::internal("token is not a child of the given parent"))
    }

    pub fn first(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent).iter().copied().find(|&c| !self.is_trivia(c))
    }

    pub fn last(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent).iter().rev().copied().find(|&c| !self.is_trivia(c))
    }

    pub fn next(&self, parent: NodeId, from: NodeId) -> Option<NodeId> {
        let idx = self.index_of(parent, from)?;
        self.children(parent)[idx + 1..]
            .iter()
            .copied()
            .find(|&c| !self.is_trivia(c))
    }

    pub fn prev(&self, parent: NodeId, from: NodeId) -> Option<NodeId> {
        let idx = self.index_of(parent, from)?;
        self.children(parent)[..idx]
            .iter()
            .rev()
            .copied()
            .find(|&c| !self.is_trivia(c))
    }

    /// First child at or after `start` satisfying `pred`.
    pub fn find_from(
        &self,
        parent: NodeId,
        start: NodeId,
        pred: impl Fn(&Self, NodeId) -> bool,
    ) -> Option<NodeId> {
        let idx = self.index_of(parent, start)?;
        self.children(parent)[idx..]
            .iter()
            .copied()
            .find(|&c| pred(self, c))
    }

    /// First child strictly after `start` satisfying `pred`.
    pub fn find_after(
        &self,
        parent: NodeId,
        start: NodeId,
        pred: impl Fn(&Self, NodeId) -> bool,
    ) -> Option<NodeId> {
        let idx = self.index_of(parent, start)?;
        self.children(parent)[idx + 1..]
            .iter()
            .copied()
            .find(|&c| pred(self, c))
    }

    pub fn find_group_from(&self, parent: NodeId, start: NodeId, kind: GroupKind) -> Option<NodeId> {
        self.find_from(parent, start, |tree, c| tree.is_group(c, kind))
    }

    /// Detach `child` from `parent` and return the index it occupied.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<usize, RewriteError> {
        let idx = self.position(parent, child)?;
        self.children_mut(parent).remove(idx);
        self.set_parent(child, None);
        Ok(idx)
    }

    /// Detach `node` from whatever parent currently owns it.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            if let Some(idx) = self.index_of(parent, node) {
                self.children_mut(parent).remove(idx);
            }
            self.set_parent(node, None);
        }
    }

    pub fn insert_at(&mut self, parent: NodeId, index: usize, node: NodeId) {
        self.detach(node);
        let children = self.children_mut(parent);
        let index = index.min(children.len());
        children.insert(index, node);
        self.set_parent(node, Some(parent));
    }

    pub fn insert_before(&mut self, parent: NodeId, anchor: NodeId, node: NodeId) -> Result<(), RewriteError> {
        self.detach(node);
        let idx = self.position(parent, anchor)?;
        self.insert_at(parent, idx, node);
        Ok(())
    }

    pub fn insert_after(&mut self, parent: NodeId, anchor: NodeId, node: NodeId) -> Result<(), RewriteError> {
        self.detach(node);
        let idx = self.position(parent, anchor)?;
        self.insert_at(parent, idx + 1, node);
        Ok(())
    }

    /// Put `new` where `old` was; `old` ends up detached.
    pub fn replace(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> Result<(), RewriteError> {
        self.detach(new);
        let idx = self.remove(parent, old)?;
        self.insert_at(parent, idx, new);
        Ok(())
    }

    /// Build leaves from `tokens` and insert them in order right after `anchor`.
    pub fn insert_tokens_after(
        &mut self,
        parent: NodeId,
        anchor: NodeId,
        tokens: &[(TokenType, &str)],
    ) -> Result<(), RewriteError> {
        let mut anchor = anchor;
        for &(ttype, text) in tokens {
            let leaf = self.new_token(ttype, text);
            self.insert_after(parent, anchor, leaf)?;
            anchor = leaf;
        }
        Ok(())
    }

    /// Build leaves from `tokens` and insert them in order right before `anchor`.
    pub fn insert_tokens_before(
        &mut self,
        parent: NodeId,
        anchor: NodeId,
        tokens: &[(TokenType, &str)],
    ) -> Result<(), RewriteError> {
        for &(ttype, text) in tokens {
            let leaf = self.new_token(ttype, text);
            self.insert_before(parent, anchor, leaf)?;
        }
        Ok(())
    }

    /// Splice a spurious IdentifierList back into `parent` as a flat run.
    ///
    /// Returns the first non-trivia token of the run (or of whatever follows
    /// it), so callers can keep scanning from there. Any other node is
    /// returned unchanged.
    pub fn unwind(&mut self, parent: NodeId, node: NodeId) -> Result<Option<NodeId>, RewriteError> {
        if !self.is_group(node, GroupKind::IdentifierList) {
            return Ok(Some(node));
        }

        let idx = self.remove(parent, node)?;
        let members = self.take_children(node);
        for &member in &members {
            self.set_parent(member, Some(parent));
        }
        let children = self.children_mut(parent);
        let tail = children.split_off(idx);
        children.extend(members);
        children.extend(tail);

        Ok(self.children(parent)[idx..]
            .iter()
            .copied()
            .find(|&c| !self.is_trivia(c)))
    }
}

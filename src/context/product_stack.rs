use crate::context::ProductPrefix;

/// Position of one pushed entry, handed back by [`ProductStack::push`].
///
/// The id makes a mark go stale once its entry has been cut off, so a late
/// release cannot remove entries pushed after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    depth: usize,
    id: u64,
}

/// Products entered on one thread, innermost last.
#[derive(Debug, Clone)]
pub struct ProductStack {
    stack: Vec<(u64, Option<ProductPrefix>)>,
    next_id: u64,
}

impl Default for ProductStack {
    fn default() -> Self {
        // base entry, never released
        Self {
            stack: vec![(0, None)],
            next_id: 1,
        }
    }
}

impl ProductStack {
    pub fn current(&self) -> Option<&ProductPrefix> {
        self.stack.last().and_then(|(_, product)| product.as_ref())
    }

    pub fn push(&mut self, product: Option<ProductPrefix>) -> Mark {
        let mark = Mark {
            depth: self.stack.len(),
            id: self.next_id,
        };
        self.next_id += 1;
        self.stack.push((mark.id, product));
        mark
    }

    /// Drop the entry behind `mark` and everything above it. Does nothing
    /// when that entry is already gone.
    pub fn release(&mut self, mark: Mark) {
        let live = matches!(self.stack.get(mark.depth), Some(&(id, _)) if id == mark.id);
        if live && mark.depth > 0 {
            self.stack.truncate(mark.depth);
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

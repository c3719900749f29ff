use crate::{
    error::RewriteError,
    rewrite::{Rewriter, subselect},
    sql::{NodeId, TokenTree},
};

impl Rewriter<'_> {
    /// `CREATE [TEMP|TEMPORARY] TABLE ...` and `CREATE [UNIQUE] INDEX ...`.
    /// Other CREATE statements are left as written.
    pub fn create(&self, tree: &mut TokenTree, parent: NodeId, start: NodeId) -> Result<(), RewriteError> {
        let mut token = tree.next(parent, start);
        if let Some(temporary) = token.filter(|&t| tree.is_any_keyword(t, &["TEMP", "TEMPORARY"])) {
            token = tree.next(parent, temporary);
        }
        let Some(token) = token else {
            return Ok(());
        };

        if tree.is_keyword(token, "TABLE") {
            return self.create_table(tree, parent, token);
        }
        let index = if tree.is_keyword(token, "UNIQUE") {
            tree.next(parent, token)
        } else {
            Some(token)
        };
        match index {
            Some(index) if tree.is_keyword(index, "INDEX") => self.create_index(tree, parent, index),
            _ => Ok(()),
        }
    }

    fn create_table(&self, tree: &mut TokenTree, parent: NodeId, keyword: NodeId) -> Result<(), RewriteError> {
        let target = self
            .skip_if_exists(tree, parent, keyword)
            .ok_or_else(|| RewriteError::missing("expected table name in CREATE TABLE"))?;
        let table = self
            .entity_name(tree, target)
            .ok_or_else(|| RewriteError::missing("expected table name in CREATE TABLE"))?;

        let after = self.replace_entity_name(tree, parent, target, &table, None)?;
        let Some(as_keyword) = after.and_then(|t| tree.find_from(parent, t, |tree, t| tree.is_keyword(t, "AS"))) else {
            return Ok(());
        };

        match tree.next(parent, as_keyword) {
            Some(select) if tree.is_keyword(select, "SELECT") => self.select(tree, parent, select, None),
            Some(paren) if subselect(tree, paren).is_some() => self.eval_expression(tree, paren),
            _ => Ok(()),
        }
    }

    fn create_index(&self, tree: &mut TokenTree, parent: NodeId, keyword: NodeId) -> Result<(), RewriteError> {
        let index_token = self
            .skip_if_exists(tree, parent, keyword)
            .ok_or_else(|| RewriteError::missing("expected index name in CREATE INDEX"))?;
        let index = self
            .entity_name(tree, index_token)
            .ok_or_else(|| RewriteError::missing("expected index name in CREATE INDEX"))?;

        let on = tree
            .find_after(parent, index_token, |tree, t| tree.is_keyword(t, "ON"))
            .ok_or_else(|| RewriteError::missing("expected ON in CREATE INDEX"))?;
        let table_token = tree
            .next(parent, on)
            .ok_or_else(|| RewriteError::missing("expected table name in CREATE INDEX"))?;
        let table = self
            .entity_name(tree, table_token)
            .ok_or_else(|| RewriteError::missing("expected table name in CREATE INDEX"))?;

        self.replace_entity_name(tree, parent, table_token, &table, None)?;
        if self.scheme.prefixes_index_names() {
            self.replace_entity_name(tree, parent, index_token, &table, Some(&index))?;
        }
        Ok(())
    }

    /// `ALTER TABLE name [ADD|DROP CONSTRAINT constraint] ...`
    pub fn alter(&self, tree: &mut TokenTree, parent: NodeId, start: NodeId) -> Result<(), RewriteError> {
        let Some(keyword) = tree.next(parent, start).filter(|&t| tree.is_keyword(t, "TABLE")) else {
            return Ok(());
        };
        let target = tree
            .next(parent, keyword)
            .ok_or_else(|| RewriteError::missing("expected table name in ALTER TABLE"))?;
        let table = self
            .entity_name(tree, target)
            .ok_or_else(|| RewriteError::missing("expected table name in ALTER TABLE"))?;

        let action = self.replace_entity_name(tree, parent, target, &table, None)?;
        let Some(action) = action.filter(|&t| tree.is_any_keyword(t, &["ADD", "DROP"])) else {
            return Ok(());
        };
        let Some(constraint) = tree
            .next(parent, action)
            .filter(|&t| tree.is_keyword(t, "CONSTRAINT"))
        else {
            return Ok(());
        };

        let name_token = tree
            .next(parent, constraint)
            .ok_or_else(|| RewriteError::missing("expected constraint name in ALTER TABLE"))?;
        let name = self
            .entity_name(tree, name_token)
            .ok_or_else(|| RewriteError::missing("expected constraint name in ALTER TABLE"))?;
        if self.scheme.prefixes_constraint_names() {
            self.replace_entity_name(tree, parent, name_token, &table, Some(&name))?;
        }
        Ok(())
    }

    /// `DROP TABLE [IF EXISTS] name`
    pub fn drop_table(&self, tree: &mut TokenTree, parent: NodeId, start: NodeId) -> Result<(), RewriteError> {
        let Some(keyword) = tree.next(parent, start).filter(|&t| tree.is_keyword(t, "TABLE")) else {
            return Ok(());
        };
        let target = self
            .skip_if_exists(tree, parent, keyword)
            .ok_or_else(|| RewriteError::missing("expected table name in DROP TABLE"))?;
        let table = self
            .entity_name(tree, target)
            .ok_or_else(|| RewriteError::missing("expected table name in DROP TABLE"))?;

        self.replace_entity_name(tree, parent, target, &table, None)?;
        Ok(())
    }
}

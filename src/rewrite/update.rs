use crate::{
    error::RewriteError,
    rewrite::{Rewriter, TableClass, TableName, unsupported_at},
    sql::{GroupKind, NodeId, TokenTree, TokenType},
};

const TAIL_CLAUSES: &[&str] = &["LIMIT", "ORDER", "RETURNING"];

impl Rewriter<'_> {
    /// `UPDATE [OR conflict] table SET col = expr[, ...] [WHERE ...] [LIMIT ...]`
    pub fn update(&self, tree: &mut TokenTree, parent: NodeId, start: NodeId) -> Result<(), RewriteError> {
        let mut target = tree.next(parent, start);
        if let Some(or) = target.filter(|&t| tree.is_keyword(t, "OR")) {
            target = tree
                .next(parent, or)
                .and_then(|conflict| tree.next(parent, conflict));
        }
        let target = target.ok_or_else(|| RewriteError::missing("expected table name after UPDATE"))?;
        let table = self
            .entity_name(tree, target)
            .ok_or_else(|| RewriteError::missing("expected table name after UPDATE"))?;

        let after = self
            .replace_entity_name(tree, parent, target, &table, None)?
            .ok_or_else(|| RewriteError::missing("expected SET in UPDATE"))?;
        let set = tree
            .find_from(parent, after, |tree, t| tree.is_keyword(t, "SET"))
            .ok_or_else(|| RewriteError::missing("expected SET in UPDATE"))?;

        let rest = self.set_clause(tree, parent, set)?;
        self.filter_rows(tree, parent, &table, rest)
    }

    /// `DELETE FROM table [WHERE ...] [LIMIT ...]`
    pub fn delete(&self, tree: &mut TokenTree, parent: NodeId, start: NodeId) -> Result<(), RewriteError> {
        let from = tree
            .next(parent, start)
            .filter(|&t| tree.is_keyword(t, "FROM"))
            .ok_or_else(|| RewriteError::missing("expected FROM after DELETE"))?;
        let target = tree
            .next(parent, from)
            .ok_or_else(|| RewriteError::missing("expected table name after DELETE FROM"))?;
        let table = self
            .entity_name(tree, target)
            .ok_or_else(|| RewriteError::missing("expected table name after DELETE FROM"))?;

        let rest = self.replace_entity_name(tree, parent, target, &table, None)?;
        self.filter_rows(tree, parent, &table, rest)
    }

    /// Check each assignment and rewrite subselects on its right-hand side.
    /// Returns the token that ended the SET clause.
    fn set_clause(&self, tree: &mut TokenTree, parent: NodeId, set: NodeId) -> Result<Option<NodeId>, RewriteError> {
        let mut current = tree.next(parent, set);
        let mut assignment: Vec<NodeId> = Vec::new();

        while let Some(token) = current {
            let ends = tree.is_group(token, GroupKind::Where)
                || tree.is_any_keyword(token, TAIL_CLAUSES)
                || tree.is_punct(token, ";");
            if ends {
                break;
            }
            if tree.is_punct(token, ",") {
                self.assignment(tree, &assignment, token)?;
                assignment.clear();
            } else {
                assignment.push(token);
            }
            current = tree.next(parent, token);
        }

        self.assignment(tree, &assignment, set)?;
        Ok(current)
    }

    fn assignment(&self, tree: &mut TokenTree, tokens: &[NodeId], near: NodeId) -> Result<(), RewriteError> {
        let has_equals = tokens.iter().any(|&t| is_equals(tree, t) || {
            tree.is_group(t, GroupKind::Comparison) && tree.children(t).iter().any(|&c| is_equals(tree, c))
        });
        if !has_equals {
            return Err(unsupported_at(tree, near, "SET equals token mismatch"));
        }
        for &token in tokens {
            self.eval_expression(tree, token)?;
        }
        Ok(())
    }

    /// Rewrite subselects in the WHERE clause and, for translate-set tables,
    /// restrict the statement to the product's rows.
    fn filter_rows(
        &self,
        tree: &mut TokenTree,
        parent: NodeId,
        table: &TableName,
        start: Option<NodeId>,
    ) -> Result<(), RewriteError> {
        let clause = start.and_then(|s| tree.find_group_from(parent, s, GroupKind::Where));
        if let Some(clause) = clause {
            self.where_clause(tree, clause)?;
        }
        if self.classify(&table.name) != TableClass::Translate {
            return Ok(());
        }

        let column = self.rules.product_column().to_string();
        let literal = self.product_literal();
        let predicate = [
            (TokenType::Name, column.as_str()),
            (TokenType::Comparison, "="),
            (TokenType::String, literal.as_str()),
        ];

        if let Some(clause) = clause {
            return self.restrict_where(tree, clause, &predicate);
        }

        // WHERE goes ahead of the tail clauses
        let tail = start.and_then(|s| tree.find_from(parent, s, |tree, t| tree.is_any_keyword(t, TAIL_CLAUSES)));
        if let Some(tail) = tail {
            let mut tokens = vec![(TokenType::Keyword, "WHERE"), (TokenType::Whitespace, " ")];
            tokens.extend(predicate);
            tokens.push((TokenType::Whitespace, " "));
            return tree.insert_tokens_before(parent, tail, &tokens);
        }

        let mut anchor = tree
            .last(parent)
            .ok_or_else(|| RewriteError::internal("empty statement"))?;
        if tree.is_punct(anchor, ";") {
            anchor = tree
                .prev(parent, anchor)
                .ok_or_else(|| RewriteError::internal("empty statement"))?;
        }
        let mut tokens = vec![
            (TokenType::Whitespace, " "),
            (TokenType::Keyword, "WHERE"),
            (TokenType::Whitespace, " "),
        ];
        tokens.extend(predicate);
        tree.insert_tokens_after(parent, anchor, &tokens)
    }

    /// `WHERE a OR b` becomes `WHERE product='p' AND (a OR b)`.
    fn restrict_where(
        &self,
        tree: &mut TokenTree,
        clause: NodeId,
        predicate: &[(TokenType, &str)],
    ) -> Result<(), RewriteError> {
        let keyword = tree
            .first(clause)
            .ok_or_else(|| RewriteError::malformed("empty WHERE clause"))?;
        let first = tree
            .next(clause, keyword)
            .ok_or_else(|| RewriteError::malformed("WHERE clause without a predicate"))?;

        let has_or = tree.children(clause).iter().any(|&c| tree.is_keyword(c, "OR"));
        if has_or {
            let last = tree
                .last(clause)
                .ok_or_else(|| RewriteError::malformed("WHERE clause without a predicate"))?;
            tree.insert_tokens_after(clause, last, &[(TokenType::Punctuation, ")")])?;
            tree.insert_tokens_before(clause, first, &[(TokenType::Punctuation, "(")])?;
        }

        let anchor = tree
            .next(clause, keyword)
            .ok_or_else(|| RewriteError::internal("WHERE predicate disappeared"))?;
        let mut tokens = predicate.to_vec();
        tokens.extend([
            (TokenType::Whitespace, " "),
            (TokenType::Keyword, "AND"),
            (TokenType::Whitespace, " "),
        ]);
        tree.insert_tokens_before(clause, anchor, &tokens)
    }
}

fn is_equals(tree: &TokenTree, token: NodeId) -> bool {
    tree.is_token(token, TokenType::Comparison) && tree.text(token) == "="
}

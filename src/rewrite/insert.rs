use crate::{
    error::RewriteError,
    rewrite::{Rewriter, TableClass, subselect, unsupported_at},
    sql::{GroupKind, NodeId, TokenTree, TokenType},
};

impl Rewriter<'_> {
    /// `INSERT [OR conflict] INTO table [(columns)] VALUES (...)[, (...)]*`
    /// or `... SELECT ...`.
    pub fn insert(&self, tree: &mut TokenTree, parent: NodeId, start: NodeId) -> Result<(), RewriteError> {
        let mut token = tree.next(parent, start);
        if let Some(or) = token.filter(|&t| tree.is_keyword(t, "OR")) {
            token = tree
                .next(parent, or)
                .and_then(|conflict| tree.next(parent, conflict));
        }
        let into = token
            .filter(|&t| tree.is_keyword(t, "INTO"))
            .ok_or_else(|| RewriteError::missing("expected INTO after INSERT"))?;
        let target = tree
            .next(parent, into)
            .ok_or_else(|| RewriteError::missing("expected table name after INSERT INTO"))?;
        let table = self
            .entity_name(tree, target)
            .ok_or_else(|| RewriteError::missing("expected table name after INSERT INTO"))?;

        // `ticket(a, b)` groups as a function call; `ticket (a, b)` does not
        let columns = if tree.is_group(target, GroupKind::Function) {
            tree.children(target)
                .iter()
                .copied()
                .find(|&c| tree.is_group(c, GroupKind::Parenthesis))
        } else {
            tree.next(parent, target)
                .filter(|&t| tree.is_group(t, GroupKind::Parenthesis) && subselect(tree, t).is_none())
        };

        let after_target = self.replace_entity_name(tree, parent, target, &table, None)?;
        let source = match columns {
            Some(columns) if !tree.is_group(target, GroupKind::Function) => tree.next(parent, columns),
            _ => after_target,
        };

        let mut append = self.classify(&table.name) == TableClass::Translate;
        if let Some(columns) = columns.filter(|_| append) {
            // already product aware: the source is still rewritten
            if self.has_product_column(tree, columns) {
                append = false;
            } else {
                self.append_product_column(tree, columns)?;
            }
        }

        match source {
            Some(values) if tree.is_keyword(values, "VALUES") => self.values(tree, parent, values, append),
            Some(select) if tree.is_keyword(select, "SELECT") => {
                self.select(tree, parent, select, append.then_some(table.name.as_str()))
            }
            Some(paren) if subselect(tree, paren).is_some() => self.eval_expression(tree, paren),
            Some(other) => Err(unsupported_at(tree, other, "expected VALUES or SELECT in INSERT")),
            None => Err(RewriteError::missing("expected VALUES or SELECT in INSERT")),
        }
    }

    fn has_product_column(&self, tree: &TokenTree, columns: NodeId) -> bool {
        let column = self.rules.product_column();
        tree.leaves(columns).into_iter().any(|leaf| {
            matches!(tree.token_type(leaf), Some(TokenType::Name | TokenType::Keyword))
                && tree.normalized(leaf).eq_ignore_ascii_case(column)
        })
    }

    fn append_product_column(&self, tree: &mut TokenTree, columns: NodeId) -> Result<(), RewriteError> {
        let close = tree
            .children(columns)
            .last()
            .copied()
            .filter(|&t| tree.is_punct(t, ")"))
            .ok_or_else(|| RewriteError::malformed("unable to find the end of the column list"))?;
        let last = tree
            .prev(columns, close)
            .filter(|&t| !tree.is_punct(t, "("))
            .ok_or_else(|| RewriteError::malformed("empty column list"))?;

        let column = self.rules.product_column().to_string();
        tree.insert_tokens_after(
            columns,
            last,
            &[
                (TokenType::Punctuation, ","),
                (TokenType::Whitespace, " "),
                (TokenType::Name, &column),
            ],
        )
    }

    /// Walk the tuples after VALUES, appending the product literal to each
    /// when `append` is set.
    fn values(&self, tree: &mut TokenTree, parent: NodeId, values: NodeId, append: bool) -> Result<(), RewriteError> {
        let literal = self.product_literal();
        let mut current = tree.next(parent, values);

        while let Some(token) = current {
            if tree.is_group(token, GroupKind::Parenthesis) {
                self.value_tuple(tree, token, append.then_some(literal.as_str()))?;
            } else if !tree.is_punct(token, ",") && !tree.is_punct(token, ";") {
                return Err(unsupported_at(tree, token, "unable to parse VALUES section"));
            }
            current = tree.next(parent, token);
        }
        Ok(())
    }

    fn value_tuple(&self, tree: &mut TokenTree, tuple: NodeId, literal: Option<&str>) -> Result<(), RewriteError> {
        let open = tree
            .first(tuple)
            .filter(|&t| tree.is_punct(t, "("))
            .ok_or_else(|| RewriteError::malformed("VALUES tuple does not start with '('"))?;

        let mut current = tree.next(tuple, open);
        let mut close = None;
        while let Some(token) = current {
            if tree.is_group(token, GroupKind::IdentifierList) {
                current = tree.unwind(tuple, token)?;
                continue;
            }
            if tree.is_punct(token, ")") {
                close = Some(token);
                break;
            }
            if !tree.is_punct(token, ",") {
                self.eval_expression(tree, token)?;
            }
            current = tree.next(tuple, token);
        }
        let close = close.ok_or_else(|| RewriteError::malformed("unable to find the end of a VALUES tuple"))?;

        if let Some(literal) = literal {
            let last = tree
                .prev(tuple, close)
                .filter(|&t| t != open)
                .ok_or_else(|| RewriteError::malformed("empty VALUES tuple"))?;
            tree.insert_tokens_after(
                tuple,
                last,
                &[(TokenType::Punctuation, ","), (TokenType::String, literal)],
            )?;
        }
        Ok(())
    }
}

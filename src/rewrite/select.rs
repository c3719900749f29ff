use crate::{
    error::RewriteError,
    rewrite::{FROM_END_WORDS, JOIN_STATEMENTS, JOIN_WORDS, Rewriter, TableClass, subselect, unsupported_at},
    sql::{GroupKind, NodeId, NodeKind, TokenTree, TokenType, group::is_structural},
};

const SET_OPERATORS: &[&str] = &["UNION", "EXCEPT", "INTERSECT"];
const CLAUSE_WORDS: &[&str] = &["GROUP", "HAVING", "ORDER", "LIMIT", "UNION", "EXCEPT", "INTERSECT"];

impl Rewriter<'_> {
    /// Rewrite the SELECT whose keyword is `start`, inside `parent`, along with
    /// any SELECTs combined with it by UNION/EXCEPT/INTERSECT.
    ///
    /// `insert_table` is the target of an enclosing `INSERT ... SELECT`; when it
    /// is a translate-set table the product literal is appended to the
    /// projection.
    pub fn select(
        &self,
        tree: &mut TokenTree,
        parent: NodeId,
        start: NodeId,
        insert_table: Option<&str>,
    ) -> Result<(), RewriteError> {
        let mut token = tree.next(parent, start);
        if let Some(quantifier) = token.filter(|&t| tree.is_any_keyword(t, &["ALL", "DISTINCT"])) {
            token = tree.next(parent, quantifier);
        }
        let first_field = token.ok_or_else(|| RewriteError::unsupported("SELECT without a field list"))?;

        let (current, last_field) = self.select_fields(tree, parent, first_field)?;

        if let Some(table) = insert_table {
            if self.classify(table) == TableClass::Translate {
                let last = last_field.ok_or_else(|| RewriteError::unsupported("SELECT without a field list"))?;
                let literal = self.product_literal();
                tree.insert_tokens_after(
                    parent,
                    last,
                    &[
                        (TokenType::Punctuation, ","),
                        (TokenType::Whitespace, " "),
                        (TokenType::String, &literal),
                    ],
                )?;
            }
        }

        let mut current = match current {
            Some(from) if tree.is_keyword(from, "FROM") => {
                self.from_clause(tree, parent, from, FROM_END_WORDS, false)?
            }
            other => {
                if self.scheme.requires_from() {
                    return Err(RewriteError::missing("expected FROM in SELECT"));
                }
                other
            }
        };

        while let Some(token) = current {
            if tree.is_group(token, GroupKind::Where) {
                self.where_clause(tree, token)?;
                current = next_clause(tree, parent, token);
            } else if tree.is_any_keyword(token, &["GROUP", "HAVING", "ORDER", "LIMIT"]) {
                let next = next_clause(tree, parent, token);
                self.clause_expressions(tree, parent, token, next)?;
                current = next;
            } else if tree.is_any_keyword(token, SET_OPERATORS) {
                let mut next = tree.next(parent, token);
                if let Some(quantifier) = next.filter(|&t| tree.is_any_keyword(t, &["ALL", "DISTINCT"])) {
                    next = tree.next(parent, quantifier);
                }
                return match next {
                    Some(select) if tree.is_keyword(select, "SELECT") => {
                        self.select(tree, parent, select, insert_table)
                    }
                    _ => Err(unsupported_at(tree, token, "expected SELECT after set operator")),
                };
            } else if tree.is_punct(token, ";") {
                return Ok(());
            } else {
                return Err(unsupported_at(tree, token, "unsupported SQL statement"));
            }
        }
        Ok(())
    }

    /// Rewrite subselects between a GROUP BY/HAVING/ORDER BY/LIMIT keyword and
    /// the clause that follows it (`end`, or the end of `parent`).
    fn clause_expressions(
        &self,
        tree: &mut TokenTree,
        parent: NodeId,
        keyword: NodeId,
        end: Option<NodeId>,
    ) -> Result<(), RewriteError> {
        let start = tree.position(parent, keyword)? + 1;
        let stop = match end {
            Some(end) => tree.position(parent, end)?,
            None => tree.children(parent).len(),
        };
        for token in tree.children(parent)[start..stop].to_vec() {
            self.eval_expression(tree, token)?;
        }
        Ok(())
    }

    /// Walk the projection list, rewriting subselects in it. Returns the token
    /// that ended the list and the last projected token.
    fn select_fields(
        &self,
        tree: &mut TokenTree,
        parent: NodeId,
        first: NodeId,
    ) -> Result<(Option<NodeId>, Option<NodeId>), RewriteError> {
        let mut current = Some(first);
        let mut last = None;

        while let Some(token) = current {
            let ends_fields = tree.is_keyword(token, "FROM")
                || tree.is_any_keyword(token, FROM_END_WORDS)
                || tree.is_group(token, GroupKind::Where)
                || tree.is_punct(token, ";");
            if ends_fields {
                break;
            }
            if tree.is_group(token, GroupKind::IdentifierList) {
                current = tree.unwind(parent, token)?;
                continue;
            }
            if !tree.is_punct(token, ",") {
                self.eval_expression(tree, token)?;
                last = Some(token);
            }
            current = tree.next(parent, token);
        }
        Ok((current, last))
    }

    /// Rewrite the table references following `start` (a FROM or JOIN keyword,
    /// or an opening parenthesis) until one of `end_words`, a WHERE clause or
    /// the end of `parent`. Returns the token that stopped the walk.
    fn from_clause(
        &self,
        tree: &mut TokenTree,
        parent: NodeId,
        start: NodeId,
        end_words: &[&str],
        joined: bool,
    ) -> Result<Option<NodeId>, RewriteError> {
        let mut current = tree.next(parent, start);
        let mut names: Vec<NodeId> = Vec::new();
        let mut join_phrase: Vec<String> = Vec::new();

        while let Some(token) = current {
            if tree.is_group(token, GroupKind::Where) || tree.is_any_keyword(token, end_words) {
                break;
            }

            if tree.is_any_keyword(token, JOIN_WORDS) {
                join_phrase.push(tree.normalized(token).to_string());
                if !JOIN_STATEMENTS.contains(&join_phrase.join(" ").as_str()) {
                    current = tree.next(parent, token);
                    continue;
                }
                join_phrase.clear();
                self.table_reference(tree, parent, &mut names, true)?;
                current = self.join(tree, parent, token, end_words)?;
                continue;
            }
            if !join_phrase.is_empty() {
                return Err(unsupported_at(tree, token, "incomplete JOIN"));
            }

            match tree.kind(token) {
                NodeKind::Group(GroupKind::IdentifierList) => {
                    current = tree.unwind(parent, token)?;
                    continue;
                }
                NodeKind::Group(GroupKind::Parenthesis) => {
                    self.table_reference(tree, parent, &mut names, joined)?;
                    current = self.derived_table(tree, parent, token, joined)?;
                    continue;
                }
                NodeKind::Group(GroupKind::Identifier)
                | NodeKind::Token(TokenType::Name | TokenType::Keyword | TokenType::Number) => names.push(token),
                NodeKind::Token(TokenType::Punctuation) => {
                    self.table_reference(tree, parent, &mut names, joined)?;
                }
                _ => return Err(unsupported_at(tree, token, "failed to parse FROM table name")),
            }
            current = tree.next(parent, token);
        }

        if !join_phrase.is_empty() {
            return Err(RewriteError::unsupported("incomplete JOIN at end of FROM clause"));
        }
        self.table_reference(tree, parent, &mut names, joined)?;
        Ok(current)
    }

    /// Handle the table after a join phrase, then step over its ON/USING
    /// predicate. Returns the token after the predicate.
    fn join(
        &self,
        tree: &mut TokenTree,
        parent: NodeId,
        join: NodeId,
        end_words: &[&str],
    ) -> Result<Option<NodeId>, RewriteError> {
        let mut table_end = vec!["ON", "USING"];
        table_end.extend_from_slice(end_words);

        let current = self.from_clause(tree, parent, join, &table_end, true)?;
        let Some(on) = current.filter(|&t| tree.is_any_keyword(t, &["ON", "USING"])) else {
            return Ok(current);
        };

        let mut current = tree.next(parent, on);
        while let Some(token) = current {
            let ends = tree.is_group(token, GroupKind::Where)
                || tree.is_any_keyword(token, JOIN_WORDS)
                || tree.is_any_keyword(token, end_words);
            if ends {
                break;
            }
            if self.scheme.rewrites_join_predicates() {
                self.eval_expression(tree, token)?;
            }
            current = tree.next(parent, token);
        }
        Ok(current)
    }

    /// A parenthesis in FROM: a derived table, or a nested FROM list.
    fn derived_table(
        &self,
        tree: &mut TokenTree,
        parent: NodeId,
        paren: NodeId,
        joined: bool,
    ) -> Result<Option<NodeId>, RewriteError> {
        let Some(select) = subselect(tree, paren) else {
            if let Some(open) = tree.first(paren) {
                self.from_clause(tree, paren, open, &[], joined)?;
            }
            return Ok(tree.next(parent, paren));
        };

        let mut alias = tree.next(parent, paren);
        let explicit_as = alias.filter(|&t| tree.is_keyword(t, "AS"));
        if let Some(as_keyword) = explicit_as {
            alias = tree.next(parent, as_keyword);
        }
        let alias = alias
            .filter(|&t| is_alias(tree, t))
            .ok_or_else(|| unsupported_at(tree, paren, "derived table without an alias"))?;
        if explicit_as.is_none() {
            tree.insert_tokens_before(
                parent,
                alias,
                &[(TokenType::Keyword, "AS"), (TokenType::Whitespace, " ")],
            )?;
        }

        self.select(tree, paren, select, None)?;
        Ok(tree.next(parent, alias))
    }

    /// Replace the accumulated `name [AS] [alias]` tokens with the product
    /// view for that table and clear `names`.
    fn table_reference(
        &self,
        tree: &mut TokenTree,
        parent: NodeId,
        names: &mut Vec<NodeId>,
        joined: bool,
    ) -> Result<(), RewriteError> {
        if names.is_empty() {
            return Ok(());
        }
        let names = std::mem::take(names);

        let words: Vec<NodeId> = names
            .iter()
            .copied()
            .filter(|&n| !tree.is_keyword(n, "AS"))
            .collect();
        let (table_token, alias_token) = match words.as_slice() {
            [table] => (*table, None),
            [table, alias] => (*table, Some(*alias)),
            _ => return Err(unsupported_at(tree, names[0], "invalid FROM table reference")),
        };
        let table = self
            .entity_name(tree, table_token)
            .ok_or_else(|| unsupported_at(tree, table_token, "failed to parse FROM table name"))?;
        let alias = alias_token.map(|a| tree.to_sql(a));

        let view = match self.classify(&table.name) {
            TableClass::Skip => return Ok(()),
            TableClass::Translate => {
                let alias = self.scheme.filtered_view_alias(alias.as_deref(), &table.raw, joined);
                self.filtered_view(&table, alias)
            }
            TableClass::Prefix => self.prefixed_view(&table, alias.as_deref().unwrap_or(&table.raw)),
        };

        let first = names[0];
        let start = tree.position(parent, first)?;
        let end = tree.position(parent, names[names.len() - 1])?;
        for stale in tree.children(parent)[start + 1..=end].to_vec() {
            tree.remove(parent, stale)?;
        }
        let view = tree.parse_fragment(&view)?;
        tree.replace(parent, first, view)
    }
}

fn is_alias(tree: &TokenTree, token: NodeId) -> bool {
    match tree.kind(token) {
        NodeKind::Token(TokenType::Name) => true,
        NodeKind::Token(TokenType::Keyword) => !is_structural(tree.normalized(token)),
        _ => false,
    }
}

/// Next WHERE clause or clause keyword after `token`.
fn next_clause(tree: &TokenTree, parent: NodeId, token: NodeId) -> Option<NodeId> {
    tree.find_after(parent, token, |tree, c| {
        tree.is_group(c, GroupKind::Where) || tree.is_any_keyword(c, CLAUSE_WORDS)
    })
}

mod ddl;
mod insert;
pub mod scheme;
mod select;
mod update;

pub use crate::rewrite::scheme::{FilteredViewScheme, IsolationScheme, PrefixedTableScheme, TableClass};
use crate::{
    config::TableRules,
    error::RewriteError,
    sql::{GroupKind, NodeId, NodeKind, TokenTree, TokenType},
};

/// Words that may start or continue a join phrase.
const JOIN_WORDS: &[&str] = &["JOIN", "LEFT", "RIGHT", "INNER", "OUTER", "FULL", "CROSS", "NATURAL"];

const JOIN_STATEMENTS: &[&str] = &[
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "LEFT OUTER JOIN",
    "RIGHT JOIN",
    "RIGHT OUTER JOIN",
    "FULL JOIN",
    "FULL OUTER JOIN",
    "CROSS JOIN",
    "NATURAL JOIN",
];

/// Keywords that end a FROM clause.
const FROM_END_WORDS: &[&str] = &["WHERE", "GROUP", "HAVING", "ORDER", "UNION", "EXCEPT", "INTERSECT", "LIMIT"];

/// A table reference as written, plus the name used for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableName {
    /// Unquoted name.
    pub name: String,
    /// Source text.
    pub raw: String,
}

/// Rewrites statements in place for one product.
///
/// Holds no per-statement state: every entry point takes the tree, the
/// container being walked and the token to start from.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    rules: &'a TableRules,
    scheme: &'a dyn IsolationScheme,
    product: &'a str,
}

impl<'a> Rewriter<'a> {
    pub fn new(rules: &'a TableRules, scheme: &'a dyn IsolationScheme, product: &'a str) -> Self {
        Self {
            rules,
            scheme,
            product,
        }
    }

    pub fn classify(&self, table: &str) -> TableClass {
        self.scheme.classify(self.rules, table)
    }

    fn product_literal(&self) -> String {
        quote_literal(self.product)
    }

    /// `"<product>_<name>"`, or the name as written for the global product.
    fn prefixed_name(&self, table: &TableName) -> String {
        if self.product.is_empty() {
            return table.raw.clone();
        }
        format!(
            "\"{}_{}\"",
            self.product.replace('"', "\"\""),
            table.name.replace('"', "\"\"")
        )
    }

    fn filtered_view(&self, table: &TableName, alias: Option<&str>) -> String {
        let view = format!(
            "(SELECT * FROM {} WHERE {}={})",
            table.raw,
            self.rules.product_column(),
            self.product_literal()
        );
        match alias {
            Some(alias) => format!("{view} AS {alias}"),
            None => view,
        }
    }

    fn prefixed_view(&self, table: &TableName, alias: &str) -> String {
        format!("(SELECT * FROM {}) AS {alias}", self.prefixed_name(table))
    }

    /// Rewrite every subselect reachable below `node`.
    pub(crate) fn eval_expression(&self, tree: &mut TokenTree, node: NodeId) -> Result<(), RewriteError> {
        match tree.kind(node) {
            NodeKind::Token(_) => return Ok(()),
            NodeKind::Group(GroupKind::Where) => return self.where_clause(tree, node),
            NodeKind::Group(GroupKind::Parenthesis) => {
                if let Some(select) = subselect(tree, node) {
                    return self.select(tree, node, select, None);
                }
            }
            NodeKind::Group(_) => {}
        }

        for child in tree.children(node).to_vec() {
            self.eval_expression(tree, child)?;
        }
        Ok(())
    }

    pub(crate) fn where_clause(&self, tree: &mut TokenTree, clause: NodeId) -> Result<(), RewriteError> {
        let keyword = tree
            .first(clause)
            .filter(|&t| tree.is_keyword(t, "WHERE"))
            .ok_or_else(|| RewriteError::malformed("WHERE clause does not start with WHERE"))?;

        for child in tree.children(clause).to_vec() {
            if child != keyword {
                self.eval_expression(tree, child)?;
            }
        }
        Ok(())
    }

    /// Name of the table a node refers to.
    pub(crate) fn entity_name(&self, tree: &TokenTree, node: NodeId) -> Option<TableName> {
        match tree.kind(node) {
            NodeKind::Token(TokenType::Name) => Some(TableName {
                name: tree.normalized(node).to_string(),
                raw: tree.text(node).to_string(),
            }),
            NodeKind::Token(TokenType::Keyword | TokenType::Number) => Some(TableName {
                name: tree.text(node).to_string(),
                raw: tree.text(node).to_string(),
            }),
            NodeKind::Group(GroupKind::Identifier) => {
                let name = tree
                    .leaves(node)
                    .into_iter()
                    .filter(|&leaf| !tree.is_trivia(leaf))
                    .map(|leaf| tree.normalized(leaf))
                    .collect();
                Some(TableName {
                    name,
                    raw: tree.to_sql(node),
                })
            }
            NodeKind::Group(GroupKind::Function) => {
                let head = tree.first(node)?;
                self.entity_name(tree, head)
            }
            _ => None,
        }
    }

    /// Rename `node` to its prefixed physical name if `table` is in the prefix
    /// bucket. `entity` names the object being renamed when it is not the table
    /// itself (an index or constraint). Returns the token following `node`.
    pub(crate) fn replace_entity_name(
        &self,
        tree: &mut TokenTree,
        parent: NodeId,
        node: NodeId,
        table: &TableName,
        entity: Option<&TableName>,
    ) -> Result<Option<NodeId>, RewriteError> {
        let next = tree.next(parent, node);
        if self.classify(&table.name) != TableClass::Prefix {
            return Ok(next);
        }

        let prefixed = self.prefixed_name(entity.unwrap_or(table));
        match tree.kind(node) {
            NodeKind::Group(GroupKind::Function) => {
                let head = tree
                    .first(node)
                    .ok_or_else(|| RewriteError::internal("function without a name"))?;
                let leaf = tree.new_token(TokenType::Name, &prefixed);
                tree.replace(node, head, leaf)?;
            }
            NodeKind::Group(GroupKind::Identifier)
            | NodeKind::Token(TokenType::Name | TokenType::Keyword | TokenType::Number) => {
                let leaf = tree.new_token(TokenType::Name, &prefixed);
                tree.replace(parent, node, leaf)?;
            }
            _ => {
                return Err(RewriteError::internal(format!(
                    "cannot rename '{}' as a table",
                    tree.to_sql(node)
                )));
            }
        }
        Ok(next)
    }

    /// Step over `IF [NOT] EXISTS` after `keyword`.
    fn skip_if_exists(&self, tree: &TokenTree, parent: NodeId, keyword: NodeId) -> Option<NodeId> {
        let mut token = tree.next(parent, keyword);
        while let Some(t) = token {
            if !tree.is_any_keyword(t, &["IF", "NOT", "EXISTS"]) {
                break;
            }
            token = tree.next(parent, t);
        }
        token
    }
}

/// The SELECT keyword if `paren` holds a subselect.
pub(crate) fn subselect(tree: &TokenTree, paren: NodeId) -> Option<NodeId> {
    if !tree.is_group(paren, GroupKind::Parenthesis) {
        return None;
    }
    let open = tree.first(paren).filter(|&t| tree.is_punct(t, "("))?;
    tree.next(paren, open).filter(|&t| tree.is_keyword(t, "SELECT"))
}

/// Single-quoted SQL string literal.
pub(crate) fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn unsupported_at(tree: &TokenTree, node: NodeId, context: &str) -> RewriteError {
    RewriteError::unsupported(format!("{context} at '{}'", tree.to_sql(node).trim()))
}

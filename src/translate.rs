use std::sync::Arc;

use crate::{
    config::{TableRules, TranslatorConfig},
    context::ProductPrefix,
    error::{Error, Result, RewriteError},
    rewrite::{IsolationScheme, Rewriter},
    sql::{NodeId, SqlDialect, TokenTree, TokenType},
};

/// Leading keyword of a statement, resolved before the tree is borrowed mutably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Alter,
    Drop,
}

impl StatementKind {
    fn of(tree: &TokenTree, token: NodeId) -> Option<Self> {
        let kind = match (tree.token_type(token)?, tree.normalized(token)) {
            (TokenType::Dml, "SELECT") => Self::Select,
            (TokenType::Dml, "INSERT") => Self::Insert,
            (TokenType::Dml, "UPDATE") => Self::Update,
            (TokenType::Dml, "DELETE") => Self::Delete,
            (TokenType::Ddl, "CREATE") => Self::Create,
            (TokenType::Ddl, "ALTER") => Self::Alter,
            (TokenType::Ddl, "DROP") => Self::Drop,
            _ => return None,
        };
        Some(kind)
    }
}

/// Rewrites statements for one product.
#[derive(Debug, Clone)]
pub struct SqlTranslator {
    rules: Arc<TableRules>,
    scheme: Arc<dyn IsolationScheme>,
    dialect: SqlDialect,
    product: ProductPrefix,
}

impl SqlTranslator {
    pub fn new(
        rules: Arc<TableRules>,
        scheme: Arc<dyn IsolationScheme>,
        dialect: SqlDialect,
        product: impl Into<ProductPrefix>,
    ) -> Self {
        Self {
            rules,
            scheme,
            dialect,
            product: product.into(),
        }
    }

    pub fn from_config(config: &TranslatorConfig, product: impl Into<ProductPrefix>) -> Self {
        Self::new(
            Arc::new(config.table_rules()),
            config.scheme.scheme(),
            config.dialect,
            product,
        )
    }

    pub fn product(&self) -> &ProductPrefix {
        &self.product
    }

    /// Rewrite `sql` so it only sees and writes this product's data.
    ///
    /// Statements that do not start with a recognised DML or DDL keyword are
    /// returned unchanged.
    pub fn translate(&self, sql: &str) -> Result<String> {
        self.rewrite(sql).map_err(|source| Error::Translate {
            sql: sql.to_string(),
            source,
        })
    }

    fn rewrite(&self, sql: &str) -> Result<String, RewriteError> {
        let mut tree = TokenTree::parse(sql, self.dialect)?;
        let root = tree.root();
        let Some(first) = tree.first(root) else {
            return Ok(sql.to_string());
        };
        single_statement(&tree, root)?;

        let Some(kind) = StatementKind::of(&tree, first) else {
            return Ok(sql.to_string());
        };
        let rewriter = Rewriter::new(&self.rules, self.scheme.as_ref(), self.product.as_str());
        match kind {
            StatementKind::Select => rewriter.select(&mut tree, root, first, None)?,
            StatementKind::Insert => rewriter.insert(&mut tree, root, first)?,
            StatementKind::Update => rewriter.update(&mut tree, root, first)?,
            StatementKind::Delete => rewriter.delete(&mut tree, root, first)?,
            StatementKind::Create => rewriter.create(&mut tree, root, first)?,
            StatementKind::Alter => rewriter.alter(&mut tree, root, first)?,
            StatementKind::Drop => rewriter.drop_table(&mut tree, root, first)?,
        }
        Ok(tree.to_sql(root))
    }
}

/// Only trivia and further `;` may follow a terminating `;`.
fn single_statement(tree: &TokenTree, root: NodeId) -> Result<(), RewriteError> {
    let mut terminated = false;
    for &child in tree.children(root) {
        if tree.is_trivia(child) {
            continue;
        }
        if tree.is_punct(child, ";") {
            terminated = true;
        } else if terminated {
            return Err(RewriteError::unsupported(format!(
                "more than one statement at '{}'",
                tree.to_sql(child).trim()
            )));
        }
    }
    Ok(())
}

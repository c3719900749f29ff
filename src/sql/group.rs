use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::{
    error::RewriteError,
    sql::{GroupKind, Lexeme, NodeId, NodeKind, TokenTree, TokenType},
};

/// Keywords that shape a statement. They never head a function call, never
/// act as a comparison operand and never appear inside an identifier list.
static STRUCTURAL: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ALL", "AND", "ANY", "AS", "BETWEEN", "BY", "CASE", "CONSTRAINT", "CROSS", "DISTINCT", "ELSE",
        "END", "ESCAPE", "EXCEPT", "EXISTS", "FROM", "FULL", "GLOB", "GROUP", "HAVING", "IF", "IN",
        "INDEX", "INNER", "INTERSECT", "INTO", "IS", "JOIN", "LEFT", "LIKE", "LIMIT", "NATURAL",
        "NOT", "OFFSET", "ON", "OR", "ORDER", "OUTER", "PRIMARY", "REFERENCES", "RETURNING",
        "RIGHT", "SET", "SOME", "TABLE", "THEN", "UNION", "UNIQUE", "USING", "VALUES", "WHEN",
        "WHERE", "WITH",
    ]
    .into_iter()
    .collect()
});

const WHERE_END: &[&str] = &[
    "GROUP",
    "ORDER",
    "HAVING",
    "LIMIT",
    "UNION",
    "EXCEPT",
    "INTERSECT",
    "RETURNING",
    "WINDOW",
];

pub(crate) fn is_structural(word: &str) -> bool {
    STRUCTURAL.contains(word)
}

/// Build the grouped tree for `lexemes` and return its Statement node.
pub(crate) fn build(tree: &mut TokenTree, lexemes: Vec<Lexeme>) -> Result<NodeId, RewriteError> {
    let mut stack: Vec<Vec<NodeId>> = vec![Vec::new()];

    for lexeme in lexemes {
        let punct = lexeme.ttype == TokenType::Punctuation;
        let open = punct && lexeme.text == "(";
        let close = punct && lexeme.text == ")";
        let id = tree.push_token(lexeme);

        if open {
            stack.push(vec![id]);
            continue;
        }
        if close {
            let mut members = match stack.pop() {
                Some(members) if !stack.is_empty() => members,
                _ => return Err(RewriteError::malformed("unbalanced ')'")),
            };
            members.push(id);
            let paren = tree.new_group(GroupKind::Parenthesis, members);
            if let Some(outer) = stack.last_mut() {
                outer.push(paren);
            }
            continue;
        }
        if let Some(current) = stack.last_mut() {
            current.push(id);
        }
    }

    if stack.len() != 1 {
        return Err(RewriteError::malformed("unclosed '('"));
    }
    let top = stack.pop().unwrap_or_default();
    let root = tree.new_group(GroupKind::Statement, top);
    group_container(tree, root);
    Ok(root)
}

fn group_container(tree: &mut TokenTree, container: NodeId) {
    let nested: Vec<NodeId> = tree
        .children(container)
        .iter()
        .copied()
        .filter(|&c| tree.is_group(c, GroupKind::Parenthesis))
        .collect();
    for paren in nested {
        group_container(tree, paren);
    }

    group_identifiers(tree, container);
    group_functions(tree, container);
    group_comparisons(tree, container);
    group_where(tree, container);
    if tree.is_group(container, GroupKind::Parenthesis) {
        group_identifier_list(tree, container);
    }
}

fn is_soft_keyword(tree: &TokenTree, id: NodeId) -> bool {
    tree.is_token(id, TokenType::Keyword) && !is_structural(tree.normalized(id))
}

fn is_name_part(tree: &TokenTree, id: NodeId) -> bool {
    tree.is_token(id, TokenType::Name) || is_soft_keyword(tree, id)
}

/// `a.b.c` and `t.*`
fn group_identifiers(tree: &mut TokenTree, container: NodeId) {
    let children = tree.take_children(container);
    let mut out = Vec::with_capacity(children.len());
    let mut i = 0;

    while i < children.len() {
        if is_name_part(tree, children[i]) {
            let mut end = i;
            while end + 2 < children.len()
                && tree.is_punct(children[end + 1], ".")
                && (is_name_part(tree, children[end + 2])
                    || tree.is_token(children[end + 2], TokenType::Wildcard))
            {
                end += 2;
                if tree.is_token(children[end], TokenType::Wildcard) {
                    break;
                }
            }
            if end > i {
                out.push(tree.new_group(GroupKind::Identifier, children[i..=end].to_vec()));
                i = end + 1;
                continue;
            }
        }
        out.push(children[i]);
        i += 1;
    }

    tree.set_children(container, out);
}

/// A name immediately followed by a parenthesis.
fn group_functions(tree: &mut TokenTree, container: NodeId) {
    let children = tree.take_children(container);
    let mut out = Vec::with_capacity(children.len());
    let mut i = 0;

    while i < children.len() {
        let head = children[i];
        let is_head = is_name_part(tree, head) || tree.is_group(head, GroupKind::Identifier);
        if is_head && i + 1 < children.len() && tree.is_group(children[i + 1], GroupKind::Parenthesis) {
            out.push(tree.new_group(GroupKind::Function, vec![head, children[i + 1]]));
            i += 2;
            continue;
        }
        out.push(head);
        i += 1;
    }

    tree.set_children(container, out);
}

fn is_operand(tree: &TokenTree, id: NodeId) -> bool {
    match tree.kind(id) {
        NodeKind::Token(TokenType::Name | TokenType::Number | TokenType::String | TokenType::Placeholder) => true,
        NodeKind::Token(TokenType::Keyword) => is_soft_keyword(tree, id),
        NodeKind::Group(GroupKind::Identifier | GroupKind::Function | GroupKind::Parenthesis) => true,
        _ => false,
    }
}

/// `operand <op> operand`, whitespace allowed around the operator.
fn group_comparisons(tree: &mut TokenTree, container: NodeId) {
    let children = tree.take_children(container);
    let mut out = Vec::with_capacity(children.len());
    let next_solid = |tree: &TokenTree, from: usize| (from..children.len()).find(|&j| !tree.is_trivia(children[j]));
    let mut i = 0;

    while i < children.len() {
        if is_operand(tree, children[i]) {
            let op = next_solid(tree, i + 1).filter(|&j| tree.is_token(children[j], TokenType::Comparison));
            let rhs = op
                .and_then(|j| next_solid(tree, j + 1))
                .filter(|&k| is_operand(tree, children[k]));
            if let Some(k) = rhs {
                out.push(tree.new_group(GroupKind::Comparison, children[i..=k].to_vec()));
                i = k + 1;
                continue;
            }
        }
        out.push(children[i]);
        i += 1;
    }

    tree.set_children(container, out);
}

/// From `WHERE` up to the next clause keyword, `;` or the closing parenthesis.
fn group_where(tree: &mut TokenTree, container: NodeId) {
    let children = tree.take_children(container);
    let mut out = Vec::with_capacity(children.len());
    let mut i = 0;

    while i < children.len() {
        if tree.is_keyword(children[i], "WHERE") {
            let end = (i + 1..children.len())
                .find(|&j| {
                    let c = children[j];
                    tree.is_any_keyword(c, WHERE_END) || tree.is_punct(c, ")") || tree.is_punct(c, ";")
                })
                .unwrap_or(children.len());
            out.push(tree.new_group(GroupKind::Where, children[i..end].to_vec()));
            i = end;
            continue;
        }
        out.push(children[i]);
        i += 1;
    }

    tree.set_children(container, out);
}

fn is_list_member(tree: &TokenTree, id: NodeId) -> bool {
    match tree.kind(id) {
        NodeKind::Token(TokenType::Keyword) => is_soft_keyword(tree, id),
        NodeKind::Token(TokenType::Punctuation) => tree.text(id) == ",",
        NodeKind::Token(TokenType::Dml | TokenType::Ddl | TokenType::Error) => false,
        NodeKind::Token(_) => true,
        NodeKind::Group(kind) => !matches!(kind, GroupKind::Where | GroupKind::Statement),
    }
}

/// Wrap the contents of `(a, b, c)` into one IdentifierList.
fn group_identifier_list(tree: &mut TokenTree, paren: NodeId) {
    let children = tree.children(paren);
    let n = children.len();
    if n < 3 || !tree.is_punct(children[0], "(") || !tree.is_punct(children[n - 1], ")") {
        return;
    }
    let inner = &children[1..n - 1];
    if !inner.iter().any(|&c| tree.is_punct(c, ",")) || !inner.iter().all(|&c| is_list_member(tree, c)) {
        return;
    }

    let mut children = tree.take_children(paren);
    let close = children.pop();
    let inner: Vec<NodeId> = children.drain(1..).collect();
    let list = tree.new_group(GroupKind::IdentifierList, inner);
    children.push(list);
    children.extend(close);
    tree.set_children(paren, children);
}

use log::warn;
use sqlparser::{
    keywords::Keyword,
    tokenizer::{Location, Token, TokenWithSpan, Tokenizer, Whitespace, Word},
};

use crate::{
    error::RewriteError,
    sql::{SqlDialect, TokenType},
};

/// A single token of source text with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub ttype: TokenType,
    /// Exact source text.
    pub text: String,
    /// Upper-cased keyword, or the unquoted value of an identifier.
    pub normalized: String,
}

impl Lexeme {
    pub fn new(ttype: TokenType, text: impl Into<String>) -> Self {
        let text = text.into();
        let normalized = normalize(ttype, &text);
        Self {
            ttype,
            text,
            normalized,
        }
    }

    fn with_normalized(ttype: TokenType, text: String, normalized: String) -> Self {
        Self {
            ttype,
            text,
            normalized,
        }
    }
}

/// Split `sql` into lexemes whose texts concatenate back to `sql`.
pub fn tokenize(sql: &str, dialect: SqlDialect) -> Result<Vec<Lexeme>, RewriteError> {
    let dialect = dialect.dialect();
    let tokens = Tokenizer::new(dialect.as_ref(), sql)
        .tokenize_with_location()
        .map_err(|e| RewriteError::Tokenizer(e.to_string()))?;

    let texts = match span_texts(sql, &tokens) {
        Some(texts) => texts,
        None => {
            warn!("token spans do not cover the statement, falling back to token text: {sql}");
            tokens.iter().map(|t| t.token.to_string()).collect()
        }
    };

    let mut lexemes = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter().zip(texts).peekable();
    while let Some((tok, text)) = iter.next() {
        match &tok.token {
            Token::EOF => continue,
            // `%s` arrives as `%` followed by the word `s`
            Token::Mod => {
                if let Some((_, marker)) = iter.next_if(|(next, _)| is_format_marker(&next.token)) {
                    lexemes.push(Lexeme::new(TokenType::Placeholder, format!("{text}{marker}")));
                    continue;
                }
                lexemes.push(Lexeme::new(TokenType::Operator, text));
            }
            token => lexemes.push(classify(token, text)),
        }
    }

    if sql.contains('_') {
        lexemes = repair_underscores(lexemes);
    }
    Ok(lexemes)
}

fn is_format_marker(token: &Token) -> bool {
    matches!(token, Token::Word(word) if word.quote_style.is_none() && word.value == "s")
}

/// Slice each token's text out of `sql` by its span. `None` if the spans
/// do not tile the input exactly.
fn span_texts(sql: &str, tokens: &[TokenWithSpan]) -> Option<Vec<String>> {
    let mut cursor = LocationCursor::new(sql);
    let mut covered = 0;
    let mut texts = Vec::with_capacity(tokens.len());

    for tok in tokens {
        if matches!(tok.token, Token::EOF) {
            texts.push(String::new());
            continue;
        }
        let start = cursor.seek(tok.span.start);
        let end = cursor.seek(tok.span.end);
        if start != covered || end <= start {
            return None;
        }
        texts.push(sql[start..end].to_string());
        covered = end;
    }

    (covered == sql.len()).then_some(texts)
}

/// Converts 1-based line/column locations into byte offsets, moving forward only.
struct LocationCursor<'a> {
    sql: &'a str,
    line: u64,
    column: u64,
    offset: usize,
}

impl<'a> LocationCursor<'a> {
    fn new(sql: &'a str) -> Self {
        Self {
            sql,
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    fn seek(&mut self, target: Location) -> usize {
        while (self.line, self.column) < (target.line, target.column) {
            let Some(ch) = self.sql[self.offset..].chars().next() else {
                break;
            };
            self.offset += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset
    }
}

fn classify(token: &Token, text: String) -> Lexeme {
    let ttype = match token {
        Token::Word(word) => return classify_word(word, text),
        Token::Whitespace(Whitespace::SingleLineComment { .. } | Whitespace::MultiLineComment(_)) => {
            TokenType::Comment
        }
        Token::Whitespace(_) => TokenType::Whitespace,
        Token::Number(..) => TokenType::Number,
        Token::SingleQuotedString(_)
        | Token::DoubleQuotedString(_)
        | Token::NationalStringLiteral(_)
        | Token::EscapedStringLiteral(_)
        | Token::HexStringLiteral(_)
        | Token::DollarQuotedString(_) => TokenType::String,
        Token::Placeholder(_) => TokenType::Placeholder,
        Token::Comma
        | Token::Period
        | Token::SemiColon
        | Token::LParen
        | Token::RParen
        | Token::Colon
        | Token::DoubleColon => TokenType::Punctuation,
        Token::Eq
        | Token::DoubleEq
        | Token::Neq
        | Token::Lt
        | Token::Gt
        | Token::LtEq
        | Token::GtEq
        | Token::Spaceship => TokenType::Comparison,
        Token::Mul => TokenType::Wildcard,
        Token::Char(_) => TokenType::Error,
        _ => TokenType::Operator,
    };
    Lexeme::new(ttype, text)
}

fn classify_word(word: &Word, text: String) -> Lexeme {
    if word.quote_style.is_some() || word.keyword == Keyword::NoKeyword {
        return Lexeme::with_normalized(TokenType::Name, text, word.value.clone());
    }

    let upper = word.value.to_ascii_uppercase();
    let ttype = match upper.as_str() {
        "SELECT" | "INSERT" | "UPDATE" | "DELETE" => TokenType::Dml,
        "CREATE" | "ALTER" | "DROP" => TokenType::Ddl,
        _ => TokenType::Keyword,
    };
    Lexeme::with_normalized(ttype, text, upper)
}

pub(crate) fn normalize(ttype: TokenType, text: &str) -> String {
    match ttype {
        TokenType::Keyword | TokenType::Dml | TokenType::Ddl => text.to_ascii_uppercase(),
        TokenType::Name => unquote(text),
        _ => text.to_string(),
    }
}

fn unquote(text: &str) -> String {
    let (Some(open), Some(close)) = (text.chars().next(), text.chars().last()) else {
        return String::new();
    };
    let expected = match open {
        '"' | '`' => open,
        '[' => ']',
        _ => return text.to_string(),
    };
    if text.len() < 2 || close != expected {
        return text.to_string();
    }

    let inner = &text[1..text.len() - 1];
    if open == '[' {
        inner.to_string()
    } else {
        inner.replace(&format!("{open}{open}"), &open.to_string())
    }
}

/// Merge runs of stray `_` tokens into the word that follows them.
///
/// Some dialects refuse `_` as an identifier start and emit it as an unknown
/// character, splitting `__color__` into `_`, `_`, `color__`.
pub(crate) fn repair_underscores(lexemes: Vec<Lexeme>) -> Vec<Lexeme> {
    let mut out = Vec::with_capacity(lexemes.len());
    let mut pending = String::new();

    for lexeme in lexemes {
        if is_stray_underscore(&lexeme) {
            pending.push_str(&lexeme.text);
            continue;
        }
        if !pending.is_empty() {
            let joinable = matches!(lexeme.ttype, TokenType::Name | TokenType::Keyword)
                && !lexeme.text.starts_with(['"', '`', '[']);
            if joinable {
                let text = format!("{pending}{}", lexeme.text);
                pending.clear();
                out.push(Lexeme::with_normalized(TokenType::Name, text.clone(), text));
                continue;
            }
            out.push(Lexeme::new(TokenType::Error, std::mem::take(&mut pending)));
        }
        out.push(lexeme);
    }

    if !pending.is_empty() {
        out.push(Lexeme::new(TokenType::Error, pending));
    }
    out
}

fn is_stray_underscore(lexeme: &Lexeme) -> bool {
    lexeme.ttype == TokenType::Error && !lexeme.text.is_empty() && lexeme.text.chars().all(|c| c == '_')
}

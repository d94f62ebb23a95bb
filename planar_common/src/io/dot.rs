//! Graphviz dot reader and writer.
//!
//! The reader understands the subset of dot that describes plain graphs: an
//! optional `strict`, `graph`/`digraph` header, node statements, edge chains
//! (`a -- b -- c`), attribute statements and lists (skipped), subgraph braces
//! (flattened), quoted ids and all three comment styles.

use std::borrow::Cow;
use std::io::{self, Write};

use regex::Regex;

use super::{LoadedGraph, ReadError};
use crate::graph::Graph;

lazy_static::lazy_static! {
    static ref TOKEN: Regex = Regex::new(
        r#"(?x)
          (?P<ws>\s+)
        | (?P<comment>//[^\n]*|/\*(?s:.*?)\*/|\#[^\n]*)
        | (?P<quoted>"(?:[^"\\]|\\.)*")
        | (?P<op>--|->)
        | (?P<id>-?[\w.]+)
        | (?P<punct>[{}\[\];,=:])
        | (?P<other>.)
        "#
    )
    .expect("dot token pattern is valid");
    static ref PLAIN_ID: Regex =
        Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*|-?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?))$")
            .expect("plain id pattern is valid");
}

const KEYWORDS: [&str; 6] = ["strict", "graph", "digraph", "node", "edge", "subgraph"];

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    /// Identifier; `quoted` ids are never keywords.
    Id { text: String, quoted: bool },
    /// `--` (false) or `->` (true).
    Op { directed: bool },
    Punct(char),
}

#[derive(Clone, Debug)]
struct Token {
    tok: Tok,
    line: usize,
}

fn tokenize(text: &str) -> Result<Vec<Token>, ReadError> {
    let mut tokens = Vec::new();
    let mut line = 1;

    for caps in TOKEN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let start_line = line;
        line += whole.as_str().matches('\n').count();

        let tok = if caps.name("ws").is_some() || caps.name("comment").is_some() {
            continue;
        } else if let Some(m) = caps.name("quoted") {
            Tok::Id {
                text: unescape(m.as_str()),
                quoted: true,
            }
        } else if let Some(m) = caps.name("op") {
            Tok::Op {
                directed: m.as_str() == "->",
            }
        } else if let Some(m) = caps.name("id") {
            Tok::Id {
                text: m.as_str().to_string(),
                quoted: false,
            }
        } else if let Some(c) = caps.name("punct").and_then(|m| m.as_str().chars().next()) {
            Tok::Punct(c)
        } else {
            return Err(ReadError::parse(
                start_line,
                format!("unexpected character {:?}", whole.as_str()),
            ));
        };

        tokens.push(Token {
            tok,
            line: start_line,
        });
    }

    Ok(tokens)
}

fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn is_keyword(tok: &Tok, keyword: &str) -> bool {
    matches!(tok, Tok::Id { text, quoted: false } if text.eq_ignore_ascii_case(keyword))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    directed: bool,
    graph: Graph,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos).map(|t| &t.tok)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.peek() == Some(&Tok::Punct(c)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_id(&mut self, what: &str) -> Result<String, ReadError> {
        let line = self.line();
        match self.bump() {
            Some(Token {
                tok: Tok::Id { text, .. },
                ..
            }) => Ok(text),
            Some(other) => Err(ReadError::parse(
                other.line,
                format!("expected {what}, found {:?}", other.tok),
            )),
            None => Err(ReadError::parse(line, format!("expected {what}, found end of input"))),
        }
    }

    fn header(&mut self) -> Result<(), ReadError> {
        if self.peek().is_some_and(|t| is_keyword(t, "strict")) {
            self.pos += 1;
        }
        let line = self.line();
        self.directed = match self.bump().map(|t| t.tok) {
            Some(t) if is_keyword(&t, "graph") => false,
            Some(t) if is_keyword(&t, "digraph") => true,
            _ => {
                return Err(ReadError::parse(line, "expected `graph` or `digraph` header"));
            }
        };
        if matches!(self.peek(), Some(Tok::Id { .. })) {
            self.pos += 1;
        }
        if !self.eat_punct('{') {
            return Err(ReadError::parse(self.line(), "expected `{` after header"));
        }
        Ok(())
    }

    fn skip_attr_list(&mut self) -> Result<(), ReadError> {
        let line = self.line();
        while let Some(token) = self.bump() {
            if token.tok == Tok::Punct(']') {
                return Ok(());
            }
        }
        Err(ReadError::parse(line, "unterminated attribute list"))
    }

    /// `id (':' id (':' id)?)?`; ports are accepted and dropped.
    fn node_id(&mut self) -> Result<String, ReadError> {
        let id = self.expect_id("a node id")?;
        for _ in 0..2 {
            if !self.eat_punct(':') {
                break;
            }
            self.expect_id("a port")?;
        }
        Ok(id)
    }

    fn body(&mut self) -> Result<(), ReadError> {
        let mut depth = 1usize;

        while depth > 0 {
            let line = self.line();
            let Some(tok) = self.peek().cloned() else {
                return Err(ReadError::parse(line, "missing closing `}`"));
            };

            match tok {
                Tok::Punct(';' | ',') => self.pos += 1,
                Tok::Punct('{') => {
                    self.pos += 1;
                    depth += 1;
                }
                Tok::Punct('}') => {
                    self.pos += 1;
                    depth -= 1;
                }
                Tok::Punct('[') => {
                    self.pos += 1;
                    self.skip_attr_list()?;
                }
                ref t if is_keyword(t, "subgraph") => {
                    self.pos += 1;
                    if matches!(self.peek(), Some(Tok::Id { .. })) {
                        self.pos += 1;
                    }
                }
                ref t if ["graph", "node", "edge"].iter().any(|k| is_keyword(t, k)) => {
                    self.pos += 1;
                    if self.eat_punct('[') {
                        self.skip_attr_list()?;
                    }
                }
                Tok::Id { .. } => self.statement()?,
                other => {
                    return Err(ReadError::parse(
                        line,
                        format!("unexpected {other:?} at start of statement"),
                    ));
                }
            }
        }

        Ok(())
    }

    fn statement(&mut self) -> Result<(), ReadError> {
        let first = self.node_id()?;

        if self.eat_punct('=') {
            self.expect_id("an attribute value")?;
            return Ok(());
        }

        let mut prev = first;
        let mut chained = false;
        while let Some(&Tok::Op { directed }) = self.peek() {
            let line = self.line();
            self.pos += 1;
            if directed != self.directed {
                let message = if directed {
                    "`->` in an undirected graph"
                } else {
                    "`--` in a directed graph"
                };
                return Err(ReadError::parse(line, message));
            }
            let next = self.node_id()?;
            self.graph.add_edge_by_label(&prev, &next)?;
            prev = next;
            chained = true;
        }

        if !chained {
            self.graph.add_vertex(prev);
        }

        if self.eat_punct('[') {
            self.skip_attr_list()?;
        }
        Ok(())
    }
}

/// Parses a dot document.
///
/// # Errors
/// Returns [`ReadError::Parse`] for malformed text and [`ReadError::Graph`]
/// for self-loops.
pub fn parse_dot(text: &str) -> Result<LoadedGraph, ReadError> {
    let mut parser = Parser {
        tokens: tokenize(text)?,
        pos: 0,
        directed: false,
        graph: Graph::new(),
    };
    parser.header()?;
    parser.body()?;

    Ok(LoadedGraph {
        graph: parser.graph,
        directed: parser.directed,
    })
}

fn quote(label: &str) -> Cow<'_, str> {
    let keyword = KEYWORDS.iter().any(|k| label.eq_ignore_ascii_case(k));
    if PLAIN_ID.is_match(label) && !keyword {
        Cow::Borrowed(label)
    } else {
        Cow::Owned(format!("\"{}\"", label.replace('\\', "\\\\").replace('"', "\\\"")))
    }
}

/// Writes `graph` as an undirected dot document named `planar`.
///
/// Isolated vertices are written as node statements so they survive a round
/// trip; edges follow in insertion order.
///
/// # Errors
/// Propagates I/O errors from `out`.
pub fn write_dot<W: Write>(graph: &Graph, out: &mut W) -> io::Result<()> {
    writeln!(out, "graph planar {{")?;
    for v in graph.vertices().filter(|&v| graph.degree(v) == 0) {
        if let Some(label) = graph.label(v) {
            writeln!(out, "    {};", quote(label))?;
        }
    }
    for edge in graph.edges() {
        if let Some((a, b)) = graph.edge_labels(edge) {
            writeln!(out, "    {} -- {};", quote(a), quote(b))?;
        }
    }
    writeln!(out, "}}")
}

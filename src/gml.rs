//! GML exchange format — the graph boundary.
//!
//! Reads and writes the subset the statistics need: the `directed` flag,
//! `node [ id N ]` declarations, and `edge [ source A target B ]` entries.
//! All other keys and attribute blocks are skipped opaquely. Node IDs may be
//! arbitrary integers; they are densified to `0..n` in appearance order.

use std::io::Write;

use hashbrown::HashMap;

use crate::model::Graph;
use crate::{Error, Result};

// ============================================================================
// Tokens
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Key(String),
    Int(i64),
    Real(f64),
    Str(String),
    Open,
    Close,
}

/// A token plus the line it started on, for error reporting.
type Spanned = (Token, usize);

fn tokenize(source: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut line = 1usize;

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }

            // GML comments run to end of line.
            '#' => {
                while chars.peek().is_some_and(|&(_, c)| c != '\n') {
                    chars.next();
                }
            }

            '[' => {
                tokens.push((Token::Open, line));
                chars.next();
            }
            ']' => {
                tokens.push((Token::Close, line));
                chars.next();
            }

            '"' => {
                chars.next();
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((_, '\\')) => {
                            if let Some((_, escaped)) = chars.next() {
                                s.push(escaped);
                            }
                        }
                        Some((_, '\n')) => {
                            line += 1;
                            s.push('\n');
                        }
                        Some((_, c)) => s.push(c),
                        None => {
                            return Err(Error::Parse {
                                line,
                                message: "unterminated string".into(),
                            });
                        }
                    }
                }
                tokens.push((Token::Str(s), line));
            }

            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                let start = pos;
                let mut end = pos;
                while let Some(&(p, c)) = chars.peek() {
                    if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                        end = p + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let text = &source[start..end];
                let token = if text.contains(['.', 'e', 'E']) {
                    Token::Real(text.parse().map_err(|_| Error::Parse {
                        line,
                        message: format!("malformed number `{text}`"),
                    })?)
                } else {
                    Token::Int(text.parse().map_err(|_| Error::Parse {
                        line,
                        message: format!("malformed number `{text}`"),
                    })?)
                };
                tokens.push((token, line));
            }

            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = pos;
                let mut end = pos;
                while let Some(&(p, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        end = p + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((Token::Key(source[start..end].to_string()), line));
            }

            c => {
                return Err(Error::Parse {
                    line,
                    message: format!("unexpected character `{c}`"),
                });
            }
        }
    }

    Ok(tokens)
}

// ============================================================================
// Reader
// ============================================================================

/// Parse a GML document into a [`Graph`].
pub fn read(source: &str) -> Result<Graph> {
    let tokens = tokenize(source)?;
    let mut cursor = Cursor { tokens: &tokens, pos: 0 };

    // Top level: skip keys (Creator, Version, ...) until the graph block.
    loop {
        match cursor.next() {
            Some((Token::Key(k), _)) if k == "graph" => break,
            Some((Token::Key(_), _)) => cursor.skip_value()?,
            Some((_, line)) => {
                return Err(Error::Parse { line: *line, message: "expected a key".into() });
            }
            None => {
                return Err(Error::Parse { line: 0, message: "no graph block found".into() });
            }
        }
    }
    cursor.expect_open()?;

    let mut directed = false;
    let mut node_ids: Vec<i64> = Vec::new();
    let mut raw_edges: Vec<(i64, i64, usize)> = Vec::new();

    loop {
        match cursor.next() {
            Some((Token::Close, _)) => break,
            Some((Token::Key(k), line)) => match k.as_str() {
                "directed" => directed = cursor.expect_int()? != 0,
                "node" => {
                    let line = *line;
                    let id = cursor.block_int_field("id")?.ok_or(Error::Parse {
                        line,
                        message: "node block without id".into(),
                    })?;
                    if node_ids.contains(&id) {
                        return Err(Error::Parse {
                            line,
                            message: format!("duplicate node id {id}"),
                        });
                    }
                    node_ids.push(id);
                }
                "edge" => {
                    let line = *line;
                    let (source_id, target_id) = cursor.block_edge_fields()?;
                    let (Some(s), Some(t)) = (source_id, target_id) else {
                        return Err(Error::Parse {
                            line,
                            message: "edge block without source/target".into(),
                        });
                    };
                    raw_edges.push((s, t, line));
                }
                _ => cursor.skip_value()?,
            },
            Some((_, line)) => {
                return Err(Error::Parse {
                    line: *line,
                    message: "expected a key inside graph block".into(),
                });
            }
            None => {
                return Err(Error::Parse { line: 0, message: "unclosed graph block".into() });
            }
        }
    }

    let index: HashMap<i64, u32> = node_ids
        .iter()
        .enumerate()
        .map(|(dense, &id)| (id, dense as u32))
        .collect();

    let mut graph = Graph::empty(node_ids.len(), directed);
    for (s, t, line) in raw_edges {
        let (Some(&from), Some(&to)) = (index.get(&s), index.get(&t)) else {
            return Err(Error::Parse {
                line,
                message: format!("edge references undeclared node ({s} -> {t})"),
            });
        };
        graph.add_edge(from, to);
    }
    Ok(graph)
}

struct Cursor<'t> {
    tokens: &'t [Spanned],
    pos: usize,
}

impl<'t> Cursor<'t> {
    fn next(&mut self) -> Option<&'t Spanned> {
        let t = self.tokens.get(self.pos);
        self.pos += 1;
        t
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map_or(0, |(_, line)| *line)
    }

    fn expect_open(&mut self) -> Result<()> {
        match self.next() {
            Some((Token::Open, _)) => Ok(()),
            Some((_, line)) => Err(Error::Parse { line: *line, message: "expected `[`".into() }),
            None => Err(Error::Parse { line: self.last_line(), message: "expected `[`".into() }),
        }
    }

    fn expect_int(&mut self) -> Result<i64> {
        match self.next() {
            Some((Token::Int(v), _)) => Ok(*v),
            Some((_, line)) => {
                Err(Error::Parse { line: *line, message: "expected an integer".into() })
            }
            None => Err(Error::Parse {
                line: self.last_line(),
                message: "expected an integer".into(),
            }),
        }
    }

    /// Skip one value: a scalar, or a bracketed block with nesting.
    fn skip_value(&mut self) -> Result<()> {
        match self.next() {
            Some((Token::Int(_) | Token::Real(_) | Token::Str(_) | Token::Key(_), _)) => Ok(()),
            Some((Token::Open, line)) => {
                let mut depth = 1usize;
                while depth > 0 {
                    match self.next() {
                        Some((Token::Open, _)) => depth += 1,
                        Some((Token::Close, _)) => depth -= 1,
                        Some(_) => {}
                        None => {
                            return Err(Error::Parse {
                                line: *line,
                                message: "unclosed attribute block".into(),
                            });
                        }
                    }
                }
                Ok(())
            }
            Some((Token::Close, line)) => {
                Err(Error::Parse { line: *line, message: "unexpected `]`".into() })
            }
            None => Err(Error::Parse {
                line: self.last_line(),
                message: "missing value".into(),
            }),
        }
    }

    /// Consume a `[ ... ]` block, returning the integer under `field` if
    /// present; other keys are skipped.
    fn block_int_field(&mut self, field: &str) -> Result<Option<i64>> {
        self.expect_open()?;
        let mut found = None;
        loop {
            match self.next() {
                Some((Token::Close, _)) => return Ok(found),
                Some((Token::Key(k), _)) if k == field => found = Some(self.expect_int()?),
                Some((Token::Key(_), _)) => self.skip_value()?,
                Some((_, line)) => {
                    return Err(Error::Parse {
                        line: *line,
                        message: "expected a key inside block".into(),
                    });
                }
                None => {
                    return Err(Error::Parse {
                        line: self.last_line(),
                        message: "unclosed block".into(),
                    });
                }
            }
        }
    }

    /// Consume an edge block, returning its `source` and `target` integers.
    fn block_edge_fields(&mut self) -> Result<(Option<i64>, Option<i64>)> {
        self.expect_open()?;
        let mut source = None;
        let mut target = None;
        loop {
            match self.next() {
                Some((Token::Close, _)) => return Ok((source, target)),
                Some((Token::Key(k), _)) if k == "source" => source = Some(self.expect_int()?),
                Some((Token::Key(k), _)) if k == "target" => target = Some(self.expect_int()?),
                Some((Token::Key(_), _)) => self.skip_value()?,
                Some((_, line)) => {
                    return Err(Error::Parse {
                        line: *line,
                        message: "expected a key inside edge block".into(),
                    });
                }
                None => {
                    return Err(Error::Parse {
                        line: self.last_line(),
                        message: "unclosed edge block".into(),
                    });
                }
            }
        }
    }
}

// ============================================================================
// Writer
// ============================================================================

/// Write `graph` as a GML document with dense node IDs.
pub fn write(graph: &Graph, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "Creator \"motifclust\"")?;
    writeln!(writer, "graph [")?;
    if graph.is_directed() {
        writeln!(writer, "  directed 1")?;
    }
    for v in 0..graph.node_count() {
        writeln!(writer, "  node [")?;
        writeln!(writer, "    id {v}")?;
        writeln!(writer, "  ]")?;
    }
    for (a, b) in graph.edges() {
        writeln!(writer, "  edge [")?;
        writeln!(writer, "    source {a}")?;
        writeln!(writer, "    target {b}")?;
        writeln!(writer, "  ]")?;
    }
    writeln!(writer, "]")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_directed_graph() {
        let source = r#"
            Creator "test"
            graph [
              directed 1
              node [ id 10 label "a" ]
              node [ id 20 ]
              node [ id 30 ]
              edge [ source 10 target 20 ]
              edge [ source 20 target 30 weight 2.5 ]
            ]
        "#;
        let g = read(source).unwrap();
        assert!(g.is_directed());
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 2));
    }

    #[test]
    fn test_read_defaults_to_undirected() {
        let source = "graph [ node [ id 0 ] node [ id 1 ] edge [ source 0 target 1 ] ]";
        let g = read(source).unwrap();
        assert!(!g.is_directed());
    }

    #[test]
    fn test_read_skips_nested_attribute_blocks() {
        let source = r##"
            graph [
              node [ id 0 graphics [ x 1.0 y 2.0 fill "#ff0000" ] ]
              node [ id 1 ]
              edge [ source 0 target 1 ]
            ]
        "##;
        let g = read(source).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_read_rejects_undeclared_edge_endpoint() {
        let source = "graph [ node [ id 0 ] edge [ source 0 target 9 ] ]";
        assert!(matches!(read(source), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_read_rejects_missing_graph_block() {
        assert!(matches!(read("Creator \"x\""), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_round_trip() {
        let mut g = Graph::empty(3, true);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let mut buf = Vec::new();
        write(&g, &mut buf).unwrap();
        let back = read(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(back, g);
    }
}

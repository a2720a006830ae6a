//! Path queries over a [`Document`]
//!
//! A small subset of XPath location paths:
//!
//! ```text
//! //ui:*[@InformativeScreenshot]
//! //xaml:Sequence
//! //ui:SendHotkey/ui:SendHotkey.Target/ui:Target
//! ./xaml:TryCatch.Catches/xaml:Catch
//! ```
//!
//! Steps are separated by `/` (child) or `//` (descendant). A name test is
//! `*`, `Local`, `prefix:Local` or `prefix:*`, with prefixes resolved
//! through the fixed namespace registry. Predicates only test attribute
//! presence (`[@Name]`, `[@x:Name]`); value comparisons belong to the
//! rules. Results are deduplicated and returned in document order.

use super::document::{Document, NodeId};
use super::vocabulary::namespace_uri;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("empty query expression")]
    Empty,

    #[error("unexpected '{found}' at offset {offset} in query `{expression}`")]
    UnexpectedChar {
        expression: String,
        found: char,
        offset: usize,
    },

    #[error("query `{0}` ends unexpectedly")]
    UnexpectedEnd(String),

    #[error("unknown namespace prefix '{prefix}' in query `{expression}`")]
    UnknownPrefix { expression: String, prefix: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    /// Element without a namespace
    Local(String),
    /// Element in a namespace; `None` local name means `prefix:*`
    Qualified {
        namespace: &'static str,
        local: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrTest {
    namespace: Option<&'static str>,
    local: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
    predicates: Vec<AttrTest>,
}

/// A compiled path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    absolute: bool,
    steps: Vec<Step>,
}

impl Query {
    pub fn parse(expression: &str) -> Result<Self, QueryError> {
        QueryParser::new(expression).parse()
    }

    /// Matching element ids in document order.
    ///
    /// Relative queries start from `context`, or from the document itself
    /// when no context is given.
    pub fn evaluate(&self, doc: &Document, context: Option<NodeId>) -> Vec<NodeId> {
        if doc.is_empty() {
            return Vec::new();
        }

        // `None` stands for the document node above the root element
        let mut current: Vec<Option<NodeId>> = if self.absolute {
            vec![None]
        } else {
            vec![context]
        };

        for step in &self.steps {
            let mut next: Vec<NodeId> = Vec::new();

            for ctx in &current {
                let candidates: Vec<NodeId> = match (ctx, step.axis) {
                    (None, Axis::Child) => vec![0],
                    (None, Axis::Descendant) => (0..doc.len()).collect(),
                    (Some(id), Axis::Child) => doc.children_of(*id).to_vec(),
                    (Some(id), Axis::Descendant) => (id + 1..doc.subtree_end(*id)).collect(),
                };

                next.extend(candidates.into_iter().filter(|&id| step.matches(doc, id)));
            }

            next.sort_unstable();
            next.dedup();
            current = next.into_iter().map(Some).collect();
        }

        current.into_iter().flatten().collect()
    }
}

impl Step {
    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let name = doc.name_of(id);
        let name_ok = match &self.test {
            NameTest::Any => true,
            NameTest::Local(local) => name.is(None, local),
            NameTest::Qualified { namespace, local } => {
                name.namespace.as_deref() == Some(*namespace)
                    && local.as_ref().map_or(true, |l| *l == name.local)
            }
        };

        name_ok
            && self.predicates.iter().all(|p| {
                doc.attributes_of(id)
                    .iter()
                    .any(|a| a.name.is(p.namespace, &p.local))
            })
    }
}

struct QueryParser<'a> {
    expression: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> QueryParser<'a> {
    fn new(expression: &'a str) -> Self {
        Self {
            expression,
            chars: expression.trim().char_indices().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<Query, QueryError> {
        if self.chars.is_empty() {
            return Err(QueryError::Empty);
        }

        let absolute = self.peek() == Some('/');
        let mut axis = if absolute {
            self.separator()?
        } else if self.peek() == Some('.') && self.peek_at(1) == Some('/') {
            self.pos += 1;
            self.separator()?
        } else {
            Axis::Child
        };

        let mut steps = Vec::new();

        loop {
            let test = self.name_test()?;
            let predicates = self.predicates()?;
            steps.push(Step {
                axis,
                test,
                predicates,
            });

            if self.peek().is_none() {
                break;
            }
            axis = self.separator()?;
        }

        Ok(Query { absolute, steps })
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|(_, c)| *c)
    }

    fn unexpected(&self) -> QueryError {
        match self.chars.get(self.pos) {
            Some(&(offset, found)) => QueryError::UnexpectedChar {
                expression: self.expression.to_string(),
                found,
                offset,
            },
            None => QueryError::UnexpectedEnd(self.expression.to_string()),
        }
    }

    fn expect(&mut self, c: char) -> Result<(), QueryError> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn separator(&mut self) -> Result<Axis, QueryError> {
        self.expect('/')?;
        if self.peek() == Some('/') {
            self.pos += 1;
            Ok(Axis::Descendant)
        } else {
            Ok(Axis::Child)
        }
    }

    fn ncname(&mut self) -> Result<String, QueryError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.chars[start..self.pos].iter().map(|(_, c)| c).collect())
    }

    fn resolve(&self, prefix: &str) -> Result<&'static str, QueryError> {
        namespace_uri(prefix).ok_or_else(|| QueryError::UnknownPrefix {
            expression: self.expression.to_string(),
            prefix: prefix.to_string(),
        })
    }

    fn name_test(&mut self) -> Result<NameTest, QueryError> {
        if self.peek() == Some('*') {
            self.pos += 1;
            return Ok(NameTest::Any);
        }

        let first = self.ncname()?;
        if self.peek() != Some(':') {
            return Ok(NameTest::Local(first));
        }
        self.pos += 1;

        let namespace = self.resolve(&first)?;
        let local = if self.peek() == Some('*') {
            self.pos += 1;
            None
        } else {
            Some(self.ncname()?)
        };
        Ok(NameTest::Qualified { namespace, local })
    }

    fn predicates(&mut self) -> Result<Vec<AttrTest>, QueryError> {
        let mut predicates = Vec::new();

        while self.peek() == Some('[') {
            self.pos += 1;
            self.expect('@')?;

            let first = self.ncname()?;
            let test = if self.peek() == Some(':') {
                self.pos += 1;
                AttrTest {
                    namespace: Some(self.resolve(&first)?),
                    local: self.ncname()?,
                }
            } else {
                AttrTest {
                    namespace: None,
                    local: first,
                }
            };

            self.expect(']')?;
            predicates.push(test);
        }

        Ok(predicates)
    }
}

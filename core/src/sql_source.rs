use crate::placeholder::{replace_placeholders, Dialect};
use crate::{Error, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::Tokenizer;

const FOREACH_OPEN: &str = "<foreach";
const FOREACH_CLOSE: &str = "</foreach>";

/// What binding an empty collection to a `<foreach>` does. Engines disagree, so it's configurable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCollection {
    /// Fail with [`Error::EmptyCollection`].
    #[default]
    Reject,
    /// Expand to nothing, e.g. `IN ()`, and let the engine decide.
    RenderEmpty,
    /// Nothing to execute; binding yields `None`.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForEach {
    pub item: String,
    pub index: Option<String>,
    pub collection: String,
    pub separator: String,
    pub open: String,
    pub close: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SqlNode {
    Text(String),
    ForEach(ForEach),
}

/// A compiled statement template, ready to be bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqlSource {
    nodes: Vec<SqlNode>,
}

/// Sql text with dialect placeholders, plus the parameters in placeholder order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundSql<T> {
    pub sql: String,
    pub parameters: Vec<T>,
}

impl SqlSource {
    /// Parse a template. Static text is tokenized, so unbalanced quoting fails here rather than
    /// at execution time.
    pub fn compile(sql: &str) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut rest = sql;
        while let Some(start) = rest.find(FOREACH_OPEN) {
            push_text(&mut nodes, &rest[..start])?;
            let after = &rest[start + FOREACH_OPEN.len()..];
            let tag_end = after
                .find('>')
                .ok_or_else(|| Error::Template("unterminated <foreach> tag".to_string()))?;
            let foreach = parse_foreach(&after[..tag_end])?;
            let body = &after[tag_end + 1..];
            let close = body
                .find(FOREACH_CLOSE)
                .ok_or_else(|| Error::Template("<foreach> without </foreach>".to_string()))?;
            let inner = body[..close].trim();
            if inner.contains(FOREACH_OPEN) {
                return Err(Error::Template("nested <foreach> is not supported".to_string()));
            }
            if inner != format!("#{{{}}}", foreach.item) {
                return Err(Error::Template(format!(
                    "<foreach> body must be `#{{{}}}`, found `{inner}`",
                    foreach.item
                )));
            }
            nodes.push(SqlNode::ForEach(foreach));
            rest = &body[close + FOREACH_CLOSE.len()..];
        }
        push_text(&mut nodes, rest)?;

        let source = SqlSource { nodes };
        let probe = source.render(1);
        Tokenizer::new(&GenericDialect {}, &probe).tokenize()?;
        Ok(source)
    }

    pub fn foreach_nodes(&self) -> impl Iterator<Item = &ForEach> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            SqlNode::ForEach(f) => Some(f),
            SqlNode::Text(_) => None,
        })
    }

    fn render(&self, len: usize) -> String {
        let mut sql = String::new();
        for node in &self.nodes {
            match node {
                SqlNode::Text(text) => sql.push_str(text),
                SqlNode::ForEach(f) => {
                    sql.push_str(&f.open);
                    sql.push_str(&std::iter::repeat("?").take(len).join(&f.separator));
                    sql.push_str(&f.close);
                }
            }
        }
        sql
    }

    /// Expand every `<foreach>` over `items` and rewrite placeholders for `dialect`.
    ///
    /// Returns `None` when `items` is empty and the policy is [`EmptyCollection::Skip`].
    pub fn bind<T: Clone>(
        &self,
        items: &[T],
        dialect: Dialect,
        empty: EmptyCollection,
    ) -> Result<Option<BoundSql<T>>> {
        if items.is_empty() {
            match empty {
                EmptyCollection::Reject => {
                    let collection = self
                        .foreach_nodes()
                        .map(|f| f.collection.as_str())
                        .next()
                        .unwrap_or_default()
                        .to_string();
                    return Err(Error::EmptyCollection { collection });
                }
                EmptyCollection::Skip => {
                    tracing::debug!("Skipping statement bound to an empty collection");
                    return Ok(None);
                }
                EmptyCollection::RenderEmpty => {}
            }
        }
        let expansions = self.foreach_nodes().count();
        let parameters = (0..expansions).flat_map(|_| items.iter().cloned()).collect::<Vec<_>>();
        let (sql, placeholder_count) = replace_placeholders(&self.render(items.len()), &mut dialect.placeholder())?;
        if placeholder_count != parameters.len() {
            return Err(Error::Template(format!(
                "{} placeholders were found in the statement, but {} parameters were bound",
                placeholder_count,
                parameters.len(),
            )));
        }
        Ok(Some(BoundSql { sql, parameters }))
    }
}

fn push_text(nodes: &mut Vec<SqlNode>, text: &str) -> Result<()> {
    if text.contains(FOREACH_CLOSE) {
        return Err(Error::Template("</foreach> without <foreach>".to_string()));
    }
    if !text.is_empty() {
        nodes.push(SqlNode::Text(text.to_string()));
    }
    Ok(())
}

fn parse_foreach(attributes: &str) -> Result<ForEach> {
    let mut item = None;
    let mut index = None;
    let mut collection = None;
    let mut separator = String::new();
    let mut open = String::new();
    let mut close = String::new();
    let mut rest = attributes.trim();
    while !rest.is_empty() {
        let (key, value) = rest
            .split_once('=')
            .ok_or_else(|| Error::Template(format!("malformed <foreach> attribute: `{rest}`")))?;
        let value = value.trim_start();
        let value = value
            .strip_prefix('"')
            .ok_or_else(|| Error::Template(format!("unquoted <foreach> attribute: `{}`", key.trim())))?;
        let end = value
            .find('"')
            .ok_or_else(|| Error::Template(format!("unterminated <foreach> attribute: `{}`", key.trim())))?;
        let (value, remainder) = (value[..end].to_string(), &value[end + 1..]);
        match key.trim() {
            "item" => item = Some(value),
            "index" => index = Some(value),
            "collection" => collection = Some(value),
            "separator" => separator = value,
            "open" => open = value,
            "close" => close = value,
            other => return Err(Error::Template(format!("unknown <foreach> attribute: `{other}`"))),
        }
        rest = remainder.trim_start();
    }
    Ok(ForEach {
        item: item.ok_or_else(|| Error::Template("<foreach> requires an `item` attribute".to_string()))?,
        index,
        collection: collection
            .ok_or_else(|| Error::Template("<foreach> requires a `collection` attribute".to_string()))?,
        separator,
        open,
        close,
    })
}

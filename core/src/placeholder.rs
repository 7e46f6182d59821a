use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::{Token, Tokenizer};

/// Placeholder style of the engine the statements are bound for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    #[default]
    Mysql,
    Postgres,
    Sqlite,
}

impl Dialect {
    pub fn placeholder(self) -> Placeholder {
        match self {
            Dialect::Postgres => Placeholder::dollar_sign(),
            Dialect::Mysql | Dialect::Sqlite => Placeholder::question_mark(),
        }
    }
}

pub enum Placeholder {
    DollarSign(usize),
    QuestionMark,
}

impl Placeholder {
    pub fn dollar_sign() -> Self {
        Placeholder::DollarSign(1)
    }

    pub fn question_mark() -> Self {
        Placeholder::QuestionMark
    }
}

impl Iterator for Placeholder {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match *self {
            Placeholder::DollarSign(ref mut i) => {
                let r = Some(format!("${}", i));
                *i += 1;
                r
            }
            Placeholder::QuestionMark => Some("?".to_string()),
        }
    }
}

/// Rewrite every `?` in `sql` with the next generated placeholder. Numbered `$N` placeholders
/// are left alone. Returns the rewritten sql and the number of parameters it expects.
pub fn replace_placeholders<T: Iterator<Item = String>>(
    sql: &str,
    placeholder_generator: &mut T,
) -> Result<(String, usize)> {
    let mut placeholder_count = 0usize;
    let dialect = GenericDialect {};
    let tokens = Tokenizer::new(&dialect, sql).with_unescape(false).tokenize()?;
    let mut buf = String::with_capacity(sql.len() + 16);
    let mut next_placeholder = |count: &mut usize| {
        *count += 1;
        placeholder_generator
            .next()
            .ok_or_else(|| Error::Template("ran out of placeholders".to_string()))
    };
    for tok in &tokens {
        match tok {
            Token::Placeholder(p) if p.starts_with('$') => {
                let n = p[1..].parse::<usize>().map_err(|_| {
                    Error::Template(format!("Failed to parse number after a $ during query tokenization. Value was: {p}"))
                })?;
                buf.push_str(p);
                placeholder_count = std::cmp::max(placeholder_count, n);
            }
            Token::Placeholder(_) | Token::Char('?') => {
                buf.push_str(&next_placeholder(&mut placeholder_count)?);
            }
            _ => buf.push_str(&tok.to_string()),
        }
    }
    Ok((buf, placeholder_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_placeholders() -> Result<()> {
        let mut placeholder_generator = Dialect::Postgres.placeholder();
        let (sql, placeholder_count) = replace_placeholders(
            "DELETE FROM users WHERE id IN (?,?,?)",
            &mut placeholder_generator,
        )?;
        assert_eq!(sql, "DELETE FROM users WHERE id IN ($1,$2,$3)");
        assert_eq!(placeholder_count, 3);
        Ok(())
    }

    #[test]
    fn test_question_marks_stay_for_mysql() -> Result<()> {
        let mut placeholder_generator = Dialect::Mysql.placeholder();
        let (sql, placeholder_count) =
            replace_placeholders("DELETE FROM users WHERE id IN (?,?)", &mut placeholder_generator)?;
        assert_eq!(sql, "DELETE FROM users WHERE id IN (?,?)");
        assert_eq!(placeholder_count, 2);
        Ok(())
    }

    #[test]
    fn test_leave_placeholders_alone() -> Result<()> {
        let mut placeholder_generator = Dialect::Postgres.placeholder();
        let (sql, placeholder_count) =
            replace_placeholders("SELECT * FROM users WHERE email = $1", &mut placeholder_generator)?;
        assert_eq!(sql, "SELECT * FROM users WHERE email = $1");
        assert_eq!(placeholder_count, 1);
        Ok(())
    }

    #[test]
    fn test_escaped_quotes_survive() -> Result<()> {
        let mut placeholder_generator = Dialect::Postgres.placeholder();
        let (sql, placeholder_count) = replace_placeholders(
            "UPDATE notes SET body = 'it''s ?' WHERE id = ?",
            &mut placeholder_generator,
        )?;
        assert_eq!(sql, "UPDATE notes SET body = 'it''s ?' WHERE id = $1");
        assert_eq!(placeholder_count, 1);
        Ok(())
    }
}

//! Filter predicates and their PostgreSQL rendering: column names are fixed
//! identifiers, values always bind as parameters.

use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A filter predicate selecting a subset of stored records. The four shapes
/// are the only ones the API needs: no OR, no ranges, no sorting.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Match every record.
    None,
    /// Boolean equality on one column.
    Equals(&'static str, bool),
    /// Substring match on a text column. Case-sensitivity follows the
    /// column collation.
    Contains(&'static str, String),
    /// Containment: the stored JSONB document holds every element of the
    /// given document.
    AllOf(&'static str, Value),
}

/// A value bound alongside a rendered clause.
#[derive(Clone, Debug, PartialEq)]
pub enum BindParam {
    Bool(bool),
    Text(String),
    Json(Value),
}

/// A rendered WHERE clause and its parameters, in bind order.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindParam>,
}

impl Filter {
    /// Render as a WHERE clause with placeholders starting at `$1`.
    /// `Filter::None` renders an empty clause. The substring fragment is
    /// wrapped in `%` wildcards as-is, without escaping.
    pub fn render(&self) -> QueryBuf {
        match self {
            Filter::None => QueryBuf {
                sql: String::new(),
                params: Vec::new(),
            },
            Filter::Equals(col, value) => QueryBuf {
                sql: format!(" WHERE {} = $1", col),
                params: vec![BindParam::Bool(*value)],
            },
            Filter::Contains(col, fragment) => QueryBuf {
                sql: format!(" WHERE {} LIKE $1", col),
                params: vec![BindParam::Text(format!("%{}%", fragment))],
            },
            Filter::AllOf(col, set) => QueryBuf {
                sql: format!(" WHERE {} @> $1", col),
                params: vec![BindParam::Json(set.clone())],
            },
        }
    }
}

impl<'q> Encode<'q, Postgres> for BindParam {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            BindParam::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf),
            BindParam::Text(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)
            }
            BindParam::Json(v) => <Value as Encode<Postgres>>::encode_by_ref(v, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            BindParam::Bool(_) => <bool as sqlx::Type<Postgres>>::type_info(),
            BindParam::Text(_) => <String as sqlx::Type<Postgres>>::type_info(),
            BindParam::Json(_) => <Value as sqlx::Type<Postgres>>::type_info(),
        })
    }
}

impl sqlx::Type<Postgres> for BindParam {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_filter_renders_empty_clause() {
        let q = Filter::None.render();
        assert_eq!(q.sql, "");
        assert!(q.params.is_empty());
    }

    #[test]
    fn equals_renders_boolean_parameter() {
        let q = Filter::Equals("assigned", true).render();
        assert_eq!(q.sql, " WHERE assigned = $1");
        assert_eq!(q.params, vec![BindParam::Bool(true)]);
    }

    #[test]
    fn contains_wraps_fragment_in_wildcards() {
        let q = Filter::Contains("name", "li".into()).render();
        assert_eq!(q.sql, " WHERE name LIKE $1");
        assert_eq!(q.params, vec![BindParam::Text("%li%".into())]);
    }

    #[test]
    fn all_of_renders_jsonb_containment() {
        let set = json!(["rust", "sql"]);
        let q = Filter::AllOf("skills", set.clone()).render();
        assert_eq!(q.sql, " WHERE skills @> $1");
        assert_eq!(q.params, vec![BindParam::Json(set)]);
    }
}

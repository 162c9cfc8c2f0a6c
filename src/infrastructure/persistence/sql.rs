//! Rendering of [`Criteria`] into PostgreSQL queries.

use serde_json::json;
use sqlx::{Postgres, QueryBuilder};

use super::schema::ResourceSchema;
use crate::domain::criteria::{Combinator, Criteria, Direction, Expr, Operator, SortKey, Value};
use crate::error::AppError;

/// Builds `SELECT <columns> FROM <table> WHERE ... ORDER BY ... LIMIT ... OFFSET ...`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown keys or values an operator
/// cannot take.
pub fn select_query(
    schema: &ResourceSchema,
    criteria: &Criteria,
) -> Result<QueryBuilder<'static, Postgres>, AppError> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} FROM {} WHERE ",
        schema.select, schema.table
    ));
    push_expr(&mut builder, criteria.conditions(), schema)?;
    push_order(&mut builder, criteria.sort(), schema)?;

    let (offset, limit) = criteria.slice();
    builder.push(" LIMIT ");
    builder.push_bind(clamp(limit));
    builder.push(" OFFSET ");
    builder.push_bind(clamp(offset));

    Ok(builder)
}

/// Builds `SELECT COUNT(*) FROM <table> WHERE ...`, ignoring sort and slice.
///
/// # Errors
///
/// Same as [`select_query`].
pub fn count_query(
    schema: &ResourceSchema,
    criteria: &Criteria,
) -> Result<QueryBuilder<'static, Postgres>, AppError> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {} WHERE ", schema.table));
    push_expr(&mut builder, criteria.conditions(), schema)?;
    Ok(builder)
}

fn clamp(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

fn push_expr(
    builder: &mut QueryBuilder<'static, Postgres>,
    expr: &Expr,
    schema: &ResourceSchema,
) -> Result<(), AppError> {
    match expr {
        Expr::All => {
            builder.push("TRUE");
        }
        Expr::Compare { op, key, value } => {
            let column = schema.column(key)?;
            push_compare(builder, *op, column, value)?;
        }
        Expr::Combine { exprs, .. } if exprs.is_empty() => {
            builder.push("TRUE");
        }
        Expr::Combine { op, exprs } => {
            let joiner = match op {
                Combinator::And => " AND ",
                Combinator::Or => " OR ",
            };
            builder.push("(");
            for (i, e) in exprs.iter().enumerate() {
                if i > 0 {
                    builder.push(joiner);
                }
                push_expr(builder, e, schema)?;
            }
            builder.push(")");
        }
        Expr::Not(inner) => {
            builder.push("NOT (");
            push_expr(builder, inner, schema)?;
            builder.push(")");
        }
    }

    Ok(())
}

fn push_compare(
    builder: &mut QueryBuilder<'static, Postgres>,
    op: Operator,
    column: &str,
    value: &Value,
) -> Result<(), AppError> {
    match (op, value) {
        (Operator::Eq, Value::List(values)) if values.is_empty() => {
            builder.push("FALSE");
        }
        (Operator::Ne, Value::List(values)) if values.is_empty() => {
            builder.push("TRUE");
        }
        (Operator::Eq | Operator::Ne, Value::List(values)) => {
            builder.push(column);
            builder.push(if op == Operator::Eq { " IN (" } else { " NOT IN (" });
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    builder.push(", ");
                }
                push_scalar(builder, op, v)?;
            }
            builder.push(")");
        }
        (Operator::Eq, Value::Null) => {
            builder.push(column).push(" IS NULL");
        }
        (Operator::Ne, Value::Null) => {
            builder.push(column).push(" IS NOT NULL");
        }
        (Operator::Like, Value::String(prefix)) => {
            builder.push(column).push(" LIKE ");
            builder.push_bind(format!("{}%", escape_like(prefix)));
        }
        (Operator::Like, _) | (_, Value::List(_)) | (_, Value::Null) => {
            return Err(unsupported(op, value));
        }
        (op, v) => {
            let sql_op = match op {
                Operator::Eq => " = ",
                Operator::Ne => " <> ",
                Operator::Lt => " < ",
                Operator::Le => " <= ",
                Operator::Gt => " > ",
                Operator::Ge => " >= ",
                Operator::Like => unreachable!("LIKE handled above"),
            };
            builder.push(column).push(sql_op);
            push_scalar(builder, op, v)?;
        }
    }

    Ok(())
}

fn push_scalar(
    builder: &mut QueryBuilder<'static, Postgres>,
    op: Operator,
    value: &Value,
) -> Result<(), AppError> {
    match value {
        Value::Bool(b) => {
            builder.push_bind(*b);
        }
        Value::Int(i) => {
            builder.push_bind(*i);
        }
        Value::String(s) => {
            builder.push_bind(s.clone());
        }
        Value::Null | Value::List(_) => return Err(unsupported(op, value)),
    }

    Ok(())
}

fn push_order(
    builder: &mut QueryBuilder<'static, Postgres>,
    sort: &[SortKey],
    schema: &ResourceSchema,
) -> Result<(), AppError> {
    builder.push(" ORDER BY ");
    for key in sort {
        let column = schema.column(&key.key)?;
        builder.push(column);
        builder.push(match key.direction {
            Direction::Asc => " ASC, ",
            Direction::Desc => " DESC, ",
        });
    }
    builder.push(schema.id_column).push(" ASC");

    Ok(())
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn unsupported(op: Operator, value: &Value) -> AppError {
    AppError::bad_request(
        "Unsupported comparison",
        json!({"operator": op.as_str(), "value": value.kind()}),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::schema::{PRODUCT_LISTS_SCHEMA, PRODUCT_SCHEMA};

    fn list_criteria(ids: Vec<i64>, domains: Vec<&str>) -> Criteria {
        let mut c = Criteria::new();
        c.set_conditions(Criteria::combine(
            Combinator::And,
            vec![
                Criteria::compare(Operator::Eq, "product.lists.parentid", ids),
                Criteria::compare(Operator::Eq, "product.lists.domain", domains),
            ],
        ));
        c
    }

    #[test]
    fn test_select_query_list_items() {
        let criteria = list_criteria(vec![1, 2], vec!["text", "media"]);
        let builder = select_query(&PRODUCT_LISTS_SCHEMA, &criteria).unwrap();

        assert_eq!(
            builder.sql(),
            "SELECT id, parentid, domain, \"type\", refid, position, status FROM product_lists \
             WHERE (parentid IN ($1, $2) AND domain IN ($3, $4)) \
             ORDER BY id ASC LIMIT $5 OFFSET $6"
        );
    }

    #[test]
    fn test_select_query_empty_lists() {
        let criteria = list_criteria(vec![], vec![]);
        let builder = select_query(&PRODUCT_LISTS_SCHEMA, &criteria).unwrap();

        assert!(builder.sql().contains("WHERE (FALSE AND FALSE)"));
    }

    #[test]
    fn test_select_query_sort_and_like() {
        let mut criteria = Criteria::new();
        criteria
            .set_conditions(Criteria::compare(Operator::Like, "product.code", "shirt_"))
            .set_sort(vec![SortKey::desc("product.ctime")]);

        let builder = select_query(&PRODUCT_SCHEMA, &criteria).unwrap();

        assert!(builder.sql().contains("WHERE code LIKE $1"));
        assert!(builder.sql().contains("ORDER BY ctime DESC, id ASC"));
    }

    #[test]
    fn test_count_query_ignores_slice() {
        let mut criteria = Criteria::new();
        criteria
            .set_conditions(Criteria::not(Criteria::compare(
                Operator::Eq,
                "product.status",
                Value::Null,
            )))
            .set_slice(10, 10);

        let builder = count_query(&PRODUCT_SCHEMA, &criteria).unwrap();

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM products WHERE NOT (status IS NULL)"
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut criteria = Criteria::new();
        criteria.set_conditions(Criteria::compare(Operator::Eq, "product.price", 1_i64));

        assert!(matches!(
            select_query(&PRODUCT_SCHEMA, &criteria),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_unsupported_values_are_rejected() {
        let mut criteria = Criteria::new();
        criteria.set_conditions(Criteria::compare(Operator::Lt, "product.id", vec![1_i64]));
        assert!(select_query(&PRODUCT_SCHEMA, &criteria).is_err());

        criteria.set_conditions(Criteria::compare(Operator::Like, "product.id", 1_i64));
        assert!(select_query(&PRODUCT_SCHEMA, &criteria).is_err());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}

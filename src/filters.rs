//! The template filters this crate registers with the host. Each filter has
//! the engine's function signature (`fn(&[Value]) -> Result<Value, FuncError>`)
//! so the registry can hand it straight to a template. Filters are pure:
//! lookup misses and non-sequence inputs produce empty results, not errors;
//! only arity and type misuse surface as [`FuncError`]s.

use chrono::{DateTime, NaiveDate};
use gtmpl_value::{FuncError, Value};

/// Formats a date as `DD Mon YYYY` (e.g. `01 Mar 2021`) in UTC. Accepts the
/// `YYYY-MM-DD` form documents carry, or a full RFC 3339 timestamp. The
/// month abbreviation is always English, independent of locale.
pub fn readable_date(args: &[Value]) -> Result<Value, FuncError> {
    let raw = match args {
        [Value::String(s)] => s,
        [_] => {
            return Err(FuncError::Generic(
                "readableDate expects a date string".to_owned(),
            ))
        }
        _ => {
            return Err(FuncError::Generic(
                "readableDate requires exactly 1 argument".to_owned(),
            ))
        }
    };

    let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => DateTime::parse_from_rfc3339(raw)
            .map_err(|e| {
                FuncError::Generic(format!("readableDate: `{}`: {}", raw, e))
            })?
            .naive_utc()
            .date(),
    };
    Ok(Value::from(date.format("%d %b %Y").to_string()))
}

/// Returns the first record in `authors` whose `key` field equals `label`,
/// or [`Value::Nil`] when none matches. A miss is not an error.
pub fn get_author(args: &[Value]) -> Result<Value, FuncError> {
    let (authors, label) = match args {
        [Value::Array(authors), label] => (authors, label),
        [_, _] => return Ok(Value::Nil),
        _ => {
            return Err(FuncError::Generic(
                "getAuthor requires exactly 2 arguments".to_owned(),
            ))
        }
    };

    for author in authors {
        if let Value::Object(fields) = author {
            if fields.get("key") == Some(label) {
                return Ok(author.clone());
            }
        }
    }
    Ok(Value::Nil)
}

/// Returns the subsequence of `posts` whose `data.author` equals `author`,
/// preserving order.
pub fn get_posts_by_author(args: &[Value]) -> Result<Value, FuncError> {
    let (posts, author) = match args {
        [Value::Array(posts), author] => (posts, author),
        [_, _] => return Ok(Value::Array(Vec::new())),
        _ => {
            return Err(FuncError::Generic(
                "getPostsByAuthor requires exactly 2 arguments".to_owned(),
            ))
        }
    };

    let matches = posts
        .iter()
        .filter(|post| match post {
            Value::Object(fields) => match fields.get("data") {
                Some(Value::Object(data)) => data.get("author") == Some(author),
                _ => false,
            },
            _ => false,
        })
        .cloned()
        .collect();
    Ok(Value::Array(matches))
}

/// Returns the first `n` elements of a sequence. A negative `n` returns the
/// trailing `-n` elements (standard negative-index slicing); `n = 0`, empty
/// input, and non-sequence input all return an empty sequence.
pub fn head(args: &[Value]) -> Result<Value, FuncError> {
    let (items, n) = match args {
        [Value::Array(items), Value::Number(n)] => match n.as_i64() {
            Some(n) => (items, n),
            None => {
                return Err(FuncError::Generic(
                    "head: count must be an integer".to_owned(),
                ))
            }
        },
        [_, Value::Number(_)] => return Ok(Value::Array(Vec::new())),
        _ => {
            return Err(FuncError::Generic(
                "head requires a sequence and a count".to_owned(),
            ))
        }
    };

    let taken = if n < 0 {
        let skip = items.len().saturating_sub(-n as usize);
        items[skip..].to_vec()
    } else {
        let take = (n as usize).min(items.len());
        items[..take].to_vec()
    };
    Ok(Value::Array(taken))
}

/// True iff the value is a sequence.
pub fn is_array(args: &[Value]) -> Result<Value, FuncError> {
    match args {
        [value] => Ok(Value::from(matches!(value, Value::Array(_)))),
        _ => Err(FuncError::Generic(
            "isArray requires exactly 1 argument".to_owned(),
        )),
    }
}

/// Coerces a value to a sequence: sequences pass through, nil becomes the
/// empty sequence, and anything else becomes a singleton.
pub fn make_array(args: &[Value]) -> Result<Value, FuncError> {
    match args {
        [Value::Array(items)] => Ok(Value::Array(items.clone())),
        [Value::Nil] | [Value::NoValue] => Ok(Value::Array(Vec::new())),
        [value] => Ok(Value::Array(vec![value.clone()])),
        _ => Err(FuncError::Generic(
            "makeArray requires exactly 1 argument".to_owned(),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn numbers(values: &[i64]) -> Value {
        Value::Array(values.iter().map(|v| Value::from(*v)).collect())
    }

    fn author(key: &str, name: &str) -> Value {
        use std::collections::HashMap;
        let mut fields: HashMap<String, Value> = HashMap::new();
        fields.insert("key".to_owned(), Value::from(key));
        fields.insert("name".to_owned(), Value::from(name));
        Value::Object(fields)
    }

    fn post(path: &str, author: &str) -> Value {
        use std::collections::HashMap;
        let mut data: HashMap<String, Value> = HashMap::new();
        data.insert("author".to_owned(), Value::from(author));
        let mut fields: HashMap<String, Value> = HashMap::new();
        fields.insert("path".to_owned(), Value::from(path));
        fields.insert("data".to_owned(), Value::Object(data));
        Value::Object(fields)
    }

    #[test]
    fn test_readable_date() {
        assert_eq!(
            Value::from("01 Mar 2021"),
            readable_date(&[Value::from("2021-03-01")]).unwrap()
        );
    }

    #[test]
    fn test_readable_date_rfc3339() {
        assert_eq!(
            Value::from("25 Dec 2020"),
            readable_date(&[Value::from("2020-12-25T09:30:00+00:00")]).unwrap()
        );
    }

    #[test]
    fn test_readable_date_rejects_garbage() {
        assert!(readable_date(&[Value::from("yesterday")]).is_err());
    }

    #[test]
    fn test_get_author_hit() {
        let authors = Value::Array(vec![
            author("jane", "Jane Doe"),
            author("bob", "Bob Smith"),
        ]);
        let found = get_author(&[authors, Value::from("jane")]).unwrap();
        match found {
            Value::Object(fields) => {
                assert_eq!(Some(&Value::from("Jane Doe")), fields.get("name"))
            }
            other => panic!("wanted an author object, found {:?}", other),
        }
    }

    #[test]
    fn test_get_author_miss_is_nil() {
        let authors = Value::Array(vec![author("jane", "Jane Doe")]);
        assert_eq!(
            Value::Nil,
            get_author(&[authors, Value::from("nope")]).unwrap()
        );
    }

    #[test]
    fn test_get_posts_by_author_preserves_order() {
        let posts = Value::Array(vec![
            post("a.md", "jane"),
            post("b.md", "bob"),
            post("c.md", "jane"),
        ]);
        let found = get_posts_by_author(&[posts, Value::from("jane")]).unwrap();
        match found {
            Value::Array(items) => {
                assert_eq!(2, items.len());
                for (item, wanted) in items.iter().zip(&["a.md", "c.md"]) {
                    match item {
                        Value::Object(fields) => assert_eq!(
                            Some(&Value::from(*wanted)),
                            fields.get("path")
                        ),
                        other => panic!("wanted a post object, found {:?}", other),
                    }
                }
            }
            other => panic!("wanted an array, found {:?}", other),
        }
    }

    #[test]
    fn test_head_takes_prefix() {
        assert_eq!(
            numbers(&[1, 2]),
            head(&[numbers(&[1, 2, 3, 4, 5]), Value::from(2)]).unwrap()
        );
    }

    #[test]
    fn test_head_negative_takes_suffix() {
        assert_eq!(
            numbers(&[4, 5]),
            head(&[numbers(&[1, 2, 3, 4, 5]), Value::from(-2)]).unwrap()
        );
    }

    #[test]
    fn test_head_zero_is_empty() {
        assert_eq!(
            numbers(&[]),
            head(&[numbers(&[1, 2, 3, 4, 5]), Value::from(0)]).unwrap()
        );
    }

    #[test]
    fn test_head_overlong_counts_clamp() {
        assert_eq!(
            numbers(&[1, 2]),
            head(&[numbers(&[1, 2]), Value::from(7)]).unwrap()
        );
        assert_eq!(
            numbers(&[1, 2]),
            head(&[numbers(&[1, 2]), Value::from(-7)]).unwrap()
        );
    }

    #[test]
    fn test_head_non_sequence_is_empty() {
        assert_eq!(
            Value::Array(Vec::new()),
            head(&[Value::from("nope"), Value::from(2)]).unwrap()
        );
    }

    #[test]
    fn test_is_array() {
        assert_eq!(Value::from(true), is_array(&[numbers(&[1])]).unwrap());
        assert_eq!(Value::from(false), is_array(&[Value::from("no")]).unwrap());
    }

    #[test]
    fn test_make_array() {
        assert_eq!(
            numbers(&[1, 2]),
            make_array(&[numbers(&[1, 2])]).unwrap()
        );
        assert_eq!(
            Value::Array(vec![Value::from("solo")]),
            make_array(&[Value::from("solo")]).unwrap()
        );
        assert_eq!(Value::Array(Vec::new()), make_array(&[Value::Nil]).unwrap());
    }
}

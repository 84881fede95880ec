use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, iter::Peekable, str::Chars};

///
/// Value
///
/// Scalar payload vocabulary for leaf conditions. The set is closed on
/// purpose: every variant has a stable JSON form and a total position in
/// `natural_cmp`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Numeric reading of this value, when it has one.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Uint(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }

    /// Total, numeric-aware ordering used to normalize range endpoints.
    ///
    /// Numeric pairs compare numerically, across variants. Every other pair
    /// compares by natural string order over the display form, where digit
    /// runs compare as integers (`"9" < "10"`, `"a9" < "a10"`).
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(left), Some(right)) => left.total_cmp(&right),
            _ => natural_str_cmp(&self.to_string(), &other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Natural string comparison: digit runs compare as integers, everything
/// else character by character.
fn natural_str_cmp(left: &str, right: &str) -> Ordering {
    let mut left = left.chars().peekable();
    let mut right = right.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                if l.is_ascii_digit() && r.is_ascii_digit() {
                    let cmp = cmp_digit_runs(&take_digits(&mut left), &take_digits(&mut right));
                    if cmp != Ordering::Equal {
                        return cmp;
                    }
                } else {
                    let cmp = l.cmp(&r);
                    if cmp != Ordering::Equal {
                        return cmp;
                    }
                    left.next();
                    right.next();
                }
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }

    run
}

/// Compare two digit runs as unbounded integers: strip leading zeros, then
/// longer run wins, then lexicographic.
fn cmp_digit_runs(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');

    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(a: impl Into<Value>, b: impl Into<Value>) -> Ordering {
        a.into().natural_cmp(&b.into())
    }

    #[test]
    fn numeric_pairs_compare_numerically() {
        assert_eq!(cmp(5, 10), Ordering::Less);
        assert_eq!(cmp(10u64, 5), Ordering::Greater);
        assert_eq!(cmp(2.5, 3), Ordering::Less);
        assert_eq!(cmp(7, 7.0), Ordering::Equal);
    }

    #[test]
    fn digit_runs_in_text_compare_as_integers() {
        assert_eq!(cmp("9", "10"), Ordering::Less);
        assert_eq!(cmp("a9", "a10"), Ordering::Less);
        assert_eq!(cmp("a10", "a9"), Ordering::Greater);
        assert_eq!(cmp("file2", "file2"), Ordering::Equal);
    }

    #[test]
    fn leading_zeros_do_not_change_magnitude() {
        assert_eq!(cmp("007", "7"), Ordering::Equal);
        assert_eq!(cmp("008", "9"), Ordering::Less);
    }

    #[test]
    fn mixed_text_and_number_falls_back_to_natural_text() {
        // One side is non-numeric, so both render to text.
        assert_eq!(cmp("10", 9), Ordering::Greater);
        assert_eq!(cmp("apple", 5), Ordering::Greater);
    }

    #[test]
    fn serializes_to_bare_json_scalars() {
        assert_eq!(
            serde_json::to_value(Value::from("bob")).unwrap(),
            serde_json::json!("bob")
        );
        assert_eq!(
            serde_json::to_value(Value::from(42)).unwrap(),
            serde_json::json!(42)
        );
        assert_eq!(
            serde_json::to_value(Value::from(true)).unwrap(),
            serde_json::json!(true)
        );
    }
}

//! Field decoders for values the backend is inconsistent about.
//!
//! The PHP endpoints emit numbers as JSON numbers on some rows and as strings on others
//! (`"weight": 2.1` next to `"weight": "2.1"`), and booleans as `true`, `1` or `"1"`.
//! These helpers are used through `#[serde(deserialize_with = "...")]`.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

/// Text that may arrive as a number (`"visit_id": 7`).
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_text())
}

/// Optional text that may arrive as a number (`"week": 12`). Empty strings become `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value
        .map(Scalar::into_text)
        .filter(|s| !s.trim().is_empty()))
}

/// Optional number that may arrive as text (`"weight": "2.1"`). Empty strings become `None`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(i)) => Ok(Some(i as f64)),
        Some(Scalar::Float(f)) => Ok(Some(f)),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {s:?}"))),
        Some(Scalar::Bool(b)) => Err(serde::de::Error::custom(format!(
            "expected a number, got {b}"
        ))),
    }
}

/// Optional integer that may arrive as text (`"id": "3"`). Empty strings become `None`.
pub fn opt_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = match Option::<Scalar>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Scalar::Int(i)) => i,
        Some(Scalar::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got {s:?}")))?,
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected an integer, got {}",
                other.into_text()
            )));
        }
    };
    T::try_from(value)
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("integer {value} out of range")))
}

/// Integer that may arrive as text.
pub fn int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    opt_int(deserializer)?.ok_or_else(|| serde::de::Error::custom("missing integer"))
}

/// Number that may arrive as text.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_f64(deserializer)?.ok_or_else(|| serde::de::Error::custom("missing number"))
}

/// Boolean flag that may arrive as `true`, `1`, `"1"` or `"true"`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => Ok(b),
        Scalar::Int(i) => Ok(i != 0),
        Scalar::Float(f) => Ok(f != 0.0),
        Scalar::Text(s) => match s.trim() {
            "1" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "false" | "FALSE" | "False" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a flag, got {other:?}"
            ))),
        },
    }
}

/// Writes a flag the way the backend stores it: `0` or `1`.
pub fn flag_as_int<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::opt_f64")]
        weight: Option<f64>,
        #[serde(default, deserialize_with = "super::opt_text")]
        week: Option<String>,
        #[serde(default, deserialize_with = "super::flag")]
        done: bool,
    }

    #[test]
    fn test_numbers_as_text_or_numbers() {
        let a: Row = serde_json::from_str(r#"{"weight": 2.1, "week": 12, "done": 1}"#).unwrap();
        let b: Row = serde_json::from_str(r#"{"weight": "2.1", "week": "12", "done": "1"}"#).unwrap();
        assert_eq!(a.weight, Some(2.1));
        assert_eq!(b.weight, Some(2.1));
        assert_eq!(a.week.as_deref(), Some("12"));
        assert_eq!(b.week.as_deref(), Some("12"));
        assert!(a.done && b.done);
    }

    #[test]
    fn test_missing_and_blank_fields() {
        let row: Row = serde_json::from_str(r#"{"weight": "", "week": null}"#).unwrap();
        assert_eq!(row.weight, None);
        assert_eq!(row.week, None);
        assert!(!row.done);
    }

    #[derive(Deserialize)]
    struct Ids {
        #[serde(deserialize_with = "super::int")]
        id: i64,
        #[serde(default, deserialize_with = "super::opt_int")]
        percent: Option<u32>,
    }

    #[test]
    fn test_integers_as_text_or_numbers() {
        let a: Ids = serde_json::from_str(r#"{"id": 3, "percent": 40}"#).unwrap();
        let b: Ids = serde_json::from_str(r#"{"id": " 3", "percent": "40"}"#).unwrap();
        assert_eq!(a.id, 3);
        assert_eq!(b.id, 3);
        assert_eq!(b.percent, Some(40));

        let blank: Ids = serde_json::from_str(r#"{"id": "7", "percent": ""}"#).unwrap();
        assert_eq!(blank.percent, None);
    }

    #[test]
    fn test_bad_integers_are_errors() {
        assert!(serde_json::from_str::<Ids>(r#"{"id": "3a"}"#).is_err());
        assert!(serde_json::from_str::<Ids>(r#"{"id": 2.5}"#).is_err());
        assert!(serde_json::from_str::<Ids>(r#"{"id": 1, "percent": -4}"#).is_err());
    }

    #[test]
    fn test_garbage_number_is_an_error() {
        let row: Result<Row, _> = serde_json::from_str(r#"{"weight": "heavy"}"#);
        assert!(row.is_err());
    }
}

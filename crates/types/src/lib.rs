//! Validated primitive types shared across the MomCare crates.
//!
//! Every constructor here trims its input and rejects values the backend would
//! refuse, so that screens can validate a form before any network call is made.

use chrono::NaiveDate;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input was not a `YYYY-MM-DD` calendar date
    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
    /// The input was not a whole number
    #[error("not a number: {0}")]
    NotANumber(String),
    /// A gestational week outside `1..=max`
    #[error("week {value} is outside 1..={max}")]
    WeekOutOfRange { value: u32, max: u32 },
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Server-issued user identifier.
///
/// The backend hands this out at login; the client only ever echoes it back as
/// the `user_id` / `userId` request field and never invents one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(NonEmptyText);

impl UserId {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        NonEmptyText::new(input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(NonEmptyText(value.to_string()))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for UserId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A calendar date in the backend's `YYYY-MM-DD` text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Parses a `YYYY-MM-DD` string.
    ///
    /// The shape is checked strictly (four digit year, two digit month and day) before the
    /// calendar check, so `2025-8-1` is rejected even though chrono would accept it.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        let bytes = trimmed.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !shape_ok {
            return Err(TextError::InvalidDate(trimmed.to_owned()));
        }

        NaiveDate::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| TextError::InvalidDate(trimmed.to_owned()))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for IsoDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl std::str::FromStr for IsoDate {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Week of pregnancy, counted from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GestationalWeek(u32);

impl GestationalWeek {
    /// Length of a full-term pregnancy in weeks.
    pub const TERM: u32 = 40;
    /// Latest week the tracker accepts (post-term pregnancies).
    pub const MAX: u32 = 42;

    /// Creates a week in `1..=max`.
    pub fn new(value: u32, max: u32) -> Result<Self, TextError> {
        if value == 0 || value > max {
            return Err(TextError::WeekOutOfRange { value, max });
        }
        Ok(Self(value))
    }

    /// Parses user input such as `"12"` and checks it against `1..=max`.
    pub fn parse(input: impl AsRef<str>, max: u32) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        let value: u32 = trimmed
            .parse()
            .map_err(|_| TextError::NotANumber(trimmed.to_owned()))?;
        Self::new(value, max)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GestationalWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims() {
        let text = NonEmptyText::new("  BS. Lan  ").unwrap();
        assert_eq!(text.as_str(), "BS. Lan");
        assert_eq!(NonEmptyText::new("   "), Err(TextError::Empty));
    }

    #[test]
    fn test_non_empty_text_rejects_blank_json() {
        let parsed: Result<NonEmptyText, _> = serde_json::from_str("\"  \"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_user_id_from_login_number() {
        let id = UserId::from(42);
        assert_eq!(id.as_str(), "42");
        assert_eq!("42".parse::<UserId>().unwrap(), id);
    }

    #[test]
    fn test_iso_date_accepts_calendar_dates() {
        let date = IsoDate::parse("2025-08-01").unwrap();
        assert_eq!(date.to_string(), "2025-08-01");
    }

    #[test]
    fn test_iso_date_rejects_bad_shapes() {
        for input in ["2025-8-1", "01-08-2025", "2025/08/01", "2025-02-30", ""] {
            assert!(IsoDate::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_gestational_week_bounds() {
        assert_eq!(GestationalWeek::parse("12", GestationalWeek::MAX).unwrap().get(), 12);
        assert_eq!(
            GestationalWeek::parse("41", GestationalWeek::TERM),
            Err(TextError::WeekOutOfRange { value: 41, max: 40 })
        );
        assert_eq!(
            GestationalWeek::parse("0", GestationalWeek::MAX),
            Err(TextError::WeekOutOfRange { value: 0, max: 42 })
        );
        assert!(matches!(
            GestationalWeek::parse("abc", GestationalWeek::MAX),
            Err(TextError::NotANumber(_))
        ));
    }
}

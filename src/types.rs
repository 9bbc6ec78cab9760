//! Small value types of the built-in catalogue that have no direct Rust equivalent.

use crate::object::Object;
use chrono::{FixedOffset, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::{fmt, ops::Deref};

/// A calendar period in years, months and days.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Period {
    pub fn new(years: i32, months: i32, days: i32) -> Self {
        Period {
            years,
            months,
            days,
        }
    }
}

/// A time of day at a fixed UTC offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    pub time: NaiveTime,
    pub offset: FixedOffset,
}

impl OffsetTime {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self { OffsetTime { time, offset } }
}

/// A time-zone region or offset identifier, such as `Europe/Paris` or `+02:00`.
///
/// Identifiers are carried as text and never resolved against a zone database.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZoneId(pub String);

impl ZoneId {
    pub fn new<S: Into<String>>(id: S) -> Self { ZoneId(id.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

/// A local date-time in a named zone.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    pub local: NaiveDateTime,
    pub zone: ZoneId,
}

impl ZonedDateTime {
    pub fn new(local: NaiveDateTime, zone: ZoneId) -> Self { ZonedDateTime { local, zone } }
}

/// A compiled regular expression, compared by its source text.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles `src`.
    pub fn new(src: &str) -> Result<Self, regex::Error> { Regex::new(src).map(Pattern) }

    pub fn as_str(&self) -> &str { self.0.as_str() }
}

impl Deref for Pattern {
    type Target = Regex;

    fn deref(&self) -> &Regex { &self.0 }
}

impl From<Regex> for Pattern {
    fn from(r: Regex) -> Self { Pattern(r) }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Pattern) -> bool { self.as_str() == other.as_str() }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#\"{}\"", self.as_str()) }
}

/// Placeholder written in place of a value that has no registered encoder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Unsupported {
    /// Rust type name of the original value.
    pub class_name: String,
    /// Its `Debug` rendering.
    pub content: String,
}

impl Unsupported {
    pub fn new<C: Into<String>, S: Into<String>>(class_name: C, content: S) -> Self {
        Unsupported {
            class_name: class_name.into(),
            content: content.into(),
        }
    }

    /// The placeholder for `obj`.
    pub fn of(obj: &Object) -> Self { Unsupported::new(obj.type_name(), format!("{:?}", obj)) }
}

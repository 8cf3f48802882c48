//! `Weekday` and `WeekdaySet` — day-of-week enum and a small set of them.

use sla_core::errors::{Error, Result};

/// Day of the week.
///
/// Variants are numbered 1–7 (Monday = 1, Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// Construct from the ordinal (1 = Monday … 7 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            7 => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Return the ordinal (1 = Monday … 7 = Sunday).
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

/// A set of weekdays, stored as a 7-bit mask.
///
/// Used to configure which days of the week carry business hours.
/// Serializes as the bare bit mask (Monday = bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Monday through Friday.
    pub const MON_FRI: WeekdaySet = WeekdaySet(0b001_1111);

    /// Every day of the week.
    pub const ALL: WeekdaySet = WeekdaySet(0b111_1111);

    /// Build a set from a slice of weekdays.
    pub fn from_days(days: &[Weekday]) -> Self {
        days.iter().fold(Self::EMPTY, |set, &d| set.with(d))
    }

    /// Return `true` if `day` is in the set.
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Return the set with `day` added.
    pub const fn with(self, day: Weekday) -> Self {
        WeekdaySet(self.0 | Self::bit(day))
    }

    /// Return the set with `day` removed.
    pub const fn without(self, day: Weekday) -> Self {
        WeekdaySet(self.0 & !Self::bit(day))
    }

    /// Return `true` if the set contains no days.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of days in the set.
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the days in the set, Monday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        (1..=7)
            .filter_map(Weekday::from_ordinal)
            .filter(move |&d| self.contains(d))
    }

    const fn bit(day: Weekday) -> u8 {
        1 << (day.ordinal() - 1)
    }
}

impl Default for WeekdaySet {
    fn default() -> Self {
        Self::MON_FRI
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, WeekdaySet::with)
    }
}

// ── Bit-mask conversions ──────────────────────────────────────────────────────

impl TryFrom<u8> for WeekdaySet {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self> {
        if bits & !Self::ALL.0 != 0 {
            return Err(Error::Config(format!(
                "weekday mask {bits:#04x} sets bits beyond the seven days"
            )));
        }
        Ok(WeekdaySet(bits))
    }
}

impl From<WeekdaySet> for u8 {
    fn from(set: WeekdaySet) -> u8 {
        set.0
    }
}

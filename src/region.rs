use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

/// Local time layout, e.g. `Mon Nov 17 20:34:58`.
pub const DISPLAY_FORMAT: &str = "%a %b %-d %H:%M:%S";

/// A named region and the IANA timezone its clock follows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Region {
    pub name: String,
    pub location: Tz,
}

impl Region {
    pub fn new(name: impl Into<String>, location: Tz) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    pub fn local_time(&self, time: DateTime<Utc>) -> DateTime<Tz> {
        time.with_timezone(&self.location)
    }

    /// `"{name}: {local time}"`
    pub fn render(&self, time: DateTime<Utc>) -> String {
        format!("{}: {}", self.name, self.local_time(time).format(DISPLAY_FORMAT))
    }
}

pub fn default_regions() -> Vec<Region> {
    vec![
        Region::new("Hyderabad", Tz::Asia__Kolkata),
        Region::new("UTC", Tz::UTC),
        Region::new("Dublin", Tz::Europe__Dublin),
        Region::new("Eastern USA", Tz::America__New_York),
        Region::new("Central USA", Tz::America__Chicago),
        Region::new("Pacific USA", Tz::America__Los_Angeles),
    ]
}

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Africa::Nairobi;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
/// NairobiTZDateTime stores the time as `DateTime<UTC>` for easier serialization
/// and deserialization, and renders it in East Africa Time.
pub struct NairobiTZDateTime(DateTime<Utc>);

impl NairobiTZDateTime {
    pub fn to_date_time(&self) -> DateTime<Tz> {
        Nairobi.from_utc_datetime(&self.0.naive_utc())
    }
}

impl From<DateTime<Utc>> for NairobiTZDateTime {
    fn from(data: DateTime<Utc>) -> NairobiTZDateTime {
        NairobiTZDateTime(data)
    }
}

impl Display for NairobiTZDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_date_time().format("%a %d %b %Y, %H:%M EAT"))
    }
}

#[cfg(test)]
mod tests {
    use super::NairobiTZDateTime;
    use chrono::{TimeZone, Timelike, Utc};

    #[test]
    fn test_time_is_shifted_to_east_africa_time() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 1, 21, 30, 0).unwrap();
        let nairobi = NairobiTZDateTime::from(utc);
        assert_eq!(nairobi.to_date_time().hour(), 0);
        assert_eq!(nairobi.to_string(), "Sat 02 Mar 2024, 00:30 EAT");
    }
}

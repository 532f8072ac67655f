use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};

/// Clock abstracts access to the current timestamp so enforcement decisions
/// remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Hour of day in `0..=23`.
    fn hour(&self) -> u8 {
        self.now().hour() as u8
    }

    /// Weekday index with Monday = 0 and Sunday = 6.
    fn weekday(&self) -> u8 {
        self.now().weekday().num_days_from_monday() as u8
    }
}

/// Wall-clock implementation used by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for tests and replay runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to the given date at `hour:00:00` UTC.
    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .unwrap_or_else(|| Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap());
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

//! Date, time and date-time literals, all normalized to UTC.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::scanner::Parsed;
use super::Parser;
use crate::Value;

/// Wall-clock fields as written in the source.
struct Clock {
    hour: u32,
    minute: u32,
    second: u32,
    nanos: u32,
}

struct Calendar<'a> {
    year: &'a str,
    month: u32,
    day: u32,
}

impl<'a> Parser<'a> {
    /// Time, then date-time, then date; each must end on a word boundary.
    pub(crate) fn datetime_value(&mut self) -> Parsed<Value> {
        if let Some(value) = self.opt(|p| {
            let start = p.scan.pos();
            let clock = p.clock()?;
            p.word_boundary()?;
            let time = p.checked_time(&clock, start)?;
            let instant = NaiveDate::default().and_time(time).and_utc();
            Ok(Value::DateTime(instant))
        })? {
            return Ok(value);
        }
        if let Some(value) = self.opt(Self::date_time)? {
            return Ok(value);
        }
        self.attempt(|p| {
            let start = p.scan.pos();
            let calendar = p.calendar()?;
            p.word_boundary()?;
            let date = p.checked_date(&calendar, start)?;
            Ok(Value::DateTime(date.and_time(NaiveTime::MIN).and_utc()))
        })
    }

    fn date_time(&mut self) -> Parsed<Value> {
        let start = self.scan.pos();
        let calendar = self.calendar()?;
        if !(self.scan.eat_char('T') || self.scan.eat_char(' ')) {
            return self.scan.backtrack();
        }
        let clock = self.clock()?;
        let offset = self.offset()?;
        self.word_boundary()?;

        let date = self.checked_date(&calendar, start)?;
        let time = self.checked_time(&clock, start)?;
        let local = NaiveDateTime::new(date, time);
        let Some(zone) = FixedOffset::east_opt(offset) else {
            return self.scan.fatal_at(start, "Invalid date-time offset");
        };
        match zone.from_local_datetime(&local).single() {
            Some(instant) => Ok(Value::DateTime(instant.with_timezone(&Utc))),
            None => self.scan.fatal_at(start, "Invalid date-time"),
        }
    }

    /// `-?yyyy+-MM-dd`, lexically only.
    fn calendar(&mut self) -> Parsed<Calendar<'a>> {
        let start = self.scan.pos();
        self.scan.eat_char('-');
        let digits = self.scan.eat_while(|c| c.is_ascii_digit());
        let year = self.scan.slice(start);
        if digits.len() < 4 || !self.scan.eat_char('-') {
            return self.scan.backtrack();
        }
        let month = self.digit_pair('0'..='1')?;
        if !self.scan.eat_char('-') {
            return self.scan.backtrack();
        }
        let day = self.digit_pair('0'..='3')?;
        Ok(Calendar { year, month, day })
    }

    /// `hh:mm(:ss(.f{1,9})?)?`, lexically only.
    fn clock(&mut self) -> Parsed<Clock> {
        let hour = self.digit_pair('0'..='2')?;
        if !self.scan.eat_char(':') {
            return self.scan.backtrack();
        }
        let minute = self.digit_pair('0'..='5')?;
        let mut clock = Clock {
            hour,
            minute,
            second: 0,
            nanos: 0,
        };
        let before_seconds = self.scan.pos();
        if self.scan.eat_char(':') {
            match self.digit_pair('0'..='6') {
                Ok(second) => clock.second = second,
                Err(_) => {
                    self.scan.reset(before_seconds);
                    return Ok(clock);
                }
            }
            let before_fraction = self.scan.pos();
            if self.scan.eat_char('.') {
                let fraction: String = self
                    .scan
                    .rest()
                    .chars()
                    .take(9)
                    .take_while(char::is_ascii_digit)
                    .collect();
                if fraction.is_empty() {
                    self.scan.reset(before_fraction);
                } else {
                    self.scan.advance(fraction.len());
                    let padded = format!("{:0<9}", fraction);
                    clock.nanos = padded.parse().unwrap_or(0);
                }
            }
        }
        Ok(clock)
    }

    /// `Z`, `±hh:mm` or nothing; returns seconds east of UTC.
    fn offset(&mut self) -> Parsed<i32> {
        if self.scan.eat_char('Z') {
            return Ok(0);
        }
        let sign = match self.scan.peek() {
            Some('+') => 1,
            Some('-') => -1,
            _ => return Ok(0),
        };
        let start = self.scan.pos();
        self.scan.bump();
        let parsed = self.digit_pair('0'..='9').and_then(|hours| {
            if !self.scan.eat_char(':') {
                return self.scan.backtrack();
            }
            let minutes = self.digit_pair('0'..='5')?;
            Ok(hours * 3600 + minutes * 60)
        });
        match parsed {
            Ok(seconds) => Ok(sign * seconds as i32),
            Err(_) => {
                self.scan.reset(start);
                Ok(0)
            }
        }
    }

    /// Two ASCII digits, the first within `first`.
    fn digit_pair(&mut self, first: std::ops::RangeInclusive<char>) -> Parsed<u32> {
        let mut chars = self.scan.rest().chars();
        match (chars.next(), chars.next()) {
            (Some(tens), Some(ones)) if first.contains(&tens) && ones.is_ascii_digit() => {
                self.scan.advance(2);
                Ok((tens as u32 - '0' as u32) * 10 + (ones as u32 - '0' as u32))
            }
            _ => self.scan.backtrack(),
        }
    }

    /// Years outside `0..=9999` are rejected, as are impossible calendar days.
    fn checked_date(&self, calendar: &Calendar<'_>, start: usize) -> Parsed<NaiveDate> {
        let year = match calendar.year.parse::<i32>() {
            Ok(year) if (0..10000).contains(&year) && !calendar.year.starts_with('-') => year,
            _ => {
                return self.scan.fatal_at(
                    start,
                    format!(
                        "Invalid date: year {} is out of range 0000..9999",
                        calendar.year
                    ),
                )
            }
        };
        match NaiveDate::from_ymd_opt(year, calendar.month, calendar.day) {
            Some(date) => Ok(date),
            None => self.scan.fatal_at(
                start,
                format!(
                    "Invalid date: {}-{:02}-{:02}",
                    calendar.year, calendar.month, calendar.day
                ),
            ),
        }
    }

    fn checked_time(&self, clock: &Clock, start: usize) -> Parsed<NaiveTime> {
        match NaiveTime::from_hms_nano_opt(clock.hour, clock.minute, clock.second, clock.nanos) {
            Some(time) => Ok(time),
            None => self.scan.fatal_at(
                start,
                format!(
                    "Invalid time: {:02}:{:02}:{:02}",
                    clock.hour, clock.minute, clock.second
                ),
            ),
        }
    }
}

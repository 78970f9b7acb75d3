// src/hours/parse.rs
//! Time-range text → [`ParseOutcome`].
//!
//! Accepted tokens: `7:00 AM`, `7:00am`, `7am`, `7 p.m.`, `19:00`, `noon`,
//! `midnight`, and `24:00` as an end. Ranges are split on `-`, `–`, `—` or
//! the word `to`. One side carrying a meridiem lends it to a bare other side
//! (`7:00 - 10:00 PM` is 19:00–22:00). An end at or before the start rolls
//! over to the next day.

use super::types::{MINUTES_PER_DAY, ParseOutcome, ParsedRange};

const DASHES: [char; 4] = ['-', '–', '—', '‒'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Meridiem { Am, Pm }

impl Meridiem {
    fn flip(self) -> Self {
        match self { Meridiem::Am => Meridiem::Pm, Meridiem::Pm => Meridiem::Am }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Clock {
    hour: u16,
    minute: u16,
    meridiem: Option<Meridiem>,
    /// Written without minutes (`7`, `7pm`).
    bare_hour: bool,
}

impl Clock {
    fn minutes(&self) -> u16 {
        match self.meridiem {
            Some(Meridiem::Am) => (self.hour % 12) * 60 + self.minute,
            Some(Meridiem::Pm) => (self.hour % 12 + 12) * 60 + self.minute,
            None => self.hour * 60 + self.minute,
        }
    }

    fn with_meridiem(self, m: Meridiem) -> Option<Clock> {
        if self.meridiem.is_none() && (1..=12).contains(&self.hour) {
            Some(Clock { meridiem: Some(m), ..self })
        } else {
            None
        }
    }

    /// A bare hour with no meridiem (`"7"`) is ambiguous.
    fn is_resolved(&self) -> bool {
        !(self.bare_hour && self.meridiem.is_none())
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit())
}

fn lex_time(token: &str) -> Option<Clock> {
    let lowered = token.trim().to_ascii_lowercase().replace('.', "");
    let t = lowered.trim();

    match t {
        "noon" => return Some(Clock { hour: 12, minute: 0, meridiem: Some(Meridiem::Pm), bare_hour: false }),
        "midnight" => return Some(Clock { hour: 12, minute: 0, meridiem: Some(Meridiem::Am), bare_hour: false }),
        _ => {}
    }

    let (body, meridiem) = if let Some(b) = t.strip_suffix("am") {
        (b, Some(Meridiem::Am))
    } else if let Some(b) = t.strip_suffix("pm") {
        (b, Some(Meridiem::Pm))
    } else if let Some(b) = t.strip_suffix('a') {
        (b, Some(Meridiem::Am))
    } else if let Some(b) = t.strip_suffix('p') {
        (b, Some(Meridiem::Pm))
    } else {
        (t, None)
    };
    let body = body.trim_end();

    let (h, m) = match body.split_once(':') {
        Some((h, m)) => (h.trim(), Some(m.trim())),
        None => (body, None),
    };
    if !all_digits(h) || h.len() > 2 {
        return None;
    }
    let hour: u16 = h.parse().ok()?;
    let minute: u16 = match m {
        Some(m) if all_digits(m) && m.len() == 2 => m.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };

    if minute >= 60 {
        return None;
    }
    match meridiem {
        Some(_) if !(1..=12).contains(&hour) => return None,
        None if hour > 24 || (hour == 24 && minute != 0) => return None,
        _ => {}
    }

    Some(Clock { hour, minute, meridiem, bare_hour: m.is_none() })
}

/// Lend a meridiem from one side to the other when that keeps the range ordered.
fn resolve_meridiems(start: Clock, end: Clock) -> (Clock, Clock) {
    match (start.meridiem, end.meridiem) {
        (None, Some(m)) => {
            for cand in [m, m.flip()] {
                if let Some(c) = start.with_meridiem(cand) {
                    if c.minutes() < end.minutes() {
                        return (c, end);
                    }
                }
            }
            // `10:00 - 2:00 AM`: evening into the small hours. An end of exactly
            // midnight stays ambiguous and keeps the start as written.
            if m == Meridiem::Am && end.minutes() > 0 {
                if let Some(c) = start.with_meridiem(Meridiem::Pm) {
                    return (c, end);
                }
            }
            (start, end)
        }
        (Some(m), None) => {
            for cand in [m, m.flip()] {
                if let Some(c) = end.with_meridiem(cand) {
                    if c.minutes() > start.minutes() {
                        return (start, c);
                    }
                }
            }
            (start, end)
        }
        _ => (start, end),
    }
}

/// Split `"<start> <sep> <end>"` on the first dash or the word `to`, both sides trimmed.
pub fn split_range(text: &str) -> Option<(&str, &str)> {
    let dash = text
        .char_indices()
        .find(|(_, c)| DASHES.contains(c))
        .map(|(i, c)| (i, c.len_utf8()));
    let word = text
        .to_ascii_lowercase()
        .find(" to ")
        .map(|i| (i, " to ".len()));

    let (at, len) = match (dash, word) {
        (Some(d), Some(w)) => if d.0 <= w.0 { d } else { w },
        (Some(d), None) => d,
        (None, Some(w)) => w,
        (None, None) => return None,
    };
    Some((text[..at].trim(), text[at + len..].trim()))
}

/// One clock time → minutes since midnight. `"24:00"` yields 1440.
pub fn parse_time(token: &str) -> Option<u16> {
    let clock = lex_time(token)?;
    clock.is_resolved().then(|| clock.minutes())
}

/// Parse a time-range string.
pub fn parse(text: &str) -> ParseOutcome {
    let t = text.trim();
    if t.is_empty() || t.eq_ignore_ascii_case("closed") {
        return ParseOutcome::Closed;
    }

    let Some((a, b)) = split_range(t) else {
        return ParseOutcome::Failure;
    };
    let (Some(start), Some(end)) = (lex_time(a), lex_time(b)) else {
        return ParseOutcome::Failure;
    };

    let (start, end) = resolve_meridiems(start, end);
    if !start.is_resolved() || !end.is_resolved() {
        return ParseOutcome::Failure;
    }

    let start = start.minutes();
    if start >= MINUTES_PER_DAY {
        return ParseOutcome::Failure;
    }
    let end = end.minutes() % MINUTES_PER_DAY;

    ParseOutcome::Range(ParsedRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(text: &str) -> ParsedRange {
        match parse(text) {
            ParseOutcome::Range(r) => r,
            other => panic!("{text:?} parsed as {other:?}"),
        }
    }

    #[test]
    fn twelve_hour_ranges() {
        let r = range("7:00 AM - 10:00 AM");
        assert_eq!((r.start, r.end, r.overnight), (hm!(7, 0), hm!(10, 0), false));

        let r = range("10:00am-2:00pm");
        assert_eq!((r.start, r.end), (hm!(10, 0), hm!(14, 0)));

        let r = range("7am to 3pm");
        assert_eq!((r.start, r.end), (hm!(7, 0), hm!(15, 0)));

        let r = range("12:00 p.m. – 1:30 p.m.");
        assert_eq!((r.start, r.end), (hm!(12, 0), hm!(13, 30)));
    }

    #[test]
    fn twenty_four_hour_ranges() {
        let r = range("10:00-16:00");
        assert_eq!((r.start, r.end, r.overnight), (hm!(10, 0), hm!(16, 0), false));

        let r = range("08:30 — 23:45");
        assert_eq!((r.start, r.end), (hm!(8, 30), hm!(23, 45)));
    }

    #[test]
    fn closed_and_empty() {
        assert_eq!(parse("Closed"), ParseOutcome::Closed);
        assert_eq!(parse("  CLOSED "), ParseOutcome::Closed);
        assert_eq!(parse(""), ParseOutcome::Closed);
        assert_eq!(parse("   "), ParseOutcome::Closed);
    }

    #[test]
    fn overnight_rule() {
        let r = range("10:00 PM - 2:00 AM");
        assert_eq!((r.start, r.end, r.overnight), (hm!(22, 0), hm!(2, 0), true));
        assert_eq!(r.end_day_offset(), 1);

        let r = range("11:00 PM - 12:00 AM");
        assert_eq!((r.start, r.end, r.overnight), (hm!(23, 0), 0, true));

        let r = range("18:00-24:00");
        assert_eq!((r.start, r.end, r.overnight), (hm!(18, 0), 0, true));

        let r = range("noon - midnight");
        assert_eq!((r.start, r.end, r.overnight), (hm!(12, 0), 0, true));
    }

    #[test]
    fn start_equal_to_end_is_a_full_day() {
        let r = range("9:00 AM - 9:00 AM");
        assert!(r.overnight);
        let (start, end) = r.anchor(chrono::NaiveDate::from_ymd_opt(2025, 9, 23).unwrap());
        assert_eq!(end - start, chrono::TimeDelta::hours(24));
    }

    #[test]
    fn meridiem_is_lent_across_the_range() {
        let r = range("7:00 - 10:00 PM");
        assert_eq!((r.start, r.end), (hm!(19, 0), hm!(22, 0)));

        let r = range("11:00 - 2:00 PM");
        assert_eq!((r.start, r.end), (hm!(11, 0), hm!(14, 0)));

        let r = range("10 AM - 4");
        assert_eq!((r.start, r.end), (hm!(10, 0), hm!(16, 0)));

        let r = range("9-5pm");
        assert_eq!((r.start, r.end), (hm!(9, 0), hm!(17, 0)));

        let r = range("10:00 - 2:00 AM");
        assert_eq!((r.start, r.end, r.overnight), (hm!(22, 0), hm!(2, 0), true));

        let r = range("11 - 1am");
        assert_eq!((r.start, r.end, r.overnight), (hm!(23, 0), hm!(1, 0), true));

        let r = range("7:30 - 12am");
        assert_eq!((r.start, r.end, r.overnight), (hm!(7, 30), 0, true));
    }

    #[test]
    fn one_sided_or_garbage_is_a_failure() {
        assert_eq!(parse("7:00 AM - sometime"), ParseOutcome::Failure);
        assert_eq!(parse("7:00 AM"), ParseOutcome::Failure);
        assert_eq!(parse("-"), ParseOutcome::Failure);
        assert_eq!(parse("25:00 - 26:00"), ParseOutcome::Failure);
        assert_eq!(parse("7:60 AM - 9:00 AM"), ParseOutcome::Failure);
        assert_eq!(parse("13:00 PM - 2:00 PM"), ParseOutcome::Failure);
        assert_eq!(parse("9 - 5"), ParseOutcome::Failure);
        assert_eq!(parse("24:00 - 2:00"), ParseOutcome::Failure);
        assert_eq!(parse("See website"), ParseOutcome::Failure);
    }

    #[test]
    fn single_tokens() {
        assert_eq!(parse_time("7:00 AM"), Some(hm!(7, 0)));
        assert_eq!(parse_time("7:00am"), Some(hm!(7, 0)));
        assert_eq!(parse_time("12:00 AM"), Some(0));
        assert_eq!(parse_time("12:30 PM"), Some(hm!(12, 30)));
        assert_eq!(parse_time("19:05"), Some(hm!(19, 5)));
        assert_eq!(parse_time("24:00"), Some(1440));
        assert_eq!(parse_time("7"), None);
        assert_eq!(parse_time("7:5"), None);
    }

    #[test]
    fn split_prefers_first_separator() {
        assert_eq!(split_range("7am to 3pm"), Some(("7am", "3pm")));
        assert_eq!(split_range("7am–3pm"), Some(("7am", "3pm")));
        assert_eq!(split_range("Closed"), None);
    }
}

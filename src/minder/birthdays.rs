//! Upcoming-birthday calculation.
//!
//! Works on a caller-supplied `today` so the logic is a pure function of its
//! inputs. The birthday itself never moves; only the *notification* date is
//! shifted off weekends, and the shifted date decides window membership.

use crate::model::Contact;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Longest window that can matter: occurrences resolve at most one year out.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Contacts whose (weekend-shifted) notification date falls within
/// `[today, today + window_days]` inclusive, sorted by notification date;
/// ties keep input order.
///
/// Feb 29 birthdays are skipped in years where the occurrence does not
/// exist.
pub fn upcoming_birthdays<'a, I>(
    contacts: I,
    today: NaiveDate,
    window_days: u32,
) -> Vec<(&'a Contact, NaiveDate)>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let window_end = today + Duration::days(i64::from(window_days));
    let mut upcoming = Vec::new();

    for contact in contacts {
        let birthday = match contact.birthday {
            Some(b) => b.date(),
            None => continue,
        };
        let occurrence = match next_occurrence(birthday, today) {
            Some(d) => d,
            None => continue,
        };
        let notification = shift_off_weekend(occurrence);
        if notification <= window_end {
            upcoming.push((contact, notification));
        }
    }

    // stable sort keeps ties in insertion order
    upcoming.sort_by_key(|(_, date)| *date);
    upcoming
}

/// This year's occurrence of (month, day), or next year's if it already
/// passed. Forward-looking only: a December birthday checked in January
/// resolves to the coming December, not the one just behind us.
fn next_occurrence(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(today.year(), birthday.month(), birthday.day())?;
    if this_year < today {
        NaiveDate::from_ymd_opt(today.year() + 1, birthday.month(), birthday.day())
    } else {
        Some(this_year)
    }
}

fn shift_off_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

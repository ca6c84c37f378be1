use crate::errors::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scheduling period of the tournament, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentWeek {
    pub number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub target: u32,
}

impl TournamentWeek {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub name: String,
    pub weeks: Vec<TournamentWeek>,
}

impl Default for Tournament {
    fn default() -> Self {
        let week = |number, start: (u32, u32), end: (u32, u32)| TournamentWeek {
            number,
            start: ymd(2025, start.0, start.1),
            end: ymd(2025, end.0, end.1),
            target: 10,
        };
        Self {
            name: "1st Open RNK PBS".to_string(),
            weeks: vec![
                week(1, (2, 3), (2, 9)),
                week(2, (2, 10), (2, 16)),
                week(3, (2, 17), (2, 23)),
                week(4, (2, 24), (3, 2)),
                // the closing week is a fortnight
                week(5, (3, 3), (3, 16)),
            ],
        }
    }
}

impl Tournament {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::InvalidCalendar(msg));

        if self.weeks.is_empty() {
            return invalid("no weeks configured".into());
        }
        for (idx, week) in self.weeks.iter().enumerate() {
            let expected = idx as u32 + 1;
            if week.number != expected {
                return invalid(format!("week {} found where week {expected} was expected", week.number));
            }
            if week.start > week.end {
                return invalid(format!("week {} ends before it starts", week.number));
            }
        }
        for pair in self.weeks.windows(2) {
            if pair[1].start <= pair[0].end {
                return invalid(format!("week {} overlaps week {}", pair[1].number, pair[0].number));
            }
        }
        Ok(())
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.weeks.first().map(|week| week.start)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.weeks.last().map(|week| week.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        matches!((self.first_day(), self.last_day()), (Some(first), Some(last)) if first <= date && date <= last)
    }

    /// The week `today` falls in; `None` before the start or after the end.
    pub fn current_week(&self, today: NaiveDate) -> Option<&TournamentWeek> {
        self.weeks.iter().find(|week| week.contains(today))
    }

    pub fn total_target(&self) -> u32 {
        self.weeks.iter().map(|week| week.target).sum()
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("built-in calendar holds valid dates")
}

use crate::tournament::{Tournament, TournamentWeek};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStatus {
    Surplus,
    Deficit,
    Met,
}

impl WeekStatus {
    pub fn from_saldo(saldo: i64) -> Self {
        match saldo.signum() {
            1 => WeekStatus::Surplus,
            -1 => WeekStatus::Deficit,
            _ => WeekStatus::Met,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRow {
    pub number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub target: u32,
    pub actual: u32,
    pub cum_target: u32,
    pub cum_actual: u32,
    pub saldo: i64,
    pub status: WeekStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub weeks: Vec<WeekRow>,
    pub total_actual: u32,
    pub total_target: u32,
    pub percent: f64,
    pub remaining: u32,
    pub current_week: Option<u32>,
}

pub fn build_report(tournament: &Tournament, match_dates: impl IntoIterator<Item = NaiveDate>) -> WeeklyReport {
    build_report_at(Local::now().date_naive(), tournament, match_dates)
}

pub fn build_report_at(
    today: NaiveDate,
    tournament: &Tournament,
    match_dates: impl IntoIterator<Item = NaiveDate>,
) -> WeeklyReport {
    let mut report = compute(match_dates, &tournament.weeks);
    report.current_week = tournament.current_week(today).map(|week| week.number);
    report
}

/// Counts scheduled matches per week and compares them with the weekly targets.
///
/// `cum_target` assumes a uniform weekly target (`target * number`), while the
/// overall target is the sum of every week's target.
pub fn compute(match_dates: impl IntoIterator<Item = NaiveDate>, weeks: &[TournamentWeek]) -> WeeklyReport {
    let mut actual = vec![0u32; weeks.len()];
    for date in match_dates {
        for (idx, week) in weeks.iter().enumerate() {
            if week.contains(date) {
                actual[idx] = actual[idx].saturating_add(1);
            }
        }
    }

    let mut rows = Vec::with_capacity(weeks.len());
    let mut cum_actual = 0u32;
    for (week, actual) in weeks.iter().zip(actual) {
        cum_actual = cum_actual.saturating_add(actual);
        let saldo = i64::from(actual) - i64::from(week.target);
        rows.push(WeekRow {
            number: week.number,
            start: week.start,
            end: week.end,
            target: week.target,
            actual,
            cum_target: week.target.saturating_mul(week.number),
            cum_actual,
            saldo,
            status: WeekStatus::from_saldo(saldo),
        });
    }

    let total_actual = cum_actual;
    let total_target: u32 = weeks.iter().map(|week| week.target).sum();
    let percent = if total_target == 0 {
        0.0
    } else {
        f64::from(total_actual) / f64::from(total_target) * 100.0
    };

    WeeklyReport {
        weeks: rows,
        total_actual,
        total_target,
        percent,
        remaining: total_target.saturating_sub(total_actual),
        current_week: None,
    }
}

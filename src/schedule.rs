use crate::errors::ScheduleError;
use crate::models::{truncate_to_minute, Class, FilterParams, Group, MatchRecord, NewResult, ResultRecord};
use crate::tournament::Tournament;
use chrono::NaiveDate;

const MAX_SETS: u8 = 3;
const MAX_GAMES: u32 = 50;

/// Normalises a submitted match and rejects it with a user-facing reason when invalid.
pub fn validate_match(mut candidate: MatchRecord, tournament: &Tournament) -> Result<MatchRecord, ScheduleError> {
    candidate.player1 = candidate.player1.trim().to_string();
    candidate.player2 = candidate.player2.trim().to_string();
    candidate.time = truncate_to_minute(candidate.time);

    if candidate.player1.is_empty() || candidate.player2.is_empty() {
        return Err(ScheduleError::MissingPlayer);
    }
    if candidate.player1.to_lowercase() == candidate.player2.to_lowercase() {
        return Err(ScheduleError::SamePlayer(candidate.player1));
    }

    let max = candidate.class.group_count();
    if candidate.group == 0 || candidate.group > max {
        return Err(ScheduleError::GroupOutOfRange {
            class: candidate.class,
            group: candidate.group,
            max,
        });
    }

    if let (Some(first), Some(last)) = (tournament.first_day(), tournament.last_day()) {
        if !tournament.contains(candidate.date) {
            return Err(ScheduleError::DateOutsideTournament {
                date: candidate.date,
                first,
                last,
            });
        }
    }

    Ok(candidate)
}

pub fn validate_result(submission: NewResult, tournament: &Tournament) -> Result<ResultRecord, ScheduleError> {
    let fixture = validate_match(submission.fixture, tournament)?;
    let score = submission.score;
    for sets in [score.sets1, score.sets2] {
        if sets > MAX_SETS {
            return Err(ScheduleError::TooManySets(sets));
        }
    }
    for games in [score.games1, score.games2] {
        if games > MAX_GAMES {
            return Err(ScheduleError::TooManyGames(games));
        }
    }
    // a tiebreak decides a set, so there cannot be more of them than sets
    for tiebreaks in [score.tiebreaks1, score.tiebreaks2] {
        if tiebreaks > u32::from(MAX_SETS) {
            return Err(ScheduleError::TooManyTiebreaks(tiebreaks));
        }
    }

    Ok(ResultRecord {
        fixture,
        winner: score.winner(),
        score,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    /// Case-insensitive fragment of either player's name.
    pub player: Option<String>,
    pub date: Option<NaiveDate>,
    pub class: Option<Class>,
    /// Only applied together with `class`.
    pub group: Option<u8>,
}

impl TryFrom<FilterParams> for MatchFilter {
    type Error = ScheduleError;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        let date = non_empty(params.date)
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| ScheduleError::InvalidField { field: "date", value: raw })
            })
            .transpose()?;
        let class = non_empty(params.class)
            .map(|raw| raw.parse::<Class>().map_err(|_| ScheduleError::InvalidField { field: "class", value: raw }))
            .transpose()?;
        let group = non_empty(params.group)
            .map(|raw| raw.parse::<u8>().map_err(|_| ScheduleError::InvalidField { field: "group", value: raw }))
            .transpose()?;

        Ok(Self {
            player: non_empty(params.player),
            date,
            class,
            group,
        })
    }
}

impl MatchFilter {
    pub fn matches(&self, record: &MatchRecord) -> bool {
        if let Some(needle) = &self.player {
            let needle = needle.to_lowercase();
            if !record.player1.to_lowercase().contains(&needle) && !record.player2.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if self.date.is_some_and(|date| date != record.date) {
            return false;
        }
        match self.class {
            Some(class) if class != record.class => false,
            Some(_) => self.group.is_none_or(|group| group == record.group),
            None => true,
        }
    }

    /// The bracket selected by the filter, if both class and group are set.
    pub fn group(&self) -> Option<Group> {
        Some(Group {
            class: self.class?,
            number: self.group?,
        })
    }
}

/// Matching records in calendar order.
pub fn filter_matches(records: &[MatchRecord], filter: &MatchFilter) -> Vec<MatchRecord> {
    let mut selected: Vec<MatchRecord> = records.iter().filter(|r| filter.matches(r)).cloned().collect();
    selected.sort_by_key(|r| (r.date, r.time));
    selected
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Score;
    use chrono::NaiveTime;

    fn record(day: u32, hour: u32, class: Class, group: u8, p1: &str, p2: &str) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            class,
            group,
            player1: p1.into(),
            player2: p2.into(),
        }
    }

    #[test]
    fn valid_match_is_trimmed() {
        let tournament = Tournament::default();
        let accepted = validate_match(record(4, 9, Class::B, 4, "  Ana ", "Bia"), &tournament).unwrap();
        assert_eq!(accepted.player1, "Ana");
    }

    #[test]
    fn rejects_same_player_in_any_case() {
        let tournament = Tournament::default();
        let err = validate_match(record(4, 9, Class::B, 1, "Ana", "ana "), &tournament).unwrap_err();
        assert_eq!(err, ScheduleError::SamePlayer("Ana".into()));
    }

    #[test]
    fn rejects_missing_player() {
        let tournament = Tournament::default();
        let err = validate_match(record(4, 9, Class::B, 1, "Ana", "   "), &tournament).unwrap_err();
        assert_eq!(err, ScheduleError::MissingPlayer);
    }

    #[test]
    fn group_range_depends_on_class() {
        let tournament = Tournament::default();
        assert!(validate_match(record(4, 9, Class::C, 4, "Ana", "Bia"), &tournament).is_ok());
        let err = validate_match(record(4, 9, Class::D, 3, "Ana", "Bia"), &tournament).unwrap_err();
        assert!(matches!(err, ScheduleError::GroupOutOfRange { max: 2, .. }));
        assert!(validate_match(record(4, 9, Class::B, 0, "Ana", "Bia"), &tournament).is_err());
    }

    #[test]
    fn rejects_dates_outside_the_calendar() {
        let tournament = Tournament::default();
        let err = validate_match(record(1, 9, Class::B, 1, "Ana", "Bia"), &tournament).unwrap_err();
        assert!(matches!(err, ScheduleError::DateOutsideTournament { .. }));
    }

    #[test]
    fn result_derives_winner_and_caps_sets() {
        let tournament = Tournament::default();
        let fixture = record(4, 9, Class::B, 1, "Ana", "Bia");
        let score = Score { sets1: 1, sets2: 2, games1: 10, games2: 13, ..Score::default() };
        let result = validate_result(NewResult { fixture: fixture.clone(), score }, &tournament).unwrap();
        assert_eq!(result.winner, crate::models::Winner::Player2);

        let too_many = Score { sets1: 4, ..score };
        let err = validate_result(NewResult { fixture, score: too_many }, &tournament).unwrap_err();
        assert_eq!(err, ScheduleError::TooManySets(4));
    }

    #[test]
    fn result_caps_games_and_tiebreaks() {
        let tournament = Tournament::default();
        let fixture = record(4, 9, Class::B, 1, "Ana", "Bia");
        let huge = Score { sets1: 2, games1: u32::MAX, ..Score::default() };
        let err = validate_result(NewResult { fixture: fixture.clone(), score: huge }, &tournament).unwrap_err();
        assert_eq!(err, ScheduleError::TooManyGames(u32::MAX));

        let tiebreaks = Score { sets1: 2, games1: 14, games2: 12, tiebreaks1: 4, ..Score::default() };
        let err = validate_result(NewResult { fixture: fixture.clone(), score: tiebreaks }, &tournament).unwrap_err();
        assert_eq!(err, ScheduleError::TooManyTiebreaks(4));

        let long_match = Score { sets1: 2, sets2: 1, games1: 50, games2: 48, tiebreaks1: 3, tiebreaks2: 0 };
        assert!(validate_result(NewResult { fixture, score: long_match }, &tournament).is_ok());
    }

    #[test]
    fn match_time_is_kept_to_the_minute() {
        let tournament = Tournament::default();
        let mut candidate = record(4, 9, Class::B, 1, "Ana", "Bia");
        candidate.time = NaiveTime::from_hms_opt(9, 15, 42).unwrap();
        let accepted = validate_match(candidate, &tournament).unwrap();
        assert_eq!(accepted.time, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    }

    #[test]
    fn filter_by_player_fragment_and_sorts_by_date() {
        let records = vec![
            record(10, 9, Class::B, 1, "Ana", "Bia"),
            record(4, 18, Class::C, 2, "Caio", "Mariana"),
            record(4, 8, Class::D, 1, "Duda", "Eva"),
        ];
        let filter = MatchFilter { player: Some("ANA".into()), ..MatchFilter::default() };
        let found = filter_matches(&records, &filter);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].player1, "Caio");
        assert_eq!(found[1].player1, "Ana");

        let all = filter_matches(&records, &MatchFilter::default());
        let order: Vec<_> = all.iter().map(|r| r.player1.as_str()).collect();
        assert_eq!(order, ["Duda", "Caio", "Ana"]);
    }

    #[test]
    fn group_filter_needs_a_class() {
        let records = vec![
            record(4, 9, Class::B, 1, "Ana", "Bia"),
            record(4, 9, Class::C, 2, "Caio", "Duda"),
        ];
        let only_group = MatchFilter { group: Some(1), ..MatchFilter::default() };
        assert_eq!(filter_matches(&records, &only_group).len(), 2);
        assert_eq!(only_group.group(), None);

        let class_and_group = MatchFilter { class: Some(Class::C), group: Some(2), ..MatchFilter::default() };
        let found = filter_matches(&records, &class_and_group);
        assert_eq!(found.len(), 1);
        assert_eq!(class_and_group.group(), Some(Group { class: Class::C, number: 2 }));
    }

    #[test]
    fn filter_params_treat_blanks_as_any() {
        let params = FilterParams {
            player: Some("".into()),
            date: Some(" ".into()),
            class: Some("b".into()),
            group: Some("".into()),
        };
        let filter = MatchFilter::try_from(params).unwrap();
        assert_eq!(filter, MatchFilter { class: Some(Class::B), ..MatchFilter::default() });

        let bad = FilterParams { date: Some("04/02/2025".into()), ..FilterParams::default() };
        assert!(matches!(MatchFilter::try_from(bad), Err(ScheduleError::InvalidField { field: "date", .. })));
    }
}

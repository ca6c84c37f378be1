use crate::models::{Group, ResultRecord, Winner};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player: String,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Results with equal sets; they count as played but neither won nor lost.
    pub ties: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub tiebreaks_won: u32,
    pub tiebreaks_lost: u32,
    pub set_diff: i64,
    pub game_diff: i64,
    pub tiebreak_diff: i64,
}

impl PlayerStanding {
    fn new(player: &str) -> Self {
        Self {
            player: player.to_string(),
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: Outcome, sets: (u8, u8), games: (u32, u32), tiebreaks: (u32, u32)) {
        // records loaded from disk skip validation, so totals saturate
        self.played = self.played.saturating_add(1);
        let tally = match outcome {
            Outcome::Win => &mut self.wins,
            Outcome::Loss => &mut self.losses,
            Outcome::Tie => &mut self.ties,
        };
        *tally = tally.saturating_add(1);
        self.sets_won = self.sets_won.saturating_add(u32::from(sets.0));
        self.sets_lost = self.sets_lost.saturating_add(u32::from(sets.1));
        self.games_won = self.games_won.saturating_add(games.0);
        self.games_lost = self.games_lost.saturating_add(games.1);
        self.tiebreaks_won = self.tiebreaks_won.saturating_add(tiebreaks.0);
        self.tiebreaks_lost = self.tiebreaks_lost.saturating_add(tiebreaks.1);
    }

    fn finish(&mut self) {
        self.set_diff = i64::from(self.sets_won) - i64::from(self.sets_lost);
        self.game_diff = i64::from(self.games_won) - i64::from(self.games_lost);
        self.tiebreak_diff = i64::from(self.tiebreaks_won) - i64::from(self.tiebreaks_lost);
    }

    fn rank_key(&self) -> (u32, i64, i64, i64) {
        (self.wins, self.set_diff, self.game_diff, self.tiebreak_diff)
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Win,
    Loss,
    Tie,
}

/// Ranks the players of one group by wins, then set, game and tiebreak balance.
///
/// Players level on all four keys keep the order in which they first appear in
/// `results`.
pub fn compute(results: &[ResultRecord], group: Group) -> Vec<PlayerStanding> {
    let mut table: Vec<PlayerStanding> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for result in results.iter().filter(|r| r.fixture.group_ref() == group) {
        let fixture = &result.fixture;
        let score = &result.score;
        let (first, second) = match result.winner {
            Winner::Player1 => (Outcome::Win, Outcome::Loss),
            Winner::Player2 => (Outcome::Loss, Outcome::Win),
            Winner::Tie => (Outcome::Tie, Outcome::Tie),
        };

        let slot = slot_for(&mut table, &mut index, &fixture.player1);
        table[slot].record(
            first,
            (score.sets1, score.sets2),
            (score.games1, score.games2),
            (score.tiebreaks1, score.tiebreaks2),
        );

        let slot = slot_for(&mut table, &mut index, &fixture.player2);
        table[slot].record(
            second,
            (score.sets2, score.sets1),
            (score.games2, score.games1),
            (score.tiebreaks2, score.tiebreaks1),
        );
    }

    for standing in &mut table {
        standing.finish();
    }
    // sort_by is stable
    table.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
    table
}

fn slot_for(table: &mut Vec<PlayerStanding>, index: &mut HashMap<String, usize>, player: &str) -> usize {
    if let Some(&slot) = index.get(player) {
        return slot;
    }
    table.push(PlayerStanding::new(player));
    index.insert(player.to_string(), table.len() - 1);
    table.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Class, MatchRecord, Score};
    use chrono::{NaiveDate, NaiveTime};

    const GROUP_B1: Group = Group { class: Class::B, number: 1 };

    fn result(class: Class, group: u8, p1: &str, p2: &str, score: Score) -> ResultRecord {
        ResultRecord {
            fixture: MatchRecord {
                date: NaiveDate::from_ymd_opt(2025, 2, 6).unwrap(),
                time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                class,
                group,
                player1: p1.into(),
                player2: p2.into(),
            },
            winner: score.winner(),
            score,
        }
    }

    fn score(sets: (u8, u8), games: (u32, u32), tiebreaks: (u32, u32)) -> Score {
        Score {
            sets1: sets.0,
            sets2: sets.1,
            games1: games.0,
            games2: games.1,
            tiebreaks1: tiebreaks.0,
            tiebreaks2: tiebreaks.1,
        }
    }

    fn find<'a>(table: &'a [PlayerStanding], player: &str) -> &'a PlayerStanding {
        table.iter().find(|s| s.player == player).unwrap()
    }

    #[test]
    fn split_results_rank_on_set_balance() {
        let results = vec![
            result(Class::B, 1, "A", "B", score((2, 0), (12, 4), (0, 0))),
            result(Class::B, 1, "B", "A", score((2, 1), (13, 10), (0, 0))),
        ];
        let table = compute(&results, GROUP_B1);

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].player, "A");
        assert_eq!((table[0].wins, table[0].losses), (1, 1));
        assert_eq!(table[0].set_diff, 1);
        assert_eq!(table[0].game_diff, 5);
        assert_eq!(table[1].player, "B");
        assert_eq!((table[1].wins, table[1].losses), (1, 1));
        assert_eq!(table[1].set_diff, -1);
        assert_eq!(table[1].played, 2);
    }

    #[test]
    fn winner_and_loser_are_credited_once() {
        let results = vec![result(Class::B, 1, "Ana", "Bia", score((0, 2), (3, 12), (0, 1)))];
        let table = compute(&results, GROUP_B1);
        let ana = find(&table, "Ana");
        let bia = find(&table, "Bia");
        assert_eq!((bia.wins, bia.losses), (1, 0));
        assert_eq!((ana.wins, ana.losses), (0, 1));
        assert_eq!(ana.tiebreak_diff, -1);
        assert_eq!(bia.tiebreaks_won, 1);
        assert_eq!(table[0].player, "Bia");
    }

    #[test]
    fn other_groups_and_classes_are_ignored() {
        let results = vec![
            result(Class::B, 2, "Ana", "Bia", score((2, 0), (12, 0), (0, 0))),
            result(Class::C, 1, "Caio", "Duda", score((2, 0), (12, 0), (0, 0))),
        ];
        assert!(compute(&results, GROUP_B1).is_empty());
        assert!(compute(&[], GROUP_B1).is_empty());
    }

    #[test]
    fn oversized_game_counts_saturate() {
        let huge = score((2, 0), (u32::MAX, 0), (u32::MAX, 0));
        let results = vec![
            result(Class::B, 1, "Ana", "Bia", huge),
            result(Class::B, 1, "Ana", "Bia", huge),
        ];
        let table = compute(&results, GROUP_B1);
        let ana = find(&table, "Ana");
        assert_eq!(ana.games_won, u32::MAX);
        assert_eq!(ana.game_diff, i64::from(u32::MAX));
        assert_eq!(ana.tiebreaks_won, u32::MAX);
        assert_eq!(find(&table, "Bia").game_diff, -i64::from(u32::MAX));
    }

    #[test]
    fn ties_count_as_played_only() {
        let results = vec![result(Class::B, 1, "Ana", "Bia", score((1, 1), (10, 10), (1, 1)))];
        let table = compute(&results, GROUP_B1);
        for standing in &table {
            assert_eq!(standing.played, 1);
            assert_eq!(standing.ties, 1);
            assert_eq!(standing.wins + standing.losses, 0);
        }
    }

    #[test]
    fn full_ties_keep_first_appearance_order() {
        let even = score((2, 0), (12, 0), (0, 0));
        let results = vec![
            result(Class::B, 1, "Zeca", "Yara", even),
            result(Class::B, 1, "Xuxa", "Zeca", even),
            result(Class::B, 1, "Yara", "Xuxa", even),
        ];
        let table = compute(&results, GROUP_B1);
        let order: Vec<_> = table.iter().map(|s| s.player.as_str()).collect();
        assert_eq!(order, ["Zeca", "Yara", "Xuxa"]);
    }

    #[test]
    fn ordering_is_non_increasing_on_all_keys() {
        let results = vec![
            result(Class::B, 1, "A", "B", score((2, 1), (14, 12), (1, 0))),
            result(Class::B, 1, "C", "D", score((2, 0), (12, 2), (0, 0))),
            result(Class::B, 1, "A", "C", score((0, 2), (5, 12), (0, 0))),
            result(Class::B, 1, "B", "D", score((2, 1), (11, 13), (2, 1))),
            result(Class::B, 1, "D", "A", score((1, 1), (9, 9), (0, 0))),
        ];
        let table = compute(&results, GROUP_B1);
        assert_eq!(table.len(), 4);
        assert_eq!(table[0].player, "C");
        for pair in table.windows(2) {
            assert!(pair[0].rank_key() >= pair[1].rank_key());
        }
    }
}

use crate::models::{Class, Group, MatchRecord};
use crate::progress::{WeekStatus, WeeklyReport};
use crate::schedule::MatchFilter;
use crate::standings::PlayerStanding;
use crate::tournament::Tournament;
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub struct IndexView<'a> {
    pub tournament: &'a Tournament,
    pub filter: &'a MatchFilter,
    pub matches: &'a [MatchRecord],
    pub total_matches: usize,
    pub report: &'a WeeklyReport,
    pub standings: Option<(Group, &'a [PlayerStanding])>,
}

pub fn render_index(view: &IndexView<'_>) -> String {
    render_page(view).into_string()
}

fn render_page(view: &IndexView<'_>) -> Markup {
    let name = &view.tournament.name;
    let first = view.tournament.first_day().map(|d| d.to_string()).unwrap_or_default();
    let last = view.tournament.last_day().map(|d| d.to_string()).unwrap_or_default();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (name) " | Match Schedule" }
                style { (PreEscaped(CSS)) }
            }
            body {
                main {
                    header {
                        h1 { (name) }
                        p.muted { "Match scheduling, " (first) " to " (last) }
                    }
                    section {
                        h2 { "Schedule a match" }
                        form.row method="post" action="/matches" {
                            input name="player1" placeholder="Player 1" required;
                            input name="player2" placeholder="Player 2" required;
                            select name="class" { (class_options(None, false)) }
                            input type="number" name="group" min="1" max="4" value="1" required;
                            input type="date" name="date" min=(first) max=(last) required;
                            input type="time" name="time" required;
                            button type="submit" { "Schedule" }
                        }
                    }
                    section {
                        h2 { "Scheduled matches" }
                        (render_filters(view.filter))
                        (render_schedule(view.matches, view.total_matches))
                    }
                    section {
                        h2 { "Weekly targets" }
                        (render_progress(view.report))
                    }
                    section {
                        h2 { "Standings" }
                        (render_standings(view.standings))
                    }
                }
            }
        }
    }
}

fn class_options(selected: Option<Class>, with_any: bool) -> Markup {
    html! {
        @if with_any {
            option value="" { "All" }
        }
        @for class in Class::ALL {
            option value=(class) selected[selected == Some(class)] { (class) }
        }
    }
}

fn render_filters(filter: &MatchFilter) -> Markup {
    html! {
        form.row method="get" action="/" {
            input name="player" placeholder="Player" value=(filter.player.as_deref().unwrap_or_default());
            input type="date" name="date" value=(filter.date.map(|d| d.to_string()).unwrap_or_default());
            select name="class" { (class_options(filter.class, true)) }
            input type="number" name="group" min="1" max="4" placeholder="Group"
                value=(filter.group.map(|g| g.to_string()).unwrap_or_default());
            button type="submit" { "Filter" }
        }
    }
}

fn render_schedule(matches: &[MatchRecord], total: usize) -> Markup {
    html! {
        @if total == 0 {
            p.muted { "No matches scheduled yet." }
        } @else {
            p.muted { "Showing " (matches.len()) " of " (total) " matches." }
            table {
                thead {
                    tr {
                        th { "Date" } th { "Time" } th { "Class" } th { "Group" }
                        th { "Player 1" } th { "Player 2" } th {}
                    }
                }
                tbody {
                    @for record in matches {
                        @let time = record.time.format("%H:%M").to_string();
                        tr {
                            td { (record.date.format("%d/%m/%Y")) }
                            td { (time) }
                            td { (record.class) }
                            td { (record.group) }
                            td { (record.player1) }
                            td { (record.player2) }
                            td {
                                // the hidden fields must round-trip to the exact stored record
                                form method="post" action="/matches/delete" {
                                    input type="hidden" name="date" value=(record.date);
                                    input type="hidden" name="time" value=(time);
                                    input type="hidden" name="class" value=(record.class);
                                    input type="hidden" name="group" value=(record.group);
                                    input type="hidden" name="player1" value=(record.player1);
                                    input type="hidden" name="player2" value=(record.player2);
                                    button.danger type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
            form method="post" action="/matches/clear" {
                button.danger type="submit" { "Clear all matches" }
            }
        }
    }
}

fn render_progress(report: &WeeklyReport) -> Markup {
    let current = report
        .current_week
        .map(|n| format!("Week {n}"))
        .unwrap_or_else(|| "Not running".to_string());

    html! {
        div.metrics {
            div { span { "Scheduled" } strong { (report.total_actual) "/" (report.total_target) } }
            div { span { "Progress" } strong { (format!("{:.1}%", report.percent)) } }
            div { span { "Remaining" } strong { (report.remaining) } }
            div { span { "Current week" } strong { (current) } }
        }
        table {
            thead {
                tr {
                    th { "Week" } th { "Start" } th { "End" } th { "Target" } th { "Scheduled" }
                    th { "Cum. target" } th { "Cum. scheduled" } th { "Balance" } th { "Status" }
                }
            }
            tbody {
                @for week in &report.weeks {
                    @let (label, tone) = match week.status {
                        WeekStatus::Surplus => ("Surplus", "good"),
                        WeekStatus::Deficit => ("Deficit", "bad"),
                        WeekStatus::Met => ("Target met", "even"),
                    };
                    tr {
                        td { (week.number) }
                        td { (week.start.format("%d/%m/%Y")) }
                        td { (week.end.format("%d/%m/%Y")) }
                        td { (week.target) }
                        td { (week.actual) }
                        td { (week.cum_target) }
                        td { (week.cum_actual) }
                        td { (format!("{:+}", week.saldo)) }
                        td class=(tone) { (label) }
                    }
                }
            }
        }
    }
}

fn render_standings(standings: Option<(Group, &[PlayerStanding])>) -> Markup {
    html! {
        @match standings {
            None => {
                p.muted { "Pick a class and a group in the filter to see standings." }
            },
            Some((group, rows)) if rows.is_empty() => {
                p.muted { "No results yet for class " (group.class) " group " (group.number) "." }
            },
            Some((group, rows)) => {
                h3 { "Class " (group.class) " group " (group.number) }
                table {
                    thead {
                        tr {
                            th { "#" } th { "Player" } th { "Played" } th { "W" } th { "L" } th { "T" }
                            th { "Sets" } th { "Games" } th { "Tiebreaks" }
                        }
                    }
                    tbody {
                        @for (idx, s) in rows.iter().enumerate() {
                            tr {
                                td { (idx + 1) }
                                td { (s.player) }
                                td { (s.played) }
                                td { (s.wins) }
                                td { (s.losses) }
                                td { (s.ties) }
                                td { (format!("{:+}", s.set_diff)) }
                                td { (format!("{:+}", s.game_diff)) }
                                td { (format!("{:+}", s.tiebreak_diff)) }
                            }
                        }
                    }
                }
            },
        }
    }
}

const CSS: &str = r#"
:root {
  --bg: #f3f6ef;
  --ink: #1f2a1f;
  --accent: #c8d400;
  --court: #2f6b3a;
  --card: rgba(255, 255, 255, 0.92);
}

body {
  margin: 0;
  background: linear-gradient(160deg, var(--bg), #e3ecd9);
  color: var(--ink);
  font-family: "Trebuchet MS", sans-serif;
  padding: 24px;
}

main {
  max-width: 1100px;
  margin: 0 auto;
  display: grid;
  gap: 24px;
}

section {
  background: var(--card);
  border-radius: 18px;
  padding: 20px 24px;
  box-shadow: 0 12px 32px rgba(47, 107, 58, 0.12);
}

h1 { color: var(--court); margin: 0; }
h2 { margin-top: 0; }
.muted { color: #5f6b5f; }
.row { display: flex; flex-wrap: wrap; gap: 10px; align-items: center; }
table { width: 100%; border-collapse: collapse; margin: 12px 0; }
th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #dde5d6; }
td form { margin: 0; }
button { background: var(--court); color: white; border: 0; border-radius: 8px; padding: 6px 14px; cursor: pointer; }
button.danger { background: #a33a2b; }
.metrics { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; }
.metrics div { background: #f7faf3; border-radius: 12px; padding: 12px; display: grid; }
.metrics strong { font-size: 1.6rem; }
.good { color: var(--court); }
.bad { color: #a33a2b; }
.even { color: #8a7a00; }
  
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::compute;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn index_lists_matches_and_escapes_names() {
        let tournament = Tournament::default();
        let record = MatchRecord {
            date: NaiveDate::from_ymd_opt(2025, 2, 4).unwrap(),
            time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            class: Class::B,
            group: 1,
            player1: "Ana <A>".into(),
            player2: "Bia".into(),
        };
        let report = compute([record.date], &tournament.weeks);
        let html = render_index(&IndexView {
            tournament: &tournament,
            filter: &MatchFilter::default(),
            matches: std::slice::from_ref(&record),
            total_matches: 1,
            report: &report,
            standings: None,
        });

        assert!(html.contains("04/02/2025"));
        assert!(html.contains("Ana &lt;A&gt;"));
        assert!(!html.contains("Ana <A>"));
        assert!(html.contains("1/50"));
        assert!(html.contains(r#"<input type="hidden" name="time" value="18:00">"#));
        assert!(html.contains("Showing 1 of 1 matches."));
    }

    #[test]
    fn empty_schedule_has_a_hint() {
        let tournament = Tournament::default();
        let report = compute(Vec::new(), &tournament.weeks);
        let no_results: Vec<PlayerStanding> = Vec::new();
        let html = render_index(&IndexView {
            tournament: &tournament,
            filter: &MatchFilter::default(),
            matches: &[],
            total_matches: 0,
            report: &report,
            standings: Some((Group { class: Class::D, number: 2 }, no_results.as_slice())),
        });
        assert!(html.contains("No matches scheduled yet."));
        assert!(html.contains("No results yet for class D group 2."));
    }

    #[test]
    fn user_text_is_escaped_in_attributes_and_standings() {
        let tournament = Tournament::default();
        let report = compute(Vec::new(), &tournament.weeks);
        let filter = MatchFilter { player: Some(r#""><script>x</script>"#.into()), ..MatchFilter::default() };
        let standings = vec![PlayerStanding { player: "O'Neil & <b>".into(), ..PlayerStanding::default() }];
        let html = render_index(&IndexView {
            tournament: &tournament,
            filter: &filter,
            matches: &[],
            total_matches: 0,
            report: &report,
            standings: Some((Group { class: Class::B, number: 1 }, standings.as_slice())),
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(html.contains("O'Neil &amp; &lt;b&gt;"));
        assert!(html.contains("Class B group 1"));
    }
}

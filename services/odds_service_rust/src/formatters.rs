use odds_core::{AggregationResult, OutcomeKind};

pub const NO_GAMES_MESSAGE: &str = "Sorry no games found on this date";
pub const INVALID_DATE_MESSAGE: &str = "Invalid date format or value";
pub const ODDS_NOT_RELEASED_MESSAGE: &str = "Sorry all bookmakers haven't released game odds yet";

pub const QUERY_FORM: &str = r#"
        <form method="post">
            Sport: <input type="text" name="sport"><br>
            Date: <input type="text" name="date"><br>
            Bookmakers (comma separated): <input type="text" name="bookmakers"><br>
            <input type="submit" value="Submit"><br>
        </form>
    "#;

/// Render best-odds results as an HTML fragment, one block per game.
pub fn format_game_results(games: &[AggregationResult]) -> String {
    let mut out = String::new();
    for game in games {
        out.push_str(&format!("Game: {}<br>Results:<br>", escape_html(&game.game)));
        for result in &game.results {
            let outcome = match result.outcome {
                OutcomeKind::HomeWin => game.home_team.as_str(),
                OutcomeKind::AwayWin => game.away_team.as_str(),
                OutcomeKind::Draw => "Draw",
            };
            out.push_str(&format!(
                "  {}: {:.1} (Bookmakers: {})<br>",
                escape_html(outcome),
                result.best_price,
                escape_html(&result.bookmakers.join(", "))
            ));
        }
        out.push_str("<br>");
    }
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

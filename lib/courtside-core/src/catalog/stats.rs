//! Requests of the `stats.nba.com` API.
//!
//! Parameters go in the query string under their `PascalCase` wire names.

use std::sync::{Arc, LazyLock};

use http::header::{HeaderValue, REFERER};

use super::STATS_API;
use super::params::{self, NBA_LEAGUE_ID};
use crate::request::{FieldDef, RequestDefinition};
use crate::response::ResponseType;
use crate::validation::{Constraint, ValueKind};

/// The games of a day.
///
/// Only answers with the scores page as `Referer`. `dayOffset` shifts `gameDate` by a
/// number of days (negative values go back); leave it at `0`.
pub static SCOREBOARD: LazyLock<RequestDefinition> = LazyLock::new(|| {
    RequestDefinition::builder("scoreboard", Arc::clone(&STATS_API), "/stats/scoreboardv2")
        .header(
            REFERER,
            HeaderValue::from_static("http://stats.nba.com/scores/"),
        )
        .field(
            FieldDef::query("leagueId")
                .wire_name("LeagueID")
                .default_value(NBA_LEAGUE_ID)
                .constraint(Constraint::NotBlank)
                .constraint(Constraint::Type(ValueKind::Text))
                .constraint(params::league_id()),
        )
        .field(
            FieldDef::query("gameDate")
                .wire_name("GameDate")
                .constraint(Constraint::NotBlank)
                .constraint(Constraint::Type(ValueKind::Date)),
        )
        .field(
            FieldDef::query("dayOffset")
                .wire_name("DayOffset")
                .default_value(0)
                .constraint(Constraint::NotBlank)
                .constraint(Constraint::Type(ValueKind::Int)),
        )
        .build()
        .expect("a valid definition")
});

/// Synergy play type data of players; a script, only served for the 2015 season.
pub static PLAYER_PLAY_TYPE_MISC: LazyLock<RequestDefinition> = LazyLock::new(|| {
    RequestDefinition::builder(
        "player_play_type_misc",
        Arc::clone(&STATS_API),
        "/js/data/playtype/player_Misc.js",
    )
    .response_type(ResponseType::Js)
    .build()
    .expect("a valid definition")
});

/// Every player of a league, optionally limited to a season's active players.
pub static COMMON_ALL_PLAYERS: LazyLock<RequestDefinition> = LazyLock::new(|| {
    RequestDefinition::builder(
        "common_all_players",
        Arc::clone(&STATS_API),
        "/stats/commonallplayers",
    )
    .field(
        FieldDef::query("leagueId")
            .wire_name("LeagueID")
            .default_value(NBA_LEAGUE_ID),
    )
    .field(FieldDef::query("season").wire_name("Season"))
    .field(FieldDef::query("isOnlyCurrentSeason").wire_name("IsOnlyCurrentSeason"))
    .build()
    .expect("a valid definition")
});

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use http::header::{ACCEPT, USER_AGENT};

    use super::*;
    use crate::{ApiClient, CallOverrides, ConstraintValidator, ReqwestTransport, RequestValidator};

    fn client() -> ApiClient<ReqwestTransport> {
        ApiClient::new(ReqwestTransport::new())
    }

    #[test]
    fn should_assemble_scoreboard() {
        let date = NaiveDate::from_ymd_opt(2017, 10, 20).expect("valid date");
        let request = SCOREBOARD.request().with("gameDate", date);

        assert!(ConstraintValidator.validate(&request).is_valid());
        let descriptor = client()
            .prepare(&request, &CallOverrides::new())
            .expect("should prepare");

        insta::assert_snapshot!(
            descriptor.url,
            @"http://stats.nba.com/stats/scoreboardv2?LeagueID=00&GameDate=2017-10-20&DayOffset=0"
        );
        assert_eq!(
            descriptor.headers.get(REFERER),
            Some(&HeaderValue::from_static("http://stats.nba.com/scores/"))
        );
        assert!(descriptor.headers.contains_key(USER_AGENT));
    }

    #[test]
    fn should_reject_bad_league_id() {
        let request = SCOREBOARD
            .request()
            .with("leagueId", "NBA")
            .with("gameDate", "20/10/2017");

        let violations = ConstraintValidator.validate(&request);

        insta::assert_snapshot!(violations, @r"
        leagueId: This value is not valid.
        gameDate: This value should be of type date.
        ");
    }

    #[test]
    fn should_negotiate_javascript() {
        let request = PLAYER_PLAY_TYPE_MISC.request();

        let descriptor = client()
            .prepare(&request, &CallOverrides::new())
            .expect("should prepare");

        assert_eq!(
            descriptor.headers.get(ACCEPT),
            Some(&HeaderValue::from_static("application/javascript"))
        );
        assert!(descriptor.query.is_empty());
    }

    #[test]
    fn should_accept_anything_without_constraints() {
        let request = COMMON_ALL_PLAYERS
            .request()
            .with("season", "2017-18")
            .with("isOnlyCurrentSeason", true);

        assert!(ConstraintValidator.validate(&request).is_valid());
        let descriptor = client()
            .prepare(&request, &CallOverrides::new())
            .expect("should prepare");

        insta::assert_debug_snapshot!(descriptor.query, @r#"
        [
            (
                "LeagueID",
                "00",
            ),
            (
                "Season",
                "2017-18",
            ),
            (
                "IsOnlyCurrentSeason",
                "true",
            ),
        ]
        "#);
    }
}

//! Requests of the `data.nba.net` JSON feeds; every parameter is a path segment.

use std::sync::{Arc, LazyLock};

use super::DATA_API;
use super::params::{self, CMS_MIN_DATE, DATA_DATE_FORMAT, MIN_GAME_DATE, TEAM_SLUGS};
use crate::request::{FieldDef, RequestDefinition};
use crate::validation::{Constraint, ValueKind};

/// Current player information and regular season stats for all of a player's seasons.
///
/// Fields: `year` (2015 or later), `playerId`.
pub static PLAYER_PROFILE: LazyLock<RequestDefinition> = LazyLock::new(|| {
    RequestDefinition::builder(
        "player_profile",
        Arc::clone(&DATA_API),
        "/data/prod/v1/{year}/players/{playerId}_profile.json",
    )
    .field(
        FieldDef::path("year")
            .constraint(Constraint::NotBlank)
            .constraint(Constraint::Type(ValueKind::Int))
            .constraint(Constraint::min(2015)),
    )
    .field(
        FieldDef::path("playerId")
            .constraint(Constraint::NotBlank)
            .constraint(Constraint::Type(ValueKind::Int))
            .constraint(Constraint::range(1, i64::from(i32::MAX))),
    )
    .build()
    .expect("a valid definition")
});

/// Box score of a game, from the 2012-13 preseason on.
///
/// Fields: `gameDate`, `gameId` (ten digits).
pub static CMS_BOXSCORE: LazyLock<RequestDefinition> = LazyLock::new(|| {
    RequestDefinition::builder(
        "cms_boxscore",
        Arc::clone(&DATA_API),
        "/json/cms/noseason/game/{gameDate}/{gameId}/boxscore.json",
    )
    .field(
        FieldDef::path("gameDate")
            .date_format(DATA_DATE_FORMAT)
            .constraint(Constraint::NotBlank)
            .constraint(Constraint::Type(ValueKind::Date))
            .constraint(Constraint::min(*CMS_MIN_DATE)),
    )
    .field(
        FieldDef::path("gameId")
            .constraint(Constraint::NotBlank)
            .constraint(Constraint::Type(ValueKind::Text))
            .constraint(params::game_id()),
    )
    .build()
    .expect("a valid definition")
});

/// Every game of a day.
pub static CMS_SCOREBOARD: LazyLock<RequestDefinition> = LazyLock::new(|| {
    RequestDefinition::builder(
        "cms_scoreboard",
        Arc::clone(&DATA_API),
        "/json/cms/noseason/scoreboard/{gameDate}/games.json",
    )
    .field(
        FieldDef::path("gameDate")
            .date_format(DATA_DATE_FORMAT)
            .constraint(Constraint::NotBlank)
            .constraint(Constraint::Type(ValueKind::Date))
            .constraint(Constraint::min(*MIN_GAME_DATE)),
    )
    .build()
    .expect("a valid definition")
});

/// A team's summer league schedule.
pub static SUMMER_LEAGUE_SCHEDULE: LazyLock<RequestDefinition> = LazyLock::new(|| {
    RequestDefinition::builder(
        "summer_league_schedule",
        Arc::clone(&DATA_API),
        "/json/sl/cms/{year}/team/{teamSlug}/schedule.json",
    )
    .field(
        FieldDef::path("year")
            .constraint(Constraint::NotBlank)
            .constraint(Constraint::Type(ValueKind::Int))
            .constraint(Constraint::min(2015)),
    )
    .field(
        FieldDef::path("teamSlug")
            .constraint(Constraint::NotBlank)
            .constraint(Constraint::Type(ValueKind::Text))
            .constraint(Constraint::Choice(TEAM_SLUGS)),
    )
    .build()
    .expect("a valid definition")
});

//! Parameter formats and option sets shared by catalog entries.

use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::validation::Constraint;

/// League ids are two digits.
pub const LEAGUE_ID_FORMAT: &str = r"^\d{2}$";

/// The NBA league id.
pub const NBA_LEAGUE_ID: &str = "00";

/// Game ids are ten digits, leading zeros included (`0021700001`).
pub const GAME_ID_FORMAT: &str = r"^\d{10}$";

/// Dates in `data.nba.net` paths are compact: `20171017`.
pub const DATA_DATE_FORMAT: &str = "%Y%m%d";

/// Team slugs used in `data.nba.net` paths.
pub const TEAM_SLUGS: &[&str] = &[
    "76ers",
    "blazers",
    "bucks",
    "bulls",
    "cavaliers",
    "celtics",
    "clippers",
    "grizzlies",
    "hawks",
    "heat",
    "hornets",
    "jazz",
    "kings",
    "knicks",
    "lakers",
    "magic",
    "mavericks",
    "nets",
    "nuggets",
    "pacers",
    "pelicans",
    "pistons",
    "raptors",
    "rockets",
    "spurs",
    "suns",
    "thunder",
    "timberwolves",
    "warriors",
    "wizards",
];

/// First game date with a CMS box score: the 2012-13 preseason opener.
pub static CMS_MIN_DATE: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(2012, 10, 5).expect("a valid date"));

/// First game date of the league.
pub static MIN_GAME_DATE: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(1946, 11, 1).expect("a valid date"));

pub(crate) fn league_id() -> Constraint {
    Constraint::matches(LEAGUE_ID_FORMAT).expect("a valid regex")
}

pub(crate) fn game_id() -> Constraint {
    Constraint::matches(GAME_ID_FORMAT).expect("a valid regex")
}

#![allow(missing_docs)]

use http::header::{ACCEPT, HeaderValue, REFERER};
use http::{Method, StatusCode};
use rstest::rstest;
use serde::Deserialize;
use serde_json::json;

use courtside_core::catalog::data::PLAYER_PROFILE;
use courtside_core::catalog::stats::{PLAYER_PLAY_TYPE_MISC, SCOREBOARD};
use courtside_core::{
    ApiClient, ApiClientError, CallOverrides, DecodeError, DecodedBody, ReqwestTransport,
    ResponseType,
};

mod common;
pub use self::common::*;

fn overrides(api: &FakeNbaApi) -> CallOverrides {
    CallOverrides::new().with_base_uri(api.base_uri.clone())
}

#[rstest]
#[tokio::test]
async fn should_fetch_player_profile(#[future] api: FakeNbaApi) -> anyhow::Result<()> {
    #[derive(Debug, Deserialize)]
    struct Profile {
        league: League,
    }

    #[derive(Debug, Deserialize)]
    struct League {
        standard: Standard,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Standard {
        year: String,
        player_id: String,
        accept: String,
    }

    let api = api.await;
    let client = ApiClient::new(ReqwestTransport::new());
    let request = PLAYER_PROFILE.request().with("year", 2017).with("playerId", 201_939);

    let response = client.send(&request, overrides(&api)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.content_type().map(|it| it.to_string()).as_deref(),
        Some("application/json")
    );
    let profile: Profile = response.json()?;
    assert_eq!(profile.league.standard.year, "2017");
    assert_eq!(profile.league.standard.player_id, "201939");
    assert_eq!(profile.league.standard.accept, "application/json");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_send_stats_query_and_referer(#[future] api: FakeNbaApi) -> anyhow::Result<()> {
    let api = api.await;
    let client = ApiClient::new(ReqwestTransport::new());
    let request = SCOREBOARD.request().with("gameDate", "2017-10-20");

    let response = client.send(&request, overrides(&api)).await?;

    assert_eq!(
        response.json_value()?,
        &json!({
            "resource": "scoreboard",
            "parameters": {
                "LeagueID": "00",
                "GameDate": "2017-10-20",
                "DayOffset": "0",
            },
        })
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_surface_status_error(#[future] api: FakeNbaApi) -> anyhow::Result<()> {
    let api = api.await;
    let client = ApiClient::new(ReqwestTransport::new());
    let request = SCOREBOARD
        .request()
        .with("gameDate", "2017-10-20")
        .with_header(REFERER, HeaderValue::from_static("http://www.nba.com/"));

    let error = client
        .send(&request, overrides(&api))
        .await
        .expect_err("the referer is checked");

    let ApiClientError::Transport {
        request, source, ..
    } = &error
    else {
        anyhow::bail!("expected a transport error, got {error:?}");
    };
    assert_eq!(*request, "scoreboard");
    assert_eq!(source.status(), Some(StatusCode::FORBIDDEN));
    assert!(source.to_string().ends_with("Access denied"), "{source}");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_not_call_the_server_with_invalid_request(
    #[future] api: FakeNbaApi,
) -> anyhow::Result<()> {
    let api = api.await;
    let client = ApiClient::new(ReqwestTransport::new());
    let request = PLAYER_PROFILE.request().with("year", 1999).with("playerId", 0);

    let error = client
        .send(&request, overrides(&api))
        .await
        .expect_err("invalid request");

    insta::assert_snapshot!(error, @r"
    Invalid request 'player_profile':
    year: This value should be 2015 or more.
    playerId: This value should be 1 or more.
    ");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_decode_javascript(#[future] api: FakeNbaApi) -> anyhow::Result<()> {
    let api = api.await;
    let client = ApiClient::new(ReqwestTransport::new());

    let response = client
        .send(&PLAYER_PLAY_TYPE_MISC.request(), overrides(&api))
        .await?;

    assert_eq!(response.response_type(), ResponseType::Js);
    let decoded = response.decoded()?;
    assert!(
        decoded
            .as_text()
            .is_some_and(|source| source.starts_with("var accept = \"application/javascript\";"))
    );
    assert_eq!(
        decoded.as_json(),
        Some(&json!({"rowSet": [[201_939, "Stephen Curry", 1.12]]}))
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_use_raw_escape_hatch(#[future] api: FakeNbaApi) -> anyhow::Result<()> {
    let api = api.await;
    let client = ApiClient::new(ReqwestTransport::new());

    let ok = client
        .raw_send(
            Method::GET,
            api.base_uri.join("/stats/scoreboardv2?GameDate=2017-10-20")?,
            CallOverrides::new()
                .with_header(REFERER, HeaderValue::from_static("http://stats.nba.com/scores/"))
                .with_header(ACCEPT, HeaderValue::from_static("application/json")),
        )
        .await?;
    assert!(matches!(ok.decoded()?, DecodedBody::Text(text) if text.contains("2017-10-20")));

    let broken = client
        .raw_send(Method::GET, api.base_uri.join("/broken.json")?, CallOverrides::new())
        .await?;
    let error = broken
        .json::<serde_json::Value>()
        .expect_err("truncated document");
    assert!(matches!(error, DecodeError::Json { .. }), "{error}");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn should_report_network_failure() -> anyhow::Result<()> {
    init_tracing();
    let client = ApiClient::new(ReqwestTransport::new());
    let request = PLAYER_PROFILE.request().with("year", 2017).with("playerId", 201_939);
    // port 9 (discard) is not listening on the loopback interface
    let overrides = CallOverrides::new().with_base_uri("http://127.0.0.1:9/".parse()?);

    let error = client
        .send(&request, overrides)
        .await
        .expect_err("nothing listens there");

    let ApiClientError::Transport { source, .. } = &error else {
        anyhow::bail!("expected a transport error, got {error:?}");
    };
    assert_eq!(source.status(), None);

    Ok(())
}

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;

use super::ConstructionDefect;

/// Regular expression for matching endpoint placeholders in the format `{name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

/// Characters escaped in a path segment; dates and ids (`-`, `_`, `.`) pass through.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn encode_path_value(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Iterates over the placeholder names of an endpoint template, in order of appearance.
///
/// A placeholder used twice is yielded twice.
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    RE.captures_iter(template)
        .filter_map(|caps| caps.name("name"))
        .map(|name| name.as_str())
}

/// Checks the 1:1 correspondence between template placeholders and path fields.
pub(crate) fn check_placeholders<'a>(
    template: &str,
    path_fields: impl IntoIterator<Item = &'a str>,
) -> Result<(), ConstructionDefect> {
    let mut names: HashSet<&str> = placeholders(template).collect();

    for field in path_fields {
        if !names.remove(field) {
            return Err(ConstructionDefect::PathFieldNotInTemplate {
                template: template.to_string(),
                field: field.to_string(),
            });
        }
    }

    if let Some(placeholder) = placeholders(template).find(|name| names.contains(name)) {
        return Err(ConstructionDefect::UnknownPlaceholder {
            template: template.to_string(),
            placeholder: placeholder.to_string(),
        });
    }

    Ok(())
}

/// Expands an endpoint template with rendered path values.
///
/// `args` maps every declared path field to its rendered value, `None` when the field
/// has no value. Values are percent-encoded as path segments.
///
/// # Errors
///
/// - [`ConstructionDefect::MissingPathValue`] if a declared path field has no value
/// - [`ConstructionDefect::UnknownPlaceholder`] if a placeholder has no declared field
/// - [`ConstructionDefect::PathFieldNotInTemplate`] if a declared path field is never used
///
/// # Example
///
/// ```rust
/// use courtside_core::resolve_endpoint;
/// use indexmap::IndexMap;
///
/// let mut args = IndexMap::new();
/// args.insert("year", Some("2015".to_string()));
/// args.insert("playerId", Some("201939".to_string()));
///
/// let path = resolve_endpoint("/data/{year}/players/{playerId}_profile.json", &args)?;
/// assert_eq!(path, "/data/2015/players/201939_profile.json");
/// # Ok::<(), courtside_core::ConstructionDefect>(())
/// ```
pub fn resolve_endpoint(
    template: &str,
    args: &IndexMap<&str, Option<String>>,
) -> Result<String, ConstructionDefect> {
    if let Some((field, _)) = args.iter().find(|(_, value)| value.is_none()) {
        return Err(ConstructionDefect::MissingPathValue {
            template: template.to_string(),
            field: (*field).to_string(),
        });
    }

    check_placeholders(template, args.keys().copied())?;

    let mut resolved = String::with_capacity(template.len());
    let mut last = 0;
    for caps in RE.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
            continue;
        };
        let value = args
            .get(name.as_str())
            .and_then(Option::as_deref)
            .unwrap_or_default();

        resolved.push_str(&template[last..whole.start()]);
        resolved.push_str(&encode_path_value(value));
        last = whole.end();
    }
    resolved.push_str(&template[last..]);

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(values: &[(&'a str, Option<&str>)]) -> IndexMap<&'a str, Option<String>> {
        values
            .iter()
            .map(|(name, value)| (*name, value.map(ToString::to_string)))
            .collect()
    }

    #[test]
    fn should_resolve_player_profile_endpoint() {
        let path = resolve_endpoint(
            "/data/{year}/players/{playerId}_profile.json",
            &args(&[("year", Some("2015")), ("playerId", Some("201939"))]),
        )
        .expect("should resolve");

        insta::assert_snapshot!(path, @"/data/2015/players/201939_profile.json");
    }

    #[test]
    fn should_resolve_deterministically() {
        let template = "/json/cms/noseason/game/{gameDate}/{gameId}/boxscore.json";
        let values = args(&[("gameDate", Some("20171020")), ("gameId", Some("0021700001"))]);

        let first = resolve_endpoint(template, &values).expect("should resolve");
        let second = resolve_endpoint(template, &values).expect("should resolve");

        assert_eq!(first, second);
        assert_eq!(first, "/json/cms/noseason/game/20171020/0021700001/boxscore.json");
    }

    #[test]
    fn should_keep_template_without_placeholder() {
        let path = resolve_endpoint("/js/data/playtype/player_Misc.js", &IndexMap::new())
            .expect("should resolve");

        assert_eq!(path, "/js/data/playtype/player_Misc.js");
    }

    #[test]
    fn should_replace_repeated_placeholder() {
        let path = resolve_endpoint("/{id}/{id}", &args(&[("id", Some("7"))]))
            .expect("should resolve");

        assert_eq!(path, "/7/7");
    }

    #[test]
    fn should_not_confuse_placeholder_prefixes() {
        let path = resolve_endpoint(
            "/teams/{teamId}/{id}",
            &args(&[("id", Some("1")), ("teamId", Some("2"))]),
        )
        .expect("should resolve");

        assert_eq!(path, "/teams/2/1");
    }

    #[test]
    fn should_encode_path_values() {
        let path = resolve_endpoint("/search/{query}", &args(&[("query", Some("a b/c"))]))
            .expect("should resolve");

        insta::assert_snapshot!(path, @"/search/a%20b%2Fc");
    }

    #[test]
    fn should_keep_date_dashes() {
        let path = resolve_endpoint("/scores/{date}", &args(&[("date", Some("2017-10-20"))]))
            .expect("should resolve");

        assert_eq!(path, "/scores/2017-10-20");
    }

    #[test]
    fn should_fail_on_missing_path_value() {
        let result = resolve_endpoint(
            "/data/{year}/players/{playerId}_profile.json",
            &args(&[("year", Some("2015")), ("playerId", None)]),
        );

        insta::assert_debug_snapshot!(result, @r#"
        Err(
            MissingPathValue {
                template: "/data/{year}/players/{playerId}_profile.json",
                field: "playerId",
            },
        )
        "#);
    }

    #[test]
    fn should_fail_on_unknown_placeholder() {
        let result = resolve_endpoint("/data/{year}/{season}", &args(&[("year", Some("2015"))]));

        assert_eq!(
            result,
            Err(ConstructionDefect::UnknownPlaceholder {
                template: "/data/{year}/{season}".to_string(),
                placeholder: "season".to_string(),
            })
        );
    }

    #[test]
    fn should_fail_on_unused_path_field() {
        let result = resolve_endpoint(
            "/data/{year}",
            &args(&[("year", Some("2015")), ("teamSlug", Some("bulls"))]),
        );

        assert_eq!(
            result,
            Err(ConstructionDefect::PathFieldNotInTemplate {
                template: "/data/{year}".to_string(),
                field: "teamSlug".to_string(),
            })
        );
    }

    #[test]
    fn should_list_placeholders_in_order() {
        let names: Vec<_> = placeholders("/{b}/x/{a}/{b}").collect();

        assert_eq!(names, vec!["b", "a", "b"]);
    }
}

//! Declarative field validation.
//!
//! Constraints are attached to fields in a [`RequestDefinition`](crate::RequestDefinition)
//! and checked by a [`RequestValidator`] before any dispatch.

use tracing::debug;

mod constraint;
pub use self::constraint::{Constraint, ConstraintKind, RangeBound, ValueKind};

mod violation;
pub use self::violation::{Violation, Violations};

use crate::request::ApiRequest;

/// Checks a request against its field constraints.
///
/// Implementations must be pure: validating the same request twice yields the same
/// violations, and the request is never modified.
pub trait RequestValidator: Send + Sync {
    /// Collects every violation of `request`; an empty list means valid.
    fn validate(&self, request: &ApiRequest<'_>) -> Violations;
}

/// The default validator: evaluates every constraint of every field.
///
/// Evaluation never stops at the first failure, so a request with `N` failing
/// constraints reports `N` violations, in field then constraint declaration order.
///
/// # Example
///
/// ```rust
/// use courtside_core::catalog::data::PLAYER_PROFILE;
/// use courtside_core::{ConstraintValidator, RequestValidator};
///
/// let request = PLAYER_PROFILE.request().with("year", 2015);
/// let violations = ConstraintValidator.validate(&request);
///
/// assert!(!violations.is_valid());
/// assert_eq!(violations[0].field(), "playerId");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl RequestValidator for ConstraintValidator {
    fn validate(&self, request: &ApiRequest<'_>) -> Violations {
        let mut violations = Violations::default();

        for (field, value) in request.fields() {
            for constraint in field.constraints() {
                if let Some(violation) = constraint.check(field.name(), value) {
                    violations.push(violation);
                }
            }
        }

        if !violations.is_valid() {
            debug!(request = request.name(), count = violations.len(), "invalid request");
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, LazyLock};

    use chrono::NaiveDate;

    use super::*;
    use crate::request::{ApiFamily, FieldDef, FieldValue, RequestDefinition};

    static PLAY_TYPE: LazyLock<RequestDefinition> = LazyLock::new(|| {
        let family = Arc::new(ApiFamily::new("stats", "http://stats-prod.nba.com").expect("valid uri"));
        RequestDefinition::builder("play_type", family, "/wp-json/statscms/v1/synergy/player/")
            .field(
                FieldDef::query("season")
                    .constraint(Constraint::NotBlank)
                    .constraint(Constraint::Type(ValueKind::Int))
                    .constraint(Constraint::min(2015)),
            )
            .field(
                FieldDef::query("category")
                    .constraint(Constraint::NotBlank)
                    .constraint(Constraint::Choice(&["Misc", "Transition", "Isolation"])),
            )
            .field(
                FieldDef::query("seasonType")
                    .default_value("Reg")
                    .constraint(Constraint::Choice(&["Reg", "Post"])),
            )
            .field(
                FieldDef::query("date")
                    .constraint(Constraint::min(NaiveDate::from_ymd_opt(2012, 10, 5).expect("valid date"))),
            )
            .build()
            .expect("valid definition")
    });

    #[test]
    fn should_accept_valid_request() {
        let request = PLAY_TYPE.request().with("season", 2017).with("category", "Misc");

        let violations = ConstraintValidator.validate(&request);

        assert!(violations.is_valid(), "{violations}");
    }

    #[test]
    fn should_report_every_violation_in_order() {
        let request = PLAY_TYPE
            .request()
            .with("season", "2014x")
            .with("seasonType", "Pre")
            .with("date", NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid date"));

        let violations = ConstraintValidator.validate(&request);

        insta::assert_snapshot!(violations, @r"
        season: This value should be of type int.
        season: This value should be a valid number.
        category: This value should not be blank.
        seasonType: The value you selected is not a valid choice.
        date: This value should be 2012-10-05 or more.
        ");
        let kinds: Vec<_> = violations.iter().map(Violation::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintKind::Type,
                ConstraintKind::Range,
                ConstraintKind::NotBlank,
                ConstraintKind::Choice,
                ConstraintKind::Range,
            ]
        );
    }

    #[test]
    fn should_not_touch_the_request() {
        let request = PLAY_TYPE.request().with("season", 2000);

        let first = ConstraintValidator.validate(&request);
        let second = ConstraintValidator.validate(&request);

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(request.value("season"), Some(&FieldValue::Int(2000)));
        assert_eq!(request.value("category"), None);
    }

    #[test]
    fn should_report_missing_required_field_only_once() {
        let mut request = PLAY_TYPE.request().with("category", "Misc");
        request.unset("seasonType");

        let violations = ConstraintValidator.validate(&request);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field(), "season");
        assert_eq!(violations[0].kind(), ConstraintKind::NotBlank);
    }
}

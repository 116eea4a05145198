//! Domain rules checked before a body or grave is written to the store.
//!
//! These functions have no side effects. They are called by the create and
//! update paths of the stores, after the argument and lifecycle checks.
use cemetery_shared::types::{Body, Grave};

use crate::clock::Clock;
use crate::errors::ManagerError;

/// Checks that a body has a name and a gender and that its dates are
/// consistent. With a clock, dates after today are rejected; today itself is
/// accepted.
pub fn validate_body(body: &Body, clock: Option<&dyn Clock>) -> Result<(), ManagerError> {
    match body.name.as_deref() {
        None => return Err(ManagerError::validation("name is null")),
        Some(name) if name.trim().is_empty() => {
            return Err(ManagerError::validation("name is empty"))
        }
        Some(_) => {}
    }
    if body.gender.is_none() {
        return Err(ManagerError::validation("gender is null"));
    }
    if let (Some(born), Some(died)) = (body.born, body.died) {
        if died < born {
            return Err(ManagerError::validation("died is before born"));
        }
    }
    if let Some(clock) = clock {
        let today = clock.today();
        if body.born.is_some_and(|born| born > today) {
            return Err(ManagerError::validation("born is in future"));
        }
        if body.died.is_some_and(|died| died > today) {
            return Err(ManagerError::validation("died is in future"));
        }
    }
    Ok(())
}

/// Checks that a grave has a non-negative position and a positive capacity.
pub fn validate_grave(grave: &Grave) -> Result<(), ManagerError> {
    if grave.row < 0 {
        return Err(ManagerError::validation("row is negative number"));
    }
    if grave.column < 0 {
        return Err(ManagerError::validation("column is negative number"));
    }
    if grave.capacity <= 0 {
        return Err(ManagerError::validation("capacity is not positive number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::errors::ErrorKind;
    use cemetery_shared::types::Gender;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 2, 29).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(today())
    }

    fn reason(result: Result<(), ManagerError>) -> String {
        match result {
            Err(ManagerError::Validation(reason)) => reason,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_body() {
        let body = Body::new("Joe", Gender::Male)
            .with_born(NaiveDate::from_ymd_opt(1962, 10, 21).unwrap())
            .with_died(NaiveDate::from_ymd_opt(2011, 11, 8).unwrap());
        assert!(validate_body(&body, Some(&clock())).is_ok());
    }

    #[test]
    fn test_body_without_name() {
        let body = Body {
            gender: Some(Gender::Male),
            ..Body::default()
        };
        assert_eq!(reason(validate_body(&body, None)), "name is null");
    }

    #[test]
    fn test_body_with_blank_name() {
        let body = Body::new("  ", Gender::Female);
        assert_eq!(reason(validate_body(&body, None)), "name is empty");
    }

    #[test]
    fn test_body_without_gender() {
        let body = Body {
            name: Some("Joe".to_string()),
            ..Body::default()
        };
        assert_eq!(reason(validate_body(&body, None)), "gender is null");
    }

    #[test]
    fn test_body_died_before_born() {
        let body = Body::new("Joe", Gender::Male)
            .with_born(NaiveDate::from_ymd_opt(1962, 10, 21).unwrap())
            .with_died(NaiveDate::from_ymd_opt(1962, 10, 20).unwrap());
        assert_eq!(reason(validate_body(&body, None)), "died is before born");
    }

    #[test]
    fn test_body_born_and_died_same_day() {
        let day = NaiveDate::from_ymd_opt(1962, 10, 21).unwrap();
        let body = Body::new("Joe", Gender::Male).with_born(day).with_died(day);
        assert!(validate_body(&body, Some(&clock())).is_ok());
    }

    #[test]
    fn test_body_dates_relative_to_clock() {
        let tomorrow = today().succ_opt().unwrap();

        let born_today = Body::new("Joe", Gender::Male).with_born(today());
        assert!(validate_body(&born_today, Some(&clock())).is_ok());

        let died_today = Body::new("Joe", Gender::Male).with_died(today());
        assert!(validate_body(&died_today, Some(&clock())).is_ok());

        let born_tomorrow = Body::new("Joe", Gender::Male).with_born(tomorrow);
        assert_eq!(reason(validate_body(&born_tomorrow, Some(&clock()))), "born is in future");

        let died_tomorrow = Body::new("Joe", Gender::Male).with_died(tomorrow);
        assert_eq!(reason(validate_body(&died_tomorrow, Some(&clock()))), "died is in future");
    }

    #[test]
    fn test_future_dates_pass_without_clock() {
        let far_future = NaiveDate::from_ymd_opt(3000, 1, 1).unwrap();
        let body = Body::new("Joe", Gender::Male).with_born(far_future);
        assert!(validate_body(&body, None).is_ok());
    }

    #[test]
    fn test_valid_grave() {
        assert!(validate_grave(&Grave::new(0, 0, 1)).is_ok());
        assert!(validate_grave(&Grave::new(3, 4, 12).with_note("family")).is_ok());
    }

    #[test]
    fn test_grave_rejects_negative_position() {
        assert_eq!(reason(validate_grave(&Grave::new(0, -1, 1))), "row is negative number");
        assert_eq!(reason(validate_grave(&Grave::new(-1, 0, 1))), "column is negative number");
    }

    #[test]
    fn test_grave_rejects_non_positive_capacity() {
        for capacity in [0, -1] {
            let result = validate_grave(&Grave::new(1, 1, capacity));
            assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
        }
    }
}

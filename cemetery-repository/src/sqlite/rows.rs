//! Typed mapping between table rows and entities.
//!
//! Business logic never reads columns directly; every query decodes into one
//! of these row structs and converts it here.
use cemetery_shared::types::{Body, Gender, Grave};
use chrono::NaiveDate;

use crate::errors::ManagerError;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BodyRow {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub born: Option<NaiveDate>,
    pub died: Option<NaiveDate>,
    pub vampire: bool,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct GraveRow {
    pub id: i64,
    pub position_column: i64,
    pub position_row: i64,
    pub capacity: i64,
    pub note: Option<String>,
}

impl TryFrom<BodyRow> for Body {
    type Error = ManagerError;

    fn try_from(row: BodyRow) -> Result<Self, Self::Error> {
        let gender = row
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()
            .map_err(|e| ManagerError::integrity(format!("body {}: {}", row.id, e)))?;
        Ok(Body {
            id: Some(row.id),
            name: Some(row.name),
            gender,
            born: row.born,
            died: row.died,
            vampire: row.vampire,
        })
    }
}

impl TryFrom<GraveRow> for Grave {
    type Error = ManagerError;

    fn try_from(row: GraveRow) -> Result<Self, Self::Error> {
        let narrow = |value: i64, column: &str| {
            i32::try_from(value).map_err(|_| {
                ManagerError::integrity(format!("grave {}: {} {} out of range", row.id, column, value))
            })
        };
        Ok(Grave {
            id: Some(row.id),
            column: narrow(row.position_column, "column")?,
            row: narrow(row.position_row, "row")?,
            capacity: narrow(row.capacity, "capacity")?,
            note: row.note,
        })
    }
}

pub(crate) fn bodies_from_rows(rows: Vec<BodyRow>) -> Result<Vec<Body>, ManagerError> {
    rows.into_iter().map(Body::try_from).collect()
}

pub(crate) fn graves_from_rows(rows: Vec<GraveRow>) -> Result<Vec<Grave>, ManagerError> {
    rows.into_iter().map(Grave::try_from).collect()
}

/// Reduces the result of a point lookup to at most one row. More than one row
/// means the store's own integrity is broken.
pub(crate) fn at_most_one<T>(mut rows: Vec<T>, what: &str) -> Result<Option<T>, ManagerError> {
    match rows.len() {
        0 | 1 => Ok(rows.pop()),
        n => Err(ManagerError::integrity(format!("{} rows found for {}", n, what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn body_row(gender: Option<&str>) -> BodyRow {
        BodyRow {
            id: 4,
            name: "Joe".to_string(),
            gender: gender.map(str::to_string),
            born: NaiveDate::from_ymd_opt(1962, 10, 21),
            died: None,
            vampire: true,
        }
    }

    #[test]
    fn test_body_row_mapping() {
        let body = Body::try_from(body_row(Some("MALE"))).unwrap();
        assert_eq!(body.id, Some(4));
        assert_eq!(body.name.as_deref(), Some("Joe"));
        assert_eq!(body.gender, Some(Gender::Male));
        assert_eq!(body.born, NaiveDate::from_ymd_opt(1962, 10, 21));
        assert!(body.vampire);
    }

    #[test]
    fn test_body_row_with_unknown_gender() {
        let err = Body::try_from(body_row(Some("UNKNOWN"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceFailure);
    }

    #[test]
    fn test_grave_row_out_of_range() {
        let row = GraveRow {
            id: 1,
            position_column: 0,
            position_row: i64::from(i32::MAX) + 1,
            capacity: 1,
            note: None,
        };
        let err = Grave::try_from(row).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceFailure);
    }

    #[test]
    fn test_at_most_one() {
        assert_eq!(at_most_one(Vec::<i32>::new(), "grave 1").unwrap(), None);
        assert_eq!(at_most_one(vec![1], "grave 1").unwrap(), Some(1));
        let err = at_most_one(vec![1, 2], "grave 1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Service failure: Internal integrity error: 2 rows found for grave 1"
        );
    }
}

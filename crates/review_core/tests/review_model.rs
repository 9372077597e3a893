use review_core::{Employee, Review, ReviewValidationError, MIN_REVIEW_YEAR};

fn resolved_employee() -> Employee {
    Employee::resolved(1, "Kai", "Designer")
}

#[test]
fn new_review_is_unsaved_with_given_fields() {
    let review = Review::new(2023, "Great performance", resolved_employee()).unwrap();

    assert_eq!(review.id(), None);
    assert!(!review.is_persisted());
    assert_eq!(review.year(), 2023);
    assert_eq!(review.summary(), "Great performance");
    assert_eq!(review.employee().id, Some(1));
    assert_eq!(review.employee_id(), 1);
}

#[test]
fn years_before_minimum_are_rejected() {
    for year in [i64::MIN, -1, 0, 1999] {
        let err = Review::new(year, "summary", resolved_employee()).unwrap_err();
        assert_eq!(err, ReviewValidationError::InvalidYear(year));
        assert_eq!(
            err.to_string(),
            "Year must be an integer greater than or equal to 2000"
        );
    }
}

#[test]
fn years_from_minimum_are_accepted() {
    for year in [MIN_REVIEW_YEAR, 2001, 2024, 9999] {
        let review = Review::new(year, "summary", resolved_employee()).unwrap();
        assert_eq!(review.year(), year);
    }
}

#[test]
fn empty_summary_is_rejected() {
    let err = Review::new(2023, "", resolved_employee()).unwrap_err();
    assert_eq!(err, ReviewValidationError::EmptySummary);
    assert_eq!(err.to_string(), "Summary must be a non-empty string");
}

#[test]
fn any_non_empty_summary_is_accepted() {
    for summary in ["x", " ", "Needs improvement on deadlines", "优秀"] {
        let review = Review::new(2023, summary, resolved_employee()).unwrap();
        assert_eq!(review.summary(), summary);
    }
}

#[test]
fn unsaved_employee_is_rejected() {
    let err = Review::new(2023, "summary", Employee::new("Kai", "Designer")).unwrap_err();
    assert_eq!(err, ReviewValidationError::UnresolvedEmployee);
    assert_eq!(
        err.to_string(),
        "Employee must be an instance of Employee class"
    );
}

#[test]
fn failed_setters_keep_previous_values() {
    let mut review = Review::new(2021, "Initial", resolved_employee()).unwrap();

    assert!(review.set_year(1980).is_err());
    assert!(review.set_summary("").is_err());
    assert!(review.set_employee(Employee::new("Ghost", "None")).is_err());

    assert_eq!(review.year(), 2021);
    assert_eq!(review.summary(), "Initial");
    assert_eq!(review.employee().id, Some(1));
}

#[test]
fn successful_setters_apply_values() {
    let mut review = Review::new(2021, "Initial", resolved_employee()).unwrap();

    review.set_year(2022).unwrap();
    review.set_summary("Revised").unwrap();
    review
        .set_employee(Employee::resolved(2, "Noor", "Manager"))
        .unwrap();

    assert_eq!(review.year(), 2022);
    assert_eq!(review.summary(), "Revised");
    assert_eq!(review.employee_id(), 2);
}

#[test]
fn review_serializes_with_nested_employee() {
    let review = Review::new(2023, "Shipped on time", resolved_employee()).unwrap();

    let json = serde_json::to_value(&review).unwrap();
    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["year"], 2023);
    assert_eq!(json["summary"], "Shipped on time");
    assert_eq!(json["employee"]["id"], 1);
    assert_eq!(json["employee"]["job_title"], "Designer");
}

use staffmap_core::{
    open_db_in_memory, DepartmentId, DepartmentLookup, DepartmentMapper, Employee, RepoError,
    RepoResult, ValidationError,
};
use std::cell::Cell;
use std::collections::HashSet;

/// In-memory department lookup that counts how often it is consulted.
struct KnownDepartments {
    ids: HashSet<DepartmentId>,
    calls: Cell<usize>,
}

impl KnownDepartments {
    fn with(ids: &[DepartmentId]) -> Self {
        Self {
            ids: ids.iter().copied().collect(),
            calls: Cell::new(0),
        }
    }
}

impl DepartmentLookup for KnownDepartments {
    fn department_exists(&self, id: DepartmentId) -> RepoResult<bool> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.ids.contains(&id))
    }
}

#[test]
fn construction_trims_name_and_job_title() {
    let departments = KnownDepartments::with(&[1]);

    let employee = Employee::new(&departments, "  Ada \n", "\tEngineer ", 1).unwrap();

    assert_eq!(employee.id(), None);
    assert_eq!(employee.name(), "Ada");
    assert_eq!(employee.job_title(), "Engineer");
    assert_eq!(employee.department_id(), 1);
}

#[test]
fn blank_name_or_job_title_is_rejected_with_fixed_message() {
    let departments = KnownDepartments::with(&[1]);

    for blank in ["", "   ", "\t\n"] {
        let err = Employee::new(&departments, blank, "Engineer", 1).unwrap_err();
        assert!(matches!(err, RepoError::Validation(ValidationError::Name)));
        assert_eq!(err.to_string(), "Name must be a non-empty string.");

        let err = Employee::new(&departments, "Ada", blank, 1).unwrap_err();
        assert!(matches!(err, RepoError::Validation(ValidationError::JobTitle)));
        assert_eq!(err.to_string(), "Job title must be a non-empty string.");
    }
}

#[test]
fn unknown_department_is_rejected() {
    let departments = KnownDepartments::with(&[1]);

    let err = Employee::new(&departments, "Ada", "Engineer", 2).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::DepartmentId)
    ));
    assert_eq!(
        err.to_string(),
        "department_id must be an integer that references a valid Department."
    );
}

#[test]
fn fields_are_validated_in_order_before_department_lookup() {
    let departments = KnownDepartments::with(&[]);

    let err = Employee::new(&departments, " ", "Engineer", 9).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::Name)));
    assert_eq!(departments.calls.get(), 0);
}

#[test]
fn setters_keep_previous_value_on_rejection() {
    let departments = KnownDepartments::with(&[1, 2]);
    let mut employee = Employee::new(&departments, "Ada", "Engineer", 1).unwrap();

    assert_eq!(employee.set_name("  "), Err(ValidationError::Name));
    assert_eq!(employee.name(), "Ada");

    assert_eq!(employee.set_job_title(""), Err(ValidationError::JobTitle));
    assert_eq!(employee.job_title(), "Engineer");

    let err = employee.set_department_id(&departments, 3).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::DepartmentId)
    ));
    assert_eq!(employee.department_id(), 1);

    employee.set_department_id(&departments, 2).unwrap();
    employee.set_job_title(" Lead Engineer ").unwrap();
    assert_eq!(employee.department_id(), 2);
    assert_eq!(employee.job_title(), "Lead Engineer");
}

#[test]
fn department_lookup_checks_existence_at_assignment_time() {
    let conn = open_db_in_memory().unwrap();
    let mut departments = DepartmentMapper::new(&conn);
    departments.create_table().unwrap();
    let research = departments.create("Research", "Building A").unwrap();
    let research_id = research.borrow().id().unwrap();

    let mut employee = Employee::new(&departments, "Ada", "Engineer", research_id).unwrap();

    departments.delete(&research).unwrap();

    assert_eq!(employee.department_id(), research_id);
    assert!(employee.set_department_id(&departments, research_id).is_err());
}

#[test]
fn lookup_storage_failure_is_not_a_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let departments = DepartmentMapper::new(&conn);

    let err = Employee::new(&departments, "Ada", "Engineer", 1).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn display_matches_record_shape() {
    let departments = KnownDepartments::with(&[3]);

    let unsaved = Employee::new(&departments, "Ada", "Engineer", 3).unwrap();
    assert_eq!(
        unsaved.to_string(),
        "<Employee None: Ada, Engineer, Department ID: 3>"
    );

    let saved = Employee::with_id(&departments, Some(12), "Ada", "Engineer", 3).unwrap();
    assert_eq!(
        saved.to_string(),
        "<Employee 12: Ada, Engineer, Department ID: 3>"
    );
}

#[test]
fn serialization_uses_expected_fields() {
    let departments = KnownDepartments::with(&[3]);
    let employee = Employee::with_id(&departments, Some(12), "Ada", "Engineer", 3).unwrap();

    let json = serde_json::to_value(&employee).unwrap();
    assert_eq!(json["id"], 12);
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["job_title"], "Engineer");
    assert_eq!(json["department_id"], 3);
}

//! Conversion from backend records to service employees.

use crate::domain::ports::EmployeeRecord;
use crate::domain::{Employee, EmployeeId};

impl From<EmployeeRecord> for Employee {
    fn from(record: EmployeeRecord) -> Self {
        let EmployeeRecord {
            id,
            name,
            salary,
            age,
            title,
            email,
        } = record;
        Employee::new(EmployeeId::from_uuid(id), name, salary, age, title, email)
    }
}

/// Map a backend collection, preserving backend order.
pub fn map_records(records: Vec<EmployeeRecord>) -> Vec<Employee> {
    records.into_iter().map(Employee::from).collect()
}

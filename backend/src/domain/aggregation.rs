//! Salary aggregates over the cached employee collection.

use crate::domain::{Employee, Error};

/// Number of names returned by [`top_ten_by_salary`].
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Highest salary in `employees`.
///
/// # Examples
/// ```
/// use employee_api::domain::{Employee, EmployeeId, highest_salary};
///
/// let staff = [
///     Employee::new(EmployeeId::random(), "a", 100, 30, "t", "a@x"),
///     Employee::new(EmployeeId::random(), "b", 200, 30, "t", "b@x"),
/// ];
/// assert_eq!(highest_salary(&staff).unwrap(), 200);
/// ```
pub fn highest_salary(employees: &[Employee]) -> Result<u32, Error> {
    employees
        .iter()
        .map(Employee::salary)
        .max()
        .ok_or_else(|| {
            Error::no_employees_found("Unable to calculate highest salary as no employees found")
        })
}

/// Names of the best-paid employees, highest salary first.
///
/// The sort is stable: employees with equal salaries keep the order the
/// backend returned them in.
pub fn top_ten_by_salary(employees: &[Employee]) -> Result<Vec<String>, Error> {
    if employees.is_empty() {
        return Err(Error::employee_not_found(
            "Unable to calculate top 10 highest salaries as no employees found",
        ));
    }
    let mut ranked: Vec<&Employee> = employees.iter().collect();
    ranked.sort_by(|a, b| b.salary().cmp(&a.salary()));
    Ok(ranked
        .into_iter()
        .take(TOP_EARNERS_LIMIT)
        .map(|employee| employee.name().to_owned())
        .collect())
}

//! Derived views over a fetched employee list.

use std::cmp::Reverse;

use crate::employee::types::Employee;

/// Highest salary in the list, if any.
pub fn highest_salary(employees: &[Employee]) -> Option<i32> {
    employees.iter().map(|e| e.salary).max()
}

/// The `n` best paid employees, highest first. Equal salaries keep list order.
pub fn top_by_salary(mut employees: Vec<Employee>, n: usize) -> Vec<Employee> {
    // sort_by_key is stable
    employees.sort_by_key(|e| Reverse(e.salary));
    employees.truncate(n);
    employees
}

/// Employees whose name contains `query` (case-sensitive).
pub fn filter_by_name(employees: Vec<Employee>, query: &str) -> Vec<Employee> {
    employees
        .into_iter()
        .filter(|e| e.name.contains(query))
        .collect()
}

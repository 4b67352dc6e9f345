//! Dashboard and per-department statistics.
//!
//! Departments are grouped by their stored value and reported in the order
//! they first appear in the input.  Callers pass records in store order
//! (newest first), so the breakdown follows that order too.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Employee;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: usize,
    pub total_departments: usize,
    pub average_salary: f64,
    pub department_breakdown: Vec<DepartmentSummary>,
}

/// One row of the dashboard breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub department: String,
    pub count: usize,
    pub avg_salary: f64,
}

/// Compute dashboard statistics.  `average_salary` is 0 for an empty set.
pub fn aggregate(records: &[Employee]) -> DashboardStats {
    let groups = group_by_department(records);

    let total: f64 = records.iter().map(|e| e.salary).sum();
    let average_salary = if records.is_empty() {
        0.0
    } else {
        total / records.len() as f64
    };

    DashboardStats {
        total_employees: records.len(),
        total_departments: groups.len(),
        average_salary,
        department_breakdown: groups
            .into_iter()
            .map(|(department, members)| DepartmentSummary {
                department: department.to_owned(),
                count: members.len(),
                avg_salary: mean_salary(&members),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Department page
// ---------------------------------------------------------------------------

/// Full statistics for one department, including its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStats {
    pub name: String,
    pub employee_count: usize,
    pub average_salary: f64,
    pub total_salary: f64,
    pub employees: Vec<Employee>,
}

/// Ordering for the department listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentSort {
    /// Alphabetical by name, ignoring case.
    #[default]
    Name,
    /// Largest head-count first.
    Employees,
    /// Highest average salary first.
    Salary,
    /// Highest total payroll first.
    Total,
}

impl std::str::FromStr for DepartmentSort {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name"      => Ok(Self::Name),
            "employees" => Ok(Self::Employees),
            "salary"    => Ok(Self::Salary),
            "total"     => Ok(Self::Total),
            other       => Err(format!("unknown department sort: {other}")),
        }
    }
}

/// Group records into per-department statistics, first-occurrence order.
pub fn department_stats(records: &[Employee]) -> Vec<DepartmentStats> {
    group_by_department(records)
        .into_iter()
        .map(|(name, members)| DepartmentStats {
            name: name.to_owned(),
            employee_count: members.len(),
            average_salary: mean_salary(&members),
            total_salary: members.iter().map(|e| e.salary).sum(),
            employees: members.into_iter().cloned().collect(),
        })
        .collect()
}

/// Keep departments whose name contains `term`, ignoring case.
pub fn filter_departments(stats: Vec<DepartmentStats>, term: &str) -> Vec<DepartmentStats> {
    if term.is_empty() {
        return stats;
    }
    let needle = term.to_lowercase();
    stats
        .into_iter()
        .filter(|d| d.name.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort of the department listing.
pub fn sort_departments(stats: &mut [DepartmentStats], by: DepartmentSort) {
    match by {
        DepartmentSort::Name      => stats.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
        DepartmentSort::Employees => stats.sort_by(|a, b| b.employee_count.cmp(&a.employee_count)),
        DepartmentSort::Salary    => stats.sort_by(|a, b| b.average_salary.total_cmp(&a.average_salary)),
        DepartmentSort::Total     => stats.sort_by(|a, b| b.total_salary.total_cmp(&a.total_salary)),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn group_by_department(records: &[Employee]) -> Vec<(&str, Vec<&Employee>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Employee>)> = Vec::new();

    for employee in records {
        let dept = employee.department.as_str();
        match index.get(dept) {
            Some(&i) => groups[i].1.push(employee),
            None => {
                index.insert(dept, groups.len());
                groups.push((dept, vec![employee]));
            }
        }
    }

    groups
}

/// Groups are never empty, so the division is always defined.
fn mean_salary(members: &[&Employee]) -> f64 {
    members.iter().map(|e| e.salary).sum::<f64>() / members.len() as f64
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeInput;
    use chrono::Utc;

    fn employee(id: i64, department: &str, salary: f64) -> Employee {
        Employee::from_input(
            id,
            EmployeeInput {
                name: format!("Employee {id}"),
                email: format!("e{id}@example.com"),
                position: "Staff".into(),
                department: department.into(),
                salary,
            },
            Utc::now(),
        )
    }

    #[test]
    fn empty_set_aggregates_to_zero() {
        assert_eq!(
            aggregate(&[]),
            DashboardStats {
                total_employees: 0,
                total_departments: 0,
                average_salary: 0.0,
                department_breakdown: vec![],
            }
        );
    }

    #[test]
    fn breakdown_follows_first_occurrence() {
        let records = vec![
            employee(1, "engineering", 100.0),
            employee(2, "engineering", 200.0),
            employee(3, "design", 300.0),
        ];

        let stats = aggregate(&records);
        assert_eq!(stats.total_employees, 3);
        assert_eq!(stats.total_departments, 2);
        assert_eq!(stats.average_salary, 200.0);
        assert_eq!(
            stats.department_breakdown,
            vec![
                DepartmentSummary { department: "engineering".into(), count: 2, avg_salary: 150.0 },
                DepartmentSummary { department: "design".into(), count: 1, avg_salary: 300.0 },
            ]
        );
    }

    #[test]
    fn dashboard_serializes_in_camel_case() {
        let value = serde_json::to_value(aggregate(&[employee(1, "sales", 10.0)])).unwrap();
        assert_eq!(value["totalEmployees"], 1);
        assert_eq!(value["departmentBreakdown"][0]["avgSalary"], 10.0);
    }

    #[test]
    fn department_stats_carry_totals_and_members() {
        let records = vec![
            employee(1, "sales", 100.0),
            employee(2, "design", 400.0),
            employee(3, "sales", 300.0),
        ];

        let stats = department_stats(&records);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "sales");
        assert_eq!(stats[0].employee_count, 2);
        assert_eq!(stats[0].total_salary, 400.0);
        assert_eq!(stats[0].average_salary, 200.0);
        assert_eq!(stats[0].employees.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn departments_sort_and_filter() {
        let records = vec![
            employee(1, "sales", 100.0),
            employee(2, "design", 900.0),
            employee(3, "sales", 300.0),
            employee(4, "engineering", 500.0),
        ];
        let names = |s: &[DepartmentStats]| s.iter().map(|d| d.name.clone()).collect::<Vec<_>>();

        let mut stats = department_stats(&records);
        sort_departments(&mut stats, DepartmentSort::Name);
        assert_eq!(names(&stats), vec!["design", "engineering", "sales"]);

        sort_departments(&mut stats, DepartmentSort::Employees);
        assert_eq!(names(&stats)[0], "sales");

        sort_departments(&mut stats, DepartmentSort::Salary);
        assert_eq!(names(&stats), vec!["design", "engineering", "sales"]);

        sort_departments(&mut stats, DepartmentSort::Total);
        assert_eq!(names(&stats), vec!["design", "engineering", "sales"]);

        let filtered = filter_departments(department_stats(&records), "SIGN");
        assert_eq!(names(&filtered), vec!["design"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let records = vec![
            employee(1, "sales", 1.0),
            employee(2, "Design", 1.0),
            employee(3, "engineering", 1.0),
            employee(4, "design", 1.0),
        ];
        let mut stats = department_stats(&records);
        sort_departments(&mut stats, DepartmentSort::Name);
        let names: Vec<&str> = stats.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Design", "design", "engineering", "sales"]);
    }

    #[test]
    fn unknown_sort_key_is_an_error() {
        assert_eq!("total".parse::<DepartmentSort>(), Ok(DepartmentSort::Total));
        assert!("salary-desc".parse::<DepartmentSort>().is_err());
    }
}

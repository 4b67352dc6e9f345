//! Case-insensitive substring search over employee records.

use crate::models::Employee;

/// Which fields a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFields {
    pub name: bool,
    pub email: bool,
    pub position: bool,
    pub department: bool,
}

impl SearchFields {
    /// Name, email, position and department.
    pub const ALL: Self = Self { name: true, email: true, position: true, department: true };

    /// Name, email and position only.
    pub const CONTACT: Self = Self { department: false, ..Self::ALL };
}

impl Default for SearchFields {
    fn default() -> Self {
        Self::ALL
    }
}

/// Filter `records` to those matching `term` in any searchable field.
///
/// An empty term returns every record.  Input order is preserved.
pub fn search<'a>(records: &'a [Employee], term: &str) -> Vec<&'a Employee> {
    search_fields(records, term, SearchFields::ALL)
}

/// Like [`search`], restricted to the given fields.
pub fn search_fields<'a>(
    records: &'a [Employee],
    term: &str,
    fields: SearchFields,
) -> Vec<&'a Employee> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    let hit = |value: &str| value.to_lowercase().contains(&needle);

    records
        .iter()
        .filter(|e| {
            (fields.name && hit(&e.name))
                || (fields.email && hit(&e.email))
                || (fields.position && hit(&e.position))
                || (fields.department && hit(&e.department))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeInput;
    use chrono::Utc;

    fn employee(id: i64, name: &str, email: &str, position: &str, department: &str) -> Employee {
        Employee::from_input(
            id,
            EmployeeInput {
                name: name.into(),
                email: email.into(),
                position: position.into(),
                department: department.into(),
                salary: 50_000.0,
            },
            Utc::now(),
        )
    }

    fn staff() -> Vec<Employee> {
        vec![
            employee(1, "Chaitanya Karmalkar", "karmalkarchaitanya@gmail.com", "Software Engineer", "engineering"),
            employee(2, "Pranav Sawant", "pranav@gmail.com", "Product Manager", "product"),
            employee(3, "Rahul Bale", "rahul@gmail.com", "Designer", "design"),
        ]
    }

    fn ids(found: Vec<&Employee>) -> Vec<i64> {
        found.into_iter().map(|e| e.id).collect()
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let records = staff();
        assert_eq!(ids(search(&records, "")), vec![1, 2, 3]);
    }

    #[test]
    fn matches_each_field() {
        let records = staff();
        assert_eq!(ids(search(&records, "Chaitanya")), vec![1]);
        assert_eq!(ids(search(&records, "pranav@")), vec![2]);
        assert_eq!(ids(search(&records, "manager")), vec![2]);
        assert_eq!(ids(search(&records, "engineering")), vec![1]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let records = staff();
        assert_eq!(ids(search(&records, "SOFTWARE")), vec![1]);
        assert_eq!(ids(search(&records, "GMAIL")), vec![1, 2, 3]);
    }

    #[test]
    fn no_match_returns_empty() {
        let records = staff();
        assert!(search(&records, "nonexistent").is_empty());
    }

    #[test]
    fn contact_fields_skip_department() {
        let records = staff();
        // "design" appears in Rahul's department and in his "Designer" position.
        assert_eq!(ids(search_fields(&records, "design", SearchFields::CONTACT)), vec![3]);
        assert!(search_fields(&records, "engineering", SearchFields::CONTACT).is_empty());
    }
}

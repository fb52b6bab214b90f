use super::{CsvTable, ImportOutcome, RowOutcome, finish};
use crate::errors::AppResult;
use crate::models::domain::DomainData;
use crate::models::employee::Employee;
use std::collections::HashSet;
use std::io::Read;

/// Roster rows. Emails already on the roster, or repeated in the file,
/// are skipped.
pub fn parse_members<R: Read>(input: R, data: &DomainData) -> AppResult<ImportOutcome<Employee>> {
    let table = CsvTable::read(input)?;
    table.require_headers(&["First Name", "Last Name", "Email", "Position"])?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut outcomes = Vec::new();

    for (line, record) in &table.rows {
        let first = table.value(record, "First Name");
        let last = table.value(record, "Last Name");
        let email = table.value(record, "Email").to_lowercase();

        if first.is_empty() || last.is_empty() {
            outcomes.push(RowOutcome::skip(*line, "first and last name are required"));
            continue;
        }
        if !email.contains('@') {
            outcomes.push(RowOutcome::skip(*line, format!("invalid email '{email}'")));
            continue;
        }
        if data.employee_by_email(&email).is_some() || !seen.insert(email.clone()) {
            outcomes.push(RowOutcome::skip(*line, format!("duplicate email '{email}'")));
            continue;
        }

        let mut employee = Employee::new(
            0,
            first,
            last,
            &email,
            table.value(record, "Position"),
            table.value(record, "Group"),
        );
        let middle = table.value(record, "Middle Name");
        if !middle.is_empty() {
            employee.middle_name = Some(middle.to_string());
        }

        outcomes.push(RowOutcome::Parsed(employee));
    }

    finish("members", outcomes)
}

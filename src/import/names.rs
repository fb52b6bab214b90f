use crate::models::employee::Employee;

fn squash(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolve a name as written in a CSV cell.
///
/// Tries "First [Middle] Last" (or "First Last") exactly, ignoring case,
/// then "Last, First" where the given first name may be a prefix of the
/// employee's first name (or carry a trailing middle name).
pub fn find_employee_by_name<'a>(employees: &'a [Employee], name: &str) -> Option<&'a Employee> {
    let wanted = squash(name);
    if wanted.is_empty() {
        return None;
    }

    let exact = employees.iter().find(|e| {
        squash(&e.full_name()) == wanted
            || squash(&format!("{} {}", e.first_name, e.last_name)) == wanted
    });
    if exact.is_some() {
        return exact;
    }

    let (last, first) = wanted.split_once(',')?;
    let (last, first) = (last.trim(), first.trim());
    if last.is_empty() || first.is_empty() {
        return None;
    }

    employees.iter().find(|e| {
        let e_first = squash(&e.first_name);
        squash(&e.last_name) == last
            && (e_first.starts_with(first) || first.starts_with(&format!("{e_first} ")))
    })
}

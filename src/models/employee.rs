use serde::{Deserialize, Serialize};

/// Per-employee visibility switches, persisted as a JSON text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    #[serde(default = "yes")]
    pub show_in_schedule: bool,
    #[serde(default = "yes")]
    pub show_in_reports: bool,
}

fn yes() -> bool {
    true
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            show_in_schedule: true,
            show_in_reports: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub group: String,
    pub visibility: Visibility,
    pub active: bool,
}

impl Employee {
    pub fn new(
        id: i64,
        first_name: &str,
        last_name: &str,
        email: &str,
        position: &str,
        group: &str,
    ) -> Self {
        Self {
            id,
            first_name: first_name.trim().to_string(),
            middle_name: None,
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            position: position.trim().to_string(),
            group: group.trim().to_string(),
            visibility: Visibility::default(),
            active: true,
        }
    }

    /// "First [Middle] Last"
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => {
                format!("{} {} {}", self.first_name, m, self.last_name)
            }
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// "Last, First" as used by most roster exports.
    pub fn sort_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    pub fn in_group(&self, group: Option<&str>) -> bool {
        match group {
            None => true,
            Some(g) => self.group.eq_ignore_ascii_case(g.trim()),
        }
    }
}

pub mod allowance;
pub mod domain;
pub mod employee;
pub mod holiday;
pub mod leave;
pub mod report_kind;
pub mod report_template;
pub mod shift;
pub mod tardy;
pub mod task;

use rust_xlsxwriter::Workbook;
use shiftdesk::core::schedule::{ScheduleLogic, ShiftSpec};
use shiftdesk::errors::AppError;
use shiftdesk::export::ReportFormat;
use shiftdesk::models::report_kind::ReportKind;
use shiftdesk::report::generate::{generate_report, output_file_name};
use shiftdesk::report::package::XlsxPackage;
use shiftdesk::report::tokens::ReportContext;

mod common;
use common::{d, sample_data, t, test_config};

fn ctx(kind: ReportKind) -> ReportContext<'static> {
    ReportContext {
        kind,
        start: d("2025-03-03"),
        end: d("2025-03-04"),
        group: None,
        generated_on: d("2025-03-31"),
    }
}

fn jane_only() -> shiftdesk::models::domain::DomainData {
    let mut data = sample_data();
    data.employees.retain(|e| e.id == 1);
    let shift = ShiftSpec::Regular {
        start: t("09:00"),
        end: t("18:00"),
        break_start: Some(t("13:00")),
        break_end: Some(t("14:00")),
        remote: false,
    };
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-03"), shift).unwrap();
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-04"), shift).unwrap();
    data
}

fn simple_template() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "{{company}} / {{group}}").unwrap();
    sheet.write_string(1, 0, "{{employee_name}}").unwrap();
    sheet.write_string(1, 1, "{{date}}").unwrap();
    sheet.write_string(1, 2, "{{schedule_start}}-{{schedule_end}}").unwrap();
    sheet.write_string(2, 0, "End of report").unwrap();
    workbook.save_to_buffer().unwrap()
}

#[test]
fn file_names_carry_kind_and_period() {
    assert_eq!(
        output_file_name(&ctx(ReportKind::Attendance), ReportFormat::Pdf),
        "attendance_2025-03-03_2025-03-04.pdf"
    );
}

#[test]
fn template_report_has_one_row_per_day() {
    let data = jane_only();
    let template = simple_template();
    let out = generate_report(
        &data,
        &test_config(),
        &ctx(ReportKind::WorkSchedule),
        Some(template.as_slice()),
        ReportFormat::Xlsx,
    )
    .unwrap();

    assert_eq!(out.rows, 2);
    assert_eq!(out.file_name, "work-schedule_2025-03-03_2025-03-04.xlsx");

    let pkg = XlsxPackage::read(&out.bytes).unwrap();
    assert_eq!(pkg.sheet.text_at(1, 0), Some("My Company / All"));
    assert_eq!(pkg.sheet.row_texts(2), vec!["JANE DOE", "2025-03-03", "09:00-18:00"]);
    assert_eq!(pkg.sheet.row_texts(3), vec!["JANE DOE", "2025-03-04", "09:00-18:00"]);
    assert_eq!(pkg.sheet.text_at(4, 0), Some("End of report"));
}

#[test]
fn builtin_xlsx_lists_every_row() {
    let data = jane_only();
    let out = generate_report(
        &data,
        &test_config(),
        &ctx(ReportKind::WorkSchedule),
        None,
        ReportFormat::Xlsx,
    )
    .unwrap();

    let pkg = XlsxPackage::read(&out.bytes).unwrap();
    assert!(pkg.sheet.contains_text("JANE DOE"));
    assert!(pkg.sheet.contains_text("Break Start"));
}

#[test]
fn builtin_pdf_is_a_pdf() {
    let data = jane_only();
    let out = generate_report(
        &data,
        &test_config(),
        &ctx(ReportKind::Overtime),
        None,
        ReportFormat::Pdf,
    )
    .unwrap();

    assert!(out.bytes.starts_with(b"%PDF"));
    assert!(out.file_name.ends_with(".pdf"));
}

#[test]
fn templates_cannot_render_to_pdf() {
    let data = jane_only();
    let template = simple_template();
    let err = generate_report(
        &data,
        &test_config(),
        &ctx(ReportKind::WorkSchedule),
        Some(template.as_slice()),
        ReportFormat::Pdf,
    )
    .err()
    .unwrap();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn wfh_template_is_filled_as_a_grid() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "WFH {{month}} {{year}}").unwrap();
    sheet.write_string(1, 1, "{{date_0}}").unwrap();
    sheet.write_string(1, 2, "{{date_1}}").unwrap();
    sheet.write_string(2, 0, "{{employee_0}}").unwrap();
    sheet.write_string(2, 1, "{{schedule_0_0}}").unwrap();
    sheet.write_string(2, 2, "{{schedule_0_1}}").unwrap();
    let template = workbook.save_to_buffer().unwrap();

    let data = jane_only();
    let out = generate_report(
        &data,
        &test_config(),
        &ctx(ReportKind::Wfh),
        Some(template.as_slice()),
        ReportFormat::Xlsx,
    )
    .unwrap();

    let pkg = XlsxPackage::read(&out.bytes).unwrap();
    assert_eq!(pkg.sheet.text_at(1, 0), Some("WFH March 2025"));
    assert_eq!(pkg.sheet.row_texts(2), vec!["2025-03-03", "2025-03-04"]);
    assert_eq!(pkg.sheet.row_texts(3), vec!["JANE DOE", "09:00-18:00", "09:00-18:00"]);
}

#[test]
fn template_without_anchor_fails() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet().write_string(0, 0, "{{company}}").unwrap();
    let template = workbook.save_to_buffer().unwrap();

    let err = generate_report(
        &jane_only(),
        &test_config(),
        &ctx(ReportKind::Attendance),
        Some(template.as_slice()),
        ReportFormat::Xlsx,
    )
    .err()
    .unwrap();
    assert!(matches!(err, AppError::TemplateAnchorMissing { .. }));
}

#[test]
fn unusable_date_format_is_an_error() {
    let data = jane_only();
    let mut cfg = test_config();

    for bad in ["%Y-%Q", "%d %H:%M"] {
        cfg.report_date_format = bad.to_string();
        let result = generate_report(&data, &cfg, &ctx(ReportKind::WorkSchedule), None, ReportFormat::Xlsx);
        assert!(matches!(result, Err(AppError::Config(_))), "{bad}");
    }
}

#[test]
fn config_file_with_unusable_date_format_is_rejected() {
    let dir = common::temp_dir("bad_date_format");
    let path = dir.join("shiftdesk.conf");
    std::fs::write(&path, "database: \":memory:\"\nreport_date_format: \"%Y-%Q\"\n").unwrap();

    let err = shiftdesk::config::Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("report_date_format"));

    std::fs::write(&path, "database: \":memory:\"\nreport_date_format: \"%d/%m/%Y\"\n").unwrap();
    let cfg = shiftdesk::config::Config::load_from(&path).unwrap();
    assert_eq!(cfg.report_date_format, "%d/%m/%Y");
}

#[test]
fn builtin_pdf_encodes_latin_text_as_win_ansi() {
    let data = jane_only();
    let mut cfg = test_config();
    cfg.company_name = "Café Ñandú".to_string();

    let out = generate_report(&data, &cfg, &ctx(ReportKind::WorkSchedule), None, ReportFormat::Pdf).unwrap();

    let contains = |needle: &[u8]| out.bytes.windows(needle.len()).any(|w| w == needle);
    assert!(contains(b"WinAnsiEncoding"));
    // " · Café Ñandú" as a hex string of WinAnsi bytes
    assert!(contains(b"20B720436166E920D1616E64FA"));
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docbatch_core::{GrammaticalCase, PlaceholderDefinition, SourceType, TaskErrorKind};
use docbatch_docx::Template;
use docbatch_generate::{
    Coordinator, GenerationOptions, JobConfig, NoopObserver, RunState, read_sheet,
};

fn temp_out_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("docbatch_{label}_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_template(path: &Path, paragraph: &str) {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t xml:space="preserve">{paragraph}</w:t></w:r></w:p><w:sectPr/></w:body></w:document>"#
    );
    Template::from_document_xml(&xml)
        .package()
        .save(path)
        .expect("save template");
}

fn document_text(path: &Path) -> String {
    let template = Template::open(path).expect("open output");
    let bytes = template
        .package()
        .part("word/document.xml")
        .expect("document part");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

fn job(dir: &Path, spreadsheet: PathBuf) -> JobConfig {
    let template = dir.join("template.docx");
    write_template(&template, "Уважаемый {ФИО}, {дата} выдан документ.");
    JobConfig {
        spreadsheet,
        sheet: None,
        template,
        output_folder: dir.join("out"),
        filename_pattern: "{i:04d}{suffix}.docx".to_string(),
        filename_column: None,
        generation_date: Some("01.01.2025".to_string()),
        workers: 1,
        task_timeout_secs: 60,
        dropdowns: BTreeMap::new(),
        placeholders: vec![
            PlaceholderDefinition::new("ФИО", SourceType::ExcelColumn, "ФИО")
                .with_case(GrammaticalCase::Dative)
                .required(),
            PlaceholderDefinition::new("дата", SourceType::Date, ""),
        ],
    }
}

fn write_csv(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("people.csv");
    let mut writer = csv::Writer::from_path(&path).expect("csv writer");
    writer.write_record(["ФИО", "Отдел"]).expect("header");
    for row in rows {
        let (name, department) = row.split_once('|').unwrap_or((*row, ""));
        writer.write_record([name, department]).expect("record");
    }
    writer.flush().expect("flush");
    path
}

#[test]
fn dative_letter_end_to_end() {
    let dir = temp_out_dir("gen_e2e");
    let spreadsheet = write_csv(&dir, &["Иванов Иван|Бухгалтерия"]);
    let mut coordinator = Coordinator::new(job(&dir, spreadsheet), GenerationOptions::default());

    let report = coordinator.run(&mut NoopObserver).expect("run");

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.summary.processed, 1);
    let text = document_text(&dir.join("out").join("0001.docx"));
    assert!(text.contains("Уважаемый Иванову Ивану, 01.01.2025 выдан документ."));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn one_bad_row_does_not_stop_the_batch() {
    let dir = temp_out_dir("gen_partial");
    let spreadsheet = write_csv(
        &dir,
        &["Иванов Иван", "Петров Пётр", "Сидоров Сидор", "Козлов Олег", "Орлов Павел"],
    );
    let config = job(&dir, spreadsheet);
    // A directory squatting on row 3's output path makes that write fail.
    std::fs::create_dir_all(config.output_folder.join("0003.docx")).expect("blocker");
    let mut coordinator = Coordinator::new(config, GenerationOptions::default());

    let report = coordinator.run(&mut NoopObserver).expect("run");

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.summary.total, 5);
    assert_eq!(report.summary.processed, 4);
    assert_eq!(report.summary.errors.len(), 1);
    assert_eq!(report.summary.errors[0].row, 3);
    assert_eq!(report.summary.errors[0].kind, TaskErrorKind::Write);
    assert_eq!(
        report.summary.processed,
        report.summary.total - report.summary.errors.len()
    );
    assert!(dir.join("out").join("0005.docx").is_file());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn incomplete_rows_are_generated_with_suffix() {
    let dir = temp_out_dir("gen_incomplete");
    let spreadsheet = write_csv(&dir, &["Иванов Иван", "|Склад"]);
    let mut coordinator = Coordinator::new(job(&dir, spreadsheet), GenerationOptions::default());

    let report = coordinator.run(&mut NoopObserver).expect("run");

    assert_eq!(report.summary.processed, 2);
    assert_eq!(report.summary.with_empty, 1);
    assert!(report.results[1].is_incomplete);
    assert_eq!(report.results[1].filename.as_deref(), Some("0002_пусто.docx"));
    let text = document_text(&dir.join("out").join("0002_пусто.docx"));
    assert!(text.contains("Уважаемый , 01.01.2025"));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn filename_column_collisions_are_disambiguated() {
    let dir = temp_out_dir("gen_names");
    let spreadsheet = write_csv(
        &dir,
        &["Иванов Иван|Бухгалтерия", "Петров Пётр|бухгалтерия", "Орлов Павел|Склад"],
    );
    let mut config = job(&dir, spreadsheet);
    config.filename_column = Some("Отдел".to_string());
    config.filename_pattern = "{column}{suffix}.docx".to_string();
    let mut coordinator = Coordinator::new(config, GenerationOptions::default());

    let report = coordinator.run(&mut NoopObserver).expect("run");
    let names: Vec<&str> = report
        .results
        .iter()
        .filter_map(|result| result.filename.as_deref())
        .collect();

    assert_eq!(
        names,
        vec!["Бухгалтерия.docx", "бухгалтерия (2).docx", "Склад.docx"]
    );
    for name in names {
        assert!(dir.join("out").join(name).is_file());
    }

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn xlsx_cells_are_normalized() {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let dir = temp_out_dir("gen_xlsx");
    let path = dir.join("people.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Сотрудники").expect("sheet name");
    sheet.write_string(0, 0, "ФИО").expect("header");
    sheet.write_string(0, 1, "Дата приёма").expect("header");
    sheet.write_string(0, 2, "Табельный").expect("header");
    sheet.write_string(1, 0, "Петрова Анна").expect("cell");
    let date = ExcelDateTime::from_ymd(2024, 3, 5).expect("date");
    let date_format = Format::new().set_num_format("dd.mm.yyyy");
    sheet
        .write_datetime_with_format(1, 1, &date, &date_format)
        .expect("date cell");
    sheet.write_number(1, 2, 1042.0).expect("number");
    workbook.save(&path).expect("save workbook");

    let sheet = read_sheet(&path, Some("Сотрудники")).expect("read");
    assert_eq!(sheet.headers, vec!["ФИО", "Дата приёма", "Табельный"]);
    assert_eq!(sheet.rows.len(), 1);
    assert_eq!(sheet.rows[0].value("Дата приёма"), "05.03.2024");
    assert_eq!(sheet.rows[0].value("Табельный"), "1042");

    assert!(read_sheet(&path, Some("Лист2")).is_err());

    std::fs::remove_dir_all(dir).ok();
}

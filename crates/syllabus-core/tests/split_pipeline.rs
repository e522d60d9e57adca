//! Integration tests for the split pipeline
//!
//! Source DOCX -> three recipes -> three saved DOCX files

use std::fs;

use syllabus_core::{Conversion, SplitError, Titles, Variant};
use syllabus_ooxml::test_utils::{create_docx, paragraph, table};
use syllabus_ooxml::{has_page_break, Docx};
use tempfile::TempDir;

/// A syllabus following the faculty template, reduced to one block per part
fn syllabus_body() -> String {
    [
        // Pages 1-3
        paragraph("ФГБОУ ВО Университет"),
        paragraph("Лист согласования"),
        paragraph("Лист изменений"),
        // Page 4
        table(&[
            "Содержание (рабочая программа)",
            "1. Место дисциплины в структуре ОП",
            "6. Фонд оценочных средств по дисциплине",
        ]),
        paragraph("Рабочая программа по дисциплине"),
        // Page 5
        paragraph("Фонд оценочных средств"),
        paragraph("Паспорт фонда"),
        // Page 6 onwards
        paragraph("1. Место дисциплины в структуре образовательной программы"),
        table(&[
            "2. Планируемые результаты",
            "5. Содержание дисциплины",
            "6. Фонд оценочных средств по дисциплине",
            "6.1 Типовые контрольные задания",
        ]),
        paragraph("Разработчик: доцент кафедры"),
    ]
    .concat()
}

fn write_source(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, create_docx(&syllabus_body())).unwrap();
    path
}

fn texts(path: &std::path::Path) -> Vec<String> {
    Docx::open(path).unwrap().document().block_texts()
}

#[test]
fn test_split_writes_exactly_three_files() {
    let temp = TempDir::new().unwrap();
    let source = write_source(&temp, "Математика.docx");

    let written = Conversion::open(&source).unwrap().split().unwrap().save().unwrap();

    let out_dir = temp.path().join("dist").join("Математика");
    let mut names: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert_eq!(
        names,
        vec!["Annotation.docx", "Assessment Fund.docx", "Work Program.docx"]
    );
    assert_eq!(written.len(), 3);
    assert!(written.iter().all(|p| p.starts_with(&out_dir)));
}

#[test]
fn test_work_program_content() {
    let temp = TempDir::new().unwrap();
    let source = write_source(&temp, "course.docx");
    Conversion::open(&source).unwrap().split().unwrap().save().unwrap();

    let path = temp.path().join("dist/course/Work Program.docx");
    let texts = texts(&path);

    assert_eq!(texts[0], "Рабочая программа");
    assert!(texts[1].starts_with("Содержание (рабочая программа)"));
    assert_eq!(texts[2], "Рабочая программа по дисциплине");
    assert_eq!(
        texts[3],
        "1. Место дисциплины в структуре образовательной программы"
    );
    assert!(!texts.iter().any(|t| t == "Паспорт фонда"));
    assert!(texts.iter().any(|t| t.contains("6.1 Типовые контрольные задания")));
}

#[test]
fn test_annotation_content() {
    let temp = TempDir::new().unwrap();
    let source = write_source(&temp, "course.docx");
    Conversion::open(&source).unwrap().split().unwrap().save().unwrap();

    let texts = texts(&temp.path().join("dist/course/Annotation.docx"));

    assert_eq!(texts[0], "Аннотация рабочей программы");
    assert_eq!(
        texts[1],
        "1. Место дисциплины в структуре образовательной программы"
    );
    assert_eq!(texts[2], "2. Планируемые результаты5. Содержание дисциплины");
    assert_eq!(texts[3], "Разработчик: доцент кафедры");
}

#[test]
fn test_assessment_fund_content() {
    let temp = TempDir::new().unwrap();
    let source = write_source(&temp, "course.docx");
    Conversion::open(&source).unwrap().split().unwrap().save().unwrap();

    let docx = Docx::open(temp.path().join("dist/course/Assessment Fund.docx")).unwrap();
    let blocks = docx.document().blocks();
    let texts = docx.document().block_texts();

    assert!(has_page_break(&blocks[0]));
    assert_eq!(texts[0], "Фонд оценочных средств");
    assert_eq!(texts[1], "Фонд оценочных средств");
    assert_eq!(texts[2], "Паспорт фонда");
    assert_eq!(
        texts[3],
        "6. Фонд оценочных средств по дисциплине6.1 Типовые контрольные задания"
    );
}

#[test]
fn test_rerun_replaces_stale_output() {
    let temp = TempDir::new().unwrap();
    let source = write_source(&temp, "course.docx");
    let out_dir = temp.path().join("dist/course");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(out_dir.join("leftover.txt"), "stale").unwrap();

    let conversion = Conversion::open(&source).unwrap();
    conversion.split().unwrap().save().unwrap();
    conversion.split().unwrap().save().unwrap();

    assert!(!out_dir.join("leftover.txt").exists());
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 3);
}

#[test]
fn test_custom_titles_and_output_dir() {
    let temp = TempDir::new().unwrap();
    let source = write_source(&temp, "course.docx");
    let titles = Titles {
        work_program: "РПД".to_string(),
        ..Titles::default()
    };

    Conversion::open(&source)
        .unwrap()
        .with_titles(titles)
        .with_output_dir_name("out")
        .split()
        .unwrap()
        .save()
        .unwrap();

    let texts = texts(&temp.path().join("out/course/Work Program.docx"));
    assert_eq!(texts[0], "РПД");
    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_missing_section_is_reported_and_nothing_written() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("broken.docx");
    let body = [paragraph("Содержание (рабочая программа)"), paragraph("a"), paragraph("b")].concat();
    fs::write(&source, create_docx(&body)).unwrap();

    let err = Conversion::open(&source).unwrap().split().unwrap_err();

    match err {
        SplitError::Recipe { variant, step, .. } => {
            assert_eq!(variant, Variant::WorkProgram);
            assert_eq!(step, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_not_a_docx() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("notes.docx");
    fs::write(&source, "plain text").unwrap();

    let err = Conversion::open(&source).unwrap_err();
    assert!(matches!(err, SplitError::Ooxml(_)));
}

use chrono::Utc;
use transcript_core::{
    AmendGradeRequest, GradeRecord, GradeRepository, GradeService, GradeServiceError,
    GradeValidationError, Predikat, Transcript, SUBMIT_OK_MESSAGE,
};

fn grade(nim: &str, course: &str, letter: &str, credits: u32, attendance: f64) -> GradeRecord {
    GradeRecord {
        student_id: nim.to_string(),
        student_name: format!("Mahasiswa {nim}"),
        course_code: course.to_string(),
        course_name: format!("Mata Kuliah {course}"),
        credits,
        semester: 1,
        letter_grade: letter.to_string(),
        attendance,
    }
}

fn amend(letter: &str) -> AmendGradeRequest {
    AmendGradeRequest {
        new_letter: letter.to_string(),
        changed_by: "dosen-01".to_string(),
        reason: "koreksi nilai".to_string(),
    }
}

#[test]
fn low_attendance_is_rejected_for_every_letter() {
    let mut service = GradeService::in_memory();
    for letter in ["A", "B", "C", "D", "E", "X", ""] {
        for attendance in [0.0, 50.0, 74.0, 74.99] {
            let err = service
                .submit_grade(grade("S1", "CS101", letter, 3, attendance))
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    GradeServiceError::Validation(
                        GradeValidationError::AttendanceBelowMinimum { .. }
                    )
                ),
                "unexpected error for {letter}/{attendance}: {err}"
            );
        }
    }
    assert!(service.grades().is_empty());
}

#[test]
fn letters_outside_scale_are_rejected() {
    let mut service = GradeService::in_memory();
    for letter in ["F", "a", "A+", "AB", " B", ""] {
        let err = service
            .submit_grade(grade("S1", "CS101", letter, 3, 100.0))
            .unwrap_err();
        assert_eq!(
            err,
            GradeServiceError::Validation(GradeValidationError::InvalidLetterGrade(
                letter.to_string()
            ))
        );
    }
    assert_eq!(service.grades().len(), 0);
}

#[test]
fn valid_submission_is_confirmed_and_stored() {
    let mut service = GradeService::in_memory();
    let receipt = service
        .submit_grade(grade("S1", "CS101", "B", 3, 75.0))
        .unwrap();
    assert_eq!(receipt.message, SUBMIT_OK_MESSAGE);
    assert_eq!(service.grades().find_all("S1").len(), 1);
    assert!(service.list_audit_logs().is_empty());
}

#[test]
fn amend_missing_record_is_not_found_without_audit() {
    let mut service = GradeService::in_memory();
    service
        .submit_grade(grade("S1", "CS101", "B", 3, 90.0))
        .unwrap();

    let err = service.amend_grade("S1", "CS999", &amend("A")).unwrap_err();
    assert_eq!(
        err,
        GradeServiceError::NotFound {
            student_id: "S1".to_string(),
            course_code: "CS999".to_string(),
        }
    );
    let err = service.amend_grade("S9", "CS101", &amend("A")).unwrap_err();
    assert!(matches!(err, GradeServiceError::NotFound { .. }));
    assert!(service.list_audit_logs().is_empty());
}

#[test]
fn amend_appends_exactly_one_entry_with_previous_letter() {
    let mut service = GradeService::in_memory();
    service
        .submit_grade(grade("S1", "CS101", "C", 3, 90.0))
        .unwrap();

    let before = Utc::now();
    let entry = service.amend_grade("S1", "CS101", &amend("B")).unwrap();
    let after = Utc::now();

    assert_eq!(entry.old_value, "C");
    assert_eq!(entry.new_value, "B");
    assert_eq!(entry.changed_by, "dosen-01");
    assert_eq!(entry.reason, "koreksi nilai");
    assert!(entry.changed_at >= before && entry.changed_at <= after);

    let logs = service.list_audit_logs();
    assert_eq!(logs, vec![entry.clone()]);

    let second = service.amend_grade("S1", "CS101", &amend("A")).unwrap();
    assert_eq!(second.old_value, "B");
    assert_ne!(second.id, entry.id);
    assert_eq!(service.list_audit_logs().len(), 2);
    assert_eq!(
        service.grades().find_one("S1", "CS101").unwrap().letter_grade,
        "A"
    );
}

#[test]
fn student_without_records_gets_empty_transcript() {
    let service = GradeService::in_memory();
    match service.build_transcript("S404") {
        Transcript::Empty(empty) => {
            assert_eq!(empty.nim, "S404");
            assert_eq!(empty.ipk, 0.0);
            assert_eq!(empty.message, "Belum ada nilai");
        }
        other => panic!("expected empty transcript, got {other:?}"),
    }
}

#[test]
fn retake_keeps_best_attempt() {
    let mut service = GradeService::in_memory();
    service.submit_grade(grade("S1", "CS101", "D", 2, 80.0)).unwrap();
    service.submit_grade(grade("S1", "CS101", "A", 2, 80.0)).unwrap();

    let transcript = service.build_transcript("S1");
    let doc = transcript.as_document().expect("full transcript");
    assert_eq!(doc.records.len(), 1);
    assert_eq!(doc.records[0].letter_grade, "A");
    assert_eq!(doc.summary.total_sks, 2);
    assert_eq!(doc.summary.ipk, 4.0);
    assert_eq!(doc.summary.predikat, Predikat::CumLaude);
    assert_eq!(doc.header, "TRANSKRIP AKADEMIK");
    assert_eq!(doc.footer, "TTD Dekan - Versi Digital");
    assert_eq!(doc.biodata.nim, "S1");
    assert_eq!(doc.biodata.nama, "Mahasiswa S1");
}

#[test]
fn failed_course_is_excluded_from_totals() {
    let mut service = GradeService::in_memory();
    service.submit_grade(grade("S2", "CS102", "E", 3, 100.0)).unwrap();

    let transcript = service.build_transcript("S2");
    let doc = transcript.as_document().expect("full transcript");
    assert!(doc.records.is_empty());
    assert_eq!(doc.summary.total_sks, 0);
    assert_eq!(doc.summary.ipk, 0.0);
    assert_eq!(doc.summary.predikat, Predikat::Cukup);
    assert_eq!(service.grades().find_all("S2").len(), 1);
}

#[test]
fn transcript_is_idempotent_and_scoped_to_student() {
    let mut service = GradeService::in_memory();
    service.submit_grade(grade("S1", "CS101", "B", 3, 90.0)).unwrap();
    service.submit_grade(grade("S1", "MA101", "A", 2, 90.0)).unwrap();
    service.submit_grade(grade("S2", "CS101", "E", 3, 90.0)).unwrap();

    let first = service.build_transcript("S1");
    let second = service.build_transcript("S1");
    assert_eq!(first, second);

    let doc = first.as_document().expect("full transcript");
    assert_eq!(doc.summary.total_sks, 5);
    // (3*3 + 2*4) / 5 = 3.4
    assert_eq!(doc.summary.ipk, 3.4);
    assert_eq!(doc.summary.predikat, Predikat::SangatMemuaskan);
}

#[test]
fn amended_grade_feeds_next_transcript() {
    let mut service = GradeService::in_memory();
    service.submit_grade(grade("S1", "CS101", "E", 3, 90.0)).unwrap();
    assert_eq!(service.build_transcript("S1").ipk(), 0.0);

    service.amend_grade("S1", "CS101", &amend("B")).unwrap();
    let transcript = service.build_transcript("S1");
    let doc = transcript.as_document().expect("full transcript");
    assert_eq!(doc.summary.total_sks, 3);
    assert_eq!(doc.summary.ipk, 3.0);
}

#[test]
fn large_credit_units_sum_without_overflow() {
    let mut service = GradeService::in_memory();
    service
        .submit_grade(grade("S1", "CS101", "A", 3_000_000_000, 90.0))
        .unwrap();
    service
        .submit_grade(grade("S1", "CS102", "A", 3_000_000_000, 90.0))
        .unwrap();

    let transcript = service.build_transcript("S1");
    let doc = transcript.as_document().expect("full transcript");
    assert_eq!(doc.summary.total_sks, 6_000_000_000);
    assert_eq!(doc.summary.ipk, 4.0);
    assert_eq!(doc.summary.predikat, Predikat::CumLaude);
}

#[test]
fn gpa_rounds_exact_ties_to_even() {
    let mut service = GradeService::in_memory();
    service.submit_grade(grade("S1", "CS101", "D", 7, 90.0)).unwrap();
    service.submit_grade(grade("S1", "MA101", "C", 1, 90.0)).unwrap();

    assert_eq!(service.build_transcript("S1").ipk(), 1.12);
}

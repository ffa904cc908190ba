//! Transcript aggregation.
//!
//! # Responsibility
//! - Reduce a student's raw attempts to the best attempt per course.
//! - Compute credit totals, GPA and honor classification.
//!
//! # Invariants
//! - Ties between equal grade points keep the earliest attempt.
//! - Courses below the passing grade point are excluded from totals and from
//!   the returned records, but remain in the store.
//! - Zero counted credits yields GPA 0.0.

use crate::config::{GradingPolicy, HonorThresholds};
use crate::model::grade::GradeRecord;
use crate::model::transcript::{
    Biodata, EmptyTranscript, Predikat, Transcript, TranscriptDocument, TranscriptSummary,
};

/// Best attempt per course code, in order of each code's first appearance.
pub fn best_attempts(records: &[GradeRecord]) -> Vec<GradeRecord> {
    let mut best: Vec<GradeRecord> = Vec::new();
    for record in records {
        match best
            .iter_mut()
            .find(|kept| kept.course_code == record.course_code)
        {
            Some(kept) => {
                if record.grade_point() > kept.grade_point() {
                    *kept = record.clone();
                }
            }
            None => best.push(record.clone()),
        }
    }
    best
}

/// Classifies a GPA top-down; each tier's lower bound is inclusive.
pub fn predikat_for(ipk: f64, thresholds: &HonorThresholds) -> Predikat {
    if ipk >= thresholds.cum_laude {
        Predikat::CumLaude
    } else if ipk >= thresholds.sangat_memuaskan {
        Predikat::SangatMemuaskan
    } else if ipk >= thresholds.memuaskan {
        Predikat::Memuaskan
    } else {
        Predikat::Cukup
    }
}

/// Rounds to 2 decimal places, ties to even, judged on the exact binary
/// value of `value` (so 1.125 -> 1.12, while 2.675 is below the tie -> 2.67).
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if (scaled - scaled.trunc()).abs() != 0.5 {
        return scaled.round() / 100.0;
    }
    // The product may have been rounded onto the tie; the fused residual is
    // the exact error of that rounding.
    let residual = value.mul_add(100.0, -scaled);
    let rounded = if residual > 0.0 {
        scaled.ceil()
    } else if residual < 0.0 {
        scaled.floor()
    } else {
        scaled.round_ties_even()
    };
    rounded / 100.0
}

/// Builds the transcript for `student_id` from all of that student's records.
pub fn compute_transcript(
    student_id: &str,
    records: &[GradeRecord],
    policy: &GradingPolicy,
) -> Transcript {
    let Some(first) = records.first() else {
        return Transcript::Empty(EmptyTranscript {
            nim: student_id.to_string(),
            ipk: 0.0,
            message: policy.empty_message.clone(),
        });
    };

    let passed: Vec<GradeRecord> = best_attempts(records)
        .into_iter()
        .filter(|record| record.grade_point() >= policy.passing_grade_point)
        .collect();

    let total_sks: u64 = passed.iter().map(|record| u64::from(record.credits)).sum();
    let total_mutu: f64 = passed.iter().map(GradeRecord::mutu).sum();
    let ipk = if total_sks > 0 {
        total_mutu / total_sks as f64
    } else {
        0.0
    };

    Transcript::Full(TranscriptDocument {
        header: policy.header.clone(),
        biodata: Biodata {
            nim: student_id.to_string(),
            nama: first.student_name.clone(),
        },
        records: passed,
        summary: TranscriptSummary {
            total_sks,
            ipk: round2(ipk),
            predikat: predikat_for(ipk, &policy.honor_thresholds),
        },
        footer: policy.footer.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{best_attempts, compute_transcript, predikat_for, round2};
    use crate::config::{GradingPolicy, HonorThresholds};
    use crate::model::grade::GradeRecord;
    use crate::model::transcript::Predikat;

    fn attempt(course: &str, letter: &str, credits: u32, semester: u32) -> GradeRecord {
        GradeRecord {
            student_id: "S1".to_string(),
            student_name: "Raffli".to_string(),
            course_code: course.to_string(),
            course_name: format!("Course {course}"),
            credits,
            semester,
            letter_grade: letter.to_string(),
            attendance: 80.0,
        }
    }

    #[test]
    fn best_attempts_keeps_first_on_ties() {
        let records = vec![
            attempt("CS101", "B", 3, 1),
            attempt("MA101", "C", 2, 1),
            attempt("CS101", "B", 3, 3),
            attempt("CS101", "C", 3, 5),
        ];
        let best = best_attempts(&records);
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].course_code, "CS101");
        assert_eq!(best[0].semester, 1);
        assert_eq!(best[1].course_code, "MA101");
    }

    #[test]
    fn best_attempts_replaces_with_strictly_better_retake() {
        let records = vec![attempt("CS101", "E", 3, 1), attempt("CS101", "C", 3, 2)];
        let best = best_attempts(&records);
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].letter_grade, "C");
    }

    #[test]
    fn predikat_bounds_are_inclusive() {
        let t = HonorThresholds::default();
        assert_eq!(predikat_for(3.5, &t), Predikat::CumLaude);
        assert_eq!(predikat_for(3.49, &t), Predikat::SangatMemuaskan);
        assert_eq!(predikat_for(3.0, &t), Predikat::SangatMemuaskan);
        assert_eq!(predikat_for(2.0, &t), Predikat::Memuaskan);
        assert_eq!(predikat_for(1.99, &t), Predikat::Cukup);
        assert_eq!(predikat_for(0.0, &t), Predikat::Cukup);
    }

    #[test]
    fn gpa_is_weighted_by_credits_and_rounded() {
        // (3*4 + 2*3 + 1*2) / 6 = 20 / 6 = 3.333..
        let records = vec![
            attempt("CS101", "A", 3, 1),
            attempt("MA101", "B", 2, 1),
            attempt("PH101", "C", 1, 1),
        ];
        let transcript = compute_transcript("S1", &records, &GradingPolicy::default());
        let doc = transcript.as_document().expect("full transcript");
        assert_eq!(doc.summary.total_sks, 6);
        assert_eq!(doc.summary.ipk, 3.33);
        assert_eq!(doc.summary.predikat, Predikat::SangatMemuaskan);
    }

    #[test]
    fn predikat_uses_unrounded_gpa() {
        // (100*4 + 101*3) / 201 = 3.4975.., shown as 3.5
        let records = vec![attempt("TA499", "A", 100, 8), attempt("KP498", "B", 101, 8)];
        let transcript = compute_transcript("S1", &records, &GradingPolicy::default());
        let doc = transcript.as_document().expect("full transcript");
        assert_eq!(doc.summary.ipk, 3.5);
        assert_eq!(doc.summary.predikat, Predikat::SangatMemuaskan);
    }

    #[test]
    fn unknown_stored_letter_is_excluded() {
        let records = vec![attempt("CS101", "F", 3, 1), attempt("MA101", "B", 2, 1)];
        let transcript = compute_transcript("S1", &records, &GradingPolicy::default());
        let doc = transcript.as_document().expect("full transcript");
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.summary.total_sks, 2);
        assert_eq!(doc.summary.ipk, 3.0);
    }

    #[test]
    fn stricter_passing_threshold_drops_d_grades() {
        let policy = GradingPolicy {
            passing_grade_point: 2.0,
            ..GradingPolicy::default()
        };
        let records = vec![attempt("CS101", "D", 3, 1), attempt("MA101", "B", 2, 1)];
        let doc = compute_transcript("S1", &records, &policy);
        let doc = doc.as_document().expect("full transcript");
        assert_eq!(doc.summary.total_sks, 2);
        assert_eq!(doc.summary.ipk, 3.0);
    }

    #[test]
    fn exact_ties_round_to_even() {
        // (7*1 + 1*2) / 8 = 1.125 exactly
        let records = vec![attempt("CS101", "D", 7, 1), attempt("MA101", "C", 1, 1)];
        let transcript = compute_transcript("S1", &records, &GradingPolicy::default());
        let doc = transcript.as_document().expect("full transcript");
        assert_eq!(doc.summary.ipk, 1.12);
        assert_eq!(doc.summary.predikat, Predikat::Cukup);

        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.625), 2.62);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(3.333_333), 3.33);
    }

    #[test]
    fn huge_credit_totals_do_not_overflow() {
        let records = vec![
            attempt("CS101", "A", 3_000_000_000, 1),
            attempt("MA101", "A", 3_000_000_000, 1),
            attempt("PH101", "A", u32::MAX, 2),
        ];
        let transcript = compute_transcript("S1", &records, &GradingPolicy::default());
        let doc = transcript.as_document().expect("full transcript");
        assert_eq!(
            doc.summary.total_sks,
            6_000_000_000 + u64::from(u32::MAX)
        );
        assert_eq!(doc.summary.ipk, 4.0);
        assert_eq!(doc.summary.predikat, Predikat::CumLaude);
    }
}

//! 点名结果计算
//!
//! 三个信号决定学员单科状态：Zoom 出勤、是否有评价、缺勤类型。
//! 这里只做纯计算，数据由 `load_season_result` 从存储层按学期取出后在内存中关联。

use std::collections::{HashMap, HashSet};

use crate::errors::Result;
use crate::models::absents::entities::{Absent, AbsentType};
use crate::models::evaluations::entities::SubjectEvaluation;
use crate::models::registrations::entities::SubjectRegistration;
use crate::models::roll_call::entities::{
    RollCallStatus, StudentRollCallSummary, StudentSubjectStatus, SubjectRollCallEntry,
    SubjectRollCallTally,
};
use crate::models::roll_call::requests::AttendanceEntry;
use crate::models::roll_call::responses::{RollCallResultResponse, SubjectRollCallDetailResponse};
use crate::models::students::entities::Student;
use crate::models::subjects::entities::Subject;
use crate::storage::Storage;

/// 单科状态判定
///
/// NO_ATTEND 缺勤优先；出勤且（已评价或免评价）为完成；其余为未完成。
pub fn classify(
    is_attend_zoom: bool,
    has_evaluation: bool,
    absent_type: Option<AbsentType>,
) -> RollCallStatus {
    match absent_type {
        Some(AbsentType::NoAttend) => RollCallStatus::Absent,
        _ if is_attend_zoom
            && (has_evaluation || absent_type == Some(AbsentType::NoEvaluation)) =>
        {
            RollCallStatus::Completed
        }
        _ => RollCallStatus::NoComplete,
    }
}

/// 一个学期的点名原始数据
pub struct SeasonRollCallData {
    pub season: i32,
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    pub registrations: Vec<SubjectRegistration>,
    pub evaluations: Vec<SubjectEvaluation>,
    pub absents: Vec<Absent>,
}

struct Signals {
    evaluated: HashSet<(i64, i64)>,
    absents: HashMap<(i64, i64), AbsentType>,
}

impl Signals {
    fn new(evaluations: &[SubjectEvaluation], absents: &[Absent]) -> Self {
        Self {
            evaluated: evaluations
                .iter()
                .map(|e| (e.student_id, e.subject_id))
                .collect(),
            absents: absents
                .iter()
                .map(|a| ((a.student_id, a.subject_id), a.absent_type))
                .collect(),
        }
    }

    fn has_evaluation(&self, registration: &SubjectRegistration) -> bool {
        self.evaluated
            .contains(&(registration.student_id, registration.subject_id))
    }

    fn absent_type(&self, registration: &SubjectRegistration) -> Option<AbsentType> {
        self.absents
            .get(&(registration.student_id, registration.subject_id))
            .copied()
    }

    fn status_of(&self, registration: &SubjectRegistration) -> RollCallStatus {
        classify(
            registration.is_attend_zoom,
            self.has_evaluation(registration),
            self.absent_type(registration),
        )
    }
}

fn empty_tally(subject: &Subject) -> SubjectRollCallTally {
    SubjectRollCallTally {
        subject_id: subject.id,
        code: subject.code.clone(),
        title: subject.title.clone(),
        ..Default::default()
    }
}

/// 汇总整个学期：按科目计数，并给出每个学员的计数与各科状态
///
/// 报名记录指向的科目不在本学期科目列表（已删除）时跳过。
pub fn aggregate(data: &SeasonRollCallData) -> RollCallResultResponse {
    let signals = Signals::new(&data.evaluations, &data.absents);

    let subject_index: HashMap<i64, usize> = data
        .subjects
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.id, idx))
        .collect();
    let mut tallies: Vec<SubjectRollCallTally> = data.subjects.iter().map(empty_tally).collect();

    let mut registrations_by_student: HashMap<i64, Vec<&SubjectRegistration>> = HashMap::new();
    for registration in &data.registrations {
        registrations_by_student
            .entry(registration.student_id)
            .or_default()
            .push(registration);
    }

    let mut students: Vec<&Student> = data.students.iter().collect();
    students.sort_by_key(|s| (s.numerical_order, s.id));

    let summaries = students
        .into_iter()
        .map(|student| {
            let mut registrations: Vec<(usize, &SubjectRegistration)> = registrations_by_student
                .get(&student.id)
                .into_iter()
                .flatten()
                .filter_map(|r| subject_index.get(&r.subject_id).map(|idx| (*idx, *r)))
                .collect();
            registrations.sort_by_key(|(idx, _)| *idx);

            let mut summary = StudentRollCallSummary {
                student_id: student.id,
                numerical_order: student.numerical_order,
                full_name: student.full_name.clone(),
                holy_name: student.holy_name.clone(),
                email: student.email.clone(),
                completed: 0,
                no_complete: 0,
                absent: 0,
                subjects: Vec::with_capacity(registrations.len()),
            };

            for (idx, registration) in registrations {
                let status = signals.status_of(registration);
                tallies[idx].record(status);
                match status {
                    RollCallStatus::Completed => summary.completed += 1,
                    RollCallStatus::NoComplete => summary.no_complete += 1,
                    RollCallStatus::Absent => summary.absent += 1,
                }
                summary.subjects.push(StudentSubjectStatus {
                    subject_id: registration.subject_id,
                    status,
                });
            }
            summary
        })
        .collect();

    RollCallResultResponse {
        season: data.season,
        subjects: tallies,
        students: summaries,
    }
}

/// 单科明细：每个已报名学员的三个信号与状态
pub fn subject_detail(
    subject: &Subject,
    students: &[Student],
    registrations: &[SubjectRegistration],
    evaluations: &[SubjectEvaluation],
    absents: &[Absent],
) -> SubjectRollCallDetailResponse {
    let signals = Signals::new(evaluations, absents);
    let students: HashMap<i64, &Student> = students.iter().map(|s| (s.id, s)).collect();
    let mut tally = empty_tally(subject);

    let mut items: Vec<SubjectRollCallEntry> = registrations
        .iter()
        .filter(|r| r.subject_id == subject.id)
        .filter_map(|registration| {
            let student = students.get(&registration.student_id)?;
            let status = signals.status_of(registration);
            tally.record(status);
            Some(SubjectRollCallEntry {
                student_id: student.id,
                numerical_order: student.numerical_order,
                full_name: student.full_name.clone(),
                holy_name: student.holy_name.clone(),
                email: student.email.clone(),
                is_attend_zoom: registration.is_attend_zoom,
                has_evaluation: signals.has_evaluation(registration),
                absent_type: signals.absent_type(registration),
                status,
            })
        })
        .collect();
    items.sort_by_key(|item| (item.numerical_order, item.student_id));

    SubjectRollCallDetailResponse {
        subject_id: subject.id,
        season: subject.season,
        tally,
        items,
    }
}

/// 出勤表匹配结果
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AttendanceMatch {
    pub student_ids: Vec<i64>,
    pub unmatched: Vec<String>,
}

/// 按学号或邮箱（不区分大小写）把出勤表匹配到已报名学员
pub fn match_attendance_sheet(
    entries: &[AttendanceEntry],
    registered_students: &[Student],
) -> AttendanceMatch {
    let by_order: HashMap<i32, i64> = registered_students
        .iter()
        .map(|s| (s.numerical_order, s.id))
        .collect();
    let by_email: HashMap<String, i64> = registered_students
        .iter()
        .map(|s| (s.email.to_lowercase(), s.id))
        .collect();

    let mut seen = HashSet::new();
    let mut result = AttendanceMatch::default();
    for entry in entries {
        let matched = entry
            .numerical_order
            .and_then(|order| by_order.get(&order))
            .or_else(|| {
                entry
                    .email
                    .as_deref()
                    .and_then(|email| by_email.get(&email.trim().to_lowercase()))
            })
            .copied();

        match matched {
            Some(id) => {
                if seen.insert(id) {
                    result.student_ids.push(id);
                }
            }
            None => result.unmatched.push(entry.describe()),
        }
    }
    result
}

/// 从存储层取出一个学期的全部点名数据
pub async fn load_season_data(storage: &dyn Storage, season: i32) -> Result<SeasonRollCallData> {
    Ok(SeasonRollCallData {
        season,
        students: storage.list_students_by_season(season).await?,
        subjects: storage.list_subjects_by_season(season).await?,
        registrations: storage.list_registrations_by_season(season).await?,
        evaluations: storage.list_evaluations_by_season(season).await?,
        absents: storage.list_absents_by_season(season).await?,
    })
}

pub async fn load_season_result(
    storage: &dyn Storage,
    season: i32,
) -> Result<RollCallResultResponse> {
    let data = load_season_data(storage, season).await?;
    Ok(aggregate(&data))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::CommonStatus;

    pub(crate) fn student(id: i64, order: i32, email: &str) -> Student {
        Student {
            id,
            season: 1,
            numerical_order: order,
            holy_name: None,
            full_name: format!("Student {order}"),
            email: email.to_string(),
            password_hash: String::new(),
            phone: None,
            address: None,
            note: None,
            status: CommonStatus::Active,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn subject(id: i64, code: &str) -> Subject {
        Subject {
            id,
            season: 1,
            code: code.to_string(),
            title: format!("Subject {code}"),
            lecturer_id: None,
            start_at: None,
            subdivision: None,
            zoom_link: None,
            status: CommonStatus::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn registration(student_id: i64, subject_id: i64, attended: bool) -> SubjectRegistration {
        SubjectRegistration {
            id: student_id * 100 + subject_id,
            student_id,
            subject_id,
            season: 1,
            is_attend_zoom: attended,
            registered_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn evaluation(student_id: i64, subject_id: i64) -> SubjectEvaluation {
        SubjectEvaluation {
            id: student_id * 100 + subject_id,
            student_id,
            subject_id,
            season: 1,
            content_score: 5,
            lecturer_score: 5,
            organization_score: 5,
            opinion: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn absent(student_id: i64, subject_id: i64, absent_type: AbsentType) -> Absent {
        Absent {
            id: student_id * 100 + subject_id,
            student_id,
            subject_id,
            season: 1,
            absent_type,
            reason: None,
            note: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_classify_truth_table() {
        for attended in [true, false] {
            for evaluated in [true, false] {
                // NO_ATTEND 一律缺勤
                assert_eq!(
                    classify(attended, evaluated, Some(AbsentType::NoAttend)),
                    RollCallStatus::Absent
                );
                // 无出勤时不可能完成
                if !attended {
                    assert_eq!(classify(attended, evaluated, None), RollCallStatus::NoComplete);
                    assert_eq!(
                        classify(attended, evaluated, Some(AbsentType::NoEvaluation)),
                        RollCallStatus::NoComplete
                    );
                }
            }
        }
        assert_eq!(classify(true, true, None), RollCallStatus::Completed);
        assert_eq!(classify(true, false, None), RollCallStatus::NoComplete);
        assert_eq!(
            classify(true, false, Some(AbsentType::NoEvaluation)),
            RollCallStatus::Completed
        );
    }

    #[test]
    fn test_aggregate_counts_per_subject_and_student() {
        let data = SeasonRollCallData {
            season: 1,
            students: vec![
                student(2, 2, "b@example.com"),
                student(1, 1, "a@example.com"),
                student(3, 3, "c@example.com"),
            ],
            subjects: vec![subject(10, "A01"), subject(20, "A02")],
            registrations: vec![
                registration(1, 10, true),
                registration(1, 20, true),
                registration(2, 10, false),
                registration(2, 20, true),
                // 指向已删除科目
                registration(2, 99, true),
            ],
            evaluations: vec![evaluation(1, 10), evaluation(2, 20)],
            absents: vec![
                absent(1, 20, AbsentType::NoEvaluation),
                absent(2, 10, AbsentType::NoAttend),
            ],
        };

        let result = aggregate(&data);
        assert_eq!(result.season, 1);

        let a01 = &result.subjects[0];
        assert_eq!((a01.completed, a01.no_complete, a01.absent), (1, 0, 1));
        let a02 = &result.subjects[1];
        assert_eq!((a02.completed, a02.no_complete, a02.absent), (2, 0, 0));

        let ids: Vec<i64> = result.students.iter().map(|s| s.student_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let first = &result.students[0];
        assert_eq!((first.completed, first.no_complete, first.absent), (2, 0, 0));
        let second = &result.students[1];
        assert_eq!((second.completed, second.no_complete, second.absent), (1, 0, 1));
        assert_eq!(second.subjects.len(), 2);
        assert_eq!(second.subjects[0].status, RollCallStatus::Absent);

        // 没有报名的学员计数为零
        let third = &result.students[2];
        assert_eq!(third.subjects.len(), 0);
        assert_eq!(third.completed + third.no_complete + third.absent, 0);
    }

    #[test]
    fn test_subject_detail_skips_unknown_students() {
        let subject = subject(10, "A01");
        let students = vec![student(1, 1, "a@example.com"), student(2, 2, "b@example.com")];
        let registrations = vec![
            registration(2, 10, true),
            registration(1, 10, false),
            registration(7, 10, true),
        ];

        let detail = subject_detail(&subject, &students, &registrations, &[evaluation(2, 10)], &[]);
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[0].student_id, 1);
        assert_eq!(detail.items[0].status, RollCallStatus::NoComplete);
        assert!(detail.items[1].has_evaluation);
        assert_eq!(detail.items[1].status, RollCallStatus::Completed);
        assert_eq!(detail.tally.total(), 2);
    }

    #[test]
    fn test_match_attendance_sheet() {
        let students = vec![student(1, 1, "An@Example.com"), student(2, 2, "binh@example.com")];
        let entries = vec![
            AttendanceEntry {
                numerical_order: Some(2),
                email: None,
            },
            AttendanceEntry {
                numerical_order: None,
                email: Some(" an@example.COM ".to_string()),
            },
            AttendanceEntry {
                numerical_order: Some(2),
                email: None,
            },
            AttendanceEntry {
                numerical_order: Some(42),
                email: None,
            },
        ];

        let matched = match_attendance_sheet(&entries, &students);
        assert_eq!(matched.student_ids, vec![2, 1]);
        assert_eq!(matched.unmatched, vec!["#42".to_string()]);
    }
}

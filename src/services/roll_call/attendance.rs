use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use tracing::info;

use super::RollCallService;
use super::compute::match_attendance_sheet;
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    registrations::entities::SubjectRegistration,
    roll_call::{
        requests::{AttendanceSheetRequest, SetAttendanceRequest},
        responses::AttendanceUpdateResponse,
    },
    students::entities::Student,
};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::subjects::load_subject;
use crate::services::{bad_request, internal_error, not_found, record_audit};

/// 整表覆盖：表内学员出勤，其余报名学员未出勤，重复执行结果相同
pub async fn bulk_update(
    service: &RollCallService,
    subject_id: i64,
    sheet: AttendanceSheetRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = sheet.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, subject.season).await {
        return Ok(resp);
    }

    let registrations = match storage.list_registrations_by_subject(subject.id).await {
        Ok(registrations) => registrations,
        Err(e) => return Ok(internal_error("Failed to retrieve registrations", &e)),
    };
    let students = match storage.list_students_by_season(subject.season).await {
        Ok(students) => students,
        Err(e) => return Ok(internal_error("Failed to retrieve students", &e)),
    };
    let registered = registered_students(&registrations, students);

    let matched = match_attendance_sheet(&sheet.entries, &registered);
    let (attended, not_attended) = match storage
        .set_zoom_attendance(subject.id, &matched.student_ids)
        .await
    {
        Ok(counts) => counts,
        Err(e) => return Ok(internal_error("Failed to update attendance", &e)),
    };

    info!(
        "Attendance of subject {} updated: {} attended, {} not attended, {} unmatched",
        subject.code,
        attended,
        not_attended,
        matched.unmatched.len()
    );
    record_audit(
        request,
        &operator,
        AuditAction::Update,
        format!("Bulk updated attendance of subject {}", subject.code),
        Some(subject.season),
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttendanceUpdateResponse {
            attended,
            not_attended,
            unmatched: matched.unmatched,
        },
        "Attendance updated successfully",
    )))
}

fn registered_students(
    registrations: &[SubjectRegistration],
    students: Vec<Student>,
) -> Vec<Student> {
    let ids: HashSet<i64> = registrations.iter().map(|r| r.student_id).collect();
    students
        .into_iter()
        .filter(|s| ids.contains(&s.id))
        .collect()
}

pub async fn set_attendance(
    service: &RollCallService,
    subject_id: i64,
    student_id: i64,
    body: SetAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, subject.season).await {
        return Ok(resp);
    }

    match storage
        .set_registration_attendance(student_id, subject.id, body.is_attend_zoom)
        .await
    {
        Ok(Some(registration)) => {
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!(
                    "Set attendance of student {} in subject {} to {}",
                    student_id, subject.code, body.is_attend_zoom
                ),
                Some(subject.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                registration,
                "Attendance updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::SubjectNotRegistered,
            "Student is not registered for this subject",
        )),
        Err(e) => Ok(internal_error("Failed to update attendance", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::models::roll_call::requests::AttendanceEntry;
    use crate::services::test_support::{TestEnv, body_json};

    fn sheet(entries: Vec<(Option<i32>, Option<&str>)>) -> AttendanceSheetRequest {
        AttendanceSheetRequest {
            entries: entries
                .into_iter()
                .map(|(numerical_order, email)| AttendanceEntry {
                    numerical_order,
                    email: email.map(str::to_string),
                })
                .collect(),
        }
    }

    #[actix_web::test]
    async fn test_bulk_update_is_idempotent() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let subject = env.subject(1, "Z-1").await;
        let mut ids = Vec::new();
        for (order, email) in [(1, "a@example.com"), (2, "b@example.com"), (3, "c@example.com")] {
            let student = env.student(1, order, email).await;
            env.storage
                .replace_student_registrations(student.id, 1, &[subject.id])
                .await
                .unwrap();
            ids.push(student.id);
        }
        let service = RollCallService::new_lazy();

        for _ in 0..2 {
            let resp = service
                .bulk_update(
                    subject.id,
                    sheet(vec![
                        (Some(1), None),
                        (None, Some("B@Example.com")),
                        (Some(99), None),
                    ]),
                    &env.as_admin(&admin),
                )
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
            let body = body_json(resp).await;
            assert_eq!(body["data"]["attended"], 2);
            assert_eq!(body["data"]["not_attended"], 1);
            assert_eq!(body["data"]["unmatched"], serde_json::json!(["#99"]));

            let mut state: Vec<(i64, bool)> = env
                .storage
                .list_registrations_by_subject(subject.id)
                .await
                .unwrap()
                .into_iter()
                .map(|r| (r.student_id, r.is_attend_zoom))
                .collect();
            state.sort();
            assert_eq!(state, vec![(ids[0], true), (ids[1], true), (ids[2], false)]);
        }
    }

    #[actix_web::test]
    async fn test_set_attendance_requires_registration() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let subject = env.subject(1, "Z-2").await;
        let student = env.student(1, 1, "solo@example.com").await;
        let service = RollCallService::new_lazy();

        let resp = service
            .set_attendance(
                subject.id,
                student.id,
                SetAttendanceRequest {
                    is_attend_zoom: true,
                },
                &env.as_admin(&admin),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);

        env.storage
            .replace_student_registrations(student.id, 1, &[subject.id])
            .await
            .unwrap();
        let resp = service
            .set_attendance(
                subject.id,
                student.id,
                SetAttendanceRequest {
                    is_attend_zoom: true,
                },
                &env.as_admin(&admin),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }
}

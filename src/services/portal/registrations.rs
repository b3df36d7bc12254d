use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};

use super::{PortalService, ensure_enrolled, student_and_season};
use crate::models::{
    ApiResponse, ErrorCode,
    lecturers::entities::Lecturer,
    manage_forms::entities::FormType,
    registrations::{
        requests::ReplaceRegistrationsRequest,
        responses::{MyRegistrationItem, MyRegistrationListResponse},
    },
    subjects::{
        entities::{StudentSubjectView, Subject},
        responses::StudentSubjectListResponse,
    },
};
use crate::services::access::ensure_form_open;
use crate::services::{bad_request, internal_error};
use crate::storage::Storage;

pub async fn list_subjects(
    service: &PortalService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let (student, season) = match student_and_season(&storage, request).await {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };

    let subjects = match storage.list_subjects_by_season(season).await {
        Ok(subjects) => subjects,
        Err(e) => return Ok(internal_error("Failed to retrieve subjects", &e)),
    };
    let registered: HashSet<i64> = match storage
        .list_registrations_by_student(student.id, season)
        .await
    {
        Ok(registrations) => registrations.iter().map(|r| r.subject_id).collect(),
        Err(e) => return Ok(internal_error("Failed to retrieve registrations", &e)),
    };
    let lecturers = match load_lecturers(storage.as_ref(), &subjects).await {
        Ok(lecturers) => lecturers,
        Err(e) => return Ok(internal_error("Failed to retrieve lecturers", &e)),
    };

    let items = subjects
        .into_iter()
        .map(|subject| StudentSubjectView {
            lecturer: subject
                .lecturer_id
                .and_then(|id| lecturers.get(&id).cloned()),
            registered: registered.contains(&subject.id),
            subject,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentSubjectListResponse { season, items },
        "Subject list retrieved successfully",
    )))
}

async fn load_lecturers(
    storage: &dyn Storage,
    subjects: &[Subject],
) -> crate::errors::Result<HashMap<i64, Lecturer>> {
    let ids: HashSet<i64> = subjects.iter().filter_map(|s| s.lecturer_id).collect();
    let mut lecturers = HashMap::with_capacity(ids.len());
    for id in ids {
        if let Some(lecturer) = storage.get_lecturer_by_id(id).await? {
            lecturers.insert(id, lecturer);
        }
    }
    Ok(lecturers)
}

pub async fn replace_registrations(
    service: &PortalService,
    registration_data: ReplaceRegistrationsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = registration_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let (student, season) = match student_and_season(&storage, request).await {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_enrolled(&student, season) {
        return Ok(resp);
    }
    if let Err(resp) = ensure_form_open(&storage, FormType::SubjectRegistration, season).await {
        return Ok(resp);
    }

    let subjects = match storage.list_subjects_by_season(season).await {
        Ok(subjects) => subjects,
        Err(e) => return Ok(internal_error("Failed to retrieve subjects", &e)),
    };
    let available: HashSet<i64> = subjects.iter().map(|s| s.id).collect();
    let subject_ids = registration_data.unique_subject_ids();
    if let Some(missing) = subject_ids.iter().find(|id| !available.contains(id)) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotInCurrentSeason,
            format!("Subject {missing} is not open in the current season"),
        )));
    }

    match storage
        .replace_student_registrations(student.id, season, &subject_ids)
        .await
    {
        Ok(registrations) => {
            let by_id: HashMap<i64, Subject> = subjects.into_iter().map(|s| (s.id, s)).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                registration_list(season, registrations, &by_id),
                "Registrations updated successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to update registrations", &e)),
    }
}

pub async fn my_registrations(
    service: &PortalService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let (student, season) = match student_and_season(&storage, request).await {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };

    let registrations = match storage
        .list_registrations_by_student(student.id, season)
        .await
    {
        Ok(registrations) => registrations,
        Err(e) => return Ok(internal_error("Failed to retrieve registrations", &e)),
    };
    let by_id: HashMap<i64, Subject> = match storage.list_subjects_by_season(season).await {
        Ok(subjects) => subjects.into_iter().map(|s| (s.id, s)).collect(),
        Err(e) => return Ok(internal_error("Failed to retrieve subjects", &e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        registration_list(season, registrations, &by_id),
        "Registration list retrieved successfully",
    )))
}

// 已删除科目的报名不返回
fn registration_list(
    season: i32,
    registrations: Vec<crate::models::registrations::entities::SubjectRegistration>,
    subjects: &HashMap<i64, Subject>,
) -> MyRegistrationListResponse {
    let items = registrations
        .into_iter()
        .filter_map(|registration| {
            let subject = subjects.get(&registration.subject_id)?.clone();
            Some(MyRegistrationItem {
                registration,
                subject,
            })
        })
        .collect();
    MyRegistrationListResponse { season, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::manage_forms::entities::FormStatus;
    use crate::services::test_support::{TestEnv, body_json};

    async fn open_registration(env: &TestEnv) {
        env.storage
            .upsert_manage_form(
                1,
                FormType::SubjectRegistration,
                FormStatus::Open,
                serde_json::json!({}),
                None,
            )
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn test_closed_form_rejects_registration() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "reg@example.com").await;
        let subject = env.subject(1, "P-1").await;
        let service = PortalService::new_lazy();

        let resp = service
            .replace_registrations(
                ReplaceRegistrationsRequest {
                    subject_ids: vec![subject.id],
                },
                &env.as_student(&student),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 403);

        open_registration(&env).await;
        let resp = service
            .replace_registrations(
                ReplaceRegistrationsRequest {
                    subject_ids: vec![subject.id, subject.id],
                },
                &env.as_student(&student),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_subject_of_other_season_is_rejected() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "reg2@example.com").await;
        let other = env.subject(2, "P-2").await;
        open_registration(&env).await;

        let resp = PortalService::new_lazy()
            .replace_registrations(
                ReplaceRegistrationsRequest {
                    subject_ids: vec![other.id],
                },
                &env.as_student(&student),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_list_subjects_marks_registered() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "reg3@example.com").await;
        let first = env.subject(1, "P-3").await;
        env.subject(1, "P-4").await;
        env.storage
            .replace_student_registrations(student.id, 1, &[first.id])
            .await
            .unwrap();

        let resp = PortalService::new_lazy()
            .list_subjects(&env.as_student(&student))
            .await
            .unwrap();
        let body = body_json(resp).await;
        let registered: Vec<bool> = body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|item| item["id"] == first.id)
            .map(|item| item["registered"].as_bool().unwrap())
            .collect();
        assert_eq!(registered, vec![true]);
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::{SubjectService, load_subject};
use crate::models::{
    ApiResponse,
    registrations::responses::{SubjectRegistrationItem, SubjectRegistrationListResponse},
};
use crate::services::internal_error;

pub async fn list_registrations(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };

    let registrations = match storage.list_registrations_by_subject(subject.id).await {
        Ok(registrations) => registrations,
        Err(e) => return Ok(internal_error("Failed to retrieve registrations", &e)),
    };
    let mut students: HashMap<i64, _> = match storage.list_students_by_season(subject.season).await
    {
        Ok(students) => students.into_iter().map(|s| (s.id, s)).collect(),
        Err(e) => return Ok(internal_error("Failed to retrieve students", &e)),
    };

    // 已删除学员的报名不列出
    let mut items: Vec<SubjectRegistrationItem> = registrations
        .into_iter()
        .filter_map(|registration| {
            let student = students.remove(&registration.student_id)?;
            Some(SubjectRegistrationItem {
                registration,
                student,
            })
        })
        .collect();
    items.sort_by_key(|item| item.student.numerical_order);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectRegistrationListResponse {
            subject_id: subject.id,
            items,
        },
        "Registration list retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::{TestEnv, body_json};

    #[actix_web::test]
    async fn test_registrations_sorted_by_numerical_order() {
        let env = TestEnv::new().await;
        let viewer = env.admin(UserRole::Viewer).await;
        let subject = env.subject(1, "S-1").await;
        for (order, email) in [(5, "five@example.com"), (2, "two@example.com")] {
            let student = env.student(1, order, email).await;
            env.storage
                .replace_student_registrations(student.id, 1, &[subject.id])
                .await
                .unwrap();
        }

        let resp = SubjectService::new_lazy()
            .list_registrations(subject.id, &env.as_admin(&viewer))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body = body_json(resp).await;
        let orders: Vec<i64> = body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["student"]["numerical_order"].as_i64().unwrap())
            .collect();
        assert_eq!(orders, vec![2, 5]);
    }
}

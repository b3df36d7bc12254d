use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, load_student};
use crate::models::{ApiResponse, students::responses::StudentResponse};

pub async fn get_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_student(&storage, student_id).await {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResponse { student },
            "Student information retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

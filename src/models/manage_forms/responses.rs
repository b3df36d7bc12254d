use super::entities::ManageForm;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ManageFormResponse {
    pub form: ManageForm,
}

use super::entities::Season;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SeasonResponse {
    pub season: Season,
}

#[derive(Debug, Serialize)]
pub struct SeasonListResponse {
    pub items: Vec<Season>,
}

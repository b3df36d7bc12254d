crate::string_enum! {
    /// 通用记录状态，删除操作均为软删除
    pub enum CommonStatus("status") {
        Active => "active",
        Inactive => "inactive",
        Deleted => "deleted",
    }
}

impl CommonStatus {
    pub fn is_deleted(&self) -> bool {
        *self == CommonStatus::Deleted
    }
}

impl Default for CommonStatus {
    fn default() -> Self {
        CommonStatus::Active
    }
}

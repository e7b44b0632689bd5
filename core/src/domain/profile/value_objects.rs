/// Partial profile update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub user_name: Option<String>,
    pub user_picture: Option<String>,
    pub user_health: Option<String>,
    pub selected_conditions: Option<Vec<String>>,
}

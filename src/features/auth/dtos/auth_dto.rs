use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::validate_not_blank;

/// Request DTO for officer login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(
        length(min = 1, max = 100, message = "Department is required"),
        custom(function = "validate_not_blank", message = "Department is required")
    )]
    pub department: String,

    #[validate(
        length(min = 1, max = 100, message = "Role is required"),
        custom(function = "validate_not_blank", message = "Role is required")
    )]
    pub role: String,

    #[validate(
        length(min = 1, max = 100, message = "District is required"),
        custom(function = "validate_not_blank", message = "District is required")
    )]
    pub district: String,

    #[validate(
        length(min = 1, max = 100, message = "User ID is required"),
        custom(function = "validate_not_blank", message = "User ID is required")
    )]
    pub user_id: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        custom(function = "validate_not_blank", message = "Password is required")
    )]
    pub password: String,
}

/// Session returned after a successful login. Held by the client; the server keeps no state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    pub department: String,
    pub role: String,
    pub district: String,
    pub display_name: String,
    pub is_logged_in: bool,
}

/// Selectable department → role → districts, without any account data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginOptionsDto {
    pub departments: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

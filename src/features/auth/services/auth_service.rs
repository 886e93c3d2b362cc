use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginOptionsDto, LoginRequestDto, SessionDto};
use crate::features::auth::models::Credentials;

/// Service for officer login against the credentials tree
pub struct AuthService {
    credentials: Credentials,
}

impl AuthService {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Exact match on id and password under department/role/district
    pub fn login(&self, dto: LoginRequestDto) -> Result<SessionDto> {
        let entry = self
            .credentials
            .lookup(&dto.department, &dto.role, &dto.district)
            .filter(|entry| entry.id == dto.user_id && entry.password == dto.password)
            .ok_or_else(|| {
                tracing::warn!(
                    "Rejected login for {} / {} / {}",
                    dto.department,
                    dto.role,
                    dto.district
                );
                AppError::Unauthorized("Invalid credentials".to_string())
            })?;

        tracing::info!("Officer {} logged in ({})", entry.id, dto.district);

        Ok(SessionDto {
            display_name: entry.name.clone(),
            department: dto.department,
            role: dto.role,
            district: dto.district,
            is_logged_in: true,
        })
    }

    pub fn options(&self) -> LoginOptionsDto {
        let departments = self
            .credentials
            .tree()
            .iter()
            .map(|(department, roles)| {
                let roles = roles
                    .iter()
                    .map(|(role, districts)| (role.clone(), districts.keys().cloned().collect()))
                    .collect();
                (department.clone(), roles)
            })
            .collect();

        LoginOptionsDto { departments }
    }
}

// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{Role, User},
};

/// 1. O Trait que define um requisito de papel
pub trait RoleDef: Send + Sync + 'static {
    fn name() -> &'static str;
    fn allows(role: Role) -> bool;
}

/// 2. O Extractor (Guardião)
/// Colocado na assinatura do handler, só deixa a requisição prosseguir
/// se o usuário autenticado tiver um papel aceito por `T`.
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        if !T::allows(user.role) {
            return Err(AppError::MissingRole(T::name()));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS REQUISITOS (TIPOS)
// ---

pub struct ManagerRole;
impl RoleDef for ManagerRole {
    fn name() -> &'static str {
        "MANAGER"
    }
    // Admin herda tudo que o gerente pode.
    fn allows(role: Role) -> bool {
        matches!(role, Role::Admin | Role::Manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_requirement_rejects_staff_only() {
        assert!(ManagerRole::allows(Role::Admin));
        assert!(ManagerRole::allows(Role::Manager));
        assert!(!ManagerRole::allows(Role::Staff));
    }
}

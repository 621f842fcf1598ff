// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{eq, Query, StoreClient};
use crate::errors::BackendError;
use crate::models::{Profile, Role, RoleAssignment};

pub fn profiles_query() -> Query {
    vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
    ]
}

pub fn roles_query(user_id: Option<&str>) -> Query {
    let mut q: Query = vec![("select", "*".to_string())];
    if let Some(u) = user_id {
        q.push(("user_id", eq(u)));
    }
    q
}

/// Highest role assigned to a user; no assignment means a plain user.
pub fn role_for(roles: &[RoleAssignment], user_id: &str) -> Role {
    let admin = roles
        .iter()
        .any(|r| r.user_id == user_id && r.role == Role::Admin);
    if admin { Role::Admin } else { Role::default() }
}

impl StoreClient {
    pub fn list_profiles(&self) -> Result<Vec<Profile>, BackendError> {
        self.select("profiles", &profiles_query())
    }

    pub fn list_roles(&self) -> Result<Vec<RoleAssignment>, BackendError> {
        self.select("user_roles", &roles_query(None))
    }

    pub fn role_of(&self, user_id: &str) -> Result<Role, BackendError> {
        let rows: Vec<RoleAssignment> = self.select("user_roles", &roles_query(Some(user_id)))?;
        Ok(role_for(&rows, user_id))
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::info;

use super::{eq, single, Query, StoreClient};
use crate::errors::BackendError;
use crate::models::{Category, NewCategory, TxType};

const TABLE: &str = "categories";

pub fn list_query(owner: &str, kind: Option<TxType>) -> Query {
    let mut q: Query = vec![
        ("select", "*".to_string()),
        ("user_id", eq(owner)),
        ("order", "name.asc".to_string()),
    ];
    if let Some(k) = kind {
        q.push(("type", eq(k.as_str())));
    }
    q
}

impl StoreClient {
    pub fn list_categories(
        &self,
        owner: &str,
        kind: Option<TxType>,
    ) -> Result<Vec<Category>, BackendError> {
        self.select(TABLE, &list_query(owner, kind))
    }

    pub fn create_category(&self, owner: &str, cat: &NewCategory) -> Result<Category, BackendError> {
        let rows = self.insert(TABLE, owner, cat, &Vec::new())?;
        let created: Category = single(rows)?;
        info!(id = %created.id, name = %created.name, "category created");
        Ok(created)
    }

    /// Transactions that referenced the category keep existing with the
    /// reference cleared by the backend.
    pub fn delete_category(&self, id: &str) -> Result<(), BackendError> {
        let rows: Vec<Category> = self.delete(TABLE, &vec![("id", eq(id))])?;
        single(rows)?;
        info!(id, "category deleted");
        Ok(())
    }
}

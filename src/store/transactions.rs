// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::info;

use super::{eq, single, Query, StoreClient};
use crate::errors::{BackendError, Error, ValidationError};
use crate::models::{NewTransaction, Transaction, TransactionFilters, TransactionPatch};

const TABLE: &str = "transactions";
const SELECT_WITH_CATEGORY: &str = "*,categories(name,icon,color)";

/// Query parameters for a filtered, date-descending listing.
pub fn list_query(owner: &str, filters: &TransactionFilters) -> Query {
    let mut q: Query = vec![
        ("select", SELECT_WITH_CATEGORY.to_string()),
        ("user_id", eq(owner)),
        ("order", "date.desc".to_string()),
    ];
    if let Some(d) = filters.start_date {
        q.push(("date", format!("gte.{}", d)));
    }
    if let Some(d) = filters.end_date {
        q.push(("date", format!("lte.{}", d)));
    }
    if let Some(k) = filters.kind {
        q.push(("type", eq(k.as_str())));
    }
    if let Some(c) = filters.category_id.as_deref() {
        q.push(("category_id", eq(c)));
    }
    if let Some(s) = filters.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        q.push(("description", format!("ilike.*{}*", s)));
    }
    q
}

pub fn by_id_query(id: &str) -> Query {
    vec![("id", eq(id)), ("select", SELECT_WITH_CATEGORY.to_string())]
}

impl StoreClient {
    pub fn list_transactions(
        &self,
        owner: &str,
        filters: &TransactionFilters,
    ) -> Result<Vec<Transaction>, BackendError> {
        self.select(TABLE, &list_query(owner, filters))
    }

    pub fn get_transaction(&self, id: &str) -> Result<Transaction, BackendError> {
        single(self.select(TABLE, &by_id_query(id))?)
    }

    pub fn create_transaction(
        &self,
        owner: &str,
        tx: &NewTransaction,
    ) -> Result<Transaction, BackendError> {
        let rows = self.insert(
            TABLE,
            owner,
            tx,
            &vec![("select", SELECT_WITH_CATEGORY.to_string())],
        )?;
        let created: Transaction = single(rows)?;
        info!(id = %created.id, kind = %created.kind, "transaction created");
        Ok(created)
    }

    /// Apply a partial update. Rejects an empty patch before any request.
    pub fn update_transaction(
        &self,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<Transaction, Error> {
        if patch.is_empty() {
            return Err(ValidationError::EmptyPatch.into());
        }
        let rows = self.update(TABLE, patch, &by_id_query(id))?;
        let updated: Transaction = single(rows)?;
        info!(id = %updated.id, "transaction updated");
        Ok(updated)
    }

    pub fn delete_transaction(&self, id: &str) -> Result<(), BackendError> {
        let rows: Vec<Transaction> = self.delete(TABLE, &vec![("id", eq(id))])?;
        single(rows)?;
        info!(id, "transaction deleted");
        Ok(())
    }
}

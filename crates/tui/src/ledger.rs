use api_types::{
    stats::TransactionStats,
    transaction::{TransactionKind, TransactionNew, TransactionUpdate, TransactionView},
};
use uuid::Uuid;

use crate::client::{Client, ClientError};

/// In-memory mirror of the server's transaction ledger.
///
/// Holds the transaction list and the derived aggregate. Mutations patch the
/// aggregate optimistically from the known delta, then refetch the
/// server-computed aggregate, which replaces the local one wholesale. Any
/// inconsistency is therefore bounded to a single round trip.
#[derive(Debug, Default)]
pub struct Ledger {
    pub items: Vec<TransactionView>,
    pub stats: TransactionStats,
    pub loading: bool,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves the full transaction list, then refreshes the aggregate.
    pub async fn fetch_all(
        &mut self,
        client: &Client,
        token: &str,
    ) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.fetch_all_inner(client, token).await;
        self.loading = false;
        result
    }

    async fn fetch_all_inner(
        &mut self,
        client: &Client,
        token: &str,
    ) -> Result<(), ClientError> {
        let response = client.transactions_list(token).await?;
        self.items = response.transactions;
        self.fetch_stats(client, token).await
    }

    /// Replaces the local aggregate with the server-computed one. Replace,
    /// never merge: the server's numbers are authoritative.
    pub async fn fetch_stats(
        &mut self,
        client: &Client,
        token: &str,
    ) -> Result<(), ClientError> {
        self.stats = client.transactions_stats(token).await?;
        Ok(())
    }

    pub async fn create(
        &mut self,
        client: &Client,
        token: &str,
        payload: TransactionNew,
    ) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.create_inner(client, token, payload).await;
        self.loading = false;
        result
    }

    async fn create_inner(
        &mut self,
        client: &Client,
        token: &str,
        payload: TransactionNew,
    ) -> Result<(), ClientError> {
        let created = client.transaction_create(token, &payload).await?;
        self.apply_created(created);
        self.reconcile(client, token).await;
        Ok(())
    }

    pub async fn update(
        &mut self,
        client: &Client,
        token: &str,
        id: Uuid,
        payload: TransactionUpdate,
    ) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.update_inner(client, token, id, payload).await;
        self.loading = false;
        result
    }

    async fn update_inner(
        &mut self,
        client: &Client,
        token: &str,
        id: Uuid,
        payload: TransactionUpdate,
    ) -> Result<(), ClientError> {
        let updated = client.transaction_update(token, id, &payload).await?;
        self.apply_updated(id, updated);
        self.reconcile(client, token).await;
        Ok(())
    }

    pub async fn delete(
        &mut self,
        client: &Client,
        token: &str,
        id: Uuid,
    ) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.delete_inner(client, token, id).await;
        self.loading = false;
        result
    }

    async fn delete_inner(
        &mut self,
        client: &Client,
        token: &str,
        id: Uuid,
    ) -> Result<(), ClientError> {
        client.transaction_delete(token, id).await?;
        self.apply_deleted(id);
        self.reconcile(client, token).await;
        Ok(())
    }

    /// Authoritative refetch after an optimistic patch. A failure here leaves
    /// the optimistic numbers standing until the next successful fetch.
    async fn reconcile(&mut self, client: &Client, token: &str) {
        if let Err(err) = self.fetch_stats(client, token).await {
            tracing::warn!("aggregate reconciliation failed: {err:?}");
        }
    }

    fn apply_created(&mut self, created: TransactionView) {
        apply_signed(&mut self.stats, created.kind, created.amount_minor);
        self.items.push(created);
    }

    fn apply_updated(&mut self, id: Uuid, updated: TransactionView) {
        // The delta is computed against the record we knew about. If the
        // cache is stale and the record is missing, skip the optimistic step;
        // reconciliation corrects the aggregate anyway.
        if let Some(slot) = self.items.iter_mut().find(|tx| tx.id == id) {
            apply_signed(&mut self.stats, slot.kind, -slot.amount_minor);
            apply_signed(&mut self.stats, updated.kind, updated.amount_minor);
            *slot = updated;
        }
    }

    fn apply_deleted(&mut self, id: Uuid) {
        if let Some(pos) = self.items.iter().position(|tx| tx.id == id) {
            let removed = self.items.remove(pos);
            apply_signed(&mut self.stats, removed.kind, -removed.amount_minor);
        }
    }
}

/// Applies one transaction's contribution to the aggregate. A negative
/// `amount_minor` reverses a previous contribution.
fn apply_signed(stats: &mut TransactionStats, kind: TransactionKind, amount_minor: i64) {
    match kind {
        TransactionKind::Income => {
            stats.total_income_minor += amount_minor;
            stats.balance_minor += amount_minor;
        }
        TransactionKind::Expense => {
            stats.total_expense_minor += amount_minor;
            stats.balance_minor -= amount_minor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::transaction::Category;
    use chrono::NaiveDate;

    fn tx(id: Uuid, kind: TransactionKind, amount_minor: i64) -> TransactionView {
        TransactionView {
            id,
            description: "test".to_string(),
            amount_minor,
            kind,
            category: Category::Others,
            occurred_on: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    fn stats(income: i64, expense: i64, balance: i64) -> TransactionStats {
        TransactionStats {
            total_income_minor: income,
            total_expense_minor: expense,
            balance_minor: balance,
        }
    }

    #[test]
    fn create_income_then_expense_moves_all_three_totals() {
        let mut ledger = Ledger::new();

        ledger.apply_created(tx(Uuid::new_v4(), TransactionKind::Income, 100));
        assert_eq!(ledger.stats, stats(100, 0, 100));

        ledger.apply_created(tx(Uuid::new_v4(), TransactionKind::Expense, 30));
        assert_eq!(ledger.stats, stats(100, 30, 70));
        assert_eq!(ledger.items.len(), 2);
    }

    #[test]
    fn delete_reverses_the_records_contribution() {
        let mut ledger = Ledger::new();
        let income_id = Uuid::new_v4();
        let expense_id = Uuid::new_v4();
        ledger.apply_created(tx(income_id, TransactionKind::Income, 500));
        ledger.apply_created(tx(expense_id, TransactionKind::Expense, 200));

        ledger.apply_deleted(expense_id);
        assert_eq!(ledger.stats, stats(500, 0, 500));
        assert_eq!(ledger.items.len(), 1);

        ledger.apply_deleted(income_id);
        assert_eq!(ledger.stats, stats(0, 0, 0));
        assert!(ledger.items.is_empty());
    }

    #[test]
    fn same_kind_update_applies_the_difference() {
        let mut ledger = Ledger::new();
        let id = Uuid::new_v4();
        ledger.apply_created(tx(id, TransactionKind::Expense, 40));

        ledger.apply_updated(id, tx(id, TransactionKind::Expense, 100));
        assert_eq!(ledger.stats, stats(0, 100, -100));
        assert_eq!(ledger.items[0].amount_minor, 100);
    }

    #[test]
    fn expense_to_income_update_moves_both_buckets() {
        let mut ledger = Ledger::new();
        let id = Uuid::new_v4();
        ledger.apply_created(tx(id, TransactionKind::Expense, 30));
        assert_eq!(ledger.stats, stats(0, 30, -30));

        ledger.apply_updated(id, tx(id, TransactionKind::Income, 50));
        // old 30 leaves the expense bucket, new 50 enters income;
        // balance moves by new + old = 80.
        assert_eq!(ledger.stats, stats(50, 0, 50));
        assert_eq!(ledger.items[0].kind, TransactionKind::Income);
    }

    #[test]
    fn income_to_expense_update_moves_both_buckets() {
        let mut ledger = Ledger::new();
        let id = Uuid::new_v4();
        ledger.apply_created(tx(id, TransactionKind::Income, 80));

        ledger.apply_updated(id, tx(id, TransactionKind::Expense, 20));
        assert_eq!(ledger.stats, stats(0, 20, -20));
    }

    #[test]
    fn update_with_stale_cache_skips_the_optimistic_step() {
        let mut ledger = Ledger::new();
        ledger.apply_created(tx(Uuid::new_v4(), TransactionKind::Income, 100));
        let before = ledger.stats;

        // Unknown id: the aggregate must stay put until reconciliation.
        ledger.apply_updated(Uuid::new_v4(), tx(Uuid::new_v4(), TransactionKind::Expense, 999));
        assert_eq!(ledger.stats, before);
        assert_eq!(ledger.items.len(), 1);
    }

    #[test]
    fn balance_matches_income_minus_expense_through_a_mixed_run() {
        let mut ledger = Ledger::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        ledger.apply_created(tx(a, TransactionKind::Income, 1_000));
        ledger.apply_created(tx(b, TransactionKind::Expense, 250));
        ledger.apply_updated(a, tx(a, TransactionKind::Income, 1_200));
        ledger.apply_deleted(b);

        assert_eq!(
            ledger.stats.balance_minor,
            ledger.stats.total_income_minor - ledger.stats.total_expense_minor
        );
        assert_eq!(ledger.stats, stats(1_200, 0, 1_200));
    }
}

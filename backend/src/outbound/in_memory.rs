//! In-process employee gateway.
//!
//! Used when no backend URL is configured and by tests that need a real
//! gateway without a network. Records live in a mutex-guarded vector; the
//! gateway counts calls per operation and can be switched into a throttled
//! mode where every call fails as rate limited.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{BackendResult, EmployeeGateway, EmployeeGatewayError, EmployeeRecord};
use crate::domain::{CreateEmployeeRequest, DeleteEmployeeRequest, EmployeeId};

const EMAIL_DOMAIN: &str = "company.com";

/// Snapshot of how often each gateway operation ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatewayCallCounts {
    pub list_all: usize,
    pub fetch_by_id: usize,
    pub create: usize,
    pub delete_by_name: usize,
}

#[derive(Default)]
struct Counters {
    list_all: AtomicUsize,
    fetch_by_id: AtomicUsize,
    create: AtomicUsize,
    delete_by_name: AtomicUsize,
}

/// Employee gateway backed by process memory.
#[derive(Default)]
pub struct InMemoryEmployeeGateway {
    records: Mutex<Vec<EmployeeRecord>>,
    counters: Counters,
    throttled: AtomicBool,
}

impl InMemoryEmployeeGateway {
    /// Gateway holding exactly `records`, in order.
    pub fn with_records(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Gateway seeded with a small demo dataset.
    pub fn seeded() -> Self {
        let seed = [
            ("Tiger Nixon", 320_800, 61, "Vice Chair Executive Principal"),
            ("Garrett Winters", 170_750, 63, "Accountant"),
            ("Ashton Cox", 86_000, 66, "Junior Technical Author"),
            ("Cedric Kelly", 433_060, 22, "Senior Javascript Developer"),
            ("Airi Satou", 162_700, 33, "Accountant"),
        ];
        Self::with_records(
            seed.into_iter()
                .map(|(name, salary, age, title)| synthesise_record(name, salary, age, title))
                .collect(),
        )
    }

    fn records(&self) -> MutexGuard<'_, Vec<EmployeeRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Calls observed so far.
    pub fn calls(&self) -> GatewayCallCounts {
        GatewayCallCounts {
            list_all: self.counters.list_all.load(Ordering::SeqCst),
            fetch_by_id: self.counters.fetch_by_id.load(Ordering::SeqCst),
            create: self.counters.create.load(Ordering::SeqCst),
            delete_by_name: self.counters.delete_by_name.load(Ordering::SeqCst),
        }
    }

    /// Make every subsequent call fail as rate limited (or stop doing so).
    pub fn set_throttled(&self, throttled: bool) {
        self.throttled.store(throttled, Ordering::SeqCst);
    }

    fn enter(&self, counter: &AtomicUsize, operation: &str) -> Result<(), EmployeeGatewayError> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.throttled.load(Ordering::SeqCst) {
            return Err(EmployeeGatewayError::rate_limited(format!(
                "rate limit exceeded calling {operation}"
            )));
        }
        Ok(())
    }
}

/// Build a record the way the backend does on creation.
fn synthesise_record(name: &str, salary: u32, age: u32, title: &str) -> EmployeeRecord {
    let local_part = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(".");
    EmployeeRecord {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        salary,
        age,
        title: title.to_owned(),
        email: format!("{local_part}@{EMAIL_DOMAIN}"),
    }
}

#[async_trait]
impl EmployeeGateway for InMemoryEmployeeGateway {
    async fn list_all(&self) -> Result<BackendResult<Vec<EmployeeRecord>>, EmployeeGatewayError> {
        self.enter(&self.counters.list_all, "list_all")?;
        Ok(BackendResult::handled(self.records().clone()))
    }

    async fn fetch_by_id(
        &self,
        id: &EmployeeId,
    ) -> Result<BackendResult<EmployeeRecord>, EmployeeGatewayError> {
        self.enter(&self.counters.fetch_by_id, "fetch_by_id")?;
        let found = self
            .records()
            .iter()
            .find(|record| record.id == *id.as_uuid())
            .cloned();
        Ok(found.map_or_else(BackendResult::empty, BackendResult::handled))
    }

    async fn create(
        &self,
        request: &CreateEmployeeRequest,
    ) -> Result<BackendResult<EmployeeRecord>, EmployeeGatewayError> {
        self.enter(&self.counters.create, "create")?;
        let record = synthesise_record(
            request.name(),
            request.salary(),
            request.age(),
            request.title(),
        );
        self.records().push(record.clone());
        Ok(BackendResult::handled(record))
    }

    async fn delete_by_name(
        &self,
        request: &DeleteEmployeeRequest,
    ) -> Result<BackendResult<bool>, EmployeeGatewayError> {
        self.enter(&self.counters.delete_by_name, "delete_by_name")?;
        let mut records = self.records();
        let removed = match records.iter().position(|record| record.name == request.name()) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        };
        Ok(BackendResult::handled(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesised_email_joins_lowercased_name_parts() {
        let record = synthesise_record("Jill  Van Jenkins", 1, 30, "Advisor");
        assert_eq!(record.email, "jill.van.jenkins@company.com");
    }

    #[tokio::test]
    async fn create_then_fetch_round_trips_through_memory() {
        let gateway = InMemoryEmployeeGateway::default();
        let request =
            CreateEmployeeRequest::try_new("Jill Jenkins", 139_082, 48, "Financial Advisor")
                .expect("valid request");

        let created = gateway.create(&request).await.expect("create");
        let record = created.data().cloned().expect("record returned");
        let fetched = gateway
            .fetch_by_id(&EmployeeId::from_uuid(record.id))
            .await
            .expect("fetch");

        assert_eq!(fetched.data(), Some(&record));
        assert_eq!(gateway.calls().create, 1);
        assert_eq!(gateway.calls().fetch_by_id, 1);
    }

    #[tokio::test]
    async fn unknown_id_yields_empty_result() {
        let gateway = InMemoryEmployeeGateway::seeded();
        let result = gateway
            .fetch_by_id(&EmployeeId::random())
            .await
            .expect("fetch");
        assert!(result.data().is_none());
        assert!(result.error().is_none());
    }

    #[tokio::test]
    async fn delete_removes_first_match_only() {
        let gateway = InMemoryEmployeeGateway::with_records(vec![
            synthesise_record("Ada", 1, 30, "t"),
            synthesise_record("Ada", 2, 31, "t"),
        ]);
        let request = DeleteEmployeeRequest::try_new("Ada").expect("valid");

        let deleted = gateway.delete_by_name(&request).await.expect("delete");
        assert_eq!(deleted.data(), Some(&true));

        let remaining = gateway.list_all().await.expect("list");
        let salaries: Vec<_> = remaining
            .data()
            .expect("records")
            .iter()
            .map(|record| record.salary)
            .collect();
        assert_eq!(salaries, [2]);
    }

    #[tokio::test]
    async fn delete_of_missing_name_reports_false() {
        let gateway = InMemoryEmployeeGateway::seeded();
        let request = DeleteEmployeeRequest::try_new("Nobody").expect("valid");
        let deleted = gateway.delete_by_name(&request).await.expect("delete");
        assert_eq!(deleted.data(), Some(&false));
    }

    #[tokio::test]
    async fn throttled_gateway_fails_every_call_but_counts_it() {
        let gateway = InMemoryEmployeeGateway::seeded();
        gateway.set_throttled(true);

        let error = gateway.list_all().await.expect_err("throttled");
        assert!(error.is_rate_limited());
        assert_eq!(gateway.calls().list_all, 1);

        gateway.set_throttled(false);
        assert!(gateway.list_all().await.is_ok());
    }
}

//! Import service
//!
//! Runs one import: look the source up, fetch its whole batch, normalize
//! every record, then append the valid ones to the store.
//!
//! Failure policy: with `bypass_wrong_expenses` set, records that fail
//! normalization or persistence are counted and skipped. Without it the
//! first such failure aborts the run with an error and no report. All
//! records are validated before any is appended, so a validation abort
//! leaves the store untouched; a persistence abort keeps whatever was
//! appended before it.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, warn};

use crate::error::ImportError;
use crate::models::RunId;
use crate::services::normalize::normalize;
use crate::sources::SourceRegistry;
use crate::storage::ExpenseStore;

/// Parameters of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// Identifier the source is registered under
    pub importer_id: String,

    /// Count and skip bad records instead of aborting
    #[serde(default)]
    pub bypass_wrong_expenses: bool,

    /// Reserved; accepted but not acted on
    #[serde(default)]
    pub re_import: bool,
}

impl ImportRequest {
    pub fn new(importer_id: impl Into<String>) -> Self {
        Self {
            importer_id: importer_id.into(),
            ..Self::default()
        }
    }

    pub fn bypass_wrong_expenses(mut self, bypass: bool) -> Self {
        self.bypass_wrong_expenses = bypass;
        self
    }

    pub fn re_import(mut self, re_import: bool) -> Self {
        self.re_import = re_import;
        self
    }
}

/// Outcome of a completed import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub successful_imports: usize,
    pub failed_imports: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,
}

impl ImportReport {
    /// Number of records the source produced
    pub fn total(&self) -> usize {
        self.successful_imports + self.failed_imports
    }
}

/// Service importing expenses from registered sources into a store
pub struct ImportService<S> {
    sources: SourceRegistry,
    store: S,
}

impl<S: ExpenseStore> ImportService<S> {
    pub fn new(sources: SourceRegistry, store: S) -> Self {
        Self { sources, store }
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Import every expense the requested source currently has
    pub fn import(&self, req: &ImportRequest) -> Result<ImportReport, ImportError> {
        let run_id = RunId::new();
        let span = info_span!("import", source = %req.importer_id, run_id = %run_id);
        let _entered = span.enter();

        let source = self.sources.get(&req.importer_id).map_err(|e| {
            warn!(error = %e, "import requested from unregistered source");
            e
        })?;

        if req.re_import {
            debug!("re-import requested; the flag is reserved and ignored");
        }

        info!(name = source.name(), bypass = req.bypass_wrong_expenses, "importing expenses");

        let imported = source.fetch().map_err(|e| {
            error!(error = %e, "could not import expenses");
            ImportError::SourceUnavailable {
                source_id: req.importer_id.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut failed = 0usize;
        let mut to_add = Vec::with_capacity(imported.len());

        for raw in &imported {
            match normalize(raw) {
                Ok(expense) => to_add.push(expense),
                Err(e) => {
                    failed += 1;
                    error!(
                        product = %raw.product,
                        amount = %raw.amount,
                        currency = %raw.currency,
                        error = %e,
                        "could not import expense"
                    );
                    if !req.bypass_wrong_expenses {
                        warn!("aborting import on invalid expense");
                        return Err(ImportError::ValidationFailed {
                            product: raw.product.clone(),
                            amount: raw.amount.clone(),
                            currency: raw.currency.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let mut persisted = 0usize;
        for expense in &to_add {
            match self.store.append(expense) {
                Ok(_) => persisted += 1,
                Err(e) => {
                    failed += 1;
                    error!(expense_id = %expense.id.full(), error = %e, "failed to save expense");
                    if !req.bypass_wrong_expenses {
                        warn!(persisted, "aborting import on store failure");
                        return Err(ImportError::PersistenceFailed {
                            expense_id: expense.id.full(),
                            persisted,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let successful = imported.len() - failed;
        info!(successful, failed, "import finished");

        Ok(ImportReport {
            successful_imports: successful,
            failed_imports: failed,
            message: Some(format!(
                "Imported {} of {} expenses from {}",
                successful,
                imported.len(),
                source.name()
            )),
            run_id: Some(run_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SourceError, StoreError};
    use crate::models::{Expense, ExpenseId, ImportedExpense};
    use crate::sources::{ExampleSource, ExpenseSource};
    use crate::storage::{ExpenseRepository, MemoryStore};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FixedSource(Vec<ImportedExpense>);

    impl ExpenseSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self) -> Result<Vec<ImportedExpense>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct DownSource;

    impl ExpenseSource for DownSource {
        fn name(&self) -> &str {
            "down"
        }

        fn fetch(&self) -> Result<Vec<ImportedExpense>, SourceError> {
            Err(SourceError::NotFound("sheet.csv".into()))
        }
    }

    /// Store that records every append call and can refuse chosen calls
    #[derive(Default)]
    struct RecordingStore {
        calls: AtomicUsize,
        refuse_calls: Vec<usize>,
        stored: Mutex<Vec<Expense>>,
    }

    impl RecordingStore {
        fn refusing(calls: &[usize]) -> Self {
            Self {
                refuse_calls: calls.to_vec(),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn products(&self) -> Vec<String> {
            self.stored
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.product.clone())
                .collect()
        }
    }

    impl ExpenseStore for RecordingStore {
        fn append(&self, expense: &Expense) -> Result<ExpenseId, StoreError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.refuse_calls.contains(&call) {
                return Err(StoreError::Backend("disk full".into()));
            }
            self.stored.lock().unwrap().push(expense.clone());
            Ok(expense.id)
        }
    }

    fn raw(product: &str, amount: &str) -> ImportedExpense {
        ImportedExpense::new(
            product,
            amount,
            "EUR",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    fn three_with_one_invalid() -> Vec<ImportedExpense> {
        vec![raw("Bread", "1.10"), raw("Taxi", "abc"), raw("Milk", "0.95")]
    }

    fn service_with<S: ExpenseStore>(batch: Vec<ImportedExpense>, store: S) -> ImportService<S> {
        let mut registry = SourceRegistry::new();
        registry.register("fixed", FixedSource(batch));
        registry.register("down", DownSource);
        ImportService::new(registry, store)
    }

    #[test]
    fn test_bypass_counts_invalid_record() {
        let store = RecordingStore::default();
        let service = service_with(three_with_one_invalid(), &store);

        let report = service
            .import(&ImportRequest::new("fixed").bypass_wrong_expenses(true))
            .unwrap();

        assert_eq!(report.successful_imports, 2);
        assert_eq!(report.failed_imports, 1);
        assert_eq!(report.total(), 3);
        assert!(report.run_id.is_some());
        assert_eq!(
            report.message.as_deref(),
            Some("Imported 2 of 3 expenses from fixed")
        );
        assert_eq!(store.calls(), 2);
        assert_eq!(store.products(), vec!["Bread", "Milk"]);
    }

    #[test]
    fn test_invalid_record_aborts_before_any_append() {
        let store = RecordingStore::default();
        let service = service_with(three_with_one_invalid(), &store);

        let err = service.import(&ImportRequest::new("fixed")).unwrap_err();

        match &err {
            ImportError::ValidationFailed {
                product, amount, ..
            } => {
                assert_eq!(product, "Taxi");
                assert_eq!(amount, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("Taxi of abc EUR"));
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_unknown_source_never_touches_store() {
        let store = RecordingStore::default();
        let service = service_with(three_with_one_invalid(), &store);

        for bypass in [false, true] {
            let err = service
                .import(&ImportRequest::new("bank").bypass_wrong_expenses(bypass))
                .unwrap_err();
            assert_eq!(err, ImportError::UnknownSource("bank".into()));
        }
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_unavailable_source_aborts_even_with_bypass() {
        let store = RecordingStore::default();
        let service = service_with(Vec::new(), &store);

        let err = service
            .import(&ImportRequest::new("down").bypass_wrong_expenses(true))
            .unwrap_err();

        assert_eq!(
            err,
            ImportError::SourceUnavailable {
                source_id: "down".into(),
                reason: "File not found: sheet.csv".into(),
            }
        );
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_empty_batch_reports_zero() {
        let store = RecordingStore::default();
        let service = service_with(Vec::new(), &store);

        for bypass in [false, true] {
            let report = service
                .import(&ImportRequest::new("fixed").bypass_wrong_expenses(bypass))
                .unwrap();
            assert_eq!(report.successful_imports, 0);
            assert_eq!(report.failed_imports, 0);
        }
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_store_failure_keeps_earlier_appends() {
        let store = RecordingStore::refusing(&[2]);
        let batch = vec![raw("Bread", "1.10"), raw("Eggs", "2.40"), raw("Milk", "0.95")];
        let service = service_with(batch, &store);

        let err = service.import(&ImportRequest::new("fixed")).unwrap_err();

        match err {
            ImportError::PersistenceFailed {
                persisted, reason, ..
            } => {
                assert_eq!(persisted, 1);
                assert_eq!(reason, "Storage error: disk full");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.calls(), 2);
        assert_eq!(store.products(), vec!["Bread"]);
    }

    #[test]
    fn test_bypass_counts_failures_from_both_passes() {
        let store = RecordingStore::refusing(&[1]);
        let batch = vec![
            raw("Bread", "1.10"),
            raw("", "3.00"),
            raw("Eggs", "2.40"),
            raw("Milk", "0.95"),
        ];
        let service = service_with(batch, &store);

        let report = service
            .import(&ImportRequest::new("fixed").bypass_wrong_expenses(true))
            .unwrap();

        assert_eq!(report.successful_imports, 2);
        assert_eq!(report.failed_imports, 2);
        assert_eq!(store.products(), vec!["Eggs", "Milk"]);
    }

    #[test]
    fn test_re_import_flag_is_inert() {
        let store = MemoryStore::new();
        let service = service_with(vec![raw("Bread", "1.10")], &store);

        let plain = service.import(&ImportRequest::new("fixed")).unwrap();
        let again = service
            .import(&ImportRequest::new("fixed").re_import(true))
            .unwrap();

        assert_eq!(plain.successful_imports, again.successful_imports);
        assert_eq!(plain.failed_imports, again.failed_imports);
        // No deduplication across runs
        assert_eq!(store.len(), 2);
        assert_ne!(plain.run_id, again.run_id);
    }

    #[test]
    fn test_example_source_into_json_repository() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        let mut registry = SourceRegistry::new();
        registry.register("example", ExampleSource::new("example data"));
        let service = ImportService::new(registry, repo);

        let report = service.import(&ImportRequest::new("example")).unwrap();

        assert_eq!(report.successful_imports, 5);
        assert_eq!(report.failed_imports, 0);
        assert_eq!(service.store().count().unwrap(), 5);

        let reopened = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        reopened.load().unwrap();
        assert_eq!(reopened.count().unwrap(), 5);
    }

    #[test]
    fn test_request_and_report_wire_format() {
        let req: ImportRequest = serde_json::from_str(r#"{"importerId":"sheets"}"#).unwrap();
        assert_eq!(req, ImportRequest::new("sheets"));

        let report = ImportReport {
            successful_imports: 2,
            failed_imports: 1,
            message: None,
            run_id: None,
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"successfulImports":2,"failedImports":1}"#
        );
    }
}

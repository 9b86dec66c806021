//! Shared clock, date and environment helpers for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Clock reporting local noon of a settable calendar date.
#[derive(Debug)]
pub struct TestClock {
    days_from_ce: AtomicI32,
}

impl TestClock {
    /// Creates a clock pinned to `today`.
    pub fn on(today: NaiveDate) -> Self {
        Self {
            days_from_ce: AtomicI32::new(today.num_days_from_ce()),
        }
    }

    /// Moves the clock to `today`.
    pub fn advance_to(&self, today: NaiveDate) {
        self.days_from_ce
            .store(today.num_days_from_ce(), Ordering::SeqCst);
    }

    #[expect(clippy::expect_used, reason = "days are only stored from valid dates")]
    fn today(&self) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(self.days_from_ce.load(Ordering::SeqCst))
            .expect("stored date is representable")
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        let noon = self.today().and_time(NaiveTime::MIN) + TimeDelta::hours(12);
        Local
            .from_local_datetime(&noon)
            .earliest()
            .unwrap_or_else(|| Utc.from_utc_datetime(&noon).with_timezone(&Local))
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local().with_timezone(&Utc)
    }
}

/// Builds a calendar date, panicking on invalid input.
#[expect(clippy::expect_used, reason = "test dates are literals")]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Parses an ISO `YYYY-MM-DD` date used in feature files.
///
/// # Errors
///
/// Returns an error when the text is not a valid date.
pub fn parse_date(text: &str) -> eyre::Result<NaiveDate> {
    text.parse::<NaiveDate>()
        .map_err(|err| eyre::eyre!("invalid date {text:?} in scenario: {err}"))
}

/// Routes library tracing output through the test harness writer.
pub fn init_test_logging() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("taskdesk=debug"))
        .with_test_writer()
        .try_init();
    drop(installed);
}

/// Guard that applies a scoped environment variable update.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets multiple environment variables for the guard lifetime.
    pub fn set_many(changes: &[(OsString, Option<OsString>)]) -> Self {
        let lock = env_lock();
        let mut previous = Vec::with_capacity(changes.len());

        for (key, value) in changes {
            previous.push((key.clone(), env::var_os(key)));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

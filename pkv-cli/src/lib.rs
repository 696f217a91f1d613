//! Reports and helpers for the `pkv` command-line shell.

use pkv_license::{KeyGenerator, KeyStatus, KeyVerifier};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Serials shipped with the reference application.
pub const DEMO_SERIALS: [&str; 3] = [
    "0D9C-DAF5-F0CB-63D5-1180",
    "DE81-89F2-2498-A173-7B41",
    "A029-9C44-6C1B-3318-4D2E",
];

/// Exit code when every checked serial is good.
pub const EXIT_GOOD: i32 = 0;

/// Exit code when at least one checked serial is not good.
pub const EXIT_REJECTED: i32 = 1;

/// Exit code for usage, seed, or scheme errors.
pub const EXIT_ERROR: i32 = 2;

/// Result of checking one serial.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CheckReport {
    pub serial: String,
    pub status: KeyStatus,
}

/// A serial produced from a seed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GeneratedKey {
    pub seed: u32,
    pub serial: String,
}

/// Checks each serial with `verifier`, preserving input order.
pub fn check_serials<S: AsRef<str>>(verifier: &KeyVerifier, serials: &[S]) -> Vec<CheckReport> {
    serials
        .iter()
        .map(|serial| {
            let serial = serial.as_ref();
            CheckReport {
                serial: serial.to_string(),
                status: verifier.check_key(serial),
            }
        })
        .collect()
}

/// Generates one serial per seed.
pub fn generate_serials(generator: &KeyGenerator, seeds: &[u32]) -> Vec<GeneratedKey> {
    seeds
        .iter()
        .map(|seed| GeneratedKey {
            seed: *seed,
            serial: generator.create_key(*seed),
        })
        .collect()
}

/// Draws `count` uniformly random seeds.
pub fn random_seeds<R: Rng>(rng: &mut R, count: usize) -> Vec<u32> {
    (0..count).map(|_| rng.r#gen::<u32>()).collect()
}

/// Returns true if every report is good.
pub fn all_good(reports: &[CheckReport]) -> bool {
    reports.iter().all(|r| r.status.is_good())
}

/// Process exit code for a `check` or `demo` run.
pub fn exit_code(reports: &[CheckReport]) -> i32 {
    if all_good(reports) {
        EXIT_GOOD
    } else {
        EXIT_REJECTED
    }
}

/// One line per report: `<serial>  <status>`.
pub fn render_checks(reports: &[CheckReport]) -> String {
    reports
        .iter()
        .map(|r| format!("{}  {}\n", r.serial, r.status))
        .collect()
}

/// One line per key: `<seed hex>  <serial>`.
pub fn render_generated(keys: &[GeneratedKey]) -> String {
    keys.iter()
        .map(|k| format!("{:08X}  {}\n", k.seed, k.serial))
        .collect()
}

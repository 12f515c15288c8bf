// src/utils/code.rs

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::config::TEST_CODE_LENGTH;
use crate::error::AppError;
use crate::models::test::{Test, TestMap};

static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[0-9]{{{}}}$", TEST_CODE_LENGTH)).expect("static pattern compiles")
});

/// Number of distinct codes (10^6).
pub const CODE_SPACE: usize = 1_000_000;

/// True if `code` has the shape of a test code.
pub fn is_valid_code(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}

/// Draws a uniformly random code, leading zeros included.
pub fn draw_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let n: usize = rng.gen_range(0..CODE_SPACE);
    format!("{:0width$}", n, width = TEST_CODE_LENGTH)
}

/// Inserts `test` under `code` unless the code is already taken.
pub fn try_insert(tests: &mut TestMap, code: String, test: Test) -> Result<(), AppError> {
    use std::collections::btree_map::Entry;

    match tests.entry(code) {
        Entry::Vacant(slot) => {
            slot.insert(test);
            Ok(())
        }
        Entry::Occupied(slot) => Err(AppError::Conflict(format!(
            "test code {} already taken",
            slot.key()
        ))),
    }
}

/// Reserves a fresh code in `tests` and inserts the record built for it.
///
/// Must run inside the tests collection's critical section so that the
/// membership check and the insertion see the same snapshot.
pub fn insert_with_fresh_code<R, F>(
    tests: &mut TestMap,
    rng: &mut R,
    build: F,
) -> Result<String, AppError>
where
    R: Rng + ?Sized,
    F: Fn(String) -> Test,
{
    if tests.len() >= CODE_SPACE {
        return Err(AppError::InternalError("test code space exhausted".to_string()));
    }

    loop {
        let candidate = draw_code(rng);
        if tests.contains_key(&candidate) {
            continue;
        }
        match try_insert(tests, candidate.clone(), build(candidate.clone())) {
            Ok(()) => return Ok(candidate),
            Err(AppError::Conflict(msg)) => {
                tracing::debug!("Retrying code generation: {}", msg);
            }
            Err(e) => return Err(e),
        }
    }
}

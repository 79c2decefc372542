#![allow(dead_code)]

pub use qcrun_test_utils::{builders, fake_executor, fixtures, init_tracing, with_timeout};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

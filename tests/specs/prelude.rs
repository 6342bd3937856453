// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the sdkdrift binary against fixtures.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the sdkdrift binary
pub fn sdkdrift_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sdkdrift"));
    cmd.env_remove("SDKDRIFT_CONFIG").env_remove("SDKDRIFT_LOG");
    cmd
}

/// `sdkdrift diff`
pub fn diff() -> RunBuilder<Text> {
    RunBuilder::new("diff")
}

/// `sdkdrift schema`
pub fn schema() -> RunBuilder<Text> {
    RunBuilder::new("schema")
}

/// `sdkdrift releases`
pub fn releases() -> RunBuilder<Text> {
    RunBuilder::new("releases")
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// Fluent builder for one subcommand run
pub struct RunBuilder<Mode = Text> {
    subcommand: &'static str,
    dir: Option<std::path::PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

#[allow(dead_code)]
impl RunBuilder<Text> {
    fn new(subcommand: &'static str) -> Self {
        Self {
            subcommand,
            dir: None,
            args: Vec::new(),
            envs: Vec::new(),
            _mode: PhantomData,
        }
    }

    pub fn json(self) -> RunBuilder<Json> {
        RunBuilder {
            subcommand: self.subcommand,
            dir: self.dir,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    /// Expect exit code 0
    pub fn passes(self) -> RunAssert {
        run_exits(self.command(), 0)
    }

    /// Expect exit code 1 (breaking change at or above the threshold)
    pub fn fails(self) -> RunAssert {
        run_exits(self.command(), 1)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }
}

#[allow(dead_code)]
impl RunBuilder<Json> {
    pub fn passes(self) -> JsonOutput {
        JsonOutput::from(run_exits(self.command(), 0))
    }

    pub fn fails(self) -> JsonOutput {
        JsonOutput::from(run_exits(self.command(), 1))
    }
}

#[allow(dead_code)]
impl<Mode: 'static> RunBuilder<Mode> {
    /// Set fixture directory by name
    pub fn on(mut self, fixture_name: &str) -> Self {
        self.dir = Some(fixture(fixture_name));
        self
    }

    /// Set working directory (alternative to fixture)
    pub fn pwd(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the command without running it
    fn command(self) -> Command {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();
        let mut cmd = sdkdrift_cmd();
        cmd.arg(self.subcommand);
        cmd.args(&self.args);

        if is_json {
            cmd.args(["-o", "json"]);
        }

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        cmd
    }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Parsed JSON output of a run
pub struct JsonOutput {
    value: serde_json::Value,
    run: RunAssert,
}

impl From<RunAssert> for JsonOutput {
    fn from(run: RunAssert) -> Self {
        let value = serde_json::from_str(&run.stdout()).unwrap_or_else(|e| {
            panic!("stdout should be JSON: {e}\n{}", run.stdout());
        });
        Self { value, run }
    }
}

#[allow(dead_code)]
impl JsonOutput {
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a top-level key, panicking when missing
    pub fn require(&self, key: &str) -> &serde_json::Value {
        self.value
            .get(key)
            .unwrap_or_else(|| panic!("missing key `{key}` in:\n{}", self.run.stdout()))
    }

    /// Items of the impact report
    pub fn items(&self) -> &[serde_json::Value] {
        self.require("report")["items"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Files listed under a level
    pub fn files_at(&self, level: &str) -> Vec<&str> {
        self.require("report")["levels"][level]
            .as_array()
            .map(|files| files.iter().filter_map(|f| f["file"].as_str()).collect())
            .unwrap_or_default()
    }

    pub fn stderr(&self) -> String {
        self.run.stderr()
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }

    /// Assert stderr does not match predicate.
    pub fn stderr_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            !predicate.into_predicate().eval(&stderr),
            "stderr should NOT match predicate:\n{}",
            stderr
        );
        self
    }
}

/// Get path to a test fixture directory
pub fn fixture(name: &str) -> std::path::PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    std::path::PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

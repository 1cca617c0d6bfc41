//! Behavioural tests for decoding sessions.

use std::cell::RefCell;
use std::process::ExitCode;
use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value as Json;
use tessera_config::Config;

use super::support::{RunOutput, StaticLoader, run_cli, sample_line};

type StepResult = Result<(), String>;

/// A quoted string parameter from a feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Quoted(String);

impl FromStr for Quoted {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').to_owned()))
    }
}

#[derive(Default)]
struct SessionWorld {
    input: String,
    output: Option<RunOutput>,
}

impl SessionWorld {
    fn output(&self) -> Result<&RunOutput, String> {
        self.output
            .as_ref()
            .ok_or_else(|| String::from("decoder has not run"))
    }

    fn line(&self, ordinal: usize) -> Result<Json, String> {
        let output = self.output()?;
        let line = output
            .stdout_lines()
            .get(ordinal.saturating_sub(1))
            .copied()
            .ok_or_else(|| format!("no output line {ordinal}"))?;
        serde_json::from_str(line).map_err(|error| format!("line {ordinal} is not JSON: {error}"))
    }
}

#[fixture]
fn world() -> RefCell<SessionWorld> {
    RefCell::new(SessionWorld::default())
}

fn push_sample(world: &RefCell<SessionWorld>, name: &Quoted) -> StepResult {
    let line = sample_line(&name.0).ok_or_else(|| format!("unknown sample {}", name.0))?;
    let mut world = world.borrow_mut();
    world.input.push_str(line);
    world.input.push('\n');
    Ok(())
}

#[given("a {name} line")]
fn given_a_line(world: &RefCell<SessionWorld>, name: Quoted) -> StepResult {
    push_sample(world, &name)
}

#[given("an {name} line")]
fn given_an_line(world: &RefCell<SessionWorld>, name: Quoted) -> StepResult {
    push_sample(world, &name)
}

#[when("the decoder runs")]
fn when_runs(world: &RefCell<SessionWorld>) {
    let loader = StaticLoader::new(Config::default());
    let mut world = world.borrow_mut();
    let output = run_cli(&loader, &[], &world.input);
    world.output = Some(output);
}

#[when("the decoder runs with {flag}")]
fn when_runs_with(world: &RefCell<SessionWorld>, flag: Quoted) {
    let loader = StaticLoader::new(Config::default());
    let mut world = world.borrow_mut();
    let output = run_cli(&loader, &[flag.0.as_str()], &world.input);
    world.output = Some(output);
}

#[then("the exit status is {status}")]
fn then_exit_status(world: &RefCell<SessionWorld>, status: u8) -> StepResult {
    let world = world.borrow();
    let exit = world.output()?.exit;
    if exit == ExitCode::from(status) {
        Ok(())
    } else {
        Err(format!("expected exit status {status}, got {exit:?}"))
    }
}

#[then("{count} lines are written")]
fn then_line_count(world: &RefCell<SessionWorld>, count: usize) -> StepResult {
    let world = world.borrow();
    let written = world.output()?.stdout_lines().len();
    if written == count {
        Ok(())
    } else {
        Err(format!("expected {count} lines, found {written}"))
    }
}

#[then("output line {ordinal} is a {kind} message")]
fn then_message_kind(world: &RefCell<SessionWorld>, ordinal: usize, kind: Quoted) -> StepResult {
    check_kind(&world.borrow().line(ordinal)?, &kind.0)
}

#[then("output line {ordinal} is an {kind} message")]
fn then_message_kind_an(world: &RefCell<SessionWorld>, ordinal: usize, kind: Quoted) -> StepResult {
    check_kind(&world.borrow().line(ordinal)?, &kind.0)
}

fn check_kind(line: &Json, kind: &str) -> StepResult {
    if line.get("type").and_then(Json::as_str) == Some(kind) {
        Ok(())
    } else {
        Err(format!("expected a {kind} message, found {line}"))
    }
}

#[then("output line {ordinal} is an error reply with code {code}")]
fn then_error_reply(world: &RefCell<SessionWorld>, ordinal: usize, code: i64) -> StepResult {
    let line = world.borrow().line(ordinal)?;
    let found = line
        .get("error")
        .and_then(|error| error.get("code"))
        .and_then(Json::as_i64);
    if line.get("type").and_then(Json::as_str) == Some("reply") && found == Some(code) {
        Ok(())
    } else {
        Err(format!("expected error code {code}, found {line}"))
    }
}

#[scenario(path = "tests/features/decoding_session.feature")]
fn decoding_session(world: RefCell<SessionWorld>) {
    let _ = world;
}

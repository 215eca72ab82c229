//! Step definitions for `cligen` behavioural tests.

use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow, ensure};
use camino::Utf8Path;
use rstest_bdd_macros::{given, then, when};

use crate::fixtures::{FRONT_END, GenerationContext, SOURCE, STUB};

const SERVE_ARGS: &str = r##"
pub struct ServeArgs {
    #[tag = r#"cli:"port,p,default:8080""#]
    pub port: i64,
    #[tag = r#"cli:"env,e,required,options:dev|staging|prod|local""#]
    pub env: String,
}
"##;

const EDITED_STUB: &str = "// edited by hand\n";

#[given("a source file declaring the serve arguments")]
fn serve_source(generation_context: &GenerationContext) -> Result<()> {
    let root = generation_context.root()?;
    std::fs::write(root.join(SOURCE), SERVE_ARGS).context("write source")?;
    Ok(())
}

#[given("a source file declaring a field with the directive {token}")]
fn source_with_directive(generation_context: &GenerationContext, token: String) -> Result<()> {
    let root = generation_context.root()?;
    let source = format!(
        "pub struct ServeArgs {{\n    #[tag = r#\"cli:\"port,{token}\"\"#]\n    pub port: i64,\n}}\n"
    );
    std::fs::write(root.join(SOURCE), source).context("write source")?;
    Ok(())
}

#[given("an edited implementation stub for serve")]
fn edited_stub(generation_context: &GenerationContext) -> Result<()> {
    let stub = generation_context.root()?.join(STUB);
    let dir = stub.parent().ok_or_else(|| anyhow!("stub has a parent"))?;
    std::fs::create_dir_all(dir).context("create stub directory")?;
    std::fs::write(&stub, EDITED_STUB).context("write stub")?;
    Ok(())
}

#[when("I run cligen for serve")]
fn run_serve(generation_context: &GenerationContext) -> Result<()> {
    record(generation_context, &["serve", "Start the server", FRONT_END], true)
}

#[when("I run cligen for serve again")]
fn rerun_serve(generation_context: &GenerationContext) -> Result<()> {
    let previous = read(generation_context, FRONT_END)?;
    generation_context.previous_front_end.set(previous);
    record(generation_context, &["serve", "Start the server", FRONT_END], true)
}

#[when("I run cligen for deploy")]
fn run_deploy(generation_context: &GenerationContext) -> Result<()> {
    record(generation_context, &["deploy", "Deploy", FRONT_END], true)
}

#[when("I run cligen for serve without a source file")]
fn run_without_source(generation_context: &GenerationContext) -> Result<()> {
    record(generation_context, &["serve", "Start the server", FRONT_END], false)
}

#[when("I run cligen for serve denying unknown directives")]
fn run_denying(generation_context: &GenerationContext) -> Result<()> {
    record(
        generation_context,
        &[
            "--command=serve",
            "--help=Start the server",
            "--deny-unknown-directives",
        ],
        true,
    )
}

#[then("the command succeeds")]
fn command_succeeds(generation_context: &GenerationContext) -> Result<()> {
    let output = last_output(generation_context)?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    ensure!(output.status.success(), "cligen should succeed: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    ensure!(
        stdout.contains("Generated CLI code in "),
        "unexpected stdout: {stdout}"
    );
    Ok(())
}

#[then("the command fails mentioning {text}")]
fn command_fails(generation_context: &GenerationContext, text: String) -> Result<()> {
    let output = last_output(generation_context)?;
    ensure!(!output.status.success(), "cligen should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    ensure!(
        stderr.contains("cligen: ") && stderr.contains(&text),
        "expected '{text}' in stderr, got: {stderr}"
    );
    Ok(())
}

#[then("the front end registers {flag} with short flag {short}")]
fn registers_flag(
    generation_context: &GenerationContext,
    flag: String,
    short: char,
) -> Result<()> {
    let front_end = read(generation_context, FRONT_END)?;
    ensure!(
        front_end.contains(&format!("Arg::new({flag:?})")),
        "missing registration for {flag}"
    );
    ensure!(
        front_end.contains(&format!(".short({short:?})")),
        "missing short flag {short}"
    );
    Ok(())
}

#[then("the front end requires {flag}")]
fn requires_flag(generation_context: &GenerationContext, flag: String) -> Result<()> {
    let front_end = read(generation_context, FRONT_END)?;
    ensure!(
        front_end.contains(&format!("\"--{flag} is required\"")),
        "missing required check for {flag}"
    );
    Ok(())
}

#[then("the front end restricts {flag} to {values}")]
fn restricts_flag(
    generation_context: &GenerationContext,
    flag: String,
    values: String,
) -> Result<()> {
    let front_end = read(generation_context, FRONT_END)?;
    let message = format!("invalid value for --{flag}: must be one of [{values}]");
    ensure!(
        front_end.contains(&message),
        "missing allowed values for {flag}"
    );
    Ok(())
}

#[then("the implementation stub exists")]
fn stub_exists(generation_context: &GenerationContext) -> Result<()> {
    let stub = read(generation_context, STUB)?;
    ensure!(stub.contains("pub fn run(args: &ServeArgs)"), "unexpected stub: {stub}");
    Ok(())
}

#[then("the implementation stub keeps its edits")]
fn stub_kept(generation_context: &GenerationContext) -> Result<()> {
    let stub = read(generation_context, STUB)?;
    ensure!(stub == EDITED_STUB, "stub was overwritten: {stub}");
    Ok(())
}

#[then("the front end is unchanged")]
fn front_end_unchanged(generation_context: &GenerationContext) -> Result<()> {
    let previous = generation_context
        .previous_front_end
        .take()
        .ok_or_else(|| anyhow!("previous front end should be recorded"))?;
    let current = read(generation_context, FRONT_END)?;
    ensure!(previous == current, "front end changed between runs");
    Ok(())
}

/// Runs the binary in the scratch directory and stores its output.
fn record(ctx: &GenerationContext, args: &[&str], with_source: bool) -> Result<()> {
    let root = ctx.root()?;
    let mut command = Command::new(env!("CARGO_BIN_EXE_cligen"));
    command.current_dir(root.as_str()).args(args);
    if with_source {
        command.env("CLIGEN_SOURCE", root.join(SOURCE).as_str());
    } else {
        command.env_remove("CLIGEN_SOURCE");
    }
    let output = command.output().context("spawn cligen")?;
    ctx.last_output.set(output);
    Ok(())
}

fn last_output(ctx: &GenerationContext) -> Result<Output> {
    ctx.last_output
        .take()
        .ok_or_else(|| anyhow!("cligen has not been run"))
}

fn read(ctx: &GenerationContext, relative: &str) -> Result<String> {
    let path = ctx.root()?.join(Utf8Path::new(relative));
    std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
}

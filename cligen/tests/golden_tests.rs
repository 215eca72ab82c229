//! Golden tests for the generated `serve` crate.
//!
//! The expected files live under `tests/golden/`. Any change to the emitted
//! text must be mirrored there.

use camino::{Utf8Path, Utf8PathBuf};
use cligen::directive::UnknownDirectivePolicy;
use cligen::generator::{Generator, GeneratorConfig};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const SERVE_ARGS: &str = r##"
pub struct ServeArgs {
    #[tag = r#"cli:"port,p,default:8080,usage:Port to listen on""#]
    pub port: i64,
    #[tag = r#"cli:"env,e,required,options:dev|staging|prod|local""#]
    pub env: String,
}
"##;

const GOLDEN_FRONT_END: &str = include_str!("golden/serve_main.rs.golden");
const GOLDEN_MANIFEST: &str = include_str!("golden/serve_manifest.toml.golden");

struct Generated {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl Generated {
    fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root.join(Utf8Path::new(relative)))
            .unwrap_or_else(|err| panic!("read {relative}: {err}"))
    }
}

#[fixture]
fn generated() -> Generated {
    let temp = tempfile::tempdir().unwrap_or_else(|err| panic!("create temp dir: {err}"));
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .unwrap_or_else(|path| panic!("non-UTF-8 temp dir: {}", path.display()));
    std::fs::write(root.join("args.rs"), SERVE_ARGS)
        .unwrap_or_else(|err| panic!("write source: {err}"));
    Generator::new(GeneratorConfig {
        command: "serve".to_owned(),
        help: "Start the server".to_owned(),
        source: root.join("args.rs"),
        output: Some(root.join("serve/src/main.rs")),
        policy: UnknownDirectivePolicy::Deny,
    })
    .generate()
    .unwrap_or_else(|err| panic!("generate serve crate: {err}"));
    Generated { _temp: temp, root }
}

#[rstest]
fn golden_front_end(generated: Generated) {
    assert_eq!(generated.read("serve/src/main.rs"), GOLDEN_FRONT_END);
}

#[rstest]
fn golden_manifest(generated: Generated) {
    assert_eq!(generated.read("serve/Cargo.toml"), GOLDEN_MANIFEST);
}

/// The help path prints the help string itself, so the clap command must
/// not carry it a second time as `about`.
#[rstest]
fn golden_help_string_appears_once(generated: Generated) {
    let front_end = generated.read("serve/src/main.rs");
    assert_eq!(front_end.matches("\"Start the server\"").count(), 1);
    assert!(!front_end.contains(".about("));
}

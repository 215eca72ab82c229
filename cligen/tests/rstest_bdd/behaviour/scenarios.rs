//! Binds the `cligen` feature files to the step registry.

use crate::fixtures::{GenerationContext, generation_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/generate.feature",
    fixtures = [generation_context: GenerationContext]
);

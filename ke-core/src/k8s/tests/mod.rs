
use assertables::*;
use ke_testutils::*;
use rstest::*;

use super::*;
use crate::prelude::*;

fn edit_error(err: &anyhow::Error) -> &EditError {
    err.downcast_ref::<EditError>().expect("expected an EditError")
}

mod cli_test;

use assertables::*;
use ke_core::prelude::*;
use ke_testutils::*;
use rstest::*;

use super::*;

/* src/cli/core/src/config/tests/mod.rs */

use super::loader::{CONFIG_FILE, find_isomorph_config, load_isomorph_config};
use super::*;

mod parsing;

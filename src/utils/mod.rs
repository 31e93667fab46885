//! Helpers shared by rules and the fix pipeline.

pub mod fix_utils;

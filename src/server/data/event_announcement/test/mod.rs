use super::*;
use test_utils::{builder::TestBuilder, factory};

mod claim_notified;
mod delete;

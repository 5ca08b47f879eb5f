use super::*;
use crate::server::model::vote::{
    ConcludedVote, CreateConcludedVoteParam, CreateOngoingVoteParam, OngoingVote, VoteTally,
};
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod concluded;
mod ongoing;

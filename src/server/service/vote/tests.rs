use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};
use serenity::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use test_utils::{builder::TestBuilder, factory};

use crate::server::error::publisher::PublisherError;

/// Publisher double counting submissions.
struct CountingPublisher {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingPublisher {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProposalPublisher for CountingPublisher {
    async fn submit(&self, proposal: &Proposal) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PublisherError::Timeout(1).into());
        }
        Ok(format!("https://ledger.test/proposal/{}", proposal.id))
    }
}

fn settings() -> VoteSettings {
    VoteSettings {
        window: Duration::hours(48),
        quorum: 5,
        general_channel_name: "general-proposals".to_string(),
        budget_channel_name: "budget-proposals".to_string(),
    }
}

fn http() -> Arc<Http> {
    Arc::new(Http::new(""))
}

async fn ongoing_vote(db: &DatabaseConnection) -> Result<OngoingVote, AppError> {
    let (_proposal, vote) = factory::helpers::create_published_proposal(db).await?;
    Ok(OngoingVote::from_entity(vote)?)
}

/// Tests a vote reaching the quorum passes and is submitted to the ledger.
///
/// Expected: tallies stored exactly, publisher invoked once, link stored, proposal concluded
#[tokio::test]
async fn passing_vote_is_submitted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();
    let publisher = CountingPublisher::new(false);

    let vote = ongoing_vote(db).await?;
    let service = VoteService::new(db, http(), Some(publisher.clone()), &settings);

    let tally = VoteTally {
        yes: 5,
        no: 1,
        abstain: 0,
    };
    let concluded = service.record_conclusion(&vote, tally).await?.unwrap();

    assert!(concluded.passed);
    assert_eq!(concluded.tally, tally);
    assert_eq!(publisher.calls(), 1);
    assert_eq!(
        concluded.snapshot_url,
        Some(format!("https://ledger.test/proposal/{}", vote.proposal_id))
    );

    let proposal = ProposalRepository::new(db)
        .find_by_id(vote.proposal_id)
        .await?
        .unwrap();
    assert_eq!(proposal.status, ProposalStatus::Concluded);
    assert!(OngoingVoteRepository::new(db)
        .find_by_proposal_id(vote.proposal_id)
        .await?
        .is_none());

    Ok(())
}

/// Expected: below quorum the vote fails and the publisher is not invoked
#[tokio::test]
async fn failing_vote_is_not_submitted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();
    let publisher = CountingPublisher::new(false);

    let vote = ongoing_vote(db).await?;
    let service = VoteService::new(db, http(), Some(publisher.clone()), &settings);

    let concluded = service
        .record_conclusion(
            &vote,
            VoteTally {
                yes: 4,
                no: 0,
                abstain: 3,
            },
        )
        .await?
        .unwrap();

    assert!(!concluded.passed);
    assert!(concluded.snapshot_url.is_none());
    assert_eq!(publisher.calls(), 0);

    Ok(())
}

/// Tests concluding twice produces a single result.
///
/// Expected: second call returns None, one stored conclusion, one submission
#[tokio::test]
async fn concluding_twice_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();
    let publisher = CountingPublisher::new(false);

    let vote = ongoing_vote(db).await?;
    let service = VoteService::new(db, http(), Some(publisher.clone()), &settings);
    let tally = VoteTally {
        yes: 9,
        no: 0,
        abstain: 0,
    };

    let first = service.record_conclusion(&vote, tally).await?;
    let second = service.record_conclusion(&vote, tally).await?;

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(publisher.calls(), 1);
    assert_eq!(entity::prelude::ConcludedVote::find().count(db).await?, 1);

    Ok(())
}

/// Expected: publisher failure leaves the vote concluded without a link
#[tokio::test]
async fn publisher_failure_keeps_conclusion() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();
    let publisher = CountingPublisher::new(true);

    let vote = ongoing_vote(db).await?;
    let service = VoteService::new(db, http(), Some(publisher.clone()), &settings);

    let concluded = service
        .record_conclusion(
            &vote,
            VoteTally {
                yes: 6,
                no: 0,
                abstain: 0,
            },
        )
        .await?
        .unwrap();

    assert!(concluded.passed);
    assert!(concluded.snapshot_url.is_none());
    assert_eq!(publisher.calls(), 1);

    let stored = ConcludedVoteRepository::new(db)
        .find_by_proposal_id(vote.proposal_id)
        .await?;
    assert!(stored.is_some());

    Ok(())
}

/// Expected: Ok(None) without contacting Discord when nothing is ongoing
#[tokio::test]
async fn conclude_skips_vote_that_is_not_ongoing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();

    let service = VoteService::new(db, http(), None, &settings);

    assert!(service.conclude(12345).await?.is_none());

    Ok(())
}

/// Tests an invalid category is rejected before any Discord call.
///
/// Expected: Err(Validation), no ongoing vote, proposal still a draft
#[tokio::test]
async fn publish_rejects_invalid_category() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();

    let draft = factory::proposal::ProposalFactory::new(db)
        .guild_id("1")
        .author_id("2")
        .category("grants")
        .build()
        .await?;

    let service = VoteService::new(db, http(), None, &settings);
    let result = service.publish(1, 2, draft.id).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(entity::prelude::OngoingVote::find().count(db).await?, 0);
    let stored = ProposalRepository::new(db).find_by_id(draft.id).await?.unwrap();
    assert_eq!(stored.status, ProposalStatus::Draft);

    Ok(())
}

/// Expected: Err(NotFound) when publishing someone else's draft
#[tokio::test]
async fn publish_requires_draft_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();

    let draft = factory::proposal::ProposalFactory::new(db)
        .guild_id("1")
        .author_id("2")
        .build()
        .await?;

    let service = VoteService::new(db, http(), None, &settings);
    let result = service.publish(1, 3, draft.id).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests cancelling removes the vote and marks the proposal cancelled, once.
///
/// Expected: Ok then Err(NotFound)
#[tokio::test]
async fn records_cancellation_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();

    let vote = ongoing_vote(db).await?;
    let service = VoteService::new(db, http(), None, &settings);

    let cancelled = service.record_cancellation(vote.proposal_id).await?;
    let again = service.record_cancellation(vote.proposal_id).await;

    assert_eq!(cancelled.proposal_id, vote.proposal_id);
    assert!(matches!(again, Err(AppError::NotFound(_))));

    let proposal = ProposalRepository::new(db)
        .find_by_id(vote.proposal_id)
        .await?
        .unwrap();
    assert_eq!(proposal.status, ProposalStatus::Cancelled);

    Ok(())
}

/// Expected: a cancelled vote can no longer be concluded
#[tokio::test]
async fn cancelled_vote_cannot_conclude() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();
    let publisher = CountingPublisher::new(false);

    let vote = ongoing_vote(db).await?;
    let service = VoteService::new(db, http(), Some(publisher.clone()), &settings);

    service.record_cancellation(vote.proposal_id).await?;
    let result = service
        .record_conclusion(
            &vote,
            VoteTally {
                yes: 10,
                no: 0,
                abstain: 0,
            },
        )
        .await?;

    assert!(result.is_none());
    assert_eq!(publisher.calls(), 0);

    Ok(())
}

/// Tests a vote whose proposal already left the published state is neither cancelled nor
/// concluded.
///
/// Expected: cancel returns Err(NotFound), conclude returns None, nothing is written
#[tokio::test]
async fn stale_vote_is_rolled_back() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let settings = settings();

    let proposal = factory::proposal::ProposalFactory::new(db)
        .status("concluded")
        .build()
        .await?;
    let vote = OngoingVote::from_entity(factory::create_ongoing_vote(db, &proposal).await?)?;
    let service = VoteService::new(db, http(), None, &settings);

    let cancelled = service.record_cancellation(vote.proposal_id).await;
    assert!(matches!(cancelled, Err(AppError::NotFound(_))));

    let concluded = service
        .record_conclusion(
            &vote,
            VoteTally {
                yes: 7,
                no: 0,
                abstain: 0,
            },
        )
        .await?;
    assert!(concluded.is_none());

    let stored = ProposalRepository::new(db)
        .find_by_id(vote.proposal_id)
        .await?
        .unwrap();
    assert_eq!(stored.status, ProposalStatus::Concluded);
    assert!(OngoingVoteRepository::new(db)
        .find_by_proposal_id(vote.proposal_id)
        .await?
        .is_some());
    assert_eq!(entity::prelude::ConcludedVote::find().count(db).await?, 0);

    Ok(())
}

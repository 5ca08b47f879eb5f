use super::*;

/// Tests storing a freshly published vote.
///
/// Expected: Ok with Discord ids stored and returned as u64
#[tokio::test]
async fn creates_ongoing_vote() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let proposal = factory::proposal::ProposalFactory::new(db)
        .guild_id("5")
        .status("published")
        .build()
        .await?;
    let now = chrono::DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap();

    let vote = OngoingVoteRepository::new(db)
        .create(CreateOngoingVoteParam {
            proposal_id: proposal.id,
            guild_id: 5,
            title: proposal.title.clone(),
            channel_id: 11,
            thread_id: 12,
            message_id: 13,
            published_at: now,
            end_time: now + Duration::hours(48),
        })
        .await?;

    assert_eq!(vote.proposal_id, proposal.id);
    assert_eq!(vote.thread_id, 12);
    assert_eq!(vote.message_id, 13);
    assert_eq!(vote.end_time - vote.published_at, Duration::hours(48));

    Ok(())
}

/// Tests that deleting claims the vote exactly once.
///
/// Expected: true on first delete, false on second
#[tokio::test]
async fn delete_claims_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (proposal, _vote) = factory::helpers::create_published_proposal(db).await?;

    let repo = OngoingVoteRepository::new(db);
    assert!(repo.delete(proposal.id).await?);
    assert!(!repo.delete(proposal.id).await?);
    assert!(repo.find_by_proposal_id(proposal.id).await?.is_none());

    Ok(())
}

/// Expected: Ok with votes ordered by end time
#[tokio::test]
async fn get_all_orders_by_end_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let later = factory::proposal::ProposalFactory::new(db)
        .status("published")
        .build()
        .await?;
    factory::ongoing_vote::OngoingVoteFactory::new(db, &later)
        .end_time(Utc::now() + Duration::hours(40))
        .build()
        .await?;
    let sooner = factory::proposal::ProposalFactory::new(db)
        .status("published")
        .build()
        .await?;
    factory::ongoing_vote::OngoingVoteFactory::new(db, &sooner)
        .end_time(Utc::now() + Duration::hours(1))
        .build()
        .await?;

    let votes: Vec<OngoingVote> = OngoingVoteRepository::new(db).get_all().await?;

    assert_eq!(votes.len(), 2);
    assert_eq!(votes[0].proposal_id, sooner.id);
    assert_eq!(votes[1].proposal_id, later.id);

    Ok(())
}

#[tokio::test]
async fn finds_vote_by_thread() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (proposal, vote) = factory::helpers::create_published_proposal(db).await?;

    let found = OngoingVoteRepository::new(db)
        .find_by_thread_id(vote.thread_id.parse().unwrap())
        .await?;

    assert_eq!(found.map(|v| v.proposal_id), Some(proposal.id));

    Ok(())
}

/// Expected: only the requested guild's votes are returned
#[tokio::test]
async fn get_by_guild_filters_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (proposal, _vote) = factory::helpers::create_published_proposal(db).await?;
    factory::helpers::create_published_proposal(db).await?;

    let votes = OngoingVoteRepository::new(db)
        .get_by_guild(proposal.guild_id.parse().unwrap())
        .await?;

    assert_eq!(votes.len(), 1);
    assert_eq!(entity::prelude::OngoingVote::find().count(db).await?, 2);

    Ok(())
}

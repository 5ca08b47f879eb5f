use super::*;

async fn conclude_vote(
    db: &sea_orm::DatabaseConnection,
    tally: VoteTally,
    passed: bool,
) -> Result<ConcludedVote, DbErr> {
    let (_proposal, vote) = factory::helpers::create_published_proposal(db).await?;
    let vote = OngoingVote::from_entity(vote)?;

    ConcludedVoteRepository::new(db)
        .create(CreateConcludedVoteParam {
            vote,
            tally,
            passed,
            concluded_at: Utc::now(),
        })
        .await
}

/// Tests storing the final tally.
///
/// Expected: Ok with counts, outcome and no ledger link yet
#[tokio::test]
async fn creates_concluded_vote() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let tally = VoteTally {
        yes: 6,
        no: 1,
        abstain: 2,
    };
    let concluded = conclude_vote(db, tally, true).await?;

    assert_eq!(concluded.tally, tally);
    assert!(concluded.passed);
    assert!(concluded.snapshot_url.is_none());

    Ok(())
}

#[tokio::test]
async fn sets_snapshot_url() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let concluded = conclude_vote(db, VoteTally::default(), true).await?;

    let updated = ConcludedVoteRepository::new(db)
        .set_snapshot_url(
            concluded.proposal_id,
            "https://snapshot.org/#/bloom/proposal/0xabc".to_string(),
        )
        .await?;

    assert_eq!(
        updated.snapshot_url.as_deref(),
        Some("https://snapshot.org/#/bloom/proposal/0xabc")
    );

    Ok(())
}

/// Expected: Err(RecordNotFound) for a proposal that never concluded
#[tokio::test]
async fn set_snapshot_url_requires_conclusion() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ConcludedVoteRepository::new(db)
        .set_snapshot_url(999, "https://example.org".to_string())
        .await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}

/// Expected: Ok with only that guild's conclusions
#[tokio::test]
async fn get_by_guild_filters_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = conclude_vote(db, VoteTally::default(), false).await?;
    conclude_vote(db, VoteTally::default(), false).await?;

    let votes = ConcludedVoteRepository::new(db)
        .get_by_guild(first.guild_id)
        .await?;

    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].proposal_id, first.proposal_id);

    Ok(())
}

use super::*;

#[tokio::test]
async fn moves_between_expected_statuses() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_proposal(db).await?;

    let repo = ProposalRepository::new(db);
    let changed = repo
        .transition_status(draft.id, ProposalStatus::Draft, ProposalStatus::Published)
        .await?;

    assert!(changed);
    let stored = repo.find_by_id(draft.id).await?.unwrap();
    assert_eq!(stored.status, ProposalStatus::Published);

    Ok(())
}

/// Tests the transition is refused when the current status does not match.
///
/// Expected: Ok(false) and status unchanged on the second attempt
#[tokio::test]
async fn refuses_transition_from_other_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_proposal(db).await?;

    let repo = ProposalRepository::new(db);
    repo.transition_status(draft.id, ProposalStatus::Draft, ProposalStatus::Published)
        .await?;
    let second = repo
        .transition_status(draft.id, ProposalStatus::Draft, ProposalStatus::Published)
        .await?;

    assert!(!second);

    Ok(())
}

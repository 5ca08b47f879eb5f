use super::*;

#[tokio::test]
async fn deletes_draft() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_proposal(db).await?;

    let repo = ProposalRepository::new(db);
    assert!(repo.delete_draft(draft.id).await?);
    assert!(repo.find_by_id(draft.id).await?.is_none());

    Ok(())
}

/// Tests a published proposal survives a delete attempt.
///
/// Expected: Ok(false) and the proposal still stored
#[tokio::test]
async fn keeps_published_proposal() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (proposal, _vote) = factory::helpers::create_published_proposal(db).await?;

    let repo = ProposalRepository::new(db);
    assert!(!repo.delete_draft(proposal.id).await?);
    assert!(repo.find_by_id(proposal.id).await?.is_some());

    Ok(())
}

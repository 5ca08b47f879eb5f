use super::*;

/// Tests creating a draft proposal.
///
/// Expected: Ok with draft status and ids round-tripped as u64
#[tokio::test]
async fn creates_draft() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProposalRepository::new(db);
    let proposal = repo.create(create_param(10, 20, "Garden")).await?;

    assert_eq!(proposal.guild_id, 10);
    assert_eq!(proposal.author_id, 20);
    assert_eq!(proposal.title, "Garden");
    assert_eq!(proposal.category, "budget");
    assert_eq!(proposal.status, ProposalStatus::Draft);
    assert_eq!(proposal.additional.as_deref(), Some("Quotes attached"));

    let stored = entity::prelude::Proposal::find_by_id(proposal.id)
        .one(db)
        .await?;
    assert!(stored.is_some());

    Ok(())
}

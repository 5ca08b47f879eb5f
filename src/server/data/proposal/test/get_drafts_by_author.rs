use super::*;

/// Tests listing only the author's drafts within one guild.
///
/// Expected: Ok with drafts of that author and guild, other statuses excluded
#[tokio::test]
async fn returns_only_authors_drafts() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::proposal::ProposalFactory::new(db)
        .guild_id("1")
        .author_id("7")
        .build()
        .await?;
    factory::proposal::ProposalFactory::new(db)
        .guild_id("1")
        .author_id("7")
        .status("published")
        .build()
        .await?;
    factory::proposal::ProposalFactory::new(db)
        .guild_id("1")
        .author_id("8")
        .build()
        .await?;
    factory::proposal::ProposalFactory::new(db)
        .guild_id("2")
        .author_id("7")
        .build()
        .await?;

    let drafts = ProposalRepository::new(db)
        .get_drafts_by_author(1, 7)
        .await?;

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, draft.id);

    Ok(())
}

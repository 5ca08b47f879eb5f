use super::*;

/// Tests editing a draft replaces its content.
///
/// Expected: Ok(Some) with new content
#[tokio::test]
async fn updates_draft_content() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let draft = factory::create_proposal(db).await?;

    let repo = ProposalRepository::new(db);
    let updated = repo
        .update(UpdateProposalParam {
            id: draft.id,
            title: "Renamed".to_string(),
            category: ProposalCategory::Budget,
            abstract_text: "New abstract".to_string(),
            background: "New background".to_string(),
            additional: None,
        })
        .await?
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.category, "budget");
    assert_eq!(updated.abstract_text, "New abstract");
    assert!(updated.updated_at >= draft.updated_at);

    Ok(())
}

/// Tests published proposals cannot be edited.
///
/// Expected: Ok(None) and stored content unchanged
#[tokio::test]
async fn ignores_published_proposal() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let published = factory::proposal::ProposalFactory::new(db)
        .status("published")
        .build()
        .await?;

    let repo = ProposalRepository::new(db);
    let result = repo
        .update(UpdateProposalParam {
            id: published.id,
            title: "Sneaky edit".to_string(),
            category: ProposalCategory::General,
            abstract_text: String::new(),
            background: String::new(),
            additional: None,
        })
        .await?;

    assert!(result.is_none());

    let stored = repo.find_by_id(published.id).await?.unwrap();
    assert_eq!(stored.title, published.title);

    Ok(())
}

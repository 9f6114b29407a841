//! Integration tests for the relational repositories.
//!
//! Each test gets a fresh SQLite database with the schema bootstrapped.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use labsite_core::news::{CreateNews, UpdateNews};
use labsite_core::patent::{CreatePatent, PatentStatus, PatentType, UpdatePatent};
use labsite_core::project::{CreateProject, UpdateProject};
use labsite_core::publication::{CreatePublication, UpdatePublication};
use labsite_core::team_member::{CreateTeamMember, MemberCategory, UpdateTeamMember};
use labsite_core::todo::{CreateTodo, TodoPriority, UpdateTodo};
use labsite_core::user::{CreateUser, UpdateUser, UserRole};
use labsite_db::repositories::{
    NewsRepo, PatentRepo, ProjectRepo, PublicationRepo, TeamMemberRepo, TodoRepo, UserRepo,
};
use labsite_db::StoreError;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn setup(pool: &SqlitePool) {
    labsite_db::initialize_schema(pool).await.unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_member(name: &str, category: MemberCategory) -> CreateTeamMember {
    CreateTeamMember {
        name: name.to_string(),
        title: "Researcher".to_string(),
        degree: None,
        research: "Optics".to_string(),
        email: format!("{}@lab.edu", name.to_lowercase().replace(' ', ".")),
        category,
        google_scholar: None,
        research_gate: None,
        orcid: None,
        bio: None,
        photo_url: None,
        is_active: None,
        join_date: None,
    }
}

fn new_publication(title: &str, year: i32, keywords: &[&str]) -> CreatePublication {
    CreatePublication {
        title: title.to_string(),
        authors: "Zhang Ming, Li Hua".to_string(),
        journal: "Optics Letters".to_string(),
        year,
        volume: None,
        issue: None,
        pages: None,
        doi: None,
        abstract_text: None,
        pdf_url: None,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        citation_count: None,
        is_highlighted: None,
    }
}

fn new_patent(title: &str, applied: NaiveDate, status: PatentStatus) -> CreatePatent {
    CreatePatent {
        title: title.to_string(),
        inventors: "Zhang Ming".to_string(),
        inventor_ids: Some(vec![1, 2]),
        patent_number: format!("CN-{}", title.len()),
        application_date: applied,
        grant_date: None,
        abstract_text: None,
        keywords: vec!["laser".to_string()],
        status,
        patent_type: PatentType::Invention,
        pdf_url: None,
        is_highlighted: None,
    }
}

fn new_project(name: &str, start: NaiveDate, is_active: Option<bool>) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        source: Some("NSFC".to_string()),
        funding_amount: Some(500_000.0),
        start_date: start,
        end_date: None,
        leader: Some("Zhang Ming".to_string()),
        is_active,
    }
}

fn new_news(title: &str, published: NaiveDate) -> CreateNews {
    CreateNews {
        title: title.to_string(),
        content: "Body".to_string(),
        publish_date: published,
        author: None,
        is_published: None,
        image_url: None,
    }
}

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password: "irrelevant-here".to_string(),
        name: "Editor".to_string(),
        email: email.to_string(),
        role: None,
        is_active: None,
    }
}

// ---------------------------------------------------------------------------
// Team members
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_team_member_round_trip(pool: SqlitePool) {
    setup(&pool).await;

    let created = TeamMemberRepo::create(&pool, &new_member("Zhang Ming", MemberCategory::Professor))
        .await
        .unwrap();
    assert!(created.is_active);

    let found = TeamMemberRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(found, Some(created.clone()));

    assert!(TeamMemberRepo::delete(&pool, created.id).await.unwrap());
    assert!(!TeamMemberRepo::delete(&pool, created.id).await.unwrap());
    assert!(TeamMemberRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = false)]
async fn test_team_member_filters(pool: SqlitePool) {
    setup(&pool).await;
    TeamMemberRepo::create(&pool, &new_member("Zhang Ming", MemberCategory::Professor))
        .await
        .unwrap();
    TeamMemberRepo::create(&pool, &new_member("Amy Chen", MemberCategory::Student))
        .await
        .unwrap();
    TeamMemberRepo::create(&pool, &new_member("Bo Li", MemberCategory::Student))
        .await
        .unwrap();

    let all = TeamMemberRepo::list(&pool).await.unwrap();
    let names: Vec<_> = all.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Amy Chen", "Bo Li", "Zhang Ming"]);

    let students = TeamMemberRepo::list_by_category(&pool, MemberCategory::Student)
        .await
        .unwrap();
    assert_eq!(students.len(), 2);

    let found = TeamMemberRepo::search(&pool, "zhang").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Zhang Ming");

    assert_eq!(TeamMemberRepo::count(&pool).await.unwrap(), 3);
}

#[sqlx::test(migrations = false)]
async fn test_team_member_update_merges_and_clears(pool: SqlitePool) {
    setup(&pool).await;
    let mut input = new_member("Zhang Ming", MemberCategory::Postdoc);
    input.bio = Some("Original bio".to_string());
    let created = TeamMemberRepo::create(&pool, &input).await.unwrap();

    let patch = UpdateTeamMember {
        title: Some("Professor".to_string()),
        bio: Some(Some(String::new())),
        ..Default::default()
    };
    let updated = TeamMemberRepo::update(&pool, created.id, patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Professor");
    assert_eq!(updated.name, "Zhang Ming");
    assert_eq!(updated.bio, None);

    let missing = TeamMemberRepo::update(&pool, 9999, UpdateTeamMember::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Publications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_publication_keywords_round_trip(pool: SqlitePool) {
    setup(&pool).await;
    let created = PublicationRepo::create(&pool, &new_publication("Lasers", 2023, &["laser", " fiber "]))
        .await
        .unwrap();
    assert_eq!(created.keywords, ["laser", "fiber"]);
    assert_eq!(created.citation_count, 0);
    assert!(created.is_highlighted);

    let found = PublicationRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[sqlx::test(migrations = false)]
async fn test_publication_update_replaces_keywords_only_when_given(pool: SqlitePool) {
    setup(&pool).await;
    let created = PublicationRepo::create(&pool, &new_publication("Lasers", 2023, &["laser"]))
        .await
        .unwrap();

    let retitled = PublicationRepo::update(
        &pool,
        created.id,
        UpdatePublication {
            title: Some("Better lasers".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(retitled.keywords, ["laser"]);

    PublicationRepo::update(
        &pool,
        created.id,
        UpdatePublication {
            keywords: Some(vec!["photonics".to_string(), "sensing".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let reloaded = PublicationRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.title, "Better lasers");
    assert_eq!(reloaded.keywords, ["photonics", "sensing"]);
}

#[sqlx::test(migrations = false)]
async fn test_publication_update_clears_doi_on_null(pool: SqlitePool) {
    setup(&pool).await;
    let mut input = new_publication("Lasers", 2023, &[]);
    input.doi = Some("10.1000/xyz".to_string());
    input.pages = Some("1-9".to_string());
    let created = PublicationRepo::create(&pool, &input).await.unwrap();

    let patch: UpdatePublication = serde_json::from_value(serde_json::json!({ "doi": null })).unwrap();
    let updated = PublicationRepo::update(&pool, created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.doi, None);
    assert_eq!(updated.pages.as_deref(), Some("1-9"));
}

#[sqlx::test(migrations = false)]
async fn test_publication_delete_removes_keywords(pool: SqlitePool) {
    setup(&pool).await;
    let created = PublicationRepo::create(&pool, &new_publication("Lasers", 2023, &["a", "b"]))
        .await
        .unwrap();

    assert!(PublicationRepo::delete(&pool, created.id).await.unwrap());

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publication_keywords")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
    assert!(!PublicationRepo::delete(&pool, created.id).await.unwrap());
}

#[sqlx::test(migrations = false)]
async fn test_publication_ordering_and_filters(pool: SqlitePool) {
    setup(&pool).await;
    PublicationRepo::create(&pool, &new_publication("Beta", 2022, &[])).await.unwrap();
    PublicationRepo::create(&pool, &new_publication("Alpha", 2022, &["quantum"])).await.unwrap();
    let mut hidden = new_publication("Gamma", 2024, &[]);
    hidden.is_highlighted = Some(false);
    PublicationRepo::create(&pool, &hidden).await.unwrap();

    let titles: Vec<_> = PublicationRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, ["Gamma", "Alpha", "Beta"]);

    let of_2022 = PublicationRepo::list_by_year(&pool, 2022).await.unwrap();
    assert_eq!(of_2022.len(), 2);
    assert_eq!(of_2022[0].title, "Alpha");

    let highlighted = PublicationRepo::list_highlighted(&pool).await.unwrap();
    assert_eq!(highlighted.len(), 2);

    let by_keyword = PublicationRepo::search(&pool, "QUANTUM").await.unwrap();
    assert_eq!(by_keyword.len(), 1);
    assert_eq!(by_keyword[0].title, "Alpha");
}

// ---------------------------------------------------------------------------
// Patents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_patent_json_columns_round_trip(pool: SqlitePool) {
    setup(&pool).await;
    let created = PatentRepo::create(&pool, &new_patent("Laser cutter", date(2021, 5, 1), PatentStatus::Pending))
        .await
        .unwrap();

    let found = PatentRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.inventor_ids, Some(vec![1, 2]));
    assert_eq!(found.keywords, ["laser"]);
    assert_eq!(found, created);
}

#[sqlx::test(migrations = false)]
async fn test_patent_filters(pool: SqlitePool) {
    setup(&pool).await;
    PatentRepo::create(&pool, &new_patent("Older", date(2020, 1, 1), PatentStatus::Granted))
        .await
        .unwrap();
    PatentRepo::create(&pool, &new_patent("Newer", date(2022, 1, 1), PatentStatus::Pending))
        .await
        .unwrap();

    let all = PatentRepo::list(&pool).await.unwrap();
    assert_eq!(all[0].title, "Newer");

    let granted = PatentRepo::list_by_status(&pool, PatentStatus::Granted).await.unwrap();
    assert_eq!(granted.len(), 1);
    assert_eq!(granted[0].title, "Older");

    let designs = PatentRepo::list_by_type(&pool, PatentType::Design).await.unwrap();
    assert!(designs.is_empty());
    assert_eq!(PatentRepo::list_highlighted(&pool).await.unwrap().len(), 2);
    assert_eq!(PatentRepo::count(&pool).await.unwrap(), 2);
}

#[sqlx::test(migrations = false)]
async fn test_patent_update_rejects_grant_before_application(pool: SqlitePool) {
    setup(&pool).await;
    let created = PatentRepo::create(&pool, &new_patent("Laser", date(2021, 5, 1), PatentStatus::Pending))
        .await
        .unwrap();

    let err = PatentRepo::update(
        &pool,
        created.id,
        UpdatePatent {
            grant_date: Some(Some(date(2020, 1, 1))),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, StoreError::Core(_));

    let granted = PatentRepo::update(
        &pool,
        created.id,
        UpdatePatent {
            status: Some(PatentStatus::Granted),
            grant_date: Some(Some(date(2022, 3, 1))),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(granted.status, PatentStatus::Granted);
}

#[sqlx::test(migrations = false)]
async fn test_patent_update_clears_grant_date(pool: SqlitePool) {
    setup(&pool).await;
    let mut input = new_patent("Laser", date(2021, 5, 1), PatentStatus::Granted);
    input.grant_date = Some(date(2022, 3, 1));
    let created = PatentRepo::create(&pool, &input).await.unwrap();

    let patch: UpdatePatent = serde_json::from_value(serde_json::json!({
        "status": "pending",
        "grantDate": null,
        "inventorIds": null
    }))
    .unwrap();
    let reverted = PatentRepo::update(&pool, created.id, patch).await.unwrap().unwrap();
    assert_eq!(reverted.grant_date, None);
    assert_eq!(reverted.inventor_ids, None);
    assert_eq!(reverted.status, PatentStatus::Pending);
    assert_eq!(reverted.keywords, ["laser"]);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_project_status_and_search(pool: SqlitePool) {
    setup(&pool).await;
    ProjectRepo::create(&pool, &new_project("Fiber sensing", date(2020, 1, 1), None))
        .await
        .unwrap();
    ProjectRepo::create(&pool, &new_project("Old grant", date(2015, 1, 1), Some(false)))
        .await
        .unwrap();

    let active = ProjectRepo::list_by_status(&pool, true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Fiber sensing");

    let inactive = ProjectRepo::list_by_status(&pool, false).await.unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].name, "Old grant");

    let by_leader = ProjectRepo::search(&pool, "zhang").await.unwrap();
    assert_eq!(by_leader.len(), 2);
}

#[sqlx::test(migrations = false)]
async fn test_project_update_keeps_period_valid(pool: SqlitePool) {
    setup(&pool).await;
    let created = ProjectRepo::create(&pool, &new_project("Fiber", date(2020, 1, 1), None))
        .await
        .unwrap();

    let err = ProjectRepo::update(
        &pool,
        created.id,
        UpdateProject {
            end_date: Some(Some(date(2019, 1, 1))),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, StoreError::Core(_));

    let closed = ProjectRepo::update(
        &pool,
        created.id,
        UpdateProject {
            is_active: Some(false),
            end_date: Some(Some(date(2023, 1, 1))),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!closed.is_active);
    assert_eq!(closed.funding_amount, Some(500_000.0));
}

#[sqlx::test(migrations = false)]
async fn test_project_update_clears_nullable_columns(pool: SqlitePool) {
    setup(&pool).await;
    let mut input = new_project("Fiber", date(2020, 1, 1), None);
    input.end_date = Some(date(2024, 1, 1));
    input.description = Some("Distributed sensing".to_string());
    let created = ProjectRepo::create(&pool, &input).await.unwrap();

    let patch: UpdateProject = serde_json::from_value(serde_json::json!({
        "endDate": null,
        "fundingAmount": null,
        "description": null
    }))
    .unwrap();
    let cleared = ProjectRepo::update(&pool, created.id, patch).await.unwrap().unwrap();
    assert_eq!(cleared.end_date, None);
    assert_eq!(cleared.funding_amount, None);
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.name, "Fiber");

    let reloaded = ProjectRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(reloaded, cleared);
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_news_recent_and_published(pool: SqlitePool) {
    setup(&pool).await;
    for day in 1..=5 {
        NewsRepo::create(&pool, &new_news(&format!("Post {day}"), date(2024, 1, day)))
            .await
            .unwrap();
    }
    let mut draft = new_news("Draft", date(2024, 2, 1));
    draft.is_published = Some(false);
    let draft = NewsRepo::create(&pool, &draft).await.unwrap();

    let recent = NewsRepo::recent(&pool, 4).await.unwrap();
    let titles: Vec<_> = recent.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["Draft", "Post 5", "Post 4", "Post 3"]);

    let published = NewsRepo::list_published(&pool).await.unwrap();
    assert_eq!(published.len(), 5);
    assert!(published.iter().all(|n| n.is_published));

    let updated = NewsRepo::update(
        &pool,
        draft.id,
        UpdateNews {
            is_published: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(updated.is_published);
    assert_eq!(NewsRepo::count(&pool).await.unwrap(), 6);
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_todo_defaults_and_toggle(pool: SqlitePool) {
    setup(&pool).await;
    let created = TodoRepo::create(
        &pool,
        &CreateTodo {
            text: "Order optics".to_string(),
            deadline: None,
            completed: None,
            priority: None,
            created_by: 42,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.priority, TodoPriority::Medium);
    assert!(!created.completed);
    assert!(created.completed_at.is_none());

    let done = TodoRepo::toggle(&pool, created.id).await.unwrap().unwrap();
    assert!(done.completed);
    assert!(done.completed_at.is_some());

    let undone = TodoRepo::toggle(&pool, created.id).await.unwrap().unwrap();
    assert!(!undone.completed);
    assert!(undone.completed_at.is_none());

    let reloaded = TodoRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(reloaded, undone);

    assert!(TodoRepo::toggle(&pool, 9999).await.unwrap().is_none());
}

#[sqlx::test(migrations = false)]
async fn test_todo_update_and_order(pool: SqlitePool) {
    setup(&pool).await;
    let first = TodoRepo::create(
        &pool,
        &CreateTodo {
            text: "First".to_string(),
            deadline: None,
            completed: None,
            priority: Some(TodoPriority::Low),
            created_by: 1,
        },
    )
    .await
    .unwrap();
    let second = TodoRepo::create(
        &pool,
        &CreateTodo {
            text: "Second".to_string(),
            deadline: Some(date(2024, 6, 1)),
            completed: None,
            priority: None,
            created_by: 1,
        },
    )
    .await
    .unwrap();

    let listed = TodoRepo::list(&pool).await.unwrap();
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);

    let updated = TodoRepo::update(
        &pool,
        first.id,
        UpdateTodo {
            priority: Some(TodoPriority::High),
            completed: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.priority, TodoPriority::High);
    assert!(updated.completed_at.is_some());
}

#[sqlx::test(migrations = false)]
async fn test_todo_update_clears_deadline(pool: SqlitePool) {
    setup(&pool).await;
    let created = TodoRepo::create(
        &pool,
        &CreateTodo {
            text: "Book cleanroom".to_string(),
            deadline: Some(date(2024, 5, 1)),
            completed: None,
            priority: None,
            created_by: 1,
        },
    )
    .await
    .unwrap();

    let kept = TodoRepo::update(&pool, created.id, UpdateTodo::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.deadline, Some(date(2024, 5, 1)));

    let patch: UpdateTodo = serde_json::from_value(serde_json::json!({ "deadline": null })).unwrap();
    let cleared = TodoRepo::update(&pool, created.id, patch).await.unwrap().unwrap();
    assert_eq!(cleared.deadline, None);
    assert_eq!(cleared.text, "Book cleanroom");
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_user_credentials_and_login_stamp(pool: SqlitePool) {
    setup(&pool).await;
    let created = UserRepo::create(&pool, &new_user("editor1", "e1@lab.edu"), "$argon2id$fake")
        .await
        .unwrap();
    assert_eq!(created.role, UserRole::Editor);
    assert!(created.last_login.is_none());

    let credentials = UserRepo::find_by_username(&pool, "editor1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(credentials.password_hash, "$argon2id$fake");
    assert_eq!(credentials.user.id, created.id);

    let stamped = UserRepo::record_login(&pool, created.id).await.unwrap();
    assert!(stamped.is_some());
    let reloaded = UserRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert!(reloaded.last_login.is_some());

    assert!(UserRepo::find_by_username(&pool, "nobody").await.unwrap().is_none());
}

#[sqlx::test(migrations = false)]
async fn test_user_duplicate_username_is_unique_violation(pool: SqlitePool) {
    setup(&pool).await;
    UserRepo::create(&pool, &new_user("editor1", "a@lab.edu"), "hash")
        .await
        .unwrap();

    let err = UserRepo::create(&pool, &new_user("editor1", "b@lab.edu"), "hash")
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.is_unique_violation());
}

#[sqlx::test(migrations = false)]
async fn test_user_update_keeps_hash_unless_replaced(pool: SqlitePool) {
    setup(&pool).await;
    let created = UserRepo::create(&pool, &new_user("editor1", "a@lab.edu"), "old-hash")
        .await
        .unwrap();

    let patch = UpdateUser {
        role: Some(UserRole::Admin),
        ..Default::default()
    };
    let updated = UserRepo::update(&pool, created.id, &patch, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.role, UserRole::Admin);
    let hash = UserRepo::find_by_username(&pool, "editor1").await.unwrap().unwrap().password_hash;
    assert_eq!(hash, "old-hash");

    UserRepo::update(&pool, created.id, &UpdateUser::default(), Some("new-hash"))
        .await
        .unwrap();
    let hash = UserRepo::find_by_username(&pool, "editor1").await.unwrap().unwrap().password_hash;
    assert_eq!(hash, "new-hash");
}

use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, ColumnTrait, Set, TransactionTrait};
use uuid::Uuid;
use chrono::Utc;

use crate::{account, category, db, news_article, news_tag, tag};

#[test]
fn email_validation() {
    assert!(account::validate_email("a@x.com").is_ok());
    assert!(account::validate_email("").is_err());
    assert!(account::validate_email("no-at-sign").is_err());
    assert!(account::validate_email("@x.com").is_err());
    assert!(account::validate_email("a@b@c").is_err());
    assert!(account::validate_email(&format!("{}@x.com", "a".repeat(100))).is_err());
}

#[test]
fn password_and_role_bounds() {
    assert!(account::validate_password("12345").is_err());
    assert!(account::validate_password("123456").is_ok());
    assert!(account::validate_password(&"p".repeat(101)).is_err());
    assert!(account::validate_role(0).is_err());
    assert!(account::validate_role(1).is_ok());
    assert!(account::validate_role(3).is_ok());
    assert!(account::validate_role(4).is_err());
}

#[test]
fn length_limits() {
    assert!(category::validate_name("   ").is_err());
    assert!(category::validate_description("").is_ok());
    assert!(category::validate_description(&"d".repeat(501)).is_err());
    assert!(tag::validate_name(&"t".repeat(50)).is_ok());
    assert!(tag::validate_name(&"t".repeat(51)).is_err());
    assert!(tag::validate_note(&"n".repeat(201)).is_err());
    assert!(news_article::validate_title(&"t".repeat(201)).is_err());
    assert!(news_article::validate_headline("Breaking").is_ok());
    assert!(news_article::validate_content(" ").is_err());
    assert!(news_article::validate_source("").is_ok());
}

#[tokio::test]
async fn article_with_tags_roundtrip_in_transaction() {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return; }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return;
    }
    let txn = db.begin().await.expect("begin");

    let author = account::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Model Tester".into()),
        email: Set(format!("model_{}@example.com", Uuid::new_v4())),
        password_hash: Set("not-a-real-hash".into()),
        role: Set(1),
    }
    .insert(&txn)
    .await
    .expect("insert account");
    let cat = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("World".into()),
        description: Set(String::new()),
        parent_id: Set(None),
        is_active: Set(true),
    }
    .insert(&txn)
    .await
    .expect("insert category");
    let t = tag::ActiveModel { id: Set(Uuid::new_v4()), name: Set(format!("tag_{}", Uuid::new_v4())), note: Set(String::new()) }
        .insert(&txn)
        .await
        .expect("insert tag");
    let article = news_article::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set("Title".into()),
        headline: Set("Headline".into()),
        content: Set("Body".into()),
        source: Set(String::new()),
        status: Set(true),
        category_id: Set(cat.id),
        created_by_id: Set(author.id),
        updated_by_id: Set(None),
        created_at: Set(Utc::now().into()),
        modified_at: Set(None),
    }
    .insert(&txn)
    .await
    .expect("insert article");
    news_tag::ActiveModel { news_article_id: Set(article.id), tag_id: Set(t.id) }
        .insert(&txn)
        .await
        .expect("insert news_tag");

    let links = news_tag::Entity::find()
        .filter(news_tag::Column::NewsArticleId.eq(article.id))
        .all(&txn)
        .await
        .expect("query links");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].tag_id, t.id);

    // tag removal cascades to the join table
    tag::Entity::delete_by_id(t.id).exec(&txn).await.expect("delete tag");
    let links = news_tag::Entity::find()
        .filter(news_tag::Column::NewsArticleId.eq(article.id))
        .all(&txn)
        .await
        .expect("query links");
    assert!(links.is_empty());

    txn.rollback().await.expect("rollback");
}

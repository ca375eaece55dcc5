//! Store access for books. Each call is one statement, except `update`
//! which reads the current row before writing the merged one.

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryOrder,
};

use super::entity::{self, Column, Entity};
use super::models::{Book, BookPatch, NewBook};

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Book>, DbErr> {
    Entity::find().order_by_asc(Column::Isbn).all(db).await
}

pub async fn find<C: ConnectionTrait>(db: &C, isbn: &str) -> Result<Option<Book>, DbErr> {
    Entity::find_by_id(isbn.to_string()).one(db).await
}

pub async fn insert<C: ConnectionTrait>(db: &C, book: NewBook) -> Result<Book, DbErr> {
    entity::ActiveModel {
        isbn: Set(book.isbn),
        amazon_url: Set(book.amazon_url),
        author: Set(book.author),
        language: Set(book.language),
        pages: Set(book.pages),
        publisher: Set(book.publisher),
        title: Set(book.title),
        year: Set(book.year),
    }
    .insert(db)
    .await
}

/// Returns `None` when no book has this isbn.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    isbn: &str,
    patch: BookPatch,
) -> Result<Option<Book>, DbErr> {
    let Some(current) = find(db, isbn).await? else {
        return Ok(None);
    };
    if patch.is_empty() {
        return Ok(Some(current));
    }

    let mut active = current.into_active_model();
    if let Some(amazon_url) = patch.amazon_url {
        active.amazon_url = Set(amazon_url);
    }
    if let Some(author) = patch.author {
        active.author = Set(author);
    }
    if let Some(language) = patch.language {
        active.language = Set(language);
    }
    if let Some(pages) = patch.pages {
        active.pages = Set(pages);
    }
    if let Some(publisher) = patch.publisher {
        active.publisher = Set(publisher);
    }
    if let Some(title) = patch.title {
        active.title = Set(title);
    }
    if let Some(year) = patch.year {
        active.year = Set(year);
    }

    active.update(db).await.map(Some)
}

/// Returns `false` when nothing was deleted.
pub async fn delete<C: ConnectionTrait>(db: &C, isbn: &str) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(isbn.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::BooksModule;
    use bookshelf_kernel::{settings::DatabaseSettings, Module};
    use sea_orm::DatabaseConnection;

    async fn store() -> DatabaseConnection {
        let db = bookshelf_db::connect(&DatabaseSettings::in_memory())
            .await
            .unwrap();
        let migrations: Vec<_> = BooksModule
            .migrations()
            .into_iter()
            .map(|m| ("books".to_string(), m))
            .collect();
        bookshelf_db::run_migrations(&db, &migrations).await.unwrap();
        db
    }

    fn new_book(isbn: &str) -> NewBook {
        NewBook {
            isbn: isbn.to_string(),
            amazon_url: "https://amazon.com/taco".to_string(),
            author: "Elie".to_string(),
            language: "English".to_string(),
            pages: 100,
            publisher: "Nothing publishers".to_string(),
            title: "my first book".to_string(),
            year: 2008,
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let db = store().await;
        let created = insert(&db, new_book("123432122")).await.unwrap();
        assert_eq!(created.isbn, "123432122");

        let found = find(&db, "123432122").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(find(&db, "123456").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_ordered_by_isbn() {
        let db = store().await;
        assert!(list(&db).await.unwrap().is_empty());

        insert(&db, new_book("2")).await.unwrap();
        insert(&db, new_book("1")).await.unwrap();

        let isbns: Vec<String> = list(&db).await.unwrap().into_iter().map(|b| b.isbn).collect();
        assert_eq!(isbns, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn duplicate_isbn_is_a_store_error() {
        let db = store().await;
        insert(&db, new_book("123432122")).await.unwrap();
        assert!(insert(&db, new_book("123432122")).await.is_err());
    }

    #[tokio::test]
    async fn update_merges_only_given_fields() {
        let db = store().await;
        insert(&db, new_book("123432122")).await.unwrap();

        let patch = BookPatch {
            title: Some("Updated book title".to_string()),
            pages: Some(500),
            ..BookPatch::default()
        };
        let updated = update(&db, "123432122", patch).await.unwrap().unwrap();

        assert_eq!(updated.title, "Updated book title");
        assert_eq!(updated.pages, 500);
        assert_eq!(updated.author, "Elie");
        assert_eq!(find(&db, "123432122").await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn empty_patch_returns_current_row() {
        let db = store().await;
        let created = insert(&db, new_book("123432122")).await.unwrap();
        let same = update(&db, "123432122", BookPatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(same, created);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let db = store().await;
        assert!(update(&db, "123456", BookPatch::default())
            .await
            .unwrap()
            .is_none());
        assert!(!delete(&db, "123456").await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_row_once() {
        let db = store().await;
        insert(&db, new_book("123432122")).await.unwrap();

        assert!(delete(&db, "123432122").await.unwrap());
        assert!(!delete(&db, "123432122").await.unwrap());
        assert!(find(&db, "123432122").await.unwrap().is_none());
    }
}

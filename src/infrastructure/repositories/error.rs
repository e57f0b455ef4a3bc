use crate::domain::errors::DomainError;

pub(super) const CNT_ARTICLE_SLUG: &str = "articles_slug_key_uniq";
pub(super) const CNT_CATEGORY_SLUG: &str = "categories_slug_key_uniq";
pub(super) const CNT_CATEGORY_NAME: &str = "categories_name_key_uniq";
pub(super) const CNT_USER_USERNAME: &str = "users_username_key";
pub(super) const CNT_ARTICLE_CATEGORY: &str = "articles_category_id_fkey";
pub(super) const CNT_VIDEO_CATEGORY: &str = "videos_category_id_fkey";
pub(super) const CNT_ARTICLE_READING_MINUTES: &str = "articles_reading_minutes_chk";

const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ARTICLE_SLUG | CNT_CATEGORY_SLUG => {
                        DomainError::SlugTaken(constraint.to_string())
                    }
                    CNT_CATEGORY_NAME => {
                        DomainError::Conflict("a category with this name already exists".into())
                    }
                    CNT_USER_USERNAME => DomainError::Conflict("username already exists".into()),
                    CNT_ARTICLE_CATEGORY | CNT_VIDEO_CATEGORY => {
                        DomainError::NotFound("category not found".into())
                    }
                    CNT_ARTICLE_READING_MINUTES => {
                        DomainError::Validation("reading minutes must be positive".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    PG_FOREIGN_KEY_VIOLATION => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Deleting a category that rows still reference trips the RESTRICT foreign
/// keys; that is a conflict, not a missing record.
pub(super) fn map_sqlx_on_category_delete(err: sqlx::Error) -> DomainError {
    let referenced = matches!(
        &err,
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(PG_FOREIGN_KEY_VIOLATION)
    );
    if referenced {
        DomainError::Conflict("category is still referenced".into())
    } else {
        map_sqlx(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT_MIGRATION: &str = include_str!("../../../migrations/0001_init.sql");

    #[test]
    fn mapped_constraints_are_declared_by_the_schema() {
        for name in [
            CNT_ARTICLE_SLUG,
            CNT_CATEGORY_SLUG,
            CNT_CATEGORY_NAME,
            CNT_USER_USERNAME,
            CNT_ARTICLE_CATEGORY,
            CNT_VIDEO_CATEGORY,
            CNT_ARTICLE_READING_MINUTES,
        ] {
            assert!(
                INIT_MIGRATION.contains(&format!("CONSTRAINT {name} ")),
                "migration does not declare {name}"
            );
        }
    }
}

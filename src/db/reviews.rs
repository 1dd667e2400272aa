// src/db/reviews.rs
use rusqlite::{params, Connection, ErrorCode};

use crate::db::{hostels, notifications};
use crate::domain::notification::KIND_NEW_REVIEW;
use crate::domain::review::{NewReview, Review};
use crate::errors::ServerError;

/// Insert the review, refresh the hostel's rating, and tell its owner.
/// One review per student per hostel.
pub fn add_review(
    conn: &mut Connection,
    user_id: i64,
    hostel_id: i64,
    hostel_name: &str,
    review: &NewReview,
    now: i64,
) -> Result<i64, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    tx.execute(
        "insert into reviews (user_id, hostel_id, rating, comment, created_at) values (?, ?, ?, ?, ?)",
        params![user_id, hostel_id, review.rating, review.comment, now],
    )
    .map_err(|e| match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => {
            ServerError::Conflict("you have already reviewed this hostel".into())
        }
        _ => ServerError::DbError(format!("insert review failed: {e}")),
    })?;
    let review_id = tx.last_insert_rowid();

    hostels::refresh_rating(&tx, hostel_id)?;

    if let Some(owner_id) = hostels::owner_of(&tx, hostel_id)? {
        notifications::insert(
            &tx,
            owner_id,
            KIND_NEW_REVIEW,
            &format!("New review for {hostel_name}"),
            &format!("A student rated {hostel_name} {} out of 5.", review.rating),
            now,
        )?;
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

    Ok(review_id)
}

/// Newest first.
pub fn reviews_for_hostel(conn: &Connection, hostel_id: i64) -> Result<Vec<Review>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select r.id, r.hostel_id, r.user_id,
                   trim(u.first_name || ' ' || u.last_name),
                   r.rating, r.comment, r.created_at
            from reviews r
            join users u on u.id = r.user_id
            where r.hostel_id = ?
            order by r.created_at desc, r.id desc
            "#,
        )
        .map_err(|e| ServerError::DbError(format!("prepare reviews failed: {e}")))?;

    let rows = stmt
        .query_map(params![hostel_id], |r| {
            Ok(Review {
                id: r.get(0)?,
                hostel_id: r.get(1)?,
                user_id: r.get(2)?,
                author_name: r.get(3)?,
                rating: r.get(4)?,
                comment: r.get(5)?,
                created_at: r.get(6)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("query reviews failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::hostels::{insert_hostel, all_listings, NewHostel};
    use crate::db::notifications::list_for_user;
    use crate::tests::utils::{memory_conn, seed_user};

    fn review(rating: &str, comment: &str) -> NewReview {
        NewReview::parse(rating, comment).unwrap()
    }

    #[test]
    fn add_review_updates_rating_and_lists_newest_first() {
        let mut conn = memory_conn();
        let a = seed_user(&conn, "a@example.com", "student");
        let b = seed_user(&conn, "b@example.com", "student");

        add_review(&mut conn, a, 3, "Mountain Retreat Hostel", &review("5", "Breathtaking views"), 100).unwrap();
        add_review(&mut conn, b, 3, "Mountain Retreat Hostel", &review("4", "Clean rooms"), 200).unwrap();

        let reviews = reviews_for_hostel(&conn, 3).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].comment, "Clean rooms");
        assert_eq!(reviews[1].rating, 5);
        assert_eq!(reviews[0].author_name, "Test User");

        let mountain = all_listings(&conn).unwrap().into_iter().find(|l| l.id == 3).unwrap();
        assert_eq!(mountain.rating, Some(4.5));
        assert_eq!(mountain.total_reviews, Some(2));
    }

    #[test]
    fn second_review_by_same_student_conflicts() {
        let mut conn = memory_conn();
        let a = seed_user(&conn, "a@example.com", "student");
        add_review(&mut conn, a, 1, "City Backpackers Hostel", &review("4", "Good"), 100).unwrap();
        match add_review(&mut conn, a, 1, "City Backpackers Hostel", &review("2", "Changed my mind"), 200) {
            Err(ServerError::Conflict(_)) => {}
            other => panic!("expected Conflict, got: {other:?}"),
        }
        assert_eq!(reviews_for_hostel(&conn, 1).unwrap().len(), 1);
    }

    #[test]
    fn owner_is_notified() {
        let mut conn = memory_conn();
        let owner = seed_user(&conn, "owner@example.com", "owner");
        let student = seed_user(&conn, "s@example.com", "student");
        let hostel = NewHostel::from_form("Sunrise Residency", "Lahore", "", "12000", "", "").unwrap();
        let id = insert_hostel(&conn, owner, &hostel, 1).unwrap();

        add_review(&mut conn, student, id, "Sunrise Residency", &review("3", "Okay"), 100).unwrap();

        let inbox = list_for_user(&conn, owner).unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, KIND_NEW_REVIEW);
        assert!(inbox[0].title.contains("Sunrise Residency"));
    }
}

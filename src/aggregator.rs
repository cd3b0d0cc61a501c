//! Rolling rating aggregate kept on each title.
//!
//! The blend is `(avg + rating) / 2` once a title has any rating, so later reviews weigh more
//! than a true mean would give them. The first rating is taken as-is. Updating or deleting a
//! review does not touch the aggregate.

use crate::{errors::FieldErrors, models::RatingAggregate};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Folds one new rating into the aggregate of its title.
pub fn record_review(current: RatingAggregate, rating: i16) -> RatingAggregate {
    let avg_review = if current.number_rating == 0 {
        f64::from(rating)
    } else {
        (current.avg_review + f64::from(rating)) / 2.0
    };

    RatingAggregate {
        avg_review,
        number_rating: current.number_rating + 1,
    }
}

/// Range check applied to every submitted rating.
pub fn check_rating(rating: i64) -> Result<i16, FieldErrors> {
    if rating < MIN_RATING {
        return Err(FieldErrors::single(
            "rating",
            format!("Ensure this value is greater than or equal to {MIN_RATING}."),
        ));
    }
    if rating > MAX_RATING {
        return Err(FieldErrors::single(
            "rating",
            format!("Ensure this value is less than or equal to {MAX_RATING}."),
        ));
    }
    Ok(rating as i16)
}

use watchlist_be::{
    aggregator::{check_rating, record_review},
    models::RatingAggregate,
};

fn aggregate(avg_review: f64, number_rating: i32) -> RatingAggregate {
    RatingAggregate {
        avg_review,
        number_rating,
    }
}

#[test]
fn test_first_rating_is_taken_as_is() {
    for rating in 1..=5 {
        let updated = record_review(RatingAggregate::default(), rating);
        assert_eq!(updated.avg_review, f64::from(rating));
        assert_eq!(updated.number_rating, 1);
    }
}

#[test]
fn test_later_ratings_blend_with_current_average() {
    let updated = record_review(aggregate(4.0, 1), 2);
    assert_eq!(updated.avg_review, 3.0);
    assert_eq!(updated.number_rating, 2);

    let updated = record_review(aggregate(3.0, 2), 5);
    assert_eq!(updated.avg_review, 4.0);
    assert_eq!(updated.number_rating, 3);
}

#[test]
fn test_blend_is_not_a_true_mean() {
    // 5, 5, 1: a true mean is 3.67, the blend gives 3.0
    let mut current = RatingAggregate::default();
    for rating in [5, 5, 1] {
        current = record_review(current, rating);
    }
    assert_eq!(current.avg_review, 3.0);
    assert_eq!(current.number_rating, 3);
}

#[test]
fn test_zero_count_ignores_stale_average() {
    let updated = record_review(aggregate(2.5, 0), 5);
    assert_eq!(updated.avg_review, 5.0);
    assert_eq!(updated.number_rating, 1);
}

#[test]
fn test_rating_range() {
    assert_eq!(check_rating(1), Ok(1));
    assert_eq!(check_rating(5), Ok(5));

    let too_low = check_rating(0).unwrap_err();
    assert!(too_low.get("rating").unwrap()[0].contains("greater than or equal to 1"));

    let too_high = check_rating(6).unwrap_err();
    assert!(too_high.get("rating").unwrap()[0].contains("less than or equal to 5"));

    assert!(check_rating(-3).is_err());
}

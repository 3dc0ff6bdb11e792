//! Product reviews and their aggregate summary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, ReviewId};

/// A row from the `product_reviews` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    /// Star rating, 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub reviewer_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate rating shown above a product's reviews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub count: u32,
    /// Mean rating rounded to one decimal place; `None` without reviews.
    pub average: Option<Decimal>,
    /// Number of reviews per star, index 0 is one star.
    pub histogram: [u32; 5],
}

impl ReviewSummary {
    /// Summarize reviews. Ratings outside 1..=5 are ignored.
    #[must_use]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut summary = Self::default();
        let mut total: u32 = 0;

        for review in reviews {
            let Some(bucket) = review
                .rating
                .checked_sub(1)
                .and_then(|i| summary.histogram.get_mut(usize::from(i)))
            else {
                continue;
            };
            *bucket += 1;
            summary.count += 1;
            total += u32::from(review.rating);
        }

        if summary.count > 0 {
            summary.average =
                Some((Decimal::from(total) / Decimal::from(summary.count)).round_dp(1));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: i64, rating: u8) -> Review {
        Review {
            id: ReviewId::new(id),
            product_id: ProductId::new(1),
            rating,
            comment: None,
            reviewer_name: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = ReviewSummary::from_reviews(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, None);
        assert_eq!(summary.histogram, [0; 5]);
    }

    #[test]
    fn test_average_rounds_to_one_place() {
        let reviews = [review(1, 5), review(2, 4), review(3, 4)];
        let summary = ReviewSummary::from_reviews(&reviews);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, Some(Decimal::new(43, 1)));
        assert_eq!(summary.histogram, [0, 0, 0, 2, 1]);
    }

    #[test]
    fn test_out_of_range_ratings_ignored() {
        let reviews = [review(1, 0), review(2, 6), review(3, 2)];
        let summary = ReviewSummary::from_reviews(&reviews);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.average, Some(Decimal::new(20, 1)));
    }
}

//! Decoded price representation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::QueryWindow;

/// A single price at a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Start of the delivery interval (UTC).
    pub timestamp: DateTime<Utc>,
    /// Price in the currency per energy unit supplied by the source.
    pub price: Decimal,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self { timestamp, price }
    }
}

/// Ordered mapping from UTC instant to price.
///
/// Iteration follows insertion order. Re-inserting an existing instant replaces
/// its price but keeps its original position. The curve is neither sorted nor
/// clipped to the query window unless [`sort`](Self::sort) or
/// [`retain_within`](Self::retain_within) is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceCurve {
    points: Vec<PricePoint>,
    index: HashMap<DateTime<Utc>, usize>,
}

impl PriceCurve {
    /// Creates an empty curve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a price to an instant.
    ///
    /// Returns the previous price if the instant was already present.
    pub fn insert(&mut self, timestamp: DateTime<Utc>, price: Decimal) -> Option<Decimal> {
        if let Some(&slot) = self.index.get(&timestamp) {
            let previous = self.points[slot].price;
            self.points[slot].price = price;
            return Some(previous);
        }
        self.index.insert(timestamp, self.points.len());
        self.points.push(PricePoint::new(timestamp, price));
        None
    }

    /// Returns the price at an instant.
    #[must_use]
    pub fn get(&self, timestamp: &DateTime<Utc>) -> Option<Decimal> {
        self.index.get(timestamp).map(|&slot| self.points[slot].price)
    }

    /// Returns true if the instant has a price.
    #[must_use]
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        self.index.contains_key(timestamp)
    }

    /// Returns the number of prices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the curve holds no prices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Iterates over `(timestamp, price)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, Decimal)> + '_ {
        self.points.iter().map(|p| (p.timestamp, p.price))
    }

    /// Iterates over the instants in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.points.iter().map(|p| p.timestamp)
    }

    /// Iterates over the prices in insertion order.
    pub fn values(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Returns the earliest and latest instant, if any.
    #[must_use]
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.keys().min()?;
        let last = self.keys().max()?;
        Some((first, last))
    }

    /// Sorts the curve chronologically.
    pub fn sort(&mut self) {
        self.points.sort_by_key(|p| p.timestamp);
        self.reindex();
    }

    /// Drops every instant outside `[window.start, window.end)`.
    pub fn retain_within(&mut self, window: &QueryWindow) {
        self.points.retain(|p| window.contains(p.timestamp));
        self.reindex();
    }

    /// Consumes the curve, returning its points in insertion order.
    #[must_use]
    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }

    fn reindex(&mut self) {
        self.index = self
            .points
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.timestamp, slot))
            .collect();
    }
}

impl FromIterator<(DateTime<Utc>, Decimal)> for PriceCurve {
    fn from_iter<I: IntoIterator<Item = (DateTime<Utc>, Decimal)>>(iter: I) -> Self {
        let mut curve = Self::new();
        for (timestamp, price) in iter {
            curve.insert(timestamp, price);
        }
        curve
    }
}

impl IntoIterator for PriceCurve {
    type Item = PricePoint;
    type IntoIter = std::vec::IntoIter<PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceCurve {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn hour(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::hours(i64::from(h))
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut curve = PriceCurve::new();
        curve.insert(hour(5), Decimal::from(50));
        curve.insert(hour(1), Decimal::from(10));
        curve.insert(hour(3), Decimal::from(30));

        let keys: Vec<_> = curve.keys().collect();
        assert_eq!(keys, vec![hour(5), hour(1), hour(3)]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut curve = PriceCurve::new();
        curve.insert(hour(0), Decimal::from(1));
        curve.insert(hour(1), Decimal::from(2));
        let previous = curve.insert(hour(0), Decimal::from(9));

        assert_eq!(previous, Some(Decimal::from(1)));
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.points()[0], PricePoint::new(hour(0), Decimal::from(9)));
    }

    #[test]
    fn test_sort_and_lookup() {
        let mut curve: PriceCurve = [(hour(2), Decimal::from(2)), (hour(0), Decimal::from(0))]
            .into_iter()
            .collect();
        curve.sort();

        assert_eq!(curve.keys().collect::<Vec<_>>(), vec![hour(0), hour(2)]);
        assert_eq!(curve.get(&hour(2)), Some(Decimal::from(2)));
        assert_eq!(curve.span(), Some((hour(0), hour(2))));
    }

    #[test]
    fn test_retain_within() {
        let mut curve: PriceCurve = (0..6).map(|h| (hour(h), Decimal::from(h))).collect();
        curve.retain_within(&QueryWindow::new(hour(1), hour(4)));

        assert_eq!(curve.keys().collect::<Vec<_>>(), vec![hour(1), hour(2), hour(3)]);
        assert!(!curve.contains(&hour(4)));
        assert_eq!(curve.get(&hour(3)), Some(Decimal::from(3)));
    }
}

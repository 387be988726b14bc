//! Bundle arithmetic for the Abyssal world engine.
//!
//! Every stage of the tick pipeline moves quantities around as keyed
//! bundles: station stockpiles, build costs, fleet compositions. This crate
//! holds the shared arithmetic over [`Bundle`] so that income, construction
//! and combat all add, subtract and scale the same way.
//!
//! # Laws
//!
//! - Addition and subtraction operate keywise over the union of keys;
//!   missing keys are zero.
//! - Subtraction may drive counts negative. Callers decide whether that is
//!   an error via [`is_negative`] or check affordability up front via
//!   [`sufficient`].
//! - [`scale`] multiplies exactly; [`scale_ceil`] multiplies by a fraction
//!   and rounds each count up, so a kind present before scaling only
//!   vanishes when the factor is zero.
//!
//! All exact arithmetic saturates at the `i64` limits rather than wrapping.

use abyssal_types::Bundle;

/// Keywise sum of two bundles over the union of their keys.
#[must_use]
pub fn add<K: Ord + Copy>(a: &Bundle<K>, b: &Bundle<K>) -> Bundle<K> {
    let mut out = a.clone();
    for (key, value) in b.iter() {
        out.set(key, out.get(key).saturating_add(value));
    }
    out
}

/// Keywise difference `a - b` over the union of their keys.
///
/// The result may contain negative counts; see [`is_negative`].
#[must_use]
pub fn subtract<K: Ord + Copy>(a: &Bundle<K>, b: &Bundle<K>) -> Bundle<K> {
    let mut out = a.clone();
    for (key, value) in b.iter() {
        out.set(key, out.get(key).saturating_sub(value));
    }
    out
}

/// Multiply every count by an exact integer factor.
#[must_use]
pub fn scale<K: Ord + Copy>(bundle: &Bundle<K>, factor: i64) -> Bundle<K> {
    bundle
        .iter()
        .map(|(key, value)| (key, value.saturating_mul(factor)))
        .collect()
}

/// Multiply every count by a fraction, rounding each result up.
///
/// Used for combat survivors: a kind with at least one ship before scaling
/// keeps at least one ship unless the factor is zero.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn scale_ceil<K: Ord + Copy>(bundle: &Bundle<K>, factor: f64) -> Bundle<K> {
    bundle
        .iter()
        .map(|(key, value)| (key, (value as f64 * factor).ceil() as i64))
        .collect()
}

/// Whether any count in the bundle is below zero.
#[must_use]
pub fn is_negative<K: Ord + Copy>(bundle: &Bundle<K>) -> bool {
    bundle.iter().any(|(_, value)| value < 0)
}

/// Whether `available` covers `cost` on every key.
#[must_use]
pub fn sufficient<K: Ord + Copy>(available: &Bundle<K>, cost: &Bundle<K>) -> bool {
    !is_negative(&subtract(available, cost))
}

/// Whether the bundle holds a strictly positive count for any key.
#[must_use]
pub fn has_any<K: Ord + Copy>(bundle: &Bundle<K>) -> bool {
    bundle.iter().any(|(_, value)| value > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use abyssal_types::{Resource, ResourceBundle, ShipComposition, ShipKind};

    fn stock(aluminium: i64, steel: i64) -> ResourceBundle {
        ResourceBundle::from([(Resource::Aluminium, aluminium), (Resource::Steel, steel)])
    }

    #[test]
    fn add_merges_disjoint_keys() {
        let a = ResourceBundle::from([(Resource::Aluminium, 100)]);
        let b = ResourceBundle::from([(Resource::Energy, 25)]);
        let sum = add(&a, &b);
        assert_eq!(sum.get(Resource::Aluminium), 100);
        assert_eq!(sum.get(Resource::Energy), 25);
        assert_eq!(sum.get(Resource::Steel), 0);
    }

    #[test]
    fn add_is_commutative() {
        let a = stock(100, 40);
        let b = stock(7, 0);
        assert_eq!(add(&a, &b), add(&b, &a));
    }

    #[test]
    fn add_then_subtract_cancels() {
        let a = ResourceBundle::from([(Resource::Aluminium, 100)]);
        let b = stock(7, 40);
        // Equality holds over the union of keys: subtraction leaves b's
        // keys behind at zero, which reads the same as absent.
        let back = subtract(&add(&a, &b), &b);
        for resource in Resource::ALL {
            assert_eq!(back.get(resource), a.get(resource));
        }
    }

    #[test]
    fn scale_by_one_is_identity() {
        let a = stock(1000, 500);
        assert_eq!(scale(&a, 1), a);
    }

    #[test]
    fn add_empty_is_identity() {
        let a = stock(1000, 500);
        assert_eq!(add(&a, &ResourceBundle::new()), a);
        assert_eq!(add(&ResourceBundle::new(), &a), a);
    }

    #[test]
    fn subtract_then_add_restores_counts() {
        let start = stock(1000, 500);
        let cost = stock(250, 125);
        let restored = add(&subtract(&start, &cost), &cost);
        for resource in Resource::ALL {
            assert_eq!(restored.get(resource), start.get(resource));
        }
    }

    #[test]
    fn subtract_reports_deficits_instead_of_clamping() {
        let short = subtract(&stock(100, 0), &stock(250, 0));
        assert_eq!(short.get(Resource::Aluminium), -150);
        assert!(is_negative(&short));
    }

    #[test]
    fn sufficient_matches_subtract_sign() {
        let available = stock(2000, 1000);
        assert!(sufficient(&available, &ShipKind::Shark.cost_bundle()));
        assert!(!sufficient(&available, &ShipKind::Tsunami.cost_bundle()));
    }

    #[test]
    fn scale_multiplies_every_count() {
        let cost = scale(&ShipKind::Piranha.cost_bundle(), 4);
        assert_eq!(cost.get(Resource::Aluminium), 5000);
    }

    #[test]
    fn scale_by_zero_is_empty_of_value() {
        let scaled = scale(&stock(100, 40), 0);
        assert!(!has_any(&scaled));
    }

    #[test]
    fn scale_ceil_keeps_a_remnant_of_every_present_kind() {
        let ships = ShipComposition::from([(ShipKind::Shark, 10), (ShipKind::Piranha, 1)]);
        let survivors = scale_ceil(&ships, 0.05);
        // 10 * 0.05 = 0.5 and 1 * 0.05 = 0.05, both round up to one ship.
        assert_eq!(survivors.get(ShipKind::Shark), 1);
        assert_eq!(survivors.get(ShipKind::Piranha), 1);
    }

    #[test]
    fn scale_ceil_by_zero_removes_everything() {
        let ships = ShipComposition::from([(ShipKind::Atlantis, 3)]);
        let survivors = scale_ceil(&ships, 0.0);
        assert!(!has_any(&survivors));
    }

    #[test]
    fn scale_ceil_exact_fraction() {
        let ships = ShipComposition::from([(ShipKind::Kittyhawk, 4)]);
        let survivors = scale_ceil(&ships, 0.6);
        // 4 * 0.6 = 2.4 rounds up to 3.
        assert_eq!(survivors.get(ShipKind::Kittyhawk), 3);
    }

    #[test]
    fn has_any_ignores_zero_and_negative_entries() {
        let mut bundle = ResourceBundle::new();
        bundle.set(Resource::Steel, 0);
        bundle.set(Resource::Energy, -5);
        assert!(!has_any(&bundle));
        bundle.set(Resource::Aluminium, 1);
        assert!(has_any(&bundle));
    }
}

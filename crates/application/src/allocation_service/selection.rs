//! The hybrid deterministic/reproducible-random unit picker.

use audentra_core::AppResult;
use audentra_domain::{AuditUnit, AuditUniverse, RiskCategory, UnitId};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use sha2::{Digest, Sha256};

/// Outcome of one tier-selection call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TierOutcome {
    /// Units actually flipped to selected.
    pub(super) units_selected: usize,
    /// Mandays consumed: selected count times the tier manday cost.
    pub(super) mandays_used: f64,
}

const NO_SELECTION: TierOutcome = TierOutcome {
    units_selected: 0,
    mandays_used: 0.0,
};

/// Derives the reproducible per-department seed: a SHA-256 digest of the
/// department name reduced into the 32-bit unsigned space.
///
/// Not a security or distribution requirement; the seed only exists so a
/// re-run on identical input reproduces the identical selection.
pub(super) fn stable_seed(department: &str) -> u32 {
    let digest = Sha256::digest(department.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Selects units from one department+tier pool against its manday target.
///
/// The pool is ranked by rating descending; equal ratings keep ingestion
/// order (`Vec::sort_by` is stable and pools arrive in id order). High-tier
/// requests for more than one unit split into a deterministic top half and
/// a seeded random draw from the rest; every other case takes the top
/// `floor(target / manday_cost)` units. Selected units are flipped through
/// the universe owner, and every call appends one trail line.
pub(super) fn select_tier_units(
    universe: &mut AuditUniverse,
    pool: Vec<UnitId>,
    target: f64,
    manday_cost: f64,
    tier: RiskCategory,
    department: &str,
    lines: &mut Vec<String>,
) -> AppResult<TierOutcome> {
    let label = tier.as_str();

    if pool.is_empty() || manday_cost <= 0.0 {
        lines.push(format!("  {department:<10} | {label:<6} | No pool or MD<=0"));
        return Ok(NO_SELECTION);
    }

    let unit_count = (target / manday_cost).floor().max(0.0) as usize;
    if unit_count == 0 {
        lines.push(format!(
            "  {department:<10} | {label:<6} | Target too low for MD={manday_cost}"
        ));
        return Ok(NO_SELECTION);
    }

    let mut ranked = pool;
    ranked.sort_by(|left, right| {
        rating_of(universe, *right).total_cmp(&rating_of(universe, *left))
    });

    let chosen: Vec<UnitId> = if tier == RiskCategory::High && unit_count > 1 {
        let seed = stable_seed(department);
        let top_count = unit_count.div_ceil(2);
        let remainder_count = unit_count - top_count;

        let mut chosen: Vec<UnitId> = ranked.iter().copied().take(top_count).collect();
        let remainder_pool: Vec<UnitId> = ranked.iter().copied().skip(top_count).collect();

        if remainder_count > 0 && !remainder_pool.is_empty() {
            // the draw never exceeds the pool; a short pool shows up as
            // unmet target rather than an error
            let draw = remainder_count.min(remainder_pool.len());
            let mut rng = Pcg64::seed_from_u64(u64::from(seed));
            for index in rand::seq::index::sample(&mut rng, remainder_pool.len(), draw) {
                chosen.push(remainder_pool[index]);
            }
        }

        lines.push(format!(
            "  {department:<10} | {label:<6} | {top_count} top + {remainder_count} random x {manday_cost} days"
        ));
        lines.push(format!(
            "     Stable random seed for {department}: {seed}"
        ));
        chosen
    } else {
        lines.push(format!(
            "  {department:<10} | {label:<6} | {unit_count} units x {manday_cost} days"
        ));
        ranked.into_iter().take(unit_count).collect()
    };

    for unit_id in &chosen {
        universe.mark_selected(*unit_id, manday_cost)?;
    }

    let units_selected = chosen.len();
    Ok(TierOutcome {
        units_selected,
        mandays_used: units_selected as f64 * manday_cost,
    })
}

fn rating_of(universe: &AuditUniverse, unit_id: UnitId) -> f64 {
    universe.unit(unit_id).map_or(0.0, AuditUnit::rating)
}

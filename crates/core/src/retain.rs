//! Retention selection.
//!
//! Decides which quality-passed blocks survive, using the union of a
//! rank-based floor and a percentile-based floor, then a per-section
//! minimum-keep guarantee. The guarantee is what prevents the
//! degenerate "only the introduction survives" outcome of naive top-K
//! filtering: no structural section is erased outright as long as it
//! still has a quality survivor.

use std::collections::HashMap;

use crate::config::OptimizeConfig;
use crate::score::Scored;

/// Retains blocks from a score-sorted, quality-passed list.
pub fn retain_blocks(scored: Vec<Scored>, config: &OptimizeConfig) -> Vec<Scored> {
    let n = scored.len();
    if n == 0 {
        return scored;
    }

    let scores: Vec<f64> = scored.iter().map(|s| s.total_score).collect();
    let bar = percentile(&scores, config.percentile_threshold).max(config.score_floor);
    let k = ((config.content_ratio * n as f64).ceil() as usize).max(config.min_keep_k);

    let mut keep: Vec<bool> = (0..n).map(|i| i < k || scores[i] >= bar).collect();

    apply_section_guarantee(&scored, &mut keep);

    scored
        .into_iter()
        .zip(keep)
        .filter_map(|(s, kept)| kept.then_some(s))
        .collect()
}

/// Minimum retained blocks for a section of the given size.
pub fn section_minimum(section_size: usize) -> usize {
    if section_size <= 3 {
        1
    } else if section_size <= 10 {
        2
    } else {
        3
    }
}

/// Tops up under-retained sections from their highest-scoring blocks.
fn apply_section_guarantee(scored: &[Scored], keep: &mut [bool]) {
    let mut sections: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, s) in scored.iter().enumerate() {
        sections.entry(s.block.section_index).or_default().push(i);
    }

    for positions in sections.values() {
        let required = section_minimum(scored[positions[0]].block.section_size);
        let retained = positions.iter().filter(|&&i| keep[i]).count();
        if retained >= required {
            continue;
        }

        // positions follow the global score ordering, so the first
        // non-retained entries are the section's best leftovers
        let mut needed = required - retained;
        for &i in positions {
            if needed == 0 {
                break;
            }
            if !keep[i] {
                keep[i] = true;
                needed -= 1;
            }
        }
    }
}

/// Linear-interpolated percentile of a score list.
fn percentile(scores: &[f64], fraction: f64) -> f64 {
    let mut ascending = scores.to_vec();
    ascending.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = fraction.clamp(0.0, 1.0) * (ascending.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;

    if lo == hi {
        ascending[lo]
    } else {
        ascending[lo] + (rank - lo as f64) * (ascending[hi] - ascending[lo])
    }
}

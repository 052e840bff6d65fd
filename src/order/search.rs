//! Merge-order search.
//!
//! Pure functions that explore pre-merge groupings and application orders
//! for a wanted list, minimizing total experience under the anvil's hard
//! caps. Small lists get an exhaustive, memoized subset search; larger
//! lists fall back to greedy grouping.
//!
//! Cost model: combining a receiver carrying penalty `p_r` with a source
//! carrying penalty `p_s` costs `experience(source) * 2^(p_r + p_s)`, and
//! afterwards the receiver's counter is `p_r + 1`. The item's counter only
//! grows when a group is applied to the item itself; pre-merges run on
//! throwaway counters of their own.

use crate::error::{Error, Result};
use crate::order::plan::{EnchantStep, OrderingPlan};
use crate::types::Enchantment;
use tracing::debug;

/// Options for the ordering search.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOptions {
    /// Penalty already accumulated on the item from earlier anvil work.
    pub initial_penalty: u32,
    /// Return the best plan even when it breaks a hard cap, leaving the
    /// advisory flags on [`OrderingPlan`] to describe it, instead of
    /// failing the search.
    pub tolerate_caps: bool,
}

/// Largest wanted list the exhaustive subset search handles; larger lists
/// fall back to greedy grouping.
const EXACT_SEARCH_MAX: usize = 8;

/// Order a wanted list onto an item carrying `initial_penalty`.
///
/// Returns the cheapest feasible plan, or an input error
/// ([`Error::EmptyWantedList`], [`Error::DuplicateEnchantment`]) or a
/// definitive infeasibility error ([`Error::TooExpensive`],
/// [`Error::TooManyPenalty`]).
pub fn schedule(wanted: &[Enchantment], initial_penalty: u32) -> Result<OrderingPlan> {
    schedule_with(
        wanted,
        &ScheduleOptions {
            initial_penalty,
            tolerate_caps: false,
        },
    )
}

/// Order a wanted list with explicit options.
pub fn schedule_with(wanted: &[Enchantment], options: &ScheduleOptions) -> Result<OrderingPlan> {
    let leaves = validate(wanted)?;
    debug!(
        count = leaves.len(),
        initial_penalty = options.initial_penalty,
        "ordering wanted list"
    );
    if leaves.len() <= EXACT_SEARCH_MAX {
        exact_search(&leaves, options)
    } else {
        greedy_search(&leaves, options)
    }
}

/// Check the wanted list and return it deduplicated and in canonical
/// (ascending) order.
fn validate(wanted: &[Enchantment]) -> Result<Vec<Enchantment>> {
    if wanted.is_empty() {
        return Err(Error::EmptyWantedList);
    }
    let mut leaves: Vec<Enchantment> = Vec::with_capacity(wanted.len());
    for candidate in wanted {
        if let Some(existing) = leaves.iter().find(|leaf| leaf.name == candidate.name) {
            if existing != candidate {
                return Err(Error::DuplicateEnchantment(candidate.name.clone()));
            }
            // exact duplicate, identity is by name: keep one
        } else {
            leaves.push(candidate.clone());
        }
    }
    leaves.sort();
    Ok(leaves)
}

/// Cost of one combine. Saturates instead of wrapping.
fn combine_cost(source_experience: u64, receiver_penalty: u32, source_penalty: u32) -> u64 {
    let shift = u64::from(receiver_penalty) + u64::from(source_penalty);
    if shift >= 64 {
        return u64::MAX;
    }
    source_experience.saturating_mul(1u64 << shift)
}

/// Cost contribution of a composite the moment it is used as a source
/// against a receiver with no penalty.
fn source_weight(experience: u64, penalty: u32) -> u64 {
    combine_cost(experience, 0, penalty)
}

/// One way of fusing a subset into a single composite.
#[derive(Debug, Clone, Copy)]
struct Build {
    /// Total cost of the internal pre-merges.
    cost: u64,
    /// The composite's own counter once built.
    penalty: u32,
    /// Most expensive single pre-merge inside the build.
    max_op: u64,
}

const LEAF_BUILD: Build = Build {
    cost: 0,
    penalty: 0,
    max_op: 0,
};

/// Experience sums for every subset of the leaves.
fn subset_experiences(experiences: &[u64]) -> Vec<u64> {
    let full = 1usize << experiences.len();
    let mut sums = vec![0u64; full];
    for mask in 1..full {
        let low = mask.trailing_zeros() as usize;
        sums[mask] = sums[mask & (mask - 1)].saturating_add(experiences[low]);
    }
    sums
}

/// Drop dominated build candidates; the survivors are sorted by
/// `(cost, penalty, max_op)` so the cheapest build always comes first.
fn pareto(mut candidates: Vec<Build>) -> Vec<Build> {
    candidates.sort_by_key(|build| (build.cost, build.penalty, build.max_op));
    let mut kept: Vec<Build> = Vec::new();
    for candidate in candidates {
        let dominated = kept.iter().any(|k| {
            k.cost <= candidate.cost && k.penalty <= candidate.penalty && k.max_op <= candidate.max_op
        });
        if !dominated {
            kept.push(candidate);
        }
    }
    kept
}

/// For every subset, the Pareto frontier of ways to fuse it into one
/// composite. Keyed by subset bitmask; the table lives only for the
/// duration of one search.
fn build_frontiers(leaf_count: usize, subset_exp: &[u64], enforce_ops: bool) -> Vec<Vec<Build>> {
    let full = 1usize << leaf_count;
    let mut frontiers: Vec<Vec<Build>> = vec![Vec::new(); full];
    for mask in 1..full {
        if mask.count_ones() == 1 {
            frontiers[mask].push(LEAF_BUILD);
            continue;
        }
        let mut candidates: Vec<Build> = Vec::new();
        // Every split of the subset, with either side as the receiver: the
        // merge op costs the source side's experience.
        let mut receiver = (mask - 1) & mask;
        while receiver != 0 {
            let source = mask & !receiver;
            for rb in &frontiers[receiver] {
                for sb in &frontiers[source] {
                    let op = combine_cost(subset_exp[source], rb.penalty, sb.penalty);
                    if enforce_ops && op > OrderingPlan::MAX_EXPERIENCE {
                        continue;
                    }
                    candidates.push(Build {
                        cost: rb.cost.saturating_add(sb.cost).saturating_add(op),
                        penalty: rb.penalty + 1,
                        max_op: rb.max_op.max(sb.max_op).max(op),
                    });
                }
            }
            receiver = (receiver - 1) & mask;
        }
        frontiers[mask] = pareto(candidates);
    }
    frontiers
}

/// Cheapest way to apply a group at the given item position, over the
/// group's build frontier. Returns the contribution (build cost plus the
/// application op) and the worst single op involved.
fn apply_outcome(
    frontier: &[Build],
    group_exp: u64,
    item_penalty: u32,
    enforce_ops: bool,
) -> Option<(u64, u64)> {
    let mut best: Option<(u64, u64)> = None;
    for build in frontier {
        let apply = combine_cost(group_exp, item_penalty, build.penalty);
        if enforce_ops && apply > OrderingPlan::MAX_EXPERIENCE {
            continue;
        }
        let contribution = build.cost.saturating_add(apply);
        let max_op = build.max_op.max(apply);
        if best.is_none_or(|(cost, _)| contribution < cost) {
            best = Some((contribution, max_op));
        }
    }
    best
}

#[derive(Debug, Clone, Copy)]
struct SearchState {
    cost: u64,
    max_op: u64,
    prev_mask: usize,
    group: usize,
}

/// Exhaustive search for small wanted lists.
fn exact_search(leaves: &[Enchantment], options: &ScheduleOptions) -> Result<OrderingPlan> {
    let initial = options.initial_penalty;
    let enforce = !options.tolerate_caps;

    let max_groups = if enforce {
        if initial >= OrderingPlan::MAX_PENALTY {
            return Err(Error::TooManyPenalty {
                penalty: initial.saturating_add(1),
            });
        }
        ((OrderingPlan::MAX_PENALTY - initial) as usize).min(leaves.len())
    } else {
        leaves.len()
    };

    if let Some(plan) = run_exact(leaves, initial, max_groups, enforce) {
        return Ok(plan);
    }

    // Everything under the penalty cap breaks the experience cap. Rerun
    // without the op filter to report what the anvil would demand.
    match run_exact(leaves, initial, max_groups, false) {
        Some(best) => Err(Error::TooExpensive {
            max_experience: best.max_experience(),
        }),
        None => Err(Error::TooManyPenalty {
            penalty: initial.saturating_add(1),
        }),
    }
}

/// Forward DP over `(applied subset, item ops so far)`. Tables are
/// discarded when the call returns.
fn run_exact(
    leaves: &[Enchantment],
    initial: u32,
    max_groups: usize,
    enforce_ops: bool,
) -> Option<OrderingPlan> {
    let n = leaves.len();
    let full = (1usize << n) - 1;
    let experiences: Vec<u64> = leaves.iter().map(Enchantment::experience).collect();
    let subset_exp = subset_experiences(&experiences);
    let frontiers = build_frontiers(n, &subset_exp, enforce_ops);

    let mut dp: Vec<Vec<Option<SearchState>>> = vec![vec![None; full + 1]; max_groups + 1];
    dp[0][0] = Some(SearchState {
        cost: 0,
        max_op: 0,
        prev_mask: 0,
        group: 0,
    });

    for ops in 0..max_groups {
        for mask in 0..=full {
            let Some(state) = dp[ops][mask] else { continue };
            let rest = full & !mask;
            if rest == 0 {
                continue;
            }
            let item_penalty = initial.saturating_add(u32::try_from(ops).unwrap_or(u32::MAX));
            let mut group = rest;
            loop {
                if let Some((contribution, group_max)) = apply_outcome(
                    &frontiers[group],
                    subset_exp[group],
                    item_penalty,
                    enforce_ops,
                ) {
                    let cost = state.cost.saturating_add(contribution);
                    let max_op = state.max_op.max(group_max);
                    let slot = &mut dp[ops + 1][mask | group];
                    let better = slot.is_none_or(|current| cost < current.cost);
                    if better {
                        *slot = Some(SearchState {
                            cost,
                            max_op,
                            prev_mask: mask,
                            group,
                        });
                    }
                }
                group = (group - 1) & rest;
                if group == 0 {
                    break;
                }
            }
        }
    }

    // Cheapest full cover; ties prefer fewer item operations.
    let mut chosen: Option<(u64, usize)> = None;
    for ops in 1..=max_groups {
        if let Some(state) = dp[ops][full] {
            if chosen.is_none_or(|(cost, _)| state.cost < cost) {
                chosen = Some((state.cost, ops));
            }
        }
    }
    let (_, ops) = chosen?;

    let mut groups: Vec<usize> = Vec::with_capacity(ops);
    let mut mask = full;
    for depth in (1..=ops).rev() {
        let state = dp[depth][mask]?;
        groups.push(state.group);
        mask = state.prev_mask;
    }
    groups.reverse();

    let final_state = dp[ops][full]?;
    let steps: Vec<EnchantStep> = groups
        .iter()
        .map(|&group_mask| EnchantStep::new(mask_members(leaves, group_mask)))
        .collect();
    Some(OrderingPlan::new(
        steps,
        initial.saturating_add(u32::try_from(ops).unwrap_or(u32::MAX)),
        final_state.max_op,
        final_state.cost,
    ))
}

fn mask_members(leaves: &[Enchantment], mask: usize) -> Vec<Enchantment> {
    leaves
        .iter()
        .enumerate()
        .filter(|(index, _)| mask & (1 << index) != 0)
        .map(|(_, leaf)| leaf.clone())
        .collect()
}

/// A concrete grouping under evaluation by the greedy fallback.
struct Evaluation {
    total: u64,
    max_op: u64,
    /// Group indices in application order.
    order: Vec<usize>,
}

/// Greedy fallback for large wanted lists: start from singletons, accept a
/// pre-merge of two groups only when it strictly reduces the running
/// total, then force further pre-merges only to repair a penalty-cap
/// violation.
fn greedy_search(leaves: &[Enchantment], options: &ScheduleOptions) -> Result<OrderingPlan> {
    let initial = options.initial_penalty;
    let enforce = !options.tolerate_caps;
    if enforce && initial >= OrderingPlan::MAX_PENALTY {
        return Err(Error::TooManyPenalty {
            penalty: initial.saturating_add(1),
        });
    }

    let mut groups: Vec<Vec<Enchantment>> =
        leaves.iter().rev().map(|leaf| vec![leaf.clone()]).collect();
    let mut current = evaluate_groups(&groups, initial);
    debug!(
        count = leaves.len(),
        total = current.total,
        "greedy fallback engaged"
    );

    loop {
        let Some((i, j, eval)) = best_pair_merge(&groups, initial, Some(current.total)) else {
            break;
        };
        groups = merge_groups(&groups, i, j);
        debug!(
            total = eval.total,
            groups = groups.len(),
            "pre-merge accepted"
        );
        current = eval;
    }

    if enforce {
        let cap = (OrderingPlan::MAX_PENALTY - initial) as usize;
        while groups.len() > cap && groups.len() > 1 {
            let Some((i, j, eval)) = best_pair_merge(&groups, initial, None) else {
                break;
            };
            groups = merge_groups(&groups, i, j);
            current = eval;
        }
        if groups.len() > cap {
            return Err(Error::TooManyPenalty {
                penalty: initial.saturating_add(u32::try_from(groups.len()).unwrap_or(u32::MAX)),
            });
        }
        if current.max_op > OrderingPlan::MAX_EXPERIENCE {
            return Err(Error::TooExpensive {
                max_experience: current.max_op,
            });
        }
    }

    let steps: Vec<EnchantStep> = current
        .order
        .iter()
        .map(|&index| EnchantStep::new(groups[index].clone()))
        .collect();
    Ok(OrderingPlan::new(
        steps,
        initial.saturating_add(u32::try_from(groups.len()).unwrap_or(u32::MAX)),
        current.max_op,
        current.total,
    ))
}

/// Best merge of two groups, optionally required to beat `beat`.
fn best_pair_merge(
    groups: &[Vec<Enchantment>],
    initial: u32,
    beat: Option<u64>,
) -> Option<(usize, usize, Evaluation)> {
    let mut best: Option<(usize, usize, Evaluation)> = None;
    for i in 0..groups.len() {
        for j in (i + 1)..groups.len() {
            let merged = merge_groups(groups, i, j);
            let eval = evaluate_groups(&merged, initial);
            if let Some(limit) = beat {
                if eval.total >= limit {
                    continue;
                }
            }
            if best.as_ref().is_none_or(|(_, _, b)| eval.total < b.total) {
                best = Some((i, j, eval));
            }
        }
    }
    best
}

fn merge_groups(groups: &[Vec<Enchantment>], i: usize, j: usize) -> Vec<Vec<Enchantment>> {
    let mut merged: Vec<Vec<Enchantment>> = Vec::with_capacity(groups.len() - 1);
    for (index, group) in groups.iter().enumerate() {
        if index == j {
            continue;
        }
        let mut group = group.clone();
        if index == i {
            group.extend(groups[j].iter().cloned());
        }
        merged.push(group);
    }
    merged
}

fn evaluate_groups(groups: &[Vec<Enchantment>], initial: u32) -> Evaluation {
    let builds: Vec<(Build, u64)> = groups
        .iter()
        .map(|group| {
            let experience = group.iter().map(Enchantment::experience).sum();
            (group_build(group, initial), experience)
        })
        .collect();

    // The position multiplier doubles with every item op, so heavier
    // sources go first, while it is still small.
    let mut order: Vec<usize> = (0..groups.len()).collect();
    order.sort_by(|&a, &b| {
        let weight_a = source_weight(builds[a].1, builds[a].0.penalty);
        let weight_b = source_weight(builds[b].1, builds[b].0.penalty);
        weight_b.cmp(&weight_a).then(a.cmp(&b))
    });

    let mut total = 0u64;
    let mut max_op = 0u64;
    for (position, &index) in order.iter().enumerate() {
        let (build, experience) = builds[index];
        let item_penalty = initial.saturating_add(u32::try_from(position).unwrap_or(u32::MAX));
        let apply = combine_cost(experience, item_penalty, build.penalty);
        total = total
            .saturating_add(build.cost)
            .saturating_add(apply);
        max_op = max_op.max(build.max_op).max(apply);
    }
    Evaluation {
        total,
        max_op,
        order,
    }
}

/// Pick one build for a group: the optimal frontier entry for small
/// groups, a balanced pairing for oversized ones.
fn group_build(group: &[Enchantment], item_penalty: u32) -> Build {
    if group.len() == 1 {
        return LEAF_BUILD;
    }
    if group.len() > EXACT_SEARCH_MAX {
        return balanced_build(group);
    }
    let experiences: Vec<u64> = group.iter().map(Enchantment::experience).collect();
    let subset_exp = subset_experiences(&experiences);
    let frontiers = build_frontiers(group.len(), &subset_exp, false);
    let full = (1usize << group.len()) - 1;
    frontiers[full]
        .iter()
        .copied()
        .min_by_key(|build| {
            build
                .cost
                .saturating_add(combine_cost(subset_exp[full], item_penalty, build.penalty))
        })
        .unwrap_or(LEAF_BUILD)
}

/// Fuse an oversized group by pairing neighbors round by round, heaviest
/// first so the cheaper side is always the source.
fn balanced_build(group: &[Enchantment]) -> Build {
    let mut nodes: Vec<(u64, u32)> = {
        let mut sorted: Vec<&Enchantment> = group.iter().collect();
        sorted.sort_by(|a, b| b.cmp(a));
        sorted
            .into_iter()
            .map(|leaf| (leaf.experience(), 0u32))
            .collect()
    };
    let mut cost = 0u64;
    let mut max_op = 0u64;
    while nodes.len() > 1 {
        let mut next: Vec<(u64, u32)> = Vec::with_capacity(nodes.len().div_ceil(2));
        for pair in nodes.chunks(2) {
            if let [receiver, source] = pair {
                let op = combine_cost(source.0, receiver.1, source.1);
                cost = cost.saturating_add(op);
                max_op = max_op.max(op);
                next.push((receiver.0.saturating_add(source.0), receiver.1 + 1));
            } else {
                next.push(pair[0]);
            }
        }
        nodes = next;
    }
    Build {
        cost,
        penalty: nodes.first().map_or(0, |node| node.1),
        max_op,
    }
}

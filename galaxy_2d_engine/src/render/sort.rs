/// Quad sort strategies.
///
/// Every strategy is a total order: `z_index` first, the strategy keys next,
/// and the submission sequence last. The sorted order therefore depends only
/// on the set of quads, never on their input order.

use std::cmp::Ordering;
use super::quad::RenderableQuad;

/// How a frame's quads are ordered before flushing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortStrategy {
    /// z, texture, y: fewest draw calls
    #[default]
    TexturePriority,
    /// z, y, texture: painter's order
    DepthPriority,
    /// z, then y bands: quads whose y lies within a tolerance band are
    /// grouped by texture, bands are ordered by y
    Balanced,
}

fn texture_priority(a: &RenderableQuad, b: &RenderableQuad) -> Ordering {
    a.z_index.cmp(&b.z_index)
        .then(a.texture.cmp(&b.texture))
        .then(a.sort_y.total_cmp(&b.sort_y))
        .then(a.sequence.cmp(&b.sequence))
}

fn depth_priority(a: &RenderableQuad, b: &RenderableQuad) -> Ordering {
    a.z_index.cmp(&b.z_index)
        .then(a.sort_y.total_cmp(&b.sort_y))
        .then(a.texture.cmp(&b.texture))
        .then(a.sequence.cmp(&b.sequence))
}

/// Sort `quads` in place.
///
/// `y_tolerance` is only used by `Balanced`.
pub fn sort_quads(quads: &mut [RenderableQuad], strategy: SortStrategy, y_tolerance: f32) {
    match strategy {
        SortStrategy::TexturePriority => quads.sort_unstable_by(texture_priority),
        SortStrategy::DepthPriority => quads.sort_unstable_by(depth_priority),
        SortStrategy::Balanced => sort_balanced(quads, y_tolerance),
    }
}

/// Merge two lists already sorted with `strategy` into `out`, in the order
/// `sort_quads` would give their union.
///
/// Sequences must be unique across both lists. Balanced bands depend on
/// neighbouring quads, so that strategy re-sorts the union.
pub fn merge_sorted(
    first: &[RenderableQuad],
    second: &[RenderableQuad],
    strategy: SortStrategy,
    y_tolerance: f32,
    out: &mut Vec<RenderableQuad>,
) {
    out.clear();
    out.reserve(first.len() + second.len());
    let compare: fn(&RenderableQuad, &RenderableQuad) -> Ordering = match strategy {
        SortStrategy::TexturePriority => texture_priority,
        SortStrategy::DepthPriority => depth_priority,
        SortStrategy::Balanced => {
            out.extend_from_slice(first);
            out.extend_from_slice(second);
            sort_balanced(out, y_tolerance);
            return;
        }
    };

    let (mut i, mut j) = (0, 0);
    while i < first.len() && j < second.len() {
        if compare(&first[i], &second[j]) != Ordering::Greater {
            out.push(first[i]);
            i += 1;
        } else {
            out.push(second[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&first[i..]);
    out.extend_from_slice(&second[j..]);
}

/// Balanced order.
///
/// A pairwise "close in y" test is not transitive, so y values are first cut
/// into bands: walking each z layer by increasing y, a band starts at its
/// first quad and takes every following quad within `y_tolerance` of that
/// start. Quads are then ordered by (z, band, texture, y, sequence).
fn sort_balanced(quads: &mut [RenderableQuad], y_tolerance: f32) {
    quads.sort_unstable_by(depth_priority);

    let mut bands = Vec::with_capacity(quads.len());
    let mut band = 0u32;
    let mut anchor: Option<(i32, f32)> = None;
    for quad in quads.iter() {
        match anchor {
            Some((z, y)) if z == quad.z_index && quad.sort_y - y <= y_tolerance => {}
            Some(_) => {
                band += 1;
                anchor = Some((quad.z_index, quad.sort_y));
            }
            None => anchor = Some((quad.z_index, quad.sort_y)),
        }
        bands.push(band);
    }

    let mut keyed: Vec<(u32, RenderableQuad)> = bands.into_iter().zip(quads.iter().copied()).collect();
    keyed.sort_unstable_by(|(band_a, a), (band_b, b)| {
        band_a.cmp(band_b)
            .then(a.texture.cmp(&b.texture))
            .then(a.sort_y.total_cmp(&b.sort_y))
            .then(a.sequence.cmp(&b.sequence))
    });
    for (slot, (_, quad)) in quads.iter_mut().zip(keyed) {
        *slot = quad;
    }
}

#[cfg(test)]
#[path = "sort_tests.rs"]
mod tests;

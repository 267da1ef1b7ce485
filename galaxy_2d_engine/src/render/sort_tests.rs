use glam::{Vec2, Vec4};
use crate::sprite::{TextureId, UvRect};
use super::*;

fn quad(texture: u32, z_index: i32, y: f32, sequence: u64) -> RenderableQuad {
    RenderableQuad::from_tile(
        TextureId(texture), Vec2::new(0.0, y), Vec2::ONE, UvRect::FULL, z_index, Vec4::ONE, sequence,
    ).unwrap()
}

fn textures(quads: &[RenderableQuad]) -> Vec<u32> {
    quads.iter().map(|q| q.texture.0).collect()
}

fn sequences(quads: &[RenderableQuad]) -> Vec<u64> {
    quads.iter().map(|q| q.sequence).collect()
}

/// Number of maximal same-texture runs
fn runs(quads: &[RenderableQuad]) -> usize {
    quads.windows(2).filter(|w| w[0].texture != w[1].texture).count() + usize::from(!quads.is_empty())
}

fn mixed_scene() -> Vec<RenderableQuad> {
    vec![
        quad(2, 1, 50.0, 0),
        quad(1, 0, 10.0, 1),
        quad(2, 0, 11.0, 2),
        quad(1, 0, 12.0, 3),
        quad(2, 0, 13.0, 4),
        quad(1, 0, 30.0, 5),
        quad(3, -1, 0.0, 6),
        quad(2, 0, 30.0, 7),
    ]
}

const STRATEGIES: [SortStrategy; 3] = [
    SortStrategy::TexturePriority,
    SortStrategy::DepthPriority,
    SortStrategy::Balanced,
];

// ============================================================================
// Orders
// ============================================================================

#[test]
fn test_texture_priority_order() {
    let mut quads = mixed_scene();
    sort_quads(&mut quads, SortStrategy::TexturePriority, 4.0);
    assert_eq!(sequences(&quads), vec![6, 1, 3, 5, 2, 4, 7, 0]);
}

#[test]
fn test_depth_priority_order() {
    let mut quads = mixed_scene();
    sort_quads(&mut quads, SortStrategy::DepthPriority, 4.0);
    assert_eq!(sequences(&quads), vec![6, 1, 2, 3, 4, 5, 7, 0]);
}

#[test]
fn test_balanced_order() {
    let mut quads = mixed_scene();
    sort_quads(&mut quads, SortStrategy::Balanced, 4.0);
    // z 0 bands: y 10..13 (texture grouped), then y 30
    assert_eq!(sequences(&quads), vec![6, 1, 3, 2, 4, 5, 7, 0]);
}

#[test]
fn test_balanced_groups_close_y_by_texture() {
    // Same z, y 0 and 3 (within the tolerance), different textures
    let mut quads = vec![quad(2, 0, 0.0, 0), quad(1, 0, 3.0, 1)];
    sort_quads(&mut quads, SortStrategy::Balanced, 4.0);
    assert_eq!(textures(&quads), vec![1, 2]);

    let mut quads = vec![quad(2, 0, 0.0, 0), quad(1, 0, 3.0, 1)];
    sort_quads(&mut quads, SortStrategy::DepthPriority, 4.0);
    assert_eq!(textures(&quads), vec![2, 1]);
}

#[test]
fn test_balanced_splits_distant_y() {
    let mut quads = vec![quad(2, 0, 0.0, 0), quad(1, 0, 10.0, 1)];
    sort_quads(&mut quads, SortStrategy::Balanced, 4.0);
    assert_eq!(textures(&quads), vec![2, 1]);
}

#[test]
fn test_balanced_tolerance_is_configurable() {
    let mut quads = vec![quad(2, 0, 0.0, 0), quad(1, 0, 10.0, 1)];
    sort_quads(&mut quads, SortStrategy::Balanced, 16.0);
    assert_eq!(textures(&quads), vec![1, 2]);
}

#[test]
fn test_balanced_reduces_runs_compared_to_depth() {
    let interleaved: Vec<RenderableQuad> = (0..8).map(|i| quad(1 + (i % 2) as u32, 0, i as f32 * 0.5, i)).collect();

    let mut depth = interleaved.clone();
    sort_quads(&mut depth, SortStrategy::DepthPriority, 4.0);
    let mut balanced = interleaved;
    sort_quads(&mut balanced, SortStrategy::Balanced, 4.0);

    assert_eq!(runs(&depth), 8);
    assert_eq!(runs(&balanced), 2);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_sort_is_idempotent() {
    for strategy in STRATEGIES {
        let mut once = mixed_scene();
        sort_quads(&mut once, strategy, 4.0);
        let mut twice = once.clone();
        sort_quads(&mut twice, strategy, 4.0);
        assert_eq!(once, twice, "{:?}", strategy);
    }
}

#[test]
fn test_sort_ignores_input_order() {
    for strategy in STRATEGIES {
        let mut forward = mixed_scene();
        let mut reversed: Vec<RenderableQuad> = mixed_scene().into_iter().rev().collect();
        sort_quads(&mut forward, strategy, 4.0);
        sort_quads(&mut reversed, strategy, 4.0);
        assert_eq!(forward, reversed, "{:?}", strategy);
    }
}

#[test]
fn test_z_index_is_always_primary() {
    for strategy in STRATEGIES {
        let mut quads = mixed_scene();
        sort_quads(&mut quads, strategy, 4.0);
        assert!(quads.windows(2).all(|w| w[0].z_index <= w[1].z_index), "{:?}", strategy);
    }
}

#[test]
fn test_sequence_breaks_exact_ties() {
    for strategy in STRATEGIES {
        let mut quads = vec![quad(1, 0, 5.0, 3), quad(1, 0, 5.0, 1), quad(1, 0, 5.0, 2)];
        sort_quads(&mut quads, strategy, 4.0);
        assert_eq!(sequences(&quads), vec![1, 2, 3]);
    }
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_merge_sorted_matches_sorting_the_union() {
    let scene = mixed_scene();
    for strategy in STRATEGIES {
        let (mut first, mut second): (Vec<RenderableQuad>, Vec<RenderableQuad>) =
            scene.iter().copied().partition(|q| q.sequence % 3 == 0);
        sort_quads(&mut first, strategy, 4.0);
        sort_quads(&mut second, strategy, 4.0);

        let mut merged = Vec::new();
        merge_sorted(&first, &second, strategy, 4.0, &mut merged);

        let mut expected = scene.clone();
        sort_quads(&mut expected, strategy, 4.0);
        assert_eq!(sequences(&merged), sequences(&expected), "{:?}", strategy);
    }
}

#[test]
fn test_merge_sorted_joins_texture_runs_across_lists() {
    let first = vec![quad(1, 0, 0.0, 0), quad(2, 0, 0.0, 1)];
    let second = vec![quad(1, 0, 10.0, 2)];
    let mut merged = Vec::new();
    merge_sorted(&first, &second, SortStrategy::TexturePriority, 4.0, &mut merged);
    assert_eq!(textures(&merged), vec![1, 1, 2]);
    assert_eq!(runs(&merged), 2);
}

#[test]
fn test_merge_sorted_recomputes_balanced_bands() {
    // Each list alone has one quad per band; together they share a band
    let first = vec![quad(2, 0, 0.0, 0)];
    let second = vec![quad(1, 0, 2.0, 1)];
    let mut merged = vec![quad(9, 9, 9.0, 9)];
    merge_sorted(&first, &second, SortStrategy::Balanced, 4.0, &mut merged);
    assert_eq!(textures(&merged), vec![1, 2]);
}

#[test]
fn test_default_strategy() {
    assert_eq!(SortStrategy::default(), SortStrategy::TexturePriority);
}

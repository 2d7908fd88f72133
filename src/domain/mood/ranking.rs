//! Mood Context - 距离排序引擎
//!
//! 纯函数：按与目标心情的欧氏距离排序、计算可播放边界、可播放区间内的局部打乱

use rand::Rng;

use super::MoodVector;

/// 默认最大可接受距离
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// 默认局部打乱窗口（任一位置最多与其后 5 个位置交换）
pub const DEFAULT_SHUFFLE_WINDOW: usize = 5;

/// 排序策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingPolicy {
    /// 超过该距离的曲目被排除在队列之外
    pub threshold: f64,
    /// 局部打乱窗口大小，0 表示不打乱
    pub shuffle_window: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            shuffle_window: DEFAULT_SHUFFLE_WINDOW,
        }
    }
}

/// 按距离升序排序，同时返回每一项的距离
///
/// 稳定排序：距离相同的项保持输入中的相对顺序
pub fn rank_by_distance<T, F>(items: Vec<T>, mood_of: F, target: MoodVector) -> Vec<(T, f64)>
where
    F: Fn(&T) -> MoodVector,
{
    let mut ranked: Vec<(T, f64)> = items
        .into_iter()
        .map(|item| {
            let distance = mood_of(&item).distance(target);
            (item, distance)
        })
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

/// 按与 `target` 的距离升序排列 `items`
pub fn rank<T, F>(items: &[T], mood_of: F, target: MoodVector) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> MoodVector,
{
    rank_by_distance(items.to_vec(), mood_of, target)
        .into_iter()
        .map(|(item, _)| item)
        .collect()
}

/// 可播放边界：第一个距离超过 `threshold` 的下标；都不超过时为序列长度
///
/// `distances` 必须已升序排列
pub fn playable_boundary(distances: &[f64], threshold: f64) -> usize {
    distances
        .iter()
        .position(|d| *d > threshold)
        .unwrap_or(distances.len())
}

/// 在 `[start, end)` 内做有界局部打乱
///
/// 依次对每个位置 `i`，与 `[i, min(i + window, end - 1)]` 中随机位置 `j` 交换。
/// 窗口以被交换项的原始位置为锚点，因此任何一项最终离开原位置都不超过 `window`，
/// 区间外的元素保持不动。
pub fn local_shuffle<T, R>(items: &mut [T], start: usize, end: usize, window: usize, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let end = end.min(items.len());
    if window == 0 || start + 1 >= end {
        return;
    }

    // origin[k] = 当前位于 start + k 的元素的原始位置
    let mut origin: Vec<usize> = (start..end).collect();

    for i in start..end {
        let reach = (origin[i - start] + window).min(end - 1);
        if reach <= i {
            continue;
        }
        let j = rng.gen_range(i..=reach);
        items.swap(i, j);
        origin.swap(i - start, j - start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn moods() -> HashMap<&'static str, MoodVector> {
        HashMap::from([
            ("A", MoodVector::new(1.0, 1.0, 0.0)),
            ("B", MoodVector::new(0.0, 0.0, 1.0)),
            ("C", MoodVector::new(0.5, 0.5, 0.5)),
        ])
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let table = moods();
        let ranked = rank(&["A", "B", "C"], |id| table[id], MoodVector::new(1.0, 1.0, 0.0));
        assert_eq!(ranked, vec!["A", "C", "B"]);

        let with_distances = rank_by_distance(
            vec!["B", "C", "A"],
            |id| table[id],
            MoodVector::new(1.0, 1.0, 0.0),
        );
        assert_eq!(with_distances[0].1, 0.0);
        assert!((with_distances[1].1 - 0.75f64.sqrt()).abs() < 1e-9);
        assert!((with_distances[2].1 - 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let same = MoodVector::new(0.3, 0.3, 0.3);
        let items = vec!["t1", "t2", "far", "t3", "t4"];
        let ranked = rank(
            &items,
            |id| {
                if *id == "far" {
                    MoodVector::new(1.0, 1.0, 1.0)
                } else {
                    same
                }
            },
            MoodVector::ZERO,
        );
        assert_eq!(ranked, vec!["t1", "t2", "t3", "t4", "far"]);
    }

    #[test]
    fn test_rank_repeated_with_same_mood_is_identical() {
        let table = moods();
        let target = MoodVector::new(0.5, 0.5, 0.0);
        let first = rank(&["C", "A", "B"], |id| table[id], target);
        let second = rank(&first, |id| table[id], target);
        assert_eq!(first, second);
    }

    #[test]
    fn test_playable_boundary() {
        assert_eq!(playable_boundary(&[0.0, 0.1, 0.4, 0.41, 0.9], 0.4), 3);
        assert_eq!(playable_boundary(&[0.0, 0.1], 0.4), 2);
        assert_eq!(playable_boundary(&[0.5, 0.6], 0.4), 0);
        assert_eq!(playable_boundary(&[], 0.4), 0);
    }

    #[test]
    fn test_playable_boundary_monotonic_in_threshold() {
        let distances = [0.0, 0.05, 0.2, 0.2, 0.35, 0.5, 0.8, 1.2, 1.7];
        let mut previous = 0;
        for step in 0..=40 {
            let threshold = step as f64 * 0.05;
            let boundary = playable_boundary(&distances, threshold);
            assert!(boundary >= previous, "threshold {}", threshold);
            previous = boundary;
        }
        assert_eq!(previous, distances.len());
    }

    #[test]
    fn test_local_shuffle_displacement_bound() {
        let len = 40;
        let (start, end) = (3, 33);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut items: Vec<usize> = (0..len).collect();
            local_shuffle(&mut items, start, end, DEFAULT_SHUFFLE_WINDOW, &mut rng);

            for (pos, original) in items.iter().enumerate() {
                if pos < start || pos >= end {
                    assert_eq!(pos, *original, "outside range must not move");
                } else {
                    assert!(
                        original.abs_diff(pos) <= DEFAULT_SHUFFLE_WINDOW,
                        "seed {}: item from {} landed at {}",
                        seed,
                        original,
                        pos
                    );
                }
            }

            let mut sorted = items.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_local_shuffle_is_not_deterministic_across_runs() {
        let base: Vec<usize> = (0..30).collect();
        let mut outcomes = std::collections::HashSet::new();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut items = base.clone();
            local_shuffle(&mut items, 0, 30, DEFAULT_SHUFFLE_WINDOW, &mut rng);
            outcomes.insert(items);
        }
        assert!(outcomes.len() > 1);
    }

    #[test]
    fn test_local_shuffle_degenerate_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items = vec![1, 2, 3, 4];
        local_shuffle(&mut items, 0, 4, 0, &mut rng);
        assert_eq!(items, vec![1, 2, 3, 4]);
        local_shuffle(&mut items, 2, 3, 5, &mut rng);
        assert_eq!(items, vec![1, 2, 3, 4]);
        local_shuffle(&mut items, 3, 1, 5, &mut rng);
        assert_eq!(items, vec![1, 2, 3, 4]);
    }
}

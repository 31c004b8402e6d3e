//! Stratified splitting

use crate::error::{ModelError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Indices of each class, shuffled deterministically
fn shuffled_classes(labels: &[u8], rng: &mut StdRng) -> [Vec<usize>; 2] {
    let mut classes: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    for (i, &label) in labels.iter().enumerate() {
        classes[usize::from(label == 1)].push(i);
    }
    for class in classes.iter_mut() {
        class.shuffle(rng);
    }
    classes
}

/// Split into (train, test) index sets preserving the class ratio
pub fn stratified_split(labels: &[u8], test_size: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ModelError::Dataset(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for class in shuffled_classes(labels, &mut rng) {
        if class.is_empty() {
            continue;
        }
        let n_test = ((class.len() as f64) * test_size).round() as usize;
        let n_test = n_test.clamp(1, class.len().saturating_sub(1).max(1));
        test.extend_from_slice(&class[..n_test]);
        train.extend_from_slice(&class[n_test..]);
    }

    if train.is_empty() || test.is_empty() {
        return Err(ModelError::Dataset(
            "not enough records to split into train and test sets".to_string(),
        ));
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok((train, test))
}

/// `k` (train, validation) index pairs with each class spread across folds
pub fn stratified_kfold(labels: &[u8], k: usize, seed: u64) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
    if k < 2 {
        return Err(ModelError::Dataset("at least 2 folds are required".to_string()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let classes = shuffled_classes(labels, &mut rng);
    if classes.iter().any(|c| c.len() < k) {
        return Err(ModelError::Dataset(format!(
            "each class needs at least {} records for {}-fold cross-validation",
            k, k
        )));
    }

    let mut fold_of = vec![0usize; labels.len()];
    for class in &classes {
        for (position, &index) in class.iter().enumerate() {
            fold_of[index] = position % k;
        }
    }

    Ok((0..k)
        .map(|fold| {
            let (validation, train): (Vec<usize>, Vec<usize>) =
                (0..labels.len()).partition(|&i| fold_of[i] == fold);
            (train, validation)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pos: usize, neg: usize) -> Vec<u8> {
        let mut y = vec![1u8; pos];
        y.extend(vec![0u8; neg]);
        y
    }

    #[test]
    fn test_split_preserves_ratio() {
        let y = labels(20, 80);
        let (train, test) = stratified_split(&y, 0.2, 42).unwrap();
        assert_eq!(train.len() + test.len(), 100);
        assert_eq!(test.len(), 20);
        assert_eq!(test.iter().filter(|&&i| y[i] == 1).count(), 4);
        assert!(train.iter().all(|i| !test.contains(i)));
    }

    #[test]
    fn test_split_is_deterministic() {
        let y = labels(30, 70);
        assert_eq!(
            stratified_split(&y, 0.2, 7).unwrap(),
            stratified_split(&y, 0.2, 7).unwrap()
        );
        assert_ne!(
            stratified_split(&y, 0.2, 7).unwrap().1,
            stratified_split(&y, 0.2, 8).unwrap().1
        );
    }

    #[test]
    fn test_split_rejects_bad_size() {
        assert!(stratified_split(&labels(5, 5), 0.0, 1).is_err());
        assert!(stratified_split(&labels(5, 5), 1.0, 1).is_err());
    }

    #[test]
    fn test_kfold_covers_every_index_once() {
        let y = labels(10, 25);
        let folds = stratified_kfold(&y, 5, 42).unwrap();
        assert_eq!(folds.len(), 5);

        let mut seen = vec![0; y.len()];
        for (train, validation) in &folds {
            assert_eq!(train.len() + validation.len(), y.len());
            assert_eq!(validation.iter().filter(|&&i| y[i] == 1).count(), 2);
            for &i in validation {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_kfold_needs_enough_minority() {
        assert!(stratified_kfold(&labels(3, 20), 5, 42).is_err());
    }
}

//! Content-based recommender
//!
//! Ranks catalog products by cosine similarity of their raw feature vectors
//! (price, ram, storage, rating) against a target product. Features are not
//! scaled, so price dominates the ranking.

use tracing::debug;

use crate::catalog::{self, CatalogProvider, FEATURE_COUNT, Product};
use crate::error::{Error, Result};
use crate::vector::cosine_similarity;

/// How many products a recommendation returns at most
pub const RECOMMENDATION_COUNT: usize = 3;

/// Feature vectors of the whole catalog, one row per product, catalog order kept
fn feature_rows(catalog: &[Product]) -> Result<Vec<[f64; FEATURE_COUNT]>> {
    if catalog.is_empty() {
        return Err(Error::InvalidInput("Empty catalog".to_string()));
    }

    catalog.iter().map(Product::features).collect()
}

fn similarity(left: &[f64], right: &[f64]) -> f64 {
    // Rows all come from `Product::features`, so dimensions always agree
    cosine_similarity(left, right).unwrap_or(0.0)
}

/// Full pairwise cosine-similarity matrix of the catalog.
///
/// `matrix[i][j]` is the similarity between products `i` and `j`. The matrix
/// is symmetric; a product with an all-zero feature vector has similarity 0
/// with everything, including itself.
pub fn similarity_matrix(catalog: &[Product]) -> Result<Vec<Vec<f64>>> {
    let rows = feature_rows(catalog)?;

    let mut matrix = vec![vec![0.0; rows.len()]; rows.len()];
    for i in 0..rows.len() {
        for j in i..rows.len() {
            let sim = similarity(&rows[i], &rows[j]);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }

    Ok(matrix)
}

/// Ranks every other product against the target.
///
/// Only the target's row of the similarity matrix is computed. Scores are
/// sorted descending with a stable sort, so equal scores keep catalog order.
/// The target's own entry is dropped, then at most `top_k` entries are kept.
///
/// # Returns
///
/// * `Ok(Vec<(usize, f64)>)` - Catalog index and similarity score per match
/// * `Err(Error::InvalidInput)` - Empty catalog or a product without valid features
/// * `Err(Error::NotFound)` - No product has `target_id`
pub fn rank(catalog: &[Product], target_id: u64, top_k: usize) -> Result<Vec<(usize, f64)>> {
    let rows = feature_rows(catalog)?;

    let target = catalog::position(catalog, target_id)
        .ok_or_else(|| Error::NotFound(format!("product {}", target_id)))?;

    let mut scores: Vec<(usize, f64)> = rows.iter()
        .enumerate()
        .map(|(i, row)| (i, similarity(&rows[target], row)))
        .collect();

    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    let ranked: Vec<(usize, f64)> = scores.into_iter()
        .filter(|(i, _)| *i != target)
        .take(top_k)
        .collect();

    debug!(target_id, catalog = catalog.len(), matches = ranked.len(), "ranked catalog");

    Ok(ranked)
}

/// Recommends up to three products most similar to `target_id`.
///
/// # Examples
///
/// ```
/// use cartiq::{Product, recommend};
///
/// let catalog = vec![
///     Product::new(1, 100.0, 4.0, 64.0, 4.0),
///     Product::new(2, 100.0, 4.0, 64.0, 4.0),
///     Product::new(3, 900.0, 16.0, 512.0, 4.8),
///     Product::new(4, 50.0, 2.0, 32.0, 3.0),
/// ];
///
/// let recs = recommend(&catalog, 1).unwrap();
/// assert_eq!(recs.len(), 3);
/// assert_eq!(recs[0].id, 2);
/// assert!(recs.iter().all(|p| p.id != 1));
/// ```
pub fn recommend(catalog: &[Product], target_id: u64) -> Result<Vec<Product>> {
    let ranked = rank(catalog, target_id, RECOMMENDATION_COUNT)?;

    Ok(ranked.into_iter()
        .map(|(i, _)| catalog[i].clone())
        .collect())
}

/// Takes a fresh snapshot from `provider` and recommends against it
pub fn recommend_from<P>(provider: &P, target_id: u64) -> Result<Vec<Product>>
where
    P: CatalogProvider + ?Sized,
{
    let catalog = provider.snapshot()?;
    recommend(&catalog, target_id)
}

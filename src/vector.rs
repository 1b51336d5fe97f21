//! This is the vector math module
//! Provide dot product, magnitude and cosine similarity

/// Dot Product
/// dot_prod = sum(a[i] * b[i]) for i = 0..a.len()
/// Can only process vectors with same dimensions
pub fn dot_product(left: &[f64], right: &[f64]) -> Result<f64, String> {
    if left.len() != right.len() {
        return Err("Different dimensions".to_string());
    }

    let dot_prod = left.iter()
        .zip(right.iter())
        .map(|(x, y)| x * y)
        .sum();

    Ok(dot_prod)
}

/// Euclidean length
/// ||vec|| = sqrt(sum(vec[i]^2))
pub fn magnitude(vector: &[f64]) -> f64 {
    vector.iter()
        .map(|x| x * x)
        .sum::<f64>()
        .sqrt()
}

/// Cosine similarity
/// sim = (u . v) / (||u|| * ||v||)
///
/// Defined as 0 when either side has zero magnitude, so a zero vector is
/// similar to nothing, itself included.
pub fn cosine_similarity(left: &[f64], right: &[f64]) -> Result<f64, String> {
    let dot = dot_product(left, right)?;

    let norms = magnitude(left) * magnitude(right);
    if norms == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / norms)
}

#[cfg(test)]
mod vector_test {
    use super::*;

    // ========== Dot Product Tests ==========

    #[test]
    fn test_dot_product_basic() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        // Expected: 1*4 + 2*5 + 3*6 = 4 + 10 + 18 = 32
        let result = dot_product(&a, &b).unwrap();

        assert!((result - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_dot_product_dimension_mismatch() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0];

        let result = dot_product(&a, &b);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Different dimensions");
    }

    #[test]
    fn test_dot_product_empty_vectors() {
        let result = dot_product(&[], &[]).unwrap();
        assert_eq!(result, 0.0);
    }

    // ========== Magnitude Tests ==========

    #[test]
    fn test_magnitude_pythagorean() {
        // ||[3,4]|| = sqrt(9+16) = 5
        assert!((magnitude(&[3.0, 4.0]) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_magnitude_zero_vector() {
        assert_eq!(magnitude(&[0.0, 0.0, 0.0, 0.0]), 0.0);
    }

    // ========== Cosine Similarity Tests ==========

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![100.0, 4.0, 64.0, 4.0];
        let sim = cosine_similarity(&v, &v).unwrap();

        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_ignores_magnitude() {
        // Same direction, different length
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![2.0, 4.0, 6.0, 8.0];

        assert!((cosine_similarity(&a, &b).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];

        assert!(cosine_similarity(&a, &b).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_cosine_known_value() {
        // [1,0,0] vs [0.7,0.7,0] is ~0.7071
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[0.7, 0.7, 0.0]).unwrap();
        assert!((sim - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_symmetric() {
        let a = vec![900.0, 16.0, 512.0, 4.8];
        let b = vec![50.0, 2.0, 32.0, 3.0];

        assert_eq!(
            cosine_similarity(&a, &b).unwrap(),
            cosine_similarity(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        let zero = vec![0.0; 4];
        let other = vec![1.0, 2.0, 3.0, 4.0];

        assert_eq!(cosine_similarity(&zero, &other).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&other, &zero).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        let result = cosine_similarity(&[1.0, 2.0], &[1.0]);
        assert!(result.is_err());
    }
}

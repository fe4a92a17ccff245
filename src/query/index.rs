//! Exact nearest-neighbour index over the corpus vectors
//!
//! Brute-force scan with squared Euclidean distance, the same metric a flat
//! L2 index reports. Corpus sizes here are small enough that an exact scan
//! per request is cheaper than maintaining an ANN structure.

use crate::{Result, Error};
use crate::corpus::QaCorpus;
use super::{QueryResult, SimilarityIndex};

/// Read-only flat index; position in `vectors` is the corpus id
#[derive(Debug, Clone)]
pub struct FlatIndex {
    vectors: Vec<Vec<f32>>,
    dimension: usize,
}

impl FlatIndex {
    /// Build an index from vectors of equal dimension
    pub fn new(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = vectors.first().map(Vec::len).unwrap_or(0);

        if let Some((id, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dimension) {
            return Err(Error::Index(format!(
                "vector {} has dimension {}, expected {}",
                id,
                v.len(),
                dimension
            )));
        }

        Ok(Self { vectors, dimension })
    }

    /// Build an index that must cover exactly the ids of `corpus`
    pub fn for_corpus(vectors: Vec<Vec<f32>>, corpus: &QaCorpus) -> Result<Self> {
        if vectors.len() != corpus.len() {
            return Err(Error::Index(format!(
                "index has {} vectors but corpus has {} entries",
                vectors.len(),
                corpus.len()
            )));
        }
        Self::new(vectors)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl SimilarityIndex for FlatIndex {
    fn nearest(&self, vector: &[f32]) -> Result<QueryResult> {
        if self.vectors.is_empty() {
            return Err(Error::Index("index is empty".to_string()));
        }
        if vector.len() != self.dimension {
            return Err(Error::Index(format!(
                "query has dimension {}, index expects {}",
                vector.len(),
                self.dimension
            )));
        }

        let mut best = QueryResult::new(0, f32::INFINITY);
        for (id, candidate) in self.vectors.iter().enumerate() {
            let distance = squared_l2(vector, candidate);
            if distance < best.distance {
                best = QueryResult::new(id, distance);
            }
        }

        Ok(best)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::QaEntry;

    fn sample_index() -> FlatIndex {
        FlatIndex::new(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![-1.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_nearest() {
        let index = sample_index();

        let hit = index.nearest(&[0.1, 0.9]).unwrap();
        assert_eq!(hit.matched_id, 1);
        assert!((hit.distance - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_exact_hit_has_zero_distance() {
        let hit = sample_index().nearest(&[-1.0, 0.0]).unwrap();
        assert_eq!(hit.matched_id, 2);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(matches!(sample_index().nearest(&[1.0, 0.0, 0.0]), Err(Error::Index(_))));
        assert!(FlatIndex::new(vec![vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_empty_index() {
        let index = FlatIndex::new(vec![]).unwrap();
        assert!(index.is_empty());
        assert!(index.nearest(&[]).is_err());
    }

    #[test]
    fn test_for_corpus_checks_cardinality() {
        let corpus = QaCorpus::new(vec![QaEntry::new("q", "a")]);
        assert!(FlatIndex::for_corpus(vec![vec![1.0], vec![2.0]], &corpus).is_err());
        assert_eq!(FlatIndex::for_corpus(vec![vec![1.0]], &corpus).unwrap().len(), 1);
    }
}

use crate::core::metrics::OpCounter;
use crate::error::{GroupingError, Result};
use crate::models::Person;

/// Penalty added when two persons answered the category question differently
pub const DEFAULT_CATEGORY_PENALTY: u32 = 4;

/// Number of Likert questions in the questionnaire
pub const DEFAULT_LIKERT_LEN: usize = 5;

/// Pairwise dissimilarity between two respondents
///
/// distance = Σ |a.likert[i] - b.likert[i]| + (category_penalty if categories differ)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceModel {
    pub likert_len: usize,
    pub category_penalty: u32,
}

impl Default for DistanceModel {
    fn default() -> Self {
        Self {
            likert_len: DEFAULT_LIKERT_LEN,
            category_penalty: DEFAULT_CATEGORY_PENALTY,
        }
    }
}

impl DistanceModel {
    pub fn new(likert_len: usize, category_penalty: u32) -> Self {
        Self { likert_len, category_penalty }
    }

    /// Distance between two persons, rejecting vectors of the wrong length
    ///
    /// A shape error names `a` as person 0 and `b` as person 1.
    pub fn distance(&self, a: &Person, b: &Person) -> Result<u32> {
        self.check_shape(0, a)?;
        self.check_shape(1, b)?;
        Ok(self.distance_unchecked(a, b))
    }

    pub(crate) fn check_shape(&self, index: usize, person: &Person) -> Result<()> {
        if person.likert.len() != self.likert_len {
            return Err(GroupingError::LikertLengthMismatch {
                person: index,
                expected: self.likert_len,
                found: person.likert.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn distance_unchecked(&self, a: &Person, b: &Person) -> u32 {
        let ordinal: u32 = a
            .likert
            .iter()
            .zip(b.likert.iter())
            .map(|(x, y)| x.abs_diff(*y) as u32)
            .sum();

        if a.category != b.category {
            ordinal + self.category_penalty
        } else {
            ordinal
        }
    }
}

/// Symmetric all-pairs distance table, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<u32>,
}

impl DistanceMatrix {
    /// Evaluate the model once per unordered pair and mirror the result
    pub fn build(persons: &[Person], model: &DistanceModel, ops: &mut OpCounter) -> Result<Self> {
        for (i, person) in persons.iter().enumerate() {
            model.check_shape(i, person)?;
        }

        let n = persons.len();
        let mut data = vec![0u32; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = model.distance_unchecked(&persons[i], &persons[j]);
                ops.count(2 + model.likert_len);
                if persons[i].category != persons[j].category {
                    ops.tick();
                }
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        tracing::debug!("Built {}x{} distance matrix", n, n);

        Ok(Self { n, data })
    }

    /// Wrap a precomputed square table
    ///
    /// Returns `None` unless the table is square, symmetric and zero on the diagonal.
    pub fn from_rows(rows: &[Vec<u32>]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return None;
        }
        for i in 0..n {
            if rows[i][i] != 0 {
                return None;
            }
            for j in (i + 1)..n {
                if rows[i][j] != rows[j][i] {
                    return None;
                }
            }
        }
        Some(Self {
            n,
            data: rows.iter().flatten().copied().collect(),
        })
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[u32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(likert: &[u8], category: &str) -> Person {
        Person::new("p", likert.to_vec(), category)
    }

    #[test]
    fn test_manhattan_plus_penalty() {
        let model = DistanceModel::default();
        let a = person(&[1, 2, 3, 4, 5], "A");
        let b = person(&[5, 4, 3, 2, 1], "B");

        // 4 + 2 + 0 + 2 + 4 = 12, plus 4 for the category
        assert_eq!(model.distance(&a, &b).unwrap(), 16);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let model = DistanceModel::default();
        let a = person(&[3, 1, 4, 1, 5], "X");
        assert_eq!(model.distance(&a, &a).unwrap(), 0);
    }

    #[test]
    fn test_distance_symmetric() {
        let model = DistanceModel::new(3, 7);
        let a = person(&[1, 5, 2], "X");
        let b = person(&[4, 4, 4], "Y");
        assert_eq!(model.distance(&a, &b).unwrap(), model.distance(&b, &a).unwrap());
        assert_eq!(model.distance(&a, &b).unwrap(), 3 + 1 + 2 + 7);
    }

    #[test]
    fn test_shape_mismatch() {
        let model = DistanceModel::default();
        let a = person(&[1, 2, 3, 4, 5], "A");
        let b = person(&[1, 2, 3], "A");

        let err = model.distance(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            GroupingError::LikertLengthMismatch { expected: 5, found: 3, .. }
        ));
    }

    #[test]
    fn test_matrix_symmetric_with_zero_diagonal() {
        let persons = vec![
            person(&[1, 1, 1, 1, 1], "A"),
            person(&[5, 5, 5, 5, 5], "B"),
            person(&[3, 3, 3, 3, 3], "A"),
        ];
        let matrix =
            DistanceMatrix::build(&persons, &DistanceModel::default(), &mut OpCounter::disabled())
                .unwrap();

        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 0);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert_eq!(matrix.get(0, 1), 24);
        assert_eq!(matrix.get(0, 2), 10);
        assert_eq!(matrix.row(1), &[24, 0, 14]);
    }

    #[test]
    fn test_matrix_reports_offending_person() {
        let persons = vec![person(&[1, 1, 1, 1, 1], "A"), person(&[1, 1], "A")];
        let err =
            DistanceMatrix::build(&persons, &DistanceModel::default(), &mut OpCounter::disabled())
                .unwrap_err();
        assert!(matches!(err, GroupingError::LikertLengthMismatch { person: 1, .. }));
    }

    #[test]
    fn test_from_rows_rejects_asymmetric() {
        assert!(DistanceMatrix::from_rows(&[vec![0, 1], vec![2, 0]]).is_none());
        assert!(DistanceMatrix::from_rows(&[vec![0, 1], vec![1, 0]]).is_some());
    }

    #[test]
    fn test_build_counts_operations() {
        let persons = vec![person(&[1, 1, 1, 1, 1], "A"), person(&[2, 2, 2, 2, 2], "B")];
        let mut ops = OpCounter::enabled();
        DistanceMatrix::build(&persons, &DistanceModel::default(), &mut ops).unwrap();
        // pair + distance call + 5 comparisons + category mismatch
        assert_eq!(ops.total(), 8);
    }
}

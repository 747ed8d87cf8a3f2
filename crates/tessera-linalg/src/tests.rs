//! Integration tests for tessera-linalg over exact scalars.

#[cfg(test)]
mod integration_tests {
    use std::cell::Cell;

    use tessera_core::Ownership;
    use tessera_integers::{Integer, Rational};

    use crate::{All, Matrix, Vector};

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d).unwrap()
    }

    thread_local! {
        static CLONES: Cell<usize> = const { Cell::new(0) };
    }

    /// Element that records how often it is cloned on this thread.
    #[derive(Debug, PartialEq)]
    struct Counted(i64);

    impl Clone for Counted {
        fn clone(&self) -> Self {
            CLONES.with(|c| c.set(c.get() + 1));
            Counted(self.0)
        }
    }

    fn clones() -> usize {
        CLONES.with(Cell::get)
    }

    fn int_matrix(rows: &[&[i64]]) -> Matrix<Integer> {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().copied().map(Integer::new).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_aliases_diverge_on_write() {
        let a = int_matrix(&[&[1, 2], &[3, 4]]);
        let b = a.share();
        let mut c = a.share();
        assert_eq!(a.ownership(), Ownership::Shared(3));

        c[(0, 0)] = Integer::new(9);

        assert_eq!(b[(0, 0)], Integer::new(1));
        assert_eq!(a[(0, 0)], Integer::new(1));
        assert_eq!(c[(0, 0)], Integer::new(9));
        assert!(a.is_same_storage(&b));
        assert!(!a.is_same_storage(&c));
        assert_eq!(c.ownership(), Ownership::Owned);
    }

    #[test]
    fn test_reads_never_divorce() {
        let a = int_matrix(&[&[1, 2], &[3, 4]]);
        let b = a.share();
        assert_eq!(a.rows(), b.rows());

        let _ = b.get(1, 1);
        let _ = b.row(0).to_vector();
        let _ = b.minor(All, [1]).unwrap().to_matrix();
        let _ = b.transpose();
        let _ = b.to_string();
        assert!(a.is_same_storage(&b));
    }

    #[test]
    fn test_minor_write_divorces_once() {
        let a = int_matrix(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        let mut b = a.share();
        {
            let mut block = b.minor_mut(1..3, 0..2).unwrap();
            // All writes land in the same private body.
            block.fill(&Integer::new(0));
            block[(0, 1)] = Integer::new(-5);
        }
        assert_eq!(b, int_matrix(&[&[1, 2, 3], &[0, -5, 6], &[0, 0, 9]]));
        assert_eq!(a, int_matrix(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]));
        assert_eq!(a.ownership(), Ownership::Owned);
        assert_eq!(b.ownership(), Ownership::Owned);
    }

    #[test]
    fn test_minor_write_copies_each_element_once() {
        let a = Matrix::from_vec(3, 3, (1..=9).map(Counted).collect()).unwrap();
        let mut b = a.share();
        let before = clones();
        {
            let mut block = b.minor_mut(1..3, 0..2).unwrap();
            block[(0, 0)] = Counted(0);
            block[(1, 0)] = Counted(0);
            block[(0, 1)] = Counted(-5);
        }
        b[(0, 0)] = Counted(10);
        assert_eq!(clones() - before, 9);

        assert_eq!(a[(1, 0)], Counted(4));
        assert_eq!(b[(1, 0)], Counted(0));
        assert_eq!(b[(0, 0)], Counted(10));
        assert!(!a.is_same_storage(&b));
    }

    #[test]
    fn test_integer_to_rational_conversion() {
        let a = int_matrix(&[&[1, -2], &[3, 4]]);
        let r: Matrix<Rational> = Matrix::from(&a);
        assert_eq!(r[(0, 1)], q(-2, 1));
        assert_eq!(r.dim(), a.dim());

        let half = r.scale(&q(1, 2));
        assert_eq!(half[(1, 0)], q(3, 2));
        assert!(half[(0, 0)].is_finite());
    }

    #[test]
    fn test_rational_elimination_step() {
        let mut m: Matrix<Rational> = Matrix::from_rows(vec![
            vec![q(2, 1), q(4, 1)],
            vec![q(1, 3), q(1, 1)],
        ])
        .unwrap();
        m.scale_row(0, &q(1, 2));
        m.add_scaled_row(1, 0, &q(-1, 3));
        assert_eq!(m[(1, 0)], Rational::from(0));
        assert_eq!(m[(1, 1)], q(1, 3));

        let x = Vector::from_vec(vec![q(1, 1), q(-1, 2)]);
        assert_eq!(m.mv(&x).unwrap(), Vector::from_vec(vec![Rational::from(0), q(-1, 6)]));
    }

    #[test]
    fn test_infinite_entries_propagate() {
        let inf = Rational::infinity(tessera_integers::Sign::Positive);
        let m: Matrix<Rational> =
            Matrix::from_rows(vec![vec![inf.clone(), q(1, 1)], vec![q(0, 1), q(2, 1)]]).unwrap();
        let x = Vector::from_vec(vec![q(1, 1), q(1, 1)]);
        let y = m.mv(&x).unwrap();
        assert_eq!(y[0], inf);
        assert_eq!(y[1], q(2, 1));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use crate::Matrix;

    fn matrix() -> impl Strategy<Value = Matrix<i64>> {
        (0usize..5, 0usize..5).prop_flat_map(|(r, c)| {
            proptest::collection::vec(-50i64..50, r * c)
                .prop_map(move |data| Matrix::from_vec(r, c, data).unwrap())
        })
    }

    proptest! {
        #[test]
        fn resize_preserves_top_left(a in matrix(), r2 in 0usize..6, c2 in 0usize..6) {
            let mut b = a.share();
            b.resize(r2, c2);
            prop_assert_eq!((b.rows(), b.cols()), (r2, c2));
            prop_assert_eq!(b.as_slice().len(), r2 * c2);
            for i in 0..r2 {
                for j in 0..c2 {
                    let expected = if i < a.rows() && j < a.cols() { a[(i, j)] } else { 0 };
                    prop_assert_eq!(b[(i, j)], expected);
                }
            }
        }

        #[test]
        fn write_through_share_isolated(a in matrix(), v in any::<i64>()) {
            prop_assume!(!a.is_empty());
            let snapshot = a.as_slice().to_vec();
            let mut b = a.share();
            b[(a.rows() - 1, a.cols() - 1)] = v;
            prop_assert_eq!(a.as_slice(), snapshot.as_slice());
            prop_assert!(!a.is_same_storage(&b));
        }

        #[test]
        fn transpose_is_involution(a in matrix()) {
            prop_assert_eq!(a.transpose().transpose(), a);
        }

        #[test]
        fn append_col_matches_resize_then_fill(a in matrix()) {
            prop_assume!(a.rows() > 0);
            let col: Vec<i64> = (0..a.rows() as i64).collect();
            let mut appended = a.share();
            appended.append_col(&col).unwrap();

            let mut resized = a.share();
            resized.resize_cols(a.cols() + 1);
            resized.col_mut(a.cols()).assign(&col).unwrap();

            prop_assert_eq!(appended, resized);
        }
    }
}

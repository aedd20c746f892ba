//! Linear algebra over GF(2) on `u8` matrices holding 0/1 entries.

use crate::core::LogicalError;
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Rank of a binary matrix.
pub fn rank(matrix: ArrayView2<'_, u8>) -> usize {
    let mut m = matrix.to_owned();
    let (rows, cols) = m.dim();
    let mut rank = 0;
    for col in 0..cols {
        if rank >= rows {
            break;
        }
        let Some(pivot) = (rank..rows).find(|&r| m[[r, col]] & 1 == 1) else {
            continue;
        };
        if pivot != rank {
            for c in 0..cols {
                m.swap([pivot, c], [rank, c]);
            }
        }
        for r in 0..rows {
            if r != rank && m[[r, col]] & 1 == 1 {
                for c in 0..cols {
                    let v = m[[rank, c]];
                    m[[r, c]] ^= v;
                }
            }
        }
        rank += 1;
    }
    rank
}

/// Matrix product mod 2.
///
/// # Errors
/// `LogicalError::Construction` when the inner dimensions differ.
pub fn matmul(a: ArrayView2<'_, u8>, b: ArrayView2<'_, u8>) -> Result<Array2<u8>, LogicalError> {
    let (rows, inner) = a.dim();
    let (inner_b, cols) = b.dim();
    if inner != inner_b {
        return Err(LogicalError::Construction {
            message: format!(
                "GF(2) product shape mismatch: {}x{} times {}x{}",
                rows, inner, inner_b, cols
            ),
        });
    }
    let mut out = Array2::<u8>::zeros((rows, cols));
    for i in 0..rows {
        for j in 0..cols {
            let mut acc = 0u8;
            for t in 0..inner {
                acc ^= a[[i, t]] & b[[t, j]];
            }
            out[[i, j]] = acc;
        }
    }
    Ok(out)
}

/// Symplectic inner product of two Pauli vectors given as (x, z) halves.
/// Zero means the operators commute.
pub fn symplectic_product(
    a_x: ArrayView1<'_, u8>,
    a_z: ArrayView1<'_, u8>,
    b_x: ArrayView1<'_, u8>,
    b_z: ArrayView1<'_, u8>,
) -> u8 {
    let xz = a_x.iter().zip(b_z.iter()).fold(0u8, |acc, (x, z)| acc ^ (x & z));
    let zx = a_z.iter().zip(b_x.iter()).fold(0u8, |acc, (z, x)| acc ^ (z & x));
    (xz ^ zx) & 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_rank() {
        let m = arr2(&[[1u8, 1, 0], [0, 1, 1], [1, 0, 1]]);
        assert_eq!(rank(m.view()), 2);
        let id = arr2(&[[1u8, 0], [0, 1]]);
        assert_eq!(rank(id.view()), 2);
        assert_eq!(rank(Array2::<u8>::zeros((3, 4)).view()), 0);
    }

    #[test]
    fn test_matmul_mod_two() -> Result<(), LogicalError> {
        let a = arr2(&[[1u8, 1], [0, 1]]);
        let b = arr2(&[[1u8, 0], [1, 1]]);
        assert_eq!(matmul(a.view(), b.view())?, arr2(&[[0u8, 1], [1, 1]]));
        assert!(matmul(a.view(), arr2(&[[1u8, 0, 1]]).view()).is_err());
        Ok(())
    }

    #[test]
    fn test_symplectic_product() {
        // X vs Z anticommute, XX vs ZZ commute
        let x = arr1(&[1u8, 0]);
        let zero = arr1(&[0u8, 0]);
        let z = arr1(&[1u8, 0]);
        assert_eq!(symplectic_product(x.view(), zero.view(), zero.view(), z.view()), 1);
        let xx = arr1(&[1u8, 1]);
        let zz = arr1(&[1u8, 1]);
        assert_eq!(symplectic_product(xx.view(), zero.view(), zero.view(), zz.view()), 0);
    }
}
